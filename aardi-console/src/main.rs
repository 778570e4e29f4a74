//! AARDI Console - text-mode stand-in for the browser dashboard
//!
//! Reads one command per line on stdin, talks to the kernel the same way the
//! page does and prints the board plus the sentence the page would speak.

mod board;
mod session;

use anyhow::Result;
use clap::Parser;
use session::{KernelClient, Session};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "aardi-console", about = "Type dashboard commands instead of speaking them")]
struct Args {
    /// Kernel base URL
    #[arg(long, env = "AARDI_KERNEL_URL", default_value = "http://localhost:3000")]
    kernel: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("aardi_console=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut session = Session::new(KernelClient::new(&args.kernel)?);
    info!("talking to {}", args.kernel);

    println!("AARDI Environmental Intelligence");
    println!("Type a command (\"show security status\", \"clear dashboard\"), Ctrl+D to quit.\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = line.trim();
        if command.is_empty() {
            continue;
        }
        let spoken = session.handle(command).await;
        println!("{}", session.board().render());
        println!("🔊 {}\n", spoken);
    }
    Ok(())
}
