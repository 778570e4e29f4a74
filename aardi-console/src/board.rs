//! Local card board, same rules as the browser dashboard.

use serde::Deserialize;

pub const MAX_CARDS: usize = 12;

const RED: &str = "#ef4444";
const AMBER: &str = "#f59e0b";
const CLEAR_KEYWORDS: &[&str] = &["clear", "reset", "remove"];

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MetricRow {
    pub label: String,
    pub value: String,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub title: String,
    pub badge: String,
    pub badge_text: String,
    #[serde(default)]
    pub metrics: Vec<MetricRow>,
}

/// Handled locally, never sent to the kernel.
pub fn is_clear_command(command: &str) -> bool {
    let lower = command.to_lowercase();
    CLEAR_KEYWORDS.iter().any(|k| lower.contains(k))
}

#[derive(Debug, Default)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cards whose title is not on the board yet go first; the board is then
    /// truncated to `MAX_CARDS`. Returns how many cards were added.
    pub fn merge(&mut self, incoming: Vec<Card>) -> usize {
        let mut fresh: Vec<Card> = Vec::with_capacity(incoming.len());
        for card in incoming {
            if !self.cards.iter().any(|c| c.title == card.title) {
                fresh.push(card);
            }
        }
        let added = fresh.len();
        fresh.append(&mut self.cards);
        fresh.truncate(MAX_CARDS);
        self.cards = fresh;
        added
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn render(&self) -> String {
        if self.cards.is_empty() {
            return "Your dashboard is ready for commands\n".to_string();
        }
        let mut out = format!("{} active cards\n", self.cards.len());
        for card in &self.cards {
            out.push_str(&format!("\n┌ {} [{}] {}\n", card.title, card.badge_text, card.badge));
            for row in &card.metrics {
                let marker = match row.color.as_deref() {
                    Some(RED) => "!!",
                    Some(AMBER) => "! ",
                    _ => "  ",
                };
                out.push_str(&format!("│ {}{:<20} {}\n", marker, row.label, row.value));
            }
            out.push_str("└\n");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(title: &str) -> Card {
        Card {
            title: title.to_string(),
            badge: "info".into(),
            badge_text: "Live".into(),
            metrics: vec![MetricRow { label: "CPU".into(), value: "12.0%".into(), color: None }],
        }
    }

    #[test]
    fn test_new_cards_go_first() {
        let mut board = Board::new();
        board.merge(vec![card("A")]);
        board.merge(vec![card("B"), card("C")]);
        let titles: Vec<_> = board.cards().iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, ["B", "C", "A"]);
    }

    #[test]
    fn test_duplicate_titles_are_dropped() {
        let mut board = Board::new();
        board.merge(vec![card("Security Analysis")]);
        let mut again = card("Security Analysis");
        again.badge_text = "Demo".into();
        assert_eq!(board.merge(vec![again]), 0);
        assert_eq!(board.len(), 1);
        assert_eq!(board.cards()[0].badge_text, "Live");
    }

    #[test]
    fn test_capped_at_twelve() {
        let mut board = Board::new();
        for i in 0..10 {
            board.merge(vec![card(&format!("old-{i}"))]);
        }
        board.merge((0..5).map(|i| card(&format!("new-{i}"))).collect());
        assert_eq!(board.len(), MAX_CARDS);
        assert_eq!(board.cards()[0].title, "new-0");
        // les plus anciennes sortent par la fin
        assert!(!board.cards().iter().any(|c| c.title == "old-0"));
        assert!(board.cards().iter().any(|c| c.title == "old-9"));
    }

    #[test]
    fn test_clear_and_render() {
        let mut board = Board::new();
        board.merge(vec![card("System Performance")]);
        let text = board.render();
        assert!(text.starts_with("1 active cards"));
        assert!(text.contains("System Performance [Live]"));
        assert!(text.contains("│   CPU"));
        board.clear();
        assert!(board.is_empty());
        assert!(board.render().contains("ready for commands"));
    }

    #[test]
    fn test_card_from_kernel_json() {
        let json = r##"{"id":"sec-1","title":"Security Analysis","badge":"critical","badgeText":"Live",
            "metrics":[{"label":"Threats Blocked","value":"25","color":"#ef4444"},
                       {"label":"Active Connections","value":"300"}],
            "chart":true,"priority":1}"##;
        let card: Card = serde_json::from_str(json).unwrap();
        assert_eq!(card.badge_text, "Live");
        assert_eq!(card.metrics[1].color, None);
    }

    #[test]
    fn test_clear_keywords() {
        assert!(is_clear_command("Clear dashboard"));
        assert!(is_clear_command("RESET"));
        assert!(!is_clear_command("show network traffic"));
    }
}
