//! Classification des commandes vocales par mots-clés.

/// Catégorie de carte demandée par une commande
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Security,
    System,
    Network,
}

const SECURITY_KEYWORDS: &[&str] = &["security", "threat"];
const SYSTEM_KEYWORDS: &[&str] = &["system", "production", "performance"];
const NETWORK_KEYWORDS: &[&str] = &["network", "traffic"];

fn mentions(lower: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| lower.contains(k))
}

/// Catégories reconnues, dans l'ordre Security, System, Network.
/// Vide si rien ne correspond (carte d'overview par défaut).
pub fn classify(command: &str) -> Vec<Category> {
    let lower = command.to_lowercase();
    [
        (Category::Security, SECURITY_KEYWORDS),
        (Category::System, SYSTEM_KEYWORDS),
        (Category::Network, NETWORK_KEYWORDS),
    ]
    .into_iter()
    .filter(|(_, keywords)| mentions(&lower, keywords))
    .map(|(category, _)| category)
    .collect()
}
