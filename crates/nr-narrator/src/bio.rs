//! Cosmetic bio formatting.
//!
//! Raw free-text notes about a player become a compact display string for
//! the narrator to riff on. The result lands in the player's flavor field
//! and is never read by any resolver.

/// A bio-formatting collaborator.
pub trait BioFormatter {
    /// Turn raw notes into a display string.
    fn format(&self, name: &str, raw: &str) -> String;
}

/// Deterministic built-in formatter: extracts up to five comma- or
/// line-separated traits and parenthesizes them.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainBioFormatter;

impl PlainBioFormatter {
    /// Create a plain formatter.
    pub fn new() -> Self {
        Self
    }
}

impl BioFormatter for PlainBioFormatter {
    fn format(&self, _name: &str, raw: &str) -> String {
        let traits: Vec<&str> = raw
            .split([',', ';', '\n'])
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .take(5)
            .collect();
        if traits.is_empty() {
            String::new()
        } else {
            format!("({})", traits.join(", "))
        }
    }
}
