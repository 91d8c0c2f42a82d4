use serde::{Deserialize, Serialize};

/// How far the narrator is allowed to go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarratorMode {
    /// Family-friendly; no edge at all.
    #[default]
    Family,
    /// Mild ribbing allowed; still safe for the dinner table.
    Adult,
    /// Chaotic and theatrical, but never hateful.
    Unhinged,
}

impl NarratorMode {
    /// Parse a mode from a user-supplied string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "family" | "pg" => Some(Self::Family),
            "adult" => Some(Self::Adult),
            "unhinged" | "chaos" => Some(Self::Unhinged),
            _ => None,
        }
    }
}

impl std::fmt::Display for NarratorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Family => write!(f, "Family"),
            Self::Adult => write!(f, "Adult"),
            Self::Unhinged => write!(f, "Unhinged"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_variants() {
        assert_eq!(NarratorMode::parse("family"), Some(NarratorMode::Family));
        assert_eq!(NarratorMode::parse("PG"), Some(NarratorMode::Family));
        assert_eq!(NarratorMode::parse("Adult"), Some(NarratorMode::Adult));
        assert_eq!(NarratorMode::parse("chaos"), Some(NarratorMode::Unhinged));
        assert_eq!(NarratorMode::parse("gibberish"), None);
    }

    #[test]
    fn default_is_family() {
        assert_eq!(NarratorMode::default(), NarratorMode::Family);
    }
}
