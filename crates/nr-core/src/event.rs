use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::phase::Phase;

/// An entry in the public event feed.
///
/// The feed is append-only and is the only part of match history the
/// narrator may see. Secret outcomes (investigations, who the guardian
/// shielded) never enter it; `is_public` is therefore always true for
/// entries in the feed and exists so consumers can assert that contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicEvent {
    /// The phase whose outcome this entry records.
    pub phase: Phase,
    /// Human-readable description of what happened.
    pub description: String,
    /// Always true for feed entries.
    pub is_public: bool,
    /// When the entry was appended.
    pub at: DateTime<Utc>,
}

impl PublicEvent {
    /// Create a public entry for the given phase.
    pub fn public(phase: Phase, description: impl Into<String>) -> Self {
        Self {
            phase,
            description: description.into(),
            is_public: true,
            at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_events_are_public() {
        let e = PublicEvent::public(Phase::Night, "Nobody died during the night.");
        assert!(e.is_public);
        assert_eq!(e.phase, Phase::Night);
        assert!(e.description.contains("Nobody died"));
    }
}
