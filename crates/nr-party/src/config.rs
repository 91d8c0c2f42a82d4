//! Configuration for a party session.

use nr_narrator::NarratorMode;

/// Configuration for a pass-the-device session.
#[derive(Debug, Clone)]
pub struct PartyConfig {
    /// RNG seed for reproducible deals, turn orders, and filler tasks.
    /// `None` seeds from the operating system.
    pub seed: Option<u64>,
    /// How far the narrator may go.
    pub mode: NarratorMode,
    /// The table's public theme string, woven into narration.
    pub theme: String,
    /// Length of the discussion countdown shown to the table, in seconds.
    /// Purely presentational; nothing forces the phase onward.
    pub discussion_secs: Option<u32>,
}

impl Default for PartyConfig {
    fn default() -> Self {
        Self {
            seed: None,
            mode: NarratorMode::default(),
            theme: "a fog-bound village in the high pines".to_string(),
            discussion_secs: None,
        }
    }
}

impl PartyConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the narrator mode.
    pub fn with_mode(mut self, mode: NarratorMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the table theme.
    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }

    /// Show a discussion countdown of the given length.
    pub fn with_discussion_secs(mut self, secs: u32) -> Self {
        self.discussion_secs = Some(secs);
        self
    }
}
