//! The narration contract and the built-in template narrator.
//!
//! A narrator turns a [`NarrationRequest`] into display text. When no
//! narrator is configured, or the configured one fails, callers fall back
//! to one fixed template per phase — the game must never stall on a
//! missing storyteller.

use nr_core::{Phase, Winner};

use crate::mode::NarratorMode;
use crate::request::NarrationRequest;

/// Errors a narration collaborator can report.
#[derive(Debug, thiserror::Error)]
pub enum NarratorError {
    /// The collaborator could not produce text.
    #[error("narrator unavailable: {0}")]
    Unavailable(String),
}

/// A narration collaborator: pure request/response, no state feedback.
pub trait Narrator {
    /// Produce narration text for the request, or fail.
    fn narrate(&self, request: &NarrationRequest) -> Result<String, NarratorError>;
}

/// The fixed per-phase fallback template.
///
/// Shaped like the real narrator's output: a phase header, a short body,
/// and the instruction to the table.
pub fn fallback_narration(phase: Phase, winner: Option<Winner>, instruction: &str) -> String {
    let body = match phase {
        Phase::Setup => "The players have gathered. Darkness waits at the edge of town.",
        Phase::RoleDistribution => "The deal is done. Every hand now hides a secret.",
        Phase::RoleReveal => "Each of you must now discover your secret self. The game begins.",
        Phase::Night => {
            "The village sleeps. Shadows move between the houses. The wolves wake to choose their prey."
        }
        Phase::Morning => "Dawn breaks over the village. The night gives up its secrets.",
        Phase::Discussion => "The village gathers to talk. Trust no one. Suspicion runs high.",
        Phase::Voting => "The time has come to decide. Who will the village cast out?",
        Phase::Endgame => match winner {
            Some(Winner::Village) => "The village has triumphed over the dark!",
            Some(Winner::Wolves) => "The wolves have taken the village!",
            None => "The game has concluded.",
        },
    };
    format!("PHASE: {phase}\n\n{body}\n\nDO THIS NOW: {instruction}")
}

/// The built-in narrator: renders the fallback templates with a touch of
/// theme and mode flavor. Keeps the game fully playable offline.
#[derive(Debug, Clone, Default)]
pub struct TemplateNarrator;

impl TemplateNarrator {
    /// Create a template narrator.
    pub fn new() -> Self {
        Self
    }

    fn mode_flourish(mode: NarratorMode) -> &'static str {
        match mode {
            NarratorMode::Family => "Keep it friendly out there.",
            NarratorMode::Adult => "Sharpen your knives, politely.",
            NarratorMode::Unhinged => "All bets are off tonight.",
        }
    }
}

impl Narrator for TemplateNarrator {
    fn narrate(&self, request: &NarrationRequest) -> Result<String, NarratorError> {
        let mut text = fallback_narration(request.phase, request.winner, &request.instruction);
        if !request.theme.trim().is_empty() {
            text = format!("({})\n{text}", request.theme.trim());
        }
        text.push('\n');
        text.push_str(Self::mode_flourish(request.mode));
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_has_header_and_instruction() {
        let text = fallback_narration(Phase::Night, None, "Wolves: choose.");
        assert!(text.starts_with("PHASE: Night"));
        assert!(text.contains("wolves wake"));
        assert!(text.ends_with("DO THIS NOW: Wolves: choose."));
    }

    #[test]
    fn endgame_fallback_names_the_winner() {
        let text = fallback_narration(Phase::Endgame, Some(Winner::Village), "Play again!");
        assert!(text.contains("village has triumphed"));
        let text = fallback_narration(Phase::Endgame, Some(Winner::Wolves), "Play again!");
        assert!(text.contains("wolves have taken"));
    }

    #[test]
    fn template_narrator_weaves_theme_and_mode() {
        let request =
            NarrationRequest::for_phase(Phase::Morning, NarratorMode::Unhinged, "a fog-bound pier");
        let text = TemplateNarrator::new().narrate(&request).unwrap();
        assert!(text.contains("a fog-bound pier"));
        assert!(text.contains("Dawn breaks"));
        assert!(text.contains("All bets are off"));
    }

    #[test]
    fn template_narrator_skips_blank_theme() {
        let request = NarrationRequest::for_phase(Phase::Morning, NarratorMode::Family, "  ");
        let text = TemplateNarrator::new().narrate(&request).unwrap();
        assert!(text.starts_with("PHASE: Morning"));
    }
}
