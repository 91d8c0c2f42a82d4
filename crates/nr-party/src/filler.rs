//! Idle-filler task for seats with no secret action.
//!
//! Every seat spends roughly the same time holding the device, so a
//! plain villager's turn is indistinguishable from a special role's.
//! The filler returns only a completion signal; it carries no game data.

use rand::Rng;
use rand::rngs::StdRng;

/// What answering the task produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillerSignal {
    /// The task is finished; the seat may pass the device on.
    Complete,
    /// Wrong answer; the seat tries again.
    TryAgain,
}

/// A quick-sum arithmetic task.
///
/// Three wrong attempts complete the task anyway — nobody gets stuck
/// holding the device.
#[derive(Debug, Clone)]
pub struct QuickSum {
    a: u32,
    b: u32,
    attempts: u32,
}

impl QuickSum {
    /// Deal a fresh task.
    pub fn deal(rng: &mut StdRng) -> Self {
        Self {
            a: rng.random_range(3..=17),
            b: rng.random_range(3..=17),
            attempts: 0,
        }
    }

    /// The question to show the seat holder.
    pub fn prompt(&self) -> String {
        format!("{} + {} = ?", self.a, self.b)
    }

    /// Check an answer.
    pub fn answer(&mut self, guess: u32) -> FillerSignal {
        if guess == self.a + self.b {
            return FillerSignal::Complete;
        }
        self.attempts += 1;
        if self.attempts >= 3 {
            FillerSignal::Complete
        } else {
            FillerSignal::TryAgain
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn correct_answer_completes() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut task = QuickSum::deal(&mut rng);
        let answer = task.a + task.b;
        assert_eq!(task.answer(answer), FillerSignal::Complete);
    }

    #[test]
    fn three_misses_complete_anyway() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut task = QuickSum::deal(&mut rng);
        assert_eq!(task.answer(0), FillerSignal::TryAgain);
        assert_eq!(task.answer(0), FillerSignal::TryAgain);
        assert_eq!(task.answer(0), FillerSignal::Complete);
    }

    #[test]
    fn prompt_shows_both_operands() {
        let mut rng = StdRng::seed_from_u64(3);
        let task = QuickSum::deal(&mut rng);
        let prompt = task.prompt();
        assert!(prompt.contains(&task.a.to_string()));
        assert!(prompt.contains("= ?"));
    }

    #[test]
    fn operands_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..100 {
            let task = QuickSum::deal(&mut rng);
            assert!((3..=17).contains(&task.a));
            assert!((3..=17).contains(&task.b));
        }
    }
}
