//! Resistance check command handler.
//!
//! Call of Cthulhu resistance table: the chance of the active side winning is
//! `(active - passive) * 5 + 50` percent. Above 95 the check succeeds
//! automatically, below 5 it fails automatically.

use log::debug;

use crate::commands::{CommandResult, markdown_response::format_resist};

/// Above this value the check is an automatic success.
const AUTOMATIC_SUCCESS_THRESHOLD: i64 = 95;
/// Below this value the check is an automatic failure.
const AUTOMATIC_FAILURE_THRESHOLD: i64 = 5;

/// Outcome of a resistance check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResistOutcome {
    AutomaticSuccess,
    AutomaticFailure,
    /// Percentage chance of success
    Normal(i64),
}

impl ResistOutcome {
    /// Computes the outcome of `active` against `passive`.
    ///
    /// The arithmetic saturates, so huge inputs still land on the right side of
    /// the thresholds.
    pub fn compute(active: i64, passive: i64) -> Self {
        let result = active
            .saturating_sub(passive)
            .saturating_mul(5)
            .saturating_add(50);

        if result > AUTOMATIC_SUCCESS_THRESHOLD {
            ResistOutcome::AutomaticSuccess
        } else if result < AUTOMATIC_FAILURE_THRESHOLD {
            ResistOutcome::AutomaticFailure
        } else {
            ResistOutcome::Normal(result)
        }
    }
}

pub fn handle_resist(active: i64, passive: i64) -> CommandResult {
    debug!("handling resist command: {} vs {}", active, passive);

    let outcome = ResistOutcome::compute(active, passive);

    debug!("resist outcome {:?}", outcome);

    CommandResult {
        response: format_resist(active, passive, outcome),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_automatic_success() {
        // (80 - 30) * 5 + 50 = 300
        assert_eq!(ResistOutcome::compute(80, 30), ResistOutcome::AutomaticSuccess);
    }

    #[test]
    fn test_compute_automatic_failure() {
        // (10 - 50) * 5 + 50 = -150
        assert_eq!(ResistOutcome::compute(10, 50), ResistOutcome::AutomaticFailure);
    }

    #[test]
    fn test_compute_normal() {
        assert_eq!(ResistOutcome::compute(50, 49), ResistOutcome::Normal(55));
        assert_eq!(ResistOutcome::compute(12, 12), ResistOutcome::Normal(50));
    }

    #[test]
    fn test_compute_thresholds_are_exclusive() {
        // 95 and 5 are still normal results
        assert_eq!(ResistOutcome::compute(59, 50), ResistOutcome::Normal(95));
        assert_eq!(ResistOutcome::compute(50, 59), ResistOutcome::Normal(5));
        assert_eq!(ResistOutcome::compute(60, 50), ResistOutcome::AutomaticSuccess);
        assert_eq!(ResistOutcome::compute(50, 60), ResistOutcome::AutomaticFailure);
    }

    #[test]
    fn test_compute_does_not_overflow() {
        assert_eq!(
            ResistOutcome::compute(i64::MAX, i64::MIN),
            ResistOutcome::AutomaticSuccess
        );
        assert_eq!(
            ResistOutcome::compute(i64::MIN, i64::MAX),
            ResistOutcome::AutomaticFailure
        );
    }

    #[test]
    fn test_handle_resist_normal_reply_contains_result() {
        let result = handle_resist(50, 49);
        assert!(result.response.contains("**55**"));
        assert!(result.response.starts_with("Let's see..."));
    }

    #[test]
    fn test_handle_resist_automatic_replies() {
        assert!(handle_resist(80, 30).response.contains("Automatic Success"));
        assert!(handle_resist(10, 50).response.contains("Automatic Failure"));
    }
}
