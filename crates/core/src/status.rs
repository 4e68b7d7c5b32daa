//! Campaign status values and the forward-only transition rule.

/// Freshly created, nothing generated yet.
pub const STATUS_DRAFT: &str = "draft";
/// A generation pass is in flight.
pub const STATUS_GENERATING: &str = "generating";
/// The generation pass completed.
pub const STATUS_DONE: &str = "done";
/// The generation pass failed after it had started. Terminal.
pub const STATUS_ERROR: &str = "error";

/// All valid campaign statuses.
pub const VALID_STATUSES: &[&str] = &[STATUS_DRAFT, STATUS_GENERATING, STATUS_DONE, STATUS_ERROR];

/// Whether moving a campaign from `from` to `to` is allowed.
///
/// Statuses only move forward: `draft -> generating -> done`. The single
/// exception is `generating -> error`, the compensating transition taken
/// when a pass fails mid-flight. `done` and `error` are terminal.
pub fn is_valid_transition(from: &str, to: &str) -> bool {
    matches!(
        (from, to),
        (STATUS_DRAFT, STATUS_GENERATING)
            | (STATUS_GENERATING, STATUS_DONE)
            | (STATUS_GENERATING, STATUS_ERROR)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_transitions_allowed() {
        assert!(is_valid_transition(STATUS_DRAFT, STATUS_GENERATING));
        assert!(is_valid_transition(STATUS_GENERATING, STATUS_DONE));
    }

    #[test]
    fn compensating_error_transition_allowed() {
        assert!(is_valid_transition(STATUS_GENERATING, STATUS_ERROR));
    }

    #[test]
    fn no_regression() {
        assert!(!is_valid_transition(STATUS_GENERATING, STATUS_DRAFT));
        assert!(!is_valid_transition(STATUS_DONE, STATUS_GENERATING));
        assert!(!is_valid_transition(STATUS_DONE, STATUS_DRAFT));
        assert!(!is_valid_transition(STATUS_ERROR, STATUS_DRAFT));
    }

    #[test]
    fn terminal_states_have_no_exits() {
        for to in VALID_STATUSES {
            assert!(!is_valid_transition(STATUS_DONE, to));
            assert!(!is_valid_transition(STATUS_ERROR, to));
        }
    }

    #[test]
    fn no_skipping_generating() {
        assert!(!is_valid_transition(STATUS_DRAFT, STATUS_DONE));
        assert!(!is_valid_transition(STATUS_DRAFT, STATUS_ERROR));
    }
}
