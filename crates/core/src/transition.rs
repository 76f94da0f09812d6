//! Appointment status transition rules.
//!
//! Responsibilities:
//! - Decide whether an appointment may move from one status to another
//! - List the statuses reachable from a given status
//! - Apply the configured policy for terminal statuses transitioning to themselves
//!
//! Notes:
//! - The rule is a pure function of the `(from, to)` pair and is not symmetric
//! - Any status may be reverted to `Scheduled`

use crate::{CoreError, CoreResult};
use omrs_types::AppointmentStatus;
use std::str::FromStr;

/// An ordered `(from, to)` pair of appointment statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusTransition {
    pub from: AppointmentStatus,
    pub to: AppointmentStatus,
}

impl StatusTransition {
    pub fn new(from: AppointmentStatus, to: AppointmentStatus) -> Self {
        Self { from, to }
    }

    /// Evaluates the pair with the bare [`can_transition`] rule, ignoring any configured
    /// terminal self-transition policy.
    pub fn is_allowed(&self) -> bool {
        can_transition(self.from, self.to)
    }

    /// Evaluates the pair under `policy`.
    pub fn is_allowed_under(&self, policy: &TransitionPolicy) -> bool {
        policy.permits(self.from, self.to)
    }
}

impl std::fmt::Display for StatusTransition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Returns whether an appointment in status `from` may be moved to status `to`.
///
/// Allowed pairs are exactly:
/// - anything to `Scheduled`
/// - `Scheduled` to any other status
/// - `CheckedIn` to `Completed`, `Cancelled` or `Missed`
///
/// Every other pair is blocked, including `CheckedIn -> CheckedIn` and every transition
/// out of a terminal status other than back to `Scheduled`.
pub fn can_transition(from: AppointmentStatus, to: AppointmentStatus) -> bool {
    use AppointmentStatus::*;

    let allowed = to == Scheduled
        || (from == Scheduled && to != Scheduled)
        || (from == CheckedIn && matches!(to, Completed | Cancelled | Missed));

    tracing::trace!(%from, %to, allowed, "evaluated appointment status transition");
    allowed
}

/// Returns every status reachable from `from`, in lifecycle order.
pub fn allowed_targets(from: AppointmentStatus) -> Vec<AppointmentStatus> {
    AppointmentStatus::ALL
        .into_iter()
        .filter(|to| can_transition(from, *to))
        .collect()
}

/// Whether a terminal status may "transition" to itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TerminalSelfTransition {
    /// `Completed -> Completed` and friends are rejected like any terminal-to-terminal move.
    #[default]
    Blocked,
    /// Re-asserting a terminal status is accepted as a no-op.
    Allowed,
}

impl FromStr for TerminalSelfTransition {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "blocked" => Ok(Self::Blocked),
            "allowed" => Ok(Self::Allowed),
            other => Err(CoreError::Config(format!(
                "terminal self-transition must be \"allowed\" or \"blocked\", got {other:?}"
            ))),
        }
    }
}

/// Transition rules combined with the configured terminal self-transition policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransitionPolicy {
    pub terminal_self_transition: TerminalSelfTransition,
}

impl TransitionPolicy {
    pub fn new(terminal_self_transition: TerminalSelfTransition) -> Self {
        Self {
            terminal_self_transition,
        }
    }

    /// Same as [`can_transition`], except that a terminal status may move to itself when the
    /// policy is [`TerminalSelfTransition::Allowed`].
    pub fn permits(&self, from: AppointmentStatus, to: AppointmentStatus) -> bool {
        if from == to
            && from.is_terminal()
            && self.terminal_self_transition == TerminalSelfTransition::Allowed
        {
            return true;
        }
        can_transition(from, to)
    }

    /// Statuses reachable from `from` under this policy, in lifecycle order.
    pub fn allowed_targets(&self, from: AppointmentStatus) -> Vec<AppointmentStatus> {
        AppointmentStatus::ALL
            .into_iter()
            .filter(|to| self.permits(from, *to))
            .collect()
    }

    /// Checks a transition, returning an error for blocked pairs.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::TransitionBlocked`] if the pair is not permitted.
    pub fn check(&self, from: AppointmentStatus, to: AppointmentStatus) -> CoreResult<()> {
        if self.permits(from, to) {
            return Ok(());
        }
        tracing::debug!(%from, %to, "blocked appointment status transition");
        Err(CoreError::TransitionBlocked { from, to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use omrs_types::AppointmentStatus::*;

    const EXPECTED: [(AppointmentStatus, AppointmentStatus, bool); 25] = [
        (Scheduled, Scheduled, true),
        (Scheduled, CheckedIn, true),
        (Scheduled, Completed, true),
        (Scheduled, Cancelled, true),
        (Scheduled, Missed, true),
        (CheckedIn, Scheduled, true),
        (CheckedIn, CheckedIn, false),
        (CheckedIn, Completed, true),
        (CheckedIn, Cancelled, true),
        (CheckedIn, Missed, true),
        (Completed, Scheduled, true),
        (Completed, CheckedIn, false),
        (Completed, Completed, false),
        (Completed, Cancelled, false),
        (Completed, Missed, false),
        (Cancelled, Scheduled, true),
        (Cancelled, CheckedIn, false),
        (Cancelled, Completed, false),
        (Cancelled, Cancelled, false),
        (Cancelled, Missed, false),
        (Missed, Scheduled, true),
        (Missed, CheckedIn, false),
        (Missed, Completed, false),
        (Missed, Cancelled, false),
        (Missed, Missed, false),
    ];

    #[test]
    fn matches_transition_table_for_all_pairs() {
        for (from, to, expected) in EXPECTED {
            assert_eq!(
                can_transition(from, to),
                expected,
                "unexpected result for {from} -> {to}"
            );
        }
    }

    #[test]
    fn table_covers_every_pair_once() {
        for from in AppointmentStatus::ALL {
            for to in AppointmentStatus::ALL {
                let hits = EXPECTED
                    .iter()
                    .filter(|(f, t, _)| *f == from && *t == to)
                    .count();
                assert_eq!(hits, 1, "{from} -> {to} listed {hits} times");
            }
        }
    }

    #[test]
    fn any_status_can_revert_to_scheduled() {
        for from in AppointmentStatus::ALL {
            assert!(can_transition(from, Scheduled), "{from} -> Scheduled");
        }
    }

    #[test]
    fn terminal_statuses_cannot_reach_each_other() {
        let terminal = [Completed, Cancelled, Missed];
        for from in terminal {
            for to in terminal {
                if from != to {
                    assert!(!can_transition(from, to), "{from} -> {to}");
                    assert!(!can_transition(to, from), "{to} -> {from}");
                }
            }
            assert!(!can_transition(from, CheckedIn), "{from} -> CheckedIn");
        }
    }

    #[test]
    fn directions_are_evaluated_independently() {
        assert!(can_transition(Scheduled, CheckedIn));
        assert!(can_transition(CheckedIn, Scheduled));
        assert!(can_transition(CheckedIn, Missed));
        assert!(!can_transition(Missed, CheckedIn));
    }

    #[test]
    fn allowed_targets_follow_lifecycle_order() {
        assert_eq!(
            allowed_targets(Scheduled),
            vec![Scheduled, CheckedIn, Completed, Cancelled, Missed]
        );
        assert_eq!(
            allowed_targets(CheckedIn),
            vec![Scheduled, Completed, Cancelled, Missed]
        );
        assert_eq!(allowed_targets(Cancelled), vec![Scheduled]);
    }

    #[test]
    fn default_policy_matches_rule() {
        let policy = TransitionPolicy::default();
        for (from, to, expected) in EXPECTED {
            assert_eq!(policy.permits(from, to), expected, "{from} -> {to}");
        }
    }

    #[test]
    fn allowed_policy_only_relaxes_terminal_self_transitions() {
        let policy = TransitionPolicy::new(TerminalSelfTransition::Allowed);
        for (from, to, expected) in EXPECTED {
            let relaxed = from == to && from.is_terminal();
            assert_eq!(
                policy.permits(from, to),
                expected || relaxed,
                "{from} -> {to}"
            );
        }
        assert!(!policy.permits(CheckedIn, CheckedIn));
        assert_eq!(policy.allowed_targets(Missed), vec![Scheduled, Missed]);
    }

    #[test]
    fn check_reports_blocked_pair() {
        let policy = TransitionPolicy::default();
        assert!(policy.check(CheckedIn, Completed).is_ok());

        let err = policy
            .check(Completed, Cancelled)
            .expect_err("terminal to terminal is blocked");
        match err {
            CoreError::TransitionBlocked { from, to } => {
                assert_eq!((from, to), (Completed, Cancelled));
            }
            other => panic!("expected TransitionBlocked, got {other:?}"),
        }
    }

    #[test]
    fn status_transition_pair_displays_and_evaluates() {
        let pair = StatusTransition::new(CheckedIn, CheckedIn);
        assert!(!pair.is_allowed());
        assert_eq!(pair.to_string(), "CheckedIn -> CheckedIn");
    }

    #[test]
    fn status_transition_pair_respects_policy() {
        let strict = TransitionPolicy::default();
        let relaxed = TransitionPolicy::new(TerminalSelfTransition::Allowed);

        let repeat = StatusTransition::new(Completed, Completed);
        assert!(!repeat.is_allowed());
        assert!(!repeat.is_allowed_under(&strict));
        assert!(repeat.is_allowed_under(&relaxed));

        for (from, to, _) in EXPECTED {
            let pair = StatusTransition::new(from, to);
            assert_eq!(pair.is_allowed_under(&relaxed), relaxed.permits(from, to));
            assert_eq!(pair.is_allowed_under(&strict), pair.is_allowed());
        }
    }

    #[test]
    fn parses_terminal_self_transition_policy() {
        assert_eq!(
            " Allowed ".parse::<TerminalSelfTransition>().expect("parses"),
            TerminalSelfTransition::Allowed
        );
        assert_eq!(
            "blocked".parse::<TerminalSelfTransition>().expect("parses"),
            TerminalSelfTransition::Blocked
        );
        assert!("maybe".parse::<TerminalSelfTransition>().is_err());
    }
}
