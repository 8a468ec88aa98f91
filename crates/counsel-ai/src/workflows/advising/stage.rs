//! Stage state machine for the advising pipeline.

use super::domain::AdvisingStage;

/// Domain events that may move a user between pipeline stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageEvent {
    /// Profile passed final-submit validation.
    ProfileCompleted,
    /// First shortlist entry created for the user.
    ShortlistStarted,
    /// A shortlist entry was locked as the application target.
    UniversityLocked,
    /// The lock was released or an entry removed; carries the number of
    /// entries remaining afterwards.
    ShortlistReduced { remaining: usize },
}

/// Violations of the pipeline's structural invariants. Always surfaced,
/// never silently ignored.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("cannot remove a locked shortlist entry; release the lock first")]
    LockedEntryRemoval,
    #[error("operation requires stage {required} or later, current stage is {found}")]
    IncompatibleStage {
        required: AdvisingStage,
        found: AdvisingStage,
    },
    #[error("profile must be completed before requesting {operation}")]
    ProfileIncomplete { operation: &'static str },
}

/// Apply an event to the current stage.
///
/// Transitions are idempotent: replaying an event that already took effect
/// returns the current stage unchanged instead of erroring.
pub fn advance(
    current: AdvisingStage,
    event: StageEvent,
) -> Result<AdvisingStage, InvariantViolation> {
    match event {
        StageEvent::ProfileCompleted => Ok(current.max(AdvisingStage::Discovery)),
        StageEvent::ShortlistStarted => {
            require_at_least(current, AdvisingStage::Discovery)?;
            Ok(current.max(AdvisingStage::Shortlist))
        }
        StageEvent::UniversityLocked => {
            require_at_least(current, AdvisingStage::Shortlist)?;
            Ok(current.max(AdvisingStage::Locked))
        }
        StageEvent::ShortlistReduced { remaining } => {
            require_at_least(current, AdvisingStage::Discovery)?;
            if remaining == 0 {
                Ok(AdvisingStage::Discovery)
            } else {
                Ok(AdvisingStage::Shortlist)
            }
        }
    }
}

/// Guard an operation that is only valid at or past `required`.
pub fn require_at_least(
    current: AdvisingStage,
    required: AdvisingStage,
) -> Result<(), InvariantViolation> {
    if current < required {
        return Err(InvariantViolation::IncompatibleStage {
            required,
            found: current,
        });
    }
    Ok(())
}
