//! Step failure reasons.

use serde::{Deserialize, Serialize};

use crate::core::EntityId;
use crate::host::Collaborator;

/// Why a single step could not apply.
///
/// None of these are fatal to the process. Whether one stops the pipeline
/// depends on the phase it happened in (see `pipeline::FailurePolicy`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum StepError {
    #[error("no {0} available")]
    MissingCollaborator(Collaborator),

    #[error("not enough energy: need {required}, have {available}")]
    InsufficientEnergy { required: i64, available: i64 },

    #[error("invalid amount {0}")]
    InvalidAmount(i64),

    #[error("unknown parameter `{0}`")]
    MissingParam(String),

    #[error("source card {0} is not in hand")]
    SourceNotInHand(EntityId),

    #[error("confirmation declined")]
    Declined,

    #[error("combat request has no opponents")]
    NoOpponents,
}

/// Which list of an ability a step belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepPhase {
    Cost,
    Effect,
}

/// A recorded step failure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepFailure {
    pub phase: StepPhase,
    /// Index into the cost or effect list.
    pub index: usize,
    pub error: StepError,
}

impl std::fmt::Display for StepFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let phase = match self.phase {
            StepPhase::Cost => "cost",
            StepPhase::Effect => "effect",
        };
        write!(f, "{phase} #{} failed: {}", self.index, self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            StepError::MissingCollaborator(Collaborator::Stats).to_string(),
            "no player stats available"
        );
        assert_eq!(
            StepError::InsufficientEnergy { required: 3, available: 1 }.to_string(),
            "not enough energy: need 3, have 1"
        );
        assert_eq!(
            StepError::SourceNotInHand(EntityId(4)).to_string(),
            "source card Entity(4) is not in hand"
        );
    }

    #[test]
    fn test_failure_display() {
        let failure = StepFailure {
            phase: StepPhase::Effect,
            index: 2,
            error: StepError::InvalidAmount(-3),
        };
        assert_eq!(failure.to_string(), "effect #2 failed: invalid amount -3");
    }
}
