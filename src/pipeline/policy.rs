//! Step failure policy.
//!
//! Costs and effects treat failure differently: a failing cost stops the
//! ability, a failing effect is logged and skipped. The asymmetry is kept
//! as the default and spelled out here instead of living in control flow.
//!
//! Costs paid before a failing cost are not refunded. `PipelineAbort`
//! lists them so a caller that wants compensation can do it.

use serde::{Deserialize, Serialize};

use crate::effects::StepPhase;

/// What to do when a step fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OnFailure {
    /// Stop the pipeline. No completion notification is raised.
    Abort,
    /// Record the failure and move on to the next step.
    Continue,
}

/// Per-phase failure handling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailurePolicy {
    pub costs: OnFailure,
    pub effects: OnFailure,
}

impl Default for FailurePolicy {
    fn default() -> Self {
        Self {
            costs: OnFailure::Abort,
            effects: OnFailure::Continue,
        }
    }
}

impl FailurePolicy {
    /// Abort on any failure.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            costs: OnFailure::Abort,
            effects: OnFailure::Abort,
        }
    }

    /// The rule for a phase.
    #[must_use]
    pub fn for_phase(&self, phase: StepPhase) -> OnFailure {
        match phase {
            StepPhase::Cost => self.costs,
            StepPhase::Effect => self.effects,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_asymmetric() {
        let policy = FailurePolicy::default();
        assert_eq!(policy.for_phase(StepPhase::Cost), OnFailure::Abort);
        assert_eq!(policy.for_phase(StepPhase::Effect), OnFailure::Continue);
    }

    #[test]
    fn test_strict() {
        let policy = FailurePolicy::strict();
        assert_eq!(policy.for_phase(StepPhase::Effect), OnFailure::Abort);
    }
}
