//! What a pipeline run hands back to its caller.

use serde::{Deserialize, Serialize};

use crate::cards::CardInstance;
use crate::combat::OpponentDescriptor;
use crate::core::EntityId;
use crate::effects::{StepError, StepFailure};
use crate::host::{ConfirmRequest, StatKind};

/// Result of running (or resuming) a pipeline.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub enum PipelineStatus {
    /// Every step ran. Failed effects are listed in the report.
    Completed(PipelineReport),

    /// Waiting for the presentation layer. Resume with the token.
    Suspended(Suspension),

    /// A cost failed or a confirmation was declined.
    Aborted(PipelineAbort),
}

impl PipelineStatus {
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, PipelineStatus::Completed(_))
    }

    #[must_use]
    pub fn is_suspended(&self) -> bool {
        matches!(self, PipelineStatus::Suspended(_))
    }

    #[must_use]
    pub fn is_aborted(&self) -> bool {
        matches!(self, PipelineStatus::Aborted(_))
    }

    /// The resume token, if suspended.
    #[must_use]
    pub fn into_token(self) -> Option<ResumeToken> {
        match self {
            PipelineStatus::Suspended(suspension) => Some(suspension.token),
            _ => None,
        }
    }

    #[must_use]
    pub fn report(&self) -> Option<&PipelineReport> {
        match self {
            PipelineStatus::Completed(report) => Some(report),
            _ => None,
        }
    }

    #[must_use]
    pub fn suspend_reason(&self) -> Option<&SuspendReason> {
        match self {
            PipelineStatus::Suspended(suspension) => Some(&suspension.reason),
            _ => None,
        }
    }
}

/// Outcome of a completed pipeline.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineReport {
    /// Effects that failed and were skipped.
    pub failures: Vec<StepFailure>,
    /// Indices of the costs that were paid.
    pub applied_costs: Vec<usize>,
    /// Combat the caller should start now.
    pub combat_request: Option<Vec<OpponentDescriptor>>,
}

/// Why a pipeline stopped early.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PipelineAbort {
    pub failure: StepFailure,
    /// Costs already paid before the abort. They are not refunded.
    pub applied_costs: Vec<usize>,
}

impl PipelineAbort {
    #[must_use]
    pub fn error(&self) -> &StepError {
        &self.failure.error
    }
}

/// A pause waiting on the presentation layer.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct Suspension {
    pub reason: SuspendReason,
    pub token: ResumeToken,
}

/// What the presentation layer was asked to do.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuspendReason {
    /// A confirmation prompt is showing.
    Confirm(ConfirmRequest),
    /// Drawn cards are animating toward the hand.
    DrawAnimation(Vec<EntityId>),
    /// A merged stat restore is playing.
    RestoreBatch(Vec<(StatKind, i64)>),
}

/// Work carried across a suspension.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub enum Pending {
    /// Nothing to finish; just continue.
    Nothing,
    /// The confirmation cost at `cost_index` awaits an answer.
    Confirmation { cost_index: usize, consume: bool },
    /// Drawn cards still to be put into the hand.
    DrawnCards(Vec<CardInstance>),
}

/// Continuation of a suspended pipeline.
///
/// Not `Clone`. Resuming takes the token by value, so a suspension
/// continues at most once.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[must_use = "a suspended pipeline only continues when its token is resumed"]
pub struct ResumeToken {
    pub(crate) cost_index: usize,
    pub(crate) effect_index: usize,
    pub(crate) pending: Pending,
}

impl ResumeToken {
    /// Next cost to run on resume.
    #[must_use]
    pub fn cost_index(&self) -> usize {
        self.cost_index
    }

    /// Next effect to run on resume.
    #[must_use]
    pub fn effect_index(&self) -> usize {
        self.effect_index
    }

    #[must_use]
    pub fn pending(&self) -> &Pending {
        &self.pending
    }

    #[must_use]
    pub fn awaits_confirmation(&self) -> bool {
        matches!(self.pending, Pending::Confirmation { .. })
    }
}
