//! Effect system for card abilities.
//!
//! Abilities are the building blocks of card behaviour:
//! - `AbilityDefinition`: Trigger plus ordered costs and effects
//! - `EffectStep`: Closed set of step kinds, each carrying its parameters
//! - `EffectContext`: Mutable state of one ability invocation
//! - `StepResolver`: Applies a single step to a context
//!
//! ## Design Philosophy
//!
//! Steps are plain data and dispatch is an exhaustive `match`, so adding a
//! step kind is a compile error everywhere it needs handling. Collaborators
//! are injected through `Collaborators`; a step never reaches for global
//! state. Sequencing, suspension and failure policy live in `pipeline`.

mod ability;
mod context;
mod error;
mod resolver;
mod step;

pub use ability::{AbilityDefinition, TriggerKind};
pub use context::{Collaborators, EffectContext, RestoreBuffer, TableLimit};
pub use error::{StepError, StepFailure, StepPhase};
pub use resolver::StepResolver;
pub use step::{Amount, EffectStep};
