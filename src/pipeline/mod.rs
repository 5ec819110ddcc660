//! Suspendable ability pipeline.
//!
//! The executor walks an ability's costs, then its effects, through one
//! `EffectContext`. Any step may hand control back to the caller:
//!
//! - a confirmation cost, while the prompt is on screen
//! - an animated draw, while the cards fly into the hand
//! - a run of stat restores, while the merged restore plays
//!
//! ## Example Usage
//!
//! ```
//! use std::sync::Arc;
//! use card_encounter::cards::{CardColor, CardDefinition, CardId, CardInstance};
//! use card_encounter::core::EntityId;
//! use card_encounter::effects::{AbilityDefinition, Collaborators, EffectContext, EffectStep};
//! use card_encounter::host::memory::RecordingPrompt;
//! use card_encounter::host::Hand;
//! use card_encounter::pipeline::{PipelineExecutor, PipelineStatus};
//! use card_encounter::zones::CardPiles;
//!
//! let def = CardDefinition::new(CardId::new(1), "Scroll", CardColor::Gray);
//! let scroll = CardInstance::new(EntityId(1), Arc::new(def));
//! let ability = AbilityDefinition::manual()
//!     .cost(EffectStep::confirm("Read the scroll?"))
//!     .effect(EffectStep::DiscardSelf);
//!
//! let mut piles = CardPiles::new(7);
//! piles.hand.add_card(scroll.clone());
//! let mut prompt = RecordingPrompt::default();
//!
//! let mut ctx = EffectContext::new(
//!     scroll,
//!     ability,
//!     Collaborators::new().with_hand(&mut piles.hand).with_prompt(&mut prompt),
//! );
//!
//! let executor = PipelineExecutor::new();
//! let PipelineStatus::Suspended(suspension) = executor.start(&mut ctx) else {
//!     panic!("confirmation should suspend");
//! };
//!
//! // ... later, once the player clicked "yes":
//! let status = executor.resume_confirm(&mut ctx, suspension.token, true);
//! assert!(status.is_completed());
//! ```
//!
//! Suspension hands back a `ResumeToken` instead of capturing a closure.
//! Resuming consumes the token, so each suspension resumes at most once.

mod executor;
mod policy;
mod status;

pub use executor::{PipelineExecutor, TriggeredRun};
pub use policy::{FailurePolicy, OnFailure};
pub use status::{
    Pending, PipelineAbort, PipelineReport, PipelineStatus, ResumeToken, SuspendReason, Suspension,
};
