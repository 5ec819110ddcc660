//! # card-encounter
//!
//! A card-driven encounter engine: card abilities run through a suspendable
//! cost/effect pipeline, and fights against one to three opponents are
//! resolved round by round.
//!
//! ## Design Principles
//!
//! 1. **Host-Agnostic**: The engine owns no cards, stats or presentation.
//!    Everything outside its own state is reached through the traits in
//!    `host`, injected per call.
//!
//! 2. **Suspend, Don't Block**: Confirmations and animations hand control
//!    back with a `ResumeToken`. The caller resumes exactly once.
//!
//! 3. **Configuration Over Convention**: Table cap, slot count, draw offers
//!    and placement rules come from `EncounterConfig`.
//!
//! ## Modules
//!
//! - `core`: Entity IDs, RNG, configuration
//! - `cards`: Card definitions, instances, registry
//! - `host`: Collaborator traits and in-memory implementations
//! - `zones`: In-memory hand, deck, discard and exile piles
//! - `economy`: Draw clamping, draw offers, deferred draws
//! - `effects`: Abilities, steps, effect context, step resolution
//! - `pipeline`: Suspendable executor with resume tokens
//! - `combat`: Engagement slots and the round resolver

pub mod core;
pub mod cards;
pub mod host;
pub mod zones;
pub mod economy;
pub mod effects;
pub mod pipeline;
pub mod combat;

// Re-export commonly used types
pub use crate::core::{
    EncounterConfig, PlacementRules,
    EntityId, EntityAllocator,
    GameRng,
};

pub use crate::cards::{CardColor, CardDefinition, CardId, CardInstance, CardRegistry};

pub use crate::host::{
    Animator, CombatHost, ConfirmPrompt, ConfirmRequest, Deck, Hand, Inventory, PlayerStats,
    StatKind,
};

pub use crate::zones::{CardPiles, DeckPile, HandPiles};

pub use crate::economy::{DeferredDraw, DrawOffer, OfferAvailability, OfferBlock};

pub use crate::effects::{
    AbilityDefinition, Amount, Collaborators, EffectContext, EffectStep, StepError, StepFailure,
    TriggerKind,
};

pub use crate::pipeline::{
    FailurePolicy, OnFailure, PipelineExecutor, PipelineStatus, ResumeToken, SuspendReason,
};

pub use crate::combat::{
    CombatEnv, CombatError, CombatPhase, CombatRound, CombatSummary, EngagementSlot, LootEntry,
    OpponentDescriptor, RoundOutcome, SlotId, ZoneKind,
};
