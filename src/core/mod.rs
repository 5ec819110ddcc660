//! Core engine types: entity IDs, configuration, RNG.
//!
//! This module contains the building blocks shared by the pipeline and the
//! combat resolver. Hosts configure behaviour via `EncounterConfig` rather
//! than modifying the core.

pub mod config;
pub mod entity;
pub mod rng;

pub use config::{EncounterConfig, PlacementRules, MAX_ENGAGEMENT_SLOTS};
pub use entity::{EntityAllocator, EntityId};
pub use rng::GameRng;
