//! Round-based combat against one to three opponents.
//!
//! ## Key Types
//!
//! - `OpponentDescriptor`: Attack, armor, health and loot of one opponent
//! - `EngagementSlot`: One opponent plus the attack and defense zones
//!   the player fills against it
//! - `CombatRound`: The state machine that places cards, sells draws and
//!   resolves rounds
//! - `CombatEnv`: Collaborators lent to each combat call
//!
//! ## Round resolution
//!
//! Each slot resolves independently:
//!
//! - opponent damage is `max(0, attack_sum - armor)`
//! - player wounds are `max(0, opponent_attack - defense_sum)`
//!
//! Wounds from all slots are applied to the player as a single hit. Card
//! value feeds both sums; the zone decides which one.

mod error;
mod opponent;
mod round;
mod slot;

pub use error::CombatError;
pub use opponent::{LootEntry, OpponentDescriptor};
pub use round::{CombatEnv, CombatPhase, CombatRound, CombatSummary, RoundOutcome, RoundReport};
pub use slot::{EngagementSlot, SlotExchange, SlotId, SlotPreview, ZoneKind};
