//! Collaborator contracts consumed by the engine.
//!
//! The engine owns no cards, no stats and no presentation. Everything it
//! touches outside its own state goes through the traits in this module,
//! and callers inject implementations explicitly (see `effects::Collaborators`
//! and `combat::CombatEnv`). Nothing is looked up through global state.
//!
//! ## Presentation hooks
//!
//! `ConfirmPrompt` and `Animator` are fire-and-forget: the engine tells them
//! what to show and then suspends. When the presentation finishes, the caller
//! resumes the pipeline with the `ResumeToken` it was handed. This keeps the
//! hooks free of callbacks and lets the borrow checker see every mutation.
//!
//! ## Reference implementations
//!
//! `memory` holds simple in-memory implementations used by tests and by
//! headless hosts. Hand and deck piles live in `zones::CardPiles`.

pub mod memory;

use serde::{Deserialize, Serialize};

use crate::cards::CardInstance;
use crate::combat::{LootEntry, OpponentDescriptor};
use crate::core::EntityId;

/// Which collaborator a step needed but didn't get.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Collaborator {
    Hand,
    Deck,
    Stats,
}

impl std::fmt::Display for Collaborator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Collaborator::Hand => "hand",
            Collaborator::Deck => "deck",
            Collaborator::Stats => "player stats",
        };
        f.write_str(name)
    }
}

/// Player stat that effects can restore.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKind {
    Health,
    Energy,
    Hunger,
    Thirst,
}

/// The player's hand, plus the discard and exile piles behind it.
pub trait Hand {
    /// Number of cards currently in hand.
    fn count(&self) -> usize;

    /// Maximum hand size.
    fn max_size(&self) -> usize;

    /// Put a card into the hand.
    fn add_card(&mut self, card: CardInstance);

    /// The card in hand with this ID, if any.
    fn peek_card(&self, id: EntityId) -> Option<&CardInstance>;

    /// Take a card out of the hand without discarding it.
    ///
    /// Used when a card moves onto the combat table.
    fn take_card(&mut self, id: EntityId) -> Option<CardInstance>;

    /// Move a card from hand to the discard pile.
    ///
    /// Returns `false` if the card isn't in hand.
    fn discard_by_instance(&mut self, id: EntityId) -> bool;

    /// Put cards that are not in hand (e.g. from the combat table) straight
    /// into the discard pile.
    fn discard_cards(&mut self, cards: Vec<CardInstance>);

    /// Remove a card from hand and from the game.
    ///
    /// Returns `false` if the card isn't in hand.
    fn exile_by_instance(&mut self, id: EntityId) -> bool;

    /// Signal that pile contents changed so dependent views can refresh.
    fn notify_piles_changed(&mut self);
}

/// The player's draw pile.
pub trait Deck {
    /// Remove up to `n` cards from the top. Returns fewer when exhausted.
    fn draw_many(&mut self, n: usize) -> Vec<CardInstance>;

    /// Cards remaining.
    fn remaining(&self) -> usize;
}

/// Player survival stats.
pub trait PlayerStats {
    /// Current value of a stat.
    fn stat(&self, kind: StatKind) -> i64;

    /// Raise a stat by `amount`. Implementations clamp to their own maximums.
    fn restore(&mut self, kind: StatKind, amount: i64);

    /// Lower health by `amount`.
    fn take_damage(&mut self, amount: i64);

    /// Spend energy. Returns `false` and changes nothing if there isn't enough.
    fn spend_energy(&mut self, amount: i64) -> bool;

    fn heal(&mut self, amount: i64) {
        self.restore(StatKind::Health, amount);
    }

    fn gain_energy(&mut self, amount: i64) {
        self.restore(StatKind::Energy, amount);
    }

    fn health(&self) -> i64 {
        self.stat(StatKind::Health)
    }

    fn energy(&self) -> i64 {
        self.stat(StatKind::Energy)
    }

    fn hunger(&self) -> i64 {
        self.stat(StatKind::Hunger)
    }

    fn thirst(&self) -> i64 {
        self.stat(StatKind::Thirst)
    }
}

/// Resource storage credited by loot.
pub trait Inventory {
    fn add_resource(&mut self, resource_id: &str, amount: u32);
}

/// A yes/no question shown before a cost is paid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmRequest {
    /// Card whose ability asked.
    pub source: EntityId,
    pub message: String,
    /// Optional labelled chips (e.g. "+2 Health") shown under the message.
    #[serde(default)]
    pub chips: Vec<String>,
}

/// Shows confirmation requests.
///
/// The answer comes back through `PipelineExecutor::resume_confirm`.
pub trait ConfirmPrompt {
    fn show(&mut self, request: &ConfirmRequest);
}

/// Presentation layer for draws, stat restores and loot.
pub trait Animator {
    /// Present drawn cards. The pipeline adds them to the hand on resume.
    fn play_draw_animation(&mut self, cards: &[CardInstance]);

    /// Present a merged set of stat restorations, already applied.
    fn play_stat_restore_batch(&mut self, pairs: &[(StatKind, i64)]);

    /// Present an opponent's death and its loot. Loot is credited right
    /// after this returns.
    fn play_loot_pickup(&mut self, opponent: &OpponentDescriptor, loot: &[LootEntry]);
}

/// The screen or map that owns a combat.
pub trait CombatHost {
    fn on_combat_ended(&mut self, victory: bool);

    /// Transient notice after a round's wounds are applied.
    fn on_wounds_taken(&mut self, _wounds: i64) {}

    /// Global input lock held for the duration of a combat.
    fn set_input_locked(&mut self, _locked: bool) {}

    /// Non-combat UI that is disabled while a combat runs.
    fn set_ui_enabled(&mut self, _enabled: bool) {}
}
