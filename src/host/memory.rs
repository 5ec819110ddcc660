//! In-memory collaborators.
//!
//! Small, deterministic implementations of the host traits. Recording
//! variants keep every call they receive so tests can assert on what the
//! engine asked the presentation layer to do.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::{
    Animator, CombatHost, ConfirmPrompt, ConfirmRequest, Inventory, PlayerStats, StatKind,
};
use crate::cards::CardInstance;
use crate::combat::{LootEntry, OpponentDescriptor};
use crate::core::EntityId;

/// Player stats with per-stat maximums.
///
/// Restores clamp to the maximum; damage floors health at zero.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleStats {
    values: FxHashMap<StatKind, i64>,
    maximums: FxHashMap<StatKind, i64>,
}

impl SimpleStats {
    /// All stats at `max`.
    #[must_use]
    pub fn full(max: i64) -> Self {
        let kinds = [StatKind::Health, StatKind::Energy, StatKind::Hunger, StatKind::Thirst];
        Self {
            values: kinds.iter().map(|&k| (k, max)).collect(),
            maximums: kinds.iter().map(|&k| (k, max)).collect(),
        }
    }

    /// Set a stat's current value (builder pattern).
    #[must_use]
    pub fn with(mut self, kind: StatKind, value: i64) -> Self {
        self.set(kind, value);
        self
    }

    /// Set a stat's maximum (builder pattern).
    #[must_use]
    pub fn with_max(mut self, kind: StatKind, max: i64) -> Self {
        self.maximums.insert(kind, max);
        self
    }

    /// Overwrite a stat's current value.
    pub fn set(&mut self, kind: StatKind, value: i64) {
        self.values.insert(kind, value);
    }

    /// A stat's maximum.
    #[must_use]
    pub fn max(&self, kind: StatKind) -> i64 {
        self.maximums.get(&kind).copied().unwrap_or(i64::MAX)
    }
}

impl PlayerStats for SimpleStats {
    fn stat(&self, kind: StatKind) -> i64 {
        self.values.get(&kind).copied().unwrap_or(0)
    }

    fn restore(&mut self, kind: StatKind, amount: i64) {
        let next = self.stat(kind).saturating_add(amount).min(self.max(kind));
        self.values.insert(kind, next);
    }

    fn take_damage(&mut self, amount: i64) {
        let next = self.health().saturating_sub(amount).max(0);
        self.values.insert(StatKind::Health, next);
    }

    fn spend_energy(&mut self, amount: i64) -> bool {
        let energy = self.energy();
        if energy < amount {
            return false;
        }
        self.values.insert(StatKind::Energy, energy - amount);
        true
    }
}

/// Resource counts keyed by resource ID.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleInventory {
    resources: FxHashMap<String, u32>,
}

impl SimpleInventory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Amount held of a resource.
    #[must_use]
    pub fn amount(&self, resource_id: &str) -> u32 {
        self.resources.get(resource_id).copied().unwrap_or(0)
    }
}

impl Inventory for SimpleInventory {
    fn add_resource(&mut self, resource_id: &str, amount: u32) {
        let held = self.resources.entry(resource_id.to_string()).or_insert(0);
        *held = held.saturating_add(amount);
    }
}

/// Records every request it is shown.
#[derive(Clone, Debug, Default)]
pub struct RecordingPrompt {
    pub shown: Vec<ConfirmRequest>,
}

impl ConfirmPrompt for RecordingPrompt {
    fn show(&mut self, request: &ConfirmRequest) {
        self.shown.push(request.clone());
    }
}

/// A presentation the animator was asked to play.
#[derive(Clone, Debug, PartialEq)]
pub enum AnimatorEvent {
    Draw(Vec<EntityId>),
    RestoreBatch(Vec<(StatKind, i64)>),
    LootPickup { opponent: String, loot: Vec<LootEntry> },
}

/// Records every presentation request in order.
#[derive(Clone, Debug, Default)]
pub struct RecordingAnimator {
    pub events: Vec<AnimatorEvent>,
}

impl RecordingAnimator {
    /// Number of restore batches played.
    #[must_use]
    pub fn restore_batches(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, AnimatorEvent::RestoreBatch(_)))
            .count()
    }
}

impl Animator for RecordingAnimator {
    fn play_draw_animation(&mut self, cards: &[CardInstance]) {
        self.events
            .push(AnimatorEvent::Draw(cards.iter().map(|c| c.entity_id).collect()));
    }

    fn play_stat_restore_batch(&mut self, pairs: &[(StatKind, i64)]) {
        self.events.push(AnimatorEvent::RestoreBatch(pairs.to_vec()));
    }

    fn play_loot_pickup(&mut self, opponent: &OpponentDescriptor, loot: &[LootEntry]) {
        self.events.push(AnimatorEvent::LootPickup {
            opponent: opponent.name.clone(),
            loot: loot.to_vec(),
        });
    }
}

/// Records combat host notifications.
#[derive(Clone, Debug)]
pub struct RecordingHost {
    pub ended: Vec<bool>,
    pub wounds: Vec<i64>,
    pub input_locked: bool,
    pub ui_enabled: bool,
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self {
            ended: Vec::new(),
            wounds: Vec::new(),
            input_locked: false,
            ui_enabled: true,
        }
    }
}

impl CombatHost for RecordingHost {
    fn on_combat_ended(&mut self, victory: bool) {
        self.ended.push(victory);
    }

    fn on_wounds_taken(&mut self, wounds: i64) {
        self.wounds.push(wounds);
    }

    fn set_input_locked(&mut self, locked: bool) {
        self.input_locked = locked;
    }

    fn set_ui_enabled(&mut self, enabled: bool) {
        self.ui_enabled = enabled;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_restore_clamps_to_max() {
        let mut stats = SimpleStats::full(10).with(StatKind::Health, 4);
        stats.heal(3);
        assert_eq!(stats.health(), 7);
        stats.heal(30);
        assert_eq!(stats.health(), 10);
    }

    #[test]
    fn test_stats_restore_saturates() {
        let mut stats = SimpleStats::full(10).with(StatKind::Hunger, 2);
        stats.restore(StatKind::Hunger, i64::MAX);
        assert_eq!(stats.hunger(), 10);

        let mut unbounded = SimpleStats::default().with(StatKind::Thirst, 5);
        unbounded.restore(StatKind::Thirst, i64::MAX);
        assert_eq!(unbounded.thirst(), i64::MAX);

        stats.take_damage(i64::MAX);
        assert_eq!(stats.health(), 0);
    }

    #[test]
    fn test_stats_damage_floors_at_zero() {
        let mut stats = SimpleStats::full(5);
        stats.take_damage(8);
        assert_eq!(stats.health(), 0);
    }

    #[test]
    fn test_spend_energy_all_or_nothing() {
        let mut stats = SimpleStats::full(10).with(StatKind::Energy, 2);
        assert!(!stats.spend_energy(3));
        assert_eq!(stats.energy(), 2);
        assert!(stats.spend_energy(2));
        assert_eq!(stats.energy(), 0);
    }

    #[test]
    fn test_inventory_accumulates() {
        let mut inventory = SimpleInventory::new();
        inventory.add_resource("hide", 2);
        inventory.add_resource("hide", 1);
        assert_eq!(inventory.amount("hide"), 3);
        assert_eq!(inventory.amount("bone"), 0);
    }

    #[test]
    fn test_recording_host_defaults() {
        let mut host = RecordingHost::default();
        assert!(host.ui_enabled);
        host.set_input_locked(true);
        host.on_wounds_taken(3);
        host.on_combat_ended(true);
        assert!(host.input_locked);
        assert_eq!(host.wounds, vec![3]);
        assert_eq!(host.ended, vec![true]);
    }
}
