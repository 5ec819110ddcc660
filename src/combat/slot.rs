//! Engagement slots.
//!
//! A slot binds one opponent to the two card zones the player fills against
//! it. Sums are cached and refreshed by `recount`, which every mutation in
//! this file goes through.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::opponent::OpponentDescriptor;
use crate::cards::CardInstance;
use crate::core::EntityId;

/// Stable identifier of a slot within one combat.
///
/// Slots are removed as opponents die, so positions shift; IDs don't.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotId(pub u32);

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Slot({})", self.0)
    }
}

/// The two zones of a slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZoneKind {
    Attack,
    Defense,
}

/// What the player would see on the slot before ending the turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotPreview {
    /// Wounds this opponent would deal.
    pub pending_wounds: i64,
    /// Health segments the opponent would lose, capped at current health.
    pub segments_lost: i64,
}

/// One slot's share of a round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotExchange {
    pub slot: SlotId,
    /// Damage dealt to the opponent.
    pub damage: i64,
    /// Wounds dealt to the player.
    pub wounds: i64,
    pub killed: bool,
}

/// One opponent and the cards played against it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngagementSlot {
    id: SlotId,
    opponent: Arc<OpponentDescriptor>,
    current_health: i64,
    attack_zone: Vec<CardInstance>,
    defense_zone: Vec<CardInstance>,
    attack_sum: i64,
    defense_sum: i64,
}

impl EngagementSlot {
    /// Bind an opponent at full health with empty zones.
    #[must_use]
    pub fn new(id: SlotId, opponent: Arc<OpponentDescriptor>) -> Self {
        Self {
            id,
            current_health: opponent.max_health,
            opponent,
            attack_zone: Vec::new(),
            defense_zone: Vec::new(),
            attack_sum: 0,
            defense_sum: 0,
        }
    }

    #[must_use]
    pub fn id(&self) -> SlotId {
        self.id
    }

    #[must_use]
    pub fn opponent(&self) -> &Arc<OpponentDescriptor> {
        &self.opponent
    }

    #[must_use]
    pub fn current_health(&self) -> i64 {
        self.current_health
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.current_health > 0
    }

    #[must_use]
    pub fn zone(&self, kind: ZoneKind) -> &[CardInstance] {
        match kind {
            ZoneKind::Attack => &self.attack_zone,
            ZoneKind::Defense => &self.defense_zone,
        }
    }

    #[must_use]
    pub fn attack_sum(&self) -> i64 {
        self.attack_sum
    }

    #[must_use]
    pub fn defense_sum(&self) -> i64 {
        self.defense_sum
    }

    /// Cards in both zones.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.attack_zone.len() + self.defense_zone.len()
    }

    /// Which zone holds `id`, if any.
    #[must_use]
    pub fn zone_of(&self, id: EntityId) -> Option<ZoneKind> {
        if self.attack_zone.iter().any(|c| c.entity_id == id) {
            Some(ZoneKind::Attack)
        } else if self.defense_zone.iter().any(|c| c.entity_id == id) {
            Some(ZoneKind::Defense)
        } else {
            None
        }
    }

    /// Wounds the opponent would deal with the current defense.
    #[must_use]
    pub fn pending_wounds(&self) -> i64 {
        (self.opponent.attack - self.defense_sum).max(0)
    }

    /// Damage the current attack would deal through armor.
    #[must_use]
    pub fn damage_through_armor(&self) -> i64 {
        (self.attack_sum - self.opponent.armor).max(0)
    }

    #[must_use]
    pub fn preview(&self) -> SlotPreview {
        SlotPreview {
            pending_wounds: self.pending_wounds(),
            segments_lost: self.damage_through_armor().min(self.current_health),
        }
    }

    pub(crate) fn place(&mut self, kind: ZoneKind, card: CardInstance) {
        match kind {
            ZoneKind::Attack => self.attack_zone.push(card),
            ZoneKind::Defense => self.defense_zone.push(card),
        }
        self.recount();
    }

    pub(crate) fn take(&mut self, id: EntityId) -> Option<CardInstance> {
        let zone = match self.zone_of(id)? {
            ZoneKind::Attack => &mut self.attack_zone,
            ZoneKind::Defense => &mut self.defense_zone,
        };
        let pos = zone.iter().position(|c| c.entity_id == id)?;
        let card = zone.remove(pos);
        self.recount();
        Some(card)
    }

    /// Empty both zones, attack first.
    pub(crate) fn drain(&mut self) -> Vec<CardInstance> {
        let mut cards = std::mem::take(&mut self.attack_zone);
        cards.append(&mut self.defense_zone);
        self.recount();
        cards
    }

    /// Refresh cached sums from zone contents.
    pub(crate) fn recount(&mut self) {
        self.attack_sum = self.attack_zone.iter().map(CardInstance::value).sum();
        self.defense_sum = self.defense_zone.iter().map(CardInstance::value).sum();
    }

    /// Resolve this slot's half of a round.
    ///
    /// Touches only this slot, so slots can be resolved in any order.
    pub(crate) fn exchange(&mut self) -> SlotExchange {
        self.recount();
        let damage = self.damage_through_armor();
        let wounds = self.pending_wounds();
        self.current_health = (self.current_health - damage).max(0);
        SlotExchange {
            slot: self.id,
            damage,
            wounds,
            killed: !self.is_alive(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardColor, CardDefinition, CardId};

    fn card(id: u32, value: i64) -> CardInstance {
        let def = CardDefinition::new(CardId::new(id), "Card", CardColor::Red).with_value(value);
        CardInstance::new(EntityId(id), Arc::new(def))
    }

    fn slot(attack: i64, armor: i64, health: i64) -> EngagementSlot {
        EngagementSlot::new(
            SlotId(0),
            Arc::new(OpponentDescriptor::new("Foe", attack, armor, health)),
        )
    }

    #[test]
    fn test_sums_follow_placement() {
        let mut slot = slot(4, 0, 5);
        slot.place(ZoneKind::Attack, card(1, 3));
        slot.place(ZoneKind::Attack, card(2, 2));
        slot.place(ZoneKind::Defense, card(3, 1));
        assert_eq!(slot.attack_sum(), 5);
        assert_eq!(slot.defense_sum(), 1);

        let taken = slot.take(EntityId(2)).unwrap();
        assert_eq!(taken.value(), 2);
        assert_eq!(slot.attack_sum(), 3);
        assert!(slot.take(EntityId(2)).is_none());

        assert_eq!(slot.drain().len(), 2);
        assert_eq!(slot.attack_sum(), 0);
        assert_eq!(slot.defense_sum(), 0);
        assert_eq!(slot.card_count(), 0);
    }

    #[test]
    fn test_preview() {
        let mut slot = slot(4, 2, 2);
        slot.place(ZoneKind::Defense, card(1, 1));
        slot.place(ZoneKind::Attack, card(2, 7));

        let preview = slot.preview();
        assert_eq!(preview.pending_wounds, 3);
        // 5 through armor, capped at 2 health
        assert_eq!(preview.segments_lost, 2);
    }

    #[test]
    fn test_exchange_armor_and_death() {
        let mut slot = slot(0, 2, 3);
        slot.place(ZoneKind::Attack, card(1, 5));

        let exchange = slot.exchange();
        assert_eq!(exchange.damage, 3);
        assert!(exchange.killed);
        assert_eq!(slot.current_health(), 0);
    }

    #[test]
    fn test_exchange_floors() {
        let mut slot = slot(1, 5, 3);
        slot.place(ZoneKind::Attack, card(1, 2));
        slot.place(ZoneKind::Defense, card(2, 4));

        let exchange = slot.exchange();
        assert_eq!(exchange.damage, 0);
        assert_eq!(exchange.wounds, 0);
        assert!(!exchange.killed);
        assert_eq!(slot.current_health(), 3);
    }
}
