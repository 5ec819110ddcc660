//! Card definitions - static card data.
//!
//! `CardDefinition` holds the immutable properties of a card: its colour,
//! its combat value and the abilities it carries. Runtime data (which
//! entity it is, where it sits) lives on `CardInstance`.

use serde::{Deserialize, Serialize};

use crate::effects::{AbilityDefinition, TriggerKind};

/// Unique identifier for a card definition.
///
/// This identifies the "type" of card (e.g., "Rusty Sword"),
/// not a specific instance in an encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Colour class of a card.
///
/// Colour drives combat placement: some colours are barred from the attack
/// zone, some from combat entirely (see `EncounterConfig`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardColor {
    /// Weapons and strikes.
    Red,
    /// Shields and guards.
    Blue,
    /// Food, water and other provisions.
    Green,
    /// Utility cards.
    Gray,
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use card_encounter::cards::{CardColor, CardDefinition, CardId};
///
/// let sword = CardDefinition::new(CardId::new(1), "Rusty Sword", CardColor::Red)
///     .with_value(3);
///
/// assert_eq!(sword.value, 3);
/// assert!(sword.abilities.is_empty());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardDefinition {
    /// Unique identifier for this card definition.
    pub id: CardId,

    /// Card name (for display/debugging).
    pub name: String,

    /// Colour class.
    pub color: CardColor,

    /// Combat value. Counted toward attack in the attack zone and toward
    /// defense in the defense zone.
    pub value: i64,

    /// Abilities in declaration order.
    #[serde(default)]
    pub abilities: Vec<AbilityDefinition>,
}

impl CardDefinition {
    /// Create a new card definition with value 0 and no abilities.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>, color: CardColor) -> Self {
        Self {
            id,
            name: name.into(),
            color,
            value: 0,
            abilities: Vec::new(),
        }
    }

    /// Set the combat value (builder pattern).
    #[must_use]
    pub fn with_value(mut self, value: i64) -> Self {
        self.value = value;
        self
    }

    /// Add an ability (builder pattern).
    #[must_use]
    pub fn with_ability(mut self, ability: AbilityDefinition) -> Self {
        self.abilities.push(ability);
        self
    }

    /// Abilities that fire on the given trigger, in declaration order.
    pub fn abilities_for(&self, trigger: TriggerKind) -> impl Iterator<Item = &AbilityDefinition> {
        self.abilities.iter().filter(move |a| a.trigger == trigger)
    }
}
