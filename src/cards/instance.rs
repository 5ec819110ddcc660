//! Card instances - runtime card state.
//!
//! `CardInstance` is one physical copy of a card in the encounter. It pairs a
//! unique `EntityId` with a shared, immutable `CardDefinition`; cloning an
//! instance is cheap because the definition is reference-counted.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::definition::{CardColor, CardDefinition, CardId};
use crate::core::entity::EntityId;

/// A card instance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardInstance {
    /// Unique entity ID for this instance.
    pub entity_id: EntityId,

    /// Shared definition.
    pub definition: Arc<CardDefinition>,
}

impl CardInstance {
    /// Create a card instance.
    #[must_use]
    pub fn new(entity_id: EntityId, definition: Arc<CardDefinition>) -> Self {
        Self {
            entity_id,
            definition,
        }
    }

    /// Definition ID.
    #[must_use]
    pub fn card_id(&self) -> CardId {
        self.definition.id
    }

    /// Colour class.
    #[must_use]
    pub fn color(&self) -> CardColor {
        self.definition.color
    }

    /// Combat value.
    #[must_use]
    pub fn value(&self) -> i64 {
        self.definition.value
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.definition.name
    }
}

impl std::fmt::Display for CardInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", self.definition.name, self.entity_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sword() -> Arc<CardDefinition> {
        Arc::new(CardDefinition::new(CardId::new(1), "Sword", CardColor::Red).with_value(3))
    }

    #[test]
    fn test_card_instance_accessors() {
        let instance = CardInstance::new(EntityId(10), sword());

        assert_eq!(instance.entity_id, EntityId(10));
        assert_eq!(instance.card_id(), CardId::new(1));
        assert_eq!(instance.color(), CardColor::Red);
        assert_eq!(instance.value(), 3);
        assert_eq!(instance.name(), "Sword");
        assert_eq!(format!("{}", instance), "Sword [Entity(10)]");
    }

    #[test]
    fn test_instances_share_definition() {
        let def = sword();
        let a = CardInstance::new(EntityId(1), Arc::clone(&def));
        let b = CardInstance::new(EntityId(2), Arc::clone(&def));

        assert!(Arc::ptr_eq(&a.definition, &b.definition));
        assert_ne!(a, b);
    }

    #[test]
    fn test_card_instance_serialization() {
        let instance = CardInstance::new(EntityId(10), sword());

        let json = serde_json::to_string(&instance).unwrap();
        let deserialized: CardInstance = serde_json::from_str(&json).unwrap();

        assert_eq!(instance, deserialized);
    }
}
