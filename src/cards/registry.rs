//! Card registry for definition lookup and instantiation.
//!
//! The `CardRegistry` stores card definitions loaded by the host and mints
//! `CardInstance`s with fresh entity IDs.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::definition::{CardDefinition, CardId};
use super::instance::CardInstance;
use crate::core::entity::EntityAllocator;

/// Registry of card definitions.
///
/// ## Example
///
/// ```
/// use card_encounter::cards::{CardColor, CardDefinition, CardId, CardRegistry};
///
/// let mut registry = CardRegistry::new();
/// registry.register(CardDefinition::new(CardId::new(1), "Dagger", CardColor::Red).with_value(2));
///
/// let dagger = registry.instantiate(CardId::new(1)).unwrap();
/// assert_eq!(dagger.value(), 2);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: FxHashMap<CardId, Arc<CardDefinition>>,
    ids: EntityAllocator,
}

impl CardRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card definition.
    ///
    /// Returns the previous definition if one with the same ID existed.
    pub fn register(&mut self, card: CardDefinition) -> Option<Arc<CardDefinition>> {
        self.cards.insert(card.id, Arc::new(card))
    }

    /// Get a card definition by ID.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Arc<CardDefinition>> {
        self.cards.get(&id)
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Create a new instance of a registered card.
    ///
    /// Returns `None` for unknown IDs.
    pub fn instantiate(&mut self, id: CardId) -> Option<CardInstance> {
        let definition = Arc::clone(self.cards.get(&id)?);
        Some(CardInstance::new(self.ids.allocate(), definition))
    }

    /// Create `count` instances of a registered card.
    pub fn instantiate_many(&mut self, id: CardId, count: usize) -> Vec<CardInstance> {
        (0..count).filter_map(|_| self.instantiate(id)).collect()
    }
}
