//! In-memory card piles.
//!
//! `DeckPile` is an ordered draw pile (index 0 = bottom, last = top) and
//! `HandPiles` holds the hand together with its discard and exile piles.
//! They implement `host::Deck` and `host::Hand` respectively.
//!
//! The two are separate types so a caller can lend both to one
//! `EffectContext` at the same time:
//!
//! ```
//! use card_encounter::zones::CardPiles;
//!
//! let mut piles = CardPiles::new(7);
//! let CardPiles { deck, hand } = &mut piles;
//! assert_eq!(deck.len(), 0);
//! assert_eq!(hand.cards().len(), 0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cards::CardInstance;
use crate::core::{EntityId, GameRng};
use crate::host::{Deck, Hand};

/// Ordered draw pile.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct DeckPile {
    cards: Vec<CardInstance>,
}

impl DeckPile {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add several cards to the top, in order (the last one ends up on top).
    pub fn extend(&mut self, cards: impl IntoIterator<Item = CardInstance>) {
        self.cards.extend(cards);
    }

    /// Shuffle the pile.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.cards);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl Deck for DeckPile {
    fn draw_many(&mut self, n: usize) -> Vec<CardInstance> {
        let take = n.min(self.cards.len());
        let split = self.cards.len() - take;
        // Top of the pile is drawn first.
        let mut drawn = self.cards.split_off(split);
        drawn.reverse();
        drawn
    }

    fn remaining(&self) -> usize {
        self.cards.len()
    }
}

/// Hand plus its discard and exile piles.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HandPiles {
    hand: Vec<CardInstance>,
    discard: Vec<CardInstance>,
    exile: Vec<CardInstance>,
    max_size: usize,
    /// How many times `notify_piles_changed` was raised.
    notifications: u32,
}

impl HandPiles {
    #[must_use]
    pub fn new(max_size: usize) -> Self {
        Self {
            hand: Vec::new(),
            discard: Vec::new(),
            exile: Vec::new(),
            max_size,
            notifications: 0,
        }
    }

    /// Cards in hand, in the order they arrived.
    #[must_use]
    pub fn cards(&self) -> &[CardInstance] {
        &self.hand
    }

    /// Discard pile, oldest first.
    #[must_use]
    pub fn discard_pile(&self) -> &[CardInstance] {
        &self.discard
    }

    /// Cards removed from the game.
    #[must_use]
    pub fn exiled(&self) -> &[CardInstance] {
        &self.exile
    }

    /// Whether a card is in hand.
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.hand.iter().any(|c| c.entity_id == id)
    }

    /// Number of completion notifications raised so far.
    #[must_use]
    pub fn notifications(&self) -> u32 {
        self.notifications
    }

    fn remove(&mut self, id: EntityId) -> Option<CardInstance> {
        let idx = self.hand.iter().position(|c| c.entity_id == id)?;
        Some(self.hand.remove(idx))
    }
}

impl Hand for HandPiles {
    fn count(&self) -> usize {
        self.hand.len()
    }

    fn max_size(&self) -> usize {
        self.max_size
    }

    fn add_card(&mut self, card: CardInstance) {
        self.hand.push(card);
    }

    fn peek_card(&self, id: EntityId) -> Option<&CardInstance> {
        self.hand.iter().find(|c| c.entity_id == id)
    }

    fn take_card(&mut self, id: EntityId) -> Option<CardInstance> {
        self.remove(id)
    }

    fn discard_by_instance(&mut self, id: EntityId) -> bool {
        match self.remove(id) {
            Some(card) => {
                self.discard.push(card);
                true
            }
            None => false,
        }
    }

    fn discard_cards(&mut self, cards: Vec<CardInstance>) {
        self.discard.extend(cards);
    }

    fn exile_by_instance(&mut self, id: EntityId) -> bool {
        match self.remove(id) {
            Some(card) => {
                self.exile.push(card);
                true
            }
            None => false,
        }
    }

    fn notify_piles_changed(&mut self) {
        self.notifications += 1;
        debug!(hand = self.hand.len(), discard = self.discard.len(), "piles changed");
    }
}

/// A player's complete set of piles.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CardPiles {
    pub deck: DeckPile,
    pub hand: HandPiles,
}

impl CardPiles {
    /// Empty piles with the given hand size limit.
    #[must_use]
    pub fn new(max_hand_size: usize) -> Self {
        Self {
            deck: DeckPile::new(),
            hand: HandPiles::new(max_hand_size),
        }
    }

    /// Total cards across all piles.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.deck.len() + self.hand.hand.len() + self.hand.discard.len() + self.hand.exile.len()
    }
}
