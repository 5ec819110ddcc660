//! In-memory card piles.
//!
//! The engine never owns the player's cards; it talks to `host::Hand` and
//! `host::Deck`. This module provides the reference implementations used by
//! tests and headless hosts.
//!
//! ## Key Types
//!
//! - `DeckPile`: Ordered draw pile with seeded shuffling
//! - `HandPiles`: Hand with discard and exile piles
//! - `CardPiles`: Both, with public fields for split borrowing

pub mod piles;

pub use piles::{CardPiles, DeckPile, HandPiles};
