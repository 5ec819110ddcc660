//! Entity identification.
//!
//! Every card instance that exists during an encounter has a unique
//! `EntityId`. Opponents are identified by their engagement slot instead
//! (see `combat::SlotId`), so entity IDs are only ever handed out to cards.
//!
//! ## Usage
//!
//! ```
//! use card_encounter::core::{EntityAllocator, EntityId};
//!
//! let mut ids = EntityAllocator::new();
//! let first = ids.allocate();
//! let second = ids.allocate();
//!
//! assert_eq!(first, EntityId(0));
//! assert_ne!(first, second);
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a card instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Create a new entity ID.
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

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Monotonic allocator for entity IDs.
///
/// IDs are never reused within one allocator, so an instance removed from
/// the game can't be confused with a later one.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EntityAllocator {
    next: u32,
}

impl EntityAllocator {
    /// Create an allocator starting at ID 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next ID.
    pub fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }
}
