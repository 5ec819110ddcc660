//! Draw economy: hand capacity, table capacity, and deferred draws.
//!
//! Every draw the engine performs, whether from an ability or a combat
//! draw offer, is clamped here before a single card leaves the deck.
//! Clamping to zero is a normal outcome, not an error.
//!
//! ## Key Types
//!
//! - `DrawOffer`: An energy-for-cards trade with a deferred portion
//! - `OfferAvailability`: Whether an offer can be taken right now, and how
//!   many cards it would actually draw
//! - `DeferredDraw`: Cards owed at the start of the next round
//!
//! ```
//! use card_encounter::economy::{capacity, table_capacity, TABLE_CARD_CAP};
//!
//! assert_eq!(capacity(7, 7), 0);
//! assert_eq!(capacity(7, 4), 3);
//! assert_eq!(table_capacity(TABLE_CARD_CAP, 9), 0);
//! ```

use serde::{Deserialize, Serialize};

/// Hard cap on cards on the table (hand plus every combat zone).
pub const TABLE_CARD_CAP: usize = 7;

/// Free room in the hand.
#[must_use]
pub fn capacity(max_hand: usize, hand_count: usize) -> usize {
    max_hand.saturating_sub(hand_count)
}

/// Free room on the table.
#[must_use]
pub fn table_capacity(cap: usize, cards_on_table: usize) -> usize {
    cap.saturating_sub(cards_on_table)
}

/// Clamp a draw request to every limit given.
#[must_use]
pub fn clamp_draw(requested: usize, limits: &[usize]) -> usize {
    limits.iter().fold(requested, |n, &limit| n.min(limit))
}

/// An energy-for-cards trade offered during combat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawOffer {
    /// Energy spent.
    pub cost: i64,
    /// Cards drawn immediately (clamped to capacity).
    pub now: usize,
    /// Cards owed at the start of the next round (never clamped on purchase).
    pub deferred: usize,
}

impl DrawOffer {
    #[must_use]
    pub const fn new(cost: i64, now: usize, deferred: usize) -> Self {
        Self { cost, now, deferred }
    }

    /// "Draw 2 now, +1 next round" for 2 energy.
    #[must_use]
    pub const fn small() -> Self {
        Self::new(2, 2, 1)
    }

    /// "Draw 3 now, +2 next round" for 3 energy.
    #[must_use]
    pub const fn large() -> Self {
        Self::new(3, 3, 2)
    }

    /// Decide whether this offer can be taken.
    ///
    /// Enabled when the player can pay and the table has room for at least
    /// one card. `room` is the smaller of hand and table capacity.
    #[must_use]
    pub fn evaluate(&self, energy: i64, room: usize) -> OfferAvailability {
        let blocked = if energy < self.cost {
            Some(OfferBlock::InsufficientEnergy {
                required: self.cost,
                available: energy,
            })
        } else if room == 0 {
            Some(OfferBlock::TableFull)
        } else {
            None
        };

        OfferAvailability {
            draw_now: if blocked.is_some() { 0 } else { clamp_draw(self.now, &[room]) },
            deferred: if blocked.is_some() { 0 } else { self.deferred },
            blocked,
        }
    }
}

/// Evaluate an offer against the table alone.
///
/// Hand capacity is not considered; `CombatRound::offer_availability`
/// clamps by both.
#[must_use]
pub fn evaluate_offer(
    offer: &DrawOffer,
    energy: i64,
    cards_on_table: usize,
    cap: usize,
) -> OfferAvailability {
    offer.evaluate(energy, table_capacity(cap, cards_on_table))
}

/// Why an offer is disabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OfferBlock {
    InsufficientEnergy { required: i64, available: i64 },
    TableFull,
}

impl std::fmt::Display for OfferBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OfferBlock::InsufficientEnergy { required, available } => {
                write!(f, "needs {required} energy, have {available}")
            }
            OfferBlock::TableFull => f.write_str("table is full"),
        }
    }
}

/// Result of evaluating a draw offer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferAvailability {
    /// Cards that would be drawn now.
    pub draw_now: usize,
    /// Cards that would be added to the deferred counter.
    pub deferred: usize,
    /// `None` when the offer is enabled.
    pub blocked: Option<OfferBlock>,
}

impl OfferAvailability {
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.blocked.is_none()
    }
}

/// Cards owed for a later round.
///
/// Whatever can't be paid out because of capacity keeps carrying forward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeferredDraw {
    owed: usize,
}

impl DeferredDraw {
    #[must_use]
    pub fn new(owed: usize) -> Self {
        Self { owed }
    }

    /// Cards still owed.
    #[must_use]
    pub fn owed(&self) -> usize {
        self.owed
    }

    /// Promise more cards.
    pub fn add(&mut self, n: usize) {
        self.owed += n;
    }

    /// Take as many owed cards as `room` allows. Returns how many to draw.
    pub fn settle(&mut self, room: usize) -> usize {
        let paid = clamp_draw(self.owed, &[room]);
        self.owed -= paid;
        paid
    }

    /// Give back cards that were settled but couldn't actually be drawn
    /// (e.g. the deck ran out).
    pub fn refund(&mut self, n: usize) {
        self.owed += n;
    }
}
