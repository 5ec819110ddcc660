//! Combat errors.

use serde::{Deserialize, Serialize};

use super::round::CombatPhase;
use super::slot::{SlotId, ZoneKind};
use crate::cards::CardColor;
use crate::core::EntityId;
use crate::economy::OfferBlock;

/// Why a combat operation was refused.
///
/// A refused operation leaves the combat, the hand and the player's stats
/// exactly as they were.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum CombatError {
    #[error("combat is not active (phase {0:?})")]
    NotActive(CombatPhase),

    #[error("combat already in progress")]
    AlreadyStarted,

    #[error("combat needs at least one opponent")]
    NoOpponents,

    #[error("no such slot: {0}")]
    UnknownSlot(SlotId),

    #[error("card {0} is not in hand")]
    CardNotInHand(EntityId),

    #[error("card {0} is not on the table")]
    CardNotPlaced(EntityId),

    #[error("{color:?} card {card} can't be placed in the {zone:?} zone")]
    Rejected {
        card: EntityId,
        color: CardColor,
        zone: ZoneKind,
    },

    #[error("no draw offer #{0}")]
    UnknownOffer(usize),

    #[error("draw offer unavailable: {0}")]
    OfferBlocked(OfferBlock),
}
