//! Encounter configuration.
//!
//! Hosts configure the engine at startup with an `EncounterConfig`:
//! - `table_cap`: Cards allowed on the table (hand + combat zones)
//! - `max_slots`: Opponents engaged at once
//! - `draw_offers`: The two energy-for-cards trades shown in combat
//! - `placement`: Which card colours may enter which combat zone
//!
//! `EncounterConfig::default()` matches the standard ruleset.

use serde::{Deserialize, Serialize};

use crate::cards::CardColor;
use crate::economy::{DrawOffer, TABLE_CARD_CAP};

/// Default number of simultaneous opponents.
pub const MAX_ENGAGEMENT_SLOTS: usize = 3;

/// Which colours each combat zone refuses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementRules {
    /// Colours barred from the attack zone (still allowed on defense).
    pub attack_rejects: Vec<CardColor>,
    /// Colours barred from every combat zone.
    pub combat_rejects: Vec<CardColor>,
}

impl Default for PlacementRules {
    fn default() -> Self {
        Self {
            attack_rejects: vec![CardColor::Blue],
            combat_rejects: vec![CardColor::Green],
        }
    }
}

/// Complete engine configuration.
///
/// ## Example
///
/// ```
/// use card_encounter::core::EncounterConfig;
/// use card_encounter::economy::DrawOffer;
///
/// let config = EncounterConfig::default()
///     .with_table_cap(9)
///     .with_draw_offers([DrawOffer::new(1, 1, 0), DrawOffer::large()]);
///
/// assert_eq!(config.table_cap, 9);
/// assert_eq!(config.max_slots, 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterConfig {
    /// Maximum cards on the table.
    pub table_cap: usize,

    /// Maximum simultaneous opponents. Extra opponents are ignored.
    ///
    /// Read through `slot_limit`, which keeps it within 1..=3 however it
    /// was set.
    pub max_slots: usize,

    /// Draw offers, in button order.
    pub draw_offers: [DrawOffer; 2],

    /// Colour placement rules.
    pub placement: PlacementRules,
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self {
            table_cap: TABLE_CARD_CAP,
            max_slots: MAX_ENGAGEMENT_SLOTS,
            draw_offers: [DrawOffer::small(), DrawOffer::large()],
            placement: PlacementRules::default(),
        }
    }
}

impl EncounterConfig {
    #[must_use]
    pub fn with_table_cap(mut self, cap: usize) -> Self {
        self.table_cap = cap;
        self
    }

    /// Set the slot limit, clamped to 1..=3.
    #[must_use]
    pub fn with_max_slots(mut self, slots: usize) -> Self {
        self.max_slots = slots.clamp(1, MAX_ENGAGEMENT_SLOTS);
        self
    }

    /// Opponents engaged at once: `max_slots` clamped to 1..=3.
    #[must_use]
    pub fn slot_limit(&self) -> usize {
        self.max_slots.clamp(1, MAX_ENGAGEMENT_SLOTS)
    }

    #[must_use]
    pub fn with_draw_offers(mut self, offers: [DrawOffer; 2]) -> Self {
        self.draw_offers = offers;
        self
    }

    #[must_use]
    pub fn with_placement(mut self, placement: PlacementRules) -> Self {
        self.placement = placement;
        self
    }
}
