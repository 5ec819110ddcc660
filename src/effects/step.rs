//! Pipeline steps.
//!
//! `EffectStep` is the atom of an ability. The same type is used for costs
//! and effects; what differs is how the executor reacts to failure.
//!
//! ## Synchronous steps
//!
//! Most steps apply immediately and report success or a `StepError`:
//! - `DiscardSelf`, `RemoveFromGame`: move the source card
//! - `SpendEnergy`, `TakeDamage`, `RestoreStat`: touch player stats
//! - `StartAdHocCombat`: hand a combat request back to the caller
//!
//! ## Suspending steps
//!
//! - `ConfirmCost` / `ConfirmConsumeCost`: wait for the player's answer
//! - `DrawCards { animated: true }`: wait for the draw animation
//! - runs of `RestoreStat`: wait for one merged restore presentation

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::error::StepError;
use crate::combat::OpponentDescriptor;
use crate::host::StatKind;

/// A numeric step parameter.
///
/// Either a literal, or the name of an entry in the context's parameter map
/// (so one ability template can be reused with different magnitudes).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Amount {
    Fixed(i64),
    Param(String),
}

impl Amount {
    /// Named parameter amount.
    #[must_use]
    pub fn param(key: impl Into<String>) -> Self {
        Amount::Param(key.into())
    }

    /// Resolve against a parameter map. Negative results are rejected.
    pub fn resolve(&self, params: &FxHashMap<String, i64>) -> Result<i64, StepError> {
        let value = match self {
            Amount::Fixed(v) => *v,
            Amount::Param(key) => *params
                .get(key)
                .ok_or_else(|| StepError::MissingParam(key.clone()))?,
        };
        if value < 0 {
            return Err(StepError::InvalidAmount(value));
        }
        Ok(value)
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Amount::Fixed(value)
    }
}

/// One step of an ability pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum EffectStep {
    /// Discard the source card from hand.
    DiscardSelf,

    /// Draw cards into hand, clamped to hand (and table) capacity.
    DrawCards {
        count: Amount,
        /// Suspend for a draw animation when an animator is available.
        #[serde(default)]
        animated: bool,
    },

    /// Spend energy; fails without spending if there isn't enough.
    SpendEnergy { amount: Amount },

    /// Raise a player stat. Consecutive restores are presented as one batch.
    RestoreStat { stat: StatKind, amount: Amount },

    /// Ask the player to confirm before continuing.
    ConfirmCost { message: String },

    /// Ask the player to confirm, then consume (discard) the source card.
    ConfirmConsumeCost {
        message: String,
        #[serde(default)]
        chips: Vec<String>,
    },

    /// Remove the source card from the game.
    RemoveFromGame,

    /// Damage the player.
    TakeDamage { amount: Amount },

    /// Ask the caller to start a combat against these opponents.
    StartAdHocCombat { opponents: Vec<OpponentDescriptor> },
}

impl EffectStep {
    /// Draw a fixed number of cards without animation.
    #[must_use]
    pub fn draw(count: i64) -> Self {
        EffectStep::DrawCards {
            count: Amount::Fixed(count),
            animated: false,
        }
    }

    /// Draw a fixed number of cards with a draw animation.
    #[must_use]
    pub fn draw_animated(count: i64) -> Self {
        EffectStep::DrawCards {
            count: Amount::Fixed(count),
            animated: true,
        }
    }

    #[must_use]
    pub fn spend_energy(amount: i64) -> Self {
        EffectStep::SpendEnergy {
            amount: Amount::Fixed(amount),
        }
    }

    #[must_use]
    pub fn restore(stat: StatKind, amount: i64) -> Self {
        EffectStep::RestoreStat {
            stat,
            amount: Amount::Fixed(amount),
        }
    }

    #[must_use]
    pub fn take_damage(amount: i64) -> Self {
        EffectStep::TakeDamage {
            amount: Amount::Fixed(amount),
        }
    }

    #[must_use]
    pub fn confirm(message: impl Into<String>) -> Self {
        EffectStep::ConfirmCost {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn confirm_consume<S: Into<String>>(
        message: impl Into<String>,
        chips: impl IntoIterator<Item = S>,
    ) -> Self {
        EffectStep::ConfirmConsumeCost {
            message: message.into(),
            chips: chips.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn start_combat(opponents: impl IntoIterator<Item = OpponentDescriptor>) -> Self {
        EffectStep::StartAdHocCombat {
            opponents: opponents.into_iter().collect(),
        }
    }

    /// Confirmation costs never auto-continue when a prompt exists.
    #[must_use]
    pub fn is_confirmation(&self) -> bool {
        matches!(
            self,
            EffectStep::ConfirmCost { .. } | EffectStep::ConfirmConsumeCost { .. }
        )
    }

    #[must_use]
    pub fn is_restore(&self) -> bool {
        matches!(self, EffectStep::RestoreStat { .. })
    }

    #[must_use]
    pub fn is_animated_draw(&self) -> bool {
        matches!(self, EffectStep::DrawCards { animated: true, .. })
    }

    /// Short name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            EffectStep::DiscardSelf => "discard_self",
            EffectStep::DrawCards { .. } => "draw_cards",
            EffectStep::SpendEnergy { .. } => "spend_energy",
            EffectStep::RestoreStat { .. } => "restore_stat",
            EffectStep::ConfirmCost { .. } => "confirm",
            EffectStep::ConfirmConsumeCost { .. } => "confirm_consume",
            EffectStep::RemoveFromGame => "remove_from_game",
            EffectStep::TakeDamage { .. } => "take_damage",
            EffectStep::StartAdHocCombat { .. } => "start_combat",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_fixed_and_param() {
        let mut params = FxHashMap::default();
        params.insert("heal".to_string(), 4);

        assert_eq!(Amount::Fixed(2).resolve(&params), Ok(2));
        assert_eq!(Amount::param("heal").resolve(&params), Ok(4));
        assert_eq!(
            Amount::param("missing").resolve(&params),
            Err(StepError::MissingParam("missing".to_string()))
        );
    }

    #[test]
    fn test_amount_rejects_negative() {
        let params = FxHashMap::default();
        assert_eq!(Amount::Fixed(-1).resolve(&params), Err(StepError::InvalidAmount(-1)));
        assert_eq!(Amount::from(0).resolve(&params), Ok(0));
    }

    #[test]
    fn test_step_classification() {
        assert!(EffectStep::confirm("ok?").is_confirmation());
        assert!(EffectStep::confirm_consume("eat?", ["+1"]).is_confirmation());
        assert!(!EffectStep::DiscardSelf.is_confirmation());

        assert!(EffectStep::restore(StatKind::Health, 1).is_restore());
        assert!(EffectStep::draw_animated(1).is_animated_draw());
        assert!(!EffectStep::draw(1).is_animated_draw());
    }

    #[test]
    fn test_confirm_consume_chips() {
        match EffectStep::confirm_consume("Eat?", ["+2 Hunger", "+1 Health"]) {
            EffectStep::ConfirmConsumeCost { message, chips } => {
                assert_eq!(message, "Eat?");
                assert_eq!(chips, vec!["+2 Hunger".to_string(), "+1 Health".to_string()]);
            }
            other => panic!("Expected ConfirmConsumeCost, got {:?}", other),
        }
    }

    #[test]
    fn test_step_serialization() {
        let step = EffectStep::DrawCards {
            count: Amount::param("n"),
            animated: true,
        };
        let json = serde_json::to_string(&step).unwrap();
        let deserialized: EffectStep = serde_json::from_str(&json).unwrap();
        assert_eq!(step, deserialized);
    }
}
