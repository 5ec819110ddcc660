//! Ability definitions.
//!
//! An ability is an immutable template: a trigger, an ordered list of cost
//! steps and an ordered list of effect steps. Running one is the job of
//! `pipeline::PipelineExecutor`.

use serde::{Deserialize, Serialize};

use super::step::EffectStep;

/// When an ability fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriggerKind {
    /// The player activates it from the card.
    Manual,
    /// The card is played.
    OnPlay,
    /// The card is drawn.
    OnDraw,
    /// The card is discarded.
    OnDiscard,
}

/// A card ability.
///
/// ## Example
///
/// ```
/// use card_encounter::effects::{AbilityDefinition, EffectStep};
/// use card_encounter::host::StatKind;
///
/// let eat = AbilityDefinition::manual()
///     .cost(EffectStep::confirm_consume("Eat the bread?", ["+3 Hunger"]))
///     .effect(EffectStep::restore(StatKind::Hunger, 3))
///     .effect(EffectStep::restore(StatKind::Health, 1));
///
/// assert_eq!(eat.costs.len(), 1);
/// assert_eq!(eat.effects.len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AbilityDefinition {
    pub trigger: TriggerKind,

    /// Paid before any effect. A failing cost aborts the ability.
    #[serde(default)]
    pub costs: Vec<EffectStep>,

    /// Applied after all costs. A failing effect is logged and skipped.
    #[serde(default)]
    pub effects: Vec<EffectStep>,
}

impl AbilityDefinition {
    /// Create an empty ability with the given trigger.
    #[must_use]
    pub fn new(trigger: TriggerKind) -> Self {
        Self {
            trigger,
            costs: Vec::new(),
            effects: Vec::new(),
        }
    }

    /// Create an empty manually-activated ability.
    #[must_use]
    pub fn manual() -> Self {
        Self::new(TriggerKind::Manual)
    }

    /// Append a cost step (builder pattern).
    #[must_use]
    pub fn cost(mut self, step: EffectStep) -> Self {
        self.costs.push(step);
        self
    }

    /// Append an effect step (builder pattern).
    #[must_use]
    pub fn effect(mut self, step: EffectStep) -> Self {
        self.effects.push(step);
        self
    }

    /// Whether either list contains a step that can suspend the pipeline.
    #[must_use]
    pub fn may_suspend(&self) -> bool {
        self.costs.iter().any(EffectStep::is_confirmation)
            || self.effects.iter().any(|s| s.is_restore() || s.is_animated_draw())
    }
}
