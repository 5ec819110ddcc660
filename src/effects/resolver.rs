//! Step resolution - applying one step to an `EffectContext`.
//!
//! `StepResolver` knows what each step does. It doesn't know about phases,
//! suspension or failure policy; that is the executor's business. The
//! executor calls the finer-grained helpers (`draw`, `consume_source`) when
//! it needs to split a step around a suspension point.

use tracing::debug;

use super::context::EffectContext;
use super::error::StepError;
use super::step::{Amount, EffectStep};
use crate::cards::CardInstance;
use crate::host::StatKind;

/// Applies steps to an effect context.
pub struct StepResolver;

impl StepResolver {
    /// Apply a step synchronously.
    ///
    /// Confirmation steps apply as if confirmed; the executor only calls
    /// this for them when no prompt is available.
    pub fn apply(step: &EffectStep, ctx: &mut EffectContext<'_>) -> Result<(), StepError> {
        match step {
            EffectStep::DiscardSelf => {
                let id = ctx.source().entity_id;
                if ctx.hand()?.discard_by_instance(id) {
                    Ok(())
                } else {
                    Err(StepError::SourceNotInHand(id))
                }
            }

            EffectStep::DrawCards { count, .. } => {
                let drawn = Self::draw(ctx, count)?;
                let hand = ctx.hand()?;
                for card in drawn {
                    hand.add_card(card);
                }
                Ok(())
            }

            EffectStep::SpendEnergy { amount } => {
                let amount = amount.resolve(ctx.params())?;
                let stats = ctx.stats()?;
                let available = stats.energy();
                if stats.spend_energy(amount) {
                    Ok(())
                } else {
                    Err(StepError::InsufficientEnergy {
                        required: amount,
                        available,
                    })
                }
            }

            EffectStep::RestoreStat { stat, amount } => Self::restore(ctx, *stat, amount),

            EffectStep::ConfirmCost { .. } => Ok(()),

            EffectStep::ConfirmConsumeCost { .. } => Self::consume_source(ctx),

            EffectStep::RemoveFromGame => {
                let id = ctx.source().entity_id;
                if ctx.hand()?.exile_by_instance(id) {
                    Ok(())
                } else {
                    Err(StepError::SourceNotInHand(id))
                }
            }

            EffectStep::TakeDamage { amount } => {
                let amount = amount.resolve(ctx.params())?;
                ctx.stats()?.take_damage(amount);
                Ok(())
            }

            EffectStep::StartAdHocCombat { opponents } => {
                if opponents.is_empty() {
                    return Err(StepError::NoOpponents);
                }
                ctx.request_combat(opponents.clone());
                Ok(())
            }
        }
    }

    /// Draw cards from the deck without putting them in hand.
    ///
    /// The request is clamped to the context's draw room before the deck is
    /// touched. Drawing zero cards is a success.
    pub fn draw(ctx: &mut EffectContext<'_>, count: &Amount) -> Result<Vec<CardInstance>, StepError> {
        let requested = usize::try_from(count.resolve(ctx.params())?).unwrap_or(usize::MAX);
        // The hand is required even when the clamp ends up at zero.
        ctx.hand()?;
        let n = requested.min(ctx.draw_room());
        if n == 0 {
            debug!(requested, "draw clamped to zero");
            return Ok(Vec::new());
        }
        Ok(ctx.deck()?.draw_many(n))
    }

    /// Apply a stat restore, recording it when a batch is being collected.
    pub fn restore(ctx: &mut EffectContext<'_>, stat: StatKind, amount: &Amount) -> Result<(), StepError> {
        let amount = amount.resolve(ctx.params())?;
        ctx.stats()?.restore(stat, amount);
        ctx.push_restore(stat, amount);
        Ok(())
    }

    /// Consume the source card (discard it from hand).
    pub fn consume_source(ctx: &mut EffectContext<'_>) -> Result<(), StepError> {
        let id = ctx.source().entity_id;
        if ctx.hand()?.discard_by_instance(id) {
            Ok(())
        } else {
            Err(StepError::SourceNotInHand(id))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::cards::{CardColor, CardDefinition, CardId};
    use crate::combat::OpponentDescriptor;
    use crate::core::EntityId;
    use crate::effects::{AbilityDefinition, Collaborators};
    use crate::host::memory::SimpleStats;
    use crate::host::{Collaborator, Hand, PlayerStats};
    use crate::zones::CardPiles;

    fn card(id: u32) -> CardInstance {
        let def = CardDefinition::new(CardId::new(1), "Card", CardColor::Gray);
        CardInstance::new(EntityId(id), Arc::new(def))
    }

    fn piles_with_source() -> CardPiles {
        let mut piles = CardPiles::new(7);
        piles.hand.add_card(card(100));
        piles.deck.extend((1..=5).map(card));
        piles
    }

    #[test]
    fn test_discard_self() {
        let mut piles = piles_with_source();
        let mut ctx = EffectContext::new(
            card(100),
            AbilityDefinition::manual(),
            Collaborators::new().with_hand(&mut piles.hand),
        );

        assert_eq!(StepResolver::apply(&EffectStep::DiscardSelf, &mut ctx), Ok(()));
        assert_eq!(
            StepResolver::apply(&EffectStep::DiscardSelf, &mut ctx),
            Err(StepError::SourceNotInHand(EntityId(100)))
        );
        drop(ctx);
        assert_eq!(piles.hand.discard_pile().len(), 1);
    }

    #[test]
    fn test_draw_clamped_to_hand_capacity() {
        let mut piles = piles_with_source();
        for i in 200..205 {
            piles.hand.add_card(card(i));
        }
        // 6 in hand, max 7
        let mut ctx = EffectContext::new(
            card(100),
            AbilityDefinition::manual(),
            Collaborators::new()
                .with_hand(&mut piles.hand)
                .with_deck(&mut piles.deck),
        );

        assert_eq!(StepResolver::apply(&EffectStep::draw(3), &mut ctx), Ok(()));
        drop(ctx);
        assert_eq!(piles.hand.count(), 7);
        assert_eq!(piles.deck.len(), 4);
    }

    #[test]
    fn test_draw_zero_is_success() {
        let mut piles = piles_with_source();
        let mut ctx = EffectContext::new(
            card(100),
            AbilityDefinition::manual(),
            Collaborators::new()
                .with_hand(&mut piles.hand)
                .with_deck(&mut piles.deck),
        );

        assert_eq!(StepResolver::apply(&EffectStep::draw(0), &mut ctx), Ok(()));
        drop(ctx);
        assert_eq!(piles.hand.count(), 1);
        assert_eq!(piles.deck.len(), 5);
    }

    #[test]
    fn test_draw_without_deck_fails() {
        let mut piles = piles_with_source();
        let mut ctx = EffectContext::new(
            card(100),
            AbilityDefinition::manual(),
            Collaborators::new().with_hand(&mut piles.hand),
        );

        assert_eq!(
            StepResolver::apply(&EffectStep::draw(1), &mut ctx),
            Err(StepError::MissingCollaborator(Collaborator::Deck))
        );
    }

    #[test]
    fn test_spend_energy_insufficient() {
        let mut stats = SimpleStats::full(10).with(StatKind::Energy, 1);
        let mut ctx = EffectContext::new(
            card(100),
            AbilityDefinition::manual(),
            Collaborators::new().with_stats(&mut stats),
        );

        assert_eq!(
            StepResolver::apply(&EffectStep::spend_energy(2), &mut ctx),
            Err(StepError::InsufficientEnergy { required: 2, available: 1 })
        );
        drop(ctx);
        assert_eq!(stats.energy(), 1);
    }

    #[test]
    fn test_restore_and_damage_use_params() {
        let mut stats = SimpleStats::full(10).with(StatKind::Health, 5);
        let mut ctx = EffectContext::new(
            card(100),
            AbilityDefinition::manual(),
            Collaborators::new().with_stats(&mut stats),
        )
        .with_param("heal", 3);

        let heal = EffectStep::RestoreStat {
            stat: StatKind::Health,
            amount: Amount::param("heal"),
        };
        assert_eq!(StepResolver::apply(&heal, &mut ctx), Ok(()));
        assert_eq!(StepResolver::apply(&EffectStep::take_damage(2), &mut ctx), Ok(()));
        drop(ctx);
        assert_eq!(stats.health(), 6);
    }

    #[test]
    fn test_remove_from_game() {
        let mut piles = piles_with_source();
        let mut ctx = EffectContext::new(
            card(100),
            AbilityDefinition::manual(),
            Collaborators::new().with_hand(&mut piles.hand),
        );

        assert_eq!(StepResolver::apply(&EffectStep::RemoveFromGame, &mut ctx), Ok(()));
        drop(ctx);
        assert_eq!(piles.hand.exiled().len(), 1);
        assert!(piles.hand.discard_pile().is_empty());
    }

    #[test]
    fn test_start_combat_records_request() {
        let mut ctx = EffectContext::new(card(100), AbilityDefinition::manual(), Collaborators::new());

        assert_eq!(
            StepResolver::apply(&EffectStep::start_combat([]), &mut ctx),
            Err(StepError::NoOpponents)
        );

        let wolf = OpponentDescriptor::new("Wolf", 2, 0, 3);
        assert_eq!(
            StepResolver::apply(&EffectStep::start_combat([wolf.clone()]), &mut ctx),
            Ok(())
        );
        assert_eq!(ctx.take_combat_request(), Some(vec![wolf]));
    }
}
