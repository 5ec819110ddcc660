//! Pipeline executor.
//!
//! Runs costs in order, then effects in order. Costs use the cost policy
//! (abort by default), effects use the effect policy (continue by default).
//! On completion the hand is told its piles changed; an abort raises no
//! notification.
//!
//! ## Suspension points
//!
//! - A confirmation cost with a prompt available shows the prompt and
//!   suspends. `resume_confirm` delivers the answer.
//! - An animated draw with an animator available draws, starts the
//!   animation and suspends. The cards reach the hand on resume.
//! - A run of consecutive `RestoreStat` effects with an animator available
//!   applies all of them, presents one merged batch and suspends.
//!
//! Without a prompt, confirmations pass immediately. Without an animator,
//! draws and restores are plain synchronous steps.

use std::sync::Arc;

use tracing::{debug, warn};

use super::policy::{FailurePolicy, OnFailure};
use super::status::{
    Pending, PipelineAbort, PipelineReport, PipelineStatus, ResumeToken, SuspendReason, Suspension,
};
use crate::cards::CardInstance;
use crate::effects::{
    AbilityDefinition, Collaborators, EffectContext, EffectStep, StepError, StepFailure, StepPhase,
    StepResolver, TriggerKind,
};
use crate::host::ConfirmRequest;

/// Result of running every ability of one trigger.
pub struct TriggeredRun<'a> {
    /// One status per ability started, in order.
    pub statuses: Vec<PipelineStatus>,
    /// Context of the ability that suspended, if any. Resume it with the
    /// token in the last status.
    pub suspended: Option<EffectContext<'a>>,
    /// Abilities not started because an earlier one suspended.
    pub remaining: Vec<AbilityDefinition>,
    /// Collaborators handed back when no ability is left holding them.
    pub collaborators: Option<Collaborators<'a>>,
}

impl TriggeredRun<'_> {
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.suspended.is_none()
    }
}

/// Drives abilities through the cost and effect phases.
#[derive(Clone, Copy, Debug, Default)]
pub struct PipelineExecutor {
    policy: FailurePolicy,
}

impl PipelineExecutor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Run the context's ability from the first cost.
    pub fn start(&self, ctx: &mut EffectContext<'_>) -> PipelineStatus {
        debug!(
            source = %ctx.source(),
            costs = ctx.ability().costs.len(),
            effects = ctx.ability().effects.len(),
            "starting ability"
        );
        self.run(ctx, 0, 0)
    }

    /// Run costs from `cost_index`, then effects from `effect_index`.
    pub fn run(
        &self,
        ctx: &mut EffectContext<'_>,
        cost_index: usize,
        effect_index: usize,
    ) -> PipelineStatus {
        let ability = Arc::clone(ctx.ability());

        for (index, cost) in ability.costs.iter().enumerate().skip(cost_index) {
            if let Some(request) = confirm_request(cost, ctx) {
                if let Some(prompt) = ctx.prompt() {
                    prompt.show(&request);
                    debug!(index, message = %request.message, "awaiting confirmation");
                    return PipelineStatus::Suspended(Suspension {
                        reason: SuspendReason::Confirm(request),
                        token: ResumeToken {
                            cost_index: index + 1,
                            effect_index,
                            pending: Pending::Confirmation {
                                cost_index: index,
                                consume: matches!(cost, EffectStep::ConfirmConsumeCost { .. }),
                            },
                        },
                    });
                }
                debug!(index, "no prompt, confirming automatically");
            }

            match StepResolver::apply(cost, ctx) {
                Ok(()) => ctx.mark_cost_applied(index),
                Err(error) => {
                    if let Some(status) = self.fail(ctx, StepPhase::Cost, index, error) {
                        return status;
                    }
                }
            }
        }

        let past_costs = ability.costs.len();
        let effects = &ability.effects;
        let mut index = effect_index;

        while index < effects.len() {
            match &effects[index] {
                EffectStep::DrawCards {
                    count,
                    animated: true,
                } if ctx.has_animator() => {
                    match StepResolver::draw(ctx, count) {
                        Ok(cards) if !cards.is_empty() => {
                            if let Some(animator) = ctx.animator() {
                                animator.play_draw_animation(&cards);
                            }
                            debug!(index, drawn = cards.len(), "awaiting draw animation");
                            return PipelineStatus::Suspended(Suspension {
                                reason: SuspendReason::DrawAnimation(
                                    cards.iter().map(|card| card.entity_id).collect(),
                                ),
                                token: ResumeToken {
                                    cost_index: past_costs,
                                    effect_index: index + 1,
                                    pending: Pending::DrawnCards(cards),
                                },
                            });
                        }
                        Ok(_) => {}
                        Err(error) => {
                            if let Some(status) = self.fail(ctx, StepPhase::Effect, index, error) {
                                return status;
                            }
                        }
                    }
                    index += 1;
                }

                EffectStep::RestoreStat { .. } if ctx.has_animator() => {
                    ctx.begin_restore_batch();
                    let run_end = effects[index..]
                        .iter()
                        .position(|step| !step.is_restore())
                        .map_or(effects.len(), |offset| index + offset);

                    for (restore_index, step) in effects.iter().enumerate().take(run_end).skip(index) {
                        if let Err(error) = StepResolver::apply(step, ctx) {
                            if let Some(status) =
                                self.fail(ctx, StepPhase::Effect, restore_index, error)
                            {
                                ctx.finish_restore_batch();
                                return status;
                            }
                        }
                    }

                    let batch = ctx.finish_restore_batch();
                    index = run_end;
                    if !batch.is_empty() {
                        if let Some(animator) = ctx.animator() {
                            animator.play_stat_restore_batch(&batch);
                        }
                        debug!(restores = batch.len(), "awaiting restore batch");
                        return PipelineStatus::Suspended(Suspension {
                            reason: SuspendReason::RestoreBatch(batch.to_vec()),
                            token: ResumeToken {
                                cost_index: past_costs,
                                effect_index: index,
                                pending: Pending::Nothing,
                            },
                        });
                    }
                }

                step => {
                    if let Err(error) = StepResolver::apply(step, ctx) {
                        if let Some(status) = self.fail(ctx, StepPhase::Effect, index, error) {
                            return status;
                        }
                    }
                    index += 1;
                }
            }
        }

        self.complete(ctx)
    }

    /// Continue after a draw animation or restore batch finished.
    ///
    /// A token awaiting confirmation is not answered here: the pipeline stays
    /// suspended on the same question and hands the token back. Use
    /// `resume_confirm` to answer it.
    pub fn resume(&self, ctx: &mut EffectContext<'_>, token: ResumeToken) -> PipelineStatus {
        let confirm_index = match &token.pending {
            Pending::Confirmation { cost_index, .. } => Some(*cost_index),
            _ => None,
        };
        if let Some(index) = confirm_index {
            warn!(index, "resume called on a pending confirmation, still waiting");
            let ability = Arc::clone(ctx.ability());
            let request = ability
                .costs
                .get(index)
                .and_then(|cost| confirm_request(cost, ctx))
                .unwrap_or_else(|| ConfirmRequest {
                    source: ctx.source().entity_id,
                    message: String::new(),
                    chips: Vec::new(),
                });
            return PipelineStatus::Suspended(Suspension {
                reason: SuspendReason::Confirm(request),
                token,
            });
        }
        self.resume_confirm(ctx, token, true)
    }

    /// Continue with the player's answer to a confirmation.
    ///
    /// `confirmed` is ignored for tokens that don't await a confirmation.
    /// A declined confirmation aborts the pipeline whatever the cost policy.
    pub fn resume_confirm(
        &self,
        ctx: &mut EffectContext<'_>,
        token: ResumeToken,
        confirmed: bool,
    ) -> PipelineStatus {
        let ResumeToken {
            cost_index,
            effect_index,
            pending,
        } = token;

        match pending {
            Pending::Nothing => {}

            Pending::Confirmation {
                cost_index: confirm_index,
                consume,
            } => {
                if !confirmed {
                    debug!(index = confirm_index, "confirmation declined");
                    return self.abort(
                        ctx,
                        StepFailure {
                            phase: StepPhase::Cost,
                            index: confirm_index,
                            error: StepError::Declined,
                        },
                    );
                }
                let paid = if consume {
                    StepResolver::consume_source(ctx)
                } else {
                    Ok(())
                };
                match paid {
                    Ok(()) => ctx.mark_cost_applied(confirm_index),
                    Err(error) => {
                        if let Some(status) = self.fail(ctx, StepPhase::Cost, confirm_index, error) {
                            return status;
                        }
                    }
                }
            }

            Pending::DrawnCards(cards) => match ctx.hand() {
                Ok(hand) => {
                    for card in cards {
                        hand.add_card(card);
                    }
                }
                Err(error) => {
                    let drawn_at = effect_index.saturating_sub(1);
                    if let Some(status) = self.fail(ctx, StepPhase::Effect, drawn_at, error) {
                        return status;
                    }
                }
            },
        }

        self.run(ctx, cost_index, effect_index)
    }

    /// Run every ability `source` has for `trigger`, in declaration order.
    ///
    /// Stops at the first suspension and hands back the suspended context
    /// with the abilities that are still to run.
    pub fn run_triggered<'a>(
        &self,
        source: &CardInstance,
        trigger: TriggerKind,
        collaborators: Collaborators<'a>,
    ) -> TriggeredRun<'a> {
        let abilities = source
            .definition
            .abilities_for(trigger)
            .cloned()
            .collect();
        self.run_abilities(source, abilities, collaborators)
    }

    /// Run a list of abilities for `source`, one context each.
    pub fn run_abilities<'a>(
        &self,
        source: &CardInstance,
        abilities: Vec<AbilityDefinition>,
        mut collaborators: Collaborators<'a>,
    ) -> TriggeredRun<'a> {
        let mut statuses = Vec::with_capacity(abilities.len());
        let mut queue = abilities.into_iter();

        while let Some(ability) = queue.next() {
            let mut ctx = EffectContext::new(source.clone(), ability, collaborators);
            let status = self.start(&mut ctx);
            let suspended = status.is_suspended();
            statuses.push(status);
            if suspended {
                return TriggeredRun {
                    statuses,
                    suspended: Some(ctx),
                    remaining: queue.collect(),
                    collaborators: None,
                };
            }
            collaborators = ctx.into_collaborators();
        }

        TriggeredRun {
            statuses,
            suspended: None,
            remaining: Vec::new(),
            collaborators: Some(collaborators),
        }
    }

    /// Apply the failure policy. `Some` means the pipeline stops here.
    fn fail(
        &self,
        ctx: &mut EffectContext<'_>,
        phase: StepPhase,
        index: usize,
        error: StepError,
    ) -> Option<PipelineStatus> {
        let failure = StepFailure {
            phase,
            index,
            error,
        };
        match self.policy.for_phase(phase) {
            OnFailure::Abort => Some(self.abort(ctx, failure)),
            OnFailure::Continue => {
                warn!(source = %ctx.source(), %failure, "step failed, continuing");
                ctx.record_failure(failure);
                None
            }
        }
    }

    fn abort(&self, ctx: &mut EffectContext<'_>, failure: StepFailure) -> PipelineStatus {
        debug!(source = %ctx.source(), %failure, "ability aborted");
        PipelineStatus::Aborted(PipelineAbort {
            failure,
            applied_costs: ctx.applied_costs().to_vec(),
        })
    }

    fn complete(&self, ctx: &mut EffectContext<'_>) -> PipelineStatus {
        if let Ok(hand) = ctx.hand() {
            hand.notify_piles_changed();
        }
        let report = PipelineReport {
            failures: ctx.take_failures(),
            applied_costs: ctx.applied_costs().to_vec(),
            combat_request: ctx.take_combat_request(),
        };
        debug!(
            source = %ctx.source(),
            failures = report.failures.len(),
            "ability completed"
        );
        PipelineStatus::Completed(report)
    }
}

/// The prompt contents for a confirmation cost.
fn confirm_request(step: &EffectStep, ctx: &EffectContext<'_>) -> Option<ConfirmRequest> {
    let (message, chips) = match step {
        EffectStep::ConfirmCost { message } => (message, Vec::new()),
        EffectStep::ConfirmConsumeCost { message, chips } => (message, chips.clone()),
        _ => return None,
    };
    Some(ConfirmRequest {
        source: ctx.source().entity_id,
        message: message.clone(),
        chips,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardColor, CardDefinition, CardId};
    use crate::combat::OpponentDescriptor;
    use crate::core::EntityId;
    use crate::host::memory::{AnimatorEvent, RecordingAnimator, RecordingPrompt, SimpleStats};
    use crate::host::{Hand, PlayerStats, StatKind};
    use crate::zones::CardPiles;

    fn card(id: u32) -> CardInstance {
        let def = CardDefinition::new(CardId::new(1), "Card", CardColor::Gray);
        CardInstance::new(EntityId(id), Arc::new(def))
    }

    fn piles() -> CardPiles {
        let mut piles = CardPiles::new(7);
        piles.hand.add_card(card(100));
        piles.deck.extend((1..=10).map(card));
        piles
    }

    #[test]
    fn test_synchronous_pipeline_completes() {
        let mut piles = piles();
        let mut stats = SimpleStats::full(10).with(StatKind::Energy, 5);
        let ability = AbilityDefinition::manual()
            .cost(EffectStep::spend_energy(2))
            .effect(EffectStep::draw(2))
            .effect(EffectStep::DiscardSelf);

        let mut ctx = EffectContext::new(
            card(100),
            ability,
            Collaborators::new()
                .with_hand(&mut piles.hand)
                .with_deck(&mut piles.deck)
                .with_stats(&mut stats),
        );
        let status = PipelineExecutor::new().start(&mut ctx);
        drop(ctx);

        let report = status.report().expect("completed");
        assert!(report.failures.is_empty());
        assert_eq!(report.applied_costs, vec![0]);
        assert_eq!(stats.energy(), 3);
        assert_eq!(piles.hand.count(), 2);
        assert_eq!(piles.hand.notifications(), 1);
    }

    #[test]
    fn test_failing_cost_aborts_without_notification() {
        let mut piles = piles();
        let mut stats = SimpleStats::full(10).with(StatKind::Energy, 1);
        let ability = AbilityDefinition::manual()
            .cost(EffectStep::spend_energy(3))
            .effect(EffectStep::draw(2));

        let mut ctx = EffectContext::new(
            card(100),
            ability,
            Collaborators::new()
                .with_hand(&mut piles.hand)
                .with_deck(&mut piles.deck)
                .with_stats(&mut stats),
        );
        let status = PipelineExecutor::new().start(&mut ctx);
        drop(ctx);

        let PipelineStatus::Aborted(abort) = status else {
            panic!("expected abort, got {status:?}");
        };
        assert_eq!(abort.failure.index, 0);
        assert_eq!(
            abort.error(),
            &StepError::InsufficientEnergy { required: 3, available: 1 }
        );
        assert_eq!(piles.hand.count(), 1);
        assert_eq!(piles.hand.notifications(), 0);
    }

    #[test]
    fn test_failing_effect_continues() {
        let mut piles = piles();
        let ability = AbilityDefinition::manual()
            .effect(EffectStep::take_damage(1))
            .effect(EffectStep::draw(1));

        let mut ctx = EffectContext::new(
            card(100),
            ability,
            Collaborators::new()
                .with_hand(&mut piles.hand)
                .with_deck(&mut piles.deck),
        );
        let status = PipelineExecutor::new().start(&mut ctx);
        drop(ctx);

        let report = status.report().expect("completed");
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].index, 0);
        assert_eq!(piles.hand.count(), 2);
    }

    #[test]
    fn test_strict_policy_aborts_on_effect() {
        let mut piles = piles();
        let ability = AbilityDefinition::manual()
            .effect(EffectStep::take_damage(1))
            .effect(EffectStep::draw(1));

        let mut ctx = EffectContext::new(
            card(100),
            ability,
            Collaborators::new()
                .with_hand(&mut piles.hand)
                .with_deck(&mut piles.deck),
        );
        let executor = PipelineExecutor::new().with_policy(FailurePolicy::strict());
        let status = executor.start(&mut ctx);
        drop(ctx);

        assert!(status.is_aborted());
        assert_eq!(piles.hand.count(), 1);
    }

    #[test]
    fn test_confirmation_accept_and_decline() {
        let ability = AbilityDefinition::manual()
            .cost(EffectStep::confirm_consume("Eat?", ["+2 Hunger"]))
            .effect(EffectStep::restore(StatKind::Hunger, 2));

        for confirmed in [true, false] {
            let mut piles = piles();
            let mut stats = SimpleStats::full(10).with(StatKind::Hunger, 3);
            let mut prompt = RecordingPrompt::default();
            let mut ctx = EffectContext::new(
                card(100),
                ability.clone(),
                Collaborators::new()
                    .with_hand(&mut piles.hand)
                    .with_stats(&mut stats)
                    .with_prompt(&mut prompt),
            );

            let executor = PipelineExecutor::new();
            let token = executor.start(&mut ctx).into_token().expect("suspended");
            assert!(token.awaits_confirmation());
            let status = executor.resume_confirm(&mut ctx, token, confirmed);
            drop(ctx);

            assert_eq!(prompt.shown.len(), 1);
            assert_eq!(prompt.shown[0].chips, vec!["+2 Hunger".to_string()]);
            if confirmed {
                assert!(status.is_completed());
                assert_eq!(stats.hunger(), 5);
                assert_eq!(piles.hand.discard_pile().len(), 1);
            } else {
                let PipelineStatus::Aborted(abort) = status else {
                    panic!("expected abort");
                };
                assert_eq!(abort.error(), &StepError::Declined);
                assert_eq!(stats.hunger(), 3);
                assert_eq!(piles.hand.count(), 1);
            }
        }
    }

    #[test]
    fn test_plain_resume_does_not_answer_confirmation() {
        let mut piles = piles();
        let mut stats = SimpleStats::full(10).with(StatKind::Hunger, 3);
        let mut prompt = RecordingPrompt::default();
        let ability = AbilityDefinition::manual()
            .cost(EffectStep::confirm_consume("Eat?", ["+2 Hunger"]))
            .effect(EffectStep::restore(StatKind::Hunger, 2));

        let mut ctx = EffectContext::new(
            card(100),
            ability,
            Collaborators::new()
                .with_hand(&mut piles.hand)
                .with_stats(&mut stats)
                .with_prompt(&mut prompt),
        );
        let executor = PipelineExecutor::new();
        let token = executor.start(&mut ctx).into_token().expect("suspended");

        let status = executor.resume(&mut ctx, token);
        let Some(SuspendReason::Confirm(request)) = status.suspend_reason() else {
            panic!("expected to stay on the confirmation, got {status:?}");
        };
        assert_eq!(request.message, "Eat?");
        let token = status.into_token().expect("suspended");
        assert!(token.awaits_confirmation());
        assert_eq!(ctx.hand().map(|hand| hand.count()), Ok(1));

        let status = executor.resume_confirm(&mut ctx, token, true);
        drop(ctx);

        assert!(status.is_completed());
        assert_eq!(stats.hunger(), 5);
        assert_eq!(prompt.shown.len(), 1);
    }

    #[test]
    fn test_no_prompt_auto_confirms() {
        let mut piles = piles();
        let ability = AbilityDefinition::manual()
            .cost(EffectStep::confirm("Sure?"))
            .effect(EffectStep::draw(1));

        let mut ctx = EffectContext::new(
            card(100),
            ability,
            Collaborators::new()
                .with_hand(&mut piles.hand)
                .with_deck(&mut piles.deck),
        );
        let status = PipelineExecutor::new().start(&mut ctx);
        drop(ctx);

        assert!(status.is_completed());
        assert_eq!(piles.hand.count(), 2);
    }

    #[test]
    fn test_animated_draw_adds_cards_on_resume() {
        let mut piles = piles();
        let mut animator = RecordingAnimator::default();
        let ability = AbilityDefinition::manual().effect(EffectStep::draw_animated(2));

        let mut ctx = EffectContext::new(
            card(100),
            ability,
            Collaborators::new()
                .with_hand(&mut piles.hand)
                .with_deck(&mut piles.deck)
                .with_animator(&mut animator),
        );
        let executor = PipelineExecutor::new();
        let status = executor.start(&mut ctx);
        assert_eq!(
            status.suspend_reason(),
            Some(&SuspendReason::DrawAnimation(vec![EntityId(10), EntityId(9)]))
        );
        assert_eq!(ctx.hand().map(|hand| hand.count()), Ok(1));

        let token = status.into_token().expect("suspended");
        let status = executor.resume(&mut ctx, token);
        drop(ctx);

        assert!(status.is_completed());
        assert_eq!(piles.hand.count(), 3);
        assert_eq!(
            animator.events,
            vec![AnimatorEvent::Draw(vec![EntityId(10), EntityId(9)])]
        );
    }

    #[test]
    fn test_animated_draw_of_zero_does_not_suspend() {
        let mut piles = CardPiles::new(1);
        piles.hand.add_card(card(100));
        piles.deck.extend((1..=3).map(card));
        let mut animator = RecordingAnimator::default();
        let ability = AbilityDefinition::manual().effect(EffectStep::draw_animated(2));

        let mut ctx = EffectContext::new(
            card(100),
            ability,
            Collaborators::new()
                .with_hand(&mut piles.hand)
                .with_deck(&mut piles.deck)
                .with_animator(&mut animator),
        );
        let status = PipelineExecutor::new().start(&mut ctx);
        drop(ctx);

        assert!(status.is_completed());
        assert!(animator.events.is_empty());
        assert_eq!(piles.deck.len(), 3);
    }

    #[test]
    fn test_restore_run_is_one_batch() {
        let mut stats = SimpleStats::full(20).with(StatKind::Health, 5).with(StatKind::Thirst, 5);
        let mut animator = RecordingAnimator::default();
        let ability = AbilityDefinition::manual()
            .effect(EffectStep::restore(StatKind::Health, 2))
            .effect(EffectStep::restore(StatKind::Thirst, 3))
            .effect(EffectStep::take_damage(1));

        let mut ctx = EffectContext::new(
            card(100),
            ability,
            Collaborators::new()
                .with_stats(&mut stats)
                .with_animator(&mut animator),
        );
        let executor = PipelineExecutor::new();
        let status = executor.start(&mut ctx);
        assert_eq!(
            status.suspend_reason(),
            Some(&SuspendReason::RestoreBatch(vec![
                (StatKind::Health, 2),
                (StatKind::Thirst, 3)
            ]))
        );
        let token = status.into_token().expect("suspended");
        assert_eq!(token.effect_index(), 2);

        let status = executor.resume(&mut ctx, token);
        drop(ctx);

        assert!(status.is_completed());
        assert_eq!(stats.health(), 6);
        assert_eq!(stats.thirst(), 8);
        assert_eq!(animator.restore_batches(), 1);
    }

    #[test]
    fn test_restores_without_animator_are_synchronous() {
        let mut stats = SimpleStats::full(20).with(StatKind::Health, 5);
        let ability = AbilityDefinition::manual()
            .effect(EffectStep::restore(StatKind::Health, 2))
            .effect(EffectStep::restore(StatKind::Health, 3));

        let mut ctx = EffectContext::new(card(100), ability, Collaborators::new().with_stats(&mut stats));
        let status = PipelineExecutor::new().start(&mut ctx);
        drop(ctx);

        assert!(status.is_completed());
        assert_eq!(stats.health(), 10);
    }

    #[test]
    fn test_combat_request_reported() {
        let wolf = OpponentDescriptor::new("Wolf", 2, 0, 3);
        let ability = AbilityDefinition::manual().effect(EffectStep::start_combat([wolf.clone()]));

        let mut ctx = EffectContext::new(card(100), ability, Collaborators::new());
        let status = PipelineExecutor::new().start(&mut ctx);

        let report = status.report().expect("completed");
        assert_eq!(report.combat_request, Some(vec![wolf]));
    }

    #[test]
    fn test_run_triggered_stops_at_suspension() {
        let def = CardDefinition::new(CardId::new(7), "Totem", CardColor::Gray)
            .with_ability(AbilityDefinition::new(TriggerKind::OnDraw).effect(EffectStep::draw(1)))
            .with_ability(
                AbilityDefinition::new(TriggerKind::OnDraw).cost(EffectStep::confirm("Again?")),
            )
            .with_ability(AbilityDefinition::new(TriggerKind::OnDraw).effect(EffectStep::draw(1)))
            .with_ability(AbilityDefinition::manual().effect(EffectStep::draw(5)));
        let totem = CardInstance::new(EntityId(100), Arc::new(def));

        let mut piles = piles();
        let mut prompt = RecordingPrompt::default();
        let run = PipelineExecutor::new().run_triggered(
            &totem,
            TriggerKind::OnDraw,
            Collaborators::new()
                .with_hand(&mut piles.hand)
                .with_deck(&mut piles.deck)
                .with_prompt(&mut prompt),
        );

        assert_eq!(run.statuses.len(), 2);
        assert!(run.statuses[0].is_completed());
        assert!(run.statuses[1].is_suspended());
        assert!(!run.is_finished());
        assert_eq!(run.remaining.len(), 1);
        assert!(run.collaborators.is_none());
        drop(run);

        assert_eq!(piles.hand.count(), 2);
    }
}
