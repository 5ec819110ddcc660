//! Combat round resolver.
//!
//! `CombatRound` is a small state machine:
//!
//! ```text
//! Idle -> Active(1) -> Resolving -> Active(n + 1) ...
//!                               \-> Ending -> Ended
//! ```
//!
//! Between `start` and the end of combat the player places cards from the
//! hand into slot zones, buys draws with energy and ends the turn. All
//! collaborators are passed in through `CombatEnv` on every call; the round
//! itself owns only its slots and counters.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, info, warn};

use super::error::CombatError;
use super::opponent::OpponentDescriptor;
use super::slot::{EngagementSlot, SlotExchange, SlotId, ZoneKind};
use crate::cards::CardInstance;
use crate::core::{EncounterConfig, EntityId, MAX_ENGAGEMENT_SLOTS};
use crate::economy::{capacity, clamp_draw, table_capacity, DeferredDraw, OfferAvailability, OfferBlock};
use crate::host::{Animator, CombatHost, Deck, Hand, Inventory, PlayerStats};

/// Lifecycle of a combat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatPhase {
    /// Not started.
    Idle,
    /// Accepting placements, offers and end-turn.
    Active,
    /// Inside `end_turn`.
    Resolving,
    /// Wrapping up after the last opponent died or the player forfeited.
    Ending,
    /// Finished; see `CombatRound::summary`.
    Ended,
}

/// Collaborators lent to one combat operation.
pub struct CombatEnv<'a> {
    pub hand: &'a mut dyn Hand,
    pub deck: &'a mut dyn Deck,
    pub stats: &'a mut dyn PlayerStats,
    pub inventory: &'a mut dyn Inventory,
    pub animator: Option<&'a mut dyn Animator>,
    pub host: Option<&'a mut dyn CombatHost>,
}

impl<'a> CombatEnv<'a> {
    #[must_use]
    pub fn new(
        hand: &'a mut dyn Hand,
        deck: &'a mut dyn Deck,
        stats: &'a mut dyn PlayerStats,
        inventory: &'a mut dyn Inventory,
    ) -> Self {
        Self {
            hand,
            deck,
            stats,
            inventory,
            animator: None,
            host: None,
        }
    }

    #[must_use]
    pub fn with_animator(mut self, animator: &'a mut dyn Animator) -> Self {
        self.animator = Some(animator);
        self
    }

    #[must_use]
    pub fn with_host(mut self, host: &'a mut dyn CombatHost) -> Self {
        self.host = Some(host);
        self
    }

    fn host(&mut self) -> Option<&mut (dyn CombatHost + 'a)> {
        match &mut self.host {
            Some(host) => Some(&mut **host),
            None => None,
        }
    }
}

/// How a finished combat went.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatSummary {
    pub victory: bool,
    pub rounds: u32,
    pub wounds_taken: i64,
    /// Names of killed opponents, in death order.
    pub opponents_killed: Vec<String>,
    /// Deferred draw still owed. Pass it to the next `start`.
    pub carried_deferred: usize,
}

/// What happens after a round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// Opponents remain; the next round has started.
    Continue { next_round: u32 },
    /// Every opponent is dead.
    Victory(CombatSummary),
}

/// Everything one `end_turn` did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundReport {
    pub round: u32,
    /// Per-slot results, left to right.
    pub exchanges: Vec<SlotExchange>,
    /// Total wounds applied to the player.
    pub wounds: i64,
    /// Cards moved from the zones to the discard pile.
    pub discarded: usize,
    /// Cards drawn from the deferred counter after the round.
    pub deferred_drawn: usize,
    pub outcome: RoundOutcome,
}

/// A combat against one to three opponents.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CombatRound {
    config: EncounterConfig,
    phase: CombatPhase,
    slots: SmallVec<[EngagementSlot; MAX_ENGAGEMENT_SLOTS]>,
    round: u32,
    deferred: DeferredDraw,
    wounds_taken: i64,
    killed: Vec<String>,
    summary: Option<CombatSummary>,
}

impl Default for CombatRound {
    fn default() -> Self {
        Self::new(EncounterConfig::default())
    }
}

impl CombatRound {
    #[must_use]
    pub fn new(config: EncounterConfig) -> Self {
        Self {
            config,
            phase: CombatPhase::Idle,
            slots: SmallVec::new(),
            round: 0,
            deferred: DeferredDraw::default(),
            wounds_taken: 0,
            killed: Vec::new(),
            summary: None,
        }
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &EncounterConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> CombatPhase {
        self.phase
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.phase == CombatPhase::Active
    }

    /// Current round, starting at 1. Zero before the first start.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Living opponents, left to right.
    #[must_use]
    pub fn slots(&self) -> &[EngagementSlot] {
        &self.slots
    }

    #[must_use]
    pub fn slot(&self, id: SlotId) -> Option<&EngagementSlot> {
        self.slots.iter().find(|s| s.id() == id)
    }

    /// Cards owed at the next round start.
    #[must_use]
    pub fn deferred_owed(&self) -> usize {
        self.deferred.owed()
    }

    /// Set once the combat has ended.
    #[must_use]
    pub fn summary(&self) -> Option<&CombatSummary> {
        self.summary.as_ref()
    }

    /// Cards sitting in combat zones.
    #[must_use]
    pub fn cards_in_zones(&self) -> usize {
        self.slots.iter().map(EngagementSlot::card_count).sum()
    }

    /// Hand plus zones, always derived from the live counts.
    #[must_use]
    pub fn cards_on_table(&self, hand: &dyn Hand) -> usize {
        hand.count() + self.cards_in_zones()
    }

    /// Cards a draw may add right now: hand room and table room.
    #[must_use]
    pub fn draw_room(&self, hand: &dyn Hand) -> usize {
        clamp_draw(
            usize::MAX,
            &[
                capacity(hand.max_size(), hand.count()),
                table_capacity(self.config.table_cap, self.cards_on_table(hand)),
            ],
        )
    }

    // === Lifecycle ===

    /// Engage up to `EncounterConfig::slot_limit` opponents.
    ///
    /// `carried_deferred` is the deferred draw owed from a previous combat
    /// (`CombatSummary::carried_deferred`); as much of it as fits is drawn
    /// immediately.
    pub fn start(
        &mut self,
        opponents: Vec<OpponentDescriptor>,
        carried_deferred: usize,
        env: &mut CombatEnv<'_>,
    ) -> Result<(), CombatError> {
        if matches!(self.phase, CombatPhase::Active | CombatPhase::Resolving) {
            return Err(CombatError::AlreadyStarted);
        }
        if opponents.is_empty() {
            return Err(CombatError::NoOpponents);
        }
        let limit = self.config.slot_limit();
        if opponents.len() > limit {
            warn!(
                offered = opponents.len(),
                max = limit,
                "too many opponents, extra ones ignored"
            );
        }

        self.slots = opponents
            .into_iter()
            .take(limit)
            .enumerate()
            .map(|(i, opponent)| EngagementSlot::new(SlotId(i as u32), Arc::new(opponent)))
            .collect();
        self.round = 1;
        self.deferred = DeferredDraw::new(carried_deferred);
        self.wounds_taken = 0;
        self.killed.clear();
        self.summary = None;
        self.phase = CombatPhase::Active;

        if let Some(host) = env.host() {
            host.set_input_locked(true);
            host.set_ui_enabled(false);
        }
        info!(opponents = self.slots.len(), carried_deferred, "combat started");

        self.pay_deferred(env);
        Ok(())
    }

    /// Move a card from hand into a slot zone.
    ///
    /// Colour rules are checked against the instance the hand actually holds,
    /// before the hand is touched; a rejected card stays in hand where it was.
    pub fn place_card(
        &mut self,
        slot: SlotId,
        zone: ZoneKind,
        card: &CardInstance,
        env: &mut CombatEnv<'_>,
    ) -> Result<(), CombatError> {
        self.ensure_active()?;
        let index = self.slot_index(slot)?;
        let id = card.entity_id;

        let color = env
            .hand
            .peek_card(id)
            .map(CardInstance::color)
            .ok_or(CombatError::CardNotInHand(id))?;
        let rules = &self.config.placement;
        let barred = rules.combat_rejects.contains(&color)
            || (zone == ZoneKind::Attack && rules.attack_rejects.contains(&color));
        if barred {
            return Err(CombatError::Rejected { card: id, color, zone });
        }

        let taken = env.hand.take_card(id).ok_or(CombatError::CardNotInHand(id))?;
        debug!(card = %taken, %slot, ?zone, "card placed");
        self.slots[index].place(zone, taken);
        Ok(())
    }

    /// Return one placed card to the hand.
    pub fn remove_card(&mut self, card: EntityId, env: &mut CombatEnv<'_>) -> Result<(), CombatError> {
        self.ensure_active()?;
        let taken = self
            .slots
            .iter_mut()
            .find_map(|slot| slot.take(card))
            .ok_or(CombatError::CardNotPlaced(card))?;
        env.hand.add_card(taken);
        Ok(())
    }

    /// Return every placed card to the hand in one operation.
    pub fn return_all_to_hand(&mut self, env: &mut CombatEnv<'_>) -> Result<usize, CombatError> {
        self.ensure_active()?;
        Ok(self.collect_to_hand(env))
    }

    // === Draw offers ===

    /// Whether draw offer `offer` can be taken right now.
    pub fn offer_availability(
        &self,
        offer: usize,
        env: &CombatEnv<'_>,
    ) -> Result<OfferAvailability, CombatError> {
        let draw_offer = self
            .config
            .draw_offers
            .get(offer)
            .ok_or(CombatError::UnknownOffer(offer))?;
        Ok(draw_offer.evaluate(env.stats.energy(), self.draw_room(&*env.hand)))
    }

    /// Take a draw offer: spend the energy, draw what fits now, and owe the
    /// deferred portion in full. Returns the number of cards drawn.
    pub fn take_offer(&mut self, offer: usize, env: &mut CombatEnv<'_>) -> Result<usize, CombatError> {
        self.ensure_active()?;
        let availability = self.offer_availability(offer, env)?;
        if let Some(block) = availability.blocked {
            return Err(CombatError::OfferBlocked(block));
        }

        let cost = self.config.draw_offers[offer].cost;
        let available = env.stats.energy();
        if !env.stats.spend_energy(cost) {
            return Err(CombatError::OfferBlocked(OfferBlock::InsufficientEnergy {
                required: cost,
                available,
            }));
        }

        let drawn = env.deck.draw_many(availability.draw_now);
        let count = drawn.len();
        for card in drawn {
            env.hand.add_card(card);
        }
        self.deferred.add(availability.deferred);
        env.hand.notify_piles_changed();

        debug!(
            offer,
            cost,
            drawn = count,
            deferred = self.deferred.owed(),
            "draw offer taken"
        );
        Ok(count)
    }

    // === Resolution ===

    /// Resolve the round.
    ///
    /// Each slot deals and takes damage on its own. Wounds from every slot
    /// are summed and applied once. Dead opponents drop their loot, all zone
    /// cards are discarded together, and the combat either moves to the
    /// next round or ends in victory.
    pub fn end_turn(&mut self, env: &mut CombatEnv<'_>) -> Result<RoundReport, CombatError> {
        self.ensure_active()?;
        self.phase = CombatPhase::Resolving;
        let round = self.round;

        let exchanges: Vec<SlotExchange> = self.slots.iter_mut().map(EngagementSlot::exchange).collect();
        let wounds: i64 = exchanges.iter().map(|e| e.wounds).sum();

        if wounds > 0 {
            env.stats.take_damage(wounds);
            if let Some(host) = env.host() {
                host.on_wounds_taken(wounds);
            }
        }
        self.wounds_taken += wounds;

        for slot in self.slots.iter().filter(|s| !s.is_alive()) {
            let opponent = slot.opponent();
            info!(opponent = %opponent.name, round, "opponent killed");
            if let Some(animator) = env.animator.as_deref_mut() {
                animator.play_loot_pickup(opponent, &opponent.loot);
            }
            for entry in &opponent.loot {
                env.inventory.add_resource(&entry.resource, entry.amount);
            }
            self.killed.push(opponent.name.clone());
        }

        let spent: Vec<CardInstance> = self.slots.iter_mut().flat_map(EngagementSlot::drain).collect();
        let discarded = spent.len();
        if !spent.is_empty() {
            env.hand.discard_cards(spent);
        }

        self.slots.retain(|slot| slot.is_alive());
        debug!(round, wounds, discarded, remaining = self.slots.len(), "round resolved");

        let (deferred_drawn, outcome) = if self.slots.is_empty() {
            let (drawn, summary) = self.close(true, env);
            (drawn, RoundOutcome::Victory(summary))
        } else {
            self.round += 1;
            for slot in &mut self.slots {
                slot.recount();
            }
            let drawn = self.pay_deferred(env);
            env.hand.notify_piles_changed();
            self.phase = CombatPhase::Active;
            (drawn, RoundOutcome::Continue { next_round: self.round })
        };

        Ok(RoundReport {
            round,
            exchanges,
            wounds,
            discarded,
            deferred_drawn,
            outcome,
        })
    }

    /// Give up. Placed cards go back to the hand and the combat ends
    /// without victory. Deferred draws are carried, not paid.
    pub fn forfeit(&mut self, env: &mut CombatEnv<'_>) -> Result<CombatSummary, CombatError> {
        self.ensure_active()?;
        self.collect_to_hand(env);
        let (_, summary) = self.close(false, env);
        Ok(summary)
    }

    // === Internals ===

    fn ensure_active(&self) -> Result<(), CombatError> {
        if self.phase == CombatPhase::Active {
            Ok(())
        } else {
            Err(CombatError::NotActive(self.phase))
        }
    }

    fn slot_index(&self, id: SlotId) -> Result<usize, CombatError> {
        self.slots
            .iter()
            .position(|s| s.id() == id)
            .ok_or(CombatError::UnknownSlot(id))
    }

    fn collect_to_hand(&mut self, env: &mut CombatEnv<'_>) -> usize {
        let cards: Vec<CardInstance> = self.slots.iter_mut().flat_map(EngagementSlot::drain).collect();
        let count = cards.len();
        for card in cards {
            env.hand.add_card(card);
        }
        if count > 0 {
            env.hand.notify_piles_changed();
        }
        count
    }

    /// Draw as much of the deferred counter as fits. Returns cards drawn.
    fn pay_deferred(&mut self, env: &mut CombatEnv<'_>) -> usize {
        let settled = self.deferred.settle(self.draw_room(&*env.hand));
        if settled == 0 {
            return 0;
        }
        let drawn = env.deck.draw_many(settled);
        let count = drawn.len();
        self.deferred.refund(settled - count);
        for card in drawn {
            env.hand.add_card(card);
        }
        debug!(drawn = count, still_owed = self.deferred.owed(), "deferred draw paid");
        count
    }

    fn close(&mut self, victory: bool, env: &mut CombatEnv<'_>) -> (usize, CombatSummary) {
        self.phase = CombatPhase::Ending;
        let drawn = if victory { self.pay_deferred(env) } else { 0 };
        self.slots.clear();
        env.hand.notify_piles_changed();

        let summary = CombatSummary {
            victory,
            rounds: self.round,
            wounds_taken: self.wounds_taken,
            opponents_killed: self.killed.clone(),
            carried_deferred: self.deferred.owed(),
        };
        if let Some(host) = env.host() {
            host.set_input_locked(false);
            host.set_ui_enabled(true);
            host.on_combat_ended(victory);
        }
        info!(
            victory,
            rounds = summary.rounds,
            wounds = summary.wounds_taken,
            "combat ended"
        );

        self.phase = CombatPhase::Ended;
        self.summary = Some(summary.clone());
        (drawn, summary)
    }
}
