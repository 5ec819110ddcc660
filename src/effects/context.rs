//! Per-invocation execution state.
//!
//! An `EffectContext` is created when an ability is invoked and lives until
//! the pipeline completes or aborts. Across suspensions the caller keeps it
//! alongside the `ResumeToken`; nothing inside it is rebuilt on resume.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::ability::AbilityDefinition;
use super::error::{StepError, StepFailure};
use crate::cards::CardInstance;
use crate::combat::OpponentDescriptor;
use crate::economy::{capacity, table_capacity};
use crate::host::{Animator, Collaborator, ConfirmPrompt, Deck, Hand, PlayerStats, StatKind};

/// Buffered `(stat, amount)` pairs of one restore run.
pub type RestoreBuffer = SmallVec<[(StatKind, i64); 4]>;

/// Collaborators lent to one ability invocation.
///
/// Any of them may be missing. A step that needs a missing collaborator
/// fails on its own; the rest of the pipeline is unaffected. A missing
/// prompt auto-confirms, a missing animator skips presentations.
///
/// ```
/// use card_encounter::effects::Collaborators;
/// use card_encounter::host::memory::SimpleStats;
/// use card_encounter::zones::CardPiles;
///
/// let mut piles = CardPiles::new(7);
/// let mut stats = SimpleStats::full(10);
/// let collaborators = Collaborators::new()
///     .with_hand(&mut piles.hand)
///     .with_deck(&mut piles.deck)
///     .with_stats(&mut stats);
/// assert!(collaborators.hand.is_some());
/// ```
#[derive(Default)]
pub struct Collaborators<'a> {
    pub hand: Option<&'a mut dyn Hand>,
    pub deck: Option<&'a mut dyn Deck>,
    pub stats: Option<&'a mut dyn PlayerStats>,
    pub prompt: Option<&'a mut dyn ConfirmPrompt>,
    pub animator: Option<&'a mut dyn Animator>,
}

impl<'a> Collaborators<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_hand(mut self, hand: &'a mut dyn Hand) -> Self {
        self.hand = Some(hand);
        self
    }

    #[must_use]
    pub fn with_deck(mut self, deck: &'a mut dyn Deck) -> Self {
        self.deck = Some(deck);
        self
    }

    #[must_use]
    pub fn with_stats(mut self, stats: &'a mut dyn PlayerStats) -> Self {
        self.stats = Some(stats);
        self
    }

    #[must_use]
    pub fn with_prompt(mut self, prompt: &'a mut dyn ConfirmPrompt) -> Self {
        self.prompt = Some(prompt);
        self
    }

    #[must_use]
    pub fn with_animator(mut self, animator: &'a mut dyn Animator) -> Self {
        self.animator = Some(animator);
        self
    }
}

/// Table limit applied to draws made while a combat is on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableLimit {
    pub cap: usize,
    /// Cards currently sitting in combat zones (the hand is counted live).
    pub cards_in_zones: usize,
}

/// Mutable state shared by every step of one ability invocation.
pub struct EffectContext<'a> {
    source: CardInstance,
    ability: Arc<AbilityDefinition>,
    params: FxHashMap<String, i64>,
    table: Option<TableLimit>,
    /// `Some` while a restore run is being collected.
    restore_buffer: Option<RestoreBuffer>,
    combat_request: Option<Vec<OpponentDescriptor>>,
    failures: Vec<StepFailure>,
    applied_costs: Vec<usize>,
    collaborators: Collaborators<'a>,
}

impl<'a> EffectContext<'a> {
    /// Create a context for running `ability` on behalf of `source`.
    #[must_use]
    pub fn new(
        source: CardInstance,
        ability: impl Into<Arc<AbilityDefinition>>,
        collaborators: Collaborators<'a>,
    ) -> Self {
        Self {
            source,
            ability: ability.into(),
            params: FxHashMap::default(),
            table: None,
            restore_buffer: None,
            combat_request: None,
            failures: Vec::new(),
            applied_costs: Vec::new(),
            collaborators,
        }
    }

    /// Set an integer parameter (builder pattern).
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: i64) -> Self {
        self.params.insert(key.into(), value);
        self
    }

    /// Clamp draws to a table cap as well as the hand limit.
    #[must_use]
    pub fn with_table_limit(mut self, limit: TableLimit) -> Self {
        self.table = Some(limit);
        self
    }

    /// The card whose ability is running.
    #[must_use]
    pub fn source(&self) -> &CardInstance {
        &self.source
    }

    /// The ability being run.
    #[must_use]
    pub fn ability(&self) -> &Arc<AbilityDefinition> {
        &self.ability
    }

    #[must_use]
    pub fn params(&self) -> &FxHashMap<String, i64> {
        &self.params
    }

    #[must_use]
    pub fn param(&self, key: &str) -> Option<i64> {
        self.params.get(key).copied()
    }

    /// Give the collaborators back once the invocation is over.
    #[must_use]
    pub fn into_collaborators(self) -> Collaborators<'a> {
        self.collaborators
    }

    // === Collaborator access ===

    pub fn hand(&mut self) -> Result<&mut (dyn Hand + 'a), StepError> {
        match &mut self.collaborators.hand {
            Some(hand) => Ok(&mut **hand),
            None => Err(StepError::MissingCollaborator(Collaborator::Hand)),
        }
    }

    pub fn deck(&mut self) -> Result<&mut (dyn Deck + 'a), StepError> {
        match &mut self.collaborators.deck {
            Some(deck) => Ok(&mut **deck),
            None => Err(StepError::MissingCollaborator(Collaborator::Deck)),
        }
    }

    pub fn stats(&mut self) -> Result<&mut (dyn PlayerStats + 'a), StepError> {
        match &mut self.collaborators.stats {
            Some(stats) => Ok(&mut **stats),
            None => Err(StepError::MissingCollaborator(Collaborator::Stats)),
        }
    }

    pub fn prompt(&mut self) -> Option<&mut (dyn ConfirmPrompt + 'a)> {
        match &mut self.collaborators.prompt {
            Some(prompt) => Some(&mut **prompt),
            None => None,
        }
    }

    pub fn animator(&mut self) -> Option<&mut (dyn Animator + 'a)> {
        match &mut self.collaborators.animator {
            Some(animator) => Some(&mut **animator),
            None => None,
        }
    }

    #[must_use]
    pub fn has_animator(&self) -> bool {
        self.collaborators.animator.is_some()
    }

    /// How many cards a draw may add right now.
    ///
    /// Zero when there is no hand to draw into.
    #[must_use]
    pub fn draw_room(&self) -> usize {
        let Some(hand) = self.collaborators.hand.as_deref() else {
            return 0;
        };
        let mut room = capacity(hand.max_size(), hand.count());
        if let Some(limit) = self.table {
            room = room.min(table_capacity(limit.cap, hand.count() + limit.cards_in_zones));
        }
        room
    }

    // === Restore batching ===

    /// Enter batch-collection mode with an empty buffer.
    pub fn begin_restore_batch(&mut self) {
        self.restore_buffer = Some(RestoreBuffer::new());
    }

    #[must_use]
    pub fn is_collecting_restores(&self) -> bool {
        self.restore_buffer.is_some()
    }

    /// Record a restore while collecting. Ignored outside batch mode.
    pub fn push_restore(&mut self, stat: StatKind, amount: i64) {
        if let Some(buffer) = &mut self.restore_buffer {
            buffer.push((stat, amount));
        }
    }

    /// Leave batch mode and return what was collected.
    pub fn finish_restore_batch(&mut self) -> RestoreBuffer {
        self.restore_buffer.take().unwrap_or_default()
    }

    // === Outcome bookkeeping ===

    /// Record a combat the caller should start once the pipeline completes.
    pub fn request_combat(&mut self, opponents: Vec<OpponentDescriptor>) {
        self.combat_request = Some(opponents);
    }

    pub fn take_combat_request(&mut self) -> Option<Vec<OpponentDescriptor>> {
        self.combat_request.take()
    }

    pub fn record_failure(&mut self, failure: StepFailure) {
        self.failures.push(failure);
    }

    #[must_use]
    pub fn failures(&self) -> &[StepFailure] {
        &self.failures
    }

    pub fn take_failures(&mut self) -> Vec<StepFailure> {
        std::mem::take(&mut self.failures)
    }

    pub fn mark_cost_applied(&mut self, index: usize) {
        self.applied_costs.push(index);
    }

    #[must_use]
    pub fn applied_costs(&self) -> &[usize] {
        &self.applied_costs
    }
}
