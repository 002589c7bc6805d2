//! Table engine and state management.

use std::collections::BTreeSet;
use std::sync::Arc;

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use crate::agent::{AgentCall, AgentPort, SeatAgent};
use crate::card::Card;
use crate::chat::ChatLog;
use crate::error::{AgentError, PhaseError};
use crate::event::{EventSink, TableEvent, TracingEventSink};
use crate::options::TableOptions;
use crate::seat::{Chips, Dealer, Seat};
use crate::shoe::Shoe;
use crate::view::{Incident, PendingCall, TableState};

mod betting;
mod dealer;
mod dealing;
mod decisions;
pub mod phase;
mod round;

pub use phase::{Phase, PhaseTiming, TableTelemetry};

/// Speaker name used for chat lines posted by the table itself.
pub const TABLE_SPEAKER: &str = "table";

/// Bookkeeping scoped to a single phase; reset on every transition.
#[derive(Debug, Clone, Default)]
pub(crate) struct Bookkeeping {
    /// Seats that have placed a bet.
    pub(crate) bets_placed: BTreeSet<usize>,
    /// Agent call in flight.
    pub(crate) pending: Option<PendingCall>,
    /// Last error this phase.
    pub(crate) last_error: Option<String>,
}

/// A blackjack table: the single authoritative owner of one game's state.
///
/// Construct one per table and hand it (or a [`TableHandle`](crate::TableHandle))
/// to the transport layer. Operations that may wait on agents take
/// `&mut self`, so at most one such sequence runs at a time.
pub struct Table {
    pub(crate) options: TableOptions,
    /// Table seed; the first shoe is shuffled with it.
    seed: u64,
    /// Seed stream for subsequent shoes.
    seeds: ChaCha8Rng,
    pub(crate) shoe: Shoe,
    pub(crate) seats: Vec<Seat>,
    pub(crate) agents: Vec<Option<SeatAgent>>,
    pub(crate) dealer: Dealer,
    pub(crate) phase: Phase,
    pub(crate) hand_number: u64,
    pub(crate) chat: ChatLog,
    /// Seat whose turn it is during decisions.
    pub(crate) current: Option<usize>,
    pub(crate) book: Bookkeeping,
    pub(crate) incidents: Vec<Incident>,
    pub(crate) clock: phase::PhaseClock,
    events: Arc<dyn EventSink>,
}

impl core::fmt::Debug for Table {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Table")
            .field("phase", &self.phase)
            .field("hand_number", &self.hand_number)
            .field("seats", &self.seats)
            .field("dealer", &self.dealer)
            .finish_non_exhaustive()
    }
}

impl Table {
    /// Creates a table whose first shoe is shuffled with `seed`.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::{Phase, Table, TableOptions};
    ///
    /// let table = Table::new(TableOptions::default(), 42);
    /// assert_eq!(table.phase(), Phase::Waiting);
    /// ```
    #[must_use]
    pub fn new(options: TableOptions, seed: u64) -> Self {
        let shoe = Shoe::new(options.decks, seed);
        Self {
            options,
            seed,
            seeds: ChaCha8Rng::seed_from_u64(seed),
            shoe,
            seats: Vec::new(),
            agents: Vec::new(),
            dealer: Dealer::default(),
            phase: Phase::Waiting,
            hand_number: 0,
            chat: ChatLog::default(),
            current: None,
            book: Bookkeeping::default(),
            incidents: Vec::new(),
            clock: phase::PhaseClock::new(Phase::Waiting),
            events: Arc::new(TracingEventSink),
        }
    }

    /// Replaces the event sink.
    #[must_use]
    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.events = sink;
        self
    }

    /// Replaces the shoe, e.g. with a scripted [`Shoe::from_cards`].
    ///
    /// The replacement lasts until the next reshuffle.
    pub fn set_shoe(&mut self, shoe: Shoe) {
        self.shoe = shoe;
    }

    /// Convenience for [`Table::set_shoe`] with cards dealt in the given order.
    pub fn set_shoe_cards(&mut self, cards: &[u8]) {
        self.set_shoe(Shoe::from_cards(cards.iter().copied().map(Card::new).collect()));
    }

    fn ensure_seating_open(&self) -> Result<(), PhaseError> {
        if matches!(self.phase, Phase::Waiting | Phase::Finished) {
            Ok(())
        } else {
            Err(PhaseError::Invalid {
                operation: "take a seat",
                phase: self.phase,
            })
        }
    }

    fn seat_with(&mut self, id: String, bankroll: Chips, agent: Option<SeatAgent>) -> usize {
        let index = self.seats.len();
        info!(seat = index, %id, bankroll, agent = agent.is_some(), "seat taken");
        self.seats.push(Seat::new(id, index, bankroll, agent.is_some()));
        self.agents.push(agent);
        index
    }

    /// Seats a manually driven participant. Returns the seat index.
    ///
    /// # Errors
    ///
    /// Returns an error while a hand is in progress.
    pub fn join(&mut self, id: impl Into<String>, bankroll: Chips) -> Result<usize, PhaseError> {
        self.ensure_seating_open()?;
        Ok(self.seat_with(id.into(), bankroll, None))
    }

    /// Seats a participant driven by `agent`. Returns the seat index.
    ///
    /// The agent's calls are bounded by the table's
    /// [`agent_timeouts`](TableOptions::agent_timeouts).
    ///
    /// # Errors
    ///
    /// Returns an error while a hand is in progress.
    pub fn join_agent(
        &mut self,
        id: impl Into<String>,
        bankroll: Chips,
        agent: Arc<dyn AgentPort>,
    ) -> Result<usize, PhaseError> {
        self.ensure_seating_open()?;
        let agent = SeatAgent::new(agent, self.options.agent_timeouts);
        Ok(self.seat_with(id.into(), bankroll, Some(agent)))
    }

    /// Returns the table options.
    #[must_use]
    pub const fn options(&self) -> &TableOptions {
        &self.options
    }

    /// Returns the current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the current hand number.
    #[must_use]
    pub const fn hand_number(&self) -> u64 {
        self.hand_number
    }

    /// Returns the seat whose turn it is.
    #[must_use]
    pub const fn current_seat(&self) -> Option<usize> {
        self.current
    }

    /// Returns all seats.
    #[must_use]
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    /// Returns a seat.
    #[must_use]
    pub fn seat(&self, seat: usize) -> Option<&Seat> {
        self.seats.get(seat)
    }

    /// Returns the dealer.
    #[must_use]
    pub const fn dealer(&self) -> &Dealer {
        &self.dealer
    }

    /// Returns the shoe.
    #[must_use]
    pub const fn shoe(&self) -> &Shoe {
        &self.shoe
    }

    /// Returns the chat log for the current hand.
    #[must_use]
    pub const fn chat(&self) -> &ChatLog {
        &self.chat
    }

    /// Returns agent failures recorded during the current hand.
    #[must_use]
    pub fn incidents(&self) -> &[Incident] {
        &self.incidents
    }

    /// Returns whether an agent drives `seat`.
    #[must_use]
    pub fn is_agent_seat(&self, seat: usize) -> bool {
        self.agents.get(seat).is_some_and(Option::is_some)
    }

    /// Moves to `to` and clears phase-scoped bookkeeping.
    pub(crate) fn transition(&mut self, to: Phase) {
        let from = self.phase;
        self.phase = to;
        self.book = Bookkeeping::default();
        self.clock.enter(to);
        self.emit(TableEvent::PhaseChanged { from, to });
    }

    pub(crate) fn emit(&self, event: TableEvent) {
        self.events.emit(event);
    }

    pub(crate) fn post_chat(&mut self, speaker: &str, text: &str) {
        self.chat.post(speaker, text);
        if let Some(message) = self.chat.messages().last() {
            self.emit(TableEvent::ChatPosted {
                speaker: message.speaker.clone(),
                text: message.text.clone(),
            });
        }
    }

    /// Draws a card, recording exhaustion as the phase's last error.
    pub(crate) fn draw(&mut self) -> Option<Card> {
        let card = self.shoe.draw();
        if card.is_none() {
            warn!(hand_number = self.hand_number, "shoe exhausted");
            self.book.last_error = Some("shoe exhausted".to_string());
            self.emit(TableEvent::ShoeExhausted);
        }
        card
    }

    /// Records a non-fatal agent failure.
    pub(crate) fn record_agent_failure(&mut self, seat: usize, call: AgentCall, error: &AgentError) {
        let error = error.to_string();
        self.book.last_error = Some(format!("seat {seat} {call}: {error}"));
        self.incidents.push(Incident {
            seat,
            call,
            error: error.clone(),
        });
        self.emit(TableEvent::AgentFallback { seat, call, error });
    }

    /// Draws the seed for the next shoe from the table's seed stream.
    pub(crate) fn next_shoe_seed(&mut self) -> u64 {
        self.seeds.next_u64()
    }

    /// Starts the whole game over: every seat back to its starting bankroll,
    /// hand number 0, and the shoe and seed stream rebuilt from the table
    /// seed, so the replay deals the same cards.
    pub fn reset_entire_game(&mut self) -> TableState {
        info!("resetting table");
        for seat in &mut self.seats {
            seat.clear_hand();
            seat.bankroll = seat.starting_bankroll;
        }
        self.dealer.clear();
        self.chat.clear();
        self.incidents.clear();
        self.current = None;
        self.hand_number = 0;
        self.seeds = ChaCha8Rng::seed_from_u64(self.seed);
        self.shoe.reseed(self.options.decks, self.seed);
        self.transition(Phase::Waiting);
        self.state()
    }
}
