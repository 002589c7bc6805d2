use tracing::{debug, info, warn};

use crate::agent::AgentCall;
use crate::error::{AgentError, BetError};
use crate::event::TableEvent;
use crate::seat::{Chips, SeatAction};
use crate::view::{PendingCall, TableState};

use super::{Phase, Table};

impl Table {
    /// Starts the next hand and opens betting.
    ///
    /// Builds a fresh shoe when fewer than
    /// [`reshuffle_threshold`](crate::TableOptions::reshuffle_threshold)
    /// cards remain, and clears hands, chat and bookkeeping. Calling this
    /// mid-hand abandons that hand; bets still in escrow are refunded first.
    pub fn start_new_hand(&mut self) -> TableState {
        if self.phase.holds_escrow() {
            warn!(
                hand_number = self.hand_number,
                phase = %self.phase,
                "abandoning hand in progress"
            );
        }
        for seat in &mut self.seats {
            seat.refund();
        }

        self.hand_number += 1;

        let reshuffled = self.shoe.remaining() < self.options.reshuffle_threshold;
        if reshuffled {
            let seed = self.next_shoe_seed();
            self.shoe.reseed(self.options.decks, seed);
            info!(hand_number = self.hand_number, seed, "new shoe");
        }

        for seat in &mut self.seats {
            seat.clear_hand();
        }
        self.dealer.clear();
        self.chat.clear();
        self.incidents.clear();
        self.current = None;

        self.emit(TableEvent::HandStarted {
            hand_number: self.hand_number,
            reshuffled,
        });
        self.transition(Phase::Betting);
        self.state()
    }

    /// Places (or replaces) the bet for `seat`.
    ///
    /// The amount is escrowed out of the bankroll. A seat that already bet
    /// this hand gets its previous bet back before the new one is taken, so
    /// bets never accumulate.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is not taking bets, the seat does not
    /// exist, or the amount is outside the table limits or over the seat's
    /// bankroll plus its current bet. Nothing changes on error.
    pub fn place_bet(&mut self, seat: usize, amount: Chips) -> Result<TableState, BetError> {
        self.escrow_bet(seat, amount, false)?;
        Ok(self.state())
    }

    fn escrow_bet(&mut self, seat: usize, amount: Chips, fallback: bool) -> Result<(), BetError> {
        if self.phase != Phase::Betting {
            return Err(BetError::InvalidPhase(self.phase));
        }

        let (min, max) = (self.options.min_bet, self.options.max_bet);
        let player = self.seats.get_mut(seat).ok_or(BetError::SeatNotFound)?;

        if amount < min {
            return Err(BetError::BelowMinimum { amount, min });
        }
        if amount > max {
            return Err(BetError::AboveMaximum { amount, max });
        }
        let available = player.available();
        if amount > available {
            return Err(BetError::InsufficientFunds { amount, available });
        }

        player.refund();
        player.bankroll -= amount;
        player.bet = amount;
        player.last_action = Some(SeatAction::Bet);
        debug!(seat, amount, bankroll = player.bankroll, "bet escrowed");

        self.book.bets_placed.insert(seat);
        self.emit(TableEvent::BetPlaced {
            seat,
            amount,
            fallback,
        });
        Ok(())
    }

    /// Whether the seat can cover the table minimum this hand.
    pub(crate) fn can_afford_minimum(&self, seat: usize) -> bool {
        self.seats
            .get(seat)
            .is_some_and(|s| s.available() >= self.options.min_bet)
    }

    /// Collects a bet from every agent seat, one seat at a time in seat order.
    ///
    /// Each agent is asked with its bankroll and the hand number, and its
    /// narration goes to chat. If the agent fails, times out, answers out of
    /// schema, or bets something the table rejects, the seat gets the
    /// fallback bet and a fallback chat line, and the failure is recorded as
    /// an incident. Seats that cannot cover the minimum sit the hand out.
    ///
    /// # Errors
    ///
    /// Returns an error if the table is not taking bets.
    pub async fn place_bets_for_all_agents(&mut self) -> Result<TableState, BetError> {
        if self.phase != Phase::Betting {
            return Err(BetError::InvalidPhase(self.phase));
        }
        self.collect_agent_bets().await;
        Ok(self.state())
    }

    pub(crate) async fn collect_agent_bets(&mut self) {
        for seat in 0..self.seats.len() {
            let Some(agent) = self.agents[seat].clone() else {
                continue;
            };
            if !self.can_afford_minimum(seat) {
                info!(seat, "seat cannot cover the minimum, sitting out");
                continue;
            }

            let bankroll = self.seats[seat].available();
            self.book.pending = Some(PendingCall {
                seat,
                call: AgentCall::Bet,
            });
            let reply = agent.place_bet(bankroll, self.hand_number).await;
            self.book.pending = None;

            let error = match reply {
                Ok(bet) => match self.escrow_bet(seat, bet.amount, false) {
                    Ok(()) => {
                        if !bet.narration.is_empty() {
                            let speaker = self.seats[seat].id.clone();
                            self.post_chat(&speaker, &bet.narration);
                        }
                        continue;
                    }
                    Err(err) => AgentError::Rejected(err),
                },
                Err(err) => err,
            };

            self.record_agent_failure(seat, AgentCall::Bet, &error);
            self.place_fallback_bet(seat);
        }
    }

    fn place_fallback_bet(&mut self, seat: usize) {
        let available = self.seats[seat].available();
        let amount = self
            .options
            .fallback_bet
            .max(self.options.min_bet)
            .min(available);
        let speaker = self.seats[seat].id.clone();

        match self.escrow_bet(seat, amount, true) {
            Ok(()) => {
                self.post_chat(&speaker, &format!("{speaker} slides {amount} chips forward."));
            }
            Err(err) => {
                warn!(seat, %err, "fallback bet rejected");
                self.post_chat(&speaker, &format!("{speaker} sits this one out."));
            }
        }
    }
}
