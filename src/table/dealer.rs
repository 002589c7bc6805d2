use tracing::{debug, info, warn};

use crate::error::PhaseError;
use crate::event::TableEvent;
use crate::result::{Outcome, RoundResult, SeatResult};
use crate::rules;
use crate::seat::Chips;
use crate::view::TableState;

use super::{Phase, Table};

fn signed(chips: Chips) -> i64 {
    i64::try_from(chips).unwrap_or(i64::MAX)
}

impl Table {
    /// Whether the opening deal ran out of cards before the dealer got both.
    ///
    /// The dealer takes the last card of each opening round, so a short
    /// dealer hand means some seats were short too. Such a hand is void and
    /// every bet pushes.
    fn deal_cut_short(&self) -> bool {
        self.dealer.cards.len() < 2
    }

    /// Reveals the hole card and draws to the dealer policy.
    ///
    /// Runs to completion with no agent involved. If the shoe runs out the
    /// dealer stands on what they have. A dealer whose opening deal was cut
    /// short does not draw.
    pub(crate) fn resolve_dealer(&mut self) {
        self.current = None;
        if self.phase != Phase::Dealer {
            self.transition(Phase::Dealer);
        }

        let void = self.deal_cut_short();
        while !void && rules::dealer_should_hit(&self.dealer.cards) {
            let Some(card) = self.draw() else {
                break;
            };
            debug!(card = card.value(), "dealer draws");
            self.dealer.cards.push(card);
        }

        let value = self.dealer.value();
        let busted = rules::is_bust(&self.dealer.cards);
        self.dealer.standing = true;
        self.dealer.busted = busted;
        self.dealer.revealed = true;

        info!(
            hand_number = self.hand_number,
            value,
            busted,
            "dealer resolved"
        );
        self.emit(TableEvent::DealerResolved { value, busted });
        let line = if void {
            "Shoe ran out during the deal. All bets push.".to_string()
        } else if busted {
            format!("Dealer busts with {value}.")
        } else {
            format!("Dealer stands on {value}.")
        };
        self.post_chat(super::TABLE_SPEAKER, &line);
    }

    /// Plays the dealer's hand.
    ///
    /// Play normally reaches the dealer on its own once the last seat is
    /// done, in which case this is a no-op returning the current state.
    ///
    /// # Errors
    ///
    /// Returns an error while a seat can still act, or outside the decisions
    /// and dealer phases.
    pub fn play_dealer_hand(&mut self) -> Result<TableState, PhaseError> {
        match self.phase {
            Phase::Dealer if self.dealer.revealed => {}
            Phase::Dealer => self.resolve_dealer(),
            Phase::Decisions => {
                if let Some(seat) = self.seats.iter().position(|s| s.is_eligible()) {
                    return Err(PhaseError::SeatsPending(seat));
                }
                self.resolve_dealer();
            }
            phase => {
                return Err(PhaseError::Invalid {
                    operation: "play the dealer's hand",
                    phase,
                });
            }
        }
        Ok(self.state())
    }

    /// Settles every seat in the hand against the dealer and finishes it.
    ///
    /// A win pays 1:1 and a two-card blackjack 3:2 rounded down, both on top
    /// of the returned bet. A push returns the bet and a loss forfeits it.
    /// If the opening deal was cut short by an empty shoe, every seat with a
    /// bet pushes, including seats that never got a card.
    ///
    /// # Errors
    ///
    /// Returns an error unless the dealer has finished playing. In particular
    /// a hand that is already settled cannot be settled again.
    pub fn settle_hands(&mut self) -> Result<RoundResult, PhaseError> {
        if self.phase != Phase::Dealer || !self.dealer.revealed {
            return Err(PhaseError::Invalid {
                operation: "settle",
                phase: self.phase,
            });
        }

        self.transition(Phase::Settling);

        let void = self.deal_cut_short();
        if void {
            warn!(hand_number = self.hand_number, "deal cut short, voiding hand");
        }
        let dealer_cards = self.dealer.cards.clone();
        let mut results = Vec::new();

        for seat in &mut self.seats {
            if seat.bet == 0 {
                continue;
            }

            let bet = seat.bet;
            let outcome = if void || !seat.in_hand() {
                Outcome::Push
            } else {
                rules::outcome(&seat.hand, &dealer_cards)
            };
            let blackjack = rules::is_blackjack(&seat.hand);
            let payout = match outcome {
                Outcome::Win if blackjack => bet.saturating_add(rules::blackjack_payout(bet)),
                Outcome::Win => bet.saturating_mul(2),
                Outcome::Push => bet,
                Outcome::Lose => 0,
            };

            seat.bankroll = seat.bankroll.saturating_add(payout);
            seat.bet = 0;

            results.push(SeatResult {
                seat: seat.seat,
                id: seat.id.clone(),
                outcome,
                blackjack: blackjack && outcome == Outcome::Win,
                bet,
                payout,
                net: signed(payout) - signed(bet),
                player_value: seat.value(),
                bankroll: seat.bankroll,
            });
        }

        for result in &results {
            self.emit(TableEvent::SeatSettled {
                seat: result.seat,
                outcome: result.outcome,
                net: result.net,
            });
        }

        self.transition(Phase::Finished);
        info!(
            hand_number = self.hand_number,
            seats = results.len(),
            dealer = self.dealer.value(),
            "hand settled"
        );

        Ok(RoundResult {
            hand_number: self.hand_number,
            seats: results,
            dealer_value: self.dealer.value(),
            dealer_bust: self.dealer.busted,
            dealer_blackjack: !void && rules::is_blackjack(&dealer_cards),
            state: self.state(),
        })
    }
}
