use tracing::{debug, info};

use crate::agent::{AgentCall, AgentRole};
use crate::error::PhaseError;
use crate::view::{PendingCall, TableState};

use super::{Phase, Table};

impl Table {
    /// Deals the opening cards.
    ///
    /// Every betting seat gets a card, then the dealer, and the round is
    /// repeated. A two-card 21 stands immediately. If the shoe runs out the
    /// deal stops where it is and the exhaustion is recorded as the phase's
    /// last error.
    ///
    /// # Errors
    ///
    /// Returns an error outside the betting phase, if a seat that can cover
    /// the minimum has not bet, or if nobody bet at all.
    pub fn start_dealing(&mut self) -> Result<TableState, PhaseError> {
        if self.phase != Phase::Betting {
            return Err(PhaseError::Invalid {
                operation: "deal",
                phase: self.phase,
            });
        }

        let missing: Vec<usize> = (0..self.seats.len())
            .filter(|&seat| self.seats[seat].bet == 0 && self.can_afford_minimum(seat))
            .collect();
        if !missing.is_empty() {
            return Err(PhaseError::BetsIncomplete(missing));
        }
        let betting: Vec<usize> = (0..self.seats.len())
            .filter(|&seat| self.seats[seat].bet > 0)
            .collect();
        if betting.is_empty() {
            return Err(PhaseError::NoBets);
        }

        self.transition(Phase::Dealing);
        self.deal_opening_cards(&betting);

        for &seat in &betting {
            let hand = &self.seats[seat].hand;
            debug!(seat, cards = ?hand, "dealt");
        }
        info!(
            hand_number = self.hand_number,
            seats = betting.len(),
            up_card = ?self.dealer.up_card(),
            "cards dealt"
        );
        Ok(self.state())
    }

    fn deal_opening_cards(&mut self, betting: &[usize]) {
        for _ in 0..2 {
            for &seat in betting {
                let Some(card) = self.draw() else {
                    return;
                };
                self.seats[seat].receive(card);
            }
            let Some(card) = self.draw() else {
                return;
            };
            self.dealer.cards.push(card);
        }
    }

    /// Asks every agent seat in the hand for a line of table talk, in seat
    /// order.
    ///
    /// A failing agent gets a fallback line instead and the failure is
    /// recorded as an incident.
    ///
    /// # Errors
    ///
    /// Returns an error outside the dealing and decisions phases.
    pub async fn request_table_talk(&mut self) -> Result<TableState, PhaseError> {
        if !matches!(self.phase, Phase::Dealing | Phase::Decisions) {
            return Err(PhaseError::Invalid {
                operation: "request table talk",
                phase: self.phase,
            });
        }

        for seat in 0..self.seats.len() {
            let Some(agent) = self.agents[seat].clone() else {
                continue;
            };
            let Some(io) = self.agent_io(seat, AgentRole::TableTalk) else {
                continue;
            };

            self.book.pending = Some(PendingCall {
                seat,
                call: AgentCall::TableTalk,
            });
            let reply = agent.table_talk(io).await;
            self.book.pending = None;

            let speaker = self.seats[seat].id.clone();
            match reply {
                Ok(talk) => {
                    if !talk.say.is_empty() {
                        self.post_chat(&speaker, &talk.say);
                    }
                }
                Err(err) => {
                    self.record_agent_failure(seat, AgentCall::TableTalk, &err);
                    self.post_chat(&speaker, &format!("{speaker} nods at the table."));
                }
            }
        }

        Ok(self.state())
    }
}
