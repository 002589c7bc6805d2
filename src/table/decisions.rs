use tracing::{debug, info};

use crate::agent::{AgentCall, AgentIo, AgentRole};
use crate::error::{ActionError, PhaseError};
use crate::event::TableEvent;
use crate::seat::{PlayerAction, SeatAction};
use crate::view::{PendingCall, TableState};

use super::{Phase, Table};

impl Table {
    /// Builds the request for `seat`'s agent, or `None` if the seat is not
    /// in the hand.
    pub(crate) fn agent_io(&self, seat: usize, role: AgentRole) -> Option<AgentIo> {
        if !self.seats.get(seat)?.in_hand() {
            return None;
        }
        Some(AgentIo {
            role,
            public: self.public_snapshot(),
            me: self.private_info(seat)?,
        })
    }

    /// Lowest eligible seat at or after `from`.
    fn next_eligible(&self, from: usize) -> Option<usize> {
        (from..self.seats.len()).find(|&seat| self.seats[seat].is_eligible())
    }

    /// Opens play.
    ///
    /// The lowest eligible seat becomes current. Agent seats are played
    /// automatically until a manual seat is up, and once no seat can act the
    /// dealer plays out their hand.
    ///
    /// # Errors
    ///
    /// Returns an error outside the dealing phase.
    pub async fn start_decision_phase(&mut self) -> Result<TableState, PhaseError> {
        if self.phase != Phase::Dealing {
            return Err(PhaseError::Invalid {
                operation: "start decisions",
                phase: self.phase,
            });
        }

        self.transition(Phase::Decisions);
        self.current = self.next_eligible(0);
        self.run_decisions().await;
        Ok(self.state())
    }

    /// Applies a manual seat's action, then continues play.
    ///
    /// # Errors
    ///
    /// Returns an error outside the decisions phase, for an unknown seat, or
    /// when it is not `seat`'s turn.
    pub async fn apply_player_action(
        &mut self,
        seat: usize,
        action: PlayerAction,
    ) -> Result<TableState, ActionError> {
        if self.phase != Phase::Decisions {
            return Err(ActionError::InvalidPhase(self.phase));
        }
        if seat >= self.seats.len() {
            return Err(ActionError::SeatNotFound);
        }
        if self.current != Some(seat) {
            return Err(ActionError::NotYourTurn { seat });
        }

        self.act(seat, action);
        self.run_decisions().await;
        Ok(self.state())
    }

    /// Plays agent seats until a manual seat is up or nobody can act.
    async fn run_decisions(&mut self) {
        while let Some(seat) = self.current {
            let Some(agent) = self.agents[seat].clone() else {
                debug!(seat, "waiting on manual seat");
                return;
            };
            let Some(io) = self.agent_io(seat, AgentRole::Decision) else {
                return;
            };

            self.book.pending = Some(PendingCall {
                seat,
                call: AgentCall::Decision,
            });
            let reply = agent.decide(io).await;
            self.book.pending = None;

            let speaker = self.seats[seat].id.clone();
            let action = match reply {
                Ok(decision) => {
                    if !decision.rationale.is_empty() {
                        self.post_chat(&speaker, &decision.rationale);
                    }
                    decision.action
                }
                Err(err) => {
                    self.record_agent_failure(seat, AgentCall::Decision, &err);
                    self.post_chat(&speaker, &format!("{speaker} waves a hand and stands."));
                    PlayerAction::Stand
                }
            };
            self.act(seat, action);
        }

        info!(hand_number = self.hand_number, "no seat left to act");
        self.resolve_dealer();
    }

    /// Applies `action` for `seat` and moves the turn on once the seat is
    /// done.
    fn act(&mut self, seat: usize, action: PlayerAction) {
        match action {
            PlayerAction::Hit => {
                if let Some(card) = self.draw() {
                    self.seats[seat].receive(card);
                } else {
                    self.seats[seat].standing = true;
                }
            }
            PlayerAction::Stand => self.seats[seat].standing = true,
        }

        let player = &mut self.seats[seat];
        player.last_action = Some(SeatAction::from(action));
        let value = player.value();
        debug!(seat, action = action.as_str(), value, "action applied");
        self.emit(TableEvent::ActionApplied {
            seat,
            action,
            value,
        });

        if !self.seats[seat].is_eligible() {
            self.current = self.next_eligible(seat + 1);
        }
    }
}
