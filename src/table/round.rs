use tracing::{info, warn};

use crate::error::PhaseError;
use crate::result::RoundResult;
use crate::view::SeatHealth;

use super::{Phase, Table};

impl Table {
    /// Plays one whole hand with agents: opens the hand, collects agent
    /// bets, deals, plays and settles.
    ///
    /// Returns `Ok(None)` and leaves the table where it stopped when a manual
    /// seat still has to bet or act; the caller finishes the hand with the
    /// step-by-step operations.
    ///
    /// # Errors
    ///
    /// Returns an error if nobody could bet.
    pub async fn play_agent_hand(&mut self) -> Result<Option<RoundResult>, PhaseError> {
        self.start_new_hand();
        self.collect_agent_bets().await;

        match self.start_dealing() {
            Ok(_) => {}
            Err(PhaseError::BetsIncomplete(seats)) => {
                info!(?seats, "waiting on manual bets");
                return Ok(None);
            }
            Err(err) => return Err(err),
        }

        self.start_decision_phase().await?;
        if self.phase != Phase::Dealer {
            return Ok(None);
        }
        self.settle_hands().map(Some)
    }

    /// Checks every agent seat's health, in seat order.
    ///
    /// Failures are reported, not recorded as incidents.
    pub async fn check_agent_health(&self) -> Vec<SeatHealth> {
        let mut report = Vec::new();
        for (seat, agent) in self.agents.iter().enumerate() {
            let Some(agent) = agent else {
                continue;
            };
            let id = self.seats[seat].id.clone();
            let health = match agent.health_check().await {
                Ok(reply) => SeatHealth {
                    seat,
                    id,
                    ok: reply.ok,
                    details: reply.details,
                    error: None,
                },
                Err(err) => {
                    warn!(seat, %err, "agent health check failed");
                    SeatHealth {
                        seat,
                        id,
                        ok: false,
                        details: serde_json::Map::new(),
                        error: Some(err.to_string()),
                    }
                }
            };
            report.push(health);
        }
        report
    }
}
