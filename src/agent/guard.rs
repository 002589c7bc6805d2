use core::future::Future;
use core::time::Duration;
use std::sync::Arc;

use crate::error::AgentError;
use crate::options::AgentTimeouts;
use crate::seat::Chips;

use super::{
    AgentBet, AgentCall, AgentDecision, AgentIo, AgentPort, AgentTalk, BetRequest, HealthReply,
};

/// An agent as a seat uses it: every call timed out and every reply checked.
///
/// Schema violations and timeouts surface as [`AgentError`]s, so the caller
/// handles both the same way.
#[derive(Clone)]
pub struct SeatAgent {
    port: Arc<dyn AgentPort>,
    timeouts: AgentTimeouts,
}

impl core::fmt::Debug for SeatAgent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SeatAgent")
            .field("timeouts", &self.timeouts)
            .finish_non_exhaustive()
    }
}

async fn bounded<T>(
    call: AgentCall,
    limit: Duration,
    fut: impl Future<Output = Result<T, AgentError>>,
) -> Result<T, AgentError> {
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(AgentError::Timeout {
            call,
            after_ms: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
        }),
    }
}

impl SeatAgent {
    /// Wraps a port with the given timeouts.
    #[must_use]
    pub fn new(port: Arc<dyn AgentPort>, timeouts: AgentTimeouts) -> Self {
        Self { port, timeouts }
    }

    /// The timeouts applied to each call.
    #[must_use]
    pub const fn timeouts(&self) -> AgentTimeouts {
        self.timeouts
    }

    /// Requests and validates a bet.
    ///
    /// # Errors
    ///
    /// Returns an error if the agent fails, times out, or breaks the bet schema.
    pub async fn place_bet(&self, bankroll: Chips, hand_number: u64) -> Result<AgentBet, AgentError> {
        let req = BetRequest {
            bankroll,
            hand_number,
        };
        let reply = bounded(AgentCall::Bet, self.timeouts.bet(), self.port.place_bet(req)).await?;
        Ok(reply.validate()?)
    }

    /// Requests and validates a play decision.
    ///
    /// # Errors
    ///
    /// Returns an error if the agent fails, times out, or breaks the decision schema.
    pub async fn decide(&self, io: AgentIo) -> Result<AgentDecision, AgentError> {
        let reply = bounded(
            AgentCall::Decision,
            self.timeouts.decision(),
            self.port.decide(io),
        )
        .await?;
        Ok(reply.validate()?)
    }

    /// Requests and validates a line of table talk.
    ///
    /// # Errors
    ///
    /// Returns an error if the agent fails, times out, or breaks the talk schema.
    pub async fn table_talk(&self, io: AgentIo) -> Result<AgentTalk, AgentError> {
        let reply = bounded(
            AgentCall::TableTalk,
            self.timeouts.talk(),
            self.port.table_talk(io),
        )
        .await?;
        Ok(reply.validate()?)
    }

    /// Checks agent health.
    ///
    /// # Errors
    ///
    /// Returns an error if the agent fails or times out.
    pub async fn health_check(&self) -> Result<HealthReply, AgentError> {
        bounded(
            AgentCall::Health,
            self.timeouts.health(),
            self.port.health_check(),
        )
        .await
    }
}
