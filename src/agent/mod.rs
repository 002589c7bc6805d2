//! The agent port: how the table asks a seat's agent for bets, chat lines
//! and play decisions.
//!
//! [`AgentPort`] is the raw request/response boundary an adapter implements.
//! [`SeatAgent`] wraps a port with the contract the table relies on: every
//! call is bounded by a timeout and every reply is schema-checked before use.
//! The table never talks to an [`AgentPort`] directly.

use core::fmt;

use serde::Serialize;

use crate::error::AgentError;

mod guard;
mod house;
mod http;
mod types;

pub use guard::SeatAgent;
pub use house::HouseAgent;
pub use http::HttpAgent;
pub use types::{
    AgentBet, AgentDecision, AgentIo, AgentRole, AgentTalk, BetReply, BetRequest, DecisionReply,
    HealthReply, MAX_NARRATION_CHARS, MAX_RATIONALE_CHARS, MAX_SAY_CHARS, TalkReply,
};

/// Port to an external decision-making service bound to a seat.
#[async_trait::async_trait]
pub trait AgentPort: Send + Sync {
    /// Ask for a bet for the upcoming hand.
    async fn place_bet(&self, req: BetRequest) -> Result<BetReply, AgentError>;

    /// Ask for a play decision.
    async fn decide(&self, io: AgentIo) -> Result<DecisionReply, AgentError>;

    /// Ask for a line of table talk.
    async fn table_talk(&self, io: AgentIo) -> Result<TalkReply, AgentError>;

    /// Check that the agent is up.
    async fn health_check(&self) -> Result<HealthReply, AgentError>;
}

/// The agent call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AgentCall {
    /// Bet request.
    Bet,
    /// Decision request.
    Decision,
    /// Table-talk request.
    TableTalk,
    /// Health check.
    Health,
}

impl fmt::Display for AgentCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bet => "bet",
            Self::Decision => "decision",
            Self::TableTalk => "table-talk",
            Self::Health => "health",
        })
    }
}
