//! A multiplayer blackjack table engine whose seats are driven by agents.
//!
//! A [`Table`] owns one game: the shoe, the seats, the dealer and the phase
//! machine that takes each hand from betting to settlement. Seats can be
//! played manually or handed to an [`AgentPort`], an external service asked
//! for bets, chat lines and hit/stand decisions. Every agent call is bounded
//! by a timeout and schema-checked, and a failing agent is replaced by a
//! fixed fallback, so a started hand always finishes.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use bjtable::{HouseAgent, Table, TableOptions};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let mut table = Table::new(TableOptions::default(), 42);
//! table.join_agent("house", 500, Arc::new(HouseAgent::default()))?;
//!
//! if let Some(result) = table.play_agent_hand().await? {
//!     println!("{:?}", result.seats[0].outcome);
//! }
//! # Ok(())
//! # }
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod agent;
pub mod card;
pub mod chat;
pub mod error;
pub mod event;
pub mod options;
pub mod result;
pub mod rules;
pub mod seat;
pub mod shoe;
mod sync;
pub mod table;
pub mod view;

// Re-export main types
pub use agent::{
    AgentCall, AgentIo, AgentPort, AgentRole, BetReply, BetRequest, DecisionReply, HealthReply,
    HouseAgent, HttpAgent, SeatAgent, TalkReply,
};
pub use card::{Card, DECK_SIZE};
pub use chat::{ChatLog, ChatMessage, MAX_CHAT_CHARS};
pub use error::{ActionError, AgentError, BetError, PhaseError, SchemaViolation};
pub use event::{EventSink, TableEvent, TracingEventSink};
pub use options::{AgentTimeouts, TableOptions};
pub use result::{Outcome, RoundResult, SeatResult};
pub use seat::{Chips, Dealer, PlayerAction, Seat, SeatAction};
pub use shoe::Shoe;
pub use sync::TableHandle;
pub use table::{Phase, PhaseTiming, TABLE_SPEAKER, Table, TableTelemetry};
pub use view::{
    Incident, PendingCall, PrivateInfo, PublicPlayer, PublicSnapshot, SeatHealth, ShoeStats,
    TableState,
};
