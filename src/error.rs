//! Error types for table operations and agent calls.

use thiserror::Error;

use crate::agent::AgentCall;
use crate::seat::Chips;
use crate::table::Phase;

/// Errors that can occur when placing a bet.
///
/// A rejected bet leaves the table untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BetError {
    /// Bets are only taken during the betting phase.
    #[error("bets are not accepted during the {0} phase")]
    InvalidPhase(Phase),
    /// Seat not found.
    #[error("seat not found")]
    SeatNotFound,
    /// Bet is under the table minimum.
    #[error("bet of {amount} is below the table minimum of {min}")]
    BelowMinimum {
        /// Requested amount.
        amount: Chips,
        /// Table minimum.
        min: Chips,
    },
    /// Bet is over the table maximum.
    #[error("bet of {amount} is above the table maximum of {max}")]
    AboveMaximum {
        /// Requested amount.
        amount: Chips,
        /// Table maximum.
        max: Chips,
    },
    /// Insufficient funds.
    #[error("bet of {amount} exceeds the available balance of {available}")]
    InsufficientFunds {
        /// Requested amount.
        amount: Chips,
        /// Bankroll plus the bet already in escrow.
        available: Chips,
    },
}

/// Errors raised when an operation does not fit the table's current phase.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhaseError {
    /// The operation is not valid in this phase.
    #[error("cannot {operation} during the {phase} phase")]
    Invalid {
        /// The rejected operation.
        operation: &'static str,
        /// The phase the table was in.
        phase: Phase,
    },
    /// Some seats that can afford the minimum have not bet yet.
    #[error("seats {0:?} have not placed a bet")]
    BetsIncomplete(Vec<usize>),
    /// No seat placed a bet.
    #[error("no seat has placed a bet")]
    NoBets,
    /// A seat can still act, so the dealer may not play.
    #[error("seat {0} still has to act")]
    SeatsPending(usize),
}

/// Errors that can occur when applying a play decision.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Actions are only taken during the decisions phase.
    #[error("actions are not accepted during the {0} phase")]
    InvalidPhase(Phase),
    /// Seat not found.
    #[error("seat not found")]
    SeatNotFound,
    /// Not this seat's turn.
    #[error("not seat {seat}'s turn")]
    NotYourTurn {
        /// The seat that tried to act.
        seat: usize,
    },
    /// The action exists in blackjack but this table does not offer it.
    #[error("action {0:?} is not offered at this table")]
    Unsupported(String),
    /// Not a blackjack action at all.
    #[error("unknown action {0:?}")]
    Unknown(String),
}

/// A reply that does not satisfy the agent contract.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaViolation {
    /// Bet amount below zero.
    #[error("negative bet amount {0}")]
    NegativeBet(i64),
    /// Double or split requested.
    #[error("unsupported action {0:?}")]
    UnsupportedAction(String),
    /// Action outside the enumerated set.
    #[error("unknown action {0:?}")]
    UnknownAction(String),
    /// Confidence not a finite number in `[0, 1]`.
    #[error("confidence {0} is outside [0, 1]")]
    Confidence(f64),
    /// A text field exceeds its cap.
    #[error("{field} is {len} characters, limit is {max}")]
    TextTooLong {
        /// Name of the offending field.
        field: &'static str,
        /// Length in characters.
        len: usize,
        /// Allowed maximum.
        max: usize,
    },
}

/// Agent call failures. None of these is fatal to a hand.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AgentError {
    /// The call did not complete within its timeout.
    #[error("{call} call timed out after {after_ms} ms")]
    Timeout {
        /// Which call timed out.
        call: AgentCall,
        /// The timeout that elapsed.
        after_ms: u64,
    },
    /// The agent could not be reached.
    #[error("transport error: {0}")]
    Transport(String),
    /// The agent answered with a non-success status.
    #[error("agent responded with status {0}")]
    Status(u16),
    /// The reply could not be decoded.
    #[error("malformed reply: {0}")]
    Malformed(String),
    /// The reply decoded but broke the contract.
    #[error("schema violation: {0}")]
    Schema(#[from] SchemaViolation),
    /// The table refused the bet the agent asked for.
    #[error("bet rejected: {0}")]
    Rejected(#[from] BetError),
}
