//! Agent wire types and reply validation.

use serde::{Deserialize, Serialize};

use crate::error::SchemaViolation;
use crate::seat::{Chips, PlayerAction};
use crate::view::{PrivateInfo, PublicSnapshot};

/// Cap on bet narration.
pub const MAX_NARRATION_CHARS: usize = 160;
/// Cap on decision rationale.
pub const MAX_RATIONALE_CHARS: usize = 240;
/// Cap on table talk.
pub const MAX_SAY_CHARS: usize = 160;

/// Bet request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BetRequest {
    /// The seat's bankroll.
    pub bankroll: Chips,
    /// The hand being bet on.
    pub hand_number: u64,
}

/// Bet reply as sent by the agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetReply {
    /// Requested bet.
    #[serde(alias = "betAmount")]
    pub bet_amount: i64,
    /// Narration posted to chat.
    #[serde(default, rename = "rationale", alias = "narration")]
    pub narration: String,
}

/// Which request an [`AgentIo`] carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentRole {
    /// Play decision.
    #[serde(rename = "decision")]
    Decision,
    /// Table talk.
    #[serde(rename = "table-talk")]
    TableTalk,
}

/// Input to decision and table-talk requests: the public table plus the
/// requesting seat's own private view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentIo {
    /// Request kind.
    pub role: AgentRole,
    /// What everyone at the table can see.
    pub public: PublicSnapshot,
    /// What only this seat can see.
    pub me: PrivateInfo,
}

/// Decision reply as sent by the agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionReply {
    /// Requested action.
    pub action: String,
    /// Agent confidence in `[0, 1]`.
    pub confidence: f64,
    /// Explanation posted to chat.
    pub rationale: String,
}

/// Table-talk reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TalkReply {
    /// The line to post.
    pub say: String,
    /// Optional free-form signal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signal: Option<String>,
}

/// Health reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReply {
    /// Whether the agent reports itself healthy.
    pub ok: bool,
    /// Everything else the agent reported.
    #[serde(flatten)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

/// A validated bet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentBet {
    /// Bet amount; table limits are checked when it is placed.
    pub amount: Chips,
    /// Narration for chat.
    pub narration: String,
}

/// A validated decision.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentDecision {
    /// Hit or stand.
    pub action: PlayerAction,
    /// Confidence in `[0, 1]`.
    pub confidence: f64,
    /// Explanation for chat.
    pub rationale: String,
}

/// A validated line of table talk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentTalk {
    /// The line to post.
    pub say: String,
    /// Optional signal.
    pub signal: Option<String>,
}

fn check_len(field: &'static str, text: &str, max: usize) -> Result<(), SchemaViolation> {
    let len = text.chars().count();
    if len > max {
        return Err(SchemaViolation::TextTooLong { field, len, max });
    }
    Ok(())
}

impl BetReply {
    /// Checks the reply against the bet contract.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is negative or the narration is too long.
    pub fn validate(self) -> Result<AgentBet, SchemaViolation> {
        let amount =
            Chips::try_from(self.bet_amount).map_err(|_| SchemaViolation::NegativeBet(self.bet_amount))?;
        check_len("rationale", &self.narration, MAX_NARRATION_CHARS)?;
        Ok(AgentBet {
            amount,
            narration: self.narration,
        })
    }
}

impl DecisionReply {
    /// Checks the reply against the decision contract.
    ///
    /// # Errors
    ///
    /// Returns an error if the action is not hit or stand, the confidence is
    /// not a finite number in `[0, 1]`, or the rationale is too long.
    pub fn validate(self) -> Result<AgentDecision, SchemaViolation> {
        let action = match self.action.trim().to_ascii_lowercase().as_str() {
            "hit" => PlayerAction::Hit,
            "stand" => PlayerAction::Stand,
            "double" | "split" => return Err(SchemaViolation::UnsupportedAction(self.action)),
            _ => return Err(SchemaViolation::UnknownAction(self.action)),
        };
        if !(0.0..=1.0).contains(&self.confidence) {
            return Err(SchemaViolation::Confidence(self.confidence));
        }
        check_len("rationale", &self.rationale, MAX_RATIONALE_CHARS)?;
        Ok(AgentDecision {
            action,
            confidence: self.confidence,
            rationale: self.rationale,
        })
    }
}

impl TalkReply {
    /// Checks the reply against the table-talk contract.
    ///
    /// # Errors
    ///
    /// Returns an error if `say` or `signal` is too long.
    pub fn validate(self) -> Result<AgentTalk, SchemaViolation> {
        check_len("say", &self.say, MAX_SAY_CHARS)?;
        if let Some(signal) = &self.signal {
            check_len("signal", signal, MAX_SAY_CHARS)?;
        }
        Ok(AgentTalk {
            say: self.say,
            signal: self.signal,
        })
    }
}
