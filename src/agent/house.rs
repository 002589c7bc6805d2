use serde_json::json;

use crate::error::AgentError;
use crate::rules;
use crate::seat::Chips;

use super::{AgentIo, AgentPort, BetReply, BetRequest, DecisionReply, HealthReply, TalkReply};

/// Hand value from which the house agent stands.
const STAND_AT: u8 = 17;

/// An in-process agent with a simple, fixed style of play.
///
/// Bets a fifth of its bankroll within the table limits, hits below 17 and
/// stands otherwise. Useful for filling seats and for local play without an
/// agent service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HouseAgent {
    min_bet: Chips,
    max_bet: Chips,
}

impl Default for HouseAgent {
    fn default() -> Self {
        Self::new(5, 100)
    }
}

impl HouseAgent {
    /// Creates a house agent betting within `[min_bet, max_bet]`.
    #[must_use]
    pub const fn new(min_bet: Chips, max_bet: Chips) -> Self {
        Self { min_bet, max_bet }
    }

    /// The bet this agent makes with the given bankroll.
    #[must_use]
    pub fn bet_for(&self, bankroll: Chips) -> Chips {
        (bankroll / 5).min(self.max_bet.min(bankroll)).max(self.min_bet)
    }
}

#[async_trait::async_trait]
impl AgentPort for HouseAgent {
    async fn place_bet(&self, req: BetRequest) -> Result<BetReply, AgentError> {
        let amount = self.bet_for(req.bankroll);
        Ok(BetReply {
            bet_amount: i64::try_from(amount).unwrap_or(i64::MAX),
            narration: format!("{amount} on hand {}. The house always plays.", req.hand_number),
        })
    }

    async fn decide(&self, io: AgentIo) -> Result<DecisionReply, AgentError> {
        let value = rules::hand_value(&io.me.my_hole_cards);
        let reply = if value < STAND_AT {
            DecisionReply {
                action: "hit".into(),
                confidence: 0.6,
                rationale: format!("{value} won't hold up. Card, please."),
            }
        } else {
            DecisionReply {
                action: "stand".into(),
                confidence: 0.6,
                rationale: format!("{value} will do. Your move, dealer."),
            }
        };
        Ok(reply)
    }

    async fn table_talk(&self, io: AgentIo) -> Result<TalkReply, AgentError> {
        let value = rules::hand_value(&io.me.my_hole_cards);
        Ok(TalkReply {
            say: format!(
                "Dealer's got a {}? My {value} is ready!",
                io.public.dealer_upcard
            ),
            signal: None,
        })
    }

    async fn health_check(&self) -> Result<HealthReply, AgentError> {
        let details = json!({ "service": "house", "status": "ready" });
        Ok(HealthReply {
            ok: true,
            details: details.as_object().cloned().unwrap_or_default(),
        })
    }
}
