//! Settlement result types.

use serde::Serialize;

use crate::seat::Chips;
use crate::view::TableState;

/// Result of a seat's hand against the dealer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Seat beats the dealer.
    Win,
    /// Dealer beats the seat.
    Lose,
    /// Tie; the bet is returned.
    Push,
}

/// Settlement of a single seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatResult {
    /// Seat index.
    pub seat: usize,
    /// Seat identity.
    pub id: String,
    /// The outcome of the hand.
    pub outcome: Outcome,
    /// Whether the seat won with a two-card blackjack.
    pub blackjack: bool,
    /// The escrowed bet.
    pub bet: Chips,
    /// Chips returned to the bankroll (escrow plus winnings).
    pub payout: Chips,
    /// Net result (positive = profit, negative = loss).
    pub net: i64,
    /// The seat's final hand value.
    pub player_value: u8,
    /// Bankroll after settlement.
    pub bankroll: Chips,
}

/// Result of settling a hand.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundResult {
    /// The settled hand.
    pub hand_number: u64,
    /// Results for each seat that played, in seat order.
    pub seats: Vec<SeatResult>,
    /// The dealer's final hand value.
    pub dealer_value: u8,
    /// Whether the dealer busted.
    pub dealer_bust: bool,
    /// Whether the dealer had blackjack.
    pub dealer_blackjack: bool,
    /// Table state after settlement.
    pub state: TableState,
}
