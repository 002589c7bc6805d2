//! Read-only views of a table: the canonical state, the redacted public
//! snapshot handed to agents, and each seat's private view.

use serde::{Deserialize, Serialize};

use crate::agent::AgentCall;
use crate::card::Card;
use crate::chat::ChatMessage;
use crate::seat::{Chips, Dealer, Seat, SeatAction};
use crate::table::{Phase, Table, TableTelemetry};

/// A seat as every other participant sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicPlayer {
    /// Seat identity.
    pub id: String,
    /// Seat index.
    pub seat: usize,
    /// Face-up cards.
    pub visible_cards: Vec<Card>,
    /// Last action this hand.
    pub last_action: Option<SeatAction>,
    /// Bet in front of the seat, if any.
    pub bet: Option<Chips>,
}

/// What everyone at the table can see.
///
/// Seats' hole cards, the dealer's hidden cards and bankrolls never appear
/// here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicSnapshot {
    /// Current hand number.
    pub hand_number: u64,
    /// Fraction of the shoe dealt.
    pub shoe_penetration: f64,
    /// Hi-Lo running count of the dealt cards.
    pub running_count: Option<i32>,
    /// Every seat, in seat order.
    pub players: Vec<PublicPlayer>,
    /// Dealer's first card, 0 before the deal.
    pub dealer_upcard: u8,
    /// Dealer cards that are face up.
    pub dealer_visible_cards: Vec<Card>,
    /// Chat for the current hand.
    pub chat: Vec<ChatMessage>,
}

/// What only one seat can see about itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivateInfo {
    /// Every card the seat holds, hole card included.
    pub my_hole_cards: Vec<Card>,
    /// Seat index.
    pub my_seat: usize,
    /// The seat's bankroll.
    pub bankroll: Chips,
}

/// A non-fatal agent failure recorded during the current hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    /// Seat whose agent failed.
    pub seat: usize,
    /// The call that failed.
    pub call: AgentCall,
    /// What went wrong.
    pub error: String,
}

/// An agent call that started but has not returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingCall {
    /// Seat being asked.
    pub seat: usize,
    /// The call in flight.
    pub call: AgentCall,
}

/// Health of one agent seat.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatHealth {
    /// Seat index.
    pub seat: usize,
    /// Seat identity.
    pub id: String,
    /// Whether the agent answered and reported itself healthy.
    pub ok: bool,
    /// Whatever else the agent reported.
    pub details: serde_json::Map<String, serde_json::Value>,
    /// Why the check failed, if it did.
    pub error: Option<String>,
}

/// Shoe figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoeStats {
    /// Cards in the shoe.
    pub total: usize,
    /// Cards dealt.
    pub dealt: usize,
    /// Cards left.
    pub remaining: usize,
    /// Fraction dealt.
    pub penetration: f64,
    /// Hi-Lo running count.
    pub running_count: i32,
}

/// The canonical table state, as returned by every phase-advancing operation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableState {
    /// Current phase.
    pub phase: Phase,
    /// Current hand number.
    pub hand_number: u64,
    /// Every seat, in full.
    pub seats: Vec<Seat>,
    /// The dealer, in full.
    pub dealer: Dealer,
    /// Seat whose turn it is.
    pub current_seat: Option<usize>,
    /// Chat for the current hand.
    pub chat: Vec<ChatMessage>,
    /// Shoe figures.
    pub shoe: ShoeStats,
    /// Seats that have bet this phase.
    pub bets_placed: Vec<usize>,
    /// Agent call in flight, if any.
    pub pending: Option<PendingCall>,
    /// Last error this phase.
    pub last_error: Option<String>,
    /// Agent failures this hand.
    pub incidents: Vec<Incident>,
    /// Phase timing.
    pub telemetry: TableTelemetry,
}

impl Table {
    /// Returns the canonical table state.
    #[must_use]
    pub fn state(&self) -> TableState {
        TableState {
            phase: self.phase,
            hand_number: self.hand_number,
            seats: self.seats.clone(),
            dealer: self.dealer.clone(),
            current_seat: self.current,
            chat: self.chat.messages().to_vec(),
            shoe: ShoeStats {
                total: self.shoe.len(),
                dealt: self.shoe.dealt(),
                remaining: self.shoe.remaining(),
                penetration: self.shoe.penetration(),
                running_count: self.shoe.running_count(),
            },
            bets_placed: self.book.bets_placed.iter().copied().collect(),
            pending: self.book.pending,
            last_error: self.book.last_error.clone(),
            incidents: self.incidents.clone(),
            telemetry: self.clock.telemetry(),
        }
    }

    fn visible_cards(&self, seat: &Seat) -> Vec<Card> {
        if self.options.hide_hole_cards && self.phase.in_play() {
            seat.hand.iter().skip(1).copied().collect()
        } else {
            seat.hand.clone()
        }
    }

    /// Returns the view of the table every participant may see.
    #[must_use]
    pub fn public_snapshot(&self) -> PublicSnapshot {
        let players = self
            .seats
            .iter()
            .map(|seat| PublicPlayer {
                id: seat.id.clone(),
                seat: seat.seat,
                visible_cards: self.visible_cards(seat),
                last_action: seat.last_action,
                bet: (seat.bet > 0).then_some(seat.bet),
            })
            .collect();

        PublicSnapshot {
            hand_number: self.hand_number,
            shoe_penetration: self.shoe.penetration(),
            running_count: Some(self.shoe.running_count()),
            players,
            dealer_upcard: self.dealer.up_card().map_or(0, Card::value),
            dealer_visible_cards: self.dealer.visible_cards().to_vec(),
            chat: self.chat.messages().to_vec(),
        }
    }

    /// Returns what only `seat` may see, or `None` if there is no such seat.
    #[must_use]
    pub fn private_info(&self, seat: usize) -> Option<PrivateInfo> {
        self.seats.get(seat).map(|s| PrivateInfo {
            my_hole_cards: s.hand.clone(),
            my_seat: s.seat,
            bankroll: s.bankroll,
        })
    }
}
