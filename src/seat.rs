//! Seat and dealer state.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::error::ActionError;
use crate::rules;

/// Chip amounts. Unsigned, so a bankroll can never go negative.
pub type Chips = u64;

/// A play decision.
///
/// Only hit and stand are offered. Double and split are not part of the
/// table's contract and are rejected when requested, never downgraded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerAction {
    /// Draw one more card.
    Hit,
    /// Keep the current hand.
    Stand,
}

impl PlayerAction {
    /// Wire name of the action.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hit => "hit",
            Self::Stand => "stand",
        }
    }
}

impl FromStr for PlayerAction {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hit" => Ok(Self::Hit),
            "stand" => Ok(Self::Stand),
            "double" | "split" => Err(ActionError::Unsupported(s.to_string())),
            _ => Err(ActionError::Unknown(s.to_string())),
        }
    }
}

/// The last thing a seat did this hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatAction {
    /// Placed a bet.
    Bet,
    /// Took a card.
    Hit,
    /// Stood.
    Stand,
}

impl From<PlayerAction> for SeatAction {
    fn from(action: PlayerAction) -> Self {
        match action {
            PlayerAction::Hit => Self::Hit,
            PlayerAction::Stand => Self::Stand,
        }
    }
}

/// One participant slot at the table.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Seat {
    /// Identity of whoever sits here.
    pub id: String,
    /// Stable zero-based seat index.
    pub seat: usize,
    /// Cards dealt this hand, in order.
    pub hand: Vec<Card>,
    /// Bet escrowed for this hand.
    pub bet: Chips,
    /// Chips not currently in escrow.
    pub bankroll: Chips,
    /// No further action this hand.
    pub standing: bool,
    /// Hand is over 21. Implies `standing`.
    pub busted: bool,
    /// Last action taken this hand.
    pub last_action: Option<SeatAction>,
    /// Whether an agent drives this seat.
    pub agent: bool,
    #[serde(skip)]
    pub(crate) starting_bankroll: Chips,
}

impl Seat {
    pub(crate) fn new(id: String, seat: usize, bankroll: Chips, agent: bool) -> Self {
        Self {
            id,
            seat,
            hand: Vec::new(),
            bet: 0,
            bankroll,
            standing: false,
            busted: false,
            last_action: None,
            agent,
            starting_bankroll: bankroll,
        }
    }

    /// Current hand value.
    #[must_use]
    pub fn value(&self) -> u8 {
        rules::hand_value(&self.hand)
    }

    /// Bankroll plus any bet currently in escrow.
    #[must_use]
    pub const fn available(&self) -> Chips {
        self.bankroll.saturating_add(self.bet)
    }

    /// Whether the seat was dealt into the current hand.
    #[must_use]
    pub fn in_hand(&self) -> bool {
        !self.hand.is_empty()
    }

    /// Whether the seat may still act this hand.
    #[must_use]
    pub fn is_eligible(&self) -> bool {
        self.in_hand() && !self.standing && !self.busted && self.value() < rules::BLACKJACK
    }

    /// Adds a card, marking the seat busted or standing on 21 as needed.
    pub(crate) fn receive(&mut self, card: Card) {
        self.hand.push(card);
        let value = self.value();
        if value > rules::BLACKJACK {
            self.busted = true;
            self.standing = true;
        } else if value == rules::BLACKJACK {
            self.standing = true;
        }
    }

    /// Returns the escrowed bet to the bankroll.
    pub(crate) const fn refund(&mut self) {
        self.bankroll = self.bankroll.saturating_add(self.bet);
        self.bet = 0;
    }

    /// Clears everything scoped to a single hand.
    pub(crate) fn clear_hand(&mut self) {
        self.hand.clear();
        self.bet = 0;
        self.standing = false;
        self.busted = false;
        self.last_action = None;
    }
}

/// The dealer's hand.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dealer {
    /// Cards in the hand; only the first is public until `revealed`.
    pub cards: Vec<Card>,
    /// Dealer finished drawing.
    pub standing: bool,
    /// Dealer is over 21.
    pub busted: bool,
    /// Dealer's turn resolved and every card is public.
    pub revealed: bool,
}

impl Dealer {
    /// The first (public) card.
    #[must_use]
    pub fn up_card(&self) -> Option<Card> {
        self.cards.first().copied()
    }

    /// Full hand value.
    #[must_use]
    pub fn value(&self) -> u8 {
        rules::hand_value(&self.cards)
    }

    /// Cards anyone at the table is allowed to see.
    #[must_use]
    pub fn visible_cards(&self) -> &[Card] {
        if self.revealed {
            &self.cards
        } else {
            &self.cards[..self.cards.len().min(1)]
        }
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }
}
