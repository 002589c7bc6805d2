//! Card values and deck composition.

use serde::{Deserialize, Serialize};

/// A card as the table sees it: a blackjack value from 1 to 10.
///
/// Ace is 1 and every ten-value card (10, J, Q, K) is 10. Suits are a
/// presentation concern and are not modeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Card(u8);

impl Card {
    /// The ace.
    pub const ACE: Self = Self(1);
    /// A ten-value card.
    pub const TEN: Self = Self(10);

    /// Creates a card with the given value.
    ///
    /// Note: This function does not validate the value. Values outside
    /// 1..=10 are accepted but may yield non-standard results when
    /// evaluating a hand. Use [`Card::try_new`] for untrusted input.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Creates a card, returning `None` when the value is outside 1..=10.
    #[must_use]
    pub const fn try_new(value: u8) -> Option<Self> {
        match value {
            1..=10 => Some(Self(value)),
            _ => None,
        }
    }

    /// Returns the card value (1 = ace).
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Returns whether this card is an ace.
    #[must_use]
    pub const fn is_ace(self) -> bool {
        self.0 == 1
    }

    /// Hi-Lo contribution of this card to the running count.
    #[must_use]
    pub const fn hi_lo(self) -> i32 {
        match self.0 {
            2..=6 => 1,
            1 | 10 => -1,
            _ => 0,
        }
    }
}

impl From<Card> for u8 {
    fn from(card: Card) -> Self {
        card.0
    }
}

/// Number of cards per deck.
pub const DECK_SIZE: usize = 52;

/// Builds the card population of a single deck: 4 aces, 4 each of 2..=9
/// and 16 ten-value cards.
#[must_use]
pub fn single_deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(DECK_SIZE);
    for value in 1..=9 {
        cards.extend(core::iter::repeat_n(Card(value), 4));
    }
    cards.extend(core::iter::repeat_n(Card::TEN, 16));
    cards
}
