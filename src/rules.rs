//! Blackjack rule evaluation over card sequences.
//!
//! Everything here is a pure function of its arguments.

use crate::card::Card;
use crate::result::Outcome;

/// Value every hand is trying to reach.
pub const BLACKJACK: u8 = 21;

/// Dealer stands at or above this value (except soft 17).
pub const DEALER_STANDS_AT: u8 = 17;

/// Returns the hand value and whether an ace is still counted as 11.
fn evaluate(cards: &[Card]) -> (u8, bool) {
    let mut value: u8 = 0;
    let mut aces_as_eleven: u8 = 0;

    for card in cards {
        if card.is_ace() {
            aces_as_eleven += 1;
            value = value.saturating_add(11);
        } else {
            value = value.saturating_add(card.value());
        }
    }

    while value > BLACKJACK && aces_as_eleven > 0 {
        value -= 10;
        aces_as_eleven -= 1;
    }

    (value, aces_as_eleven > 0)
}

/// Calculates the value of a hand.
///
/// Aces start at 11 and drop to 1, one at a time, while the total is over 21.
#[must_use]
pub fn hand_value(cards: &[Card]) -> u8 {
    evaluate(cards).0
}

/// Returns whether the hand's value relies on an ace counted as 11.
#[must_use]
pub fn is_soft(cards: &[Card]) -> bool {
    evaluate(cards).1
}

/// Exactly two cards totalling 21.
#[must_use]
pub fn is_blackjack(cards: &[Card]) -> bool {
    cards.len() == 2 && hand_value(cards) == BLACKJACK
}

/// Hand value over 21.
#[must_use]
pub fn is_bust(cards: &[Card]) -> bool {
    hand_value(cards) > BLACKJACK
}

/// Dealer policy: hit below 17, hit soft 17, stand on hard 17 and above.
#[must_use]
pub fn dealer_should_hit(cards: &[Card]) -> bool {
    let (value, soft) = evaluate(cards);
    value < DEALER_STANDS_AT || (value == DEALER_STANDS_AT && soft)
}

/// Decides a seat's hand against the dealer's final hand.
///
/// A busted player always loses, even when the dealer busts too.
#[must_use]
pub fn outcome(player: &[Card], dealer: &[Card]) -> Outcome {
    if is_bust(player) {
        return Outcome::Lose;
    }
    if is_bust(dealer) {
        return Outcome::Win;
    }

    match (is_blackjack(player), is_blackjack(dealer)) {
        (true, true) => Outcome::Push,
        (true, false) => Outcome::Win,
        (false, true) => Outcome::Lose,
        (false, false) => {
            let (player_value, dealer_value) = (hand_value(player), hand_value(dealer));
            if player_value > dealer_value {
                Outcome::Win
            } else if player_value < dealer_value {
                Outcome::Lose
            } else {
                Outcome::Push
            }
        }
    }
}

/// Winnings on a blackjack: 3:2, rounded down.
#[must_use]
pub const fn blackjack_payout(bet: u64) -> u64 {
    (bet / 2).saturating_mul(3).saturating_add(bet % 2)
}
