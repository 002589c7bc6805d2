//! Deterministic, seedable card shoe.

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::card::{Card, single_deck};

/// A shuffled multi-deck shoe.
///
/// The shuffle is a pure function of the seed, so two shoes built with the
/// same deck count and seed deal the same sequence. The running count is
/// recomputed from the dealt prefix instead of being tracked on the side.
#[derive(Debug, Clone)]
pub struct Shoe {
    cards: Vec<Card>,
    dealt: usize,
    seed: u64,
}

impl Shoe {
    /// Creates and shuffles a shoe of `decks` decks.
    #[must_use]
    pub fn new(decks: u8, seed: u64) -> Self {
        let mut shoe = Self {
            cards: Vec::new(),
            dealt: 0,
            seed,
        };
        shoe.reset(decks);
        shoe
    }

    /// Creates a shoe that deals exactly `cards`, in order.
    ///
    /// Useful for scripted hands; the seed is recorded as 0.
    #[must_use]
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self {
            cards,
            dealt: 0,
            seed: 0,
        }
    }

    /// Rebuilds the full population and reshuffles it with the stored seed.
    pub fn reset(&mut self, decks: u8) {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        self.cards.clear();
        for _ in 0..decks {
            self.cards.extend(single_deck());
        }
        self.cards.shuffle(&mut rng);
        self.dealt = 0;
    }

    /// Rebuilds and reshuffles with a new seed.
    pub fn reseed(&mut self, decks: u8, seed: u64) {
        self.seed = seed;
        self.reset(decks);
    }

    /// Deals the next card, or `None` once the shoe is exhausted.
    pub fn draw(&mut self) -> Option<Card> {
        let card = self.cards.get(self.dealt).copied()?;
        self.dealt += 1;
        Some(card)
    }

    /// Number of cards dealt so far.
    #[must_use]
    pub const fn dealt(&self) -> usize {
        self.dealt
    }

    /// Total number of cards in the shoe.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the shoe holds no cards at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of cards left to deal.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cards.len() - self.dealt
    }

    /// Fraction of the shoe already dealt, in `[0, 1]`.
    #[must_use]
    pub fn penetration(&self) -> f64 {
        if self.cards.is_empty() {
            return 0.0;
        }
        #[expect(
            clippy::cast_precision_loss,
            reason = "f64 has sufficient precision for card counts"
        )]
        let ratio = self.dealt as f64 / self.cards.len() as f64;
        ratio
    }

    /// Hi-Lo running count over the dealt cards.
    #[must_use]
    pub fn running_count(&self) -> i32 {
        self.cards[..self.dealt].iter().map(|card| card.hi_lo()).sum()
    }

    /// The seed this shoe was shuffled with.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }
}
