//! Table configuration options.

use core::time::Duration;

use serde::Deserialize;

use crate::seat::Chips;

/// Per-call timeouts for agent requests, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(default)]
pub struct AgentTimeouts {
    /// Bet request timeout.
    pub bet_ms: u64,
    /// Decision request timeout.
    pub decision_ms: u64,
    /// Table-talk request timeout.
    pub talk_ms: u64,
    /// Health check timeout.
    pub health_ms: u64,
}

impl Default for AgentTimeouts {
    fn default() -> Self {
        Self {
            bet_ms: 5_000,
            decision_ms: 5_000,
            talk_ms: 3_000,
            health_ms: 2_000,
        }
    }
}

impl AgentTimeouts {
    /// Uses the same timeout for every call.
    #[must_use]
    pub const fn uniform(ms: u64) -> Self {
        Self {
            bet_ms: ms,
            decision_ms: ms,
            talk_ms: ms,
            health_ms: ms,
        }
    }

    pub(crate) const fn bet(&self) -> Duration {
        Duration::from_millis(self.bet_ms)
    }

    pub(crate) const fn decision(&self) -> Duration {
        Duration::from_millis(self.decision_ms)
    }

    pub(crate) const fn talk(&self) -> Duration {
        Duration::from_millis(self.talk_ms)
    }

    pub(crate) const fn health(&self) -> Duration {
        Duration::from_millis(self.health_ms)
    }
}

/// Configuration options for a table.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use bjtable::TableOptions;
///
/// let options = TableOptions::default()
///     .with_decks(6)
///     .with_min_bet(10)
///     .with_max_bet(200);
/// ```
///
/// Options also deserialize from JSON, with missing fields taking their
/// defaults:
///
/// ```
/// use bjtable::TableOptions;
///
/// let options: TableOptions = serde_json::from_str(r#"{"decks": 2}"#).unwrap();
/// assert_eq!(options.decks, 2);
/// assert_eq!(options.min_bet, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TableOptions {
    /// Number of decks in the shoe.
    pub decks: u8,
    /// Smallest bet accepted.
    pub min_bet: Chips,
    /// Largest bet accepted.
    pub max_bet: Chips,
    /// Bet placed for an agent seat whose agent failed or bet invalidly.
    pub fallback_bet: Chips,
    /// A new shoe is built when fewer cards than this remain at hand start.
    pub reshuffle_threshold: usize,
    /// Agent call timeouts.
    pub agent_timeouts: AgentTimeouts,
    /// Whether a seat's first card stays out of the public snapshot until
    /// the hand resolves.
    pub hide_hole_cards: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            decks: 4,
            min_bet: 5,
            max_bet: 100,
            fallback_bet: 5,
            reshuffle_threshold: 20,
            agent_timeouts: AgentTimeouts::default(),
            hide_hole_cards: true,
        }
    }
}

impl TableOptions {
    /// Sets the number of decks.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::TableOptions;
    ///
    /// let options = TableOptions::default().with_decks(6);
    /// assert_eq!(options.decks, 6);
    /// ```
    #[must_use]
    pub const fn with_decks(mut self, decks: u8) -> Self {
        self.decks = decks;
        self
    }

    /// Sets the table minimum.
    #[must_use]
    pub const fn with_min_bet(mut self, min_bet: Chips) -> Self {
        self.min_bet = min_bet;
        self
    }

    /// Sets the table maximum.
    #[must_use]
    pub const fn with_max_bet(mut self, max_bet: Chips) -> Self {
        self.max_bet = max_bet;
        self
    }

    /// Sets the bet placed when an agent cannot produce a valid one.
    #[must_use]
    pub const fn with_fallback_bet(mut self, fallback_bet: Chips) -> Self {
        self.fallback_bet = fallback_bet;
        self
    }

    /// Sets the remaining-card count below which a fresh shoe is built.
    #[must_use]
    pub const fn with_reshuffle_threshold(mut self, threshold: usize) -> Self {
        self.reshuffle_threshold = threshold;
        self
    }

    /// Sets the agent call timeouts.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::{AgentTimeouts, TableOptions};
    ///
    /// let options = TableOptions::default().with_agent_timeouts(AgentTimeouts::uniform(250));
    /// assert_eq!(options.agent_timeouts.decision_ms, 250);
    /// ```
    #[must_use]
    pub const fn with_agent_timeouts(mut self, timeouts: AgentTimeouts) -> Self {
        self.agent_timeouts = timeouts;
        self
    }

    /// Sets whether seats' first cards are hidden from the public snapshot.
    #[must_use]
    pub const fn with_hole_card_hidden(mut self, hidden: bool) -> Self {
        self.hide_hole_cards = hidden;
        self
    }
}
