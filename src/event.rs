//! Typed table events and the sink they are emitted to.
//!
//! The engine never publishes anything itself. It emits [`TableEvent`]s to an
//! [`EventSink`], and whoever owns the sink decides how and when to notify
//! clients. [`TracingEventSink`] is the default and only logs.

use serde::Serialize;

use crate::agent::AgentCall;
use crate::result::Outcome;
use crate::seat::{Chips, PlayerAction};
use crate::table::Phase;

/// Something that happened at the table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum TableEvent {
    /// A new hand began.
    HandStarted {
        /// The new hand number.
        hand_number: u64,
        /// Whether a fresh shoe was built for it.
        reshuffled: bool,
    },
    /// The table moved to another phase.
    PhaseChanged {
        /// Previous phase.
        from: Phase,
        /// New phase.
        to: Phase,
    },
    /// A bet was escrowed.
    BetPlaced {
        /// Seat index.
        seat: usize,
        /// Amount escrowed.
        amount: Chips,
        /// Whether this was the fallback bet.
        fallback: bool,
    },
    /// A seat acted.
    ActionApplied {
        /// Seat index.
        seat: usize,
        /// The action.
        action: PlayerAction,
        /// Hand value afterwards.
        value: u8,
    },
    /// An agent call failed and its fallback was used.
    AgentFallback {
        /// Seat index.
        seat: usize,
        /// The failed call.
        call: AgentCall,
        /// What went wrong.
        error: String,
    },
    /// A chat line was posted.
    ChatPosted {
        /// Speaker.
        speaker: String,
        /// Text, already truncated.
        text: String,
    },
    /// The shoe ran out while cards were needed.
    ShoeExhausted,
    /// The dealer finished drawing.
    DealerResolved {
        /// Final dealer value.
        value: u8,
        /// Whether the dealer busted.
        busted: bool,
    },
    /// A seat's hand was settled.
    SeatSettled {
        /// Seat index.
        seat: usize,
        /// Outcome.
        outcome: Outcome,
        /// Net chips won or lost.
        net: i64,
    },
}

/// Receives table events. Must not block.
pub trait EventSink: Send + Sync {
    /// Handles one event.
    fn emit(&self, event: TableEvent);
}

/// Event sink that logs every [`TableEvent`] through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn emit(&self, event: TableEvent) {
        match event {
            TableEvent::HandStarted {
                hand_number,
                reshuffled,
            } => tracing::info!(hand_number, reshuffled, "hand started"),
            TableEvent::PhaseChanged { from, to } => {
                tracing::info!(%from, %to, "phase changed");
            }
            TableEvent::BetPlaced {
                seat,
                amount,
                fallback,
            } => tracing::debug!(seat, amount, fallback, "bet placed"),
            TableEvent::ActionApplied {
                seat,
                action,
                value,
            } => tracing::debug!(seat, action = action.as_str(), value, "action applied"),
            TableEvent::AgentFallback { seat, call, error } => {
                tracing::warn!(seat, %call, %error, "agent call failed, using fallback");
            }
            TableEvent::ChatPosted { speaker, text } => {
                tracing::trace!(%speaker, %text, "chat");
            }
            TableEvent::ShoeExhausted => tracing::warn!("shoe exhausted"),
            TableEvent::DealerResolved { value, busted } => {
                tracing::debug!(value, busted, "dealer resolved");
            }
            TableEvent::SeatSettled { seat, outcome, net } => {
                tracing::info!(seat, ?outcome, net, "seat settled");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emit_all_variants_no_panic() {
        let sink = TracingEventSink;
        let events = vec![
            TableEvent::HandStarted {
                hand_number: 1,
                reshuffled: false,
            },
            TableEvent::PhaseChanged {
                from: Phase::Waiting,
                to: Phase::Betting,
            },
            TableEvent::BetPlaced {
                seat: 0,
                amount: 5,
                fallback: true,
            },
            TableEvent::ActionApplied {
                seat: 0,
                action: PlayerAction::Hit,
                value: 18,
            },
            TableEvent::AgentFallback {
                seat: 1,
                call: AgentCall::Decision,
                error: "timeout".into(),
            },
            TableEvent::ChatPosted {
                speaker: "dealer".into(),
                text: "good luck".into(),
            },
            TableEvent::ShoeExhausted,
            TableEvent::DealerResolved {
                value: 22,
                busted: true,
            },
            TableEvent::SeatSettled {
                seat: 0,
                outcome: Outcome::Win,
                net: 10,
            },
        ];
        for event in events {
            sink.emit(event);
        }
    }

    #[test]
    fn events_serialize_with_type_tag() {
        let json = serde_json::to_value(TableEvent::PhaseChanged {
            from: Phase::Dealing,
            to: Phase::Decisions,
        })
        .unwrap();
        assert_eq!(json["type"], "phaseChanged");
        assert_eq!(json["to"], "decisions");
    }
}
