//! Table phases and phase timing.

use core::fmt;
use std::time::Instant;

use serde::Serialize;

/// Table phase. Exactly one is active at a time.
///
/// Phases run linearly: `Waiting → Betting → Dealing → Decisions → Dealer →
/// Settling → Finished`, after which the next hand starts at `Betting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// No hand started yet.
    Waiting,
    /// Accepting bets for the next hand.
    Betting,
    /// Initial cards dealt, play not yet started.
    Dealing,
    /// Seats are acting in seat order.
    Decisions,
    /// Dealer plays out their hand.
    Dealer,
    /// Payouts are being applied.
    Settling,
    /// Hand settled.
    Finished,
}

impl Phase {
    /// Lowercase name of the phase.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::Betting => "betting",
            Self::Dealing => "dealing",
            Self::Decisions => "decisions",
            Self::Dealer => "dealer",
            Self::Settling => "settling",
            Self::Finished => "finished",
        }
    }

    /// Whether bets placed this hand are still held in escrow.
    #[must_use]
    pub const fn holds_escrow(self) -> bool {
        matches!(
            self,
            Self::Betting | Self::Dealing | Self::Decisions | Self::Dealer | Self::Settling
        )
    }

    /// Whether seats are still playing, so their hole cards stay hidden.
    #[must_use]
    pub const fn in_play(self) -> bool {
        matches!(self, Self::Dealing | Self::Decisions)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time spent in one phase of the current hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseTiming {
    /// The phase.
    pub phase: Phase,
    /// Milliseconds spent in it; still growing for the current phase.
    pub millis: u64,
}

/// Read-only timing projection derived from phase-transition timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableTelemetry {
    /// Current phase.
    pub phase: Phase,
    /// Milliseconds since the current phase began.
    pub millis_in_phase: u64,
    /// Every phase entered since the hand started, in order.
    pub phases: Vec<PhaseTiming>,
}

/// Records when each phase was entered.
#[derive(Debug, Clone)]
pub(crate) struct PhaseClock {
    entered: Vec<(Phase, Instant)>,
}

impl PhaseClock {
    pub(crate) fn new(phase: Phase) -> Self {
        Self {
            entered: vec![(phase, Instant::now())],
        }
    }

    /// Records a transition. A new hand restarts the history.
    pub(crate) fn enter(&mut self, phase: Phase) {
        if phase == Phase::Betting || phase == Phase::Waiting {
            self.entered.clear();
        }
        self.entered.push((phase, Instant::now()));
    }

    pub(crate) fn telemetry(&self) -> TableTelemetry {
        let now = Instant::now();
        let phases: Vec<PhaseTiming> = self
            .entered
            .iter()
            .enumerate()
            .map(|(i, &(phase, start))| {
                let end = self.entered.get(i + 1).map_or(now, |&(_, next)| next);
                PhaseTiming {
                    phase,
                    millis: u64::try_from(end.saturating_duration_since(start).as_millis())
                        .unwrap_or(u64::MAX),
                }
            })
            .collect();

        let current = phases.last().copied().unwrap_or(PhaseTiming {
            phase: Phase::Waiting,
            millis: 0,
        });

        TableTelemetry {
            phase: current.phase,
            millis_in_phase: current.millis,
            phases,
        }
    }
}
