//! Cook-cycle phase machine: Setup → Starting → (Preheat →) Cooking → Complete.
//!
//! Time-driven transitions are evaluated from wall-clock timestamps on every
//! [`PhaseMachine::advance`] call. Each transition restarts the phase clock at
//! the `now` it was observed, so one call moves at most one phase forward.

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::info;

use super::Lifecycle;
use crate::config::LifecycleConfig;

/// Running countdown, present only while preheating or cooking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub started_at: Instant,
    pub duration_secs: u64,
}

impl Countdown {
    pub fn elapsed_secs(&self, now: Instant) -> u64 {
        now.saturating_duration_since(self.started_at).as_secs()
    }

    /// Whole seconds left, never negative
    pub fn remaining_secs(&self, now: Instant) -> u64 {
        self.duration_secs.saturating_sub(self.elapsed_secs(now))
    }

    /// Share of the duration still to run, in [0, 1] with sub-second precision
    pub fn remaining_fraction(&self, now: Instant) -> f64 {
        if self.duration_secs == 0 {
            return 0.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at).as_secs_f64();
        (1.0 - elapsed / self.duration_secs as f64).clamp(0.0, 1.0)
    }
}

/// Serializable view of the countdown for render frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CountdownView {
    pub duration_secs: u64,
    pub remaining_secs: u64,
}

#[derive(Debug, Clone)]
pub struct PhaseMachine {
    lifecycle: Lifecycle,
    phase_started_at: Option<Instant>,
    countdown: Option<Countdown>,
    preheat_enabled: bool,
    preheat: Duration,
    starting: Duration,
}

impl PhaseMachine {
    pub fn new(config: &LifecycleConfig) -> Self {
        Self {
            lifecycle: Lifecycle::Setup,
            phase_started_at: None,
            countdown: None,
            preheat_enabled: config.preheat,
            preheat: Duration::from_secs(config.preheat_secs),
            starting: Duration::from_millis(config.starting_ms),
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn countdown(&self) -> Option<&Countdown> {
        self.countdown.as_ref()
    }

    pub fn starting_duration(&self) -> Duration {
        self.starting
    }

    /// Time spent in the current phase, zero in Setup and Complete
    pub fn phase_elapsed(&self, now: Instant) -> Duration {
        self.phase_started_at
            .map(|t| now.saturating_duration_since(t))
            .unwrap_or_default()
    }

    /// Ring fill progress while Starting, in [0, 1]
    pub fn starting_progress(&self, now: Instant) -> f64 {
        match self.lifecycle {
            Lifecycle::Starting => {
                (self.phase_elapsed(now).as_secs_f64() / self.starting.as_secs_f64()).min(1.0)
            }
            Lifecycle::Setup => 0.0,
            _ => 1.0,
        }
    }

    /// Setup → Starting. Returns false (and does nothing) from any other phase.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.lifecycle != Lifecycle::Setup {
            return false;
        }
        self.enter(Lifecycle::Starting, now);
        true
    }

    /// Apply at most one time-driven transition. Returns the phase entered, if any.
    ///
    /// `total_minutes` is captured as the countdown duration when Starting ends.
    pub fn advance(&mut self, now: Instant, total_minutes: u32) -> Option<Lifecycle> {
        let next = match self.lifecycle {
            Lifecycle::Setup | Lifecycle::Complete => None,
            Lifecycle::Starting => {
                if self.phase_elapsed(now) < self.starting {
                    None
                } else {
                    self.countdown = Some(Countdown {
                        started_at: now,
                        duration_secs: u64::from(total_minutes) * 60,
                    });
                    if self.preheat_enabled {
                        Some(Lifecycle::Preheat)
                    } else {
                        Some(Lifecycle::Cooking)
                    }
                }
            }
            Lifecycle::Preheat => {
                if self.phase_elapsed(now) < self.preheat {
                    None
                } else {
                    if let Some(countdown) = self.countdown.as_mut() {
                        countdown.started_at = now;
                    }
                    Some(Lifecycle::Cooking)
                }
            }
            Lifecycle::Cooking => match self.countdown {
                Some(countdown) if countdown.remaining_secs(now) > 0 => None,
                _ => {
                    self.countdown = None;
                    Some(Lifecycle::Complete)
                }
            },
        };

        if let Some(phase) = next {
            self.enter(phase, now);
        }
        next
    }

    /// Back to Setup with no countdown
    pub fn reset(&mut self) {
        self.lifecycle = Lifecycle::Setup;
        self.phase_started_at = None;
        self.countdown = None;
    }

    fn enter(&mut self, phase: Lifecycle, now: Instant) {
        info!(from = %self.lifecycle, to = %phase, "lifecycle transition");
        self.lifecycle = phase;
        self.phase_started_at = match phase {
            Lifecycle::Setup | Lifecycle::Complete => None,
            _ => Some(now),
        };
    }
}
