//! Tick layout: how many ticks the ring has, which are filled, which one is
//! current, and how long each is drawn.
//!
//! Index mapping (proportional policy): the value's fraction of its range is
//! scaled to `N - 1` and rounded half up, so the lower bound is tick 0 and the
//! upper bound is tick `N - 1`. Exact .5 ties go to the higher tick.
//! `filled_count` is always `current_index + 1` in setup.
//!
//! The range depends on the tick policy. `fixed` keeps one ring and maps a
//! duration over all of [1, 4320] minutes, so the fill never drops while the
//! value rises. `per_mode` swaps rings at the hour: minutes map over [1, 59]
//! and hours over [60, 4320], and the fill restarts from tick 0 at 60.

use std::time::Instant;

use serde::Serialize;

use super::value::{
    DialValue, HOUR_BOUNDARY, MINUTES_MAX, MINUTES_MIN, TEMPERATURE_MAX, TEMPERATURE_MIN,
};
use super::{Lifecycle, Mode, TimePhase};
use crate::animation::easing::ease_in_out_cubic;
use crate::animation::lerp;
use crate::config::{HoursGranularity, MappingPolicy, ScalingConfig, TickConfig, TickPolicy};

/// What drives the ring fill outside setup
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RingFill {
    /// Setup: fill follows the edited value
    Value,
    /// Share of the ring that is filled, in [0, 1]
    Fraction(f64),
    /// Filled ticks are `round(N × progress)` (starting animation)
    Ramp(f64),
}

/// Output of one layout pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub total_ticks: usize,
    pub filled_count: usize,
    pub current_index: usize,
    /// Position of the live value within its travel range, in [0, 1]
    pub value_fraction: f64,
    pub length_multipliers: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct TickLayoutEngine {
    ticks: TickConfig,
    scaling: ScalingConfig,
}

impl TickLayoutEngine {
    pub fn new(ticks: &TickConfig, scaling: &ScalingConfig) -> Self {
        Self {
            ticks: ticks.clone(),
            scaling: scaling.clone(),
        }
    }

    /// Ring size for a display mode
    pub fn tick_count(&self, mode: Mode, phase: TimePhase) -> usize {
        let count = match self.ticks.policy {
            TickPolicy::Fixed => self.ticks.fixed_count,
            TickPolicy::PerMode => match (mode, phase) {
                (Mode::Temperature, _) => self.ticks.temperature,
                (Mode::Time, TimePhase::Minutes) => self.ticks.minutes,
                (Mode::Time, TimePhase::Hours) => match self.ticks.hours_granularity {
                    HoursGranularity::Hourly => self.ticks.hours,
                    HoursGranularity::QuarterHour => self.ticks.quarter_hours,
                },
            },
        };
        usize::from(count.max(1))
    }

    /// Current tick for the edited value and its fraction of the travel range
    pub fn position(&self, mode: Mode, value: &DialValue, total: usize) -> (usize, f64) {
        let (v, min, max) = match mode {
            Mode::Temperature => (value.temperature, TEMPERATURE_MIN, TEMPERATURE_MAX),
            Mode::Time => match (self.ticks.policy, value.time_phase()) {
                // One ring for the whole duration
                (TickPolicy::Fixed, _) => (value.total_minutes, MINUTES_MIN, MINUTES_MAX),
                (TickPolicy::PerMode, TimePhase::Minutes) => {
                    (value.total_minutes, MINUTES_MIN, HOUR_BOUNDARY - 1)
                }
                (TickPolicy::PerMode, TimePhase::Hours) => {
                    (value.total_minutes, HOUR_BOUNDARY, MINUTES_MAX)
                }
            },
        };
        let v = v.clamp(min, max);
        let fraction = f64::from(v - min) / f64::from(max - min);

        let index = match (self.ticks.mapping, mode) {
            (MappingPolicy::Looped, Mode::Time) => {
                let minute = (value.total_minutes % 60) as usize;
                round_half_up(minute * total, 60) % total
            }
            _ => round_half_up((v - min) as usize * (total - 1), (max - min) as usize),
        };
        (index.min(total - 1), fraction)
    }

    /// Full layout for one frame. `intensity` is the eased scaling strength in [0, 1].
    pub fn layout(
        &self,
        lifecycle: Lifecycle,
        mode: Mode,
        value: &DialValue,
        fill: RingFill,
        intensity: f64,
    ) -> Layout {
        // Outside setup the dial always shows the duration
        let display_mode = if lifecycle == Lifecycle::Setup {
            mode
        } else {
            Mode::Time
        };
        let total = self.tick_count(display_mode, value.time_phase());

        let (filled_count, current_index, value_fraction) = match fill {
            RingFill::Value => {
                let (index, fraction) = self.position(display_mode, value, total);
                (index + 1, index, fraction)
            }
            RingFill::Fraction(f) => {
                let f = f.clamp(0.0, 1.0);
                let filled = ((f * total as f64).ceil() as usize).min(total);
                (filled, filled.saturating_sub(1), f)
            }
            RingFill::Ramp(p) => {
                let p = p.clamp(0.0, 1.0);
                let filled = ((p * total as f64).round() as usize).min(total);
                (filled, filled.saturating_sub(1), p)
            }
        };

        Layout {
            total_ticks: total,
            filled_count,
            current_index,
            value_fraction,
            length_multipliers: self.length_multipliers(current_index, total, intensity),
        }
    }

    /// Per-tick length: 1.0 everywhere unless scaling is enabled
    pub fn length_multipliers(&self, current: usize, total: usize, intensity: f64) -> Vec<f64> {
        if !self.scaling.enabled {
            return vec![1.0; total];
        }
        let intensity = intensity.clamp(0.0, 1.0);
        (0..total)
            .map(|i| {
                let target = self.target_length(circular_distance(i, current, total));
                lerp(1.0, target, intensity)
            })
            .collect()
    }

    /// Fully-active length for a tick `distance` ticks away from the current one
    pub fn target_length(&self, distance: usize) -> f64 {
        let s = &self.scaling;
        let radius = usize::from(s.radius);
        if distance == 0 {
            s.peak
        } else if distance <= radius {
            let normalized = distance as f64 / (radius + 1) as f64;
            1.0 + (s.peak - 1.0) * s.falloff * (1.0 - s.curve.apply(normalized))
        } else {
            1.0
        }
    }

    /// Clockwise angle of a tick in degrees. A configured gap is centred on
    /// the top and the ticks span the rest of the circle.
    pub fn angle(&self, index: usize, total: usize) -> f64 {
        tick_angle(index, total, self.ticks.gap_degrees)
    }
}

/// Clockwise angle of tick `index` of `total`, 0 at the top, with a `gap` centred on the top
pub fn tick_angle(index: usize, total: usize, gap: f64) -> f64 {
    if gap <= 0.0 || total < 2 {
        index as f64 * 360.0 / total.max(1) as f64
    } else {
        gap / 2.0 + index as f64 * (360.0 - gap) / (total - 1) as f64
    }
}

/// `round(num / den)` with .5 rounding up, in integers
fn round_half_up(num: usize, den: usize) -> usize {
    if den == 0 {
        return 0;
    }
    (2 * num + den) / (2 * den)
}

/// Shorter of the clockwise and counter-clockwise distance between two ticks
pub fn circular_distance(a: usize, b: usize, total: usize) -> usize {
    let d = a.abs_diff(b) % total.max(1);
    d.min(total - d)
}

/// Eased tick-length strength that follows the "recently adjusted" state.
///
/// The transition clock itself lives in the controller's animation registry;
/// this only remembers the endpoints and when the value last moved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalingState {
    from: f64,
    to: f64,
    last_adjust: Option<Instant>,
}

impl Default for ScalingState {
    fn default() -> Self {
        Self {
            from: 0.0,
            to: 0.0,
            last_adjust: None,
        }
    }
}

impl ScalingState {
    /// Strength at a given transition progress (`None` = no transition running)
    pub fn intensity(&self, progress: Option<f64>) -> f64 {
        match progress {
            Some(p) => lerp(self.from, self.to, ease_in_out_cubic(p)),
            None => self.to,
        }
    }

    pub fn is_active(&self) -> bool {
        self.to > 0.0
    }

    /// Mark an adjustment. Returns true when a transition toward full strength must start.
    pub fn activate(&mut self, now: Instant, progress: Option<f64>) -> bool {
        self.last_adjust = Some(now);
        if self.is_active() {
            return false;
        }
        self.from = self.intensity(progress);
        self.to = 1.0;
        true
    }

    /// Start easing back to rest once idle for `delay`. Returns true when it starts.
    pub fn check_idle(
        &mut self,
        now: Instant,
        delay: std::time::Duration,
        progress: Option<f64>,
    ) -> bool {
        let idle = self
            .last_adjust
            .is_some_and(|t| now.saturating_duration_since(t) >= delay);
        if !self.is_active() || !idle {
            return false;
        }
        self.from = self.intensity(progress);
        self.to = 0.0;
        true
    }
}
