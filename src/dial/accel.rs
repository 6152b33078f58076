//! Input acceleration for rotate events.
//!
//! Keeps a sliding window of recent same-direction rotate timestamps. A burst
//! that fills the window past the rapid threshold switches to a fixed 4x step;
//! a pause longer than the decay timeout, or any reversal, drops back to 1x.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use tracing::debug;

use super::Direction;
use crate::config::InputConfig;

/// Step multiplier outside rapid mode
pub const NORMAL_MULTIPLIER: u32 = 1;
/// Step multiplier while rapid mode is active
pub const RAPID_MULTIPLIER: u32 = 4;

#[derive(Debug, Clone)]
pub struct AccelerationEngine {
    window: Duration,
    decay: Duration,
    threshold: usize,
    history: VecDeque<Instant>,
    rapid_mode_active: bool,
    last_direction: Option<Direction>,
}

impl AccelerationEngine {
    pub fn new(config: &InputConfig) -> Self {
        Self {
            window: Duration::from_millis(config.window_ms),
            decay: Duration::from_millis(config.decay_ms),
            threshold: config.rapid_threshold,
            history: VecDeque::with_capacity(config.rapid_threshold + 1),
            rapid_mode_active: false,
            last_direction: None,
        }
    }

    /// Record a rotate event and return the step multiplier it should use (1 or 4)
    pub fn step_multiplier(&mut self, direction: Direction, now: Instant) -> u32 {
        if self.last_direction != Some(direction) {
            if self.rapid_mode_active {
                debug!(?direction, "rapid mode cleared by reversal");
            }
            self.history.clear();
            self.rapid_mode_active = false;
            self.last_direction = Some(direction);
        }

        let previous = self.history.back().copied();
        self.history.push_back(now);
        while let Some(&oldest) = self.history.front() {
            if now.saturating_duration_since(oldest) > self.window {
                self.history.pop_front();
            } else {
                break;
            }
        }

        if self.rapid_mode_active {
            let gap = previous.map(|p| now.saturating_duration_since(p));
            if gap.is_some_and(|g| g > self.decay) {
                debug!(gap_ms = gap.map(|g| g.as_millis()), "rapid mode decayed");
                self.rapid_mode_active = false;
                self.history.retain(|t| *t == now);
            }
        } else if self.history.len() >= self.threshold {
            debug!(entries = self.history.len(), "rapid mode engaged");
            self.rapid_mode_active = true;
        }

        self.multiplier()
    }

    pub fn multiplier(&self) -> u32 {
        if self.rapid_mode_active {
            RAPID_MULTIPLIER
        } else {
            NORMAL_MULTIPLIER
        }
    }

    pub fn is_rapid(&self) -> bool {
        self.rapid_mode_active
    }

    pub fn last_direction(&self) -> Option<Direction> {
        self.last_direction
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> AccelerationEngine {
        AccelerationEngine::new(&InputConfig::default())
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn slow_input_stays_at_one() {
        let t0 = Instant::now();
        let mut accel = engine();
        for i in 0..50 {
            assert_eq!(accel.step_multiplier(Direction::Increase, t0 + ms(i * 500)), 1);
        }
        assert!(!accel.is_rapid());
    }

    #[test]
    fn thirtieth_call_in_window_is_rapid() {
        let t0 = Instant::now();
        let mut accel = engine();
        for i in 0..29 {
            assert_eq!(accel.step_multiplier(Direction::Increase, t0 + ms(i * 50)), 1);
        }
        assert_eq!(accel.step_multiplier(Direction::Increase, t0 + ms(29 * 50)), 4);
        assert_eq!(accel.step_multiplier(Direction::Increase, t0 + ms(30 * 50)), 4);
    }

    #[test]
    fn reversal_resets_multiplier_and_history() {
        let t0 = Instant::now();
        let mut accel = engine();
        for i in 0..30 {
            accel.step_multiplier(Direction::Increase, t0 + ms(i * 20));
        }
        assert!(accel.is_rapid());

        assert_eq!(accel.step_multiplier(Direction::Decrease, t0 + ms(620)), 1);
        assert_eq!(accel.history_len(), 1);
        assert_eq!(accel.last_direction(), Some(Direction::Decrease));
    }

    #[test]
    fn long_gap_exits_rapid_mode() {
        let t0 = Instant::now();
        let mut accel = engine();
        for i in 0..30 {
            accel.step_multiplier(Direction::Increase, t0 + ms(i * 20));
        }
        assert!(accel.is_rapid());

        // 580ms after the last entry: still inside the decay timeout
        assert_eq!(accel.step_multiplier(Direction::Increase, t0 + ms(1160)), 4);
        // 601ms gap: decays
        assert_eq!(accel.step_multiplier(Direction::Increase, t0 + ms(1761)), 1);
        assert_eq!(accel.history_len(), 1);
        assert_eq!(accel.step_multiplier(Direction::Increase, t0 + ms(1781)), 1);
    }

    #[test]
    fn entries_outside_window_do_not_count() {
        let t0 = Instant::now();
        let mut accel = engine();
        // 29 entries spread so the oldest falls out before the 30th arrives
        for i in 0..29 {
            accel.step_multiplier(Direction::Increase, t0 + ms(i * 70));
        }
        assert_eq!(accel.step_multiplier(Direction::Increase, t0 + ms(2100)), 1);
        assert!(accel.history_len() < 30);
    }
}
