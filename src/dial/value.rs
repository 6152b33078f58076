//! Bounded temperature and duration values, their stepping rules, and the
//! strings shown in the centre of the dial.

use serde::Serialize;

use super::{Direction, TimePhase};

pub const TEMPERATURE_MIN: u32 = 300;
pub const TEMPERATURE_MAX: u32 = 480;
pub const TEMPERATURE_STEP: u32 = 5;
pub const TEMPERATURE_DEFAULT: u32 = 400;

pub const MINUTES_MIN: u32 = 1;
/// 72 hours
pub const MINUTES_MAX: u32 = 72 * 60;
pub const MINUTES_DEFAULT: u32 = 10;
/// First value of the hours phase
pub const HOUR_BOUNDARY: u32 = 60;
pub const MINUTES_STEP_FINE: u32 = 1;
pub const MINUTES_STEP_COARSE: u32 = 15;

/// Result of trying to move a value one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Changed { from: u32, to: u32 },
    /// The value already sits on the bound it was pushed against
    Boundary,
}

/// The two quantities the dial can edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DialValue {
    pub temperature: u32,
    pub total_minutes: u32,
}

impl Default for DialValue {
    fn default() -> Self {
        Self {
            temperature: TEMPERATURE_DEFAULT,
            total_minutes: MINUTES_DEFAULT,
        }
    }
}

impl DialValue {
    pub fn time_phase(&self) -> TimePhase {
        TimePhase::of_minutes(self.total_minutes)
    }

    /// Move the temperature by `5 × multiplier`, clamped to its range
    pub fn step_temperature(&mut self, direction: Direction, multiplier: u32) -> Step {
        let from = self.temperature;
        let delta = TEMPERATURE_STEP * multiplier.max(1);
        let to = match direction {
            Direction::Increase if from >= TEMPERATURE_MAX => return Step::Boundary,
            Direction::Decrease if from <= TEMPERATURE_MIN => return Step::Boundary,
            Direction::Increase => (from + delta).min(TEMPERATURE_MAX),
            Direction::Decrease => from.saturating_sub(delta).max(TEMPERATURE_MIN),
        };
        self.temperature = to;
        Step::Changed { from, to }
    }

    /// Move the duration one step of the minutes table.
    ///
    /// Below an hour steps are 1 minute, from an hour up they are 15 minutes,
    /// both scaled by `multiplier`. Increments from below an hour stop at 60;
    /// decrements that leave the hours phase land on 59.
    pub fn step_minutes(&mut self, direction: Direction, multiplier: u32) -> Step {
        let from = self.total_minutes;
        let m = multiplier.max(1);
        let to = match direction {
            Direction::Increase if from >= MINUTES_MAX => return Step::Boundary,
            Direction::Decrease if from <= MINUTES_MIN => return Step::Boundary,
            Direction::Increase if from < HOUR_BOUNDARY => {
                (from + MINUTES_STEP_FINE * m).min(HOUR_BOUNDARY)
            }
            Direction::Increase => (from + MINUTES_STEP_COARSE * m).min(MINUTES_MAX),
            Direction::Decrease if from < HOUR_BOUNDARY => {
                from.saturating_sub(MINUTES_STEP_FINE * m).max(MINUTES_MIN)
            }
            Direction::Decrease => {
                let next = from.saturating_sub(MINUTES_STEP_COARSE * m);
                if next < HOUR_BOUNDARY {
                    HOUR_BOUNDARY - 1
                } else {
                    next
                }
            }
        };
        self.total_minutes = to;
        Step::Changed { from, to }
    }
}

/// Setup display for a duration: `M:00` below an hour, `H:MM` from an hour up
pub fn format_setup_time(total_minutes: u32) -> String {
    if total_minutes < HOUR_BOUNDARY {
        format!("{}:00", total_minutes)
    } else {
        format!("{}:{:02}", total_minutes / 60, total_minutes % 60)
    }
}

/// Countdown display: `MM:SS` below an hour remaining, `H:MM` from an hour up
pub fn format_countdown(remaining_secs: u64) -> String {
    if remaining_secs < 3600 {
        format!("{:02}:{:02}", remaining_secs / 60, remaining_secs % 60)
    } else {
        let minutes = remaining_secs / 60;
        format!("{}:{:02}", minutes / 60, minutes % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn value(temperature: u32, total_minutes: u32) -> DialValue {
        DialValue {
            temperature,
            total_minutes,
        }
    }

    #[test]
    fn temperature_at_max_reports_boundary() {
        let mut v = value(480, 10);
        assert_eq!(v.step_temperature(Direction::Increase, 1), Step::Boundary);
        assert_eq!(v.temperature, 480);
    }

    #[test]
    fn temperature_rapid_step_clamps() {
        let mut v = value(470, 10);
        assert_eq!(
            v.step_temperature(Direction::Increase, 4),
            Step::Changed { from: 470, to: 480 }
        );
        let mut v = value(310, 10);
        v.step_temperature(Direction::Decrease, 4);
        assert_eq!(v.temperature, 300);
    }

    #[test]
    fn sixty_minus_one_lands_on_fifty_nine() {
        let mut v = value(400, 60);
        assert_eq!(
            v.step_minutes(Direction::Decrease, 1),
            Step::Changed { from: 60, to: 59 }
        );
    }

    #[test]
    fn seventy_five_minus_one_lands_on_sixty() {
        let mut v = value(400, 75);
        v.step_minutes(Direction::Decrease, 1);
        assert_eq!(v.total_minutes, 60);
    }

    #[test]
    fn rapid_decrement_through_the_hour_snaps_to_fifty_nine() {
        let mut v = value(400, 90);
        v.step_minutes(Direction::Decrease, 4);
        assert_eq!(v.total_minutes, 59);
    }

    #[test]
    fn increments_from_below_the_hour_stop_at_sixty() {
        let mut v = value(400, 59);
        v.step_minutes(Direction::Increase, 1);
        assert_eq!(v.total_minutes, 60);

        let mut v = value(400, 58);
        v.step_minutes(Direction::Increase, 4);
        assert_eq!(v.total_minutes, 60);

        v.step_minutes(Direction::Increase, 1);
        assert_eq!(v.total_minutes, 75);
    }

    #[test]
    fn minutes_bounds_report_boundary() {
        let mut v = value(400, 1);
        assert_eq!(v.step_minutes(Direction::Decrease, 1), Step::Boundary);
        let mut v = value(400, MINUTES_MAX);
        assert_eq!(v.step_minutes(Direction::Increase, 4), Step::Boundary);
    }

    #[test]
    fn setup_time_formatting() {
        assert_eq!(format_setup_time(1), "1:00");
        assert_eq!(format_setup_time(59), "59:00");
        assert_eq!(format_setup_time(60), "1:00");
        assert_eq!(format_setup_time(135), "2:15");
        assert_eq!(format_setup_time(4320), "72:00");
    }

    #[test]
    fn countdown_formatting() {
        assert_eq!(format_countdown(60), "01:00");
        assert_eq!(format_countdown(59), "00:59");
        assert_eq!(format_countdown(3599), "59:59");
        assert_eq!(format_countdown(3600), "1:00");
        assert_eq!(format_countdown(3 * 3600 + 45 * 60 + 30), "3:45");
    }

    fn direction() -> impl Strategy<Value = Direction> {
        prop_oneof![Just(Direction::Increase), Just(Direction::Decrease)]
    }

    proptest! {
        #[test]
        fn temperature_stays_on_grid(
            steps in prop::collection::vec((direction(), prop_oneof![Just(1u32), Just(4u32)]), 0..200)
        ) {
            let mut v = DialValue::default();
            for (dir, mult) in steps {
                v.step_temperature(dir, mult);
                prop_assert!((TEMPERATURE_MIN..=TEMPERATURE_MAX).contains(&v.temperature));
                prop_assert_eq!((v.temperature - TEMPERATURE_MIN) % TEMPERATURE_STEP, 0);
            }
        }

        #[test]
        fn minutes_stay_in_range(
            steps in prop::collection::vec((direction(), prop_oneof![Just(1u32), Just(4u32)]), 0..400)
        ) {
            let mut v = DialValue::default();
            for (dir, mult) in steps {
                let before = v.total_minutes;
                v.step_minutes(dir, mult);
                prop_assert!((MINUTES_MIN..=MINUTES_MAX).contains(&v.total_minutes));
                if before >= HOUR_BOUNDARY && v.total_minutes < HOUR_BOUNDARY {
                    prop_assert_eq!(v.total_minutes, HOUR_BOUNDARY - 1);
                }
                if v.total_minutes >= HOUR_BOUNDARY {
                    prop_assert_eq!((v.total_minutes - HOUR_BOUNDARY) % MINUTES_STEP_COARSE, 0);
                }
            }
        }
    }
}
