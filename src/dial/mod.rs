//! The jog dial core: value stepping, input acceleration, the cook-cycle
//! lifecycle, tick layout and tick colouring, owned by [`DialController`].

pub mod accel;
pub mod color;
pub mod controller;
pub mod frame;
pub mod layout;
pub mod lifecycle;
pub mod value;

use std::fmt;

use serde::Serialize;

pub use controller::{DialController, DialState, InputOutcome};
pub use frame::{RenderFrame, TickView};

/// Logical input actions accepted by the dial
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    RotateDecrease,
    RotateIncrease,
    Press,
    Aux,
}

impl Action {
    /// Rotation direction, `None` for buttons
    pub fn direction(self) -> Option<Direction> {
        match self {
            Action::RotateDecrease => Some(Direction::Decrease),
            Action::RotateIncrease => Some(Direction::Increase),
            Action::Press | Action::Aux => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Decrease,
    Increase,
}

impl Direction {
    pub fn sign(self) -> i32 {
        match self {
            Direction::Decrease => -1,
            Direction::Increase => 1,
        }
    }
}

/// Which quantity the dial edits during setup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Temperature,
    Time,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Mode::Temperature => Mode::Time,
            Mode::Time => Mode::Temperature,
        }
    }
}

/// Sub-range of the time setting, split at one hour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TimePhase {
    /// Below 60 minutes, 1 minute steps
    Minutes,
    /// 60 minutes and above, 15 minute steps
    Hours,
}

impl TimePhase {
    pub fn of_minutes(total_minutes: u32) -> Self {
        if total_minutes < 60 {
            TimePhase::Minutes
        } else {
            TimePhase::Hours
        }
    }
}

/// Top-level phase of one cook cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifecycle {
    #[default]
    Setup,
    Starting,
    Preheat,
    Cooking,
    Complete,
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Lifecycle::Setup => "setup",
            Lifecycle::Starting => "starting",
            Lifecycle::Preheat => "preheat",
            Lifecycle::Cooking => "cooking",
            Lifecycle::Complete => "complete",
        };
        f.write_str(s)
    }
}

/// Choices offered once cooking is complete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionOption {
    #[default]
    ExtendCooking,
    KeepWarm,
}

impl CompletionOption {
    pub const ALL: [CompletionOption; 2] =
        [CompletionOption::ExtendCooking, CompletionOption::KeepWarm];

    pub fn label(self) -> &'static str {
        match self {
            CompletionOption::ExtendCooking => "Extend cooking",
            CompletionOption::KeepWarm => "Keep warm",
        }
    }

    /// Step through the list in `direction`, wrapping at both ends
    pub fn cycle(self, direction: Direction) -> Self {
        let len = Self::ALL.len() as i32;
        let idx = Self::ALL.iter().position(|o| *o == self).unwrap_or(0) as i32;
        let next = (idx + direction.sign()).rem_euclid(len);
        Self::ALL[next as usize]
    }
}
