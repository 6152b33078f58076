//! Per-tick colouring.
//!
//! Every strategy is a pure function of the tick index, the frame's
//! [`Layout`] and a [`TrailView`] snapshot of the trail animation. The current
//! tick is always drawn in the accent colour; an empty ring has no current tick.

use std::str::FromStr;
use std::time::Instant;

use serde::{Deserialize, Serialize, Serializer};

use super::layout::{tick_angle, Layout};
use super::Direction;
use crate::animation::easing::{ease_in_out_cubic, ease_out_quad};
use crate::animation::Tween;
use crate::config::{ThemeConfig, TrailConfig};

/// 24-bit colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channel-wise interpolation, `t` clamped to [0, 1]
    pub fn lerp(self, to: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
        Rgb::new(mix(self.r, to.r), mix(self.g, to.g), mix(self.b, to.b))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Tick colouring strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    /// Accent for filled ticks, base for the rest
    Flat,
    /// Gradient from the top of the dial up to the current tick
    Conic,
    /// Fixed-width gradient band trailing the current tick
    #[default]
    Seamless,
    /// Decaying trail that grows with each step and shrinks when input stops
    Animated,
}

impl FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flat" => Ok(ColorMode::Flat),
            "conic" => Ok(ColorMode::Conic),
            "seamless" => Ok(ColorMode::Seamless),
            "animated" => Ok(ColorMode::Animated),
            other => Err(format!(
                "unknown color mode \"{other}\" (expected flat, conic, seamless or animated)"
            )),
        }
    }
}

/// Which side of the current tick the seamless band sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrailDirection {
    /// Band before the current tick (value moving up)
    #[default]
    Normal,
    /// Band after the current tick (value moving down)
    Opposite,
}

impl TrailDirection {
    pub fn from_movement(direction: Direction) -> Self {
        match direction {
            Direction::Increase => TrailDirection::Normal,
            Direction::Decrease => TrailDirection::Opposite,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub base: Rgb,
    pub accent: Rgb,
    pub highlight: Rgb,
}

impl From<&ThemeConfig> for Palette {
    fn from(theme: &ThemeConfig) -> Self {
        Self {
            base: theme.base,
            accent: theme.accent,
            highlight: theme.highlight,
        }
    }
}

/// Trail bookkeeping owned by the controller.
///
/// Timers live in the controller's animation registry; the caller hands in
/// the relevant [`Tween`]s when taking a [`TrailView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrailState {
    pub direction: TrailDirection,
    pub previous_direction: TrailDirection,
    pub movement: Option<Direction>,
    /// Steps accumulated by the animated trail, capped at the configured maximum
    pub length: u8,
}

/// Outcome of recording one step on the trail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrailStep {
    /// Band direction changed on this step
    pub flipped: bool,
    /// The change should cross-fade rather than apply instantly
    pub animate_flip: bool,
}

impl TrailState {
    /// Record one discrete step. `value_fraction` is where the value now sits
    /// in its travel range; flips near either end are applied without animation.
    pub fn record_step(
        &mut self,
        direction: Direction,
        value_fraction: f64,
        config: &TrailConfig,
    ) -> TrailStep {
        let next = TrailDirection::from_movement(direction);
        let flipped = next != self.direction;
        if flipped {
            self.previous_direction = self.direction;
            self.direction = next;
        }
        let near_edge = value_fraction <= config.edge_fraction
            || value_fraction >= 1.0 - config.edge_fraction;

        if self.movement != Some(direction) {
            self.length = 0;
        }
        self.movement = Some(direction);
        self.length = self.length.saturating_add(1).min(config.max_length);

        TrailStep {
            flipped,
            animate_flip: flipped && !near_edge,
        }
    }

    /// Trail fully caught up with the current tick
    pub fn settle(&mut self) {
        self.length = 0;
    }

    /// Freeze the trail for one frame
    pub fn view(
        &self,
        now: Instant,
        flip: Option<&Tween>,
        catch_up: Option<&Tween>,
        config: &TrailConfig,
    ) -> TrailView {
        let hold = std::time::Duration::from_millis(config.hold_ms);
        let effective_length = match catch_up {
            Some(tween) => {
                let since = now.saturating_duration_since(tween.started_at);
                if since < hold {
                    f64::from(self.length)
                } else {
                    let p = (since - hold).as_secs_f64()
                        / (config.catch_up_ms as f64 / 1000.0);
                    f64::from(self.length) * (1.0 - ease_out_quad(p))
                }
            }
            None => 0.0,
        };
        TrailView {
            direction: self.direction,
            previous_direction: self.previous_direction,
            flip_progress: flip.map(|t| t.progress(now)),
            movement: self.movement,
            effective_length,
        }
    }
}

/// Snapshot of the trail used to colour one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailView {
    pub direction: TrailDirection,
    pub previous_direction: TrailDirection,
    /// Linear progress of a running cross-fade
    pub flip_progress: Option<f64>,
    pub movement: Option<Direction>,
    /// Visible animated trail length in ticks (fractional while shrinking)
    pub effective_length: f64,
}

impl Default for TrailView {
    fn default() -> Self {
        Self {
            direction: TrailDirection::Normal,
            previous_direction: TrailDirection::Normal,
            flip_progress: None,
            movement: None,
            effective_length: 0.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ColorEngine {
    mode: ColorMode,
    palette: Palette,
    band_fraction: f64,
    gap_degrees: f64,
}

impl ColorEngine {
    pub fn new(mode: ColorMode, palette: Palette, band_fraction: f64, gap_degrees: f64) -> Self {
        Self {
            mode,
            palette,
            band_fraction,
            gap_degrees,
        }
    }

    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    /// Colour of tick `index` for this frame
    pub fn color_for(&self, index: usize, layout: &Layout, trail: &TrailView) -> Rgb {
        if layout.filled_count > 0 && index == layout.current_index {
            return self.palette.accent;
        }
        match self.mode {
            ColorMode::Flat => self.flat(index, layout),
            ColorMode::Conic => self.conic(index, layout),
            ColorMode::Seamless => self.seamless(index, layout, trail),
            ColorMode::Animated => self.animated(index, layout, trail),
        }
    }

    fn flat(&self, index: usize, layout: &Layout) -> Rgb {
        if index < layout.filled_count {
            self.palette.accent
        } else {
            self.palette.base
        }
    }

    fn conic(&self, index: usize, layout: &Layout) -> Rgb {
        if index > layout.current_index {
            return self.palette.base;
        }
        let total = layout.total_ticks;
        let end = tick_angle(layout.current_index, total, self.gap_degrees);
        let t = if end <= 0.0 {
            1.0
        } else {
            tick_angle(index, total, self.gap_degrees) / end
        };
        self.palette.base.lerp(self.palette.highlight, t)
    }

    /// Ticks in the band before the current tick (or after it, for
    /// [`TrailDirection::Opposite`]). `t` is 1.0 next to the current tick and
    /// falls linearly to the far end of the band.
    fn band(&self, index: usize, layout: &Layout, direction: TrailDirection) -> Rgb {
        let width = ((self.band_fraction * layout.total_ticks as f64).round() as usize).max(1);
        let current = layout.current_index;
        let distance = match direction {
            TrailDirection::Normal if index < current => current - index,
            TrailDirection::Opposite if index > current => index - current,
            _ => return self.palette.base,
        };
        if distance > width {
            return self.palette.base;
        }
        let t = 1.0 - (distance - 1) as f64 / width as f64;
        self.palette.base.lerp(self.palette.highlight, t)
    }

    fn seamless(&self, index: usize, layout: &Layout, trail: &TrailView) -> Rgb {
        let target = self.band(index, layout, trail.direction);
        match trail.flip_progress {
            Some(p) if p < 1.0 => {
                let from = self.band(index, layout, trail.previous_direction);
                from.lerp(target, ease_in_out_cubic(p))
            }
            _ => target,
        }
    }

    fn animated(&self, index: usize, layout: &Layout, trail: &TrailView) -> Rgb {
        let length = trail.effective_length;
        let movement = match trail.movement {
            Some(m) if length > 0.0 => m,
            _ => return self.palette.base,
        };
        let current = layout.current_index;
        // The trail sits behind the movement
        let distance = match movement {
            Direction::Increase if index < current => current - index,
            Direction::Decrease if index > current => index - current,
            _ => return self.palette.base,
        };
        if distance as f64 > length.ceil() {
            return self.palette.base;
        }
        let t = (1.0 - distance as f64 / (length + 1.0)).max(0.0);
        self.palette.base.lerp(self.palette.highlight, t)
    }
}
