use std::path::PathBuf;
use std::time::Duration;

use color_eyre::eyre::{Result, WrapErr};
use serde::{Deserialize, Deserializer};
use tracing::info;

use crate::animation::easing::EasingCurve;
use crate::dial::color::{ColorMode, Rgb};
use crate::error::{DialError, DialResult};

// ─── Embedded Default ────────────────────────────────────────────────────
/// Baked into the binary at compile time. The dial can never fail to start
/// because of a missing config file: this is always available as the base layer.
const DEFAULT_CONFIG_TOML: &str = include_str!("../default_config.toml");

/// Longest animated trail, in ticks
pub const MAX_TRAIL_LENGTH: u8 = 7;
/// Above this the frame interval rounds down to zero
pub const MAX_FPS: u16 = 1000;

// ─── Override layer ─────────────────────────────────────────────────────
/// Values the host layers on top of the config file (command-line flags)
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Custom config file instead of the standard path
    pub config: Option<PathBuf>,
    pub log_level: Option<String>,
    pub fps: Option<u16>,
    pub no_preheat: bool,
    pub color_mode: Option<ColorMode>,
}

// ─── TOML Structs ───────────────────────────────────────────────────────

/// Root configuration: parsed from TOML, then overridden by CLI flags.
///
/// Handed to [`crate::DialController::new`] by value; nothing in the core
/// reads configuration from anywhere else.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub ticks: TickConfig,
    #[serde(default)]
    pub scaling: ScalingConfig,
    #[serde(default)]
    pub trail: TrailConfig,
    #[serde(default)]
    pub lifecycle: LifecycleConfig,
    #[serde(default)]
    pub flash: FlashConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub keys: KeysConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level
    pub log_level: String,

    /// Target FPS while an animation is in flight
    pub fps: u16,

    /// Housekeeping cadence (countdown, scaling auto-reset)
    pub housekeeping_ms: u64,
}

/// How many ticks the ring has in each display mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickPolicy {
    /// Same tick count for every mode
    Fixed,
    /// Separate counts for temperature, minutes and hours
    PerMode,
}

/// Tick semantics for durations of an hour or more under [`TickPolicy::PerMode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HoursGranularity {
    Hourly,
    QuarterHour,
}

/// How the live value is mapped to a tick index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MappingPolicy {
    /// Value fraction across its range, scaled to the ring
    Proportional,
    /// Minutes wrap around the ring every hour, like a clock face
    Looped,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TickConfig {
    pub policy: TickPolicy,
    pub fixed_count: u16,
    pub temperature: u16,
    pub minutes: u16,
    pub hours: u16,
    pub quarter_hours: u16,
    pub hours_granularity: HoursGranularity,
    pub mapping: MappingPolicy,
    /// Empty arc at the bottom of the dial, in degrees
    pub gap_degrees: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScalingConfig {
    pub enabled: bool,
    pub curve: EasingCurve,
    /// Neighbourhood radius in ticks
    pub radius: u16,
    /// Length multiplier of the current tick
    pub peak: f64,
    /// Share of the extra length neighbours receive (0..=1)
    pub falloff: f64,
    pub transition_ms: u64,
    pub auto_reset: bool,
    pub auto_reset_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrailConfig {
    pub mode: ColorMode,
    /// Width of the seamless band as a fraction of the ring
    pub band_fraction: f64,
    pub flip_ms: u64,
    /// Distance from either end of travel where flips are not animated
    pub edge_fraction: f64,
    pub max_length: u8,
    pub hold_ms: u64,
    pub catch_up_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LifecycleConfig {
    pub preheat: bool,
    pub preheat_secs: u64,
    pub starting_ms: u64,
    pub label_blink_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FlashConfig {
    pub count: u8,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub rapid_threshold: usize,
    pub window_ms: u64,
    pub decay_ms: u64,
    /// Host-side rate limit for rotate keys (0 = off)
    pub min_interval_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    #[serde(deserialize_with = "deserialize_color")]
    pub base: Rgb,
    #[serde(deserialize_with = "deserialize_color")]
    pub accent: Rgb,
    #[serde(deserialize_with = "deserialize_color")]
    pub highlight: Rgb,
    #[serde(deserialize_with = "deserialize_color")]
    pub text: Rgb,
    #[serde(deserialize_with = "deserialize_color")]
    pub dim: Rgb,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeysConfig {
    pub rotate_left: String,
    pub rotate_right: String,
    pub press: String,
    pub aux: String,
    pub reset: String,
    pub quit: String,
}

// ─── Defaults ───────────────────────────────────────────────────────────

impl Default for Config {
    fn default() -> Self {
        // Parse the embedded TOML; this cannot fail since we control it
        toml::from_str(DEFAULT_CONFIG_TOML)
            .expect("BUG: embedded default_config.toml is invalid TOML")
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".into(),
            fps: 60,
            housekeeping_ms: 100,
        }
    }
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            policy: TickPolicy::PerMode,
            fixed_count: 72,
            temperature: 73,
            minutes: 59,
            hours: 72,
            quarter_hours: 285,
            hours_granularity: HoursGranularity::QuarterHour,
            mapping: MappingPolicy::Proportional,
            gap_degrees: 0.0,
        }
    }
}

impl Default for ScalingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            curve: EasingCurve::EaseOut,
            radius: 3,
            peak: 2.0,
            falloff: 0.6,
            transition_ms: 300,
            auto_reset: true,
            auto_reset_ms: 450,
        }
    }
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            mode: ColorMode::Seamless,
            band_fraction: 0.2,
            flip_ms: 200,
            edge_fraction: 0.2,
            max_length: 7,
            hold_ms: 100,
            catch_up_ms: 350,
        }
    }
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            preheat: true,
            preheat_secs: 10,
            starting_ms: 800,
            label_blink_ms: 600,
        }
    }
}

impl Default for FlashConfig {
    fn default() -> Self {
        Self {
            count: 3,
            duration_ms: 150,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            rapid_threshold: 30,
            window_ms: 2000,
            decay_ms: 600,
            min_interval_ms: 0,
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            base: Rgb::new(0x3a, 0x3a, 0x3a),
            accent: Rgb::new(0xff, 0x7a, 0x1a),
            highlight: Rgb::new(0xff, 0xd1, 0xa3),
            text: Rgb::new(0xf0, 0xf0, 0xf0),
            dim: Rgb::new(0x80, 0x80, 0x80),
        }
    }
}

impl Default for KeysConfig {
    fn default() -> Self {
        Self {
            rotate_left: "left".into(),
            rotate_right: "right".into(),
            press: "enter".into(),
            aux: "s".into(),
            reset: "r".into(),
            quit: "q".into(),
        }
    }
}

// ─── Color Deserializer ─────────────────────────────────────────────────

fn deserialize_color<'de, D>(deserializer: D) -> std::result::Result<Rgb, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_color(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid color: \"{s}\"")))
}

/// Parse a color string into an [`Rgb`].
/// Supports a few named colors and "#RRGGBB" hex.
pub fn parse_color(s: &str) -> Option<Rgb> {
    let s = s.trim().to_lowercase();
    match s.as_str() {
        "black" => Some(Rgb::new(0, 0, 0)),
        "white" => Some(Rgb::new(0xff, 0xff, 0xff)),
        "gray" | "grey" => Some(Rgb::new(0x80, 0x80, 0x80)),
        "darkgray" | "darkgrey" | "dark_gray" | "dark_grey" => Some(Rgb::new(0x3a, 0x3a, 0x3a)),
        "orange" => Some(Rgb::new(0xff, 0x7a, 0x1a)),
        "red" => Some(Rgb::new(0xff, 0, 0)),
        hex if hex.starts_with('#') && hex.len() == 7 => {
            let r = u8::from_str_radix(&hex[1..3], 16).ok()?;
            let g = u8::from_str_radix(&hex[3..5], 16).ok()?;
            let b = u8::from_str_radix(&hex[5..7], 16).ok()?;
            Some(Rgb::new(r, g, b))
        }
        _ => None,
    }
}

// ─── Accessors & Validation ─────────────────────────────────────────────

impl Config {
    /// Standard config file path: ~/.config/jogdial/config.toml
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("jogdial")
            .join("config.toml")
    }

    /// Parse a TOML document and validate it
    pub fn from_toml_str(s: &str) -> DialResult<Self> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Interval between animation frames, from FPS
    pub fn frame_interval(&self) -> Duration {
        let fps = self.general.fps.max(1);
        Duration::from_millis(1000 / fps as u64)
    }

    pub fn housekeeping_interval(&self) -> Duration {
        Duration::from_millis(self.general.housekeeping_ms)
    }

    /// Reject values the dial cannot operate with. Never falls back to defaults.
    pub fn validate(&self) -> DialResult<()> {
        let g = &self.general;
        if !(1..=MAX_FPS).contains(&g.fps) {
            return Err(DialError::config(
                "general.fps",
                format!("must be in [1, {MAX_FPS}], got {}", g.fps),
            ));
        }

        let t = &self.ticks;
        for (field, count) in [
            ("ticks.fixed_count", t.fixed_count),
            ("ticks.temperature", t.temperature),
            ("ticks.minutes", t.minutes),
            ("ticks.hours", t.hours),
            ("ticks.quarter_hours", t.quarter_hours),
        ] {
            if count < 2 {
                return Err(DialError::config(
                    field,
                    format!("tick count must be at least 2, got {count}"),
                ));
            }
        }
        if !(0.0..180.0).contains(&t.gap_degrees) {
            return Err(DialError::config(
                "ticks.gap_degrees",
                format!("must be in [0, 180), got {}", t.gap_degrees),
            ));
        }

        let s = &self.scaling;
        if !s.peak.is_finite() || s.peak < 1.0 {
            return Err(DialError::config(
                "scaling.peak",
                format!("must be a finite value >= 1.0, got {}", s.peak),
            ));
        }
        if !(0.0..=1.0).contains(&s.falloff) {
            return Err(DialError::config(
                "scaling.falloff",
                format!("must be in [0, 1], got {}", s.falloff),
            ));
        }
        if s.transition_ms == 0 {
            return Err(DialError::config("scaling.transition_ms", "must be non-zero"));
        }

        let tr = &self.trail;
        if !(tr.band_fraction > 0.0 && tr.band_fraction <= 1.0) {
            return Err(DialError::config(
                "trail.band_fraction",
                format!("must be in (0, 1], got {}", tr.band_fraction),
            ));
        }
        if !(0.0..0.5).contains(&tr.edge_fraction) {
            return Err(DialError::config(
                "trail.edge_fraction",
                format!("must be in [0, 0.5), got {}", tr.edge_fraction),
            ));
        }
        if !(1..=MAX_TRAIL_LENGTH).contains(&tr.max_length) {
            return Err(DialError::config(
                "trail.max_length",
                format!("must be in [1, {MAX_TRAIL_LENGTH}], got {}", tr.max_length),
            ));
        }
        if tr.flip_ms == 0 || tr.catch_up_ms == 0 {
            return Err(DialError::config(
                "trail.flip_ms",
                "flip and catch-up durations must be non-zero",
            ));
        }

        let l = &self.lifecycle;
        if l.preheat_secs == 0 {
            return Err(DialError::config("lifecycle.preheat_secs", "must be non-zero"));
        }
        if l.starting_ms == 0 {
            return Err(DialError::config("lifecycle.starting_ms", "must be non-zero"));
        }
        if l.label_blink_ms == 0 {
            return Err(DialError::config("lifecycle.label_blink_ms", "must be non-zero"));
        }

        if self.flash.count == 0 || self.flash.duration_ms == 0 {
            return Err(DialError::config(
                "flash",
                "count and duration_ms must both be non-zero",
            ));
        }

        let i = &self.input;
        if i.rapid_threshold < 2 {
            return Err(DialError::config(
                "input.rapid_threshold",
                format!("must be at least 2, got {}", i.rapid_threshold),
            ));
        }
        if i.window_ms == 0 || i.decay_ms == 0 {
            return Err(DialError::config(
                "input.window_ms",
                "window and decay durations must be non-zero",
            ));
        }

        if self.general.housekeeping_ms == 0 {
            return Err(DialError::config("general.housekeeping_ms", "must be non-zero"));
        }

        Ok(())
    }
}

// ─── Bootloader ─────────────────────────────────────────────────────────

/// The single entry point for configuration. Called exactly once at startup.
///
/// 1. Resolve config file path (CLI override or default)
/// 2. If config file doesn't exist, create directory tree + write defaults
/// 3. Parse TOML from disk into Config
/// 4. Apply CLI overrides on top, then validate
pub fn load(cli: &Overrides) -> Result<Config> {
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);

    // Bootstrap: ensure the file exists on disk
    if !config_path.exists() {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).wrap_err_with(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }
        std::fs::write(&config_path, DEFAULT_CONFIG_TOML).wrap_err_with(|| {
            format!(
                "Failed to write default config to {}",
                config_path.display()
            )
        })?;
        info!("Created default config at {}", config_path.display());
    }

    let toml_str = std::fs::read_to_string(&config_path)
        .wrap_err_with(|| format!("Failed to read config from {}", config_path.display()))?;

    let mut config: Config = toml::from_str(&toml_str).wrap_err_with(|| {
        format!(
            "Failed to parse config at {}.\n\
             Delete the file to regenerate defaults, or run:\n  \
             jogdial --print-default-config > {:?}",
            config_path.display(),
            config_path
        )
    })?;

    // ── CLI overrides ───────────────────────────────────────────────
    if let Some(ref level) = cli.log_level {
        config.general.log_level = level.clone();
    }
    if let Some(fps) = cli.fps {
        config.general.fps = fps;
    }
    if cli.no_preheat {
        config.lifecycle.preheat = false;
    }
    if let Some(mode) = cli.color_mode {
        config.trail.mode = mode;
    }

    config
        .validate()
        .wrap_err_with(|| format!("Rejected config at {}", config_path.display()))?;

    Ok(config)
}

/// Returns the embedded default config TOML string.
pub fn default_config_toml() -> &'static str {
    DEFAULT_CONFIG_TOML
}
