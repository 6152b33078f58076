//! [`DialController`]: the single owner of a dial's state.
//!
//! Input flows `handle` → acceleration → bounded value step → lifecycle.
//! Time flows through `tick`, which the host calls from its housekeeping
//! timer. `frame` is read-only and can be called at any rate.

use std::time::{Duration, Instant};

use tracing::{debug, info, trace};

use super::accel::AccelerationEngine;
use super::color::{ColorEngine, Palette, TrailState, TrailView};
use super::frame::{status_text, OptionView, RenderFrame, TickView};
use super::layout::{Layout, RingFill, ScalingState, TickLayoutEngine};
use super::lifecycle::{Countdown, CountdownView, PhaseMachine};
use super::value::{format_countdown, format_setup_time, DialValue, Step};
use super::{Action, CompletionOption, Direction, Lifecycle, Mode, TimePhase};
use crate::animation::blink::{lit_at, Flash};
use crate::animation::{AnimationId, Animations};
use crate::config::Config;
use crate::error::DialResult;

/// What a single input did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// The edited value moved
    Changed { from: u32, to: u32 },
    /// The value sits on a bound; the flash feedback started instead
    BoundaryReached,
    ModeToggled(Mode),
    /// The cook cycle began
    Started,
    OptionSelected(CompletionOption),
    /// Not meaningful in the current phase
    Ignored,
}

/// The mutable aggregate behind one dial
#[derive(Debug, Clone)]
pub struct DialState {
    pub value: DialValue,
    pub mode: Mode,
    pub selected_option: CompletionOption,
    pub phases: PhaseMachine,
    pub acceleration: AccelerationEngine,
    pub trail: TrailState,
    pub scaling: ScalingState,
}

impl DialState {
    fn new(config: &Config) -> Self {
        Self {
            value: DialValue::default(),
            mode: Mode::Temperature,
            selected_option: CompletionOption::default(),
            phases: PhaseMachine::new(&config.lifecycle),
            acceleration: AccelerationEngine::new(&config.input),
            trail: TrailState::default(),
            scaling: ScalingState::default(),
        }
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.phases.lifecycle()
    }

    pub fn countdown(&self) -> Option<&Countdown> {
        self.phases.countdown()
    }

    pub fn time_phase(&self) -> TimePhase {
        self.value.time_phase()
    }
}

pub struct DialController {
    config: Config,
    state: DialState,
    animations: Animations,
    layout: TickLayoutEngine,
    colors: ColorEngine,
}

impl DialController {
    /// Build a dial from a validated configuration. Invalid values are rejected,
    /// never replaced with defaults.
    pub fn new(config: Config) -> DialResult<Self> {
        config.validate()?;
        let layout = TickLayoutEngine::new(&config.ticks, &config.scaling);
        let colors = ColorEngine::new(
            config.trail.mode,
            Palette::from(&config.theme),
            config.trail.band_fraction,
            config.ticks.gap_degrees,
        );
        let state = DialState::new(&config);
        info!(color_mode = ?config.trail.mode, preheat = config.lifecycle.preheat, "dial created");
        Ok(Self {
            config,
            state,
            animations: Animations::new(),
            layout,
            colors,
        })
    }

    pub fn state(&self) -> &DialState {
        &self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// True while any frame-driven animation is in flight
    pub fn has_active_animation(&self) -> bool {
        self.animations.has_active_animation()
    }

    /// Apply one logical input observed at `now`
    pub fn handle(&mut self, action: Action, now: Instant) -> InputOutcome {
        let outcome = match (self.state.lifecycle(), action) {
            (Lifecycle::Setup, Action::RotateDecrease | Action::RotateIncrease) => {
                let direction = action.direction().unwrap_or(Direction::Increase);
                self.rotate(direction, now)
            }
            (Lifecycle::Setup, Action::Press) => {
                self.state.mode = self.state.mode.toggled();
                self.state.trail.settle();
                self.animations.stop(AnimationId::TrailFlip);
                self.animations.stop(AnimationId::TrailCatchUp);
                debug!(mode = ?self.state.mode, "mode toggled");
                InputOutcome::ModeToggled(self.state.mode)
            }
            (Lifecycle::Setup, Action::Aux) => {
                if self.state.phases.start(now) {
                    self.animations.start(
                        AnimationId::RingFill,
                        now,
                        self.state.phases.starting_duration(),
                    );
                    InputOutcome::Started
                } else {
                    InputOutcome::Ignored
                }
            }
            (Lifecycle::Complete, Action::RotateDecrease | Action::RotateIncrease) => {
                let direction = action.direction().unwrap_or(Direction::Increase);
                self.state.selected_option = self.state.selected_option.cycle(direction);
                debug!(option = ?self.state.selected_option, "completion option selected");
                InputOutcome::OptionSelected(self.state.selected_option)
            }
            _ => InputOutcome::Ignored,
        };
        trace!(?action, ?outcome, lifecycle = %self.state.lifecycle(), "input");
        outcome
    }

    fn rotate(&mut self, direction: Direction, now: Instant) -> InputOutcome {
        let multiplier = self.state.acceleration.step_multiplier(direction, now);
        let step = match self.state.mode {
            Mode::Temperature => self.state.value.step_temperature(direction, multiplier),
            Mode::Time => self.state.value.step_minutes(direction, multiplier),
        };

        match step {
            Step::Boundary => {
                debug!(?direction, mode = ?self.state.mode, "boundary reached");
                let flash = &self.config.flash;
                let total = Flash::new(now, flash.count, Duration::from_millis(flash.duration_ms))
                    .total();
                self.animations.start(AnimationId::Flash, now, total);
                InputOutcome::BoundaryReached
            }
            Step::Changed { from, to } => {
                trace!(from, to, multiplier, "value stepped");
                let progress = self.animations.progress(AnimationId::Scaling, now);
                if self.state.scaling.activate(now, progress) {
                    self.animations.start(
                        AnimationId::Scaling,
                        now,
                        Duration::from_millis(self.config.scaling.transition_ms),
                    );
                }

                let total = self
                    .layout
                    .tick_count(self.state.mode, self.state.value.time_phase());
                let (_, fraction) = self.layout.position(self.state.mode, &self.state.value, total);
                let trail = &self.config.trail;
                let step = self.state.trail.record_step(direction, fraction, trail);
                if step.animate_flip {
                    self.animations.start(
                        AnimationId::TrailFlip,
                        now,
                        Duration::from_millis(trail.flip_ms),
                    );
                } else if step.flipped {
                    // Flip applied instantly near the range edges
                    self.animations.stop(AnimationId::TrailFlip);
                }
                self.animations.start(
                    AnimationId::TrailCatchUp,
                    now,
                    Duration::from_millis(trail.hold_ms + trail.catch_up_ms),
                );
                InputOutcome::Changed { from, to }
            }
        }
    }

    /// Housekeeping: advance animations, auto-reset tick scaling, and move the
    /// lifecycle forward by at most one phase. Returns the phase entered, if any.
    pub fn tick(&mut self, now: Instant) -> Option<Lifecycle> {
        for finished in self.animations.advance(now) {
            if finished == AnimationId::TrailCatchUp {
                self.state.trail.settle();
            }
        }

        if self.config.scaling.auto_reset {
            let delay = Duration::from_millis(self.config.scaling.auto_reset_ms);
            let progress = self.animations.progress(AnimationId::Scaling, now);
            if self.state.scaling.check_idle(now, delay, progress) {
                debug!("tick scaling auto-reset");
                self.animations.start(
                    AnimationId::Scaling,
                    now,
                    Duration::from_millis(self.config.scaling.transition_ms),
                );
            }
        }

        let entered = self
            .state
            .phases
            .advance(now, self.state.value.total_minutes);
        if entered == Some(Lifecycle::Complete) {
            self.state.value.total_minutes = 0;
            self.state.selected_option = CompletionOption::default();
        }
        entered
    }

    /// Restore every field to its defaults and return to Setup
    pub fn reset(&mut self) {
        self.state = DialState::new(&self.config);
        self.animations.clear();
        info!("dial reset");
    }

    /// Whether the boundary flash currently has the read-out dimmed
    pub fn is_flashing(&self, now: Instant) -> bool {
        self.flash_at(now).is_some_and(|f| f.is_dimmed(now))
    }

    fn flash_at(&self, now: Instant) -> Option<Flash> {
        let tween = self.animations.get(AnimationId::Flash)?;
        let flash = Flash::new(
            tween.started_at,
            self.config.flash.count,
            Duration::from_millis(self.config.flash.duration_ms),
        );
        flash.is_active(now).then_some(flash)
    }

    /// Tick layout for the state at `now`
    pub fn layout(&self, now: Instant) -> Layout {
        let phases = &self.state.phases;
        let (fill, intensity) = match self.state.lifecycle() {
            Lifecycle::Setup => {
                let progress = self.animations.progress(AnimationId::Scaling, now);
                (RingFill::Value, self.state.scaling.intensity(progress))
            }
            Lifecycle::Starting => (RingFill::Ramp(phases.starting_progress(now)), 0.0),
            Lifecycle::Preheat => (RingFill::Fraction(1.0), 0.0),
            Lifecycle::Cooking => (
                RingFill::Fraction(
                    phases
                        .countdown()
                        .map(|c| c.remaining_fraction(now))
                        .unwrap_or(0.0),
                ),
                0.0,
            ),
            Lifecycle::Complete => (RingFill::Fraction(0.0), 0.0),
        };
        self.layout.layout(
            self.state.lifecycle(),
            self.state.mode,
            &self.state.value,
            fill,
            intensity,
        )
    }

    /// Build the render output for `now`
    pub fn frame(&self, now: Instant) -> RenderFrame {
        let lifecycle = self.state.lifecycle();
        let layout = self.layout(now);

        let trail = if lifecycle == Lifecycle::Setup {
            self.state.trail.view(
                now,
                self.animations.get(AnimationId::TrailFlip),
                self.animations.get(AnimationId::TrailCatchUp),
                &self.config.trail,
            )
        } else {
            TrailView::default()
        };

        let ticks = (0..layout.total_ticks)
            .map(|i| TickView {
                index: i,
                angle: self.layout.angle(i, layout.total_ticks),
                filled: i < layout.filled_count,
                current: layout.filled_count > 0 && i == layout.current_index,
                length: layout.length_multipliers[i],
                color: self.colors.color_for(i, &layout, &trail),
            })
            .collect();

        let countdown = self.state.countdown();
        let primary = match lifecycle {
            Lifecycle::Setup => match self.state.mode {
                Mode::Temperature => self.state.value.temperature.to_string(),
                Mode::Time => format_setup_time(self.state.value.total_minutes),
            },
            Lifecycle::Starting => format_setup_time(self.state.value.total_minutes),
            Lifecycle::Preheat => {
                format_countdown(countdown.map(|c| c.duration_secs).unwrap_or_default())
            }
            Lifecycle::Cooking => {
                format_countdown(countdown.map(|c| c.remaining_secs(now)).unwrap_or_default())
            }
            Lifecycle::Complete => format_countdown(0),
        };

        let status_visible = match lifecycle {
            Lifecycle::Preheat => lit_at(
                self.state.phases.phase_elapsed(now),
                Duration::from_millis(self.config.lifecycle.label_blink_ms),
            ),
            _ => true,
        };

        let options = if lifecycle == Lifecycle::Complete {
            CompletionOption::ALL
                .iter()
                .map(|o| OptionView {
                    option: *o,
                    label: o.label(),
                    selected: *o == self.state.selected_option,
                })
                .collect()
        } else {
            Vec::new()
        };

        let flash = self.flash_at(now);
        RenderFrame {
            lifecycle,
            mode: self.state.mode,
            time_phase: self.state.time_phase(),
            primary,
            status: status_text(lifecycle, self.state.mode),
            status_visible,
            flash_dimmed: flash.is_some_and(|f| f.is_dimmed(now)),
            flash_active: flash.is_some(),
            rapid: self.state.acceleration.is_rapid(),
            total_ticks: layout.total_ticks,
            filled_count: layout.filled_count,
            current_index: layout.current_index,
            ticks,
            countdown: countdown.map(|c| CountdownView {
                duration_secs: c.duration_secs,
                remaining_secs: c.remaining_secs(now),
            }),
            options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dial::color::ColorMode;
    use crate::dial::value::{MINUTES_DEFAULT, TEMPERATURE_DEFAULT};
    use crate::error::DialError;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    fn controller() -> DialController {
        DialController::new(Config::default()).unwrap()
    }

    #[test]
    fn starts_with_defaults() {
        let dial = controller();
        let s = dial.state();
        assert_eq!(s.value.temperature, TEMPERATURE_DEFAULT);
        assert_eq!(s.value.total_minutes, MINUTES_DEFAULT);
        assert_eq!(s.mode, Mode::Temperature);
        assert_eq!(s.lifecycle(), Lifecycle::Setup);
        assert!(s.countdown().is_none());
    }

    #[test]
    fn invalid_config_rejects_construction() {
        let mut config = Config::default();
        config.ticks.temperature = 0;
        match DialController::new(config) {
            Err(DialError::Config { field, .. }) => assert_eq!(field, "ticks.temperature"),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("construction should fail"),
        }
    }

    #[test]
    fn rotate_at_max_flashes_without_mutation() {
        let t0 = Instant::now();
        let mut dial = controller();
        dial.state.value.temperature = 480;

        assert_eq!(
            dial.handle(Action::RotateIncrease, t0),
            InputOutcome::BoundaryReached
        );
        assert_eq!(dial.state().value.temperature, 480);
        assert!(dial.is_flashing(t0));

        let frame = dial.frame(t0);
        assert!(frame.flash_active);
        assert!(frame.flash_dimmed);
        assert!(!dial.frame(t0 + ms(150)).flash_dimmed);
        assert!(!dial.frame(t0 + ms(900)).flash_active);
    }

    #[test]
    fn decrement_from_sixty_lands_on_fifty_nine() {
        let t0 = Instant::now();
        let mut dial = controller();
        dial.handle(Action::Press, t0);
        dial.state.value.total_minutes = 60;

        assert_eq!(
            dial.handle(Action::RotateDecrease, t0 + ms(10)),
            InputOutcome::Changed { from: 60, to: 59 }
        );
        assert_eq!(dial.state().time_phase(), TimePhase::Minutes);
    }

    #[test]
    fn press_toggles_mode_and_rotation_follows_it() {
        let t0 = Instant::now();
        let mut dial = controller();
        assert_eq!(dial.handle(Action::Press, t0), InputOutcome::ModeToggled(Mode::Time));
        dial.handle(Action::RotateIncrease, t0 + ms(500));
        assert_eq!(dial.state().value.total_minutes, 11);
        assert_eq!(dial.state().value.temperature, 400);

        dial.handle(Action::Press, t0 + ms(1000));
        dial.handle(Action::RotateIncrease, t0 + ms(1500));
        assert_eq!(dial.state().value.temperature, 405);
    }

    #[test]
    fn rapid_burst_deltas_follow_acceleration() {
        let t0 = Instant::now();
        let mut dial = controller();
        dial.state.value.temperature = 300;

        let mut deltas = Vec::new();
        for i in 0..30 {
            match dial.handle(Action::RotateIncrease, t0 + ms(i * 60)) {
                InputOutcome::Changed { from, to } => deltas.push(to - from),
                other => panic!("unexpected outcome {other:?}"),
            }
        }
        // 29 calls at 1x, the 30th in the window at 4x
        assert!(deltas[..29].iter().all(|d| *d == 5));
        assert_eq!(deltas[29], 20);
        assert_eq!(deltas.iter().sum::<u32>(), 165);
        assert_eq!(dial.state().value.temperature, 465);
        assert!(dial.frame(t0 + ms(29 * 60)).rapid);

        // A reversal drops straight back to single steps
        assert_eq!(
            dial.handle(Action::RotateDecrease, t0 + ms(1800)),
            InputOutcome::Changed { from: 465, to: 460 }
        );
    }

    #[test]
    fn full_cook_cycle_with_preheat() {
        let t0 = Instant::now();
        let mut dial = controller();
        dial.state.value.total_minutes = 1;

        assert_eq!(dial.handle(Action::Aux, t0), InputOutcome::Started);
        assert_eq!(dial.state().lifecycle(), Lifecycle::Starting);
        assert!(dial.has_active_animation());

        assert_eq!(dial.tick(t0 + ms(400)), None);
        assert_eq!(dial.tick(t0 + ms(800)), Some(Lifecycle::Preheat));
        assert_eq!(dial.state().countdown().unwrap().duration_secs, 60);

        let preheat = t0 + ms(800);
        assert_eq!(dial.tick(preheat + secs(10)), Some(Lifecycle::Cooking));
        let cooking = preheat + secs(10);
        assert_eq!(dial.state().countdown().unwrap().started_at, cooking);
        assert_eq!(dial.frame(cooking).primary, "01:00");
        assert_eq!(dial.frame(cooking + secs(15)).primary, "00:45");

        assert_eq!(dial.tick(cooking + secs(30)), None);
        assert_eq!(dial.tick(cooking + secs(60)), Some(Lifecycle::Complete));
        assert_eq!(dial.state().value.total_minutes, 0);
        assert!(dial.state().countdown().is_none());
    }

    #[test]
    fn inputs_cannot_skip_or_cancel_the_cycle() {
        let t0 = Instant::now();
        let mut dial = controller();
        dial.handle(Action::Aux, t0);

        for action in [
            Action::Aux,
            Action::Press,
            Action::RotateIncrease,
            Action::RotateDecrease,
        ] {
            assert_eq!(dial.handle(action, t0 + ms(100)), InputOutcome::Ignored);
        }
        dial.tick(t0 + ms(800));
        assert_eq!(dial.state().lifecycle(), Lifecycle::Preheat);
        assert_eq!(dial.handle(Action::Aux, t0 + secs(2)), InputOutcome::Ignored);
        assert_eq!(dial.handle(Action::RotateDecrease, t0 + secs(2)), InputOutcome::Ignored);
        assert_eq!(dial.state().lifecycle(), Lifecycle::Preheat);
        assert_eq!(dial.state().value.total_minutes, 10);
    }

    #[test]
    fn without_preheat_cooking_follows_starting() {
        let t0 = Instant::now();
        let mut config = Config::default();
        config.lifecycle.preheat = false;
        let mut dial = DialController::new(config).unwrap();
        dial.handle(Action::Aux, t0);
        assert_eq!(dial.tick(t0 + ms(800)), Some(Lifecycle::Cooking));
    }

    #[test]
    fn complete_rotates_through_options_and_waits_for_reset() {
        let t0 = Instant::now();
        let mut dial = controller();
        dial.state.value.total_minutes = 1;
        dial.handle(Action::Aux, t0);
        dial.tick(t0 + ms(800));
        dial.tick(t0 + ms(800) + secs(10));
        let done = t0 + ms(800) + secs(70);
        assert_eq!(dial.tick(done), Some(Lifecycle::Complete));

        assert_eq!(
            dial.handle(Action::RotateIncrease, done),
            InputOutcome::OptionSelected(CompletionOption::KeepWarm)
        );
        assert_eq!(
            dial.handle(Action::RotateIncrease, done),
            InputOutcome::OptionSelected(CompletionOption::ExtendCooking)
        );
        assert_eq!(dial.handle(Action::Aux, done), InputOutcome::Ignored);
        assert_eq!(dial.tick(done + secs(600)), None);

        let frame = dial.frame(done);
        assert_eq!(frame.options.len(), 2);
        assert!(frame.options[0].selected);
        assert_eq!(frame.filled_count, 0);
        assert!(frame.ticks.iter().all(|t| !t.current));

        dial.reset();
        let s = dial.state();
        assert_eq!(s.lifecycle(), Lifecycle::Setup);
        assert_eq!(s.value.temperature, 400);
        assert_eq!(s.value.total_minutes, 10);
        assert_eq!(s.mode, Mode::Temperature);
        assert!(!dial.has_active_animation());
    }

    #[test]
    fn reset_from_setup_restores_defaults() {
        let t0 = Instant::now();
        let mut dial = controller();
        dial.handle(Action::Press, t0);
        dial.handle(Action::RotateIncrease, t0 + ms(10));
        dial.reset();
        assert_eq!(dial.state().mode, Mode::Temperature);
        assert_eq!(dial.state().value.total_minutes, 10);
        assert!(dial.state().acceleration.last_direction().is_none());
    }

    #[test]
    fn scaling_activates_on_adjust_and_auto_resets() {
        let t0 = Instant::now();
        let mut dial = controller();
        dial.handle(Action::RotateIncrease, t0);

        let current = dial.layout(t0).current_index;
        assert_eq!(dial.layout(t0).length_multipliers[current], 1.0);
        let settled = dial.layout(t0 + ms(300));
        assert_eq!(settled.length_multipliers[current], 2.0);

        dial.tick(t0 + ms(400));
        assert!(dial.state().scaling.is_active());
        dial.tick(t0 + ms(450));
        assert!(!dial.state().scaling.is_active());
        dial.tick(t0 + ms(750));
        assert_eq!(dial.layout(t0 + ms(750)).length_multipliers[current], 1.0);
    }

    #[test]
    fn scaling_stays_without_auto_reset() {
        let t0 = Instant::now();
        let mut config = Config::default();
        config.scaling.auto_reset = false;
        let mut dial = DialController::new(config).unwrap();
        dial.handle(Action::RotateIncrease, t0);
        dial.tick(t0 + secs(5));
        assert!(dial.state().scaling.is_active());
    }

    #[test]
    fn animated_trail_catches_up_and_settles() {
        let t0 = Instant::now();
        let mut config = Config::default();
        config.trail.mode = ColorMode::Animated;
        let mut dial = DialController::new(config).unwrap();
        for i in 0..3 {
            dial.handle(Action::RotateIncrease, t0 + ms(i * 700));
        }
        assert_eq!(dial.state().trail.length, 3);

        let last = t0 + ms(1400);
        let frame = dial.frame(last);
        let current = frame.current_index;
        let accent = dial.config().theme.accent;
        let base = dial.config().theme.base;
        assert_eq!(frame.ticks[current].color, accent);
        assert_ne!(frame.ticks[current - 1].color, base);

        dial.tick(last + ms(450));
        assert_eq!(dial.state().trail.length, 0);
        let frame = dial.frame(last + ms(450));
        assert_eq!(frame.ticks[current - 1].color, base);
    }

    #[test]
    fn seamless_flip_fades_while_rotation_continues() {
        let t0 = Instant::now();
        let mut dial = controller();
        dial.handle(Action::RotateIncrease, t0);
        dial.handle(Action::RotateDecrease, t0 + ms(700));
        assert!(dial.animations.is_running(AnimationId::TrailFlip));

        // Further steps the same way leave the cross-fade running
        dial.handle(Action::RotateDecrease, t0 + ms(750));
        assert!(dial.animations.is_running(AnimationId::TrailFlip));
        let progress = dial.animations.progress(AnimationId::TrailFlip, t0 + ms(800));
        assert!(progress.is_some_and(|p| (p - 0.5).abs() < 1e-9));

        let highlight = dial.config().theme.highlight;
        let base = dial.config().theme.base;
        let mid = dial.frame(t0 + ms(800));
        let ahead = mid.ticks[mid.current_index + 1].color;
        assert_ne!(ahead, highlight);
        assert_ne!(ahead, base);

        let done = dial.frame(t0 + ms(950));
        assert_eq!(done.ticks[done.current_index + 1].color, highlight);
    }

    #[test]
    fn flip_near_range_edge_cancels_running_fade() {
        let t0 = Instant::now();
        let mut dial = controller();
        dial.handle(Action::RotateIncrease, t0);
        dial.handle(Action::RotateDecrease, t0 + ms(700));
        assert!(dial.animations.is_running(AnimationId::TrailFlip));

        dial.state.value.temperature = 470;
        dial.handle(Action::RotateIncrease, t0 + ms(750));
        assert!(!dial.animations.is_running(AnimationId::TrailFlip));
        assert_eq!(
            dial.state().trail.direction,
            crate::dial::color::TrailDirection::Normal
        );
    }

    #[test]
    fn long_trail_config_is_rejected() {
        let mut config = Config::default();
        config.trail.max_length = 255;
        assert!(matches!(
            DialController::new(config),
            Err(DialError::Config { field: "trail.max_length", .. })
        ));
    }

    #[test]
    fn preheat_label_blinks() {
        let t0 = Instant::now();
        let mut dial = controller();
        dial.handle(Action::Aux, t0);
        dial.tick(t0 + ms(800));
        let preheat = t0 + ms(800);
        let frame = dial.frame(preheat);
        assert_eq!(frame.status, "Preheating…");
        assert!(frame.status_visible);
        assert_eq!(frame.filled_count, frame.total_ticks);
        assert!(!dial.frame(preheat + ms(600)).status_visible);
        assert!(dial.frame(preheat + ms(1200)).status_visible);
    }

    #[test]
    fn starting_ring_fills_over_animation() {
        let t0 = Instant::now();
        let mut dial = controller();
        dial.handle(Action::Aux, t0);
        let total = dial.frame(t0).total_ticks;
        assert_eq!(dial.frame(t0).filled_count, 0);
        assert_eq!(dial.frame(t0 + ms(800)).filled_count, total);
        dial.tick(t0 + ms(800));
        assert!(!dial.animations.is_running(AnimationId::RingFill));
    }

    #[test]
    fn frame_reports_setup_readouts() {
        let t0 = Instant::now();
        let mut dial = controller();
        let frame = dial.frame(t0);
        assert_eq!(frame.primary, "400");
        assert_eq!(frame.status, "Set temperature");
        assert_eq!(frame.ticks.len(), frame.total_ticks);
        assert!(frame.ticks[frame.current_index].current);

        dial.handle(Action::Press, t0);
        dial.state.value.total_minutes = 135;
        let frame = dial.frame(t0);
        assert_eq!(frame.primary, "2:15");
        assert_eq!(frame.time_phase, TimePhase::Hours);
        assert_eq!(frame.total_ticks, 285);
    }
}
