pub mod blink;
pub mod easing;

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Identifies different animations that can be active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationId {
    /// Ring fill played while the cook cycle is starting
    RingFill,
    /// Tick length transition into or out of the active state
    Scaling,
    /// Boundary feedback blinks
    Flash,
    /// Seamless trail cross-fade after a direction change
    TrailFlip,
    /// Animated trail shrinking back to the current tick
    TrailCatchUp,
}

/// One running animation: a start time and how long it lasts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tween {
    pub started_at: Instant,
    pub duration: Duration,
}

impl Tween {
    /// Linear progress in [0, 1] at `now`
    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    pub fn is_done(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }
}

/// Tracks every in-flight animation of one dial.
///
/// Nothing reschedules itself: the host calls [`Animations::advance`] from
/// whatever timer it has and finished entries are dropped there. Starting an
/// animation that is already running supersedes it.
#[derive(Debug, Default)]
pub struct Animations {
    active: HashMap<AnimationId, Tween>,
}

impl Animations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) an animation at `now`
    pub fn start(&mut self, id: AnimationId, now: Instant, duration: Duration) {
        self.active.insert(
            id,
            Tween {
                started_at: now,
                duration,
            },
        );
    }

    pub fn stop(&mut self, id: AnimationId) {
        self.active.remove(&id);
    }

    pub fn get(&self, id: AnimationId) -> Option<&Tween> {
        self.active.get(&id)
    }

    pub fn is_running(&self, id: AnimationId) -> bool {
        self.active.contains_key(&id)
    }

    /// Linear progress of a running animation, `None` when it is not running
    pub fn progress(&self, id: AnimationId, now: Instant) -> Option<f64> {
        self.active.get(&id).map(|t| t.progress(now))
    }

    /// Drop every animation whose progress reached 1.0 and report which ones finished
    pub fn advance(&mut self, now: Instant) -> Vec<AnimationId> {
        let finished: Vec<AnimationId> = self
            .active
            .iter()
            .filter(|(_, tween)| tween.is_done(now))
            .map(|(id, _)| *id)
            .collect();
        for id in &finished {
            self.active.remove(id);
        }
        finished
    }

    /// Check if any animation is currently running
    pub fn has_active_animation(&self) -> bool {
        !self.active.is_empty()
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }
}

/// Linear interpolation
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t.clamp(0.0, 1.0)
}
