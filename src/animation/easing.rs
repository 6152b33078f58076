//! Easing curves shared by the tick scaling falloff and every timed transition.
//!
//! All curves map `[0, 1]` onto `[0, 1]`, start at 0, end at 1 and never
//! decrease in between.

use std::f64::consts::PI;

use serde::Deserialize;

/// Selectable shape for the scaling falloff around the current tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingCurve {
    Linear,
    EaseIn,
    #[default]
    EaseOut,
    Sine,
    Exponential,
}

impl EasingCurve {
    /// Apply the curve to a normalized input (clamped to [0, 1])
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            EasingCurve::Linear => t,
            EasingCurve::EaseIn => t * t,
            EasingCurve::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            EasingCurve::Sine => -((PI * t).cos() - 1.0) / 2.0,
            EasingCurve::Exponential => {
                if t <= 0.0 {
                    0.0
                } else if t >= 1.0 {
                    1.0
                } else {
                    2f64.powf(10.0 * t - 10.0)
                }
            }
        }
    }
}

/// Cubic ease-in-out, used for scaling and cross-fade transitions
pub fn ease_in_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Quadratic ease-out, used for the trail catch-up
pub fn ease_out_quad(t: f64) -> f64 {
    EasingCurve::EaseOut.apply(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURVES: [EasingCurve; 5] = [
        EasingCurve::Linear,
        EasingCurve::EaseIn,
        EasingCurve::EaseOut,
        EasingCurve::Sine,
        EasingCurve::Exponential,
    ];

    #[test]
    fn curves_hit_both_endpoints() {
        for curve in CURVES {
            assert!(curve.apply(0.0).abs() < 1e-9, "{curve:?} at 0");
            assert!((curve.apply(1.0) - 1.0).abs() < 1e-9, "{curve:?} at 1");
        }
    }

    #[test]
    fn curves_are_monotonic() {
        for curve in CURVES {
            let mut prev = curve.apply(0.0);
            for step in 1..=100 {
                let v = curve.apply(step as f64 / 100.0);
                assert!(v + 1e-12 >= prev, "{curve:?} decreased at step {step}");
                prev = v;
            }
        }
    }

    #[test]
    fn ease_in_is_below_linear_and_ease_out_above() {
        assert!(EasingCurve::EaseIn.apply(0.5) < 0.5);
        assert!(EasingCurve::EaseOut.apply(0.5) > 0.5);
        assert!((EasingCurve::Sine.apply(0.5) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn input_is_clamped() {
        assert_eq!(EasingCurve::Linear.apply(-3.0), 0.0);
        assert_eq!(EasingCurve::Linear.apply(7.0), 1.0);
        assert_eq!(ease_in_out_cubic(2.0), 1.0);
    }

    #[test]
    fn cubic_is_symmetric_about_midpoint() {
        assert!((ease_in_out_cubic(0.5) - 0.5).abs() < 1e-9);
        let a = ease_in_out_cubic(0.2);
        let b = ease_in_out_cubic(0.8);
        assert!((a + b - 1.0).abs() < 1e-9);
    }
}
