use std::time::{Duration, Instant};

/// Whether a blinking element is lit `elapsed` into a cycle of `period` on / `period` off.
/// Starts lit.
pub fn lit_at(elapsed: Duration, period: Duration) -> bool {
    if period.is_zero() {
        return true;
    }
    (elapsed.as_millis() / period.as_millis()) % 2 == 0
}

/// Boundary feedback: `count` blinks, each `duration` dimmed followed by `duration` lit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flash {
    pub started_at: Instant,
    pub count: u8,
    pub duration: Duration,
}

impl Flash {
    pub fn new(started_at: Instant, count: u8, duration: Duration) -> Self {
        Self {
            started_at,
            count,
            duration,
        }
    }

    /// Total time from first dim to last relit
    pub fn total(&self) -> Duration {
        self.duration * 2 * u32::from(self.count)
    }

    pub fn is_active(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started_at) < self.total()
    }

    /// True while the flashed element should be drawn dimmed. Each blink dims first.
    pub fn is_dimmed(&self, now: Instant) -> bool {
        let elapsed = now.saturating_duration_since(self.started_at);
        self.is_active(now) && !lit_at(elapsed + self.duration, self.duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn lit_alternates_every_period() {
        assert!(lit_at(ms(0), ms(600)));
        assert!(lit_at(ms(599), ms(600)));
        assert!(!lit_at(ms(600), ms(600)));
        assert!(lit_at(ms(1200), ms(600)));
    }

    #[test]
    fn flash_blinks_count_times_then_stops() {
        let t0 = Instant::now();
        let flash = Flash::new(t0, 3, ms(150));
        assert_eq!(flash.total(), ms(900));

        let dimmed: Vec<bool> = (0..6).map(|i| flash.is_dimmed(t0 + ms(i * 150))).collect();
        assert_eq!(dimmed, vec![true, false, true, false, true, false]);

        assert!(flash.is_active(t0 + ms(899)));
        assert!(!flash.is_active(t0 + ms(900)));
        assert!(!flash.is_dimmed(t0 + ms(900)));
    }
}
