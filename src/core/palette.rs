//! Timestamp-driven accent cycle and periodic reset
//!
//! Both are polled once per frame, but what they do depends only on the
//! timestamps passed in, never on how many frames ran in between.

use tracing::debug;

use crate::theme::NEON_PALETTE;

/// Number of whole intervals that elapsed since `last`, and the timestamp the
/// next interval is measured from.
///
/// A non-positive or non-finite interval never advances.
pub fn advance(now: f64, last: f64, interval: f64) -> (u64, f64) {
    if !(interval.is_finite() && interval > 0.0) {
        return (0, last);
    }
    let elapsed = now - last;
    if elapsed.is_nan() || elapsed < interval {
        return (0, last);
    }
    let steps = (elapsed / interval).floor();
    (steps as u64, last + steps * interval)
}

/// Circular walk through a fixed palette
#[derive(Clone, Debug)]
pub struct ColorCycle {
    palette: &'static [&'static str],
    index: usize,
    last_change: f64,
    interval: f64,
}

impl ColorCycle {
    /// Cycle through the neon palette, starting at its first entry at `now`
    pub fn neon(interval: f64, now: f64) -> Self {
        Self::new(&NEON_PALETTE, interval, now)
    }

    pub fn new(palette: &'static [&'static str], interval: f64, now: f64) -> Self {
        debug_assert!(!palette.is_empty());
        Self {
            palette,
            index: 0,
            last_change: now,
            interval,
        }
    }

    /// Advance if due, then return the active color
    pub fn current(&mut self, now: f64) -> &'static str {
        let (steps, last_change) = advance(now, self.last_change, self.interval);
        if steps > 0 {
            let len = self.palette.len() as u64;
            self.index = ((self.index as u64 + steps % len) % len) as usize;
            self.last_change = last_change;
            debug!(index = self.index, color = self.palette[self.index], "Accent color changed");
        }
        self.palette[self.index]
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Optional periodic clear of the activated set
#[derive(Clone, Debug)]
pub struct ResetTimer {
    interval: f64,
    last_reset: f64,
}

impl ResetTimer {
    pub fn new(interval: f64, now: f64) -> Self {
        Self {
            interval,
            last_reset: now,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.interval > 0.0
    }

    /// True when a reset is due at `now`
    pub fn poll(&mut self, now: f64) -> bool {
        let (steps, _) = advance(now, self.last_reset, self.interval);
        if steps == 0 {
            return false;
        }
        self.last_reset = now;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_counts_whole_intervals() {
        assert_eq!(advance(999.0, 0.0, 1000.0), (0, 0.0));
        assert_eq!(advance(1000.0, 0.0, 1000.0), (1, 1000.0));
        assert_eq!(advance(3500.0, 0.0, 1000.0), (3, 3000.0));
        assert_eq!(advance(3500.0, 500.0, 1000.0), (3, 3500.0));
    }

    #[test]
    fn advance_disabled_interval() {
        assert_eq!(advance(1e9, 0.0, 0.0), (0, 0.0));
        assert_eq!(advance(1e9, 0.0, -5.0), (0, 0.0));
        assert_eq!(advance(1e9, 0.0, f64::NAN), (0, 0.0));
    }

    #[test]
    fn advance_ignores_clock_going_backwards() {
        assert_eq!(advance(100.0, 500.0, 50.0), (0, 500.0));
    }

    #[test]
    fn index_is_elapsed_over_interval_mod_palette() {
        let interval = 20_000.0;
        let start = 1_000.0;

        // Polling every ~8s or every frame lands on the same index
        let mut sparse = ColorCycle::neon(interval, start);
        let mut dense = ColorCycle::neon(interval, start);

        let mut t = start;
        let end = start + 400_000.0;
        let mut dense_t = start;
        while t <= end {
            while dense_t <= t {
                dense.current(dense_t);
                dense_t += 16.7;
            }
            sparse.current(t);
            let expected = ((t - start) / interval).floor() as usize % NEON_PALETTE.len();
            assert_eq!(sparse.index(), expected, "sparse at t={t}");
            t += 7_919.0;
        }
        assert_eq!(dense.current(end), sparse.current(end));
    }

    #[test]
    fn cycle_wraps_through_all_colors() {
        let mut cycle = ColorCycle::neon(10.0, 0.0);
        let seen: Vec<&str> = (0..7).map(|i| cycle.current(i as f64 * 10.0)).collect();
        assert_eq!(&seen[..6], &NEON_PALETTE[..]);
        assert_eq!(seen[6], NEON_PALETTE[0]);
    }

    #[test]
    fn frozen_cycle_stays_on_first_color() {
        let mut cycle = ColorCycle::neon(0.0, 0.0);
        assert_eq!(cycle.current(1e12), NEON_PALETTE[0]);
    }

    #[test]
    fn reset_timer() {
        let mut disabled = ResetTimer::new(0.0, 0.0);
        assert!(!disabled.is_enabled());
        assert!(!disabled.poll(1e9));

        let mut timer = ResetTimer::new(1000.0, 0.0);
        assert!(timer.is_enabled());
        assert!(!timer.poll(999.0));
        assert!(timer.poll(1200.0));
        // Measured from the reset itself
        assert!(!timer.poll(2100.0));
        assert!(timer.poll(2200.0));
    }
}
