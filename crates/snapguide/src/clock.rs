//! Monotonic time source for stamping input samples.
//!
//! Purpose
//! - Give tracks a timeline without a process-wide timer: whoever records
//!   samples holds a `ToolClock` and passes it in.
//!
//! Model
//! - Time is an `i64` tick count with `FREQUENCY` ticks per second
//!   (nanoseconds). `seconds()` converts with `STEP`.
//! - `MonotonicClock` counts from its own creation. `ManualClock` only moves
//!   when told to; tests and replays use it.

use std::cell::Cell;
use std::time::Instant;

/// Ticks per second.
pub const FREQUENCY: f64 = 1e9;
/// Seconds per tick.
pub const STEP: f64 = 1e-9;
/// Tolerance when comparing times in seconds.
pub const EPSILON: f64 = 1e-10;

pub trait ToolClock {
    /// Ticks since the clock's origin; never decreases.
    fn ticks(&self) -> i64;

    #[inline]
    fn seconds(&self) -> f64 {
        self.ticks() as f64 * STEP
    }
}

/// Wall-clock backed source, origin at construction.
#[derive(Clone, Copy, Debug)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolClock for MonotonicClock {
    fn ticks(&self) -> i64 {
        i64::try_from(self.origin.elapsed().as_nanos()).unwrap_or(i64::MAX)
    }
}

/// Clock driven by hand.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    ticks: Cell<i64>,
}

impl ManualClock {
    pub fn new(ticks: i64) -> Self {
        Self {
            ticks: Cell::new(ticks),
        }
    }

    /// Move forward by `dt` ticks (negative values are ignored).
    pub fn advance(&self, dt: i64) {
        self.ticks.set(self.ticks.get().saturating_add(dt.max(0)));
    }

    /// Jump to `ticks` if that is not in the past.
    pub fn set(&self, ticks: i64) {
        if ticks >= self.ticks.get() {
            self.ticks.set(ticks);
        }
    }

    pub fn advance_seconds(&self, dt: f64) {
        self.advance((dt * FREQUENCY).round() as i64);
    }
}

impl ToolClock for ManualClock {
    fn ticks(&self) -> i64 {
        self.ticks.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_is_monotonic() {
        let c = ManualClock::new(10);
        c.advance(5);
        assert_eq!(c.ticks(), 15);
        c.advance(-3);
        assert_eq!(c.ticks(), 15);
        c.set(7);
        assert_eq!(c.ticks(), 15);
        c.set(1_000_000_015);
        assert!((c.seconds() - 1.000_000_015).abs() < EPSILON);
    }

    #[test]
    fn advance_seconds_rounds_to_ticks() {
        let c = ManualClock::default();
        c.advance_seconds(0.25);
        assert_eq!(c.ticks(), 250_000_000);
    }

    #[test]
    fn monotonic_clock_never_goes_back() {
        let c = MonotonicClock::new();
        let a = c.ticks();
        let b = c.ticks();
        assert!(a >= 0);
        assert!(b >= a);
    }

    #[test]
    fn constants_agree() {
        assert!((FREQUENCY * STEP - 1.0).abs() < 1e-15);
        assert!(EPSILON < STEP);
    }
}
