//! Quantized angles and circular interval sets.
//!
//! Purpose
//! - Exact, integer-backed arithmetic on the circle so that set algebra over
//!   arcs (union, difference, intersection, complement) never suffers from
//!   floating-point drift at the seams.
//!
//! Model
//! - `Angle` wraps a `u32`; the full turn is `PERIOD = 2³²` steps and the
//!   linear order of the raw values is the order of radians on `[-π, π)`
//!   (raw `0` is `-π`, raw `HALF` is `0`).
//! - Turning (`rotated`) and forward distances (`distance_to`) wrap modulo
//!   the period. `a ^ HALF` turns `a` by exactly 180°.
//! - `AngleRangeSet` stores sorted break-points plus a flip bit; see its docs.
//!
//! References
//! - Code cross-refs: `AngleRangeSet`, `guide::ellipse::truncate_ellipse`

use std::f64::consts::{PI, TAU};
use std::fmt;
use std::ops::{BitXor, BitXorAssign};

mod iter;
mod range_set;

pub use iter::{Range, Ranges};
pub use range_set::AngleRangeSet;

/// Steps in a full turn.
pub const PERIOD: u64 = 1 << 32;
/// Steps in half a turn (180°); also the raw encoding of `0` radians.
pub const HALF: u32 = 1 << 31;
/// Radians per step.
pub const STEP: f64 = PI / HALF as f64;

/// A point on the circle, quantized to `PERIOD` steps.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Angle(pub u32);

impl Angle {
    /// `-π`, the start of the linear order.
    pub const MIN: Angle = Angle(0);
    /// `0` radians.
    pub const ZERO: Angle = Angle(HALF);

    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Angle(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Nearest quantized angle; any finite input wraps onto the circle.
    #[inline]
    pub fn from_radians(x: f64) -> Self {
        // reduce first so the step count never saturates
        let x = if (-PI..=PI).contains(&x) {
            x
        } else {
            x.rem_euclid(TAU)
        };
        Angle(Self::steps(x) as u32).wrapping_add_raw(HALF)
    }

    #[inline]
    pub fn from_degrees(x: f64) -> Self {
        Self::from_radians(x.to_radians())
    }

    /// Radians in `[-π, π)`.
    #[inline]
    pub fn to_radians(self) -> f64 {
        self.0 as f64 * STEP - PI
    }

    #[inline]
    pub fn to_degrees(self) -> f64 {
        self.to_radians().to_degrees()
    }

    /// Counterclockwise distance from `self` to `other` in steps.
    #[inline]
    pub fn distance_to(self, other: Angle) -> u32 {
        other.0.wrapping_sub(self.0)
    }

    /// Turn by a signed step count.
    #[inline]
    pub fn rotated(self, steps: i64) -> Angle {
        Angle(self.0.wrapping_add(steps as u32))
    }

    /// Signed step count nearest to `x` radians (for use with `rotated`).
    #[inline]
    pub fn steps(x: f64) -> i64 {
        (x / STEP).round() as i64
    }

    #[inline]
    fn wrapping_add_raw(self, raw: u32) -> Angle {
        Angle(self.0.wrapping_add(raw))
    }
}

impl fmt::Debug for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Angle({:.6}°)", self.to_degrees())
    }
}

impl BitXor<u32> for Angle {
    type Output = Angle;
    #[inline]
    fn bitxor(self, rhs: u32) -> Angle {
        Angle(self.0 ^ rhs)
    }
}

impl BitXorAssign<u32> for Angle {
    #[inline]
    fn bitxor_assign(&mut self, rhs: u32) {
        self.0 ^= rhs;
    }
}
