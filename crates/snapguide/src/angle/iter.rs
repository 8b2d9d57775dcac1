use std::iter::FusedIterator;

use super::range_set::find_in;
use super::{Angle, PERIOD, STEP};

/// Counterclockwise arc `[a0, a1)`. `a0 == a1` denotes the full turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Range {
    pub a0: Angle,
    pub a1: Angle,
}

impl Range {
    #[inline]
    pub fn new(a0: Angle, a1: Angle) -> Self {
        Self { a0, a1 }
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.a0 == self.a1
    }

    /// Length in steps; `PERIOD` for the full turn.
    #[inline]
    pub fn span(&self) -> u64 {
        match self.a0.distance_to(self.a1) {
            0 => PERIOD,
            d => d as u64,
        }
    }

    #[inline]
    pub fn contains(&self, a: Angle) -> bool {
        self.is_full() || self.a0.distance_to(a) < self.a0.distance_to(self.a1)
    }

    /// Start in radians, `[-π, π)`.
    #[inline]
    pub fn d0(&self) -> f64 {
        self.a0.to_radians()
    }

    /// End in radians, `[-π, π)`.
    #[inline]
    pub fn d1(&self) -> f64 {
        self.a1.to_radians()
    }

    /// End in radians, unwrapped so that it lies in `(d0, d0 + 2π]`.
    #[inline]
    pub fn d1_greater(&self) -> f64 {
        self.d0() + self.span() as f64 * STEP
    }
}

/// Covered (or, in complement mode, uncovered) arcs of an `AngleRangeSet`.
///
/// Cheap to clone; a clone restarts from the same position.
#[derive(Clone, Debug)]
pub struct Ranges<'a> {
    angles: &'a [Angle],
    flip: bool,
    origin: Angle,
    first: usize,
    next: usize,
    len: usize,
}

impl<'a> Ranges<'a> {
    /// `flip` is the effective flip bit (already toggled for complement mode).
    /// With an `origin`, iteration starts at the arc containing it, or else at
    /// the next arc counterclockwise.
    pub(crate) fn new(angles: &'a [Angle], flip: bool, origin: Option<Angle>) -> Self {
        let len = if angles.is_empty() {
            usize::from(flip)
        } else {
            angles.len() / 2
        };
        let first = match origin {
            Some(o) if !angles.is_empty() && len > 0 => {
                let i = find_in(angles, o);
                if flip {
                    (i / 2) % len
                } else {
                    ((i + 1) / 2) % len
                }
            }
            _ => 0,
        };
        Self {
            angles,
            flip,
            origin: origin.unwrap_or(Angle::MIN),
            first,
            next: 0,
            len,
        }
    }

    fn range_at(&self, k: usize) -> Range {
        if self.angles.is_empty() {
            return Range::new(self.origin, self.origin);
        }
        let j = (self.first + k) % self.len;
        if self.flip {
            let n = self.angles.len();
            Range::new(self.angles[2 * j + 1], self.angles[(2 * j + 2) % n])
        } else {
            Range::new(self.angles[2 * j], self.angles[2 * j + 1])
        }
    }
}

impl Iterator for Ranges<'_> {
    type Item = Range;

    fn next(&mut self) -> Option<Range> {
        if self.next >= self.len {
            return None;
        }
        let r = self.range_at(self.next);
        self.next += 1;
        Some(r)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.len - self.next;
        (rest, Some(rest))
    }
}

impl ExactSizeIterator for Ranges<'_> {}
impl FusedIterator for Ranges<'_> {}
