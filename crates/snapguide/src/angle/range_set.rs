//! Circular interval set over quantized angles.

use super::iter::Ranges;
use super::Angle;

/// Index of the greatest break-point `<= a`; an angle before the first
/// break-point maps to the last index (the arc that wraps around).
pub(crate) fn find_in(angles: &[Angle], a: Angle) -> usize {
    debug_assert!(!angles.is_empty(), "find on an empty break-point list");
    let last = angles.len().saturating_sub(1);
    if angles.is_empty() || a < angles[0] || angles[last] <= a {
        return last;
    }
    let (mut i0, mut i1) = (0, last);
    loop {
        let i = (i0 + i1) / 2;
        if i == i0 {
            return i0;
        }
        if angles[i] <= a {
            i0 = i;
        } else {
            i1 = i;
        }
    }
}

/// A set of counterclockwise arcs on the circle.
///
/// Representation
/// - `angles`: strictly increasing break-points, even count. Walking the
///   linear order from `Angle::MIN`, coverage toggles at every break-point and
///   starts out "not covered".
/// - `flip`: inverts the coverage everywhere.
///
/// No break-points means the set is empty (`flip == false`) or the full
/// circle (`flip == true`). The representation of a given set is unique, so
/// `==` compares sets.
///
/// Arcs are half-open, `[a0, a1)`, and wrap when `a1 < a0`. A degenerate
/// arc (`a0 == a1`) passed to `add`, `subtract`, `intersect` or
/// `invert_range` leaves the set unchanged.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct AngleRangeSet {
    angles: Vec<Angle>,
    flip: bool,
}

impl AngleRangeSet {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn full() -> Self {
        Self {
            angles: Vec::new(),
            flip: true,
        }
    }

    /// The arc `[a0, a1)`; equal endpoints give the full circle.
    pub fn from_range(a0: Angle, a1: Angle) -> Self {
        let mut s = Self::new();
        s.set(a0, a1);
        s
    }

    #[inline]
    pub fn angles(&self) -> &[Angle] {
        &self.angles
    }

    #[inline]
    pub fn is_flipped(&self) -> bool {
        self.flip
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.angles.is_empty() && !self.flip
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.angles.is_empty() && self.flip
    }

    #[inline]
    pub fn clear(&mut self) {
        self.angles.clear();
        self.flip = false;
    }

    #[inline]
    pub fn fill(&mut self) {
        self.angles.clear();
        self.flip = true;
    }

    /// Replace the contents by `[a0, a1)`; equal endpoints give the full circle.
    pub fn set(&mut self, a0: Angle, a1: Angle) {
        self.angles.clear();
        if a0 < a1 {
            self.flip = false;
            self.angles.extend([a0, a1]);
        } else if a1 < a0 {
            self.flip = true;
            self.angles.extend([a1, a0]);
        } else {
            self.flip = true;
        }
    }

    /// Replace the contents by `other`, complemented when `flip` is set.
    pub fn set_from(&mut self, other: &AngleRangeSet, flip: bool) {
        self.angles.clone_from(&other.angles);
        self.flip = other.flip != flip;
    }

    /// Structural invariant: even break-point count, strictly increasing.
    pub fn check(&self) -> bool {
        self.angles.len() % 2 == 0 && self.angles.windows(2).all(|w| w[0] < w[1])
    }

    /// See [`find_in`]. Requires at least one break-point.
    #[inline]
    pub fn find(&self, a: Angle) -> usize {
        find_in(&self.angles, a)
    }

    /// Toggle `a` as a break-point. A single call breaks the even-count
    /// invariant; callers pair them up.
    pub fn insert(&mut self, a: Angle) {
        if self.angles.is_empty() {
            self.angles.push(a);
            return;
        }
        let i = self.find(a);
        if self.angles[i] == a {
            self.angles.remove(i);
        } else if a < self.angles[0] {
            self.angles.insert(0, a);
        } else {
            self.angles.insert(i + 1, a);
        }
    }

    pub fn contains(&self, a: Angle) -> bool {
        if self.angles.is_empty() {
            return self.flip;
        }
        self.covered_from(self.find(a))
    }

    /// Whether the arc starting at break-point `i` is covered.
    #[inline]
    fn covered_from(&self, i: usize) -> bool {
        (i % 2 == 1) == self.flip
    }

    /// Complement.
    #[inline]
    pub fn invert(&mut self) {
        self.flip = !self.flip;
    }

    /// Complement within `[a0, a1)`.
    pub fn invert_range(&mut self, a0: Angle, a1: Angle) {
        if a0 == a1 {
            return;
        }
        if self.is_empty() {
            self.set(a0, a1);
        } else if self.is_full() {
            self.set(a1, a0);
        } else {
            if a1 < a0 {
                self.flip = !self.flip;
            }
            self.insert(a0);
            self.insert(a1);
        }
        debug_assert!(self.check());
    }

    /// Symmetric difference with `other`.
    pub fn invert_set(&mut self, other: &AngleRangeSet) {
        if other.is_empty() {
            return;
        }
        if other.is_full() {
            self.invert();
        } else if self.is_empty() {
            self.set_from(other, false);
        } else if self.is_full() {
            self.set_from(other, true);
        } else {
            self.flip ^= other.flip;
            for &a in &other.angles {
                self.insert(a);
            }
        }
        debug_assert!(self.check());
    }

    /// Union with `[a0, a1)`.
    pub fn add(&mut self, a0: Angle, a1: Angle) {
        if self.is_full() || a0 == a1 {
            return;
        }
        if self.is_empty() {
            self.set(a0, a1);
        } else {
            self.do_add(a0, a1);
        }
        debug_assert!(self.check());
    }

    /// Union with `other`.
    pub fn add_set(&mut self, other: &AngleRangeSet) {
        if self.is_full() || other.is_empty() {
            return;
        }
        if self.is_empty() {
            self.set_from(other, false);
            return;
        }
        if other.is_full() {
            self.fill();
            return;
        }
        for r in other.iter() {
            if self.is_full() {
                break;
            }
            self.do_add(r.a0, r.a1);
        }
        debug_assert!(self.check());
    }

    /// Remove `[a0, a1)`: `A − B = ¬(¬A ∪ B)`.
    pub fn subtract(&mut self, a0: Angle, a1: Angle) {
        if self.is_empty() || a0 == a1 {
            return;
        }
        if self.is_full() {
            self.set(a1, a0);
        } else {
            self.invert();
            self.do_add(a0, a1);
            self.invert();
        }
        debug_assert!(self.check());
    }

    /// Remove every arc of `other`.
    pub fn subtract_set(&mut self, other: &AngleRangeSet) {
        if self.is_empty() || other.is_empty() {
            return;
        }
        if other.is_full() {
            self.clear();
            return;
        }
        if self.is_full() {
            self.set_from(other, true);
            return;
        }
        self.invert();
        for r in other.iter() {
            if self.is_full() {
                break;
            }
            self.do_add(r.a0, r.a1);
        }
        self.invert();
        debug_assert!(self.check());
    }

    /// Keep only `[a0, a1)`: `A ∩ B = ¬(¬A ∪ ¬B)`.
    pub fn intersect(&mut self, a0: Angle, a1: Angle) {
        if self.is_empty() || a0 == a1 {
            return;
        }
        if self.is_full() {
            self.set(a0, a1);
        } else {
            self.invert();
            self.do_add(a1, a0);
            self.invert();
        }
        debug_assert!(self.check());
    }

    /// Keep only what `other` also covers.
    pub fn intersect_set(&mut self, other: &AngleRangeSet) {
        if self.is_empty() || other.is_full() {
            return;
        }
        if other.is_empty() {
            self.clear();
            return;
        }
        if self.is_full() {
            self.set_from(other, false);
            return;
        }
        self.invert();
        for r in other.iter_complement() {
            if self.is_full() {
                break;
            }
            self.do_add(r.a0, r.a1);
        }
        self.invert();
        debug_assert!(self.check());
    }

    /// Covered arcs in storage order.
    #[inline]
    pub fn iter(&self) -> Ranges<'_> {
        Ranges::new(&self.angles, self.flip, None)
    }

    /// Covered arcs, starting with the one containing `origin` (or the next
    /// one counterclockwise). A full set yields `[origin, origin)`.
    #[inline]
    pub fn iter_from(&self, origin: Angle) -> Ranges<'_> {
        Ranges::new(&self.angles, self.flip, Some(origin))
    }

    /// Uncovered arcs in storage order.
    #[inline]
    pub fn iter_complement(&self) -> Ranges<'_> {
        Ranges::new(&self.angles, !self.flip, None)
    }

    /// Union with a non-degenerate arc; the set may be in any state.
    fn do_add(&mut self, a0: Angle, a1: Angle) {
        if self.angles.is_empty() {
            if !self.flip {
                self.set(a0, a1);
            }
            return;
        }

        let i0 = self.find(a0);
        let i1 = self.find(a1);
        if i0 == i1 {
            let covered = self.covered_from(i0);
            let b = self.angles[i0];
            if b != a0 && a0.distance_to(b) <= a0.distance_to(a1) {
                // the arc runs once around and past its own start
                if covered {
                    self.fill();
                } else {
                    self.set(a0, a1);
                }
            } else if !covered {
                if a1 < a0 {
                    self.flip = true;
                }
                self.insert(a0);
                self.insert(a1);
            }
            return;
        }

        let covered0 = self.covered_from(i0);
        let covered1 = self.covered_from(i1);

        // drop break-points in (i0, i1], circularly
        let n = self.angles.len();
        let start = (i0 + 1) % n;
        if i1 < start {
            self.angles.truncate(start);
            self.angles.drain(..=i1);
        } else {
            self.angles.drain(start..=i1);
        }

        if !covered0 {
            self.insert(a0);
        }
        if !covered1 {
            self.insert(a1);
        }
        if self.angles.is_empty() || a1 < a0 {
            self.flip = true;
        }
    }
}

impl<'a> IntoIterator for &'a AngleRangeSet {
    type Item = super::Range;
    type IntoIter = Ranges<'a>;

    fn into_iter(self) -> Ranges<'a> {
        self.iter()
    }
}
