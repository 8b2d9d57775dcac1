//! Tolerance and tuning defaults (internal).
//!
//! Policy
//! - Defaults are fixed constants to avoid “tolerance juggling” at call sites.
//!   Predicates that take an explicit tolerance (e.g. `Affine2::is_identity`)
//!   still exist for callers with their own scale.

/// General geometric epsilon: coincident points, zero lengths, degenerate radii.
pub const EPS: f64 = 1e-8;
/// Singularity threshold for 3×3 / 4×4 cofactor inverses.
pub const DET_EPS: f64 = 1e-12;
/// Stand-in for `1/0` on the diagonal fast path of `Affine2::inv`.
pub const SATURATED_INVERSE: f64 = f64::MAX / 65536.0;

/// Bounds on the polyline resolution used when drawing an ellipse.
pub const ELLIPSE_SEGMENTS_MIN: usize = 4;
pub const ELLIPSE_SEGMENTS_MAX: usize = 1000;

/// Screen-space length (pixels) around which a track's deviation is weighted
/// when scoring guidelines; scoring looks at `2 * SNAP_LENGTH` pixels.
pub const SNAP_LENGTH: f64 = 20.0;
/// Log-normal width of the scoring window.
pub const SNAP_SCALE: f64 = 1.0;

/// Segment opacity for the active guideline, other guidelines, and the factor
/// applied when either the guideline or the draw call is disabled.
pub const ALPHA_ACTIVE: f64 = 1.0;
pub const ALPHA_INACTIVE: f64 = 0.5;
pub const ALPHA_DISABLED_FACTOR: f64 = 0.5;

#[inline]
pub fn is_almost_zero(x: f64) -> bool {
    x.abs() < EPS
}

#[inline]
pub fn are_almost_equal(a: f64, b: f64, err: f64) -> bool {
    (a - b).abs() < err
}
