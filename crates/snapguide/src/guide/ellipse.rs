//! Ellipse guideline.
//!
//! Model
//! - `matrix` maps the unit circle onto the ellipse; `rx`, `ry` are the
//!   nominal radii (column norms of `matrix` unless given explicitly).
//! - Snapping (`transform_point`) is a radial projection in unit-circle space.
//!   `nearest_point` is the exact orthogonal projection (a quartic solve) and
//!   is only used for scoring.
//! - Drawing culls the parameter circle to the arcs visible in the viewport
//!   (`truncate_ellipse`) and walks each arc with a fixed incremental rotation.

use std::f64::consts::TAU;

use nalgebra::Vector2;

use super::draw::{segment_alpha, DrawBackend};
use super::{Guide, GuideStyle, TrackPoint};
use crate::affine::{Affine2, Rect2};
use crate::angle::{Angle, AngleRangeSet, HALF};
use crate::cfg::{is_almost_zero, ELLIPSE_SEGMENTS_MAX, ELLIPSE_SEGMENTS_MIN, EPS};
use crate::solvers::{polish, solve_quartic};

#[inline]
fn rotate90(v: Vector2<f64>) -> Vector2<f64> {
    Vector2::new(-v.y, v.x)
}

#[inline]
fn angle_of(v: Vector2<f64>) -> Angle {
    Angle::from_radians(v.y.atan2(v.x))
}

/// Nearest point to `p` on the axis-aligned ellipse `x²/rx² + y²/ry² = 1`.
///
/// A (near-)zero radius collapses the ellipse onto a segment of the other
/// axis and `p` is clamped onto it. Otherwise the normal condition is solved
/// as a quartic in the circle parameter `x/rx` and the roots are polished.
/// Every root proposes the boundary point at its clamped real part on the
/// side of `p`; the closest wins, the first enumerated on ties. The radial
/// projection of `p` competes last. A circle queried at its centre has no
/// candidate and returns the centre.
pub fn find_nearest_point(p: Vector2<f64>, rx: f64, ry: f64) -> Vector2<f64> {
    let (rx, ry) = (rx.abs(), ry.abs());
    if is_almost_zero(rx) {
        return Vector2::new(0.0, p.y.clamp(-ry, ry));
    }
    if is_almost_zero(ry) {
        return Vector2::new(p.x.clamp(-rx, rx), 0.0);
    }

    let x0 = p.x / rx;
    let y0 = p.y / rx;
    let k = (ry / rx) * (ry / rx);
    let l = k - 1.0;

    let coeffs = [
        l * l,
        2.0 * l * x0,
        x0 * x0 + y0 * y0 * k - l * l,
        -2.0 * l * x0,
        -x0 * x0,
    ];
    let mut roots = solve_quartic(coeffs[0], coeffs[1], coeffs[2], coeffs[3], coeffs[4]);
    polish(&coeffs, &mut roots);

    let mut best = Vector2::zeros();
    let mut dist = f64::INFINITY;
    let mut consider = |x: f64, y: f64| {
        let dd = (x0 - x) * (x0 - x) + (y0 - y) * (y0 - y);
        if dd < dist {
            best = Vector2::new(x * rx, y * rx);
            dist = dd;
        }
    };
    for z in roots {
        if !z.re.is_finite() {
            continue;
        }
        let x = z.re.clamp(-1.0, 1.0);
        let y = (k * (1.0 - x * x)).sqrt();
        consider(x, if y0 < 0.0 { -y } else { y });
    }
    let n2 = x0 * x0 + y0 * y0 / k;
    if n2 > 0.0 && n2.is_finite() {
        let s = n2.sqrt().recip();
        consider(x0 * s, y0 * s);
    }
    best
}

/// Remove from `ranges` every angle of the unit circle that `ellipse_matrix_inv`
/// maps outside of `bounds`, i.e. keep the visible arcs.
///
/// Returns `false` (and leaves `ranges` empty) when nothing remains.
pub fn truncate_ellipse(
    ranges: &mut AngleRangeSet,
    ellipse_matrix_inv: &Affine2,
    bounds: &Rect2,
) -> bool {
    if ranges.is_empty() {
        return false;
    }
    if bounds.is_empty() {
        ranges.clear();
        return false;
    }

    let o = ellipse_matrix_inv.transform_point(bounds.p00());
    let dx = ellipse_matrix_inv.transform_direction(Vector2::new(bounds.width(), 0.0));
    let dy = ellipse_matrix_inv.transform_direction(Vector2::new(0.0, bounds.height()));
    let lx2 = dx.norm_squared();
    let ly2 = dy.norm_squared();
    if lx2 < EPS * EPS || ly2 < EPS * EPS {
        ranges.clear();
        return false;
    }
    let mut nx = rotate90(dx) / lx2.sqrt();
    let mut ny = rotate90(dy) / ly2.sqrt();
    let mut ax = angle_of(dx);
    let mut ay = angle_of(dy);

    let sign = nx.dot(&dy);
    if sign.abs() <= EPS {
        ranges.clear();
        return false;
    }
    // Make the normals point into the rectangle.
    if sign < 0.0 {
        nx = -nx;
        ny = -ny;
        ax ^= HALF;
        ay ^= HALF;
    }

    let edges = [
        (ax, o.dot(&nx)),
        (ax ^ HALF, -(o + dx + dy).dot(&nx)),
        (ay, (o + dx).dot(&ny)),
        (ay ^ HALF, -(o + dy).dot(&ny)),
    ];
    for (da, h) in edges {
        if h <= EPS - 1.0 {
            continue;
        }
        if h >= 1.0 - EPS {
            ranges.clear();
            return false;
        }
        // The arc outside this edge is centred on `da - 90°` with half-width
        // `acos(-h) = 90° + asin(h)`.
        let a = Angle::steps(h.clamp(-1.0, 1.0).asin());
        ranges.subtract(da.rotated(-a) ^ HALF, da.rotated(a));
        if ranges.is_empty() {
            return false;
        }
    }
    true
}

/// Polyline resolution for drawing an ellipse so that each chord deviates
/// from the curve by about half a pixel.
pub fn calc_segments_count(ellipse_matrix: &Affine2, pixel_size: f64) -> usize {
    let m = &ellipse_matrix.m;
    let r = (0.5 * (m.column(0).norm_squared() + m.column(1).norm_squared())).sqrt();
    let h = 0.5 * pixel_size / r;
    if h.is_nan() || h <= EPS {
        return ELLIPSE_SEGMENTS_MAX;
    }
    if h >= 1.0 - EPS {
        return ELLIPSE_SEGMENTS_MIN;
    }
    let segments = (TAU / (1.0 - h).acos()).round();
    segments.clamp(ELLIPSE_SEGMENTS_MIN as f64, ELLIPSE_SEGMENTS_MAX as f64) as usize
}

#[derive(Clone, Debug, PartialEq)]
pub struct EllipseGuide {
    style: GuideStyle,
    matrix: Affine2,
    matrix_inv: Affine2,
    rx: f64,
    ry: f64,
}

impl EllipseGuide {
    pub fn new(style: GuideStyle, matrix: Affine2) -> Self {
        Self::with_inverse(style, matrix, matrix.inv())
    }

    /// Radii are taken from the column norms of `matrix`.
    pub fn with_inverse(style: GuideStyle, matrix: Affine2, matrix_inv: Affine2) -> Self {
        let rx = matrix.m.column(0).norm();
        let ry = matrix.m.column(1).norm();
        Self::with_radii(style, matrix, matrix_inv, rx, ry)
    }

    pub fn with_radii(
        style: GuideStyle,
        matrix: Affine2,
        matrix_inv: Affine2,
        rx: f64,
        ry: f64,
    ) -> Self {
        Self {
            style,
            matrix,
            matrix_inv,
            rx,
            ry,
        }
    }

    /// Ellipse centred at `center` with semi-axes `rx`, `ry`, the x semi-axis
    /// turned by `rotation_degrees` counterclockwise.
    pub fn from_center_radii(
        style: GuideStyle,
        center: Vector2<f64>,
        rx: f64,
        ry: f64,
        rotation_degrees: f64,
    ) -> Self {
        let matrix = Affine2::translation(center)
            * Affine2::rotation_degrees(rotation_degrees)
            * Affine2::scale(rx, ry);
        Self::new(style, matrix)
    }

    #[inline]
    pub fn matrix(&self) -> &Affine2 {
        &self.matrix
    }

    #[inline]
    pub fn matrix_inv(&self) -> &Affine2 {
        &self.matrix_inv
    }

    #[inline]
    pub fn rx(&self) -> f64 {
        self.rx
    }

    #[inline]
    pub fn ry(&self) -> f64 {
        self.ry
    }

    #[inline]
    pub fn center(&self) -> Vector2<f64> {
        self.matrix.t
    }
}

impl Guide for EllipseGuide {
    fn style(&self) -> &GuideStyle {
        &self.style
    }

    fn transform_point(&self, point: &TrackPoint) -> TrackPoint {
        let pp = self.matrix_inv.transform_point(point.position);
        let l2 = pp.norm_squared();
        if l2 > EPS * EPS {
            point.with_position(self.matrix.transform_point(pp / l2.sqrt()))
        } else {
            *point
        }
    }

    fn nearest_point(&self, position: Vector2<f64>) -> Vector2<f64> {
        let p = self.matrix_inv.transform_point(position);
        let mut q = find_nearest_point(
            Vector2::new(p.x * self.rx, p.y * self.ry),
            self.rx,
            self.ry,
        );
        if !is_almost_zero(self.rx) {
            q.x /= self.rx;
        }
        if !is_almost_zero(self.ry) {
            q.y /= self.ry;
        }
        self.matrix.transform_point(q)
    }

    fn draw(&self, backend: &mut dyn DrawBackend, active: bool, enabled: bool) {
        let vp = backend.viewport();
        let pixel_size = backend.pixel_size_squared().sqrt();

        let mut ranges = AngleRangeSet::full();
        if !truncate_ellipse(&mut ranges, &(self.matrix_inv * vp.matrix_inv), &Rect2::UNIT_CLIP) {
            tracing::trace!("ellipse outside viewport");
            return;
        }

        let segments = calc_segments_count(&self.matrix, pixel_size);
        let da = TAU / segments as f64;
        let (s, c) = da.sin_cos();
        let alpha = segment_alpha(&self.style, active, enabled);
        tracing::trace!(segments, arcs = ranges.iter().len(), "drawing ellipse");

        for range in &ranges {
            let a0 = range.d0();
            let a1 = range.d1_greater();
            let mut r = Vector2::new(a0.cos(), a0.sin());
            let mut p0 = self.matrix.transform_point(r);
            let steps = ((a1 - a0) / da).floor() as usize;
            for _ in 0..steps {
                r = Vector2::new(r.x * c - r.y * s, r.y * c + r.x * s);
                let p1 = self.matrix.transform_point(r);
                backend.draw_segment(p0, p1, pixel_size, alpha, alpha);
                p0 = p1;
            }
            let end = self.matrix.transform_point(Vector2::new(a1.cos(), a1.sin()));
            backend.draw_segment(p0, end, pixel_size, alpha, alpha);
        }
    }
}
