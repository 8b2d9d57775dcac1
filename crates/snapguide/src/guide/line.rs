//! Segment, ray and infinite line guidelines, plus their viewport clipping.
//!
//! Clipping works one axis at a time. The dominant axis (largest extent
//! relative to the rectangle's aspect) is fitted first so that the slope used
//! for extrapolation is never a near-vertical one; the cross axis is then
//! truncated.

use nalgebra::Vector2;

use super::draw::{segment_alpha, DrawBackend};
use super::{Guide, GuideStyle, TrackPoint};
use crate::affine::Rect2;
use crate::cfg::EPS;

const X: usize = 0;
const Y: usize = 1;

/// Unit vector from `p0` to `p1`, or zero when the points coincide.
pub fn calc_direction(p0: Vector2<f64>, p1: Vector2<f64>) -> Vector2<f64> {
    let d = p1 - p0;
    let k = d.norm_squared();
    if k > EPS * EPS {
        d / k.sqrt()
    } else {
        Vector2::zeros()
    }
}

#[inline]
fn bounds_on(b: &Rect2, axis: usize) -> (f64, f64) {
    if axis == X {
        (b.x0, b.x1)
    } else {
        (b.y0, b.y1)
    }
}

/// Move both endpoints along the line onto `min`/`max` of `axis`,
/// keeping their order along the line.
fn fit_axis(
    p0: &mut Vector2<f64>,
    p1: &mut Vector2<f64>,
    axis: usize,
    min: f64,
    max: f64,
) -> bool {
    let cross = 1 - axis;
    let d = p1[axis] - p0[axis];
    if d.abs() < EPS {
        return false;
    }
    let k = (p1[cross] - p0[cross]) / d;
    let (to0, to1) = if d > 0.0 { (min, max) } else { (max, min) };
    p0[cross] += k * (to0 - p0[axis]);
    p0[axis] = to0;
    p1[cross] += k * (to1 - p1[axis]);
    p1[axis] = to1;
    true
}

/// Cut the parts of the segment lying beyond `min`/`max` of `axis`.
/// Returns `false` when the whole segment is on one side.
fn truncate_axis(
    p0: &mut Vector2<f64>,
    p1: &mut Vector2<f64>,
    axis: usize,
    min: f64,
    max: f64,
) -> bool {
    if p0[axis] <= min && p1[axis] <= min {
        return false;
    }
    if p0[axis] >= max && p1[axis] >= max {
        return false;
    }
    let cross = 1 - axis;
    let d = p1[axis] - p0[axis];
    if d.abs() < EPS {
        return true;
    }
    let k = (p1[cross] - p0[cross]) / d;
    if d > 0.0 {
        if p0[axis] < min {
            p0[cross] += k * (min - p0[axis]);
            p0[axis] = min;
        }
        if p1[axis] > max {
            p1[cross] += k * (max - p1[axis]);
            p1[axis] = max;
        }
    } else {
        if p0[axis] > max {
            p0[cross] += k * (max - p0[axis]);
            p0[axis] = max;
        }
        if p1[axis] < min {
            p1[cross] += k * (min - p1[axis]);
            p1[axis] = min;
        }
    }
    true
}

/// Intersection of the infinite line through `p0`, `p1` with `bounds`.
pub fn truncate_infinite_line(
    bounds: &Rect2,
    p0: Vector2<f64>,
    p1: Vector2<f64>,
) -> Option<(Vector2<f64>, Vector2<f64>)> {
    if bounds.is_empty() {
        return None;
    }
    let (mut q0, mut q1) = (p0, p1);
    let d = p0 - p1;
    let (main, cross) = if d.x.abs() * bounds.height() > d.y.abs() * bounds.width() {
        (X, Y)
    } else {
        (Y, X)
    };
    let (min, max) = bounds_on(bounds, main);
    if !fit_axis(&mut q0, &mut q1, main, min, max) {
        return None;
    }
    let (min, max) = bounds_on(bounds, cross);
    if !truncate_axis(&mut q0, &mut q1, cross, min, max) {
        return None;
    }
    Some((q0, q1))
}

/// Visible part of the ray starting at `p0` through `p1`.
pub fn truncate_ray(
    bounds: &Rect2,
    p0: Vector2<f64>,
    p1: Vector2<f64>,
) -> Option<(Vector2<f64>, Vector2<f64>)> {
    if bounds.is_empty() {
        return None;
    }
    // Expanded by EPS so axis-aligned rays keep a non-empty box.
    let mut b = *bounds;
    if p0.x <= p1.x {
        b.x0 = b.x0.max(p0.x - EPS);
    } else {
        b.x1 = b.x1.min(p0.x + EPS);
    }
    if p0.y <= p1.y {
        b.y0 = b.y0.max(p0.y - EPS);
    } else {
        b.y1 = b.y1.min(p0.y + EPS);
    }
    if b.is_empty() {
        return None;
    }
    truncate_infinite_line(&b, p0, p1)
}

/// Visible part of the segment `p0..p1`.
pub fn truncate_line(
    bounds: &Rect2,
    p0: Vector2<f64>,
    p1: Vector2<f64>,
) -> Option<(Vector2<f64>, Vector2<f64>)> {
    let b = Rect2::from_points(p0, p1).enlarge(EPS).intersection(bounds);
    if b.is_empty() {
        return None;
    }
    truncate_infinite_line(&b, p0, p1)
}

/// Clip in normalized viewport space and draw the visible piece in world space.
fn draw_line(
    backend: &mut dyn DrawBackend,
    style: &GuideStyle,
    p0: Vector2<f64>,
    p1: Vector2<f64>,
    restrict: (bool, bool),
    active: bool,
    enabled: bool,
) {
    let vp = backend.viewport();
    let pp0 = vp.matrix.transform_point(p0);
    let pp1 = vp.matrix.transform_point(p1);
    let clip = &Rect2::UNIT_CLIP;
    let visible = match restrict {
        (true, true) => truncate_line(clip, pp0, pp1),
        (true, false) => truncate_ray(clip, pp0, pp1),
        (false, true) => truncate_ray(clip, pp1, pp0),
        (false, false) => truncate_infinite_line(clip, pp0, pp1),
    };
    let Some((q0, q1)) = visible else {
        tracing::trace!(restrict0 = restrict.0, restrict1 = restrict.1, "line outside viewport");
        return;
    };
    let alpha = segment_alpha(style, active, enabled);
    let pixel_size = backend.pixel_size_squared().sqrt();
    backend.draw_segment(
        vp.matrix_inv.transform_point(q0),
        vp.matrix_inv.transform_point(q1),
        pixel_size,
        alpha,
        alpha,
    );
}

/// Segment between two points; snapping clamps to both ends.
#[derive(Clone, Debug, PartialEq)]
pub struct LineGuide {
    style: GuideStyle,
    p0: Vector2<f64>,
    p1: Vector2<f64>,
    dir: Vector2<f64>,
    dist: f64,
}

impl LineGuide {
    pub fn new(style: GuideStyle, p0: Vector2<f64>, p1: Vector2<f64>) -> Self {
        Self {
            style,
            p0,
            p1,
            dir: calc_direction(p0, p1),
            dist: (p1 - p0).norm(),
        }
    }

    #[inline]
    pub fn p0(&self) -> Vector2<f64> {
        self.p0
    }

    #[inline]
    pub fn p1(&self) -> Vector2<f64> {
        self.p1
    }

    #[inline]
    pub fn dir(&self) -> Vector2<f64> {
        self.dir
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.dist
    }
}

impl Guide for LineGuide {
    fn style(&self) -> &GuideStyle {
        &self.style
    }

    fn transform_point(&self, point: &TrackPoint) -> TrackPoint {
        let t = (point.position - self.p0).dot(&self.dir).clamp(0.0, self.dist);
        point.with_position(self.p0 + self.dir * t)
    }

    fn draw(&self, backend: &mut dyn DrawBackend, active: bool, enabled: bool) {
        draw_line(backend, &self.style, self.p0, self.p1, (true, true), active, enabled);
    }
}

/// Half-line from `p0` through `p1`; snapping clamps at `p0` only.
#[derive(Clone, Debug, PartialEq)]
pub struct RayGuide {
    style: GuideStyle,
    p0: Vector2<f64>,
    p1: Vector2<f64>,
    dir: Vector2<f64>,
}

impl RayGuide {
    pub fn new(style: GuideStyle, p0: Vector2<f64>, p1: Vector2<f64>) -> Self {
        Self {
            style,
            p0,
            p1,
            dir: calc_direction(p0, p1),
        }
    }

    #[inline]
    pub fn p0(&self) -> Vector2<f64> {
        self.p0
    }

    #[inline]
    pub fn p1(&self) -> Vector2<f64> {
        self.p1
    }

    #[inline]
    pub fn dir(&self) -> Vector2<f64> {
        self.dir
    }
}

impl Guide for RayGuide {
    fn style(&self) -> &GuideStyle {
        &self.style
    }

    fn transform_point(&self, point: &TrackPoint) -> TrackPoint {
        let t = (point.position - self.p0).dot(&self.dir).max(0.0);
        point.with_position(self.p0 + self.dir * t)
    }

    fn draw(&self, backend: &mut dyn DrawBackend, active: bool, enabled: bool) {
        draw_line(backend, &self.style, self.p0, self.p1, (true, false), active, enabled);
    }
}

/// Line through `p0` and `p1`, unbounded both ways.
#[derive(Clone, Debug, PartialEq)]
pub struct InfiniteLineGuide {
    style: GuideStyle,
    p0: Vector2<f64>,
    p1: Vector2<f64>,
    dir: Vector2<f64>,
}

impl InfiniteLineGuide {
    pub fn new(style: GuideStyle, p0: Vector2<f64>, p1: Vector2<f64>) -> Self {
        Self {
            style,
            p0,
            p1,
            dir: calc_direction(p0, p1),
        }
    }

    #[inline]
    pub fn p0(&self) -> Vector2<f64> {
        self.p0
    }

    #[inline]
    pub fn p1(&self) -> Vector2<f64> {
        self.p1
    }

    #[inline]
    pub fn dir(&self) -> Vector2<f64> {
        self.dir
    }
}

impl Guide for InfiniteLineGuide {
    fn style(&self) -> &GuideStyle {
        &self.style
    }

    fn transform_point(&self, point: &TrackPoint) -> TrackPoint {
        let t = (point.position - self.p0).dot(&self.dir);
        point.with_position(self.p0 + self.dir * t)
    }

    fn draw(&self, backend: &mut dyn DrawBackend, active: bool, enabled: bool) {
        draw_line(backend, &self.style, self.p0, self.p1, (false, false), active, enabled);
    }
}
