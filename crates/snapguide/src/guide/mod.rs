//! Snapping guidelines: lines, rays, infinite lines, and ellipses.
//!
//! Purpose
//! - Pull free-hand input towards geometric constraints (`transform_point`,
//!   `smooth_transform_point`, `nearest_point`).
//! - Pick the guideline a stroke is following (`find_best`).
//! - Draw each guideline only where it is visible in the viewport.
//!
//! Why this design
//! - The set of guideline shapes is closed, so `Guideline` is an enum and the
//!   shared behaviour sits in the `Guide` trait, dispatched by `match`.
//! - Drawing goes through the narrow `DrawBackend` trait: the geometry here
//!   decides *what* to draw, the backend decides how.
//!
//! References
//! - Code cross-refs: `AngleRangeSet` (visible arcs), `Affine2`, `solvers`

use nalgebra::Vector2;

use crate::affine::Affine2;

mod draw;
mod ellipse;
mod line;
mod parse;
mod score;
mod track;

pub use draw::{segment_alpha, DrawBackend, DrawnSegment, RecordingBackend, Viewport};
pub use ellipse::{calc_segments_count, find_nearest_point, truncate_ellipse, EllipseGuide};
pub use line::{
    calc_direction, truncate_infinite_line, truncate_line, truncate_ray, InfiniteLineGuide,
    LineGuide, RayGuide,
};
pub use parse::GuideParseError;
pub use score::{find_best, TrackWeight};
pub use track::{Track, TrackPoint};

/// RGBA color with components in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::new(0.0, 0.0, 0.0, 1.0);

    #[inline]
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }
}

/// Properties shared by every guideline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GuideStyle {
    pub enabled: bool,
    /// Pull strength in `[0, 1]`.
    pub magnetism: f64,
    pub color: Rgba,
}

impl GuideStyle {
    /// `magnetism` is clamped into `[0, 1]`.
    pub fn new(enabled: bool, magnetism: f64, color: Rgba) -> Self {
        Self {
            enabled,
            magnetism: magnetism.clamp(0.0, 1.0),
            color,
        }
    }
}

impl Default for GuideStyle {
    fn default() -> Self {
        Self::new(true, 1.0, Rgba::BLACK)
    }
}

/// Capability shared by all guideline shapes.
pub trait Guide {
    fn style(&self) -> &GuideStyle;

    /// Snap `point` onto the guideline. Only the position changes.
    fn transform_point(&self, point: &TrackPoint) -> TrackPoint;

    /// Closest point on the guideline. Shapes whose `transform_point` is not
    /// an orthogonal projection override this.
    fn nearest_point(&self, position: Vector2<f64>) -> Vector2<f64> {
        self.transform_point(&TrackPoint::at(position)).position
    }

    /// Emit the visible part of the guideline through `backend`.
    fn draw(&self, backend: &mut dyn DrawBackend, active: bool, enabled: bool);

    /// Blend between `point` and its snapped image by `magnetism` times the
    /// guideline's own magnetism. Disabled guidelines leave `point` alone.
    fn smooth_transform_point(&self, point: &TrackPoint, magnetism: f64) -> TrackPoint {
        let style = self.style();
        if !style.enabled {
            return *point;
        }
        point.lerp(&self.transform_point(point), magnetism * style.magnetism)
    }

    /// How well `track` follows this guideline; lower is better.
    fn calc_track_weight(&self, track: &Track, to_screen: &Affine2) -> TrackWeight {
        score::calc_track_weight(self, track, to_screen)
    }
}

/// Closed set of guideline shapes.
#[derive(Clone, Debug, PartialEq)]
pub enum Guideline {
    Line(LineGuide),
    Ray(RayGuide),
    InfiniteLine(InfiniteLineGuide),
    Ellipse(EllipseGuide),
}

impl Guideline {
    pub fn kind(&self) -> &'static str {
        match self {
            Guideline::Line(_) => "line",
            Guideline::Ray(_) => "ray",
            Guideline::InfiniteLine(_) => "infinite",
            Guideline::Ellipse(_) => "ellipse",
        }
    }

    fn as_guide(&self) -> &dyn Guide {
        match self {
            Guideline::Line(g) => g,
            Guideline::Ray(g) => g,
            Guideline::InfiniteLine(g) => g,
            Guideline::Ellipse(g) => g,
        }
    }
}

impl Guide for Guideline {
    fn style(&self) -> &GuideStyle {
        self.as_guide().style()
    }

    fn transform_point(&self, point: &TrackPoint) -> TrackPoint {
        self.as_guide().transform_point(point)
    }

    fn nearest_point(&self, position: Vector2<f64>) -> Vector2<f64> {
        self.as_guide().nearest_point(position)
    }

    fn draw(&self, backend: &mut dyn DrawBackend, active: bool, enabled: bool) {
        self.as_guide().draw(backend, active, enabled)
    }
}

impl From<LineGuide> for Guideline {
    fn from(g: LineGuide) -> Self {
        Guideline::Line(g)
    }
}

impl From<RayGuide> for Guideline {
    fn from(g: RayGuide) -> Self {
        Guideline::Ray(g)
    }
}

impl From<InfiniteLineGuide> for Guideline {
    fn from(g: InfiniteLineGuide) -> Self {
        Guideline::InfiniteLine(g)
    }
}

impl From<EllipseGuide> for Guideline {
    fn from(g: EllipseGuide) -> Self {
        Guideline::Ellipse(g)
    }
}
