use nalgebra::Vector2;

use super::GuideStyle;
use crate::affine::{Affine2, Affine4, Rect2};
use crate::cfg::{ALPHA_ACTIVE, ALPHA_DISABLED_FACTOR, ALPHA_INACTIVE};

/// World → normalized clip space (`[-1, 1]²`), with its inverse.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub matrix: Affine2,
    pub matrix_inv: Affine2,
}

impl Viewport {
    pub fn new(matrix: Affine2) -> Self {
        Self {
            matrix,
            matrix_inv: matrix.inv(),
        }
    }

    /// Collapse `projection ∘ modelview` onto the `z = 0` plane.
    pub fn from_gl(modelview: &Affine4, projection: &Affine4) -> Self {
        Self::new((*projection * *modelview).get2d(0.0))
    }

    /// Map the world rectangle `rect` onto `[-1, 1]²`.
    pub fn from_world_rect(rect: &Rect2) -> Self {
        let scale = Affine2::scale(2.0 / rect.width(), 2.0 / rect.height());
        Self::new(scale * Affine2::translation(-rect.center()))
    }
}

/// What the guideline geometry needs from a renderer.
pub trait DrawBackend {
    fn viewport(&self) -> Viewport;

    /// Squared size of one screen pixel in world units.
    fn pixel_size_squared(&self) -> f64;

    /// Draw a world-space segment with opacity ramping from `alpha0` to `alpha1`.
    fn draw_segment(
        &mut self,
        p0: Vector2<f64>,
        p1: Vector2<f64>,
        pixel_size: f64,
        alpha0: f64,
        alpha1: f64,
    );
}

/// Opacity of a guideline's segments.
pub fn segment_alpha(style: &GuideStyle, active: bool, enabled: bool) -> f64 {
    let base = if active { ALPHA_ACTIVE } else { ALPHA_INACTIVE };
    if style.enabled && enabled {
        base
    } else {
        base * ALPHA_DISABLED_FACTOR
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawnSegment {
    pub p0: Vector2<f64>,
    pub p1: Vector2<f64>,
    pub pixel_size: f64,
    pub alpha0: f64,
    pub alpha1: f64,
}

/// Backend that keeps every segment it is asked to draw.
#[derive(Clone, Debug)]
pub struct RecordingBackend {
    viewport: Viewport,
    pixel_size: f64,
    pub segments: Vec<DrawnSegment>,
}

impl RecordingBackend {
    pub fn new(viewport: Viewport, pixel_size: f64) -> Self {
        Self {
            viewport,
            pixel_size,
            segments: Vec::new(),
        }
    }

    /// Total polyline length of the recorded segments.
    pub fn total_length(&self) -> f64 {
        self.segments.iter().map(|s| (s.p1 - s.p0).norm()).sum()
    }
}

impl DrawBackend for RecordingBackend {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn pixel_size_squared(&self) -> f64 {
        self.pixel_size * self.pixel_size
    }

    fn draw_segment(
        &mut self,
        p0: Vector2<f64>,
        p1: Vector2<f64>,
        pixel_size: f64,
        alpha0: f64,
        alpha1: f64,
    ) {
        self.segments.push(DrawnSegment {
            p0,
            p1,
            pixel_size,
            alpha0,
            alpha1,
        });
    }
}
