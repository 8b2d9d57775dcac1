use nalgebra::Vector2;

/// Axis-aligned rectangle `[x0, x1] × [y0, y1]`.
///
/// A rectangle is empty when it is a single point or inverted on either axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect2 {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Rect2 {
    /// Sentinel for "everything"; affine maps leave it untouched.
    pub const INFINITE: Rect2 = Rect2 {
        x0: -f64::MAX,
        y0: -f64::MAX,
        x1: f64::MAX,
        y1: f64::MAX,
    };

    /// Normalized clip space `[-1, 1]²`.
    pub const UNIT_CLIP: Rect2 = Rect2 {
        x0: -1.0,
        y0: -1.0,
        x1: 1.0,
        y1: 1.0,
    };

    #[inline]
    pub const fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Smallest rectangle containing both points.
    #[inline]
    pub fn from_points(a: Vector2<f64>, b: Vector2<f64>) -> Self {
        Self {
            x0: a.x.min(b.x),
            y0: a.y.min(b.y),
            x1: a.x.max(b.x),
            y1: a.y.max(b.y),
        }
    }

    #[inline]
    pub fn add_point(&mut self, p: Vector2<f64>) {
        self.x0 = self.x0.min(p.x);
        self.y0 = self.y0.min(p.y);
        self.x1 = self.x1.max(p.x);
        self.y1 = self.y1.max(p.y);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        (self.x0 == self.x1 && self.y0 == self.y1) || self.x0 > self.x1 || self.y0 > self.y1
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    #[inline]
    pub fn p00(&self) -> Vector2<f64> {
        Vector2::new(self.x0, self.y0)
    }
    #[inline]
    pub fn p01(&self) -> Vector2<f64> {
        Vector2::new(self.x0, self.y1)
    }
    #[inline]
    pub fn p10(&self) -> Vector2<f64> {
        Vector2::new(self.x1, self.y0)
    }
    #[inline]
    pub fn p11(&self) -> Vector2<f64> {
        Vector2::new(self.x1, self.y1)
    }

    #[inline]
    pub fn center(&self) -> Vector2<f64> {
        Vector2::new(0.5 * (self.x0 + self.x1), 0.5 * (self.y0 + self.y1))
    }

    /// Overlap of two rectangles; may come out inverted (hence empty).
    #[inline]
    pub fn intersection(&self, other: &Rect2) -> Rect2 {
        Rect2 {
            x0: self.x0.max(other.x0),
            y0: self.y0.max(other.y0),
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
        }
    }

    /// Grow by `d` on every side.
    #[inline]
    pub fn enlarge(&self, d: f64) -> Rect2 {
        Rect2 {
            x0: self.x0 - d,
            y0: self.y0 - d,
            x1: self.x1 + d,
            y1: self.y1 + d,
        }
    }

    #[inline]
    pub fn contains(&self, p: Vector2<f64>) -> bool {
        self.x0 <= p.x && p.x <= self.x1 && self.y0 <= p.y && p.y <= self.y1
    }
}
