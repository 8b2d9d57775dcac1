use std::ops::Mul;

use nalgebra::{Matrix2, Vector2};

use super::Rect2;
use crate::cfg::{are_almost_equal, SATURATED_INVERSE};

/// 2D affine map: `x ↦ M x + t`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine2 {
    pub m: Matrix2<f64>,
    pub t: Vector2<f64>,
}

impl Default for Affine2 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Affine2 {
    #[inline]
    pub fn new(m: Matrix2<f64>, t: Vector2<f64>) -> Self {
        Self { m, t }
    }

    #[inline]
    pub fn identity() -> Self {
        Self {
            m: Matrix2::identity(),
            t: Vector2::zeros(),
        }
    }

    /// Build from row-major coefficients `x' = a11 x + a12 y + a13`, `y' = a21 x + a22 y + a23`.
    #[inline]
    pub fn from_coeffs(a11: f64, a12: f64, a13: f64, a21: f64, a22: f64, a23: f64) -> Self {
        Self {
            m: Matrix2::new(a11, a12, a21, a22),
            t: Vector2::new(a13, a23),
        }
    }

    /// Row-major coefficients `[a11, a12, a13, a21, a22, a23]`.
    #[inline]
    pub fn coeffs(&self) -> [f64; 6] {
        [
            self.m[(0, 0)],
            self.m[(0, 1)],
            self.t.x,
            self.m[(1, 0)],
            self.m[(1, 1)],
            self.t.y,
        ]
    }

    #[inline]
    pub fn translation(v: Vector2<f64>) -> Self {
        Self {
            m: Matrix2::identity(),
            t: v,
        }
    }

    #[inline]
    pub fn scale(sx: f64, sy: f64) -> Self {
        Self::from_coeffs(sx, 0.0, 0.0, 0.0, sy, 0.0)
    }

    #[inline]
    pub fn scale_uniform(s: f64) -> Self {
        Self::scale(s, s)
    }

    /// Counterclockwise rotation by `angle` radians about the origin.
    #[inline]
    pub fn rotation(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_coeffs(c, -s, 0.0, s, c, 0.0)
    }

    /// Counterclockwise rotation by `degrees`.
    ///
    /// Integral multiples of 90° produce exact `0`/`±1` coefficients; for other
    /// angles a sine or cosine that rounds to `±1` forces its partner to `0`.
    pub fn rotation_degrees(degrees: f64) -> Self {
        let quarter_turn = degrees.fract() == 0.0
            && degrees.abs() < (i64::MAX / 2) as f64
            && (degrees as i64) % 90 == 0;
        let (sn, cs) = if quarter_turn {
            match (degrees as i64 / 90) & 3 {
                0 => (0.0, 1.0),
                1 => (1.0, 0.0),
                2 => (0.0, -1.0),
                _ => (-1.0, 0.0),
            }
        } else {
            let (mut sn, mut cs) = degrees.to_radians().sin_cos();
            if sn == 1.0 || sn == -1.0 {
                cs = 0.0;
            }
            if cs == 1.0 || cs == -1.0 {
                sn = 0.0;
            }
            (sn, cs)
        };
        Self::from_coeffs(cs, -sn, 0.0, sn, cs, 0.0)
    }

    /// Rotation by `degrees` about `center`.
    pub fn rotation_about(center: Vector2<f64>, degrees: f64) -> Self {
        Self::translation(center) * Self::rotation_degrees(degrees) * Self::translation(-center)
    }

    /// Axis scale about `center`.
    pub fn scale_about(center: Vector2<f64>, sx: f64, sy: f64) -> Self {
        Self::translation(center) * Self::scale(sx, sy) * Self::translation(-center)
    }

    #[inline]
    pub fn determinant(&self) -> f64 {
        self.m.determinant()
    }

    /// Inverse that never fails.
    ///
    /// Pure diagonal and pure anti-diagonal maps are inverted term by term,
    /// with a zero term replaced by `SATURATED_INVERSE`. Other singular maps
    /// produce non-finite coefficients.
    pub fn inv(&self) -> Self {
        let [a11, a12, a13, a21, a22, a23] = self.coeffs();
        let recip = |x: f64| if x == 0.0 { SATURATED_INVERSE } else { 1.0 / x };
        if a12 == 0.0 && a21 == 0.0 {
            let i11 = recip(a11);
            let i22 = recip(a22);
            return Self::from_coeffs(i11, 0.0, -a13 * i11, 0.0, i22, -a23 * i22);
        }
        if a11 == 0.0 && a22 == 0.0 {
            let i21 = recip(a21);
            let i12 = recip(a12);
            return Self::from_coeffs(0.0, i21, -a23 * i21, i12, 0.0, -a13 * i12);
        }
        let d = 1.0 / self.determinant();
        Self::from_coeffs(
            a22 * d,
            -a12 * d,
            (a12 * a23 - a22 * a13) * d,
            -a21 * d,
            a11 * d,
            (a21 * a13 - a11 * a23) * d,
        )
    }

    /// Checked inverse; `None` when the linear part is singular.
    #[inline]
    pub fn try_inverse(&self) -> Option<Self> {
        self.m.try_inverse().map(|minv| Self {
            m: minv,
            t: -minv * self.t,
        })
    }

    #[inline]
    pub fn transform_point(&self, p: Vector2<f64>) -> Vector2<f64> {
        self.m * p + self.t
    }

    /// Linear part only.
    #[inline]
    pub fn transform_direction(&self, v: Vector2<f64>) -> Vector2<f64> {
        self.m * v
    }

    /// Bounding box of the four transformed corners; `Rect2::INFINITE` is a fixpoint.
    pub fn transform_rect(&self, r: &Rect2) -> Rect2 {
        if *r == Rect2::INFINITE {
            return *r;
        }
        let corners = [r.p00(), r.p01(), r.p10(), r.p11()].map(|p| self.transform_point(p));
        let mut out = Rect2::from_points(corners[0], corners[1]);
        out.add_point(corners[2]);
        out.add_point(corners[3]);
        out
    }

    /// Same linear part, translated so that local `(u, v)` lands exactly on `(x, y)`.
    #[inline]
    pub fn place(&self, u: f64, v: f64, x: f64, y: f64) -> Self {
        self.place_points(Vector2::new(u, v), Vector2::new(x, y))
    }

    #[inline]
    pub fn place_points(&self, p_in: Vector2<f64>, p_out: Vector2<f64>) -> Self {
        Self {
            m: self.m,
            t: p_out - self.m * p_in,
        }
    }

    /// Sum of squared deviations from the identity is below `err`.
    pub fn is_identity(&self, err: f64) -> bool {
        let [a11, a12, a13, a21, a22, a23] = self.coeffs();
        (a11 - 1.0).powi(2) + (a22 - 1.0).powi(2) + a12 * a12 + a13 * a13 + a21 * a21 + a23 * a23
            < err
    }

    pub fn is_zero(&self, err: f64) -> bool {
        self.coeffs().iter().map(|c| c * c).sum::<f64>() <= err
    }

    /// Linear part is the identity within `err` (squared metric); any translation allowed.
    pub fn is_translation(&self, err: f64) -> bool {
        let [a11, a12, _, a21, a22, _] = self.coeffs();
        (a11 - 1.0).powi(2) + (a22 - 1.0).powi(2) + a12 * a12 + a21 * a21 <= err
    }

    /// Similarity (rotation + uniform scale) within `err`, compared per coefficient.
    pub fn is_isotropic(&self, err: f64) -> bool {
        let [a11, a12, _, a21, a22, _] = self.coeffs();
        are_almost_equal(a11, a22, err) && are_almost_equal(a12, -a21, err)
    }
}

impl Mul for Affine2 {
    type Output = Affine2;
    #[inline]
    fn mul(self, rhs: Affine2) -> Affine2 {
        Affine2 {
            m: self.m * rhs.m,
            t: self.m * rhs.t + self.t,
        }
    }
}

impl Mul<Vector2<f64>> for Affine2 {
    type Output = Vector2<f64>;
    #[inline]
    fn mul(self, rhs: Vector2<f64>) -> Vector2<f64> {
        self.transform_point(rhs)
    }
}

impl Mul<Rect2> for Affine2 {
    type Output = Rect2;
    #[inline]
    fn mul(self, rhs: Rect2) -> Rect2 {
        self.transform_rect(&rhs)
    }
}
