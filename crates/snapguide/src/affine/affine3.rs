use std::ops::Mul;

use nalgebra::{Matrix3, Vector3};

use super::Affine2;
use crate::cfg::DET_EPS;

/// Homogeneous 3×3 matrix acting on `(x, y, w)` column vectors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine3 {
    pub m: Matrix3<f64>,
}

impl Default for Affine3 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Affine3 {
    #[inline]
    pub fn new(m: Matrix3<f64>) -> Self {
        Self { m }
    }

    #[inline]
    pub fn identity() -> Self {
        Self {
            m: Matrix3::identity(),
        }
    }

    #[inline]
    pub fn zero() -> Self {
        Self {
            m: Matrix3::zeros(),
        }
    }

    #[inline]
    pub fn translation2d(x: f64, y: f64) -> Self {
        Self::new(Matrix3::new(1.0, 0.0, x, 0.0, 1.0, y, 0.0, 0.0, 1.0))
    }

    #[inline]
    pub fn scale2d(sx: f64, sy: f64) -> Self {
        Self::new(Matrix3::new(sx, 0.0, 0.0, 0.0, sy, 0.0, 0.0, 0.0, 1.0))
    }

    /// Counterclockwise rotation in the `xy` plane by `angle` radians.
    #[inline]
    pub fn rotation2d(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new(Matrix3::new(c, -s, 0.0, s, c, 0.0, 0.0, 0.0, 1.0))
    }

    /// Embed a 2D affine map.
    #[inline]
    pub fn from_affine2(a: &Affine2) -> Self {
        let [a11, a12, a13, a21, a22, a23] = a.coeffs();
        Self::new(Matrix3::new(a11, a12, a13, a21, a22, a23, 0.0, 0.0, 1.0))
    }

    /// Rows 0 and 1; the projective row is dropped.
    #[inline]
    pub fn get2d(&self) -> Affine2 {
        let m = &self.m;
        Affine2::from_coeffs(
            m[(0, 0)],
            m[(0, 1)],
            m[(0, 2)],
            m[(1, 0)],
            m[(1, 1)],
            m[(1, 2)],
        )
    }

    pub fn determinant(&self) -> f64 {
        let a = &self.m;
        a[(0, 0)] * (a[(1, 1)] * a[(2, 2)] - a[(1, 2)] * a[(2, 1)])
            + a[(0, 1)] * (a[(1, 2)] * a[(2, 0)] - a[(1, 0)] * a[(2, 2)])
            + a[(0, 2)] * (a[(1, 0)] * a[(2, 1)] - a[(1, 1)] * a[(2, 0)])
    }

    /// Cofactor inverse; the zero matrix when `|det| <= DET_EPS`.
    pub fn inv(&self) -> Self {
        let a = &self.m;
        let c00 = a[(1, 1)] * a[(2, 2)] - a[(1, 2)] * a[(2, 1)];
        let c01 = a[(1, 2)] * a[(2, 0)] - a[(1, 0)] * a[(2, 2)];
        let c02 = a[(1, 0)] * a[(2, 1)] - a[(1, 1)] * a[(2, 0)];
        let det = a[(0, 0)] * c00 + a[(0, 1)] * c01 + a[(0, 2)] * c02;
        if det.abs() <= DET_EPS {
            return Self::zero();
        }
        let d = 1.0 / det;
        Self::new(Matrix3::new(
            c00 * d,
            (a[(0, 2)] * a[(2, 1)] - a[(0, 1)] * a[(2, 2)]) * d,
            (a[(0, 1)] * a[(1, 2)] - a[(0, 2)] * a[(1, 1)]) * d,
            c01 * d,
            (a[(0, 0)] * a[(2, 2)] - a[(0, 2)] * a[(2, 0)]) * d,
            (a[(0, 2)] * a[(1, 0)] - a[(0, 0)] * a[(1, 2)]) * d,
            c02 * d,
            (a[(0, 1)] * a[(2, 0)] - a[(0, 0)] * a[(2, 1)]) * d,
            (a[(0, 0)] * a[(1, 1)] - a[(0, 1)] * a[(1, 0)]) * d,
        ))
    }

    #[inline]
    pub fn transform(&self, v: Vector3<f64>) -> Vector3<f64> {
        self.m * v
    }
}

impl Mul for Affine3 {
    type Output = Affine3;
    #[inline]
    fn mul(self, rhs: Affine3) -> Affine3 {
        Affine3::new(self.m * rhs.m)
    }
}

impl Mul<Vector3<f64>> for Affine3 {
    type Output = Vector3<f64>;
    #[inline]
    fn mul(self, rhs: Vector3<f64>) -> Vector3<f64> {
        self.transform(rhs)
    }
}
