use std::ops::Mul;

use nalgebra::{Matrix4, Vector3, Vector4};

use super::{Affine2, Affine3};
use crate::cfg::{DET_EPS, EPS};

/// Homogeneous 4×4 matrix acting on `(x, y, z, w)` column vectors, as used
/// for modelview and projection matrices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine4 {
    pub m: Matrix4<f64>,
}

impl Default for Affine4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Affine4 {
    #[inline]
    pub fn new(m: Matrix4<f64>) -> Self {
        Self { m }
    }

    #[inline]
    pub fn identity() -> Self {
        Self {
            m: Matrix4::identity(),
        }
    }

    #[inline]
    pub fn zero() -> Self {
        Self {
            m: Matrix4::zeros(),
        }
    }

    #[inline]
    pub fn translation(x: f64, y: f64, z: f64) -> Self {
        let mut m = Matrix4::identity();
        m[(0, 3)] = x;
        m[(1, 3)] = y;
        m[(2, 3)] = z;
        Self { m }
    }

    #[inline]
    pub fn scale(sx: f64, sy: f64, sz: f64) -> Self {
        Self {
            m: Matrix4::from_diagonal(&Vector4::new(sx, sy, sz, 1.0)),
        }
    }

    /// Counterclockwise rotation by `angle` radians about `axis` (right-hand rule).
    /// A zero-length axis gives the identity.
    pub fn rotation(axis: Vector3<f64>, angle: f64) -> Self {
        let len2 = axis.norm_squared();
        if len2 <= EPS * EPS {
            return Self::identity();
        }
        let k = axis / len2.sqrt();
        let (s, c) = angle.sin_cos();
        let ic = 1.0 - c;
        let (x, y, z) = (k.x, k.y, k.z);
        Self::new(Matrix4::new(
            c + x * x * ic,
            x * y * ic - z * s,
            x * z * ic + y * s,
            0.0,
            y * x * ic + z * s,
            c + y * y * ic,
            y * z * ic - x * s,
            0.0,
            z * x * ic - y * s,
            z * y * ic + x * s,
            c + z * z * ic,
            0.0,
            0.0,
            0.0,
            0.0,
            1.0,
        ))
    }

    #[inline]
    pub fn rotation_x(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Matrix4::identity();
        m[(1, 1)] = c;
        m[(1, 2)] = -s;
        m[(2, 1)] = s;
        m[(2, 2)] = c;
        Self { m }
    }

    #[inline]
    pub fn rotation_y(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Matrix4::identity();
        m[(0, 0)] = c;
        m[(0, 2)] = s;
        m[(2, 0)] = -s;
        m[(2, 2)] = c;
        Self { m }
    }

    #[inline]
    pub fn rotation_z(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Matrix4::identity();
        m[(0, 0)] = c;
        m[(0, 1)] = -s;
        m[(1, 0)] = s;
        m[(1, 1)] = c;
        Self { m }
    }

    /// Embed a 2D affine map acting on `x, y` (z and w untouched).
    pub fn from_affine2(a: &Affine2) -> Self {
        let [a11, a12, a13, a21, a22, a23] = a.coeffs();
        let mut m = Matrix4::identity();
        m[(0, 0)] = a11;
        m[(0, 1)] = a12;
        m[(0, 3)] = a13;
        m[(1, 0)] = a21;
        m[(1, 1)] = a22;
        m[(1, 3)] = a23;
        Self { m }
    }

    /// Effective 2D map on the plane `z = const`, ignoring the projective row.
    #[inline]
    pub fn get2d(&self, z: f64) -> Affine2 {
        let m = &self.m;
        Affine2::from_coeffs(
            m[(0, 0)],
            m[(0, 1)],
            z * m[(0, 2)] + m[(0, 3)],
            m[(1, 0)],
            m[(1, 1)],
            z * m[(1, 2)] + m[(1, 3)],
        )
    }

    /// Homogeneous 2D map on the plane `z = const`, keeping the projective row.
    #[inline]
    pub fn get2d_persp(&self, z: f64) -> Affine3 {
        let m = &self.m;
        Affine3::new(nalgebra::Matrix3::new(
            m[(0, 0)],
            m[(0, 1)],
            z * m[(0, 2)] + m[(0, 3)],
            m[(1, 0)],
            m[(1, 1)],
            z * m[(1, 2)] + m[(1, 3)],
            m[(3, 0)],
            m[(3, 1)],
            z * m[(3, 2)] + m[(3, 3)],
        ))
    }

    /// 2×2 minors of the top and bottom row pairs, shared by `determinant` and `inv`.
    fn minors(&self) -> ([f64; 6], [f64; 6]) {
        let a = &self.m;
        let s = [
            a[(0, 0)] * a[(1, 1)] - a[(1, 0)] * a[(0, 1)],
            a[(0, 0)] * a[(1, 2)] - a[(1, 0)] * a[(0, 2)],
            a[(0, 0)] * a[(1, 3)] - a[(1, 0)] * a[(0, 3)],
            a[(0, 1)] * a[(1, 2)] - a[(1, 1)] * a[(0, 2)],
            a[(0, 1)] * a[(1, 3)] - a[(1, 1)] * a[(0, 3)],
            a[(0, 2)] * a[(1, 3)] - a[(1, 2)] * a[(0, 3)],
        ];
        let c = [
            a[(2, 0)] * a[(3, 1)] - a[(3, 0)] * a[(2, 1)],
            a[(2, 0)] * a[(3, 2)] - a[(3, 0)] * a[(2, 2)],
            a[(2, 0)] * a[(3, 3)] - a[(3, 0)] * a[(2, 3)],
            a[(2, 1)] * a[(3, 2)] - a[(3, 1)] * a[(2, 2)],
            a[(2, 1)] * a[(3, 3)] - a[(3, 1)] * a[(2, 3)],
            a[(2, 2)] * a[(3, 3)] - a[(3, 2)] * a[(2, 3)],
        ];
        (s, c)
    }

    pub fn determinant(&self) -> f64 {
        let (s, c) = self.minors();
        s[0] * c[5] - s[1] * c[4] + s[2] * c[3] + s[3] * c[2] - s[4] * c[1] + s[5] * c[0]
    }

    /// Cofactor inverse; the zero matrix when `|det| <= DET_EPS`.
    pub fn inv(&self) -> Self {
        let (s, c) = self.minors();
        let det =
            s[0] * c[5] - s[1] * c[4] + s[2] * c[3] + s[3] * c[2] - s[4] * c[1] + s[5] * c[0];
        if det.abs() <= DET_EPS {
            return Self::zero();
        }
        let d = 1.0 / det;
        let a = &self.m;
        Self::new(Matrix4::new(
            (a[(1, 1)] * c[5] - a[(1, 2)] * c[4] + a[(1, 3)] * c[3]) * d,
            (-a[(0, 1)] * c[5] + a[(0, 2)] * c[4] - a[(0, 3)] * c[3]) * d,
            (a[(3, 1)] * s[5] - a[(3, 2)] * s[4] + a[(3, 3)] * s[3]) * d,
            (-a[(2, 1)] * s[5] + a[(2, 2)] * s[4] - a[(2, 3)] * s[3]) * d,
            (-a[(1, 0)] * c[5] + a[(1, 2)] * c[2] - a[(1, 3)] * c[1]) * d,
            (a[(0, 0)] * c[5] - a[(0, 2)] * c[2] + a[(0, 3)] * c[1]) * d,
            (-a[(3, 0)] * s[5] + a[(3, 2)] * s[2] - a[(3, 3)] * s[1]) * d,
            (a[(2, 0)] * s[5] - a[(2, 2)] * s[2] + a[(2, 3)] * s[1]) * d,
            (a[(1, 0)] * c[4] - a[(1, 1)] * c[2] + a[(1, 3)] * c[0]) * d,
            (-a[(0, 0)] * c[4] + a[(0, 1)] * c[2] - a[(0, 3)] * c[0]) * d,
            (a[(3, 0)] * s[4] - a[(3, 1)] * s[2] + a[(3, 3)] * s[0]) * d,
            (-a[(2, 0)] * s[4] + a[(2, 1)] * s[2] - a[(2, 3)] * s[0]) * d,
            (-a[(1, 0)] * c[3] + a[(1, 1)] * c[1] - a[(1, 2)] * c[0]) * d,
            (a[(0, 0)] * c[3] - a[(0, 1)] * c[1] + a[(0, 2)] * c[0]) * d,
            (-a[(3, 0)] * s[3] + a[(3, 1)] * s[1] - a[(3, 2)] * s[0]) * d,
            (a[(2, 0)] * s[3] - a[(2, 1)] * s[1] + a[(2, 2)] * s[0]) * d,
        ))
    }

    #[inline]
    pub fn transform(&self, v: Vector4<f64>) -> Vector4<f64> {
        self.m * v
    }
}

impl Mul for Affine4 {
    type Output = Affine4;
    #[inline]
    fn mul(self, rhs: Affine4) -> Affine4 {
        Affine4::new(self.m * rhs.m)
    }
}

impl Mul<Vector4<f64>> for Affine4 {
    type Output = Vector4<f64>;
    #[inline]
    fn mul(self, rhs: Vector4<f64>) -> Vector4<f64> {
        self.transform(rhs)
    }
}
