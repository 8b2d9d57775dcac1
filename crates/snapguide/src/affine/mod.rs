//! Affine transforms in 2D, plus 3×3 / 4×4 matrices that project down to 2D.
//!
//! Purpose
//! - `Affine2` is the workhorse: guidelines, viewports, and clip rectangles
//!   are all moved around with it.
//! - `Affine3` and `Affine4` model the homogeneous matrices a rendering
//!   backend hands over (modelview, projection); `get2d` collapses them to
//!   the effective `Affine2` at a given depth.
//!
//! Conventions
//! - Column vectors: `p' = M p + t`. `a * b` applies `b` first.
//! - `Affine2` coefficients read row-major as `(a11, a12, a13, a21, a22, a23)`
//!   where `a13`, `a23` are the translation.
//! - `inv()` never fails: degenerate inputs yield a saturated (2D) or zero
//!   (3D/4D) matrix. `Affine2::try_inverse` is the checked variant.
//!
//! References
//! - Code cross-refs: `Rect2`, `guide::Viewport`, `guide::EllipseGuide`

mod affine2;
mod affine3;
mod affine4;
mod rect;

pub use affine2::Affine2;
pub use affine3::Affine3;
pub use affine4::Affine4;
pub use rect::Rect2;

#[cfg(test)]
mod tests;
