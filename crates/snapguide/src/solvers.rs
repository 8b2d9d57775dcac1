//! Closed-form polynomial roots up to degree four.
//!
//! Purpose
//! - Nearest-point queries on an ellipse reduce to a quartic in the unit-circle
//!   parameter; solving it in closed form keeps the query bounded-time.
//!
//! Model
//! - Roots are returned over `Complex<f64>` with multiplicity; callers filter
//!   the (almost) real ones.
//! - A leading coefficient that is negligible relative to the others drops the
//!   degree (quartic → cubic → quadratic → linear). The all-zero polynomial has
//!   no reported roots.
//! - Cubic: Cardano on the depressed cubic. Quartic: Ferrari with the
//!   largest-magnitude resolvent root; biquadratics are solved directly.
//! - Closed forms lose digits when the leading coefficient is small but not
//!   negligible. `polish` runs `POLISH_STEPS` Newton steps on the undepressed
//!   polynomial to win them back.
//!
//! References
//! - Code cross-refs: `guide::ellipse::find_nearest_point`

use nalgebra::Complex;

use crate::cfg::EPS;

type C64 = Complex<f64>;

/// `lead` is negligible next to `rest` (or exactly zero).
fn negligible(lead: f64, rest: &[f64]) -> bool {
    let scale = rest.iter().fold(0.0f64, |m, x| m.max(x.abs()));
    lead == 0.0 || lead.abs() <= EPS * scale
}

/// Roots of `a x + b = 0`; none when `a == 0`.
pub fn solve_linear(a: f64, b: f64) -> Vec<C64> {
    if a == 0.0 {
        return Vec::new();
    }
    vec![C64::new(-b / a, 0.0)]
}

/// Roots of `a x² + b x + c = 0`.
pub fn solve_quadratic(a: f64, b: f64, c: f64) -> Vec<C64> {
    if negligible(a, &[b, c]) {
        return solve_linear(b, c);
    }
    solve_quadratic_complex(C64::new(a, 0.0), C64::new(b, 0.0), C64::new(c, 0.0))
}

/// Quadratic with complex coefficients; `a` must be non-zero.
fn solve_quadratic_complex(a: C64, b: C64, c: C64) -> Vec<C64> {
    let s = (b * b - a * c * 4.0).sqrt();
    // pick the sign that avoids cancellation
    let q = if (b + s).norm() >= (b - s).norm() {
        -(b + s) * 0.5
    } else {
        -(b - s) * 0.5
    };
    if q.norm() == 0.0 {
        return vec![C64::new(0.0, 0.0); 2];
    }
    vec![q / a, c / q]
}

/// Roots of `a x³ + b x² + c x + d = 0`.
pub fn solve_cubic(a: f64, b: f64, c: f64, d: f64) -> Vec<C64> {
    if negligible(a, &[b, c, d]) {
        return solve_quadratic(b, c, d);
    }
    let (b, c, d) = (b / a, c / a, d / a);
    let shift = -b / 3.0;
    let p = c - b * b / 3.0;
    let q = 2.0 * b * b * b / 27.0 - b * c / 3.0 + d;
    let disc = C64::new(q * q / 4.0 + p * p * p / 27.0, 0.0).sqrt();
    let half_q = C64::new(-q / 2.0, 0.0);
    let u3 = if (half_q + disc).norm() >= (half_q - disc).norm() {
        half_q + disc
    } else {
        half_q - disc
    };
    if u3.norm() <= f64::MIN_POSITIVE {
        return vec![C64::new(shift, 0.0); 3];
    }
    let u = u3.powf(1.0 / 3.0);
    let omega = C64::new(-0.5, 3f64.sqrt() / 2.0);
    let mut roots = Vec::with_capacity(3);
    let mut uk = u;
    for _ in 0..3 {
        roots.push(uk - p / (uk * 3.0) + shift);
        uk *= omega;
    }
    roots
}

/// Roots of `a x⁴ + b x³ + c x² + d x + e = 0`.
pub fn solve_quartic(a: f64, b: f64, c: f64, d: f64, e: f64) -> Vec<C64> {
    if negligible(a, &[b, c, d, e]) {
        return solve_cubic(b, c, d, e);
    }
    let (b, c, d, e) = (b / a, c / a, d / a, e / a);
    let shift = -b / 4.0;
    // depressed: y⁴ + p y² + q y + r = 0, x = y - b/4
    let p = c - 3.0 * b * b / 8.0;
    let q = d - b * c / 2.0 + b * b * b / 8.0;
    let r = e - b * d / 4.0 + b * b * c / 16.0 - 3.0 * b * b * b * b / 256.0;

    let ys: Vec<C64> = if q.abs() <= EPS * EPS * (1.0 + p.abs() + r.abs()) {
        let mut ys = Vec::with_capacity(4);
        for z in solve_quadratic_complex(C64::new(1.0, 0.0), C64::new(p, 0.0), C64::new(r, 0.0)) {
            let y = z.sqrt();
            ys.push(y);
            ys.push(-y);
        }
        ys
    } else {
        // resolvent: 8m³ + 8p m² + (2p² - 8r) m - q² = 0; q ≠ 0 keeps m away from 0
        let m = solve_cubic(8.0, 8.0 * p, 2.0 * p * p - 8.0 * r, -q * q)
            .into_iter()
            .fold(C64::new(0.0, 0.0), |best, m| {
                if m.norm() > best.norm() {
                    m
                } else {
                    best
                }
            });
        let s = (m * 2.0).sqrt();
        let one = C64::new(1.0, 0.0);
        let base = m + p / 2.0;
        let tilt = q / (s * 2.0);
        let mut ys = solve_quadratic_complex(one, -s, base + tilt);
        ys.extend(solve_quadratic_complex(one, s, base - tilt));
        ys
    };
    ys.into_iter().map(|y| y + shift).collect()
}

/// Newton steps applied by `polish`.
pub const POLISH_STEPS: usize = 3;

/// Refine `roots` in place against `coeffs` (highest degree first).
///
/// Each root gets at most `POLISH_STEPS` Newton steps; a step that stalls on a
/// vanishing derivative or leaves the finite range is dropped.
pub fn polish(coeffs: &[f64], roots: &mut [C64]) {
    for z in roots.iter_mut() {
        for _ in 0..POLISH_STEPS {
            let mut f = C64::new(0.0, 0.0);
            let mut df = C64::new(0.0, 0.0);
            for &c in coeffs {
                df = df * *z + f;
                f = f * *z + c;
            }
            if df.norm() == 0.0 {
                break;
            }
            let next = *z - f / df;
            if !(next.re.is_finite() && next.im.is_finite()) {
                break;
            }
            *z = next;
        }
    }
}

/// Real parts of roots whose imaginary part is negligible.
pub fn real_roots(roots: &[C64]) -> Vec<f64> {
    roots
        .iter()
        .filter(|z| z.im.abs() < EPS * (1.0 + z.re.abs()))
        .map(|z| z.re)
        .collect()
}
