//! Reproducible random inputs for tests, benchmarks and CLI demos.
//!
//! Model
//! - Every draw takes a replay token `(seed, index)` mixed into a single RNG,
//!   so any individual sample can be regenerated from its token alone.
//! - Affine maps are kept well-conditioned (bounded scales and shear) so that
//!   inverses stay meaningful at `1e-9` tolerances.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::affine::Affine2;
use crate::angle::{Angle, AngleRangeSet};
use crate::guide::{
    EllipseGuide, GuideStyle, Guideline, InfiniteLineGuide, LineGuide, RayGuide, Track,
};

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    pub fn new(seed: u64, index: u64) -> Self {
        Self { seed, index }
    }

    /// Token for the next sample of the same stream.
    #[inline]
    pub fn next_index(self) -> Self {
        Self {
            index: self.index.wrapping_add(1),
            ..self
        }
    }

    #[inline]
    pub fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Affine sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct AffineCfg {
    /// Axis scales are drawn from `[scale_min, scale_max]`.
    pub scale_min: f64,
    pub scale_max: f64,
    /// Translation components are drawn from `[-translate, translate]`.
    pub translate: f64,
    /// Shear factor drawn from `[-shear, shear]`.
    pub shear: f64,
    /// Allow orientation-reversing maps.
    pub allow_flip: bool,
}

impl Default for AffineCfg {
    fn default() -> Self {
        Self {
            scale_min: 0.25,
            scale_max: 4.0,
            translate: 10.0,
            shear: 0.5,
            allow_flip: true,
        }
    }
}

/// `translation · rotation · shear · scale` with every factor drawn from `cfg`.
pub fn random_affine(cfg: AffineCfg, tok: ReplayToken) -> Affine2 {
    let mut rng = tok.to_std_rng();
    let lo = cfg.scale_min.max(1e-6);
    let hi = cfg.scale_max.max(lo);
    let mut sx = rng.gen_range(lo..=hi);
    let sy = rng.gen_range(lo..=hi);
    if cfg.allow_flip && rng.gen_bool(0.5) {
        sx = -sx;
    }
    let sh = if cfg.shear > 0.0 {
        rng.gen_range(-cfg.shear..=cfg.shear)
    } else {
        0.0
    };
    let angle = rng.gen_range(-std::f64::consts::PI..std::f64::consts::PI);
    let t = if cfg.translate > 0.0 {
        Vector2::new(
            rng.gen_range(-cfg.translate..=cfg.translate),
            rng.gen_range(-cfg.translate..=cfg.translate),
        )
    } else {
        Vector2::zeros()
    };
    Affine2::translation(t)
        * Affine2::rotation(angle)
        * Affine2::from_coeffs(1.0, sh, 0.0, 0.0, 1.0, 0.0)
        * Affine2::scale(sx, sy)
}

/// Union of up to `max_arcs` random arcs; may come out empty or full.
pub fn random_range_set(max_arcs: usize, tok: ReplayToken) -> AngleRangeSet {
    let mut rng = tok.to_std_rng();
    let mut set = AngleRangeSet::new();
    let n = rng.gen_range(0..=max_arcs);
    for _ in 0..n {
        let a0 = Angle(rng.gen());
        let a1 = Angle(rng.gen());
        if rng.gen_bool(0.25) {
            set.subtract(a0, a1);
        } else {
            set.add(a0, a1);
        }
    }
    set
}

/// A random guideline of any shape inside `[-extent, extent]²`.
pub fn random_guideline(extent: f64, tok: ReplayToken) -> Guideline {
    let mut rng = tok.to_std_rng();
    let e = extent.abs().max(1e-6);
    let point = |rng: &mut StdRng| Vector2::new(rng.gen_range(-e..=e), rng.gen_range(-e..=e));
    let p0 = point(&mut rng);
    let p1 = point(&mut rng);
    let style = GuideStyle::default();
    match rng.gen_range(0..4u8) {
        0 => LineGuide::new(style, p0, p1).into(),
        1 => RayGuide::new(style, p0, p1).into(),
        2 => InfiniteLineGuide::new(style, p0, p1).into(),
        _ => {
            let rx = rng.gen_range(0.1 * e..=e);
            let ry = rng.gen_range(0.1 * e..=e);
            let deg = rng.gen_range(-180.0..180.0);
            EllipseGuide::from_center_radii(style, p0, rx, ry, deg).into()
        }
    }
}

/// `n` fixed samples evenly spaced from `p0` to `p1`, each displaced by up to
/// `noise` along both axes.
pub fn jittered_track(
    p0: Vector2<f64>,
    p1: Vector2<f64>,
    n: usize,
    noise: f64,
    tok: ReplayToken,
) -> Track {
    let mut rng = tok.to_std_rng();
    let noise = noise.abs();
    let steps = n.max(2) - 1;
    Track::from_positions((0..=steps).map(|i| {
        let t = i as f64 / steps as f64;
        let jitter = if noise > 0.0 {
            Vector2::new(rng.gen_range(-noise..=noise), rng.gen_range(-noise..=noise))
        } else {
            Vector2::zeros()
        };
        p0 + (p1 - p0) * t + jitter
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replay_is_deterministic() {
        let tok = ReplayToken::new(42, 7);
        let a = random_affine(AffineCfg::default(), tok);
        let b = random_affine(AffineCfg::default(), tok);
        assert_eq!(a, b);
        let c = random_affine(AffineCfg::default(), tok.next_index());
        assert_ne!(a, c);
        assert_eq!(random_range_set(6, tok), random_range_set(6, tok));
        assert_eq!(random_guideline(5.0, tok), random_guideline(5.0, tok));
    }

    #[test]
    fn affine_samples_are_invertible() {
        for i in 0..64 {
            let a = random_affine(AffineCfg::default(), ReplayToken::new(3, i));
            assert!(a.determinant().abs() > 1e-3);
            let p = Vector2::new(0.3, -1.7);
            let q = a.inv().transform_point(a.transform_point(p));
            assert!((p - q).norm() < 1e-9);
        }
    }

    #[test]
    fn range_sets_are_well_formed() {
        for i in 0..64 {
            let s = random_range_set(8, ReplayToken::new(9, i));
            assert!(s.check());
        }
    }

    #[test]
    fn jittered_track_stays_near_the_chord() {
        let p0 = Vector2::new(0.0, 0.0);
        let p1 = Vector2::new(10.0, 0.0);
        let t = jittered_track(p0, p1, 11, 0.1, ReplayToken::new(1, 0));
        assert_eq!(t.len(), 11);
        assert_eq!(t.fixed, 11);
        for (i, tp) in t.points.iter().enumerate() {
            assert!((tp.position.x - i as f64).abs() <= 0.1 + 1e-12);
            assert!(tp.position.y.abs() <= 0.1 + 1e-12);
        }
    }
}
