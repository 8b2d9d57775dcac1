use nalgebra::Vector2;

use super::{Guide, Guideline, Track};
use crate::affine::Affine2;
use crate::cfg::{EPS, SNAP_LENGTH, SNAP_SCALE};

/// Score of a track against one guideline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackWeight {
    /// Weighted mean screen-space deviation; `INFINITY` when the track is
    /// too short to say anything.
    pub weight: f64,
    /// The scored window lies entirely within the fixed part of the track.
    pub long_enough: bool,
}

impl TrackWeight {
    pub const UNKNOWN: TrackWeight = TrackWeight {
        weight: f64::INFINITY,
        long_enough: false,
    };
}

/// Bell curve over `ln(x)` peaking at `x0`; not normalized.
fn log_normal_unscaled(x: f64, x0: f64, width: f64) -> f64 {
    let t = (x / x0).ln() / width;
    (-0.5 * t * t).exp()
}

/// Walk the first `2 * SNAP_LENGTH` screen pixels of `track` and average the
/// distance between each sample and its nearest guideline point, weighting
/// steps by length and by a log-normal window centred at `SNAP_LENGTH`.
pub(crate) fn calc_track_weight<G: Guide + ?Sized>(
    guide: &G,
    track: &Track,
    to_screen: &Affine2,
) -> TrackWeight {
    if track.len() < 2 {
        return TrackWeight::UNKNOWN;
    }
    let max_length = 2.0 * SNAP_LENGTH * SNAP_SCALE;
    let mut sum_weight = 0.0;
    let mut sum_length = 0.0;
    let mut sum_deviation = 0.0;
    let mut long_enough = false;
    let mut prev: Vector2<f64> = to_screen.transform_point(track.points[0].position);
    for (i, tp) in track.points.iter().enumerate() {
        let p = to_screen.transform_point(tp.position);
        let length = (p - prev).norm();
        sum_length += length;
        let mid = sum_length - 0.5 * length;
        if mid > EPS {
            let weight = length * log_normal_unscaled(mid, SNAP_LENGTH, SNAP_SCALE);
            let snapped = to_screen.transform_point(guide.nearest_point(tp.position));
            sum_weight += weight;
            sum_deviation += weight * (snapped - p).norm();
        }
        prev = p;
        if sum_length >= max_length {
            long_enough = i < track.fixed;
            break;
        }
    }
    if sum_weight <= EPS {
        return TrackWeight::UNKNOWN;
    }
    TrackWeight {
        weight: sum_deviation / sum_weight,
        long_enough,
    }
}

/// The enabled guideline that `track` follows most closely (lowest weight,
/// earliest on ties), or `None` when no guideline has a finite weight.
pub fn find_best<'a>(
    guidelines: &'a [Guideline],
    track: &Track,
    to_screen: &Affine2,
) -> Option<(&'a Guideline, TrackWeight)> {
    let mut best: Option<(&Guideline, TrackWeight)> = None;
    for g in guidelines.iter().filter(|g| g.style().enabled) {
        let w = g.calc_track_weight(track, to_screen);
        if !w.weight.is_finite() {
            continue;
        }
        if best.map_or(true, |(_, b)| w.weight < b.weight) {
            best = Some((g, w));
        }
    }
    if let Some((g, w)) = best {
        tracing::debug!(
            kind = g.kind(),
            weight = w.weight,
            long_enough = w.long_enough,
            candidates = guidelines.len(),
            "best guideline"
        );
    }
    best
}
