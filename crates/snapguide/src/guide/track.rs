use nalgebra::Vector2;

use crate::clock::ToolClock;

/// One pointer sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackPoint {
    pub position: Vector2<f64>,
    pub pressure: f64,
    pub tilt: Vector2<f64>,
    /// Seconds since the owning clock's origin.
    pub time: f64,
}

impl TrackPoint {
    /// A sample at `position` with neutral pressure and no tilt.
    #[inline]
    pub fn at(position: Vector2<f64>) -> Self {
        Self {
            position,
            pressure: 0.5,
            tilt: Vector2::zeros(),
            time: 0.0,
        }
    }

    #[inline]
    pub fn with_position(&self, position: Vector2<f64>) -> Self {
        Self { position, ..*self }
    }

    /// Field-wise linear interpolation, `t = 0` gives `self`.
    #[inline]
    pub fn lerp(&self, other: &TrackPoint, t: f64) -> TrackPoint {
        TrackPoint {
            position: self.position + (other.position - self.position) * t,
            pressure: self.pressure + (other.pressure - self.pressure) * t,
            tilt: self.tilt + (other.tilt - self.tilt) * t,
            time: self.time + (other.time - self.time) * t,
        }
    }
}

/// A stroke in progress. The first `fixed` points are final; the rest may
/// still be revised by the input pipeline.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Track {
    pub points: Vec<TrackPoint>,
    pub fixed: usize,
}

impl Track {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// All points fixed.
    pub fn from_positions<I: IntoIterator<Item = Vector2<f64>>>(positions: I) -> Self {
        let points: Vec<TrackPoint> = positions.into_iter().map(TrackPoint::at).collect();
        let fixed = points.len();
        Self { points, fixed }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn push(&mut self, point: TrackPoint) {
        self.points.push(point);
    }

    /// Append a sample stamped with `clock`'s current time.
    pub fn push_sample(
        &mut self,
        clock: &dyn ToolClock,
        position: Vector2<f64>,
        pressure: f64,
    ) -> &TrackPoint {
        self.points.push(TrackPoint {
            position,
            pressure,
            tilt: Vector2::zeros(),
            time: clock.seconds(),
        });
        &self.points[self.points.len() - 1]
    }

    #[inline]
    pub fn fix_all(&mut self) {
        self.fixed = self.points.len();
    }
}
