//! Geometry core for snapping guidelines in a 2D drawing tool.
//!
//! Modules
//! - `affine`: 2D affine maps (plus the 3×3 / 4×4 homogeneous forms that
//!   viewport matrices come in) and axis-aligned rectangles.
//! - `angle`: quantized angles and circular interval sets.
//! - `guide`: line, ray, infinite line and ellipse guidelines: snapping,
//!   scoring, viewport-culled drawing.
//! - `solvers`: closed-form polynomial roots.
//! - `clock`: injected monotonic time for input samples.
//! - `rand`: reproducible samplers for tests and benchmarks.
//!
//! API Policy
//! - Everything here is plain values with no interior synchronization; share
//!   immutably or give each thread its own instance.
//! - Degenerate geometry never panics and never yields NaN: operations fall
//!   back to a documented value (zero direction, centre point, empty set).

pub mod affine;
pub mod angle;
pub mod cfg;
pub mod clock;
pub mod guide;
pub mod rand;
pub mod solvers;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use affine::{Affine2, Affine3, Affine4, Rect2};
pub use angle::{Angle, AngleRangeSet};
pub use guide::{Guide, GuideStyle, Guideline};
pub use nalgebra::{Matrix2 as Mat2, Vector2 as Vec2};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::affine::{Affine2, Affine3, Affine4, Rect2};
    pub use crate::angle::{Angle, AngleRangeSet, Range, HALF, PERIOD};
    pub use crate::clock::{ManualClock, MonotonicClock, ToolClock};
    pub use crate::guide::{
        find_best, DrawBackend, EllipseGuide, Guide, GuideStyle, Guideline, InfiniteLineGuide,
        LineGuide, RayGuide, RecordingBackend, Rgba, Track, TrackPoint, Viewport,
    };
    pub use nalgebra::{Matrix2 as Mat2, Vector2 as Vec2};
}
