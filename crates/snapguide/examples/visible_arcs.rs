//! Visible-arc timing run: culls one ellipse against a shrinking viewport, draws
//! the result, and prints arc counts with timings.
//!
//! Run: cargo run -p snapguide --example visible_arcs --release
//!
//! References
//! - Code: crates/snapguide/src/guide/ellipse.rs::truncate_ellipse

use std::time::Instant;

use nalgebra::Vector2;
use snapguide::affine::Rect2;
use snapguide::angle::AngleRangeSet;
use snapguide::guide::{
    truncate_ellipse, EllipseGuide, Guide, GuideStyle, RecordingBackend, Viewport,
};

fn main() {
    let ellipse = EllipseGuide::from_center_radii(
        GuideStyle::default(),
        Vector2::new(0.1, -0.05),
        1.0,
        0.6,
        25.0,
    );
    for half in [2.0, 1.0, 0.8, 0.6, 0.45, 0.3] {
        let vp = Viewport::from_world_rect(&Rect2::new(-half, -half, half, half));

        let cull_start = Instant::now();
        let mut ranges = AngleRangeSet::full();
        let inv = *ellipse.matrix_inv() * vp.matrix_inv;
        let visible = truncate_ellipse(&mut ranges, &inv, &Rect2::UNIT_CLIP);
        let cull_us = cull_start.elapsed().as_secs_f64() * 1e6;

        let mut backend = RecordingBackend::new(vp, 2.0 * half / 1000.0);
        let draw_start = Instant::now();
        ellipse.draw(&mut backend, true, true);
        let draw_us = draw_start.elapsed().as_secs_f64() * 1e6;

        let degrees: f64 = ranges
            .iter()
            .map(|r| (r.d1_greater() - r.d0()).to_degrees())
            .sum();
        println!(
            "half={half:.2} visible={visible} arcs={} covered={degrees:.3}deg \
             segments={} length={:.6}",
            ranges.iter().len(),
            backend.segments.len(),
            backend.total_length()
        );
        println!("  time_cull_us={cull_us:.2} time_draw_us={draw_us:.2}");
    }
}
