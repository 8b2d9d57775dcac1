mod provenance;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use polars::prelude::*;
use serde::Serialize;
use serde_json::json;
use snapguide::affine::{Affine2, Rect2};
use snapguide::clock::{MonotonicClock, ToolClock, STEP};
use snapguide::guide::{find_best, Guide, Guideline, RecordingBackend, Track, TrackPoint, Viewport};
use snapguide::Vec2;
use std::fs::File;
use std::path::Path;
use tracing_subscriber::fmt::SubscriberBuilder;

use provenance::{document, write_sidecar, Payload};

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Snap, score and draw guidelines from the command line")]
struct Cmd {
    /// Optional run label; propagated to outputs and logs
    #[arg(long)]
    tag: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Snap the points of a CSV/Parquet file (columns x, y) onto a guideline
    Snap {
        /// e.g. `line:0,0,10,0` or `ellipse:0,0,3,2,30`
        #[arg(long)]
        guide: String,
        #[arg(long)]
        input: String,
        #[arg(long)]
        out: String,
        #[arg(long, default_value_t = 1.0)]
        magnetism: f64,
    },
    /// Pick the guideline that a stroke (columns x, y) follows best
    Pick {
        #[arg(long = "guide", required = true)]
        guides: Vec<String>,
        #[arg(long)]
        input: String,
        /// Pixels per world unit
        #[arg(long, default_value_t = 1.0)]
        screen_scale: f64,
    },
    /// Draw the visible part of a guideline into a JSON segment list
    Draw {
        #[arg(long)]
        guide: String,
        /// World rectangle `x0,y0,x1,y1`
        #[arg(long)]
        viewport: String,
        /// World units per pixel; defaults to 1/1000 of the viewport's larger side
        #[arg(long)]
        pixel_size: Option<f64>,
        #[arg(long)]
        out: String,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Snap {
            guide,
            input,
            out,
            magnetism,
        } => snap(&guide, &input, &out, magnetism, cmd.tag),
        Action::Pick {
            guides,
            input,
            screen_scale,
        } => pick(&guides, &input, screen_scale),
        Action::Draw {
            guide,
            viewport,
            pixel_size,
            out,
        } => draw(&guide, &viewport, pixel_size, &out, cmd.tag),
        Action::Report => report(cmd.tag),
    }
}

fn parse_guide(desc: &str) -> Result<Guideline> {
    desc.parse()
        .with_context(|| format!("parsing guideline '{desc}'"))
}

fn parse_rect(desc: &str) -> Result<Rect2> {
    let v: Vec<f64> = desc
        .split(',')
        .map(|t| {
            t.trim()
                .parse::<f64>()
                .with_context(|| format!("viewport component '{t}'"))
        })
        .collect::<Result<_>>()?;
    let [x0, y0, x1, y1] = v.as_slice() else {
        bail!("viewport takes 4 numbers x0,y0,x1,y1, got {}", v.len());
    };
    let rect = Rect2::new(*x0, *y0, *x1, *y1);
    let (w, h) = (rect.width(), rect.height());
    if !(w.is_finite() && h.is_finite()) || w <= 0.0 || h <= 0.0 {
        bail!("viewport '{desc}' has no area");
    }
    Ok(rect)
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn is_parquet(path: &str) -> bool {
    path.ends_with(".parquet")
}

/// Rows with a missing coordinate are dropped.
fn read_points(input: &str) -> Result<Vec<Vec2<f64>>> {
    let lf = if is_parquet(input) {
        LazyFrame::scan_parquet(input, ScanArgsParquet::default())?
    } else {
        LazyCsvReader::new(input)
            .with_infer_schema_length(Some(100))
            .finish()?
    };
    let df = lf
        .select([
            col("x").cast(DataType::Float64),
            col("y").cast(DataType::Float64),
        ])
        .drop_nulls(None)
        .collect()
        .with_context(|| format!("reading columns x, y from {input}"))?;
    let xs = df.column("x")?.f64()?;
    let ys = df.column("y")?.f64()?;
    Ok(xs
        .into_iter()
        .zip(ys)
        .filter_map(|(x, y)| Some(Vec2::new(x?, y?)))
        .collect())
}

fn write_frame(df: &mut DataFrame, out: &str) -> Result<()> {
    let path = Path::new(out);
    ensure_parent(path)?;
    let mut file = File::create(path).with_context(|| format!("creating {out}"))?;
    if is_parquet(out) {
        ParquetWriter::new(&mut file).finish(df)?;
    } else {
        CsvWriter::new(&mut file).finish(df)?;
    }
    Ok(())
}

/// One row per input point: the point, its snapped image, and the exact
/// nearest guideline point.
fn snap_frame(guide: &Guideline, points: &[Vec2<f64>], magnetism: f64) -> Result<DataFrame> {
    let n = points.len();
    let (mut xs, mut ys) = (Vec::with_capacity(n), Vec::with_capacity(n));
    let (mut sx, mut sy) = (Vec::with_capacity(n), Vec::with_capacity(n));
    let (mut nx, mut ny) = (Vec::with_capacity(n), Vec::with_capacity(n));
    for &p in points {
        let snapped = guide
            .smooth_transform_point(&TrackPoint::at(p), magnetism)
            .position;
        let nearest = guide.nearest_point(p);
        xs.push(p.x);
        ys.push(p.y);
        sx.push(snapped.x);
        sy.push(snapped.y);
        nx.push(nearest.x);
        ny.push(nearest.y);
    }
    Ok(df!(
        "x" => xs,
        "y" => ys,
        "snap_x" => sx,
        "snap_y" => sy,
        "nearest_x" => nx,
        "nearest_y" => ny
    )?)
}

fn snap(guide: &str, input: &str, out: &str, magnetism: f64, tag: Option<String>) -> Result<()> {
    tracing::info!(guide, input, out, magnetism, tag = ?tag, "snap");
    let g = parse_guide(guide)?;
    let points = read_points(input)?;
    let mut df = snap_frame(&g, &points, magnetism)?;
    tracing::info!(rows = df.height(), kind = g.kind(), "snapped");
    write_frame(&mut df, out)?;

    let payload = Payload::new(
        "snap",
        json!({
            "guide": guide,
            "input": input,
            "magnetism": magnetism,
            "rows": df.height()
        }),
    )
    .with_tag(tag);
    write_sidecar(out, payload)?;
    Ok(())
}

fn pick(guides: &[String], input: &str, screen_scale: f64) -> Result<()> {
    tracing::info!(guides = guides.len(), input, screen_scale, "pick");
    let parsed = guides
        .iter()
        .map(|g| parse_guide(g))
        .collect::<Result<Vec<_>>>()?;
    let track = Track::from_positions(read_points(input)?);
    let to_screen = Affine2::scale_uniform(screen_scale);
    let obj = match find_best(&parsed, &track, &to_screen) {
        Some((best, weight)) => {
            let index = parsed.iter().position(|g| std::ptr::eq(g, best));
            json!({
                "index": index,
                "guide": index.map(|i| guides[i].as_str()),
                "weight": weight.weight,
                "long_enough": weight.long_enough
            })
        }
        None => json!({ "index": null, "points": track.len() }),
    };
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

#[derive(Serialize)]
struct SegmentRow {
    p0: [f64; 2],
    p1: [f64; 2],
    pixel_size: f64,
    alpha0: f64,
    alpha1: f64,
}

#[derive(Serialize)]
struct DrawOutput<'a> {
    guide: &'a str,
    kind: &'a str,
    viewport: [f64; 4],
    pixel_size: f64,
    segments: Vec<SegmentRow>,
}

fn draw(
    guide: &str,
    viewport: &str,
    pixel_size: Option<f64>,
    out: &str,
    tag: Option<String>,
) -> Result<()> {
    tracing::info!(guide, viewport, out, tag = ?tag, "draw");
    let g = parse_guide(guide)?;
    let rect = parse_rect(viewport)?;
    let pixel_size = pixel_size.unwrap_or(rect.width().max(rect.height()) / 1000.0);
    if pixel_size.is_nan() || pixel_size <= 0.0 {
        bail!("pixel size must be positive, got {pixel_size}");
    }

    let mut backend = RecordingBackend::new(Viewport::from_world_rect(&rect), pixel_size);
    let clock = MonotonicClock::new();
    let start = clock.ticks();
    g.draw(&mut backend, true, true);
    let elapsed_ms = (clock.ticks() - start) as f64 * STEP * 1e3;
    tracing::info!(
        segments = backend.segments.len(),
        length = backend.total_length(),
        elapsed_ms,
        "drawn"
    );

    let output = DrawOutput {
        guide,
        kind: g.kind(),
        viewport: [rect.x0, rect.y0, rect.x1, rect.y1],
        pixel_size,
        segments: backend
            .segments
            .iter()
            .map(|s| SegmentRow {
                p0: [s.p0.x, s.p0.y],
                p1: [s.p1.x, s.p1.y],
                pixel_size: s.pixel_size,
                alpha0: s.alpha0,
                alpha1: s.alpha1,
            })
            .collect(),
    };
    let out_path = Path::new(out);
    ensure_parent(out_path)?;
    std::fs::write(out_path, serde_json::to_vec_pretty(&output)?)
        .with_context(|| format!("writing {out}"))?;

    let payload = Payload::new(
        "draw",
        json!({
            "guide": guide,
            "viewport": viewport,
            "pixel_size": pixel_size,
            "segments": output.segments.len()
        }),
    )
    .with_tag(tag);
    write_sidecar(out, payload)?;
    Ok(())
}

fn report(tag: Option<String>) -> Result<()> {
    let payload = Payload::new("report", json!({})).with_tag(tag);
    println!("{}", serde_json::to_string_pretty(&document(&payload, &[]))?);
    Ok(())
}
