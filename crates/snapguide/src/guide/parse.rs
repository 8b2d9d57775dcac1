//! Compact text form of a guideline, used by command-line front ends.
//!
//! ```text
//! line:x0,y0,x1,y1
//! ray:x0,y0,x1,y1
//! infinite:x0,y0,x1,y1
//! ellipse:cx,cy,rx,ry[,rotation_degrees]
//! ```
//!
//! Parsed guidelines get the default style.

use std::fmt;
use std::str::FromStr;

use nalgebra::Vector2;

use super::{EllipseGuide, GuideStyle, Guideline, InfiniteLineGuide, LineGuide, RayGuide};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuideParseError {
    UnknownKind {
        kind: String,
    },
    BadArity {
        kind: &'static str,
        expected: &'static str,
        got: usize,
    },
    BadNumber {
        token: String,
    },
}

impl fmt::Display for GuideParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownKind { kind } => write!(
                f,
                "unknown guideline kind '{kind}' (expected line, ray, infinite or ellipse)"
            ),
            Self::BadArity {
                kind,
                expected,
                got,
            } => write!(f, "{kind} takes {expected} numbers, got {got}"),
            Self::BadNumber { token } => write!(f, "not a number: '{token}'"),
        }
    }
}

impl std::error::Error for GuideParseError {}

fn parse_numbers(body: &str) -> Result<Vec<f64>, GuideParseError> {
    body.split(',')
        .map(str::trim)
        .map(|t| {
            t.parse::<f64>()
                .ok()
                .filter(|x| x.is_finite())
                .ok_or_else(|| GuideParseError::BadNumber {
                    token: t.to_string(),
                })
        })
        .collect()
}

impl FromStr for Guideline {
    type Err = GuideParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, body) = s.split_once(':').unwrap_or((s, ""));
        let kind = kind.trim().to_ascii_lowercase();
        let style = GuideStyle::default();
        let v = if body.trim().is_empty() {
            Vec::new()
        } else {
            parse_numbers(body)?
        };
        let points = |kind: &'static str| -> Result<(Vector2<f64>, Vector2<f64>), GuideParseError> {
            match v.as_slice() {
                &[x0, y0, x1, y1] => Ok((Vector2::new(x0, y0), Vector2::new(x1, y1))),
                _ => Err(GuideParseError::BadArity {
                    kind,
                    expected: "4",
                    got: v.len(),
                }),
            }
        };
        match kind.as_str() {
            "line" => {
                let (p0, p1) = points("line")?;
                Ok(LineGuide::new(style, p0, p1).into())
            }
            "ray" => {
                let (p0, p1) = points("ray")?;
                Ok(RayGuide::new(style, p0, p1).into())
            }
            "infinite" => {
                let (p0, p1) = points("infinite")?;
                Ok(InfiniteLineGuide::new(style, p0, p1).into())
            }
            "ellipse" => {
                let (cx, cy, rx, ry, deg) = match v.as_slice() {
                    &[cx, cy, rx, ry] => (cx, cy, rx, ry, 0.0),
                    &[cx, cy, rx, ry, deg] => (cx, cy, rx, ry, deg),
                    _ => {
                        return Err(GuideParseError::BadArity {
                            kind: "ellipse",
                            expected: "4 or 5",
                            got: v.len(),
                        })
                    }
                };
                Ok(EllipseGuide::from_center_radii(style, Vector2::new(cx, cy), rx, ry, deg).into())
            }
            _ => Err(GuideParseError::UnknownKind { kind }),
        }
    }
}
