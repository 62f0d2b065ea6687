//! SVG path parsing and length measurement.
//!
//! The dial measures its value arc from the `d` attribute actually written to
//! the document, so the stroke math follows the geometry even when the radius
//! or sweep changes. Supported commands: `M L H V A Z` and their relative forms.

use std::f64::consts::PI;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// Number of chords used to approximate a non-circular elliptical arc.
const ELLIPSE_SAMPLES: usize = 256;

static PATH_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z]|[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?")
        .expect("path token pattern is valid")
});

/// Errors produced while parsing a path description.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PathError {
    /// A command letter this parser does not understand.
    #[error("unsupported path command '{0}'")]
    UnsupportedCommand(char),

    /// A command was not followed by enough numbers.
    #[error("path command '{0}' is missing arguments")]
    MissingArguments(char),

    /// The path has drawing commands before any `M`.
    #[error("path must start with a moveto command")]
    NoMoveTo,

    /// A number could not be parsed.
    #[error("invalid number in path: {0}")]
    InvalidNumber(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

/// One absolute path segment.
#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment {
    MoveTo(Point),
    Line {
        from: Point,
        to: Point,
    },
    Arc {
        from: Point,
        rx: f64,
        ry: f64,
        rotation_deg: f64,
        large_arc: bool,
        sweep: bool,
        to: Point,
    },
}

impl PathSegment {
    /// Length of this segment in user units.
    pub fn length(&self) -> f64 {
        match *self {
            PathSegment::MoveTo(_) => 0.0,
            PathSegment::Line { from, to } => from.distance(to),
            PathSegment::Arc {
                from,
                rx,
                ry,
                rotation_deg,
                large_arc,
                sweep,
                to,
            } => arc_length(from, to, rx, ry, rotation_deg, large_arc, sweep),
        }
    }
}

enum Token {
    Command(char),
    Number(f64),
}

fn tokenize(d: &str) -> Result<Vec<Token>, PathError> {
    PATH_TOKEN
        .find_iter(d)
        .map(|m| {
            let raw = m.as_str();
            let first = raw.chars().next().unwrap_or(' ');
            if first.is_ascii_alphabetic() && raw.len() == 1 {
                Ok(Token::Command(first))
            } else {
                raw.parse::<f64>()
                    .map(Token::Number)
                    .map_err(|_| PathError::InvalidNumber(raw.to_string()))
            }
        })
        .collect()
}

fn arity(command: char) -> Result<usize, PathError> {
    match command.to_ascii_uppercase() {
        'M' | 'L' => Ok(2),
        'H' | 'V' => Ok(1),
        'A' => Ok(7),
        'Z' => Ok(0),
        _ => Err(PathError::UnsupportedCommand(command)),
    }
}

/// Parses a path description into absolute segments.
///
/// Repeated coordinate groups after a command are treated as implicit repeats
/// of that command (an implicit `L` after `M`), as browsers do.
pub fn parse_path(d: &str) -> Result<Vec<PathSegment>, PathError> {
    let tokens = tokenize(d)?;
    let mut segments = Vec::new();
    let mut current: Option<Point> = None;
    let mut subpath_start: Option<Point> = None;
    let mut i = 0;

    while i < tokens.len() {
        let command = match tokens[i] {
            Token::Command(c) => c,
            Token::Number(_) => return Err(PathError::NoMoveTo),
        };
        i += 1;
        let needed = arity(command)?;

        if needed == 0 {
            if let (Some(from), Some(start)) = (current, subpath_start) {
                segments.push(PathSegment::Line { from, to: start });
                current = Some(start);
            }
            continue;
        }

        let mut first_group = true;
        loop {
            let mut args = Vec::with_capacity(needed);
            while args.len() < needed {
                match tokens.get(i) {
                    Some(Token::Number(n)) => {
                        args.push(*n);
                        i += 1;
                    }
                    _ => break,
                }
            }
            if args.is_empty() && !first_group {
                break;
            }
            if args.len() < needed {
                return Err(PathError::MissingArguments(command));
            }

            let relative = command.is_ascii_lowercase();
            let base = if relative {
                current.unwrap_or(Point::new(0.0, 0.0))
            } else {
                Point::new(0.0, 0.0)
            };
            // An implicit repeat after a moveto is a lineto.
            let effective = match command.to_ascii_uppercase() {
                'M' if !first_group => 'L',
                other => other,
            };

            match effective {
                'M' => {
                    let to = Point::new(base.x + args[0], base.y + args[1]);
                    segments.push(PathSegment::MoveTo(to));
                    current = Some(to);
                    subpath_start = Some(to);
                }
                'L' | 'H' | 'V' => {
                    let from = current.ok_or(PathError::NoMoveTo)?;
                    let to = match effective {
                        'L' => Point::new(base.x + args[0], base.y + args[1]),
                        'H' => Point::new(if relative { from.x + args[0] } else { args[0] }, from.y),
                        _ => Point::new(from.x, if relative { from.y + args[0] } else { args[0] }),
                    };
                    segments.push(PathSegment::Line { from, to });
                    current = Some(to);
                }
                'A' => {
                    let from = current.ok_or(PathError::NoMoveTo)?;
                    let to = Point::new(base.x + args[5], base.y + args[6]);
                    segments.push(PathSegment::Arc {
                        from,
                        rx: args[0],
                        ry: args[1],
                        rotation_deg: args[2],
                        large_arc: args[3] != 0.0,
                        sweep: args[4] != 0.0,
                        to,
                    });
                    current = Some(to);
                }
                _ => return Err(PathError::UnsupportedCommand(command)),
            }
            first_group = false;
        }
    }

    Ok(segments)
}

/// Total length of the path described by `d`.
pub fn path_length(d: &str) -> Result<f64, PathError> {
    Ok(parse_path(d)?.iter().map(PathSegment::length).sum())
}

fn vector_angle(ux: f64, uy: f64, vx: f64, vy: f64) -> f64 {
    (ux * vy - uy * vx).atan2(ux * vx + uy * vy)
}

/// Length of an SVG elliptical arc given in endpoint parameterization.
///
/// Converts to centre parameterization (SVG 1.1 implementation notes F.6.5),
/// including out-of-range radius correction. Circular arcs use the exact
/// `r * |dtheta|`; true ellipses are approximated with chords.
fn arc_length(
    from: Point,
    to: Point,
    rx: f64,
    ry: f64,
    rotation_deg: f64,
    large_arc: bool,
    sweep: bool,
) -> f64 {
    if from == to {
        return 0.0;
    }
    let mut rx = rx.abs();
    let mut ry = ry.abs();
    if rx == 0.0 || ry == 0.0 {
        return from.distance(to);
    }

    let phi = rotation_deg.to_radians();
    let (sin_phi, cos_phi) = phi.sin_cos();
    let dx2 = (from.x - to.x) / 2.0;
    let dy2 = (from.y - to.y) / 2.0;
    let x1p = cos_phi * dx2 + sin_phi * dy2;
    let y1p = -sin_phi * dx2 + cos_phi * dy2;

    let lambda = (x1p * x1p) / (rx * rx) + (y1p * y1p) / (ry * ry);
    if lambda > 1.0 {
        let scale = lambda.sqrt();
        rx *= scale;
        ry *= scale;
    }

    let rx2 = rx * rx;
    let ry2 = ry * ry;
    let num = rx2 * ry2 - rx2 * y1p * y1p - ry2 * x1p * x1p;
    let den = rx2 * y1p * y1p + ry2 * x1p * x1p;
    let sign = if large_arc == sweep { -1.0 } else { 1.0 };
    let coef = if den == 0.0 {
        0.0
    } else {
        sign * (num / den).max(0.0).sqrt()
    };
    let cxp = coef * rx * y1p / ry;
    let cyp = -coef * ry * x1p / rx;

    let ux = (x1p - cxp) / rx;
    let uy = (y1p - cyp) / ry;
    let vx = (-x1p - cxp) / rx;
    let vy = (-y1p - cyp) / ry;
    let theta1 = vector_angle(1.0, 0.0, ux, uy);
    let mut dtheta = vector_angle(ux, uy, vx, vy);
    if !sweep && dtheta > 0.0 {
        dtheta -= 2.0 * PI;
    } else if sweep && dtheta < 0.0 {
        dtheta += 2.0 * PI;
    }

    if (rx - ry).abs() <= f64::EPSILON * rx.max(ry) * 16.0 {
        return rx * dtheta.abs();
    }

    // Rotation does not change length, so sample the axis-aligned ellipse.
    let mut length = 0.0;
    let mut prev = Point::new(rx * theta1.cos(), ry * theta1.sin());
    for step in 1..=ELLIPSE_SAMPLES {
        let t = theta1 + dtheta * (step as f64 / ELLIPSE_SAMPLES as f64);
        let next = Point::new(rx * t.cos(), ry * t.sin());
        length += prev.distance(next);
        prev = next;
    }
    length
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_semicircle_length_is_pi_r() {
        let len = path_length("M 20 100 A 80 80 0 0 1 180 100").unwrap();
        assert!(approx(len, PI * 80.0), "got {len}");
    }

    #[test]
    fn test_length_follows_radius() {
        let small = path_length("M 50 100 A 50 50 0 0 1 150 100").unwrap();
        let large = path_length("M 0 100 A 100 100 0 0 1 200 100").unwrap();
        assert!(approx(small, PI * 50.0));
        assert!(approx(large, PI * 100.0));
    }

    #[test]
    fn test_quarter_circle() {
        let len = path_length("M 0 0 A 10 10 0 0 1 10 10").unwrap();
        assert!(approx(len, PI * 10.0 / 2.0), "got {len}");
    }

    #[test]
    fn test_large_arc_flag_takes_long_way() {
        let len = path_length("M 0 0 A 10 10 0 1 1 10 10").unwrap();
        assert!(approx(len, PI * 10.0 * 1.5), "got {len}");
    }

    #[test]
    fn test_undersized_radius_is_scaled_up() {
        // Radius 1 cannot span 20 units; it is scaled to 10, giving a semicircle.
        let len = path_length("M 0 0 A 1 1 0 0 1 20 0").unwrap();
        assert!(approx(len, PI * 10.0), "got {len}");
    }

    #[test]
    fn test_ellipse_half_perimeter() {
        // Half of an ellipse with a=20, b=10. Ramanujan: pi*(3(a+b)-sqrt((3a+b)(a+3b)))
        let full = PI * (3.0 * 30.0 - ((70.0_f64) * (50.0_f64)).sqrt());
        let len = path_length("M -20 0 A 20 10 0 0 1 20 0").unwrap();
        assert!((len - full / 2.0).abs() < 0.01, "got {len}");
    }

    #[test]
    fn test_lines_and_close() {
        let len = path_length("M 0 0 L 3 0 L 3 4 Z").unwrap();
        assert!(approx(len, 12.0));
    }

    #[test]
    fn test_relative_and_implicit_commands() {
        let len = path_length("m 0 0 3 0 0 4 h -3 v -4").unwrap();
        assert!(approx(len, 14.0), "got {len}");
    }

    #[test]
    fn test_missing_arguments() {
        assert_eq!(
            path_length("M 0 0 A 10 10 0 0 1 5"),
            Err(PathError::MissingArguments('A'))
        );
    }

    #[test]
    fn test_unsupported_command() {
        assert_eq!(
            path_length("M 0 0 C 1 1 2 2 3 3"),
            Err(PathError::UnsupportedCommand('C'))
        );
    }

    #[test]
    fn test_requires_moveto() {
        assert_eq!(path_length("L 1 1"), Err(PathError::NoMoveTo));
        assert_eq!(path_length("10 10"), Err(PathError::NoMoveTo));
    }

    #[test]
    fn test_empty_path_has_zero_length() {
        assert_eq!(path_length(""), Ok(0.0));
    }
}
