//! Dial layout and value mapping.
//!
//! The dial is an upper semicircle. The needle sweeps from `angle_start`
//! (pointing left) through `angle_start + angle_span` (pointing right), so a
//! value of 50 points straight up.

use crate::config::{DIAL_ANGLE_SPAN_DEG, DIAL_ANGLE_START_DEG};

/// Lowest displayable confidence.
pub const MIN_VALUE: f64 = 0.0;
/// Highest displayable confidence.
pub const MAX_VALUE: f64 = 100.0;

/// Clamps a confidence value into `[0, 100]`.
///
/// NaN is treated as 0 so it never reaches the document.
pub fn clamp_confidence(value: f64) -> f64 {
    if value.is_nan() {
        return MIN_VALUE;
    }
    value.clamp(MIN_VALUE, MAX_VALUE)
}

/// Geometry of one dial in SVG user units.
#[derive(Debug, Clone, PartialEq)]
pub struct DialGeometry {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
    pub stroke_width: f64,
    /// Needle rotation at value 0, in degrees (0 = pointing up).
    pub angle_start: f64,
    /// Degrees swept between value 0 and value 100.
    pub angle_span: f64,
}

impl Default for DialGeometry {
    fn default() -> Self {
        Self {
            center_x: 100.0,
            center_y: 100.0,
            radius: 80.0,
            stroke_width: 14.0,
            angle_start: DIAL_ANGLE_START_DEG,
            angle_span: DIAL_ANGLE_SPAN_DEG,
        }
    }
}

impl DialGeometry {
    /// Geometry with the default layout but a different radius.
    pub fn with_radius(radius: f64) -> Self {
        let padding = 20.0;
        Self {
            center_x: radius + padding,
            center_y: radius + padding,
            radius,
            ..Self::default()
        }
    }

    /// `viewBox` covering the semicircle, stroke and label area.
    pub fn view_box(&self) -> String {
        let width = self.center_x * 2.0;
        let height = self.center_y + 20.0;
        format!("0 0 {} {}", fmt_num(width), fmt_num(height))
    }

    /// Path description of the semicircular arc, left to right over the top.
    pub fn arc_path(&self) -> String {
        let start_x = self.center_x - self.radius;
        let end_x = self.center_x + self.radius;
        format!(
            "M {} {} A {} {} 0 0 1 {} {}",
            fmt_num(start_x),
            fmt_num(self.center_y),
            fmt_num(self.radius),
            fmt_num(self.radius),
            fmt_num(end_x),
            fmt_num(self.center_y)
        )
    }

    /// Fraction of the arc filled at `value`.
    pub fn arc_fraction(&self, value: f64) -> f64 {
        clamp_confidence(value) / MAX_VALUE
    }

    /// Needle rotation in degrees at `value`.
    pub fn needle_angle(&self, value: f64) -> f64 {
        self.angle_start + self.arc_fraction(value) * self.angle_span
    }

    /// Needle tip when unrotated (pointing straight up), slightly inside the arc.
    pub fn needle_tip(&self) -> (f64, f64) {
        (self.center_x, self.center_y - self.radius + self.stroke_width)
    }

    /// `transform` attribute value rotating the needle about the dial centre.
    pub fn needle_transform(&self, value: f64) -> String {
        format!(
            "rotate({} {} {})",
            fmt_num(self.needle_angle(value)),
            fmt_num(self.center_x),
            fmt_num(self.center_y)
        )
    }
}

/// Formats a number for markup: up to three decimals, no trailing zeros.
pub fn fmt_num(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    // Avoid "-0" in markup.
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    let text = format!("{:.3}", rounded);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    text.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_confidence() {
        assert_eq!(clamp_confidence(-5.0), 0.0);
        assert_eq!(clamp_confidence(150.0), 100.0);
        assert_eq!(clamp_confidence(42.5), 42.5);
        assert_eq!(clamp_confidence(f64::NAN), 0.0);
        assert_eq!(clamp_confidence(f64::INFINITY), 100.0);
        assert_eq!(clamp_confidence(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_needle_angle_sweep() {
        let dial = DialGeometry::default();
        assert_eq!(dial.needle_angle(0.0), -90.0);
        assert_eq!(dial.needle_angle(50.0), 0.0);
        assert_eq!(dial.needle_angle(100.0), 90.0);
        assert!((dial.needle_angle(30.0) - (-36.0)).abs() < 1e-9);
        assert_eq!(dial.needle_angle(250.0), 90.0);
    }

    #[test]
    fn test_arc_path_default() {
        let dial = DialGeometry::default();
        assert_eq!(dial.arc_path(), "M 20 100 A 80 80 0 0 1 180 100");
    }

    #[test]
    fn test_with_radius_keeps_arc_inside_view_box() {
        let dial = DialGeometry::with_radius(40.0);
        assert_eq!(dial.arc_path(), "M 20 60 A 40 40 0 0 1 100 60");
        assert_eq!(dial.view_box(), "0 0 120 80");
    }

    #[test]
    fn test_needle_transform() {
        let dial = DialGeometry::default();
        assert_eq!(dial.needle_transform(30.0), "rotate(-36 100 100)");
        assert_eq!(dial.needle_transform(50.0), "rotate(0 100 100)");
    }

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(75.398223686), "75.398");
        assert_eq!(fmt_num(100.0), "100");
        assert_eq!(fmt_num(-0.0001), "0");
        assert_eq!(fmt_num(0.5), "0.5");
    }
}
