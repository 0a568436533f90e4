//! Distance and ratio helpers shared by the extractor and the scorer.

use crate::types::Point;

/// Euclidean distance between two points.
#[inline]
pub fn distance(p1: &Point, p2: &Point) -> f32 {
    p1.distance(p2)
}

/// `numerator / denominator`, or `0.0` when the denominator is zero.
#[inline]
pub fn ratio(numerator: f32, denominator: f32) -> f32 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Arithmetic mean, `0.0` for an empty slice.
pub fn average(values: &[f32]) -> f32 {
    ratio(values.iter().sum(), values.len() as f32)
}

/// Absolute turning angle, in degrees, between the vectors `a -> b` and `b -> c`.
///
/// The heading difference is wrapped into `[-180, 180]` before taking the
/// absolute value, so the result always lies in `[0, 180]`. For a jaw traced
/// left to right the headings never cross the branch cut and the wrap is a
/// no-op.
pub fn turning_angle_degrees(a: &Point, b: &Point, c: &Point) -> f32 {
    let mut delta = (b.heading_to(c) - a.heading_to(b)).to_degrees();
    if delta > 180.0 {
        delta -= 360.0;
    } else if delta < -180.0 {
        delta += 360.0;
    }
    delta.abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio() {
        assert!((ratio(25.0, 100.0) - 0.25).abs() < 1e-6);
        assert_eq!(ratio(0.0, 100.0), 0.0);
        assert_eq!(ratio(100.0, 0.0), 0.0);
        assert_eq!(ratio(-3.0, 0.0), 0.0);
        assert_eq!(ratio(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_distance() {
        let d = distance(&Point::new(0.0, 100.0), &Point::new(200.0, 100.0));
        assert!((d - 200.0).abs() < 1e-4);
    }

    #[test]
    fn test_average() {
        assert_eq!(average(&[]), 0.0);
        assert!((average(&[1.0, 2.0, 3.0]) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn straight_line_has_no_turn() {
        let angle = turning_angle_degrees(
            &Point::new(0.0, 0.0),
            &Point::new(1.0, 1.0),
            &Point::new(2.0, 2.0),
        );
        assert!(angle.abs() < 1e-4);
    }

    #[test]
    fn right_angle_turn() {
        // Right, then down.
        let angle = turning_angle_degrees(
            &Point::new(0.0, 0.0),
            &Point::new(10.0, 0.0),
            &Point::new(10.0, 10.0),
        );
        assert!((angle - 90.0).abs() < 1e-3);
    }

    #[test]
    fn turn_across_the_branch_cut_is_wrapped() {
        // Heading ~ +170 deg then ~ -170 deg: a 20 degree turn, not 340.
        let a = Point::new(10.0, 0.0);
        let b = Point::new(a.x - 10.0, a.y + 1.763);
        let c = Point::new(b.x - 10.0, b.y - 1.763);
        let angle = turning_angle_degrees(&a, &b, &c);
        assert!((angle - 20.0).abs() < 0.1, "angle = {angle}");
    }
}
