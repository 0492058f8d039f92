//! Render-time stroke smoothing.

use kurbo::{ParamCurve, Point, QuadBez};

/// Samples taken per smoothed segment.
const SAMPLES_PER_SEGMENT: usize = 8;

/// Densify a polyline with quadratic interpolation so strokes render as
/// curves rather than faceted segments.
///
/// Each interior point becomes the control point of a quadratic Bezier
/// running between the midpoints of its neighboring segments. The first and
/// last points are passed through unchanged, and the input is never
/// modified — stored paths keep their exact input samples; this runs only at
/// render time.
pub fn smooth_polyline(points: &[Point]) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let mut out = Vec::with_capacity(points.len() * SAMPLES_PER_SEGMENT);
    out.push(points[0]);

    for i in 1..points.len() - 1 {
        let start = midpoint(points[i - 1], points[i]);
        let end = midpoint(points[i], points[i + 1]);
        let quad = QuadBez::new(start, points[i], end);
        for s in 0..=SAMPLES_PER_SEGMENT {
            let t = s as f64 / SAMPLES_PER_SEGMENT as f64;
            out.push(quad.eval(t));
        }
    }

    out.push(points[points.len() - 1]);
    out
}

fn midpoint(a: Point, b: Point) -> Point {
    Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_input_passes_through() {
        let points = vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)];
        assert_eq!(smooth_polyline(&points), points);
    }

    #[test]
    fn test_endpoints_preserved() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 20.0),
            Point::new(20.0, 0.0),
            Point::new(30.0, 20.0),
        ];
        let smoothed = smooth_polyline(&points);

        assert_eq!(smoothed[0], points[0]);
        assert_eq!(*smoothed.last().unwrap(), *points.last().unwrap());
    }

    #[test]
    fn test_output_is_denser() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 20.0),
            Point::new(20.0, 0.0),
        ];
        let smoothed = smooth_polyline(&points);
        assert!(smoothed.len() > points.len());
    }

    #[test]
    fn test_interior_control_points_pull_curve() {
        let points = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(20.0, 0.0),
        ];
        let smoothed = smooth_polyline(&points);

        // The curve approaches but does not pass through the control point.
        let peak = smoothed
            .iter()
            .map(|p| p.y)
            .fold(f64::MIN, f64::max);
        assert!(peak > 0.0);
        assert!(peak < 10.0);
    }
}
