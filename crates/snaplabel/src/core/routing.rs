//! Step path routing between node handles
//!
//! Builds the orthogonal connector a host draws between two handles: a short
//! stub out of each handle, joined by axis-aligned segments that turn halfway
//! between the stubs.

use tracing::trace;

use super::{HandlePosition, PathGeometry, Point, Polyline};

/// Distance each connector travels straight out of its handle
pub const STEP_OFFSET: f64 = 20.0;

/// A routed connector with its default label anchor
#[derive(Debug, Clone, PartialEq)]
pub struct StepPath {
    pub path: Polyline,
    /// Arc-length midpoint of the path
    pub label: Point,
}

/// Route an orthogonal connector from `source` to `target`
pub fn step_path(
    source: Point,
    source_handle: HandlePosition,
    target: Point,
    target_handle: HandlePosition,
    offset: f64,
) -> StepPath {
    let (sdx, sdy) = source_handle.outward();
    let (tdx, tdy) = target_handle.outward();
    let source_stub = source.offset(sdx * offset, sdy * offset);
    let target_stub = target.offset(tdx * offset, tdy * offset);

    let mut points = vec![source, source_stub];
    match (source_handle.is_vertical(), target_handle.is_vertical()) {
        (true, true) => {
            let mid_y = (source_stub.y + target_stub.y) / 2.0;
            points.push(Point::new(source_stub.x, mid_y));
            points.push(Point::new(target_stub.x, mid_y));
        }
        (false, false) => {
            let mid_x = (source_stub.x + target_stub.x) / 2.0;
            points.push(Point::new(mid_x, source_stub.y));
            points.push(Point::new(mid_x, target_stub.y));
        }
        (true, false) => points.push(Point::new(source_stub.x, target_stub.y)),
        (false, true) => points.push(Point::new(target_stub.x, source_stub.y)),
    }
    points.push(target_stub);
    points.push(target);
    points.dedup();

    let path = Polyline::new(points);
    let label = path.point_at_length(path.total_length() / 2.0);
    trace!(
        points = path.points().len(),
        length = path.total_length(),
        "Routed step path"
    );
    StepPath { path, label }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertical_handles_aligned() {
        let routed = step_path(
            Point::new(100.0, 0.0),
            HandlePosition::Bottom,
            Point::new(100.0, 200.0),
            HandlePosition::Top,
            STEP_OFFSET,
        );
        assert_eq!(routed.path.total_length(), 200.0);
        assert_eq!(routed.label, Point::new(100.0, 100.0));
    }

    #[test]
    fn test_vertical_handles_offset() {
        let routed = step_path(
            Point::new(200.0, 40.0),
            HandlePosition::Bottom,
            Point::new(100.0, 400.0),
            HandlePosition::Top,
            STEP_OFFSET,
        );
        let points = routed.path.points();
        assert_eq!(points.first(), Some(&Point::new(200.0, 40.0)));
        assert_eq!(points.last(), Some(&Point::new(100.0, 400.0)));
        // 360 vertical + 100 horizontal
        assert_eq!(routed.path.total_length(), 460.0);
        assert!(points.contains(&Point::new(200.0, 220.0)));
        assert!(points.contains(&Point::new(100.0, 220.0)));
    }

    #[test]
    fn test_horizontal_handles() {
        let routed = step_path(
            Point::new(0.0, 0.0),
            HandlePosition::Right,
            Point::new(100.0, 50.0),
            HandlePosition::Left,
            STEP_OFFSET,
        );
        assert_eq!(routed.path.total_length(), 150.0);
        assert!(routed.path.points().contains(&Point::new(50.0, 0.0)));
    }

    #[test]
    fn test_mixed_handles_single_corner() {
        let routed = step_path(
            Point::new(0.0, 0.0),
            HandlePosition::Bottom,
            Point::new(100.0, 100.0),
            HandlePosition::Left,
            0.0,
        );
        assert_eq!(
            routed.path.points(),
            &[
                Point::new(0.0, 0.0),
                Point::new(0.0, 100.0),
                Point::new(100.0, 100.0)
            ]
        );
    }

    #[test]
    fn test_coincident_endpoints() {
        let p = Point::new(5.0, 5.0);
        let routed = step_path(p, HandlePosition::Bottom, p, HandlePosition::Bottom, 0.0);
        assert_eq!(routed.path.total_length(), 0.0);
        assert_eq!(routed.label, p);
    }
}
