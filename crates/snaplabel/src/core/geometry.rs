//! Path and element capabilities
//!
//! The label controller never touches a rendering surface directly. It asks a
//! [`PathGeometry`] for lengths and points, and writes [`LabelTransform`]s to a
//! [`PositionableElement`]. Hosts implement these over their own path and
//! overlay objects; [`Polyline`] and [`LabelElement`] are in-memory versions
//! used by the example scene, the CLI and tests.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use super::Point;

/// Queryable geometry of a rendered connector path
pub trait PathGeometry {
    /// Total arc length of the path
    fn total_length(&self) -> f64;

    /// Point at the given arc-length offset from the path start
    ///
    /// Offsets outside `[0, total_length]` are clamped to the nearest end.
    fn point_at_length(&self, offset: f64) -> Point;
}

impl<T: PathGeometry + ?Sized> PathGeometry for &T {
    fn total_length(&self) -> f64 {
        (**self).total_length()
    }

    fn point_at_length(&self, offset: f64) -> Point {
        (**self).point_at_length(offset)
    }
}

/// Which point of the label box is placed on the transform's translation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    /// Top-left corner (the browser default)
    TopLeft,
    /// Box midpoint
    #[default]
    Center,
}

/// Position transform written to a label element
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LabelTransform {
    pub translate: Point,
    pub anchor: Anchor,
}

impl LabelTransform {
    /// Transform placing the label's midpoint on `point`
    pub fn centered(point: Point) -> Self {
        Self {
            translate: point,
            anchor: Anchor::Center,
        }
    }

    /// CSS `transform` value for this transform
    pub fn to_css(&self) -> String {
        let translate = format!(
            "translate3d({}px, {}px, 0px)",
            self.translate.x, self.translate.y
        );
        match self.anchor {
            Anchor::Center => format!("translate(-50%, -50%) {}", translate),
            Anchor::TopLeft => translate,
        }
    }
}

/// A visual element whose position the controller owns
pub trait PositionableElement {
    /// Replace the element's position transform
    fn set_transform(&mut self, transform: LabelTransform);

    /// Resolved on-screen translation of the element
    fn transform(&self) -> Point;
}

/// In-memory label element that records the last transform written to it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelElement {
    current: LabelTransform,
    writes: usize,
}

impl LabelElement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Element already placed at `point` (for hosts that pre-position labels)
    pub fn at(point: Point) -> Self {
        Self {
            current: LabelTransform::centered(point),
            writes: 0,
        }
    }

    /// Full transform including the anchor
    pub fn current(&self) -> LabelTransform {
        self.current
    }

    /// Number of transform writes received
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl PositionableElement for LabelElement {
    fn set_transform(&mut self, transform: LabelTransform) {
        self.current = transform;
        self.writes += 1;
    }

    fn transform(&self) -> Point {
        self.current.translate
    }
}

/// A path made of straight segments
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Polyline {
    points: Vec<Point>,
    /// Arc length at the end of each segment
    cumulative: Vec<f64>,
}

impl Polyline {
    pub fn new(points: Vec<Point>) -> Self {
        let mut cumulative = Vec::with_capacity(points.len().saturating_sub(1));
        let mut total = 0.0;
        for pair in points.windows(2) {
            total += pair[0].distance(pair[1]);
            cumulative.push(total);
        }
        Self { points, cumulative }
    }

    /// A single straight segment
    pub fn straight(from: Point, to: Point) -> Self {
        Self::new(vec![from, to])
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// SVG path data (`M x y L x y ...`)
    pub fn to_svg_path(&self) -> String {
        let mut d = String::new();
        for (i, p) in self.points.iter().enumerate() {
            let cmd = if i == 0 { 'M' } else { 'L' };
            if i > 0 {
                d.push(' ');
            }
            let _ = write!(d, "{}{} {}", cmd, p.x, p.y);
        }
        d
    }
}

impl PathGeometry for Polyline {
    fn total_length(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    fn point_at_length(&self, offset: f64) -> Point {
        let Some(&first) = self.points.first() else {
            return Point::default();
        };
        let total = self.total_length();
        if total <= 0.0 || !offset.is_finite() || offset <= 0.0 {
            return first;
        }
        let offset = offset.min(total);

        // First segment whose end reaches the offset
        let segment = self.cumulative.partition_point(|&end| end < offset);
        let segment = segment.min(self.cumulative.len() - 1);
        let start_len = if segment == 0 {
            0.0
        } else {
            self.cumulative[segment - 1]
        };
        let seg_len = self.cumulative[segment] - start_len;
        let from = self.points[segment];
        let to = self.points[segment + 1];
        if seg_len <= 0.0 {
            return from;
        }
        from.lerp(to, (offset - start_len) / seg_len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_straight_line_length() {
        let line = Polyline::straight(Point::new(0.0, 0.0), Point::new(30.0, 40.0));
        assert_eq!(line.total_length(), 50.0);
        assert_eq!(line.point_at_length(25.0), Point::new(15.0, 20.0));
    }

    #[test]
    fn test_point_at_length_clamps() {
        let line = Polyline::straight(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        assert_eq!(line.point_at_length(-5.0), Point::new(0.0, 0.0));
        assert_eq!(line.point_at_length(50.0), Point::new(10.0, 0.0));
    }

    #[test]
    fn test_multi_segment_lookup() {
        let path = Polyline::new(vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 10.0),
            Point::new(20.0, 10.0),
        ]);
        assert_eq!(path.total_length(), 30.0);
        assert_eq!(path.point_at_length(10.0), Point::new(0.0, 10.0));
        assert_eq!(path.point_at_length(15.0), Point::new(5.0, 10.0));
    }

    #[test]
    fn test_zero_length_segments_are_skipped() {
        let path = Polyline::new(vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
        ]);
        assert_eq!(path.total_length(), 10.0);
        assert_eq!(path.point_at_length(4.0), Point::new(4.0, 0.0));
    }

    #[test]
    fn test_degenerate_paths() {
        let empty = Polyline::default();
        assert_eq!(empty.total_length(), 0.0);
        assert_eq!(empty.point_at_length(3.0), Point::default());

        let dot = Polyline::new(vec![Point::new(7.0, 7.0), Point::new(7.0, 7.0)]);
        assert_eq!(dot.total_length(), 0.0);
        assert_eq!(dot.point_at_length(1.0), Point::new(7.0, 7.0));
    }

    #[test]
    fn test_svg_path() {
        let path = Polyline::new(vec![Point::new(0.0, 0.0), Point::new(0.0, 12.5)]);
        assert_eq!(path.to_svg_path(), "M0 0 L0 12.5");
    }

    #[test]
    fn test_transform_css() {
        let centered = LabelTransform::centered(Point::new(12.5, 40.0));
        assert_eq!(
            centered.to_css(),
            "translate(-50%, -50%) translate3d(12.5px, 40px, 0px)"
        );
    }

    #[test]
    fn test_label_element_records_writes() {
        let mut element = LabelElement::new();
        element.set_transform(LabelTransform::centered(Point::new(1.0, 2.0)));
        assert_eq!(element.transform(), Point::new(1.0, 2.0));
        assert_eq!(element.current().anchor, Anchor::Center);
        assert_eq!(element.write_count(), 1);
    }
}
