//! Path sampling
//!
//! Turns a path into a fixed number of evenly spaced candidate points. A
//! label may only come to rest on one of these points, and its position is
//! remembered as an index into the set rather than as coordinates.

use std::ops::Index;
use std::sync::Arc;

use tracing::{span, trace, Level};

use super::{LabelError, PathGeometry, Point};

/// Arc-length distance between consecutive samples, or zero for a path
/// without usable length
fn sample_step<P: PathGeometry + ?Sized>(path: &P, count: usize) -> f64 {
    let total = path.total_length();
    if count == 0 || !total.is_finite() || total <= 0.0 {
        0.0
    } else {
        total / count as f64
    }
}

/// Point for a label index, rounded to the shared coordinate precision
pub fn point_at_index<P: PathGeometry + ?Sized>(path: &P, index: usize, count: usize) -> Point {
    let offset = sample_step(path, count) * index as f64;
    path.point_at_length(offset).round()
}

/// Sample `count` points at equal arc-length intervals starting at offset 0
///
/// A zero-length path yields `count` copies of its only point.
pub fn sample_path<P: PathGeometry + ?Sized>(path: &P, count: usize) -> SampleSet {
    let sample_span = span!(Level::DEBUG, "sample_path", count);
    let _enter = sample_span.enter();

    let step = sample_step(path, count);
    let points: Vec<Point> = (0..count)
        .map(|i| path.point_at_length(step * i as f64).round())
        .collect();

    trace!(step, "Sampled path");
    SampleSet::new(points)
}

/// Ordered snap candidates along a path
///
/// Cloning is cheap; the points are shared and never mutated after sampling.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    points: Arc<[Point]>,
}

impl SampleSet {
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points: points.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Point> {
        self.points.get(index).copied()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.points.iter()
    }

    /// Index of the first sample exactly equal to `point`
    pub fn position(&self, point: Point) -> Option<usize> {
        self.points.iter().position(|p| *p == point)
    }

    /// Index of the sample closest to `point`; the lowest index wins ties
    pub fn nearest(&self, point: Point) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, p) in self.points.iter().enumerate() {
            let d = p.distance_squared(point);
            match best {
                Some((_, best_d)) if d >= best_d => {}
                _ => best = Some((i, d)),
            }
        }
        best.map(|(i, _)| i)
    }

    /// Recover a label index from a resting coordinate
    ///
    /// The coordinate is rounded first; an exact match is preferred and the
    /// nearest sample is used otherwise. `None` only for an empty set.
    pub fn resolve(&self, point: Point) -> Option<usize> {
        let point = point.round();
        self.position(point).or_else(|| self.nearest(point))
    }

    /// [`SampleSet::resolve`] reporting an empty set as an error
    pub fn try_resolve(&self, point: Point) -> Result<usize, LabelError> {
        self.resolve(point).ok_or(LabelError::EmptySampleSet)
    }

    /// Sample closest to `point`
    pub fn snap(&self, point: Point) -> Option<Point> {
        self.nearest(point).and_then(|i| self.get(i))
    }
}

impl Index<usize> for SampleSet {
    type Output = Point;

    fn index(&self, index: usize) -> &Point {
        &self.points[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Polyline;

    fn line() -> Polyline {
        Polyline::straight(Point::new(0.0, 0.0), Point::new(200.0, 0.0))
    }

    #[test]
    fn test_sample_count_and_spacing() {
        let samples = sample_path(&line(), 100);
        assert_eq!(samples.len(), 100);
        assert_eq!(samples[0], Point::new(0.0, 0.0));
        assert_eq!(samples[1], Point::new(2.0, 0.0));
        assert_eq!(samples[99], Point::new(198.0, 0.0));
    }

    #[test]
    fn test_samples_are_rounded() {
        let path = Polyline::straight(Point::new(0.0, 0.0), Point::new(1.0, 0.0));
        let samples = sample_path(&path, 3);
        assert_eq!(samples[1], Point::new(0.33, 0.0));
        assert_eq!(samples[2], Point::new(0.67, 0.0));
    }

    #[test]
    fn test_point_at_index_matches_samples() {
        let path = line();
        let samples = sample_path(&path, 100);
        for i in [0, 13, 50, 99] {
            assert_eq!(point_at_index(&path, i, 100), samples[i]);
        }
    }

    #[test]
    fn test_degenerate_path() {
        let path = Polyline::new(vec![Point::new(3.0, 4.0)]);
        let samples = sample_path(&path, 100);
        assert_eq!(samples.len(), 100);
        assert!(samples.iter().all(|p| *p == Point::new(3.0, 4.0)));
    }

    #[test]
    fn test_zero_count() {
        assert!(sample_path(&line(), 0).is_empty());
    }

    #[test]
    fn test_resolve_exact_and_nearest() {
        let samples = sample_path(&line(), 100);
        assert_eq!(samples.resolve(Point::new(20.0, 0.0)), Some(10));
        assert_eq!(samples.resolve(Point::new(20.004, 0.0)), Some(10));
        assert_eq!(samples.resolve(Point::new(20.9, 5.0)), Some(10));
        assert_eq!(samples.resolve(Point::new(500.0, 0.0)), Some(99));
    }

    #[test]
    fn test_nearest_tie_prefers_lowest_index() {
        let samples = SampleSet::new(vec![Point::new(0.0, 0.0), Point::new(2.0, 0.0)]);
        assert_eq!(samples.nearest(Point::new(1.0, 0.0)), Some(0));
    }

    #[test]
    fn test_empty_set_resolves_to_none() {
        let samples = SampleSet::new(Vec::new());
        assert_eq!(samples.resolve(Point::new(1.0, 1.0)), None);
        assert_eq!(samples.snap(Point::new(1.0, 1.0)), None);
        assert!(matches!(
            samples.try_resolve(Point::new(1.0, 1.0)),
            Err(LabelError::EmptySampleSet)
        ));
    }

    #[test]
    fn test_try_resolve() {
        let samples = sample_path(&line(), 100);
        assert_eq!(samples.try_resolve(Point::new(41.0, 3.0)).unwrap(), 20);
    }
}
