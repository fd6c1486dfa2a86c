//! snaplabel - Draggable edge labels that snap to their connector path
//!
//! A label attached to a diagram edge is stored as an index into a fixed set
//! of points sampled along the edge's path. The label follows the path as
//! nodes move, can be dragged by the user, and always comes to rest on one of
//! the sampled points.
//!
//! # Quick Start
//!
//! ```rust
//! use snaplabel::sample;
//! use snaplabel::{HandlePosition, Point};
//!
//! let samples = sample(
//!     Point::new(0.0, 0.0),
//!     HandlePosition::Bottom,
//!     Point::new(0.0, 200.0),
//!     HandlePosition::Top,
//! );
//! assert_eq!(samples.len(), 100);
//! assert_eq!(samples[50], Point::new(0.0, 100.0));
//! ```
//!
//! # Driving a Label
//!
//! A host implements [`PathGeometry`] for its path objects and
//! [`PositionableElement`] for its label overlay, then forwards renders, clock
//! ticks and pointer events to a [`LabelController`]:
//!
//! ```rust
//! use std::time::Duration;
//! use snaplabel::prelude::*;
//!
//! let source = Point::new(0.0, 0.0);
//! let target = Point::new(200.0, 0.0);
//! let mut controller = LabelController::new(LabelConfig::default());
//! controller.mount(
//!     LabelElement::new(),
//!     Polyline::straight(source, target),
//!     EdgeGeometry::new(source, target),
//!     Duration::ZERO,
//! );
//!
//! // The drag session is built once geometry has been quiet for 500ms
//! controller.tick(Duration::from_millis(500));
//!
//! controller.press(Point::new(100.0, 0.0));
//! controller.drag(Point::new(41.0, 3.0));
//! assert_eq!(controller.release(), Some(20));
//! ```

pub mod core;
pub mod scene;
pub mod simulation;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        sample_path, step_path, EdgeGeometry, HandlePosition, LabelConfig, LabelController,
        LabelElement, LabelTransform, PathGeometry, Point, Polyline, PositionableElement,
        SampleSet,
    };
    pub use crate::scene::{Scene, SceneNode};
}

/// Sample the step path between two handles with the default sample count
///
/// # Example
/// ```rust
/// use snaplabel::{sample, HandlePosition, Point};
///
/// let samples = sample(
///     Point::new(0.0, 0.0),
///     HandlePosition::Right,
///     Point::new(100.0, 0.0),
///     HandlePosition::Left,
/// );
/// assert_eq!(samples[0], Point::new(0.0, 0.0));
/// ```
pub fn sample(
    source: Point,
    source_handle: HandlePosition,
    target: Point,
    target_handle: HandlePosition,
) -> SampleSet {
    sample_with_count(source, source_handle, target, target_handle, SAMPLE_COUNT)
}

/// Sample the step path between two handles with an explicit sample count
pub fn sample_with_count(
    source: Point,
    source_handle: HandlePosition,
    target: Point,
    target_handle: HandlePosition,
    count: usize,
) -> SampleSet {
    let routed = step_path(source, source_handle, target, target_handle, STEP_OFFSET);
    sample_path(&routed.path, count)
}

/// Replay a JSON simulation script over the demo scene
///
/// # Example
/// ```rust
/// let frames = snaplabel::simulate(r#"{ "steps": [ { "advance": { "ms": 500 } } ] }"#).unwrap();
/// assert_eq!(frames.len(), 2);
/// assert!(frames[1].edges[0].draggable);
/// ```
pub fn simulate(input: &str) -> anyhow::Result<Vec<simulation::Frame>> {
    let script = simulation::Script::from_json(input)?;
    simulation::run(&script)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_default_count() {
        let samples = sample(
            Point::new(0.0, 0.0),
            HandlePosition::Bottom,
            Point::new(0.0, 400.0),
            HandlePosition::Top,
        );
        assert_eq!(samples.len(), SAMPLE_COUNT);
        assert_eq!(samples[25], Point::new(0.0, 100.0));
    }

    #[test]
    fn test_sample_with_count() {
        let samples = sample_with_count(
            Point::new(0.0, 0.0),
            HandlePosition::Right,
            Point::new(100.0, 0.0),
            HandlePosition::Left,
            4,
        );
        assert_eq!(
            samples.points(),
            &[
                Point::new(0.0, 0.0),
                Point::new(25.0, 0.0),
                Point::new(50.0, 0.0),
                Point::new(75.0, 0.0)
            ]
        );
    }

    #[test]
    fn test_simulate_invalid_json() {
        assert!(simulate("not json").is_err());
    }
}
