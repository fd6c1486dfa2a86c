//! Core type definitions for edge label tracking
//!
//! This module contains the fundamental types used throughout snaplabel:
//! points, node dimensions, handle sides, and the edge geometry that
//! the host hands to a label controller on every render.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of candidate snap points sampled along an edge
pub const SAMPLE_COUNT: usize = 100;

/// Label index used when no initial position is configured (the midpoint)
pub const DEFAULT_LABEL_INDEX: usize = SAMPLE_COUNT / 2;

/// Decimal places kept on sampled and dropped coordinates
pub const COORDINATE_PRECISION: u32 = 2;

/// Round a coordinate to [`COORDINATE_PRECISION`] decimal places
///
/// Negative zero is normalised to zero and non-finite values collapse to
/// zero, so two rounded coordinates compare equal whenever they print equal.
pub fn round_coordinate(value: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let scale = 10f64.powi(COORDINATE_PRECISION as i32);
    let rounded = (value * scale).round() / scale;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// A 2-D coordinate in the host's canvas space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a point without rounding
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Create a point rounded to [`COORDINATE_PRECISION`] decimals
    pub fn rounded(x: f64, y: f64) -> Self {
        Self {
            x: round_coordinate(x),
            y: round_coordinate(y),
        }
    }

    /// Return this point rounded to [`COORDINATE_PRECISION`] decimals
    pub fn round(self) -> Self {
        Self::rounded(self.x, self.y)
    }

    /// Squared Euclidean distance to another point
    pub fn distance_squared(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: Point) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Linear interpolation towards `other` (`t = 0` is self, `t = 1` is other)
    pub fn lerp(&self, other: Point, t: f64) -> Point {
        Point {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    /// Offset by a vector
    pub fn offset(&self, dx: f64, dy: f64) -> Point {
        Point {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

/// Width and height of a node
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

impl Dimensions {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Side of a node that an edge leaves from or enters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandlePosition {
    Top,
    Right,
    #[default]
    Bottom,
    Left,
}

impl HandlePosition {
    /// Unit vector pointing away from the node through this side
    pub fn outward(&self) -> (f64, f64) {
        match self {
            HandlePosition::Top => (0.0, -1.0),
            HandlePosition::Right => (1.0, 0.0),
            HandlePosition::Bottom => (0.0, 1.0),
            HandlePosition::Left => (-1.0, 0.0),
        }
    }

    /// Returns true for handles on the top or bottom side
    pub fn is_vertical(&self) -> bool {
        matches!(self, HandlePosition::Top | HandlePosition::Bottom)
    }
}

impl FromStr for HandlePosition {
    type Err = String;

    /// Parse a handle side name (top|right|bottom|left)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "top" => Ok(HandlePosition::Top),
            "right" => Ok(HandlePosition::Right),
            "bottom" => Ok(HandlePosition::Bottom),
            "left" => Ok(HandlePosition::Left),
            _ => Err(format!("Unknown handle: {}", s)),
        }
    }
}

impl fmt::Display for HandlePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlePosition::Top => write!(f, "top"),
            HandlePosition::Right => write!(f, "right"),
            HandlePosition::Bottom => write!(f, "bottom"),
            HandlePosition::Left => write!(f, "left"),
        }
    }
}

/// Endpoint geometry of an edge as reported by the host
///
/// A label controller compares successive values of this struct to decide
/// whether a render changed anything worth resampling.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EdgeGeometry {
    pub source: Point,
    pub target: Point,
    #[serde(default)]
    pub source_size: Option<Dimensions>,
    #[serde(default)]
    pub target_size: Option<Dimensions>,
}

impl EdgeGeometry {
    /// Geometry with endpoint coordinates only
    pub fn new(source: Point, target: Point) -> Self {
        Self {
            source,
            target,
            source_size: None,
            target_size: None,
        }
    }

    /// Attach endpoint dimensions
    pub fn with_sizes(mut self, source: Dimensions, target: Dimensions) -> Self {
        self.source_size = Some(source);
        self.target_size = Some(target);
        self
    }
}
