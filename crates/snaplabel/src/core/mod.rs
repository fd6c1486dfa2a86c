//! Core abstractions for edge label tracking
//!
//! This module holds the pieces every host needs: the capability traits a
//! rendering layer implements, the path sampler, and the label controller
//! that ties sampling, positioning and dragging together.

mod config;
mod controller;
mod debounce;
mod drag;
mod error;
mod geometry;
pub mod logging;
mod routing;
mod sampler;
mod types;

pub use config::*;
pub use controller::*;
pub use debounce::*;
pub use drag::*;
pub use error::*;
pub use geometry::*;
pub use logging::*;
pub use routing::*;
pub use sampler::*;
pub use types::*;
