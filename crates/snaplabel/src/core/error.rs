//! Core error types for label tracking
//!
//! Controller operations contain their own failures; these errors surface
//! from configuration, scene management and script playback.

use thiserror::Error;

/// Core error types for edge label processing
#[derive(Error, Debug)]
pub enum LabelError {
    #[error("Label index {index} out of range for {sample_count} samples")]
    IndexOutOfRange { index: usize, sample_count: usize },

    #[error("Sample set is empty")]
    EmptySampleSet,

    #[error("Config error: {message}")]
    ConfigError { message: String },

    #[error("Unknown node: {id}")]
    UnknownNode { id: String },

    #[error("Unknown edge: {id}")]
    UnknownEdge { id: String },

    #[error("Duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: String },
}

impl LabelError {
    /// Create a new index range error
    pub fn index_out_of_range(index: usize, sample_count: usize) -> Self {
        Self::IndexOutOfRange {
            index,
            sample_count,
        }
    }

    /// Create a new config error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a new unknown node error
    pub fn unknown_node(id: impl Into<String>) -> Self {
        Self::UnknownNode { id: id.into() }
    }

    /// Create a new unknown edge error
    pub fn unknown_edge(id: impl Into<String>) -> Self {
        Self::UnknownEdge { id: id.into() }
    }

    /// Create a new duplicate id error
    pub fn duplicate(kind: &'static str, id: impl Into<String>) -> Self {
        Self::DuplicateId {
            kind,
            id: id.into(),
        }
    }
}
