//! Label controller configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{LabelError, DEFAULT_LABEL_INDEX, SAMPLE_COUNT};

/// Default trailing delay before a drag session is rebuilt
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

/// Default pointer travel (px) below which a release counts as a click
pub const DEFAULT_DRAG_THRESHOLD: f64 = 2.0;

/// Configuration for a single edge label
///
/// Every field has a default, so a partial JSON document such as
/// `{"initial_index": 30}` deserializes cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    /// Number of snap points sampled along the edge
    pub sample_count: usize,
    /// Starting label index (defaults to the midpoint)
    pub initial_index: usize,
    /// Debounce window for drag session rebuilds, in milliseconds
    pub debounce_ms: u64,
    /// Pointer travel in px that turns a press into a drag
    pub drag_threshold: f64,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            sample_count: SAMPLE_COUNT,
            initial_index: DEFAULT_LABEL_INDEX,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
        }
    }
}

impl LabelConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sample count, moving the initial index to the new midpoint
    pub fn with_sample_count(mut self, sample_count: usize) -> Self {
        self.sample_count = sample_count;
        self.initial_index = sample_count / 2;
        self
    }

    pub fn with_initial_index(mut self, index: usize) -> Self {
        self.initial_index = index;
        self
    }

    pub fn with_debounce_ms(mut self, debounce_ms: u64) -> Self {
        self.debounce_ms = debounce_ms;
        self
    }

    pub fn with_drag_threshold(mut self, threshold: f64) -> Self {
        self.drag_threshold = threshold;
        self
    }

    /// Debounce window as a [`Duration`]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Initial index clamped into `[0, sample_count)`
    pub fn clamped_initial_index(&self) -> usize {
        self.initial_index.min(self.sample_count.saturating_sub(1))
    }

    /// Check the configuration for values a controller would have to correct
    pub fn validate(&self) -> Result<(), LabelError> {
        if self.sample_count == 0 {
            return Err(LabelError::config_error("sample_count must be positive"));
        }
        if self.initial_index >= self.sample_count {
            return Err(LabelError::index_out_of_range(
                self.initial_index,
                self.sample_count,
            ));
        }
        if !self.drag_threshold.is_finite() || self.drag_threshold < 0.0 {
            return Err(LabelError::config_error(format!(
                "drag_threshold must be a non-negative number, got {}",
                self.drag_threshold
            )));
        }
        Ok(())
    }

    /// Parse a configuration from JSON
    pub fn from_json(input: &str) -> anyhow::Result<Self> {
        let config: LabelConfig = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }
}
