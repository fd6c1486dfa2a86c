//! Logging infrastructure for label tracking
//!
//! This module provides structured logging using the `tracing` crate.
//! It supports configurable log levels and formats, and is designed to be
//! WASM-compatible so browser hosts get the same events.
//!
//! # Usage
//!
//! ```rust
//! use snaplabel::core::logging::init_logging;
//!
//! // Initialize with default settings
//! let _ = init_logging(None, None);
//!
//! // Or with custom level and format (fails if a subscriber is already set)
//! let _ = init_logging(Some("debug"), Some("pretty"));
//! ```
//!
//! # Log Levels
//!
//! - `trace`: Very detailed information, typically only interesting when debugging
//! - `debug`: Detailed information for debugging
//! - `info`: General informational messages (default)
//! - `warn`: Warning messages
//! - `error`: Error messages
//!
//! # Log Formats
//!
//! - `compact`: Single-line format, good for production
//! - `pretty`: Multi-line format with colors, good for development
//! - `json`: JSON format, good for log aggregation systems
//!
//! # Environment Variables
//!
//! Logging can be configured via environment variables:
//! - `SNAPLABEL_LOG_LEVEL`: Set log level (trace|debug|info|warn|error)
//! - `RUST_LOG`: Alternative way to set log level (tracing-subscriber standard)
//! - `SNAPLABEL_LOG_FORMAT`: Set log format (compact|pretty|json)
//!
//! # WASM Compatibility
//!
//! On wasm32 targets events go to the browser console through `tracing-wasm`
//! and the level and format settings are ignored.
//!
//! # Tracing in Host Integrations
//!
//! Hosts that wrap a [`LabelController`](crate::core::LabelController) can add
//! their own spans around render passes so controller events nest under them:
//!
//! ```rust
//! use tracing::{span, Level};
//!
//! let render_span = span!(Level::DEBUG, "render_edge", edge = "edge-button");
//! let _enter = render_span.enter();
//! // controller.update_geometry(...) events are recorded inside this span
//! ```
//!
//! # Filtering Logs
//!
//! You can filter logs by component using the log level syntax:
//!
//! ```bash
//! # Show only controller logs at debug level
//! RUST_LOG="snaplabel::core::controller=debug" snaplabel simulate -i script.json
//!
//! # Show all logs at info level, but drag sessions at trace level
//! RUST_LOG="info,snaplabel::core::drag=trace" snaplabel simulate -i script.json
//! ```

use std::str::FromStr;

#[cfg(not(target_arch = "wasm32"))]
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

#[cfg(target_arch = "wasm32")]
use tracing_wasm::WASMLayerConfig;

/// Environment variable consulted for the log level
pub const LOG_LEVEL_ENV: &str = "SNAPLABEL_LOG_LEVEL";

/// Environment variable consulted for the log format
pub const LOG_FORMAT_ENV: &str = "SNAPLABEL_LOG_FORMAT";

/// Log format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Compact single-line format
    #[default]
    Compact,
    /// Pretty multi-line format with colors
    Pretty,
    /// JSON format for log aggregation
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

impl LogFormat {
    /// Get all valid format names
    pub fn variants() -> &'static [&'static str] {
        &["compact", "pretty", "json"]
    }
}

/// Level filter and format after applying argument, environment and default
/// precedence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// `EnvFilter` directive string, e.g. `info` or `snaplabel::core=trace`
    pub filter: String,
    pub format: LogFormat,
}

impl LogSettings {
    /// Resolve settings from explicit values, falling back to the process
    /// environment and then to `info` / `compact`
    pub fn resolve(level: Option<&str>, format: Option<&str>) -> Result<Self, String> {
        Self::resolve_with(level, format, |key| std::env::var(key).ok())
    }

    /// [`LogSettings::resolve`] with an injectable environment lookup
    pub fn resolve_with(
        level: Option<&str>,
        format: Option<&str>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, String> {
        let filter = level
            .map(str::to_string)
            .or_else(|| env(LOG_LEVEL_ENV))
            .or_else(|| env("RUST_LOG"))
            .unwrap_or_else(|| "info".to_string());
        let format = match format.map(str::to_string).or_else(|| env(LOG_FORMAT_ENV)) {
            Some(name) => LogFormat::from_str(&name)?,
            None => LogFormat::default(),
        };
        Ok(Self { filter, format })
    }
}

/// Initialize the tracing subscriber with the given log level and format
///
/// # Arguments
///
/// * `level` - Optional log level or filter directive (trace|debug|info|warn|error|off).
///            If None, uses `SNAPLABEL_LOG_LEVEL` or `RUST_LOG`, or defaults to `info`.
///            An unparseable directive falls back to `info`.
/// * `format` - Optional log format (compact|pretty|json).
///             If None, uses `SNAPLABEL_LOG_FORMAT`, or defaults to `compact`.
///
/// # Returns
///
/// Returns an error for an unknown format or if a global subscriber is
/// already installed.
///
/// # Example
///
/// ```rust
/// use snaplabel::core::logging::init_logging;
///
/// // Initialize with defaults
/// if let Err(e) = init_logging(None, None) {
///     eprintln!("logging already configured: {}", e);
/// }
/// ```
pub fn init_logging(
    level: Option<&str>,
    format: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let settings =
        LogSettings::resolve(level, format).map_err(|e| format!("Invalid log format: {}", e))?;

    #[cfg(target_arch = "wasm32")]
    {
        // Browser console output; neither filter nor format apply here
        let _ = settings;
        tracing_wasm::set_as_global_default_with_config(WASMLayerConfig::default());
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let filter = if settings.filter == "off" {
            EnvFilter::new("off")
        } else {
            EnvFilter::try_new(&settings.filter).unwrap_or_else(|_| EnvFilter::new("info"))
        };

        let registry = Registry::default().with(filter);
        match settings.format {
            LogFormat::Compact => registry
                .with(
                    fmt::Layer::default()
                        .with_target(false)
                        .with_span_events(FmtSpan::NONE),
                )
                .try_init()?,
            LogFormat::Pretty => registry
                .with(
                    fmt::Layer::default()
                        .with_file(true)
                        .with_line_number(true)
                        .with_span_events(FmtSpan::ACTIVE)
                        .pretty(),
                )
                .try_init()?,
            LogFormat::Json => registry
                .with(
                    fmt::Layer::default()
                        .with_file(true)
                        .with_line_number(true)
                        .with_span_events(FmtSpan::CLOSE)
                        .json(),
                )
                .try_init()?,
        }
        Ok(())
    }
}

/// Initialize logging with default settings (info level, compact format)
pub fn init_default_logging() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(None, None)
}
