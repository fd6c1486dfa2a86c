//! Tests for logging functionality
//!
//! These tests verify that logging initialization and settings resolution
//! work correctly with different configurations.

use snaplabel::core::logging::{
    init_logging, LogFormat, LogSettings, LOG_FORMAT_ENV, LOG_LEVEL_ENV,
};
use std::str::FromStr;

#[test]
fn test_log_format_parsing() {
    assert_eq!(LogFormat::from_str("compact").unwrap(), LogFormat::Compact);
    assert_eq!(LogFormat::from_str("pretty").unwrap(), LogFormat::Pretty);
    assert_eq!(LogFormat::from_str("json").unwrap(), LogFormat::Json);
    assert_eq!(LogFormat::from_str(" JSON ").unwrap(), LogFormat::Json);
    assert!(LogFormat::from_str("invalid").is_err());
}

#[test]
fn test_log_format_variants() {
    let variants = LogFormat::variants();
    assert!(variants.contains(&"compact"));
    assert!(variants.contains(&"pretty"));
    assert!(variants.contains(&"json"));
}

#[test]
fn test_settings_prefer_arguments() {
    let settings = LogSettings::resolve_with(Some("debug"), Some("json"), |_| {
        Some("trace".to_string())
    })
    .unwrap();
    assert_eq!(settings.filter, "debug");
    assert_eq!(settings.format, LogFormat::Json);
}

#[test]
fn test_settings_fall_back_to_environment() {
    let env = |key: &str| match key {
        LOG_LEVEL_ENV => Some("snaplabel::core=trace".to_string()),
        LOG_FORMAT_ENV => Some("pretty".to_string()),
        _ => None,
    };
    let settings = LogSettings::resolve_with(None, None, env).unwrap();
    assert_eq!(settings.filter, "snaplabel::core=trace");
    assert_eq!(settings.format, LogFormat::Pretty);
}

#[test]
fn test_settings_rust_log_and_defaults() {
    let env = |key: &str| (key == "RUST_LOG").then(|| "warn".to_string());
    let settings = LogSettings::resolve_with(None, None, env).unwrap();
    assert_eq!(settings.filter, "warn");
    assert_eq!(settings.format, LogFormat::Compact);

    let settings = LogSettings::resolve_with(None, None, |_| None).unwrap();
    assert_eq!(settings.filter, "info");
}

#[test]
fn test_settings_reject_unknown_format() {
    assert!(LogSettings::resolve_with(None, Some("xml"), |_| None).is_err());
}

#[test]
fn test_init_logging_with_levels() {
    // Only the first call can install the global subscriber; the rest must
    // fail gracefully rather than panic
    let _ = init_logging(Some("trace"), Some("compact"));
    let _ = init_logging(Some("debug"), Some("pretty"));
    let _ = init_logging(Some("off"), Some("json"));
    let _ = init_logging(Some("invalid_level"), Some("compact"));
}

#[test]
fn test_init_logging_invalid_format() {
    let result = init_logging(Some("info"), Some("invalid_format"));
    assert!(result.is_err());
}

mod captured_events {
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use snaplabel::prelude::*;
    use tracing::Level;
    use tracing_subscriber::fmt::MakeWriter;

    /// Shared buffer a test subscriber writes into
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn capture(level: Level, f: impl FnOnce()) -> String {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(captured.clone())
            .with_max_level(level)
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        captured.contents()
    }

    #[test]
    fn test_drop_logs_index_update() {
        let output = capture(Level::INFO, || {
            let source = Point::new(0.0, 0.0);
            let target = Point::new(200.0, 0.0);
            let mut controller = LabelController::new(LabelConfig::default());
            controller.mount(
                LabelElement::new(),
                Polyline::straight(source, target),
                EdgeGeometry::new(source, target),
                Duration::ZERO,
            );
            controller.tick(Duration::from_millis(500));
            controller.press(Point::new(100.0, 0.0));
            controller.drag(Point::new(60.0, 0.0));
            controller.release();
        });
        assert!(output.contains("Updated edge label position"));
        assert!(output.contains("index=30"));
        assert!(output.contains("previous=50"));
    }

    #[test]
    fn test_clamped_index_warns() {
        let output = capture(Level::WARN, || {
            let _controller: LabelController<Polyline, LabelElement> =
                LabelController::new(LabelConfig::default().with_initial_index(500));
        });
        assert!(output.contains("WARN"));
        assert!(output.contains("Initial label index out of range"));
        assert!(output.contains("requested=500"));
    }

    #[test]
    fn test_rebuild_is_debug_level() {
        let run = || {
            let source = Point::new(0.0, 0.0);
            let target = Point::new(0.0, 80.0);
            let mut controller = LabelController::new(LabelConfig::default());
            controller.mount(
                LabelElement::new(),
                Polyline::straight(source, target),
                EdgeGeometry::new(source, target),
                Duration::ZERO,
            );
            controller.tick(Duration::from_millis(500));
        };
        assert!(!capture(Level::INFO, run).contains("Drag session rebuilt"));
        assert!(capture(Level::DEBUG, run).contains("Drag session rebuilt"));
    }

    #[test]
    fn test_demo_scene_builds_without_errors() {
        let output = capture(Level::ERROR, || {
            let scene = snaplabel::scene::Scene::demo(LabelConfig::default());
            assert_eq!(scene.edges().len(), 1);
        });
        assert!(!output.contains("Demo edge not created"));
        assert!(output.is_empty());
    }
}
