//! WebAssembly bindings for snaplabel
//!
//! Exposes an `EdgeLabel` class a browser host can drive from its render
//! loop: feed it handle coordinates on every render, call `tick` with
//! `performance.now()`, forward pointer events, and copy `transform_css()` /
//! `path_d()` onto the label element and the SVG path.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use std::time::Duration;

#[cfg(target_arch = "wasm32")]
use crate::core::{
    step_path, EdgeGeometry, HandlePosition, LabelConfig, LabelController, LabelElement, Point,
    Polyline, STEP_OFFSET,
};

/// Initialize WASM module
///
/// Sets up panic hooks and logging for better error messages in the browser.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    use crate::core::logging::init_logging;
    let _ = init_logging(Some("info"), None);
}

#[cfg(target_arch = "wasm32")]
fn parse_handle(name: &str) -> Result<HandlePosition, JsValue> {
    name.parse::<HandlePosition>().map_err(|e| {
        JsValue::from_str(&format!("{}. Use 'top', 'right', 'bottom' or 'left'", e))
    })
}

#[cfg(target_arch = "wasm32")]
fn millis(now_ms: f64) -> Duration {
    Duration::from_secs_f64(now_ms.max(0.0) / 1000.0)
}

/// A draggable label bound to one edge
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub struct EdgeLabel {
    controller: LabelController<Polyline, LabelElement>,
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl EdgeLabel {
    /// Create a label, optionally starting at `initial_index` (0..100)
    #[wasm_bindgen(constructor)]
    pub fn new(initial_index: Option<usize>) -> EdgeLabel {
        let mut config = LabelConfig::default();
        if let Some(index) = initial_index {
            config = config.with_initial_index(index);
        }
        EdgeLabel {
            controller: LabelController::new(config),
        }
    }

    /// Report the edge's handles for this render
    ///
    /// The first call mounts the label; later calls only act when the
    /// coordinates changed.
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        source_x: f64,
        source_y: f64,
        source_handle: &str,
        target_x: f64,
        target_y: f64,
        target_handle: &str,
        now_ms: f64,
    ) -> Result<bool, JsValue> {
        let source = Point::new(source_x, source_y);
        let target = Point::new(target_x, target_y);
        let routed = step_path(
            source,
            parse_handle(source_handle)?,
            target,
            parse_handle(target_handle)?,
            STEP_OFFSET,
        );
        let geometry = EdgeGeometry::new(source, target);
        let now = millis(now_ms);
        if self.controller.is_mounted() {
            Ok(self.controller.update_geometry(geometry, routed.path, now))
        } else {
            self.controller
                .mount(LabelElement::new(), routed.path, geometry, now);
            Ok(true)
        }
    }

    /// Run a due drag session rebuild
    pub fn tick(&mut self, now_ms: f64) -> bool {
        self.controller.tick(millis(now_ms))
    }

    pub fn press(&mut self, x: f64, y: f64) {
        self.controller.press(Point::new(x, y));
    }

    /// Returns true if the label moved to a new snap point
    pub fn drag(&mut self, x: f64, y: f64) -> bool {
        self.controller.drag(Point::new(x, y)).is_some()
    }

    /// Returns the new label index after a drop, or undefined for a click
    pub fn release(&mut self) -> Option<usize> {
        self.controller.release()
    }

    pub fn index(&self) -> usize {
        self.controller.index()
    }

    /// CSS `transform` for the label element
    pub fn transform_css(&self) -> String {
        self.controller
            .label()
            .map(|l| l.current().to_css())
            .unwrap_or_default()
    }

    /// SVG `d` attribute for the edge path
    pub fn path_d(&self) -> String {
        self.controller
            .path()
            .map(|p| p.to_svg_path())
            .unwrap_or_default()
    }

    /// Tear down before the host removes the edge
    pub fn unmount(&mut self) {
        self.controller.unmount();
    }
}
