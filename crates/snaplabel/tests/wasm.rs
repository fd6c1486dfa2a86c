//! Browser-side tests for the `EdgeLabel` bindings
//!
//! Run with `wasm-pack test --headless --firefox crates/snaplabel`.

#![cfg(target_arch = "wasm32")]

use snaplabel::wasm::EdgeLabel;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn label_mounts_at_midpoint() {
    let mut label = EdgeLabel::new(None);
    assert!(label
        .update(0.0, 0.0, "bottom", 0.0, 200.0, "top", 0.0)
        .is_ok());
    assert_eq!(label.index(), 50);
    assert_eq!(
        label.transform_css(),
        "translate(-50%, -50%) translate3d(0px, 100px, 0px)"
    );
    assert_eq!(label.path_d(), "M0 0 L0 20 L0 100 L0 180 L0 200");
}

#[wasm_bindgen_test]
fn drag_after_debounce() {
    let mut label = EdgeLabel::new(Some(50));
    label
        .update(0.0, 0.0, "right", 200.0, 0.0, "left", 0.0)
        .unwrap();
    assert!(label.tick(500.0));
    label.press(100.0, 0.0);
    assert!(label.drag(40.0, 5.0));
    assert_eq!(label.release(), Some(20));
}

#[wasm_bindgen_test]
fn unknown_handle_is_rejected() {
    let mut label = EdgeLabel::new(None);
    assert!(label
        .update(0.0, 0.0, "middle", 0.0, 200.0, "top", 0.0)
        .is_err());
}
