//! Browser-side checks for the JavaScript surface.
//!
//! Run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use js_sys::{Array, Function};
use tidy_tree_wasm::TidyTreeWasm;
use wasm_bindgen::prelude::*;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn options(json: &str) -> JsValue {
    js_sys::JSON::parse(json).unwrap()
}

fn ok<T>(result: Result<T, JsError>) -> T {
    result.map_err(JsValue::from).unwrap()
}

#[wasm_bindgen_test]
fn compute_returns_flat_positions() {
    let mut layout = ok(TidyTreeWasm::new(JsValue::UNDEFINED));
    let positions = ok(layout.compute(&[0, 1, 2, 3], &[0, 1, 0, 2, 0, 3]));
    assert_eq!(
        positions.to_vec(),
        vec![0.0, 0.0, -1.0, 1.0, 0.0, 1.0, 1.0, 1.0]
    );
    assert!(!layout.is_running());
}

#[wasm_bindgen_test]
fn options_are_read_from_a_js_object() {
    let mut layout = ok(TidyTreeWasm::new(options(
        r#"{"siblingDistance": 20, "levelSeparation": 50, "durationMs": 400}"#,
    )));
    assert_eq!(layout.duration_ms(), 400.0);

    let positions = ok(layout.compute(&[0, 1, 2], &[0, 1, 0, 2]));
    assert_eq!(positions.to_vec(), vec![0.0, 0.0, -10.0, 50.0, 10.0, 50.0]);
}

#[wasm_bindgen_test]
fn invalid_options_are_rejected() {
    assert!(TidyTreeWasm::new(options(r#"{"siblingDistance": -1}"#)).is_err());
}

#[wasm_bindgen_test]
fn malformed_input_is_an_error() {
    let mut layout = ok(TidyTreeWasm::new(JsValue::NULL));
    assert!(layout.compute(&[0, 1], &[0]).is_err());
    assert!(layout.compute(&[0, 1, 2], &[0, 2, 1, 2]).is_err());
    assert!(layout.compute(&[], &[]).is_err());
}

#[wasm_bindgen_test]
fn listener_sees_lifecycle_events() {
    let mut layout = ok(TidyTreeWasm::new(JsValue::UNDEFINED));
    let seen = Array::new();
    let push = Function::new_with_args("event", "this.push(event)").bind(&seen);
    layout.on_event(push);

    ok(layout.compute(&[0, 1], &[0, 1]));
    let _ = layout.compute(&[0, 1], &[]);
    ok(layout.transition_frame(&[0.0; 4], 0.0));
    ok(layout.transition_frame(&[0.0; 4], 10.0));

    let names: Vec<String> = seen.iter().filter_map(|v| v.as_string()).collect();
    assert_eq!(names, vec!["start", "stop", "start", "abort", "interpolate"]);
}

#[wasm_bindgen_test]
fn spatial_queries_follow_the_last_layout() {
    let mut layout = ok(TidyTreeWasm::new(JsValue::UNDEFINED));
    ok(layout.compute(&[7, 8, 9], &[7, 8, 7, 9]));

    assert_eq!(layout.find_nearest_node(0.4, 1.1), Some(9));
    assert_eq!(layout.find_nearest_node_within(0.0, 5.0, 0.5), None);

    let mut hits = layout.find_nodes_in_rect(-1.0, 0.5, 1.0, 1.5);
    hits.sort();
    assert_eq!(hits, vec![8, 9]);
}

#[wasm_bindgen_test]
fn transition_frames_end_at_the_layout() {
    let mut layout = ok(TidyTreeWasm::new(options(
        r#"{"easing": "linear", "durationMs": 100}"#,
    )));
    let target = ok(layout.compute(&[0, 1], &[0, 1])).to_vec();

    let from = [4.0, 4.0, 4.0, 4.0];
    let half = ok(layout.transition_frame(&from, 50.0)).to_vec();
    assert_eq!(half, vec![2.0, 2.0, 2.0, 2.5]);

    let end = ok(layout.transition_frame(&from, 100.0)).to_vec();
    assert_eq!(end, target);

    assert!(layout.transition_frame(&[0.0], 10.0).is_err());
}
