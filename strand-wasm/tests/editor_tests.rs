use js_sys::{Object, Reflect};
use strand_wasm::VectorPath;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

const MOD_NONE: u8 = 0;

fn config(entries: &[(&str, JsValue)]) -> JsValue {
    let o = Object::new();
    for (k, v) in entries {
        let _ = Reflect::set(&o, &JsValue::from_str(k), v);
    }
    o.into()
}

fn unwrap_ok(v: &JsValue) -> JsValue {
    let ok = Reflect::get(v, &JsValue::from_str("ok"))
        .ok()
        .and_then(|x| x.as_bool())
        .unwrap_or(false);
    assert!(ok, "expected ok envelope");
    Reflect::get(v, &JsValue::from_str("value")).unwrap()
}

fn event_of(v: &JsValue) -> String {
    Reflect::get(v, &JsValue::from_str("event"))
        .ok()
        .and_then(|x| x.as_string())
        .unwrap_or_default()
}

#[wasm_bindgen_test]
fn draw_close_and_export() {
    let mut p = VectorPath::new(
        config(&[("closable", JsValue::TRUE)]),
        1920.0,
        1080.0,
        0.0,
    );
    for (x, y) in [(10.0, 10.0), (50.0, 10.0), (50.0, 50.0)] {
        let out = unwrap_ok(&p.pointer_down(x, y, MOD_NONE));
        assert_eq!(event_of(&out), "point_added");
    }
    assert_eq!(p.point_count(), 3);
    assert_eq!(p.stage(), "drawing");

    // Clicking the first point again closes the ring.
    let out = unwrap_ok(&p.pointer_down(10.0, 10.0, MOD_NONE));
    assert_eq!(event_of(&out), "path_closed");
    assert!(p.is_closed());
    assert_eq!(p.stage(), "closed");

    let exported: serde_json::Value = serde_json::from_str(&p.export_json()).unwrap();
    assert_eq!(exported["value"]["closed"], serde_json::json!(true));
    assert_eq!(exported["value"]["vertices"].as_array().unwrap().len(), 3);
    assert_eq!(exported["original_width"], serde_json::json!(1920.0));
    assert_eq!(exported["original_height"], serde_json::json!(1080.0));
}

#[wasm_bindgen_test]
fn drag_moves_a_vertex() {
    let mut p = VectorPath::new(config(&[]), 1000.0, 1000.0, 0.0);
    for (x, y) in [(10.0, 10.0), (50.0, 10.0), (50.0, 50.0)] {
        unwrap_ok(&p.pointer_down(x, y, MOD_NONE));
    }
    // Click the last-added point to finalize, then drag the middle one.
    let out = unwrap_ok(&p.pointer_down(50.0, 50.0, MOD_NONE));
    assert_eq!(event_of(&out), "path_finalized");

    unwrap_ok(&p.pointer_down(50.0, 10.0, MOD_NONE));
    p.pointer_move(55.0, 15.0);
    p.pointer_up();

    let order = p.chain_order();
    let id = order.get_index(1);
    let pt = p.get_point(id);
    let x = Reflect::get(&pt, &JsValue::from_str("x")).unwrap().as_f64().unwrap();
    let y = Reflect::get(&pt, &JsValue::from_str("y")).unwrap().as_f64().unwrap();
    assert!((x - 55.0).abs() < 1e-3 && (y - 15.0).abs() < 1e-3);
}

#[wasm_bindgen_test]
fn hit_test_distinguishes_vertices_and_segments() {
    let mut p = VectorPath::new(config(&[]), 100.0, 100.0, 0.0);
    for (x, y) in [(10.0, 10.0), (50.0, 10.0)] {
        unwrap_ok(&p.pointer_down(x, y, MOD_NONE));
    }
    let hit = p.hit_test(10.0, 10.0);
    let kind = Reflect::get(&hit, &JsValue::from_str("kind")).unwrap().as_string().unwrap();
    assert_eq!(kind, "vertex");

    let hit = p.hit_test(30.0, 10.0);
    let kind = Reflect::get(&hit, &JsValue::from_str("kind")).unwrap().as_string().unwrap();
    assert_eq!(kind, "segment");

    assert!(p.hit_test(80.0, 80.0).is_null());
}

#[wasm_bindgen_test]
fn export_import_round_trips() {
    let mut p = VectorPath::new(config(&[("closable", JsValue::TRUE)]), 640.0, 480.0, 90.0);
    for (x, y) in [(10.0, 10.0), (40.0, 10.0), (40.0, 40.0), (10.0, 40.0)] {
        unwrap_ok(&p.pointer_down(x, y, MOD_NONE));
    }
    unwrap_ok(&p.pointer_down(10.0, 10.0, MOD_NONE)); // close
    let labels = serde_wasm_bindgen::to_value(&vec!["building".to_string()]).unwrap();
    unwrap_ok(&p.set_labels(labels));
    let first = p.export_json();

    let mut q = VectorPath::new(config(&[("closable", JsValue::TRUE)]), 640.0, 480.0, 90.0);
    unwrap_ok(&q.load_json(&first));
    assert!(q.is_closed());
    assert_eq!(q.point_count(), 4);

    let a: serde_json::Value = serde_json::from_str(&first).unwrap();
    let b: serde_json::Value = serde_json::from_str(&q.export_json()).unwrap();
    assert_eq!(a, b);
}

#[wasm_bindgen_test]
fn selection_surface() {
    let mut p = VectorPath::new(config(&[]), 100.0, 100.0, 0.0);
    for (x, y) in [(10.0, 10.0), (50.0, 10.0), (50.0, 50.0)] {
        unwrap_ok(&p.pointer_down(x, y, MOD_NONE));
    }
    p.select_all();
    assert_eq!(p.selected().length(), 3);
    p.clear_selection();
    assert_eq!(p.selected().length(), 0);
}

#[wasm_bindgen_test]
fn invalid_config_falls_back_to_defaults() {
    let mut p = VectorPath::new(JsValue::from_str("not an object"), 100.0, 100.0, 0.0);
    unwrap_ok(&p.pointer_down(10.0, 10.0, MOD_NONE));
    assert_eq!(p.point_count(), 1);
}
