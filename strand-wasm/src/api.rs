use crate::{error, interop, VectorPath};
use js_sys::Uint32Array;
use serde::Deserialize;
use strand::interaction::Modifiers;
use strand::model::{ImageInfo, PathConfig, Stage, Vec2};
use strand::transform::TransformUpdate;
use strand::Path;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

const MOD_SHIFT: u8 = 1;
const MOD_ALT: u8 = 2;
const MOD_CTRL: u8 = 4;

fn mods_from_bits(bits: u8) -> Modifiers {
    Modifiers {
        shift: bits & MOD_SHIFT != 0,
        alt: bits & MOD_ALT != 0,
        ctrl: bits & MOD_CTRL != 0,
    }
}

/// Incremental transform update as reported by the transform surface.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateIn {
    positions: Vec<PositionIn>,
    rotation: f32,
    scale_x: f32,
    scale_y: f32,
}

#[derive(Deserialize)]
struct PositionIn {
    id: u32,
    x: f32,
    y: f32,
}

#[wasm_bindgen]
impl VectorPath {
    /// `config` is the tag-configuration options object; unknown or
    /// missing fields fall back to defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue, width: f32, height: f32, rotation: f32) -> VectorPath {
        let config: PathConfig = match serde_wasm_bindgen::from_value(config) {
            Ok(c) => c,
            Err(e) => {
                web_sys::console::warn_1(&JsValue::from_str(&format!(
                    "strand: invalid config, using defaults: {}",
                    e
                )));
                PathConfig::default()
            }
        };
        let image = ImageInfo { width, height, rotation };
        VectorPath::rs_new(config, image)
    }

    // Pointer/keyboard surface

    pub fn pointer_down(&mut self, x: f32, y: f32, mods: u8) -> JsValue {
        if !x.is_finite() {
            return error::non_finite("x");
        }
        if !y.is_finite() {
            return error::non_finite("y");
        }
        match self.inner.pointer_down(x, y, mods_from_bits(mods)) {
            Ok(outcome) => error::ok(serde_wasm_bindgen::to_value(&outcome).unwrap_or(JsValue::NULL)),
            Err(e) => error::from_strand(&e),
        }
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) -> JsValue {
        let outcome = self.inner.pointer_move(x, y);
        serde_wasm_bindgen::to_value(&outcome).unwrap_or(JsValue::NULL)
    }

    pub fn pointer_up(&mut self) -> JsValue {
        let outcome = self.inner.pointer_up();
        serde_wasm_bindgen::to_value(&outcome).unwrap_or(JsValue::NULL)
    }

    pub fn key_escape(&mut self) -> JsValue {
        let outcome = self.inner.key_escape();
        serde_wasm_bindgen::to_value(&outcome).unwrap_or(JsValue::NULL)
    }

    pub fn hit_test(&self, x: f32, y: f32) -> JsValue {
        match self.inner.path().hit_test(x, y) {
            Some(hit) => serde_wasm_bindgen::to_value(&hit).unwrap_or(JsValue::NULL),
            None => JsValue::NULL,
        }
    }

    // Direct point-graph operations

    pub fn add_point(&mut self, x: f32, y: f32) -> JsValue {
        if !x.is_finite() {
            return error::non_finite("x");
        }
        if !y.is_finite() {
            return error::non_finite("y");
        }
        match self.inner.path_mut().add_point(x, y) {
            Ok(id) => error::ok(JsValue::from_f64(id as f64)),
            Err(e) => error::from_strand(&e),
        }
    }

    pub fn insert_on_segment(&mut self, a: u32, b: u32, x: f32, y: f32) -> JsValue {
        match self.inner.path_mut().insert_on_segment(a, b, x, y) {
            Ok(id) => error::ok(JsValue::from_f64(id as f64)),
            Err(e) => error::from_strand(&e),
        }
    }

    pub fn delete_point(&mut self, id: u32) -> bool {
        self.inner.path_mut().delete_point(id)
    }

    pub fn convert_point(&mut self, id: u32) -> bool {
        self.inner.path_mut().convert_point(id)
    }

    pub fn disconnect_handles(&mut self, id: u32) -> bool {
        self.inner.path_mut().disconnect_handles(id)
    }

    pub fn move_point(&mut self, id: u32, x: f32, y: f32) -> bool {
        x.is_finite() && y.is_finite() && self.inner.path_mut().move_point(id, x, y)
    }

    pub fn move_handle(&mut self, id: u32, which: u8, x: f32, y: f32) -> bool {
        x.is_finite() && y.is_finite() && self.inner.path_mut().move_handle(id, which, x, y)
    }

    pub fn close_path(&mut self) -> JsValue {
        match self.inner.path_mut().close_path() {
            Ok(()) => error::ok(JsValue::TRUE),
            Err(e) => error::from_strand(&e),
        }
    }

    pub fn finalize_path(&mut self) -> JsValue {
        match self.inner.path_mut().finalize() {
            Ok(()) => error::ok(JsValue::TRUE),
            Err(e) => error::from_strand(&e),
        }
    }

    pub fn break_at(&mut self, id: u32) -> JsValue {
        match self.inner.path_mut().break_at(id) {
            Ok(()) => error::ok(JsValue::TRUE),
            Err(e) => error::from_strand(&e),
        }
    }

    pub fn set_branch_active(&mut self, id: u32) -> bool {
        self.inner.path_mut().set_branch_active(id)
    }

    // Selection

    pub fn select_point(&mut self, id: u32) -> bool {
        self.inner.path_mut().select_point(id)
    }

    pub fn toggle_select(&mut self, id: u32) -> bool {
        self.inner.path_mut().toggle_select(id)
    }

    pub fn select_all(&mut self) {
        self.inner.path_mut().select_all()
    }

    pub fn clear_selection(&mut self) {
        self.inner.path_mut().clear_selection()
    }

    pub fn selected(&self) -> Uint32Array {
        interop::arr_u32(&self.inner.path().selected())
    }

    // Transform gestures

    pub fn begin_transform(&mut self, rotation: f32, scale_x: f32, scale_y: f32, cx: f32, cy: f32) -> bool {
        self.inner
            .begin_transform(rotation, Vec2::new(scale_x, scale_y), Vec2::new(cx, cy))
    }

    pub fn update_transform(&mut self, update: JsValue) -> JsValue {
        let parsed: UpdateIn = match serde_wasm_bindgen::from_value(update) {
            Ok(u) => u,
            Err(e) => return error::err("bad_update", format!("invalid transform update: {}", e), None),
        };
        let update = TransformUpdate {
            positions: parsed
                .positions
                .iter()
                .map(|p| (p.id, Vec2::new(p.x, p.y)))
                .collect(),
            rotation: parsed.rotation,
            scale: Vec2::new(parsed.scale_x, parsed.scale_y),
        };
        error::ok(JsValue::from_bool(self.inner.update_transform(&update)))
    }

    pub fn end_transform(&mut self) {
        self.inner.end_transform()
    }

    // Introspection

    pub fn point_count(&self) -> u32 {
        self.inner.path().point_count()
    }

    pub fn get_point(&self, id: u32) -> JsValue {
        let Some(p) = self.inner.path().get_point(id) else {
            return JsValue::NULL;
        };
        let o = interop::new_obj();
        interop::set_kv(&o, "id", &JsValue::from_f64(p.id as f64));
        interop::set_kv(&o, "x", &JsValue::from_f64(p.x as f64));
        interop::set_kv(&o, "y", &JsValue::from_f64(p.y as f64));
        match p.prev {
            Some(prev) => interop::set_kv(&o, "prevPointId", &JsValue::from_f64(prev as f64)),
            None => interop::set_kv(&o, "prevPointId", &JsValue::NULL),
        }
        interop::set_kv(&o, "isBezier", &JsValue::from_bool(p.bezier.is_some()));
        if let Some(h) = p.bezier {
            interop::set_kv(&o, "controlPoint1", &interop::arr_f32(&[h.c1.x, h.c1.y]).into());
            interop::set_kv(&o, "controlPoint2", &interop::arr_f32(&[h.c2.x, h.c2.y]).into());
        }
        interop::set_kv(&o, "disconnected", &JsValue::from_bool(p.disconnected));
        o.into()
    }

    pub fn chain_order(&self) -> Uint32Array {
        interop::arr_u32(&self.inner.path().chain_order())
    }

    pub fn is_closed(&self) -> bool {
        self.inner.path().closed()
    }

    pub fn stage(&self) -> String {
        match self.inner.path().stage() {
            Stage::Empty => "empty",
            Stage::Drawing => "drawing",
            Stage::Closed => "closed",
            Stage::Finalized => "finalized",
        }
        .to_string()
    }

    pub fn set_labels(&mut self, labels: JsValue) -> JsValue {
        match serde_wasm_bindgen::from_value::<Vec<String>>(labels) {
            Ok(labels) => {
                self.inner.path_mut().set_labels(labels);
                error::ok(JsValue::TRUE)
            }
            Err(e) => error::err("bad_labels", format!("invalid labels: {}", e), None),
        }
    }

    // Result serialization

    pub fn export_result(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.inner.path().to_result()).unwrap_or(JsValue::NULL)
    }

    pub fn export_json(&self) -> String {
        self.inner.path().to_result().to_string()
    }

    /// Replace this path's contents with an imported result, keeping the
    /// current configuration.
    pub fn load_json(&mut self, result: &str) -> JsValue {
        let value: serde_json::Value = match serde_json::from_str(result) {
            Ok(v) => v,
            Err(e) => return error::err("malformed_result", format!("invalid json: {}", e), None),
        };
        let config = self.inner.path().config().clone();
        match Path::from_result(&value, config) {
            Ok(path) => {
                self.inner = strand::interaction::Editor::new(path);
                error::ok(JsValue::TRUE)
            }
            Err(e) => error::from_strand(&e),
        }
    }
}
