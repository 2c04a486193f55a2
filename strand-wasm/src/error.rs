use js_sys::{Object, Reflect};
use strand::error::StrandError;
use wasm_bindgen::prelude::*;

fn set_kv(obj: &Object, k: &str, v: &JsValue) { let _ = Reflect::set(obj, &JsValue::from_str(k), v); }

fn new_obj() -> Object { Object::new() }

pub fn ok(v: JsValue) -> JsValue {
    let o = new_obj();
    set_kv(&o, "ok", &JsValue::from_bool(true));
    set_kv(&o, "value", &v);
    o.into()
}

pub fn err(code: &'static str, message: impl Into<String>, data: Option<JsValue>) -> JsValue {
    let root = new_obj();
    set_kv(&root, "ok", &JsValue::from_bool(false));
    let e = new_obj();
    set_kv(&e, "code", &JsValue::from_str(code));
    set_kv(&e, "message", &JsValue::from_str(&message.into()));
    if let Some(d) = data { set_kv(&e, "data", &d); }
    set_kv(&root, "error", &e.into());
    root.into()
}

/// Map a core error onto the structured envelope.
pub fn from_strand(e: &StrandError) -> JsValue {
    let data = match e {
        StrandError::InvalidPointFormat { index } => {
            let d = new_obj();
            set_kv(&d, "index", &JsValue::from_f64(*index as f64));
            Some(d.into())
        }
        StrandError::TooFewPoints { got, min } => {
            let d = new_obj();
            set_kv(&d, "got", &JsValue::from_f64(*got as f64));
            set_kv(&d, "min", &JsValue::from_f64(*min as f64));
            Some(d.into())
        }
        StrandError::TooManyPoints { max } => {
            let d = new_obj();
            set_kv(&d, "max", &JsValue::from_f64(*max as f64));
            Some(d.into())
        }
        StrandError::InsufficientPoints { got } => {
            let d = new_obj();
            set_kv(&d, "got", &JsValue::from_f64(*got as f64));
            Some(d.into())
        }
        StrandError::PathClosed => None,
        StrandError::MalformedResult { reason } => {
            let d = new_obj();
            set_kv(&d, "reason", &JsValue::from_str(reason));
            Some(d.into())
        }
    };
    err(e.code(), e.to_string(), data)
}

#[inline]
pub fn non_finite(param: &str) -> JsValue {
    let d = new_obj(); set_kv(&d, "param", &JsValue::from_str(param));
    err("non_finite", format!("parameter '{}' must be finite", param), Some(d.into()))
}
