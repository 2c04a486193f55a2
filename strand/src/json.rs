use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::StrandError;
use crate::model::{Handles, ImageInfo, PathConfig, Point, Vec2};
use crate::Path;

/// One serialized vertex of the result format. Coordinates are percent
/// of the image (0..100); `isBranching` is derived on export and ignored
/// on import.
#[derive(Serialize, Deserialize)]
struct VertexRepr {
    id: u32,
    x: f32,
    y: f32,
    #[serde(rename = "prevPointId", default)]
    prev_point_id: Option<u32>,
    #[serde(rename = "isBezier", default, skip_serializing_if = "is_false")]
    is_bezier: bool,
    #[serde(rename = "controlPoint1", default, skip_serializing_if = "Option::is_none")]
    control_point1: Option<Vec2>,
    #[serde(rename = "controlPoint2", default, skip_serializing_if = "Option::is_none")]
    control_point2: Option<Vec2>,
    #[serde(default, skip_serializing_if = "is_false")]
    disconnected: bool,
    #[serde(rename = "isBranching", default, skip_serializing_if = "is_false")]
    is_branching: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

pub fn export_impl(path: &Path) -> Value {
    let mut vertices = Vec::with_capacity(path.points().len());
    for id in path.chain_order() {
        let p = match path.get_point(id) {
            Some(p) => p,
            None => continue,
        };
        vertices.push(VertexRepr {
            id: p.id,
            x: p.x,
            y: p.y,
            prev_point_id: p.prev,
            is_bezier: p.bezier.is_some(),
            control_point1: p.bezier.map(|h| h.c1),
            control_point2: p.bezier.map(|h| h.c2),
            disconnected: p.disconnected,
            is_branching: path.is_branching(p.id),
        });
    }

    let mut value = Map::new();
    value.insert(
        "vertices".to_string(),
        serde_json::to_value(vertices).unwrap_or(Value::Null),
    );
    value.insert("closed".to_string(), Value::Bool(path.closed()));
    value.insert(
        path.config().label_attr.clone(),
        json!(path.labels()),
    );

    let img = path.image();
    json!({
        "value": Value::Object(value),
        "original_width": img.width,
        "original_height": img.height,
        "image_rotation": img.rotation,
    })
}

pub fn import_impl(value: &Value, config: PathConfig) -> Result<Path, StrandError> {
    let obj = value.as_object().ok_or_else(|| malformed("result is not an object"))?;
    let inner = obj
        .get("value")
        .and_then(|v| v.as_object())
        .ok_or_else(|| malformed("missing result value"))?;
    let vertices_value = inner
        .get("vertices")
        .ok_or_else(|| malformed("missing vertices"))?;
    let vertices: Vec<VertexRepr> = serde_json::from_value(vertices_value.clone())
        .map_err(|e| malformed(format!("bad vertices: {}", e)))?;
    let closed = inner.get("closed").and_then(|v| v.as_bool()).unwrap_or(false);
    let labels: Vec<String> = inner
        .get(&config.label_attr)
        .map(|v| {
            serde_json::from_value(v.clone())
                .map_err(|e| malformed(format!("bad labels: {}", e)))
        })
        .transpose()?
        .unwrap_or_default();

    let image = ImageInfo {
        width: obj.get("original_width").and_then(|v| v.as_f64()).unwrap_or(100.0) as f32,
        height: obj.get("original_height").and_then(|v| v.as_f64()).unwrap_or(100.0) as f32,
        rotation: obj.get("image_rotation").and_then(|v| v.as_f64()).unwrap_or(0.0) as f32,
    };

    let mut points = Vec::with_capacity(vertices.len());
    for v in vertices {
        if !v.x.is_finite() || !v.y.is_finite() {
            return Err(malformed(format!("non-finite coordinates on vertex {}", v.id)));
        }
        let bezier = if v.is_bezier {
            Some(Handles {
                c1: v.control_point1.ok_or_else(|| {
                    malformed(format!("bezier vertex {} missing controlPoint1", v.id))
                })?,
                c2: v.control_point2.ok_or_else(|| {
                    malformed(format!("bezier vertex {} missing controlPoint2", v.id))
                })?,
            })
        } else {
            None
        };
        points.push(Point {
            id: v.id,
            x: v.x,
            y: v.y,
            prev: v.prev_point_id,
            bezier,
            disconnected: v.disconnected,
        });
    }

    // The graph is reconstructed purely from prevPointId links;
    // from_points re-validates them against the configuration.
    Path::from_points(points, closed, labels, config, image)
}

fn malformed(reason: impl Into<String>) -> StrandError {
    StrandError::MalformedResult { reason: reason.into() }
}
