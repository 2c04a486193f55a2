use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }
}

/// Absolute control points of the cubic segment arriving at an anchor
/// (from its `prev` anchor), in the same percent coordinate space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Handles {
    pub c1: Vec2,
    pub c2: Vec2,
}

/// An anchor point of a path. Connectivity is carried by the back
/// reference `prev` rather than array order, which is what allows
/// branching in skeleton mode.
#[derive(Clone, Copy, Debug)]
pub struct Point {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub prev: Option<u32>,
    pub bezier: Option<Handles>,
    pub disconnected: bool,
}

impl Point {
    pub fn pos(&self) -> Vec2 {
        Vec2 { x: self.x, y: self.y }
    }
}

/// Raw point representation accepted at the ingestion boundary: either a
/// bare `[x, y]` pair or a rich vertex object. Normalized once into
/// [`Point`]; nothing deeper in the pipeline branches on input shape.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum PointInput {
    Pair([f32; 2]),
    Rich {
        x: f32,
        y: f32,
        #[serde(default)]
        id: Option<u32>,
        #[serde(rename = "prevPointId", default)]
        prev_point_id: Option<u32>,
        #[serde(rename = "isBezier", default)]
        is_bezier: bool,
        #[serde(rename = "controlPoint1", default)]
        control_point1: Option<Vec2>,
        #[serde(rename = "controlPoint2", default)]
        control_point2: Option<Vec2>,
        #[serde(default)]
        disconnected: bool,
    },
}

/// Pixel-snap behavior for committed anchor coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Snap {
    #[default]
    None,
    Pixel,
}

/// Options handed over by the tag-configuration collaborator.
/// `point_size`/`point_style` are display-only and carried through
/// untouched; they have no geometry effect.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PathConfig {
    pub closable: bool,
    pub curves: bool,
    pub skeleton: bool,
    pub min_points: Option<u32>,
    pub max_points: Option<u32>,
    pub constrain_to_bounds: bool,
    pub snap: Snap,
    pub point_size: f32,
    pub point_style: String,
    /// Name of the label field in the serialized result value.
    pub label_attr: String,
}

impl Default for PathConfig {
    fn default() -> Self {
        PathConfig {
            closable: false,
            curves: false,
            skeleton: false,
            min_points: None,
            max_points: None,
            constrain_to_bounds: false,
            snap: Snap::None,
            point_size: 5.0,
            point_style: "circle".to_string(),
            label_attr: "labels".to_string(),
        }
    }
}

/// Native resolution and rotation of the owning image, copied into the
/// serialized result and used for pixel snapping.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ImageInfo {
    pub width: f32,
    pub height: f32,
    pub rotation: f32,
}

impl Default for ImageInfo {
    fn default() -> Self {
        ImageInfo { width: 100.0, height: 100.0, rotation: 0.0 }
    }
}

impl ImageInfo {
    /// Percent-space point to native pixel space.
    pub fn to_px(&self, p: Vec2) -> Vec2 {
        Vec2 { x: p.x / 100.0 * self.width, y: p.y / 100.0 * self.height }
    }

    /// Round a percent-space coordinate to the nearest native pixel.
    pub fn snap_px(&self, p: Vec2) -> Vec2 {
        if self.width <= 0.0 || self.height <= 0.0 {
            return p;
        }
        Vec2 {
            x: (p.x / 100.0 * self.width).round() / self.width * 100.0,
            y: (p.y / 100.0 * self.height).round() / self.height * 100.0,
        }
    }
}

/// Drawing stage of one path. `Closed` and `Finalized` are terminal for
/// interactive point appending but the path stays editable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Empty,
    Drawing,
    Closed,
    Finalized,
}
