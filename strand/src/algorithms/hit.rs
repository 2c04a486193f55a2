use serde::Serialize;

use crate::geometry::math::{cubic_distance_sq, seg_distance_sq};
use crate::geometry::tolerance::{clamp01, CURVE_SAMPLES};
use crate::model::Vec2;
use crate::Path;

/// Result of mapping a pointer coordinate onto a path. Distances are in
/// image pixels; a vertex hit wins over a segment hit when both are in
/// tolerance. Segment hits carry both endpoints and the hit parameter,
/// which insertion and splitting need.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Hit {
    Vertex { id: u32, dist: f32 },
    Segment { a: u32, b: u32, t: f32, dist: f32 },
}

pub fn hit_test_impl(
    path: &Path,
    x: f32,
    y: f32,
    vertex_tol_px: f32,
    segment_tol_px: f32,
) -> Option<Hit> {
    let img = path.image();
    let p = img.to_px(Vec2::new(x, y));

    // Vertices first
    let vtol2 = vertex_tol_px * vertex_tol_px;
    let mut best_vertex: Option<(u32, f32)> = None;
    for pt in path.points() {
        let q = img.to_px(pt.pos());
        let dx = q.x - p.x;
        let dy = q.y - p.y;
        let d2 = dx * dx + dy * dy;
        if d2 <= vtol2 && best_vertex.map_or(true, |(_, bd)| d2 < bd) {
            best_vertex = Some((pt.id, d2));
        }
    }
    if let Some((id, d2)) = best_vertex {
        return Some(Hit::Vertex { id, dist: d2.sqrt() });
    }

    // Segments, straight and cubic, including the closing edge
    let stol2 = segment_tol_px * segment_tol_px;
    let mut best_segment: Option<(u32, u32, f32, f32)> = None;
    for (a_id, b_id) in segments(path) {
        let a = match path.get_point(a_id) {
            Some(a) => a,
            None => continue,
        };
        let b = match path.get_point(b_id) {
            Some(b) => b,
            None => continue,
        };
        let pa = img.to_px(a.pos());
        let pb = img.to_px(b.pos());
        let (d2, t) = match b.bezier {
            Some(h) => cubic_distance_sq(
                p,
                pa,
                img.to_px(h.c1),
                img.to_px(h.c2),
                pb,
                CURVE_SAMPLES,
            ),
            None => seg_distance_sq(p.x, p.y, pa.x, pa.y, pb.x, pb.y),
        };
        if d2 <= stol2 && best_segment.map_or(true, |(_, _, _, bd)| d2 < bd) {
            best_segment = Some((a_id, b_id, clamp01(t), d2));
        }
    }
    best_segment.map(|(a, b, t, d2)| Hit::Segment { a, b, t, dist: d2.sqrt() })
}

/// All (from, to) edges of the path: one per `prev` reference plus the
/// implicit closing edge from chain end back to the root.
pub fn segments(path: &Path) -> Vec<(u32, u32)> {
    let mut out = Vec::with_capacity(path.points().len());
    for p in path.points() {
        if let Some(prev) = p.prev {
            out.push((prev, p.id));
        }
    }
    if path.closed() {
        if let (Some(end), Some(root)) = (path.chain_end_id(), path.root_id()) {
            out.push((end, root));
        }
    }
    out
}
