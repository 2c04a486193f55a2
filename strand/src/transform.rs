//! Multi-selection transform gestures (drag, rotate, resize).
//!
//! A gesture captures every selected point's original coordinates once,
//! then each incremental update is recomputed from that snapshot. The
//! session is an explicit value object threaded through the calls, never
//! shared mutable state, so a gesture is a pure function of
//! (session, update) and cannot double-apply deltas.

use crate::geometry::tolerance::{safe_div, EPS_LEN};
use crate::model::Vec2;
use crate::Path;

/// Original coordinates of one selected point, captured at gesture start.
#[derive(Clone, Copy, Debug)]
pub struct CapturedPoint {
    pub id: u32,
    pub pos: Vec2,
    /// Absolute control points at capture time, when the point is Bezier.
    pub handles: Option<(Vec2, Vec2)>,
}

/// Snapshot of the selection and the transform handle's initial frame.
/// Discarded at gesture end; a new gesture recaptures from scratch.
#[derive(Clone, Debug)]
pub struct TransformSession {
    pub points: Vec<CapturedPoint>,
    pub rotation: f32,
    pub scale: Vec2,
    pub center: Vec2,
}

/// One incremental update from the transform surface. Anchor positions
/// are taken as reported rather than re-derived from the matrix, so the
/// surface's own position solving is never applied twice.
#[derive(Clone, Debug, Default)]
pub struct TransformUpdate {
    pub positions: Vec<(u32, Vec2)>,
    pub rotation: f32,
    pub scale: Vec2,
}

pub(crate) fn begin(
    path: &Path,
    rotation: f32,
    scale: Vec2,
    center: Vec2,
) -> Option<TransformSession> {
    let selected = path.selected();
    if selected.is_empty() {
        return None;
    }
    let points = selected
        .iter()
        .filter_map(|&id| path.get_point(id))
        .map(|p| CapturedPoint {
            id: p.id,
            pos: p.pos(),
            handles: p.bezier.map(|h| (h.c1, h.c2)),
        })
        .collect();
    Some(TransformSession { points, rotation, scale, center })
}

pub(crate) fn apply(path: &mut Path, session: &TransformSession, update: &TransformUpdate) -> bool {
    if update.positions.is_empty() || session.points.is_empty() {
        // A momentarily empty selection is a normal condition in a live
        // gesture stream, not a fault.
        return false;
    }
    let delta_rot = update.rotation - session.rotation;
    let sx = safe_div(update.scale.x, session.scale.x, 1.0);
    let sy = safe_div(update.scale.y, session.scale.y, 1.0);

    let mut moved: Vec<(u32, Vec2, Option<(Vec2, Vec2)>)> = Vec::with_capacity(session.points.len());
    for cap in &session.points {
        let reported = update.positions.iter().find(|(id, _)| *id == cap.id);
        let new_pos = match reported {
            Some((_, p)) => *p,
            None => match path.get_point(cap.id) {
                Some(p) => p.pos(),
                None => continue,
            },
        };
        // Handle vectors are relative to the point's own original anchor:
        // scale componentwise, then rotate, then re-anchor at the new
        // position. Control points are never bounds-clamped.
        let handles = cap.handles.map(|(c1, c2)| {
            (
                vec_add(new_pos, rotate(scale_vec(vec_sub(c1, cap.pos), sx, sy), delta_rot)),
                vec_add(new_pos, rotate(scale_vec(vec_sub(c2, cap.pos), sx, sy), delta_rot)),
            )
        });
        moved.push((cap.id, new_pos, handles));
    }
    if moved.is_empty() {
        return false;
    }

    // Drag and resize must keep the selection's bounding box inside the
    // image; a violating update is rejected wholesale so the points snap
    // back to the last valid position. Rotation is exempt.
    if path.config().constrain_to_bounds && delta_rot.abs() <= EPS_LEN {
        let mut min = Vec2::new(f32::INFINITY, f32::INFINITY);
        let mut max = Vec2::new(f32::NEG_INFINITY, f32::NEG_INFINITY);
        for (_, p, _) in &moved {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        if min.x < 0.0 || min.y < 0.0 || max.x > 100.0 || max.y > 100.0 {
            log::trace!("transform update rejected: bbox outside image bounds");
            return false;
        }
    }

    for (id, pos, handles) in moved {
        let Some(&slot) = path.index.get(&id) else { continue };
        let p = &mut path.points[slot];
        p.x = pos.x;
        p.y = pos.y;
        if let (Some(h), Some((c1, c2))) = (&mut p.bezier, handles) {
            h.c1 = c1;
            h.c2 = c2;
        }
    }
    true
}

/// Gesture end: snap transformed anchors to the pixel grid (when
/// configured) via the normal commit rules, handles following the anchor.
pub(crate) fn commit(path: &mut Path, session: &TransformSession) {
    for cap in &session.points {
        if let Some(p) = path.get_point(cap.id) {
            path.move_point(cap.id, p.x, p.y);
        }
    }
}

#[inline]
fn rotate(v: Vec2, ang: f32) -> Vec2 {
    let (s, c) = ang.sin_cos();
    Vec2 { x: v.x * c - v.y * s, y: v.x * s + v.y * c }
}

#[inline]
fn scale_vec(v: Vec2, sx: f32, sy: f32) -> Vec2 {
    Vec2 { x: v.x * sx, y: v.y * sy }
}

#[inline]
fn vec_add(a: Vec2, b: Vec2) -> Vec2 {
    Vec2 { x: a.x + b.x, y: a.y + b.y }
}

#[inline]
fn vec_sub(a: Vec2, b: Vec2) -> Vec2 {
    Vec2 { x: a.x - b.x, y: a.y - b.y }
}
