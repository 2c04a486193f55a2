pub mod model;
pub mod error;
pub mod geometry {
    pub mod cubic;
    pub mod math;
    pub mod tolerance;
}
pub mod algorithms {
    pub mod hit;
}
pub mod interaction;
pub mod transform;
mod json;

use std::collections::{HashMap, HashSet};

use error::StrandError;
use geometry::cubic::{lerp_vec2, CubicBezier};
use geometry::tolerance::clamp;
use model::{Handles, ImageInfo, PathConfig, Point, PointInput, Snap, Stage, Vec2};

pub use algorithms::hit::Hit;
pub use transform::{TransformSession, TransformUpdate};

/// One editable annotation path: the single source of truth for its
/// anchor points and their connectivity.
///
/// Points are kept in insertion order but the graph is defined by each
/// point's `prev` back reference; a derived reverse index answers
/// children-of queries so deletes stay local splices.
#[derive(Debug)]
pub struct Path {
    pub(crate) points: Vec<Point>,
    pub(crate) index: HashMap<u32, usize>,
    pub(crate) closed: bool,
    pub(crate) labels: Vec<String>,
    pub(crate) active: Option<u32>,
    pub(crate) selection: HashSet<u32>,
    pub(crate) config: PathConfig,
    pub(crate) image: ImageInfo,
    pub(crate) next_id: u32,
    pub(crate) stage: Stage,
}

impl Path {
    pub fn new(config: PathConfig, image: ImageInfo) -> Self {
        Path {
            points: Vec::new(),
            index: HashMap::new(),
            closed: false,
            labels: Vec::new(),
            active: None,
            selection: HashSet::new(),
            config,
            image,
            next_id: 0,
            stage: Stage::Empty,
        }
    }

    /// Build a path from pre-normalized points, validating the graph
    /// against the configuration. Used by the importer and by callers
    /// seeding a path programmatically.
    pub fn from_points(
        points: Vec<Point>,
        closed: bool,
        labels: Vec<String>,
        config: PathConfig,
        image: ImageInfo,
    ) -> Result<Self, StrandError> {
        validate_graph(&points, closed, config.skeleton)?;
        let next_id = points.iter().map(|p| p.id + 1).max().unwrap_or(0);
        let mut path = Path {
            points,
            index: HashMap::new(),
            closed,
            labels,
            active: None,
            selection: HashSet::new(),
            config,
            image,
            next_id,
            stage: Stage::Empty,
        };
        path.rebuild_index();
        path.stage = if path.points.is_empty() {
            Stage::Empty
        } else if closed {
            Stage::Closed
        } else {
            Stage::Finalized
        };
        path.active = path.chain_end_id();
        Ok(path)
    }

    /// Normalize raw inputs (bare pairs or vertex objects) into canonical
    /// points, then build the path. See [`normalize_points`].
    pub fn from_inputs(
        inputs: &[serde_json::Value],
        config: PathConfig,
        image: ImageInfo,
    ) -> Result<Self, StrandError> {
        let points = normalize_points(inputs)?;
        Path::from_points(points, false, Vec::new(), config, image)
    }

    // ---- accessors ----

    pub fn point_count(&self) -> u32 {
        self.points.len() as u32
    }

    pub fn get_point(&self, id: u32) -> Option<Point> {
        self.index.get(&id).map(|&i| self.points[i])
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn closed(&self) -> bool {
        self.closed
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn active_id(&self) -> Option<u32> {
        self.active
    }

    pub fn config(&self) -> &PathConfig {
        &self.config
    }

    pub fn image(&self) -> ImageInfo {
        self.image
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn set_labels(&mut self, labels: Vec<String>) {
        self.labels = labels;
    }

    /// Ids of points whose `prev` is `id`, in insertion order.
    pub fn children_of(&self, id: u32) -> Vec<u32> {
        self.points
            .iter()
            .filter(|p| p.prev == Some(id))
            .map(|p| p.id)
            .collect()
    }

    /// A point is branching when more than one outgoing edge leaves it.
    pub fn is_branching(&self, id: u32) -> bool {
        self.points.iter().filter(|p| p.prev == Some(id)).count() > 1
    }

    /// The chain root: the single point with no back reference.
    pub fn root_id(&self) -> Option<u32> {
        self.points.iter().find(|p| p.prev.is_none()).map(|p| p.id)
    }

    /// The childless end of the chain. In skeleton mode a tree has many
    /// leaves; this returns the last one in insertion order, which is the
    /// tip of the most recently drawn branch.
    pub fn chain_end_id(&self) -> Option<u32> {
        let parents: HashSet<u32> = self.points.iter().filter_map(|p| p.prev).collect();
        self.points
            .iter()
            .rev()
            .find(|p| !parents.contains(&p.id))
            .map(|p| p.id)
    }

    /// Ids in chain-traversal order: depth-first from the root, children
    /// visited in insertion order. This is the order vertices serialize in.
    pub fn chain_order(&self) -> Vec<u32> {
        let mut out = Vec::with_capacity(self.points.len());
        let Some(root) = self.root_id() else {
            return out;
        };
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            out.push(id);
            let mut kids = self.children_of(id);
            kids.reverse();
            stack.extend(kids);
        }
        out
    }

    // ---- selection ----

    pub fn select_point(&mut self, id: u32) -> bool {
        if !self.index.contains_key(&id) {
            return false;
        }
        self.selection.clear();
        self.selection.insert(id);
        true
    }

    pub fn toggle_select(&mut self, id: u32) -> bool {
        if !self.index.contains_key(&id) {
            return false;
        }
        if !self.selection.remove(&id) {
            self.selection.insert(id);
        }
        true
    }

    pub fn select_all(&mut self) {
        self.selection = self.points.iter().map(|p| p.id).collect();
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Selected ids in insertion order.
    pub fn selected(&self) -> Vec<u32> {
        self.points
            .iter()
            .filter(|p| self.selection.contains(&p.id))
            .map(|p| p.id)
            .collect()
    }

    // ---- mutation ----

    /// Append a point connected to the active point. In skeleton mode the
    /// active point may already have children, which creates a branch.
    pub fn add_point(&mut self, x: f32, y: f32) -> Result<u32, StrandError> {
        self.add_point_inner(x, y, None)
    }

    /// Append a Bezier point with explicit handles (shift+drag gesture).
    pub fn add_bezier_point(
        &mut self,
        x: f32,
        y: f32,
        handles: Handles,
    ) -> Result<u32, StrandError> {
        self.add_point_inner(x, y, Some(handles))
    }

    fn add_point_inner(
        &mut self,
        x: f32,
        y: f32,
        handles: Option<Handles>,
    ) -> Result<u32, StrandError> {
        if self.closed {
            return Err(StrandError::PathClosed);
        }
        if let Some(max) = self.config.max_points {
            if self.point_count() >= max {
                return Err(StrandError::TooManyPoints { max });
            }
        }
        let p = self.commit_coord(Vec2::new(x, y));
        let id = self.alloc_id();
        let prev = self.active;
        self.points.push(Point {
            id,
            x: p.x,
            y: p.y,
            prev,
            bezier: handles,
            disconnected: false,
        });
        self.index.insert(id, self.points.len() - 1);
        self.active = Some(id);
        self.stage = Stage::Drawing;
        Ok(id)
    }

    /// Insert a point on the segment from `a` to `b` at the position
    /// nearest to the given coordinate. For a Bezier segment the curve is
    /// subdivided by de Casteljau at the hit parameter, so the visible
    /// shape is unchanged through the split.
    pub fn insert_on_segment(
        &mut self,
        a_id: u32,
        b_id: u32,
        x: f32,
        y: f32,
    ) -> Result<u32, StrandError> {
        if let Some(max) = self.config.max_points {
            if self.point_count() >= max {
                return Err(StrandError::TooManyPoints { max });
            }
        }
        let a = self.get_point(a_id).ok_or_else(|| StrandError::MalformedResult {
            reason: format!("unknown segment start {}", a_id),
        })?;
        let b = self.get_point(b_id).ok_or_else(|| StrandError::MalformedResult {
            reason: format!("unknown segment end {}", b_id),
        })?;
        let on_closing_edge = b.prev != Some(a_id);
        if on_closing_edge {
            let is_closing = self.closed
                && b.prev.is_none()
                && self.chain_end_id() == Some(a_id);
            if !is_closing {
                return Err(StrandError::MalformedResult {
                    reason: format!("no segment from {} to {}", a_id, b_id),
                });
            }
        }

        let target = Vec2::new(x, y);
        let id = self.alloc_id();
        let new_point = match b.bezier {
            Some(h) => {
                let curve = CubicBezier::new(a.pos(), h.c1, h.c2, b.pos());
                let (_, t) = geometry::math::cubic_distance_sq(
                    target,
                    curve.p0,
                    curve.p1,
                    curve.p2,
                    curve.p3,
                    geometry::tolerance::CURVE_SAMPLES,
                );
                let (first, second) = curve.split_at(t);
                let bi = self.index[&b_id];
                self.points[bi].bezier = Some(Handles { c1: second.p1, c2: second.p2 });
                Point {
                    id,
                    x: first.p3.x,
                    y: first.p3.y,
                    prev: Some(a_id),
                    bezier: Some(Handles { c1: first.p1, c2: first.p2 }),
                    disconnected: b.disconnected,
                }
            }
            None => {
                let (_, t) = geometry::math::seg_distance_sq(x, y, a.x, a.y, b.x, b.y);
                let p = lerp_vec2(a.pos(), b.pos(), t);
                Point {
                    id,
                    x: p.x,
                    y: p.y,
                    prev: Some(a_id),
                    bezier: None,
                    disconnected: false,
                }
            }
        };
        if !on_closing_edge {
            let bi = self.index[&b_id];
            self.points[bi].prev = Some(id);
        }
        let slot = self.index[&a_id] + 1;
        self.points.insert(slot, new_point);
        self.rebuild_index();
        Ok(id)
    }

    /// Remove a point, reconnecting its children to its own parent so the
    /// path stays continuous. Deleting the root promotes its first child.
    pub fn delete_point(&mut self, id: u32) -> bool {
        let Some(&slot) = self.index.get(&id) else {
            return false;
        };
        let removed = self.points[slot];
        let children = self.children_of(id);
        self.points.remove(slot);
        match removed.prev {
            Some(parent) => {
                for p in self.points.iter_mut() {
                    if p.prev == Some(id) {
                        p.prev = Some(parent);
                    }
                }
            }
            None => {
                // First child becomes the new root; any siblings hang off it.
                if let Some((&new_root, rest)) = children.split_first() {
                    for p in self.points.iter_mut() {
                        if p.id == new_root {
                            p.prev = None;
                        } else if rest.contains(&p.id) {
                            p.prev = Some(new_root);
                        }
                    }
                }
            }
        }
        self.rebuild_index();
        self.selection.remove(&id);
        if self.active == Some(id) {
            self.active = removed.prev.or_else(|| self.root_id());
        }
        if self.points.is_empty() {
            self.stage = Stage::Empty;
            self.active = None;
            self.closed = false;
        } else if self.closed && self.points.len() < 3 {
            self.closed = false;
            self.stage = Stage::Finalized;
        }
        true
    }

    /// Toggle a point between regular and Bezier. Regular to Bezier places
    /// the control points on the incoming chord at its thirds, which keeps
    /// the rendered segment shape unchanged; Bezier to regular discards
    /// the control points.
    pub fn convert_point(&mut self, id: u32) -> bool {
        let Some(&slot) = self.index.get(&id) else {
            return false;
        };
        if self.points[slot].bezier.is_some() {
            self.points[slot].bezier = None;
            self.points[slot].disconnected = false;
            return true;
        }
        let anchor = self.points[slot].pos();
        let from = self.incoming_reference(id).unwrap_or(Vec2 {
            // Isolated point: arbitrary short horizontal handles.
            x: anchor.x - 4.0,
            y: anchor.y,
        });
        let c1 = lerp_vec2(from, anchor, 1.0 / 3.0);
        let c2 = lerp_vec2(from, anchor, 2.0 / 3.0);
        self.points[slot].bezier = Some(Handles { c1, c2 });
        true
    }

    /// The position the incoming segment of `id` starts from: its parent,
    /// or the chain end when `id` is the root of a closed path.
    fn incoming_reference(&self, id: u32) -> Option<Vec2> {
        let p = self.get_point(id)?;
        if let Some(parent) = p.prev {
            return self.get_point(parent).map(|q| q.pos());
        }
        if self.closed {
            if let Some(end) = self.chain_end_id() {
                return self.get_point(end).map(|q| q.pos());
            }
        }
        self.children_of(id)
            .first()
            .and_then(|&c| self.get_point(c))
            // Mirror the outgoing direction so the handles lie on the tangent.
            .map(|q| Vec2::new(2.0 * p.x - q.x, 2.0 * p.y - q.y))
    }

    /// Let the two control handles of a Bezier point move independently.
    pub fn disconnect_handles(&mut self, id: u32) -> bool {
        let Some(&slot) = self.index.get(&id) else {
            return false;
        };
        if self.points[slot].bezier.is_none() {
            return false;
        }
        self.points[slot].disconnected = true;
        true
    }

    /// Move an anchor, dragging its control handles along. Snap and bounds
    /// constraints apply to the anchor only.
    pub fn move_point(&mut self, id: u32, x: f32, y: f32) -> bool {
        let Some(&slot) = self.index.get(&id) else {
            return false;
        };
        let p = self.commit_coord(Vec2::new(x, y));
        let old = self.points[slot].pos();
        let dx = p.x - old.x;
        let dy = p.y - old.y;
        self.points[slot].x = p.x;
        self.points[slot].y = p.y;
        if let Some(h) = &mut self.points[slot].bezier {
            h.c1.x += dx;
            h.c1.y += dy;
            h.c2.x += dx;
            h.c2.y += dy;
        }
        true
    }

    /// Move one control handle of a Bezier point. Unless the point's
    /// handles are disconnected, the opposite handle mirrors through the
    /// anchor. Control points are never snapped or bounds-clamped.
    pub fn move_handle(&mut self, id: u32, which: u8, x: f32, y: f32) -> bool {
        let Some(&slot) = self.index.get(&id) else {
            return false;
        };
        let anchor = self.points[slot].pos();
        let disconnected = self.points[slot].disconnected;
        let Some(h) = &mut self.points[slot].bezier else {
            return false;
        };
        let target = Vec2::new(x, y);
        let mirror = Vec2::new(2.0 * anchor.x - x, 2.0 * anchor.y - y);
        match which {
            1 => {
                h.c1 = target;
                if !disconnected {
                    h.c2 = mirror;
                }
            }
            2 => {
                h.c2 = target;
                if !disconnected {
                    h.c1 = mirror;
                }
            }
            _ => return false,
        }
        true
    }

    /// Close the path into a loop. Requires at least 3 points and a
    /// non-branching chain; the configured minimum also applies since
    /// closing finalizes the drawing stage.
    pub fn close_path(&mut self) -> Result<(), StrandError> {
        let got = self.point_count();
        if got < 3 {
            return Err(StrandError::InsufficientPoints { got });
        }
        if self.points.iter().any(|p| self.is_branching(p.id)) {
            return Err(StrandError::MalformedResult {
                reason: "cannot close a branching path".to_string(),
            });
        }
        if let Some(min) = self.config.min_points {
            if got < min {
                return Err(StrandError::TooFewPoints { got, min });
            }
        }
        self.closed = true;
        self.stage = Stage::Closed;
        Ok(())
    }

    /// Finalize an open path (Esc, or clicking the last-added point).
    /// A closed path is already terminal and stays `Closed`.
    pub fn finalize(&mut self) -> Result<(), StrandError> {
        if self.closed {
            return Ok(());
        }
        let got = self.point_count();
        if let Some(min) = self.config.min_points {
            if got < min {
                return Err(StrandError::TooFewPoints { got, min });
            }
        }
        if got > 0 {
            self.stage = Stage::Finalized;
        }
        Ok(())
    }

    /// Break a closed path at the segment arriving at `seg_start_id`. The
    /// segment start becomes the new first element, its former chain
    /// predecessor becomes the active point, and the path reopens.
    pub fn break_at(&mut self, seg_start_id: u32) -> Result<(), StrandError> {
        if !self.closed {
            return Err(StrandError::MalformedResult {
                reason: "path is not closed".to_string(),
            });
        }
        let s = self.get_point(seg_start_id).ok_or_else(|| StrandError::MalformedResult {
            reason: format!("unknown point {}", seg_start_id),
        })?;
        // Storage is rebuilt from the traversal below, so every point
        // must be reachable before anything is rewired.
        if self.chain_order().len() != self.points.len() {
            return Err(StrandError::MalformedResult {
                reason: "path graph is not a single chain".to_string(),
            });
        }
        self.closed = false;
        self.stage = Stage::Finalized;
        match s.prev {
            None => {
                // Breaking the closing edge itself: order is already right.
                self.active = self.chain_end_id();
            }
            Some(pred) => {
                let end = self.chain_end_id().ok_or_else(|| StrandError::MalformedResult {
                    reason: "closed path has no chain end".to_string(),
                })?;
                let root = self.root_id().ok_or_else(|| StrandError::MalformedResult {
                    reason: "closed path has no root".to_string(),
                })?;
                {
                    let si = self.index[&seg_start_id];
                    self.points[si].prev = None;
                    let ri = self.index[&root];
                    self.points[ri].prev = Some(end);
                }
                // Reorder storage to the new chain order so the broken-at
                // point is element 0.
                let order = self.chain_order();
                let by_id: HashMap<u32, Point> =
                    self.points.iter().map(|p| (p.id, *p)).collect();
                self.points = order.iter().map(|id| by_id[id]).collect();
                self.rebuild_index();
                self.active = Some(pred);
            }
        }
        Ok(())
    }

    /// In skeleton mode, choose which point newly added points attach to.
    pub fn set_branch_active(&mut self, id: u32) -> bool {
        if !self.config.skeleton || !self.index.contains_key(&id) {
            return false;
        }
        self.active = Some(id);
        true
    }

    // ---- hit testing ----

    /// Nearest vertex or segment within the default pixel tolerances.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<Hit> {
        algorithms::hit::hit_test_impl(
            self,
            x,
            y,
            geometry::tolerance::VERTEX_TOL_PX,
            geometry::tolerance::SEGMENT_TOL_PX,
        )
    }

    pub fn hit_test_with(&self, x: f32, y: f32, vertex_tol_px: f32, segment_tol_px: f32) -> Option<Hit> {
        algorithms::hit::hit_test_impl(self, x, y, vertex_tol_px, segment_tol_px)
    }

    // ---- transform ----

    /// Capture a transform session for the current selection. Returns
    /// `None` when nothing is selected; a gesture over an empty selection
    /// is a normal no-op, not an error.
    pub fn begin_transform(&self, rotation: f32, scale: Vec2, center: Vec2) -> Option<TransformSession> {
        transform::begin(self, rotation, scale, center)
    }

    /// Apply one incremental transform update. Returns whether anything
    /// moved; an update that would push the selection bounding box outside
    /// image bounds is rejected wholesale when `constrain_to_bounds` is on.
    pub fn apply_transform(&mut self, session: &TransformSession, update: &TransformUpdate) -> bool {
        transform::apply(self, session, update)
    }

    /// Commit the end of a transform gesture: pixel snap the transformed
    /// anchors. The session itself is discarded by the caller.
    pub fn commit_transform(&mut self, session: &TransformSession) {
        transform::commit(self, session)
    }

    // ---- serialization ----

    /// Serialize to the annotation result format.
    pub fn to_result(&self) -> serde_json::Value {
        json::export_impl(self)
    }

    /// Rebuild a path from an annotation result.
    pub fn from_result(value: &serde_json::Value, config: PathConfig) -> Result<Self, StrandError> {
        json::import_impl(value, config)
    }

    // ---- internals ----

    fn alloc_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(crate) fn rebuild_index(&mut self) {
        self.index = self
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| (p.id, i))
            .collect();
    }

    /// Snap and clamp an anchor coordinate per configuration.
    pub(crate) fn commit_coord(&self, p: Vec2) -> Vec2 {
        let mut p = p;
        if self.config.snap == Snap::Pixel {
            p = self.image.snap_px(p);
        }
        if self.config.constrain_to_bounds {
            p.x = clamp(p.x, 0.0, 100.0);
            p.y = clamp(p.y, 0.0, 100.0);
        }
        p
    }
}

/// Normalize raw inputs into canonical points.
///
/// Accepts bare `[x, y]` pairs and rich vertex objects, assigns missing
/// ids from a counter above the largest explicit id, and back-fills a
/// missing `prev` with the previous element of the input array.
pub fn normalize_points(inputs: &[serde_json::Value]) -> Result<Vec<Point>, StrandError> {
    let mut parsed = Vec::with_capacity(inputs.len());
    for (index, v) in inputs.iter().enumerate() {
        let input: PointInput = serde_json::from_value(v.clone())
            .map_err(|_| StrandError::InvalidPointFormat { index })?;
        match &input {
            PointInput::Pair([x, y]) if x.is_finite() && y.is_finite() => {}
            // u32::MAX is rejected so id counters can always sit above
            // the largest explicit id.
            PointInput::Rich { x, y, id, .. }
                if x.is_finite() && y.is_finite() && *id != Some(u32::MAX) => {}
            _ => return Err(StrandError::InvalidPointFormat { index }),
        }
        parsed.push(input);
    }

    let mut next_id = parsed
        .iter()
        .filter_map(|p| match p {
            PointInput::Rich { id, .. } => *id,
            PointInput::Pair(_) => None,
        })
        .map(|id| id + 1)
        .max()
        .unwrap_or(0);

    let mut out: Vec<Point> = Vec::with_capacity(parsed.len());
    for input in parsed {
        let point = match input {
            PointInput::Pair([x, y]) => {
                let id = next_id;
                next_id += 1;
                Point { id, x, y, prev: None, bezier: None, disconnected: false }
            }
            PointInput::Rich {
                x,
                y,
                id,
                prev_point_id,
                is_bezier,
                control_point1,
                control_point2,
                disconnected,
            } => {
                let id = id.unwrap_or_else(|| {
                    let id = next_id;
                    next_id += 1;
                    id
                });
                let bezier = if is_bezier {
                    Some(Handles {
                        c1: control_point1.unwrap_or(Vec2 { x, y }),
                        c2: control_point2.unwrap_or(Vec2 { x, y }),
                    })
                } else {
                    None
                };
                Point { id, x, y, prev: prev_point_id, bezier, disconnected }
            }
        };
        let mut point = point;
        if point.prev.is_none() {
            point.prev = out.last().map(|p: &Point| p.id);
        }
        out.push(point);
    }
    Ok(out)
}

/// Validate graph invariants: unique ids, resolvable non-cyclic `prev`
/// references, a single root, and branching only in skeleton mode.
pub(crate) fn validate_graph(
    points: &[Point],
    closed: bool,
    skeleton: bool,
) -> Result<(), StrandError> {
    if points.is_empty() {
        return Ok(());
    }
    let mut ids = HashSet::with_capacity(points.len());
    for p in points {
        if p.id == u32::MAX {
            return Err(StrandError::MalformedResult {
                reason: format!("point id {} is out of range", p.id),
            });
        }
        if !ids.insert(p.id) {
            return Err(StrandError::MalformedResult {
                reason: format!("duplicate point id {}", p.id),
            });
        }
    }
    let mut roots = 0u32;
    let mut parent_counts: HashMap<u32, u32> = HashMap::new();
    for p in points {
        match p.prev {
            None => roots += 1,
            Some(prev) => {
                if !ids.contains(&prev) {
                    return Err(StrandError::MalformedResult {
                        reason: format!("point {} references missing prevPointId {}", p.id, prev),
                    });
                }
                *parent_counts.entry(prev).or_insert(0) += 1;
            }
        }
    }
    if roots != 1 {
        return Err(StrandError::MalformedResult {
            reason: format!("expected exactly one root point, found {}", roots),
        });
    }
    let branching = parent_counts.values().any(|&n| n > 1);
    if branching && !skeleton {
        return Err(StrandError::MalformedResult {
            reason: "branching points in a non-skeleton path".to_string(),
        });
    }
    if branching && closed {
        return Err(StrandError::MalformedResult {
            reason: "a branching path cannot be closed".to_string(),
        });
    }
    // Cycle check: every prev walk must terminate at the root.
    let index: HashMap<u32, &Point> = points.iter().map(|p| (p.id, p)).collect();
    for p in points {
        let mut seen = HashSet::new();
        let mut cur = p.prev;
        seen.insert(p.id);
        while let Some(id) = cur {
            if !seen.insert(id) {
                return Err(StrandError::MalformedResult {
                    reason: format!("cycle in prevPointId chain at point {}", id),
                });
            }
            cur = index[&id].prev;
        }
    }
    if closed && points.len() < 3 {
        return Err(StrandError::MalformedResult {
            reason: format!("closed path with only {} points", points.len()),
        });
    }
    Ok(())
}
