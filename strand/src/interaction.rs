//! Tool-wide interaction state machine.
//!
//! Translates primitive pointer/keyboard events plus modifier flags into
//! point-graph mutations and transform-engine calls, layered above the
//! per-path drawing stage. All handling is synchronous; no handler runs
//! while another is in flight.

use serde::Serialize;

use crate::error::StrandError;
use crate::model::{Handles, Stage, Vec2};
use crate::transform::{TransformSession, TransformUpdate};
use crate::{Hit, Path};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub alt: bool,
    /// Ctrl on Linux/Windows, Cmd on macOS.
    pub ctrl: bool,
}

/// Tool-wide mode, orthogonal to the path's own drawing stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Drawing,
    PointEditing(u32),
    MultiSelecting,
    Transforming,
}

/// What an input event did, reported to the annotation store so it can
/// record history and update its canonical region list.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Outcome {
    None,
    PointAdded { id: u32 },
    PointInserted { id: u32 },
    PointDeleted { id: u32 },
    PointConverted { id: u32 },
    PathClosed,
    PathFinalized,
    PathBroken { at: u32 },
    PathDiscarded,
    SelectionChanged,
}

enum Drag {
    Point(u32),
    /// Shift+drag from empty canvas: a fresh Bezier point whose handles
    /// are sized by the drag vector.
    NewBezier(u32),
}

/// The editor for one path: owns the path, the current mode, and any
/// in-flight drag or transform gesture.
pub struct Editor {
    path: Path,
    mode: Mode,
    drag: Option<Drag>,
    session: Option<TransformSession>,
}

impl Editor {
    pub fn new(path: Path) -> Self {
        let mode = if path.stage() == Stage::Drawing { Mode::Drawing } else { Mode::Idle };
        Editor { path, mode, drag: None, session: None }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn path_mut(&mut self) -> &mut Path {
        &mut self.path
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn pointer_down(&mut self, x: f32, y: f32, mods: Modifiers) -> Result<Outcome, StrandError> {
        let hit = self.path.hit_test(x, y);
        log::trace!("pointer_down at ({x:.2},{y:.2}) mods={mods:?} hit={hit:?}");
        match hit {
            Some(Hit::Vertex { id, .. }) => self.vertex_down(id, mods),
            Some(Hit::Segment { a, b, .. }) => self.segment_down(a, b, x, y, mods),
            None => self.canvas_down(x, y, mods),
        }
    }

    fn vertex_down(&mut self, id: u32, mods: Modifiers) -> Result<Outcome, StrandError> {
        if mods.alt {
            return Ok(if self.path.delete_point(id) {
                self.after_mutation();
                Outcome::PointDeleted { id }
            } else {
                Outcome::None
            });
        }
        if mods.shift {
            if !self.path.config().curves {
                return Ok(Outcome::None);
            }
            return Ok(if self.path.convert_point(id) {
                Outcome::PointConverted { id }
            } else {
                Outcome::None
            });
        }
        if mods.ctrl {
            self.path.toggle_select(id);
            self.mode = Mode::MultiSelecting;
            return Ok(Outcome::SelectionChanged);
        }
        // Plain click on a vertex. While drawing, the first and the
        // last-added point are the close/finalize targets.
        if self.path.stage() == Stage::Drawing {
            if self.path.config().closable
                && self.path.root_id() == Some(id)
                && self.path.point_count() >= 3
            {
                self.path.close_path()?;
                self.mode = Mode::Idle;
                return Ok(Outcome::PathClosed);
            }
            if self.path.active_id() == Some(id) {
                self.path.finalize()?;
                self.mode = Mode::Idle;
                return Ok(Outcome::PathFinalized);
            }
        }
        self.path.select_point(id);
        self.mode = Mode::PointEditing(id);
        self.drag = Some(Drag::Point(id));
        Ok(Outcome::SelectionChanged)
    }

    fn segment_down(&mut self, a: u32, b: u32, x: f32, y: f32, mods: Modifiers) -> Result<Outcome, StrandError> {
        if mods.shift {
            let id = self.path.insert_on_segment(a, b, x, y)?;
            self.path.select_point(id);
            return Ok(Outcome::PointInserted { id });
        }
        if mods.alt {
            if self.path.closed() {
                // The hit reports the edge from a to b; breaking promotes
                // the edge's destination to first element.
                self.path.break_at(b)?;
                self.mode = Mode::Idle;
                return Ok(Outcome::PathBroken { at: b });
            }
            return Ok(Outcome::None);
        }
        if mods.ctrl {
            // Ctrl+click on the shape, not a specific point: whole path.
            self.path.select_all();
            self.mode = Mode::MultiSelecting;
            return Ok(Outcome::SelectionChanged);
        }
        if self.path.stage() == Stage::Drawing {
            return self.add_at(x, y, mods);
        }
        self.path.clear_selection();
        self.mode = Mode::Idle;
        Ok(Outcome::SelectionChanged)
    }

    fn canvas_down(&mut self, x: f32, y: f32, mods: Modifiers) -> Result<Outcome, StrandError> {
        let drawing = matches!(self.path.stage(), Stage::Empty | Stage::Drawing);
        if drawing || self.mode == Mode::Drawing {
            return self.add_at(x, y, mods);
        }
        if !self.path.selected().is_empty() {
            self.path.clear_selection();
            self.mode = Mode::Idle;
            return Ok(Outcome::SelectionChanged);
        }
        Ok(Outcome::None)
    }

    fn add_at(&mut self, x: f32, y: f32, mods: Modifiers) -> Result<Outcome, StrandError> {
        let id = if mods.shift && self.path.config().curves {
            // Handles start degenerate at the anchor; pointer_move sizes
            // them as the drag extends.
            let anchor = Vec2::new(x, y);
            let id = self.path.add_bezier_point(x, y, Handles { c1: anchor, c2: anchor })?;
            self.drag = Some(Drag::NewBezier(id));
            id
        } else {
            self.path.add_point(x, y)?
        };
        self.mode = Mode::Drawing;
        Ok(Outcome::PointAdded { id })
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) -> Outcome {
        match self.drag {
            Some(Drag::Point(id)) => {
                self.path.move_point(id, x, y);
                self.mode = Mode::PointEditing(id);
                Outcome::None
            }
            Some(Drag::NewBezier(id)) => {
                // The outgoing handle follows the pointer; the opposite
                // one mirrors through the anchor.
                self.path.move_handle(id, 2, x, y);
                Outcome::None
            }
            None => Outcome::None,
        }
    }

    pub fn pointer_up(&mut self) -> Outcome {
        if self.drag.take().is_some() {
            self.mode = if self.path.stage() == Stage::Drawing { Mode::Drawing } else { Mode::Idle };
        }
        Outcome::None
    }

    /// Esc. During drawing this finalizes the path, or discards it when
    /// it cannot meet the configured minimum. Otherwise it clears the
    /// selection and any in-flight gesture.
    pub fn key_escape(&mut self) -> Outcome {
        self.drag = None;
        self.session = None;
        if self.path.stage() == Stage::Drawing {
            return match self.path.finalize() {
                Ok(()) => {
                    self.mode = Mode::Idle;
                    Outcome::PathFinalized
                }
                Err(err) => {
                    log::debug!("discarding in-progress path: {err}");
                    let config = self.path.config().clone();
                    let image = self.path.image();
                    self.path = Path::new(config, image);
                    self.mode = Mode::Idle;
                    Outcome::PathDiscarded
                }
            };
        }
        self.path.clear_selection();
        self.mode = Mode::Idle;
        Outcome::SelectionChanged
    }

    // ---- transform gestures ----

    /// Start a drag/rotate/resize gesture over the current selection.
    /// Returns false (and stays out of Transforming) when the selection
    /// is empty.
    pub fn begin_transform(&mut self, rotation: f32, scale: Vec2, center: Vec2) -> bool {
        match self.path.begin_transform(rotation, scale, center) {
            Some(session) => {
                self.session = Some(session);
                self.mode = Mode::Transforming;
                true
            }
            None => false,
        }
    }

    pub fn update_transform(&mut self, update: &TransformUpdate) -> bool {
        match &self.session {
            Some(session) => self.path.apply_transform(session, update),
            None => false,
        }
    }

    /// Commit and discard the gesture; original positions are not kept
    /// across gestures.
    pub fn end_transform(&mut self) {
        if let Some(session) = self.session.take() {
            self.path.commit_transform(&session);
        }
        self.mode = Mode::Idle;
    }

    fn after_mutation(&mut self) {
        if self.path.stage() == Stage::Empty {
            self.mode = Mode::Idle;
        }
    }
}
