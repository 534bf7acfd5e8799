//! Move/resize state machine for layer boxes.
//!
//! `idle -> {moving | resizing} -> idle`. The session is explicit state owned by the
//! controller; everything the pipeline needs from the host (render scale, canvas origin,
//! magnet flag) comes in through [`DragContext`] on every call.
//!
//! Each pointer move runs the same pipeline against the pre-drag snapshot:
//! delta in canvas units, apply to the snapshot, clamp to canvas and minimum size,
//! magnet snap per axis, re-clamp, band confinement, re-normalize. Confinement runs last,
//! so a band thinner than the minimum size wins over the minimum height.

use crate::canvas::coords::{client_to_canvas, to_normalized};
use crate::config::{CommitPolicy, EditorConfig};
use crate::foundation::core::{CanvasSize, NormGeom, PixelGeom, Point};
use crate::foundation::math::{approx_eq, clamp_lo};
use crate::interaction::capture::{CaptureSlot, NoCapture, PointerCapture};
use crate::interaction::hit::{HoverHit, edge_margin, edges_near, hit_test};
use crate::interaction::pointer::{ActiveEdges, CursorHint, PointerEvent, ResizeHandle};
use crate::layers::matrix::LayerSlotMatrix;
use crate::layers::model::LayerBox;
use crate::region::constraint::{
    EdgeContact, RegionContact, canvas_contact, check_contact, clamp_to_canvas, confine,
    region_for_box,
};
use crate::snap::engine::{MovingEdges, SnapLine, SnapTarget, box_lines, canvas_lines, find_snap};

/// Host state injected into every controller call.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DragContext {
    /// Client position of the canvas' top-left corner.
    pub origin: Point,
    /// Screen pixels per canvas pixel.
    pub render_scale: f64,
    /// Magnet snapping enabled.
    pub magnet: bool,
}

impl Default for DragContext {
    fn default() -> Self {
        Self {
            origin: Point::ZERO,
            render_scale: 1.0,
            magnet: true,
        }
    }
}

/// What was pressed.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "on", rename_all = "snake_case")]
pub enum BoxTarget {
    /// Box body; grabbing near an edge resizes that edge.
    Body {
        /// Box id.
        id: String,
    },
    /// An explicit resize handle.
    Handle {
        /// Box id.
        id: String,
        /// Handle pressed.
        handle: ResizeHandle,
    },
}

/// Drag mode of an active session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DragMode {
    /// Translate the box.
    Move,
    /// Move the active edges, keeping the opposite edges fixed.
    Resize {
        /// Active edges.
        edges: ActiveEdges,
    },
}

/// An in-flight box drag.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct DragSession {
    /// Dragged box.
    pub box_id: String,
    /// Move or resize.
    pub mode: DragMode,
    /// Pointer-down position in canvas units.
    pub anchor: Point,
    /// Geometry before the drag; callers use it to revert a cancelled drag.
    pub start: PixelGeom,
    /// Geometry of the latest frame.
    pub last: PixelGeom,
}

/// Per-move geometry update for live feedback.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct BoxFrame {
    /// Dragged box.
    pub box_id: String,
    /// Constrained pixel geometry.
    pub px: PixelGeom,
    /// Matching normalized geometry.
    pub norm: NormGeom,
    /// Line the box is aligned to horizontally.
    pub snap_x: Option<SnapTarget>,
    /// Line the box is aligned to vertically.
    pub snap_y: Option<SnapTarget>,
    /// Canvas edges being touched.
    pub canvas_contact: EdgeContact,
    /// Band edges being touched, for confined non-`full` boxes.
    pub region_contact: Option<RegionContact>,
}

/// Final geometry emitted at pointer-up.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct BoxCommit {
    /// Committed box.
    pub box_id: String,
    /// Final pixel geometry.
    pub px: PixelGeom,
    /// Final normalized geometry.
    pub norm: NormGeom,
}

/// Pointer-driven move/resize of one layer box at a time.
pub struct BoxDragController<C: PointerCapture = NoCapture> {
    cfg: EditorConfig,
    session: Option<DragSession>,
    capture: CaptureSlot<C>,
}

impl BoxDragController<NoCapture> {
    /// Controller for hosts that route pointer events themselves.
    pub fn new(cfg: EditorConfig) -> Self {
        Self::with_capture(cfg, NoCapture)
    }
}

impl<C: PointerCapture> BoxDragController<C> {
    /// Controller acquiring `capture` for the duration of each session.
    pub fn with_capture(cfg: EditorConfig, capture: C) -> Self {
        Self {
            cfg,
            session: None,
            capture: CaptureSlot::new(capture),
        }
    }

    /// Active session, if any.
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Whether pointer capture is currently held.
    pub fn is_capturing(&self) -> bool {
        self.capture.is_held()
    }

    /// The host capture.
    pub fn capture(&self) -> &C {
        self.capture.inner()
    }

    /// Cursor hint for pointer movement without an active session.
    pub fn hover(
        &self,
        matrix: &LayerSlotMatrix,
        ev: PointerEvent,
        ctx: &DragContext,
    ) -> Option<HoverHit> {
        if self.session.is_some() {
            return None;
        }
        let p = client_to_canvas(ev.client, ctx.origin, ctx.render_scale);
        hit_test(matrix, p, edge_margin(&self.cfg, ctx.render_scale))
    }

    /// Start a session on `target`. Returns `false` for unknown or hidden boxes.
    ///
    /// The pressed box becomes the selection. A session still open from an earlier
    /// gesture is abandoned first.
    pub fn pointer_down(
        &mut self,
        matrix: &mut LayerSlotMatrix,
        target: &BoxTarget,
        ev: PointerEvent,
        ctx: &DragContext,
    ) -> bool {
        if let Some(stale) = self.cancel() {
            tracing::warn!(id = %stale.box_id, "pointer_down while a drag was active; abandoned it");
        }
        let id = match target {
            BoxTarget::Body { id } | BoxTarget::Handle { id, .. } => id.as_str(),
        };
        let Some(b) = matrix.get(id).filter(|b| !b.is_hidden) else {
            tracing::warn!(id, "pointer_down on unknown or hidden box");
            return false;
        };
        let anchor = client_to_canvas(ev.client, ctx.origin, ctx.render_scale);
        let mode = match target {
            BoxTarget::Handle { handle, .. } => DragMode::Resize {
                edges: handle.edges(),
            },
            BoxTarget::Body { .. } => {
                let edges = edges_near(b.px, anchor, edge_margin(&self.cfg, ctx.render_scale));
                if edges.is_empty() {
                    DragMode::Move
                } else {
                    DragMode::Resize { edges }
                }
            }
        };
        let session = DragSession {
            box_id: b.id.clone(),
            mode,
            anchor,
            start: b.px,
            last: b.px,
        };
        matrix.select(Some(id));
        self.capture.begin();
        tracing::debug!(id = %session.box_id, mode = ?session.mode, "box drag started");
        self.session = Some(session);
        true
    }

    /// Advance the session to the pointer position. `None` when idle or when the box
    /// disappeared, which also ends the session.
    pub fn pointer_move(
        &mut self,
        matrix: &mut LayerSlotMatrix,
        ev: PointerEvent,
        ctx: &DragContext,
    ) -> Option<BoxFrame> {
        let session = self.session.as_ref()?;
        let Some(b) = matrix.get(&session.box_id) else {
            tracing::warn!(id = %session.box_id, "dragged box vanished; ending session");
            self.cancel();
            return None;
        };
        let pointer = client_to_canvas(ev.client, ctx.origin, ctx.render_scale);
        let frame = drag_frame(session, b, matrix, pointer, &self.cfg, ctx.magnet);
        tracing::trace!(id = %frame.box_id, px = ?frame.px, "box drag frame");
        if self.cfg.commit_policy == CommitPolicy::Live {
            matrix.write_geometry(&frame.box_id, frame.px);
        }
        if let Some(s) = self.session.as_mut() {
            s.last = frame.px;
        }
        Some(frame)
    }

    /// End the session, writing and returning the last frame's geometry.
    pub fn pointer_up(&mut self, matrix: &mut LayerSlotMatrix) -> Option<BoxCommit> {
        let session = self.session.take()?;
        self.capture.end();
        if !matrix.write_geometry(&session.box_id, session.last) {
            tracing::warn!(id = %session.box_id, "dragged box vanished before commit");
            return None;
        }
        let norm = to_normalized(session.last, matrix.canvas());
        tracing::debug!(id = %session.box_id, px = ?session.last, "box drag committed");
        Some(BoxCommit {
            box_id: session.box_id,
            px: session.last,
            norm,
        })
    }

    /// Abandon the session without committing. Nothing is rolled back; the returned
    /// session carries the pre-drag snapshot for callers that want to revert.
    pub fn cancel(&mut self) -> Option<DragSession> {
        let session = self.session.take()?;
        self.capture.end();
        tracing::debug!(id = %session.box_id, "box drag cancelled");
        Some(session)
    }

    /// Cursor for the active session, if any.
    pub fn active_cursor(&self) -> Option<CursorHint> {
        self.session.as_ref().map(|s| match s.mode {
            DragMode::Move => CursorHint::Move,
            DragMode::Resize { edges } => edges.cursor(),
        })
    }
}

/// Run the drag pipeline for one pointer position.
pub fn drag_frame(
    session: &DragSession,
    b: &LayerBox,
    matrix: &LayerSlotMatrix,
    pointer: Point,
    cfg: &EditorConfig,
    magnet: bool,
) -> BoxFrame {
    let canvas = matrix.canvas();
    let delta = pointer - session.anchor;
    let min = cfg.min_box_size_px;
    let lines = magnet.then(|| snap_lines(matrix, &session.box_id, canvas));

    let (mut px, mut snap_x, mut snap_y) = match session.mode {
        DragMode::Move => {
            let moved = clamp_to_canvas(session.start.translated(delta), canvas, min);
            match &lines {
                Some((xs, ys)) => snap_move(moved, xs, ys, cfg.snap_tolerance_px),
                None => (moved, None, None),
            }
        }
        DragMode::Resize { edges } => {
            let resized = resize(session.start, edges, delta.x, delta.y, canvas, min);
            match &lines {
                Some((xs, ys)) => snap_resize(resized, edges, xs, ys, canvas, min, cfg),
                None => (resized, None, None),
            }
        }
    };

    px = clamp_to_canvas(px, canvas, min);
    let region = region_for_box(b, canvas);
    if let Some(region) = region {
        px = confine(px, region);
    }
    if let Some((xs, ys)) = &lines {
        snap_x = snap_x.filter(|t| still_aligned(px.x, px.w, xs, t));
        snap_y = snap_y.filter(|t| still_aligned(px.y, px.h, ys, t));
    }

    BoxFrame {
        box_id: session.box_id.clone(),
        px,
        norm: to_normalized(px, canvas),
        snap_x,
        snap_y,
        canvas_contact: canvas_contact(px, canvas, cfg.edge_contact_px),
        region_contact: region
            .filter(|_| b.reports_region_contact())
            .map(|r| check_contact(px, r, cfg.edge_contact_px)),
    }
}

fn snap_lines(
    matrix: &LayerSlotMatrix,
    dragged: &str,
    canvas: CanvasSize,
) -> (Vec<SnapLine>, Vec<SnapLine>) {
    let mut xs = canvas_lines(canvas.width()).to_vec();
    let mut ys = canvas_lines(canvas.height()).to_vec();
    for other in matrix.boxes() {
        if other.id == dragged || other.is_hidden {
            continue;
        }
        xs.extend(box_lines(&other.id, other.px.x, other.px.w));
        ys.extend(box_lines(&other.id, other.px.y, other.px.h));
    }
    (xs, ys)
}

fn snap_move(
    g: PixelGeom,
    xs: &[SnapLine],
    ys: &[SnapLine],
    tol: f64,
) -> (PixelGeom, Option<SnapTarget>, Option<SnapTarget>) {
    let sx = find_snap(MovingEdges::span(g.x, g.w), xs, tol);
    let sy = find_snap(MovingEdges::span(g.y, g.h), ys, tol);
    (
        PixelGeom { x: sx.value, y: sy.value, ..g },
        sx.target,
        sy.target,
    )
}

/// Apply a resize delta to the active edges, keeping opposite edges fixed and the size
/// at or above `min`.
fn resize(
    start: PixelGeom,
    edges: ActiveEdges,
    dx: f64,
    dy: f64,
    canvas: CanvasSize,
    min: f64,
) -> PixelGeom {
    let mut g = start;
    if edges.left {
        (g.x, g.w) = move_leading(start.x + dx, start.right(), min);
    } else if edges.right {
        g.w = move_trailing(start.x, start.w + dx, canvas.width(), min);
    }
    if edges.top {
        (g.y, g.h) = move_leading(start.y + dy, start.bottom(), min);
    } else if edges.bottom {
        g.h = move_trailing(start.y, start.h + dy, canvas.height(), min);
    }
    g
}

fn move_leading(pos: f64, fixed_end: f64, min: f64) -> (f64, f64) {
    let pos = clamp_lo(pos, 0.0, fixed_end - min);
    (pos, fixed_end - pos)
}

fn move_trailing(start: f64, len: f64, extent: f64, min: f64) -> f64 {
    clamp_lo(len, min, extent - start)
}

fn snap_resize(
    g: PixelGeom,
    edges: ActiveEdges,
    xs: &[SnapLine],
    ys: &[SnapLine],
    canvas: CanvasSize,
    min: f64,
    cfg: &EditorConfig,
) -> (PixelGeom, Option<SnapTarget>, Option<SnapTarget>) {
    let tol = cfg.snap_tolerance_px;
    let mut out = g;
    let mut snap_x = None;
    let mut snap_y = None;
    if edges.left {
        let s = find_snap(MovingEdges::point(g.x), xs, tol);
        if s.snapped {
            (out.x, out.w) = move_leading(s.value, g.right(), min);
            snap_x = s.target;
        }
    } else if edges.right {
        let s = find_snap(MovingEdges::point(g.right()), xs, tol);
        if s.snapped {
            out.w = move_trailing(g.x, s.value - g.x, canvas.width(), min);
            snap_x = s.target;
        }
    }
    if edges.top {
        let s = find_snap(MovingEdges::point(g.y), ys, tol);
        if s.snapped {
            (out.y, out.h) = move_leading(s.value, g.bottom(), min);
            snap_y = s.target;
        }
    } else if edges.bottom {
        let s = find_snap(MovingEdges::point(g.bottom()), ys, tol);
        if s.snapped {
            out.h = move_trailing(g.y, s.value - g.y, canvas.height(), min);
            snap_y = s.target;
        }
    }
    (out, snap_x, snap_y)
}

/// A snap survives only if a line of its target still touches the box after the final
/// clamps.
fn still_aligned(start: f64, len: f64, lines: &[SnapLine], target: &SnapTarget) -> bool {
    let points = [start, start + len, start + len / 2.0];
    lines
        .iter()
        .filter(|l| &l.target == target)
        .any(|l| points.iter().any(|p| approx_eq(*p, l.value, 1e-6)))
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/box_drag.rs"]
mod tests;
