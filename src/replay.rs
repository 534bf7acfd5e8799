//! Scripted replay of pointer gestures and bulk edits against a [`Scene`].
//!
//! A script is a JSON list of steps. Pointer steps carry client coordinates and go
//! through the same controllers a host would drive; edit steps call the document
//! operations directly. The report lists everything the controllers emitted plus the
//! pointer-capture balance, which must come out even for any script.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::canvas::resolution::{AspectRatio, Resolution};
use crate::config::EditorConfig;
use crate::foundation::error::{StagehandError, StagehandResult};
use crate::interaction::box_drag::{
    BoxCommit, BoxDragController, BoxFrame, BoxTarget, DragContext,
};
use crate::interaction::capture::CaptureLog;
use crate::interaction::hit::HoverHit;
use crate::interaction::pointer::PointerEvent;
use crate::layers::model::RowType;
use crate::scene::Scene;
use crate::timeline::editor::{
    ClipCommit, ClipFrame, ClipTarget, TimelineClipEditor, TimelineContext,
};
use crate::timeline::model::MediaKind;

/// One scripted action.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ReplayStep {
    /// Pointer movement over the canvas without a session.
    Hover {
        /// Client x.
        x: f64,
        /// Client y.
        y: f64,
    },
    /// Pointer-down on a box.
    BoxDown {
        /// Pressed box and handle.
        target: BoxTarget,
        /// Client x.
        x: f64,
        /// Client y.
        y: f64,
    },
    /// Pointer-move during a box drag.
    BoxMove {
        /// Client x.
        x: f64,
        /// Client y.
        y: f64,
    },
    /// Pointer-up ending a box drag.
    BoxUp,
    /// Abandon the box drag.
    BoxCancel,
    /// Pointer-down on a clip.
    ClipDown {
        /// Pressed clip and handle.
        target: ClipTarget,
        /// Client x.
        x: f64,
        /// Client y.
        y: f64,
    },
    /// Pointer-move during a clip drag.
    ClipMove {
        /// Client x.
        x: f64,
        /// Client y.
        y: f64,
    },
    /// Pointer-up ending a clip drag.
    ClipUp,
    /// Abandon the clip drag.
    ClipCancel,
    /// Press on the time ruler.
    ScrubBegin {
        /// Client x.
        x: f64,
    },
    /// Drag along the time ruler.
    ScrubMove {
        /// Client x.
        x: f64,
    },
    /// Release the time ruler.
    ScrubEnd,
    /// Toggle the magnet for both surfaces.
    SetMagnet {
        /// New state.
        on: bool,
    },
    /// Toggle auto-ripple for cut-left and ripple delete.
    SetAutoRipple {
        /// New state.
        on: bool,
    },
    /// Change the canvas render scale.
    SetRenderScale {
        /// Screen pixels per canvas pixel.
        scale: f64,
    },
    /// Change the timeline zoom.
    SetZoom {
        /// Pixels per second.
        zoom: f64,
    },
    /// Switch the canvas to a preset size.
    SetCanvas {
        /// Aspect ratio.
        aspect: AspectRatio,
        /// Resolution key.
        resolution: Resolution,
    },
    /// Activate a slot in the layer matrix.
    AddLayerBox {
        /// Column index.
        col_idx: u32,
        /// Row.
        row: RowType,
        /// Optional hex color.
        #[serde(default)]
        color: Option<String>,
    },
    /// Delete a box.
    RemoveBox {
        /// Box id.
        id: String,
    },
    /// Show or hide a box.
    ToggleHidden {
        /// Box id.
        id: String,
    },
    /// Append a track.
    AddTrack {
        /// Track media kind.
        #[serde(default)]
        kind: MediaKind,
    },
    /// Lock or unlock a track.
    ToggleLock {
        /// Track id.
        id: String,
    },
    /// Drop a clip on a track row.
    AddClip {
        /// Clip media kind.
        #[serde(default)]
        kind: MediaKind,
        /// Track row.
        track_index: usize,
        /// Start time.
        time: f64,
        /// Display name.
        #[serde(default)]
        name: String,
    },
    /// Split a clip.
    Split {
        /// Clip id.
        id: String,
        /// Split time.
        at: f64,
    },
    /// Split the selected clip at the playhead.
    SplitAtPlayhead,
    /// Ripple cut-left.
    CutLeft {
        /// Cut time.
        at: f64,
    },
    /// Ripple cut-right.
    CutRight {
        /// Cut time.
        at: f64,
    },
    /// Delete a clip, closing the gap when auto-ripple is on.
    RippleDelete {
        /// Clip id.
        id: String,
    },
}

impl ReplayStep {
    /// Script name of the step.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Hover { .. } => "hover",
            Self::BoxDown { .. } => "box_down",
            Self::BoxMove { .. } => "box_move",
            Self::BoxUp => "box_up",
            Self::BoxCancel => "box_cancel",
            Self::ClipDown { .. } => "clip_down",
            Self::ClipMove { .. } => "clip_move",
            Self::ClipUp => "clip_up",
            Self::ClipCancel => "clip_cancel",
            Self::ScrubBegin { .. } => "scrub_begin",
            Self::ScrubMove { .. } => "scrub_move",
            Self::ScrubEnd => "scrub_end",
            Self::SetMagnet { .. } => "set_magnet",
            Self::SetAutoRipple { .. } => "set_auto_ripple",
            Self::SetRenderScale { .. } => "set_render_scale",
            Self::SetZoom { .. } => "set_zoom",
            Self::SetCanvas { .. } => "set_canvas",
            Self::AddLayerBox { .. } => "add_layer_box",
            Self::RemoveBox { .. } => "remove_box",
            Self::ToggleHidden { .. } => "toggle_hidden",
            Self::AddTrack { .. } => "add_track",
            Self::ToggleLock { .. } => "toggle_lock",
            Self::AddClip { .. } => "add_clip",
            Self::Split { .. } => "split",
            Self::SplitAtPlayhead => "split_at_playhead",
            Self::CutLeft { .. } => "cut_left",
            Self::CutRight { .. } => "cut_right",
            Self::RippleDelete { .. } => "ripple_delete",
        }
    }
}

/// A replay script with its initial host state.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ReplayScript {
    /// Canvas host state (origin, render scale, magnet).
    #[serde(default)]
    pub canvas: DragContext,
    /// Timeline host state (viewport, magnet).
    #[serde(default)]
    pub timeline: TimelineContext,
    /// Initial auto-ripple flag.
    #[serde(default)]
    pub auto_ripple: bool,
    /// Steps in order.
    pub steps: Vec<ReplayStep>,
}

impl ReplayScript {
    /// Read a script JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> StagehandResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            StagehandError::io(format!("open replay script '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Read a script from any reader.
    pub fn from_reader<R: Read>(reader: R) -> StagehandResult<Self> {
        serde_json::from_reader(reader)
            .map_err(|e| StagehandError::serde(format!("parse replay script: {e}")))
    }

    /// Parse a script JSON string.
    pub fn from_json_str(s: &str) -> StagehandResult<Self> {
        Self::from_reader(s.as_bytes())
    }
}

/// Something a step produced.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ReplayEvent {
    /// Hover result.
    Hover {
        /// Step index.
        step: usize,
        /// Box under the pointer.
        hit: Option<HoverHit>,
    },
    /// Box drag frame.
    BoxFrame {
        /// Step index.
        step: usize,
        /// Frame.
        frame: BoxFrame,
    },
    /// Box drag commit.
    BoxCommit {
        /// Step index.
        step: usize,
        /// Commit.
        commit: BoxCommit,
    },
    /// Clip drag frame.
    ClipFrame {
        /// Step index.
        step: usize,
        /// Frame.
        frame: ClipFrame,
    },
    /// Clip drag commit.
    ClipCommit {
        /// Step index.
        step: usize,
        /// Commit.
        commit: ClipCommit,
    },
    /// Playhead moved.
    Playhead {
        /// Step index.
        step: usize,
        /// New time.
        t: f64,
    },
    /// Edit applied.
    Applied {
        /// Step index.
        step: usize,
        /// Step name.
        op: &'static str,
        /// Id of the created entity, if any.
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        /// Number of clips touched by bulk edits.
        #[serde(skip_serializing_if = "Option::is_none")]
        count: Option<usize>,
    },
    /// Step had no effect (unknown target, locked track, no active session).
    Rejected {
        /// Step index.
        step: usize,
        /// Step name.
        op: &'static str,
    },
}

/// Outcome of a replay run.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ReplayReport {
    /// Number of steps executed.
    pub steps: usize,
    /// Emitted events in order.
    pub events: Vec<ReplayEvent>,
    /// Pointer capture calls made by the box controller.
    pub box_capture: CaptureLog,
    /// Pointer capture calls made by the clip editor.
    pub clip_capture: CaptureLog,
    /// Invariant violations left in the scene afterwards.
    pub violations: Vec<String>,
}

impl ReplayReport {
    /// Number of rejected steps.
    pub fn rejected(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, ReplayEvent::Rejected { .. }))
            .count()
    }
}

/// Replay `script` against `scene`.
///
/// Sessions still open when the script ends are dropped, which releases their capture.
#[tracing::instrument(skip_all, fields(steps = script.steps.len()))]
pub fn run(scene: &mut Scene, script: &ReplayScript, cfg: &EditorConfig) -> ReplayReport {
    let mut box_capture = CaptureLog::default();
    let mut clip_capture = CaptureLog::default();
    let events = {
        let mut runner = Runner {
            boxes: BoxDragController::with_capture(cfg.clone(), &mut box_capture),
            clips: TimelineClipEditor::with_capture(cfg.clone(), &mut clip_capture),
            canvas: script.canvas,
            timeline: script.timeline,
            auto_ripple: script.auto_ripple,
            events: Vec::new(),
        };
        for (i, step) in script.steps.iter().enumerate() {
            runner.apply(scene, i, step);
        }
        runner.events
    };
    let report = ReplayReport {
        steps: script.steps.len(),
        events,
        box_capture,
        clip_capture,
        violations: scene.violations(cfg.min_box_size_px, cfg.min_clip_duration),
    };
    tracing::debug!(
        events = report.events.len(),
        rejected = report.rejected(),
        "replay finished"
    );
    report
}

struct Runner<'a> {
    boxes: BoxDragController<&'a mut CaptureLog>,
    clips: TimelineClipEditor<&'a mut CaptureLog>,
    canvas: DragContext,
    timeline: TimelineContext,
    auto_ripple: bool,
    events: Vec<ReplayEvent>,
}

impl Runner<'_> {
    fn apply(&mut self, scene: &mut Scene, step: usize, s: &ReplayStep) {
        let op = s.name();
        let applied = |id: Option<String>, count: Option<usize>| ReplayEvent::Applied {
            step,
            op,
            id,
            count,
        };
        let ev = match s {
            ReplayStep::Hover { x, y } => Some(ReplayEvent::Hover {
                step,
                hit: self
                    .boxes
                    .hover(&scene.matrix, PointerEvent::at(*x, *y), &self.canvas),
            }),
            ReplayStep::BoxDown { target, x, y } => self
                .boxes
                .pointer_down(&mut scene.matrix, target, PointerEvent::at(*x, *y), &self.canvas)
                .then(|| applied(None, None)),
            ReplayStep::BoxMove { x, y } => self
                .boxes
                .pointer_move(&mut scene.matrix, PointerEvent::at(*x, *y), &self.canvas)
                .map(|frame| ReplayEvent::BoxFrame { step, frame }),
            ReplayStep::BoxUp => self
                .boxes
                .pointer_up(&mut scene.matrix)
                .map(|commit| ReplayEvent::BoxCommit { step, commit }),
            ReplayStep::BoxCancel => self.boxes.cancel().map(|_| applied(None, None)),
            ReplayStep::ClipDown { target, x, y } => self
                .clips
                .pointer_down(&mut scene.timeline, target, PointerEvent::at(*x, *y))
                .then(|| applied(None, None)),
            ReplayStep::ClipMove { x, y } => self
                .clips
                .pointer_move(&mut scene.timeline, PointerEvent::at(*x, *y), &self.timeline)
                .map(|frame| ReplayEvent::ClipFrame { step, frame }),
            ReplayStep::ClipUp => self
                .clips
                .pointer_up(&mut scene.timeline)
                .map(|commit| ReplayEvent::ClipCommit { step, commit }),
            ReplayStep::ClipCancel => self.clips.cancel().map(|_| applied(None, None)),
            ReplayStep::ScrubBegin { x } => {
                let t = self.clips.begin_scrub(
                    &mut scene.timeline,
                    PointerEvent::at(*x, 0.0),
                    &self.timeline,
                );
                Some(ReplayEvent::Playhead { step, t })
            }
            ReplayStep::ScrubMove { x } => self
                .clips
                .scrub_move(&mut scene.timeline, PointerEvent::at(*x, 0.0), &self.timeline)
                .map(|t| ReplayEvent::Playhead { step, t }),
            ReplayStep::ScrubEnd => self
                .clips
                .end_scrub(&scene.timeline)
                .map(|t| ReplayEvent::Playhead { step, t }),
            ReplayStep::SetMagnet { on } => {
                self.canvas.magnet = *on;
                self.timeline.magnet = *on;
                Some(applied(None, None))
            }
            ReplayStep::SetAutoRipple { on } => {
                self.auto_ripple = *on;
                Some(applied(None, None))
            }
            ReplayStep::SetRenderScale { scale } => {
                self.canvas.render_scale = *scale;
                Some(applied(None, None))
            }
            ReplayStep::SetZoom { zoom } => {
                self.timeline.viewport.set_zoom(*zoom);
                Some(applied(None, None))
            }
            ReplayStep::SetCanvas { aspect, resolution } => {
                self.boxes.cancel();
                scene.set_canvas_preset(*aspect, *resolution);
                Some(applied(None, None))
            }
            ReplayStep::AddLayerBox {
                col_idx,
                row,
                color,
            } => {
                let out = scene
                    .matrix
                    .add_layer_box(*col_idx, *row, color.as_deref());
                Some(applied(Some(out.id), None))
            }
            ReplayStep::RemoveBox { id } => scene
                .matrix
                .remove_box(id)
                .map(|b| applied(Some(b.id), None)),
            ReplayStep::ToggleHidden { id } => scene
                .matrix
                .toggle_hidden(id)
                .map(|_| applied(Some(id.clone()), None)),
            ReplayStep::AddTrack { kind } => {
                let id = scene.timeline.add_track(*kind);
                Some(applied(Some(id), None))
            }
            ReplayStep::ToggleLock { id } => scene
                .timeline
                .toggle_track_lock(id)
                .map(|_| applied(Some(id.clone()), None)),
            ReplayStep::AddClip {
                kind,
                track_index,
                time,
                name,
            } => scene
                .timeline
                .add_clip_at(*kind, *track_index, *time, name)
                .map(|id| applied(Some(id), None)),
            ReplayStep::Split { id, at } => scene
                .timeline
                .split_clip(id, *at)
                .map(|id| applied(Some(id), None)),
            ReplayStep::SplitAtPlayhead => scene
                .timeline
                .split_selected_at_playhead()
                .map(|id| applied(Some(id), None)),
            ReplayStep::CutLeft { at } => {
                let n = scene.timeline.cut_and_delete_left(*at, self.auto_ripple);
                Some(applied(None, Some(n)))
            }
            ReplayStep::CutRight { at } => {
                let n = scene.timeline.cut_and_delete_right(*at);
                Some(applied(None, Some(n)))
            }
            ReplayStep::RippleDelete { id } => scene
                .timeline
                .ripple_delete_clip(id, self.auto_ripple)
                .map(|c| applied(Some(c.id), None)),
        };
        self.events
            .push(ev.unwrap_or(ReplayEvent::Rejected { step, op }));
    }
}

#[cfg(test)]
#[path = "../tests/unit/replay.rs"]
mod tests;
