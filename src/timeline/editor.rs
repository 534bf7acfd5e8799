//! Pointer-driven clip editing on the time axis.
//!
//! `idle -> {moving | resizing_left | resizing_right} -> idle`, plus a separate playhead
//! scrub gesture. Like the box controller, the session snapshot is explicit state and
//! every call receives the host's zoom, scroll and magnet state through
//! [`TimelineContext`].
//!
//! Lock state is checked at pointer-down, on every move and again at pointer-up: a clip
//! whose track was locked mid-drag is put back where it started.

use crate::config::{ClipSnapOrder, CommitPolicy, EditorConfig};
use crate::foundation::math::clamp_lo;
use crate::interaction::capture::{CaptureSlot, NoCapture, PointerCapture};
use crate::interaction::pointer::{CursorHint, PointerEvent};
use crate::snap::engine::{MovingEdges, SnapLine, SnapTarget, clip_lines, find_snap};
use crate::timeline::model::Timeline;
use crate::timeline::viewport::TimelineViewport;

/// Host state injected into every editor call.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TimelineContext {
    /// Zoom, scroll and row layout.
    pub viewport: TimelineViewport,
    /// Magnet snapping enabled.
    pub magnet: bool,
}

impl Default for TimelineContext {
    fn default() -> Self {
        Self {
            viewport: TimelineViewport::default(),
            magnet: true,
        }
    }
}

/// What was pressed on a clip.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "on", rename_all = "snake_case")]
pub enum ClipTarget {
    /// Clip body: move, possibly across tracks.
    Body {
        /// Clip id.
        id: String,
    },
    /// Left trim handle.
    LeftEdge {
        /// Clip id.
        id: String,
    },
    /// Right trim handle.
    RightEdge {
        /// Clip id.
        id: String,
    },
}

impl ClipTarget {
    /// Pressed clip.
    pub fn id(&self) -> &str {
        match self {
            Self::Body { id } | Self::LeftEdge { id } | Self::RightEdge { id } => id,
        }
    }

    fn mode(&self) -> ClipDragMode {
        match self {
            Self::Body { .. } => ClipDragMode::Move,
            Self::LeftEdge { .. } => ClipDragMode::ResizeLeft,
            Self::RightEdge { .. } => ClipDragMode::ResizeRight,
        }
    }
}

/// Drag mode of an active clip session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipDragMode {
    /// Shift start, keep duration.
    Move,
    /// Move the start, keep the end fixed.
    ResizeLeft,
    /// Move the end.
    ResizeRight,
}

/// An in-flight clip drag.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ClipSession {
    /// Dragged clip.
    pub clip_id: String,
    /// What the drag changes.
    pub mode: ClipDragMode,
    /// Client x at pointer-down.
    pub anchor_x: f64,
    /// Start before the drag.
    pub start: f64,
    /// Duration before the drag.
    pub duration: f64,
    /// Track before the drag.
    pub track_id: String,
    /// Latest frame.
    pub last: ClipFrame,
}

/// Per-move placement for live feedback.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ClipFrame {
    /// Dragged clip.
    pub clip_id: String,
    /// Start in seconds.
    pub start: f64,
    /// Duration in seconds.
    pub duration: f64,
    /// Track the clip sits on.
    pub track_id: String,
    /// Line the moving edge snapped to.
    pub snap: Option<SnapTarget>,
}

/// Placement written at pointer-up.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ClipCommit {
    /// Committed clip.
    pub clip_id: String,
    /// Final start.
    pub start: f64,
    /// Final duration.
    pub duration: f64,
    /// Final track.
    pub track_id: String,
}

enum Gesture {
    Clip(ClipSession),
    Scrub,
}

/// Clip move/trim and playhead scrubbing, one gesture at a time.
pub struct TimelineClipEditor<C: PointerCapture = NoCapture> {
    cfg: EditorConfig,
    gesture: Option<Gesture>,
    capture: CaptureSlot<C>,
}

impl TimelineClipEditor<NoCapture> {
    /// Editor for hosts that route pointer events themselves.
    pub fn new(cfg: EditorConfig) -> Self {
        Self::with_capture(cfg, NoCapture)
    }
}

impl<C: PointerCapture> TimelineClipEditor<C> {
    /// Editor acquiring `capture` for the duration of each gesture.
    pub fn with_capture(cfg: EditorConfig, capture: C) -> Self {
        Self {
            cfg,
            gesture: None,
            capture: CaptureSlot::new(capture),
        }
    }

    /// Active clip session, if any.
    pub fn session(&self) -> Option<&ClipSession> {
        match &self.gesture {
            Some(Gesture::Clip(s)) => Some(s),
            _ => None,
        }
    }

    /// Whether the playhead is being scrubbed.
    pub fn is_scrubbing(&self) -> bool {
        matches!(self.gesture, Some(Gesture::Scrub))
    }

    /// Whether pointer capture is currently held.
    pub fn is_capturing(&self) -> bool {
        self.capture.is_held()
    }

    /// The host capture.
    pub fn capture(&self) -> &C {
        self.capture.inner()
    }

    /// Start dragging a clip. Returns `false` for unknown clips and clips on locked
    /// tracks. The clip becomes the selection.
    pub fn pointer_down(
        &mut self,
        timeline: &mut Timeline,
        target: &ClipTarget,
        ev: PointerEvent,
    ) -> bool {
        self.abandon();
        let id = target.id();
        if !timeline.is_clip_editable(id) {
            tracing::warn!(id, "pointer_down on unknown clip or locked track");
            return false;
        }
        let Some(clip) = timeline.clip(id) else {
            return false;
        };
        let session = ClipSession {
            clip_id: clip.id.clone(),
            mode: target.mode(),
            anchor_x: ev.client.x,
            start: clip.start,
            duration: clip.duration,
            track_id: clip.track_id.clone(),
            last: ClipFrame {
                clip_id: clip.id.clone(),
                start: clip.start,
                duration: clip.duration,
                track_id: clip.track_id.clone(),
                snap: None,
            },
        };
        timeline.select(Some(id));
        self.capture.begin();
        tracing::debug!(id, mode = ?session.mode, "clip drag started");
        self.gesture = Some(Gesture::Clip(session));
        true
    }

    /// Advance the clip session.
    ///
    /// `None` when idle, when the clip vanished (which ends the session) or while the
    /// clip's track is locked (the update is dropped, the session stays open).
    pub fn pointer_move(
        &mut self,
        timeline: &mut Timeline,
        ev: PointerEvent,
        ctx: &TimelineContext,
    ) -> Option<ClipFrame> {
        let Some(Gesture::Clip(session)) = &self.gesture else {
            return None;
        };
        let Some(clip) = timeline.clip(&session.clip_id) else {
            tracing::warn!(id = %session.clip_id, "dragged clip vanished; ending session");
            self.cancel();
            return None;
        };
        if timeline.is_track_locked(&clip.track_id) {
            tracing::warn!(id = %session.clip_id, "track locked mid-drag; update ignored");
            return None;
        }
        let frame = clip_frame(session, timeline, ev, ctx, &self.cfg);
        tracing::trace!(
            id = %frame.clip_id,
            start = frame.start,
            duration = frame.duration,
            "clip drag frame"
        );

        let (start, duration) = match self.cfg.commit_policy {
            CommitPolicy::Live => (frame.start, frame.duration),
            CommitPolicy::OnRelease => (clip.start, clip.duration),
        };
        timeline.place_clip(&frame.clip_id, start, duration, &frame.track_id);
        if let Some(Gesture::Clip(s)) = self.gesture.as_mut() {
            s.last = frame.clone();
        }
        Some(frame)
    }

    /// End the clip session and write the last frame.
    ///
    /// If the clip's track was locked while dragging, the clip is restored to its
    /// pre-drag placement and nothing is committed.
    pub fn pointer_up(&mut self, timeline: &mut Timeline) -> Option<ClipCommit> {
        let session = match self.gesture.take() {
            Some(Gesture::Clip(s)) => s,
            other => {
                self.gesture = other;
                return None;
            }
        };
        self.capture.end();
        let Some(clip) = timeline.clip(&session.clip_id) else {
            tracing::warn!(id = %session.clip_id, "dragged clip vanished before commit");
            return None;
        };
        if timeline.is_track_locked(&clip.track_id) {
            tracing::warn!(id = %session.clip_id, "track locked during drag; restoring clip");
            timeline.place_clip(
                &session.clip_id,
                session.start,
                session.duration,
                &session.track_id,
            );
            return None;
        }
        let last = session.last;
        timeline.place_clip(&last.clip_id, last.start, last.duration, &last.track_id);
        tracing::debug!(
            id = %last.clip_id,
            start = last.start,
            duration = last.duration,
            "clip drag committed"
        );
        Some(ClipCommit {
            clip_id: last.clip_id,
            start: last.start,
            duration: last.duration,
            track_id: last.track_id,
        })
    }

    /// Abandon the clip session without committing. Live writes are not rolled back;
    /// the returned session carries the pre-drag snapshot.
    pub fn cancel(&mut self) -> Option<ClipSession> {
        match self.gesture.take() {
            Some(Gesture::Clip(s)) => {
                self.capture.end();
                tracing::debug!(id = %s.clip_id, "clip drag cancelled");
                Some(s)
            }
            other => {
                self.gesture = other;
                None
            }
        }
    }

    /// Start scrubbing and move the playhead under the pointer.
    pub fn begin_scrub(
        &mut self,
        timeline: &mut Timeline,
        ev: PointerEvent,
        ctx: &TimelineContext,
    ) -> f64 {
        self.abandon();
        self.capture.begin();
        self.gesture = Some(Gesture::Scrub);
        tracing::debug!("scrub started");
        self.apply_scrub(timeline, ev, ctx)
    }

    /// Follow the pointer while scrubbing. `None` when not scrubbing.
    pub fn scrub_move(
        &mut self,
        timeline: &mut Timeline,
        ev: PointerEvent,
        ctx: &TimelineContext,
    ) -> Option<f64> {
        self.is_scrubbing()
            .then(|| self.apply_scrub(timeline, ev, ctx))
    }

    /// Stop scrubbing, returning the final playhead time.
    pub fn end_scrub(&mut self, timeline: &Timeline) -> Option<f64> {
        if !self.is_scrubbing() {
            return None;
        }
        self.gesture = None;
        self.capture.end();
        tracing::debug!(t = timeline.playhead(), "scrub ended");
        Some(timeline.playhead())
    }

    /// Cursor for the active gesture, if any.
    pub fn active_cursor(&self) -> Option<CursorHint> {
        match &self.gesture {
            Some(Gesture::Clip(s)) if s.mode == ClipDragMode::Move => Some(CursorHint::Move),
            Some(Gesture::Clip(_)) | Some(Gesture::Scrub) => Some(CursorHint::EwResize),
            None => None,
        }
    }

    fn apply_scrub(
        &self,
        timeline: &mut Timeline,
        ev: PointerEvent,
        ctx: &TimelineContext,
    ) -> f64 {
        let t = scrub_time(timeline, ev.client.x, ctx, &self.cfg);
        timeline.set_playhead(t);
        tracing::trace!(t, "scrub frame");
        timeline.playhead()
    }

    fn abandon(&mut self) {
        match self.gesture.take() {
            Some(Gesture::Clip(s)) => {
                tracing::warn!(id = %s.clip_id, "new gesture during a clip drag; abandoned it");
            }
            Some(Gesture::Scrub) => tracing::debug!("scrub abandoned"),
            None => {}
        }
        self.capture.end();
    }
}

/// Playhead time for a client x: the first clip start or end within the playhead
/// tolerance when the magnet is on, else the raw time.
pub fn scrub_time(
    timeline: &Timeline,
    client_x: f64,
    ctx: &TimelineContext,
    cfg: &EditorConfig,
) -> f64 {
    let raw = ctx.viewport.time_at(client_x);
    if !ctx.magnet {
        return raw;
    }
    let lines: Vec<SnapLine> = timeline
        .clips()
        .iter()
        .flat_map(|c| clip_lines(&c.id, c.start, c.end()))
        .collect();
    let tol = ctx.viewport.px_to_seconds(cfg.playhead_snap_px);
    find_snap(MovingEdges::point(raw), &lines, tol).value.max(0.0)
}

/// Snap lines for a dragged clip in the configured priority order.
pub fn clip_snap_lines(timeline: &Timeline, dragged: &str, order: ClipSnapOrder) -> Vec<SnapLine> {
    let mut lines: Vec<SnapLine> = timeline
        .clips()
        .iter()
        .filter(|c| c.id != dragged)
        .flat_map(|c| clip_lines(&c.id, c.start, c.end()))
        .collect();
    let playhead = SnapLine::new(timeline.playhead(), SnapTarget::Playhead);
    match order {
        ClipSnapOrder::ClipEdgesFirst => lines.push(playhead),
        ClipSnapOrder::PlayheadFirst => lines.insert(0, playhead),
    }
    lines
}

fn clip_frame(
    session: &ClipSession,
    timeline: &Timeline,
    ev: PointerEvent,
    ctx: &TimelineContext,
    cfg: &EditorConfig,
) -> ClipFrame {
    let vp = &ctx.viewport;
    let dt = vp.px_to_seconds(ev.client.x - session.anchor_x);
    let min = cfg.min_clip_duration;
    let tol = vp.px_to_seconds(cfg.clip_snap_px);
    let lines = ctx
        .magnet
        .then(|| clip_snap_lines(timeline, &session.clip_id, cfg.clip_snap_order));
    let snap = |edges: MovingEdges| lines.as_ref().map(|l| find_snap(edges, l, tol));

    let mut track_id = session.last.track_id.clone();
    let (start, duration, target) = match session.mode {
        ClipDragMode::Move => {
            let start = (session.start + dt).max(0.0);
            let (start, target) = match snap(MovingEdges::ends(start, start + session.duration)) {
                Some(s) if s.snapped => (s.value.max(0.0), s.target),
                _ => (start, None),
            };
            if let Some(row) = vp.track_index_at(ev.client.y, timeline.tracks().len()) {
                let row_track = &timeline.tracks()[row];
                if row_track.id != track_id && !row_track.is_locked {
                    track_id = row_track.id.clone();
                }
            }
            (start, session.duration, target)
        }
        ClipDragMode::ResizeLeft => {
            let end = session.start + session.duration;
            let start = clamp_lo(session.start + dt, 0.0, end - min);
            let (start, target) = match snap(MovingEdges::point(start)) {
                Some(s) if s.snapped => (clamp_lo(s.value, 0.0, end - min), s.target),
                _ => (start, None),
            };
            (start, end - start, target)
        }
        ClipDragMode::ResizeRight => {
            let duration = (session.duration + dt).max(min);
            let end = session.start + duration;
            let (duration, target) = match snap(MovingEdges::point(end)) {
                Some(s) if s.snapped => ((s.value - session.start).max(min), s.target),
                _ => (duration, None),
            };
            (session.start, duration, target)
        }
    };

    ClipFrame {
        clip_id: session.clip_id.clone(),
        start,
        duration,
        track_id,
        snap: target,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/editor.rs"]
mod tests;
