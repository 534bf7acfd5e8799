//! Stagehand is the direct-manipulation geometry core of a video compositing editor.
//!
//! It owns the data and the pointer state machines behind two editing surfaces:
//!
//! - The canvas: a [`LayerSlotMatrix`] of layer boxes kept in resolution-independent
//!   normalized geometry, dragged and resized through a [`BoxDragController`] with
//!   magnet snapping, canvas clamping and per-column band confinement.
//! - The timeline: a [`Timeline`] of tracks and clips edited through a
//!   [`TimelineClipEditor`] (move, trim, track reassignment, playhead scrub) plus bulk
//!   operations such as split and ripple cuts.
//!
//! The engine never fails on geometry: out-of-range input is clamped and invalid
//! requests are reported as no-ops. Errors only surface when loading documents
//! ([`EditorConfig`], [`Scene`], [`ReplayScript`]).
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod canvas;
mod config;
mod foundation;
mod interaction;
mod layers;
mod region;
mod scene;
mod snap;
mod timeline;

/// Scripted replay of gestures and edits.
pub mod replay;

pub use crate::foundation::color::Rgba8;
pub use crate::foundation::core::{CanvasSize, NormGeom, PixelGeom, Point, Rect, Size, Vec2};
pub use crate::foundation::error::{StagehandError, StagehandResult};
pub use crate::foundation::ids::IdAllocator;
pub use crate::foundation::math::approx_eq;

pub use crate::config::{ClipSnapOrder, CommitPolicy, EditorConfig};

pub use crate::canvas::coords::{client_to_canvas, screen_delta_to_canvas, to_normalized, to_pixel};
pub use crate::canvas::resolution::{
    AspectRatio, Resolution, canvas_size_for, canvas_size_for_source, fit_render_scale,
};

pub use crate::snap::engine::{
    Anchor, MovingEdges, SnapLine, SnapResult, SnapTarget, box_lines, canvas_lines, clip_lines,
    closer_of, find_snap,
};

pub use crate::region::constraint::{
    EdgeContact, Region, RegionContact, allowed_region, canvas_contact, check_contact,
    clamp_to_canvas, confine, region_for_box,
};

pub use crate::layers::matrix::{LayerSlotMatrix, SlotOutcome, slot_default_geom};
pub use crate::layers::model::{ColRole, LayerBox, RowType, slot_key, z_index_for};

pub use crate::interaction::box_drag::{
    BoxCommit, BoxDragController, BoxFrame, BoxTarget, DragContext, DragMode, DragSession,
    drag_frame,
};
pub use crate::interaction::capture::{CaptureLog, NoCapture, PointerCapture};
pub use crate::interaction::hit::{HoverHit, edge_margin, edges_near, hit_test};
pub use crate::interaction::pointer::{
    ActiveEdges, CursorHint, Modifiers, PointerEvent, ResizeHandle,
};

pub use crate::timeline::editor::{
    ClipCommit, ClipDragMode, ClipFrame, ClipSession, ClipTarget, TimelineClipEditor,
    TimelineContext, clip_snap_lines, scrub_time,
};
pub use crate::timeline::model::{Clip, DROP_CLIP_DURATION, MediaKind, Timeline, Track};
pub use crate::timeline::viewport::{DEFAULT_ZOOM, TimelineViewport, ZOOM_MAX, ZOOM_MIN};

pub use crate::replay::{ReplayEvent, ReplayReport, ReplayScript, ReplayStep};
pub use crate::scene::Scene;
