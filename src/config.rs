use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::foundation::error::{StagehandError, StagehandResult};

/// When a box drag writes its geometry back into the layer collection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitPolicy {
    /// Every pointer-move patches the stored box.
    Live,
    /// Pointer-moves only emit frames; the store is patched once on release.
    #[default]
    OnRelease,
}

/// Fixed priority between the two timeline snap sources.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipSnapOrder {
    /// Other clips' edges are tested before the playhead.
    #[default]
    ClipEdgesFirst,
    /// The playhead is tested before other clips' edges.
    PlayheadFirst,
}

/// Tunable constants for both editing surfaces.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    /// Magnet tolerance for boxes, in canvas pixels.
    pub snap_tolerance_px: f64,
    /// Minimum box width and height, in canvas pixels.
    pub min_box_size_px: f64,
    /// Distance at which a box counts as touching a canvas or region edge.
    pub edge_contact_px: f64,
    /// Hover edge margin at render scale 1.
    pub hover_margin_base_px: f64,
    /// Lower clamp for the scaled hover margin (screen pixels).
    pub hover_margin_min_px: f64,
    /// Upper clamp for the scaled hover margin (screen pixels).
    pub hover_margin_max_px: f64,
    /// Clip snap tolerance in screen pixels (converted to seconds through the zoom).
    pub clip_snap_px: f64,
    /// Playhead snap tolerance in screen pixels.
    pub playhead_snap_px: f64,
    /// Smallest clip duration in seconds.
    pub min_clip_duration: f64,
    /// Timeline row height in screen pixels.
    pub row_height_px: f64,
    /// When box drags are written to the store.
    pub commit_policy: CommitPolicy,
    /// Timeline snap source priority.
    pub clip_snap_order: ClipSnapOrder,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            snap_tolerance_px: 15.0,
            min_box_size_px: 10.0,
            edge_contact_px: 2.0,
            hover_margin_base_px: 16.0,
            hover_margin_min_px: 8.0,
            hover_margin_max_px: 24.0,
            clip_snap_px: 10.0,
            playhead_snap_px: 10.0,
            min_clip_duration: 0.1,
            row_height_px: 40.0,
            commit_policy: CommitPolicy::OnRelease,
            clip_snap_order: ClipSnapOrder::ClipEdgesFirst,
        }
    }
}

impl EditorConfig {
    /// Read and validate a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> StagehandResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            StagehandError::io(format!("open config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Read and validate a JSON config from any reader.
    pub fn from_reader<R: Read>(reader: R) -> StagehandResult<Self> {
        let cfg: Self = serde_json::from_reader(reader)
            .map_err(|e| StagehandError::serde(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse and validate a JSON config string.
    pub fn from_json_str(s: &str) -> StagehandResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Check every numeric field for sanity.
    pub fn validate(&self) -> StagehandResult<()> {
        let positive = [
            ("snap_tolerance_px", self.snap_tolerance_px),
            ("min_box_size_px", self.min_box_size_px),
            ("hover_margin_base_px", self.hover_margin_base_px),
            ("hover_margin_min_px", self.hover_margin_min_px),
            ("hover_margin_max_px", self.hover_margin_max_px),
            ("clip_snap_px", self.clip_snap_px),
            ("playhead_snap_px", self.playhead_snap_px),
            ("min_clip_duration", self.min_clip_duration),
            ("row_height_px", self.row_height_px),
        ];
        for (name, v) in positive {
            if !v.is_finite() || v <= 0.0 {
                return Err(StagehandError::validation(format!(
                    "{name} must be finite and > 0 (got {v})"
                )));
            }
        }
        if !self.edge_contact_px.is_finite() || self.edge_contact_px < 0.0 {
            return Err(StagehandError::validation(
                "edge_contact_px must be finite and >= 0",
            ));
        }
        if self.hover_margin_min_px > self.hover_margin_max_px {
            return Err(StagehandError::validation(
                "hover_margin_min_px must be <= hover_margin_max_px",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
