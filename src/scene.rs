use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::canvas::resolution::{AspectRatio, Resolution, canvas_size_for};
use crate::foundation::core::CanvasSize;
use crate::foundation::error::{StagehandError, StagehandResult};
use crate::foundation::ids::IdAllocator;
use crate::layers::matrix::LayerSlotMatrix;
use crate::timeline::model::Timeline;

/// Editor document: the layer matrix (which owns the canvas size) and the timeline.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scene {
    /// Layer boxes on the canvas.
    #[serde(default)]
    pub matrix: LayerSlotMatrix,
    /// Tracks, clips and playhead.
    #[serde(default)]
    pub timeline: Timeline,
}

impl Scene {
    /// Empty scene on `canvas`.
    pub fn new(canvas: CanvasSize) -> Self {
        Self {
            matrix: LayerSlotMatrix::new(canvas),
            timeline: Timeline::new(),
        }
    }

    /// Read and validate a scene JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> StagehandResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            StagehandError::io(format!("open scene JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Read and validate a scene from any reader.
    pub fn from_reader<R: Read>(reader: R) -> StagehandResult<Self> {
        let mut scene: Self = serde_json::from_reader(reader)
            .map_err(|e| StagehandError::serde(format!("parse scene JSON: {e}")))?;
        scene.validate()?;
        scene.matrix.observe_ids();
        scene.timeline.observe_ids();
        Ok(scene)
    }

    /// Parse and validate a scene JSON string.
    pub fn from_json_str(s: &str) -> StagehandResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Pretty JSON.
    pub fn to_json_pretty(&self) -> StagehandResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| StagehandError::serde(format!("serialize scene JSON: {e}")))
    }

    /// Write pretty JSON to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> StagehandResult<()> {
        let path = path.as_ref();
        let json = self.to_json_pretty()?;
        std::fs::write(path, json).map_err(|e| {
            StagehandError::io(format!("write scene JSON '{}': {e}", path.display()))
        })
    }

    /// Structural checks that make a document unusable: empty canvas, duplicate ids,
    /// clips on unknown tracks. Geometry drift is reported by [`Scene::violations`].
    pub fn validate(&self) -> StagehandResult<()> {
        let canvas = self.matrix.canvas();
        if canvas.w == 0 || canvas.h == 0 {
            return Err(StagehandError::validation(format!(
                "canvas must be non-empty (got {}x{})",
                canvas.w, canvas.h
            )));
        }
        unique_ids("box", self.matrix.boxes().iter().map(|b| b.id.as_str()))?;
        unique_ids("track", self.timeline.tracks().iter().map(|t| t.id.as_str()))?;
        unique_ids("clip", self.timeline.clips().iter().map(|c| c.id.as_str()))?;
        for c in self.timeline.clips() {
            if self.timeline.track(&c.track_id).is_none() {
                return Err(StagehandError::validation(format!(
                    "clip '{}' references unknown track '{}'",
                    c.id, c.track_id
                )));
            }
        }
        Ok(())
    }

    /// Current canvas size.
    pub fn canvas(&self) -> CanvasSize {
        self.matrix.canvas()
    }

    /// Resize the canvas; boxes keep their normalized geometry.
    pub fn set_canvas(&mut self, canvas: CanvasSize) {
        self.matrix.apply_canvas_size(canvas);
    }

    /// Resize the canvas to a preset.
    pub fn set_canvas_preset(&mut self, aspect: AspectRatio, resolution: Resolution) -> CanvasSize {
        let canvas = canvas_size_for(aspect, resolution);
        self.set_canvas(canvas);
        canvas
    }

    /// Every broken invariant of the matrix and the timeline.
    pub fn violations(&self, min_box_size: f64, min_clip_duration: f64) -> Vec<String> {
        let mut out = self.matrix.violations(min_box_size);
        out.extend(self.timeline.violations(min_clip_duration));
        out
    }
}

fn unique_ids<'a>(kind: &str, ids: impl Iterator<Item = &'a str>) -> StagehandResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(StagehandError::validation(format!("duplicate {kind} id '{id}'")));
        }
        if IdAllocator::exhausts(id) {
            return Err(StagehandError::validation(format!(
                "{kind} id '{id}' leaves no room for new ids"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/scene.rs"]
mod tests;
