use std::collections::HashSet;

use crate::canvas::coords::{to_normalized, to_pixel};
use crate::config::EditorConfig;
use crate::foundation::color::Rgba8;
use crate::foundation::core::{CanvasSize, PixelGeom};
use crate::foundation::ids::IdAllocator;
use crate::layers::model::{ColRole, LayerBox, RowType, slot_key, z_index_for};
use crate::region::constraint::{allowed_region, clamp_to_canvas, confine, region_for_box};

/// Result of asking for a box in a slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotOutcome {
    /// Id of the box now occupying the slot.
    pub id: String,
    /// `false` when the slot was already occupied and the existing box was returned.
    pub created: bool,
}

/// Default geometry of a freshly created box: the whole canvas for `full`, the column's
/// exact third otherwise, so a new background box already sits inside its band.
pub fn slot_default_geom(role: &ColRole, canvas: CanvasSize) -> PixelGeom {
    let band = allowed_region(role, canvas);
    PixelGeom::new(0.0, band.min_y, canvas.width(), band.height())
}

/// Layer boxes keyed by slot, at most one per `(column, row)` cell.
///
/// Boxes are kept in insertion order; paint order comes from [`LayerBox::z_index`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayerSlotMatrix {
    canvas: CanvasSize,
    boxes: Vec<LayerBox>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    selected: Option<String>,
    #[serde(default)]
    ids: IdAllocator,
}

impl Default for LayerSlotMatrix {
    fn default() -> Self {
        Self::new(CanvasSize::default())
    }
}

impl LayerSlotMatrix {
    /// Empty matrix on `canvas`.
    pub fn new(canvas: CanvasSize) -> Self {
        Self {
            canvas,
            boxes: Vec::new(),
            selected: None,
            ids: IdAllocator::new(),
        }
    }

    /// Current canvas.
    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    /// All boxes in insertion order.
    pub fn boxes(&self) -> &[LayerBox] {
        &self.boxes
    }

    /// Box by id.
    pub fn get(&self, id: &str) -> Option<&LayerBox> {
        self.boxes.iter().find(|b| b.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut LayerBox> {
        self.boxes.iter_mut().find(|b| b.id == id)
    }

    /// Box occupying `slot_key`, if any.
    pub fn find_by_slot(&self, key: &str) -> Option<&LayerBox> {
        self.boxes.iter().find(|b| b.slot_key == key)
    }

    /// Selected box id.
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Select a box; unknown ids clear the selection.
    pub fn select(&mut self, id: Option<&str>) {
        self.selected = id.filter(|id| self.get(id).is_some()).map(str::to_owned);
    }

    /// Create the box for a slot, or return the one already there.
    #[tracing::instrument(skip(self, color))]
    pub fn create_box_for_slot(
        &mut self,
        col_idx: u32,
        row: RowType,
        color: Option<&str>,
    ) -> SlotOutcome {
        let key = slot_key(col_idx, row);
        if let Some(existing) = self.find_by_slot(&key) {
            tracing::debug!(id = %existing.id, slot = %key, "slot already occupied");
            return SlotOutcome {
                id: existing.id.clone(),
                created: false,
            };
        }
        let role = ColRole::from_col_idx(col_idx);
        let px = slot_default_geom(&role, self.canvas);
        let id = self.ids.next("box");
        let color = color.map(Rgba8::from_hex_or_white).unwrap_or_default();
        self.boxes.push(LayerBox {
            id: id.clone(),
            slot_key: key,
            row_type: row,
            col_role: role,
            col_idx,
            z_index: z_index_for(col_idx, row),
            px,
            norm: to_normalized(px, self.canvas),
            name: format!("Layer {}", col_idx + 1),
            color,
            is_hidden: false,
            clip_id: None,
        });
        SlotOutcome { id, created: true }
    }

    /// Activate a slot from the matrix UI: create its box if needed and select it.
    pub fn add_layer_box(&mut self, col_idx: u32, row: RowType, color: Option<&str>) -> SlotOutcome {
        let outcome = self.create_box_for_slot(col_idx, row, color);
        self.selected = Some(outcome.id.clone());
        outcome
    }

    /// Delete a box, freeing its slot.
    pub fn remove_box(&mut self, id: &str) -> Option<LayerBox> {
        let Some(idx) = self.boxes.iter().position(|b| b.id == id) else {
            tracing::warn!(id, "remove_box: unknown box");
            return None;
        };
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        Some(self.boxes.remove(idx))
    }

    /// Drop every box (template reset). Ids are not reused afterwards.
    #[tracing::instrument(skip(self))]
    pub fn reset(&mut self) {
        self.boxes.clear();
        self.selected = None;
    }

    /// Replace the matrix with boxes from a template.
    ///
    /// Every box gets a fresh id; slot keys, z-indices and roles are recomputed from
    /// `col_idx`/`row_type`, later duplicates of a slot are dropped and pixel geometry is
    /// re-derived from normalized geometry on the current canvas. Returns how many boxes
    /// were loaded.
    #[tracing::instrument(skip(self, template, cfg), fields(n = template.len()))]
    pub fn load_template(&mut self, template: Vec<LayerBox>, cfg: &EditorConfig) -> usize {
        self.reset();
        let mut seen = HashSet::new();
        for mut b in template {
            let key = slot_key(b.col_idx, b.row_type);
            if !seen.insert(key.clone()) {
                tracing::warn!(slot = %key, "duplicate slot in template, skipped");
                continue;
            }
            b.id = self.ids.next("box");
            b.slot_key = key;
            b.col_role = ColRole::from_col_idx(b.col_idx);
            b.z_index = z_index_for(b.col_idx, b.row_type);
            let px = self.constrain(&b, to_pixel(b.norm, self.canvas), cfg.min_box_size_px);
            b.set_px(px, self.canvas);
            self.boxes.push(b);
        }
        self.boxes.len()
    }

    /// Switch to a new canvas size, re-deriving every box's pixel geometry from its
    /// normalized geometry.
    #[tracing::instrument(skip(self))]
    pub fn apply_canvas_size(&mut self, canvas: CanvasSize) {
        self.canvas = canvas;
        for b in &mut self.boxes {
            b.px = to_pixel(b.norm, canvas);
        }
    }

    /// Visible boxes from bottom to top. Equal z keeps insertion order.
    pub fn painter_order(&self) -> Vec<&LayerBox> {
        let mut out: Vec<&LayerBox> = self.boxes.iter().filter(|b| !b.is_hidden).collect();
        out.sort_by_key(|b| b.z_index);
        out
    }

    /// Flip a box's visibility, returning the new hidden state.
    pub fn toggle_hidden(&mut self, id: &str) -> Option<bool> {
        let b = self.get_mut(id)?;
        b.is_hidden = !b.is_hidden;
        Some(b.is_hidden)
    }

    /// Numeric property edit. The geometry is clamped exactly like a drag result
    /// (canvas bounds, minimum size, band) before it is stored.
    pub fn set_box_geometry(
        &mut self,
        id: &str,
        px: PixelGeom,
        cfg: &EditorConfig,
    ) -> Option<PixelGeom> {
        let canvas = self.canvas;
        let b = self.get(id)?;
        let px = self.constrain(b, px, cfg.min_box_size_px);
        self.get_mut(id)?.set_px(px, canvas);
        Some(px)
    }

    /// Store geometry that has already been constrained (drag frames and commits).
    pub(crate) fn write_geometry(&mut self, id: &str, px: PixelGeom) -> bool {
        let canvas = self.canvas;
        match self.get_mut(id) {
            Some(b) => {
                b.set_px(px, canvas);
                true
            }
            None => false,
        }
    }

    /// Link or unlink a box to a timeline clip.
    pub fn set_clip_link(&mut self, id: &str, clip_id: Option<String>) -> bool {
        match self.get_mut(id) {
            Some(b) => {
                b.clip_id = clip_id;
                true
            }
            None => false,
        }
    }

    fn constrain(&self, b: &LayerBox, px: PixelGeom, min_size: f64) -> PixelGeom {
        let px = clamp_to_canvas(px, self.canvas, min_size);
        match region_for_box(b, self.canvas) {
            Some(region) => confine(px, region),
            None => px,
        }
    }

    /// Describe every broken geometry or slot invariant; empty when the matrix is sound.
    pub fn violations(&self, min_box_size: f64) -> Vec<String> {
        const TOL: f64 = 1e-6;
        let mut out = Vec::new();
        let mut slots = HashSet::new();
        let min_nw = min_box_size.min(self.canvas.width()) / self.canvas.width();
        let min_nh = min_box_size.min(self.canvas.height()) / self.canvas.height();
        for b in &self.boxes {
            let n = b.norm;
            if !slots.insert(b.slot_key.as_str()) {
                out.push(format!("{}: duplicate slot {}", b.id, b.slot_key));
            }
            if n.nx < -TOL || n.ny < -TOL || n.nx + n.nw > 1.0 + TOL || n.ny + n.nh > 1.0 + TOL {
                out.push(format!("{}: outside canvas ({n:?})", b.id));
            }
            // A band thinner than the minimum size caps the box height.
            let band_nh = region_for_box(b, self.canvas)
                .map_or(1.0, |r| r.height() / self.canvas.height());
            if n.nw < min_nw - TOL || n.nh < min_nh.min(band_nh) - TOL {
                out.push(format!("{}: below minimum size ({n:?})", b.id));
            }
            let derived = to_pixel(n, self.canvas);
            if (derived.x - b.px.x).abs() > TOL
                || (derived.y - b.px.y).abs() > TOL
                || (derived.w - b.px.w).abs() > TOL
                || (derived.h - b.px.h).abs() > TOL
            {
                out.push(format!("{}: pixel and normalized geometry disagree", b.id));
            }
            if let Some(region) = region_for_box(b, self.canvas)
                && (b.px.y < region.min_y - TOL || b.px.bottom() > region.max_y + TOL)
            {
                out.push(format!("{}: outside its {} band", b.id, b.col_role));
            }
        }
        out
    }

    /// Ids already used by boxes are never handed out again.
    pub(crate) fn observe_ids(&mut self) {
        for b in &self.boxes {
            self.ids.observe(&b.id);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layers/matrix.rs"]
mod tests;
