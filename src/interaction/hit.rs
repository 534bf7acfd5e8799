use crate::canvas::coords::sanitize_scale;
use crate::config::EditorConfig;
use crate::foundation::core::{PixelGeom, Point};
use crate::foundation::math::clamp_lo;
use crate::interaction::pointer::{ActiveEdges, CursorHint};
use crate::layers::matrix::LayerSlotMatrix;
use crate::snap::engine::{Anchor, closer_of};

/// Box under the pointer and the edges the pointer is near.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct HoverHit {
    /// Topmost visible box containing the point.
    pub id: String,
    /// Edges within the hover margin.
    pub edges: ActiveEdges,
    /// Cursor to show.
    pub cursor: CursorHint,
}

/// Edge grab margin in canvas units.
///
/// The margin is `base * render_scale` screen pixels clamped to `[min, max]`, so it stays
/// usable at any zoom, then converted back to canvas units.
pub fn edge_margin(cfg: &EditorConfig, render_scale: f64) -> f64 {
    let scale = sanitize_scale(render_scale);
    let screen = clamp_lo(
        cfg.hover_margin_base_px * scale,
        cfg.hover_margin_min_px,
        cfg.hover_margin_max_px,
    );
    screen / scale
}

/// Edges of `geom` within `margin` of `p`. When both opposite edges qualify the closer one
/// wins, ties going to left/top.
pub fn edges_near(geom: PixelGeom, p: Point, margin: f64) -> ActiveEdges {
    let h = closer_of(p.x - geom.x, geom.right() - p.x, margin);
    let v = closer_of(p.y - geom.y, geom.bottom() - p.y, margin);
    ActiveEdges {
        left: h == Some(Anchor::Leading),
        right: h == Some(Anchor::Trailing),
        top: v == Some(Anchor::Leading),
        bottom: v == Some(Anchor::Trailing),
    }
}

/// Hover hit test on canvas coordinates: highest z first, later insertion winning ties.
pub fn hit_test(matrix: &LayerSlotMatrix, p: Point, margin: f64) -> Option<HoverHit> {
    let b = matrix
        .painter_order()
        .into_iter()
        .rev()
        .find(|b| b.px.contains(p))?;
    let edges = edges_near(b.px, p, margin);
    Some(HoverHit {
        id: b.id.clone(),
        edges,
        cursor: edges.cursor(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/hit.rs"]
mod tests;
