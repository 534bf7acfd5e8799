//! Region confinement and boundary contact.
//!
//! Background boxes in the `high`/`mid`/`low` columns live in their third of the canvas
//! height. Nothing here is a hard error: out-of-range geometry is moved or shrunk.

use crate::foundation::core::{CanvasSize, PixelGeom};
use crate::foundation::math::clamp_lo;
use crate::layers::model::{ColRole, LayerBox};

/// Allowed vertical band `[min_y, max_y]` in canvas pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Region {
    /// Top of the band.
    pub min_y: f64,
    /// Bottom of the band.
    pub max_y: f64,
}

impl Region {
    /// Band height.
    pub fn height(self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Band a column role may occupy. `full` and custom columns span the whole height.
pub fn allowed_region(role: &ColRole, canvas: CanvasSize) -> Region {
    let ch = canvas.height();
    let third = ch / 3.0;
    match role {
        ColRole::High => Region {
            min_y: 0.0,
            max_y: third,
        },
        ColRole::Mid => Region {
            min_y: third,
            max_y: third * 2.0,
        },
        ColRole::Low => Region {
            min_y: third * 2.0,
            max_y: ch,
        },
        ColRole::Full | ColRole::Custom(_) => Region {
            min_y: 0.0,
            max_y: ch,
        },
    }
}

/// Pull a box into `region`.
///
/// `y` is raised to `min_y`; a box still overflowing `max_y` is shifted up, or shrunk to
/// the full band when it is taller than the band. `x`/`w` are untouched.
pub fn confine(geom: PixelGeom, region: Region) -> PixelGeom {
    let mut out = geom;
    if out.y < region.min_y {
        out.y = region.min_y;
    }
    if out.y + out.h > region.max_y {
        if out.h > region.height() {
            out.h = region.height();
            out.y = region.min_y;
        } else {
            out.y = region.max_y - out.h;
        }
    }
    out
}

/// Region of a box if it is role-confined.
///
/// Only free-standing background boxes are confined; boxes driven by a timeline clip
/// follow the clip.
pub fn region_for_box(b: &LayerBox, canvas: CanvasSize) -> Option<Region> {
    b.is_region_confined()
        .then(|| allowed_region(&b.col_role, canvas))
}

/// Which band boundaries a box touches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RegionContact {
    /// Top edge within threshold of `min_y`.
    pub top: bool,
    /// Bottom edge within threshold of `max_y`.
    pub bottom: bool,
}

/// Band contact test, inclusive of `threshold`.
pub fn check_contact(geom: PixelGeom, region: Region, threshold: f64) -> RegionContact {
    RegionContact {
        top: (geom.y - region.min_y).abs() <= threshold,
        bottom: (geom.bottom() - region.max_y).abs() <= threshold,
    }
}

/// Which canvas edges a box touches.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EdgeContact {
    /// Left canvas edge.
    pub left: bool,
    /// Right canvas edge.
    pub right: bool,
    /// Top canvas edge.
    pub top: bool,
    /// Bottom canvas edge.
    pub bottom: bool,
}

impl EdgeContact {
    /// True if any edge is touched.
    pub fn any(self) -> bool {
        self.left || self.right || self.top || self.bottom
    }
}

/// Canvas edge contact, inclusive of `threshold`.
pub fn canvas_contact(geom: PixelGeom, canvas: CanvasSize, threshold: f64) -> EdgeContact {
    EdgeContact {
        left: geom.x <= threshold,
        top: geom.y <= threshold,
        right: geom.right() >= canvas.width() - threshold,
        bottom: geom.bottom() >= canvas.height() - threshold,
    }
}

/// Enforce minimum size and canvas bounds, keeping the size where possible.
///
/// The minimum size is capped by the canvas extent so tiny canvases still yield an
/// in-bounds box.
pub fn clamp_to_canvas(geom: PixelGeom, canvas: CanvasSize, min_size: f64) -> PixelGeom {
    let cw = canvas.width();
    let ch = canvas.height();
    let min_w = min_size.max(0.0).min(cw);
    let min_h = min_size.max(0.0).min(ch);
    let w = clamp_lo(finite(geom.w), min_w, cw);
    let h = clamp_lo(finite(geom.h), min_h, ch);
    PixelGeom {
        x: clamp_lo(finite(geom.x), 0.0, cw - w),
        y: clamp_lo(finite(geom.y), 0.0, ch - h),
        w,
        h,
    }
}

fn finite(v: f64) -> f64 {
    crate::foundation::math::finite_or(v, 0.0)
}

#[cfg(test)]
#[path = "../../tests/unit/region/constraint.rs"]
mod tests;
