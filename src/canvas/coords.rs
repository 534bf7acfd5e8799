//! Pixel ↔ normalized box geometry.
//!
//! Normalized geometry is authoritative across canvas-size changes; pixel geometry is
//! authoritative while a drag is in flight and is re-normalized when it ends.

use crate::foundation::core::{CanvasSize, NormGeom, PixelGeom, Point, Vec2};

/// Convert pixel geometry into fractions of the canvas extent.
pub fn to_normalized(px: PixelGeom, canvas: CanvasSize) -> NormGeom {
    let cw = canvas.width();
    let ch = canvas.height();
    NormGeom {
        nx: px.x / cw,
        ny: px.y / ch,
        nw: px.w / cw,
        nh: px.h / ch,
    }
}

/// Convert normalized geometry back to canvas pixels.
pub fn to_pixel(norm: NormGeom, canvas: CanvasSize) -> PixelGeom {
    let cw = canvas.width();
    let ch = canvas.height();
    PixelGeom {
        x: norm.nx * cw,
        y: norm.ny * ch,
        w: norm.nw * cw,
        h: norm.nh * ch,
    }
}

/// Map a client-space pointer position onto the canvas.
///
/// `origin` is the client position of the canvas' top-left corner and `render_scale`
/// the number of screen pixels per canvas pixel.
pub fn client_to_canvas(client: Point, origin: Point, render_scale: f64) -> Point {
    let s = sanitize_scale(render_scale);
    Point::new((client.x - origin.x) / s, (client.y - origin.y) / s)
}

/// Convert a screen-space pointer delta to canvas units.
pub fn screen_delta_to_canvas(delta: Vec2, render_scale: f64) -> Vec2 {
    delta / sanitize_scale(render_scale)
}

/// Render scales that are zero, negative or non-finite behave as `1.0`.
pub(crate) fn sanitize_scale(render_scale: f64) -> f64 {
    if render_scale.is_finite() && render_scale > 0.0 {
        render_scale
    } else {
        1.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/canvas/coords.rs"]
mod tests;
