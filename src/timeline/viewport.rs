use crate::config::EditorConfig;
use crate::foundation::core::Point;
use crate::foundation::math::clamp_lo;

/// Pixels per second when a timeline is first shown.
pub const DEFAULT_ZOOM: f64 = 20.0;
/// Lowest zoom, in pixels per second.
pub const ZOOM_MIN: f64 = 1.0;
/// Highest zoom, in pixels per second.
pub const ZOOM_MAX: f64 = 200.0;

/// Mapping between the timeline's client area and time/track space.
///
/// `origin` is the client position of time `0` on the first track row before scrolling.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct TimelineViewport {
    /// Pixels per second.
    pub zoom: f64,
    /// Lower zoom clamp.
    pub zoom_min: f64,
    /// Upper zoom clamp.
    pub zoom_max: f64,
    /// Horizontal scroll offset in pixels.
    pub scroll_x: f64,
    /// Client position of the track area's top-left corner.
    pub origin: Point,
    /// Track row height in pixels.
    pub row_height: f64,
}

impl Default for TimelineViewport {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl TimelineViewport {
    /// Viewport at the default zoom with rows sized from `cfg`.
    pub fn new(cfg: &EditorConfig) -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            zoom_min: ZOOM_MIN,
            zoom_max: ZOOM_MAX,
            scroll_x: 0.0,
            origin: Point::ZERO,
            row_height: cfg.row_height_px,
        }
    }

    /// Zoom usable as a divisor, clamped into the configured range.
    pub fn effective_zoom(&self) -> f64 {
        let z = if self.zoom.is_finite() && self.zoom > 0.0 {
            self.zoom
        } else {
            DEFAULT_ZOOM
        };
        clamp_lo(z, self.zoom_min.max(f64::MIN_POSITIVE), self.zoom_max)
    }

    /// Set the zoom, clamped into `[zoom_min, zoom_max]`. Non-finite values are ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() {
            self.zoom = zoom;
            self.zoom = self.effective_zoom();
        }
    }

    /// Multiply the zoom by `factor`.
    pub fn zoom_by(&mut self, factor: f64) {
        self.set_zoom(self.effective_zoom() * factor);
    }

    /// Fit `duration` seconds into `width` pixels and scroll to the start. No-op for an
    /// empty duration or width.
    pub fn zoom_to_fit(&mut self, duration: f64, width: f64) {
        if !(duration.is_finite() && duration > 0.0 && width.is_finite() && width > 0.0) {
            return;
        }
        self.set_zoom(width / duration);
        self.scroll_x = 0.0;
    }

    /// Seconds represented by `px` screen pixels.
    pub fn px_to_seconds(&self, px: f64) -> f64 {
        px / self.effective_zoom()
    }

    /// Horizontal content position (scroll included) under a client x.
    pub fn content_x(&self, client_x: f64) -> f64 {
        client_x - self.origin.x + self.scroll_x
    }

    /// Time under a client x, never negative.
    pub fn time_at(&self, client_x: f64) -> f64 {
        self.px_to_seconds(self.content_x(client_x)).max(0.0)
    }

    /// Client x of time `t`.
    pub fn x_for_time(&self, t: f64) -> f64 {
        t * self.effective_zoom() - self.scroll_x + self.origin.x
    }

    /// Track row under a client y, clamped to the existing rows.
    pub fn track_index_at(&self, client_y: f64, track_count: usize) -> Option<usize> {
        let rows_ok = self.row_height.is_finite() && self.row_height > 0.0;
        if track_count == 0 || !rows_ok || !client_y.is_finite() {
            return None;
        }
        let row = ((client_y - self.origin.y) / self.row_height).floor();
        if row <= 0.0 {
            return Some(0);
        }
        // Saturating float-to-int cast.
        Some((row as usize).min(track_count - 1))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/viewport.rs"]
mod tests;
