pub use kurbo::{Point, Rect, Size, Vec2};

/// Logical compositing resolution in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct CanvasSize {
    /// Canvas width in pixels.
    pub w: u32,
    /// Canvas height in pixels.
    pub h: u32,
}

impl CanvasSize {
    /// Full-HD landscape canvas.
    pub const FHD: Self = Self { w: 1920, h: 1080 };

    /// Build a canvas size.
    pub fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }

    /// Width as `f64`, never below one pixel so it is always safe to divide by.
    pub fn width(self) -> f64 {
        f64::from(self.w.max(1))
    }

    /// Height as `f64`, never below one pixel so it is always safe to divide by.
    pub fn height(self) -> f64 {
        f64::from(self.h.max(1))
    }

    /// Canvas bounds as a kurbo rectangle anchored at the origin.
    pub fn bounds(self) -> Rect {
        Rect::new(0.0, 0.0, self.width(), self.height())
    }

    /// Canvas center point.
    pub fn center(self) -> Point {
        self.bounds().center()
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::FHD
    }
}

/// Pixel-space box geometry (`x, y` is the top-left corner).
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PixelGeom {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub w: f64,
    /// Height.
    pub h: f64,
}

impl PixelGeom {
    /// Build a pixel geometry.
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// Right edge.
    pub fn right(self) -> f64 {
        self.x + self.w
    }

    /// Bottom edge.
    pub fn bottom(self) -> f64 {
        self.y + self.h
    }

    /// Horizontal center.
    pub fn center_x(self) -> f64 {
        self.x + self.w / 2.0
    }

    /// Vertical center.
    pub fn center_y(self) -> f64 {
        self.y + self.h / 2.0
    }

    /// Geometry as a kurbo rectangle.
    pub fn to_rect(self) -> Rect {
        Rect::new(self.x, self.y, self.right(), self.bottom())
    }

    /// Inclusive containment test (points on the border count as inside).
    pub fn contains(self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Translate by a vector.
    pub fn translated(self, d: Vec2) -> Self {
        Self {
            x: self.x + d.x,
            y: self.y + d.y,
            ..self
        }
    }
}

impl From<Rect> for PixelGeom {
    fn from(r: Rect) -> Self {
        let r = r.abs();
        Self::new(r.x0, r.y0, r.width(), r.height())
    }
}

/// Resolution-independent box geometry, each field a fraction of the canvas extent.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NormGeom {
    /// `x / canvas.w`.
    pub nx: f64,
    /// `y / canvas.h`.
    pub ny: f64,
    /// `w / canvas.w`.
    pub nw: f64,
    /// `h / canvas.h`.
    pub nh: f64,
}

impl NormGeom {
    /// Build a normalized geometry.
    pub fn new(nx: f64, ny: f64, nw: f64, nh: f64) -> Self {
        Self { nx, ny, nw, nh }
    }

    /// The whole canvas.
    pub fn full() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }
}
