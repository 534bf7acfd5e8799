use crate::foundation::core::Point;

/// Modifier keys held during a pointer event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Modifiers {
    /// Shift.
    pub shift: bool,
    /// Alt / Option.
    pub alt: bool,
    /// Control.
    pub ctrl: bool,
    /// Meta / Command.
    pub meta: bool,
}

/// A pointer sample in client (screen) coordinates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PointerEvent {
    /// Client position.
    pub client: Point,
    /// Held modifiers.
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// Event at `(x, y)` with no modifiers.
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            client: Point::new(x, y),
            modifiers: Modifiers::default(),
        }
    }
}

/// One of the eight resize handles around a box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeHandle {
    /// Top-left corner.
    Tl,
    /// Top edge.
    T,
    /// Top-right corner.
    Tr,
    /// Right edge.
    R,
    /// Bottom-right corner.
    Br,
    /// Bottom edge.
    B,
    /// Bottom-left corner.
    Bl,
    /// Left edge.
    L,
}

impl ResizeHandle {
    /// All handles clockwise from the top-left corner.
    pub const ALL: [ResizeHandle; 8] = [
        Self::Tl,
        Self::T,
        Self::Tr,
        Self::R,
        Self::Br,
        Self::B,
        Self::Bl,
        Self::L,
    ];

    /// Edges moved by this handle.
    pub fn edges(self) -> ActiveEdges {
        let (left, right, top, bottom) = match self {
            Self::Tl => (true, false, true, false),
            Self::T => (false, false, true, false),
            Self::Tr => (false, true, true, false),
            Self::R => (false, true, false, false),
            Self::Br => (false, true, false, true),
            Self::B => (false, false, false, true),
            Self::Bl => (true, false, false, true),
            Self::L => (true, false, false, false),
        };
        ActiveEdges {
            left,
            right,
            top,
            bottom,
        }
    }
}

/// Edges taking part in a resize. At most one edge per axis is active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ActiveEdges {
    /// Left edge.
    pub left: bool,
    /// Right edge.
    pub right: bool,
    /// Top edge.
    pub top: bool,
    /// Bottom edge.
    pub bottom: bool,
}

impl ActiveEdges {
    /// No edge active.
    pub fn is_empty(self) -> bool {
        !(self.left || self.right || self.top || self.bottom)
    }

    /// Cursor shown while hovering or dragging these edges.
    pub fn cursor(self) -> CursorHint {
        let Self {
            left,
            right,
            top,
            bottom,
        } = self;
        if (left && top) || (right && bottom) {
            CursorHint::NwseResize
        } else if (right && top) || (left && bottom) {
            CursorHint::NeswResize
        } else if left || right {
            CursorHint::EwResize
        } else if top || bottom {
            CursorHint::NsResize
        } else {
            CursorHint::Move
        }
    }
}

impl From<ResizeHandle> for ActiveEdges {
    fn from(h: ResizeHandle) -> Self {
        h.edges()
    }
}

/// Cursor shape hint for the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CursorHint {
    /// Body drag.
    Move,
    /// Vertical resize.
    NsResize,
    /// Horizontal resize.
    EwResize,
    /// Diagonal resize, top-left / bottom-right.
    NwseResize,
    /// Diagonal resize, top-right / bottom-left.
    NeswResize,
}

impl CursorHint {
    /// CSS cursor name.
    pub fn css_name(self) -> &'static str {
        match self {
            Self::Move => "move",
            Self::NsResize => "ns-resize",
            Self::EwResize => "ew-resize",
            Self::NwseResize => "nwse-resize",
            Self::NeswResize => "nesw-resize",
        }
    }
}
