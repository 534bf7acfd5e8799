use std::fmt;

use crate::canvas::coords::to_normalized;
use crate::foundation::color::Rgba8;
use crate::foundation::core::{CanvasSize, NormGeom, PixelGeom};

/// Layer row of the slot matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum RowType {
    /// Effect overlays, painted above text.
    #[serde(rename = "EFF")]
    Eff,
    /// Text overlays.
    #[serde(rename = "TXT")]
    Txt,
    /// Backgrounds, painted lowest and confined to their column's band.
    #[serde(rename = "BG")]
    Bg,
}

impl RowType {
    /// Rows from top to bottom of the matrix.
    pub const ALL: [RowType; 3] = [RowType::Eff, RowType::Txt, RowType::Bg];

    /// Fixed z offset inside a column.
    pub fn z_offset(self) -> i64 {
        match self {
            Self::Eff => 80,
            Self::Txt => 40,
            Self::Bg => 20,
        }
    }

    /// Row name used in slot keys.
    pub fn name(self) -> &'static str {
        match self {
            Self::Eff => "effect",
            Self::Txt => "text",
            Self::Bg => "bg",
        }
    }
}

/// Column role; the first four columns are named, the rest are numbered.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ColRole {
    /// Whole canvas.
    Full,
    /// Top third.
    High,
    /// Middle third.
    Mid,
    /// Bottom third.
    Low,
    /// Extra column `col{n}`.
    Custom(u32),
}

impl ColRole {
    /// Role of the column at `col_idx`.
    pub fn from_col_idx(col_idx: u32) -> Self {
        match col_idx {
            0 => Self::Full,
            1 => Self::High,
            2 => Self::Mid,
            3 => Self::Low,
            n => Self::Custom(n),
        }
    }

    /// Parse `full`/`high`/`mid`/`low`/`col{n}`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "full" => Some(Self::Full),
            "high" => Some(Self::High),
            "mid" => Some(Self::Mid),
            "low" => Some(Self::Low),
            other => other
                .strip_prefix("col")
                .and_then(|n| n.parse::<u32>().ok())
                .map(Self::from_col_idx),
        }
    }
}

impl fmt::Display for ColRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => f.write_str("full"),
            Self::High => f.write_str("high"),
            Self::Mid => f.write_str("mid"),
            Self::Low => f.write_str("low"),
            Self::Custom(n) => write!(f, "col{n}"),
        }
    }
}

impl serde::Serialize for ColRole {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for ColRole {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown column role '{s}'")))
    }
}

/// Slot key of a matrix cell, e.g. `mid_bg`. Injective over `(col_idx, row)`.
pub fn slot_key(col_idx: u32, row: RowType) -> String {
    format!("{}_{}", ColRole::from_col_idx(col_idx), row.name())
}

/// Deterministic z-index: `col_idx * 100 + 100 + row offset`.
pub fn z_index_for(col_idx: u32, row: RowType) -> i64 {
    i64::from(col_idx) * 100 + 100 + row.z_offset()
}

/// A positioned overlay on the canvas.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayerBox {
    /// Stable id, never reused.
    pub id: String,
    /// Occupied matrix slot.
    pub slot_key: String,
    /// Matrix row.
    pub row_type: RowType,
    /// Matrix column role.
    pub col_role: ColRole,
    /// Matrix column index.
    pub col_idx: u32,
    /// Paint order, derived from `col_idx` and `row_type`.
    pub z_index: i64,
    /// Pixel geometry on the current canvas.
    pub px: PixelGeom,
    /// Normalized geometry; authoritative across canvas changes.
    pub norm: NormGeom,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Fill color.
    #[serde(default)]
    pub color: Rgba8,
    /// Hidden boxes are not painted, hit or snapped to.
    #[serde(default)]
    pub is_hidden: bool,
    /// Timeline clip driving this box, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clip_id: Option<String>,
}

impl LayerBox {
    /// Background boxes not driven by a clip are confined to their band.
    pub fn is_region_confined(&self) -> bool {
        self.row_type == RowType::Bg && self.clip_id.is_none()
    }

    /// Whether region contact is meaningful (confined and not spanning the whole height).
    pub fn reports_region_contact(&self) -> bool {
        self.is_region_confined() && self.col_role != ColRole::Full
    }

    /// Set pixel geometry and re-derive the normalized form.
    pub fn set_px(&mut self, px: PixelGeom, canvas: CanvasSize) {
        self.px = px;
        self.norm = to_normalized(px, canvas);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layers/model.rs"]
mod tests;
