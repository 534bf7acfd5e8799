use std::str::FromStr;

use crate::foundation::core::CanvasSize;
use crate::foundation::error::StagehandError;

/// Output resolution class, identified by the length of the canvas' long side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Resolution {
    /// 7680 px long side.
    #[serde(rename = "8K")]
    K8,
    /// 5760 px long side.
    #[serde(rename = "6K")]
    K6,
    /// 3840 px long side.
    #[serde(rename = "4K")]
    K4,
    /// 1920 px long side.
    #[default]
    #[serde(rename = "FHD")]
    Fhd,
    /// 1280 px long side.
    #[serde(rename = "HD")]
    Hd,
}

impl Resolution {
    /// Length of the long canvas side in pixels.
    pub fn long_side(self) -> u32 {
        match self {
            Self::K8 => 7680,
            Self::K6 => 5760,
            Self::K4 => 3840,
            Self::Fhd => 1920,
            Self::Hd => 1280,
        }
    }

    /// Display key (`"FHD"`, `"4K"`, ...).
    pub fn key(self) -> &'static str {
        match self {
            Self::K8 => "8K",
            Self::K6 => "6K",
            Self::K4 => "4K",
            Self::Fhd => "FHD",
            Self::Hd => "HD",
        }
    }
}

impl FromStr for Resolution {
    type Err = StagehandError;

    /// Accepts a bare key or a menu label such as `"4K (3840 x 2160)"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.split_whitespace().next().unwrap_or("");
        match key.to_ascii_uppercase().as_str() {
            "8K" => Ok(Self::K8),
            "6K" => Ok(Self::K6),
            "4K" => Ok(Self::K4),
            "FHD" => Ok(Self::Fhd),
            "HD" => Ok(Self::Hd),
            _ => Err(StagehandError::validation(format!(
                "unknown resolution '{s}'"
            ))),
        }
    }
}

/// Canvas aspect ratio presets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum AspectRatio {
    /// Landscape widescreen.
    #[default]
    #[serde(rename = "16:9")]
    Wide,
    /// Portrait (shorts/reels).
    #[serde(rename = "9:16")]
    Portrait,
    /// Classic TV.
    #[serde(rename = "4:3")]
    Classic,
    /// Square.
    #[serde(rename = "1:1")]
    Square,
    /// Cinema scope.
    #[serde(rename = "21:9")]
    Cinema,
}

impl FromStr for AspectRatio {
    type Err = StagehandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "16:9" => Ok(Self::Wide),
            "9:16" => Ok(Self::Portrait),
            "4:3" => Ok(Self::Classic),
            "1:1" => Ok(Self::Square),
            "21:9" => Ok(Self::Cinema),
            other => Err(StagehandError::validation(format!(
                "unknown aspect ratio '{other}'"
            ))),
        }
    }
}

fn scaled(long: u32, num: u32, den: u32) -> u32 {
    ((f64::from(long) * f64::from(num)) / f64::from(den)).round() as u32
}

/// Canvas size for a preset aspect ratio at a resolution class.
///
/// Square canvases use the short side of the matching 16:9 canvas.
pub fn canvas_size_for(aspect: AspectRatio, resolution: Resolution) -> CanvasSize {
    let long = resolution.long_side();
    match aspect {
        AspectRatio::Wide => CanvasSize::new(long, scaled(long, 9, 16)),
        AspectRatio::Portrait => CanvasSize::new(scaled(long, 9, 16), long),
        AspectRatio::Classic => CanvasSize::new(long, scaled(long, 3, 4)),
        AspectRatio::Square => {
            let side = scaled(long, 9, 16);
            CanvasSize::new(side, side)
        }
        AspectRatio::Cinema => CanvasSize::new(long, scaled(long, 9, 21)),
    }
}

/// Canvas size following a source video's own aspect ratio.
///
/// Degenerate source dimensions fall back to the 16:9 canvas.
pub fn canvas_size_for_source(
    source_w: u32,
    source_h: u32,
    resolution: Resolution,
) -> CanvasSize {
    if source_w == 0 || source_h == 0 {
        return canvas_size_for(AspectRatio::Wide, resolution);
    }
    let long = f64::from(resolution.long_side());
    let aspect = f64::from(source_w) / f64::from(source_h);
    if aspect >= 1.0 {
        CanvasSize::new(long as u32, (long / aspect).round().max(1.0) as u32)
    } else {
        CanvasSize::new((long * aspect).round().max(1.0) as u32, long as u32)
    }
}

/// Largest render scale that fits the canvas inside a padded container.
///
/// Returns `None` while the container has no usable area (e.g. collapsed panel).
pub fn fit_render_scale(
    canvas: CanvasSize,
    container_w: f64,
    container_h: f64,
    padding: f64,
) -> Option<f64> {
    let inner_w = container_w - padding * 2.0;
    let inner_h = container_h - padding * 2.0;
    if !(inner_w > 0.0 && inner_h > 0.0) {
        return None;
    }
    Some((inner_w / canvas.width()).min(inner_h / canvas.height()))
}

#[cfg(test)]
#[path = "../../tests/unit/canvas/resolution.rs"]
mod tests;
