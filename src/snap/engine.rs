//! Magnet snapping on a single axis.
//!
//! The search is order-sensitive: candidate lines are visited in the order given and,
//! for each line, the moving shape's leading point, trailing point and center are tested
//! in that order. The first pair strictly within tolerance wins. There is no global
//! "closest" search, so callers control priority purely through line order.

/// What a snap line belongs to. Reported back so hosts can highlight it.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SnapTarget {
    /// Canvas start edge (left or top).
    CanvasStart,
    /// Canvas center line.
    CanvasCenter,
    /// Canvas end edge (right or bottom).
    CanvasEnd,
    /// An edge or center of another layer box.
    Box {
        /// Id of the box owning the line.
        id: String,
    },
    /// Start or end of another clip.
    Clip {
        /// Id of the clip owning the line.
        id: String,
    },
    /// The timeline playhead.
    Playhead,
}

/// Candidate alignment line.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SnapLine {
    /// Position on the axis.
    pub value: f64,
    /// Owner of the line.
    pub target: SnapTarget,
}

impl SnapLine {
    /// Build a line.
    pub fn new(value: f64, target: SnapTarget) -> Self {
        Self { value, target }
    }
}

/// Which representative point of the moving shape matched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    /// Left / top / start.
    Leading,
    /// Right / bottom / end.
    Trailing,
    /// Middle of the span.
    Center,
}

/// Representative points of a moving shape on one axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MovingEdges {
    /// Leading point; the corrected value returned by [`find_snap`] is expressed in it.
    pub leading: f64,
    /// Trailing point, if the shape has extent on this axis.
    pub trailing: Option<f64>,
    /// Center point, if it participates.
    pub center: Option<f64>,
}

impl MovingEdges {
    /// A span `[start, start + len]` with all three points participating.
    pub fn span(start: f64, len: f64) -> Self {
        Self {
            leading: start,
            trailing: Some(start + len),
            center: Some(start + len / 2.0),
        }
    }

    /// A span that only snaps by its two ends (timeline clips).
    pub fn ends(start: f64, end: f64) -> Self {
        Self {
            leading: start,
            trailing: Some(end),
            center: None,
        }
    }

    /// A single point (resize of one edge, playhead).
    pub fn point(v: f64) -> Self {
        Self {
            leading: v,
            trailing: None,
            center: None,
        }
    }

    fn anchors(&self) -> impl Iterator<Item = (Anchor, f64)> + '_ {
        std::iter::once((Anchor::Leading, self.leading))
            .chain(self.trailing.map(|v| (Anchor::Trailing, v)))
            .chain(self.center.map(|v| (Anchor::Center, v)))
    }
}

/// Outcome of a snap search on one axis.
#[derive(Clone, Debug, PartialEq)]
pub struct SnapResult {
    /// Corrected leading coordinate; the input leading value when nothing matched.
    pub value: f64,
    /// Whether a line was within tolerance.
    pub snapped: bool,
    /// Line owner of the match.
    pub target: Option<SnapTarget>,
    /// Matched point of the moving shape.
    pub anchor: Option<Anchor>,
    /// Matched line position.
    pub line: Option<f64>,
}

impl SnapResult {
    fn unchanged(value: f64) -> Self {
        Self {
            value,
            snapped: false,
            target: None,
            anchor: None,
            line: None,
        }
    }
}

/// First-match snap of `edges` against `lines`, strictly within `tolerance`.
///
/// Non-finite or non-positive tolerances never snap.
pub fn find_snap(edges: MovingEdges, lines: &[SnapLine], tolerance: f64) -> SnapResult {
    if !(tolerance.is_finite() && tolerance > 0.0) {
        return SnapResult::unchanged(edges.leading);
    }
    for line in lines {
        for (anchor, point) in edges.anchors() {
            if (point - line.value).abs() < tolerance {
                return SnapResult {
                    value: edges.leading + (line.value - point),
                    snapped: true,
                    target: Some(line.target.clone()),
                    anchor: Some(anchor),
                    line: Some(line.value),
                };
            }
        }
    }
    SnapResult::unchanged(edges.leading)
}

/// Canvas lines for an axis of length `extent`: start, center, end.
pub fn canvas_lines(extent: f64) -> [SnapLine; 3] {
    [
        SnapLine::new(0.0, SnapTarget::CanvasStart),
        SnapLine::new(extent / 2.0, SnapTarget::CanvasCenter),
        SnapLine::new(extent, SnapTarget::CanvasEnd),
    ]
}

/// Lines contributed by another box's span on one axis: start, end, center.
pub fn box_lines(id: &str, start: f64, len: f64) -> [SnapLine; 3] {
    let target = SnapTarget::Box { id: id.to_owned() };
    [
        SnapLine::new(start, target.clone()),
        SnapLine::new(start + len, target.clone()),
        SnapLine::new(start + len / 2.0, target),
    ]
}

/// Lines contributed by another clip: start then end.
pub fn clip_lines(id: &str, start: f64, end: f64) -> [SnapLine; 2] {
    let target = SnapTarget::Clip { id: id.to_owned() };
    [
        SnapLine::new(start, target.clone()),
        SnapLine::new(end, target),
    ]
}

/// Resolve two competing candidates by distance: the closer one wins and exact ties go
/// to the leading side. Candidates farther than `margin` are ignored.
pub fn closer_of(dist_leading: f64, dist_trailing: f64, margin: f64) -> Option<Anchor> {
    let lead = dist_leading.abs() <= margin;
    let trail = dist_trailing.abs() <= margin;
    match (lead, trail) {
        (true, true) if dist_leading.abs() <= dist_trailing.abs() => Some(Anchor::Leading),
        (true, true) => Some(Anchor::Trailing),
        (true, false) => Some(Anchor::Leading),
        (false, true) => Some(Anchor::Trailing),
        (false, false) => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/snap/engine.rs"]
mod tests;
