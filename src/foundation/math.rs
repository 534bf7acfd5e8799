/// Clamp `v` into `[lo, hi]`; when the range is inverted the lower bound wins.
///
/// `f64::clamp` panics on `lo > hi`, which can legitimately happen here when a box
/// is larger than the space left for it.
pub(crate) fn clamp_lo(v: f64, lo: f64, hi: f64) -> f64 {
    if hi < lo {
        return lo;
    }
    v.max(lo).min(hi)
}

/// Non-finite inputs collapse to `fallback`.
pub(crate) fn finite_or(v: f64, fallback: f64) -> f64 {
    if v.is_finite() { v } else { fallback }
}

pub(crate) const EPSILON: f64 = 1e-9;

/// Absolute-tolerance float comparison.
pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
