use super::*;

#[test]
fn clamp_lo_handles_inverted_range() {
    assert_eq!(clamp_lo(5.0, 0.0, 10.0), 5.0);
    assert_eq!(clamp_lo(-1.0, 0.0, 10.0), 0.0);
    assert_eq!(clamp_lo(11.0, 0.0, 10.0), 10.0);
    assert_eq!(clamp_lo(3.0, 4.0, 2.0), 4.0);
}

#[test]
fn finite_or_replaces_nan_and_inf() {
    assert_eq!(finite_or(f64::NAN, 1.0), 1.0);
    assert_eq!(finite_or(f64::INFINITY, 2.0), 2.0);
    assert_eq!(finite_or(3.5, 2.0), 3.5);
}

#[test]
fn approx_eq_uses_absolute_tolerance() {
    assert!(approx_eq(0.1 + 0.2, 0.3, EPSILON));
    assert!(!approx_eq(1.0, 1.1, 0.01));
}
