use super::*;

fn fhd_lines() -> Vec<SnapLine> {
    canvas_lines(1920.0).to_vec()
}

#[test]
fn edge_near_center_snaps_and_far_edge_does_not() {
    let hit = find_snap(MovingEdges::point(955.0), &fhd_lines(), 15.0);
    assert!(hit.snapped);
    assert_eq!(hit.value, 960.0);
    assert_eq!(hit.target, Some(SnapTarget::CanvasCenter));

    let miss = find_snap(MovingEdges::point(940.0), &fhd_lines(), 15.0);
    assert!(!miss.snapped);
    assert_eq!(miss.value, 940.0);
    assert_eq!(miss.target, None);
}

#[test]
fn tolerance_is_strict() {
    let at_limit = find_snap(MovingEdges::point(945.0), &fhd_lines(), 15.0);
    assert!(!at_limit.snapped);
    let inside = find_snap(MovingEdges::point(945.5), &fhd_lines(), 15.0);
    assert!(inside.snapped);
}

#[test]
fn trailing_and_center_matches_shift_the_leading_value() {
    // right edge 1910 -> canvas end
    let r = find_snap(MovingEdges::span(1710.0, 200.0), &fhd_lines(), 15.0);
    assert_eq!(r.anchor, Some(Anchor::Trailing));
    assert_eq!(r.value, 1720.0);

    // center 955 -> canvas center
    let c = find_snap(MovingEdges::span(855.0, 200.0), &fhd_lines(), 15.0);
    assert_eq!(c.anchor, Some(Anchor::Center));
    assert_eq!(c.value, 860.0);
}

#[test]
fn first_line_in_order_wins_over_closer_later_line() {
    let lines = vec![
        SnapLine::new(100.0, SnapTarget::Playhead),
        SnapLine::new(104.0, SnapTarget::Clip { id: "clip-1".into() }),
    ];
    let r = find_snap(MovingEdges::point(105.0), &lines, 10.0);
    assert_eq!(r.value, 100.0);
    assert_eq!(r.target, Some(SnapTarget::Playhead));
}

#[test]
fn leading_point_is_tested_before_trailing_for_the_same_line() {
    let lines = vec![SnapLine::new(50.0, SnapTarget::CanvasStart)];
    // both ends are 5 away from 50
    let r = find_snap(MovingEdges::ends(45.0, 55.0), &lines, 10.0);
    assert_eq!(r.anchor, Some(Anchor::Leading));
    assert_eq!(r.value, 50.0);
}

#[test]
fn invalid_tolerance_never_snaps() {
    for tol in [0.0, -3.0, f64::NAN] {
        assert!(!find_snap(MovingEdges::point(960.0), &fhd_lines(), tol).snapped);
    }
}

#[test]
fn box_and_clip_lines_keep_their_order() {
    let b = box_lines("box-1", 100.0, 50.0);
    assert_eq!(
        b.iter().map(|l| l.value).collect::<Vec<_>>(),
        vec![100.0, 150.0, 125.0]
    );
    let c = clip_lines("clip-2", 3.0, 7.5);
    assert_eq!(c[0].value, 3.0);
    assert_eq!(c[1].value, 7.5);
    assert_eq!(c[1].target, SnapTarget::Clip { id: "clip-2".into() });
}

#[test]
fn closer_of_two_prefers_nearer_and_leading_on_ties() {
    assert_eq!(closer_of(3.0, 5.0, 10.0), Some(Anchor::Leading));
    assert_eq!(closer_of(6.0, 2.0, 10.0), Some(Anchor::Trailing));
    assert_eq!(closer_of(4.0, 4.0, 10.0), Some(Anchor::Leading));
    assert_eq!(closer_of(12.0, 2.0, 10.0), Some(Anchor::Trailing));
    assert_eq!(closer_of(10.0, 30.0, 10.0), Some(Anchor::Leading));
    assert_eq!(closer_of(12.0, 20.0, 10.0), None);
}
