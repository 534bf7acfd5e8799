use super::*;
use crate::interaction::capture::CaptureLog;
use crate::layers::model::RowType;

fn ctx(magnet: bool) -> DragContext {
    DragContext {
        magnet,
        ..DragContext::default()
    }
}

fn matrix_with_box(g: PixelGeom) -> (LayerSlotMatrix, String) {
    let mut m = LayerSlotMatrix::new(CanvasSize::FHD);
    let id = m.create_box_for_slot(0, RowType::Txt, None).id;
    m.set_box_geometry(&id, g, &EditorConfig::default());
    (m, id)
}

fn body(id: &str) -> BoxTarget {
    BoxTarget::Body { id: id.to_owned() }
}

fn handle(id: &str, handle: ResizeHandle) -> BoxTarget {
    BoxTarget::Handle {
        id: id.to_owned(),
        handle,
    }
}

#[test]
fn move_snaps_leading_edge_to_canvas_center_and_commits_on_release() {
    let (mut m, id) = matrix_with_box(PixelGeom::new(100.0, 100.0, 200.0, 100.0));
    let mut c = BoxDragController::new(EditorConfig::default());
    assert!(c.pointer_down(&mut m, &body(&id), PointerEvent::at(200.0, 150.0), &ctx(true)));
    assert_eq!(c.session().unwrap().mode, DragMode::Move);
    assert_eq!(m.selected(), Some(id.as_str()));

    let f = c
        .pointer_move(&mut m, PointerEvent::at(1055.0, 150.0), &ctx(true))
        .unwrap();
    assert_eq!(f.px, PixelGeom::new(960.0, 100.0, 200.0, 100.0));
    assert_eq!(f.snap_x, Some(SnapTarget::CanvasCenter));
    assert_eq!(f.snap_y, None);
    // on_release: the store still holds the pre-drag geometry
    assert_eq!(m.get(&id).unwrap().px.x, 100.0);

    let commit = c.pointer_up(&mut m).unwrap();
    assert_eq!(commit.px, f.px);
    assert_eq!(commit.norm, to_normalized(f.px, CanvasSize::FHD));
    assert_eq!(m.get(&id).unwrap().px, f.px);
    assert!(c.session().is_none());
    assert!(c.pointer_up(&mut m).is_none());
}

#[test]
fn move_without_magnet_is_clamped_to_canvas() {
    let (mut m, id) = matrix_with_box(PixelGeom::new(100.0, 100.0, 200.0, 100.0));
    let mut c = BoxDragController::new(EditorConfig::default());
    c.pointer_down(&mut m, &body(&id), PointerEvent::at(200.0, 150.0), &ctx(false));
    let f = c
        .pointer_move(&mut m, PointerEvent::at(5200.0, -900.0), &ctx(false))
        .unwrap();
    assert_eq!(f.px, PixelGeom::new(1720.0, 0.0, 200.0, 100.0));
    assert!(f.canvas_contact.right && f.canvas_contact.top);
    assert!(!f.canvas_contact.left && !f.canvas_contact.bottom);
    assert_eq!(f.region_contact, None);
}

#[test]
fn left_resize_keeps_right_edge_and_minimum_size() {
    let (mut m, id) = matrix_with_box(PixelGeom::new(100.0, 100.0, 200.0, 100.0));
    let mut c = BoxDragController::new(EditorConfig::default());
    c.pointer_down(&mut m, &handle(&id, ResizeHandle::L), PointerEvent::at(100.0, 150.0), &ctx(true));
    let f = c
        .pointer_move(&mut m, PointerEvent::at(400.0, 150.0), &ctx(true))
        .unwrap();
    assert_eq!(f.px, PixelGeom::new(290.0, 100.0, 10.0, 100.0));

    let f = c
        .pointer_move(&mut m, PointerEvent::at(-300.0, 150.0), &ctx(true))
        .unwrap();
    assert_eq!(f.px, PixelGeom::new(0.0, 100.0, 300.0, 100.0));
}

#[test]
fn right_resize_snaps_only_the_active_edge_to_a_sibling() {
    let (mut m, id) = matrix_with_box(PixelGeom::new(100.0, 100.0, 200.0, 100.0));
    let other = m.create_box_for_slot(1, RowType::Txt, None).id;
    m.set_box_geometry(&other, PixelGeom::new(500.0, 600.0, 100.0, 100.0), &EditorConfig::default());

    let mut c = BoxDragController::new(EditorConfig::default());
    c.pointer_down(&mut m, &handle(&id, ResizeHandle::R), PointerEvent::at(300.0, 150.0), &ctx(true));
    let f = c
        .pointer_move(&mut m, PointerEvent::at(493.0, 150.0), &ctx(true))
        .unwrap();
    assert_eq!(f.px, PixelGeom::new(100.0, 100.0, 400.0, 100.0));
    assert_eq!(f.snap_x, Some(SnapTarget::Box { id: other }));
}

#[test]
fn hidden_siblings_contribute_no_lines() {
    let (mut m, id) = matrix_with_box(PixelGeom::new(100.0, 100.0, 200.0, 100.0));
    let other = m.create_box_for_slot(1, RowType::Txt, None).id;
    m.set_box_geometry(&other, PixelGeom::new(500.0, 600.0, 100.0, 100.0), &EditorConfig::default());
    m.toggle_hidden(&other);

    let mut c = BoxDragController::new(EditorConfig::default());
    c.pointer_down(&mut m, &handle(&id, ResizeHandle::R), PointerEvent::at(300.0, 150.0), &ctx(true));
    let f = c
        .pointer_move(&mut m, PointerEvent::at(493.0, 150.0), &ctx(true))
        .unwrap();
    assert_eq!(f.px.w, 393.0);
    assert_eq!(f.snap_x, None);
}

#[test]
fn background_box_is_confined_to_its_band() {
    let mut m = LayerSlotMatrix::new(CanvasSize::FHD);
    let id = m.create_box_for_slot(2, RowType::Bg, None).id;
    m.set_box_geometry(&id, PixelGeom::new(0.0, 400.0, 200.0, 100.0), &EditorConfig::default());

    let mut c = BoxDragController::new(EditorConfig::default());
    c.pointer_down(&mut m, &body(&id), PointerEvent::at(100.0, 450.0), &ctx(false));
    let f = c
        .pointer_move(&mut m, PointerEvent::at(100.0, -50.0), &ctx(false))
        .unwrap();
    assert_eq!(f.px, PixelGeom::new(0.0, 360.0, 200.0, 100.0));
    assert_eq!(
        f.region_contact,
        Some(RegionContact {
            top: true,
            bottom: false
        })
    );

    let f = c
        .pointer_move(&mut m, PointerEvent::at(100.0, 2000.0), &ctx(false))
        .unwrap();
    assert_eq!(f.px.y, 620.0);
    assert_eq!(f.region_contact.map(|r| r.bottom), Some(true));
}

#[test]
fn band_thinner_than_the_minimum_size_wins_over_it() {
    let mut m = LayerSlotMatrix::new(CanvasSize::new(200, 24));
    let id = m.create_box_for_slot(2, RowType::Bg, None).id;
    assert_eq!(m.get(&id).unwrap().px, PixelGeom::new(0.0, 8.0, 200.0, 8.0));

    let mut c = BoxDragController::new(EditorConfig::default());
    assert!(c.pointer_down(
        &mut m,
        &handle(&id, ResizeHandle::B),
        PointerEvent::at(100.0, 16.0),
        &ctx(false)
    ));
    let f = c
        .pointer_move(&mut m, PointerEvent::at(100.0, 40.0), &ctx(false))
        .unwrap();
    assert_eq!(f.px, PixelGeom::new(0.0, 8.0, 200.0, 8.0));
    c.pointer_up(&mut m).unwrap();
    assert!(m.violations(10.0).is_empty());
}

#[test]
fn clip_driven_background_box_is_not_confined() {
    let mut m = LayerSlotMatrix::new(CanvasSize::FHD);
    let id = m.create_box_for_slot(2, RowType::Bg, None).id;
    m.set_box_geometry(&id, PixelGeom::new(0.0, 400.0, 200.0, 100.0), &EditorConfig::default());
    m.set_clip_link(&id, Some("clip-1".into()));

    let mut c = BoxDragController::new(EditorConfig::default());
    c.pointer_down(&mut m, &body(&id), PointerEvent::at(100.0, 450.0), &ctx(false));
    let f = c
        .pointer_move(&mut m, PointerEvent::at(100.0, -50.0), &ctx(false))
        .unwrap();
    assert_eq!(f.px.y, 0.0);
    assert_eq!(f.region_contact, None);
}

#[test]
fn render_scale_and_origin_are_applied_to_deltas() {
    let (mut m, id) = matrix_with_box(PixelGeom::new(100.0, 100.0, 200.0, 100.0));
    let c_ctx = DragContext {
        origin: Point::new(10.0, 20.0),
        render_scale: 0.5,
        magnet: false,
    };
    let mut c = BoxDragController::new(EditorConfig::default());
    // canvas (200, 150) sits at client (110, 95)
    c.pointer_down(&mut m, &body(&id), PointerEvent::at(110.0, 95.0), &c_ctx);
    assert_eq!(c.session().unwrap().anchor, Point::new(200.0, 150.0));
    let f = c
        .pointer_move(&mut m, PointerEvent::at(160.0, 95.0), &c_ctx)
        .unwrap();
    assert_eq!(f.px.x, 200.0);
}

#[test]
fn grabbing_the_body_near_an_edge_resizes() {
    let (mut m, id) = matrix_with_box(PixelGeom::new(100.0, 100.0, 200.0, 100.0));
    let mut c = BoxDragController::new(EditorConfig::default());
    c.pointer_down(&mut m, &body(&id), PointerEvent::at(295.0, 195.0), &ctx(false));
    assert_eq!(c.active_cursor(), Some(CursorHint::NwseResize));
    let f = c
        .pointer_move(&mut m, PointerEvent::at(345.0, 215.0), &ctx(false))
        .unwrap();
    assert_eq!(f.px, PixelGeom::new(100.0, 100.0, 250.0, 120.0));
}

#[test]
fn hover_reports_cursor_only_while_idle() {
    let (mut m, id) = matrix_with_box(PixelGeom::new(100.0, 100.0, 200.0, 100.0));
    let mut c = BoxDragController::new(EditorConfig::default());
    let hit = c
        .hover(&m, PointerEvent::at(105.0, 150.0), &ctx(true))
        .unwrap();
    assert_eq!(hit.id, id);
    assert_eq!(hit.cursor, CursorHint::EwResize);

    c.pointer_down(&mut m, &body(&id), PointerEvent::at(200.0, 150.0), &ctx(true));
    assert!(c.hover(&m, PointerEvent::at(105.0, 150.0), &ctx(true)).is_none());
}

#[test]
fn live_policy_writes_every_frame_and_cancel_does_not_roll_back() {
    let cfg = EditorConfig {
        commit_policy: CommitPolicy::Live,
        ..EditorConfig::default()
    };
    let (mut m, id) = matrix_with_box(PixelGeom::new(100.0, 100.0, 200.0, 100.0));
    let mut c = BoxDragController::new(cfg);
    c.pointer_down(&mut m, &body(&id), PointerEvent::at(200.0, 150.0), &ctx(false));
    c.pointer_move(&mut m, PointerEvent::at(250.0, 150.0), &ctx(false));
    assert_eq!(m.get(&id).unwrap().px.x, 150.0);

    let abandoned = c.cancel().unwrap();
    assert_eq!(abandoned.start.x, 100.0);
    assert_eq!(m.get(&id).unwrap().px.x, 150.0);
    assert!(c.pointer_move(&mut m, PointerEvent::at(300.0, 150.0), &ctx(false)).is_none());
}

#[test]
fn capture_is_released_on_every_exit_path() {
    let (mut m, id) = matrix_with_box(PixelGeom::new(100.0, 100.0, 200.0, 100.0));
    let mut log = CaptureLog::default();
    {
        let mut c = BoxDragController::with_capture(EditorConfig::default(), &mut log);
        c.pointer_down(&mut m, &body(&id), PointerEvent::at(200.0, 150.0), &ctx(true));
        assert!(c.is_capturing());
        c.pointer_up(&mut m);
        assert!(!c.is_capturing());

        c.pointer_down(&mut m, &body(&id), PointerEvent::at(200.0, 150.0), &ctx(true));
        c.cancel();

        c.pointer_down(&mut m, &body(&id), PointerEvent::at(200.0, 150.0), &ctx(true));
        // a second pointer-down abandons the first session
        c.pointer_down(&mut m, &body(&id), PointerEvent::at(200.0, 150.0), &ctx(true));
        // dropped while active
    }
    assert_eq!(log.acquired, 4);
    assert!(log.is_balanced());
}

#[test]
fn removed_box_ends_the_session() {
    let (mut m, id) = matrix_with_box(PixelGeom::new(100.0, 100.0, 200.0, 100.0));
    let mut c = BoxDragController::new(EditorConfig::default());
    c.pointer_down(&mut m, &body(&id), PointerEvent::at(200.0, 150.0), &ctx(true));
    m.remove_box(&id);
    assert!(c.pointer_move(&mut m, PointerEvent::at(250.0, 150.0), &ctx(true)).is_none());
    assert!(c.session().is_none());
}

#[test]
fn hidden_or_unknown_boxes_do_not_start_sessions() {
    let (mut m, id) = matrix_with_box(PixelGeom::new(100.0, 100.0, 200.0, 100.0));
    m.toggle_hidden(&id);
    let mut c = BoxDragController::new(EditorConfig::default());
    assert!(!c.pointer_down(&mut m, &body(&id), PointerEvent::at(200.0, 150.0), &ctx(true)));
    assert!(!c.pointer_down(&mut m, &body("box-77"), PointerEvent::at(200.0, 150.0), &ctx(true)));
    assert!(c.session().is_none());
}

#[test]
fn bounds_hold_for_every_handle_and_delta() {
    let cfg = EditorConfig::default();
    let deltas = [-3000.0, -400.0, -7.0, 0.0, 9.0, 350.0, 2500.0];
    for row in [RowType::Txt, RowType::Bg] {
        for magnet in [false, true] {
            for target in [None, Some(ResizeHandle::Tl), Some(ResizeHandle::Br), Some(ResizeHandle::T), Some(ResizeHandle::R)] {
                for dx in deltas {
                    for dy in deltas {
                        let mut m = LayerSlotMatrix::new(CanvasSize::FHD);
                        let id = m.create_box_for_slot(3, row, None).id;
                        m.set_box_geometry(&id, PixelGeom::new(300.0, 800.0, 200.0, 150.0), &cfg);
                        let t = match target {
                            None => body(&id),
                            Some(h) => handle(&id, h),
                        };
                        let mut c = BoxDragController::new(cfg.clone());
                        c.pointer_down(&mut m, &t, PointerEvent::at(400.0, 875.0), &ctx(magnet));
                        c.pointer_move(&mut m, PointerEvent::at(400.0 + dx, 875.0 + dy), &ctx(magnet));
                        c.pointer_up(&mut m).unwrap();
                        assert!(m.violations(cfg.min_box_size_px).is_empty(), "{row:?} {target:?} {dx} {dy}: {:?}", m.violations(cfg.min_box_size_px));
                    }
                }
            }
        }
    }
}
