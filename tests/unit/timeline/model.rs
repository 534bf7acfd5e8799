use super::*;

fn clip(id: &str, track: &str, start: f64, duration: f64) -> Clip {
    Clip {
        id: id.to_owned(),
        track_id: track.to_owned(),
        name: id.to_owned(),
        kind: MediaKind::Video,
        start,
        duration,
    }
}

fn timeline_with(clips: &[(&str, f64, f64)]) -> (Timeline, String) {
    let mut tl = Timeline::new();
    let track = tl.add_track(MediaKind::Video);
    for (id, start, duration) in clips {
        tl.push_clip(clip(id, &track, *start, *duration));
    }
    (tl, track)
}

fn spans(tl: &Timeline) -> Vec<(f64, f64)> {
    tl.clips().iter().map(|c| (c.start, c.duration)).collect()
}

#[test]
fn split_is_lossless() {
    let (mut tl, _) = timeline_with(&[("clip-1", 5.0, 10.0)]);
    let new_id = tl.split_clip("clip-1", 8.0).unwrap();
    assert_eq!(spans(&tl), vec![(5.0, 3.0), (8.0, 7.0)]);
    let right = tl.clip(&new_id).unwrap();
    assert_eq!(right.name, "clip-1 (2)");
    assert_eq!(right.track_id, tl.clips()[0].track_id);
    assert_ne!(new_id, "clip-1");
}

#[test]
fn split_outside_the_open_interval_is_a_no_op() {
    let (mut tl, _) = timeline_with(&[("clip-1", 5.0, 10.0)]);
    for at in [5.0, 15.0, 2.0, 20.0] {
        assert!(tl.split_clip("clip-1", at).is_none());
    }
    assert!(tl.split_clip("clip-404", 8.0).is_none());
    assert_eq!(spans(&tl), vec![(5.0, 10.0)]);
}

#[test]
fn cut_left_truncates_straddling_clips_and_drops_earlier_ones() {
    let (mut tl, _) = timeline_with(&[("a", 0.0, 10.0), ("b", 5.0, 10.0), ("c", 0.0, 8.0), ("d", 9.0, 1.0)]);
    let changed = tl.cut_and_delete_left(8.0, false);
    assert_eq!(changed, 3);
    assert_eq!(spans(&tl), vec![(8.0, 2.0), (8.0, 7.0), (9.0, 1.0)]);
}

#[test]
fn cut_left_with_auto_ripple_closes_the_head() {
    let (mut tl, _) = timeline_with(&[("a", 0.0, 10.0), ("b", 5.0, 10.0), ("d", 9.0, 1.0)]);
    tl.cut_and_delete_left(8.0, true);
    assert_eq!(spans(&tl), vec![(0.0, 2.0), (0.0, 7.0), (1.0, 1.0)]);
}

#[test]
fn cut_left_at_or_before_zero_leaves_clips_in_place() {
    let (mut tl, _) = timeline_with(&[("a", 2.0, 3.0), ("b", 10.0, 1.0)]);
    assert_eq!(tl.cut_and_delete_left(-5.0, true), 0);
    assert_eq!(tl.cut_and_delete_left(0.0, true), 0);
    assert_eq!(spans(&tl), vec![(2.0, 3.0), (10.0, 1.0)]);
}

#[test]
fn cuts_at_non_finite_times_are_no_ops() {
    let (mut tl, _) = timeline_with(&[("a", 2.0, 3.0), ("b", 10.0, 1.0)]);
    for t in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        assert_eq!(tl.cut_and_delete_left(t, true), 0);
        assert_eq!(tl.cut_and_delete_right(t), 0);
    }
    assert_eq!(spans(&tl), vec![(2.0, 3.0), (10.0, 1.0)]);
}

#[test]
fn cut_right_clamps_negative_times_to_zero() {
    let (mut tl, _) = timeline_with(&[("a", 0.0, 3.0), ("b", 10.0, 1.0)]);
    assert_eq!(tl.cut_and_delete_right(-2.0), 2);
    assert!(tl.clips().is_empty());
}

#[test]
fn cut_right_truncates_and_drops_later_clips() {
    let (mut tl, _) = timeline_with(&[("a", 0.0, 10.0), ("b", 8.0, 4.0), ("c", 2.0, 3.0)]);
    assert_eq!(tl.cut_and_delete_right(8.0), 2);
    assert_eq!(spans(&tl), vec![(0.0, 8.0), (2.0, 3.0)]);
}

#[test]
fn locked_tracks_are_untouched_by_bulk_and_single_edits() {
    let (mut tl, track) = timeline_with(&[("a", 0.0, 10.0)]);
    let other = tl.add_track(MediaKind::Audio);
    tl.push_clip(clip("b", &other, 0.0, 10.0));
    tl.toggle_track_lock(&track);

    tl.cut_and_delete_left(4.0, true);
    tl.cut_and_delete_right(6.0);
    assert_eq!(spans(&tl), vec![(0.0, 10.0), (0.0, 6.0)]);

    assert!(tl.split_clip("a", 5.0).is_none());
    assert!(tl.remove_clip("a").is_none());
    assert!(!tl.move_clip_to_track("b", &track));
    assert!(!tl.move_clip_to_track("a", &other));
    assert!(tl.add_clip_at(MediaKind::Video, 0, 3.0, "drop").is_none());
}

#[test]
fn move_clip_to_track_reassigns_between_unlocked_tracks() {
    let (mut tl, track) = timeline_with(&[("a", 0.0, 10.0)]);
    let other = tl.add_track(MediaKind::Video);
    assert!(tl.move_clip_to_track("a", &other));
    assert_eq!(tl.clip("a").unwrap().track_id, other);
    assert!(!tl.move_clip_to_track("a", "track-404"));
    assert!(tl.move_clip_to_track("a", &track));
}

#[test]
fn ripple_delete_closes_the_gap_on_the_same_track() {
    let (mut tl, _) = timeline_with(&[("a", 0.0, 4.0), ("b", 4.0, 3.0), ("c", 7.0, 2.0)]);
    let removed = tl.ripple_delete_clip("b", true).unwrap();
    assert_eq!(removed.id, "b");
    assert_eq!(spans(&tl), vec![(0.0, 4.0), (4.0, 2.0)]);

    let (mut tl, _) = timeline_with(&[("a", 0.0, 4.0), ("b", 4.0, 3.0), ("c", 7.0, 2.0)]);
    tl.ripple_delete_clip("b", false);
    assert_eq!(spans(&tl), vec![(0.0, 4.0), (7.0, 2.0)]);
}

#[test]
fn track_management() {
    let mut tl = Timeline::new();
    let t1 = tl.add_track(MediaKind::Video);
    let t2 = tl.add_track(MediaKind::Audio);
    assert_eq!(tl.tracks()[1].name, "Track 2");
    tl.push_clip(clip("clip-50", &t1, 0.0, 5.0));

    let dup = tl.duplicate_track(&t1).unwrap();
    assert_eq!(tl.track_index(&dup), Some(1));
    assert_eq!(tl.track(&dup).unwrap().name, "Track 1 (copy)");
    let copies: Vec<_> = tl.clips().iter().filter(|c| c.track_id == dup).collect();
    assert_eq!(copies.len(), 1);
    assert_eq!(copies[0].id, "clip-52");

    assert_eq!(tl.toggle_main_track(&t1), Some(true));
    assert_eq!(tl.toggle_main_track(&t2), Some(true));
    assert!(!tl.track(&t1).unwrap().is_main);
    assert_eq!(tl.toggle_main_track(&t2), Some(false));

    assert!(tl.move_track(2, 0));
    assert_eq!(tl.tracks()[0].id, t2);
    assert!(tl.move_track(0, 99));
    assert_eq!(tl.tracks()[2].id, t2);
    assert!(!tl.move_track(5, 0));

    assert!(tl.remove_track(&t1));
    assert!(tl.clips().iter().all(|c| c.track_id != t1));
    assert!(!tl.remove_track(&t1));
    assert!(tl.violations(0.1).is_empty());
}

#[test]
fn add_clip_at_uses_row_index_and_default_length() {
    let mut tl = Timeline::new();
    tl.add_track(MediaKind::Video);
    let t2 = tl.add_track(MediaKind::Text);
    let id = tl.add_clip_at(MediaKind::Text, 1, -3.0, "title").unwrap();
    let c = tl.clip(&id).unwrap();
    assert_eq!(c.track_id, t2);
    assert_eq!((c.start, c.duration), (0.0, DROP_CLIP_DURATION));
    assert!(tl.add_clip_at(MediaKind::Text, 7, 0.0, "nowhere").is_none());
}

#[test]
fn queries_over_the_collection() {
    let (mut tl, track) = timeline_with(&[("a", 0.0, 4.0), ("b", 2.0, 10.0)]);
    let top = tl.add_track(MediaKind::Video);
    tl.move_track(1, 0);
    tl.push_clip(clip("c", &top, 3.0, 1.0));
    assert_eq!(tl.max_clip_end(), 12.0);

    let at: Vec<_> = tl.clips_at(3.0).iter().map(|c| c.id.as_str()).collect();
    assert_eq!(at, vec!["c", "a", "b"]);
    tl.toggle_track_hidden(&track);
    let at: Vec<_> = tl.clips_at(3.0).iter().map(|c| c.id.as_str()).collect();
    assert_eq!(at, vec!["c"]);
    assert!(tl.clips_at(4.0).is_empty());
}

#[test]
fn duplicate_clip_lands_after_the_source() {
    let (mut tl, _) = timeline_with(&[("clip-3", 2.0, 4.0)]);
    let id = tl.duplicate_clip("clip-3").unwrap();
    assert_eq!(id, "clip-4");
    assert_eq!(tl.clip(&id).unwrap().start, 6.0);
}

#[test]
fn selection_follows_deletions() {
    let (mut tl, _) = timeline_with(&[("a", 0.0, 4.0)]);
    tl.select(Some("a"));
    tl.set_playhead(2.0);
    let right = tl.split_selected_at_playhead().unwrap();
    tl.select(Some(&right));
    assert_eq!(tl.selected(), Some(right.as_str()));
    tl.cut_and_delete_right(1.0);
    assert_eq!(tl.selected(), None);
    tl.set_playhead(-4.0);
    assert_eq!(tl.playhead(), 0.0);
}
