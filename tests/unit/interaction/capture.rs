use super::*;

#[test]
fn begin_and_end_are_idempotent() {
    let mut slot = CaptureSlot::new(CaptureLog::default());
    slot.begin();
    slot.begin();
    assert!(slot.is_held());
    slot.end();
    slot.end();
    assert!(!slot.is_held());
    assert_eq!(
        *slot.inner(),
        CaptureLog {
            acquired: 1,
            released: 1
        }
    );
}

#[test]
fn dropping_a_held_slot_releases() {
    let mut log = CaptureLog::default();
    {
        let mut slot = CaptureSlot::new(&mut log);
        slot.begin();
    }
    assert!(log.is_balanced());
    assert_eq!(log.acquired, 1);
}

#[test]
fn dropping_an_idle_slot_does_nothing() {
    let mut log = CaptureLog::default();
    drop(CaptureSlot::new(&mut log));
    assert_eq!(log, CaptureLog::default());
}
