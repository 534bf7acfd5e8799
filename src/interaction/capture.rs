//! Scoped pointer capture.
//!
//! A drag session routes every pointer event to itself from pointer-down until it ends.
//! Hosts implement [`PointerCapture`] (e.g. `setPointerCapture` or global listeners);
//! controllers hold it through a [`CaptureSlot`], which acquires at most once per
//! session and always releases: on pointer-up, on cancel and when dropped.

/// Host-side pointer capture.
pub trait PointerCapture {
    /// Start routing pointer events to the active session.
    fn acquire(&mut self);
    /// Stop routing pointer events.
    fn release(&mut self);
}

/// Capture for hosts that route events themselves.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCapture;

impl PointerCapture for NoCapture {
    fn acquire(&mut self) {}
    fn release(&mut self) {}
}

/// Capture that only counts calls; lets replay runs and tests check that every
/// acquisition was paired with a release.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct CaptureLog {
    /// Number of acquisitions.
    pub acquired: u32,
    /// Number of releases.
    pub released: u32,
}

impl CaptureLog {
    /// Every acquisition has been released.
    pub fn is_balanced(&self) -> bool {
        self.acquired == self.released
    }
}

impl PointerCapture for CaptureLog {
    fn acquire(&mut self) {
        self.acquired += 1;
    }
    fn release(&mut self) {
        self.released += 1;
    }
}

impl<C: PointerCapture + ?Sized> PointerCapture for &mut C {
    fn acquire(&mut self) {
        (**self).acquire();
    }
    fn release(&mut self) {
        (**self).release();
    }
}

/// Holds a capture and tracks whether it is currently acquired.
pub(crate) struct CaptureSlot<C: PointerCapture> {
    capture: C,
    held: bool,
}

impl<C: PointerCapture> CaptureSlot<C> {
    pub(crate) fn new(capture: C) -> Self {
        Self {
            capture,
            held: false,
        }
    }

    /// Acquire unless already held.
    pub(crate) fn begin(&mut self) {
        if !self.held {
            self.capture.acquire();
            self.held = true;
        }
    }

    /// Release if held.
    pub(crate) fn end(&mut self) {
        if self.held {
            self.capture.release();
            self.held = false;
        }
    }

    pub(crate) fn is_held(&self) -> bool {
        self.held
    }

    pub(crate) fn inner(&self) -> &C {
        &self.capture
    }
}

impl<C: PointerCapture> Drop for CaptureSlot<C> {
    fn drop(&mut self) {
        self.end();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/capture.rs"]
mod tests;
