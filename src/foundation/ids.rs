/// Monotonic id source for boxes, clips and tracks.
///
/// Ids have the shape `{prefix}-{n}` and are never handed out twice by the same
/// allocator. Documents loaded from disk call [`IdAllocator::observe`] for every
/// existing id so fresh ids cannot collide with persisted ones.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    /// Allocator starting at `1`.
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Hand out the next id for `prefix`.
    pub fn next(&mut self, prefix: &str) -> String {
        let n = self.next.max(1);
        self.next = n.saturating_add(1);
        format!("{prefix}-{n}")
    }

    /// Make sure ids ending in `-{n}` are never produced again.
    pub fn observe(&mut self, id: &str) {
        if let Some(n) = Self::counter_of(id) {
            self.next = self.next.max(n.saturating_add(1));
        }
    }

    /// `true` for an id whose counter leaves no room for a fresh one.
    pub(crate) fn exhausts(id: &str) -> bool {
        Self::counter_of(id) == Some(u64::MAX)
    }

    fn counter_of(id: &str) -> Option<u64> {
        let (_, tail) = id.rsplit_once('-')?;
        tail.parse().ok()
    }
}
