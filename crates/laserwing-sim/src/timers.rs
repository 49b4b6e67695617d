//! Deferred actions keyed by a sim-time deadline.
//!
//! Replaces coroutine-style waits: an action is scheduled for a due time and
//! handed back exactly once by `drain_due` on the first tick at or after
//! that time.

/// Tolerance for accumulated tick time landing just short of a deadline.
const DUE_EPSILON: f64 = 1e-9;

/// Handle returned by `TimerQueue::schedule`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// What to do when a timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredKind {
    /// Reload the level from configuration.
    RestartScene,
}

#[derive(Debug, Clone)]
pub struct DeferredAction {
    pub id: TimerId,
    pub due_secs: f64,
    pub kind: DeferredKind,
}

/// Single-threaded one-shot timer queue.
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    pending: Vec<DeferredAction>,
    next_id: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `kind` to fire at `due_secs`.
    pub fn schedule(&mut self, kind: DeferredKind, due_secs: f64) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(DeferredAction { id, due_secs, kind });
        id
    }

    /// Cancel a pending action. Returns false if it already fired or never existed.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|action| action.id != id);
        self.pending.len() != before
    }

    /// Remove and return every action due at `now`, earliest first.
    pub fn drain_due(&mut self, now: f64) -> Vec<DeferredAction> {
        let (mut due, pending): (Vec<_>, Vec<_>) = self
            .pending
            .drain(..)
            .partition(|action| action.due_secs <= now + DUE_EPSILON);
        self.pending = pending;
        due.sort_by(|a, b| a.due_secs.total_cmp(&b.due_secs).then(a.id.0.cmp(&b.id.0)));
        due
    }

    /// Pending actions, in scheduling order.
    pub fn pending(&self) -> &[DeferredAction] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
