//! One-shot timers on a logical clock
//!
//! The controller never sleeps. It keeps deadlines relative to its own
//! clock and the host advances that clock (see [`crate::driver`] for the
//! tokio host). At most one timer of each kind is pending; scheduling a kind
//! again replaces its deadline.

use std::time::Duration;

/// Timer slots owned by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum TimerKind {
    /// Fires autoplay-advance after an `ended` or `error` event
    AutoplayDelay,

    /// Releases the autoplay reentrancy guard
    AutoplayCooldown,

    /// Cues the restored cursor item after the first `ready`
    RestoreCue,
}

/// Pending one-shot deadlines
#[derive(Debug, Clone, Default)]
pub(crate) struct Timers {
    now: Duration,
    pending: Vec<(TimerKind, Duration)>,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current logical time
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Arm `kind` to fire `after` from now, replacing any pending deadline
    pub fn schedule(&mut self, kind: TimerKind, after: Duration) {
        self.cancel(kind);
        self.pending.push((kind, self.now + after));
    }

    pub fn cancel(&mut self, kind: TimerKind) {
        self.pending.retain(|(k, _)| *k != kind);
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.pending.iter().any(|(k, _)| *k == kind)
    }

    /// Deadline of `kind`, if armed
    #[cfg(test)]
    pub fn deadline(&self, kind: TimerKind) -> Option<Duration> {
        self.pending
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, at)| *at)
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.iter().map(|(_, at)| *at).min()
    }

    /// Disarm and return the earliest timer due at or before `until`
    ///
    /// The clock moves to that timer's deadline so callbacks observe the
    /// time they were scheduled for. Ties fire in scheduling order.
    pub fn pop_due(&mut self, until: Duration) -> Option<(TimerKind, Duration)> {
        let (position, _) = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, (_, at))| *at <= until)
            .min_by_key(|(_, (_, at))| *at)?;

        let (kind, at) = self.pending.remove(position);
        self.now = self.now.max(at);
        Some((kind, at))
    }

    /// Move the clock forward; never moves backwards
    pub fn advance_to(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}
