//! Flush debouncer.
//!
//! Tracks a single flush deadline measured on the wall clock. Every
//! mutation pushes the deadline out to `now + delay`; the owner polls
//! [`FlushDebouncer::take_due`] and persists when it returns true.

pub const DEFAULT_FLUSH_DEBOUNCE_MS: u64 = 400;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlushDebouncer {
    delay_ms: u64,
    /// Epoch ms at which the pending flush fires.
    deadline: Option<i64>,
}

impl FlushDebouncer {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            deadline: None,
        }
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// (Re)arm the deadline relative to `now_ms`, replacing any pending one.
    pub fn schedule(&mut self, now_ms: i64) -> i64 {
        let delay = i64::try_from(self.delay_ms).unwrap_or(i64::MAX);
        let deadline = now_ms.saturating_add(delay);
        self.deadline = Some(deadline);
        deadline
    }

    /// Drop the pending flush, if any. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    pub fn deadline(&self) -> Option<i64> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Consume the deadline if it has passed.
    pub fn take_due(&mut self, now_ms: i64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

impl Default for FlushDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_FLUSH_DEBOUNCE_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_only_after_quiet_period() {
        let mut d = FlushDebouncer::default();
        assert!(!d.take_due(0));

        d.schedule(1_000);
        assert_eq!(d.deadline(), Some(1_400));
        assert!(!d.take_due(1_399));
        assert!(d.take_due(1_400));
        assert!(!d.is_pending());
    }

    #[test]
    fn reschedule_restarts_the_window() {
        let mut d = FlushDebouncer::new(400);
        d.schedule(1_000);
        d.schedule(1_300);
        // The first deadline no longer applies.
        assert!(!d.take_due(1_450));
        assert!(d.take_due(1_700));
    }

    #[test]
    fn cancel_clears_pending() {
        let mut d = FlushDebouncer::new(400);
        assert!(!d.cancel());
        d.schedule(0);
        assert!(d.cancel());
        assert!(!d.take_due(10_000));
    }
}
