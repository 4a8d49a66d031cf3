//! Timer-gated dispatch for input streams
//!
//! Each input restarts a single pending deadline. When the deadline passes
//! the pending value is released, unless it equals the last value released.

use std::time::Duration;

use tokio::time::{sleep_until, Instant};

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    interval: Duration,
    pending: Option<(T, Instant)>,
    last_dispatched: Option<T>,
}

impl<T: Clone + PartialEq> Debouncer<T> {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            pending: None,
            last_dispatched: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Replace any pending value and restart the timer. Returns the new deadline.
    pub fn push(&mut self, value: T) -> Instant {
        self.push_at(value, Instant::now())
    }

    pub fn push_at(&mut self, value: T, now: Instant) -> Instant {
        let deadline = now + self.interval;
        self.pending = Some((value, deadline));
        deadline
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Release the pending value if its deadline has passed and it differs
    /// from the last released one.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, deadline)) if *deadline <= now => {}
            _ => return None,
        }
        let (value, _) = self.pending.take()?;
        if self.last_dispatched.as_ref() == Some(&value) {
            return None;
        }
        self.last_dispatched = Some(value.clone());
        Some(value)
    }

    /// Wait for the pending deadline, then poll. `None` right away if idle.
    pub async fn settle(&mut self) -> Option<T> {
        let deadline = self.deadline()?;
        sleep_until(deadline).await;
        self.poll(Instant::now())
    }

    /// Drop the pending value, keep the duplicate-suppression memory
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Forget everything, including the last released value
    pub fn reset(&mut self) {
        self.pending = None;
        self.last_dispatched = None;
    }

    pub fn last_dispatched(&self) -> Option<&T> {
        self.last_dispatched.as_ref()
    }

    /// Note a value dispatched outside the timer (initial load, manual reload)
    pub fn mark_dispatched(&mut self, value: T) {
        self.last_dispatched = Some(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: Duration = Duration::from_millis(200);

    #[test]
    fn test_rapid_inputs_collapse_to_last() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(WINDOW);

        debouncer.push_at("Ann".to_string(), start);
        debouncer.push_at("Anna".to_string(), start + Duration::from_millis(100));

        // The first deadline has passed but was superseded
        assert_eq!(debouncer.poll(start + Duration::from_millis(250)), None);
        assert_eq!(
            debouncer.poll(start + Duration::from_millis(300)),
            Some("Anna".to_string())
        );
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_repeat_of_last_value_is_suppressed() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(WINDOW);

        debouncer.push_at(1, start);
        assert_eq!(debouncer.poll(start + WINDOW), Some(1));

        debouncer.push_at(1, start + WINDOW);
        assert_eq!(debouncer.poll(start + WINDOW * 2), None);

        debouncer.reset();
        debouncer.push_at(1, start + WINDOW * 2);
        assert_eq!(debouncer.poll(start + WINDOW * 3), Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_settle_waits_for_quiescence() {
        let mut debouncer = Debouncer::new(WINDOW);
        assert_eq!(debouncer.settle().await, None);

        let before = Instant::now();
        debouncer.push("Thunder");
        assert_eq!(debouncer.settle().await, Some("Thunder"));
        assert!(Instant::now() - before >= WINDOW);
    }
}
