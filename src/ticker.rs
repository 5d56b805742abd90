//! Fixed-interval gate driving the poll loop.
//!
//! The hosting event loop asks `due()` each pass; the poll body itself lives
//! elsewhere and stays testable without any timer. Start and stop are
//! idempotent and safe to call at any time.

use std::time::{Duration, Instant};

pub struct Ticker {
    interval: Duration,
    last: Option<Instant>,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Arm the ticker; the first `due()` fires immediately.
    pub fn start(&mut self) {
        if self.last.is_none() {
            self.last = Some(Instant::now() - self.interval);
        }
    }

    pub fn stop(&mut self) {
        self.last = None;
    }

    pub fn is_running(&self) -> bool {
        self.last.is_some()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// True when a full interval has elapsed since the last firing.
    pub fn due(&mut self) -> bool {
        self.due_at(Instant::now())
    }

    fn due_at(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.duration_since(last) >= self.interval => {
                self.last = Some(now);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stopped_ticker_never_fires() {
        let mut ticker = Ticker::new(Duration::from_millis(800));
        assert!(!ticker.due_at(Instant::now()));
    }

    #[test]
    fn fires_immediately_after_start_then_waits_an_interval() {
        let mut ticker = Ticker::new(Duration::from_millis(800));
        ticker.start();

        let t0 = Instant::now();
        assert!(ticker.due_at(t0));
        assert!(!ticker.due_at(t0 + Duration::from_millis(500)));
        assert!(ticker.due_at(t0 + Duration::from_millis(800)));
    }

    #[test]
    fn stop_is_idempotent_and_rearms_cleanly() {
        let mut ticker = Ticker::new(Duration::from_millis(800));
        ticker.start();
        ticker.stop();
        ticker.stop();
        assert!(!ticker.is_running());
        assert!(!ticker.due_at(Instant::now()));

        ticker.start();
        assert!(ticker.is_running());
        assert!(ticker.due_at(Instant::now()));
    }

    #[test]
    fn start_while_running_does_not_reset_the_phase() {
        let mut ticker = Ticker::new(Duration::from_millis(800));
        ticker.start();
        let t0 = Instant::now();
        assert!(ticker.due_at(t0));
        ticker.start();
        assert!(ticker.due_at(t0 + Duration::from_millis(800)));
    }
}
