//! Render rate limiting.
//!
//! [`RenderScheduler`] is a leading-edge throttle: a request runs immediately when
//! at least one interval has passed since the last executed render and is dropped
//! otherwise, so bursts of pan/zoom events never queue up work. With the trailing
//! flush enabled, a dropped request leaves one render owed, which
//! [`RenderScheduler::poll_trailing`] pays once the interval has elapsed; this keeps
//! the final view of a burst from being lost.
//!
//! [`InitialRenderGate`] is the one-shot delay between data load and the first
//! render, retrying a bounded number of times while the widget is not ready.

use instant::Instant;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderDecision {
    Execute,
    Dropped,
}

#[derive(Debug, Clone)]
pub struct RenderScheduler {
    interval: Duration,
    trailing: bool,
    last_run: Option<Instant>,
    owed: bool,
    executed: u64,
    dropped: u64,
}

impl RenderScheduler {
    pub fn new(interval: Duration, trailing: bool) -> Self {
        Self {
            interval,
            trailing,
            last_run: None,
            owed: false,
            executed: 0,
            dropped: 0,
        }
    }

    /// Decides whether a render requested at `now` runs. An `Execute` decision is
    /// recorded as the latest run.
    pub fn request(&mut self, now: Instant) -> RenderDecision {
        if self.interval_elapsed(now) {
            self.mark_executed(now);
            RenderDecision::Execute
        } else {
            self.dropped += 1;
            if self.trailing {
                self.owed = true;
            }
            RenderDecision::Dropped
        }
    }

    /// Runs the owed trailing render if its time has come
    pub fn poll_trailing(&mut self, now: Instant) -> bool {
        if self.owed && self.interval_elapsed(now) {
            self.mark_executed(now);
            true
        } else {
            false
        }
    }

    /// When the owed trailing render becomes due, if one is owed
    pub fn next_deadline(&self) -> Option<Instant> {
        if !self.owed {
            return None;
        }
        self.last_run.map(|last| last + self.interval)
    }

    /// Records a render that bypassed the throttle (e.g. the initial render)
    pub fn mark_executed(&mut self, now: Instant) {
        self.last_run = Some(now);
        self.owed = false;
        self.executed += 1;
    }

    /// Forgets any owed render
    pub fn cancel_pending(&mut self) {
        self.owed = false;
    }

    pub fn has_pending(&self) -> bool {
        self.owed
    }

    pub fn executed(&self) -> u64 {
        self.executed
    }

    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    fn interval_elapsed(&self, now: Instant) -> bool {
        match self.last_run {
            Some(last) => now.duration_since(last) >= self.interval,
            None => true,
        }
    }
}

/// Outcome of polling the initial render gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateStatus {
    /// Not armed
    Idle,
    /// Armed, delay not yet elapsed
    Waiting,
    /// Render now; the gate has disarmed itself
    Fire,
    /// Widget not ready; checked again after the retry interval
    Retry,
    /// Widget never became ready; the gate has disarmed itself
    GaveUp,
}

#[derive(Debug, Clone)]
pub struct InitialRenderGate {
    due: Option<Instant>,
    retry_interval: Duration,
    max_attempts: u32,
    attempts: u32,
}

impl InitialRenderGate {
    pub fn new(retry_interval: Duration, max_attempts: u32) -> Self {
        Self {
            due: None,
            retry_interval,
            max_attempts: max_attempts.max(1),
            attempts: 0,
        }
    }

    pub fn arm(&mut self, now: Instant, delay: Duration) {
        self.due = Some(now + delay);
        self.attempts = 0;
    }

    pub fn disarm(&mut self) {
        self.due = None;
    }

    pub fn is_armed(&self) -> bool {
        self.due.is_some()
    }

    pub fn due(&self) -> Option<Instant> {
        self.due
    }

    pub fn poll(&mut self, now: Instant, surface_ready: bool) -> GateStatus {
        let Some(due) = self.due else {
            return GateStatus::Idle;
        };
        if now < due {
            return GateStatus::Waiting;
        }
        if surface_ready {
            self.due = None;
            return GateStatus::Fire;
        }
        self.attempts += 1;
        if self.attempts >= self.max_attempts {
            self.due = None;
            GateStatus::GaveUp
        } else {
            self.due = Some(now + self.retry_interval);
            GateStatus::Retry
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_leading_edge_executes_first_request() {
        let mut scheduler = RenderScheduler::new(ms(150), false);
        let t0 = Instant::now();

        assert_eq!(scheduler.request(t0), RenderDecision::Execute);
        assert_eq!(scheduler.request(t0 + ms(10)), RenderDecision::Dropped);
        assert_eq!(scheduler.request(t0 + ms(149)), RenderDecision::Dropped);
        assert_eq!(scheduler.request(t0 + ms(150)), RenderDecision::Execute);
        assert_eq!(scheduler.executed(), 2);
        assert_eq!(scheduler.dropped(), 2);
    }

    #[test]
    fn test_burst_is_bounded() {
        let interval = ms(150);
        for window_ms in [0u64, 100, 149, 150, 449, 1000, 2345] {
            let mut scheduler = RenderScheduler::new(interval, false);
            let t0 = Instant::now();
            let triggers = 500u64;
            for i in 0..triggers {
                let offset = if window_ms == 0 { 0 } else { i * window_ms / (triggers - 1) };
                scheduler.request(t0 + ms(offset));
            }
            let bound = (window_ms as f64 / interval.as_millis() as f64).ceil() as u64 + 1;
            assert!(
                scheduler.executed() <= bound,
                "window {}ms: {} draws > {}",
                window_ms,
                scheduler.executed(),
                bound
            );
        }
    }

    #[test]
    fn test_drop_only_never_flushes() {
        let mut scheduler = RenderScheduler::new(ms(150), false);
        let t0 = Instant::now();
        scheduler.request(t0);
        scheduler.request(t0 + ms(50));

        assert!(!scheduler.has_pending());
        assert_eq!(scheduler.next_deadline(), None);
        assert!(!scheduler.poll_trailing(t0 + ms(1000)));
    }

    #[test]
    fn test_trailing_flush_pays_once() {
        let mut scheduler = RenderScheduler::new(ms(150), true);
        let t0 = Instant::now();
        scheduler.request(t0);
        scheduler.request(t0 + ms(40));
        scheduler.request(t0 + ms(90));

        assert_eq!(scheduler.next_deadline(), Some(t0 + ms(150)));
        assert!(!scheduler.poll_trailing(t0 + ms(120)));
        assert!(scheduler.poll_trailing(t0 + ms(150)));
        assert!(!scheduler.poll_trailing(t0 + ms(400)));
        assert_eq!(scheduler.executed(), 2);
    }

    #[test]
    fn test_executed_request_clears_owed_render() {
        let mut scheduler = RenderScheduler::new(ms(150), true);
        let t0 = Instant::now();
        scheduler.request(t0);
        scheduler.request(t0 + ms(10));
        assert!(scheduler.has_pending());

        assert_eq!(scheduler.request(t0 + ms(200)), RenderDecision::Execute);
        assert!(!scheduler.has_pending());
    }

    #[test]
    fn test_gate_fires_when_ready() {
        let mut gate = InitialRenderGate::new(ms(100), 3);
        let t0 = Instant::now();
        assert_eq!(gate.poll(t0, true), GateStatus::Idle);

        gate.arm(t0, ms(500));
        assert_eq!(gate.poll(t0 + ms(499), true), GateStatus::Waiting);
        assert_eq!(gate.poll(t0 + ms(500), true), GateStatus::Fire);
        assert!(!gate.is_armed());
    }

    #[test]
    fn test_gate_retries_then_gives_up() {
        let mut gate = InitialRenderGate::new(ms(100), 3);
        let t0 = Instant::now();
        gate.arm(t0, ms(500));

        assert_eq!(gate.poll(t0 + ms(500), false), GateStatus::Retry);
        assert_eq!(gate.due(), Some(t0 + ms(600)));
        assert_eq!(gate.poll(t0 + ms(550), false), GateStatus::Waiting);
        assert_eq!(gate.poll(t0 + ms(600), false), GateStatus::Retry);
        assert_eq!(gate.poll(t0 + ms(700), false), GateStatus::GaveUp);
        assert_eq!(gate.poll(t0 + ms(800), true), GateStatus::Idle);
    }
}
