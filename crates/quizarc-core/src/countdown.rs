//! Quiz countdown handle and the wall-clock pacer that drives it.

use std::time::{Duration, Instant};

/// Interval between countdown ticks.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Cancellable countdown handle.
///
/// There is exactly one per controller, so a second concurrent timer cannot
/// exist; `start` and `stop` are both idempotent.
#[derive(Debug, Clone, Default)]
pub struct Countdown {
    /// Whether ticks are being counted.
    running: bool,
    /// How many times the handle went from stopped to running.
    starts: u32,
    /// Paces ticks against the wall clock.
    pacer: TickPacer,
}

impl Countdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start ticking. Returns false if already running.
    pub fn start(&mut self) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        self.starts += 1;
        self.pacer.reset();
        true
    }

    /// Stop ticking. Returns false if already stopped.
    pub fn stop(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        self.pacer.reset();
        true
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Number of stopped-to-running transitions so far.
    pub fn starts(&self) -> u32 {
        self.starts
    }

    /// Whole ticks owed at `now`. Always 0 while stopped.
    pub fn due_ticks(&mut self, now: Instant) -> u32 {
        if !self.running {
            return 0;
        }
        self.pacer.due(now)
    }
}

/// Converts elapsed wall time into whole periods.
///
/// The first call anchors the pacer; later calls return the number of full
/// periods since the last anchor and carry the remainder over.
#[derive(Debug, Clone)]
pub struct TickPacer {
    period: Duration,
    anchor: Option<Instant>,
}

impl Default for TickPacer {
    fn default() -> Self {
        Self::new(TICK_PERIOD)
    }
}

impl TickPacer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            anchor: None,
        }
    }

    pub fn reset(&mut self) {
        self.anchor = None;
    }

    pub fn due(&mut self, now: Instant) -> u32 {
        let Some(anchor) = self.anchor else {
            self.anchor = Some(now);
            return 0;
        };

        let elapsed = now.saturating_duration_since(anchor);
        let ticks = (elapsed.as_millis() / self.period.as_millis().max(1)) as u32;
        if ticks > 0 {
            self.anchor = Some(anchor + self.period * ticks);
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_is_idempotent() {
        let mut countdown = Countdown::new();
        assert!(countdown.start());
        assert!(!countdown.start());
        assert!(countdown.is_running());
        assert_eq!(countdown.starts(), 1);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut countdown = Countdown::new();
        countdown.start();
        countdown.start();
        assert!(countdown.stop());
        assert!(!countdown.stop());
        assert!(!countdown.is_running());
    }

    #[test]
    fn test_stopped_countdown_owes_nothing() {
        let mut countdown = Countdown::new();
        let t0 = Instant::now();
        assert_eq!(countdown.due_ticks(t0), 0);
        assert_eq!(countdown.due_ticks(t0 + Duration::from_secs(5)), 0);
    }

    #[test]
    fn test_pacer_carries_remainder() {
        let mut pacer = TickPacer::default();
        let t0 = Instant::now();

        assert_eq!(pacer.due(t0), 0);
        assert_eq!(pacer.due(t0 + Duration::from_millis(900)), 0);
        assert_eq!(pacer.due(t0 + Duration::from_millis(1100)), 1);
        assert_eq!(pacer.due(t0 + Duration::from_millis(1900)), 0);
        assert_eq!(pacer.due(t0 + Duration::from_millis(3050)), 2);
    }

    #[test]
    fn test_restart_reanchors() {
        let mut countdown = Countdown::new();
        let t0 = Instant::now();
        countdown.start();
        countdown.due_ticks(t0);
        countdown.stop();
        countdown.start();

        // Time spent stopped is not owed.
        assert_eq!(countdown.due_ticks(t0 + Duration::from_secs(10)), 0);
        assert_eq!(countdown.due_ticks(t0 + Duration::from_secs(11)), 1);
        assert_eq!(countdown.starts(), 2);
    }
}
