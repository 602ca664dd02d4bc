//! Cancellable long-press timer.
//!
//! The timer is deadline based: the owner polls it with the current time, or
//! an external scheduler fires it with the token handed out by `start`. Each
//! start bumps a generation counter, so a firing meant for an earlier gesture
//! is ignored.

use std::time::Duration;

// Use web-time on WASM, std::time otherwise
#[cfg(not(target_arch = "wasm32"))]
pub use std::time::Instant;
#[cfg(target_arch = "wasm32")]
pub use web_time::Instant;

/// Default long-press delay in milliseconds.
pub const LONG_PRESS_MS: u64 = 600;

/// Identifies one start of the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken(u64);

impl TimerToken {
    pub fn generation(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    deadline: Instant,
    generation: u64,
}

/// A single-shot delayed action with cancel-before-fire.
#[derive(Debug, Clone)]
pub struct LongPressTimer {
    delay: Duration,
    pending: Option<Pending>,
    generation: u64,
}

impl Default for LongPressTimer {
    fn default() -> Self {
        Self::new(Duration::from_millis(LONG_PRESS_MS))
    }
}

impl LongPressTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
            generation: 0,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Arm the timer at `now`, replacing any earlier pending start.
    pub fn start(&mut self, now: Instant) -> TimerToken {
        self.generation = self.generation.wrapping_add(1);
        self.pending = Some(Pending {
            deadline: now + self.delay,
            generation: self.generation,
        });
        TimerToken(self.generation)
    }

    /// Disarm the timer. No effect if it already fired or was never started.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Check if the timer is armed and has not fired yet.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Fire if the deadline has passed. Returns true exactly once per start.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.pending {
            Some(pending) if now >= pending.deadline => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Fire on behalf of an external scheduler.
    ///
    /// Only the token from the most recent start can fire, and only while that
    /// start is still pending.
    pub fn fire(&mut self, token: TimerToken) -> bool {
        match self.pending {
            Some(pending) if pending.generation == token.0 => {
                self.pending = None;
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
    fn test_fires_after_deadline() {
        let mut timer = LongPressTimer::default();
        let t0 = Instant::now();
        timer.start(t0);
        assert!(!timer.poll(t0 + Duration::from_millis(599)));
        assert!(timer.poll(t0 + Duration::from_millis(600)));
        // Single shot.
        assert!(!timer.poll(t0 + Duration::from_millis(700)));
    }

    #[test]
    fn test_cancel_before_fire() {
        let mut timer = LongPressTimer::default();
        let t0 = Instant::now();
        let token = timer.start(t0);
        timer.cancel();
        assert!(!timer.is_pending());
        assert!(!timer.poll(t0 + Duration::from_secs(5)));
        assert!(!timer.fire(token));
    }

    #[test]
    fn test_stale_token_ignored() {
        let mut timer = LongPressTimer::new(Duration::from_millis(10));
        let t0 = Instant::now();
        let first = timer.start(t0);
        let second = timer.start(t0);
        assert_ne!(first, second);
        assert!(!timer.fire(first));
        assert!(timer.fire(second));
        assert!(!timer.fire(second));
    }
}
