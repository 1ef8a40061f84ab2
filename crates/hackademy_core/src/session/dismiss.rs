//! Cancelable delayed dismissal of the suggestion popup after focus loss.

use std::time::{Duration, Instant};

/// Fire-and-cancel deadline polled by the session on every tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct DismissTimer {
    deadline: Option<Instant>,
}

impl DismissTimer {
    /// Arm (or re-arm) the timer to fire `delay` after `now`.
    pub(crate) fn schedule(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    /// Disarm the timer. Returns `true` if it was armed.
    pub(crate) fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Fire once the deadline has passed; a fired timer is disarmed.
    pub(crate) fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
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
    fn fires_once_after_deadline() {
        let start = Instant::now();
        let mut timer = DismissTimer::default();
        timer.schedule(start, Duration::from_millis(200));
        assert!(!timer.fire_if_due(start + Duration::from_millis(199)));
        assert!(timer.fire_if_due(start + Duration::from_millis(200)));
        assert!(!timer.fire_if_due(start + Duration::from_millis(400)));
    }

    #[test]
    fn cancel_prevents_firing() {
        let start = Instant::now();
        let mut timer = DismissTimer::default();
        timer.schedule(start, Duration::from_millis(200));
        assert!(timer.cancel());
        assert!(!timer.is_pending());
        assert!(!timer.fire_if_due(start + Duration::from_secs(1)));
        assert!(!timer.cancel());
    }
}
