use std::time::{Duration, Instant};

/// Identifies the schedule a tick was issued under.
///
/// Every `schedule`/`cancel` moves to a new generation, so a tick that was
/// already queued before a pause, reset or restart no longer matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionToken(u64);

impl SessionToken {
    #[cfg(test)]
    pub fn generation(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy)]
struct Armed {
    token: SessionToken,
    next_due: Instant,
}

/// The single recurring tick of a session.
///
/// Polled from the event loop; at most one schedule is armed at a time.
#[derive(Debug, Clone)]
pub struct TickScheduler {
    interval: Duration,
    generation: u64,
    armed: Option<Armed>,
}

impl TickScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            generation: 0,
            armed: None,
        }
    }

    /// Cancel whatever was armed and arm a fresh schedule. The first tick is due immediately.
    pub fn schedule(&mut self, now: Instant) -> SessionToken {
        self.cancel();
        let token = SessionToken(self.generation);
        self.armed = Some(Armed {
            token,
            next_due: now,
        });
        token
    }

    /// Disarm. Tokens handed out so far become stale.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.armed = None;
    }

    /// Returns the token of a tick that is due at `now`, if any.
    ///
    /// A loop that fell behind gets a single tick and the schedule re-anchors
    /// on `now` instead of bursting through the missed ones.
    pub fn poll(&mut self, now: Instant) -> Option<SessionToken> {
        let armed = self.armed.as_mut()?;
        if now < armed.next_due {
            return None;
        }

        armed.next_due += self.interval;
        if armed.next_due <= now {
            armed.next_due = now + self.interval;
        }
        Some(armed.token)
    }

    pub fn is_current(&self, token: SessionToken) -> bool {
        self.armed.is_some_and(|armed| armed.token == token)
    }

    #[cfg(test)]
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(m: u64) -> Duration {
        Duration::from_millis(m)
    }

    #[test]
    fn nothing_is_due_before_scheduling() {
        let mut s = TickScheduler::new(ms(250));
        assert_eq!(s.poll(Instant::now()), None);
        assert!(!s.is_armed());
    }

    #[test]
    fn first_tick_is_immediate_then_every_interval() {
        let t0 = Instant::now();
        let mut s = TickScheduler::new(ms(250));
        let token = s.schedule(t0);

        assert_eq!(s.poll(t0), Some(token));
        assert_eq!(s.poll(t0 + ms(100)), None);
        assert_eq!(s.poll(t0 + ms(250)), Some(token));
        assert_eq!(s.poll(t0 + ms(260)), None);
    }

    #[test]
    fn late_poll_fires_once_without_burst() {
        let t0 = Instant::now();
        let mut s = TickScheduler::new(ms(250));
        s.schedule(t0);
        s.poll(t0);

        assert!(s.poll(t0 + ms(5_000)).is_some());
        assert_eq!(s.poll(t0 + ms(5_001)), None);
        assert!(s.poll(t0 + ms(5_250)).is_some());
    }

    #[test]
    fn rescheduling_invalidates_older_tokens() {
        let t0 = Instant::now();
        let mut s = TickScheduler::new(ms(250));
        let first = s.schedule(t0);
        let second = s.schedule(t0);

        assert_ne!(first, second);
        assert!(!s.is_current(first));
        assert!(s.is_current(second));
    }

    #[test]
    fn cancel_stops_ticks_and_stales_the_token() {
        let t0 = Instant::now();
        let mut s = TickScheduler::new(ms(250));
        let token = s.schedule(t0);
        s.cancel();

        assert!(!s.is_current(token));
        assert_eq!(s.poll(t0 + ms(1_000)), None);
    }

    #[test]
    fn generations_only_grow() {
        let t0 = Instant::now();
        let mut s = TickScheduler::new(ms(250));
        let a = s.schedule(t0);
        s.cancel();
        let b = s.schedule(t0);
        assert!(b.generation() > a.generation());
    }
}
