//! Periodic tick scheduling
use std::fmt;
use std::time::{Duration, Instant};

/// Something that calls back into the game at a regular interval.
///
/// Scheduling hands out a handle; the game keeps at most one live handle and
/// cancels it before scheduling again.
pub(crate) trait TickSource {
    type Handle: Copy + fmt::Debug + Eq;

    /// Begin firing every `interval`, starting one `interval` from now
    fn schedule(&mut self, interval: Duration) -> Self::Handle;

    /// Stop the schedule identified by `handle`.  Stale handles are ignored.
    fn cancel(&mut self, handle: Self::Handle);

    /// Change the period of a live schedule without losing the time already
    /// waited since it last fired
    fn retime(&mut self, handle: Self::Handle, interval: Duration);
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct TickHandle(u64);

/// A [`TickSource`] driven by polling: the event loop asks for the next
/// [`deadline()`][Ticker::deadline], waits for input until then, and calls
/// [`fire()`][Ticker::fire].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Ticker {
    issued: u64,
    live: Option<Schedule>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Schedule {
    handle: TickHandle,
    interval: Duration,
    /// When the schedule was created or last fired
    anchor: Instant,
    next: Instant,
}

impl Ticker {
    pub(crate) fn new() -> Ticker {
        Ticker::default()
    }

    /// Return when the next tick is due, if anything is scheduled
    pub(crate) fn deadline(&self) -> Option<Instant> {
        self.live.map(|sched| sched.next)
    }

    /// Return whether a tick is due at `now`, advancing the schedule by one
    /// period if so.  A schedule that has fallen more than a period behind
    /// is re-anchored at `now` instead of firing a burst of catch-up ticks.
    pub(crate) fn fire(&mut self, now: Instant) -> bool {
        let Some(sched) = self.live.as_mut() else {
            return false;
        };
        if now < sched.next {
            return false;
        }
        sched.anchor = sched.next;
        sched.next += sched.interval;
        if sched.next <= now {
            sched.anchor = now;
            sched.next = now + sched.interval;
        }
        true
    }

    fn schedule_at(&mut self, interval: Duration, now: Instant) -> TickHandle {
        self.issued += 1;
        let handle = TickHandle(self.issued);
        self.live = Some(Schedule {
            handle,
            interval,
            anchor: now,
            next: now + interval,
        });
        handle
    }
}

impl TickSource for Ticker {
    type Handle = TickHandle;

    fn schedule(&mut self, interval: Duration) -> TickHandle {
        self.schedule_at(interval, Instant::now())
    }

    fn cancel(&mut self, handle: TickHandle) {
        if self.live.is_some_and(|sched| sched.handle == handle) {
            self.live = None;
        }
    }

    fn retime(&mut self, handle: TickHandle, interval: Duration) {
        if let Some(sched) = self.live.as_mut().filter(|sched| sched.handle == handle) {
            sched.interval = interval;
            sched.next = sched.anchor + interval;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn fires_once_per_interval() {
        let t0 = Instant::now();
        let mut ticker = Ticker::new();
        let _ = ticker.schedule_at(100 * MS, t0);
        assert_eq!(ticker.deadline(), Some(t0 + 100 * MS));
        assert!(!ticker.fire(t0 + 50 * MS), "fired early");
        assert!(ticker.fire(t0 + 100 * MS), "did not fire on time");
        assert!(!ticker.fire(t0 + 100 * MS), "fired twice");
        assert_eq!(ticker.deadline(), Some(t0 + 200 * MS));
        assert!(ticker.fire(t0 + 230 * MS), "did not fire late");
        assert_eq!(ticker.deadline(), Some(t0 + 300 * MS));
    }

    #[test]
    fn reanchors_when_far_behind() {
        let t0 = Instant::now();
        let mut ticker = Ticker::new();
        let _ = ticker.schedule_at(100 * MS, t0);
        assert!(ticker.fire(t0 + 500 * MS), "did not fire");
        assert_eq!(ticker.deadline(), Some(t0 + 600 * MS));
    }

    #[test]
    fn cancel() {
        let t0 = Instant::now();
        let mut ticker = Ticker::new();
        let h = ticker.schedule_at(100 * MS, t0);
        ticker.cancel(h);
        assert_eq!(ticker.deadline(), None);
        assert!(!ticker.fire(t0 + 100 * MS), "cancelled schedule fired");
    }

    #[test]
    fn cancel_stale_handle() {
        let t0 = Instant::now();
        let mut ticker = Ticker::new();
        let h1 = ticker.schedule_at(100 * MS, t0);
        ticker.cancel(h1);
        let h2 = ticker.schedule_at(50 * MS, t0);
        assert_ne!(h1, h2);
        ticker.cancel(h1);
        assert_eq!(ticker.deadline(), Some(t0 + 50 * MS));
    }

    #[test]
    fn schedule_restarts_phase() {
        let t0 = Instant::now();
        let mut ticker = Ticker::new();
        let h1 = ticker.schedule_at(142 * MS, t0);
        assert!(ticker.fire(t0 + 142 * MS), "did not fire");
        ticker.cancel(h1);
        let _ = ticker.schedule_at(111 * MS, t0 + 200 * MS);
        assert_eq!(ticker.deadline(), Some(t0 + 311 * MS));
    }

    #[test]
    fn retime_keeps_phase() {
        let t0 = Instant::now();
        let mut ticker = Ticker::new();
        let h = ticker.schedule_at(142 * MS, t0);
        assert!(ticker.fire(t0 + 142 * MS), "did not fire");
        ticker.retime(h, 111 * MS);
        assert_eq!(ticker.deadline(), Some(t0 + 253 * MS));
        assert!(ticker.fire(t0 + 253 * MS), "did not fire");
        assert_eq!(ticker.deadline(), Some(t0 + 364 * MS));
    }

    #[test]
    fn retime_stale_handle() {
        let t0 = Instant::now();
        let mut ticker = Ticker::new();
        let h1 = ticker.schedule_at(100 * MS, t0);
        ticker.cancel(h1);
        let _ = ticker.schedule_at(100 * MS, t0);
        ticker.retime(h1, 10 * MS);
        assert_eq!(ticker.deadline(), Some(t0 + 100 * MS));
    }
}
