use std::time::{Duration, Instant};

/// Handle to a scheduled timer, usable for targeted cancellation.
///
/// Ids are unique per [`Timers`] instance and never reused, so a stale handle
/// from a cancelled or fired timer can never cancel a later one by accident.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TimerId(u64);

/// A timer returned by [`Timers::pop_due`].
///
/// `deadline` is the instant the timer was scheduled for, not the instant it
/// was observed; follow-up scheduling anchored on `deadline` stays drift-free
/// even when the host ticks late.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DueTimer<T> {
    pub id: TimerId,
    pub deadline: Instant,
    pub payload: T,
}

#[derive(Debug)]
struct Entry<T> {
    id: TimerId,
    deadline: Instant,
    payload: T,
}

/// Slack applied when deciding a timer is due.
///
/// Deadlines are built from f32-second offsets, and follow-up deadlines chain
/// off previous ones, so a chained deadline can land a few nanoseconds past
/// the instant a host computes in a single conversion (`0.4 + 1.0` chained
/// vs. `1.4` direct). A timer may fire up to this much early; a boundary tick
/// must never miss one.
const DUE_SLACK: Duration = Duration::from_micros(500);

/// Cancellable one-shot timer queue driven by the host main loop.
///
/// All operations are synchronous. Once [`cancel`] or [`clear`] returns, the
/// affected timers are gone; nothing can fire them afterwards. That makes
/// "clear on stop" a structural guarantee against stale callbacks from a
/// superseded scheduling cycle, with no generation bookkeeping needed by
/// callers.
///
/// Ties on the same deadline fire in scheduling order.
///
/// [`cancel`]: Self::cancel
/// [`clear`]: Self::clear
#[derive(Debug)]
pub struct Timers<T> {
    entries: Vec<Entry<T>>,
    next_id: u64,
}

impl<T> Timers<T> {
    pub fn new() -> Self {
        Self { entries: Vec::new(), next_id: 0 }
    }

    /// Schedules `payload` to come due at `deadline`.
    pub fn schedule(&mut self, deadline: Instant, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry { id, deadline, payload });
        id
    }

    /// Cancels a pending timer, returning its payload if it was still queued.
    pub fn cancel(&mut self, id: TimerId) -> Option<T> {
        let idx = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(idx).payload)
    }

    /// Drops every pending timer.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Earliest pending deadline, for host wake-up scheduling.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.iter().map(|e| e.deadline).min()
    }

    /// Removes and returns the earliest timer due at `now`, within a
    /// sub-millisecond slack that absorbs float-seconds rounding in chained
    /// deadlines.
    ///
    /// Call in a loop to drain everything due this tick. The linear scan is
    /// fine at the queue sizes this crate produces (a handful of entries).
    pub fn pop_due(&mut self, now: Instant) -> Option<DueTimer<T>> {
        let horizon = now + DUE_SLACK;
        let mut best: Option<usize> = None;
        for (i, e) in self.entries.iter().enumerate() {
            if e.deadline > horizon {
                continue;
            }
            match best {
                Some(b) if self.entries[b].deadline <= e.deadline => {}
                _ => best = Some(i),
            }
        }
        let e = self.entries.remove(best?);
        Some(DueTimer { id: e.id, deadline: e.deadline, payload: e.payload })
    }
}

impl<T> Default for Timers<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// `now + seconds`, tolerating garbage offsets.
///
/// Negative, NaN, and infinite offsets clamp to `now` — out-of-range
/// configuration degrades to "immediately", never to an error.
pub fn deadline_after(now: Instant, seconds: f32) -> Instant {
    if seconds.is_finite() && seconds > 0.0 {
        now + Duration::from_secs_f32(seconds)
    } else {
        now
    }
}
