use std::time::Instant;

use crate::time::{Timers, deadline_after};

use super::config::{GlistenConfig, RepeatBudget};

/// Where the driver is in its cycle.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Phase {
    /// No cycle running. Initial state and terminal state of every cycle.
    Idle,
    /// A cycle has started but the initial delay has not elapsed yet.
    Delaying,
    /// At least one sweep is in flight.
    Sweeping,
}

/// What happened during [`GlistenDriver::start`] or [`GlistenDriver::tick`].
///
/// Sweep indices are 1-based within the current cycle and reset every time
/// the cycle restarts.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum GlistenEvent {
    /// A sweep began crossing the view.
    SweepStarted { index: u32 },
    /// A sweep reached its full duration. Fired once per repetition, even
    /// when a later sweep visually truncated this one.
    SweepCompleted { index: u32 },
    /// The repeat budget is exhausted; the driver returned to [`Phase::Idle`].
    Finished,
}

/// Deferred work queued on the timer wheel.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Due {
    /// The initial delay elapsed; begin the first sweep (or finish an empty
    /// cycle).
    DelayElapsed,
    /// `interval` seconds passed since the previous sweep started.
    StartNext,
    /// A sweep ran for its full `duration`.
    SweepDone { index: u32 },
}

/// The glisten scheduling core.
///
/// Owns the configuration, the pending timers, and the cycle bookkeeping.
/// Single-threaded by construction: the host calls [`start`], [`stop`], and
/// [`tick`] from its main loop and nothing here blocks or spawns.
///
/// Cancellation is structural. Both [`stop`] and [`start`] clear the owned
/// timer queue before anything else, so a deferred callback scheduled by a
/// superseded cycle cannot fire later — there is no stale-timer window to
/// guard with generation counters.
///
/// [`start`]: Self::start
/// [`stop`]: Self::stop
/// [`tick`]: Self::tick
#[derive(Debug)]
pub struct GlistenDriver {
    config: GlistenConfig,
    timers: Timers<Due>,
    phase: Phase,
    highlighting: bool,
    /// Sweeps started in the current cycle (1-based index of the latest).
    starts_issued: u32,
    /// Sweeps completed in the current cycle.
    completions: u32,
    /// Start instant of the most recent sweep, for progress queries.
    sweep_started_at: Option<Instant>,
}

impl GlistenDriver {
    pub fn new(config: GlistenConfig) -> Self {
        Self {
            config,
            timers: Timers::new(),
            phase: Phase::Idle,
            highlighting: false,
            starts_issued: 0,
            completions: 0,
            sweep_started_at: None,
        }
    }

    pub fn config(&self) -> &GlistenConfig {
        &self.config
    }

    /// Reconfiguration takes effect at the next scheduling decision; timers
    /// already queued keep their deadlines.
    pub fn config_mut(&mut self) -> &mut GlistenConfig {
        &mut self.config
    }

    /// True from `start` until `stop` or budget exhaustion, including the
    /// whole initial-delay window.
    pub fn is_highlighting(&self) -> bool {
        self.highlighting
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Earliest instant at which [`tick`](Self::tick) has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Progress of the sweep currently crossing the view, in [0, 1].
    ///
    /// `None` while idle or delaying. A non-positive duration reads as
    /// already complete (degenerate instant sweep).
    pub fn progress(&self, now: Instant) -> Option<f32> {
        if self.phase != Phase::Sweeping {
            return None;
        }
        let started = self.sweep_started_at?;
        let duration = self.config.duration();
        if !(duration > 0.0) {
            return Some(1.0);
        }
        let elapsed = now.saturating_duration_since(started).as_secs_f32();
        Some((elapsed / duration).clamp(0.0, 1.0))
    }

    /// Begins (or restarts) a sweep cycle at `now`.
    ///
    /// Calling this mid-cycle cancels everything pending and restarts from
    /// the configured initial delay with a fresh repeat budget. A negative
    /// delay is treated as no delay. `is_highlighting` is true from this call
    /// on, even while delaying.
    pub fn start(&mut self, now: Instant) -> Vec<GlistenEvent> {
        // Drop any schedule left over from a previous cycle first.
        self.timers.clear();
        self.starts_issued = 0;
        self.completions = 0;
        self.sweep_started_at = None;
        self.highlighting = true;

        let mut events = Vec::new();
        let delay = self.config.initial_delay();
        if delay > 0.0 {
            log::debug!("glisten: cycle starts in {delay:.3}s");
            self.phase = Phase::Delaying;
            self.timers.schedule(deadline_after(now, delay), Due::DelayElapsed);
        } else {
            self.begin_cycle(now, &mut events);
        }
        events
    }

    /// Cancels the cycle: clears pending timers, drops the in-flight sweep,
    /// and returns to idle. Safe to call when not highlighting.
    pub fn stop(&mut self) {
        if self.highlighting {
            log::debug!(
                "glisten: stopped after {} of {} sweep(s)",
                self.completions,
                match self.config.budget() {
                    RepeatBudget::Infinite => "∞".to_string(),
                    RepeatBudget::Finite(n) => n.to_string(),
                }
            );
        }
        self.timers.clear();
        self.phase = Phase::Idle;
        self.highlighting = false;
        self.sweep_started_at = None;
    }

    /// Fires every timer due at `now`, in deadline order, and returns the
    /// resulting events.
    ///
    /// Follow-up timers are anchored on the fired timer's scheduled deadline
    /// rather than on `now`, so a late-ticking host does not accumulate
    /// drift across repetitions.
    pub fn tick(&mut self, now: Instant) -> Vec<GlistenEvent> {
        let mut events = Vec::new();
        while let Some(due) = self.timers.pop_due(now) {
            match due.payload {
                Due::DelayElapsed => self.begin_cycle(due.deadline, &mut events),
                Due::StartNext => self.begin_sweep(due.deadline, &mut events),
                Due::SweepDone { index } => self.complete_sweep(index, &mut events),
            }
        }
        events
    }

    // ── internals ─────────────────────────────────────────────────────────

    /// The delay window is over; play the first sweep, or finish immediately
    /// when the budget allows none.
    fn begin_cycle(&mut self, at: Instant, events: &mut Vec<GlistenEvent>) {
        if self.config.budget().allows_start(1) {
            self.begin_sweep(at, events);
        } else {
            self.finish(events);
        }
    }

    fn begin_sweep(&mut self, at: Instant, events: &mut Vec<GlistenEvent>) {
        self.starts_issued += 1;
        let index = self.starts_issued;
        self.phase = Phase::Sweeping;
        self.sweep_started_at = Some(at);
        log::trace!("glisten: sweep {index} started");

        // Completion is tied to this sweep's own start...
        self.timers.schedule(
            deadline_after(at, self.config.duration()),
            Due::SweepDone { index },
        );
        // ...and so is the next start, which is what lets repetitions overlap
        // (and truncate this one visually) when interval < duration.
        if self.config.budget().allows_start(index + 1) {
            self.timers.schedule(deadline_after(at, self.config.interval()), Due::StartNext);
        }

        events.push(GlistenEvent::SweepStarted { index });
    }

    fn complete_sweep(&mut self, index: u32, events: &mut Vec<GlistenEvent>) {
        self.completions += 1;
        log::trace!("glisten: sweep {index} completed");
        events.push(GlistenEvent::SweepCompleted { index });

        if let RepeatBudget::Finite(n) = self.config.budget() {
            if self.completions >= n {
                self.finish(events);
            }
        }
    }

    fn finish(&mut self, events: &mut Vec<GlistenEvent>) {
        log::debug!("glisten: cycle finished ({} sweep(s))", self.completions);
        self.timers.clear();
        self.phase = Phase::Idle;
        self.highlighting = false;
        self.sweep_started_at = None;
        events.push(GlistenEvent::Finished);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anim::REPEAT_FOREVER;
    use std::time::Duration;

    fn at(t0: Instant, s: f32) -> Instant {
        t0 + Duration::from_secs_f32(s)
    }

    fn driver(config: GlistenConfig) -> (GlistenDriver, Instant) {
        (GlistenDriver::new(config), Instant::now())
    }

    // ── start / stop observability ────────────────────────────────────────

    #[test]
    fn start_sets_highlighting_immediately_even_with_delay() {
        let (mut d, t0) = driver(GlistenConfig::new().with_initial_delay(2.0));
        d.start(t0);
        assert!(d.is_highlighting());
        assert_eq!(d.phase(), Phase::Delaying);
        assert_eq!(d.progress(t0), None);
    }

    #[test]
    fn stop_clears_highlighting_immediately() {
        let (mut d, t0) = driver(GlistenConfig::new());
        d.start(t0);
        d.stop();
        assert!(!d.is_highlighting());
        assert_eq!(d.phase(), Phase::Idle);
    }

    #[test]
    fn stop_when_idle_is_a_noop() {
        let (mut d, t0) = driver(GlistenConfig::new());
        d.stop();
        assert!(!d.is_highlighting());
        assert!(d.tick(at(t0, 100.0)).is_empty());
    }

    #[test]
    fn zero_delay_starts_sweeping_at_once() {
        let (mut d, t0) = driver(GlistenConfig::new().with_initial_delay(0.0));
        let events = d.start(t0);
        assert_eq!(events, vec![GlistenEvent::SweepStarted { index: 1 }]);
        assert_eq!(d.phase(), Phase::Sweeping);
    }

    #[test]
    fn negative_delay_means_no_delay() {
        let (mut d, t0) = driver(GlistenConfig::new().with_initial_delay(-4.0));
        let events = d.start(t0);
        assert_eq!(events, vec![GlistenEvent::SweepStarted { index: 1 }]);
        assert_eq!(d.phase(), Phase::Sweeping);
    }

    #[test]
    fn delay_elapses_through_tick() {
        let (mut d, t0) = driver(GlistenConfig::new().with_initial_delay(1.0));
        d.start(t0);
        assert!(d.tick(at(t0, 0.9)).is_empty());
        assert_eq!(d.phase(), Phase::Delaying);
        let events = d.tick(at(t0, 1.0));
        assert_eq!(events, vec![GlistenEvent::SweepStarted { index: 1 }]);
        assert_eq!(d.phase(), Phase::Sweeping);
    }

    // ── repetition schedule ───────────────────────────────────────────────

    #[test]
    fn repeats_anchor_on_previous_start_not_completion() {
        // delay=0, duration=0.5, interval=3.0, repeat=2:
        // sweep 1 at t=0, sweep 2 at t=3.0 (not 3.5), idle at t=3.5.
        let cfg = GlistenConfig::new()
            .with_initial_delay(0.0)
            .with_duration(0.5)
            .with_interval(3.0)
            .with_repeat_count(2);
        let (mut d, t0) = driver(cfg);

        assert_eq!(d.start(t0), vec![GlistenEvent::SweepStarted { index: 1 }]);
        assert_eq!(d.tick(at(t0, 0.5)), vec![GlistenEvent::SweepCompleted { index: 1 }]);
        assert!(d.is_highlighting());

        // Nothing happens between completion and the next interval boundary.
        assert!(d.tick(at(t0, 2.9)).is_empty());

        assert_eq!(d.tick(at(t0, 3.0)), vec![GlistenEvent::SweepStarted { index: 2 }]);
        assert_eq!(
            d.tick(at(t0, 3.5)),
            vec![GlistenEvent::SweepCompleted { index: 2 }, GlistenEvent::Finished]
        );
        assert!(!d.is_highlighting());
        assert_eq!(d.phase(), Phase::Idle);
    }

    #[test]
    fn finite_budget_yields_exactly_n_completions() {
        let cfg = GlistenConfig::new()
            .with_duration(0.25)
            .with_interval(1.0)
            .with_repeat_count(3);
        let (mut d, t0) = driver(cfg);
        d.start(t0);

        let mut completions = 0;
        for step in 0..200 {
            for ev in d.tick(at(t0, step as f32 * 0.05)) {
                if matches!(ev, GlistenEvent::SweepCompleted { .. }) {
                    completions += 1;
                }
            }
        }
        assert_eq!(completions, 3);
        assert!(!d.is_highlighting());
    }

    #[test]
    fn infinite_budget_keeps_repeating() {
        let cfg = GlistenConfig::new()
            .with_duration(0.5)
            .with_interval(1.0)
            .with_repeat_count(REPEAT_FOREVER);
        let (mut d, t0) = driver(cfg);
        d.start(t0);

        let mut completions = 0;
        for step in 1..=100 {
            for ev in d.tick(at(t0, step as f32 * 0.1)) {
                if matches!(ev, GlistenEvent::SweepCompleted { .. }) {
                    completions += 1;
                }
            }
        }
        // Sweeps start at 0, 1, 2, … and complete 0.5s later: ten in 10s.
        assert_eq!(completions, 10);
        assert!(d.is_highlighting());
    }

    #[test]
    fn overlapping_interval_truncates_but_still_completes() {
        // interval < duration: sweep 2 starts while sweep 1 is in flight.
        let cfg = GlistenConfig::new()
            .with_duration(1.0)
            .with_interval(0.4)
            .with_repeat_count(2);
        let (mut d, t0) = driver(cfg);
        d.start(t0);

        assert_eq!(d.tick(at(t0, 0.4)), vec![GlistenEvent::SweepStarted { index: 2 }]);
        // Sweep 1 still completes at its own start + duration.
        assert_eq!(d.tick(at(t0, 1.0)), vec![GlistenEvent::SweepCompleted { index: 1 }]);
        assert_eq!(
            d.tick(at(t0, 1.4)),
            vec![GlistenEvent::SweepCompleted { index: 2 }, GlistenEvent::Finished]
        );
    }

    #[test]
    fn nominal_boundary_ticks_miss_no_repetition() {
        // Sweep starts chain off each other while a host computes each tick
        // instant in a single f32 conversion; the rounding directions differ,
        // and every boundary tick must still catch its timer.
        let cfg = GlistenConfig::new()
            .with_duration(0.2)
            .with_interval(0.4)
            .with_repeat_count(5);
        let (mut d, t0) = driver(cfg);
        d.start(t0);

        let mut completions = 0;
        for step in 1..=20 {
            for ev in d.tick(at(t0, step as f32 * 0.2)) {
                if matches!(ev, GlistenEvent::SweepCompleted { .. }) {
                    completions += 1;
                }
            }
        }
        assert_eq!(completions, 5);
        assert!(!d.is_highlighting());
        assert_eq!(d.phase(), Phase::Idle);
    }

    #[test]
    fn zero_repeat_count_finishes_without_sweeping() {
        let cfg = GlistenConfig::new().with_repeat_count(0).with_initial_delay(1.0);
        let (mut d, t0) = driver(cfg);
        d.start(t0);
        assert!(d.is_highlighting());
        assert_eq!(d.tick(at(t0, 1.0)), vec![GlistenEvent::Finished]);
        assert!(!d.is_highlighting());
    }

    // ── cancellation / restart ────────────────────────────────────────────

    #[test]
    fn stale_timers_never_fire_after_stop() {
        // The canonical bug: a scheduled repetition surviving stop() and
        // flipping is_highlighting back on.
        let cfg = GlistenConfig::new()
            .with_duration(0.5)
            .with_interval(1.0)
            .with_repeat_count(REPEAT_FOREVER);
        let (mut d, t0) = driver(cfg);
        d.start(t0);
        d.tick(at(t0, 0.5)); // one completion, next start queued at t=1.0
        d.stop();

        assert!(d.tick(at(t0, 50.0)).is_empty());
        assert!(!d.is_highlighting());
        assert_eq!(d.next_deadline(), None);
    }

    #[test]
    fn restart_resets_the_repeat_budget() {
        let cfg = GlistenConfig::new()
            .with_duration(0.5)
            .with_interval(1.0)
            .with_repeat_count(2);
        let (mut d, t0) = driver(cfg);
        d.start(t0);
        assert_eq!(d.tick(at(t0, 0.5)), vec![GlistenEvent::SweepCompleted { index: 1 }]);

        // Restart mid-cycle: indices restart at 1 and the budget is full again.
        let t1 = at(t0, 0.7);
        assert_eq!(d.start(t1), vec![GlistenEvent::SweepStarted { index: 1 }]);

        // The first cycle's pending repetition (t0 + 1.0) must not fire.
        let events = d.tick(at(t1, 0.2));
        assert!(
            !events.contains(&GlistenEvent::SweepStarted { index: 2 }),
            "stale repetition from the superseded cycle fired: {events:?}"
        );

        let mut completions = 0;
        for step in 1..100 {
            for ev in d.tick(at(t1, step as f32 * 0.1)) {
                if matches!(ev, GlistenEvent::SweepCompleted { .. }) {
                    completions += 1;
                }
            }
        }
        assert_eq!(completions, 2);
        assert!(!d.is_highlighting());
    }

    // ── degenerate configurations ─────────────────────────────────────────

    #[test]
    fn zero_duration_completes_on_next_tick() {
        let cfg = GlistenConfig::new().with_duration(0.0).with_repeat_count(1);
        let (mut d, t0) = driver(cfg);
        d.start(t0);
        assert_eq!(d.progress(t0), Some(1.0));
        assert_eq!(
            d.tick(t0),
            vec![GlistenEvent::SweepCompleted { index: 1 }, GlistenEvent::Finished]
        );
    }

    #[test]
    fn nonsense_intervals_do_not_panic() {
        let cfg = GlistenConfig::new()
            .with_duration(f32::NAN)
            .with_interval(-3.0)
            .with_repeat_count(2);
        let (mut d, t0) = driver(cfg);
        d.start(t0);
        // Everything collapses to "immediately"; the cycle drains in one tick.
        let events = d.tick(t0);
        assert!(events.contains(&GlistenEvent::Finished));
        assert!(!d.is_highlighting());
    }

    // ── progress ──────────────────────────────────────────────────────────

    #[test]
    fn progress_tracks_the_sweep_linearly() {
        let cfg = GlistenConfig::new().with_duration(2.0).with_repeat_count(1);
        let (mut d, t0) = driver(cfg);
        d.start(t0);
        assert_eq!(d.progress(t0), Some(0.0));
        assert_eq!(d.progress(at(t0, 1.0)), Some(0.5));
        assert_eq!(d.progress(at(t0, 2.0)), Some(1.0));
        // Past the end but not yet ticked: clamped, not wrapped.
        assert_eq!(d.progress(at(t0, 3.0)), Some(1.0));

        d.tick(at(t0, 2.0));
        assert_eq!(d.progress(at(t0, 2.0)), None);
    }
}
