use crate::paint::Color;

/// Sentinel for [`GlistenConfig::repeat_count`]: the sweep cycle never
/// terminates on its own.
pub const REPEAT_FOREVER: i32 = -1;

/// How many sweeps one cycle plays.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum RepeatBudget {
    Infinite,
    Finite(u32),
}

impl RepeatBudget {
    /// True when a sweep numbered `index` (1-based) may still start.
    #[inline]
    pub(crate) fn allows_start(self, index: u32) -> bool {
        match self {
            RepeatBudget::Infinite => true,
            RepeatBudget::Finite(n) => index <= n,
        }
    }
}

/// Timing and appearance parameters of the glisten effect.
///
/// All durations are in seconds; the angle is stored once, in radians, so the
/// radian and degree views can never drift apart. Out-of-range values are not
/// rejected here — the driver and the sweep geometry tolerate them and
/// degrade to instant or non-repeating visuals.
///
/// ```rust,ignore
/// let config = GlistenConfig::new()
///     .with_duration(0.75)
///     .with_interval(2.0)
///     .with_angle_degrees(45.0)
///     .with_repeat_count(3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GlistenConfig {
    initial_delay: f32,
    repeat_count: i32,
    interval: f32,
    duration: f32,
    angle: f32, // radians, canonical
    color: Color,
}

impl GlistenConfig {
    /// Defaults: no delay, repeat forever, a 0.5 s sweep every 3 s, 30° from
    /// horizontal, white highlight.
    pub fn new() -> Self {
        Self {
            initial_delay: 0.0,
            repeat_count: REPEAT_FOREVER,
            interval: 3.0,
            duration: 0.5,
            angle: std::f32::consts::FRAC_PI_6,
            color: Color::white(),
        }
    }

    // ── builder setters ───────────────────────────────────────────────────

    /// Seconds before the first sweep of a cycle. Negative values mean
    /// "no delay".
    pub fn with_initial_delay(mut self, v: f32) -> Self { self.initial_delay = v; self }

    /// Sweeps per cycle; [`REPEAT_FOREVER`] never stops on its own.
    pub fn with_repeat_count(mut self, v: i32) -> Self { self.repeat_count = v; self }

    /// Seconds between consecutive sweep *starts* (not completions).
    pub fn with_interval(mut self, v: f32) -> Self { self.interval = v; self }

    /// Seconds one sweep takes to cross the view.
    pub fn with_duration(mut self, v: f32) -> Self { self.duration = v; self }

    /// Sweep travel direction, radians from +X (clockwise, +Y down).
    pub fn with_angle(mut self, radians: f32) -> Self { self.angle = radians; self }

    /// Sweep travel direction in degrees. Stored as radians; reading either
    /// view returns the same underlying angle.
    pub fn with_angle_degrees(mut self, degrees: f32) -> Self {
        self.angle = degrees.to_radians();
        self
    }

    /// Highlight tint (premultiplied).
    pub fn with_color(mut self, v: Color) -> Self { self.color = v; self }

    // ── in-place setters ──────────────────────────────────────────────────

    pub fn set_initial_delay(&mut self, v: f32) { self.initial_delay = v; }
    pub fn set_repeat_count(&mut self, v: i32) { self.repeat_count = v; }
    pub fn set_interval(&mut self, v: f32) { self.interval = v; }
    pub fn set_duration(&mut self, v: f32) { self.duration = v; }
    pub fn set_angle(&mut self, radians: f32) { self.angle = radians; }
    pub fn set_angle_degrees(&mut self, degrees: f32) { self.angle = degrees.to_radians(); }
    pub fn set_color(&mut self, v: Color) { self.color = v; }

    // ── getters ───────────────────────────────────────────────────────────

    pub fn initial_delay(&self) -> f32 { self.initial_delay }
    pub fn repeat_count(&self) -> i32 { self.repeat_count }
    pub fn interval(&self) -> f32 { self.interval }
    pub fn duration(&self) -> f32 { self.duration }
    pub fn angle(&self) -> f32 { self.angle }
    pub fn angle_degrees(&self) -> f32 { self.angle.to_degrees() }
    pub fn color(&self) -> Color { self.color }

    /// The repeat budget the driver counts against.
    ///
    /// `REPEAT_FOREVER` is infinite; any other non-positive count collapses
    /// to zero sweeps (a degenerate but non-erroring cycle).
    pub(crate) fn budget(&self) -> RepeatBudget {
        if self.repeat_count == REPEAT_FOREVER {
            RepeatBudget::Infinite
        } else {
            RepeatBudget::Finite(self.repeat_count.max(0) as u32)
        }
    }
}

impl Default for GlistenConfig {
    fn default() -> Self {
        Self::new()
    }
}
