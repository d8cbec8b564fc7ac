use crate::coords::{Rect, Vec2};

use super::Color;

/// Gradient spread behavior outside the [0, 1] range.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SpreadMode {
    /// Clamp to edge stops.
    Pad,
    /// Repeat the gradient pattern.
    Repeat,
    /// Mirror-repeat the gradient pattern.
    Reflect,
}

/// A single gradient stop.
///
/// `t` is expected in [0, 1] in typical usage, but is not strictly enforced.
/// Compositors may clamp/sort stops at build time.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorStop {
    pub t: f32,
    pub color: Color,
}

impl ColorStop {
    #[inline]
    pub const fn new(t: f32, color: Color) -> Self {
        Self { t, color }
    }
}

/// Linear gradient definition in logical pixel space.
///
/// Semantics:
/// - `start` and `end` are positions in the same coordinate space as geometry.
/// - Stops hold premultiplied linear colors.
/// - `spread` defines out-of-range behavior.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub start: Vec2,
    pub end: Vec2,
    pub stops: Vec<ColorStop>,
    pub spread: SpreadMode,
}

impl LinearGradient {
    pub fn new(start: Vec2, end: Vec2, stops: Vec<ColorStop>, spread: SpreadMode) -> Self {
        Self { start, end, stops, spread }
    }

    /// The travelling highlight band at sweep progress `t`.
    ///
    /// The band is a strip of `color` fading to transparent at both edges,
    /// perpendicular to `angle` (radians from +X, clockwise), `band` logical
    /// pixels wide along the travel direction. At `t = 0` its leading edge
    /// touches the rect from outside; at `t = 1` its trailing edge has left
    /// the opposite side. The off-edge endpoints are what make the sweep
    /// enter and exit cleanly instead of popping in.
    ///
    /// `t` outside [0, 1] is clamped. Degenerate inputs (empty rect,
    /// non-positive `band`) yield a gradient that fails [`is_valid`]
    /// rather than an error.
    ///
    /// [`is_valid`]: Self::is_valid
    pub fn sweep_band(rect: Rect, angle: f32, t: f32, color: Color, band: f32) -> Self {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let dir = Vec2::from_angle(angle);
        let center = rect.center();

        // Half-length of the rect's shadow on the travel axis.
        let half_span = 0.5 * Vec2::new(dir.x.abs(), dir.y.abs()).dot(rect.size);
        let band_half = band * 0.5;

        // Band center, measured along `dir` from the rect center. Travels
        // from fully before the rect to fully past it.
        let travel = half_span + band_half;
        let offset = -travel + t * (2.0 * travel);

        let start = center + dir * (offset - band_half);
        let end = center + dir * (offset + band_half);

        Self::new(
            start,
            end,
            vec![
                ColorStop::new(0.0, Color::transparent()),
                ColorStop::new(0.5, color),
                ColorStop::new(1.0, Color::transparent()),
            ],
            SpreadMode::Pad,
        )
    }

    /// Returns true when the gradient definition is structurally usable.
    ///
    /// Compositors may still impose additional constraints (minimum number of
    /// stops, sorting, etc.).
    pub fn is_valid(&self) -> bool {
        self.start.is_finite()
            && self.end.is_finite()
            && self.stops.iter().all(|s| s.t.is_finite() && s.color.is_finite())
            && self.stops.len() >= 2
            && (self.end.x != self.start.x || self.end.y != self.start.y)
    }
}
