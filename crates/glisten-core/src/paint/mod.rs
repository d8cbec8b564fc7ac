//! Paint model for the highlight effect.
//!
//! Scope:
//! - color representation (linear premultiplied alpha)
//! - linear gradients, including the travelling sweep band
//!
//! Geometry types remain in `coords`.

pub mod color;
pub mod gradient;

pub use color::Color;
pub use gradient::{ColorStop, LinearGradient, SpreadMode};
