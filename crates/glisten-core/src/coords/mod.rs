//! Coordinate and geometry types shared across the crate.
//!
//! Canonical space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down
//!
//! Angles are measured in radians from the +X axis, increasing clockwise
//! (because +Y points down).

mod rect;
mod vec2;

pub use rect::Rect;
pub use vec2::Vec2;
