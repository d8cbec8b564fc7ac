//! Glisten core crate.
//!
//! Platform-independent pieces of the glisten highlight effect: geometry and
//! paint primitives, the deferred-timer queue, and the animation driver that
//! turns a [`anim::GlistenConfig`] into a repeating light-sweep cycle.
//!
//! Nothing in this crate talks to a compositor or a window. The host (or the
//! `glisten-view` crate) owns the main loop and calls into the driver with
//! monotonic timestamps.

pub mod anim;
pub mod coords;
pub mod logging;
pub mod paint;
pub mod time;
