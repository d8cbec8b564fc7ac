//! Glisten view — an image view that repeatedly plays a light-sweep
//! highlight, similar to a glint on a coin when a bright light moves past it.
//!
//! The component owns its configuration and animation lifecycle; the host
//! toolkit owns the clock, the window, and the compositor. Integration is
//! three calls per frame plus two lifecycle hooks:
//!
//! ```rust,ignore
//! use glisten_view::{Compositor, GlisteningImage};
//!
//! let mut view = GlisteningImage::new();
//! view.load_from_memory(include_bytes!("coin.png"))?;
//! view.config_mut().set_angle_degrees(45.0);
//!
//! view.on_attached(now);            // window shown → highlight starts
//!
//! // each frame:
//! view.tick(now);                   // advance timers, fire completions
//! view.paint(&mut compositor, rect, now);
//!
//! view.on_detached();               // window hidden → highlight stops
//! ```
//!
//! Everything timing-related lives in `glisten-core`; this crate adds the
//! image, its alpha mask, the completion callback, and the [`Compositor`]
//! seam to the host rendering engine.

pub mod compositor;
pub mod mask;
pub mod view;

pub use compositor::Compositor;
pub use mask::AlphaMask;
pub use view::{CompletionCallback, GlisteningImage};

// Re-export the core primitives the public surface is expressed in.
pub use glisten_core::anim::{GlistenConfig, REPEAT_FOREVER};
pub use glisten_core::coords::{Rect, Vec2};
pub use glisten_core::paint::{Color, ColorStop, LinearGradient, SpreadMode};
