//! The glisten animation core.
//!
//! [`GlistenConfig`] holds the user-tunable parameters; [`GlistenDriver`]
//! turns them into a repeating sweep cycle on top of the [`crate::time`]
//! timer queue. The driver is pure bookkeeping — it never draws and never
//! reads a clock of its own, so every behavior is unit-testable with
//! synthetic timestamps.

mod config;
mod driver;

pub use config::{GlistenConfig, REPEAT_FOREVER};
pub use driver::{GlistenDriver, GlistenEvent, Phase};
