//! Time subsystem.
//!
//! A deferred-callback queue for cooperative main-loop scheduling. There are
//! no background threads and no blocking waits: the host polls the queue with
//! monotonic timestamps and the queue hands back whatever came due.

mod timers;

pub use timers::{DueTimer, TimerId, Timers, deadline_after};
