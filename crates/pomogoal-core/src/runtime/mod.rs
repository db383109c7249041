//! Scheduling and side-effect wiring around the timer engine.
//!
//! The core never touches the wall clock directly. Callers inject a
//! [`Scheduler`] and the engine logic stays testable by firing callbacks
//! synchronously.

mod runner;
mod scheduler;

pub use runner::{Notifier, SessionRunner, SoundCue, IDLE_CHECK_SECS};
pub use scheduler::{Scheduler, TickTask, TokioScheduler};
