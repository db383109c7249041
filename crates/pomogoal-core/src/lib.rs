//! # Pomogoal Core Library
//!
//! Core business logic for Pomogoal, a Pomodoro-style focus timer that
//! credits completed work sessions against a small set of daily goals.
//! The core is GUI-free; a thin presentation layer (the bundled CLI)
//! drives it through explicit calls and satisfies its outbound
//! notification capabilities.
//!
//! ## Architecture
//!
//! - **Timer Engine**: a tick-driven state machine cycling work and break
//!   phases; the scheduler that owns it calls `tick()` once per second
//! - **Goal Ledger**: up to five goals with daily-resetting progress,
//!   persisted to a flat JSON file after every mutation
//! - **Runtime**: an injected `Scheduler` capability plus the
//!   `Notifier`/`SoundCue` traits the presentation layer implements
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: work/break state machine
//! - [`GoalLedger`]: goal list, current-goal pointer, progress arithmetic
//! - [`GoalStore`]: JSON file persistence
//! - [`SessionRunner`]: wires engine, ledger and scheduler together

pub mod error;
pub mod events;
pub mod ledger;
pub mod runtime;
pub mod storage;
pub mod timer;

pub use error::{CoreError, Result, ValidationError};
pub use events::Event;
pub use ledger::{Goal, GoalLedger, GoalProgress, MAX_GOALS};
pub use runtime::{Notifier, Scheduler, SessionRunner, SoundCue, TickTask, TokioScheduler};
pub use storage::{GoalStore, PersistedLedger};
pub use timer::{Phase, TimerEngine, WORK_SESSION_HOURS};
