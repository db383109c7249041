use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::Phase;

/// Every observable state change in the engine produces an Event.
/// The presentation layer renders them; tests assert on them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// A phase ran down to zero. `finished` tells "work session ended"
    /// apart from "break ended"; `next` is already counting down.
    PhaseCompleted {
        finished: Phase,
        next: Phase,
        sessions_completed: u32,
        at: DateTime<Utc>,
    },
    /// The 60-second idle check found the engine still stopped.
    IdleReminder {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        phase: Phase,
        remaining_secs: u64,
        is_running: bool,
        sessions_completed: u32,
        at: DateTime<Utc>,
    },
}
