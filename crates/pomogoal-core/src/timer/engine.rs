//! Session timer state machine.
//!
//! The engine holds no thread and no clock: the scheduler that owns it
//! calls `tick()` once per elapsed second while the engine is running.
//! A completed work phase credits the goal ledger passed into `tick`.
//!
//! ## Phase cycle
//!
//! ```text
//! Work -> (ShortBreak | LongBreak) -> Work -> ...
//! ```
//!
//! Every 4th completed work session is followed by a long break, and
//! completion restarts the engine, so cycles chain without a manual
//! resume once first started.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::events::Event;
use crate::ledger::GoalLedger;

/// Hours credited to the current goal per completed work session (25 min).
pub const WORK_SESSION_HOURS: f64 = 25.0 / 60.0;

/// Completed work sessions between long breaks.
const SESSIONS_PER_LONG_BREAK: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Work,
    ShortBreak,
    LongBreak,
}

impl Phase {
    /// Fixed duration of the phase in seconds.
    pub const fn duration_secs(self) -> u64 {
        match self {
            Phase::Work => 25 * 60,
            Phase::ShortBreak => 5 * 60,
            Phase::LongBreak => 15 * 60,
        }
    }

}

/// Core timer engine.
///
/// One instance lives for the whole process; `reset()` restores the
/// current phase's full duration but never destroys state.
#[derive(Debug, Clone)]
pub struct TimerEngine {
    phase: Phase,
    /// Remaining seconds in the current phase.
    remaining_secs: u64,
    is_running: bool,
    /// Completed work phases, incremented exactly once per completion.
    sessions_completed: u32,
}

impl TimerEngine {
    /// Fresh engine: work phase, full duration, stopped.
    pub fn new() -> Self {
        Self {
            phase: Phase::Work,
            remaining_secs: Phase::Work.duration_secs(),
            is_running: false,
            sessions_completed: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn sessions_completed(&self) -> u32 {
        self.sessions_completed
    }

    /// 0.0 .. 1.0 progress within the current phase.
    pub fn phase_progress(&self) -> f64 {
        let total = self.phase.duration_secs();
        1.0 - (self.remaining_secs as f64 / total as f64)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            is_running: self.is_running,
            sessions_completed: self.sessions_completed,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin ticking. No-op when already running.
    pub fn start(&mut self) -> Option<Event> {
        if self.is_running {
            return None;
        }
        self.is_running = true;
        Some(Event::TimerStarted {
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Stop ticking. No-op when not running.
    pub fn pause(&mut self) -> Option<Event> {
        if !self.is_running {
            return None;
        }
        self.is_running = false;
        Some(Event::TimerPaused {
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Stop and restore the current phase's full duration. Phase and
    /// session count are untouched.
    pub fn reset(&mut self) -> Event {
        self.is_running = false;
        self.remaining_secs = self.phase.duration_secs();
        Event::TimerReset {
            phase: self.phase,
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        }
    }

    /// One elapsed second. Ignored unless running.
    ///
    /// Reaching zero completes the phase: a finished work phase credits
    /// the ledger's current goal and picks the next break kind; a
    /// finished break returns to work. Returns the completion event when
    /// a phase ended on this tick.
    pub fn tick(&mut self, ledger: &mut GoalLedger) -> Result<Option<Event>> {
        if !self.is_running {
            return Ok(None);
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            return self.complete(ledger).map(Some);
        }
        Ok(None)
    }

    /// Invoked by the 60-second idle check armed on pause/reset. Purely
    /// observational: reports whether the engine is still stopped at fire
    /// time and mutates nothing.
    pub fn idle_check(&self) -> Option<Event> {
        if self.is_running {
            return None;
        }
        Some(Event::IdleReminder { at: Utc::now() })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn complete(&mut self, ledger: &mut GoalLedger) -> Result<Event> {
        self.is_running = false;
        let finished = self.phase;
        let next = if finished == Phase::Work {
            ledger.credit_current(WORK_SESSION_HOURS)?;
            self.sessions_completed += 1;
            // Evaluated after the increment: the 4th, 8th, ... session
            // earns the long break.
            if self.sessions_completed % SESSIONS_PER_LONG_BREAK == 0 {
                Phase::LongBreak
            } else {
                Phase::ShortBreak
            }
        } else {
            Phase::Work
        };
        self.phase = next;
        self.remaining_secs = next.duration_secs();
        // Auto-chain into the next phase without a manual resume.
        let _ = self.start();
        Ok(Event::PhaseCompleted {
            finished,
            next,
            sessions_completed: self.sessions_completed,
            at: Utc::now(),
        })
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new()
    }
}
