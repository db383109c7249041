//! Goal ledger: an ordered list of up to five goals plus the current-goal
//! pointer, persisted to a flat JSON file.
//!
//! Every mutating operation writes the file before returning, so the
//! on-disk state never trails memory by more than one operation. Write
//! failures propagate to the caller.

mod goal;

pub use goal::Goal;

use chrono::{Local, NaiveDate};

use crate::error::{CoreError, Result, ValidationError};
use crate::storage::{GoalStore, PersistedLedger};

/// Maximum number of goals a ledger holds.
pub const MAX_GOALS: usize = 5;
/// Lower bound for a goal's target hours.
pub const MIN_TARGET_HOURS: f64 = 1.0;
/// Upper bound for a goal's target hours.
pub const MAX_TARGET_HOURS: f64 = 12.0;

/// Progress of a single goal, as surfaced to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalProgress {
    pub completed_hours: f64,
    pub target_hours: f64,
    pub percent: f64,
}

/// The ordered goal collection and its current-goal pointer.
///
/// Insertion order is preserved: indices carry meaning for both display
/// and the "current" selection.
#[derive(Debug)]
pub struct GoalLedger {
    goals: Vec<Goal>,
    current: usize,
    store: GoalStore,
}

impl GoalLedger {
    /// Load persisted goals from `store`, or start empty when no file
    /// exists yet.
    ///
    /// Applies the daily reset rule to every loaded goal and writes the
    /// file back when the reset changed anything.
    pub fn load(store: GoalStore) -> Result<Self> {
        Self::load_at(store, today())
    }

    /// Same as [`GoalLedger::load`] with an explicit "today", so tests run
    /// against fixed dates.
    pub fn load_at(store: GoalStore, today: NaiveDate) -> Result<Self> {
        let mut ledger = match store.load()? {
            Some(state) => {
                // A hand-edited file may carry an out-of-range pointer;
                // clamp it instead of erroring.
                let current = if state.goals.is_empty() {
                    0
                } else {
                    state.current_goal_index.min(state.goals.len() - 1)
                };
                Self {
                    goals: state.goals,
                    current,
                    store,
                }
            }
            None => Self {
                goals: Vec::new(),
                current: 0,
                store,
            },
        };
        if ledger.apply_daily_reset(today) {
            ledger.persist()?;
        }
        Ok(ledger)
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_goal(&self) -> Option<&Goal> {
        self.goals.get(self.current)
    }

    /// Completed/target/percent for the goal at `index`.
    ///
    /// An empty ledger reports [`CoreError::EmptyLedger`] rather than
    /// `OutOfBounds`, so callers can tell "nothing to show" from a bad
    /// index.
    pub fn progress(&self, index: usize) -> Result<GoalProgress> {
        if self.goals.is_empty() {
            return Err(CoreError::EmptyLedger);
        }
        let goal = self.goals.get(index).ok_or(CoreError::OutOfBounds {
            index,
            len: self.goals.len(),
        })?;
        Ok(GoalProgress {
            completed_hours: goal.completed_hours,
            target_hours: goal.target_hours,
            percent: goal.percent_complete(),
        })
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Append a new goal. The first goal added becomes the current one.
    pub fn add(&mut self, name: &str, target_hours: f64) -> Result<()> {
        if self.goals.len() >= MAX_GOALS {
            return Err(CoreError::Capacity);
        }
        let name = validate_name(name)?;
        validate_target(target_hours)?;
        self.goals.push(Goal::new(name, target_hours, today()));
        if self.goals.len() == 1 {
            self.current = 0;
        }
        self.persist()
    }

    /// Rename a goal or change its target. Progress and `last_updated`
    /// are untouched.
    pub fn edit(&mut self, index: usize, name: &str, target_hours: f64) -> Result<()> {
        self.check_index(index)?;
        let name = validate_name(name)?;
        validate_target(target_hours)?;
        let goal = &mut self.goals[index];
        goal.name = name;
        goal.target_hours = target_hours;
        self.persist()
    }

    /// Remove the goal at `index`, clamping the current-goal pointer back
    /// into range when the removal invalidated it.
    pub fn delete(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        self.goals.remove(index);
        if self.current >= self.goals.len() {
            self.current = self.goals.len().saturating_sub(1);
        }
        self.persist()
    }

    /// Select the goal that session credit goes to.
    pub fn set_current(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        self.current = index;
        self.persist()
    }

    /// Credit `hours` to the current goal. No-op on an empty ledger.
    pub fn credit_current(&mut self, hours: f64) -> Result<()> {
        self.credit_current_at(hours, today())
    }

    /// Same as [`GoalLedger::credit_current`] with an explicit date.
    pub fn credit_current_at(&mut self, hours: f64, today: NaiveDate) -> Result<()> {
        let Some(goal) = self.goals.get_mut(self.current) else {
            return Ok(());
        };
        goal.completed_hours += hours;
        goal.last_updated = today;
        self.persist()
    }

    /// Zero `completed_hours` on every goal whose `last_updated` is not
    /// `today`. Returns true when any goal changed. Idempotent.
    pub fn apply_daily_reset(&mut self, today: NaiveDate) -> bool {
        let mut changed = false;
        for goal in &mut self.goals {
            changed |= goal.reset_if_stale(today);
        }
        changed
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.goals.len() {
            Ok(())
        } else {
            Err(CoreError::OutOfBounds {
                index,
                len: self.goals.len(),
            })
        }
    }

    fn persist(&self) -> Result<()> {
        self.store.save(&PersistedLedger {
            goals: self.goals.clone(),
            current_goal_index: self.current,
        })
    }
}

fn validate_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName.into());
    }
    Ok(trimmed.to_string())
}

fn validate_target(target_hours: f64) -> Result<()> {
    if (MIN_TARGET_HOURS..=MAX_TARGET_HOURS).contains(&target_hours) {
        Ok(())
    } else {
        Err(ValidationError::TargetOutOfRange {
            value: target_hours,
        }
        .into())
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
