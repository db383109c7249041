use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One tracked objective.
///
/// `completed_hours` accumulates in fractional increments (one work
/// session is 25/60 hours) and resets whenever a new calendar day begins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub name: String,
    /// Target hours per day, constrained to [1, 12] at creation/edit time.
    pub target_hours: f64,
    pub completed_hours: f64,
    /// Calendar date of the last mutation; drives the daily reset rule.
    pub last_updated: NaiveDate,
}

impl Goal {
    pub fn new(name: impl Into<String>, target_hours: f64, today: NaiveDate) -> Self {
        Self {
            name: name.into(),
            target_hours,
            completed_hours: 0.0,
            last_updated: today,
        }
    }

    /// Zero `completed_hours` when the goal was last touched on an earlier
    /// day. Returns true when anything changed.
    pub fn reset_if_stale(&mut self, today: NaiveDate) -> bool {
        if self.last_updated == today {
            return false;
        }
        self.completed_hours = 0.0;
        self.last_updated = today;
        true
    }

    pub fn percent_complete(&self) -> f64 {
        self.completed_hours / self.target_hours * 100.0
    }
}
