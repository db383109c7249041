mod engine;

pub use engine::{Phase, TimerEngine, WORK_SESSION_HOURS};
