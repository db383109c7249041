//! Wires the timer engine, goal ledger, scheduler and presentation
//! callbacks together.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use crate::events::Event;
use crate::ledger::GoalLedger;
use crate::timer::{Phase, TimerEngine};

use super::scheduler::{Scheduler, TickTask};

/// Delay before the idle reminder fires after a pause or reset.
pub const IDLE_CHECK_SECS: u64 = 60;

/// Notification capability satisfied by the presentation layer.
pub trait Notifier: Send + Sync {
    /// A phase ran to completion. `finished` tells work apart from
    /// breaks.
    fn phase_completed(&self, finished: Phase, next: Phase);

    /// The engine was still stopped when a 60-second idle check fired.
    fn idle_reminder(&self);
}

/// Sound-cue trigger invoked on phase completion.
pub trait SoundCue: Send + Sync {
    fn play(&self);
}

/// Owns the single engine/ledger pair of the process and drives them
/// from an injected scheduler: a 1-second recurring tick while running,
/// and an independent 60-second one-shot idle check per pause/reset.
pub struct SessionRunner {
    engine: Mutex<TimerEngine>,
    ledger: Mutex<GoalLedger>,
    scheduler: Arc<dyn Scheduler>,
    notifier: Arc<dyn Notifier>,
    sound: Arc<dyn SoundCue>,
    tick_task: Mutex<Option<TickTask>>,
}

impl SessionRunner {
    pub fn new(
        ledger: GoalLedger,
        scheduler: Arc<dyn Scheduler>,
        notifier: Arc<dyn Notifier>,
        sound: Arc<dyn SoundCue>,
    ) -> Arc<Self> {
        Arc::new(Self {
            engine: Mutex::new(TimerEngine::new()),
            ledger: Mutex::new(ledger),
            scheduler,
            notifier,
            sound,
            tick_task: Mutex::new(None),
        })
    }

    /// Current engine state for display.
    pub fn snapshot(&self) -> Event {
        self.lock_engine().snapshot()
    }

    /// Run `f` against the ledger, e.g. for display of the goal list.
    pub fn with_ledger<T>(&self, f: impl FnOnce(&GoalLedger) -> T) -> T {
        f(&self.lock_ledger())
    }

    /// Start the engine and arm the recurring 1-second tick.
    pub fn start(self: &Arc<Self>) {
        if self.lock_engine().start().is_none() {
            return; // already running
        }
        let this = Arc::clone(self);
        let task = self
            .scheduler
            .every(Duration::from_secs(1), Box::new(move || this.on_tick()));
        if let Some(old) = self.lock_tick_task().replace(task) {
            old.cancel();
        }
    }

    /// Pause the engine, stop ticking and arm an idle check.
    pub fn pause(self: &Arc<Self>) {
        if self.lock_engine().pause().is_none() {
            return; // nothing was running
        }
        self.stop_ticking();
        self.arm_idle_check();
    }

    /// Reset the current phase, stop ticking and arm an idle check.
    pub fn reset(self: &Arc<Self>) {
        self.lock_engine().reset();
        self.stop_ticking();
        self.arm_idle_check();
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn on_tick(&self) {
        let completed = {
            let mut engine = self.lock_engine();
            let mut ledger = self.lock_ledger();
            match engine.tick(&mut ledger) {
                Ok(event) => event,
                Err(e) => {
                    // The scheduler callback has no caller to hand the
                    // persistence failure back to; surface it loudly.
                    tracing::error!("failed to persist session credit: {e}");
                    None
                }
            }
        };
        if let Some(Event::PhaseCompleted { finished, next, .. }) = completed {
            self.sound.play();
            self.notifier.phase_completed(finished, next);
        }
    }

    /// Arm a fresh one-shot. Each pause/reset arms its own; none is ever
    /// cancelled by a later start, so the check fires against whatever
    /// running-state it finds at that moment. A pause-resume-pause inside
    /// the window therefore gets its reminder early, off the first
    /// pause's timeout.
    fn arm_idle_check(self: &Arc<Self>) {
        let this = Arc::clone(self);
        self.scheduler.after(
            Duration::from_secs(IDLE_CHECK_SECS),
            Box::new(move || {
                if this.lock_engine().idle_check().is_some() {
                    this.notifier.idle_reminder();
                }
            }),
        );
    }

    fn stop_ticking(&self) {
        if let Some(task) = self.lock_tick_task().take() {
            task.cancel();
        }
    }

    fn lock_engine(&self) -> MutexGuard<'_, TimerEngine> {
        self.engine.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_ledger(&self) -> MutexGuard<'_, GoalLedger> {
        self.ledger.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_tick_task(&self) -> MutexGuard<'_, Option<TickTask>> {
        self.tick_task.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::GoalStore;
    use tempfile::TempDir;

    /// Test double that holds armed callbacks until the test fires them.
    #[derive(Default)]
    struct ManualScheduler {
        one_shots: Mutex<Vec<Box<dyn FnOnce() + Send>>>,
        recurring: Mutex<Vec<(Box<dyn FnMut() + Send>, TickTask)>>,
    }

    impl ManualScheduler {
        fn pending_one_shots(&self) -> usize {
            self.one_shots.lock().unwrap().len()
        }

        /// Fire the one-shot at `index`, consuming it.
        fn fire_one_shot(&self, index: usize) {
            let callback = self.one_shots.lock().unwrap().remove(index);
            callback();
        }

        /// Advance every live recurring callback by one period.
        fn tick(&self) {
            let mut recurring = self.recurring.lock().unwrap();
            for (callback, task) in recurring.iter_mut() {
                if !task.is_cancelled() {
                    callback();
                }
            }
        }

        fn tick_n(&self, n: usize) {
            for _ in 0..n {
                self.tick();
            }
        }
    }

    impl Scheduler for ManualScheduler {
        fn after(&self, _delay: Duration, callback: Box<dyn FnOnce() + Send>) {
            self.one_shots.lock().unwrap().push(callback);
        }

        fn every(&self, _period: Duration, callback: Box<dyn FnMut() + Send>) -> TickTask {
            let task = TickTask::new();
            self.recurring
                .lock()
                .unwrap()
                .push((callback, task.clone()));
            task
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        completions: Mutex<Vec<(Phase, Phase)>>,
        idle_reminders: Mutex<u32>,
    }

    impl Notifier for RecordingNotifier {
        fn phase_completed(&self, finished: Phase, next: Phase) {
            self.completions.lock().unwrap().push((finished, next));
        }

        fn idle_reminder(&self) {
            *self.idle_reminders.lock().unwrap() += 1;
        }
    }

    #[derive(Default)]
    struct CountingCue {
        plays: Mutex<u32>,
    }

    impl SoundCue for CountingCue {
        fn play(&self) {
            *self.plays.lock().unwrap() += 1;
        }
    }

    struct Fixture {
        _dir: TempDir,
        scheduler: Arc<ManualScheduler>,
        notifier: Arc<RecordingNotifier>,
        sound: Arc<CountingCue>,
        runner: Arc<SessionRunner>,
    }

    fn fixture(with_goal: bool) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let store = GoalStore::at_path(dir.path().join("goals.json"));
        let mut ledger = GoalLedger::load(store).unwrap();
        if with_goal {
            ledger.add("reading", 2.0).unwrap();
        }
        let scheduler = Arc::new(ManualScheduler::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let sound = Arc::new(CountingCue::default());
        let runner = SessionRunner::new(
            ledger,
            scheduler.clone(),
            notifier.clone(),
            sound.clone(),
        );
        Fixture {
            _dir: dir,
            scheduler,
            notifier,
            sound,
            runner,
        }
    }

    fn remaining(runner: &SessionRunner) -> u64 {
        match runner.snapshot() {
            Event::StateSnapshot { remaining_secs, .. } => remaining_secs,
            other => panic!("expected StateSnapshot, got {other:?}"),
        }
    }

    #[test]
    fn ticks_count_down_only_while_running() {
        let f = fixture(false);
        f.scheduler.tick(); // not started yet, no recurring task armed
        assert_eq!(remaining(&f.runner), 1500);

        f.runner.start();
        f.scheduler.tick_n(3);
        assert_eq!(remaining(&f.runner), 1497);

        f.runner.pause();
        f.scheduler.tick_n(5);
        assert_eq!(remaining(&f.runner), 1497);
    }

    #[test]
    fn completing_a_work_phase_notifies_and_plays_the_cue() {
        let f = fixture(true);
        f.runner.start();
        f.scheduler.tick_n(1500);

        assert_eq!(
            f.notifier.completions.lock().unwrap().as_slice(),
            &[(Phase::Work, Phase::ShortBreak)]
        );
        assert_eq!(*f.sound.plays.lock().unwrap(), 1);
        // Auto-chained: still ticking through the break.
        f.scheduler.tick_n(1);
        assert_eq!(remaining(&f.runner), 299);
        let credited = f
            .runner
            .with_ledger(|ledger| ledger.goals()[0].completed_hours);
        assert!((credited - 25.0 / 60.0).abs() < 1e-9);
    }

    #[test]
    fn pause_arms_an_idle_check_that_fires_when_still_stopped() {
        let f = fixture(false);
        f.runner.start();
        f.runner.pause();
        assert_eq!(f.scheduler.pending_one_shots(), 1);

        f.scheduler.fire_one_shot(0);
        assert_eq!(*f.notifier.idle_reminders.lock().unwrap(), 1);
    }

    #[test]
    fn idle_check_stays_quiet_once_running_again() {
        let f = fixture(false);
        f.runner.start();
        f.runner.pause();
        f.runner.start();

        f.scheduler.fire_one_shot(0);
        assert_eq!(*f.notifier.idle_reminders.lock().unwrap(), 0);
    }

    #[test]
    fn each_pause_and_reset_arms_an_independent_check() {
        let f = fixture(false);
        f.runner.start();
        f.runner.pause();
        f.runner.start();
        f.runner.pause();
        f.runner.reset();
        assert_eq!(f.scheduler.pending_one_shots(), 3);

        // The first pause's timeout fires against the current stopped
        // state and reminds early relative to the later pause.
        f.scheduler.fire_one_shot(0);
        assert_eq!(*f.notifier.idle_reminders.lock().unwrap(), 1);
    }

    #[test]
    fn pause_when_stopped_arms_nothing() {
        let f = fixture(false);
        f.runner.pause();
        assert_eq!(f.scheduler.pending_one_shots(), 0);
    }

    #[test]
    fn reset_restores_the_phase_and_stops_the_tick() {
        let f = fixture(false);
        f.runner.start();
        f.scheduler.tick_n(10);
        f.runner.reset();

        assert_eq!(remaining(&f.runner), 1500);
        f.scheduler.tick_n(5);
        assert_eq!(remaining(&f.runner), 1500);
        assert_eq!(f.scheduler.pending_one_shots(), 1);
    }
}
