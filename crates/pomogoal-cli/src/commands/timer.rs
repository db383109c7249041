use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use clap::Subcommand;
use pomogoal_core::{
    Event, GoalLedger, GoalStore, Notifier, Phase, SessionRunner, SoundCue, TokioScheduler,
};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run work/break cycles until interrupted (Ctrl+C)
    Run,
}

/// Prints phase-transition and idle messages to the terminal.
struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn phase_completed(&self, finished: Phase, next: Phase) {
        match finished {
            Phase::Work => match next {
                Phase::LongBreak => println!("\nTime's up! Take a long break."),
                _ => println!("\nTime's up! Take a short break."),
            },
            _ => println!("\nBreak's over! Time to work."),
        }
    }

    fn idle_reminder(&self) {
        println!("\nStill paused? Don't forget to resume!");
    }
}

/// Terminal bell on phase completion.
struct TerminalBell;

impl SoundCue for TerminalBell {
    fn play(&self) {
        print!("\x07");
        let _ = std::io::stdout().flush();
    }
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TimerAction::Run => run_session(),
    }
}

fn run_session() -> Result<(), Box<dyn std::error::Error>> {
    let ledger = GoalLedger::load(GoalStore::open_default()?)?;
    if let Some(goal) = ledger.current_goal() {
        println!("Current goal: {}", goal.name);
    } else {
        println!("No goals yet; sessions will still be counted");
    }

    let rt = tokio::runtime::Runtime::new()?;
    let scheduler = Arc::new(TokioScheduler::new(rt.handle().clone()));
    let runner = SessionRunner::new(
        ledger,
        scheduler,
        Arc::new(TerminalNotifier),
        Arc::new(TerminalBell),
    );

    runner.start();
    rt.block_on(async {
        let mut status = tokio::time::interval(Duration::from_secs(1));
        loop {
            tokio::select! {
                _ = status.tick() => print_status(&runner.snapshot()),
                _ = tokio::signal::ctrl_c() => break,
            }
        }
    });
    println!();
    Ok(())
}

fn print_status(snapshot: &Event) {
    if let Event::StateSnapshot {
        phase,
        remaining_secs,
        sessions_completed,
        ..
    } = snapshot
    {
        let label = match phase {
            Phase::Work => "Work",
            Phase::ShortBreak => "Short break",
            Phase::LongBreak => "Long break",
        };
        print!(
            "\r{label} {:02}:{:02}  (sessions: {sessions_completed})   ",
            remaining_secs / 60,
            remaining_secs % 60
        );
        let _ = std::io::stdout().flush();
    }
}
