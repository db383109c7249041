use clap::Subcommand;
use pomogoal_core::{GoalLedger, GoalStore};

#[derive(Subcommand)]
pub enum GoalAction {
    /// Add a goal (a ledger holds at most five)
    Add {
        /// Display name
        name: String,
        /// Target hours per day, between 1 and 12
        #[arg(long)]
        target: f64,
    },
    /// List goals with progress
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Rename a goal or change its target
    Edit {
        /// Zero-based goal index
        index: usize,
        /// New display name
        #[arg(long)]
        name: String,
        /// New target hours, between 1 and 12
        #[arg(long)]
        target: f64,
    },
    /// Remove a goal
    Delete {
        /// Zero-based goal index
        index: usize,
    },
    /// Select the goal that session credit goes to
    Select {
        /// Zero-based goal index
        index: usize,
    },
    /// Show completed/target/percent for one goal
    Progress {
        /// Zero-based goal index; defaults to the current goal
        index: Option<usize>,
    },
}

pub fn run(action: GoalAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut ledger = GoalLedger::load(GoalStore::open_default()?)?;
    match action {
        GoalAction::Add { name, target } => {
            ledger.add(&name, target)?;
            println!("Added goal '{}' ({target}h target)", name.trim());
        }
        GoalAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(ledger.goals())?);
            } else if ledger.is_empty() {
                println!("No goals yet");
            } else {
                for (i, goal) in ledger.goals().iter().enumerate() {
                    let marker = if i == ledger.current_index() { "*" } else { " " };
                    println!(
                        "{marker} [{i}] {} - {:.1}/{:.1} hours",
                        goal.name, goal.completed_hours, goal.target_hours
                    );
                }
            }
        }
        GoalAction::Edit {
            index,
            name,
            target,
        } => {
            ledger.edit(index, &name, target)?;
            println!("Updated goal {index}");
        }
        GoalAction::Delete { index } => {
            ledger.delete(index)?;
            println!("Deleted goal {index}");
        }
        GoalAction::Select { index } => {
            ledger.set_current(index)?;
            println!("Current goal: {}", ledger.goals()[index].name);
        }
        GoalAction::Progress { index } => {
            let index = index.unwrap_or_else(|| ledger.current_index());
            let progress = ledger.progress(index)?;
            println!(
                "{:.1}/{:.1} hours ({:.1}%)",
                progress.completed_hours, progress.target_hours, progress.percent
            );
        }
    }
    Ok(())
}
