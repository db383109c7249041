use clap::Subcommand;
use pomogoal_core::{GoalLedger, GoalStore};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Show total focused hours and per-goal progress
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let StatsAction::Show { json } = action;
    let ledger = GoalLedger::load(GoalStore::open_default()?)?;
    let total: f64 = ledger.goals().iter().map(|g| g.completed_hours).sum();

    if json {
        let goals: Vec<_> = ledger
            .goals()
            .iter()
            .map(|g| {
                serde_json::json!({
                    "name": g.name,
                    "completed_hours": g.completed_hours,
                    "target_hours": g.target_hours,
                    "percent": g.percent_complete(),
                })
            })
            .collect();
        let out = serde_json::json!({
            "total_hours_focused": total,
            "goals": goals,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("Total hours focused today: {total:.1}");
        for g in ledger.goals() {
            println!(
                "  {} - {:.1}/{:.1} hours ({:.1}%)",
                g.name,
                g.completed_hours,
                g.target_hours,
                g.percent_complete()
            );
        }
    }
    Ok(())
}
