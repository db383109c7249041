use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "pomogoal", version, about = "Pomogoal CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Goal ledger management
    Goal {
        #[command(subcommand)]
        action: commands::goal::GoalAction,
    },
    /// Session timer
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Progress statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Goal { action } => commands::goal::run(action),
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Stats { action } => commands::stats::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
