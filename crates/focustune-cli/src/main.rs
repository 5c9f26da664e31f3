use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "focustune-cli", version, about = "Focustune CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Duration recommendations
    Recommend {
        #[command(subcommand)]
        action: commands::recommend::RecommendAction,
    },
    /// Session outcome reporting
    Session {
        #[command(subcommand)]
        action: commands::session::SessionAction,
    },
    /// Learned-state backup, restore and wipe
    State {
        #[command(subcommand)]
        action: commands::state::StateAction,
    },
    /// Diagnostics for learned state
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Recommend { action } => commands::recommend::run(action),
        Commands::Session { action } => commands::session::run(action),
        Commands::State { action } => commands::state::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
