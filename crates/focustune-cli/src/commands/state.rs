//! Learned-state backup, restore and wipe.

use clap::Subcommand;
use std::path::PathBuf;

use focustune_core::{Config, StateSnapshot};

use super::open_recommender;

#[derive(Subcommand)]
pub enum StateAction {
    /// Print the whole learned state
    Show,
    /// Export the learned state as JSON
    Export {
        /// Write to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Replace the learned state from a JSON export
    Import {
        /// File produced by `state export`
        #[arg(long)]
        file: PathBuf,
    },
    /// Wipe all learned state
    Clear {
        /// Confirm the wipe
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(action: StateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut recommender = open_recommender(&config)?;

    match action {
        StateAction::Show => {
            let snapshot = recommender.export_state();
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        StateAction::Export { out } => {
            let snapshot = recommender.export_state();
            let json = serde_json::to_string_pretty(&snapshot)?;
            match out {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    println!("exported to {}", path.display());
                }
                None => println!("{json}"),
            }
        }
        StateAction::Import { file } => {
            let json = std::fs::read_to_string(&file)?;
            let snapshot: StateSnapshot = serde_json::from_str(&json)?;
            recommender.import_state(snapshot)?;
            println!("imported from {}", file.display());
        }
        StateAction::Clear { yes } => {
            if !yes {
                return Err("refusing to wipe learned state without --yes".into());
            }
            recommender.clear_all()?;
            println!("cleared");
        }
    }
    Ok(())
}
