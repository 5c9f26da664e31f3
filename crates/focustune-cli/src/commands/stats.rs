//! Diagnostics for learned state.

use clap::Subcommand;
use focustune_core::Config;

use super::{open_recommender, parse_context};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Posterior summary for a context's focus and break arms
    Model {
        #[arg(long, default_value = "")]
        task: String,
        #[arg(long, default_value = "unset")]
        energy: String,
    },
    /// Zone record for a context
    Zone {
        #[arg(long, default_value = "")]
        task: String,
        #[arg(long, default_value = "unset")]
        energy: String,
    },
    /// Capacity window for a context
    Capacity {
        #[arg(long, default_value = "")]
        task: String,
        #[arg(long, default_value = "unset")]
        energy: String,
    },
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let recommender = open_recommender(&config)?;

    match action {
        StatsAction::Model { task, energy } => {
            let ctx = parse_context(&task, &energy)?;
            let output = serde_json::json!({
                "focus": recommender.model_summary(&ctx),
                "break": recommender.break_summary(&ctx),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        StatsAction::Zone { task, energy } => {
            let ctx = parse_context(&task, &energy)?;
            match recommender.zone_data(&ctx) {
                Some(zone) => println!("{}", serde_json::to_string_pretty(zone)?),
                None => println!("no zone data for {ctx}"),
            }
        }
        StatsAction::Capacity { task, energy } => {
            let ctx = parse_context(&task, &energy)?;
            match recommender.capacity_stats(&ctx) {
                Some(stats) => println!("{}", serde_json::to_string_pretty(stats)?),
                None => println!("no capacity data for {ctx}"),
            }
        }
    }
    Ok(())
}
