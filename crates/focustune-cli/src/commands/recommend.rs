//! Recommendation commands: focus and break durations.

use clap::Subcommand;
use focustune_core::Config;

use super::{open_recommender, parse_context};

#[derive(Subcommand)]
pub enum RecommendAction {
    /// Recommend a focus duration for a context
    Focus {
        /// Task type (free text, normalised)
        #[arg(long, default_value = "")]
        task: String,
        /// Energy level (low/mid/high/unset)
        #[arg(long, default_value = "unset")]
        energy: String,
        /// Heuristic fallback minutes (defaults from config)
        #[arg(long)]
        heuristic: Option<u32>,
        /// Extra duration arm to consider (repeatable)
        #[arg(long = "arm")]
        arms: Vec<u32>,
    },
    /// Recommend a break to follow a focus session
    Break {
        #[arg(long, default_value = "")]
        task: String,
        #[arg(long, default_value = "unset")]
        energy: String,
        /// The focus duration the break follows
        #[arg(long)]
        focus_minutes: u32,
        /// Heuristic fallback minutes (defaults from config)
        #[arg(long)]
        heuristic: Option<u32>,
    },
}

pub fn run(action: RecommendAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut recommender = open_recommender(&config)?;

    let rec = match action {
        RecommendAction::Focus {
            task,
            energy,
            heuristic,
            arms,
        } => {
            let ctx = parse_context(&task, &energy)?;
            let heuristic = heuristic.unwrap_or(config.recommend.default_focus_minutes);
            recommender.recommend_focus(&ctx, heuristic, &arms)
        }
        RecommendAction::Break {
            task,
            energy,
            focus_minutes,
            heuristic,
        } => {
            let ctx = parse_context(&task, &energy)?;
            let heuristic = heuristic.unwrap_or(config.recommend.default_break_minutes);
            recommender.recommend_break(&ctx, heuristic, focus_minutes)
        }
    };

    println!("{}", serde_json::to_string_pretty(&rec)?);
    Ok(())
}
