//! Session outcome reporting.

use clap::Subcommand;
use focustune_core::{CompletionType, Config, SessionOutcome};

use super::{open_recommender, parse_context};

/// Skipped sessions shorter than this are not worth reporting.
const MIN_REPORTABLE_MINUTES: f64 = 1.0;

#[derive(Subcommand)]
pub enum SessionAction {
    /// Report the outcome of a finished (or abandoned) session
    Observe {
        #[arg(long, default_value = "")]
        task: String,
        #[arg(long, default_value = "unset")]
        energy: String,
        /// How the session ended (completed/skipped-focus/skipped-break)
        #[arg(long)]
        completion: String,
        /// The offered recommendation was accepted as-is
        #[arg(long)]
        accepted: bool,
        /// Focus minutes the user selected
        #[arg(long)]
        selected_focus: u32,
        /// Break minutes the user selected
        #[arg(long, default_value_t = 0)]
        selected_break: u32,
        /// Minutes actually focused
        #[arg(long)]
        focused: f64,
        /// Focus minutes the recommender offered
        #[arg(long, default_value_t = 0)]
        recommended: u32,
    },
    /// Penalise a recommendation the user dismissed outright
    Reject {
        #[arg(long, default_value = "")]
        task: String,
        #[arg(long, default_value = "unset")]
        energy: String,
        /// The dismissed focus duration
        #[arg(long)]
        arm: u32,
    },
}

fn parse_completion(s: &str) -> Result<CompletionType, Box<dyn std::error::Error>> {
    match s.trim().to_lowercase().replace('-', "_").as_str() {
        "completed" => Ok(CompletionType::Completed),
        "skipped_focus" => Ok(CompletionType::SkippedFocus),
        "skipped_break" => Ok(CompletionType::SkippedBreak),
        other => Err(format!(
            "unknown completion type '{other}' (completed/skipped-focus/skipped-break)"
        )
        .into()),
    }
}

pub fn run(action: SessionAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let mut recommender = open_recommender(&config)?;

    match action {
        SessionAction::Observe {
            task,
            energy,
            completion,
            accepted,
            selected_focus,
            selected_break,
            focused,
            recommended,
        } => {
            let ctx = parse_context(&task, &energy)?;
            let completion = parse_completion(&completion)?;
            if completion != CompletionType::Completed && focused < MIN_REPORTABLE_MINUTES {
                return Ok(());
            }
            let outcome = SessionOutcome {
                completion,
                accepted_recommendation: accepted,
                selected_focus_minutes: selected_focus,
                selected_break_minutes: selected_break,
                focused_minutes: focused,
                recommended_focus: recommended,
            };
            recommender.observe_outcome(&ctx, &outcome);
            println!("recorded");
        }
        SessionAction::Reject { task, energy, arm } => {
            let ctx = parse_context(&task, &energy)?;
            recommender.penalise_rejection(&ctx, arm);
            println!("recorded");
        }
    }
    Ok(())
}
