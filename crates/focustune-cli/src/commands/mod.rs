pub mod config;
pub mod recommend;
pub mod session;
pub mod state;
pub mod stats;

use focustune_core::{Config, Context, EnergyLevel, Recommender, StateStore};

/// Build the context from CLI flags.
pub fn parse_context(task: &str, energy: &str) -> Result<Context, Box<dyn std::error::Error>> {
    let energy = EnergyLevel::parse(energy)
        .ok_or_else(|| format!("unknown energy level '{energy}' (low/mid/high/unset)"))?;
    Ok(Context::new(task, energy))
}

/// Open the recommender over the default store, honouring a configured
/// sampler seed.
pub fn open_recommender(config: &Config) -> Result<Recommender, Box<dyn std::error::Error>> {
    let store = StateStore::open()?;
    Ok(Recommender::with_seed(store, config.sampler.seed))
}
