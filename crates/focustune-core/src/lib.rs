//! # Focustune Core Library
//!
//! Core logic for the focustune adaptive focus-duration recommender.
//! Given a declared context (task kind + self-reported energy level) it
//! proposes a focus duration and a following break, observes the session
//! outcome, and updates an on-device model so future recommendations
//! converge on durations the user actually completes.
//!
//! This library follows a CLI-first philosophy: every operation is
//! available through the standalone `focustune-cli` binary, with richer
//! front-ends expected to be thin layers over the same core.
//!
//! ## Architecture
//!
//! - **Recommender**: the orchestrator behind the four external
//!   operations (recommend focus, recommend break, observe outcome,
//!   export/import state)
//! - **Sampler**: seedable Thompson Sampling over per-arm Beta posteriors
//! - **Zone governor**: restricts and migrates the arm set as preferences
//!   shift
//! - **Capacity tracker**: clamps or stretches recommendations based on
//!   recent completion behaviour
//! - **Storage**: SQLite-backed key/blob store for the three state tables
//!
//! ## Key Components
//!
//! - [`Recommender`]: entry point for collaborators
//! - [`StateStore`]: durable state persistence
//! - [`Config`]: CLI-facing configuration

pub mod capacity;
pub mod context;
pub mod error;
pub mod model;
pub mod recommender;
pub mod reward;
pub mod sampler;
pub mod storage;
pub mod zone;

pub use capacity::{
    adjust_for_capacity, round_to_5, CapacityState, CapacityStats, SessionSample, Trend,
    CAPACITY_WINDOW,
};
pub use context::{Context, EnergyLevel};
pub use error::{ConfigError, CoreError, StorageError};
pub use model::{
    best_mean_arm, total_observations, ArmPosterior, ContextModel, ModelState, ALPHA_PRIOR,
    BETA_PRIOR,
};
pub use recommender::{
    ArmSummary, Recommendation, RecommendationSource, Recommender, SessionOutcome, StateSnapshot,
    LEARNED_THRESHOLD, MODEL_MIN_OBSERVATIONS,
};
pub use reward::{
    compute_reward, scale_for_capacity, CompletionType, RewardInput, IDEAL_MAX,
    REJECTION_PENALTY, REWARD_RECOMMENDATION_BONUS, SPILLOVER_FACTOR, SPILLOVER_THRESHOLD,
};
pub use sampler::{Sampler, EARLY_THRESHOLD};
pub use storage::{Config, StateStore};
pub use zone::{
    detect_zone, permitted_breaks, Zone, ZoneData, ZoneState, ARMS_LONG, ARMS_SHORT, BREAK_ARMS,
    SELECTIONS_WINDOW, TRANSITION_DOWN_AVG, TRANSITION_UP_AVG, TRANSITION_WINDOW,
};
