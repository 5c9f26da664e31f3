//! Per-arm Beta posteriors and the persisted model state.
//!
//! Each context owns a small map from arm minutes to a `(alpha, beta)`
//! pair. The prior is deliberately pessimistic (mean 0.4) so that a single
//! lucky sample on an unexplored arm cannot beat a proven winner.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Prior alpha for every arm posterior.
pub const ALPHA_PRIOR: f64 = 1.0;
/// Prior beta for every arm posterior. Prior mean is 1.0 / 2.5 = 0.4.
pub const BETA_PRIOR: f64 = 1.5;

/// Beta posterior for one arm.
///
/// Invariant: `alpha >= ALPHA_PRIOR` and `beta >= BETA_PRIOR` at all
/// times; no observation path ever decreases either parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArmPosterior {
    pub alpha: f64,
    pub beta: f64,
}

impl Default for ArmPosterior {
    fn default() -> Self {
        Self {
            alpha: ALPHA_PRIOR,
            beta: BETA_PRIOR,
        }
    }
}

impl ArmPosterior {
    /// Posterior mean `alpha / (alpha + beta)`.
    pub fn mean(&self) -> f64 {
        self.alpha / (self.alpha + self.beta)
    }

    /// Number of observations absorbed into this posterior.
    pub fn observations(&self) -> f64 {
        self.alpha + self.beta - ALPHA_PRIOR - BETA_PRIOR
    }

    /// Absorb a reward in [0, 1].
    ///
    /// Non-finite and exactly-zero rewards are ignored; out-of-range
    /// rewards are clamped.
    pub fn record(&mut self, reward: f64) {
        if !reward.is_finite() || reward == 0.0 {
            return;
        }
        let r = reward.clamp(0.0, 1.0);
        self.alpha += r;
        self.beta += 1.0 - r;
    }

    /// Alpha-only fractional update used by spillover.
    ///
    /// Raises the posterior mean without adding failure mass, so a
    /// neighbouring arm becomes worth trying sooner.
    pub fn boost(&mut self, amount: f64) {
        if !amount.is_finite() || amount <= 0.0 {
            return;
        }
        self.alpha += amount;
    }

    /// Beta-only update used by the rejection penalty.
    ///
    /// The magnitude of `amount` is added to beta; alpha is untouched, so
    /// the prior floors are preserved.
    pub fn penalise(&mut self, amount: f64) {
        if !amount.is_finite() || amount == 0.0 {
            return;
        }
        self.beta += amount.abs();
    }
}

/// Posteriors for one context, keyed by arm minutes.
///
/// An ordered map keeps iteration deterministic, which the seeded
/// sampler relies on.
pub type ContextModel = BTreeMap<u32, ArmPosterior>;

/// The whole persisted model table: context key to per-arm posteriors.
pub type ModelState = BTreeMap<String, ContextModel>;

/// Total observations across all arms of a context.
pub fn total_observations(model: &ContextModel) -> f64 {
    model.values().map(|p| p.observations()).sum()
}

/// The observed arm with the highest posterior mean, if any arm has been
/// observed at all.
pub fn best_mean_arm(model: &ContextModel) -> Option<(u32, f64)> {
    model
        .iter()
        .filter(|(_, p)| p.observations() > 1e-9)
        .map(|(arm, p)| (*arm, p.mean()))
        .max_by(|a, b| a.1.total_cmp(&b.1))
}
