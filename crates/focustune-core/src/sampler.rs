//! Thompson Sampling over per-arm Beta posteriors.
//!
//! Beta draws use the Johnk generator: with two independent uniforms
//! `u, v`, form `x = u^(1/alpha)`, `y = v^(1/beta)`, accept when
//! `x + y <= 1` and return `x / (x + y)`. Acceptance falls as
//! `alpha + beta` grow, which is what bounds the generator to the
//! small-parameter regime this model produces; past the round cap the
//! posterior mean stands in.
//!
//! The generator is seedable so scenario tests are reproducible.

use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;

use crate::model::{total_observations, ArmPosterior, ContextModel};

/// Below this many observations the sampler explores uniformly instead of
/// trusting the Thompson draws.
pub const EARLY_THRESHOLD: f64 = 3.0;

/// Rejection rounds before a Beta draw falls back to the posterior mean.
const JOHNK_MAX_ROUNDS: usize = 200;

/// Seedable Beta sampler.
pub struct Sampler {
    rng: Mcg128Xsl64,
}

impl Sampler {
    /// Create a sampler seeded from entropy.
    pub fn new() -> Self {
        Self {
            rng: Mcg128Xsl64::from_entropy(),
        }
    }

    /// Create a sampler with a fixed seed (None = entropy).
    pub fn from_seed(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
            None => Mcg128Xsl64::from_entropy(),
        };
        Self { rng }
    }

    /// One draw from Beta(alpha, beta).
    pub fn sample_beta(&mut self, alpha: f64, beta: f64) -> f64 {
        for _ in 0..JOHNK_MAX_ROUNDS {
            let u: f64 = self.rng.gen();
            let v: f64 = self.rng.gen();
            let x = u.powf(1.0 / alpha);
            let y = v.powf(1.0 / beta);
            let sum = x + y;
            if sum > 0.0 && sum <= 1.0 {
                return x / sum;
            }
        }
        alpha / (alpha + beta)
    }

    /// Uniform pick from a non-empty arm slice.
    pub fn choose_uniform(&mut self, arms: &[u32]) -> u32 {
        arms[self.rng.gen_range(0..arms.len())]
    }

    /// Pick the best arm for a context by Thompson Sampling.
    ///
    /// While the context has fewer than [`EARLY_THRESHOLD`] total
    /// observations the pick is uniformly random, so tiny priors cannot
    /// lock in whichever arm happened to be tried first. Missing arms
    /// sample from the prior.
    pub fn best_action(&mut self, model: &ContextModel, arms: &[u32]) -> u32 {
        debug_assert!(!arms.is_empty());
        if total_observations(model) < EARLY_THRESHOLD {
            return self.choose_uniform(arms);
        }

        let prior = ArmPosterior::default();
        let mut best_arm = arms[0];
        let mut best_sample = f64::NEG_INFINITY;
        for arm in arms {
            let posterior = model.get(arm).unwrap_or(&prior);
            let sample = self.sample_beta(posterior.alpha, posterior.beta);
            if sample > best_sample {
                best_sample = sample;
                best_arm = *arm;
            }
        }
        best_arm
    }
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new()
    }
}
