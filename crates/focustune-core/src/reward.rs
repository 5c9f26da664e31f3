//! Reward computation: raw session outcomes to a scalar in [0, 1].

use serde::{Deserialize, Serialize};

/// Bonus for accepting the offered recommendation.
pub const REWARD_RECOMMENDATION_BONUS: f64 = 0.15;
/// Targets above this many minutes start losing reward.
pub const IDEAL_MAX: f64 = 60.0;
/// Completed-session rewards at or above this value spill over to the
/// next arm up.
pub const SPILLOVER_THRESHOLD: f64 = 0.80;
/// Fraction of the reward granted to the spillover neighbour.
pub const SPILLOVER_FACTOR: f64 = 0.30;
/// Weight written when the user dismisses a recommendation outright.
pub const REJECTION_PENALTY: f64 = -0.30;

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionType {
    /// Focus and break both ran to completion.
    Completed,
    /// The focus block was abandoned.
    SkippedFocus,
    /// Focus completed but the break was skipped.
    SkippedBreak,
}

/// Raw inputs to the reward function.
#[derive(Debug, Clone, Copy)]
pub struct RewardInput {
    pub completion: CompletionType,
    pub accepted_recommendation: bool,
    pub focused_minutes: f64,
    pub selected_minutes: f64,
    pub recommended_minutes: f64,
}

/// The duration the reward is measured against: the recommendation when
/// it was accepted, otherwise what the user dialled in.
pub fn target_minutes(input: &RewardInput) -> f64 {
    if input.accepted_recommendation {
        input.recommended_minutes
    } else {
        input.selected_minutes
    }
}

/// Deterministic reward in [0, 1].
///
/// Completion dominates, the completed fraction fills in the rest of the
/// branch band, accepting the recommendation earns a flat bonus, and
/// targets past [`IDEAL_MAX`] minutes are taxed.
pub fn compute_reward(input: &RewardInput) -> f64 {
    let target = target_minutes(input);
    let ratio = if target > 0.0 {
        (input.focused_minutes / target).min(1.0)
    } else {
        0.0
    };

    let base = match input.completion {
        CompletionType::SkippedFocus => 0.40 * ratio,
        CompletionType::SkippedBreak => 0.30 + 0.30 * ratio,
        CompletionType::Completed => 0.70 + 0.30 * ratio,
    };

    let mut reward = base;
    if input.accepted_recommendation {
        reward += REWARD_RECOMMENDATION_BONUS;
    }
    if target > IDEAL_MAX {
        reward -= 0.10 * ((target - IDEAL_MAX) / IDEAL_MAX).min(1.0);
    }
    reward.clamp(0.0, 1.0)
}

/// Scale a completed-session reward toward the user's recent capacity.
///
/// A user who reliably completes only short sessions should not accrue
/// full reward for one lucky completion of a much longer one. Targets at
/// or under the average pass through unchanged; beyond it the reward is
/// scaled by `average / target`, floored at half.
pub fn scale_for_capacity(reward: f64, target: f64, average_capacity: f64) -> f64 {
    if target <= 0.0 || average_capacity <= 0.0 || target <= average_capacity {
        return reward;
    }
    reward * (average_capacity / target).clamp(0.5, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(completion: CompletionType) -> RewardInput {
        RewardInput {
            completion,
            accepted_recommendation: false,
            focused_minutes: 25.0,
            selected_minutes: 25.0,
            recommended_minutes: 25.0,
        }
    }

    #[test]
    fn completed_full_session_without_acceptance() {
        let r = compute_reward(&input(CompletionType::Completed));
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn skipped_focus_scales_with_partial_time() {
        let mut i = input(CompletionType::SkippedFocus);
        i.focused_minutes = 12.5;
        let r = compute_reward(&i);
        assert!((r - 0.20).abs() < 1e-12);
    }

    #[test]
    fn skipped_break_band() {
        let r = compute_reward(&input(CompletionType::SkippedBreak));
        assert!((r - 0.60).abs() < 1e-12);
    }

    #[test]
    fn acceptance_bonus_applies_and_clamps() {
        let mut i = input(CompletionType::Completed);
        i.accepted_recommendation = true;
        assert_eq!(compute_reward(&i), 1.0);

        let mut i = input(CompletionType::SkippedBreak);
        i.accepted_recommendation = true;
        assert!((compute_reward(&i) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn target_follows_acceptance() {
        let mut i = input(CompletionType::Completed);
        i.recommended_minutes = 50.0;
        i.selected_minutes = 25.0;
        assert_eq!(target_minutes(&i), 25.0);
        i.accepted_recommendation = true;
        assert_eq!(target_minutes(&i), 50.0);
    }

    #[test]
    fn over_ambition_is_taxed() {
        let mut i = input(CompletionType::Completed);
        i.selected_minutes = 90.0;
        i.focused_minutes = 90.0;
        // Full completion, but target 90 loses 0.10 * 0.5.
        assert!((compute_reward(&i) - 0.95).abs() < 1e-12);
    }

    #[test]
    fn zero_target_yields_base_only() {
        let mut i = input(CompletionType::Completed);
        i.selected_minutes = 0.0;
        i.focused_minutes = 10.0;
        assert!((compute_reward(&i) - 0.70).abs() < 1e-12);
    }

    #[test]
    fn reward_is_always_in_unit_interval() {
        for completion in [
            CompletionType::Completed,
            CompletionType::SkippedFocus,
            CompletionType::SkippedBreak,
        ] {
            for focused in [0.0, 5.0, 25.0, 120.0] {
                for target in [0.0, 25.0, 90.0, 200.0] {
                    for accepted in [false, true] {
                        let r = compute_reward(&RewardInput {
                            completion,
                            accepted_recommendation: accepted,
                            focused_minutes: focused,
                            selected_minutes: target,
                            recommended_minutes: target,
                        });
                        assert!((0.0..=1.0).contains(&r));
                    }
                }
            }
        }
    }

    #[test]
    fn capacity_scaling_dampens_over_reach() {
        assert_eq!(scale_for_capacity(1.0, 20.0, 25.0), 1.0);
        assert!((scale_for_capacity(1.0, 50.0, 25.0) - 0.5).abs() < 1e-12);
        assert!((scale_for_capacity(1.0, 40.0, 30.0) - 0.75).abs() < 1e-12);
        // Unknown capacity passes through.
        assert_eq!(scale_for_capacity(0.9, 40.0, 0.0), 0.9);
    }
}
