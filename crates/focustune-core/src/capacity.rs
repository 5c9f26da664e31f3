//! Capacity tracking: what the user can actually do, independent of what
//! the posterior prefers.
//!
//! A rolling window of recent sessions per context yields average
//! capacity, completion rate and a trend, which the recommender uses to
//! clamp a model recommendation down to a demonstrated ceiling or stretch
//! it for users on a roll.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::context::EnergyLevel;

/// Bound on the recent-sessions window.
pub const CAPACITY_WINDOW: usize = 10;
/// Minimum window size before the adjustment consults the stats.
pub const MIN_CAPACITY_SAMPLES: usize = 3;
/// Completion rate below which the recommendation is clamped to the
/// demonstrated average.
pub const CLAMP_COMPLETION_RATE: f64 = 0.5;
/// Stretch threshold at mid or unset energy.
pub const STRETCH_THRESHOLD_MID: f64 = 0.95;
/// Stretch threshold at high energy.
pub const STRETCH_THRESHOLD_HIGH: f64 = 0.85;
/// Trend slope band: outside +/- this value the trend is not stable.
pub const TREND_SLOPE_BAND: f64 = 0.05;

/// Direction of the recent capacity trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Growing,
    Stable,
    Declining,
}

/// One recorded session in the capacity window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSample {
    /// Arm the user selected, in minutes.
    pub selected: u32,
    /// Minutes actually focused.
    pub actual: f64,
    pub completed: bool,
    pub timestamp: DateTime<Utc>,
    /// Legacy field kept for old backups; carried through untouched.
    #[serde(rename = "timeOfDay", default, skip_serializing_if = "Option::is_none")]
    pub time_of_day: Option<serde_json::Value>,
}

impl SessionSample {
    pub fn new(selected: u32, actual: f64, completed: bool) -> Self {
        Self {
            selected,
            actual,
            completed,
            timestamp: Utc::now(),
            time_of_day: None,
        }
    }
}

/// Persisted capacity record for one context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityStats {
    /// Oldest first, bounded by [`CAPACITY_WINDOW`].
    pub recent_sessions: Vec<SessionSample>,
    pub average_capacity: f64,
    pub completion_rate: f64,
    pub trend: Trend,
}

impl Default for CapacityStats {
    fn default() -> Self {
        Self {
            recent_sessions: Vec::new(),
            average_capacity: 0.0,
            completion_rate: 0.0,
            trend: Trend::Stable,
        }
    }
}

impl CapacityStats {
    /// Append a session and recompute the derived stats.
    pub fn record(&mut self, sample: SessionSample) {
        self.recent_sessions.push(sample);
        if self.recent_sessions.len() > CAPACITY_WINDOW {
            let excess = self.recent_sessions.len() - CAPACITY_WINDOW;
            self.recent_sessions.drain(..excess);
        }
        self.recompute();
    }

    pub fn len(&self) -> usize {
        self.recent_sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recent_sessions.is_empty()
    }

    fn recompute(&mut self) {
        let n = self.recent_sessions.len();
        if n == 0 {
            self.average_capacity = 0.0;
            self.completion_rate = 0.0;
            self.trend = Trend::Stable;
            return;
        }
        self.average_capacity =
            self.recent_sessions.iter().map(|s| s.actual).sum::<f64>() / n as f64;
        self.completion_rate =
            self.recent_sessions.iter().filter(|s| s.completed).count() as f64 / n as f64;
        self.trend = self.compute_trend();
    }

    /// Least-squares slope over the per-session completion ratios.
    fn compute_trend(&self) -> Trend {
        if self.recent_sessions.len() < MIN_CAPACITY_SAMPLES {
            return Trend::Stable;
        }
        let ratios: Vec<f64> = self
            .recent_sessions
            .iter()
            .map(|s| {
                if s.selected == 0 {
                    0.0
                } else {
                    s.actual / s.selected as f64
                }
            })
            .collect();
        let n = ratios.len() as f64;
        let x_mean = (n - 1.0) / 2.0;
        let y_mean = ratios.iter().sum::<f64>() / n;
        let mut num = 0.0;
        let mut den = 0.0;
        for (i, y) in ratios.iter().enumerate() {
            let dx = i as f64 - x_mean;
            num += dx * (y - y_mean);
            den += dx * dx;
        }
        let slope = if den == 0.0 { 0.0 } else { num / den };
        if slope > TREND_SLOPE_BAND {
            Trend::Growing
        } else if slope < -TREND_SLOPE_BAND {
            Trend::Declining
        } else {
            Trend::Stable
        }
    }
}

/// The whole persisted capacity table: context key to stats.
pub type CapacityState = BTreeMap<String, CapacityStats>;

/// Round to the nearest multiple of 5, ties upward.
pub fn round_to_5(x: f64) -> u32 {
    ((x / 5.0).round() * 5.0).max(0.0) as u32
}

/// Apply the capacity correction to a model recommendation.
///
/// A failing user is clamped to their demonstrated ceiling; a reliably
/// completing user at mid or high energy gets a 5-minute stretch goal.
/// Low-energy users are never stretched.
pub fn adjust_for_capacity(model_rec: u32, stats: &CapacityStats, energy: EnergyLevel) -> u32 {
    if stats.len() < MIN_CAPACITY_SAMPLES {
        return model_rec;
    }
    if stats.completion_rate < CLAMP_COMPLETION_RATE {
        return round_to_5(stats.average_capacity).max(10);
    }
    if energy == EnergyLevel::Low {
        return model_rec;
    }
    let stretch_threshold = if energy == EnergyLevel::High {
        STRETCH_THRESHOLD_HIGH
    } else {
        STRETCH_THRESHOLD_MID
    };
    if stats.completion_rate >= stretch_threshold
        && matches!(stats.trend, Trend::Stable | Trend::Growing)
    {
        return model_rec + 5;
    }
    model_rec
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(selected: u32, actual: f64, completed: bool) -> SessionSample {
        SessionSample::new(selected, actual, completed)
    }

    #[test]
    fn window_is_bounded_and_drops_oldest() {
        let mut stats = CapacityStats::default();
        for i in 0..14 {
            stats.record(session(25, i as f64, true));
        }
        assert_eq!(stats.len(), CAPACITY_WINDOW);
        assert_eq!(stats.recent_sessions[0].actual, 4.0);
    }

    #[test]
    fn derived_stats_recompute_on_record() {
        let mut stats = CapacityStats::default();
        stats.record(session(20, 20.0, true));
        stats.record(session(20, 10.0, false));
        assert!((stats.average_capacity - 15.0).abs() < 1e-12);
        assert!((stats.completion_rate - 0.5).abs() < 1e-12);
        assert_eq!(stats.trend, Trend::Stable);
    }

    #[test]
    fn trend_requires_three_samples() {
        let mut stats = CapacityStats::default();
        stats.record(session(20, 5.0, false));
        stats.record(session(20, 20.0, true));
        assert_eq!(stats.trend, Trend::Stable);
    }

    #[test]
    fn growing_and_declining_trends() {
        let mut stats = CapacityStats::default();
        for actual in [10.0, 15.0, 20.0, 25.0] {
            stats.record(session(25, actual, true));
        }
        assert_eq!(stats.trend, Trend::Growing);

        let mut stats = CapacityStats::default();
        for actual in [25.0, 20.0, 15.0, 10.0] {
            stats.record(session(25, actual, true));
        }
        assert_eq!(stats.trend, Trend::Declining);
    }

    #[test]
    fn round_to_5_resolves_ties_upward() {
        assert_eq!(round_to_5(12.0), 10);
        assert_eq!(round_to_5(12.5), 15);
        assert_eq!(round_to_5(13.0), 15);
        assert_eq!(round_to_5(10.0), 10);
    }

    #[test]
    fn adjust_returns_model_rec_with_little_data() {
        let mut stats = CapacityStats::default();
        stats.record(session(40, 10.0, false));
        assert_eq!(adjust_for_capacity(40, &stats, EnergyLevel::Mid), 40);
    }

    #[test]
    fn adjust_clamps_failing_user_to_demonstrated_ceiling() {
        let mut stats = CapacityStats::default();
        for actual in [10.0, 12.0, 15.0, 12.0] {
            stats.record(session(40, actual, false));
        }
        let adjusted = adjust_for_capacity(40, &stats, EnergyLevel::Mid);
        assert_eq!(adjusted, round_to_5(stats.average_capacity).max(10));
        assert!(adjusted <= 15);
    }

    #[test]
    fn adjust_never_stretches_low_energy() {
        let mut stats = CapacityStats::default();
        for _ in 0..5 {
            stats.record(session(25, 25.0, true));
        }
        assert_eq!(adjust_for_capacity(25, &stats, EnergyLevel::Low), 25);
    }

    #[test]
    fn adjust_stretches_reliable_completer() {
        let mut stats = CapacityStats::default();
        for _ in 0..5 {
            stats.record(session(25, 25.0, true));
        }
        assert_eq!(adjust_for_capacity(25, &stats, EnergyLevel::Mid), 30);
        assert_eq!(adjust_for_capacity(25, &stats, EnergyLevel::High), 30);
    }

    #[test]
    fn adjust_respects_high_vs_mid_thresholds() {
        // 9 of 10 completed: rate 0.9 sits between the two thresholds.
        let mut stats = CapacityStats::default();
        for i in 0..10 {
            stats.record(session(25, 25.0, i != 0));
        }
        assert_eq!(adjust_for_capacity(25, &stats, EnergyLevel::Mid), 25);
        assert_eq!(adjust_for_capacity(25, &stats, EnergyLevel::High), 30);
    }

    #[test]
    fn declining_trend_blocks_stretch() {
        let mut stats = CapacityStats::default();
        for actual in [25.0, 22.0, 18.0, 14.0, 10.0] {
            stats.record(session(25, actual, true));
        }
        assert_eq!(stats.trend, Trend::Declining);
        assert_eq!(adjust_for_capacity(25, &stats, EnergyLevel::High), 25);
    }
}
