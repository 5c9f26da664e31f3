//! Zone governor: restricts the action space to the regime the user is
//! operating in, and migrates between regimes on sustained drift.
//!
//! Learning over the full 10-60 minute range converges slowly; restricting
//! the arm set to a short or long zone narrows the search. The two zones
//! overlap at 25 and 30 so a transition never orphans a user
//! mid-preference, and the 5-minute hysteresis gap between the transition
//! thresholds prevents oscillation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::context::EnergyLevel;

/// Focus arms available in the short zone.
pub const ARMS_SHORT: [u32; 5] = [10, 15, 20, 25, 30];
/// Focus arms available in the long zone.
pub const ARMS_LONG: [u32; 8] = [25, 30, 35, 40, 45, 50, 55, 60];
/// Break arms, further filtered by the focus duration at recommendation
/// time.
pub const BREAK_ARMS: [u32; 4] = [5, 10, 15, 20];

/// Bound on the recorded selections queue.
pub const SELECTIONS_WINDOW: usize = 10;
/// Number of recent selections consulted for a transition.
pub const TRANSITION_WINDOW: usize = 5;
/// Short -> long when the recent average reaches this value.
pub const TRANSITION_UP_AVG: f64 = 30.0;
/// Long -> short when the recent average falls to this value.
pub const TRANSITION_DOWN_AVG: f64 = 25.0;

/// The regime a context currently operates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Zone {
    Short,
    Long,
}

impl Zone {
    /// Base arm set for this zone.
    pub fn arms(&self) -> &'static [u32] {
        match self {
            Zone::Short => &ARMS_SHORT,
            Zone::Long => &ARMS_LONG,
        }
    }
}

/// Initial zone for a context that has never been seen.
///
/// Driven by the caller's heuristic duration; the energy level only breaks
/// the tie in the 26-34 minute band.
pub fn detect_zone(initial_minutes: u32, energy: EnergyLevel) -> Zone {
    if initial_minutes <= 25 {
        Zone::Short
    } else if initial_minutes >= 35 {
        Zone::Long
    } else if energy == EnergyLevel::Low {
        Zone::Short
    } else {
        Zone::Long
    }
}

/// Break arms permitted after a focus session of the given length.
///
/// A break may not exceed a third of the focus duration (floor 5), so a
/// 15-minute session is never followed by a 20-minute break.
pub fn permitted_breaks(focus_minutes: u32) -> Vec<u32> {
    let cap = (focus_minutes / 3).max(5);
    BREAK_ARMS.iter().copied().filter(|a| *a <= cap).collect()
}

/// Persisted zone record for one context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneData {
    pub zone: Zone,
    /// `min(1, selections / 5)`; diagnostic only.
    pub confidence: f64,
    /// Last selections, oldest first, bounded by [`SELECTIONS_WINDOW`].
    pub selections: Vec<u32>,
    /// Whether enough selections exist to evaluate a transition.
    pub transition_ready: bool,
}

impl ZoneData {
    pub fn new(zone: Zone) -> Self {
        Self {
            zone,
            confidence: 0.0,
            selections: Vec::new(),
            transition_ready: false,
        }
    }

    /// Sorted union of the zone's base arms and any admitted dynamic arms.
    pub fn arm_set(&self, dynamic_arms: &[u32]) -> Vec<u32> {
        let mut arms: Vec<u32> = self.zone.arms().to_vec();
        for arm in dynamic_arms {
            if *arm > 0 && !arms.contains(arm) {
                arms.push(*arm);
            }
        }
        arms.sort_unstable();
        arms
    }

    /// Record a chosen focus arm and re-evaluate the zone.
    ///
    /// Returns the transition, if one happened.
    pub fn record_selection(&mut self, arm: u32) -> Option<Zone> {
        self.selections.push(arm);
        if self.selections.len() > SELECTIONS_WINDOW {
            let excess = self.selections.len() - SELECTIONS_WINDOW;
            self.selections.drain(..excess);
        }
        self.confidence = (self.selections.len() as f64 / TRANSITION_WINDOW as f64).min(1.0);
        self.transition_ready = self.selections.len() >= TRANSITION_WINDOW;
        self.maybe_transition()
    }

    fn maybe_transition(&mut self) -> Option<Zone> {
        if self.selections.len() < TRANSITION_WINDOW {
            return None;
        }
        let recent = &self.selections[self.selections.len() - TRANSITION_WINDOW..];
        let avg = recent.iter().map(|a| *a as f64).sum::<f64>() / TRANSITION_WINDOW as f64;
        let next = match self.zone {
            Zone::Short if avg >= TRANSITION_UP_AVG => Zone::Long,
            Zone::Long if avg <= TRANSITION_DOWN_AVG => Zone::Short,
            _ => return None,
        };
        self.zone = next;
        Some(next)
    }
}

/// The whole persisted zones table: context key to zone record.
pub type ZoneState = BTreeMap<String, ZoneData>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_zone_boundaries() {
        for energy in [
            EnergyLevel::Low,
            EnergyLevel::Mid,
            EnergyLevel::High,
            EnergyLevel::Unset,
        ] {
            assert_eq!(detect_zone(25, energy), Zone::Short);
            assert_eq!(detect_zone(35, energy), Zone::Long);
        }
        assert_eq!(detect_zone(30, EnergyLevel::Low), Zone::Short);
        assert_eq!(detect_zone(30, EnergyLevel::Mid), Zone::Long);
    }

    #[test]
    fn permitted_breaks_scale_with_focus() {
        assert_eq!(permitted_breaks(25), vec![5]);
        assert_eq!(permitted_breaks(30), vec![5, 10]);
        assert_eq!(permitted_breaks(60), vec![5, 10, 15, 20]);
    }

    #[test]
    fn arm_set_admits_dynamic_arms_sorted() {
        let data = ZoneData::new(Zone::Short);
        assert_eq!(data.arm_set(&[]), vec![10, 15, 20, 25, 30]);
        assert_eq!(data.arm_set(&[42, 25]), vec![10, 15, 20, 25, 30, 42]);
    }

    #[test]
    fn selections_queue_is_bounded() {
        let mut data = ZoneData::new(Zone::Long);
        for arm in 0..15u32 {
            data.record_selection(40 + arm % 2 * 5);
            assert!(data.selections.len() <= SELECTIONS_WINDOW);
        }
        assert_eq!(data.selections.len(), SELECTIONS_WINDOW);
    }

    #[test]
    fn confidence_tracks_selection_count() {
        let mut data = ZoneData::new(Zone::Short);
        assert_eq!(data.confidence, 0.0);
        data.record_selection(20);
        assert!((data.confidence - 0.2).abs() < 1e-12);
        for _ in 0..6 {
            data.record_selection(20);
        }
        assert_eq!(data.confidence, 1.0);
    }

    #[test]
    fn short_to_long_transition_at_avg_30() {
        let mut data = ZoneData::new(Zone::Short);
        for _ in 0..4 {
            assert_eq!(data.record_selection(30), None);
        }
        assert_eq!(data.record_selection(30), Some(Zone::Long));
        assert_eq!(data.zone, Zone::Long);
        assert!(data.transition_ready);
    }

    #[test]
    fn long_to_short_transition_at_avg_25() {
        let mut data = ZoneData::new(Zone::Long);
        for _ in 0..5 {
            data.record_selection(25);
        }
        assert_eq!(data.zone, Zone::Short);
    }

    #[test]
    fn hysteresis_band_holds_zone() {
        let mut data = ZoneData::new(Zone::Short);
        for _ in 0..8 {
            data.record_selection(28);
        }
        assert_eq!(data.zone, Zone::Short);

        let mut data = ZoneData::new(Zone::Long);
        for _ in 0..8 {
            data.record_selection(28);
        }
        assert_eq!(data.zone, Zone::Long);
    }
}
