//! Recommendation contexts.
//!
//! A context pairs a normalised task type with a self-reported energy
//! level. Everything the recommender learns is keyed by context: the
//! per-arm posteriors, the zone assignment, and the capacity window all
//! live under the context key. Break posteriors live under a sibling key
//! derived from the same pair.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Self-reported energy level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EnergyLevel {
    /// Low energy (e.g., end of day)
    Low,
    /// Mid energy
    Mid,
    /// High energy (e.g., morning)
    High,
    /// Not reported
    Unset,
}

impl Default for EnergyLevel {
    fn default() -> Self {
        EnergyLevel::Unset
    }
}

impl EnergyLevel {
    /// String form used in context keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            EnergyLevel::Low => "low",
            EnergyLevel::Mid => "mid",
            EnergyLevel::High => "high",
            EnergyLevel::Unset => "unset",
        }
    }

    /// Levels strictly below this one in the energy hierarchy.
    ///
    /// `Unset` sits outside the hierarchy and has no lower levels.
    pub fn lower_levels(&self) -> &'static [EnergyLevel] {
        match self {
            EnergyLevel::Low | EnergyLevel::Unset => &[],
            EnergyLevel::Mid => &[EnergyLevel::Low],
            EnergyLevel::High => &[EnergyLevel::Low, EnergyLevel::Mid],
        }
    }

    /// Parse from the string form used in keys and CLI flags.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(EnergyLevel::Low),
            "mid" | "medium" => Some(EnergyLevel::Mid),
            "high" => Some(EnergyLevel::High),
            "unset" | "" => Some(EnergyLevel::Unset),
            _ => None,
        }
    }
}

impl fmt::Display for EnergyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recommendation context: `(task type, energy level)`.
///
/// The task type is normalised on construction (trimmed, leading letter
/// uppercased; the empty string means "unset"), so equal logical contexts
/// always produce bytewise-identical keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Context {
    task_type: String,
    pub energy: EnergyLevel,
}

impl Context {
    /// Create a context, normalising the task type.
    pub fn new(task_type: &str, energy: EnergyLevel) -> Self {
        Self {
            task_type: normalize_task_type(task_type),
            energy,
        }
    }

    /// The normalised task type (empty string means unset).
    pub fn task_type(&self) -> &str {
        &self.task_type
    }

    /// Deterministic key for the focus posterior, zone and capacity tables.
    pub fn key(&self) -> String {
        format!("{}|{}", self.task_type, self.energy)
    }

    /// Key for the break posterior of the same context.
    pub fn break_key(&self) -> String {
        format!("{}-break|{}", self.task_type, self.energy)
    }

    /// The same task type at a different energy level.
    pub fn with_energy(&self, energy: EnergyLevel) -> Self {
        Self {
            task_type: self.task_type.clone(),
            energy,
        }
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

/// Trim and uppercase the leading letter; empty input stays empty.
fn normalize_task_type(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}
