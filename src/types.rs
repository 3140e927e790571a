//! Shared types used across modules
//!
//! This module contains types that are used by both the content registry
//! and the learning prompt engine to avoid circular dependencies.

use serde::{Deserialize, Serialize};

/// Priority tier of a prompt definition
///
/// Declared low-to-high so that `Ord` follows urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityTier {
    Low,
    Medium,
    High,
}

impl PriorityTier {
    /// Parse from a lower-case tier name
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(PriorityTier::Low),
            "medium" => Some(PriorityTier::Medium),
            "high" => Some(PriorityTier::High),
            _ => None,
        }
    }
}

impl std::fmt::Display for PriorityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriorityTier::Low => write!(f, "low"),
            PriorityTier::Medium => write!(f, "medium"),
            PriorityTier::High => write!(f, "high"),
        }
    }
}

/// One of the five explanation complexity tiers (1 = lay audience, 5 = specialist)
///
/// Always holds a value in `1..=5`. Out-of-range input is clamped by
/// [`ExplanationLevel::clamped`]; deserialization rejects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ExplanationLevel(u8);

impl ExplanationLevel {
    pub const MIN: ExplanationLevel = ExplanationLevel(1);
    pub const MAX: ExplanationLevel = ExplanationLevel(5);

    /// All levels in ascending order
    pub const ALL: [ExplanationLevel; 5] = [
        ExplanationLevel(1),
        ExplanationLevel(2),
        ExplanationLevel(3),
        ExplanationLevel(4),
        ExplanationLevel(5),
    ];

    /// Create a level, returning `None` outside `1..=5`
    pub fn new(level: u8) -> Option<Self> {
        if (1..=5).contains(&level) {
            Some(Self(level))
        } else {
            None
        }
    }

    /// Clamp any requested level into `1..=5`
    pub fn clamped(level: i64) -> Self {
        Self(level.clamp(1, 5) as u8)
    }

    /// Numeric value (1-5)
    pub fn get(self) -> u8 {
        self.0
    }

    /// Zero-based slot used for array lookup
    pub(crate) fn index(self) -> usize {
        usize::from(self.0 - 1)
    }

    /// Human-readable name of the audience tier
    pub fn name(self) -> &'static str {
        match self.0 {
            1 => "Child",
            2 => "Patient",
            3 => "Nursing / Allied Health",
            4 => "Medical Student",
            _ => "Physician",
        }
    }

    /// Short label for UI badges
    pub fn label(self) -> &'static str {
        match self.0 {
            1 => "Kids",
            2 => "Patient",
            3 => "Nursing",
            4 => "Med Student",
            _ => "Physician",
        }
    }

    /// Target audience description
    pub fn audience(self) -> &'static str {
        match self.0 {
            1 => "Children ages 5-12",
            2 => "General adult patients and caregivers",
            3 => "Nurses, paramedics and allied health professionals",
            4 => "Medical students and residents",
            _ => "Attending physicians and specialists",
        }
    }
}

impl Default for ExplanationLevel {
    fn default() -> Self {
        Self(2)
    }
}

impl TryFrom<u8> for ExplanationLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("explanation level must be 1-5, got {}", value))
    }
}

impl From<ExplanationLevel> for u8 {
    fn from(level: ExplanationLevel) -> Self {
        level.0
    }
}

impl std::fmt::Display for ExplanationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lower-case and trim a free-text term for matching
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}
