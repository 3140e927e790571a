//! Learning prompt preferences - per-user snapshot owned by the account
//!
//! Preferences travel into the engine as a value and come back out as a new
//! value. Nothing here mutates in place; every `with_*` method consumes the
//! snapshot and returns the updated one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::config::PromptsConfig;
use crate::types::ExplanationLevel;

/// When a matched prompt may be shown automatically
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AutoShowPolicy {
    #[default]
    Always,
    NewSymptomsOnly,
    Never,
}

impl AutoShowPolicy {
    /// Whether this policy lets a trigger for a symptom surface a teaser
    pub fn permits(self, symptom_is_new: bool) -> bool {
        match self {
            AutoShowPolicy::Always => true,
            AutoShowPolicy::NewSymptomsOnly => symptom_is_new,
            AutoShowPolicy::Never => false,
        }
    }

    /// Parse from a kebab-case policy name
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "always" => Some(AutoShowPolicy::Always),
            "new-symptoms-only" | "new" => Some(AutoShowPolicy::NewSymptomsOnly),
            "never" => Some(AutoShowPolicy::Never),
            _ => None,
        }
    }
}

impl std::fmt::Display for AutoShowPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AutoShowPolicy::Always => write!(f, "always"),
            AutoShowPolicy::NewSymptomsOnly => write!(f, "new-symptoms-only"),
            AutoShowPolicy::Never => write!(f, "never"),
        }
    }
}

/// A user's dismissal of one prompt
///
/// Replaced wholesale on re-dismissal, never partially updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DismissalRecord {
    pub prompt_id: String,
    /// Symptom text the user had logged when dismissing
    pub symptom: String,
    pub dismissed_at: DateTime<Utc>,
    /// Overrides the day-count cooldown when present
    #[serde(default)]
    pub show_again_after: Option<DateTime<Utc>>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl DismissalRecord {
    pub fn new(prompt_id: impl Into<String>, symptom: impl Into<String>, dismissed_at: DateTime<Utc>) -> Self {
        Self {
            prompt_id: prompt_id.into(),
            symptom: symptom.into(),
            dismissed_at,
            show_again_after: None,
            reason: None,
        }
    }

    pub fn with_show_again_after(mut self, at: DateTime<Utc>) -> Self {
        self.show_again_after = Some(at);
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

fn default_true() -> bool {
    true
}

fn default_cooldown_days() -> u32 {
    30
}

/// Per-user learning prompt preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningPromptPreferences {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub auto_show: AutoShowPolicy,
    #[serde(default)]
    pub preferred_level: ExplanationLevel,
    #[serde(default)]
    pub dismissals: Vec<DismissalRecord>,
    /// Prompt ids with at least one explored section
    #[serde(default)]
    pub explored: BTreeSet<String>,
    /// Default cooldown before a dismissed prompt may reappear
    #[serde(default = "default_cooldown_days")]
    pub show_after_dismiss_days: u32,
}

impl Default for LearningPromptPreferences {
    fn default() -> Self {
        Self {
            enabled: true,
            auto_show: AutoShowPolicy::default(),
            preferred_level: ExplanationLevel::default(),
            dismissals: Vec::new(),
            explored: BTreeSet::new(),
            show_after_dismiss_days: default_cooldown_days(),
        }
    }
}

impl LearningPromptPreferences {
    /// Fresh preferences seeded from configured defaults
    pub fn from_config(config: &PromptsConfig) -> Self {
        Self {
            enabled: config.enabled,
            auto_show: config.auto_show,
            preferred_level: config.preferred_level,
            show_after_dismiss_days: config.show_after_dismiss_days,
            ..Self::default()
        }
    }

    /// The dismissal record for a prompt, if any
    pub fn dismissal_for(&self, prompt_id: &str) -> Option<&DismissalRecord> {
        self.dismissals.iter().find(|d| d.prompt_id == prompt_id)
    }

    pub fn is_dismissed(&self, prompt_id: &str) -> bool {
        self.dismissal_for(prompt_id).is_some()
    }

    pub fn is_explored(&self, prompt_id: &str) -> bool {
        self.explored.contains(prompt_id)
    }

    /// Record a dismissal, replacing any earlier record for the same prompt
    pub fn with_dismissal(mut self, record: DismissalRecord) -> Self {
        self.dismissals.retain(|d| d.prompt_id != record.prompt_id);
        self.dismissals.push(record);
        self
    }

    /// Forget a dismissal so the prompt is immediately eligible again
    pub fn without_dismissal(mut self, prompt_id: &str) -> Self {
        self.dismissals.retain(|d| d.prompt_id != prompt_id);
        self
    }

    pub fn with_explored(mut self, prompt_id: impl Into<String>) -> Self {
        self.explored.insert(prompt_id.into());
        self
    }

    pub fn with_preferred_level(mut self, level: ExplanationLevel) -> Self {
        self.preferred_level = level;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_auto_show(mut self, policy: AutoShowPolicy) -> Self {
        self.auto_show = policy;
        self
    }

    pub fn with_cooldown_days(mut self, days: u32) -> Self {
        self.show_after_dismiss_days = days;
        self
    }
}
