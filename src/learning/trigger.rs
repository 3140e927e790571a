//! Trigger event builder
//!
//! Turns one symptom-logging occurrence into a trigger event holding the
//! full ranked candidate list and at most one selected prompt.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use super::cooldown::is_eligible;
use super::matcher::{search, PromptMatch};
use super::preferences::LearningPromptPreferences;
use crate::content::ContentRegistry;
use crate::types::PriorityTier;

/// Reported severity of a logged symptom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    pub fn from_name(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "mild" => Some(Severity::Mild),
            "moderate" => Some(Severity::Moderate),
            "severe" => Some(Severity::Severe),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Female,
    Male,
    Other,
}

/// Context the health-logging subsystem attaches to a symptom
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymptomContext {
    #[serde(default)]
    pub severity: Option<Severity>,
    /// Free-text duration as logged (e.g. "3 days")
    #[serde(default)]
    pub duration: Option<String>,
    /// Free-text frequency as logged (e.g. "daily")
    #[serde(default)]
    pub frequency: Option<String>,
    /// First time the user has logged this symptom
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub related_to_existing_condition: bool,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub sex: Option<Sex>,
}

/// Result of matching one symptom-logging occurrence
#[derive(Debug, Clone, Serialize)]
pub struct TriggerEvent {
    pub id: Uuid,
    pub symptom: String,
    pub timestamp: DateTime<Utc>,
    pub context: SymptomContext,
    /// Every scored candidate, before cooldown filtering
    pub matches: Vec<PromptMatch>,
    /// The prompt to present, if any qualified
    pub selected: Option<PromptMatch>,
}

impl TriggerEvent {
    pub fn selected_prompt_id(&self) -> Option<&str> {
        self.selected.as_ref().map(PromptMatch::prompt_id)
    }

    pub fn has_selection(&self) -> bool {
        self.selected.is_some()
    }
}

/// Pick the prompt to present from cooldown-filtered candidates
///
/// The first high-priority candidate wins; otherwise the first candidate in
/// score order (ties already sit in registry order).
fn select<'a>(candidates: &[&'a PromptMatch]) -> Option<&'a PromptMatch> {
    candidates
        .iter()
        .find(|m| m.prompt.priority == PriorityTier::High)
        .or_else(|| candidates.first())
        .copied()
}

/// Build the trigger event for a logged symptom
pub fn build_trigger_event(
    symptom: &str,
    context: SymptomContext,
    preferences: &LearningPromptPreferences,
    registry: &ContentRegistry,
    now: DateTime<Utc>,
) -> TriggerEvent {
    let matches = search(symptom, registry, preferences);

    let candidates: Vec<&PromptMatch> = matches
        .iter()
        .filter(|m| {
            let blocked = m.already_dismissed
                && !is_eligible(preferences.dismissal_for(m.prompt_id()), preferences, now);
            if blocked {
                debug!("Skipping {}: still cooling down", m.prompt_id());
            }
            !blocked
        })
        .collect();

    let selected = select(&candidates).cloned();

    match &selected {
        Some(m) => info!(
            "Symptom '{}' selected {} ({} of {} candidates eligible)",
            symptom,
            m.prompt_id(),
            candidates.len(),
            matches.len()
        ),
        None => debug!("Symptom '{}' produced no eligible prompt", symptom),
    }

    TriggerEvent {
        id: Uuid::new_v4(),
        symptom: symptom.to_string(),
        timestamp: now,
        context,
        matches,
        selected,
    }
}
