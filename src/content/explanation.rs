//! Explanation selector
//!
//! Picks one of a prompt's five explanations. Out-of-range requests are
//! clamped rather than rejected, so there is no failure path.

use tracing::debug;

use super::definition::PromptDefinition;
use crate::learning::preferences::LearningPromptPreferences;
use crate::types::ExplanationLevel;

/// Explanation text for a requested level, clamped into 1..=5
pub fn explain(prompt: &PromptDefinition, level: i64) -> &str {
    let clamped = ExplanationLevel::clamped(level);
    if i64::from(clamped.get()) != level {
        debug!("Clamped explanation level {} to {} for {}", level, clamped, prompt.id);
    }
    prompt.explanations.get(clamped)
}

/// Explanation text at the user's preferred level
pub fn explain_for<'a>(prompt: &'a PromptDefinition, preferences: &LearningPromptPreferences) -> &'a str {
    prompt.explanations.get(preferences.preferred_level)
}
