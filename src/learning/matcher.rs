//! Prompt matcher - scores registry prompts against a free-text symptom
//!
//! Matching is plain case-insensitive substring containment: the canonical
//! symptom name scores highest, then aliases, then the title. A prompt that
//! matches none of them is left out entirely.

use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use super::preferences::LearningPromptPreferences;
use crate::content::{ContentRegistry, PromptDefinition};
use crate::types::normalize;

/// Score for a match on the canonical symptom name
pub const SYMPTOM_SCORE: f64 = 1.0;
/// Score for a match on an alias
pub const ALIAS_SCORE: f64 = 0.8;
/// Score for a match on the title
pub const TITLE_SCORE: f64 = 0.5;

/// Which field of the prompt matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Symptom,
    Alias,
    Title,
}

impl std::fmt::Display for MatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchKind::Symptom => write!(f, "symptom"),
            MatchKind::Alias => write!(f, "alias"),
            MatchKind::Title => write!(f, "title"),
        }
    }
}

impl MatchKind {
    pub fn score(self) -> f64 {
        match self {
            MatchKind::Symptom => SYMPTOM_SCORE,
            MatchKind::Alias => ALIAS_SCORE,
            MatchKind::Title => TITLE_SCORE,
        }
    }
}

/// A scored candidate prompt
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptMatch {
    pub prompt: Arc<PromptDefinition>,
    pub match_score: f64,
    pub match_kind: MatchKind,
    /// The symptom name, alias or title that matched
    pub matched_term: String,
    /// The user has a dismissal record for this prompt
    pub already_dismissed: bool,
    /// The user has explored at least one section of this prompt
    pub already_explored: bool,
}

impl PromptMatch {
    pub fn prompt_id(&self) -> &str {
        &self.prompt.id
    }
}

/// Score a single prompt against an already-normalized query
fn score(prompt: &PromptDefinition, query: &str) -> Option<(MatchKind, String)> {
    if normalize(&prompt.symptom).contains(query) {
        return Some((MatchKind::Symptom, prompt.symptom.clone()));
    }

    if let Some(alias) = prompt.aliases.iter().find(|a| normalize(a).contains(query)) {
        return Some((MatchKind::Alias, alias.clone()));
    }

    if normalize(&prompt.title).contains(query) {
        return Some((MatchKind::Title, prompt.title.clone()));
    }

    None
}

/// Rank registry prompts against a symptom query
///
/// Results are ordered by score descending. Within the top tier a prompt
/// whose canonical name equals the query comes first; other equal scores
/// keep registry insertion order. An empty query matches nothing.
pub fn search(
    query: &str,
    registry: &ContentRegistry,
    preferences: &LearningPromptPreferences,
) -> Vec<PromptMatch> {
    let query = normalize(query);
    if query.is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<PromptMatch> = registry
        .iter()
        .filter_map(|prompt| {
            let (kind, term) = score(prompt, &query)?;
            Some(PromptMatch {
                prompt: Arc::clone(prompt),
                match_score: kind.score(),
                match_kind: kind,
                matched_term: term,
                already_dismissed: preferences.is_dismissed(&prompt.id),
                already_explored: preferences.is_explored(&prompt.id),
            })
        })
        .collect();

    // An exact canonical name leads its tier; sort_by is stable, so the
    // remaining ties stay in registry order
    let exact = |m: &PromptMatch| m.match_kind == MatchKind::Symptom && normalize(&m.prompt.symptom) == query;
    matches.sort_by(|a, b| {
        b.match_score
            .total_cmp(&a.match_score)
            .then_with(|| exact(b).cmp(&exact(a)))
    });

    debug!("Query '{}' matched {} prompts", query, matches.len());
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::sample;
    use crate::learning::preferences::DismissalRecord;
    use chrono::Utc;

    #[test]
    fn test_canonical_match_scores_one() {
        let registry = sample::registry().unwrap();
        let prefs = LearningPromptPreferences::default();
        let results = search("Headache", &registry, &prefs);
        assert_eq!(results[0].prompt_id(), "learn-headache");
        assert_eq!(results[0].match_score, 1.0);
        assert_eq!(results[0].match_kind, MatchKind::Symptom);
        assert_eq!(results[0].matched_term, "headache");
    }

    #[test]
    fn test_alias_match_scores_point_eight() {
        let registry = sample::registry().unwrap();
        let prefs = LearningPromptPreferences::default();
        let results = search("migraine", &registry, &prefs);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].prompt_id(), "learn-headache");
        assert_eq!(results[0].match_score, 0.8);
        assert_eq!(results[0].matched_term, "migraine");
    }

    #[test]
    fn test_first_matching_alias_is_reported() {
        let registry = sample::registry().unwrap();
        let prefs = LearningPromptPreferences::default();
        let results = search("chest", &registry, &prefs);
        // "chest" is inside the canonical name, so the alias list is never consulted
        assert_eq!(results[0].match_kind, MatchKind::Symptom);

        let results = search("tight", &registry, &prefs);
        assert_eq!(results[0].matched_term, "chest tightness");
    }

    #[test]
    fn test_title_match_scores_half() {
        let registry = sample::registry().unwrap();
        let prefs = LearningPromptPreferences::default();
        let results = search("understanding your", &registry, &prefs);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].match_score, 0.5);
        assert_eq!(results[0].matched_term, "Understanding Your Headache");
    }

    #[test]
    fn test_results_sorted_by_score_then_registry_order() {
        let registry = sample::registry().unwrap();
        let prefs = LearningPromptPreferences::default();
        // "pain" hits headache (alias "head pain"), chest pain and abdominal pain (canonical)
        let results = search("pain", &registry, &prefs);
        let ids: Vec<&str> = results.iter().map(|m| m.prompt_id()).collect();
        assert_eq!(ids, vec!["learn-chest-pain", "learn-abdominal-pain", "learn-headache"]);
        assert!(results.iter().all(|m| m.match_score > 0.0));
    }

    #[test]
    fn test_no_match_and_empty_query() {
        let registry = sample::registry().unwrap();
        let prefs = LearningPromptPreferences::default();
        assert!(search("itchy elbow", &registry, &prefs).is_empty());
        assert!(search("   ", &registry, &prefs).is_empty());
    }

    #[test]
    fn test_flags_do_not_change_score() {
        let registry = sample::registry().unwrap();
        let prefs = LearningPromptPreferences::default()
            .with_dismissal(DismissalRecord::new("learn-headache", "headache", Utc::now()))
            .with_explored("learn-headache");
        let results = search("headache", &registry, &prefs);
        assert!(results[0].already_dismissed);
        assert!(results[0].already_explored);
        assert_eq!(results[0].match_score, 1.0);
    }

    #[test]
    fn test_search_is_idempotent() {
        let registry = sample::registry().unwrap();
        let prefs = LearningPromptPreferences::default();
        let first = serde_json::to_string(&search("ache", &registry, &prefs)).unwrap();
        let second = serde_json::to_string(&search("ache", &registry, &prefs)).unwrap();
        assert_eq!(first, second);
    }
}
