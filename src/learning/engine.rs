//! Learning prompt engine - wires the registry and the preferences store
//!
//! The pure functions in this module's siblings never touch storage. The
//! engine loads a user's snapshot, runs them, and writes the returned
//! snapshot back. Concurrent events for the same user are the store's
//! problem: the last `set` wins.

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info};

use super::cooldown::prune_expired;
use super::display::{DisplayAction, LearningPromptDisplayState};
use super::matcher::{search, PromptMatch};
use super::preferences::{DismissalRecord, LearningPromptPreferences};
use super::store::PreferencesStore;
use super::trigger::{build_trigger_event, SymptomContext, TriggerEvent};
use crate::config::PromptsConfig;
use crate::content::{explain, ContentRegistry, PromptDefinition};

/// Engine for one process; cheap to clone
#[derive(Clone)]
pub struct LearningPromptEngine {
    registry: Arc<ContentRegistry>,
    store: Arc<dyn PreferencesStore>,
    defaults: PromptsConfig,
}

impl LearningPromptEngine {
    /// Create a new engine
    pub fn new(
        registry: Arc<ContentRegistry>,
        store: Arc<dyn PreferencesStore>,
        defaults: PromptsConfig,
    ) -> Self {
        Self { registry, store, defaults }
    }

    pub fn registry(&self) -> &ContentRegistry {
        &self.registry
    }

    /// Stored preferences, or configured defaults for a new user
    pub fn preferences(&self, user_id: &str) -> Result<LearningPromptPreferences> {
        Ok(self
            .store
            .get(user_id)?
            .unwrap_or_else(|| LearningPromptPreferences::from_config(&self.defaults)))
    }

    pub fn save_preferences(&self, user_id: &str, preferences: &LearningPromptPreferences) -> Result<()> {
        self.store.set(user_id, preferences)
    }

    /// Ranked matches for a query, flagged against the user's history
    pub fn search(&self, user_id: &str, query: &str) -> Result<Vec<PromptMatch>> {
        let preferences = self.preferences(user_id)?;
        Ok(search(query, &self.registry, &preferences))
    }

    /// Handle one symptom-logging event
    ///
    /// Expired dismissals are pruned and persisted before matching.
    pub fn on_symptom_logged(
        &self,
        user_id: &str,
        symptom: &str,
        context: SymptomContext,
        now: DateTime<Utc>,
    ) -> Result<(TriggerEvent, LearningPromptDisplayState)> {
        let stored = self.preferences(user_id)?;
        let preferences = prune_expired(stored.clone(), now);
        if preferences != stored {
            self.store.set(user_id, &preferences)?;
        }

        let event = build_trigger_event(symptom, context, &preferences, &self.registry, now);
        let state = LearningPromptDisplayState::new().present(event.clone(), &preferences, now);

        debug!(
            "User {} logged '{}': {} matches, showing {:?}",
            user_id,
            symptom,
            event.matches.len(),
            state.prompt_id()
        );
        Ok((event, state))
    }

    /// Apply a UI action and persist any preference change
    pub fn handle_action(
        &self,
        user_id: &str,
        state: &LearningPromptDisplayState,
        action: DisplayAction,
        now: DateTime<Utc>,
    ) -> Result<LearningPromptDisplayState> {
        let preferences = self.preferences(user_id)?;
        let transition = state.apply(action, &preferences, now)?;
        if transition.preferences != preferences {
            self.store.set(user_id, &transition.preferences)?;
        }
        Ok(transition.state)
    }

    /// Dismiss a prompt outside of a display session
    pub fn dismiss(&self, user_id: &str, record: DismissalRecord) -> Result<LearningPromptPreferences> {
        let prompt_id = record.prompt_id.clone();
        let preferences = self.preferences(user_id)?.with_dismissal(record);
        self.store.set(user_id, &preferences)?;
        info!("User {} dismissed {}", user_id, prompt_id);
        Ok(preferences)
    }

    /// Resolve a prompt by id, canonical symptom or alias
    pub fn resolve(&self, key: &str) -> Option<&Arc<PromptDefinition>> {
        self.registry.get(key).or_else(|| self.registry.lookup(key))
    }

    /// Explanation for a prompt; `level` defaults to the user's preference
    pub fn explain(&self, user_id: &str, prompt: &PromptDefinition, level: Option<i64>) -> Result<String> {
        let level = match level {
            Some(level) => level,
            None => i64::from(self.preferences(user_id)?.preferred_level.get()),
        };
        Ok(explain(prompt, level).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::sample;
    use crate::learning::display::DisplayMode;
    use crate::learning::store::MemoryPreferencesStore;
    use chrono::{Duration, TimeZone};

    fn engine() -> (LearningPromptEngine, Arc<MemoryPreferencesStore>) {
        let store = Arc::new(MemoryPreferencesStore::new());
        let engine = LearningPromptEngine::new(
            Arc::new(sample::registry().unwrap()),
            store.clone(),
            PromptsConfig::default(),
        );
        (engine, store)
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 2, 1, 18, 0, 0).unwrap()
    }

    #[test]
    fn test_new_user_gets_configured_defaults() {
        let (engine, store) = engine();
        let prefs = engine.preferences("dana").unwrap();
        assert_eq!(prefs.show_after_dismiss_days, PromptsConfig::default().show_after_dismiss_days);
        assert!(store.get("dana").unwrap().is_none());
    }

    #[test]
    fn test_dismiss_then_cooldown_then_reshow() {
        let (engine, store) = engine();
        let (_, state) = engine
            .on_symptom_logged("erin", "headache", SymptomContext::default(), now())
            .unwrap();
        assert_eq!(state.mode, Some(DisplayMode::Teaser));

        let state = engine.handle_action("erin", &state, DisplayAction::dismiss(), now()).unwrap();
        assert!(state.is_hidden());
        assert!(store.get("erin").unwrap().unwrap().is_dismissed("learn-headache"));

        let (event, state) = engine
            .on_symptom_logged("erin", "headache", SymptomContext::default(), now() + Duration::days(10))
            .unwrap();
        assert!(event.selected.is_none());
        assert!(state.is_hidden());

        let (event, _) = engine
            .on_symptom_logged("erin", "headache", SymptomContext::default(), now() + Duration::days(31))
            .unwrap();
        assert_eq!(event.selected_prompt_id(), Some("learn-headache"));
        // the expired record was pruned and persisted
        assert!(!store.get("erin").unwrap().unwrap().is_dismissed("learn-headache"));
    }

    #[test]
    fn test_explore_persists_explored_set() {
        let (engine, store) = engine();
        let (_, state) = engine
            .on_symptom_logged("finn", "vertigo", SymptomContext::default(), now())
            .unwrap();
        let state = engine.handle_action("finn", &state, DisplayAction::Expand, now()).unwrap();
        engine
            .handle_action(
                "finn",
                &state,
                DisplayAction::ExploreSection { section_id: "anatomy".to_string() },
                now(),
            )
            .unwrap();
        assert!(store.get("finn").unwrap().unwrap().is_explored("learn-dizziness"));
    }

    #[test]
    fn test_invalid_action_surfaces_error() {
        let (engine, _) = engine();
        let hidden = LearningPromptDisplayState::new();
        assert!(engine.handle_action("gus", &hidden, DisplayAction::Expand, now()).is_err());
    }

    #[test]
    fn test_resolve_and_explain() {
        let (engine, _) = engine();
        let prompt = engine.resolve("angina").unwrap().clone();
        assert_eq!(prompt.id, "learn-chest-pain");
        assert_eq!(engine.resolve("learn-nausea").unwrap().id, "learn-nausea");

        let default_text = engine.explain("hana", &prompt, None).unwrap();
        assert_eq!(default_text, explain(&prompt, 2));
        assert_eq!(engine.explain("hana", &prompt, Some(9)).unwrap(), explain(&prompt, 5));
    }
}
