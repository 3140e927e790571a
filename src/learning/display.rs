//! Display state machine for a presented prompt
//!
//! hidden -> teaser -> expanded <-> fullscreen, with `dismiss` returning to
//! hidden from any visible mode. Every transition appends exactly one entry
//! to the interaction log. Transitions take the current snapshot by
//! reference and return the next one; the caller's copy is never touched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use super::preferences::{DismissalRecord, LearningPromptPreferences};
use super::trigger::TriggerEvent;
use crate::content::PromptDefinition;

/// Visible presentation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    Teaser,
    Expanded,
    Fullscreen,
}

impl std::fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisplayMode::Teaser => write!(f, "teaser"),
            DisplayMode::Expanded => write!(f, "expanded"),
            DisplayMode::Fullscreen => write!(f, "fullscreen"),
        }
    }
}

/// Kind of a logged interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InteractionAction {
    Viewed,
    Expanded,
    Dismissed,
    ExploredSection,
    ClickedAnatomy,
}

impl std::fmt::Display for InteractionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InteractionAction::Viewed => write!(f, "viewed"),
            InteractionAction::Expanded => write!(f, "expanded"),
            InteractionAction::Dismissed => write!(f, "dismissed"),
            InteractionAction::ExploredSection => write!(f, "explored-section"),
            InteractionAction::ClickedAnatomy => write!(f, "clicked-anatomy"),
        }
    }
}

/// One entry of the interaction log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    pub prompt_id: String,
    pub action: InteractionAction,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub detail: Option<String>,
}

/// A user action forwarded by the UI layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayAction {
    Expand,
    Fullscreen,
    ExploreSection { section_id: String },
    ClickAnatomy { structure_id: String },
    Dismiss {
        reason: Option<String>,
        show_again_after: Option<DateTime<Utc>>,
    },
}

impl DisplayAction {
    /// Plain dismissal without reason or explicit reshow date
    pub fn dismiss() -> Self {
        DisplayAction::Dismiss {
            reason: None,
            show_again_after: None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DisplayAction::Expand => "expand",
            DisplayAction::Fullscreen => "fullscreen",
            DisplayAction::ExploreSection { .. } => "explore-section",
            DisplayAction::ClickAnatomy { .. } => "click-anatomy",
            DisplayAction::Dismiss { .. } => "dismiss",
        }
    }
}

/// Actions that are not valid from the current state
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisplayError {
    #[error("cannot {action}: no prompt is displayed")]
    NotVisible { action: &'static str },
    #[error("cannot {action} from {mode} mode")]
    InvalidTransition {
        action: &'static str,
        mode: DisplayMode,
    },
    #[error("prompt {prompt_id} has no section '{section_id}'")]
    UnknownSection { prompt_id: String, section_id: String },
}

/// Presentation state of one session
#[derive(Debug, Clone, Default, Serialize)]
pub struct LearningPromptDisplayState {
    pub visible: bool,
    pub prompt: Option<Arc<PromptDefinition>>,
    pub trigger: Option<TriggerEvent>,
    /// `None` while hidden
    pub mode: Option<DisplayMode>,
    pub current_section: Option<String>,
    pub interactions: Vec<Interaction>,
}

/// Outcome of applying an action: the next state and the user's preferences
#[derive(Debug, Clone)]
pub struct Transition {
    pub state: LearningPromptDisplayState,
    pub preferences: LearningPromptPreferences,
}

impl LearningPromptDisplayState {
    /// Hidden state with an empty log
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_hidden(&self) -> bool {
        !self.visible
    }

    pub fn prompt_id(&self) -> Option<&str> {
        self.prompt.as_ref().map(|p| p.id.as_str())
    }

    /// Surface a trigger event as a teaser
    ///
    /// Only moves out of hidden when the event selected a prompt, prompts
    /// are enabled, and the auto-show policy allows this symptom. Otherwise
    /// the state is returned unchanged.
    pub fn present(
        &self,
        event: TriggerEvent,
        preferences: &LearningPromptPreferences,
        now: DateTime<Utc>,
    ) -> Self {
        if self.visible {
            debug!("Prompt already displayed, ignoring trigger {}", event.id);
            return self.clone();
        }
        if !preferences.enabled {
            debug!("Learning prompts disabled, ignoring trigger {}", event.id);
            return self.clone();
        }
        if !preferences.auto_show.permits(event.context.is_new) {
            debug!(
                "Auto-show policy '{}' suppressed trigger {}",
                preferences.auto_show, event.id
            );
            return self.clone();
        }
        let Some(selected) = event.selected.as_ref() else {
            return self.clone();
        };

        let prompt = Arc::clone(&selected.prompt);
        let mut next = self.clone();
        next.log(&prompt.id, InteractionAction::Viewed, now, None);
        info!("Showing teaser for {}", prompt.id);

        next.visible = true;
        next.mode = Some(DisplayMode::Teaser);
        next.current_section = None;
        next.prompt = Some(prompt);
        next.trigger = Some(event);
        next
    }

    /// Apply a user action
    ///
    /// `Dismiss` replaces any record already held for the prompt, so it
    /// grows `dismissals` by exactly one only when the caller has pruned
    /// expired records first (see [`prune_expired`]). The engine does this
    /// on every logged symptom.
    ///
    /// [`prune_expired`]: crate::learning::cooldown::prune_expired
    pub fn apply(
        &self,
        action: DisplayAction,
        preferences: &LearningPromptPreferences,
        now: DateTime<Utc>,
    ) -> Result<Transition, DisplayError> {
        let (Some(mode), Some(prompt)) = (self.mode, self.prompt.clone()) else {
            return Err(DisplayError::NotVisible {
                action: action.name(),
            });
        };

        let mut next = self.clone();
        let mut preferences = preferences.clone();

        match action {
            DisplayAction::Expand => {
                if mode == DisplayMode::Expanded {
                    return Err(DisplayError::InvalidTransition { action: "expand", mode });
                }
                next.mode = Some(DisplayMode::Expanded);
                next.log(&prompt.id, InteractionAction::Expanded, now, None);
            }
            DisplayAction::Fullscreen => {
                if mode == DisplayMode::Fullscreen {
                    return Err(DisplayError::InvalidTransition { action: "fullscreen", mode });
                }
                next.mode = Some(DisplayMode::Fullscreen);
                next.log(&prompt.id, InteractionAction::Expanded, now, Some("fullscreen".to_string()));
            }
            DisplayAction::ExploreSection { section_id } => {
                if mode == DisplayMode::Teaser {
                    return Err(DisplayError::InvalidTransition { action: "explore-section", mode });
                }
                if prompt.section(&section_id).is_none() {
                    return Err(DisplayError::UnknownSection {
                        prompt_id: prompt.id.clone(),
                        section_id,
                    });
                }
                next.log(&prompt.id, InteractionAction::ExploredSection, now, Some(section_id.clone()));
                next.current_section = Some(section_id);
                preferences = preferences.with_explored(prompt.id.clone());
            }
            DisplayAction::ClickAnatomy { structure_id } => {
                if mode == DisplayMode::Teaser {
                    return Err(DisplayError::InvalidTransition { action: "click-anatomy", mode });
                }
                next.log(&prompt.id, InteractionAction::ClickedAnatomy, now, Some(structure_id));
            }
            DisplayAction::Dismiss { reason, show_again_after } => {
                let symptom = self
                    .trigger
                    .as_ref()
                    .map(|t| t.symptom.clone())
                    .unwrap_or_else(|| prompt.symptom.clone());

                let mut record = DismissalRecord::new(prompt.id.clone(), symptom, now);
                record.show_again_after = show_again_after;
                record.reason = reason.clone();
                preferences = preferences.with_dismissal(record);

                next.log(&prompt.id, InteractionAction::Dismissed, now, reason);
                next.visible = false;
                next.mode = None;
                next.prompt = None;
                next.trigger = None;
                next.current_section = None;
                info!("Dismissed {}", prompt.id);
            }
        }

        debug!(
            "{} -> {}",
            mode,
            next.mode.map(|m| m.to_string()).unwrap_or_else(|| "hidden".to_string())
        );
        Ok(Transition { state: next, preferences })
    }

    fn log(&mut self, prompt_id: &str, action: InteractionAction, now: DateTime<Utc>, detail: Option<String>) {
        self.interactions.push(Interaction {
            prompt_id: prompt_id.to_string(),
            action,
            timestamp: now,
            detail,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::sample;
    use crate::learning::preferences::AutoShowPolicy;
    use crate::learning::trigger::{build_trigger_event, SymptomContext};
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 10, 8, 0, 0).unwrap()
    }

    fn teaser(prefs: &LearningPromptPreferences) -> LearningPromptDisplayState {
        let registry = sample::registry().unwrap();
        let event = build_trigger_event("headache", SymptomContext::default(), prefs, &registry, now());
        LearningPromptDisplayState::new().present(event, prefs, now())
    }

    #[test]
    fn test_present_enters_teaser() {
        let prefs = LearningPromptPreferences::default();
        let state = teaser(&prefs);
        assert!(state.visible);
        assert_eq!(state.mode, Some(DisplayMode::Teaser));
        assert_eq!(state.prompt_id(), Some("learn-headache"));
        assert_eq!(state.interactions.len(), 1);
        assert_eq!(state.interactions[0].action, InteractionAction::Viewed);
    }

    #[test]
    fn test_present_respects_enabled_and_policy() {
        let registry = sample::registry().unwrap();
        let hidden = LearningPromptDisplayState::new();

        let disabled = LearningPromptPreferences::default().with_enabled(false);
        let event = build_trigger_event("headache", SymptomContext::default(), &disabled, &registry, now());
        assert!(hidden.present(event, &disabled, now()).is_hidden());

        let never = LearningPromptPreferences::default().with_auto_show(AutoShowPolicy::Never);
        let event = build_trigger_event("headache", SymptomContext::default(), &never, &registry, now());
        assert!(hidden.present(event, &never, now()).is_hidden());

        let new_only = LearningPromptPreferences::default().with_auto_show(AutoShowPolicy::NewSymptomsOnly);
        let event = build_trigger_event("headache", SymptomContext::default(), &new_only, &registry, now());
        assert!(hidden.present(event, &new_only, now()).is_hidden());

        let context = SymptomContext { is_new: true, ..SymptomContext::default() };
        let event = build_trigger_event("headache", context, &new_only, &registry, now());
        assert!(!hidden.present(event, &new_only, now()).is_hidden());
    }

    #[test]
    fn test_present_without_selection_stays_hidden() {
        let registry = sample::registry().unwrap();
        let prefs = LearningPromptPreferences::default();
        let event = build_trigger_event("sore knee", SymptomContext::default(), &prefs, &registry, now());
        let state = LearningPromptDisplayState::new().present(event, &prefs, now());
        assert!(state.is_hidden());
        assert!(state.interactions.is_empty());
    }

    #[test]
    fn test_expand_fullscreen_and_back() {
        let prefs = LearningPromptPreferences::default();
        let state = teaser(&prefs);

        let t = state.apply(DisplayAction::Expand, &prefs, now()).unwrap();
        assert_eq!(t.state.mode, Some(DisplayMode::Expanded));

        let t = t.state.apply(DisplayAction::Fullscreen, &prefs, now()).unwrap();
        assert_eq!(t.state.mode, Some(DisplayMode::Fullscreen));
        assert_eq!(t.state.interactions.last().unwrap().detail.as_deref(), Some("fullscreen"));

        let t = t.state.apply(DisplayAction::Expand, &prefs, now()).unwrap();
        assert_eq!(t.state.mode, Some(DisplayMode::Expanded));
        assert_eq!(t.state.interactions.len(), 4);

        // original snapshot untouched
        assert_eq!(state.mode, Some(DisplayMode::Teaser));
        assert_eq!(state.interactions.len(), 1);
    }

    #[test]
    fn test_invalid_actions_are_rejected() {
        let prefs = LearningPromptPreferences::default();
        let hidden = LearningPromptDisplayState::new();
        assert_eq!(
            hidden.apply(DisplayAction::Expand, &prefs, now()).unwrap_err(),
            DisplayError::NotVisible { action: "expand" }
        );
        assert!(hidden.apply(DisplayAction::dismiss(), &prefs, now()).is_err());

        let state = teaser(&prefs);
        let explore = DisplayAction::ExploreSection { section_id: "anatomy".to_string() };
        assert!(matches!(
            state.apply(explore, &prefs, now()),
            Err(DisplayError::InvalidTransition { mode: DisplayMode::Teaser, .. })
        ));

        let expanded = state.apply(DisplayAction::Expand, &prefs, now()).unwrap().state;
        assert!(expanded.apply(DisplayAction::Expand, &prefs, now()).is_err());
        let missing = DisplayAction::ExploreSection { section_id: "nope".to_string() };
        assert!(matches!(
            expanded.apply(missing, &prefs, now()),
            Err(DisplayError::UnknownSection { .. })
        ));
    }

    #[test]
    fn test_explore_section_marks_explored() {
        let prefs = LearningPromptPreferences::default();
        let expanded = teaser(&prefs).apply(DisplayAction::Expand, &prefs, now()).unwrap().state;

        let t = expanded
            .apply(DisplayAction::ExploreSection { section_id: "mechanism".to_string() }, &prefs, now())
            .unwrap();
        assert_eq!(t.state.mode, Some(DisplayMode::Expanded));
        assert_eq!(t.state.current_section.as_deref(), Some("mechanism"));
        assert_eq!(t.state.interactions.last().unwrap().action, InteractionAction::ExploredSection);
        assert!(t.preferences.is_explored("learn-headache"));
        assert!(!prefs.is_explored("learn-headache"));
    }

    #[test]
    fn test_click_anatomy_is_logged() {
        let prefs = LearningPromptPreferences::default();
        let full = teaser(&prefs).apply(DisplayAction::Fullscreen, &prefs, now()).unwrap().state;
        let t = full
            .apply(DisplayAction::ClickAnatomy { structure_id: "meninges".to_string() }, &prefs, now())
            .unwrap();
        let last = t.state.interactions.last().unwrap();
        assert_eq!(last.action, InteractionAction::ClickedAnatomy);
        assert_eq!(last.detail.as_deref(), Some("meninges"));
        assert_eq!(t.state.mode, Some(DisplayMode::Fullscreen));
    }

    #[test]
    fn test_dismiss_from_every_visible_mode() {
        let prefs = LearningPromptPreferences::default();
        let teaser_state = teaser(&prefs);
        let expanded = teaser_state.apply(DisplayAction::Expand, &prefs, now()).unwrap().state;
        let full = expanded.apply(DisplayAction::Fullscreen, &prefs, now()).unwrap().state;

        for state in [teaser_state, expanded, full] {
            let before = state.interactions.len();
            let t = state.apply(DisplayAction::dismiss(), &prefs, now()).unwrap();
            assert!(t.state.is_hidden());
            assert!(t.state.prompt.is_none());
            assert_eq!(t.state.interactions.len(), before + 1);
            assert_eq!(t.preferences.dismissals.len(), prefs.dismissals.len() + 1);
            let record = t.preferences.dismissal_for("learn-headache").unwrap();
            assert_eq!(record.symptom, "headache");
            assert_eq!(record.dismissed_at, now());
        }
    }

    #[test]
    fn test_dismiss_carries_reason_and_reshow_date() {
        let prefs = LearningPromptPreferences::default();
        let later = now() + Duration::days(7);
        let t = teaser(&prefs)
            .apply(
                DisplayAction::Dismiss {
                    reason: Some("not-now".to_string()),
                    show_again_after: Some(later),
                },
                &prefs,
                now(),
            )
            .unwrap();
        let record = t.preferences.dismissal_for("learn-headache").unwrap();
        assert_eq!(record.reason.as_deref(), Some("not-now"));
        assert_eq!(record.show_again_after, Some(later));
        assert_eq!(t.state.interactions.last().unwrap().detail.as_deref(), Some("not-now"));
    }

    #[test]
    fn test_dismiss_after_pruning_appends_one_record() {
        use crate::learning::cooldown::prune_expired;

        let stale = DismissalRecord::new("learn-headache", "headache", now() - Duration::days(60));
        let prefs = LearningPromptPreferences::default().with_dismissal(stale);

        // an unpruned, expired record is replaced rather than added to
        let t = teaser(&prefs).apply(DisplayAction::dismiss(), &prefs, now()).unwrap();
        assert_eq!(t.preferences.dismissals.len(), 1);

        let pruned = prune_expired(prefs, now());
        let t = teaser(&pruned).apply(DisplayAction::dismiss(), &pruned, now()).unwrap();
        assert_eq!(t.preferences.dismissals.len(), pruned.dismissals.len() + 1);
        assert_eq!(t.preferences.dismissal_for("learn-headache").unwrap().dismissed_at, now());
    }
}
