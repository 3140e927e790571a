//! Symptom learning prompt engine
//!
//! Matches a logged symptom against the content registry, filters out
//! prompts the user dismissed recently, selects at most one prompt, and
//! drives its teaser/expanded/fullscreen presentation.

pub mod preferences;
pub mod matcher;
pub mod cooldown;
pub mod trigger;
pub mod display;
pub mod store;
pub mod engine;

pub use preferences::{AutoShowPolicy, DismissalRecord, LearningPromptPreferences};
pub use matcher::{search, MatchKind, PromptMatch};
pub use cooldown::{is_eligible, is_prompt_eligible, prune_expired};
pub use trigger::{build_trigger_event, Severity, Sex, SymptomContext, TriggerEvent};
pub use display::{
    DisplayAction, DisplayError, DisplayMode, Interaction, InteractionAction,
    LearningPromptDisplayState, Transition,
};
pub use store::{JsonFilePreferencesStore, MemoryPreferencesStore, PreferencesStore};
pub use engine::LearningPromptEngine;
