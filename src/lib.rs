//! Symptom Learning - contextual education for logged symptoms
//!
//! When a user logs a symptom, the engine:
//! - Matches it against a registry of educational prompts
//! - Skips prompts the user dismissed within the cooldown window
//! - Selects at most one prompt, preferring high-priority content
//! - Drives the prompt through teaser, expanded and fullscreen views
//! - Serves explanations at five complexity levels
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use symptom_learning::config::PromptsConfig;
//! use symptom_learning::content::sample;
//! use symptom_learning::learning::{LearningPromptEngine, MemoryPreferencesStore, SymptomContext};
//!
//! fn main() -> anyhow::Result<()> {
//!     let engine = LearningPromptEngine::new(
//!         Arc::new(sample::registry()?),
//!         Arc::new(MemoryPreferencesStore::new()),
//!         PromptsConfig::default(),
//!     );
//!     let (event, state) = engine.on_symptom_logged("me", "migraine", SymptomContext::default(), chrono::Utc::now())?;
//!     println!("{:?} -> {:?}", event.selected_prompt_id(), state.mode);
//!     Ok(())
//! }
//! ```

// Core modules (order matters for cross-module dependencies)
pub mod types;
pub mod content;
pub mod learning;
pub mod config;
pub mod cli;

// Re-export commonly used types for convenience
pub use content::{
    ContentRegistry,
    PromptDefinition,
    RegistryError,
    explain,
};

pub use learning::{
    LearningPromptEngine,
    LearningPromptPreferences,
    LearningPromptDisplayState,
    DismissalRecord,
    DisplayAction,
    PreferencesStore,
    JsonFilePreferencesStore,
    MemoryPreferencesStore,
    SymptomContext,
    TriggerEvent,
};

pub use config::Config;

pub use types::{ExplanationLevel, PriorityTier};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get the library info
pub fn info() -> String {
    format!("{} v{} - Symptom Learning Prompt Engine", NAME, VERSION)
}
