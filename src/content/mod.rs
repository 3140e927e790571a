//! Educational content
//!
//! Prompt definitions, the registry that indexes them by symptom, and the
//! explanation selector.

pub mod definition;
pub mod registry;
pub mod sample;
pub mod explanation;

pub use definition::{
    AnatomyReference, CareGuidance, ContentSection, LevelExplanations, PromptDefinition,
    RelatedCondition, SectionKind,
};
pub use registry::{ContentRegistry, RegistryError};
pub use explanation::{explain, explain_for};
