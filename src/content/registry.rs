//! Content registry - immutable lookup of prompt definitions
//!
//! Built once from the content pipeline's output, validated, then shared
//! read-only (usually behind an `Arc`) by every session. Iteration order is
//! insertion order and is part of the contract: it breaks score ties.

use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use super::definition::PromptDefinition;
use crate::types::{normalize, ExplanationLevel};

/// Content defects found while building a registry
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("duplicate prompt id: {0}")]
    DuplicateId(String),
    #[error("prompt {0} has an empty id or canonical symptom")]
    MissingSymptom(String),
    #[error("prompt {prompt_id} has an empty alias at position {index}")]
    EmptyAlias { prompt_id: String, index: usize },
    #[error("prompt {prompt_id} has no explanation text for level {level}")]
    EmptyExplanation {
        prompt_id: String,
        level: ExplanationLevel,
    },
    #[error("failed to read content file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse content file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// On-disk shape of a content file
#[derive(Debug, Deserialize)]
struct ContentFile {
    prompts: Vec<PromptDefinition>,
}

/// Immutable registry of prompt definitions
#[derive(Debug, Clone, Default)]
pub struct ContentRegistry {
    prompts: Vec<Arc<PromptDefinition>>,
    by_id: HashMap<String, usize>,
    by_symptom: HashMap<String, usize>,
}

impl ContentRegistry {
    /// Validate and index a collection of definitions
    pub fn new(definitions: Vec<PromptDefinition>) -> Result<Self, RegistryError> {
        let mut prompts = Vec::with_capacity(definitions.len());
        let mut by_id = HashMap::with_capacity(definitions.len());
        let mut by_symptom = HashMap::with_capacity(definitions.len());

        for definition in definitions {
            validate(&definition)?;
            let index = prompts.len();
            if by_id.insert(definition.id.clone(), index).is_some() {
                return Err(RegistryError::DuplicateId(definition.id));
            }
            // First registration of a canonical name wins the direct path
            by_symptom.entry(normalize(&definition.symptom)).or_insert(index);
            prompts.push(Arc::new(definition));
        }

        debug!("Indexed {} prompt definitions", prompts.len());
        Ok(Self { prompts, by_id, by_symptom })
    }

    /// Parse a JSON content file (`{"prompts": [...]}`)
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let file: ContentFile = serde_json::from_str(json)?;
        Self::new(file.prompts)
    }

    /// Load a JSON content file from disk
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let json = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let registry = Self::from_json(&json)?;
        info!("Loaded {} prompts from {}", registry.len(), path.display());
        Ok(registry)
    }

    /// Resolve a symptom to its prompt
    ///
    /// Exact match on the canonical name first, then the first alias that
    /// contains the query or is contained in it. Not found is `None`.
    pub fn lookup(&self, symptom: &str) -> Option<&Arc<PromptDefinition>> {
        let query = normalize(symptom);
        if query.is_empty() {
            return None;
        }

        if let Some(&index) = self.by_symptom.get(&query) {
            return self.prompts.get(index);
        }

        self.prompts.iter().find(|prompt| {
            prompt.aliases.iter().any(|alias| {
                let alias = normalize(alias);
                alias.contains(&query) || query.contains(&alias)
            })
        })
    }

    /// Get a prompt by its id
    pub fn get(&self, prompt_id: &str) -> Option<&Arc<PromptDefinition>> {
        self.by_id.get(prompt_id).and_then(|&i| self.prompts.get(i))
    }

    /// Position of a prompt in insertion order
    pub fn position(&self, prompt_id: &str) -> Option<usize> {
        self.by_id.get(prompt_id).copied()
    }

    /// All prompts in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<PromptDefinition>> {
        self.prompts.iter()
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    /// Prompts reachable through a prompt's related-symptom names
    pub fn related_prompts(&self, prompt: &PromptDefinition) -> Vec<Arc<PromptDefinition>> {
        let mut seen: HashSet<&str> = HashSet::from([prompt.id.as_str()]);
        let mut related = Vec::new();
        for name in &prompt.related_symptoms {
            if let Some(found) = self.lookup(name) {
                if seen.insert(found.id.as_str()) {
                    related.push(Arc::clone(found));
                }
            }
        }
        related
    }
}

fn validate(definition: &PromptDefinition) -> Result<(), RegistryError> {
    if definition.id.trim().is_empty() || definition.symptom.trim().is_empty() {
        return Err(RegistryError::MissingSymptom(definition.id.clone()));
    }

    for (index, alias) in definition.aliases.iter().enumerate() {
        if normalize(alias).is_empty() {
            return Err(RegistryError::EmptyAlias {
                prompt_id: definition.id.clone(),
                index,
            });
        }
    }

    for (level, text) in definition.explanations.iter() {
        if text.trim().is_empty() {
            return Err(RegistryError::EmptyExplanation {
                prompt_id: definition.id.clone(),
                level,
            });
        }
    }

    Ok(())
}
