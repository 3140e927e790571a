//! Prompt definitions - the immutable content bundles keyed by symptom
//!
//! A definition is created once when the registry is loaded and never
//! mutated afterwards. Anatomy references are carried through untouched for
//! the 3D viewer; nothing in this crate interprets them.

use serde::{Deserialize, Serialize};

use crate::types::{ExplanationLevel, PriorityTier};

/// Kind of a content section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionKind {
    Anatomy,
    Pathophysiology,
    Differential,
    RelatedConditions,
    WhenToSeekCare,
    Lifestyle,
    Prevention,
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SectionKind::Anatomy => write!(f, "anatomy"),
            SectionKind::Pathophysiology => write!(f, "pathophysiology"),
            SectionKind::Differential => write!(f, "differential"),
            SectionKind::RelatedConditions => write!(f, "related-conditions"),
            SectionKind::WhenToSeekCare => write!(f, "when-to-seek-care"),
            SectionKind::Lifestyle => write!(f, "lifestyle"),
            SectionKind::Prevention => write!(f, "prevention"),
        }
    }
}

/// A single content section of a prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentSection {
    /// Section identifier, unique within its prompt
    pub id: String,
    pub kind: SectionKind,
    pub title: String,
    pub body: String,
}

/// Cross-reference into the anatomy viewer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnatomyReference {
    /// Structure identifier understood by the viewer (e.g. `brain`)
    pub structure_id: String,
    pub label: String,
    /// Opaque camera preset name
    #[serde(default)]
    pub camera_hint: Option<String>,
    /// Opaque highlight targets
    #[serde(default)]
    pub highlight: Vec<String>,
}

/// Short summary of a condition associated with the symptom
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedCondition {
    pub name: String,
    pub summary: String,
}

/// When-to-seek-care guidance
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CareGuidance {
    /// Signs that warrant emergency care
    #[serde(default)]
    pub urgent_signs: Vec<String>,
    /// Reasons to book a routine appointment
    #[serde(default)]
    pub routine_reasons: Vec<String>,
    #[serde(default)]
    pub self_care: Vec<String>,
    pub disclaimer: String,
}

/// Exactly one explanation per complexity level, lowest first
///
/// Serialized as a five element array. The fixed size makes a lookup by
/// [`ExplanationLevel`] infallible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelExplanations([String; 5]);

impl LevelExplanations {
    pub fn new(levels: [String; 5]) -> Self {
        Self(levels)
    }

    /// Text for the given level
    pub fn get(&self, level: ExplanationLevel) -> &str {
        &self.0[level.index()]
    }

    /// Iterate `(level, text)` pairs in ascending level order
    pub fn iter(&self) -> impl Iterator<Item = (ExplanationLevel, &str)> {
        ExplanationLevel::ALL
            .into_iter()
            .zip(self.0.iter().map(String::as_str))
    }
}

/// A registry-defined, symptom-keyed bundle of educational content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptDefinition {
    /// Unique across the registry (e.g. `learn-headache`)
    pub id: String,
    /// Canonical symptom name
    pub symptom: String,
    /// Alternate phrases, checked in order
    #[serde(default)]
    pub aliases: Vec<String>,
    pub title: String,
    pub teaser: String,
    #[serde(default)]
    pub sections: Vec<ContentSection>,
    #[serde(default)]
    pub anatomy: Vec<AnatomyReference>,
    #[serde(default)]
    pub related_symptoms: Vec<String>,
    #[serde(default)]
    pub related_conditions: Vec<RelatedCondition>,
    #[serde(default)]
    pub care: CareGuidance,
    pub priority: PriorityTier,
    pub explanations: LevelExplanations,
}

impl PromptDefinition {
    /// Find a section by id
    pub fn section(&self, section_id: &str) -> Option<&ContentSection> {
        self.sections.iter().find(|s| s.id == section_id)
    }

    /// Sections of the given kind, in authored order
    pub fn sections_of(&self, kind: SectionKind) -> impl Iterator<Item = &ContentSection> {
        self.sections.iter().filter(move |s| s.kind == kind)
    }

    /// Whether the prompt carries an anatomy reference with this structure id
    pub fn references_structure(&self, structure_id: &str) -> bool {
        self.anatomy.iter().any(|a| a.structure_id == structure_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_kind_serde_names() {
        let json = serde_json::to_string(&SectionKind::WhenToSeekCare).unwrap();
        assert_eq!(json, "\"when-to-seek-care\"");
        let kind: SectionKind = serde_json::from_str("\"related-conditions\"").unwrap();
        assert_eq!(kind, SectionKind::RelatedConditions);
        assert_eq!(SectionKind::Differential.to_string(), "differential");
    }

    #[test]
    fn test_explanations_require_five_levels() {
        let four = r#"["a","b","c","d"]"#;
        assert!(serde_json::from_str::<LevelExplanations>(four).is_err());

        let five = r#"["a","b","c","d","e"]"#;
        let levels: LevelExplanations = serde_json::from_str(five).unwrap();
        assert_eq!(levels.get(ExplanationLevel::MIN), "a");
        assert_eq!(levels.get(ExplanationLevel::MAX), "e");
        assert_eq!(levels.iter().count(), 5);
    }
}
