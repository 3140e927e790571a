//! Preferences store - snapshot persistence keyed by user id
//!
//! The engine only ever reads a whole snapshot and writes a whole snapshot
//! back. The file store keeps one JSON document per user under
//! ~/.local/share/symptom-learning/preferences/ and replaces it atomically.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::{debug, info};

use super::preferences::LearningPromptPreferences;

/// Get/set access to per-user preference snapshots
pub trait PreferencesStore: Send + Sync {
    /// Stored snapshot for a user, `None` if the user has none yet
    fn get(&self, user_id: &str) -> Result<Option<LearningPromptPreferences>>;

    /// Replace the stored snapshot for a user
    fn set(&self, user_id: &str, preferences: &LearningPromptPreferences) -> Result<()>;
}

/// In-process store, mostly for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryPreferencesStore {
    entries: RwLock<HashMap<String, LearningPromptPreferences>>,
}

impl MemoryPreferencesStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferencesStore for MemoryPreferencesStore {
    fn get(&self, user_id: &str) -> Result<Option<LearningPromptPreferences>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| anyhow::anyhow!("Preferences store lock poisoned"))?;
        Ok(entries.get(user_id).cloned())
    }

    fn set(&self, user_id: &str, preferences: &LearningPromptPreferences) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| anyhow::anyhow!("Preferences store lock poisoned"))?;
        entries.insert(user_id.to_string(), preferences.clone());
        Ok(())
    }
}

/// One pretty-printed JSON file per user
#[derive(Debug, Clone)]
pub struct JsonFilePreferencesStore {
    base_dir: PathBuf,
}

impl JsonFilePreferencesStore {
    /// Create a store at the default location
    pub fn new() -> Result<Self> {
        let base_dir = crate::config::data_dir()?.join("preferences");
        Self::with_dir(base_dir)
    }

    /// Create with a custom base directory
    pub fn with_dir(base_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&base_dir)
            .with_context(|| format!("Failed to create preferences directory {}", base_dir.display()))?;
        Ok(Self { base_dir })
    }

    /// Get the base directory path
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn file_path(&self, user_id: &str) -> PathBuf {
        self.base_dir.join(format!("{}.json", encode_user_id(user_id)))
    }
}

impl PreferencesStore for JsonFilePreferencesStore {
    fn get(&self, user_id: &str) -> Result<Option<LearningPromptPreferences>> {
        let path = self.file_path(user_id);
        if !path.exists() {
            debug!("No stored preferences for {}", user_id);
            return Ok(None);
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let preferences = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(Some(preferences))
    }

    fn set(&self, user_id: &str, preferences: &LearningPromptPreferences) -> Result<()> {
        let path = self.file_path(user_id);
        let json = serde_json::to_string_pretty(preferences)
            .context("Failed to serialize preferences")?;

        // Write beside the target then rename so readers never see a partial file
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json)
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        std::fs::rename(&tmp, &path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;

        info!("Saved preferences for {}", user_id);
        Ok(())
    }
}

/// Map a user id onto a file stem, one stem per id
///
/// Lower-case ASCII letters, digits and `-` pass through; every other byte
/// becomes `%XX`. Upper-case letters are escaped too so ids differing only
/// in case stay apart on case-insensitive filesystems.
fn encode_user_id(user_id: &str) -> String {
    if user_id.is_empty() {
        return "_".to_string();
    }
    let mut encoded = String::with_capacity(user_id.len());
    for byte in user_id.bytes() {
        if byte.is_ascii_lowercase() || byte.is_ascii_digit() || byte == b'-' {
            encoded.push(char::from(byte));
        } else {
            encoded.push_str(&format!("%{:02X}", byte));
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::learning::preferences::DismissalRecord;
    use chrono::Utc;

    #[test]
    fn test_encode_user_id() {
        assert_eq!(encode_user_id("alice-01"), "alice-01");
        assert_eq!(encode_user_id("../etc/passwd"), "%2E%2E%2Fetc%2Fpasswd");
        assert_eq!(encode_user_id("ann_lee"), "ann%5Flee");
        assert_eq!(encode_user_id("Ann"), "%41nn");
        assert_eq!(encode_user_id(""), "_");
    }

    #[test]
    fn test_file_store_keeps_similar_ids_apart() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFilePreferencesStore::with_dir(dir.path().to_path_buf()).unwrap();

        store.set("ann.lee", &LearningPromptPreferences::default().with_cooldown_days(7)).unwrap();
        assert!(store.get("ann_lee").unwrap().is_none());
        assert!(store.get("Ann.lee").unwrap().is_none());

        store.set("ann_lee", &LearningPromptPreferences::default().with_cooldown_days(14)).unwrap();
        assert_eq!(store.get("ann.lee").unwrap().unwrap().show_after_dismiss_days, 7);
        assert_eq!(store.get("ann_lee").unwrap().unwrap().show_after_dismiss_days, 14);
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryPreferencesStore::new();
        assert!(store.get("alice").unwrap().is_none());

        let prefs = LearningPromptPreferences::default().with_cooldown_days(7);
        store.set("alice", &prefs).unwrap();
        assert_eq!(store.get("alice").unwrap(), Some(prefs));
        assert!(store.get("bob").unwrap().is_none());
    }

    #[test]
    fn test_file_store_replaces_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFilePreferencesStore::with_dir(dir.path().to_path_buf()).unwrap();
        assert!(store.get("alice").unwrap().is_none());

        let first = LearningPromptPreferences::default()
            .with_dismissal(DismissalRecord::new("learn-headache", "headache", Utc::now()));
        store.set("alice", &first).unwrap();
        assert_eq!(store.get("alice").unwrap(), Some(first.clone()));

        let second = first.without_dismissal("learn-headache").with_explored("learn-nausea");
        store.set("alice", &second).unwrap();
        let loaded = store.get("alice").unwrap().unwrap();
        assert!(loaded.dismissals.is_empty());
        assert!(loaded.is_explored("learn-nausea"));
        assert!(!dir.path().join("alice.json.tmp").exists());
    }

    #[test]
    fn test_file_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFilePreferencesStore::with_dir(dir.path().to_path_buf()).unwrap();
        std::fs::write(dir.path().join("carol.json"), "{ not json").unwrap();
        assert!(store.get("carol").is_err());
    }
}
