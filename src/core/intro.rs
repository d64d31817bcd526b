//! The one flag that outlives a session: whether the welcome intro was shown.

use std::{collections::BTreeMap, fs, path::PathBuf};

use crate::errors::LedgerResult;

use super::utils::{write_atomic, PathResolver};

pub const INTRO_SEEN_KEY: &str = "brainyPocketsSeen";
const SEEN_VALUE: &str = "true";

/// Small string key-value store persisted as a JSON object.
#[derive(Debug, Clone)]
pub struct KeyValueStore {
    path: PathBuf,
}

impl KeyValueStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn get(&self, key: &str) -> LedgerResult<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    pub fn set(&self, key: &str, value: &str) -> LedgerResult<()> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    pub fn remove(&self, key: &str) -> LedgerResult<()> {
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }

    fn read_all(&self) -> LedgerResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let data = fs::read_to_string(&self.path)?;
        if data.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&data)?)
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> LedgerResult<()> {
        let json = serde_json::to_string_pretty(entries)?;
        write_atomic(&self.path, &json)?;
        Ok(())
    }
}

/// Tracks whether the intro screen has been seen.
#[derive(Debug, Clone)]
pub struct IntroState {
    store: KeyValueStore,
}

impl IntroState {
    pub fn new(store: KeyValueStore) -> Self {
        Self { store }
    }

    pub fn in_dir(base: &std::path::Path) -> Self {
        Self::new(KeyValueStore::new(PathResolver::state_file_in(base)))
    }

    pub fn should_show(&self) -> LedgerResult<bool> {
        Ok(self.store.get(INTRO_SEEN_KEY)?.as_deref() != Some(SEEN_VALUE))
    }

    pub fn mark_seen(&self) -> LedgerResult<()> {
        tracing::debug!("marking intro as seen");
        self.store.set(INTRO_SEEN_KEY, SEEN_VALUE)
    }

    pub fn reset(&self) -> LedgerResult<()> {
        self.store.remove(INTRO_SEEN_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn intro_shows_until_marked_seen() {
        let temp = TempDir::new().unwrap();
        let intro = IntroState::in_dir(temp.path());
        assert!(intro.should_show().unwrap());

        intro.mark_seen().unwrap();
        assert!(!intro.should_show().unwrap());

        let reopened = IntroState::in_dir(temp.path());
        assert!(!reopened.should_show().unwrap());

        reopened.reset().unwrap();
        assert!(reopened.should_show().unwrap());
    }

    #[test]
    fn other_values_do_not_count_as_seen() {
        let temp = TempDir::new().unwrap();
        let store = KeyValueStore::new(temp.path().join("state.json"));
        store.set(INTRO_SEEN_KEY, "false").unwrap();
        store.set("theme", "dark").unwrap();
        let intro = IntroState::new(store.clone());
        assert!(intro.should_show().unwrap());
        intro.mark_seen().unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
    }
}
