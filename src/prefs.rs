//! Persisted user preferences.
//!
//! Only the theme survives between runs. Preferences are a small JSON file;
//! a missing file means "no preference yet".

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::ui::ThemeMode;

/// File name used when no explicit path is configured.
const PREFS_FILE: &str = "prefs.json";

/// Saved preferences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemeMode>,
}

/// Reads and writes [`Preferences`] at a fixed path.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// `$XDG_CONFIG_HOME/probwatch/prefs.json`, then `~/.config/probwatch/prefs.json`,
    /// then `./probwatch-prefs.json`.
    pub fn default_path() -> PathBuf {
        if let Some(dir) = std::env::var_os("XDG_CONFIG_HOME").filter(|d| !d.is_empty()) {
            return PathBuf::from(dir).join("probwatch").join(PREFS_FILE);
        }
        if let Some(home) = std::env::var_os("HOME").filter(|d| !d.is_empty()) {
            return PathBuf::from(home).join(".config").join("probwatch").join(PREFS_FILE);
        }
        PathBuf::from("probwatch-prefs.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load preferences; a missing file yields the defaults.
    pub fn load(&self) -> Result<Preferences> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Preferences::default());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Read error: {}", self.path.display()));
            }
        };
        serde_json::from_str(&content)
            .with_context(|| format!("Parse error: {}", self.path.display()))
    }

    /// Write preferences, creating the parent directory if needed.
    pub fn save(&self, prefs: &Preferences) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(prefs)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_is_default() {
        let dir = tempdir().unwrap();
        let store = PreferenceStore::new(dir.path().join("prefs.json"));
        assert_eq!(store.load().unwrap(), Preferences::default());
    }

    #[test]
    fn save_then_load_keeps_theme() {
        let dir = tempdir().unwrap();
        let store = PreferenceStore::new(dir.path().join("nested").join("prefs.json"));

        store.save(&Preferences { theme: Some(ThemeMode::Dark) }).unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        assert!(content.contains("\"dark\""));
        assert_eq!(store.load().unwrap().theme, Some(ThemeMode::Dark));
    }

    #[test]
    fn invalid_json_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "not json").unwrap();

        let err = PreferenceStore::new(&path).load().unwrap_err();
        assert!(err.to_string().contains("Parse error"));
    }
}
