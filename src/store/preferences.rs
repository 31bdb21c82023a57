use std::fs;
use std::path::PathBuf;

use crate::models::preferences::Preferences;
use crate::store::ensure_parent_dir;

/// JSON file holding the user settings. Saves overwrite the whole object.
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The stored preferences, or the defaults when nothing has been
    /// saved yet.
    pub fn load(&self) -> Result<Preferences, String> {
        if !self.path.exists() {
            return Ok(Preferences::default());
        }
        let content = fs::read_to_string(&self.path)
            .map_err(|e| format!("Failed to read {}: {}", self.path.display(), e))?;
        serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse {}: {}", self.path.display(), e))
    }

    pub fn save(&self, preferences: &Preferences) -> Result<(), String> {
        ensure_parent_dir(&self.path)?;
        let body = serde_json::to_string(preferences)
            .map_err(|e| format!("Failed to encode preferences: {}", e))?;
        fs::write(&self.path, body)
            .map_err(|e| format!("Failed to write {}: {}", self.path.display(), e))
    }
}
