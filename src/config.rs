use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_API_BASE: &str = "https://eskom-calendar-api.shuttleapp.rs";
const DEFAULT_DATA_LOCATION: &str = "./data";

#[derive(Debug, Default, Clone)]
pub struct AppConfig {
    values: HashMap<String, String>,
}

impl AppConfig {
    pub fn from_file(path: &str) -> Result<Self, String> {
        let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
        let mut values = HashMap::new();
        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);
            let Some((key, value)) = trimmed.split_once('=') else {
                return Err(format!("Invalid config line {}: {}", idx + 1, line));
            };
            let key = key.trim();
            let mut value = value.trim().to_string();
            if (value.starts_with('"') && value.ends_with('"'))
                || (value.starts_with('\'') && value.ends_with('\''))
            {
                value = value[1..value.len() - 1].to_string();
            }
            values.insert(key.to_string(), value);
        }
        Ok(Self { values })
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

/// Everything the app needs to know about its surroundings, resolved once
/// at startup and passed along from there. Nothing below main reads the
/// environment or hard-codes a path.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub api_base: String,
    pub history_file: PathBuf,
    pub settings_file: PathBuf,
}

impl AppContext {
    /// Config-file values win over environment variables win over the
    /// defaults (the public eskom-calendar endpoint and `./data`).
    pub fn resolve(config: &AppConfig) -> Self {
        let get = |key: &str| config.get(key).or_else(|| env::var(key).ok());

        let data_location =
            get("DATA_LOCATION").unwrap_or_else(|| DEFAULT_DATA_LOCATION.to_string());
        let data_dir = PathBuf::from(data_location);
        let history_file = get("HISTORY_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("subscription_history.json"));
        let settings_file = get("SETTINGS_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("preferences.json"));
        let api_base = get("ESKOM_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        Self {
            api_base,
            history_file,
            settings_file,
        }
    }
}
