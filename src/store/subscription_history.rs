use std::fs;
use std::path::PathBuf;

use crate::models::subscription::SubscriptionRecord;
use crate::store::ensure_parent_dir;

/// JSON file holding every subscription ever made, oldest first. Appends
/// rewrite the whole file; volumes are one record per user action.
pub struct SubscriptionHistoryStore {
    path: PathBuf,
}

impl SubscriptionHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// A missing file means no subscriptions yet, not an error.
    pub fn load_all(&self) -> Result<Vec<SubscriptionRecord>, String> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)
            .map_err(|e| format!("Failed to read {}: {}", self.path.display(), e))?;
        serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse {}: {}", self.path.display(), e))
    }

    pub fn append(&self, record: SubscriptionRecord) -> Result<(), String> {
        let mut records = self.load_all()?;
        records.push(record);
        self.write_all(&records)
    }

    fn write_all(&self, records: &[SubscriptionRecord]) -> Result<(), String> {
        ensure_parent_dir(&self.path)?;
        let body = serde_json::to_string(records)
            .map_err(|e| format!("Failed to encode subscription history: {}", e))?;
        fs::write(&self.path, body)
            .map_err(|e| format!("Failed to write {}: {}", self.path.display(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::env;

    fn temp_history_path() -> PathBuf {
        env::temp_dir()
            .join(format!("eskombot_test_{}", uuid::Uuid::new_v4()))
            .join("subscription_history.json")
    }

    fn record(area: &str, day: u32) -> SubscriptionRecord {
        SubscriptionRecord {
            area: area.to_string(),
            subscribed_at: NaiveDate::from_ymd_opt(2024, 1, day)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn load_all_returns_empty_when_no_file_exists() {
        let store = SubscriptionHistoryStore::new(temp_history_path());
        assert_eq!(store.load_all().unwrap(), Vec::new());
    }

    #[test]
    fn append_creates_the_file_and_keeps_insertion_order() {
        let store = SubscriptionHistoryStore::new(temp_history_path());
        store.append(record("area-one", 1)).unwrap();
        store.append(record("area-two", 2)).unwrap();
        store.append(record("area-one", 3)).unwrap();

        let records = store.load_all().unwrap();
        let areas: Vec<&str> = records.iter().map(|r| r.area.as_str()).collect();
        assert_eq!(areas, vec!["area-one", "area-two", "area-one"]);
    }

    #[test]
    fn load_all_is_stable_between_appends() {
        let store = SubscriptionHistoryStore::new(temp_history_path());
        store.append(record("area-one", 1)).unwrap();

        let first = store.load_all().unwrap();
        let second = store.load_all().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn writes_the_documented_wire_format() {
        let path = temp_history_path();
        let store = SubscriptionHistoryStore::new(&path);
        store.append(record("area-one", 1)).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert_eq!(raw, r#"[{"area":"area-one","date":"2024-01-01 10:00:00"}]"#);
    }

    #[test]
    fn load_all_reports_unreadable_files() {
        let path = temp_history_path();
        let store = SubscriptionHistoryStore::new(&path);
        ensure_parent_dir(&path).unwrap();
        fs::write(&path, "not json").unwrap();

        let err = store.load_all().unwrap_err();
        assert!(err.contains("Failed to parse"));
    }
}
