use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One entry in the subscription history file. The file keeps insertion
/// order and the last entry is the area the notification watcher tracks;
/// the same area may appear more than once.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SubscriptionRecord {
    pub area: String,
    #[serde(rename = "date", with = "history_date_format")]
    pub subscribed_at: NaiveDateTime,
}

// History timestamps are stored as "2024-01-01 10:00:00", no zone.
mod history_date_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record() -> SubscriptionRecord {
        SubscriptionRecord {
            area: "western-cape-stellenbosch".to_string(),
            subscribed_at: NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn serializes_to_the_history_wire_format() {
        let json = serde_json::to_string(&record()).unwrap();
        assert_eq!(
            json,
            r#"{"area":"western-cape-stellenbosch","date":"2024-01-01 10:00:00"}"#
        );
    }

    #[test]
    fn round_trips_through_json() {
        let json = serde_json::to_string(&record()).unwrap();
        let parsed: SubscriptionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record());
    }

    #[test]
    fn rejects_timestamps_in_other_formats() {
        let json = r#"{"area": "x", "date": "2024-01-01T10:00:00Z"}"#;
        assert!(serde_json::from_str::<SubscriptionRecord>(json).is_err());
    }
}
