use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use serde_json::Value;

/// One predicted load shedding window for an area, as returned by the
/// eskom-calendar API. Built fresh on every fetch, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct OutageEvent {
    pub start: DateTime<FixedOffset>,
    pub finish: DateTime<FixedOffset>,
    pub stage: u8,
}

// The upstream feed spells the end-time key "finsh" in some responses,
// so both spellings are read.
#[derive(Debug, Deserialize)]
struct RawOutage {
    start: Option<String>,
    finish: Option<String>,
    finsh: Option<String>,
    stage: Option<u8>,
}

impl OutageEvent {
    /// Validates a single element of the API's outage array. Anything
    /// missing a required field or carrying an unparseable timestamp is
    /// rejected with a description of what was wrong.
    pub fn from_json(value: &Value) -> Result<OutageEvent, String> {
        let raw: RawOutage = serde_json::from_value(value.clone())
            .map_err(|e| format!("not an outage object: {}", e))?;
        let start_raw = raw.start.ok_or("missing field `start`")?;
        let finish_raw = raw
            .finish
            .or(raw.finsh)
            .ok_or("missing field `finish`/`finsh`")?;
        let stage = raw.stage.ok_or("missing field `stage`")?;

        let start = DateTime::parse_from_rfc3339(&start_raw)
            .map_err(|e| format!("bad `start` timestamp {:?}: {}", start_raw, e))?;
        let finish = DateTime::parse_from_rfc3339(&finish_raw)
            .map_err(|e| format!("bad `finish` timestamp {:?}: {}", finish_raw, e))?;

        Ok(OutageEvent {
            start,
            finish,
            stage,
        })
    }
}

/// Parses the API's JSON array, dropping any element that does not
/// validate. A body that is not an array at all yields an empty list.
pub fn parse_events(body: &str) -> Vec<OutageEvent> {
    let values: Vec<Value> = match serde_json::from_str(body) {
        Ok(values) => values,
        Err(err) => {
            eprintln!("Failed to parse outage response: {}", err);
            return Vec::new();
        }
    };
    values
        .iter()
        .filter_map(|value| match OutageEvent::from_json(value) {
            Ok(event) => Some(event),
            Err(err) => {
                eprintln!("Skipping malformed outage event: {}", err);
                None
            }
        })
        .collect()
}
