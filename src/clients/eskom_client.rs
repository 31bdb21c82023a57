use reqwest::StatusCode;

use crate::models::outage::{self, OutageEvent};

/// Read-only client for the eskom-calendar API. Every failure mode —
/// transport errors, non-200 statuses, unparseable bodies — collapses to
/// an empty result with a warning, so callers cannot tell "no outages"
/// apart from "the service is down". The next poll is the retry.
pub struct EskomCalendarClient {
    base_url: String,
    http: reqwest::Client,
}

impl EskomCalendarClient {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    /// Upcoming and recent outages for one area, e.g.
    /// `western-cape-stellenbosch`. Area names come from `list_areas` and
    /// are used verbatim in the URL.
    pub async fn outages(&self, area: &str) -> Vec<OutageEvent> {
        let url = format!("{}/outages/{}", self.base(), area);
        match self.get(&url).await {
            Ok((status, body)) => outages_from_response(status, &body),
            Err(err) => {
                eprintln!("Failed to reach the calendar service at {}: {}", url, err);
                Vec::new()
            }
        }
    }

    /// Area names known to the calendar service, optionally filtered by a
    /// pattern the service matches server-side.
    pub async fn list_areas(&self, pattern: Option<&str>) -> Vec<String> {
        let mut url = format!("{}/list_areas", self.base());
        if let Some(pattern) = pattern {
            url.push('/');
            url.push_str(pattern);
        }
        match self.get(&url).await {
            Ok((status, body)) => areas_from_response(status, &body),
            Err(err) => {
                eprintln!("Failed to reach the calendar service at {}: {}", url, err);
                Vec::new()
            }
        }
    }

    fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    async fn get(&self, url: &str) -> Result<(StatusCode, String), reqwest::Error> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        Ok((status, body))
    }
}

fn outages_from_response(status: StatusCode, body: &str) -> Vec<OutageEvent> {
    if status != StatusCode::OK {
        eprintln!("Calendar service returned {} for an outage lookup", status);
        return Vec::new();
    }
    outage::parse_events(body)
}

fn areas_from_response(status: StatusCode, body: &str) -> Vec<String> {
    if status != StatusCode::OK {
        eprintln!("Calendar service returned {} for the area list", status);
        return Vec::new();
    }
    match serde_json::from_str(body) {
        Ok(areas) => areas,
        Err(err) => {
            eprintln!("Failed to parse the area list: {}", err);
            Vec::new()
        }
    }
}
