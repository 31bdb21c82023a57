use async_trait::async_trait;

use crate::clients::eskom_client::EskomCalendarClient;
use crate::models::outage::OutageEvent;

/// Where outage schedules come from. The notification loop and the CLI
/// only ever see this trait, so tests can feed in canned events.
#[async_trait]
pub trait OutageSource: Send + Sync {
    async fn outages(&self, area: &str) -> Vec<OutageEvent>;
    async fn list_areas(&self, pattern: Option<&str>) -> Vec<String>;
}

pub struct EskomOutageService {
    client: EskomCalendarClient,
}

impl EskomOutageService {
    pub fn new(base_url: String) -> Self {
        Self {
            client: EskomCalendarClient::new(base_url),
        }
    }
}

#[async_trait]
impl OutageSource for EskomOutageService {
    async fn outages(&self, area: &str) -> Vec<OutageEvent> {
        self.client.outages(area).await
    }

    async fn list_areas(&self, pattern: Option<&str>) -> Vec<String> {
        self.client.list_areas(pattern).await
    }
}
