use chrono::NaiveDateTime;

use crate::models::subscription::SubscriptionRecord;
use crate::store::subscription_history::SubscriptionHistoryStore;

pub struct SubscriptionService;

impl SubscriptionService {
    /// Appends a subscription for `area` to the history. The only
    /// validation is that the name is non-empty; anything else is left to
    /// the calendar service, whose vocabulary the name belongs to.
    pub fn subscribe(
        store: &SubscriptionHistoryStore,
        area: &str,
        subscribed_at: NaiveDateTime,
    ) -> Result<SubscriptionRecord, String> {
        let area = area.trim();
        if area.is_empty() {
            return Err("Area name must not be empty".to_string());
        }
        let record = SubscriptionRecord {
            area: area.to_string(),
            subscribed_at,
        };
        store.append(record.clone())?;
        Ok(record)
    }

    /// The area the watcher tracks: the most recent subscription, if any.
    pub fn current_area(store: &SubscriptionHistoryStore) -> Result<Option<String>, String> {
        Ok(store.load_all()?.last().map(|record| record.area.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::env;
    use std::path::PathBuf;

    fn temp_store() -> SubscriptionHistoryStore {
        let path: PathBuf = env::temp_dir()
            .join(format!("eskombot_test_{}", uuid::Uuid::new_v4()))
            .join("subscription_history.json");
        SubscriptionHistoryStore::new(path)
    }

    fn ten_am(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    #[test]
    fn subscribe_appends_and_becomes_the_current_area() {
        let store = temp_store();
        SubscriptionService::subscribe(&store, "area-one", ten_am(1)).unwrap();
        SubscriptionService::subscribe(&store, "area-two", ten_am(2)).unwrap();

        assert_eq!(
            SubscriptionService::current_area(&store).unwrap(),
            Some("area-two".to_string())
        );
        assert_eq!(store.load_all().unwrap().len(), 2);
    }

    #[test]
    fn resubscribing_to_an_old_area_makes_it_current_again() {
        let store = temp_store();
        SubscriptionService::subscribe(&store, "area-one", ten_am(1)).unwrap();
        SubscriptionService::subscribe(&store, "area-two", ten_am(2)).unwrap();
        SubscriptionService::subscribe(&store, "area-one", ten_am(3)).unwrap();

        assert_eq!(
            SubscriptionService::current_area(&store).unwrap(),
            Some("area-one".to_string())
        );
        assert_eq!(store.load_all().unwrap().len(), 3);
    }

    #[test]
    fn blank_area_names_are_rejected_without_touching_the_store() {
        let store = temp_store();
        assert!(SubscriptionService::subscribe(&store, "   ", ten_am(1)).is_err());
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn current_area_is_none_before_any_subscription() {
        let store = temp_store();
        assert_eq!(SubscriptionService::current_area(&store).unwrap(), None);
    }
}
