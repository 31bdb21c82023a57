use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use chrono_tz::Africa::Johannesburg;
use chrono_tz::Tz;

use crate::service::outage_service::OutageSource;
use crate::service::subscription_service::SubscriptionService;
use crate::store::preferences::PreferenceStore;
use crate::store::subscription_history::SubscriptionHistoryStore;
use crate::tasks::ticker::Ticker;

/// How often the watcher re-checks the schedule.
pub const TICK_PERIOD: Duration = Duration::from_secs(60);

/// Receives the scheduler's outage warnings. The watch runtime plugs in
/// the console sink; tests record messages instead.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify(&self, message: &str) -> Result<(), String>;
}

/// Prints warnings to the terminal with a Johannesburg timestamp.
pub struct ConsoleNotifier;

#[async_trait]
impl NotificationSink for ConsoleNotifier {
    async fn notify(&self, message: &str) -> Result<(), String> {
        let now = Utc::now().with_timezone(&Johannesburg);
        println!("[{}] {}", now.format("%Y-%m-%d %H:%M"), message);
        Ok(())
    }
}

/// Whole minutes from `now` to the start of an outage, rounded to the
/// nearest minute. Negative once the outage has begun.
pub fn minutes_until(start: DateTime<FixedOffset>, now: DateTime<Tz>) -> i64 {
    let delta = start.signed_duration_since(now);
    (delta.num_seconds() as f64 / 60.0).round() as i64
}

/// One scheduler pass. Looks up the most recently subscribed area,
/// fetches its schedule and warns about every event starting exactly the
/// configured number of minutes from `now`. With no subscriptions yet it
/// does nothing, not even the fetch. Rescheduling is the caller's loop;
/// a failed pass never stops the cycle.
pub async fn notification_tick<O, S>(
    history: &SubscriptionHistoryStore,
    preferences: &PreferenceStore,
    source: &O,
    sink: &S,
    now: DateTime<Tz>,
) -> Result<(), String>
where
    O: OutageSource + ?Sized,
    S: NotificationSink + ?Sized,
{
    let Some(area) = SubscriptionService::current_area(history)? else {
        return Ok(());
    };
    let lead_minutes = preferences.load()?.notification_time as i64;

    let events = source.outages(&area).await;
    for event in &events {
        let delta_minutes = minutes_until(event.start, now);
        if delta_minutes == lead_minutes {
            let message = format!("Load shedding will start in {} minutes!", delta_minutes);
            sink.notify(&message).await?;
        }
    }
    Ok(())
}

/// Starts the repeating check; the first one runs immediately. The
/// returned ticker is canceled at shutdown.
pub fn start_notification_loop(
    history: Arc<SubscriptionHistoryStore>,
    preferences: Arc<PreferenceStore>,
    source: Arc<dyn OutageSource>,
    sink: Arc<dyn NotificationSink>,
) -> Ticker {
    Ticker::spawn(TICK_PERIOD, move || {
        let history = history.clone();
        let preferences = preferences.clone();
        let source = source.clone();
        let sink = sink.clone();
        async move {
            let now = Utc::now().with_timezone(&Johannesburg);
            if let Err(err) =
                notification_tick(&history, &preferences, source.as_ref(), sink.as_ref(), now).await
            {
                eprintln!("Notification check failed: {}", err);
            }
        }
    })
}
