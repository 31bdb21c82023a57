use std::sync::Arc;

use crate::config::AppContext;
use crate::service::outage_service::{EskomOutageService, OutageSource};
use crate::store::preferences::PreferenceStore;
use crate::store::subscription_history::SubscriptionHistoryStore;
use crate::tasks::notification_loop::{start_notification_loop, ConsoleNotifier, NotificationSink};

/// Foreground watch mode: keeps the notification loop running until
/// Ctrl-C, then cancels it.
pub async fn run_watch(ctx: AppContext) {
    let history = Arc::new(SubscriptionHistoryStore::new(&ctx.history_file));
    let preferences = Arc::new(PreferenceStore::new(&ctx.settings_file));
    let source: Arc<dyn OutageSource> = Arc::new(EskomOutageService::new(ctx.api_base.clone()));
    let sink: Arc<dyn NotificationSink> = Arc::new(ConsoleNotifier);

    println!("Watching for load shedding (Ctrl-C to stop)");
    let ticker = start_notification_loop(history, preferences, source, sink);

    if let Err(e) = tokio::signal::ctrl_c().await {
        eprintln!("Failed to listen for shutdown: {}", e);
    }
    ticker.cancel();
    println!("Stopped.");
}
