use chrono::{NaiveDate, Utc};
use chrono_tz::Africa::Johannesburg;
use clap::{Parser, Subcommand};
use inquire::Select;

use crate::config::AppContext;
use crate::models::outage::OutageEvent;
use crate::models::preferences::{Preferences, Theme, MAX_LEAD_MINUTES, MIN_LEAD_MINUTES};
use crate::service::outage_service::{EskomOutageService, OutageSource};
use crate::service::subscription_service::SubscriptionService;
use crate::store::preferences::PreferenceStore;
use crate::store::subscription_history::SubscriptionHistoryStore;

// Schedule lines read like "05 Oct, 2023 16:00:00".
const DISPLAY_TIME_FORMAT: &str = "%d %b, %Y %H:%M:%S";

#[derive(Parser)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Areas {
        pattern: Option<String>,
    },
    Subscribe {
        area: Option<String>,
    },
    Status {
        area: Option<String>,
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    History {},
    Settings {},
    SetTheme {
        theme: Theme,
    },
    SetLead {
        minutes: u32,
    },
}

pub async fn cli(ctx: AppContext) {
    // Fine to panic here
    let cli = Cli::parse();
    let history = SubscriptionHistoryStore::new(&ctx.history_file);
    let preferences = PreferenceStore::new(&ctx.settings_file);
    let service = EskomOutageService::new(ctx.api_base.clone());
    match &cli.command {
        Commands::Areas { pattern } => {
            let areas = service.list_areas(pattern.as_deref()).await;
            if areas.is_empty() {
                println!("No matching areas.");
            } else {
                for area in &areas {
                    println!("{}", area);
                }
            }
        }
        Commands::Subscribe { area } => {
            if let Err(e) = subscribe_flow(&history, &service, area.as_deref()).await {
                println!("Failed to subscribe: {}", e);
            }
        }
        Commands::Status { area, date } => {
            let area = match area {
                Some(area) => area.clone(),
                None => match SubscriptionService::current_area(&history) {
                    Ok(Some(area)) => area,
                    Ok(None) => {
                        println!("No subscribed area. Run `subscribe` or pass an area name.");
                        return;
                    }
                    Err(e) => {
                        println!("Failed to read subscription history: {}", e);
                        return;
                    }
                },
            };
            let mut events = service.outages(&area).await;
            if let Some(date) = date {
                events.retain(|event| event.start.date_naive() == *date);
            }
            println!("Load shedding for {}:", area);
            print_outages(&events);
        }
        Commands::History {} => match history.load_all() {
            Ok(records) => {
                if records.is_empty() {
                    println!("No subscriptions yet.");
                } else {
                    for (i, record) in records.iter().enumerate() {
                        println!(
                            "{}) {} (subscribed {})",
                            i + 1,
                            record.area,
                            record.subscribed_at.format("%Y-%m-%d %H:%M:%S")
                        );
                    }
                }
            }
            Err(e) => println!("Failed to read subscription history: {}", e),
        },
        Commands::Settings {} => match preferences.load() {
            Ok(prefs) => {
                println!("Theme: {}", prefs.theme);
                println!("Notification lead: {} minutes", prefs.notification_time);
            }
            Err(e) => println!("Failed to load settings: {}", e),
        },
        Commands::SetTheme { theme } => {
            if let Err(e) = update_preferences(&preferences, |prefs| prefs.theme = *theme) {
                println!("Failed to update settings: {}", e);
            } else {
                println!("Theme set to {}", theme);
            }
        }
        Commands::SetLead { minutes } => {
            if !(MIN_LEAD_MINUTES..=MAX_LEAD_MINUTES).contains(minutes) {
                println!(
                    "Lead time must be between {} and {} minutes",
                    MIN_LEAD_MINUTES, MAX_LEAD_MINUTES
                );
                return;
            }
            if let Err(e) = update_preferences(&preferences, |prefs| prefs.notification_time = *minutes)
            {
                println!("Failed to update settings: {}", e);
            } else {
                println!("Notification lead set to {} minutes", minutes);
            }
        }
    }
}

async fn subscribe_flow(
    history: &SubscriptionHistoryStore,
    service: &EskomOutageService,
    area: Option<&str>,
) -> Result<(), String> {
    let area = match area {
        Some(area) => area.to_string(),
        None => {
            let areas = service.list_areas(None).await;
            if areas.is_empty() {
                return Err("no areas available from the calendar service".to_string());
            }
            pick_area(areas).map_err(|e| format!("no area selected: {}", e))?
        }
    };
    let now = Utc::now().with_timezone(&Johannesburg).naive_local();
    let record = SubscriptionService::subscribe(history, &area, now)?;
    println!("Subscribed to {}", record.area);
    print_outages(&service.outages(&record.area).await);
    Ok(())
}

fn pick_area(areas: Vec<String>) -> Result<String, Box<dyn std::error::Error>> {
    Ok(Select::new("Choose an area to watch.", areas).prompt()?)
}

fn print_outages(events: &[OutageEvent]) {
    if events.is_empty() {
        println!("No outages scheduled.");
        return;
    }
    for event in events {
        println!(
            "{} to {} - Stage {}",
            event.start.format(DISPLAY_TIME_FORMAT),
            event.finish.format(DISPLAY_TIME_FORMAT),
            event.stage
        );
    }
}

fn update_preferences<F>(store: &PreferenceStore, apply: F) -> Result<(), String>
where
    F: FnOnce(&mut Preferences),
{
    let mut prefs = store.load()?;
    apply(&mut prefs);
    store.save(&prefs)
}
