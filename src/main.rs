#![allow(non_snake_case)]

use std::env;

use eskomBot::cli;
use eskomBot::config::{AppConfig, AppContext};
use eskomBot::runtime;

const DEFAULT_RUN_MODE: &str = "cli";

#[tokio::main]
async fn main() {
    let config = match env::var("CONFIG_FILE") {
        Ok(path) => AppConfig::from_file(&path).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    };

    let get_prop = |key: &str| -> Option<String> {
        config.get(key).or_else(|| env::var(key).ok())
    };

    let ctx = AppContext::resolve(&config);
    let run_mode = get_prop("RUN_MODE").unwrap_or(DEFAULT_RUN_MODE.to_string());
    if run_mode == "watch" {
        runtime::run_watch(ctx).await;
    } else if run_mode == "cli" {
        cli::cli(ctx).await;
    } else {
        println!("Invalid run mode {}", run_mode);
    }
}
