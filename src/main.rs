mod config;
mod core;
mod funding;
mod models;

use std::path::PathBuf;
use std::process::ExitCode;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::Settings;
use crate::core::MatchEngine;
use crate::models::MatchScenario;

fn main() -> ExitCode {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Initialize logging
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(log_level))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting CareMatch decision engine...");

    let scenario_path = match std::env::args().nth(1) {
        Some(path) => PathBuf::from(path),
        None => {
            error!("Usage: carematch <scenario.json>");
            return ExitCode::FAILURE;
        }
    };

    // Load configuration
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("Configuration loaded successfully");

    let engine = match MatchEngine::new(settings.engine) {
        Ok(engine) => engine,
        Err(e) => {
            error!("Rejected engine configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let raw = match std::fs::read_to_string(&scenario_path) {
        Ok(raw) => raw,
        Err(e) => {
            error!("Failed to read scenario file {}: {}", scenario_path.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let scenario: MatchScenario = match serde_json::from_str(&raw) {
        Ok(scenario) => scenario,
        Err(e) => {
            error!("Failed to parse scenario file {}: {}", scenario_path.display(), e);
            return ExitCode::FAILURE;
        }
    };

    info!(
        "Running scenario for household {} against {} providers",
        scenario.profile.household_id,
        scenario.providers.len()
    );

    let report = match engine.run(
        &scenario.request,
        &scenario.profile,
        &scenario.financial,
        &scenario.providers,
    ) {
        Ok(report) => report,
        Err(e) => {
            error!("Match run failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string_pretty(&report) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Failed to serialize report: {}", e);
            ExitCode::FAILURE
        }
    }
}
