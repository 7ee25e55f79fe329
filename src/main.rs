//! parkside - parking session management for a single facility
//!
//! Module structure:
//! - `domain/` - Core business types (Ticket, VehicleClass, errors)
//! - `io/` - Collaborator seams (ledger, spot pool, journal, console)
//! - `services/` - Business logic (fare calculator, orchestrator)
//! - `infra/` - Infrastructure (config, clock)

use clap::Parser;
use parkside::infra::{Config, SystemClock};
use parkside::io::{Console, MemoryLedger, MemorySpotPool, TicketJournal};
use parkside::services::{FareCalculator, FareSchedule, ParkingOrchestrator};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;

/// parkside - parking session management console
#[derive(Parser, Debug)]
#[command(name = "parkside", version, about)]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "config/dev.toml")]
    config: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging with configurable level via RUST_LOG env var
    // Default: INFO, use RUST_LOG=debug for full event visibility
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(UtcTime::rfc_3339())
        .with_target(false)
        .init();

    info!("parkside starting");

    let args = Args::parse();
    let config = Config::load_from_path(&args.config);

    info!(
        config_file = %config.config_file(),
        site_id = %config.site_id(),
        car_spots = %config.car_spots(),
        bike_spots = %config.bike_spots(),
        car_rate = %config.fare().car_rate_per_hour,
        bike_rate = %config.fare().bike_rate_per_hour,
        free_minutes = %config.fare().free_minutes,
        journal_file = %config.journal_file(),
        "config_loaded"
    );

    let ledger = Arc::new(MemoryLedger::new());
    let spots = Arc::new(MemorySpotPool::new(config.car_spots(), config.bike_spots()));
    let clock = Arc::new(SystemClock);
    let fare = FareCalculator::new(FareSchedule::from(config.fare()));

    let orchestrator = Arc::new(ParkingOrchestrator::new(ledger, spots, clock, fare));
    let journal = TicketJournal::new(config.journal_file());

    Console::new(orchestrator, journal).run().await
}
