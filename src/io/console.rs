//! Operator console
//!
//! Menu-driven loop for facility staff: incoming vehicle, exiting vehicle,
//! shutdown. All raw-input validation happens here; only a parsed
//! (class, plate) pair ever reaches the orchestrator.

use crate::domain::error::ParkingError;
use crate::domain::types::VehicleClass;
use crate::io::journal::TicketJournal;
use crate::services::orchestrator::ParkingOrchestrator;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::warn;

type InputLines = Lines<BufReader<Stdin>>;

/// Map a vehicle-class menu selection to a class. Accepts the menu number
/// or the class name; anything else is a caller error handled here.
pub fn parse_vehicle_choice(input: &str) -> Option<VehicleClass> {
    match input.trim() {
        "1" => Some(VehicleClass::Car),
        "2" => Some(VehicleClass::Bike),
        other => other.parse().ok(),
    }
}

pub struct Console {
    orchestrator: Arc<ParkingOrchestrator>,
    journal: TicketJournal,
}

impl Console {
    pub fn new(orchestrator: Arc<ParkingOrchestrator>, journal: TicketJournal) -> Self {
        Self { orchestrator, journal }
    }

    /// Run the menu loop until shutdown is selected or stdin closes.
    pub async fn run(&self) -> anyhow::Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            println!();
            println!("Please select an option:");
            println!("1 - Incoming vehicle");
            println!("2 - Exiting vehicle");
            println!("3 - Shutdown");

            let Some(choice) = lines.next_line().await? else {
                break;
            };
            match choice.trim() {
                "1" => self.handle_entry(&mut lines).await?,
                "2" => self.handle_exit(&mut lines).await?,
                "3" => {
                    println!("Shutting down.");
                    break;
                }
                other => {
                    warn!(input = %other, "console_unsupported_option");
                    println!("Unsupported option: {other}");
                }
            }
        }

        Ok(())
    }

    async fn handle_entry(&self, lines: &mut InputLines) -> anyhow::Result<()> {
        println!("Please select vehicle type:");
        println!("1 - CAR");
        println!("2 - BIKE");
        let Some(raw_class) = lines.next_line().await? else {
            return Ok(());
        };
        let Some(class) = parse_vehicle_choice(&raw_class) else {
            println!("Unsupported vehicle type: {}", raw_class.trim());
            return Ok(());
        };

        let Some(plate) = prompt_plate(lines).await? else {
            return Ok(());
        };

        match self.orchestrator.enter(class, &plate).await {
            Ok(receipt) => {
                if receipt.returning_customer {
                    println!(
                        "Welcome back! As a regular user of our parking lot, \
                         you'll get a 5% discount."
                    );
                }
                println!(
                    "Please park your {} on spot {} (plate {}, in at {}).",
                    class, receipt.ticket.spot_id, plate, receipt.ticket.in_time
                );
            }
            Err(ParkingError::NoCapacity(class)) => {
                println!("Sorry, no free {class} spot at the moment.");
            }
            Err(ParkingError::AlreadyParked(plate)) => {
                println!("Plate {plate} already has an open ticket.");
            }
            Err(e) => {
                println!("Unable to process entry: {e}");
            }
        }
        Ok(())
    }

    async fn handle_exit(&self, lines: &mut InputLines) -> anyhow::Result<()> {
        let Some(plate) = prompt_plate(lines).await? else {
            return Ok(());
        };

        match self.orchestrator.exit(&plate).await {
            Ok(receipt) => {
                if receipt.discount_applied {
                    println!("A 5% loyalty discount was applied.");
                }
                let out_time = receipt
                    .ticket
                    .out_time
                    .map(|t| t.to_string())
                    .unwrap_or_default();
                println!(
                    "Please pay the parking fare: {:.2} (plate {}, out at {}).",
                    receipt.ticket.price, plate, out_time
                );
                self.journal.write_ticket(&receipt.ticket);
            }
            Err(ParkingError::NoOpenTicket(plate)) => {
                println!("No open ticket found for plate {plate}.");
            }
            Err(e) => {
                println!("Unable to process exit: {e}");
            }
        }
        Ok(())
    }
}

async fn prompt_plate(lines: &mut InputLines) -> anyhow::Result<Option<String>> {
    println!("Please type the vehicle registration number and press enter:");
    let Some(raw) = lines.next_line().await? else {
        return Ok(None);
    };
    let plate = raw.trim().to_string();
    if plate.is_empty() {
        println!("Registration number must not be empty.");
        return Ok(None);
    }
    Ok(Some(plate))
}
