//! Services - business logic for the session lifecycle
//!
//! This module contains the core business logic services:
//! - `fare` - Pure fare computation (rates, free threshold, loyalty discount)
//! - `orchestrator` - Entry/exit state machines coordinating the collaborators

pub mod fare;
pub mod orchestrator;

// Re-export commonly used types
pub use fare::{FareCalculator, FareSchedule};
pub use orchestrator::{EntryReceipt, ExitReceipt, ParkingOrchestrator};
