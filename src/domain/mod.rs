//! Domain models - core business types for parking sessions
//!
//! This module contains the canonical data types used throughout the system:
//! - `Ticket` - the primary business entity representing one parking session
//! - `VehicleClass` - closed set of vehicle categories the facility accepts
//! - `ParkingSpot` - a single physical space, scoped to one vehicle class
//! - `ParkingError` - error values surfaced by the session core

pub mod error;
pub mod types;

// Re-export commonly used types at module level
pub use error::{ParkingError, Result};
pub use types::{ParkingSpot, SpotId, Ticket, TicketId, VehicleClass};
