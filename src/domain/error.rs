//! Error values surfaced by the session core
//!
//! Every failure is a value returned to the caller. There are no silent
//! defaults: an unknown vehicle class is never treated as a car, a missing
//! exit time is never treated as free parking.

use crate::domain::types::VehicleClass;
use thiserror::Error;

/// Result type used across the parking core.
pub type Result<T> = std::result::Result<T, ParkingError>;

#[derive(Debug, Error)]
pub enum ParkingError {
    /// Exit time missing or before entry time. Fatal to that fare
    /// computation, never retried.
    #[error("exit time is missing or before entry time")]
    InvalidInterval,

    /// Raw input named a vehicle class outside the closed set.
    #[error("unsupported vehicle class: {0}")]
    UnsupportedVehicleClass(String),

    /// No free spot of the requested class, including after the
    /// allocation-race retry.
    #[error("no free {0} spot available")]
    NoCapacity(VehicleClass),

    /// Exit requested for a plate with no open session.
    #[error("no open ticket for plate {0}")]
    NoOpenTicket(String),

    /// Entry requested for a plate that already has an open session.
    #[error("plate {0} already has an open ticket")]
    AlreadyParked(String),

    /// A ledger or allocator operation failed.
    #[error("persistence failure: {0}")]
    Persistence(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            ParkingError::NoCapacity(VehicleClass::Car).to_string(),
            "no free CAR spot available"
        );
        assert_eq!(
            ParkingError::NoOpenTicket("AB-123-CD".to_string()).to_string(),
            "no open ticket for plate AB-123-CD"
        );
        assert_eq!(
            ParkingError::UnsupportedVehicleClass("TRUCK".to_string()).to_string(),
            "unsupported vehicle class: TRUCK"
        );
    }
}
