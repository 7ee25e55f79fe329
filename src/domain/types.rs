//! Shared types for the parking core

use crate::domain::error::ParkingError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Newtype wrapper for spot IDs to provide type safety
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[repr(transparent)]
pub struct SpotId(pub u32);

impl std::fmt::Display for SpotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Newtype wrapper for ticket IDs, assigned by the ledger on creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct TicketId(pub u64);

impl std::fmt::Display for TicketId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Vehicle classes the facility accepts. Closed set: raw input naming
/// anything else is rejected at the parse boundary, never defaulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleClass {
    Car,
    Bike,
}

impl VehicleClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleClass::Car => "CAR",
            VehicleClass::Bike => "BIKE",
        }
    }
}

impl std::fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for VehicleClass {
    type Err = ParkingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CAR" => Ok(VehicleClass::Car),
            "BIKE" => Ok(VehicleClass::Bike),
            other => Err(ParkingError::UnsupportedVehicleClass(other.to_string())),
        }
    }
}

/// A single physical parking space, scoped to one vehicle class.
///
/// `class` never changes after creation; `occupied` is toggled only
/// through the spot allocator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParkingSpot {
    pub id: SpotId,
    pub class: VehicleClass,
    pub occupied: bool,
}

/// One parking session, from gate-in to gate-out.
///
/// A ticket is created open (`out_time` absent, price zero) and closed
/// exactly once via [`Ticket::close`], which produces a new value rather
/// than mutating in place. Closed tickets are kept forever; they are the
/// loyalty-history record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    /// Assigned by the ledger on creation; `None` until then.
    pub id: Option<TicketId>,
    pub spot_id: SpotId,
    pub spot_class: VehicleClass,
    pub plate: String,
    pub price: f64,
    pub in_time: DateTime<Utc>,
    pub out_time: Option<DateTime<Utc>>,
}

impl Ticket {
    /// Open a new session for a vehicle that just entered.
    pub fn open(
        spot_id: SpotId,
        spot_class: VehicleClass,
        plate: &str,
        in_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            spot_id,
            spot_class,
            plate: plate.to_string(),
            price: 0.0,
            in_time,
            out_time: None,
        }
    }

    /// An open ticket denotes a vehicle currently parked.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.out_time.is_none()
    }

    /// Produce the closed copy of this ticket. The ledger's `update`
    /// persists it; the original value stays untouched.
    pub fn close(&self, price: f64, out_time: DateTime<Utc>) -> Self {
        Self { price, out_time: Some(out_time), ..self.clone() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_vehicle_class_from_str() {
        assert_eq!("CAR".parse::<VehicleClass>().unwrap(), VehicleClass::Car);
        assert_eq!("bike".parse::<VehicleClass>().unwrap(), VehicleClass::Bike);
        assert_eq!(" car ".parse::<VehicleClass>().unwrap(), VehicleClass::Car);
        assert!(matches!(
            "TRUCK".parse::<VehicleClass>(),
            Err(ParkingError::UnsupportedVehicleClass(s)) if s == "TRUCK"
        ));
        assert!("".parse::<VehicleClass>().is_err());
    }

    #[test]
    fn test_open_ticket() {
        let in_time = Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap();
        let ticket = Ticket::open(SpotId(1), VehicleClass::Car, "AB-123-CD", in_time);

        assert!(ticket.id.is_none());
        assert!(ticket.is_open());
        assert_eq!(ticket.price, 0.0);
        assert_eq!(ticket.plate, "AB-123-CD");
        assert_eq!(ticket.in_time, in_time);
    }

    #[test]
    fn test_close_preserves_identity() {
        let in_time = Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap();
        let out_time = Utc.with_ymd_and_hms(2026, 8, 30, 13, 0, 0).unwrap();

        let mut open = Ticket::open(SpotId(4), VehicleClass::Bike, "ZZ-999-ZZ", in_time);
        open.id = Some(TicketId(7));

        let closed = open.close(1.0, out_time);

        assert!(!closed.is_open());
        assert_eq!(closed.id, Some(TicketId(7)));
        assert_eq!(closed.spot_id, SpotId(4));
        assert_eq!(closed.plate, "ZZ-999-ZZ");
        assert_eq!(closed.price, 1.0);
        assert_eq!(closed.out_time, Some(out_time));
        // Original value untouched
        assert!(open.is_open());
        assert_eq!(open.price, 0.0);
    }
}
