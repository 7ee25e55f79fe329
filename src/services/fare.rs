//! Fare computation for completed parking sessions
//!
//! Pricing rules:
//! - The interval is validated before any arithmetic; a missing exit time
//!   or an exit before entry is an error, never "free".
//! - Duration is counted in whole minutes, billed as fractional hours
//!   (45 minutes = 0.75 h).
//! - Sessions under the free threshold cost nothing, discount or not.
//! - Returning customers (any prior closed ticket) get a flat percentage
//!   off, applied once after the base price.

use crate::domain::error::{ParkingError, Result};
use crate::domain::types::VehicleClass;
use crate::infra::config::FareConfig;
use chrono::{DateTime, Utc};

/// Pricing parameters. Defaults match the facility's published rates;
/// production values come from the `[fare]` config section.
#[derive(Debug, Clone)]
pub struct FareSchedule {
    pub car_rate_per_hour: f64,
    pub bike_rate_per_hour: f64,
    /// Sessions shorter than this many minutes are free
    pub free_minutes: i64,
    /// Flat loyalty discount, in percent
    pub discount_percent: f64,
}

impl Default for FareSchedule {
    fn default() -> Self {
        Self {
            car_rate_per_hour: 1.5,
            bike_rate_per_hour: 1.0,
            free_minutes: 30,
            discount_percent: 5.0,
        }
    }
}

impl From<&FareConfig> for FareSchedule {
    fn from(config: &FareConfig) -> Self {
        Self {
            car_rate_per_hour: config.car_rate_per_hour,
            bike_rate_per_hour: config.bike_rate_per_hour,
            free_minutes: config.free_minutes,
            discount_percent: config.discount_percent,
        }
    }
}

pub struct FareCalculator {
    schedule: FareSchedule,
}

impl FareCalculator {
    pub fn new(schedule: FareSchedule) -> Self {
        Self { schedule }
    }

    /// Price a completed session.
    ///
    /// Fails with [`ParkingError::InvalidInterval`] when `out_time` is
    /// absent or before `in_time`. A free session stays free for returning
    /// customers; the discount multiplies the base price and never turns
    /// zero into something else.
    pub fn price(
        &self,
        class: VehicleClass,
        in_time: DateTime<Utc>,
        out_time: Option<DateTime<Utc>>,
        has_prior_paid_ticket: bool,
    ) -> Result<f64> {
        let out_time = out_time.ok_or(ParkingError::InvalidInterval)?;
        if out_time < in_time {
            return Err(ParkingError::InvalidInterval);
        }

        let minutes = (out_time - in_time).num_minutes();
        if minutes < self.schedule.free_minutes {
            return Ok(0.0);
        }

        let hours = minutes as f64 / 60.0;
        let base = hours * self.rate(class);

        if has_prior_paid_ticket {
            Ok(base * (100.0 - self.schedule.discount_percent) / 100.0)
        } else {
            Ok(base)
        }
    }

    fn rate(&self, class: VehicleClass) -> f64 {
        match class {
            VehicleClass::Car => self.schedule.car_rate_per_hour,
            VehicleClass::Bike => self.schedule.bike_rate_per_hour,
        }
    }
}
