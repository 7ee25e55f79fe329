//! Entry/exit session orchestration
//!
//! Both operations are small state machines over injected collaborators
//! (ledger, spot allocator, clock). Failure handling is deliberately
//! asymmetric:
//! - Entry compensates: if the ticket fails to persist, the reserved spot
//!   is released again, because the vehicle never actually parked on it.
//! - Exit does not: if the closure fails to persist, the vehicle is still
//!   physically on the spot, so the spot stays occupied. And once the
//!   closure has persisted, a failed release is reported but the fare is
//!   never rolled back.

use crate::domain::error::{ParkingError, Result};
use crate::domain::types::{SpotId, Ticket, VehicleClass};
use crate::infra::clock::Clock;
use crate::io::ledger::TicketLedger;
use crate::io::spots::SpotAllocator;
use crate::services::fare::FareCalculator;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Outcome of a successful entry.
#[derive(Debug, Clone)]
pub struct EntryReceipt {
    pub ticket: Ticket,
    /// The plate has closed tickets on file. Operator messaging only; the
    /// discount decision is made again at exit time.
    pub returning_customer: bool,
}

/// Outcome of a successful exit.
#[derive(Debug, Clone)]
pub struct ExitReceipt {
    pub ticket: Ticket,
    pub discount_applied: bool,
}

pub struct ParkingOrchestrator {
    ledger: Arc<dyn TicketLedger>,
    spots: Arc<dyn SpotAllocator>,
    clock: Arc<dyn Clock>,
    fare: FareCalculator,
}

impl ParkingOrchestrator {
    pub fn new(
        ledger: Arc<dyn TicketLedger>,
        spots: Arc<dyn SpotAllocator>,
        clock: Arc<dyn Clock>,
        fare: FareCalculator,
    ) -> Self {
        Self { ledger, spots, clock, fare }
    }

    /// Open a session: claim a spot of the requested class and persist an
    /// open ticket for the plate.
    ///
    /// A plate with an open ticket is rejected with
    /// [`ParkingError::AlreadyParked`] rather than given a second spot.
    /// On a persistence failure after the spot was claimed, the claim is
    /// rolled back before the error is surfaced.
    pub async fn enter(&self, class: VehicleClass, plate: &str) -> Result<EntryReceipt> {
        if let Some(open) = self.ledger.find_open(plate).await? {
            warn!(plate = %plate, ticket_id = ?open.id, "entry_rejected_already_parked");
            return Err(ParkingError::AlreadyParked(plate.to_string()));
        }

        let returning_customer = !self.ledger.paid_tickets(plate).await?.is_empty();

        let in_time = self.clock.now();
        let spot = self.reserve_spot(class).await?;

        let ticket = Ticket::open(spot, class, plate, in_time);
        let ticket = match self.ledger.create(ticket).await {
            Ok(stored) => stored,
            Err(e) => {
                // The spot was never truly taken if the ticket didn't save.
                if let Err(release_err) = self.spots.release(spot).await {
                    error!(spot = %spot, error = %release_err, "entry_compensating_release_failed");
                }
                return Err(e);
            }
        };

        info!(
            plate = %plate,
            class = %class,
            spot = %spot,
            ticket_id = ?ticket.id,
            returning = %returning_customer,
            "ticket_opened"
        );

        Ok(EntryReceipt { ticket, returning_customer })
    }

    /// Pick and conditionally claim a free spot. A lost allocation race
    /// gets one fresh selection before giving up with `NoCapacity`.
    async fn reserve_spot(&self, class: VehicleClass) -> Result<SpotId> {
        for attempt in 0..2 {
            let Some(spot) = self.spots.next_available(class).await? else {
                return Err(ParkingError::NoCapacity(class));
            };
            if self.spots.allocate(spot).await? {
                return Ok(spot);
            }
            debug!(spot = %spot, attempt = %attempt, "spot_allocation_race_lost");
        }
        Err(ParkingError::NoCapacity(class))
    }

    /// Close the open session for a plate: compute the fare, persist the
    /// closure, then release the spot.
    ///
    /// If the closure fails to persist, the spot stays occupied and the
    /// error is surfaced. If the release fails after a persisted closure,
    /// the inconsistency is logged and reported, but the closed ticket
    /// stands.
    pub async fn exit(&self, plate: &str) -> Result<ExitReceipt> {
        let open = self
            .ledger
            .find_open(plate)
            .await?
            .ok_or_else(|| ParkingError::NoOpenTicket(plate.to_string()))?;

        let out_time = self.clock.now();
        let prior_paid = !self.ledger.paid_tickets(plate).await?.is_empty();

        let price = self
            .fare
            .price(open.spot_class, open.in_time, Some(out_time), prior_paid)?;

        let closed = open.close(price, out_time);
        self.ledger.update(&closed).await?;

        let released = match self.spots.release(closed.spot_id).await {
            Ok(ok) => ok,
            Err(e) => {
                error!(spot = %closed.spot_id, error = %e, "spot_release_failed");
                false
            }
        };
        if !released {
            // The ticket is correctly closed; only the occupancy flag is
            // stale. Left for a reconciliation pass, never rolled back.
            error!(
                plate = %plate,
                spot = %closed.spot_id,
                ticket_id = ?closed.id,
                "ticket_closed_spot_still_marked_occupied"
            );
            return Err(ParkingError::Persistence(format!(
                "spot {} could not be released",
                closed.spot_id
            )));
        }

        let discount_applied = prior_paid && price > 0.0;
        info!(
            plate = %plate,
            spot = %closed.spot_id,
            ticket_id = ?closed.id,
            price = %price,
            discount = %discount_applied,
            "ticket_closed"
        );

        Ok(ExitReceipt { ticket: closed, discount_applied })
    }
}
