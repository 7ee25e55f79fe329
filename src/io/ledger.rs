//! Ticket persistence contract and in-memory reference ledger
//!
//! The ledger owns ticket records: it assigns ids, finds open sessions by
//! plate, persists closures, and serves the loyalty history. Tickets are
//! never deleted. The storage engine behind a production implementation
//! (SQL or otherwise) is its own concern; the orchestrator only sees this
//! trait.

use crate::domain::error::{ParkingError, Result};
use crate::domain::types::{Ticket, TicketId};
use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::debug;

#[async_trait]
pub trait TicketLedger: Send + Sync {
    /// Persist a new open ticket; returns the stored copy with its id.
    async fn create(&self, ticket: Ticket) -> Result<Ticket>;

    /// Most recent open ticket for the plate, if any.
    async fn find_open(&self, plate: &str) -> Result<Option<Ticket>>;

    /// Persist the price and exit time of an existing ticket.
    async fn update(&self, ticket: &Ticket) -> Result<()>;

    /// Closed tickets for the plate, most recent entry first. A closed
    /// zero-price ticket still counts as history.
    async fn paid_tickets(&self, plate: &str) -> Result<Vec<Ticket>>;
}

#[derive(Default)]
struct LedgerState {
    next_id: u64,
    tickets: Vec<Ticket>,
}

/// In-memory ledger. Sequential ids starting at 1.
#[derive(Default)]
pub struct MemoryLedger {
    state: Mutex<LedgerState>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored tickets, open and closed.
    pub fn len(&self) -> usize {
        self.state.lock().tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl TicketLedger for MemoryLedger {
    async fn create(&self, mut ticket: Ticket) -> Result<Ticket> {
        let mut state = self.state.lock();
        state.next_id += 1;
        ticket.id = Some(TicketId(state.next_id));
        state.tickets.push(ticket.clone());
        debug!(ticket_id = %state.next_id, plate = %ticket.plate, "ticket_created");
        Ok(ticket)
    }

    async fn find_open(&self, plate: &str) -> Result<Option<Ticket>> {
        let state = self.state.lock();
        Ok(state
            .tickets
            .iter()
            .filter(|t| t.plate == plate && t.is_open())
            .max_by_key(|t| t.in_time)
            .cloned())
    }

    async fn update(&self, ticket: &Ticket) -> Result<()> {
        let id = ticket
            .id
            .ok_or_else(|| ParkingError::Persistence("cannot update a ticket without an id".to_string()))?;

        let mut state = self.state.lock();
        match state.tickets.iter_mut().find(|t| t.id == Some(id)) {
            Some(stored) => {
                *stored = ticket.clone();
                Ok(())
            }
            None => Err(ParkingError::Persistence(format!("ticket {id} not found"))),
        }
    }

    async fn paid_tickets(&self, plate: &str) -> Result<Vec<Ticket>> {
        let state = self.state.lock();
        let mut closed: Vec<Ticket> = state
            .tickets
            .iter()
            .filter(|t| t.plate == plate && !t.is_open())
            .cloned()
            .collect();
        closed.sort_by(|a, b| b.in_time.cmp(&a.in_time));
        Ok(closed)
    }
}
