//! IO modules - collaborator seams and external interfaces
//!
//! This module contains everything the session core talks to:
//! - `spots` - Spot-availability contract and in-memory pool
//! - `ledger` - Ticket persistence contract and in-memory ledger
//! - `journal` - Closed-ticket output to file (JSONL format)
//! - `console` - Operator console (menu loop, raw-input validation)

pub mod console;
pub mod journal;
pub mod ledger;
pub mod spots;

// Re-export commonly used types
pub use console::Console;
pub use journal::TicketJournal;
pub use ledger::{MemoryLedger, TicketLedger};
pub use spots::{MemorySpotPool, SpotAllocator};
