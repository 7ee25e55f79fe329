//! Closed-ticket journal - writes closed tickets to file
//!
//! Tickets are written in JSONL format (one JSON object per line) to the
//! file specified in config. Journal failures are logged and never affect
//! the session outcome; the ledger remains the system of record.

use crate::domain::types::Ticket;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use tracing::{debug, error, info};

/// Journal writer for closed tickets
pub struct TicketJournal {
    file_path: String,
}

impl TicketJournal {
    pub fn new(file_path: &str) -> Self {
        info!(file_path = %file_path, "journal_initialized");
        Self { file_path: file_path.to_string() }
    }

    /// Write a closed ticket to the journal file
    /// Returns true if successful, false otherwise
    pub fn write_ticket(&self, ticket: &Ticket) -> bool {
        let json = match serde_json::to_string(ticket) {
            Ok(json) => json,
            Err(e) => {
                error!(ticket_id = ?ticket.id, error = %e, "ticket_serialize_failed");
                return false;
            }
        };

        match self.append_line(&json) {
            Ok(()) => {
                info!(
                    ticket_id = ?ticket.id,
                    plate = %ticket.plate,
                    price = %ticket.price,
                    "ticket_journaled"
                );
                true
            }
            Err(e) => {
                error!(
                    ticket_id = ?ticket.id,
                    error = %e,
                    "ticket_journal_failed"
                );
                false
            }
        }
    }

    /// Append a line to the journal file
    fn append_line(&self, line: &str) -> std::io::Result<()> {
        let path = Path::new(&self.file_path);

        // Create parent directories if they don't exist
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;

        writeln!(file, "{}", line)?;
        debug!(file = %self.file_path, bytes = %line.len(), "journal_written");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{SpotId, TicketId, VehicleClass};
    use chrono::{Duration, TimeZone, Utc};
    use std::fs;
    use tempfile::tempdir;

    fn closed_ticket(plate: &str, id: u64) -> Ticket {
        let in_time = Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap();
        let mut ticket = Ticket::open(SpotId(1), VehicleClass::Car, plate, in_time);
        ticket.id = Some(TicketId(id));
        ticket.close(1.5, in_time + Duration::hours(1))
    }

    #[test]
    fn test_journal_new() {
        let journal = TicketJournal::new("test.jsonl");
        assert_eq!(journal.file_path, "test.jsonl");
    }

    #[test]
    fn test_write_ticket() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("tickets.jsonl");
        let journal = TicketJournal::new(file_path.to_str().unwrap());

        assert!(journal.write_ticket(&closed_ticket("AB-123-CD", 1)));

        let content = fs::read_to_string(&file_path).unwrap();
        assert!(content.ends_with('\n'));

        let parsed: serde_json::Value = serde_json::from_str(content.trim()).unwrap();
        assert_eq!(parsed["plate"], "AB-123-CD");
        assert_eq!(parsed["id"], 1);
        assert_eq!(parsed["price"], 1.5);
        assert!(!parsed["out_time"].is_null());
    }

    #[test]
    fn test_append_mode() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("tickets.jsonl");
        let journal = TicketJournal::new(file_path.to_str().unwrap());

        journal.write_ticket(&closed_ticket("AAA", 1));
        journal.write_ticket(&closed_ticket("BBB", 2));

        let content = fs::read_to_string(&file_path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("AAA"));
        assert!(lines[1].contains("BBB"));
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let nested_path = dir.path().join("nested").join("dir").join("tickets.jsonl");
        let journal = TicketJournal::new(nested_path.to_str().unwrap());

        assert!(journal.write_ticket(&closed_ticket("AAA", 1)));
        assert!(nested_path.exists());
    }
}
