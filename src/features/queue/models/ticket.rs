use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::shared::constants::TICKET_CODE_PREFIX;

/// Database model for a queue ticket
#[derive(Debug, Clone, FromRow)]
pub struct Ticket {
    pub id: Uuid,
    pub card_number: String,
    /// Kept for the clinic record; no queue operation reads it back
    #[allow(dead_code)]
    pub national_id: String,
    pub department_code: String,
    pub exam_date: NaiveDate,
    #[allow(dead_code)]
    pub complaint: String,
    pub sequence_number: i32,
    pub department_name: String,
    pub called: bool,
    pub created_at: DateTime<Utc>,
}

impl Ticket {
    pub fn code(&self) -> String {
        ticket_code(self.sequence_number)
    }
}

/// Printed ticket code, e.g. `A12`
pub fn ticket_code(sequence_number: i32) -> String {
    format!("{}{}", TICKET_CODE_PREFIX, sequence_number)
}

/// Ticket fields known before a sequence number is assigned
#[derive(Debug, Clone)]
pub struct NewTicket {
    pub card_number: String,
    pub national_id: String,
    pub queue: QueueKey,
    pub complaint: String,
    pub department_name: String,
}

/// One queue: a department on one examination day
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueueKey {
    pub department_code: String,
    pub exam_date: NaiveDate,
}

/// A patient's place in one queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientKey {
    pub card_number: String,
    pub queue: QueueKey,
}

#[derive(Debug, Clone)]
pub struct IssuedTicket {
    pub ticket: Ticket,
    /// No earlier ticket carried this card number, in any queue
    pub is_new_patient: bool,
}

/// Aggregate counts for one queue
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, FromRow)]
pub struct QueueCounts {
    pub total: i64,
    pub called: i64,
}

impl QueueCounts {
    /// Tickets not yet called
    pub fn remaining(&self) -> i64 {
        self.total - self.called
    }
}

/// Everything the department status board needs, read in one pass
#[derive(Debug, Clone, Default, PartialEq, Eq, FromRow)]
pub struct QueueSnapshot {
    pub total: i64,
    pub called: i64,
    /// Name stored on the lowest-numbered ticket
    pub department_name: Option<String>,
    /// Highest sequence number already called
    pub last_called_sequence: Option<i32>,
}

impl QueueSnapshot {
    pub fn counts(&self) -> QueueCounts {
        QueueCounts {
            total: self.total,
            called: self.called,
        }
    }
}
