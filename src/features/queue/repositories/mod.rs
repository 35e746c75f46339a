#[cfg(test)]
mod memory;
mod postgres;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::queue::models::{
    IssuedTicket, NewTicket, PatientKey, QueueCounts, QueueKey, QueueSnapshot, Ticket,
};

#[cfg(test)]
pub use memory::InMemoryQueueRepository;
pub use postgres::PgQueueRepository;

/// Storage port for the queue ledger.
///
/// `issue` is the only write that needs coordination: assigning the next
/// sequence number and inserting the ticket happen as one atomic unit, so
/// concurrent callers on the same queue never share a number.
#[async_trait]
pub trait QueueRepository: Send + Sync {
    /// Assign the next sequence number for the ticket's queue and store it.
    ///
    /// `is_new_patient` is read before the queue's counter is locked, so two
    /// concurrent first tickets for the same card number can both report a
    /// new patient. The flag only drives the receipt advisory.
    async fn issue(&self, ticket: NewTicket) -> Result<IssuedTicket>;

    /// Total and called counts for one queue.
    async fn counts(&self, key: &QueueKey) -> Result<QueueCounts>;

    /// Counts plus display data for the department status board.
    async fn snapshot(&self, key: &QueueKey) -> Result<QueueSnapshot>;

    /// The patient's ticket in a queue, lowest number first if several match.
    async fn find(&self, key: &PatientKey) -> Result<Option<Ticket>>;

    /// Delete every ticket matching the key; returns the number of rows removed.
    async fn delete(&self, key: &PatientKey) -> Result<u64>;
}
