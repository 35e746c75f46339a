use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::QueueRepository;
use crate::core::error::Result;
use crate::features::queue::models::{
    IssuedTicket, NewTicket, PatientKey, QueueCounts, QueueKey, QueueSnapshot, Ticket,
};

#[derive(Default)]
struct LedgerState {
    tickets: Vec<Ticket>,
    counters: HashMap<QueueKey, i32>,
}

/// Queue storage held in process memory, with the same numbering rules as Postgres
#[derive(Default)]
pub struct InMemoryQueueRepository {
    state: Mutex<LedgerState>,
}

impl InMemoryQueueRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stand-in for the staff tool that calls patients in
    pub async fn mark_called(&self, key: &QueueKey, sequence_number: i32) -> bool {
        let mut state = self.state.lock().await;
        match state
            .tickets
            .iter_mut()
            .find(|t| in_queue(t, key) && t.sequence_number == sequence_number)
        {
            Some(ticket) => {
                ticket.called = true;
                true
            }
            None => false,
        }
    }

    /// Tickets of one queue in issuance order
    pub async fn tickets_in(&self, key: &QueueKey) -> Vec<Ticket> {
        let state = self.state.lock().await;
        let mut tickets: Vec<Ticket> = state
            .tickets
            .iter()
            .filter(|t| in_queue(t, key))
            .cloned()
            .collect();
        tickets.sort_by_key(|t| t.sequence_number);
        tickets
    }
}

fn in_queue(ticket: &Ticket, key: &QueueKey) -> bool {
    ticket.department_code == key.department_code && ticket.exam_date == key.exam_date
}

fn matches_patient(ticket: &Ticket, key: &PatientKey) -> bool {
    ticket.card_number == key.card_number && in_queue(ticket, &key.queue)
}

#[async_trait]
impl QueueRepository for InMemoryQueueRepository {
    async fn issue(&self, ticket: NewTicket) -> Result<IssuedTicket> {
        let mut state = self.state.lock().await;

        let is_new_patient = !state
            .tickets
            .iter()
            .any(|t| t.card_number == ticket.card_number);

        let highest_stored = state
            .tickets
            .iter()
            .filter(|t| in_queue(t, &ticket.queue))
            .map(|t| t.sequence_number)
            .max()
            .unwrap_or(0);
        let counter = state
            .counters
            .entry(ticket.queue.clone())
            .or_insert(highest_stored);
        *counter += 1;
        let sequence_number = *counter;

        let stored = Ticket {
            id: Uuid::now_v7(),
            card_number: ticket.card_number,
            national_id: ticket.national_id,
            department_code: ticket.queue.department_code,
            exam_date: ticket.queue.exam_date,
            complaint: ticket.complaint,
            sequence_number,
            department_name: ticket.department_name,
            called: false,
            created_at: Utc::now(),
        };
        state.tickets.push(stored.clone());

        Ok(IssuedTicket {
            ticket: stored,
            is_new_patient,
        })
    }

    async fn counts(&self, key: &QueueKey) -> Result<QueueCounts> {
        let state = self.state.lock().await;
        let (total, called) = state
            .tickets
            .iter()
            .filter(|t| in_queue(t, key))
            .fold((0, 0), |(total, called), t| {
                (total + 1, called + i64::from(t.called))
            });
        Ok(QueueCounts { total, called })
    }

    async fn snapshot(&self, key: &QueueKey) -> Result<QueueSnapshot> {
        let state = self.state.lock().await;
        let tickets: Vec<&Ticket> = state.tickets.iter().filter(|t| in_queue(t, key)).collect();

        Ok(QueueSnapshot {
            total: tickets.len() as i64,
            called: tickets.iter().filter(|t| t.called).count() as i64,
            department_name: tickets
                .iter()
                .min_by_key(|t| t.sequence_number)
                .map(|t| t.department_name.clone()),
            last_called_sequence: tickets
                .iter()
                .filter(|t| t.called)
                .map(|t| t.sequence_number)
                .max(),
        })
    }

    async fn find(&self, key: &PatientKey) -> Result<Option<Ticket>> {
        let state = self.state.lock().await;
        Ok(state
            .tickets
            .iter()
            .filter(|t| matches_patient(t, key))
            .min_by_key(|t| t.sequence_number)
            .cloned())
    }

    async fn delete(&self, key: &PatientKey) -> Result<u64> {
        let mut state = self.state.lock().await;
        let before = state.tickets.len();
        state.tickets.retain(|t| !matches_patient(t, key));
        Ok((before - state.tickets.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn queue() -> QueueKey {
        QueueKey {
            department_code: "POL-OBG".to_string(),
            exam_date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        }
    }

    fn new_ticket(card_number: &str, department_name: &str) -> NewTicket {
        NewTicket {
            card_number: card_number.to_string(),
            national_id: "3171234567890001".to_string(),
            queue: queue(),
            complaint: "Kontrol".to_string(),
            department_name: department_name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_snapshot_is_one_consistent_view() {
        let repository = InMemoryQueueRepository::new();
        repository.issue(new_ticket("JKN1", "Poli Kandungan")).await.unwrap();
        repository.issue(new_ticket("JKN2", "Poli Obgyn")).await.unwrap();
        repository.issue(new_ticket("JKN3", "Poli Obgyn")).await.unwrap();
        assert!(repository.mark_called(&queue(), 2).await);

        let snapshot = repository.snapshot(&queue()).await.unwrap();

        assert_eq!(
            snapshot,
            QueueSnapshot {
                total: 3,
                called: 1,
                department_name: Some("Poli Kandungan".to_string()),
                last_called_sequence: Some(2),
            }
        );
        assert_eq!(snapshot.counts(), repository.counts(&queue()).await.unwrap());
    }

    #[tokio::test]
    async fn test_empty_snapshot() {
        let repository = InMemoryQueueRepository::new();

        let snapshot = repository.snapshot(&queue()).await.unwrap();

        assert_eq!(snapshot, QueueSnapshot::default());
    }
}
