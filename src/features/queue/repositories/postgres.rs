use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::QueueRepository;
use crate::core::error::{AppError, Result};
use crate::features::queue::models::{
    IssuedTicket, NewTicket, PatientKey, QueueCounts, QueueKey, QueueSnapshot, Ticket,
};

const TICKET_COLUMNS: &str = r#"
    id, card_number, national_id, department_code, exam_date, complaint,
    sequence_number, department_name, called, created_at
"#;

#[derive(Clone, Debug)]
pub struct PgQueueRepository {
    pool: PgPool,
}

impl PgQueueRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QueueRepository for PgQueueRepository {
    async fn issue(&self, ticket: NewTicket) -> Result<IssuedTicket> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            tracing::error!("Failed to start issue transaction: {:?}", e);
            AppError::Database(e)
        })?;

        let is_new_patient: bool = sqlx::query_scalar(
            "SELECT NOT EXISTS (SELECT 1 FROM queue_tickets WHERE card_number = $1)",
        )
        .bind(&ticket.card_number)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to check patient history: {:?}", e);
            AppError::Database(e)
        })?;

        // The counter row is locked until commit, serializing issuers of the same queue.
        // A fresh counter starts above any tickets that predate it.
        let sequence_number: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO queue_counters (department_code, exam_date, last_number)
            SELECT $1, $2, COALESCE(MAX(sequence_number), 0) + 1
            FROM queue_tickets
            WHERE department_code = $1 AND exam_date = $2
            ON CONFLICT (department_code, exam_date) DO UPDATE
                SET last_number = queue_counters.last_number + 1,
                    updated_at = NOW()
            RETURNING last_number
            "#,
        )
        .bind(&ticket.queue.department_code)
        .bind(ticket.queue.exam_date)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to assign sequence number: {:?}", e);
            AppError::Database(e)
        })?;

        let inserted = sqlx::query_as::<_, Ticket>(&format!(
            r#"
            INSERT INTO queue_tickets (
                id, card_number, national_id, department_code, exam_date, complaint,
                sequence_number, department_name, called
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, FALSE)
            RETURNING {TICKET_COLUMNS}
            "#
        ))
        .bind(Uuid::now_v7())
        .bind(&ticket.card_number)
        .bind(&ticket.national_id)
        .bind(&ticket.queue.department_code)
        .bind(ticket.queue.exam_date)
        .bind(&ticket.complaint)
        .bind(sequence_number)
        .bind(&ticket.department_name)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert ticket: {:?}", e);
            AppError::Database(e)
        })?;

        tx.commit().await.map_err(|e| {
            tracing::error!("Failed to commit issue transaction: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(IssuedTicket {
            ticket: inserted,
            is_new_patient,
        })
    }

    async fn counts(&self, key: &QueueKey) -> Result<QueueCounts> {
        sqlx::query_as::<_, QueueCounts>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE called) AS called
            FROM queue_tickets
            WHERE department_code = $1 AND exam_date = $2
            "#,
        )
        .bind(&key.department_code)
        .bind(key.exam_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count queue: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn snapshot(&self, key: &QueueKey) -> Result<QueueSnapshot> {
        sqlx::query_as::<_, QueueSnapshot>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE called) AS called,
                (ARRAY_AGG(department_name ORDER BY sequence_number ASC))[1] AS department_name,
                MAX(sequence_number) FILTER (WHERE called) AS last_called_sequence
            FROM queue_tickets
            WHERE department_code = $1 AND exam_date = $2
            "#,
        )
        .bind(&key.department_code)
        .bind(key.exam_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to read queue snapshot: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn find(&self, key: &PatientKey) -> Result<Option<Ticket>> {
        sqlx::query_as::<_, Ticket>(&format!(
            r#"
            SELECT {TICKET_COLUMNS}
            FROM queue_tickets
            WHERE card_number = $1 AND department_code = $2 AND exam_date = $3
            ORDER BY sequence_number ASC
            LIMIT 1
            "#
        ))
        .bind(&key.card_number)
        .bind(&key.queue.department_code)
        .bind(key.queue.exam_date)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to find ticket: {:?}", e);
            AppError::Database(e)
        })
    }

    async fn delete(&self, key: &PatientKey) -> Result<u64> {
        let result = sqlx::query(
            r#"
            DELETE FROM queue_tickets
            WHERE card_number = $1 AND department_code = $2 AND exam_date = $3
            "#,
        )
        .bind(&key.card_number)
        .bind(&key.queue.department_code)
        .bind(key.queue.exam_date)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to delete ticket: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(result.rows_affected())
    }
}
