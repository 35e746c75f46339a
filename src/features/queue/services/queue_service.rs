use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use validator::Validate;

use crate::core::config::QueueConfig;
use crate::core::database;
use crate::core::error::{AppError, Result};
use crate::features::queue::dtos::{
    DepartmentQueueStatusDto, IssueTicketDto, PatientQueueStatusDto, PatientTicketDto,
    TicketReceiptDto,
};
use crate::features::queue::models::{
    ticket_code, DepartmentDirectory, IssuedTicket, NewTicket, PatientKey, QueueKey,
};
use crate::features::queue::repositories::QueueRepository;
use crate::shared::constants::{MESSAGE_NEW_PATIENT, MESSAGE_TICKET_NOT_FOUND};
use crate::shared::validation::parse_exam_date;

/// Service for the queue ledger: numbering, status and cancellation
pub struct QueueService {
    repository: Arc<dyn QueueRepository>,
    departments: DepartmentDirectory,
    max_retries: u32,
    retry_backoff: Duration,
    legacy_not_found_status: bool,
}

impl QueueService {
    pub fn new(repository: Arc<dyn QueueRepository>, config: &QueueConfig) -> Self {
        Self {
            repository,
            departments: config.departments.clone(),
            max_retries: config.issue_max_retries,
            retry_backoff: config.issue_retry_backoff,
            legacy_not_found_status: config.legacy_not_found_status,
        }
    }

    /// Whether "not found" should be answered with HTTP 201
    pub fn legacy_not_found_status(&self) -> bool {
        self.legacy_not_found_status
    }

    /// Issue the next ticket of a department's queue for the given day
    pub async fn issue_ticket(&self, dto: IssueTicketDto) -> Result<TicketReceiptDto> {
        dto.validate()?;

        let department_code = dto.kodepoli.trim().to_string();
        let department_name = self
            .departments
            .name_of(&department_code)
            .ok_or_else(|| AppError::Validation(format!("Unknown kodepoli '{}'", department_code)))?
            .to_string();

        let new_ticket = NewTicket {
            card_number: dto.nomorkartu.trim().to_string(),
            national_id: dto.nik.trim().to_string(),
            queue: QueueKey {
                department_code,
                exam_date: exam_date(&dto.tanggalperiksa)?,
            },
            complaint: dto.keluhan.trim().to_string(),
            department_name,
        };

        let IssuedTicket {
            ticket,
            is_new_patient,
        } = self.issue_with_retry(new_ticket).await?;

        tracing::info!(
            "Ticket issued: id={}, code={}, poli={}, date={}, card={}, new_patient={}, at={}",
            ticket.id,
            ticket.code(),
            ticket.department_code,
            ticket.exam_date,
            ticket.card_number,
            is_new_patient,
            ticket.created_at
        );

        let counts = self
            .repository
            .counts(&QueueKey {
                department_code: ticket.department_code.clone(),
                exam_date: ticket.exam_date,
            })
            .await?;

        Ok(TicketReceiptDto {
            ticket_code: ticket.code(),
            sequence_number: ticket.sequence_number,
            department_name: ticket.department_name,
            remaining_count: counts.remaining(),
            called_ticket_code: String::new(),
            note: if is_new_patient {
                MESSAGE_NEW_PATIENT.to_string()
            } else {
                String::new()
            },
        })
    }

    /// Queue status board for one department on one day
    pub async fn department_status(
        &self,
        department_code: &str,
        exam_date_raw: &str,
    ) -> Result<DepartmentQueueStatusDto> {
        let key = QueueKey {
            department_code: department_code.trim().to_string(),
            exam_date: exam_date(exam_date_raw)?,
        };

        let snapshot = self.repository.snapshot(&key).await?;
        let counts = snapshot.counts();

        Ok(DepartmentQueueStatusDto {
            department_name: snapshot.department_name.unwrap_or_default(),
            total_count: counts.total,
            remaining_count: counts.remaining(),
            called_ticket_code: snapshot
                .last_called_sequence
                .map(ticket_code)
                .unwrap_or_default(),
            note: String::new(),
        })
    }

    /// A patient's ticket and the remaining count of its queue
    pub async fn patient_status(&self, dto: PatientTicketDto) -> Result<PatientQueueStatusDto> {
        let key = patient_key(&dto)?;

        let ticket = self
            .repository
            .find(&key)
            .await?
            .ok_or_else(|| AppError::NotFound(MESSAGE_TICKET_NOT_FOUND.to_string()))?;

        let counts = self.repository.counts(&key.queue).await?;

        Ok(PatientQueueStatusDto {
            ticket_code: ticket.code(),
            called_ticket_code: if ticket.called {
                ticket.code()
            } else {
                String::new()
            },
            department_name: ticket.department_name,
            remaining_count: counts.remaining(),
            note: String::new(),
        })
    }

    /// Cancel every ticket the patient holds in the queue
    pub async fn cancel_ticket(&self, dto: PatientTicketDto) -> Result<u64> {
        let key = patient_key(&dto)?;

        let deleted = self.repository.delete(&key).await?;
        if deleted == 0 {
            return Err(AppError::NotFound(MESSAGE_TICKET_NOT_FOUND.to_string()));
        }

        tracing::info!(
            "Ticket cancelled: card={}, poli={}, date={}, rows={}",
            key.card_number,
            key.queue.department_code,
            key.queue.exam_date,
            deleted
        );

        Ok(deleted)
    }

    async fn issue_with_retry(&self, ticket: NewTicket) -> Result<IssuedTicket> {
        let mut attempt = 0;
        loop {
            match self.repository.issue(ticket.clone()).await {
                Ok(issued) => return Ok(issued),
                Err(err) if is_retryable(&err) && attempt < self.max_retries => {
                    attempt += 1;
                    tracing::warn!(
                        "Sequence assignment for {} on {} failed (attempt {}/{}): {}",
                        ticket.queue.department_code,
                        ticket.queue.exam_date,
                        attempt,
                        self.max_retries,
                        err
                    );
                    tokio::time::sleep(self.retry_backoff * attempt).await;
                }
                Err(err) if is_retryable(&err) => {
                    tracing::error!(
                        "Giving up on sequence assignment for {} on {}: {}",
                        ticket.queue.department_code,
                        ticket.queue.exam_date,
                        err
                    );
                    return Err(AppError::Conflict(
                        "Queue is busy, please retry".to_string(),
                    ));
                }
                Err(err) => return Err(err),
            }
        }
    }
}

fn is_retryable(err: &AppError) -> bool {
    match err {
        AppError::Conflict(_) => true,
        AppError::Database(e) => database::is_transient(e),
        _ => false,
    }
}

fn exam_date(raw: &str) -> Result<NaiveDate> {
    parse_exam_date(raw).ok_or_else(|| {
        AppError::Validation(format!(
            "tanggalperiksa '{}' must be a date in YYYY-MM-DD format",
            raw
        ))
    })
}

fn patient_key(dto: &PatientTicketDto) -> Result<PatientKey> {
    dto.validate()?;

    Ok(PatientKey {
        card_number: dto.nomorkartu.trim().to_string(),
        queue: QueueKey {
            department_code: dto.kodepoli.trim().to_string(),
            exam_date: exam_date(&dto.tanggalperiksa)?,
        },
    })
}
