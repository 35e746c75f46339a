//! Queue ledger for clinic departments ("poli").
//!
//! Patients take a numbered ticket for a department and examination date,
//! look up how many tickets are still waiting, and cancel their ticket.
//! Numbers run per department per day and are never handed out twice.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/antrian` | Yes | Take a ticket |
//! | GET | `/api/antrian/{kodepoli}/{tanggalperiksa}` | Yes | Department queue status |
//! | GET | `/api/antrian/{nomorkartu}/{kodepoli}/{tanggalperiksa}` | Yes | Patient queue status |
//! | DELETE | `/api/antrian` | Yes | Cancel a ticket |
//!
//! Tickets are marked as called by the clinic's own staff tooling, which
//! writes the `called` column directly.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

pub use models::DepartmentDirectory;
pub use repositories::PgQueueRepository;
pub use services::QueueService;
