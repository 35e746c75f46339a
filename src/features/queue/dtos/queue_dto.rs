use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::shared::validation::{validate_exam_date, validate_not_blank};

/// Request DTO for taking a queue ticket
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct IssueTicketDto {
    /// Patient card number (JKN)
    #[validate(custom(function = "validate_not_blank"))]
    pub nomorkartu: String,

    /// National identity number
    #[validate(custom(function = "validate_not_blank"))]
    pub nik: String,

    /// Department code, e.g. `POL-OBG`
    #[validate(custom(function = "validate_not_blank"))]
    pub kodepoli: String,

    /// Examination date, `YYYY-MM-DD`
    #[validate(custom(function = "validate_exam_date"))]
    pub tanggalperiksa: String,

    /// Free-text complaint
    #[validate(custom(function = "validate_not_blank"))]
    pub keluhan: String,
}

/// A patient's ticket in one queue; used as path params for lookup and as the cancel body
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema, IntoParams)]
#[into_params(parameter_in = Path)]
pub struct PatientTicketDto {
    /// Patient card number (JKN)
    #[validate(custom(function = "validate_not_blank"))]
    pub nomorkartu: String,

    /// Department code
    #[validate(custom(function = "validate_not_blank"))]
    pub kodepoli: String,

    /// Examination date, `YYYY-MM-DD`
    #[validate(custom(function = "validate_exam_date"))]
    pub tanggalperiksa: String,
}

/// Path params for the department status board
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[into_params(parameter_in = Path)]
pub struct DepartmentQueueParams {
    /// Department code
    pub kodepoli: String,
    /// Examination date, `YYYY-MM-DD`
    pub tanggalperiksa: String,
}

/// Receipt returned when a ticket is issued
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TicketReceiptDto {
    #[serde(rename = "nomorantrean")]
    pub ticket_code: String,
    #[serde(rename = "angkaantrean")]
    pub sequence_number: i32,
    #[serde(rename = "namapoli")]
    pub department_name: String,
    #[serde(rename = "sisaantrean")]
    pub remaining_count: i64,
    #[serde(rename = "antreanpanggil")]
    pub called_ticket_code: String,
    #[serde(rename = "keterangan")]
    pub note: String,
}

/// Queue status for one department on one day
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DepartmentQueueStatusDto {
    #[serde(rename = "namapoli")]
    pub department_name: String,
    #[serde(rename = "totalantrean")]
    pub total_count: i64,
    #[serde(rename = "sisaantrean")]
    pub remaining_count: i64,
    #[serde(rename = "antreanpanggil")]
    pub called_ticket_code: String,
    #[serde(rename = "keterangan")]
    pub note: String,
}

/// Queue status as seen by one patient
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PatientQueueStatusDto {
    #[serde(rename = "nomorantrean")]
    pub ticket_code: String,
    #[serde(rename = "namapoli")]
    pub department_name: String,
    #[serde(rename = "sisaantrean")]
    pub remaining_count: i64,
    #[serde(rename = "antreanpanggil")]
    pub called_ticket_code: String,
    #[serde(rename = "keterangan")]
    pub note: String,
}
