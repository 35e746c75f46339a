use std::borrow::Cow;

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

use crate::shared::constants::EXAM_DATE_FORMAT;

lazy_static! {
    /// Regex for validating department codes
    /// Uppercase alphanumeric segments separated by single hyphens
    /// - Valid: "POL-OBG", "ANA", "POL-01"
    /// - Invalid: "-POL", "POL-", "POL--OBG", "pol-obg", "POL OBG"
    pub static ref DEPARTMENT_CODE_REGEX: Regex = Regex::new(r"^[A-Z0-9]+(?:-[A-Z0-9]+)*$").unwrap();

    /// Strict ISO calendar date shape, checked before parsing
    static ref EXAM_DATE_REGEX: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
}

/// Rejects empty and whitespace-only strings
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some(Cow::Borrowed("must not be blank"));
        return Err(err);
    }
    Ok(())
}

/// Rejects anything that is not a real `YYYY-MM-DD` calendar date
pub fn validate_exam_date(value: &str) -> Result<(), ValidationError> {
    parse_exam_date(value).map(|_| ()).ok_or_else(|| {
        let mut err = ValidationError::new("date");
        err.message = Some(Cow::Borrowed("must be a date in YYYY-MM-DD format"));
        err
    })
}

pub fn parse_exam_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if !EXAM_DATE_REGEX.is_match(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, EXAM_DATE_FORMAT).ok()
}
