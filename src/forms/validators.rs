//! Field-level validators shared by the venue, artist and show forms.

use std::borrow::Cow;

use chrono::NaiveDateTime;
use serde_json::Value;
use validator::ValidationError;

use crate::db::enums::{Genre, State};

/// Formats accepted for a submitted show start time, tried in order.
pub const START_TIME_INPUT_FORMATS: [&str; 3] =
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

pub fn validate_required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(invalid("required", "This field is required."));
    }
    Ok(())
}

/// Reads a submitted row id, given either as a JSON number or as text.
/// Ids are assigned from 1, so anything lower is rejected.
pub fn parse_id(value: &Value) -> Result<i32, ValidationError> {
    let id = match value {
        Value::Null => return Err(invalid("required", "This field is required.")),
        Value::String(text) if text.trim().is_empty() => {
            return Err(invalid("required", "This field is required."))
        }
        Value::String(text) => text.trim().parse::<i32>().ok(),
        Value::Number(number) => number.as_i64().and_then(|n| i32::try_from(n).ok()),
        _ => None,
    };

    match id {
        Some(id) if id > 0 => Ok(id),
        _ => Err(invalid("id", "Not a valid id.")),
    }
}

pub fn validate_state(value: &str) -> Result<(), ValidationError> {
    match State::from_str(value) {
        Some(_) => Ok(()),
        None => Err(invalid("state", "Not a valid choice.")),
    }
}

pub fn validate_genres(values: &[String]) -> Result<(), ValidationError> {
    if values.is_empty() {
        return Err(invalid("required", "This field is required."));
    }
    if values.iter().any(|g| Genre::from_str(g).is_none()) {
        return Err(invalid("genres", "Not a valid choice."));
    }
    Ok(())
}

/// Accepts a ten digit number that libphonenumber considers valid once the
/// North American `+1` country code is prepended. N11 service codes are
/// never assignable as an area code or exchange.
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let digits = value.as_bytes();
    if digits.len() != 10 || !digits.iter().all(u8::is_ascii_digit) {
        return Err(invalid("phone", "Invalid phone number."));
    }

    let is_n11 = |code: &[u8]| code[1] == b'1' && code[2] == b'1';
    if is_n11(&digits[0..3]) || is_n11(&digits[3..6]) {
        return Err(invalid("phone", "Invalid phone number."));
    }

    match phonenumber::parse(None, format!("+1{}", value)) {
        Ok(number) if phonenumber::is_valid(&number) => Ok(()),
        _ => Err(invalid("phone", "Invalid phone number.")),
    }
}

pub fn parse_start_time(value: &str) -> Option<NaiveDateTime> {
    START_TIME_INPUT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value.trim(), format).ok())
}

pub fn validate_start_time(value: &str) -> Result<NaiveDateTime, ValidationError> {
    parse_start_time(value).ok_or_else(|| invalid("start_time", "Not a valid datetime value."))
}
