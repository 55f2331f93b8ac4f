//! Field rules shared by request payloads.

use std::borrow::Cow;

use validator::ValidationError;

fn error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

fn all_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}

/// Ten-digit mobile number.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if all_digits(phone.trim(), 10) {
        Ok(())
    } else {
        Err(error("phone", "Phone number must be exactly 10 digits"))
    }
}

/// Twelve-digit Aadhaar number.
pub fn validate_aadhaar(number: &str) -> Result<(), ValidationError> {
    if all_digits(number.trim(), 12) {
        Ok(())
    } else {
        Err(error("aadhaar", "Aadhaar number must be exactly 12 digits"))
    }
}

pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(error("blank", "This field may not be blank"))
    } else {
        Ok(())
    }
}
