use crate::error::{PartlinkError, PartlinkResult};
use validator::{Validate, ValidationErrors};

pub const MAX_PART_NUMBER_LEN: usize = 100;

pub fn validate_model<T: Validate>(model: &T) -> PartlinkResult<()> {
    match model.validate() {
        Ok(()) => Ok(()),
        Err(errors) => {
            let error_messages = format_validation_errors(&errors);
            Err(PartlinkError::validation("model", error_messages))
        }
    }
}

pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages = Vec::new();

    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            let message = match (&error.message, &*error.code) {
                (Some(message), _) => message.to_string(),
                (None, "length") => format!("Length validation failed for field '{}'", field),
                (None, "url") => format!("Field '{}' must be a valid URL", field),
                (None, "required") => format!("Field '{}' is required", field),
                (None, code) => format!("Validation failed for field '{}': {}", field, code),
            };
            messages.push(message);
        }
    }

    messages.sort();
    messages.join(", ")
}

/// Trims a caller-supplied part number and checks it is usable as a lookup key.
pub fn validate_part_number(part_number: &str) -> PartlinkResult<String> {
    let trimmed = part_number.trim();

    if trimmed.is_empty() {
        return Err(PartlinkError::validation("partNumber", "Part number is required"));
    }

    if trimmed.chars().count() > MAX_PART_NUMBER_LEN {
        return Err(PartlinkError::validation(
            "partNumber",
            format!("Part number must be at most {} characters", MAX_PART_NUMBER_LEN),
        ));
    }

    if trimmed.chars().any(char::is_control) {
        return Err(PartlinkError::validation(
            "partNumber",
            "Part number must not contain control characters",
        ));
    }

    Ok(trimmed.to_string())
}
