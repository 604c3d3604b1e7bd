pub mod handlers;
pub mod store;

use crate::errors::AppError;

pub const MAX_MESSAGE_CHARS: usize = 4000;

/// Trims a chat message and rejects blank or oversized input.
pub fn normalize_message(raw: &str) -> Result<&str, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation("Message cannot be empty".to_string()));
    }
    if trimmed.chars().count() > MAX_MESSAGE_CHARS {
        return Err(AppError::Validation(format!(
            "Message cannot exceed {MAX_MESSAGE_CHARS} characters"
        )));
    }
    Ok(trimmed)
}
