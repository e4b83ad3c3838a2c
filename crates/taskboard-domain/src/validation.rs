//! Input rules shared by every action that names something.

use taskboard_core::{TaskboardError, TaskboardResult};

/// Trim a user-supplied title and reject it when nothing is left.
pub fn required_text(field: &str, value: &str) -> TaskboardResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TaskboardError::Validation(format!(
            "{} can't be empty",
            field
        )));
    }
    Ok(trimmed.to_string())
}

/// Blank descriptions are stored as no description.
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
