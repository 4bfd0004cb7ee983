//! Field limits and validation for projects and their satellites.
//!
//! The deadline rule is the one piece of business validation: a project
//! cannot be saved with a deadline that is already behind the current date.
//! Everything else mirrors ordinary column constraints so callers get a
//! readable message instead of a database error.

use validator::ValidateEmail;

use crate::error::CoreError;
use crate::types::Date;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const MAX_TITLE_LENGTH: usize = 200;
pub const MAX_SENDER_NAME_LENGTH: usize = 150;
pub const MAX_AUTHOR_NAME_LENGTH: usize = 150;
pub const MAX_CATEGORY_NAME_LENGTH: usize = 100;
pub const MAX_EMAIL_LENGTH: usize = 254;
pub const MAX_ORIGINAL_NAME_LENGTH: usize = 255;

/// Message surfaced when a save is attempted with a past deadline.
pub const DEADLINE_IN_PAST: &str = "The deadline cannot be in the past.";

// ---------------------------------------------------------------------------
// Deadline
// ---------------------------------------------------------------------------

/// Reject deadlines strictly earlier than `today`. A deadline of today passes.
pub fn validate_deadline(deadline: Date, today: Date) -> Result<(), CoreError> {
    if deadline < today {
        Err(CoreError::Validation(DEADLINE_IN_PAST.to_string()))
    } else {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Text fields
// ---------------------------------------------------------------------------

/// Require a non-blank value no longer than `max` characters.
fn validate_required_text(field: &str, value: &str, max: usize) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} cannot be empty")));
    }
    if value.chars().count() > max {
        return Err(CoreError::Validation(format!(
            "{field} exceeds maximum length of {max} characters"
        )));
    }
    Ok(())
}

pub fn validate_title(title: &str) -> Result<(), CoreError> {
    validate_required_text("Title", title, MAX_TITLE_LENGTH)
}

pub fn validate_description(description: &str) -> Result<(), CoreError> {
    if description.trim().is_empty() {
        return Err(CoreError::Validation(
            "Description cannot be empty".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_sender_name(name: &str) -> Result<(), CoreError> {
    validate_required_text("Sender name", name, MAX_SENDER_NAME_LENGTH)
}

pub fn validate_author_name(name: &str) -> Result<(), CoreError> {
    validate_required_text("Author name", name, MAX_AUTHOR_NAME_LENGTH)
}

pub fn validate_category_name(name: &str) -> Result<(), CoreError> {
    validate_required_text("Category name", name, MAX_CATEGORY_NAME_LENGTH)
}

pub fn validate_comment_text(text: &str) -> Result<(), CoreError> {
    if text.trim().is_empty() {
        return Err(CoreError::Validation(
            "Comment text cannot be empty".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_contact_email(email: &str) -> Result<(), CoreError> {
    if email.len() > MAX_EMAIL_LENGTH || !email.validate_email() {
        return Err(CoreError::Validation(format!(
            "Invalid contact email '{email}'"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Attachments
// ---------------------------------------------------------------------------

/// Fit a client-supplied file name into [`MAX_ORIGINAL_NAME_LENGTH`]
/// characters, keeping the tail so the extension survives.
pub fn clamp_original_name(name: &str) -> String {
    let len = name.chars().count();
    if len <= MAX_ORIGINAL_NAME_LENGTH {
        return name.to_string();
    }
    name.chars().skip(len - MAX_ORIGINAL_NAME_LENGTH).collect()
}
