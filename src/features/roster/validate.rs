//! Write-path validation for the roster.
//!
//! The duplicate-name guard runs before `add`/`update`, so those operations
//! never have to fail on a collision themselves.

use crate::core::{Contact, ValidationError};

/// Trim a candidate name, rejecting names empty afterwards
pub fn normalize_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(trimmed.to_string())
}

/// Reject a candidate name already used by another contact.
///
/// Comparison is case-insensitive. `exclude_id` names the contact being
/// edited, which may keep its own name in any casing.
pub fn ensure_unique_name(
    contacts: &[Contact],
    candidate: &str,
    exclude_id: Option<&str>,
) -> Result<(), ValidationError> {
    let wanted = candidate.trim().to_lowercase();
    let collision = contacts
        .iter()
        .any(|c| exclude_id != Some(c.id.as_str()) && c.name.to_lowercase() == wanted);
    if collision {
        return Err(ValidationError::DuplicateName {
            name: candidate.trim().to_string(),
        });
    }
    Ok(())
}
