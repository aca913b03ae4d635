//! User-visible validation failures from the roster write path.
//!
//! These are reported synchronously and never leave partial state behind.
//! Not-found on update/remove is deliberately absent: unknown ids are a
//! silent no-op, not an error.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Name was empty after trimming
    #[error("contact name cannot be empty")]
    EmptyName,
    /// Another contact already uses this name (case-insensitive)
    #[error("a contact named \"{name}\" already exists")]
    DuplicateName { name: String },
}
