//! # Core Module
//!
//! Core domain types, the category registry, and validation errors for the
//! contact tracker.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Registry resolves unknown category names to the sentinel
//! - 1.0.0: Initial creation with contact, category, and error modules

pub mod category;
pub mod contact;
pub mod error;

// Re-export commonly used items
pub use category::{Category, CategoryFilter, CategoryRegistry, UNTAGGED};
pub use contact::Contact;
pub use error::ValidationError;
