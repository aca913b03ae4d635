//! Category registry and the category filter model.
//!
//! The category set is closed at build time and loaded into a registry once at
//! process start. Contacts reference a category by name only; colors and any
//! other display metadata live in the registry, never on the contact.

use serde::{Deserialize, Serialize};

use crate::core::contact::Contact;

/// Sentinel category for contacts with no explicit tag
pub const UNTAGGED: &str = "Untagged";

/// All built-in categories (name, embed-style accent color)
const BUILTIN_CATEGORIES: &[(&str, u32)] = &[
    (UNTAGGED, 0x95A5A6),    // Neutral gray - nothing chosen yet
    ("Family", 0xE74C3C),    // Warm red
    ("Friend", 0x27AE60),    // Friendly green
    ("Colleague", 0x3498DB), // Work blue
];

/// A user-facing label partitioning contacts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    /// Display accent color, unused by core logic
    pub color: u32,
}

/// Fixed category set, built once at startup and read-only afterwards
#[derive(Debug, Clone)]
pub struct CategoryRegistry {
    untagged: Category,
    concrete: Vec<Category>,
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryRegistry {
    pub fn new() -> Self {
        let mut categories = BUILTIN_CATEGORIES.iter().map(|(name, color)| Category {
            name: (*name).to_string(),
            color: *color,
        });
        // BUILTIN_CATEGORIES always lists the sentinel first
        let untagged = categories.next().unwrap_or(Category {
            name: UNTAGGED.to_string(),
            color: 0x95A5A6,
        });
        CategoryRegistry {
            untagged,
            concrete: categories.collect(),
        }
    }

    /// The sentinel category for contacts with no explicit tag
    pub fn untagged(&self) -> &Category {
        &self.untagged
    }

    /// Concrete (non-sentinel) categories in registry order
    pub fn concrete(&self) -> &[Category] {
        &self.concrete
    }

    /// Look up a category by its exact name, sentinel included
    pub fn get(&self, name: &str) -> Option<&Category> {
        if name == self.untagged.name {
            return Some(&self.untagged);
        }
        self.concrete.iter().find(|c| c.name == name)
    }

    /// Resolve a stored category name, mapping unknown names to the sentinel.
    ///
    /// Snapshots can outlive a category rename; reads must never fail on one.
    pub fn resolve(&self, name: &str) -> &Category {
        self.get(name).unwrap_or(&self.untagged)
    }

    /// Validate a category name exists in the registry
    pub fn is_valid(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

/// A category choice offered on the tag bar when filtering the roster
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Match every contact
    All,
    /// Match contacts still carrying the sentinel category
    Untagged,
    /// Match contacts whose category name equals this exactly
    Named(String),
}

impl CategoryFilter {
    pub fn matches(&self, contact: &Contact) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Untagged => contact.is_untagged(),
            CategoryFilter::Named(name) => contact.contact_type == *name,
        }
    }

    /// Label shown on the tag bar
    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Untagged => UNTAGGED,
            CategoryFilter::Named(name) => name,
        }
    }
}
