//! # Feature: Roster Search
//!
//! Free-text name filtering combined with a category filter, plus the dynamic
//! set of category choices offered on the tag bar.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false

use crate::core::{CategoryFilter, CategoryRegistry, Contact};

/// Apply the search text and category filter to a contact collection.
///
/// The name match is a case-insensitive substring test; an empty search
/// matches everything. Both predicates must hold. Input order is preserved —
/// ordering is the recency engine's job, downstream of this.
pub fn filter_contacts(
    contacts: &[Contact],
    search_text: &str,
    category: &CategoryFilter,
) -> Vec<Contact> {
    let needle = search_text.to_lowercase();
    contacts
        .iter()
        .filter(|c| c.name.to_lowercase().contains(&needle))
        .filter(|c| category.matches(c))
        .cloned()
        .collect()
}

/// Compute the category choices worth offering for the given roster.
///
/// Always starts with `All`; `Untagged` appears only while at least one
/// contact is untagged, and each concrete registry category appears only
/// while it has members. A choice that would match nothing is never offered.
pub fn available_filters(contacts: &[Contact], registry: &CategoryRegistry) -> Vec<CategoryFilter> {
    let mut filters = vec![CategoryFilter::All];
    if contacts.iter().any(|c| c.is_untagged()) {
        filters.push(CategoryFilter::Untagged);
    }
    for category in registry.concrete() {
        if contacts.iter().any(|c| c.contact_type == category.name) {
            filters.push(CategoryFilter::Named(category.name.clone()));
        }
    }
    filters
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::UNTAGGED;

    fn contact(name: &str, contact_type: &str) -> Contact {
        Contact::new(name, false, contact_type, None)
    }

    fn roster() -> Vec<Contact> {
        vec![
            contact("Adam", UNTAGGED),
            contact("Eve", "Family"),
            contact("Evelyn", "Friend"),
            contact("Steve", "Friend"),
        ]
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let contacts = roster();
        let hits = filter_contacts(&contacts, "EVE", &CategoryFilter::All);
        let names: Vec<&str> = hits.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Eve", "Evelyn", "Steve"]);
    }

    #[test]
    fn test_empty_search_returns_everything_in_order() {
        let contacts = roster();
        let hits = filter_contacts(&contacts, "", &CategoryFilter::All);
        assert_eq!(hits, contacts);
    }

    #[test]
    fn test_no_match_returns_empty() {
        let contacts = roster();
        assert!(filter_contacts(&contacts, "zebra", &CategoryFilter::All).is_empty());
    }

    #[test]
    fn test_untagged_filter_matches_only_sentinel() {
        let contacts = roster();
        let hits = filter_contacts(&contacts, "", &CategoryFilter::Untagged);
        let names: Vec<&str> = hits.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Adam"]);
    }

    #[test]
    fn test_named_filter_matches_exactly() {
        let contacts = roster();
        let hits = filter_contacts(&contacts, "", &CategoryFilter::Named("Friend".to_string()));
        let names: Vec<&str> = hits.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Evelyn", "Steve"]);
    }

    #[test]
    fn test_predicates_are_anded() {
        let contacts = roster();
        let hits = filter_contacts(&contacts, "eve", &CategoryFilter::Named("Friend".to_string()));
        let names: Vec<&str> = hits.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Evelyn", "Steve"]);
    }

    #[test]
    fn test_available_filters_skip_empty_categories() {
        let registry = CategoryRegistry::new();
        let contacts = roster();
        let filters = available_filters(&contacts, &registry);
        assert_eq!(
            filters,
            vec![
                CategoryFilter::All,
                CategoryFilter::Untagged,
                CategoryFilter::Named("Family".to_string()),
                CategoryFilter::Named("Friend".to_string()),
            ]
        );
    }

    #[test]
    fn test_untagged_choice_disappears_when_everyone_is_tagged() {
        let registry = CategoryRegistry::new();
        let contacts = vec![contact("Eve", "Family")];
        let filters = available_filters(&contacts, &registry);
        assert_eq!(
            filters,
            vec![
                CategoryFilter::All,
                CategoryFilter::Named("Family".to_string()),
            ]
        );
    }

    #[test]
    fn test_empty_roster_offers_only_all() {
        let registry = CategoryRegistry::new();
        assert_eq!(available_filters(&[], &registry), vec![CategoryFilter::All]);
    }
}
