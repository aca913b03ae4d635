//! # Feature: Recency Grouping
//!
//! Pure engine that turns an unordered contact collection into ordered,
//! labeled sections by last-contact freshness.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: "now" became an explicit parameter instead of an internal clock read
//! - 1.0.0: Initial release with the four fixed buckets

use chrono::{DateTime, Duration, Utc};

use crate::core::Contact;

/// The four fixed recency buckets, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecencyBucket {
    LastWeek,
    LastMonth,
    Older,
    Never,
}

impl RecencyBucket {
    /// Section header shown above the bucket
    pub fn label(&self) -> &'static str {
        match self {
            RecencyBucket::LastWeek => "Contacted last 7 days",
            RecencyBucket::LastMonth => "Contacted last 30 days",
            RecencyBucket::Older => "Older than 30 days",
            RecencyBucket::Never => "No Last Contact Date",
        }
    }

    /// Classify a contact relative to `now`.
    ///
    /// Boundary instants belong to the later bucket: exactly 7 days old is
    /// `LastMonth`, exactly 30 days old is `Older`. A `last_contact` in the
    /// future still counts as `LastWeek` (elapsed below 7 days).
    pub fn classify(contact: &Contact, now: DateTime<Utc>) -> RecencyBucket {
        let Some(last) = contact.last_contact else {
            return RecencyBucket::Never;
        };
        let elapsed = now - last;
        if elapsed < Duration::days(7) {
            RecencyBucket::LastWeek
        } else if elapsed < Duration::days(30) {
            RecencyBucket::LastMonth
        } else {
            RecencyBucket::Older
        }
    }
}

impl std::fmt::Display for RecencyBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One rendered section: a bucket plus its members, most recent first
#[derive(Debug, Clone, PartialEq)]
pub struct ContactSection {
    pub bucket: RecencyBucket,
    pub contacts: Vec<Contact>,
}

impl ContactSection {
    /// Section header text
    pub fn title(&self) -> &'static str {
        self.bucket.label()
    }
}

/// Group contacts into recency sections, most recent first, empty sections
/// omitted.
///
/// `now` is captured once by the caller and applied across the whole call, so
/// a contact can never straddle two buckets within one invocation. Contacts
/// with a `last_contact` always sort before those without one; never-contacted
/// entries compare equal and keep their relative order (stable sort).
pub fn group_by_recency(contacts: &[Contact], now: DateTime<Utc>) -> Vec<ContactSection> {
    let mut sorted: Vec<Contact> = contacts.to_vec();
    sorted.sort_by(|a, b| match (&a.last_contact, &b.last_contact) {
        (Some(a_last), Some(b_last)) => b_last.cmp(a_last),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });

    let mut week = Vec::new();
    let mut month = Vec::new();
    let mut older = Vec::new();
    let mut never = Vec::new();
    for contact in sorted {
        match RecencyBucket::classify(&contact, now) {
            RecencyBucket::LastWeek => week.push(contact),
            RecencyBucket::LastMonth => month.push(contact),
            RecencyBucket::Older => older.push(contact),
            RecencyBucket::Never => never.push(contact),
        }
    }

    [
        (RecencyBucket::LastWeek, week),
        (RecencyBucket::LastMonth, month),
        (RecencyBucket::Older, older),
        (RecencyBucket::Never, never),
    ]
    .into_iter()
    .filter(|(_, members)| !members.is_empty())
    .map(|(bucket, contacts)| ContactSection { bucket, contacts })
    .collect()
}
