//! Domain records shared across the acquisition pipeline.
//!
//! [`BusinessRecord`] is what source adapters emit and what the aggregator,
//! uniqueness tracker, and contact optimizer operate on. [`LeadRecord`] is the
//! consumer-lead shape accepted by the validator; it is never mutated after
//! construction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A person attached to a business listing.
///
/// `is_primary` is false on extraction; the contact optimizer sets it on
/// exactly one contact per business once optimization has run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub name: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub is_decision_maker: bool,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
}

/// A candidate business produced by a source adapter.
///
/// Optional fields may arrive as empty strings from sloppy sources; the
/// aggregator treats empty as absent when merging (same convention as
/// empty-SKU handling during normalization).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessRecord {
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub review_count: Option<u32>,
    #[serde(default)]
    pub contacts: Vec<ContactRecord>,
    /// Name of the adapter that produced this record. After a merge this is
    /// the `+`-joined list of every contributing source.
    pub source: String,
    #[serde(default)]
    pub source_url: Option<String>,
    pub extracted_at: DateTime<Utc>,
}

impl BusinessRecord {
    /// Creates a record with only a name and source; everything else absent.
    #[must_use]
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: None,
            phone_number: None,
            website: None,
            category: None,
            rating: None,
            review_count: None,
            contacts: Vec::new(),
            source: source.into(),
            source_url: None,
            extracted_at: Utc::now(),
        }
    }

    /// Folds `other` (a later record for the same business name) into `self`.
    ///
    /// Later values overwrite earlier ones, except that a present value is
    /// never replaced by an absent or empty one, and the higher numeric
    /// rating always wins. Contact lists are concatenated; `source` becomes
    /// the `+`-joined list of contributing adapters.
    pub fn merge_from(&mut self, other: BusinessRecord) {
        self.address = prefer_latest(self.address.take(), other.address);
        self.phone_number = prefer_latest(self.phone_number.take(), other.phone_number);
        self.website = prefer_latest(self.website.take(), other.website);
        self.category = prefer_latest(self.category.take(), other.category);
        self.source_url = prefer_latest(self.source_url.take(), other.source_url);

        self.rating = match (self.rating, other.rating) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => b.or(a),
        };
        self.review_count = match (self.review_count, other.review_count) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => b.or(a),
        };

        self.contacts.extend(other.contacts);

        if !other.source.is_empty() && other.source != self.source {
            self.source = format!("{}+{}", self.source, other.source);
        }
        if other.extracted_at > self.extracted_at {
            self.extracted_at = other.extracted_at;
        }
    }
}

/// Later-overwrites-earlier with a non-empty guard: `incoming` wins only when
/// it actually carries a value.
fn prefer_latest(current: Option<String>, incoming: Option<String>) -> Option<String> {
    match incoming.filter(|s| !s.trim().is_empty()) {
        Some(v) => Some(v),
        None => current.filter(|s| !s.trim().is_empty()),
    }
}

/// A consumer lead submitted for validation. Immutable input; the validator
/// reports normalized/suggested values in its result instead of rewriting
/// the record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadRecord {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, source: &str) -> BusinessRecord {
        BusinessRecord::new(name, source)
    }

    #[test]
    fn merge_fills_missing_fields_from_later_record() {
        let mut a = record("Acme Plumbing", "adapterA");
        a.phone_number = Some("555-1234".to_owned());

        let mut b = record("Acme Plumbing", "adapterB");
        b.website = Some("acmeplumbing.com".to_owned());

        a.merge_from(b);
        assert_eq!(a.phone_number.as_deref(), Some("555-1234"));
        assert_eq!(a.website.as_deref(), Some("acmeplumbing.com"));
        assert_eq!(a.source, "adapterA+adapterB");
    }

    #[test]
    fn merge_does_not_overwrite_with_empty_string() {
        let mut a = record("Acme", "adapterA");
        a.phone_number = Some("555-1234".to_owned());

        let mut b = record("Acme", "adapterB");
        b.phone_number = Some("   ".to_owned());

        a.merge_from(b);
        assert_eq!(a.phone_number.as_deref(), Some("555-1234"));
    }

    #[test]
    fn merge_later_value_overwrites_earlier() {
        let mut a = record("Acme", "adapterA");
        a.address = Some("1 Old Rd".to_owned());

        let mut b = record("Acme", "adapterB");
        b.address = Some("2 New Ave".to_owned());

        a.merge_from(b);
        assert_eq!(a.address.as_deref(), Some("2 New Ave"));
    }

    #[test]
    fn merge_keeps_higher_rating() {
        let mut a = record("Acme", "adapterA");
        a.rating = Some(4.5);

        let mut b = record("Acme", "adapterB");
        b.rating = Some(3.9);

        a.merge_from(b);
        assert_eq!(a.rating, Some(4.5));
    }

    #[test]
    fn merge_concatenates_contacts() {
        let contact = |n: &str| ContactRecord {
            name: n.to_owned(),
            position: None,
            email: None,
            phone_number: None,
            is_decision_maker: false,
            company_name: None,
            is_primary: false,
        };
        let mut a = record("Acme", "adapterA");
        a.contacts.push(contact("Jane"));
        let mut b = record("Acme", "adapterB");
        b.contacts.push(contact("Joe"));

        a.merge_from(b);
        assert_eq!(a.contacts.len(), 2);
    }

    #[test]
    fn merge_does_not_duplicate_identical_source_name() {
        let mut a = record("Acme", "adapterA");
        let b = record("Acme", "adapterA");
        a.merge_from(b);
        assert_eq!(a.source, "adapterA");
    }

    #[test]
    fn lead_record_deserializes_without_id() {
        let lead: LeadRecord = serde_json::from_str(
            r#"{"name": "Jane Smith", "email": "jane@example.com"}"#,
        )
        .unwrap();
        assert_eq!(lead.name, "Jane Smith");
        assert!(lead.phone_number.is_empty());
    }
}
