//! Business-uniqueness enforcement.
//!
//! Three independent signals mark a candidate as a duplicate of a previously
//! tracked record: a matching normalized phone number, a matching website
//! hostname, or a fuzzy name match. The first occurrence wins; later matches
//! are kept in an audit list rather than silently dropped.
//!
//! The name heuristic cannot distinguish true franchise branches at
//! different addresses from accidental duplicates. That limitation is
//! intentional pending reliable address comparison; operators review the
//! audit list via [`UniquenessTracker::skipped`].

use std::collections::HashSet;

use leadscout_core::BusinessRecord;

/// Corporate suffixes ignored when comparing business names.
const NAME_STOPLIST: &[&str] = &[
    "llc",
    "inc",
    "corp",
    "corporation",
    "incorporated",
    "ltd",
    "limited",
    "group",
    "services",
    "service",
    "company",
    "co",
    "associates",
    "realty",
    "properties",
    "management",
    "solutions",
    "enterprises",
    "holdings",
    "partners",
];

/// Digits-only phone strings shorter than this are too ambiguous to use as a
/// duplicate signal.
const MIN_PHONE_DIGITS: usize = 6;

/// Why a candidate was considered a duplicate.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "signal", rename_all = "snake_case")]
pub enum DuplicateReason {
    Phone { normalized: String },
    Domain { host: String },
    Name { candidate: String, existing: String },
}

impl std::fmt::Display for DuplicateReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DuplicateReason::Phone { normalized } => write!(f, "phone match ({normalized})"),
            DuplicateReason::Domain { host } => write!(f, "website domain match ({host})"),
            DuplicateReason::Name {
                candidate,
                existing,
            } => write!(f, "name match (\"{candidate}\" ~ \"{existing}\")"),
        }
    }
}

/// A suppressed duplicate retained for operator review.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SkippedDuplicate {
    pub record: BusinessRecord,
    pub reason: DuplicateReason,
}

/// Per-search duplicate detector. State is scoped to one search invocation,
/// never shared across requests.
#[derive(Default)]
pub struct UniquenessTracker {
    seen_phones: HashSet<String>,
    seen_domains: HashSet<String>,
    seen_names: Vec<String>,
    skipped: Vec<SkippedDuplicate>,
}

impl UniquenessTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks `candidate` against everything tracked so far. Does not track.
    #[must_use]
    pub fn is_duplicate(&self, candidate: &BusinessRecord) -> Option<DuplicateReason> {
        if let Some(phone) = candidate.phone_number.as_deref().and_then(normalize_phone) {
            if self.seen_phones.contains(&phone) {
                return Some(DuplicateReason::Phone { normalized: phone });
            }
        }

        if let Some(host) = candidate.website.as_deref().and_then(website_host) {
            if self.seen_domains.contains(&host) {
                return Some(DuplicateReason::Domain { host });
            }
        }

        let candidate_name = strip_corporate_suffixes(&candidate.name);
        if !candidate_name.is_empty() {
            for existing in &self.seen_names {
                if names_match(&candidate_name, existing) {
                    return Some(DuplicateReason::Name {
                        candidate: candidate_name,
                        existing: existing.clone(),
                    });
                }
            }
        }

        None
    }

    /// Registers `record`'s signals so later candidates compare against it.
    pub fn track(&mut self, record: &BusinessRecord) {
        if let Some(phone) = record.phone_number.as_deref().and_then(normalize_phone) {
            self.seen_phones.insert(phone);
        }
        if let Some(host) = record.website.as_deref().and_then(website_host) {
            self.seen_domains.insert(host);
        }
        let name = strip_corporate_suffixes(&record.name);
        if !name.is_empty() {
            self.seen_names.push(name);
        }
    }

    /// Filters `records` in order: first occurrence of each business is kept
    /// and tracked, subsequent matches land in the audit list.
    #[must_use]
    pub fn process(&mut self, records: Vec<BusinessRecord>) -> Vec<BusinessRecord> {
        let mut kept = Vec::with_capacity(records.len());
        for record in records {
            match self.is_duplicate(&record) {
                Some(reason) => {
                    tracing::debug!(
                        business = %record.name,
                        reason = %reason,
                        "duplicate suppressed"
                    );
                    self.skipped.push(SkippedDuplicate { record, reason });
                }
                None => {
                    self.track(&record);
                    kept.push(record);
                }
            }
        }
        kept
    }

    /// Duplicates suppressed so far, for audit/telemetry.
    #[must_use]
    pub fn skipped(&self) -> &[SkippedDuplicate] {
        &self.skipped
    }
}

/// Digits-only phone form, or `None` when too short to be meaningful.
fn normalize_phone(raw: &str) -> Option<String> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    (digits.len() >= MIN_PHONE_DIGITS).then_some(digits)
}

/// Lowercased hostname of a website value, tolerating missing schemes and
/// stripping a leading `www.`.
fn website_host(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let with_scheme = if trimmed.contains("://") {
        trimmed.to_owned()
    } else {
        format!("https://{trimmed}")
    };
    let url = reqwest::Url::parse(&with_scheme).ok()?;
    let host = url.host_str()?.to_lowercase();
    Some(host.strip_prefix("www.").unwrap_or(&host).to_owned())
}

/// Lowercases, strips punctuation, and drops corporate-suffix tokens.
fn strip_corporate_suffixes(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .filter(|token| !NAME_STOPLIST.contains(token))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Equal, or one contains the other. Both inputs are already stripped.
fn names_match(a: &str, b: &str) -> bool {
    a == b || a.contains(b) || b.contains(a)
}
