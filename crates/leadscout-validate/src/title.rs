//! Job-title normalization.
//!
//! Titles are open-ended free text, so false rejection costs more than
//! false acceptance: anything plausible passes, just with less confidence
//! than a recognized title.

use crate::reference::ReferenceData;
use crate::types::FieldValidation;

/// Alias-table lookup first, canonical-title match second, plausibility
/// check last.
#[must_use]
pub fn validate_title(raw: &str, reference: &ReferenceData) -> FieldValidation {
    let normalized = normalize(raw);
    if normalized.is_empty() {
        return FieldValidation::invalid(0);
    }

    if let Some(canonical) = reference.title_aliases.get(&normalized) {
        return FieldValidation::valid(90).with_normalized(canonical.clone());
    }

    if let Some(canonical) = reference
        .title_aliases
        .values()
        .find(|v| v.eq_ignore_ascii_case(&normalized))
    {
        return FieldValidation::valid(85).with_normalized(canonical.clone());
    }

    if is_plausible(&normalized) {
        return FieldValidation::valid(55);
    }

    FieldValidation::invalid(15)
}

/// Lowercase, collapse whitespace.
fn normalize(raw: &str) -> String {
    raw.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Free-text plausibility: short, mostly alphabetic, no digits.
fn is_plausible(normalized: &str) -> bool {
    let char_count = normalized.chars().count();
    if !(2..=60).contains(&char_count) {
        return false;
    }
    if normalized.chars().any(|c| c.is_ascii_digit()) {
        return false;
    }
    normalized
        .chars()
        .all(|c| c.is_alphabetic() || c.is_whitespace() || "&/-.,'".contains(c))
}
