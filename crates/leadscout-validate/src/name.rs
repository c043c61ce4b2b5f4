//! Person-name plausibility.

use crate::reference::ReferenceData;
use crate::types::FieldValidation;

/// Structural rule: at least two space-separated parts, each at least two
/// characters. Reference lists only move confidence, never validity.
#[must_use]
pub fn validate_name(raw: &str, reference: &ReferenceData) -> FieldValidation {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return FieldValidation::invalid(0);
    }

    if trimmed.chars().any(|c| c.is_ascii_digit()) {
        return FieldValidation::invalid(15)
            .with_suggestion("names should not contain digits");
    }

    let parts: Vec<&str> = trimmed.split_whitespace().collect();
    if parts.len() < 2 {
        return FieldValidation::invalid(20)
            .with_suggestion("provide both a first and last name");
    }
    if parts.iter().any(|p| p.chars().count() < 2) {
        return FieldValidation::invalid(25)
            .with_suggestion("spell out initials as full name parts");
    }

    let first = parts[0].to_lowercase();
    let last = parts[parts.len() - 1].to_lowercase();

    let mut confidence: i32 = 60;
    let first_known = reference.first_names.contains(&first);
    let last_known = reference.last_names.contains(&last);
    if first_known {
        confidence += 20;
    }
    if last_known {
        confidence += 15;
    }

    let mut result;
    let lists_available =
        !reference.first_names.is_empty() || !reference.last_names.is_empty();
    if lists_available && !first_known && !last_known {
        confidence -= 10;
        result = FieldValidation::valid(clamp(confidence))
            .with_suggestion("name not found in reference lists; verify spelling");
    } else {
        result = FieldValidation::valid(clamp(confidence));
    }

    let title_cased = title_case(&parts);
    if title_cased != trimmed {
        result = result.with_normalized(title_cased);
    }
    result
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp(confidence: i32) -> u8 {
    confidence.clamp(0, 100) as u8
}

fn title_case(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> ReferenceData {
        ReferenceData::builtin()
    }

    #[test]
    fn empty_name_scores_zero() {
        let v = validate_name("", &reference());
        assert!(!v.is_valid);
        assert_eq!(v.confidence, 0);
    }

    #[test]
    fn single_part_is_invalid_with_suggestion() {
        let v = validate_name("Madonna", &reference());
        assert!(!v.is_valid);
        assert!(v.suggestion.is_some());
    }

    #[test]
    fn initials_are_rejected() {
        let v = validate_name("J Smith", &reference());
        assert!(!v.is_valid);
    }

    #[test]
    fn digits_are_rejected() {
        let v = validate_name("John Sm1th", &reference());
        assert!(!v.is_valid);
    }

    #[test]
    fn known_first_and_last_boost_confidence() {
        let known = validate_name("John Smith", &reference());
        let unknown = validate_name("Zxqvar Blorptag", &reference());
        assert!(known.is_valid && unknown.is_valid);
        assert!(known.confidence > unknown.confidence);
        assert_eq!(known.confidence, 95);
        assert_eq!(unknown.confidence, 50);
        assert!(unknown.suggestion.is_some());
    }

    #[test]
    fn normalized_title_case_is_suggested_for_odd_casing() {
        let v = validate_name("john SMITH", &reference());
        assert_eq!(v.normalized.as_deref(), Some("John Smith"));
    }

    #[test]
    fn already_clean_name_has_no_normalized_value() {
        let v = validate_name("John Smith", &reference());
        assert!(v.normalized.is_none());
    }

    #[test]
    fn empty_reference_lists_skip_the_penalty() {
        let v = validate_name("Zxqvar Blorptag", &ReferenceData::empty());
        assert!(v.is_valid);
        assert_eq!(v.confidence, 60);
        assert!(v.suggestion.is_none());
    }
}
