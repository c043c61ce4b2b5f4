//! US street-address heuristics.
//!
//! No canonical address database is consulted; each recognizable component
//! contributes a fixed confidence increment. Component parsing is
//! best-effort and never blocks the verdict.

use crate::reference::ReferenceData;
use crate::types::FieldValidation;

const BASE_CONFIDENCE: i32 = 10;
const LEADING_NUMBER_BONUS: i32 = 25;
const STREET_TYPE_BONUS: i32 = 25;
const STATE_BONUS: i32 = 20;
const ZIP_BONUS: i32 = 20;
/// Confidence at or above which the address counts as valid.
const VALID_THRESHOLD: i32 = 60;

/// Opportunistically parsed address components.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct AddressComponents {
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
}

/// Presence-of-structure scoring: leading house number, a street-type token,
/// a state code, and a five-digit ZIP each add a fixed increment.
#[must_use]
pub fn validate_address(raw: &str, reference: &ReferenceData) -> FieldValidation {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return FieldValidation::invalid(0);
    }

    let mut confidence = BASE_CONFIDENCE;

    if leading_number(trimmed) {
        confidence += LEADING_NUMBER_BONUS;
    }
    if has_street_type(trimmed, reference) {
        confidence += STREET_TYPE_BONUS;
    }
    if find_state(trimmed, reference).is_some() {
        confidence += STATE_BONUS;
    }
    if find_zip(trimmed).is_some() {
        confidence += ZIP_BONUS;
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let confidence_u8 = confidence.clamp(0, 100) as u8;

    let mut result = if confidence >= VALID_THRESHOLD {
        FieldValidation::valid(confidence_u8)
    } else {
        FieldValidation::invalid(confidence_u8)
    };

    let components = parse_components(trimmed, reference);
    if let Some(rendered) = render(&components) {
        if rendered != trimmed {
            result = result.with_normalized(rendered);
        }
    }
    result
}

/// Best-effort split into street / city / state / ZIP.
#[must_use]
pub fn parse_components(raw: &str, reference: &ReferenceData) -> AddressComponents {
    let pieces: Vec<&str> = raw.split(',').map(str::trim).filter(|p| !p.is_empty()).collect();

    let street = pieces
        .first()
        .filter(|p| leading_number(p))
        .map(|p| (*p).to_owned());

    // The city is the piece after the street, unless it is the state/ZIP
    // trailer itself.
    let city = pieces
        .get(1)
        .filter(|p| find_state_in_piece(p, reference).is_none() && find_zip(p).is_none())
        .map(|p| (*p).to_owned());

    AddressComponents {
        street,
        city,
        state: find_state(raw, reference),
        zip: find_zip(raw),
    }
}

fn leading_number(s: &str) -> bool {
    s.split_whitespace()
        .next()
        .is_some_and(|token| !token.is_empty() && token.chars().all(|c| c.is_ascii_digit()))
}

fn has_street_type(s: &str, reference: &ReferenceData) -> bool {
    s.split_whitespace()
        .map(|token| token.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .any(|token| reference.street_types.contains(&token))
}

/// Looks for a `", ST"` style state code anywhere in the address.
fn find_state(s: &str, reference: &ReferenceData) -> Option<String> {
    s.split(',')
        .skip(1)
        .find_map(|piece| find_state_in_piece(piece, reference))
}

fn find_state_in_piece(piece: &str, reference: &ReferenceData) -> Option<String> {
    piece
        .split_whitespace()
        .map(|token| token.trim_matches(|c: char| !c.is_alphanumeric()))
        .find(|token| token.len() == 2 && reference.state_codes.contains(&token.to_uppercase()))
        .map(str::to_uppercase)
}

fn find_zip(s: &str) -> Option<String> {
    s.split_whitespace()
        .map(|token| token.trim_matches(|c: char| !c.is_alphanumeric()))
        .find(|token| token.len() == 5 && token.chars().all(|c| c.is_ascii_digit()))
        .map(ToOwned::to_owned)
}

fn render(components: &AddressComponents) -> Option<String> {
    let street = components.street.as_deref()?;
    let mut out = street.to_owned();
    if let Some(city) = &components.city {
        out.push_str(", ");
        out.push_str(city);
    }
    if let Some(state) = &components.state {
        out.push_str(", ");
        out.push_str(state);
    }
    if let Some(zip) = &components.zip {
        out.push(' ');
        out.push_str(zip);
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> ReferenceData {
        ReferenceData::builtin()
    }

    #[test]
    fn empty_address_scores_zero() {
        let v = validate_address("", &reference());
        assert!(!v.is_valid);
        assert_eq!(v.confidence, 0);
    }

    #[test]
    fn full_address_scores_maximum() {
        let v = validate_address("123 Main Street, New York, NY 10001", &reference());
        assert!(v.is_valid);
        assert_eq!(v.confidence, 100);
    }

    #[test]
    fn street_only_is_below_threshold() {
        let v = validate_address("Main Street", &reference());
        assert!(!v.is_valid, "a street type alone should not validate");
        assert_eq!(v.confidence, 35);
    }

    #[test]
    fn number_and_street_type_reach_threshold() {
        let v = validate_address("456 Oak Avenue", &reference());
        assert!(v.is_valid);
        assert_eq!(v.confidence, 60);
    }

    #[test]
    fn components_are_parsed_from_full_address() {
        let c = parse_components("123 Main St, Austin, TX 78701", &reference());
        assert_eq!(c.street.as_deref(), Some("123 Main St"));
        assert_eq!(c.city.as_deref(), Some("Austin"));
        assert_eq!(c.state.as_deref(), Some("TX"));
        assert_eq!(c.zip.as_deref(), Some("78701"));
    }

    #[test]
    fn components_without_city() {
        let c = parse_components("123 Main St, TX 78701", &reference());
        assert_eq!(c.street.as_deref(), Some("123 Main St"));
        assert!(c.city.is_none());
        assert_eq!(c.state.as_deref(), Some("TX"));
    }

    #[test]
    fn lowercase_state_is_recognized_and_uppercased() {
        let c = parse_components("123 Main St, Austin, tx 78701", &reference());
        assert_eq!(c.state.as_deref(), Some("TX"));
    }

    #[test]
    fn state_requires_a_comma_separated_piece() {
        // "ST" street-type token before any comma must not read as a state.
        let c = parse_components("123 Main St", &reference());
        assert!(c.state.is_none());
    }

    #[test]
    fn zip_must_be_exactly_five_digits() {
        assert!(find_zip("123456").is_none());
        assert!(find_zip("1234").is_none());
        assert_eq!(find_zip("78701").as_deref(), Some("78701"));
    }
}
