//! US phone-number plausibility.

use crate::reference::ReferenceData;
use crate::types::FieldValidation;

/// Valid means exactly ten digits with a NANP-legal leading digit. A known
/// area code boosts confidence; an unknown one is merely unproven.
#[must_use]
pub fn validate_phone(raw: &str, reference: &ReferenceData) -> FieldValidation {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return FieldValidation::invalid(0);
    }

    let digits: String = trimmed.chars().filter(char::is_ascii_digit).collect();

    // An 11-digit number with a leading country code is salvageable.
    if digits.len() == 11 && digits.starts_with('1') {
        let stripped = &digits[1..];
        return FieldValidation::invalid(40)
            .with_suggestion(format!("drop the country code: {}", format_nanp(stripped)));
    }

    if digits.len() != 10 {
        return FieldValidation::invalid(10);
    }
    if digits.starts_with('0') || digits.starts_with('1') {
        return FieldValidation::invalid(20);
    }

    let mut confidence = 70;
    let area_code = &digits[..3];
    if reference.area_codes.contains(area_code) {
        confidence += 20;
    }

    FieldValidation::valid(confidence).with_normalized(format_nanp(&digits))
}

/// `(AAA) EEE-NNNN` formatting for a ten-digit string.
fn format_nanp(digits: &str) -> String {
    format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..])
}
