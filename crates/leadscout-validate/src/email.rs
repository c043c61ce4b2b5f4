//! Email plausibility and disposable-domain detection.

use std::sync::LazyLock;

use regex::Regex;

use crate::reference::ReferenceData;
use crate::types::{EmailValidation, FieldValidation};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$")
        .expect("email pattern is a valid regex")
});

/// Format check plus domain classification. A disposable domain keeps its
/// format validity out of the verdict: the flag is a hard veto upstream.
#[must_use]
pub fn validate_email(raw: &str, reference: &ReferenceData) -> EmailValidation {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return not_disposable(FieldValidation::invalid(0));
    }

    if !trimmed.contains('@') {
        // "jane(at)example.com" and "jane at example.com" show up in
        // hand-entered data; a rewrite may salvage them.
        for marker in ["(at)", " at "] {
            let candidate = trimmed.replace(marker, "@");
            if EMAIL_RE.is_match(&candidate) {
                return not_disposable(
                    FieldValidation::invalid(30).with_suggestion(candidate),
                );
            }
        }
        return not_disposable(FieldValidation::invalid(10));
    }

    let lowered = trimmed.to_lowercase();
    if !EMAIL_RE.is_match(&lowered) {
        // Missing TLD dot is the common salvageable shape: "jane@example".
        if let Some((local, domain)) = lowered.rsplit_once('@') {
            if !local.is_empty() && !domain.is_empty() && !domain.contains('.') {
                let candidate = format!("{local}@{domain}.com");
                if EMAIL_RE.is_match(&candidate) {
                    return not_disposable(
                        FieldValidation::invalid(30).with_suggestion(candidate),
                    );
                }
            }
        }
        return not_disposable(FieldValidation::invalid(15));
    }

    let domain = lowered
        .rsplit_once('@')
        .map(|(_, d)| d.to_owned())
        .unwrap_or_default();

    if reference.disposable_domains.contains(&domain) {
        let mut field = FieldValidation::invalid(20);
        if lowered != trimmed {
            field = field.with_normalized(lowered);
        }
        return EmailValidation {
            field,
            is_disposable: true,
        };
    }

    let mut confidence = 70;
    if reference.common_domains.contains(&domain) {
        confidence += 20;
    }

    let mut field = FieldValidation::valid(confidence);
    if lowered != trimmed {
        field = field.with_normalized(lowered);
    }
    not_disposable(field)
}

fn not_disposable(field: FieldValidation) -> EmailValidation {
    EmailValidation {
        field,
        is_disposable: false,
    }
}
