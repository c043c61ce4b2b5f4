//! Lead-level validation: per-field checks combined by a fixed weight table.

use std::collections::HashMap;

use leadscout_core::LeadRecord;

use crate::address::validate_address;
use crate::email::validate_email;
use crate::name::validate_name;
use crate::phone::validate_phone;
use crate::reference::ReferenceData;
use crate::title::validate_title;
use crate::types::{BatchOutcome, BatchSummary, ValidationResult};

/// Field weights. The name carries the most signal; the job title the least.
const NAME_WEIGHT: f64 = 0.25;
const PHONE_WEIGHT: f64 = 0.20;
const EMAIL_WEIGHT: f64 = 0.20;
const ADDRESS_WEIGHT: f64 = 0.20;
const TITLE_WEIGHT: f64 = 0.15;

/// Overall score at or above which a lead passes.
const VALID_THRESHOLD: u8 = 70;
/// Failed leads scoring at least this are worth a human look.
const SUSPICIOUS_THRESHOLD: u8 = 50;

/// Validates [`LeadRecord`]s against a set of reference datasets.
///
/// Each field validator is an independent pure function over the input and
/// the reference data; results are combined here and never cached.
pub struct LeadValidator {
    reference: ReferenceData,
}

impl LeadValidator {
    #[must_use]
    pub fn new(reference: ReferenceData) -> Self {
        Self { reference }
    }

    /// Validator backed by the compiled-in reference datasets.
    #[must_use]
    pub fn with_builtin_reference() -> Self {
        Self::new(ReferenceData::builtin())
    }

    /// Scores one lead. Never fails: empty fields score low, they do not
    /// error.
    #[must_use]
    pub fn validate(&self, lead: &LeadRecord) -> ValidationResult {
        let name = validate_name(&lead.name, &self.reference);
        let phone = validate_phone(&lead.phone_number, &self.reference);
        let email = validate_email(&lead.email, &self.reference);
        let address = validate_address(&lead.address, &self.reference);
        let job_title = validate_title(&lead.job_title, &self.reference);

        let weighted = NAME_WEIGHT * f64::from(name.confidence)
            + PHONE_WEIGHT * f64::from(phone.confidence)
            + EMAIL_WEIGHT * f64::from(email.field.confidence)
            + ADDRESS_WEIGHT * f64::from(address.confidence)
            + TITLE_WEIGHT * f64::from(job_title.confidence);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let confidence_score = weighted.round().clamp(0.0, 100.0) as u8;

        let mut warnings = Vec::new();
        if !name.is_valid {
            warnings.push("name failed validation".to_owned());
        }
        if !phone.is_valid {
            warnings.push("phone number failed validation".to_owned());
        }
        if email.is_disposable {
            warnings.push("disposable email domain".to_owned());
        } else if !email.field.is_valid {
            warnings.push("email failed validation".to_owned());
        }
        if !address.is_valid {
            warnings.push("address failed validation".to_owned());
        }
        if !job_title.is_valid {
            warnings.push("job title failed validation".to_owned());
        }

        // A disposable mailbox vetoes the lead outright regardless of how
        // well the other fields score.
        let is_valid = confidence_score >= VALID_THRESHOLD && !email.is_disposable;

        tracing::debug!(
            lead_id = %lead.id,
            confidence_score,
            is_valid,
            disposable = email.is_disposable,
            "lead validated"
        );

        ValidationResult {
            is_valid,
            confidence_score,
            name,
            phone,
            email,
            address,
            job_title,
            warnings,
        }
    }

    /// Validates a batch, classifying every lead into exactly one of
    /// valid / suspicious / invalid.
    #[must_use]
    pub fn batch_validate(&self, leads: &[LeadRecord]) -> BatchOutcome {
        let mut results = HashMap::with_capacity(leads.len());
        let mut valid = 0usize;
        let mut suspicious = 0usize;
        let mut invalid = 0usize;
        let mut score_sum = 0u64;

        for lead in leads {
            let result = self.validate(lead);
            score_sum += u64::from(result.confidence_score);

            if result.is_valid {
                valid += 1;
            } else if result.confidence_score >= SUSPICIOUS_THRESHOLD {
                suspicious += 1;
            } else {
                invalid += 1;
            }

            results.insert(lead.id, result);
        }

        #[allow(clippy::cast_precision_loss)]
        let mean_score = if leads.is_empty() {
            0.0
        } else {
            score_sum as f64 / leads.len() as f64
        };

        tracing::info!(
            total = leads.len(),
            valid,
            suspicious,
            invalid,
            mean_score,
            "batch validation complete"
        );

        BatchOutcome {
            results,
            summary: BatchSummary {
                total: leads.len(),
                valid,
                suspicious,
                invalid,
                mean_score,
            },
        }
    }
}
