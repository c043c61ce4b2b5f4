//! Validation result shapes.

use std::collections::HashMap;

use serde::Serialize;
use uuid::Uuid;

/// Verdict for one field of a lead.
#[derive(Debug, Clone, Serialize)]
pub struct FieldValidation {
    pub is_valid: bool,
    /// Heuristic plausibility in `[0, 100]`; not a probability.
    pub confidence: u8,
    /// Cleaned-up form of the input, when one could be derived.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub normalized: Option<String>,
    /// Corrective suggestion for salvageable input.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl FieldValidation {
    #[must_use]
    pub fn valid(confidence: u8) -> Self {
        Self {
            is_valid: true,
            confidence: confidence.min(100),
            normalized: None,
            suggestion: None,
        }
    }

    #[must_use]
    pub fn invalid(confidence: u8) -> Self {
        Self {
            is_valid: false,
            confidence: confidence.min(100),
            normalized: None,
            suggestion: None,
        }
    }

    #[must_use]
    pub fn with_normalized(mut self, normalized: impl Into<String>) -> Self {
        self.normalized = Some(normalized.into());
        self
    }

    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

/// Email verdict: the shared field shape plus the disposable-domain flag,
/// which acts as a hard veto on the whole lead.
#[derive(Debug, Clone, Serialize)]
pub struct EmailValidation {
    #[serde(flatten)]
    pub field: FieldValidation,
    pub is_disposable: bool,
}

/// Verdict for one lead. Created fresh per call; the validator caches
/// nothing.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    /// Weighted combination of the per-field confidences, in `[0, 100]`.
    pub confidence_score: u8,
    pub name: FieldValidation,
    pub phone: FieldValidation,
    pub email: EmailValidation,
    pub address: FieldValidation,
    pub job_title: FieldValidation,
    pub warnings: Vec<String>,
}

/// Batch classification counts plus the mean score.
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    /// `is_valid` leads.
    pub valid: usize,
    /// Failed validation but scored at least the suspicious threshold.
    pub suspicious: usize,
    /// Scored below the suspicious threshold.
    pub invalid: usize,
    pub mean_score: f64,
}

/// Result of validating a batch of leads.
#[derive(Debug, Serialize)]
pub struct BatchOutcome {
    pub results: HashMap<Uuid, ValidationResult>,
    pub summary: BatchSummary,
}
