//! Search orchestration: fan-out → merge → dedup → contact selection.
//!
//! The orchestrator fails only on caller mistakes (blank query, nothing
//! configured). Source trouble — failed adapters, blocked fetches, empty
//! responses — degrades to partial results with provenance in `sources`; an
//! empty result set with empty `sources` is the valid "nothing could be
//! retrieved" outcome, not an error.

use std::sync::Arc;

use leadscout_core::BusinessRecord;

use crate::adapter::SourceAdapter;
use crate::aggregator::run_adapters;
use crate::contacts::optimize_contacts;
use crate::dedupe::{SkippedDuplicate, UniquenessTracker};
use crate::error::PipelineError;

/// Per-call knobs for [`LeadSearch::search`].
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Narrow each business to its single best contact. On by default;
    /// disable to inspect raw extracted contacts.
    pub optimize_contacts: bool,
    /// Cap on returned businesses, applied after dedup.
    pub limit: Option<usize>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            optimize_contacts: true,
            limit: None,
        }
    }
}

/// Result set for one search invocation.
#[derive(Debug)]
pub struct SearchOutcome {
    pub businesses: Vec<BusinessRecord>,
    /// Adapters that contributed at least one record, in completion order.
    pub sources: Vec<String>,
    /// Duplicates suppressed by the uniqueness tracker, for audit.
    pub skipped_duplicates: Vec<SkippedDuplicate>,
}

/// The primary entry point: owns the configured adapters and runs the full
/// acquisition pipeline for each query.
pub struct LeadSearch {
    adapters: Vec<Arc<dyn SourceAdapter>>,
    max_concurrent: usize,
}

impl LeadSearch {
    #[must_use]
    pub fn new(adapters: Vec<Arc<dyn SourceAdapter>>, max_concurrent: usize) -> Self {
        Self {
            adapters,
            max_concurrent: max_concurrent.max(1),
        }
    }

    #[must_use]
    pub fn adapter_names(&self) -> Vec<String> {
        self.adapters.iter().map(|a| a.name().to_owned()).collect()
    }

    /// Runs one search across all configured sources.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::InvalidQuery`] for a blank query.
    /// - [`PipelineError::NoAdapters`] when no adapters are configured.
    pub async fn search(
        &self,
        query: &str,
        location: Option<&str>,
        options: &SearchOptions,
    ) -> Result<SearchOutcome, PipelineError> {
        if query.trim().is_empty() {
            return Err(PipelineError::InvalidQuery(
                "query must be non-empty".to_owned(),
            ));
        }
        if self.adapters.is_empty() {
            return Err(PipelineError::NoAdapters);
        }

        tracing::info!(
            query,
            location = location.unwrap_or("-"),
            adapters = self.adapters.len(),
            "starting search"
        );

        let merged = run_adapters(&self.adapters, query, location, self.max_concurrent).await;
        let merged_count = merged.businesses.len();

        let mut tracker = UniquenessTracker::new();
        let mut businesses = tracker.process(merged.businesses);

        if options.optimize_contacts {
            businesses = businesses.into_iter().map(optimize_contacts).collect();
        }
        if let Some(limit) = options.limit {
            businesses.truncate(limit);
        }

        tracing::info!(
            query,
            merged = merged_count,
            unique = businesses.len(),
            skipped = tracker.skipped().len(),
            sources = ?merged.sources,
            "search complete"
        );

        Ok(SearchOutcome {
            businesses,
            sources: merged.sources,
            skipped_duplicates: tracker.skipped().to_vec(),
        })
    }
}
