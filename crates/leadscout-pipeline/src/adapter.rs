use async_trait::async_trait;

use leadscout_core::BusinessRecord;

use crate::error::AdapterError;

/// One external source of candidate business records.
///
/// Implementations encode brittle, site-specific assumptions; the pipeline
/// depends only on this interface. Adapters should return `Err` rather than
/// panic — the aggregator treats both as an empty contribution, but an error
/// carries a reason into the logs.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// Stable adapter name used in `source` attribution and logs.
    fn name(&self) -> &str;

    /// Queries this source. A blocked or empty source returns `Ok(vec![])`.
    async fn search(
        &self,
        query: &str,
        location: Option<&str>,
    ) -> Result<Vec<BusinessRecord>, AdapterError>;
}
