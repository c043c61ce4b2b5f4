use thiserror::Error;

/// Errors surfaced to the caller of a search. Everything else — adapter
/// failures, fetch failures, blocked sources — degrades to partial results.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no source adapters configured")]
    NoAdapters,

    #[error("invalid query: {0}")]
    InvalidQuery(String),
}

/// An error raised inside a single source adapter. Never propagates past the
/// aggregator: the failing source simply contributes zero results.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] leadscout_fetch::FetchError),

    #[error("response deserialization failed for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0}")]
    Other(String),
}
