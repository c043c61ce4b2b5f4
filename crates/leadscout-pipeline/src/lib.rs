pub mod adapter;
pub mod aggregator;
pub mod contacts;
pub mod dedupe;
pub mod error;
pub mod search;
pub mod sources;

pub use adapter::SourceAdapter;
pub use aggregator::{run_adapters, MergedResults};
pub use contacts::optimize_contacts;
pub use dedupe::{DuplicateReason, SkippedDuplicate, UniquenessTracker};
pub use error::{AdapterError, PipelineError};
pub use search::{LeadSearch, SearchOptions, SearchOutcome};
pub use sources::DirectoryAdapter;
