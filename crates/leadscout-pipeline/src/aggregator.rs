//! Concurrent multi-source aggregation.
//!
//! All adapters run at once (bounded by `max_concurrent`); one adapter's
//! failure never aborts the others. Results are merged in completion order,
//! so which record "wins" a merge is a function of adapter latency — an
//! accepted trade-off, not an ordering guarantee.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::FutureExt;
use futures::stream::{self, StreamExt};

use leadscout_core::BusinessRecord;

use crate::adapter::SourceAdapter;

/// Output of one aggregation pass: merged records plus the names of the
/// adapters that contributed at least one record, in completion order.
#[derive(Debug)]
pub struct MergedResults {
    pub businesses: Vec<BusinessRecord>,
    pub sources: Vec<String>,
}

/// Runs every adapter concurrently for the same query and merges their
/// output.
///
/// Records whose `name` matches exactly (case-sensitive) are folded into one
/// via [`BusinessRecord::merge_from`]: later completions overwrite earlier
/// ones except that present values are never replaced by absent ones, and
/// the higher rating wins.
pub async fn run_adapters(
    adapters: &[Arc<dyn SourceAdapter + 'static>],
    query: &str,
    location: Option<&str>,
    max_concurrent: usize,
) -> MergedResults {
    let tasks: Vec<_> = adapters
        .iter()
        .map(Arc::clone)
        .map(|adapter| {
            let query = query.to_owned();
            let location = location.map(str::to_owned);
            async move {
                let name = adapter.name().to_owned();
                let records = run_one(adapter.as_ref(), &query, location.as_deref()).await;
                (name, records)
            }
            .boxed()
        })
        .collect();
    let outputs: Vec<(String, Vec<BusinessRecord>)> = stream::iter(tasks)
        .buffer_unordered(max_concurrent.max(1))
        .collect()
        .await;

    let mut businesses: Vec<BusinessRecord> = Vec::new();
    let mut index_by_name: HashMap<String, usize> = HashMap::new();
    let mut sources: Vec<String> = Vec::new();

    for (adapter_name, records) in outputs {
        if records.is_empty() {
            continue;
        }
        sources.push(adapter_name);

        for record in records {
            match index_by_name.get(&record.name) {
                Some(&idx) => businesses[idx].merge_from(record),
                None => {
                    index_by_name.insert(record.name.clone(), businesses.len());
                    businesses.push(record);
                }
            }
        }
    }

    MergedResults {
        businesses,
        sources,
    }
}

/// Runs a single adapter with full failure isolation: any error degrades to
/// an empty contribution.
async fn run_one(
    adapter: &dyn SourceAdapter,
    query: &str,
    location: Option<&str>,
) -> Vec<BusinessRecord> {
    match adapter.search(query, location).await {
        Ok(records) => {
            tracing::debug!(
                adapter = adapter.name(),
                count = records.len(),
                "adapter completed"
            );
            records
        }
        Err(err) => {
            tracing::warn!(
                adapter = adapter.name(),
                error = %err,
                "adapter failed — treating as empty contribution"
            );
            Vec::new()
        }
    }
}

#[cfg(test)]
#[path = "aggregator_test.rs"]
mod tests;
