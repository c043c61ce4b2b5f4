use super::*;

use async_trait::async_trait;

use crate::error::AdapterError;

/// Adapter returning a fixed set of records, or a fixed error.
struct StubAdapter {
    name: &'static str,
    outcome: Result<Vec<BusinessRecord>, &'static str>,
}

impl StubAdapter {
    fn ok(name: &'static str, records: Vec<BusinessRecord>) -> Arc<dyn SourceAdapter> {
        Arc::new(Self {
            name,
            outcome: Ok(records),
        })
    }

    fn failing(name: &'static str, message: &'static str) -> Arc<dyn SourceAdapter> {
        Arc::new(Self {
            name,
            outcome: Err(message),
        })
    }
}

#[async_trait]
impl SourceAdapter for StubAdapter {
    fn name(&self) -> &str {
        self.name
    }

    async fn search(
        &self,
        _query: &str,
        _location: Option<&str>,
    ) -> Result<Vec<BusinessRecord>, AdapterError> {
        match &self.outcome {
            Ok(records) => Ok(records.clone()),
            Err(message) => Err(AdapterError::Other((*message).to_owned())),
        }
    }
}

fn record(name: &str, source: &str) -> BusinessRecord {
    BusinessRecord::new(name, source)
}

#[tokio::test]
async fn merges_same_name_records_across_adapters() {
    let mut from_a = record("Acme Plumbing", "adapterA");
    from_a.phone_number = Some("555-1234".to_owned());
    let mut from_b = record("Acme Plumbing", "adapterB");
    from_b.website = Some("acmeplumbing.com".to_owned());

    let adapters = vec![
        StubAdapter::ok("adapterA", vec![from_a]),
        StubAdapter::ok("adapterB", vec![from_b]),
    ];

    let merged = run_adapters(&adapters, "plumber", None, 4).await;

    assert_eq!(merged.businesses.len(), 1);
    let business = &merged.businesses[0];
    assert_eq!(business.phone_number.as_deref(), Some("555-1234"));
    assert_eq!(business.website.as_deref(), Some("acmeplumbing.com"));
    assert_eq!(business.source, "adapterA+adapterB");

    let mut sources = merged.sources.clone();
    sources.sort();
    assert_eq!(sources, vec!["adapterA".to_owned(), "adapterB".to_owned()]);
}

#[tokio::test]
async fn merge_key_is_case_sensitive() {
    let adapters = vec![
        StubAdapter::ok("adapterA", vec![record("Acme Plumbing", "adapterA")]),
        StubAdapter::ok("adapterB", vec![record("ACME PLUMBING", "adapterB")]),
    ];

    let merged = run_adapters(&adapters, "plumber", None, 4).await;
    // Casing differences are left for the uniqueness tracker downstream.
    assert_eq!(merged.businesses.len(), 2);
}

#[tokio::test]
async fn failing_adapter_does_not_poison_the_others() {
    let adapters = vec![
        StubAdapter::failing("broken", "connection reset"),
        StubAdapter::ok("working", vec![record("Joe's Cafe", "working")]),
    ];

    let merged = run_adapters(&adapters, "cafe", Some("NYC"), 4).await;

    assert_eq!(merged.businesses.len(), 1);
    assert_eq!(merged.sources, vec!["working".to_owned()]);
}

#[tokio::test]
async fn empty_adapter_is_not_listed_as_source() {
    let adapters = vec![
        StubAdapter::ok("empty", vec![]),
        StubAdapter::ok("full", vec![record("Biz", "full")]),
    ];

    let merged = run_adapters(&adapters, "biz", None, 4).await;
    assert_eq!(merged.sources, vec!["full".to_owned()]);
}

#[tokio::test]
async fn no_adapters_yields_empty_non_error_outcome() {
    let adapters: Vec<Arc<dyn SourceAdapter>> = Vec::new();
    let merged = run_adapters(&adapters, "anything", None, 4).await;
    assert!(merged.businesses.is_empty());
    assert!(merged.sources.is_empty());
}

#[tokio::test]
async fn higher_rating_survives_merge() {
    let mut from_a = record("Acme", "adapterA");
    from_a.rating = Some(3.0);
    let mut from_b = record("Acme", "adapterB");
    from_b.rating = Some(4.5);

    let adapters = vec![
        StubAdapter::ok("adapterA", vec![from_a]),
        StubAdapter::ok("adapterB", vec![from_b]),
    ];

    let merged = run_adapters(&adapters, "acme", None, 1).await;
    assert_eq!(merged.businesses[0].rating, Some(4.5));
}
