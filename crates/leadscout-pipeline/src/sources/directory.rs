//! Adapter for JSON business-directory endpoints.
//!
//! Several aggregation partners expose the same shape: a `/search` endpoint
//! taking `q` and `location` query params and returning
//! `{"results": [...]}`.  One adapter instance covers one endpoint; the
//! per-site HTML scrapers live behind the same [`SourceAdapter`] trait but
//! outside this crate.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;

use leadscout_core::{BusinessRecord, ContactRecord};
use leadscout_fetch::FetchClient;

use crate::adapter::SourceAdapter;
use crate::error::AdapterError;

/// Raw search response from a directory endpoint.
#[derive(Debug, Deserialize)]
struct DirectoryResponse {
    #[serde(default)]
    results: Vec<DirectoryListing>,
}

/// One listing as the endpoint returns it. Everything except the name is
/// optional; sloppy sources send empty strings, which normalization treats
/// as absent.
#[derive(Debug, Deserialize)]
struct DirectoryListing {
    name: String,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    website: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    review_count: Option<u32>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    contacts: Vec<DirectoryContact>,
}

#[derive(Debug, Deserialize)]
struct DirectoryContact {
    name: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    decision_maker: bool,
}

/// [`SourceAdapter`] over one JSON directory endpoint.
pub struct DirectoryAdapter {
    name: String,
    base_url: String,
    fetch: Arc<FetchClient>,
}

impl DirectoryAdapter {
    #[must_use]
    pub fn new(name: impl Into<String>, base_url: impl Into<String>, fetch: Arc<FetchClient>) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
            fetch,
        }
    }

    /// Builds the `/search` URL for this endpoint with encoded query params.
    fn search_url(&self, query: &str, location: Option<&str>) -> Result<String, AdapterError> {
        let base = self.base_url.trim_end_matches('/');
        let mut url = reqwest::Url::parse(&format!("{base}/search"))
            .map_err(|e| AdapterError::Other(format!("invalid base URL \"{base}\": {e}")))?;
        {
            let mut params = url.query_pairs_mut();
            params.append_pair("q", query);
            if let Some(location) = location {
                params.append_pair("location", location);
            }
        }
        Ok(url.to_string())
    }

    fn convert(&self, listing: DirectoryListing) -> BusinessRecord {
        let contacts = listing
            .contacts
            .into_iter()
            .map(|c| ContactRecord {
                name: c.name,
                position: non_empty(c.title),
                email: non_empty(c.email),
                phone_number: non_empty(c.phone),
                is_decision_maker: c.decision_maker,
                company_name: Some(listing.name.clone()),
                is_primary: false,
            })
            .collect();

        BusinessRecord {
            name: listing.name,
            address: non_empty(listing.address),
            phone_number: non_empty(listing.phone),
            website: non_empty(listing.website),
            category: non_empty(listing.category),
            rating: listing.rating,
            review_count: listing.review_count,
            contacts,
            source: self.name.clone(),
            source_url: non_empty(listing.url),
            extracted_at: Utc::now(),
        }
    }
}

#[async_trait]
impl SourceAdapter for DirectoryAdapter {
    fn name(&self) -> &str {
        &self.name
    }

    async fn search(
        &self,
        query: &str,
        location: Option<&str>,
    ) -> Result<Vec<BusinessRecord>, AdapterError> {
        let url = self.search_url(query, location)?;
        let outcome = self.fetch.fetch(&url).await?;

        if outcome.blocked {
            tracing::warn!(adapter = %self.name, url, "source blocked the query");
            return Ok(Vec::new());
        }
        if outcome.body.is_empty() {
            return Ok(Vec::new());
        }

        let response: DirectoryResponse =
            serde_json::from_str(&outcome.body).map_err(|e| AdapterError::Deserialize {
                context: format!("search results from {}", self.name),
                source: e,
            })?;

        Ok(response
            .results
            .into_iter()
            .map(|listing| self.convert(listing))
            .collect())
    }
}

/// Treats empty and whitespace-only strings as absent.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadscout_fetch::ProxyPool;

    fn adapter(base: &str) -> DirectoryAdapter {
        let pool = Arc::new(ProxyPool::new(3));
        let fetch = Arc::new(FetchClient::new(pool, 5, 0, 0, 0));
        DirectoryAdapter::new("dir", base, fetch)
    }

    #[test]
    fn search_url_encodes_query_params() {
        let a = adapter("https://dir.example.com");
        let url = a.search_url("coffee & tea", Some("New York, NY")).unwrap();
        assert_eq!(
            url,
            "https://dir.example.com/search?q=coffee+%26+tea&location=New+York%2C+NY"
        );
    }

    #[test]
    fn search_url_without_location() {
        let a = adapter("https://dir.example.com/");
        let url = a.search_url("plumber", None).unwrap();
        assert_eq!(url, "https://dir.example.com/search?q=plumber");
    }

    #[test]
    fn search_url_rejects_invalid_base() {
        let a = adapter("not a url");
        assert!(a.search_url("plumber", None).is_err());
    }

    #[test]
    fn convert_normalizes_empty_optionals() {
        let a = adapter("https://dir.example.com");
        let listing = DirectoryListing {
            name: "Acme".to_owned(),
            address: Some(String::new()),
            phone: Some("555-0100".to_owned()),
            website: None,
            category: Some("  ".to_owned()),
            rating: Some(4.2),
            review_count: None,
            url: None,
            contacts: vec![DirectoryContact {
                name: "Jane".to_owned(),
                title: Some("Owner".to_owned()),
                email: Some(String::new()),
                phone: None,
                decision_maker: true,
            }],
        };
        let record = a.convert(listing);
        assert!(record.address.is_none());
        assert!(record.category.is_none());
        assert_eq!(record.phone_number.as_deref(), Some("555-0100"));
        assert_eq!(record.source, "dir");
        let contact = &record.contacts[0];
        assert!(contact.email.is_none());
        assert!(contact.is_decision_maker);
        assert_eq!(contact.company_name.as_deref(), Some("Acme"));
        assert!(!contact.is_primary);
    }
}
