//! One logical fetch: proxy selection, identity rotation, pacing jitter,
//! hard timeout, anti-bot detection, and retry with exponential back-off.
//!
//! A detected challenge page is a special case: it counts as a failure for
//! the proxy that hit it, but the fetch returns an empty-body outcome
//! immediately instead of retrying — hammering a CAPTCHA wall burns attempts
//! and makes the automation signature louder.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use reqwest::Client;
use tokio::sync::Mutex;

use leadscout_core::AppConfig;

use crate::backoff::{pacing_jitter, retry_delay, tokio_delay, DelayFn};
use crate::detect::find_block_marker;
use crate::error::FetchError;
use crate::identity::Identity;
use crate::pool::{Egress, ProxyPool, ProxySummary};

/// How a single attempt ended.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttemptOutcome {
    Success,
    Blocked,
    Failed,
}

/// Diagnostic record of one fetch attempt. Created per request and carried
/// on the [`FetchOutcome`]; nothing in the core persists these.
#[derive(Debug, Clone, serde::Serialize)]
pub struct FetchAttempt {
    pub url: String,
    /// Proxy endpoint used, or `"direct"`.
    pub egress: String,
    pub user_agent: String,
    pub attempt_number: u32,
    pub outcome: AttemptOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub response_time_ms: u64,
    pub timestamp: DateTime<Utc>,
}

/// Result of a successful logical fetch.
///
/// `blocked` distinguishes "empty because a challenge page was detected"
/// from a genuinely empty body; adapters treat a blocked outcome as zero
/// results.
#[derive(Debug)]
pub struct FetchOutcome {
    pub body: String,
    pub blocked: bool,
    pub attempts: Vec<FetchAttempt>,
}

/// HTTP fetch layer with proxy rotation and retry.
///
/// One `reqwest::Client` is built and cached per egress (each proxy needs
/// its own client since the proxy is fixed at build time); the direct client
/// is cached under its own key.
pub struct FetchClient {
    pool: std::sync::Arc<ProxyPool>,
    request_timeout: Duration,
    max_retries: u32,
    backoff_base_ms: u64,
    jitter_max_ms: u64,
    delay: DelayFn,
    clients: Mutex<HashMap<String, Client>>,
}

impl FetchClient {
    #[must_use]
    pub fn new(
        pool: std::sync::Arc<ProxyPool>,
        request_timeout_secs: u64,
        max_retries: u32,
        backoff_base_ms: u64,
        jitter_max_ms: u64,
    ) -> Self {
        Self {
            pool,
            request_timeout: Duration::from_secs(request_timeout_secs),
            max_retries,
            backoff_base_ms,
            jitter_max_ms,
            delay: tokio_delay(),
            clients: Mutex::new(HashMap::new()),
        }
    }

    /// Builds a fetch client with the tuning knobs from [`AppConfig`].
    #[must_use]
    pub fn from_app_config(pool: std::sync::Arc<ProxyPool>, config: &AppConfig) -> Self {
        Self::new(
            pool,
            config.fetch_request_timeout_secs,
            config.fetch_max_retries,
            config.fetch_backoff_base_ms,
            config.fetch_jitter_max_ms,
        )
    }

    /// Replaces the wait operation. Tests inject [`crate::backoff::no_delay`]
    /// so retry paths run without wall-clock sleeps.
    #[must_use]
    pub fn with_delay_fn(mut self, delay: DelayFn) -> Self {
        self.delay = delay;
        self
    }

    #[must_use]
    pub fn pool(&self) -> &std::sync::Arc<ProxyPool> {
        &self.pool
    }

    /// Performs one logical fetch of `url`.
    ///
    /// Retries transient failures (network errors, non-2xx statuses) up to
    /// `max_retries` additional attempts with exponential back-off. Every
    /// attempt selects a fresh egress and identity and reports its outcome
    /// back to the pool.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::RetriesExhausted`] wrapping the last underlying
    /// error once all attempts are spent. A detected challenge page is NOT
    /// an error: it yields `Ok` with an empty body and `blocked = true`.
    pub async fn fetch(&self, url: &str) -> Result<FetchOutcome, FetchError> {
        let mut attempts: Vec<FetchAttempt> = Vec::new();
        let mut attempt = 0u32;

        loop {
            if self.jitter_max_ms > 0 {
                (self.delay)(pacing_jitter(self.jitter_max_ms)).await;
            }

            let egress = self.pool.select().await;
            let identity = Identity::random();
            let started = Instant::now();

            let result = self.attempt(url, &egress, &identity).await;
            #[allow(clippy::cast_possible_truncation)]
            let elapsed_ms = started.elapsed().as_millis() as u64;

            match result {
                Ok(body) => {
                    self.report(&egress, true, Some(elapsed_ms)).await;
                    attempts.push(record(
                        url,
                        &egress,
                        &identity,
                        attempt,
                        AttemptOutcome::Success,
                        None,
                        elapsed_ms,
                    ));
                    tracing::debug!(url, egress = %egress.describe(), elapsed_ms, "fetch succeeded");
                    return Ok(FetchOutcome {
                        body,
                        blocked: false,
                        attempts,
                    });
                }
                Err(FetchError::Blocked { marker, .. }) => {
                    self.report(&egress, false, None).await;
                    attempts.push(record(
                        url,
                        &egress,
                        &identity,
                        attempt,
                        AttemptOutcome::Blocked,
                        Some(format!("challenge marker: {marker}")),
                        elapsed_ms,
                    ));
                    tracing::warn!(
                        url,
                        marker,
                        egress = %egress.describe(),
                        "challenge page detected — returning empty result without retry"
                    );
                    return Ok(FetchOutcome {
                        body: String::new(),
                        blocked: true,
                        attempts,
                    });
                }
                Err(err) => {
                    self.report(&egress, false, None).await;
                    if matches!(err, FetchError::InvalidProxy { .. }) {
                        if let Egress::Proxy { id, .. } = &egress {
                            self.pool.mark_error(*id).await;
                        }
                    }
                    attempts.push(record(
                        url,
                        &egress,
                        &identity,
                        attempt,
                        AttemptOutcome::Failed,
                        Some(err.to_string()),
                        elapsed_ms,
                    ));

                    if attempt >= self.max_retries {
                        return Err(FetchError::RetriesExhausted {
                            url: url.to_owned(),
                            attempts: attempt + 1,
                            source: Box::new(err),
                        });
                    }

                    let delay = retry_delay(attempt, self.backoff_base_ms);
                    tracing::warn!(
                        attempt,
                        max_retries = self.max_retries,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        url,
                        error = %err,
                        "transient fetch error — retrying after backoff"
                    );
                    (self.delay)(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    /// Probes every registered proxy (regardless of status) against
    /// `probe_url` and updates pool state from the results: a responsive
    /// proxy is reactivated, an unresponsive one records a failure.
    pub async fn check_health(&self, probe_url: &str) -> Vec<ProxySummary> {
        for (id, connect_url) in self.pool.all_ids().await {
            match self.probe(probe_url, &connect_url).await {
                Ok(latency_ms) => self.pool.mark_probed_ok(id, latency_ms).await,
                Err(err) => {
                    tracing::debug!(proxy_id = %id, error = %err, "proxy probe failed");
                    self.pool.report(id, false, None).await;
                }
            }
        }
        self.pool.list().await
    }

    async fn probe(&self, probe_url: &str, connect_url: &str) -> Result<u64, FetchError> {
        let proxy = reqwest::Proxy::all(connect_url).map_err(|e| FetchError::InvalidProxy {
            endpoint: connect_url.to_owned(),
            reason: e.to_string(),
        })?;
        let client = Client::builder()
            .timeout(self.request_timeout)
            .connect_timeout(Duration::from_secs(10))
            .proxy(proxy)
            .build()?;

        let started = Instant::now();
        let response = Identity::random().apply(client.get(probe_url)).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::UnexpectedStatus {
                status: status.as_u16(),
                url: probe_url.to_owned(),
            });
        }
        #[allow(clippy::cast_possible_truncation)]
        Ok(started.elapsed().as_millis() as u64)
    }

    async fn attempt(
        &self,
        url: &str,
        egress: &Egress,
        identity: &Identity,
    ) -> Result<String, FetchError> {
        let client = self.client_for(egress).await?;
        let response = identity.apply(client.get(url)).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(FetchError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let body = response.text().await?;
        if let Some(marker) = find_block_marker(&body) {
            return Err(FetchError::Blocked {
                url: url.to_owned(),
                marker: marker.to_owned(),
            });
        }
        Ok(body)
    }

    async fn report(&self, egress: &Egress, success: bool, latency_ms: Option<u64>) {
        if let Egress::Proxy { id, .. } = egress {
            self.pool.report(*id, success, latency_ms).await;
        }
    }

    async fn client_for(&self, egress: &Egress) -> Result<Client, FetchError> {
        let key = egress.describe();
        let mut clients = self.clients.lock().await;
        if let Some(client) = clients.get(&key) {
            return Ok(client.clone());
        }

        let mut builder = Client::builder()
            .timeout(self.request_timeout)
            .connect_timeout(Duration::from_secs(10));
        if let Egress::Proxy {
            endpoint,
            connect_url,
            ..
        } = egress
        {
            let proxy = reqwest::Proxy::all(connect_url).map_err(|e| FetchError::InvalidProxy {
                endpoint: endpoint.clone(),
                reason: e.to_string(),
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build()?;
        clients.insert(key, client.clone());
        Ok(client)
    }
}

#[allow(clippy::too_many_arguments)]
fn record(
    url: &str,
    egress: &Egress,
    identity: &Identity,
    attempt_number: u32,
    outcome: AttemptOutcome,
    error: Option<String>,
    response_time_ms: u64,
) -> FetchAttempt {
    FetchAttempt {
        url: url.to_owned(),
        egress: egress.describe(),
        user_agent: identity.user_agent.to_owned(),
        attempt_number,
        outcome,
        error,
        response_time_ms,
        timestamp: Utc::now(),
    }
}
