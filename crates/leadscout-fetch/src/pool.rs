//! The proxy pool: the only cross-request shared mutable state in the core.
//!
//! All health counters live behind one async mutex; every update happens
//! inside a single locked section per [`ProxyPool::report`] call, so
//! concurrent fetches reporting against the same proxy never interleave
//! partial updates.

use std::time::Instant;

use tokio::sync::Mutex;
use uuid::Uuid;

use leadscout_core::ProxySpec;

use crate::error::FetchError;

/// Weight of the historical success rate in the selection score.
const SUCCESS_RATE_WEIGHT: f64 = 0.7;
/// Weight of the recency penalty in the selection score.
const RECENCY_WEIGHT: f64 = 0.3;
/// A proxy used within this window is penalized proportionally to how
/// recently it went out. Spreads load and avoids correlated blocking.
const RECENCY_WINDOW_SECS: f64 = 300.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProxyStatus {
    Active,
    Blocked,
    Error,
}

struct ProxyState {
    id: Uuid,
    spec: ProxySpec,
    status: ProxyStatus,
    success_count: u64,
    failure_count: u64,
    consecutive_failures: u32,
    avg_response_time_ms: f64,
    last_used_at: Option<Instant>,
}

impl ProxyState {
    fn new(spec: ProxySpec) -> Self {
        Self {
            id: Uuid::new_v4(),
            spec,
            status: ProxyStatus::Active,
            success_count: 0,
            failure_count: 0,
            consecutive_failures: 0,
            avg_response_time_ms: 0.0,
            last_used_at: None,
        }
    }

    /// Historical success rate; an unused proxy counts as perfect so fresh
    /// entries get tried.
    #[allow(clippy::cast_precision_loss)]
    fn success_rate(&self) -> f64 {
        let total = self.success_count + self.failure_count;
        if total == 0 {
            1.0
        } else {
            self.success_count as f64 / total as f64
        }
    }

    /// Penalty in `[0, 1]`: 1 for a proxy used this instant, falling to 0
    /// once it has rested for [`RECENCY_WINDOW_SECS`].
    fn recency_penalty(&self, now: Instant) -> f64 {
        match self.last_used_at {
            None => 0.0,
            Some(at) => {
                let idle = now.saturating_duration_since(at).as_secs_f64();
                (1.0 - idle / RECENCY_WINDOW_SECS).max(0.0)
            }
        }
    }

    fn score(&self, now: Instant) -> f64 {
        SUCCESS_RATE_WEIGHT * self.success_rate() - RECENCY_WEIGHT * self.recency_penalty(now)
    }

    fn summary(&self) -> ProxySummary {
        ProxySummary {
            id: self.id,
            endpoint: self.spec.endpoint(),
            label: self.spec.label.clone(),
            status: self.status,
            success_count: self.success_count,
            failure_count: self.failure_count,
            success_rate: self.success_rate(),
            avg_response_time_ms: self.avg_response_time_ms,
        }
    }
}

/// Snapshot of one proxy's health, safe to expose over the API (no
/// credentials).
#[derive(Debug, Clone, serde::Serialize)]
pub struct ProxySummary {
    pub id: Uuid,
    pub endpoint: String,
    pub label: Option<String>,
    pub status: ProxyStatus,
    pub success_count: u64,
    pub failure_count: u64,
    pub success_rate: f64,
    pub avg_response_time_ms: f64,
}

/// Aggregate pool health as exposed by the admin surface.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PoolHealth {
    pub active: usize,
    pub blocked: usize,
    pub error: usize,
    pub total: usize,
    pub avg_response_time_ms: f64,
    pub top_performers: Vec<ProxySummary>,
}

/// What a fetch attempt goes out through: a pooled proxy or the host's own
/// address. Adapters never hold an `Egress` beyond one request.
#[derive(Debug, Clone)]
pub enum Egress {
    Proxy {
        id: Uuid,
        endpoint: String,
        connect_url: String,
    },
    Direct,
}

impl Egress {
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Egress::Proxy { endpoint, .. } => endpoint.clone(),
            Egress::Direct => "direct".to_owned(),
        }
    }
}

/// Registry of outbound egress proxies with per-proxy health tracking.
pub struct ProxyPool {
    proxies: Mutex<Vec<ProxyState>>,
    /// Consecutive failures before a proxy transitions to blocked.
    block_threshold: u32,
}

impl ProxyPool {
    #[must_use]
    pub fn new(block_threshold: u32) -> Self {
        Self {
            proxies: Mutex::new(Vec::new()),
            block_threshold: block_threshold.max(1),
        }
    }

    /// Builds a pool seeded from fleet file entries.
    #[must_use]
    pub fn from_specs(specs: Vec<ProxySpec>, block_threshold: u32) -> Self {
        Self {
            proxies: Mutex::new(specs.into_iter().map(ProxyState::new).collect()),
            block_threshold: block_threshold.max(1),
        }
    }

    /// Picks the best active proxy by weighted score, or falls back to a
    /// direct connection when no proxy is usable.
    ///
    /// Selecting a proxy stamps its `last_used_at`, which feeds the recency
    /// penalty on the next selection.
    pub async fn select(&self) -> Egress {
        let now = Instant::now();
        let mut proxies = self.proxies.lock().await;

        let best = proxies
            .iter_mut()
            .filter(|p| p.status == ProxyStatus::Active)
            .max_by(|a, b| {
                a.score(now)
                    .partial_cmp(&b.score(now))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

        match best {
            Some(state) => {
                state.last_used_at = Some(now);
                Egress::Proxy {
                    id: state.id,
                    endpoint: state.spec.endpoint(),
                    connect_url: state.spec.connect_url(),
                }
            }
            None => Egress::Direct,
        }
    }

    /// Records the outcome of one request made through `id`.
    ///
    /// A success resets the consecutive-failure streak and folds
    /// `response_time_ms` into the running average. A failure increments the
    /// streak; hitting the block threshold transitions the proxy to
    /// `blocked`.
    #[allow(clippy::cast_precision_loss)]
    pub async fn report(&self, id: Uuid, success: bool, response_time_ms: Option<u64>) {
        let mut proxies = self.proxies.lock().await;
        let Some(state) = proxies.iter_mut().find(|p| p.id == id) else {
            // The proxy may have been removed while a request was in flight.
            tracing::debug!(proxy_id = %id, "report for unknown proxy ignored");
            return;
        };

        if success {
            if let Some(latency) = response_time_ms {
                let prior = state.success_count as f64;
                state.avg_response_time_ms =
                    (state.avg_response_time_ms * prior + latency as f64) / (prior + 1.0);
            }
            state.success_count += 1;
            state.consecutive_failures = 0;
        } else {
            state.failure_count += 1;
            state.consecutive_failures += 1;
            if state.status == ProxyStatus::Active
                && state.consecutive_failures >= self.block_threshold
            {
                state.status = ProxyStatus::Blocked;
                tracing::warn!(
                    endpoint = %state.spec.endpoint(),
                    consecutive_failures = state.consecutive_failures,
                    "proxy blocked after consecutive failures"
                );
            }
        }
    }

    /// Marks a proxy as errored (e.g. its connect URL was rejected by the
    /// HTTP client). Errored proxies are skipped by selection until reset.
    pub async fn mark_error(&self, id: Uuid) {
        let mut proxies = self.proxies.lock().await;
        if let Some(state) = proxies.iter_mut().find(|p| p.id == id) {
            state.status = ProxyStatus::Error;
            tracing::warn!(endpoint = %state.spec.endpoint(), "proxy marked errored");
        }
    }

    /// Reactivates a proxy after a successful live probe.
    pub(crate) async fn mark_probed_ok(&self, id: Uuid, response_time_ms: u64) {
        {
            let mut proxies = self.proxies.lock().await;
            if let Some(state) = proxies.iter_mut().find(|p| p.id == id) {
                state.status = ProxyStatus::Active;
            }
        }
        self.report(id, true, Some(response_time_ms)).await;
    }

    /// Registers a new proxy.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidProxy`] if a proxy with the same
    /// endpoint is already registered.
    pub async fn add(&self, spec: ProxySpec) -> Result<Uuid, FetchError> {
        let mut proxies = self.proxies.lock().await;
        let endpoint = spec.endpoint();
        if proxies.iter().any(|p| p.spec.endpoint() == endpoint) {
            return Err(FetchError::InvalidProxy {
                endpoint,
                reason: "endpoint already registered".to_owned(),
            });
        }
        let state = ProxyState::new(spec);
        let id = state.id;
        proxies.push(state);
        Ok(id)
    }

    /// Removes a proxy by id. Returns `true` if one was removed.
    pub async fn remove(&self, id: Uuid) -> bool {
        let mut proxies = self.proxies.lock().await;
        let before = proxies.len();
        proxies.retain(|p| p.id != id);
        proxies.len() != before
    }

    /// Returns `blocked` and `error` proxies to `active` with their failure
    /// streaks cleared. Blocks are usually IP-based and time-limited, so
    /// without this the pool would monotonically shrink to zero.
    pub async fn reset_blocked(&self) -> usize {
        let mut proxies = self.proxies.lock().await;
        let mut reset = 0;
        for state in proxies
            .iter_mut()
            .filter(|p| p.status != ProxyStatus::Active)
        {
            state.status = ProxyStatus::Active;
            state.consecutive_failures = 0;
            state.failure_count = 0;
            reset += 1;
        }
        if reset > 0 {
            tracing::info!(reset, "reactivated non-active proxies");
        }
        reset
    }

    pub async fn list(&self) -> Vec<ProxySummary> {
        let proxies = self.proxies.lock().await;
        proxies.iter().map(ProxyState::summary).collect()
    }

    /// Endpoints of every registered proxy regardless of status, for the
    /// health-check probe.
    pub(crate) async fn all_ids(&self) -> Vec<(Uuid, String)> {
        let proxies = self.proxies.lock().await;
        proxies
            .iter()
            .map(|p| (p.id, p.spec.connect_url()))
            .collect()
    }

    pub async fn health(&self) -> PoolHealth {
        let proxies = self.proxies.lock().await;

        let mut active = 0;
        let mut blocked = 0;
        let mut error = 0;
        for p in proxies.iter() {
            match p.status {
                ProxyStatus::Active => active += 1,
                ProxyStatus::Blocked => blocked += 1,
                ProxyStatus::Error => error += 1,
            }
        }

        let measured: Vec<&ProxyState> =
            proxies.iter().filter(|p| p.success_count > 0).collect();
        #[allow(clippy::cast_precision_loss)]
        let avg_response_time_ms = if measured.is_empty() {
            0.0
        } else {
            measured.iter().map(|p| p.avg_response_time_ms).sum::<f64>() / measured.len() as f64
        };

        let mut top: Vec<&ProxyState> = proxies
            .iter()
            .filter(|p| p.status == ProxyStatus::Active && p.success_count > 0)
            .collect();
        top.sort_by(|a, b| {
            b.success_rate()
                .partial_cmp(&a.success_rate())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let top_performers = top.iter().take(3).map(|p| p.summary()).collect();

        PoolHealth {
            active,
            blocked,
            error,
            total: proxies.len(),
            avg_response_time_ms,
            top_performers,
        }
    }
}

#[cfg(test)]
#[path = "pool_test.rs"]
mod tests;
