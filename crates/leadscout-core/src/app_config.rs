use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Process-wide configuration, read once at startup from `LEADSCOUT_*`
/// environment variables. Every knob has a default; only malformed values
/// are errors, so the system runs proxyless and adapterless out of the box.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Path to the proxy fleet YAML file. A missing file means an empty
    /// fleet: all fetches go direct.
    pub fleet_path: PathBuf,
    /// Hard per-attempt timeout for one HTTP request.
    pub fetch_request_timeout_secs: u64,
    /// Additional attempts after the first failed one.
    pub fetch_max_retries: u32,
    /// Base delay for exponential backoff between retries.
    pub fetch_backoff_base_ms: u64,
    /// Upper bound for the randomized pre-request pacing delay.
    pub fetch_jitter_max_ms: u64,
    /// Consecutive failures before a proxy transitions to blocked.
    pub proxy_block_threshold: u32,
    /// URL fetched through each proxy by the health check probe.
    pub proxy_probe_url: String,
    /// Seconds between scheduled resets of blocked proxies. Zero disables
    /// the job.
    pub proxy_reset_interval_secs: u64,
    /// Upper bound on source adapters queried at once.
    pub max_concurrent_adapters: usize,
    /// Base URLs for configured directory-endpoint adapters.
    pub directory_base_urls: Vec<String>,
}
