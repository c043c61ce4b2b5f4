pub mod backoff;
pub mod client;
pub mod detect;
pub mod error;
pub mod identity;
pub mod pool;

pub use backoff::{no_delay, tokio_delay, DelayFn};
pub use client::{AttemptOutcome, FetchAttempt, FetchClient, FetchOutcome};
pub use error::FetchError;
pub use pool::{Egress, PoolHealth, ProxyPool, ProxyStatus, ProxySummary};
