use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if any provided value fails to parse.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if any provided value fails to parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("LEADSCOUT_ENV", "development"));
    let bind_addr = parse_addr("LEADSCOUT_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("LEADSCOUT_LOG_LEVEL", "info");
    let fleet_path = PathBuf::from(or_default("LEADSCOUT_FLEET_PATH", "./config/proxies.yaml"));

    let fetch_request_timeout_secs = parse_u64("LEADSCOUT_FETCH_REQUEST_TIMEOUT_SECS", "25")?;
    let fetch_max_retries = parse_u32("LEADSCOUT_FETCH_MAX_RETRIES", "3")?;
    let fetch_backoff_base_ms = parse_u64("LEADSCOUT_FETCH_BACKOFF_BASE_MS", "1000")?;
    let fetch_jitter_max_ms = parse_u64("LEADSCOUT_FETCH_JITTER_MAX_MS", "1200")?;

    let proxy_block_threshold = parse_u32("LEADSCOUT_PROXY_BLOCK_THRESHOLD", "3")?;
    let proxy_probe_url = or_default("LEADSCOUT_PROXY_PROBE_URL", "https://example.com/");
    let proxy_reset_interval_secs = parse_u64("LEADSCOUT_PROXY_RESET_INTERVAL_SECS", "1800")?;

    let max_concurrent_adapters = parse_usize("LEADSCOUT_MAX_CONCURRENT_ADAPTERS", "4")?;

    let directory_base_urls = or_default("LEADSCOUT_DIRECTORY_URLS", "")
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToOwned::to_owned)
        .collect();

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        fleet_path,
        fetch_request_timeout_secs,
        fetch_max_retries,
        fetch_backoff_base_ms,
        fetch_jitter_max_ms,
        proxy_block_threshold,
        proxy_probe_url,
        proxy_reset_interval_secs,
        max_concurrent_adapters,
        directory_base_urls,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
