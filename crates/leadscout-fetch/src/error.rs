use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("anti-bot challenge detected at {url} (marker: \"{marker}\")")]
    Blocked { url: String, marker: String },

    #[error("retries exhausted for {url} after {attempts} attempts")]
    RetriesExhausted {
        url: String,
        attempts: u32,
        #[source]
        source: Box<FetchError>,
    },

    #[error("invalid proxy {endpoint}: {reason}")]
    InvalidProxy { endpoint: String, reason: String },
}
