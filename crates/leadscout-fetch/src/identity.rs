//! Rotating browser identities.
//!
//! Each fetch attempt draws a fresh identity so consecutive requests do not
//! present an identical fingerprint. The user-agent set skews toward current
//! desktop browsers; header values are paired to stay plausible for the
//! chosen agent.

/// User agents rotated across attempts.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:127.0) Gecko/20100101 Firefox/127.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.5 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36 Edg/126.0.0.0",
];

const ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";

const ACCEPT_LANGUAGES: &[&str] = &["en-US,en;q=0.9", "en-US,en;q=0.8", "en-GB,en;q=0.9,en-US;q=0.8"];

/// One request's worth of identity headers.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_agent: &'static str,
    pub accept: &'static str,
    pub accept_language: &'static str,
}

impl Identity {
    /// Draws a random identity from the rotation set.
    #[must_use]
    pub fn random() -> Self {
        Self {
            user_agent: pick(USER_AGENTS),
            accept: ACCEPT,
            accept_language: pick(ACCEPT_LANGUAGES),
        }
    }

    /// Applies this identity's headers to a request builder.
    #[must_use]
    pub fn apply(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header(reqwest::header::USER_AGENT, self.user_agent)
            .header(reqwest::header::ACCEPT, self.accept)
            .header(reqwest::header::ACCEPT_LANGUAGE, self.accept_language)
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn pick(options: &'static [&'static str]) -> &'static str {
    let idx = (rand::random::<f64>() * options.len() as f64) as usize;
    options[idx.min(options.len() - 1)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_identity_draws_from_rotation_set() {
        for _ in 0..20 {
            let identity = Identity::random();
            assert!(USER_AGENTS.contains(&identity.user_agent));
            assert!(ACCEPT_LANGUAGES.contains(&identity.accept_language));
        }
    }

    #[test]
    fn rotation_actually_varies() {
        let agents: std::collections::HashSet<_> =
            (0..100).map(|_| Identity::random().user_agent).collect();
        assert!(
            agents.len() > 1,
            "100 draws should produce more than one distinct agent"
        );
    }
}
