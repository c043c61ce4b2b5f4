//! Anti-bot response detection.
//!
//! A 200 response whose body is a challenge interstitial is worse than a
//! clean failure: parsing it yields garbage records. The marker list below
//! covers the challenge pages observed across the supported directory
//! sources. Matching is case-insensitive substring search.

/// Body markers indicating a CAPTCHA wall or bot-mitigation interstitial.
const BLOCK_MARKERS: &[&str] = &[
    "recaptcha",
    "g-recaptcha",
    "hcaptcha",
    "cf-challenge",
    "cf-browser-verification",
    "attention required! | cloudflare",
    "checking your browser before accessing",
    "verify you are human",
    "are you a robot",
    "unusual traffic from your computer network",
    "access to this page has been denied",
    "pardon our interruption",
];

/// Bodies shorter than this are scanned whole; longer bodies only in their
/// head, where challenge pages put their markup.
const SCAN_LIMIT_BYTES: usize = 65_536;

/// Returns the first block marker found in `body`, if any.
#[must_use]
pub fn find_block_marker(body: &str) -> Option<&'static str> {
    let head = match body.char_indices().nth(SCAN_LIMIT_BYTES) {
        Some((idx, _)) => &body[..idx],
        None => body,
    };
    let lowered = head.to_lowercase();
    BLOCK_MARKERS
        .iter()
        .find(|marker| lowered.contains(**marker))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_body_has_no_marker() {
        let body = "<html><body><h1>Acme Plumbing</h1><p>Call us today</p></body></html>";
        assert_eq!(find_block_marker(body), None);
    }

    #[test]
    fn detects_recaptcha_widget() {
        let body = r#"<div class="g-recaptcha" data-sitekey="abc"></div>"#;
        assert_eq!(find_block_marker(body), Some("recaptcha"));
    }

    #[test]
    fn detects_cloudflare_interstitial_case_insensitively() {
        let body = "<title>Attention Required! | Cloudflare</title>";
        assert_eq!(
            find_block_marker(body),
            Some("attention required! | cloudflare")
        );
    }

    #[test]
    fn detects_human_verification_prompt() {
        let body = "<p>Please VERIFY YOU ARE HUMAN to continue.</p>";
        assert_eq!(find_block_marker(body), Some("verify you are human"));
    }

    #[test]
    fn empty_body_is_clean() {
        assert_eq!(find_block_marker(""), None);
    }

    #[test]
    fn marker_beyond_scan_limit_is_ignored() {
        let mut body = "a".repeat(SCAN_LIMIT_BYTES + 10);
        body.push_str("recaptcha");
        assert_eq!(find_block_marker(&body), None);
    }
}
