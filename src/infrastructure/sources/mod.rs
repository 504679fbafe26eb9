pub mod api_football;
pub mod betbrain;
pub mod escored;
pub mod forebet;

use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;

/// Browser-like client shared by the scraping adapters. Several of the
/// scraped sites reject requests without a desktop user agent.
pub(crate) fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
             (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
        )
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap_or_default()
}

/// First number in free text like "72%", "conf. 64.5" or "4/5 stars",
/// clamped to 0–100. Unparseable text counts as zero confidence.
pub fn extract_confidence(text: &str) -> f64 {
    static NUMBER: OnceLock<Regex> = OnceLock::new();
    let re = NUMBER.get_or_init(|| Regex::new(r"(\d+(?:\.\d+)?)").unwrap());
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .map(|v| v.clamp(0.0, 100.0))
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_confidence_variants() {
        assert_eq!(extract_confidence("72%"), 72.0);
        assert_eq!(extract_confidence("conf. 64.5"), 64.5);
        assert_eq!(extract_confidence("no digits here"), 0.0);
        assert_eq!(extract_confidence(""), 0.0);
    }

    #[test]
    fn test_extract_confidence_clamps() {
        assert_eq!(extract_confidence("350%"), 100.0);
    }
}
