//! Safe logging helpers
//!
//! The Gemini credential travels in the query string, so request URLs and
//! keys must be masked before they reach a log line or the terminal.

use std::fmt;
use tracing_subscriber::{fmt as tracing_fmt, prelude::*, EnvFilter};
use url::Url;

/// Initialize tracing/logging
///
/// Logs go to stderr so they never interleave with estimator output on stdout.
/// Note: This function can only be called once.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Masked API key representation
///
/// Shows the first 6 characters and replaces the rest with `***`
#[derive(Clone, Debug)]
pub struct SensitiveApiKey<'a> {
    inner: &'a str,
}

impl<'a> SensitiveApiKey<'a> {
    /// # Example
    /// ```
    /// use devreon_estimator::logging::SensitiveApiKey;
    ///
    /// let sanitized = SensitiveApiKey::new("AIzaSyExampleKey123");
    /// assert_eq!(format!("{}", sanitized), "AIzaSy***");
    /// ```
    pub fn new(key: &'a str) -> Self {
        Self { inner: key }
    }
}

impl<'a> fmt::Display for SensitiveApiKey<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let visible_len = 6;
        if self.inner.len() <= visible_len * 2 || !self.inner.is_char_boundary(visible_len) {
            // Too short to reveal anything
            write!(f, "***")
        } else {
            write!(f, "{}***", &self.inner[..visible_len])
        }
    }
}

/// Copy of `url` with the `key` query parameter value masked
///
/// ```
/// use devreon_estimator::logging::redact_url_key;
/// use url::Url;
///
/// let url = Url::parse("https://host/v1beta/models/m:generateContent?key=secret").unwrap();
/// assert_eq!(
///     redact_url_key(&url).as_str(),
///     "https://host/v1beta/models/m:generateContent?key=***"
/// );
/// ```
pub fn redact_url_key(url: &Url) -> Url {
    let mut redacted = url.clone();
    if url.query().is_none() {
        return redacted;
    }

    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(name, value)| {
            let value = if name == "key" { "***".into() } else { value.into_owned() };
            (name.into_owned(), value)
        })
        .collect();

    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted
}
