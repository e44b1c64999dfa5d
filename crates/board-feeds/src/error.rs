//! Error types for the board-feeds crate.

use thiserror::Error;

/// Errors that can occur while fetching a weather report or a stock quote.
#[derive(Debug, Error)]
pub enum FeedError {
    /// No API key was configured for the feed.
    #[error("No API key configured for {0}")]
    MissingApiKey(&'static str),

    /// The request URL could not be built from the configured base URL.
    #[error("Invalid feed URL: {0}")]
    Url(String),

    /// The request never produced a response (DNS, connect, TLS, body read).
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status code.
    #[error("HTTP error! status: {0}")]
    Status(u16),

    /// The response body was not the JSON shape we expect.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl FeedError {
    /// HTTP status code, when the failure came from a non-2xx response.
    pub fn status(&self) -> Option<u16> {
        match self {
            FeedError::Status(code) => Some(*code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_embeds_code_in_message() {
        let err = FeedError::Status(404);
        assert_eq!(err.to_string(), "HTTP error! status: 404");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn non_status_errors_have_no_code() {
        assert_eq!(FeedError::Network("refused".into()).status(), None);
        assert_eq!(FeedError::Decode("eof".into()).status(), None);
        assert_eq!(FeedError::MissingApiKey("weather").status(), None);
    }

    #[test]
    fn missing_key_names_the_feed() {
        let msg = FeedError::MissingApiKey("finance").to_string();
        assert!(msg.contains("finance"), "message should name the feed: {msg}");
    }
}
