//! Error types for the recall-search crate.
//!
//! All errors use stable string messages suitable for display to users
//! and programmatic handling. Client secrets and access tokens never
//! appear in error messages.

/// Errors that can occur while talking to the music catalog.
///
/// Ranking itself is infallible; only the collaborators around it
/// (token exchange, HTTP calls, response decoding, config) return these.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// An HTTP request to the catalog could not be sent or read.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The catalog answered with a non-success status code.
    #[error("catalog returned status {status}: {context}")]
    Status {
        /// HTTP status code returned by the catalog.
        status: u16,
        /// Which call failed.
        context: String,
    },

    /// Acquiring an access token failed.
    #[error("auth error: {0}")]
    Auth(String),

    /// The catalog response did not match the expected schema.
    #[error("parse error: {0}")]
    Parse(String),

    /// A catalog call exceeded the configured timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),
}

impl SearchError {
    /// Map a [`reqwest::Error`] raised while performing `context`.
    pub(crate) fn from_reqwest(context: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(format!("{context}: {err}"))
        } else {
            Self::Http(format!("{context}: {err}"))
        }
    }
}

/// Convenience type alias for recall-search results.
pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_http() {
        let err = SearchError::Http("connection refused".into());
        assert_eq!(err.to_string(), "HTTP error: connection refused");
    }

    #[test]
    fn display_status() {
        let err = SearchError::Status {
            status: 429,
            context: "track search".into(),
        };
        assert_eq!(err.to_string(), "catalog returned status 429: track search");
    }

    #[test]
    fn display_auth() {
        let err = SearchError::Auth("credentials not configured".into());
        assert_eq!(err.to_string(), "auth error: credentials not configured");
    }

    #[test]
    fn display_parse() {
        let err = SearchError::Parse("missing field `id`".into());
        assert_eq!(err.to_string(), "parse error: missing field `id`");
    }

    #[test]
    fn display_timeout() {
        let err = SearchError::Timeout("exceeded 8s limit".into());
        assert_eq!(err.to_string(), "request timed out: exceeded 8s limit");
    }

    #[test]
    fn display_config() {
        let err = SearchError::Config("max_results must be > 0".into());
        assert_eq!(err.to_string(), "config error: max_results must be > 0");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SearchError>();
    }
}
