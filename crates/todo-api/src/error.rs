//! Error types for the todo API client.

use std::fmt;

/// Errors reported by the todo server itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Non-success HTTP status, with the response body (or the canonical
    /// reason phrase when the body was empty).
    Http { status: u16, message: String },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Http { status, message } => write!(f, "HTTP error {}: {}", status, message),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Returns the HTTP status code carried by this error.
    pub fn status(&self) -> u16 {
        match self {
            ApiError::Http { status, .. } => *status,
        }
    }
}

/// Top-level error for every client operation.
///
/// Callers that need to tell a 404 from a 500 from a refused connection
/// match on the variant and inspect [`Error::status`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The server answered with a non-success status.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Transport-level failure (connection refused, DNS, TLS, ...).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The response body was not the JSON we expected.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The configured base URL could not be parsed.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl Error {
    /// HTTP status code, if the server responded at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api(api) => Some(api.status()),
            Error::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns true when the server was never reached.
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Request(e) if e.is_connect() || e.is_timeout())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_http() {
        let error = ApiError::Http {
            status: 503,
            message: "Service Unavailable".to_string(),
        };
        assert_eq!(error.to_string(), "HTTP error 503: Service Unavailable");
    }

    #[test]
    fn test_api_error_status() {
        let error = ApiError::Http {
            status: 404,
            message: "Not Found".to_string(),
        };
        assert_eq!(error.status(), 404);
    }

    #[test]
    fn test_error_from_api_error_is_transparent() {
        let error: Error = ApiError::Http {
            status: 500,
            message: "boom".to_string(),
        }
        .into();
        assert_eq!(error.to_string(), "HTTP error 500: boom");
        assert_eq!(error.status(), Some(500));
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let error: Error = json_err.into();
        assert!(matches!(error, Error::Json(_)));
        assert!(error.to_string().starts_with("invalid JSON"));
        assert_eq!(error.status(), None);
        assert!(!error.is_network());
    }

    #[test]
    fn test_invalid_url_display() {
        let error = Error::InvalidUrl {
            url: "not a url".to_string(),
            reason: "relative URL without a base".to_string(),
        };
        let display = error.to_string();
        assert!(display.contains("not a url"));
        assert!(display.contains("relative URL"));
    }

    #[test]
    fn test_api_error_implements_std_error() {
        let error: Box<dyn std::error::Error> = Box::new(ApiError::Http {
            status: 418,
            message: "teapot".to_string(),
        });
        assert!(error.to_string().contains("teapot"));
    }
}
