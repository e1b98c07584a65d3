use thiserror::Error;

/// Everything that can go wrong talking to the skills manager server.
///
/// None of these are fatal: callers convert them into a status-line message
/// (summary, report, install) or drop them outright (log tail, paths).
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure: connection refused, timeout, bad URL.
    #[error("request failed: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The server answered non-2xx with a structured `{error}` body.
    #[error("{message}")]
    Server { message: String },

    /// `GET /api/report` before any report exists.
    #[error("no report available yet")]
    NoReport,

    /// The server answered 2xx but the payload did not match the contract.
    #[error("invalid response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ApiError {
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_displays_message_verbatim() {
        let err = ApiError::server("Failed to fetch skills list: timeout");
        assert_eq!(err.to_string(), "Failed to fetch skills list: timeout");
    }

    #[test]
    fn no_report_display() {
        assert_eq!(ApiError::NoReport.to_string(), "no report available yet");
    }

    #[test]
    fn parse_error_wraps_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err = ApiError::from(serde_err);
        assert!(err.to_string().starts_with("invalid response:"));
    }
}
