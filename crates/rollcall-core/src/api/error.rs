use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request timed out")]
    Timeout,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Server {0}")]
    Status(String),

    #[error("{0}")]
    MalformedResponse(String),

    #[error("{0}")]
    Application(String),

    #[error("Please check at least one student.")]
    EmptySelection,
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 200;

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let cut: String = body.chars().take(MAX_ERROR_BODY_LENGTH).collect();
            format!("{}... (truncated, {} total bytes)", cut, body.len())
        }
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let reason = status.canonical_reason().unwrap_or("");
        let mut msg = format!("{} {}", status.as_u16(), reason).trim_end().to_string();
        let body = body.trim();
        if !body.is_empty() {
            msg.push_str(&format!(": {}", Self::truncate_body(body)));
        }
        ApiError::Status(msg)
    }

    /// Whether this is a transport or HTTP failure rather than a reply the
    /// endpoint chose to send.
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Timeout | ApiError::Network(_) | ApiError::Status(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_from_status() {
        let err = ApiError::from_status(StatusCode::NOT_FOUND, "");
        assert_eq!(err.to_string(), "Server 404 Not Found");
        assert!(err.is_network());

        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, " boom ");
        assert_eq!(err.to_string(), "Server 500 Internal Server Error: boom");
    }

    #[test]
    fn test_truncate_body() {
        let body = "x".repeat(MAX_ERROR_BODY_LENGTH + 50);
        let truncated = ApiError::truncate_body(&body);
        assert!(truncated.starts_with(&"x".repeat(MAX_ERROR_BODY_LENGTH)));
        assert!(truncated.ends_with(&format!("({} total bytes)", body.len())));
    }

    #[test]
    fn test_messages() {
        assert_eq!(ApiError::EmptySelection.to_string(), "Please check at least one student.");
        assert_eq!(ApiError::Application("Sheet locked".to_string()).to_string(), "Sheet locked");
        assert!(!ApiError::EmptySelection.is_network());
    }
}
