use reqwest::StatusCode;
use thiserror::Error;

/// API-specific errors
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not logged in")]
    NotLoggedIn,

    #[error("Session expired, please log in again: {0}")]
    Unauthorized(String),

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Access denied: {0}")]
    Forbidden(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl ApiError {
    /// Classify a non-2xx response. `body` is the raw response text; its
    /// JSON `message` (or `error`) field is preferred when present.
    pub fn from_status(status: StatusCode, body: String) -> Self {
        let msg = extract_message(&body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        });

        match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized(msg),
            StatusCode::FORBIDDEN => ApiError::Forbidden(msg),
            StatusCode::NOT_FOUND => ApiError::NotFound(msg),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => ApiError::BadRequest(msg),
            StatusCode::CONFLICT => ApiError::BadRequest(msg),
            status if status.is_server_error() => ApiError::ServerError(msg),
            status if status.is_client_error() => ApiError::BadRequest(msg),
            _ => ApiError::Unknown(msg),
        }
    }

    /// Classify a failed login or registration. A 401 there rejects the
    /// submitted credentials, not the stored session.
    pub fn from_credentials_status(status: StatusCode, body: String) -> Self {
        match Self::from_status(status, body) {
            ApiError::Unauthorized(msg) => ApiError::InvalidCredentials(msg),
            other => other,
        }
    }

    /// The backend rejected our token; the local session is gone
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_) | ApiError::NotLoggedIn)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::NetworkError("request timed out".to_string())
        } else if err.is_connect() {
            ApiError::NetworkError("could not connect to server".to_string())
        } else {
            ApiError::NetworkError(err.to_string())
        }
    }
}

fn extract_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error", "detail"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                return Some(text.to_string());
            }
        }
        return None;
    }

    Some(body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_field_is_used() {
        let error = ApiError::from_status(
            StatusCode::BAD_REQUEST,
            r#"{"message": "Email already registered"}"#.to_string(),
        );
        assert_eq!(error.to_string(), "Bad request: Email already registered");
    }

    #[test]
    fn test_falls_back_to_status_reason() {
        let error = ApiError::from_status(StatusCode::FORBIDDEN, String::new());
        assert!(matches!(error, ApiError::Forbidden(ref m) if m == "Forbidden"));

        let error = ApiError::from_status(StatusCode::BAD_GATEWAY, r#"{"code": 7}"#.to_string());
        assert!(matches!(error, ApiError::ServerError(ref m) if m == "Bad Gateway"));
    }

    #[test]
    fn test_rejected_credentials_are_not_a_lost_session() {
        let error = ApiError::from_credentials_status(
            StatusCode::UNAUTHORIZED,
            r#"{"message": "Invalid email or password"}"#.to_string(),
        );
        assert!(matches!(error, ApiError::InvalidCredentials(ref m) if m == "Invalid email or password"));
        assert!(!error.is_unauthorized());
        assert_eq!(error.to_string(), "Invalid credentials: Invalid email or password");

        let error = ApiError::from_credentials_status(StatusCode::CONFLICT, "taken".to_string());
        assert!(matches!(error, ApiError::BadRequest(ref m) if m == "taken"));
    }

    #[test]
    fn test_plain_text_body() {
        let error = ApiError::from_status(StatusCode::NOT_FOUND, "no such goal".to_string());
        assert!(matches!(error, ApiError::NotFound(ref m) if m == "no such goal"));
    }
}
