use serde::Deserialize;
use thiserror::Error;

/// Errors returned by [`crate::GoogleWeatherApi`].
#[derive(Debug, Error)]
pub enum GoogleWeatherError {
    /// The request never produced a response (DNS, TLS, refused, timed out).
    #[error("Error connecting to Google Weather API: {0}")]
    Connection(#[source] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Google Weather API returned HTTP {status}: {message}")]
    Response { status: u16, message: String },

    /// A success response whose body did not match the expected shape.
    #[error("Failed to parse Google Weather API response: {0}")]
    Decode(#[source] serde_json::Error),

    /// Latitude or longitude outside the valid range, or NaN.
    #[error("Invalid coordinates ({latitude}, {longitude}): latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    /// A caller-supplied value was rejected before any request was sent.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl GoogleWeatherError {
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// HTTP status of a [`GoogleWeatherError::Response`], if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Response { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Google error envelope: `{"error": {"code": 400, "message": "...", "status": "..."}}`.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Pull the human-readable message out of an error body, falling back to the raw text.
pub(crate) fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) if body.trim().is_empty() => "empty response body".to_string(),
        Err(_) => truncate_body(body),
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        let head: String = body.chars().take(MAX).collect();
        format!("{head}...")
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_google_error_message() {
        let body = r#"{
            "error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "INVALID_ARGUMENT"
            }
        }"#;

        assert_eq!(error_message(body), "API key not valid. Please pass a valid API key.");
    }

    #[test]
    fn falls_back_to_raw_body() {
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
        assert_eq!(error_message("   "), "empty response body");
    }

    #[test]
    fn truncates_long_bodies_on_char_boundaries() {
        let body = "é".repeat(300);
        let msg = error_message(&body);

        assert!(msg.ends_with("..."));
        assert_eq!(msg.chars().count(), 203);
    }

    #[test]
    fn response_error_display_and_status() {
        let err = GoogleWeatherError::Response { status: 403, message: "denied".into() };

        assert_eq!(err.status(), Some(403));
        assert!(!err.is_connection());
        assert_eq!(err.to_string(), "Google Weather API returned HTTP 403: denied");
    }

    #[test]
    fn invalid_coordinates_display() {
        let err = GoogleWeatherError::InvalidCoordinates { latitude: 91.0, longitude: 0.0 };
        let msg = err.to_string();

        assert!(msg.contains("latitude"));
        assert!(msg.contains("longitude"));
        assert_eq!(err.status(), None);
    }
}
