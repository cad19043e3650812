use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Message returned to clients when the recipe table never loaded
pub const DATASET_UNAVAILABLE_MESSAGE: &str = "Recipe dataset could not be loaded.";

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Csv(#[from] csv::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("{}", DATASET_UNAVAILABLE_MESSAGE)]
    DatasetUnavailable,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Get a sanitized error message safe for logging
    /// Filters out potentially sensitive information
    pub fn log_safe(&self) -> String {
        match self {
            // HTTP errors might contain internal URLs or authentication info
            Error::Http(_) => "External HTTP request failed".to_string(),

            // Internal errors might contain sensitive details
            Error::Internal(msg) => {
                let lower = msg.to_lowercase();
                if lower.contains("password")
                    || lower.contains("secret")
                    || lower.contains("token")
                    || lower.contains("key")
                {
                    "Internal error (details redacted)".to_string()
                } else {
                    format!("Internal error: {msg}")
                }
            }

            Error::Csv(e) => e.to_string(),
            Error::Dataset(msg) => format!("Dataset error: {msg}"),
            Error::DatasetUnavailable => "Recipe dataset unavailable".to_string(),
            Error::Config(msg) => format!("Configuration error: {msg}"),
        }
    }
}

// Implement IntoResponse for API error handling
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::error!("Request error: {}", self.log_safe());

        let (status, error_message) = match &self {
            // Clients read the missing dataset from the body, not the status
            Error::DatasetUnavailable => (
                StatusCode::OK,
                DATASET_UNAVAILABLE_MESSAGE.to_string(),
            ),
            Error::Http(_) => (
                StatusCode::BAD_GATEWAY,
                "External service error".to_string(),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_safe_redacts_secrets() {
        let err = Error::Internal("bad api key abc123".to_string());
        assert_eq!(err.log_safe(), "Internal error (details redacted)");

        let err = Error::Internal("worker crashed".to_string());
        assert_eq!(err.log_safe(), "Internal error: worker crashed");
    }

    #[test]
    fn test_dataset_unavailable_status() {
        let response = Error::DatasetUnavailable.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            Error::DatasetUnavailable.to_string(),
            "Recipe dataset could not be loaded."
        );
    }

    #[test]
    fn test_other_errors_keep_failure_status() {
        let response = Error::Dataset("bad header".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_csv_error_message_has_single_prefix() {
        let data = "a,b\n1,2\n3\n";
        let mut reader = csv::ReaderBuilder::new().from_reader(data.as_bytes());
        let csv_error = reader
            .records()
            .find_map(|record| record.err())
            .expect("ragged row should fail a strict reader");

        let message = Error::from(csv_error).to_string();
        assert!(message.starts_with("CSV error:"), "{message}");
        assert_eq!(message.matches("CSV error:").count(), 1, "{message}");
    }
}
