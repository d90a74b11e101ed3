//! Error taxonomy shared by the gateway, the panel controller and the forms

use thiserror::Error;

pub const BAD_REQUEST_MESSAGE: &str = "Bad request. Please check your inputs.";
pub const DETAILS_FAILURE_MESSAGE: &str = "Failed to load details.";
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

/// Outcome of a failed remote call. Every gateway call yields at most one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// The request never completed
    #[error("network error: {0}")]
    Network(String),
    /// Non-2xx response
    #[error("server responded with status {status}")]
    Server { status: u16 },
    /// 404 on a single-record fetch
    #[error("record '{key}' not found")]
    NotFound { key: String },
    /// 2xx response whose body does not match the schema
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl GatewayError {
    /// Text shown to the user for this failure
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Server { status: 400 } => BAD_REQUEST_MESSAGE,
            Self::NotFound { .. } => DETAILS_FAILURE_MESSAGE,
            _ => GENERIC_FAILURE_MESSAGE,
        }
    }
}

/// Required fields left empty; raised before any network call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Please fill in all required fields: {}", .missing.join(", "))]
pub struct ValidationError {
    /// Labels of the empty required fields, in form order
    pub missing: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_mapping() {
        assert_eq!(
            GatewayError::Server { status: 400 }.user_message(),
            BAD_REQUEST_MESSAGE
        );
        assert_eq!(
            GatewayError::Server { status: 500 }.user_message(),
            GENERIC_FAILURE_MESSAGE
        );
        assert_eq!(
            GatewayError::Network("offline".into()).user_message(),
            GENERIC_FAILURE_MESSAGE
        );
        assert_eq!(
            GatewayError::NotFound { key: "C-1".into() }.user_message(),
            DETAILS_FAILURE_MESSAGE
        );
    }

    #[test]
    fn test_validation_error_lists_fields() {
        let err = ValidationError {
            missing: vec!["Common Name".into(), "Season".into()],
        };
        assert_eq!(
            err.to_string(),
            "Please fill in all required fields: Common Name, Season"
        );
    }
}
