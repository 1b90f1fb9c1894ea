use saveserve_core::CoreError;
use thiserror::Error;

/// Failures talking to the outbound services.
#[derive(Error, Debug)]
pub enum RelayError {
    /// Request never produced a response (DNS, TLS, connection reset, ...)
    #[error("Network error during {context}: {source}")]
    Network {
        context: String,
        source: reqwest::Error,
    },

    /// The service answered with a non-success status
    #[error("{service} rejected the request ({status}): {body}")]
    Rejected {
        service: &'static str,
        status: u16,
        body: String,
    },

    /// Response body did not have the expected shape
    #[error("Failed to decode {service} response: {reason}")]
    Decode {
        service: &'static str,
        reason: String,
    },

    /// Required API key missing from the environment
    #[error("{var} not set")]
    MissingApiKey { var: &'static str },

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type Result<T> = std::result::Result<T, RelayError>;

impl RelayError {
    pub fn network(context: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            context: context.into(),
            source,
        }
    }

    /// Build a rejection, truncating the body so service details stay out of logs.
    pub fn rejected(service: &'static str, status: u16, body: &str) -> Self {
        let body = if body.chars().count() > 500 {
            format!("{}...", body.chars().take(500).collect::<String>())
        } else {
            body.to_string()
        };
        Self::Rejected {
            service,
            status,
            body,
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_body_is_truncated() {
        let long = "x".repeat(800);
        let err = RelayError::rejected("formsubmit", 500, &long);
        match err {
            RelayError::Rejected { body, .. } => {
                assert_eq!(body.chars().count(), 503);
                assert!(body.ends_with("..."));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn display_names_the_service() {
        let err = RelayError::rejected("formsubmit", 422, "bad");
        assert_eq!(err.to_string(), "formsubmit rejected the request (422): bad");
    }
}
