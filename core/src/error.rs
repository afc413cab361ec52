//! Error types for the WordPress API client.
//!
//! # Design
//! `NotFound` gets a dedicated variant because callers frequently distinguish
//! "the resource does not exist" from "the server returned an unexpected
//! status." All other non-success responses land in `Http` with the raw
//! status code and body for debugging. Validation failures are raised before
//! any request is built, so they never carry a status.

use thiserror::Error;

/// Errors returned by `WordPress` operations, discovery, and the model mapper.
#[derive(Debug, Error)]
pub enum WpError {
    /// A parameter value is outside its allowed set.
    #[error("the value {value:?} is not allowed for {param}")]
    Validation { param: &'static str, value: String },

    /// The server returned 404. `body` is WordPress's error payload.
    #[error("resource not found: {url}: {body}")]
    NotFound { url: String, body: String },

    /// The server returned a status other than the expected one(s) and 404.
    #[error("WordPress REST API returned the status code {status}: {body}")]
    Http { status: u16, body: String },

    /// The site did not advertise an API root.
    #[error("could not discover the API root of {url}: {reason}")]
    Discovery { url: String, reason: String },

    /// The transport failed before a response was received.
    #[error("transport error: {0}")]
    Transport(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The response body could not be deserialized into the expected shape.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// A date field does not use the `YYYY-MM-DDTHH:MM:SS` format.
    #[error("field {field} has an invalid timestamp {value:?}")]
    InvalidDate { field: String, value: String },

    /// The model was parsed without a client, or its client has been dropped.
    #[error("model is not attached to a client")]
    DetachedModel,

    /// Two models of different kinds were compared.
    #[error("cannot compare a {left} with a {right}")]
    KindMismatch {
        left: &'static str,
        right: &'static str,
    },
}

impl WpError {
    /// HTTP status carried by the error, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            WpError::NotFound { .. } => Some(404),
            WpError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, WpError::Validation { .. })
    }

    pub(crate) fn validation(param: &'static str, value: impl Into<String>) -> Self {
        WpError::Validation {
            param,
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_is_reported_for_server_errors_only() {
        let not_found = WpError::NotFound {
            url: "http://example.org/wp-json/wp/v2/posts/404".to_string(),
            body: String::new(),
        };
        assert_eq!(not_found.status(), Some(404));

        let http = WpError::Http {
            status: 500,
            body: "oops".to_string(),
        };
        assert_eq!(http.status(), Some(500));

        assert_eq!(WpError::validation("order", "test").status(), None);
    }

    #[test]
    fn validation_message_names_the_value() {
        let err = WpError::validation("context", "test");
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "the value \"test\" is not allowed for context"
        );
    }
}
