//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

pub use tencentcloud_sdk::SdkError;

/// Adapter layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum ProviderError {
    /// Error returned by the API or the transport
    #[error("{0}")]
    Sdk(#[from] SdkError),

    /// Composite or numeric id that cannot be decoded
    #[error("Invalid id '{id}': {reason}")]
    InvalidId { id: String, reason: String },

    /// The API acknowledged the call but reported the operation as unsuccessful
    #[error("{action} failed: {detail}")]
    BusinessFailure { action: String, detail: String },

    /// A lookup that must find its object came back empty
    #[error("{kind} not found: {id}")]
    NotFound { kind: String, id: String },

    /// Retry budget exhausted; carries the last retryable error
    #[error("Timed out after {timeout_secs}s, last error: {last}")]
    RetryTimeout {
        timeout_secs: u64,
        last: Box<ProviderError>,
    },

    /// An asynchronous task finished in a failed state
    #[error("Task {task_id} failed: {detail}")]
    TaskFailed { task_id: String, detail: String },

    /// Provider or resource configuration rejected before any API call
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration or state that does not fit the resource schema
    #[error("Cannot decode {type_name}: {detail}")]
    Decode { type_name: String, detail: String },

    /// Local file error (e.g. writing `result_output_file`)
    #[error("I/O error on {path}: {detail}")]
    Io { path: String, detail: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ProviderError {
    /// Whether it is expected behavior (user input, missing object, etc.), used for log
    /// classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning
    /// `false`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::InvalidId { .. }
            | Self::NotFound { .. }
            | Self::InvalidConfig(_)
            | Self::Decode { .. } => true,
            Self::Sdk(e) => e.is_expected(),
            Self::RetryTimeout { last, .. } => last.is_expected(),
            _ => false,
        }
    }

    /// Underlying API error code, looking through retry timeouts.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Sdk(e) => e.api_code(),
            Self::RetryTimeout { last, .. } => last.code(),
            _ => None,
        }
    }

    /// `true` when [`code`](Self::code) equals `code` or starts with `code.`.
    #[must_use]
    pub fn has_code(&self, code: &str) -> bool {
        self.code().is_some_and(|c| {
            c == code || c.strip_prefix(code).is_some_and(|rest| rest.starts_with('.'))
        })
    }

    pub(crate) fn invalid_id(id: &str, reason: impl Into<String>) -> Self {
        Self::InvalidId {
            id: id.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn not_found(kind: &str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: kind.to_string(),
            id: id.into(),
        }
    }
}

impl From<serde_json::Error> for ProviderError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

/// Adapter layer Result type alias
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn api(code: &str) -> ProviderError {
        ProviderError::Sdk(SdkError::Api {
            service: "clb".to_string(),
            action: "DeleteLoadBalancer".to_string(),
            error_code: code.to_string(),
            message: "boom".to_string(),
            request_id: None,
        })
    }

    #[test]
    fn code_looks_through_retry_timeout() {
        let err = ProviderError::RetryTimeout {
            timeout_secs: 180,
            last: Box::new(api("ResourceBusy")),
        };
        assert_eq!(err.code(), Some("ResourceBusy"));
        assert!(err.to_string().contains("180s"));
    }

    #[test]
    fn has_code_matches_category_prefix() {
        let err = api("ResourceNotFound.ApiNotExist");
        assert!(err.has_code("ResourceNotFound"));
        assert!(err.has_code("ResourceNotFound.ApiNotExist"));
        assert!(!err.has_code("ResourceNotFound.Api"));
        assert!(!err.has_code("Resource"));
    }

    #[test]
    fn expected_classification() {
        assert!(ProviderError::invalid_id("x", "bad").is_expected());
        assert!(api("ResourceNotFound").is_expected());
        assert!(!api("InternalError").is_expected());
        assert!(
            !ProviderError::BusinessFailure {
                action: "AttachPlugin".to_string(),
                detail: "Result=false".to_string(),
            }
            .is_expected()
        );
    }
}
