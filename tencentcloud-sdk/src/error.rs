use serde::{Deserialize, Serialize};

/// Unified error type for every Tencent Cloud API call.
///
/// Each variant carries the `service` that produced it (e.g. `clb`, `apigateway`) and
/// the API `action` being invoked, plus variant-specific context.
///
/// # Transport vs. API errors
///
/// [`NetworkError`](Self::NetworkError), [`Timeout`](Self::Timeout) and
/// [`RateLimited`](Self::RateLimited) come from the HTTP layer. [`Api`](Self::Api)
/// is an error reported by the control plane inside the response envelope; its
/// `code` is the dotted Tencent Cloud error code (`ResourceNotFound.InvalidApi`, ...).
///
/// The client itself never retries: callers decide what is retryable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum SdkError {
    /// A network-level error occurred (DNS resolution failure, connection refused, 5xx gateway).
    NetworkError {
        /// Service that produced the error.
        service: String,
        /// Action being invoked.
        action: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Service that produced the error.
        service: String,
        /// Action being invoked.
        action: String,
        /// Error details.
        detail: String,
    },

    /// HTTP 429 from the API gateway.
    RateLimited {
        /// Service that produced the error.
        service: String,
        /// Action being invoked.
        action: String,
        /// Suggested wait time in seconds, if provided.
        retry_after: Option<u64>,
        /// Raw response body, if any.
        raw_message: Option<String>,
    },

    /// Error reported by the control plane in `Response.Error`.
    Api {
        /// Service that produced the error.
        service: String,
        /// Action being invoked.
        action: String,
        /// Dotted error code, e.g. `InvalidParameter.LBIdNotFound`.
        error_code: String,
        /// Error message from the API.
        message: String,
        /// Request id, if the envelope carried one.
        request_id: Option<String>,
    },

    /// Failed to parse the API response.
    ParseError {
        /// Service that produced the error.
        service: String,
        /// Action being invoked.
        action: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize a request body.
    SerializationError {
        /// Service that produced the error.
        service: String,
        /// Action being invoked.
        action: String,
        /// Details about the serialization failure.
        detail: String,
    },

    /// The client could not be constructed (bad endpoint, TLS backend failure, ...).
    InvalidConfig {
        /// Description of what's wrong.
        detail: String,
    },
}

impl SdkError {
    /// Returns the API error code for [`Api`](Self::Api) errors.
    pub fn api_code(&self) -> Option<&str> {
        match self {
            Self::Api { error_code, .. } => Some(error_code),
            _ => None,
        }
    }

    /// Returns the API action that failed, when known.
    pub fn action(&self) -> Option<&str> {
        match self {
            Self::NetworkError { action, .. }
            | Self::Timeout { action, .. }
            | Self::RateLimited { action, .. }
            | Self::Api { action, .. }
            | Self::ParseError { action, .. }
            | Self::SerializationError { action, .. } => Some(action),
            Self::InvalidConfig { .. } => None,
        }
    }

    /// Whether this error is expected behavior (bad input, missing resources), used for log levels.
    ///
    /// `true` should be logged at `warn`, `false` at `error`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Api { error_code, .. } => {
                let category = error_code.split('.').next().unwrap_or_default();
                matches!(
                    category,
                    "ResourceNotFound"
                        | "InvalidParameter"
                        | "InvalidParameterValue"
                        | "MissingParameter"
                        | "UnauthorizedOperation"
                        | "AuthFailure"
                        | "LimitExceeded"
                )
            }
            _ => false,
        }
    }
}

impl std::fmt::Display for SdkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError {
                service,
                action,
                detail,
            } => write!(f, "[{service}] {action}: Network error: {detail}"),
            Self::Timeout {
                service,
                action,
                detail,
            } => write!(f, "[{service}] {action}: Request timeout: {detail}"),
            Self::RateLimited {
                service,
                action,
                retry_after,
                ..
            } => {
                if let Some(secs) = retry_after {
                    write!(f, "[{service}] {action}: Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "[{service}] {action}: Rate limited")
                }
            }
            Self::Api {
                service,
                action,
                error_code,
                message,
                request_id,
            } => {
                write!(f, "[{service}] {action}: [{error_code}] {message}")?;
                if let Some(id) = request_id {
                    write!(f, " (RequestId: {id})")?;
                }
                Ok(())
            }
            Self::ParseError {
                service,
                action,
                detail,
            } => write!(f, "[{service}] {action}: Parse error: {detail}"),
            Self::SerializationError {
                service,
                action,
                detail,
            } => write!(f, "[{service}] {action}: Serialization error: {detail}"),
            Self::InvalidConfig { detail } => write!(f, "Invalid client configuration: {detail}"),
        }
    }
}

impl std::error::Error for SdkError {}

/// Type alias for `Result<T, SdkError>`.
pub type Result<T> = std::result::Result<T, SdkError>;
