//! HTTP execution helpers
//!
//! Shared by every transport built on reqwest: send a prepared request, classify
//! transport-level failures, log the exchange, and parse JSON bodies.
//!
//! # Design principles
//! - **No retries here** - retry policy belongs to the caller, which knows whether an
//!   action is idempotent and which error codes are transient for it
//! - **Status-aware** - 429 and 502..=504 are reported as transient transport errors
//! - **Bodies are logged truncated** - see [`truncate_for_log`]

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use crate::error::SdkError;
use crate::utils::log_sanitizer::truncate_for_log;

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request and returns the response status and text
    ///
    /// # Arguments
    /// * `request_builder` - fully prepared request (URL, headers, body)
    /// * `service` - service name (for logs and errors)
    /// * `action` - API action name (for logs and errors)
    ///
    /// # Returns
    /// * `Ok((status_code, response_text))` - any status other than 429/502/503/504
    /// * `Err(SdkError::Timeout | NetworkError | RateLimited)` - transport failures
    pub async fn execute_request(
        request_builder: RequestBuilder,
        service: &str,
        action: &str,
    ) -> Result<(u16, String), SdkError> {
        log::debug!("[{service}] POST Action: {action}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                SdkError::Timeout {
                    service: service.to_string(),
                    action: action.to_string(),
                    detail: e.to_string(),
                }
            } else {
                SdkError::NetworkError {
                    service: service.to_string(),
                    action: action.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status_code = response.status().as_u16();
        log::debug!("[{service}] Response Status: {status_code}");

        // Extract Retry-After header (before consuming response body)
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        if status_code == 429 {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{service}] {action} rate limited (HTTP 429), retry_after={retry_after:?}");
            return Err(SdkError::RateLimited {
                service: service.to_string(),
                action: action.to_string(),
                retry_after,
                raw_message: Some(body),
            });
        }

        if matches!(status_code, 502..=504) {
            let body = response.text().await.unwrap_or_default();
            log::warn!("[{service}] {action} server error (HTTP {status_code})");
            return Err(SdkError::NetworkError {
                service: service.to_string(),
                action: action.to_string(),
                detail: format!("HTTP {status_code}: {}", truncate_for_log(&body)),
            });
        }

        let response_text = response
            .text()
            .await
            .map_err(|e| SdkError::NetworkError {
                service: service.to_string(),
                action: action.to_string(),
                detail: format!("Failed to read response body: {e}"),
            })?;

        log::debug!(
            "[{service}] Response Body: {}",
            truncate_for_log(&response_text)
        );

        Ok((status_code, response_text))
    }

    /// Parse a JSON body
    ///
    /// # Returns
    /// * `Ok(T)` - successfully parsed
    /// * `Err(SdkError::ParseError)` - parsing failed; the raw body is logged truncated
    pub fn parse_json<T>(response_text: &str, service: &str, action: &str) -> Result<T, SdkError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[{service}] {action} JSON parse failed: {e}");
            log::error!(
                "[{service}] Raw response: {}",
                truncate_for_log(response_text)
            );
            SdkError::ParseError {
                service: service.to_string(),
                action: action.to_string(),
                detail: e.to_string(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, serde::Deserialize)]
    struct Probe {
        #[serde(rename = "RequestId")]
        request_id: String,
    }

    #[test]
    fn parse_json_valid() {
        let p: Probe = HttpUtils::parse_json(r#"{"RequestId":"r-1"}"#, "clb", "X").unwrap();
        assert_eq!(p.request_id, "r-1");
    }

    #[test]
    fn parse_json_invalid_reports_action() {
        let err = HttpUtils::parse_json::<Probe>("<html>", "clb", "DescribeTaskStatus").unwrap_err();
        match err {
            SdkError::ParseError {
                service, action, ..
            } => {
                assert_eq!(service, "clb");
                assert_eq!(action, "DescribeTaskStatus");
            }
            other => panic!("expected ParseError, got {other:?}"),
        }
    }

    #[test]
    fn parse_json_missing_field() {
        let result = HttpUtils::parse_json::<Probe>("{}", "vpc", "X");
        assert!(matches!(result, Err(SdkError::ParseError { .. })));
    }
}
