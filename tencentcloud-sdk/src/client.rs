//! Signed API 3.0 client shared by every service

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::credential::Credential;
use crate::error::{Result, SdkError};
use crate::http_client::HttpUtils;
use crate::ratelimit::RateLimiter;
use crate::sign::{self, CONTENT_TYPE, SignInput};
use crate::transport::{HttpRequest, ReqwestTransport, Transport};
use crate::utils::log_sanitizer::{redact_body, truncate_for_log};

pub const DEFAULT_DOMAIN: &str = "tencentcloudapi.com";
pub const DEFAULT_REGION: &str = "ap-guangzhou";
const DEFAULT_LANGUAGE: &str = "en-US";
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Service name plus API version, e.g. `clb` / `2018-03-17`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub service: &'static str,
    pub version: &'static str,
}

/// URL scheme used to reach the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Protocol {
    #[default]
    Https,
    Http,
}

impl Protocol {
    pub fn scheme(self) -> &'static str {
        match self {
            Self::Https => "https",
            Self::Http => "http",
        }
    }
}

impl std::str::FromStr for Protocol {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "HTTPS" => Ok(Self::Https),
            "HTTP" => Ok(Self::Http),
            _ => Err(SdkError::InvalidConfig {
                detail: format!("unsupported protocol '{s}', expected HTTP or HTTPS"),
            }),
        }
    }
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(rename = "Response")]
    response: serde_json::Value,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    #[serde(rename = "Code")]
    code: String,
    #[serde(rename = "Message", default)]
    message: String,
}

/// Tencent Cloud API client
///
/// Cheap to share behind an `Arc`. All service accessors (`clb()`, `vpc()`, ...)
/// borrow it.
pub struct TencentCloudClient {
    transport: Arc<dyn Transport>,
    credential: Credential,
    region: String,
    protocol: Protocol,
    domain: String,
    language: String,
    limiter: Arc<RateLimiter>,
}

/// [`TencentCloudClient`] builder
pub struct TencentCloudClientBuilder {
    credential: Credential,
    region: String,
    protocol: Protocol,
    domain: String,
    request_timeout: Duration,
    transport: Option<Arc<dyn Transport>>,
    limiter: Option<Arc<RateLimiter>>,
}

impl TencentCloudClientBuilder {
    fn new(credential: Credential) -> Self {
        Self {
            credential,
            region: DEFAULT_REGION.to_string(),
            protocol: Protocol::default(),
            domain: DEFAULT_DOMAIN.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            transport: None,
            limiter: None,
        }
    }

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = protocol;
        self
    }

    /// Root domain; each service is reached at `{service}.{domain}`.
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    /// Per-request HTTP timeout for the default transport.
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Replace the default reqwest transport.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Share a rate limiter with other clients.
    pub fn rate_limiter(mut self, limiter: Arc<RateLimiter>) -> Self {
        self.limiter = Some(limiter);
        self
    }

    pub fn build(self) -> Result<TencentCloudClient> {
        if self.region.trim().is_empty() {
            return Err(SdkError::InvalidConfig {
                detail: "region must not be empty".to_string(),
            });
        }
        if self.domain.trim().is_empty() {
            return Err(SdkError::InvalidConfig {
                detail: "domain must not be empty".to_string(),
            });
        }

        let transport = match self.transport {
            Some(t) => t,
            None => Arc::new(ReqwestTransport::new(self.request_timeout)?),
        };

        Ok(TencentCloudClient {
            transport,
            credential: self.credential,
            region: self.region,
            protocol: self.protocol,
            domain: self.domain.trim_start_matches('.').to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            limiter: self.limiter.unwrap_or_default(),
        })
    }
}

impl TencentCloudClient {
    pub fn builder(credential: Credential) -> TencentCloudClientBuilder {
        TencentCloudClientBuilder::new(credential)
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn rate_limiter(&self) -> &Arc<RateLimiter> {
        &self.limiter
    }

    fn host(&self, endpoint: &Endpoint) -> String {
        format!("{}.{}", endpoint.service, self.domain)
    }

    /// Invoke one API action
    ///
    /// Rate-limits on `action`, signs the serialized `request`, sends it, and decodes
    /// `Response` into `Resp`. An `Error` object in the envelope becomes
    /// [`SdkError::Api`].
    pub async fn call<Req, Resp>(&self, endpoint: &Endpoint, action: &str, request: &Req) -> Result<Resp>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let service = endpoint.service;

        self.limiter.check(action).await;

        // 1. Serialize request body
        let payload =
            serde_json::to_string(request).map_err(|e| SdkError::SerializationError {
                service: service.to_string(),
                action: action.to_string(),
                detail: e.to_string(),
            })?;
        if log::log_enabled!(log::Level::Debug) {
            log::debug!(
                "[{service}] {action} Request Body: {}",
                truncate_for_log(&redact_body(&payload))
            );
        }

        // 2. Sign
        let host = self.host(endpoint);
        let timestamp = Utc::now().timestamp();
        let authorization = sign::authorization(
            &self.credential,
            &SignInput {
                service,
                host: &host,
                action,
                payload: &payload,
                timestamp,
            },
        );

        // 3. Send
        let mut headers = vec![
            ("Content-Type", CONTENT_TYPE.to_string()),
            ("Host", host.clone()),
            ("X-TC-Action", action.to_string()),
            ("X-TC-Version", endpoint.version.to_string()),
            ("X-TC-Timestamp", timestamp.to_string()),
            ("X-TC-Region", self.region.clone()),
            ("X-TC-Language", self.language.clone()),
            ("Authorization", authorization),
        ];
        if let Some(token) = self.credential.token() {
            headers.push(("X-TC-Token", token.to_string()));
        }

        let response_text = self
            .transport
            .send(HttpRequest {
                service: service.to_string(),
                action: action.to_string(),
                url: format!("{}://{host}/", self.protocol.scheme()),
                headers,
                body: payload,
            })
            .await?;

        // 4. Unwrap envelope
        let envelope: Envelope = HttpUtils::parse_json(&response_text, service, action)?;
        let response = envelope.response;

        if let Some(error) = response.get("Error") {
            let body: ApiErrorBody =
                serde_json::from_value(error.clone()).map_err(|e| SdkError::ParseError {
                    service: service.to_string(),
                    action: action.to_string(),
                    detail: format!("malformed Error object: {e}"),
                })?;
            let err = SdkError::Api {
                service: service.to_string(),
                action: action.to_string(),
                error_code: body.code,
                message: body.message,
                request_id: response
                    .get("RequestId")
                    .and_then(serde_json::Value::as_str)
                    .map(str::to_string),
            };
            if err.is_expected() {
                log::warn!("{err}");
            } else {
                log::error!("{err}");
            }
            return Err(err);
        }

        serde_json::from_value(response).map_err(|e| {
            log::error!("[{service}] {action} response decode failed: {e}");
            SdkError::ParseError {
                service: service.to_string(),
                action: action.to_string(),
                detail: e.to_string(),
            }
        })
    }
}
