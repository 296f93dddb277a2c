//! Pluggable transport for signed API requests
//!
//! [`TencentCloudClient`](crate::TencentCloudClient) prepares a fully signed
//! [`HttpRequest`] and hands it to a [`Transport`]. Production code uses
//! [`ReqwestTransport`]; tests substitute an in-memory fake.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::common::create_http_client;
use crate::error::{Result, SdkError};
use crate::http_client::HttpUtils;

/// A signed request ready to be sent.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// Short service name, e.g. `apigateway`.
    pub service: String,
    /// API action, e.g. `DescribeApi`.
    pub action: String,
    /// Full URL, e.g. `https://apigateway.tencentcloudapi.com/`.
    pub url: String,
    /// Header name/value pairs in send order.
    pub headers: Vec<(&'static str, String)>,
    /// JSON body.
    pub body: String,
}

impl HttpRequest {
    /// Look up a header value by name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Sends a signed request and returns the raw response body.
///
/// Implementations report transport failures as [`SdkError::NetworkError`],
/// [`SdkError::Timeout`] or [`SdkError::RateLimited`]. Envelope parsing happens in
/// the client.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<String>;
}

/// Default transport backed by a shared reqwest [`Client`].
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(request_timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: create_http_client(request_timeout)?,
        })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<String> {
        let mut builder = self.client.post(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }
        let builder = builder.body(request.body);

        let (status, text) =
            HttpUtils::execute_request(builder, &request.service, &request.action).await?;

        // The API answers 200 for business errors; anything else never carries an envelope.
        if status != 200 {
            return Err(SdkError::Api {
                service: request.service,
                action: request.action,
                error_code: "ClientError.HttpStatusCodeError".to_string(),
                message: format!("unexpected HTTP status {status}"),
                request_id: None,
            });
        }

        Ok(text)
    }
}
