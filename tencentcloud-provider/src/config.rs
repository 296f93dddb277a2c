//! Provider configuration
//!
//! Values come from code or from the `TENCENTCLOUD_*` environment variables. After
//! [`ProviderConfig::validate`] the config builds the shared [`ProviderContext`].

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tencentcloud_sdk::{
    Credential, Protocol, RateLimiter, TencentCloudClient, DEFAULT_DOMAIN, DEFAULT_RATE_LIMIT,
    DEFAULT_REGION,
};

use crate::context::ProviderContext;
use crate::error::{ProviderError, ProviderResult};
use crate::retry::{READ_RETRY_TIMEOUT, WRITE_RETRY_TIMEOUT};

pub const ENV_SECRET_ID: &str = "TENCENTCLOUD_SECRET_ID";
pub const ENV_SECRET_KEY: &str = "TENCENTCLOUD_SECRET_KEY";
pub const ENV_SECURITY_TOKEN: &str = "TENCENTCLOUD_SECURITY_TOKEN";
pub const ENV_REGION: &str = "TENCENTCLOUD_REGION";
pub const ENV_PROTOCOL: &str = "TENCENTCLOUD_PROTOCOL";
pub const ENV_DOMAIN: &str = "TENCENTCLOUD_DOMAIN";
pub const ENV_REQUEST_TIMEOUT: &str = "TENCENTCLOUD_REQUEST_TIMEOUT";

const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Provider-level settings.
#[derive(Clone)]
pub struct ProviderConfig {
    pub secret_id: String,
    pub secret_key: String,
    pub security_token: Option<String>,
    pub region: String,
    pub protocol: Protocol,
    pub domain: String,
    pub request_timeout: Duration,
    pub read_timeout: Duration,
    pub write_timeout: Duration,
    /// Requests per second per action; 0 disables limiting.
    pub rate_limit: u32,
    pub rate_limit_overrides: HashMap<String, u32>,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("secret_id", &tencentcloud_sdk::log_sanitizer::mask_secret(&self.secret_id))
            .field("secret_key", &"***")
            .field("security_token", &self.security_token.as_ref().map(|_| "***"))
            .field("region", &self.region)
            .field("protocol", &self.protocol)
            .field("domain", &self.domain)
            .field("request_timeout", &self.request_timeout)
            .field("read_timeout", &self.read_timeout)
            .field("write_timeout", &self.write_timeout)
            .field("rate_limit", &self.rate_limit)
            .field("rate_limit_overrides", &self.rate_limit_overrides)
            .finish()
    }
}

impl ProviderConfig {
    /// Config with the given credentials and every other field at its default.
    pub fn new(secret_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            secret_id: secret_id.into(),
            secret_key: secret_key.into(),
            security_token: None,
            region: DEFAULT_REGION.to_string(),
            protocol: Protocol::default(),
            domain: DEFAULT_DOMAIN.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            read_timeout: READ_RETRY_TIMEOUT,
            write_timeout: WRITE_RETRY_TIMEOUT,
            rate_limit: DEFAULT_RATE_LIMIT,
            rate_limit_overrides: HashMap::new(),
        }
    }

    /// Read the `TENCENTCLOUD_*` environment variables.
    pub fn from_env() -> ProviderResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> ProviderResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let secret_id = var(ENV_SECRET_ID)
            .ok_or_else(|| ProviderError::InvalidConfig(format!("{ENV_SECRET_ID} is not set")))?;
        let secret_key = var(ENV_SECRET_KEY)
            .ok_or_else(|| ProviderError::InvalidConfig(format!("{ENV_SECRET_KEY} is not set")))?;

        let mut config = Self::new(secret_id, secret_key);
        config.security_token = var(ENV_SECURITY_TOKEN);
        if let Some(region) = var(ENV_REGION) {
            config.region = region;
        }
        if let Some(protocol) = var(ENV_PROTOCOL) {
            config.protocol = protocol.parse()?;
        }
        if let Some(domain) = var(ENV_DOMAIN) {
            config.domain = domain;
        }
        if let Some(timeout) = var(ENV_REQUEST_TIMEOUT) {
            let secs: u64 = timeout.trim().parse().map_err(|_| {
                ProviderError::InvalidConfig(format!(
                    "{ENV_REQUEST_TIMEOUT} must be a number of seconds, got '{timeout}'"
                ))
            })?;
            config.request_timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }

    #[must_use]
    pub fn security_token(mut self, token: impl Into<String>) -> Self {
        self.security_token = Some(token.into());
        self
    }

    #[must_use]
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    #[must_use]
    pub fn protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = protocol;
        self
    }

    #[must_use]
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    #[must_use]
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Retry budgets for describe and mutating calls.
    #[must_use]
    pub fn retry_timeouts(mut self, read: Duration, write: Duration) -> Self {
        self.read_timeout = read;
        self.write_timeout = write;
        self
    }

    #[must_use]
    pub fn rate_limit(mut self, per_second: u32) -> Self {
        self.rate_limit = per_second;
        self
    }

    /// Override the rate for one action.
    #[must_use]
    pub fn rate_limit_for(mut self, action: impl Into<String>, per_second: u32) -> Self {
        self.rate_limit_overrides.insert(action.into(), per_second);
        self
    }

    /// Reject configurations that cannot reach the API.
    pub fn validate(&self) -> ProviderResult<()> {
        if self.secret_id.trim().is_empty() || self.secret_key.trim().is_empty() {
            return Err(ProviderError::InvalidConfig(
                "secret_id and secret_key are required".to_string(),
            ));
        }
        if self.region.trim().is_empty() {
            return Err(ProviderError::InvalidConfig("region must not be empty".to_string()));
        }
        if self.domain.trim().is_empty() {
            return Err(ProviderError::InvalidConfig("domain must not be empty".to_string()));
        }
        if self.request_timeout.is_zero() {
            return Err(ProviderError::InvalidConfig(
                "request timeout must be positive".to_string(),
            ));
        }
        if self.read_timeout.is_zero() || self.write_timeout.is_zero() {
            return Err(ProviderError::InvalidConfig(
                "retry timeouts must be positive".to_string(),
            ));
        }
        Ok(())
    }

    fn rate_limiter(&self) -> RateLimiter {
        self.rate_limit_overrides
            .iter()
            .fold(RateLimiter::new(self.rate_limit), |limiter, (action, rate)| {
                limiter.with_limit(action.clone(), *rate)
            })
    }

    /// Validate and build the client shared by all adapters.
    pub fn build_context(&self) -> ProviderResult<ProviderContext> {
        self.validate()?;

        let mut credential = Credential::new(&self.secret_id, &self.secret_key);
        if let Some(token) = &self.security_token {
            credential = credential.with_token(token);
        }

        let client = TencentCloudClient::builder(credential)
            .region(&self.region)
            .protocol(self.protocol)
            .domain(&self.domain)
            .request_timeout(self.request_timeout)
            .rate_limiter(Arc::new(self.rate_limiter()))
            .build()?;

        log::info!(
            "Tencent Cloud provider configured: region={}, endpoint={}://*.{}",
            self.region,
            self.protocol.scheme(),
            self.domain
        );

        Ok(ProviderContext::new(client).with_timeouts(self.read_timeout, self.write_timeout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn from_lookup_reads_all_variables() {
        let config = ProviderConfig::from_lookup(lookup(&[
            (ENV_SECRET_ID, "AKIDexample"),
            (ENV_SECRET_KEY, "secret"),
            (ENV_SECURITY_TOKEN, "token"),
            (ENV_REGION, "ap-shanghai"),
            (ENV_PROTOCOL, "http"),
            (ENV_DOMAIN, "internal.tencentcloudapi.com"),
            (ENV_REQUEST_TIMEOUT, "60"),
        ]))
        .unwrap();
        assert_eq!(config.region, "ap-shanghai");
        assert_eq!(config.protocol, Protocol::Http);
        assert_eq!(config.domain, "internal.tencentcloudapi.com");
        assert_eq!(config.security_token.as_deref(), Some("token"));
        assert_eq!(config.request_timeout, Duration::from_secs(60));
    }

    #[test]
    fn from_lookup_defaults() {
        let config = ProviderConfig::from_lookup(lookup(&[
            (ENV_SECRET_ID, "AKIDexample"),
            (ENV_SECRET_KEY, "secret"),
        ]))
        .unwrap();
        assert_eq!(config.region, "ap-guangzhou");
        assert_eq!(config.protocol, Protocol::Https);
        assert_eq!(config.domain, "tencentcloudapi.com");
        assert_eq!(config.rate_limit, 20);
        assert_eq!(config.read_timeout, READ_RETRY_TIMEOUT);
        assert!(config.security_token.is_none());
    }

    #[test]
    fn missing_credentials_rejected() {
        let err = ProviderConfig::from_lookup(lookup(&[(ENV_SECRET_ID, "AKIDexample")])).unwrap_err();
        assert!(err.to_string().contains(ENV_SECRET_KEY));
    }

    #[test]
    fn bad_timeout_rejected() {
        let err = ProviderConfig::from_lookup(lookup(&[
            (ENV_SECRET_ID, "id"),
            (ENV_SECRET_KEY, "key"),
            (ENV_REQUEST_TIMEOUT, "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ProviderError::InvalidConfig(_)));
    }

    #[test]
    fn validate_checks_fields() {
        assert!(ProviderConfig::new("id", "key").validate().is_ok());
        assert!(ProviderConfig::new("id", "").validate().is_err());
        assert!(ProviderConfig::new("id", "key").region("").validate().is_err());
        assert!(ProviderConfig::new("id", "key")
            .retry_timeouts(Duration::ZERO, WRITE_RETRY_TIMEOUT)
            .validate()
            .is_err());
    }

    #[test]
    fn overrides_reach_the_limiter() {
        let config = ProviderConfig::new("id", "key")
            .rate_limit(10)
            .rate_limit_for("DescribeTaskStatus", 2);
        let limiter = config.rate_limiter();
        assert_eq!(limiter.limit_for("DescribeTaskStatus"), 2);
        assert_eq!(limiter.limit_for("CreateApi"), 10);
    }

    #[test]
    fn debug_masks_secrets() {
        let config = ProviderConfig::new("AKIDabcdefgh", "topsecret").security_token("tok");
        let text = format!("{config:?}");
        assert!(!text.contains("topsecret"));
        assert!(!text.contains("AKIDabcdefgh"));
        assert!(!text.contains("tok\""));
    }

    #[tokio::test]
    async fn build_context_uses_timeouts() {
        let ctx = ProviderConfig::new("id", "key")
            .retry_timeouts(Duration::from_secs(5), Duration::from_secs(7))
            .build_context()
            .unwrap();
        assert_eq!(ctx.read_timeout(), Duration::from_secs(5));
        assert_eq!(ctx.write_timeout(), Duration::from_secs(7));
        assert_eq!(ctx.client().region(), "ap-guangzhou");
    }
}
