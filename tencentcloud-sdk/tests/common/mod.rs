//! Shared test tooling and helpers

#![allow(dead_code)]

use std::env;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tencentcloud_sdk::{Credential, HttpRequest, RateLimiter, TencentCloudClient, Transport};

/// Skip the test when any of the environment variables is missing.
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("Skipping test: missing environment variable {}", $var);
                return;
            }
        )+
    };
}

/// Assert that an `Option` is `Some` and unwrap it, failing the test otherwise.
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(,)?) => {{
        let opt = $expr;
        assert!(opt.is_some(), "expected Some(..), got None");
        let Some(val) = opt else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// Assert that a `Result` is `Ok` and unwrap it, failing the test otherwise.
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// Client against the real API, built from `TENCENTCLOUD_*` variables.
pub fn live_client() -> Option<TencentCloudClient> {
    let secret_id = env::var("TENCENTCLOUD_SECRET_ID").ok()?;
    let secret_key = env::var("TENCENTCLOUD_SECRET_KEY").ok()?;
    let region = env::var("TENCENTCLOUD_REGION").unwrap_or_else(|_| "ap-guangzhou".to_string());
    TencentCloudClient::builder(Credential::new(secret_id, secret_key))
        .region(region)
        .build()
        .ok()
}

/// Transport that records every request and answers with one fixed body.
pub struct Recording {
    body: String,
    requests: Mutex<Vec<HttpRequest>>,
}

impl Recording {
    pub fn new(body: serde_json::Value) -> Arc<Self> {
        Arc::new(Self {
            body: body.to_string(),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last(&self) -> HttpRequest {
        self.requests().pop().expect("no request was sent")
    }
}

#[async_trait]
impl Transport for Recording {
    async fn send(&self, request: HttpRequest) -> tencentcloud_sdk::Result<String> {
        self.requests.lock().unwrap().push(request);
        Ok(self.body.clone())
    }
}

/// Client in `region` sending through `transport`, with rate limiting off.
pub fn recorded_client(transport: &Arc<Recording>, region: &str) -> TencentCloudClient {
    let transport: Arc<dyn Transport> = transport.clone();
    TencentCloudClient::builder(Credential::new("AKIDtest", "secret").with_token("session"))
        .region(region)
        .transport(transport)
        .rate_limiter(Arc::new(RateLimiter::new(0)))
        .build()
        .unwrap()
}
