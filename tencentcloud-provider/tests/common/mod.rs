//! Shared test tooling: a scripted in-memory cloud and credential gating

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tencentcloud_provider::{Provider, ProviderContext};
use tencentcloud_sdk::{Credential, HttpRequest, RateLimiter, TencentCloudClient, Transport};

/// Skip the test (with a note) when any of the environment variables is missing.
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

/// One request the fake cloud received.
#[derive(Debug, Clone)]
pub struct Call {
    pub action: String,
    pub body: Value,
}

/// In-memory stand-in for the API endpoints
///
/// Responses are queued per action. The last queued response of an action keeps
/// answering once the ones before it are used up. An action with nothing queued
/// answers with an `InternalError.Unscripted` API error.
#[derive(Default)]
pub struct FakeCloud {
    responses: Mutex<HashMap<String, VecDeque<Value>>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeCloud {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue the `Response` payload for the next call to `action`.
    pub fn on(&self, action: &str, response: Value) -> &Self {
        self.responses
            .lock()
            .unwrap()
            .entry(action.to_string())
            .or_default()
            .push_back(response);
        self
    }

    /// Queue an API error for the next call to `action`.
    pub fn fail(&self, action: &str, code: &str) -> &Self {
        self.on(
            action,
            json!({"Error": {"Code": code, "Message": format!("scripted {code}")}}),
        )
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Request bodies sent to `action`, in order.
    pub fn bodies(&self, action: &str) -> Vec<Value> {
        self.calls()
            .into_iter()
            .filter(|c| c.action == action)
            .map(|c| c.body)
            .collect()
    }

    pub fn count(&self, action: &str) -> usize {
        self.bodies(action).len()
    }

    /// Actions in call order.
    pub fn actions(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.action).collect()
    }

    fn next_response(&self, action: &str) -> Value {
        let mut responses = self.responses.lock().unwrap();
        match responses.get_mut(action) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap_or_default(),
            Some(queue) if !queue.is_empty() => queue[0].clone(),
            _ => json!({"Error": {"Code": "InternalError.Unscripted", "Message": action}}),
        }
    }
}

#[async_trait]
impl Transport for FakeCloud {
    async fn send(&self, request: HttpRequest) -> tencentcloud_sdk::Result<String> {
        let body: Value = serde_json::from_str(&request.body).unwrap_or(Value::Null);
        let seq = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(Call {
                action: request.action.clone(),
                body,
            });
            calls.len()
        };

        let mut response = self.next_response(&request.action);
        if let Value::Object(map) = &mut response {
            map.entry("RequestId")
                .or_insert_with(|| Value::String(format!("req-{seq}")));
        }
        Ok(json!({ "Response": response }).to_string())
    }
}

/// Context talking to `cloud`, with no rate limiting and short retry budgets.
pub fn context(cloud: &Arc<FakeCloud>) -> ProviderContext {
    let transport: Arc<dyn Transport> = cloud.clone();
    let client = TencentCloudClient::builder(Credential::new("AKIDtest", "secret"))
        .transport(transport)
        .rate_limiter(Arc::new(RateLimiter::new(0)))
        .build()
        .unwrap();
    ProviderContext::new(client).with_timeouts(Duration::from_secs(60), Duration::from_secs(60))
}

pub fn provider(cloud: &Arc<FakeCloud>) -> Provider {
    Provider::new(context(cloud))
}

/// State map of a finished operation as JSON, ready to feed the next one.
pub fn state_of(d: &tencentcloud_provider::ResourceData) -> Value {
    Value::Object(d.state().clone())
}
