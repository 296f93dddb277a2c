//! Shared dependencies handed to every adapter

use std::time::Duration;

use tencentcloud_sdk::TencentCloudClient;
use tokio::sync::{Mutex, MutexGuard};

use crate::retry::{READ_RETRY_TIMEOUT, WRITE_RETRY_TIMEOUT};

/// Provider context - holds the API client and retry budgets
///
/// Built once from [`ProviderConfig`](crate::ProviderConfig) and passed by
/// reference into every CRUD call.
pub struct ProviderContext {
    client: TencentCloudClient,
    read_timeout: Duration,
    write_timeout: Duration,
    /// Held across each CLB mutation and its task wait.
    clb_lock: Mutex<()>,
}

impl ProviderContext {
    #[must_use]
    pub fn new(client: TencentCloudClient) -> Self {
        Self {
            client,
            read_timeout: READ_RETRY_TIMEOUT,
            write_timeout: WRITE_RETRY_TIMEOUT,
            clb_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn with_timeouts(mut self, read: Duration, write: Duration) -> Self {
        self.read_timeout = read;
        self.write_timeout = write;
        self
    }

    pub fn client(&self) -> &TencentCloudClient {
        &self.client
    }

    pub fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    pub fn write_timeout(&self) -> Duration {
        self.write_timeout
    }

    pub(crate) async fn lock_clb(&self) -> MutexGuard<'_, ()> {
        self.clb_lock.lock().await
    }
}
