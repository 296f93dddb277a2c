//! Per-operation log helpers

use std::time::Instant;

/// Logs how long an adapter operation took when dropped.
///
/// ```ignore
/// let _elapsed = ElapsedGuard::new("tencentcloud_clb_instance", "create");
/// ```
#[derive(Debug)]
pub struct ElapsedGuard {
    type_name: &'static str,
    operation: &'static str,
    start: Instant,
}

impl ElapsedGuard {
    pub fn new(type_name: &'static str, operation: &'static str) -> Self {
        log::debug!("[{type_name}] {operation} started");
        Self {
            type_name,
            operation,
            start: Instant::now(),
        }
    }
}

impl Drop for ElapsedGuard {
    fn drop(&mut self) {
        log::debug!(
            "[{}] {} finished in {:.3}s",
            self.type_name,
            self.operation,
            self.start.elapsed().as_secs_f64()
        );
    }
}
