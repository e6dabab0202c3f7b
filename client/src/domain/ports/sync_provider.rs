//! Port for refreshing the local mirror from the remote backend.
//!
//! Callers that want a warm cache (typically at application start) depend on
//! this port rather than on the individual resource services, so tests and
//! offline builds can substitute the no-op variant explicitly.

use async_trait::async_trait;

/// Per-collection outcome of a refresh pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Mirror keys whose collections were refreshed from the remote.
    pub refreshed: Vec<&'static str>,
    /// Mirror keys whose remote fetch failed; cached data, if any, stands.
    pub failed: Vec<&'static str>,
}

impl SyncReport {
    /// Whether every collection refreshed successfully.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Data synchronisation provider port.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SyncProvider: Send + Sync {
    /// Pull every read-only collection once, mirroring results locally.
    async fn refresh(&self) -> SyncReport;
}

/// Provider that refreshes nothing and reports an empty, complete pass.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpSyncProvider;

#[async_trait]
impl SyncProvider for NoOpSyncProvider {
    async fn refresh(&self) -> SyncReport {
        SyncReport::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn no_op_provider_reports_an_empty_complete_pass() {
        let report = NoOpSyncProvider.refresh().await;
        assert!(report.refreshed.is_empty());
        assert!(report.is_complete());
    }
}
