//! Per-operation-kind latency tracking.

use crate::error::SheetDbResult;
use serde::Serialize;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Mutex;
use std::time::Instant;

/// The backend-touching steps that get their own timer bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MetricOperation {
    FetchData,
    FetchDetails,
    FetchHeaders,
    /// Covers create and createAll.
    Append,
    /// Covers update and updateAll.
    Update,
    /// Covers all delete variants.
    Delete,
}

/// Collects elapsed milliseconds per operation kind.
///
/// Only successful operations are recorded; a failing backend call leaves
/// its bucket untouched.
#[derive(Debug, Default)]
pub struct Metrics {
    by_operation: Mutex<HashMap<MetricOperation, Vec<u64>>>,
}

impl Metrics {
    /// Awaits `future`, appending its elapsed time to `operation`'s bucket
    /// on success.
    pub async fn track<T>(
        &self,
        operation: MetricOperation,
        future: impl Future<Output = SheetDbResult<T>>,
    ) -> SheetDbResult<T> {
        let start = Instant::now();
        let result = future.await?;
        let elapsed = start.elapsed().as_millis() as u64;
        self.by_operation
            .lock()
            .expect("metrics lock poisoned")
            .entry(operation)
            .or_default()
            .push(elapsed);
        Ok(result)
    }

    /// Snapshot of every bucket recorded so far.
    pub fn snapshot(&self) -> HashMap<MetricOperation, Vec<u64>> {
        self.by_operation
            .lock()
            .expect("metrics lock poisoned")
            .clone()
    }
}
