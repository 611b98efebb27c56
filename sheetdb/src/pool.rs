//! Quota-aware execution over a pool of backend clients.

use crate::api::SheetsApi;
use crate::error::{SheetDbError, SheetDbResult};
use rand::Rng;
use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use tracing::debug;

/// A pool of interchangeable backend clients, each bound to its own
/// credential.
///
/// [`execute`](ClientPool::execute) picks a client uniformly at random per
/// attempt. A client that fails with a quota error is excluded for the rest
/// of that logical call and the operation is retried on another one, so each
/// client is tried at most once and the attempt count is bounded by the pool
/// size. Any non-quota failure propagates immediately.
///
/// The exclusion set is scoped to one call; no retry state persists between
/// calls.
pub struct ClientPool {
    clients: Vec<Arc<dyn SheetsApi>>,
}

impl std::fmt::Debug for ClientPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientPool")
            .field("clients", &self.clients.len())
            .finish()
    }
}

impl ClientPool {
    /// Creates a pool. An empty client list is a configuration error.
    pub fn new(clients: Vec<Arc<dyn SheetsApi>>) -> SheetDbResult<Self> {
        if clients.is_empty() {
            return Err(SheetDbError::InvalidConfiguration(
                "no backend client nor credential provided".to_string(),
            ));
        }
        Ok(Self { clients })
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// Runs one logical backend operation with quota failover.
    pub async fn execute<T, F, Fut>(&self, operation: F) -> SheetDbResult<T>
    where
        F: Fn(Arc<dyn SheetsApi>) -> Fut,
        Fut: Future<Output = SheetDbResult<T>>,
    {
        let mut excluded: HashSet<usize> = HashSet::new();

        for attempt in 1..=self.clients.len() {
            let candidates: Vec<usize> = (0..self.clients.len())
                .filter(|i| !excluded.contains(i))
                .collect();

            // rand's thread-local RNG is not Send; keep it out of the
            // future's state by scoping it before the await.
            let index = {
                let mut rng = rand::thread_rng();
                candidates[rng.gen_range(0..candidates.len())]
            };

            debug!("attempt {attempt} using client {index}");

            match operation(Arc::clone(&self.clients[index])).await {
                Ok(result) => {
                    debug!("attempt {attempt} succeeded");
                    return Ok(result);
                }
                Err(err) if err.is_quota_error() => {
                    debug!("attempt {attempt} hit quota limit on client {index}: {err}");
                    excluded.insert(index);
                }
                Err(err) => {
                    debug!("attempt {attempt} failed: {err}");
                    return Err(err);
                }
            }
        }

        Err(SheetDbError::QuotaExhausted(self.clients.len()))
    }
}
