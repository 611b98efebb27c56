//! TTL cache for sheet artifacts.

use crate::error::SheetDbResult;
use std::collections::HashMap;
use std::future::Future;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

/// Artifacts the ORM caches between backend calls.
#[derive(Debug, Clone)]
enum CachedArtifact {
    /// The header row.
    Headers(Vec<String>),
    /// The full content grid, header row included.
    Content(Vec<Vec<String>>),
    /// The sheet's structural id.
    Details(i64),
}

#[derive(Debug)]
struct CacheEntry {
    artifact: CachedArtifact,
    expires_at: Instant,
}

/// Keyed, time-bounded store for the three cached artifacts of one sheet.
///
/// Keys are namespaced per sheet (`headers-<sheet>`, `content-<sheet>`,
/// `details-<sheet>`). [`invalidate`](CacheManager::invalidate) drops the
/// headers and content entries; the details entry survives because a sheet's
/// structural id does not change when rows do.
///
/// Invalidation covers only this instance's own keys: two instances pointed
/// at the same sheet can serve each other stale reads after one of them
/// writes. Intended usage is single-writer-per-process.
pub struct CacheManager {
    enabled: bool,
    ttl: Duration,
    headers_key: String,
    content_key: String,
    details_key: String,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl CacheManager {
    pub fn new(sheet: &str, enabled: bool, ttl: Duration) -> Self {
        Self {
            enabled,
            ttl,
            headers_key: format!("headers-{sheet}"),
            content_key: format!("content-{sheet}"),
            details_key: format!("details-{sheet}"),
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Cached header row, or whatever `producer` fetches.
    pub async fn headers_or<F, Fut>(&self, producer: F) -> SheetDbResult<Vec<String>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = SheetDbResult<Vec<String>>>,
    {
        if !self.enabled {
            return producer().await;
        }
        if let Some(CachedArtifact::Headers(headers)) = self.lookup(&self.headers_key).await {
            return Ok(headers);
        }
        let headers = producer().await?;
        self.store(&self.headers_key, CachedArtifact::Headers(headers.clone()))
            .await;
        Ok(headers)
    }

    /// Cached content grid, or whatever `producer` fetches.
    pub async fn content_or<F, Fut>(&self, producer: F) -> SheetDbResult<Vec<Vec<String>>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = SheetDbResult<Vec<Vec<String>>>>,
    {
        if !self.enabled {
            return producer().await;
        }
        if let Some(CachedArtifact::Content(grid)) = self.lookup(&self.content_key).await {
            return Ok(grid);
        }
        let grid = producer().await?;
        self.store(&self.content_key, CachedArtifact::Content(grid.clone()))
            .await;
        Ok(grid)
    }

    /// Cached structural sheet id, or whatever `producer` resolves.
    pub async fn details_or<F, Fut>(&self, producer: F) -> SheetDbResult<i64>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = SheetDbResult<i64>>,
    {
        if !self.enabled {
            return producer().await;
        }
        if let Some(CachedArtifact::Details(sheet_id)) = self.lookup(&self.details_key).await {
            return Ok(sheet_id);
        }
        let sheet_id = producer().await?;
        self.store(&self.details_key, CachedArtifact::Details(sheet_id))
            .await;
        Ok(sheet_id)
    }

    /// Drops the headers and content entries. Called by every mutating
    /// operation; the details entry is deliberately retained.
    pub async fn invalidate(&self) {
        let mut entries = self.entries.write().await;
        entries.remove(&self.headers_key);
        entries.remove(&self.content_key);
        debug!("cache invalidated for keys {} and {}", self.headers_key, self.content_key);
    }

    async fn lookup(&self, key: &str) -> Option<CachedArtifact> {
        let entries = self.entries.read().await;
        let entry = entries.get(key)?;
        if Instant::now() >= entry.expires_at {
            return None;
        }
        debug!("cache hit for {key}");
        Some(entry.artifact.clone())
    }

    async fn store(&self, key: &str, artifact: CachedArtifact) {
        let entry = CacheEntry {
            artifact,
            expires_at: Instant::now() + self.ttl,
        };
        self.entries.write().await.insert(key.to_string(), entry);
    }
}
