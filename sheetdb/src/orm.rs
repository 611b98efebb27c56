//! The public CRUD facade.

use crate::api::{HttpSheetsClient, RowDeleteRange, SheetsApi, SheetsApiConfig, ValueRange};
use crate::cache::CacheManager;
use crate::config::SheetDbConfig;
use crate::error::{SheetDbError, SheetDbResult};
use crate::mapper::RowMapper;
use crate::metrics::{MetricOperation, Metrics};
use crate::pool::ClientPool;
use sheetdb_model::{CellValue, Model, Record};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

fn split_grid(grid: Vec<Vec<String>>) -> (Vec<String>, Vec<Vec<String>>) {
    let mut rows = grid.into_iter();
    let headers = rows.next().unwrap_or_default();
    (headers, rows.collect())
}

fn matches_query(record: &Record, query: &Record) -> bool {
    query
        .iter()
        .all(|(column, expected)| record.get(column).unwrap_or(&CellValue::Absent) == expected)
}

/// One sheet (tab) of a spreadsheet, exposed as a typed table.
///
/// Every operation is a fixed sequence: reads go through the cache and fall
/// back to the backend; writes validate ids first, invalidate the cache,
/// then issue a single batched backend call. Batch operations are one
/// backend call each, so they inherit the backend's per-call atomicity.
///
/// All backend traffic runs through the client pool's quota failover and is
/// timed into per-operation metric buckets, see [`SheetDb::metrics`].
pub struct SheetDb<T: Model = Record> {
    config: SheetDbConfig,
    pool: ClientPool,
    cache: CacheManager,
    mapper: RowMapper,
    metrics: Metrics,
    _model: PhantomData<fn() -> T>,
}

impl<T: Model> SheetDb<T> {
    /// Creates an instance over ready-made backend clients.
    pub fn new(config: SheetDbConfig, clients: Vec<Arc<dyn SheetsApi>>) -> SheetDbResult<Self> {
        let pool = ClientPool::new(clients)?;
        let cache = CacheManager::new(
            &config.sheet,
            config.cache_enabled,
            Duration::from_secs(config.cache_ttl_secs),
        );
        let mapper = RowMapper::new(config.sheet.clone(), config.castings.clone());
        Ok(Self {
            config,
            pool,
            cache,
            mapper,
            metrics: Metrics::default(),
            _model: PhantomData,
        })
    }

    /// Creates an instance with one HTTP client per access token.
    pub fn from_access_tokens(config: SheetDbConfig, tokens: &[String]) -> SheetDbResult<Self> {
        let clients = tokens
            .iter()
            .map(|token| {
                Arc::new(HttpSheetsClient::new(SheetsApiConfig {
                    access_token: token.clone(),
                    ..Default::default()
                })) as Arc<dyn SheetsApi>
            })
            .collect();
        Self::new(config, clients)
    }

    /// Retrieves every row as a typed entity.
    pub async fn all(&self) -> SheetDbResult<Vec<T>> {
        Ok(self
            .all_records()
            .await?
            .into_iter()
            .map(T::from_record)
            .collect())
    }

    /// Retrieves the entities whose fields equal every value in `query`.
    pub async fn find_by_columns(&self, query: &Record) -> SheetDbResult<Vec<T>> {
        Ok(self
            .all_records()
            .await?
            .into_iter()
            .filter(|record| matches_query(record, query))
            .map(T::from_record)
            .collect())
    }

    /// Retrieves the first entity matching `query`, if any.
    pub async fn find_one_by_columns(&self, query: &Record) -> SheetDbResult<Option<T>> {
        Ok(self
            .all_records()
            .await?
            .into_iter()
            .find(|record| matches_query(record, query))
            .map(T::from_record))
    }

    /// Appends one row for `entity`.
    pub async fn create(&self, entity: &T) -> SheetDbResult<()> {
        self.create_all(std::slice::from_ref(entity)).await
    }

    /// Appends one row per entity, in a single backend call.
    ///
    /// Fails before touching the backend or the cache if any entity has no
    /// id. An empty slice is a no-op.
    pub async fn create_all(&self, entities: &[T]) -> SheetDbResult<()> {
        if entities.is_empty() {
            return Ok(());
        }
        Self::require_ids(entities)?;

        let headers = self.sheet_headers().await?;
        let rows = entities
            .iter()
            .map(|entity| self.mapper.record_to_row(&entity.to_record(), &headers))
            .collect::<SheetDbResult<Vec<_>>>()?;

        debug!("appending {} rows to sheet={}", rows.len(), self.config.sheet);
        self.cache.invalidate().await;

        self.metrics
            .track(
                MetricOperation::Append,
                self.pool.execute(|client| {
                    let spreadsheet_id = self.config.spreadsheet_id.clone();
                    let range = self.config.sheet.clone();
                    let rows = rows.clone();
                    async move { client.append_rows(&spreadsheet_id, &range, &rows).await }
                }),
            )
            .await
    }

    /// Replaces the full row holding `entity`'s id.
    pub async fn update(&self, entity: &T) -> SheetDbResult<()> {
        self.update_all(std::slice::from_ref(entity)).await
    }

    /// Replaces every entity's full row, in a single batched backend call.
    ///
    /// Each row is addressed by a range spanning all header columns at the
    /// entity's current row position; an id that matches no row fails the
    /// whole operation before anything is written.
    pub async fn update_all(&self, entities: &[T]) -> SheetDbResult<()> {
        if entities.is_empty() {
            return Ok(());
        }
        Self::require_ids(entities)?;

        let grid = self.table_content().await?;
        let (headers, data) = split_grid(grid);

        let mut updates = Vec::with_capacity(entities.len());
        for entity in entities {
            let id = entity.id().ok_or(SheetDbError::MissingId)?;
            let position = self.mapper.row_position(&data, id)?;
            let row = self.mapper.record_to_row(&entity.to_record(), &headers)?;
            updates.push(ValueRange {
                range: self.mapper.range_for_row(&headers, position),
                values: vec![row],
            });
        }

        debug!("updating {} rows in sheet={}", updates.len(), self.config.sheet);
        self.cache.invalidate().await;

        self.metrics
            .track(
                MetricOperation::Update,
                self.pool.execute(|client| {
                    let spreadsheet_id = self.config.spreadsheet_id.clone();
                    let updates = updates.clone();
                    async move { client.batch_update_values(&spreadsheet_id, &updates).await }
                }),
            )
            .await
    }

    /// Deletes the row holding `entity`'s id.
    pub async fn delete(&self, entity: &T) -> SheetDbResult<()> {
        let id = entity
            .id()
            .filter(|id| !id.is_empty())
            .ok_or(SheetDbError::MissingId)?;
        self.delete_by_id(id).await
    }

    /// Deletes the row whose first cell equals `id`.
    pub async fn delete_by_id(&self, id: &str) -> SheetDbResult<()> {
        self.delete_all_by_ids(&[id.to_string()]).await
    }

    /// Deletes every entity's row, in a single batched backend call.
    pub async fn delete_all(&self, entities: &[T]) -> SheetDbResult<()> {
        if entities.is_empty() {
            return Ok(());
        }
        Self::require_ids(entities)?;
        let ids: Vec<String> = entities
            .iter()
            .filter_map(|entity| entity.id().map(str::to_string))
            .collect();
        self.delete_all_by_ids(&ids).await
    }

    /// Deletes the rows holding the given ids, in a single batched backend
    /// call.
    ///
    /// Row positions are resolved from current content and sorted in
    /// descending order, so deleting a row never shifts the index of a row
    /// still pending deletion. An id that matches no row fails the whole
    /// operation before anything is deleted.
    pub async fn delete_all_by_ids(&self, ids: &[String]) -> SheetDbResult<()> {
        if ids.is_empty() {
            return Ok(());
        }

        let grid = self.table_content().await?;
        let (_headers, data) = split_grid(grid);

        let mut positions = Vec::with_capacity(ids.len());
        for id in ids {
            positions.push(self.mapper.row_position(&data, id)?);
        }

        let sheet_id = self.sheet_id().await?;

        // Bottom-to-top.
        positions.sort_unstable_by(|a, b| b.cmp(a));
        let ranges: Vec<RowDeleteRange> = positions
            .iter()
            .map(|&position| RowDeleteRange {
                sheet_id,
                start_index: position - 1,
                end_index: position,
            })
            .collect();

        debug!("deleting {} rows from sheet={}", ranges.len(), self.config.sheet);
        self.cache.invalidate().await;

        self.metrics
            .track(
                MetricOperation::Delete,
                self.pool.execute(|client| {
                    let spreadsheet_id = self.config.spreadsheet_id.clone();
                    let ranges = ranges.clone();
                    async move { client.batch_delete_rows(&spreadsheet_id, &ranges).await }
                }),
            )
            .await
    }

    /// Elapsed milliseconds recorded per operation kind so far.
    pub fn metrics(&self) -> HashMap<MetricOperation, Vec<u64>> {
        self.metrics.snapshot()
    }

    async fn all_records(&self) -> SheetDbResult<Vec<Record>> {
        let grid = self.table_content().await?;
        let (headers, data) = split_grid(grid);
        self.mapper.records(&data, &headers)
    }

    /// Full content grid (header row included), cache-or-fetch.
    async fn table_content(&self) -> SheetDbResult<Vec<Vec<String>>> {
        self.cache
            .content_or(|| async move {
                debug!("querying all sheet data sheet={}", self.config.sheet);
                self.metrics
                    .track(
                        MetricOperation::FetchData,
                        self.pool.execute(|client| {
                            let spreadsheet_id = self.config.spreadsheet_id.clone();
                            let range = self.config.sheet.clone();
                            async move { client.get_range(&spreadsheet_id, &range).await }
                        }),
                    )
                    .await
            })
            .await
    }

    /// Header row only, cache-or-fetch.
    async fn sheet_headers(&self) -> SheetDbResult<Vec<String>> {
        self.cache
            .headers_or(|| async move {
                debug!("reading headers sheet={}", self.config.sheet);
                let grid = self
                    .metrics
                    .track(
                        MetricOperation::FetchHeaders,
                        self.pool.execute(|client| {
                            let spreadsheet_id = self.config.spreadsheet_id.clone();
                            let range = format!("{}!A1:1", self.config.sheet);
                            async move { client.get_range(&spreadsheet_id, &range).await }
                        }),
                    )
                    .await?;
                Ok(grid.into_iter().next().unwrap_or_default())
            })
            .await
    }

    /// Structural id of the configured sheet, cache-or-fetch. Never
    /// invalidated by row mutation.
    async fn sheet_id(&self) -> SheetDbResult<i64> {
        self.cache
            .details_or(|| async move {
                let sheets = self
                    .metrics
                    .track(
                        MetricOperation::FetchDetails,
                        self.pool.execute(|client| {
                            let spreadsheet_id = self.config.spreadsheet_id.clone();
                            async move { client.sheet_metadata(&spreadsheet_id).await }
                        }),
                    )
                    .await?;
                sheets
                    .into_iter()
                    .find(|sheet| sheet.title == self.config.sheet)
                    .map(|sheet| sheet.sheet_id)
                    .ok_or_else(|| SheetDbError::SheetNotFound(self.config.sheet.clone()))
            })
            .await
    }

    fn require_ids(entities: &[T]) -> SheetDbResult<()> {
        if entities
            .iter()
            .any(|entity| entity.id().map_or(true, str::is_empty))
        {
            return Err(SheetDbError::MissingId);
        }
        Ok(())
    }
}
