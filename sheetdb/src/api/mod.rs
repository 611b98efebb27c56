//! Backend API surface.
//!
//! [`SheetsApi`] is the seam between the ORM and the remote tabular backend
//! (Google Sheets API v4). The ORM only ever talks to the backend through
//! this trait, so tests can substitute recording stubs and the client pool
//! can hold any mix of implementations.

pub mod http;

pub use http::{HttpSheetsClient, SheetsApiConfig};

use crate::error::SheetDbResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One targeted range write: full replacement of the cells in `range`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    /// A1-notation range, e.g. `users!A3:F3`.
    pub range: String,
    pub values: Vec<Vec<String>>,
}

/// One row span to delete, in 0-based indices with `end_index` exclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowDeleteRange {
    /// Structural id of the sheet the rows belong to.
    pub sheet_id: i64,
    pub start_index: i64,
    pub end_index: i64,
}

/// Structural properties of one sheet (tab) inside a spreadsheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetProperties {
    #[serde(rename = "sheetId")]
    pub sheet_id: i64,
    pub title: String,
}

/// The remote tabular backend.
///
/// All calls are single logical operations; the backend guarantees per-call
/// atomicity and nothing more. Rate-limit failures are reported as errors
/// whose message carries the quota marker, see
/// [`SheetDbError::is_quota_error`](crate::SheetDbError::is_quota_error).
#[async_trait]
pub trait SheetsApi: Send + Sync {
    /// Fetches a grid of text cells. A missing or empty range yields an
    /// empty grid.
    async fn get_range(
        &self,
        spreadsheet_id: &str,
        range: &str,
    ) -> SheetDbResult<Vec<Vec<String>>>;

    /// Appends rows after the last data row of `range`'s sheet.
    async fn append_rows(
        &self,
        spreadsheet_id: &str,
        range: &str,
        rows: &[Vec<String>],
    ) -> SheetDbResult<()>;

    /// Replaces cell values for every range in `updates`, in one call.
    async fn batch_update_values(
        &self,
        spreadsheet_id: &str,
        updates: &[ValueRange],
    ) -> SheetDbResult<()>;

    /// Structurally removes the given row spans, in one call.
    async fn batch_delete_rows(
        &self,
        spreadsheet_id: &str,
        ranges: &[RowDeleteRange],
    ) -> SheetDbResult<()>;

    /// Lists the spreadsheet's sheets with their structural ids.
    async fn sheet_metadata(&self, spreadsheet_id: &str) -> SheetDbResult<Vec<SheetProperties>>;
}
