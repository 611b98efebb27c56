//! Shared test doubles for the backend API.

use async_trait::async_trait;
use sheetdb::{RowDeleteRange, SheetDbResult, SheetProperties, SheetsApi, ValueRange};
use std::sync::Mutex;

/// One recorded backend call with its full payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    GetRange {
        spreadsheet_id: String,
        range: String,
    },
    Append {
        spreadsheet_id: String,
        range: String,
        rows: Vec<Vec<String>>,
    },
    UpdateValues {
        spreadsheet_id: String,
        updates: Vec<ValueRange>,
    },
    DeleteRows {
        spreadsheet_id: String,
        ranges: Vec<RowDeleteRange>,
    },
    Metadata {
        spreadsheet_id: String,
    },
}

/// Recording in-memory backend.
///
/// Serves `grid` for full-sheet reads and only its first row for the
/// header range (`...!A1:1`), mirroring what the real backend returns.
pub struct StubSheetsApi {
    pub grid: Mutex<Vec<Vec<String>>>,
    pub sheets: Vec<SheetProperties>,
    pub calls: Mutex<Vec<ApiCall>>,
}

impl StubSheetsApi {
    pub fn new(grid: Vec<Vec<String>>) -> Self {
        Self {
            grid: Mutex::new(grid),
            sheets: vec![SheetProperties {
                sheet_id: 1234,
                title: "test_entities".to_string(),
            }],
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of full-grid reads (header-only reads excluded).
    pub fn content_fetches(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, ApiCall::GetRange { range, .. } if !range.contains("!A1:1")))
            .count()
    }

    pub fn metadata_fetches(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, ApiCall::Metadata { .. }))
            .count()
    }

    fn record(&self, call: ApiCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl SheetsApi for StubSheetsApi {
    async fn get_range(
        &self,
        spreadsheet_id: &str,
        range: &str,
    ) -> SheetDbResult<Vec<Vec<String>>> {
        self.record(ApiCall::GetRange {
            spreadsheet_id: spreadsheet_id.to_string(),
            range: range.to_string(),
        });
        let grid = self.grid.lock().unwrap().clone();
        if range.contains("!A1:1") {
            return Ok(grid.into_iter().take(1).collect());
        }
        Ok(grid)
    }

    async fn append_rows(
        &self,
        spreadsheet_id: &str,
        range: &str,
        rows: &[Vec<String>],
    ) -> SheetDbResult<()> {
        self.record(ApiCall::Append {
            spreadsheet_id: spreadsheet_id.to_string(),
            range: range.to_string(),
            rows: rows.to_vec(),
        });
        Ok(())
    }

    async fn batch_update_values(
        &self,
        spreadsheet_id: &str,
        updates: &[ValueRange],
    ) -> SheetDbResult<()> {
        self.record(ApiCall::UpdateValues {
            spreadsheet_id: spreadsheet_id.to_string(),
            updates: updates.to_vec(),
        });
        Ok(())
    }

    async fn batch_delete_rows(
        &self,
        spreadsheet_id: &str,
        ranges: &[RowDeleteRange],
    ) -> SheetDbResult<()> {
        self.record(ApiCall::DeleteRows {
            spreadsheet_id: spreadsheet_id.to_string(),
            ranges: ranges.to_vec(),
        });
        Ok(())
    }

    async fn sheet_metadata(&self, spreadsheet_id: &str) -> SheetDbResult<Vec<SheetProperties>> {
        self.record(ApiCall::Metadata {
            spreadsheet_id: spreadsheet_id.to_string(),
        });
        Ok(self.sheets.clone())
    }
}
