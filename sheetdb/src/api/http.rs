//! HTTP implementation of [`SheetsApi`] against the Sheets v4 REST API.

use super::{RowDeleteRange, SheetProperties, SheetsApi, ValueRange};
use crate::error::{SheetDbError, SheetDbResult};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Configuration for one HTTP backend client.
///
/// Each client is bound to its own credential; pooling several of them
/// spreads request quota across credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetsApiConfig {
    /// Base URL of the Sheets API (e.g. `https://sheets.googleapis.com`).
    pub api_base_url: String,
    /// OAuth2 bearer token presented on every request.
    pub access_token: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for SheetsApiConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://sheets.googleapis.com".to_string(),
            access_token: String::new(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ValueRangeResponse {
    values: Option<Vec<Vec<String>>>,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetResponse {
    sheets: Option<Vec<SheetEntry>>,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

/// Sheets v4 REST client.
pub struct HttpSheetsClient {
    config: SheetsApiConfig,
    client: Client,
}

impl HttpSheetsClient {
    pub fn new(config: SheetsApiConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("failed to create HTTP client");

        Self { config, client }
    }

    fn values_url(&self, spreadsheet_id: &str, range: &str) -> String {
        format!(
            "{}/v4/spreadsheets/{}/values/{}",
            self.config.api_base_url,
            spreadsheet_id,
            urlencoding::encode(range)
        )
    }

    /// Maps a non-success response into a backend error carrying status and
    /// body text, so quota markers in the body stay visible to the retry
    /// layer.
    async fn check(response: Response, what: &str) -> SheetDbResult<Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(SheetDbError::Backend(format!("{what} failed ({status}): {body}")))
    }
}

#[async_trait]
impl SheetsApi for HttpSheetsClient {
    async fn get_range(
        &self,
        spreadsheet_id: &str,
        range: &str,
    ) -> SheetDbResult<Vec<Vec<String>>> {
        debug!("fetching range {range} from spreadsheet {spreadsheet_id}");

        let response = self
            .client
            .get(self.values_url(spreadsheet_id, range))
            .bearer_auth(&self.config.access_token)
            .send()
            .await
            .map_err(|e| SheetDbError::Network(format!("range fetch failed: {e}")))?;

        let response = Self::check(response, "range fetch").await?;

        let value_range: ValueRangeResponse = response
            .json()
            .await
            .map_err(|e| SheetDbError::Network(format!("failed to parse range response: {e}")))?;

        Ok(value_range.values.unwrap_or_default())
    }

    async fn append_rows(
        &self,
        spreadsheet_id: &str,
        range: &str,
        rows: &[Vec<String>],
    ) -> SheetDbResult<()> {
        debug!(
            "appending {} rows to {range} in spreadsheet {spreadsheet_id}",
            rows.len()
        );

        let response = self
            .client
            .post(format!("{}:append", self.values_url(spreadsheet_id, range)))
            .bearer_auth(&self.config.access_token)
            .query(&[
                ("valueInputOption", "USER_ENTERED"),
                ("insertDataOption", "INSERT_ROWS"),
            ])
            .json(&serde_json::json!({ "values": rows }))
            .send()
            .await
            .map_err(|e| SheetDbError::Network(format!("append failed: {e}")))?;

        Self::check(response, "append").await?;
        Ok(())
    }

    async fn batch_update_values(
        &self,
        spreadsheet_id: &str,
        updates: &[ValueRange],
    ) -> SheetDbResult<()> {
        debug!(
            "batch updating {} ranges in spreadsheet {spreadsheet_id}",
            updates.len()
        );

        let response = self
            .client
            .post(format!(
                "{}/v4/spreadsheets/{}/values:batchUpdate",
                self.config.api_base_url, spreadsheet_id
            ))
            .bearer_auth(&self.config.access_token)
            .json(&serde_json::json!({
                "valueInputOption": "USER_ENTERED",
                "data": updates,
            }))
            .send()
            .await
            .map_err(|e| SheetDbError::Network(format!("batch value update failed: {e}")))?;

        Self::check(response, "batch value update").await?;
        Ok(())
    }

    async fn batch_delete_rows(
        &self,
        spreadsheet_id: &str,
        ranges: &[RowDeleteRange],
    ) -> SheetDbResult<()> {
        debug!(
            "deleting {} row ranges in spreadsheet {spreadsheet_id}",
            ranges.len()
        );

        let requests: Vec<serde_json::Value> = ranges
            .iter()
            .map(|r| {
                serde_json::json!({
                    "deleteDimension": {
                        "range": {
                            "sheetId": r.sheet_id,
                            "dimension": "ROWS",
                            "startIndex": r.start_index,
                            "endIndex": r.end_index,
                        }
                    }
                })
            })
            .collect();

        let response = self
            .client
            .post(format!(
                "{}/v4/spreadsheets/{}:batchUpdate",
                self.config.api_base_url, spreadsheet_id
            ))
            .bearer_auth(&self.config.access_token)
            .json(&serde_json::json!({ "requests": requests }))
            .send()
            .await
            .map_err(|e| SheetDbError::Network(format!("row delete failed: {e}")))?;

        Self::check(response, "row delete").await?;
        Ok(())
    }

    async fn sheet_metadata(&self, spreadsheet_id: &str) -> SheetDbResult<Vec<SheetProperties>> {
        debug!("fetching sheet metadata for spreadsheet {spreadsheet_id}");

        let response = self
            .client
            .get(format!(
                "{}/v4/spreadsheets/{}",
                self.config.api_base_url, spreadsheet_id
            ))
            .bearer_auth(&self.config.access_token)
            .query(&[("fields", "sheets(properties(sheetId,title))")])
            .send()
            .await
            .map_err(|e| SheetDbError::Network(format!("metadata fetch failed: {e}")))?;

        let response = Self::check(response, "metadata fetch").await?;

        let spreadsheet: SpreadsheetResponse = response.json().await.map_err(|e| {
            SheetDbError::Network(format!("failed to parse metadata response: {e}"))
        })?;

        Ok(spreadsheet
            .sheets
            .unwrap_or_default()
            .into_iter()
            .map(|s| s.properties)
            .collect())
    }
}
