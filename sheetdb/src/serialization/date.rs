use super::Serializer;
use crate::error::{SheetDbError, SheetDbResult};
use chrono::NaiveDateTime;
use sheetdb_model::CellValue;
use tracing::debug;

/// Cell format for datetimes: day/month/year hour:minute:second, unpadded
/// day, month and hour, no timezone offset.
pub const DATE_FORMAT: &str = "%-d/%-m/%Y %-H:%M:%S";

/// Cells hold a wall-clock datetime like `29/12/2023 17:47:04`, or nothing.
pub struct DateSerializer;

impl Serializer for DateSerializer {
    fn to_cell(&self, value: &CellValue) -> SheetDbResult<String> {
        match value {
            CellValue::DateTime(dt) => {
                let raw = dt.format(DATE_FORMAT).to_string();
                debug!("datetime {dt} serialized as {raw}");
                Ok(raw)
            }
            CellValue::Absent => Ok(String::new()),
            other => Err(SheetDbError::Serialization(format!(
                "cannot write {other:?} into a date column"
            ))),
        }
    }

    fn from_cell(&self, raw: &str) -> SheetDbResult<CellValue> {
        if raw.is_empty() {
            return Ok(CellValue::Absent);
        }
        let parsed = NaiveDateTime::parse_from_str(raw, DATE_FORMAT).map_err(|e| {
            SheetDbError::Serialization(format!("invalid datetime in cell: {raw} ({e})"))
        })?;
        debug!("cell datetime {raw} parsed as {parsed}");
        Ok(CellValue::DateTime(parsed))
    }
}
