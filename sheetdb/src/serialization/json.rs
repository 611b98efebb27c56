use super::Serializer;
use crate::error::{SheetDbError, SheetDbResult};
use sheetdb_model::CellValue;

/// Cells hold arbitrary nested data as compact JSON text, or nothing.
pub struct JsonSerializer;

impl Serializer for JsonSerializer {
    fn to_cell(&self, value: &CellValue) -> SheetDbResult<String> {
        match value {
            CellValue::Json(v) => serde_json::to_string(v)
                .map_err(|e| SheetDbError::Serialization(format!("unserializable JSON value: {e}"))),
            CellValue::Absent => Ok(String::new()),
            other => Err(SheetDbError::Serialization(format!(
                "cannot write {other:?} into a JSON column"
            ))),
        }
    }

    fn from_cell(&self, raw: &str) -> SheetDbResult<CellValue> {
        if raw.is_empty() {
            return Ok(CellValue::Absent);
        }
        let value: serde_json::Value = serde_json::from_str(raw)
            .map_err(|e| SheetDbError::Serialization(format!("invalid JSON in cell: {e}")))?;
        Ok(CellValue::Json(value))
    }
}
