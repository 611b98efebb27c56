use super::Serializer;
use crate::error::{SheetDbError, SheetDbResult};
use sheetdb_model::CellValue;

/// Cells hold a finite decimal number, or nothing.
pub struct NumberSerializer;

impl Serializer for NumberSerializer {
    fn to_cell(&self, value: &CellValue) -> SheetDbResult<String> {
        match value {
            // f64 Display is shortest-round-trip: 2023.0 prints as "2023".
            CellValue::Number(n) => Ok(n.to_string()),
            CellValue::Absent => Ok(String::new()),
            other => Err(SheetDbError::Serialization(format!(
                "cannot write {other:?} into a number column"
            ))),
        }
    }

    fn from_cell(&self, raw: &str) -> SheetDbResult<CellValue> {
        if raw.is_empty() {
            return Ok(CellValue::Absent);
        }
        match raw.parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(CellValue::Number(n)),
            _ => Err(SheetDbError::Serialization(format!(
                "not a number in cell: {raw}"
            ))),
        }
    }
}
