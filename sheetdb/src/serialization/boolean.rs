use super::Serializer;
use crate::error::{SheetDbError, SheetDbResult};
use sheetdb_model::CellValue;

/// Cells hold exactly `true` or `false` (case-insensitive), or nothing.
pub struct BooleanSerializer;

impl Serializer for BooleanSerializer {
    fn to_cell(&self, value: &CellValue) -> SheetDbResult<String> {
        match value {
            CellValue::Bool(b) => Ok(b.to_string()),
            CellValue::Absent => Ok(String::new()),
            other => Err(SheetDbError::Serialization(format!(
                "cannot write {other:?} into a boolean column"
            ))),
        }
    }

    fn from_cell(&self, raw: &str) -> SheetDbResult<CellValue> {
        if raw.is_empty() {
            return Ok(CellValue::Absent);
        }
        if raw.eq_ignore_ascii_case("true") {
            return Ok(CellValue::Bool(true));
        }
        if raw.eq_ignore_ascii_case("false") {
            return Ok(CellValue::Bool(false));
        }
        Err(SheetDbError::Serialization(format!(
            "invalid boolean value in cell: {raw}"
        )))
    }
}
