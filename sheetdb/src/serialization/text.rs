use super::Serializer;
use crate::error::{SheetDbError, SheetDbResult};
use sheetdb_model::CellValue;

/// Identity serializer for untyped columns.
///
/// An empty cell parses to absent, not to the empty string.
pub struct TextSerializer;

impl Serializer for TextSerializer {
    fn to_cell(&self, value: &CellValue) -> SheetDbResult<String> {
        match value {
            CellValue::Text(s) => Ok(s.clone()),
            CellValue::Absent => Ok(String::new()),
            other => Err(SheetDbError::Serialization(format!(
                "cannot write {other:?} into an untyped text column"
            ))),
        }
    }

    fn from_cell(&self, raw: &str) -> SheetDbResult<CellValue> {
        if raw.is_empty() {
            Ok(CellValue::Absent)
        } else {
            Ok(CellValue::Text(raw.to_string()))
        }
    }
}
