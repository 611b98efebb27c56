//! Grid ⇄ record conversion and row addressing.

use crate::error::{SheetDbError, SheetDbResult};
use crate::serialization::{Serializer, SerializerRegistry};
use sheetdb_model::{Castings, CellValue, FieldType, Record};

/// Spreadsheet column letters for a 0-based column index:
/// `0 → A`, `25 → Z`, `26 → AA`, `52 → BA`, ...
pub fn column_letter(mut index: usize) -> String {
    let mut letters: Vec<char> = Vec::new();
    loop {
        letters.push((b'A' + (index % 26) as u8) as char);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    letters.into_iter().rev().collect()
}

/// Converts between raw text rows and typed records for one sheet, and
/// computes row addresses for targeted writes.
///
/// Row positions are always resolved by scanning the most recent full read —
/// never from a maintained index — so a write can only target a row that the
/// current content actually contains.
pub struct RowMapper {
    sheet: String,
    castings: Castings,
    registry: SerializerRegistry,
}

impl RowMapper {
    pub fn new(sheet: String, castings: Castings) -> Self {
        Self {
            sheet,
            castings,
            registry: SerializerRegistry::new(),
        }
    }

    fn serializer_for(&self, column: &str) -> SheetDbResult<&dyn Serializer> {
        let field_type = self
            .castings
            .get(column)
            .copied()
            .unwrap_or(FieldType::Text);
        self.registry.get(field_type)
    }

    /// Parses data rows into records, positionally aligned to `headers`.
    ///
    /// A row shorter than the header list is padded with absent values; cells
    /// beyond the header list are never read.
    pub fn records(&self, rows: &[Vec<String>], headers: &[String]) -> SheetDbResult<Vec<Record>> {
        rows.iter().map(|row| self.record(row, headers)).collect()
    }

    fn record(&self, row: &[String], headers: &[String]) -> SheetDbResult<Record> {
        let mut record = Record::new();
        for (index, header) in headers.iter().enumerate() {
            let raw = row.get(index).map(String::as_str).unwrap_or("");
            let value = self.serializer_for(header)?.from_cell(raw)?;
            record.insert(header.clone(), value);
        }
        Ok(record)
    }

    /// Serializes a record into one text row aligned to `headers`.
    ///
    /// Fields not present in the header list are silently dropped; header
    /// columns the record has no value for serialize as empty cells.
    pub fn record_to_row(
        &self,
        record: &Record,
        headers: &[String],
    ) -> SheetDbResult<Vec<String>> {
        headers
            .iter()
            .map(|header| {
                let value = record.get(header).unwrap_or(&CellValue::Absent);
                self.serializer_for(header)?.to_cell(value)
            })
            .collect()
    }

    /// 1-based backend row position of the data row whose first cell is `id`.
    ///
    /// `data` excludes the header row; the position is the data index plus 2
    /// (one for 1-based addressing, one for the header row).
    pub fn row_position(&self, data: &[Vec<String>], id: &str) -> SheetDbResult<i64> {
        for (index, row) in data.iter().enumerate() {
            if row.first().map(String::as_str) == Some(id) {
                return Ok(index as i64 + 2);
            }
        }
        Err(SheetDbError::NotInSheet {
            id: id.to_string(),
            sheet: self.sheet.clone(),
        })
    }

    /// A1-notation range spanning every header column at `row_position`,
    /// e.g. `users!A3:F3` for a six-column header.
    pub fn range_for_row(&self, headers: &[String], row_position: i64) -> String {
        let last = column_letter(headers.len().saturating_sub(1));
        format!("{}!A{row_position}:{last}{row_position}", self.sheet)
    }
}
