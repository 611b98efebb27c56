//! Cell text ⇄ typed value conversion, one serializer per [`FieldType`].
//!
//! Every serializer is symmetric for valid inputs: `from_cell(to_cell(v))`
//! returns `v`, and serializing a parsed cell reproduces the cell text (up
//! to the type's own canonical form — dates have second granularity, JSON
//! is re-emitted compact). An empty cell always means [`CellValue::Absent`]
//! and an absent value always serializes to the empty cell.

mod boolean;
mod date;
mod json;
mod number;
mod text;

pub use boolean::BooleanSerializer;
pub use date::{DateSerializer, DATE_FORMAT};
pub use json::JsonSerializer;
pub use number::NumberSerializer;
pub use text::TextSerializer;

use crate::error::{SheetDbError, SheetDbResult};
use sheetdb_model::{CellValue, FieldType};
use std::collections::HashMap;

/// Bidirectional converter between cell text and one typed value kind.
pub trait Serializer: Send + Sync {
    /// Serializes a value into cell text. Fails when the value's variant
    /// does not match this serializer's type.
    fn to_cell(&self, value: &CellValue) -> SheetDbResult<String>;

    /// Parses cell text. Empty text yields [`CellValue::Absent`]; malformed
    /// text is a serialization error.
    fn from_cell(&self, raw: &str) -> SheetDbResult<CellValue>;
}

/// Serializer lookup by field type.
pub struct SerializerRegistry {
    serializers: HashMap<FieldType, Box<dyn Serializer>>,
}

impl SerializerRegistry {
    pub fn new() -> Self {
        let mut serializers: HashMap<FieldType, Box<dyn Serializer>> = HashMap::new();
        serializers.insert(FieldType::Text, Box::new(TextSerializer));
        serializers.insert(FieldType::Boolean, Box::new(BooleanSerializer));
        serializers.insert(FieldType::Number, Box::new(NumberSerializer));
        serializers.insert(FieldType::Date, Box::new(DateSerializer));
        serializers.insert(FieldType::Json, Box::new(JsonSerializer));
        Self { serializers }
    }

    /// Resolves the serializer for `field_type`. A missing entry is a
    /// configuration error, surfaced when the type is first needed.
    pub fn get(&self, field_type: FieldType) -> SheetDbResult<&dyn Serializer> {
        match self.serializers.get(&field_type) {
            Some(serializer) => Ok(&**serializer),
            None => Err(SheetDbError::InvalidConfiguration(format!(
                "no serializer registered for field type {field_type:?}"
            ))),
        }
    }
}

impl Default for SerializerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
