use crate::{CellValue, Record};

/// A typed view over one sheet row.
///
/// The ORM reads rows into [`Record`]s and hands them to `from_record`;
/// writes go the other way through `to_record`. `Record` itself implements
/// this trait with identity semantics, so callers that do not need a typed
/// entity can work with plain records.
///
/// `id()` must return the stable unique identifier stored in the row's
/// first column; every write operation requires it.
pub trait Model: Sized + Send + Sync {
    /// Stable unique identifier, if the entity has one.
    fn id(&self) -> Option<&str>;

    /// Builds the entity from a parsed row.
    fn from_record(record: Record) -> Self;

    /// Field values keyed by column name.
    fn to_record(&self) -> Record;
}

impl Model for Record {
    fn id(&self) -> Option<&str> {
        self.get("id").and_then(CellValue::as_text)
    }

    fn from_record(record: Record) -> Self {
        record
    }

    fn to_record(&self) -> Record {
        self.clone()
    }
}
