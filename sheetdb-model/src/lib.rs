//! Core model types for sheetdb.
//!
//! A sheet row is a sequence of text cells; this crate defines the typed
//! view over those cells:
//!
//! - [`CellValue`]: one typed cell value, with an explicit [`CellValue::Absent`]
//!   state for empty cells (distinct from `false`, `0` or `""`)
//! - [`Record`]: a row keyed by column name
//! - [`FieldType`] / [`Castings`]: per-field serialization kind
//! - [`Model`]: the seam between records and caller-defined entity types

mod field_type;
mod model;
mod value;

pub use field_type::{Castings, FieldType};
pub use model::Model;
pub use value::{CellValue, Record};
