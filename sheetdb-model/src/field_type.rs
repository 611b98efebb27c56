use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Serialization kind of one entity field.
///
/// Columns without an entry in the [`Castings`] map are treated as
/// [`FieldType::Text`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    Text,
    Boolean,
    Number,
    Date,
    Json,
}

/// Per-field type map: column name → serialization kind.
pub type Castings = HashMap<String, FieldType>;
