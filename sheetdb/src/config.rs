use serde::{Deserialize, Serialize};
use sheetdb_model::Castings;

/// Default time-to-live for cached sheet data.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 10;

/// Configuration for one [`SheetDb`](crate::SheetDb) instance.
///
/// One instance is bound to a single sheet (tab) of a single spreadsheet;
/// the sheet's first row is the header row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetDbConfig {
    /// Backend identifier of the spreadsheet document.
    pub spreadsheet_id: String,
    /// Sheet (tab) name within the spreadsheet.
    pub sheet: String,
    /// Per-field serialization kinds; unlisted columns are plain text.
    #[serde(default)]
    pub castings: Castings,
    /// Whether reads may be served from the in-memory cache.
    pub cache_enabled: bool,
    /// Cache time-to-live in seconds. A value of zero never serves stale data.
    pub cache_ttl_secs: u64,
}

impl Default for SheetDbConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: String::new(),
            sheet: String::new(),
            castings: Castings::new(),
            cache_enabled: false,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
        }
    }
}
