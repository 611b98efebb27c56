//! Use a spreadsheet tab as a database table.
//!
//! `sheetdb` maps rows of text cells to typed entities and executes CRUD
//! operations against the Google Sheets API, hiding per-credential request
//! quotas and network latency behind a pooled retry layer and an optional
//! time-bounded cache.
//!
//! # Components
//!
//! - **Serialization**: per-field-type converters between cell text and
//!   typed values (text, boolean, number, date, JSON)
//! - **Cache**: TTL store for the header row, the content grid and the
//!   sheet's structural id, invalidated on every write
//! - **Client pool**: spreads calls uniformly over multiple credentials and
//!   fails over on rate-limit errors
//! - **Mapper**: grid ⇄ record conversion, row addressing, A1 ranges
//! - **[`SheetDb`]**: the CRUD facade composing all of the above
//!
//! # Example
//!
//! ```no_run
//! use sheetdb::{SheetDb, SheetDbConfig};
//! use sheetdb::model::{FieldType, Record};
//!
//! # async fn run() -> sheetdb::SheetDbResult<()> {
//! let mut config = SheetDbConfig {
//!     spreadsheet_id: "1BxiMVs0XRA5nFMdKvBdBZjgmUUqptlbs74OgvE2upms".to_string(),
//!     sheet: "users".to_string(),
//!     cache_enabled: true,
//!     ..Default::default()
//! };
//! config.castings.insert("enabled".to_string(), FieldType::Boolean);
//!
//! let db: SheetDb<Record> =
//!     SheetDb::from_access_tokens(config, &["ya29.first-token".to_string()])?;
//!
//! for user in db.all().await? {
//!     println!("{user:?}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod cache;
mod config;
mod error;
pub mod mapper;
mod metrics;
mod orm;
pub mod pool;
pub mod serialization;

/// Model types re-exported from `sheetdb-model`.
pub mod model {
    pub use sheetdb_model::{Castings, CellValue, FieldType, Model, Record};
}

pub use api::{HttpSheetsClient, RowDeleteRange, SheetProperties, SheetsApi, SheetsApiConfig, ValueRange};
pub use config::{SheetDbConfig, DEFAULT_CACHE_TTL_SECS};
pub use error::{SheetDbError, SheetDbResult};
pub use metrics::MetricOperation;
pub use orm::SheetDb;
