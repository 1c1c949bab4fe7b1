//! Server-side ratings exchange: storage, import and export.

pub mod error;
pub mod export;
pub mod import;
pub mod model;
pub mod repository;


pub use error::{ExchangeError, ExchangeResult};
pub use export::{ExportFormat, JsonExport, JsonExportQuery, export_json, export_ltr, export_rre};
pub use import::{ImportFormat, ImportRequest, import_ratings, to_imported_ratings};
pub use model::{
    CaseSnapshot, ImportSummary, ImportedRating, QuerySnapshot, RatingRecord, StoredRating,
};
pub use repository::{MemoryRatingsRepository, RatingsRepository};
