//! Record filtering, CSV export and data loading for the OpsDesk admin console.

pub mod config;
pub mod data;

pub use data::entity::Entity;
pub use data::export::{export_csv, render_csv, write_csv, ColumnSpec, ExportError, BOM};
pub use data::filter::{filter_records, filtered_indices, FilterCriteria, Selection};
pub use data::model::{Record, Value};
pub use data::store::{MemoryStore, RecordStore};
