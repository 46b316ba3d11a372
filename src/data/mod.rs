//! Data layer: core types, loading, filtering and export.
//!
//! Architecture:
//! ```text
//!  .json / .csv / built-in samples
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → Vec<Record>
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────────┐
//!   │ RecordStore   │  one per entity, get/set/upsert/remove
//!   └──────────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  search + exact-match criteria → visible indices
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  export   │  ColumnSpec projection → BOM-prefixed CSV
//!   └──────────┘
//! ```

pub mod date;
pub mod entity;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod sample;
pub mod store;
