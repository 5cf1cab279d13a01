//! Data layer: register types, loading, filtering and writing.
//!
//! Architecture:
//! ```text
//!      WTR.csv
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse + schema check → LicenceCollection
//!   └──────────┘
//!        │
//!        ▼
//!   ┌───────────────────┐
//!   │ LicenceCollection │  Header + Vec<Arc<LicenceRow>>
//!   └───────────────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  predicate → new collection, or retain in place
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  writer   │  header + rows → CSV sink
//!   └──────────┘
//! ```

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod product_codes;
pub mod validate;
pub mod writer;

pub use error::{Result, ValidationError, WtrError};
pub use filter::{
    filter_companies, filter_product_codes, CompanyFilter, PointToPointFilter, Predicate,
    ProductCodeFilter, FILTER_POINT_TO_POINT,
};
pub use loader::{load_file, load_reader, load_str};
pub use model::{CollectionSummary, Header, LicenceCollection, LicenceRow, WTR_COLUMNS};
pub use writer::{to_csv_string, write_csv, write_csv_file};
