/// Data layer: core types, loading, validation, cleaning and filtering.
///
/// Architecture:
/// ```text
///      nasa.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse file → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ validate │  non-empty + required columns (gate for every stage)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  clean   │  date cutoff → new Table, column projection summary
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter  │  viewer-side categorical predicates → visible indices
///   └──────────┘
/// ```

pub mod clean;
pub mod filter;
pub mod loader;
pub mod model;
pub mod validate;
