/// Data layer: records, parsing, filtering, sorting and aggregation.
///
/// Architecture:
/// ```text
///  inventario.csv (file or URL)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  delimiter detection, header mapping → Vec<Record>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  search ∧ classification ∧ coverage band → row indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │   sort    │  column + direction → ordered row indices
///   └──────────┘
///        │
///        ├──────────────► table rows
///        ▼
///   ┌──────────┐
///   │ summary   │  KPIs, per-classification summary, chip counts
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod sort;
pub mod summary;
