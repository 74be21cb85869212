/// Data layer: core types, loading, selection and summaries.
///
/// Architecture:
/// ```text
///      .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse file → Dataset (kinds inferred per column)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐      ┌───────────┐
///   │ Dataset  │ ◄─── │ Selection │  row indices picked in the table view
///   └──────────┘      └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ summary  │  selected rows as a grid + group means
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod selection;
pub mod summary;
