/// Data layer: listing types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///   listings .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + clean (drop land/farm, drop null beds)
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ WorkingSet  │  Vec<Listing>, filter options (immutable)
///   └────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  PredicateSet → FilteredView (row indices)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  stats    │  means, group-by, histograms, correlation, top-n
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;
