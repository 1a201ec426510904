/// Data layer: core types, loading, and derived statistics.
///
/// Architecture:
/// ```text
///  output/<scenario>.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → FlowDataset
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ FlowDataset  │  Vec<FlowRecord> (k, v, q)
///   └─────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  stats    │  derive FlowStats (capacity, free-flow, jam)
///   └──────────┘
/// ```
pub mod loader;
pub mod model;
pub mod stats;
