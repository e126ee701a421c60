/// Data layer: band tables and metric series.
///
/// Architecture:
/// ```text
///  bands.json / bands.csv        series.json / series.csv
///        │                              │
///        ▼                              ▼
///   ┌──────────┐                  ┌──────────┐
///   │  loader   │  parse file →   │  loader   │  parse file → Vec<f64>
///   └──────────┘                  └──────────┘
///        │                              │
///        ▼                              │
///   ┌──────────┐                        │
///   │ BandTable │  sorted bands,        │
///   └──────────┘  binary-search lookup  │
///        │                              │
///        ▼                              ▼
///   ┌─────────────────────────────────────┐
///   │  state::Classifier  /  replay        │
///   └─────────────────────────────────────┘
/// ```

pub mod loader;
pub mod model;
