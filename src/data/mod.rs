/// Data layer: core types, loading, filtering, and the shared numeric
/// helpers the charts draw from.
///
/// Architecture:
/// ```text
///  earthquakes.csv / world-geojson.json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse files → Catalog, WorldBoundaries
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  apply month selection → visible indices
///   └──────────┘
///        │
///        ▼
///   ┌─────────────────────┐
///   │ stats / geo / density │  ticks, projection, heat field
///   └─────────────────────┘
/// ```
pub mod density;
pub mod filter;
pub mod geo;
pub mod loader;
pub mod model;
pub mod stats;
