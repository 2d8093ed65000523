//! `wr-network`: cost models, walk-graph construction, and node snapping.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                       |
//! |-------------|----------------------------------------------------------------|
//! | [`cost`]    | `CostModel` (presets + CSV loader)                             |
//! | [`raw`]     | `RawNode`, `RawWay`, `RawNetwork`: supplier contract          |
//! | [`build`]   | `build_network`: raw data + cost model → `WalkNetwork`        |
//! | [`network`] | `WalkNetwork` (CSR + R-tree), `WalkNetworkBuilder`, `Segment`  |
//! | [`osm`]     | `load_from_pbf`, `is_walkable` (feature = `"osm"` only)        |
//! | [`error`]   | `NetworkError`, `NetworkResult<T>`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `osm`   | Enables OSM PBF loading via the `osmpbf` crate.              |
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod build;
pub mod cost;
pub mod error;
pub mod network;
pub mod raw;

#[cfg(feature = "osm")]
pub mod osm;

#[cfg(test)]
mod tests;

pub use build::{build_network, build_network_with_stats, BuildStats};
pub use cost::CostModel;
pub use error::{NetworkError, NetworkResult};
pub use network::{Segment, WalkNetwork, WalkNetworkBuilder, WayInfo};
pub use raw::{RawNetwork, RawNode, RawWay};
