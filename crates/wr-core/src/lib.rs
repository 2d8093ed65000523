//! `wr-core` — foundational types for the `rust_walk` route recommender.
//!
//! This crate is a dependency of every other `wr-*` crate.  It has no `wr-*`
//! dependencies and only `thiserror` (plus optional `serde`) externally.
//!
//! # What lives here
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`ids`]       | `NodeId`, `EdgeId`, `WayId`                               |
//! | [`geo`]       | `GeoPoint`, haversine distance, initial bearing           |
//! | [`bearing`]   | `Quadrant`, `BearingCone`, `Bias`                         |
//! | [`config`]    | `SearchConfig`                                            |
//! | [`error`]     | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public value types.  |

pub mod bearing;
pub mod config;
pub mod error;
pub mod geo;
pub mod ids;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use bearing::{BearingCone, Bias, Quadrant};
pub use config::SearchConfig;
pub use error::{CoreError, CoreResult};
pub use geo::GeoPoint;
pub use ids::{EdgeId, NodeId, WayId};
