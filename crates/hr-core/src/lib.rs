//! `hr-core` — foundational types for the hot-route detection workspace.
//!
//! This crate is a dependency of every other `hr-*` crate.  It has no `hr-*`
//! dependencies and a single external one (`thiserror`, plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                                 |
//! |-----------|----------------------------------------------------------|
//! | [`ids`]   | `NodeId`, `ConnectionId`, `TrajectoryId`, `RouteId`      |
//! | [`geo`]   | `GeoPoint`, haversine distance, polyline length          |
//! | [`error`] | `HrError`, `HrResult`                                    |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{HrError, HrResult};
pub use geo::GeoPoint;
pub use ids::{ConnectionId, NodeId, RouteId, TrajectoryId};
