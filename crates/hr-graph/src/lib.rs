//! `hr-graph` — directed road graph with matched traffic.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                 |
//! |------------------|----------------------------------------------------------|
//! | [`graph`]        | `Node`, `Connection`, `RoadGraph` (CSR), `RoadGraphBuilder` |
//! | [`traffic`]      | `Traffic`, a frozen sorted trajectory-id set              |
//! | [`neighborhood`] | eps-neighborhood and direct density-reachability queries |
//! | [`error`]        | `GraphError`, `GraphResult<T>`                           |
//!
//! # Lifecycle
//!
//! An external loader adds nodes and connections to a [`RoadGraphBuilder`],
//! the map-matcher records trajectories against connection ids, and
//! [`RoadGraphBuilder::build`] freezes everything into a [`RoadGraph`].  The
//! built graph has no mutating API; [`RoadGraph::thaw`] turns it back into a
//! builder by value.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on nodes, connections, traffic. |

pub mod error;
pub mod graph;
pub mod neighborhood;
pub mod traffic;


pub use error::{GraphError, GraphResult};
pub use graph::{Connection, Node, RoadGraph, RoadGraphBuilder};
pub use traffic::Traffic;
