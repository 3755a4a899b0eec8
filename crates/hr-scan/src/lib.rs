//! `hr-scan` — FlowScan hot-route clustering.
//!
//! # Pipeline
//!
//! ```text
//! ReachabilityIndex::precompute   eps-neighborhood + reachability per connection
//!                                 (parallel with the `parallel` feature)
//! classify                        core ⇔ |reachable| >= min_traffic
//! seed + expand                   one HotRoute per unclaimed core connection,
//!                                 grown over the mutual reachability relation
//! label                           Core / Border / Noise per connection
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | Runs the precompute phase on Rayon's thread pool.         |
//! | `serde`    | Derives `Serialize`/`Deserialize` on config and results.  |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use hr_scan::FlowScan;
//!
//! let routes = FlowScan::run(&graph, 2, 3)?;
//! for route in &routes {
//!     println!("{}: {} connections", route.id(), route.len());
//! }
//! ```

pub mod config;
pub mod error;
pub mod index;
pub mod observer;
pub mod route;
pub mod scan;


pub use config::ScanConfig;
pub use error::{ScanError, ScanResult};
pub use index::ReachabilityIndex;
pub use observer::{NoopObserver, ScanObserver};
pub use route::{Clustering, HotRoute, Membership, ScanSummary};
pub use scan::FlowScan;
