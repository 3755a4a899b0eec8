//! Scan observer trait for progress reporting and incremental export.

use hr_graph::RoadGraph;

use crate::{HotRoute, ScanConfig, ScanSummary};

/// Callbacks invoked by [`FlowScan::scan`][crate::FlowScan::scan] at key
/// points of a run.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — route printer
///
/// ```rust,ignore
/// struct RoutePrinter;
///
/// impl ScanObserver for RoutePrinter {
///     fn on_route(&mut self, route: &HotRoute, graph: &RoadGraph) {
///         println!("{}: {} connections, {:.0} m", route.id(), route.len(), route.length_m(graph));
///     }
/// }
/// ```
pub trait ScanObserver {
    /// Called once before any traversal.
    fn on_scan_start(&mut self, _graph: &RoadGraph, _config: &ScanConfig) {}

    /// Called after every connection has been classified as core or not.
    fn on_classified(&mut self, _core: usize, _total: usize) {}

    /// Called when a route is complete, in creation order.
    fn on_route(&mut self, _route: &HotRoute, _graph: &RoadGraph) {}

    /// Called once after the last route.
    fn on_scan_end(&mut self, _summary: &ScanSummary) {}
}

/// A [`ScanObserver`] that does nothing.
pub struct NoopObserver;

impl ScanObserver for NoopObserver {}
