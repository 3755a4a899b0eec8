//! The FlowScan clusterer.

use std::collections::VecDeque;

use log::{debug, info, trace};

use hr_core::{ConnectionId, RouteId};
use hr_graph::RoadGraph;

use crate::{
    Clustering, HotRoute, Membership, NoopObserver, ReachabilityIndex, ScanConfig, ScanObserver,
    ScanError, ScanResult,
};

/// DBSCAN adapted to the connections of a directed road graph.
///
/// "Distance" is replaced by shared-trajectory count and the eps-ball by the
/// eps-hop neighborhood:
///
/// 1. **Classify**: a connection is *core* if at least `min_traffic`
///    connections are directly density-reachable from it.
/// 2. **Seed**: each core connection not yet claimed, in ascending
///    `ConnectionId` order, starts a new route.
/// 3. **Expand**: breadth-first from the seed.  A core member claims every
///    unclaimed connection it is mutually density-reachable with: those in
///    its own reachability set, and those whose reachability set contains it.
///    Non-core members are claimed as border members but never expand.
/// 4. **Noise**: whatever no route claimed.
///
/// # Border ties
///
/// A border connection reachable from two routes belongs to whichever
/// route claims it first, as in classical DBSCAN.  Seeding order is fixed,
/// so repeated runs on the same graph produce the same routes.
pub struct FlowScan {
    config: ScanConfig,
}

impl FlowScan {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> ScanConfig {
        self.config
    }

    /// Cluster `graph` and return its hot routes.
    ///
    /// Fails with [`ScanError::Config`](crate::ScanError::Config) before any
    /// traversal if `eps < 1` or `min_traffic < 1`.
    pub fn run(graph: &RoadGraph, eps: u32, min_traffic: u32) -> ScanResult<Vec<HotRoute>> {
        FlowScan::new(ScanConfig::new(eps, min_traffic))
            .scan(graph, &mut NoopObserver)
            .map(Clustering::into_routes)
    }

    /// Cluster `graph`, reporting progress to `observer`.
    pub fn scan<O: ScanObserver>(&self, graph: &RoadGraph, observer: &mut O) -> ScanResult<Clustering> {
        self.config.validate()?;
        let index = ReachabilityIndex::new(graph, self.config);
        self.scan_with_index(&index, observer)
    }

    /// Cluster using a caller-held index, reusing whatever it already cached.
    ///
    /// Fails with [`ScanError::Config`](crate::ScanError::Config) if the
    /// index was built for a different configuration.
    pub fn scan_with_index<O: ScanObserver>(
        &self,
        index:    &ReachabilityIndex<'_>,
        observer: &mut O,
    ) -> ScanResult<Clustering> {
        let config = self.config;
        config.validate()?;
        if index.config() != config {
            return Err(ScanError::Config(format!(
                "index built for {}, scan configured with {config}",
                index.config()
            )));
        }
        let graph = index.graph();
        let n = graph.connection_count();

        info!("[FlowScan] Scanning {n} connection(s) with {config}");
        observer.on_scan_start(graph, &config);

        // ── Phase 1: precompute and classify ──────────────────────────────
        index.precompute()?;
        let core: Vec<bool> = graph
            .connection_ids()
            .map(|c| index.is_core(c))
            .collect::<ScanResult<_>>()?;
        let core_total = core.iter().filter(|&&c| c).count();
        debug!("[FlowScan] {core_total} core connection(s)");
        observer.on_classified(core_total, n);

        // ── Phase 2: seed and expand (sequential) ─────────────────────────
        let mut assignment = vec![RouteId::INVALID; n];
        let mut routes: Vec<HotRoute> = Vec::new();
        let mut queue: VecDeque<ConnectionId> = VecDeque::new();

        for seed in graph.connection_ids() {
            if !core[seed.index()] || assignment[seed.index()].is_valid() {
                continue;
            }

            let route_id = RouteId(routes.len() as u32);
            assignment[seed.index()] = route_id;
            let mut members = vec![seed];
            let mut core_members = 1;
            queue.push_back(seed);

            // Only core members are ever queued.
            while let Some(member) = queue.pop_front() {
                let forward = index.directly_reachable(member)?;
                let backward = index.reverse_reachable(member)?;
                for &next in forward.iter().chain(backward) {
                    if assignment[next.index()].is_valid() {
                        continue;
                    }
                    assignment[next.index()] = route_id;
                    members.push(next);
                    if core[next.index()] {
                        core_members += 1;
                        queue.push_back(next);
                    } else {
                        trace!("[FlowScan] {next} joins {route_id} as border");
                    }
                }
            }

            let route = HotRoute::new(route_id, members, core_members);
            debug!(
                "[FlowScan] {route_id}: {} connection(s), {} core, seeded by {seed}",
                route.len(),
                route.core_count()
            );
            observer.on_route(&route, graph);
            routes.push(route);
        }

        // ── Phase 3: labels ───────────────────────────────────────────────
        let membership = (0..n)
            .map(|i| match (core[i], assignment[i].is_valid()) {
                (true, _)      => Membership::Core,
                (false, true)  => Membership::Border,
                (false, false) => Membership::Noise,
            })
            .collect();

        let clustering = Clustering { routes, membership, assignment };
        let summary = clustering.summary();
        info!("[FlowScan] {summary}");
        observer.on_scan_end(&summary);
        Ok(clustering)
    }
}
