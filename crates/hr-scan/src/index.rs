//! Cached eps-neighborhoods and direct density-reachability sets.
//!
//! # Caching model
//!
//! A [`ReachabilityIndex`] is bound to one graph and one [`ScanConfig`].
//! Every connection owns two independent slots (`OnceLock`): its
//! eps-neighborhood and its directly-density-reachable subset.  A slot is
//! filled on the first query and never changes afterwards; asking for a
//! different `eps` means building a new index.
//!
//! The index borrows the graph immutably for its whole lifetime, so the
//! traffic it was computed from cannot change underneath it.
//!
//! # Reverse relation
//!
//! Graph reachability is directed but the traffic test is symmetric, so the
//! clusterer also needs "who reaches me": [`ReachabilityIndex::reverse_reachable`].
//! It is derived from all forward sets at once, the first time it is asked
//! for.

use std::sync::OnceLock;

use hr_core::ConnectionId;
use hr_graph::{GraphError, RoadGraph};

use crate::{ScanConfig, ScanResult};

type Slot = OnceLock<Box<[ConnectionId]>>;

pub struct ReachabilityIndex<'g> {
    graph:         &'g RoadGraph,
    config:        ScanConfig,
    neighborhoods: Vec<Slot>,
    reachable:     Vec<Slot>,
    reverse:       OnceLock<Vec<Box<[ConnectionId]>>>,
}

impl<'g> ReachabilityIndex<'g> {
    /// An empty index over `graph`.  Nothing is computed yet.
    pub fn new(graph: &'g RoadGraph, config: ScanConfig) -> Self {
        let n = graph.connection_count();
        Self {
            graph,
            config,
            neighborhoods: (0..n).map(|_| OnceLock::new()).collect(),
            reachable:     (0..n).map(|_| OnceLock::new()).collect(),
            reverse:       OnceLock::new(),
        }
    }

    pub fn graph(&self) -> &'g RoadGraph {
        self.graph
    }

    pub fn config(&self) -> ScanConfig {
        self.config
    }

    /// Cached [`RoadGraph::eps_neighborhood`], ascending by id.
    pub fn eps_neighborhood(&self, conn: ConnectionId) -> ScanResult<&[ConnectionId]> {
        let slot = slot(&self.neighborhoods, conn)?;
        if let Some(cached) = slot.get() {
            return Ok(cached);
        }
        let computed = sorted(self.graph.eps_neighborhood(conn, self.config.eps)?);
        Ok(slot.get_or_init(|| computed))
    }

    /// Cached direct density-reachability set, ascending by id.
    ///
    /// Filters the cached neighborhood instead of re-running the BFS.
    pub fn directly_reachable(&self, conn: ConnectionId) -> ScanResult<&[ConnectionId]> {
        let slot = slot(&self.reachable, conn)?;
        if let Some(cached) = slot.get() {
            return Ok(cached);
        }
        let traffic = self.graph.connection(conn)?.traffic();
        let min = self.config.min_traffic as usize;
        let connections = self.graph.connections();
        let computed: Box<[ConnectionId]> = self
            .eps_neighborhood(conn)?
            .iter()
            .copied()
            .filter(|s| traffic.overlap(connections[s.index()].traffic()) >= min)
            .collect();
        Ok(slot.get_or_init(|| computed))
    }

    /// All connections `x` with `conn ∈ directly_reachable(x)`, ascending.
    ///
    /// The first call computes every forward set (see
    /// [`precompute`](Self::precompute)).
    pub fn reverse_reachable(&self, conn: ConnectionId) -> ScanResult<&[ConnectionId]> {
        slot(&self.reachable, conn)?;
        if self.reverse.get().is_none() {
            let built = self.build_reverse()?;
            let _ = self.reverse.set(built);
        }
        Ok(self
            .reverse
            .get()
            .map(|rev| &*rev[conn.index()])
            .unwrap_or(&[]))
    }

    /// `true` if `conn` has at least `min_traffic` directly density-reachable
    /// neighbors.
    pub fn is_core(&self, conn: ConnectionId) -> ScanResult<bool> {
        Ok(self.directly_reachable(conn)?.len() >= self.config.min_traffic as usize)
    }

    /// Fill every forward slot now instead of on first query.
    ///
    /// With the `parallel` feature the per-connection work runs on Rayon's
    /// thread pool; each slot is written by exactly one winner.
    pub fn precompute(&self) -> ScanResult<()> {
        let n = self.graph.connection_count();

        #[cfg(not(feature = "parallel"))]
        {
            for i in 0..n {
                self.directly_reachable(ConnectionId(i as u32))?;
            }
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            (0..n).into_par_iter().try_for_each(|i| {
                self.directly_reachable(ConnectionId(i as u32)).map(|_| ())
            })?;
        }

        Ok(())
    }

    /// Number of connections whose forward reachability set is cached.
    pub fn cached_count(&self) -> usize {
        self.reachable.iter().filter(|s| s.get().is_some()).count()
    }

    fn build_reverse(&self) -> ScanResult<Vec<Box<[ConnectionId]>>> {
        self.precompute()?;
        let n = self.graph.connection_count();
        let mut reverse: Vec<Vec<ConnectionId>> = vec![Vec::new(); n];
        // Ascending source order keeps every reverse list sorted.
        for i in 0..n {
            let source = ConnectionId(i as u32);
            for &target in self.directly_reachable(source)? {
                reverse[target.index()].push(source);
            }
        }
        Ok(reverse.into_iter().map(Vec::into_boxed_slice).collect())
    }
}

fn slot(slots: &[Slot], conn: ConnectionId) -> ScanResult<&Slot> {
    slots
        .get(conn.index())
        .ok_or_else(|| GraphError::ConnectionNotFound(conn).into())
}

fn sorted(set: impl IntoIterator<Item = ConnectionId>) -> Box<[ConnectionId]> {
    let mut v: Vec<ConnectionId> = set.into_iter().collect();
    v.sort_unstable();
    v.into_boxed_slice()
}
