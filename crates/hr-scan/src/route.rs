//! Clustering output: hot routes, per-connection labels, and run summary.

use std::fmt;

use hr_core::{ConnectionId, RouteId};
use hr_graph::{Connection, RoadGraph, Traffic};

// ── HotRoute ──────────────────────────────────────────────────────────────────

/// A density-connected group of connections found by one FlowScan run.
///
/// Members are kept in discovery order: the seeding core connection first,
/// then connections in the order the expansion claimed them.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HotRoute {
    id:         RouteId,
    members:    Vec<ConnectionId>,
    core_count: usize,
}

impl HotRoute {
    pub(crate) fn new(id: RouteId, members: Vec<ConnectionId>, core_count: usize) -> Self {
        Self { id, members, core_count }
    }

    pub fn id(&self) -> RouteId {
        self.id
    }

    /// Member connection ids in discovery order.
    pub fn members(&self) -> &[ConnectionId] {
        &self.members
    }

    /// Member connection ids in ascending order.
    pub fn sorted_members(&self) -> Vec<ConnectionId> {
        let mut v = self.members.clone();
        v.sort_unstable();
        v
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, conn: ConnectionId) -> bool {
        self.members.contains(&conn)
    }

    /// Number of core members.  The remaining `len() - core_count()` are
    /// border members.
    pub fn core_count(&self) -> usize {
        self.core_count
    }

    /// Resolve members against the graph the route was computed on.
    pub fn connections<'g>(&self, graph: &'g RoadGraph) -> impl Iterator<Item = &'g Connection> {
        self.members.iter().filter_map(move |&c| graph.connection(c).ok())
    }

    /// Union of the members' traffic: every trajectory that contributed to
    /// this route.
    pub fn trajectories(&self, graph: &RoadGraph) -> Traffic {
        self.connections(graph)
            .flat_map(|c| c.traffic().iter())
            .collect()
    }

    /// Sum of member geometry lengths in metres.
    pub fn length_m(&self, graph: &RoadGraph) -> f32 {
        self.connections(graph).map(Connection::length_m).sum()
    }
}

// ── Membership ────────────────────────────────────────────────────────────────

/// DBSCAN-style label of one connection after a run.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Membership {
    /// Has at least `min_traffic` directly density-reachable neighbors.
    Core,
    /// Absorbed by a route without being core itself.
    Border,
    /// In no route.
    Noise,
}

impl Membership {
    pub fn as_str(self) -> &'static str {
        match self {
            Membership::Core   => "core",
            Membership::Border => "border",
            Membership::Noise  => "noise",
        }
    }
}

impl fmt::Display for Membership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── ScanSummary ───────────────────────────────────────────────────────────────

/// Counts reported at the end of a run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScanSummary {
    pub connections: usize,
    pub core:        usize,
    pub border:      usize,
    pub noise:       usize,
    pub routes:      usize,
}

impl fmt::Display for ScanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} route(s) over {} connection(s): {} core, {} border, {} noise",
            self.routes, self.connections, self.core, self.border, self.noise
        )
    }
}

// ── Clustering ────────────────────────────────────────────────────────────────

/// Full result of [`FlowScan::scan`](crate::FlowScan::scan).
#[derive(Clone, Debug)]
pub struct Clustering {
    pub(crate) routes:     Vec<HotRoute>,
    /// Indexed by `ConnectionId`.
    pub(crate) membership: Vec<Membership>,
    /// Indexed by `ConnectionId`; `RouteId::INVALID` for noise.
    pub(crate) assignment: Vec<RouteId>,
}

impl Clustering {
    /// Routes in creation order; `routes()[i].id() == RouteId(i)`.
    pub fn routes(&self) -> &[HotRoute] {
        &self.routes
    }

    pub fn into_routes(self) -> Vec<HotRoute> {
        self.routes
    }

    pub fn route(&self, id: RouteId) -> Option<&HotRoute> {
        self.routes.get(id.index())
    }

    /// Label of `conn`, or `None` if it is not a connection of the graph.
    pub fn membership(&self, conn: ConnectionId) -> Option<Membership> {
        self.membership.get(conn.index()).copied()
    }

    /// Route that claimed `conn`, or `None` for noise.
    pub fn route_of(&self, conn: ConnectionId) -> Option<RouteId> {
        self.assignment
            .get(conn.index())
            .copied()
            .filter(|r| r.is_valid())
    }

    /// Connections that belong to no route, ascending.
    pub fn noise(&self) -> impl Iterator<Item = ConnectionId> + '_ {
        self.membership
            .iter()
            .enumerate()
            .filter(|(_, m)| **m == Membership::Noise)
            .map(|(i, _)| ConnectionId(i as u32))
    }

    pub fn summary(&self) -> ScanSummary {
        let count = |want: Membership| self.membership.iter().filter(|m| **m == want).count();
        ScanSummary {
            connections: self.membership.len(),
            core:        count(Membership::Core),
            border:      count(Membership::Border),
            noise:       count(Membership::Noise),
            routes:      self.routes.len(),
        }
    }
}
