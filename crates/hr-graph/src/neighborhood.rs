//! Hop-bounded neighborhood and direct density-reachability queries.
//!
//! Both queries recompute on every call.  Callers that ask repeatedly for
//! the same parameters (the clusterer) keep results in their own cache keyed
//! by `eps` / `min_traffic`; see `hr_scan::ReachabilityIndex`.

use rustc_hash::FxHashSet;

use hr_core::ConnectionId;

use crate::error::GraphResult;
use crate::graph::RoadGraph;

impl RoadGraph {
    /// All connections reachable from `conn` in `1..=eps` directed hops.
    ///
    /// A hop from `c` moves to any `s` with `s.from == c.to`.  Expansion is
    /// level by level: the whole frontier at depth `d` is expanded before
    /// any connection at depth `d + 1` is considered.  `conn` itself is never
    /// part of the result, even when a cycle or self-loop leads back to it.
    ///
    /// `eps = 0` yields the empty set.
    pub fn eps_neighborhood(&self, conn: ConnectionId, eps: u32) -> GraphResult<FxHashSet<ConnectionId>> {
        self.connection(conn)?;

        // `visited` doubles as the result; seeding it with `conn` stops
        // cycles from re-entering the start connection.
        let mut visited: FxHashSet<ConnectionId> = FxHashSet::default();
        visited.insert(conn);

        let mut frontier = vec![conn];
        for _ in 0..eps {
            if frontier.is_empty() {
                break;
            }
            let mut next = Vec::new();
            for &cur in &frontier {
                for &succ in self.successors(cur) {
                    if visited.insert(succ) {
                        next.push(succ);
                    }
                }
            }
            frontier = next;
        }

        visited.remove(&conn);
        Ok(visited)
    }

    /// The connections of `conn`'s eps-neighborhood that share at least
    /// `min_traffic` trajectories with `conn`.
    pub fn directly_density_reachable(
        &self,
        conn:        ConnectionId,
        min_traffic: u32,
        eps:         u32,
    ) -> GraphResult<FxHashSet<ConnectionId>> {
        let traffic = self.connection(conn)?.traffic();
        let neighborhood = self.eps_neighborhood(conn, eps)?;
        Ok(neighborhood
            .into_iter()
            .filter(|s| {
                traffic.overlap(self.connections()[s.index()].traffic()) >= min_traffic as usize
            })
            .collect())
    }

    /// Number of trajectories shared by two connections.
    pub fn shared_traffic(&self, a: ConnectionId, b: ConnectionId) -> GraphResult<usize> {
        Ok(self.connection(a)?.traffic().overlap(self.connection(b)?.traffic()))
    }
}
