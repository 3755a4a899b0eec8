//! Road graph representation and builder.
//!
//! # Data layout
//!
//! Nodes and connections live in two arenas indexed by [`NodeId`] and
//! [`ConnectionId`].  A connection stores its endpoint *ids*, never owning
//! references, so the node ↔ edge back-references carry no ownership cycle.
//!
//! Adjacency uses **Compressed Sparse Row (CSR)** format in both directions.
//! Given a `NodeId n`, its outgoing connections occupy the slice:
//!
//! ```text
//! out_conns[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! and its incoming connections the matching `in_conns` range.  Unlike a
//! routing network, connection ids are *not* re-sorted by source node: the
//! id handed out by [`RoadGraphBuilder::add_connection`] is what the
//! map-matcher records traffic against, so it must stay stable.  The CSR
//! arrays hold ids instead, in ascending order within each node's range.

use rustc_hash::{FxHashMap, FxHashSet};

use hr_core::{ConnectionId, GeoPoint, NodeId, TrajectoryId};

use crate::error::{GraphError, GraphResult};
use crate::traffic::Traffic;

// ── Node ──────────────────────────────────────────────────────────────────────

/// A graph vertex.
///
/// Its incident connections are reached through the owning graph
/// ([`RoadGraph::out_connections`] / [`RoadGraph::in_connections`]).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub id: NodeId,
    pub pos: GeoPoint,
    /// Identifier in the map the graph was loaded from (e.g. an OSM node id).
    pub source_id: Option<i64>,
}

// ── Connection ────────────────────────────────────────────────────────────────

/// A directed edge between two nodes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Connection {
    id:            ConnectionId,
    from:          NodeId,
    to:            NodeId,
    geometry:      Vec<GeoPoint>,
    speed_kmh:     f32,
    avg_speed_kmh: f32,
    traffic:       Traffic,
}

impl Connection {
    #[inline]
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Node where this connection starts.
    #[inline]
    pub fn from(&self) -> NodeId {
        self.from
    }

    /// Node where this connection ends.
    #[inline]
    pub fn to(&self) -> NodeId {
        self.to
    }

    #[inline]
    pub fn endpoints(&self) -> (NodeId, NodeId) {
        (self.from, self.to)
    }

    #[inline]
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }

    /// Shape of the connection, from `from` to `to`.  Always ≥ 2 points.
    #[inline]
    pub fn geometry(&self) -> &[GeoPoint] {
        &self.geometry
    }

    /// Speed limit in km/h.
    #[inline]
    pub fn speed_kmh(&self) -> f32 {
        self.speed_kmh
    }

    /// Average observed speed in km/h (0 when unknown).
    #[inline]
    pub fn avg_speed_kmh(&self) -> f32 {
        self.avg_speed_kmh
    }

    /// Trajectories matched onto this connection.
    #[inline]
    pub fn traffic(&self) -> &Traffic {
        &self.traffic
    }

    pub fn length_m(&self) -> f32 {
        GeoPoint::polyline_length_m(&self.geometry)
    }
}

// ── RoadGraph ─────────────────────────────────────────────────────────────────

/// Directed road graph in CSR format.
///
/// Immutable once built.  Do not construct directly; use
/// [`RoadGraphBuilder`].
#[derive(Clone, Debug)]
pub struct RoadGraph {
    nodes:       Vec<Node>,
    connections: Vec<Connection>,

    // ── CSR adjacency ─────────────────────────────────────────────────────
    /// Outgoing connections of node `n` are
    /// `out_conns[node_out_start[n] .. node_out_start[n+1]]`.
    /// Length = `node_count + 1`.
    node_out_start: Vec<u32>,
    out_conns:      Vec<ConnectionId>,
    node_in_start:  Vec<u32>,
    in_conns:       Vec<ConnectionId>,

    source_index: FxHashMap<i64, NodeId>,
}

impl RoadGraph {
    /// A graph with no nodes or connections.
    pub fn empty() -> Self {
        RoadGraphBuilder::new().build()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    pub fn node(&self, id: NodeId) -> GraphResult<&Node> {
        self.nodes.get(id.index()).ok_or(GraphError::NodeNotFound(id))
    }

    pub fn connection(&self, id: ConnectionId) -> GraphResult<&Connection> {
        self.connections
            .get(id.index())
            .ok_or(GraphError::ConnectionNotFound(id))
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// All connection ids in ascending order.
    pub fn connection_ids(&self) -> impl Iterator<Item = ConnectionId> + '_ {
        (0..self.connections.len()).map(|i| ConnectionId(i as u32))
    }

    /// Resolve a node by the id it had in the source map.
    pub fn node_by_source_id(&self, source_id: i64) -> Option<NodeId> {
        self.source_index.get(&source_id).copied()
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Connections starting at `node`, ascending by id.
    #[inline]
    pub fn out_connections(&self, node: NodeId) -> &[ConnectionId] {
        csr_slice(&self.node_out_start, &self.out_conns, node)
    }

    /// Connections ending at `node`, ascending by id.
    #[inline]
    pub fn in_connections(&self, node: NodeId) -> &[ConnectionId] {
        csr_slice(&self.node_in_start, &self.in_conns, node)
    }

    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        self.out_connections(node).len()
    }

    #[inline]
    pub fn in_degree(&self, node: NodeId) -> usize {
        self.in_connections(node).len()
    }

    /// Connections one hop after `conn`: every `s` with `s.from == conn.to`.
    ///
    /// # Panics
    /// Panics if `conn` is not a connection of this graph.
    #[inline]
    pub fn successors(&self, conn: ConnectionId) -> &[ConnectionId] {
        self.out_connections(self.connections[conn.index()].to)
    }

    /// Consume the graph and return a builder holding the same nodes,
    /// connections, and traffic, e.g. to record more matched trajectories.
    ///
    /// Connection and node ids are preserved.
    pub fn thaw(self) -> RoadGraphBuilder {
        let nodes = self
            .nodes
            .into_iter()
            .map(|n| RawNode { pos: n.pos, source_id: n.source_id })
            .collect();
        let connections = self
            .connections
            .into_iter()
            .map(|c| RawConnection {
                from:          c.from,
                to:            c.to,
                geometry:      c.geometry,
                speed_kmh:     c.speed_kmh,
                avg_speed_kmh: c.avg_speed_kmh,
                traffic:       c.traffic.iter().collect(),
            })
            .collect();
        RoadGraphBuilder {
            nodes,
            connections,
            source_index: self.source_index,
        }
    }
}

#[inline]
fn csr_slice<'a>(start: &[u32], items: &'a [ConnectionId], node: NodeId) -> &'a [ConnectionId] {
    let lo = start[node.index()] as usize;
    let hi = start[node.index() + 1] as usize;
    &items[lo..hi]
}

// ── RoadGraphBuilder ──────────────────────────────────────────────────────────

/// Construct a [`RoadGraph`] incrementally, then call [`build`](Self::build).
///
/// Map loaders add nodes and directed connections; the map-matcher then
/// records which connections each trajectory traversed.  Endpoint ids are
/// validated as connections are added, so `build()` cannot fail.
///
/// # Example
///
/// ```
/// use hr_core::{GeoPoint, TrajectoryId};
/// use hr_graph::RoadGraphBuilder;
///
/// let mut b = RoadGraphBuilder::new();
/// let a = b.add_node(GeoPoint::new(50.08, 14.42));
/// let c = b.add_node(GeoPoint::new(50.09, 14.43));
/// let (ac, _ca) = b.add_road(a, c, 50.0).unwrap();
/// b.record_trajectory(TrajectoryId(1), &[ac]).unwrap();
/// let graph = b.build();
/// assert_eq!(graph.connection_count(), 2);
/// assert_eq!(graph.connection(ac).unwrap().traffic().len(), 1);
/// ```
#[derive(Debug)]
pub struct RoadGraphBuilder {
    nodes:        Vec<RawNode>,
    connections:  Vec<RawConnection>,
    source_index: FxHashMap<i64, NodeId>,
}

#[derive(Debug)]
struct RawNode {
    pos:       GeoPoint,
    source_id: Option<i64>,
}

#[derive(Debug)]
struct RawConnection {
    from:          NodeId,
    to:            NodeId,
    geometry:      Vec<GeoPoint>,
    speed_kmh:     f32,
    avg_speed_kmh: f32,
    traffic:       FxHashSet<TrajectoryId>,
}

impl RoadGraphBuilder {
    pub fn new() -> Self {
        Self {
            nodes:        Vec::new(),
            connections:  Vec::new(),
            source_index: FxHashMap::default(),
        }
    }

    /// Pre-allocate for the expected number of nodes and connections.
    pub fn with_capacity(nodes: usize, connections: usize) -> Self {
        Self {
            nodes:        Vec::with_capacity(nodes),
            connections:  Vec::with_capacity(connections),
            source_index: FxHashMap::default(),
        }
    }

    // ── Nodes ─────────────────────────────────────────────────────────────

    /// Add a node and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self, pos: GeoPoint) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(RawNode { pos, source_id: None });
        id
    }

    /// Add a node that loaders can later resolve by its source-map id.
    pub fn add_node_with_source_id(&mut self, source_id: i64, pos: GeoPoint) -> GraphResult<NodeId> {
        if self.source_index.contains_key(&source_id) {
            return Err(GraphError::DuplicateSourceId(source_id));
        }
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(RawNode { pos, source_id: Some(source_id) });
        self.source_index.insert(source_id, id);
        Ok(id)
    }

    pub fn node_by_source_id(&self, source_id: i64) -> Option<NodeId> {
        self.source_index.get(&source_id).copied()
    }

    /// Position of a node added earlier.
    pub fn node_pos(&self, id: NodeId) -> GraphResult<GeoPoint> {
        self.nodes
            .get(id.index())
            .map(|n| n.pos)
            .ok_or(GraphError::NodeNotFound(id))
    }

    // ── Connections ───────────────────────────────────────────────────────

    /// Add a **directed** connection from `from` to `to` and return its id
    /// (sequential from 0).
    ///
    /// Geometry defaults to the straight segment between the endpoints;
    /// override it with [`set_geometry`](Self::set_geometry).
    pub fn add_connection(&mut self, from: NodeId, to: NodeId, speed_kmh: f32) -> GraphResult<ConnectionId> {
        let from_pos = self.node_pos(from)?;
        let to_pos = self.node_pos(to)?;
        let id = ConnectionId(self.connections.len() as u32);
        self.connections.push(RawConnection {
            from,
            to,
            geometry: vec![from_pos, to_pos],
            speed_kmh,
            avg_speed_kmh: 0.0,
            traffic: FxHashSet::default(),
        });
        Ok(id)
    }

    /// Convenience: add connections in **both directions** for a two-way
    /// road.  Returns `(a→b, b→a)`.
    pub fn add_road(&mut self, a: NodeId, b: NodeId, speed_kmh: f32) -> GraphResult<(ConnectionId, ConnectionId)> {
        let forward = self.add_connection(a, b, speed_kmh)?;
        let backward = self.add_connection(b, a, speed_kmh)?;
        Ok((forward, backward))
    }

    /// Replace the shape of a connection.  Needs at least two points.
    pub fn set_geometry(&mut self, conn: ConnectionId, geometry: Vec<GeoPoint>) -> GraphResult<()> {
        if geometry.len() < 2 {
            return Err(GraphError::InvalidGeometry { connection: conn, points: geometry.len() });
        }
        self.raw_mut(conn)?.geometry = geometry;
        Ok(())
    }

    pub fn set_avg_speed(&mut self, conn: ConnectionId, avg_speed_kmh: f32) -> GraphResult<()> {
        self.raw_mut(conn)?.avg_speed_kmh = avg_speed_kmh;
        Ok(())
    }

    // ── Traffic ───────────────────────────────────────────────────────────

    /// Record that `trajectory` traversed `conn`.  Returns `false` if it was
    /// already recorded there.
    pub fn add_traffic(&mut self, conn: ConnectionId, trajectory: TrajectoryId) -> GraphResult<bool> {
        Ok(self.raw_mut(conn)?.traffic.insert(trajectory))
    }

    /// Record one matched trajectory: `trajectory` is added to the traffic of
    /// every connection in `path`.
    ///
    /// All ids are validated first, so a bad id leaves the builder untouched.
    pub fn record_trajectory(&mut self, trajectory: TrajectoryId, path: &[ConnectionId]) -> GraphResult<()> {
        if let Some(&bad) = path.iter().find(|c| c.index() >= self.connections.len()) {
            return Err(GraphError::ConnectionNotFound(bad));
        }
        for conn in path {
            self.connections[conn.index()].traffic.insert(trajectory);
        }
        Ok(())
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn connection_count(&self) -> usize { self.connections.len() }

    fn raw_mut(&mut self, conn: ConnectionId) -> GraphResult<&mut RawConnection> {
        self.connections
            .get_mut(conn.index())
            .ok_or(GraphError::ConnectionNotFound(conn))
    }

    // ── Build ─────────────────────────────────────────────────────────────

    /// Consume the builder and produce a frozen [`RoadGraph`].
    ///
    /// Time complexity: O(N + E + T log T): two counting passes for the CSR
    /// arrays plus sorting each traffic set.
    pub fn build(self) -> RoadGraph {
        let node_count = self.nodes.len();

        let (node_out_start, out_conns) =
            build_csr(node_count, self.connections.iter().map(|c| c.from));
        let (node_in_start, in_conns) =
            build_csr(node_count, self.connections.iter().map(|c| c.to));

        let nodes = self
            .nodes
            .into_iter()
            .enumerate()
            .map(|(i, n)| Node { id: NodeId(i as u32), pos: n.pos, source_id: n.source_id })
            .collect();

        let connections = self
            .connections
            .into_iter()
            .enumerate()
            .map(|(i, c)| Connection {
                id:            ConnectionId(i as u32),
                from:          c.from,
                to:            c.to,
                geometry:      c.geometry,
                speed_kmh:     c.speed_kmh,
                avg_speed_kmh: c.avg_speed_kmh,
                traffic:       c.traffic.into_iter().collect(),
            })
            .collect();

        RoadGraph {
            nodes,
            connections,
            node_out_start,
            out_conns,
            node_in_start,
            in_conns,
            source_index: self.source_index,
        }
    }
}

impl Default for RoadGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Counting-sort the connections by `key` into a CSR row-pointer array and
/// an id array.  Ids inside each row stay ascending because connections are
/// visited in id order.
fn build_csr(node_count: usize, keys: impl Iterator<Item = NodeId> + Clone) -> (Vec<u32>, Vec<ConnectionId>) {
    let mut start = vec![0u32; node_count + 1];
    for n in keys.clone() {
        start[n.index() + 1] += 1;
    }
    for i in 1..=node_count {
        start[i] += start[i - 1];
    }

    let mut cursor = start.clone();
    let mut items = vec![ConnectionId::INVALID; start[node_count] as usize];
    for (i, n) in keys.enumerate() {
        let slot = &mut cursor[n.index()];
        items[*slot as usize] = ConnectionId(i as u32);
        *slot += 1;
    }
    (start, items)
}
