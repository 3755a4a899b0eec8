//! Synthetic street grid.
//!
//! A square grid of two-way streets laid over downtown Mobile, Alabama.
//! Nodes carry OSM-style source ids, diagonal blocks get a bent geometry and
//! every third intersection has a traffic signal.

use hr_core::{ConnectionId, GeoPoint, NodeId};
use hr_graph::{GraphResult, RoadGraphBuilder};

const ORIGIN:      GeoPoint = GeoPoint { lat: 30.695, lon: -88.045 };
const BLOCK_DEG:   f32      = 0.002; // ~200 m
const SOURCE_BASE: i64      = 1_000_000;

pub struct GridNetwork {
    pub builder: RoadGraphBuilder,
    /// Outgoing connections per node index.
    pub out:     Vec<Vec<ConnectionId>>,
    /// Head node per connection index.
    pub head:    Vec<NodeId>,
    /// Posted speed per connection index.
    pub speed:   Vec<f32>,
    /// Eastbound connections of each row, west to east.
    pub rows:    Vec<Vec<ConnectionId>>,
    /// Southbound connections of each column, north to south.
    pub cols:    Vec<Vec<ConnectionId>>,
    pub signals: Vec<GeoPoint>,
}

impl GridNetwork {
    fn link(&mut self, a: NodeId, b: NodeId, speed_kmh: f32) -> GraphResult<ConnectionId> {
        let (fwd, back) = self.builder.add_road(a, b, speed_kmh)?;
        self.out[a.index()].push(fwd);
        self.out[b.index()].push(back);
        self.head.extend([b, a]);
        self.speed.extend([speed_kmh, speed_kmh]);
        Ok(fwd)
    }

    /// Push the midpoint of `conn` off the straight line so the exported
    /// track has a bend.
    fn bend(&mut self, conn: ConnectionId, a: GeoPoint, b: GeoPoint) -> GraphResult<()> {
        let mid = GeoPoint::new((a.lat + b.lat) / 2.0 + BLOCK_DEG * 0.1, (a.lon + b.lon) / 2.0);
        // The midpoint is listed twice, as map extracts do at sub-segment joins.
        self.builder.set_geometry(conn, vec![a, mid, mid, b])
    }
}

/// Build a `side × side` grid.  Avenues (even rows) are faster than streets.
pub fn build_grid(side: usize) -> GraphResult<GridNetwork> {
    let mut net = GridNetwork {
        builder: RoadGraphBuilder::with_capacity(side * side, 4 * side * side),
        out:     vec![Vec::new(); side * side],
        head:    Vec::new(),
        speed:   Vec::new(),
        rows:    vec![Vec::new(); side],
        cols:    vec![Vec::new(); side],
        signals: Vec::new(),
    };

    let mut node = vec![vec![NodeId::INVALID; side]; side];
    let mut pos = vec![vec![ORIGIN; side]; side];
    for r in 0..side {
        for c in 0..side {
            let p = GeoPoint::new(
                ORIGIN.lat - r as f32 * BLOCK_DEG,
                ORIGIN.lon + c as f32 * BLOCK_DEG,
            );
            let source_id = SOURCE_BASE + (r * side + c) as i64;
            node[r][c] = net.builder.add_node_with_source_id(source_id, p)?;
            pos[r][c] = p;
            if (r + c) % 3 == 0 {
                net.signals.push(p);
            }
        }
    }

    for r in 0..side {
        let speed = if r % 2 == 0 { 50.0 } else { 30.0 };
        for c in 0..side - 1 {
            let east = net.link(node[r][c], node[r][c + 1], speed)?;
            if (r + c) % 4 == 1 {
                net.bend(east, pos[r][c], pos[r][c + 1])?;
            }
            net.rows[r].push(east);
        }
    }
    for c in 0..side {
        for r in 0..side - 1 {
            let south = net.link(node[r][c], node[r + 1][c], 30.0)?;
            net.cols[c].push(south);
        }
    }
    Ok(net)
}
