//! Traffic-signal lookup by coordinate.
//!
//! The source map tags some nodes as traffic signals.  Exported track points
//! carry a marker when they coincide with one of those nodes; the match is a
//! radius query against an R-tree (via `rstar`) so geometry points that went
//! through a float round-trip still hit.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use hr_core::GeoPoint;

use crate::{ExportError, ExportResult};

/// Default match radius in degrees (~0.1 m of latitude).
pub const DEFAULT_TOLERANCE_DEG: f32 = 1e-6;

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone)]
struct SignalEntry {
    point: [f32; 2], // [lat, lon]
}

impl RTreeObject for SignalEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for SignalEntry {
    /// Squared Euclidean distance in lat/lon space.
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dlat = self.point[0] - point[0];
        let dlon = self.point[1] - point[1];
        dlat * dlat + dlon * dlon
    }
}

// ── SignalIndex ───────────────────────────────────────────────────────────────

/// Positions of traffic signals, queried by coordinate.
pub struct SignalIndex {
    tree:      RTree<SignalEntry>,
    tolerance: f32,
}

impl SignalIndex {
    /// Bulk-load an index from signal positions.
    pub fn new(signals: impl IntoIterator<Item = GeoPoint>) -> Self {
        let entries: Vec<SignalEntry> = signals
            .into_iter()
            .map(|p| SignalEntry { point: [p.lat, p.lon] })
            .collect();
        Self {
            tree:      RTree::bulk_load(entries),
            tolerance: DEFAULT_TOLERANCE_DEG,
        }
    }

    /// An index that never reports a signal.
    pub fn empty() -> Self {
        Self::new(std::iter::empty())
    }

    /// Set the match radius in degrees.
    pub fn with_tolerance(mut self, tolerance_deg: f32) -> ExportResult<Self> {
        if !tolerance_deg.is_finite() || tolerance_deg < 0.0 {
            return Err(ExportError::Tolerance(tolerance_deg));
        }
        self.tolerance = tolerance_deg;
        Ok(self)
    }

    pub fn tolerance(&self) -> f32 {
        self.tolerance
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// `true` if a signal lies within the tolerance of `pos`.
    pub fn is_signal(&self, pos: GeoPoint) -> bool {
        self.tree
            .locate_within_distance([pos.lat, pos.lon], self.tolerance * self.tolerance)
            .next()
            .is_some()
    }
}

impl Default for SignalIndex {
    fn default() -> Self {
        Self::empty()
    }
}
