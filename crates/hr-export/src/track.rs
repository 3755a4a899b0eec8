//! Hot route → track conversion.
//!
//! One [`Track`] per route, one [`TrackSegment`] per member connection.  A
//! segment carries the connection's geometry with repeated points removed,
//! its speed attributes and its traffic, so a writer for any track format
//! needs nothing but the `Track` itself.

use hr_core::{ConnectionId, GeoPoint, RouteId, TrajectoryId};
use hr_graph::{Connection, RoadGraph};
use hr_scan::HotRoute;

use crate::{ExportResult, SignalIndex};

/// A geometry point, flagged when it sits on a traffic signal.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackPoint {
    pub pos:    GeoPoint,
    pub signal: bool,
}

/// The exported form of one connection.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackSegment {
    pub connection:    ConnectionId,
    pub points:        Vec<TrackPoint>,
    pub speed_kmh:     f32,
    pub avg_speed_kmh: f32,
    /// Trajectories that traversed the connection, ascending.
    pub traffic:       Vec<TrajectoryId>,
}

/// The exported form of one hot route.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Track {
    pub route:    RouteId,
    pub segments: Vec<TrackSegment>,
}

impl Track {
    pub fn point_count(&self) -> usize {
        self.segments.iter().map(|s| s.points.len()).sum()
    }

    pub fn signal_count(&self) -> usize {
        self.segments
            .iter()
            .flat_map(|s| &s.points)
            .filter(|p| p.signal)
            .count()
    }
}

/// Builds [`Track`]s from routes, marking signal points.
#[derive(Default)]
pub struct TrackBuilder {
    signals: SignalIndex,
}

impl TrackBuilder {
    /// A builder that marks no signals.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_signals(signals: SignalIndex) -> Self {
        Self { signals }
    }

    pub fn signals(&self) -> &SignalIndex {
        &self.signals
    }

    /// Convert one route.  Segments follow the route's member order.
    pub fn build(&self, route: &HotRoute, graph: &RoadGraph) -> ExportResult<Track> {
        let segments = route
            .members()
            .iter()
            .map(|&c| Ok(self.segment(graph.connection(c)?)))
            .collect::<ExportResult<Vec<_>>>()?;
        Ok(Track { route: route.id(), segments })
    }

    pub fn build_all(&self, routes: &[HotRoute], graph: &RoadGraph) -> ExportResult<Vec<Track>> {
        routes.iter().map(|r| self.build(r, graph)).collect()
    }

    fn segment(&self, conn: &Connection) -> TrackSegment {
        let mut points: Vec<TrackPoint> = Vec::with_capacity(conn.geometry().len());
        for &pos in conn.geometry() {
            // Shared vertices between consecutive sub-segments show up more
            // than once; keep the first occurrence only.
            if points.iter().any(|p| p.pos == pos) {
                continue;
            }
            points.push(TrackPoint { pos, signal: self.signals.is_signal(pos) });
        }
        TrackSegment {
            connection:    conn.id(),
            points,
            speed_kmh:     conn.speed_kmh(),
            avg_speed_kmh: conn.avg_speed_kmh(),
            traffic:       conn.traffic().as_slice().to_vec(),
        }
    }
}
