//! Unit tests for hr-export.

use hr_core::{ConnectionId, GeoPoint, NodeId, TrajectoryId};
use hr_graph::{RoadGraph, RoadGraphBuilder};

// ── Helpers ───────────────────────────────────────────────────────────────────

const BEND: GeoPoint = GeoPoint { lat: 0.0005, lon: 0.0015 };

/// One-way chain A → B → C → D, every connection driven by trajectories
/// 1, 2 and 3.  The middle connection bends through `BEND`, which appears
/// twice in its geometry.
fn bent_chain() -> (RoadGraph, [ConnectionId; 3]) {
    let mut b = RoadGraphBuilder::new();
    let nodes: Vec<NodeId> = (0..4)
        .map(|i| b.add_node(GeoPoint::new(0.0, i as f32 * 0.001)))
        .collect();
    let ab = b.add_connection(nodes[0], nodes[1], 50.0).unwrap();
    let bc = b.add_connection(nodes[1], nodes[2], 30.0).unwrap();
    let cd = b.add_connection(nodes[2], nodes[3], 50.0).unwrap();
    b.set_geometry(
        bc,
        vec![GeoPoint::new(0.0, 0.001), BEND, BEND, GeoPoint::new(0.0, 0.002)],
    )
    .unwrap();
    b.set_avg_speed(bc, 22.5).unwrap();
    for t in 1..=3 {
        b.record_trajectory(TrajectoryId(t), &[ab, bc, cd]).unwrap();
    }
    (b.build(), [ab, bc, cd])
}

// ── SignalIndex ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod signal_tests {
    use super::*;
    use crate::{ExportError, SignalIndex, DEFAULT_TOLERANCE_DEG};

    #[test]
    fn exact_and_near_hits() {
        let idx = SignalIndex::new([BEND]);
        assert_eq!(idx.len(), 1);
        assert!(idx.is_signal(BEND));
        assert!(idx.is_signal(GeoPoint::new(BEND.lat + 1e-7, BEND.lon)));
        assert!(!idx.is_signal(GeoPoint::new(BEND.lat + 1e-4, BEND.lon)));
    }

    #[test]
    fn empty_index_never_matches() {
        let idx = SignalIndex::empty();
        assert!(idx.is_empty());
        assert!(!idx.is_signal(BEND));
        assert_eq!(idx.tolerance(), DEFAULT_TOLERANCE_DEG);
    }

    #[test]
    fn wider_tolerance() {
        let idx = SignalIndex::new([BEND]).with_tolerance(1e-3).unwrap();
        assert!(idx.is_signal(GeoPoint::new(BEND.lat + 5e-4, BEND.lon)));
    }

    #[test]
    fn bad_tolerance_rejected() {
        let err = SignalIndex::empty().with_tolerance(-1.0).err().unwrap();
        assert!(matches!(err, ExportError::Tolerance(_)));
        assert!(SignalIndex::empty().with_tolerance(f32::NAN).is_err());
    }
}

// ── TrackBuilder ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod track_tests {
    use super::*;
    use hr_core::HrError;
    use hr_graph::GraphError;
    use hr_scan::FlowScan;

    use crate::{ExportError, SignalIndex, TrackBuilder};

    #[test]
    fn one_segment_per_member() {
        let (g, [ab, bc, cd]) = bent_chain();
        let routes = FlowScan::run(&g, 2, 2).unwrap();
        assert_eq!(routes.len(), 1);

        let track = TrackBuilder::new().build(&routes[0], &g).unwrap();
        assert_eq!(track.route, routes[0].id());
        let conns: Vec<_> = track.segments.iter().map(|s| s.connection).collect();
        assert_eq!(conns, routes[0].members());
        let mut sorted = conns.clone();
        sorted.sort();
        assert_eq!(sorted, vec![ab, bc, cd]);
    }

    #[test]
    fn segment_attributes() {
        let (g, [_, bc, _]) = bent_chain();
        let routes = FlowScan::run(&g, 2, 2).unwrap();
        let track = TrackBuilder::new().build(&routes[0], &g).unwrap();
        let seg = track.segments.iter().find(|s| s.connection == bc).unwrap();

        assert_eq!(seg.speed_kmh, 30.0);
        assert_eq!(seg.avg_speed_kmh, 22.5);
        assert_eq!(seg.traffic, vec![TrajectoryId(1), TrajectoryId(2), TrajectoryId(3)]);
    }

    #[test]
    fn repeated_points_dropped() {
        let (g, [_, bc, _]) = bent_chain();
        let routes = FlowScan::run(&g, 2, 2).unwrap();
        let track = TrackBuilder::new().build(&routes[0], &g).unwrap();
        let seg = track.segments.iter().find(|s| s.connection == bc).unwrap();

        let pts: Vec<GeoPoint> = seg.points.iter().map(|p| p.pos).collect();
        assert_eq!(pts, vec![GeoPoint::new(0.0, 0.001), BEND, GeoPoint::new(0.0, 0.002)]);
        // Default geometry on the other two segments: just the endpoints.
        assert_eq!(track.point_count(), 2 + 3 + 2);
    }

    #[test]
    fn signal_points_marked() {
        let (g, [_, bc, _]) = bent_chain();
        let routes = FlowScan::run(&g, 2, 2).unwrap();
        let builder = TrackBuilder::with_signals(SignalIndex::new([BEND]));
        let track = builder.build(&routes[0], &g).unwrap();

        assert_eq!(track.signal_count(), 1);
        let seg = track.segments.iter().find(|s| s.connection == bc).unwrap();
        let flags: Vec<bool> = seg.points.iter().map(|p| p.signal).collect();
        assert_eq!(flags, vec![false, true, false]);
    }

    #[test]
    fn unmarked_without_signals() {
        let (g, _) = bent_chain();
        let routes = FlowScan::run(&g, 2, 2).unwrap();
        let track = TrackBuilder::new().build(&routes[0], &g).unwrap();
        assert_eq!(track.signal_count(), 0);
    }

    #[test]
    fn route_from_another_graph_is_an_error() {
        let (g, _) = bent_chain();
        let routes = FlowScan::run(&g, 2, 2).unwrap();
        let err = TrackBuilder::new().build(&routes[0], &RoadGraph::empty()).unwrap_err();
        assert!(matches!(err, ExportError::Graph(GraphError::ConnectionNotFound(_))));
        assert!(matches!(HrError::from(err), HrError::ConnectionNotFound(_)));
    }

    #[test]
    fn build_all_keeps_route_order() {
        let (g, _) = bent_chain();
        let routes = FlowScan::run(&g, 2, 2).unwrap();
        let tracks = TrackBuilder::new().build_all(&routes, &g).unwrap();
        let ids: Vec<_> = tracks.iter().map(|t| t.route).collect();
        let expected: Vec<_> = routes.iter().map(|r| r.id()).collect();
        assert_eq!(ids, expected);
    }
}

// ── TrackObserver ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use super::*;
    use hr_scan::{FlowScan, ScanConfig};

    use crate::{SignalIndex, TrackBuilder, TrackObserver};

    #[test]
    fn tracks_collected_during_scan() {
        let (g, _) = bent_chain();
        let mut obs = TrackObserver::new(TrackBuilder::with_signals(SignalIndex::new([BEND])));
        let clustering = FlowScan::new(ScanConfig::new(2, 2)).scan(&g, &mut obs).unwrap();

        assert!(obs.take_error().is_none());
        assert_eq!(obs.summary(), Some(&clustering.summary()));
        let tracks = obs.into_tracks();
        assert_eq!(tracks.len(), clustering.routes().len());
        assert_eq!(tracks[0].signal_count(), 1);
    }

    #[test]
    fn nothing_before_scan() {
        let mut obs = TrackObserver::new(TrackBuilder::new());
        assert!(obs.tracks().is_empty());
        assert!(obs.summary().is_none());
        assert!(obs.take_error().is_none());
    }
}
