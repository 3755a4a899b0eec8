//! Unit tests for hr-core primitives.

#[cfg(test)]
mod ids {
    use crate::{ConnectionId, NodeId, RouteId, TrajectoryId};

    #[test]
    fn index_roundtrip() {
        let id = ConnectionId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(ConnectionId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(ConnectionId(0) < ConnectionId(1));
        assert!(NodeId(100) > NodeId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(NodeId::INVALID.0, u32::MAX);
        assert_eq!(ConnectionId::INVALID.0, u32::MAX);
        assert_eq!(TrajectoryId::INVALID.0, u64::MAX);
        assert!(!RouteId::default().is_valid());
        assert!(RouteId(0).is_valid());
    }

    #[test]
    fn display() {
        assert_eq!(ConnectionId(7).to_string(), "ConnectionId(7)");
        assert_eq!(TrajectoryId(3).to_string(), "TrajectoryId(3)");
    }
}

#[cfg(test)]
mod geo {
    use crate::GeoPoint;

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(50.087, 14.421);
        assert!(p.distance_m(p) < 0.01);
    }

    #[test]
    fn one_degree_latitude() {
        // ~1 degree of latitude ≈ 111 km
        let a = GeoPoint::new(50.0, 14.0);
        let b = GeoPoint::new(51.0, 14.0);
        let d = a.distance_m(b);
        assert!((d - 111_195.0).abs() < 500.0, "got {d}");
    }

    #[test]
    fn polyline_length_sums_segments() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 0.01);
        let c = GeoPoint::new(0.0, 0.02);
        let total = GeoPoint::polyline_length_m(&[a, b, c]);
        assert!((total - a.distance_m(c)).abs() < 1.0, "got {total}");
        assert_eq!(GeoPoint::polyline_length_m(&[a]), 0.0);
    }
}

#[cfg(test)]
mod error {
    use crate::{ConnectionId, HrError};

    #[test]
    fn messages() {
        let e = HrError::ConnectionNotFound(ConnectionId(4));
        assert_eq!(e.to_string(), "connection ConnectionId(4) not found");
        let e = HrError::Config("eps must be >= 1".into());
        assert_eq!(e.to_string(), "configuration error: eps must be >= 1");
    }
}
