//! Unit tests for wr-core primitives.

#[cfg(test)]
mod ids {
    use crate::{EdgeId, NodeId, WayId};

    #[test]
    fn index_roundtrip() {
        let id = NodeId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(NodeId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(NodeId::INVALID.0, u32::MAX);
        assert_eq!(EdgeId::INVALID.0, u32::MAX);
        assert!(!WayId::default().is_valid());
        assert!(EdgeId(0).is_valid());
    }

    #[test]
    fn display() {
        assert_eq!(NodeId(7).to_string(), "NodeId(7)");
    }
}

#[cfg(test)]
mod geo {
    use crate::GeoPoint;

    #[test]
    fn zero_distance() {
        let p = GeoPoint::new(51.5072, -0.1276);
        assert!(p.distance_m(p) < 1e-6);
    }

    #[test]
    fn one_degree_of_latitude() {
        // ~1 degree of latitude ≈ 111.2 km
        let a = GeoPoint::new(51.0, -0.1);
        let b = GeoPoint::new(52.0, -0.1);
        let d = a.distance_m(b);
        assert!((d - 111_195.0).abs() < 50.0, "got {d}");
    }

    #[test]
    fn cardinal_bearings() {
        let o = GeoPoint::new(0.0, 0.0);
        let north = o.bearing_to(GeoPoint::new(0.01, 0.0)).unwrap();
        let east  = o.bearing_to(GeoPoint::new(0.0, 0.01)).unwrap();
        let south = o.bearing_to(GeoPoint::new(-0.01, 0.0)).unwrap();
        let west  = o.bearing_to(GeoPoint::new(0.0, -0.01)).unwrap();
        assert!(north.abs() < 1e-9, "north = {north}");
        assert!((east - 90.0).abs() < 1e-9, "east = {east}");
        assert!((south - 180.0).abs() < 1e-9, "south = {south}");
        assert!((west - 270.0).abs() < 1e-9, "west = {west}");
    }

    #[test]
    fn identical_points_have_no_bearing() {
        let p = GeoPoint::new(48.85, 2.35);
        assert_eq!(p.bearing_to(p), None);
    }

    #[test]
    fn validity() {
        assert!(GeoPoint::new(48.85, 2.35).is_valid());
        assert!(!GeoPoint::new(f64::NAN, 2.35).is_valid());
        assert!(!GeoPoint::new(91.0, 0.0).is_valid());
    }
}

#[cfg(test)]
mod bearing {
    use crate::{BearingCone, Bias, Quadrant};
    use crate::bearing::angular_difference;

    #[test]
    fn quadrant_boundaries() {
        assert_eq!(Quadrant::from_bearing(Some(0.0)), Some(Quadrant::NorthEast));
        assert_eq!(Quadrant::from_bearing(Some(89.999)), Some(Quadrant::NorthEast));
        assert_eq!(Quadrant::from_bearing(Some(90.0)), Some(Quadrant::SouthEast));
        assert_eq!(Quadrant::from_bearing(Some(180.0)), Some(Quadrant::SouthWest));
        assert_eq!(Quadrant::from_bearing(Some(270.0)), Some(Quadrant::NorthWest));
        assert_eq!(Quadrant::from_bearing(Some(359.99)), Some(Quadrant::NorthWest));
        assert_eq!(Quadrant::from_bearing(Some(360.0)), Some(Quadrant::NorthEast));
    }

    #[test]
    fn missing_bearing_has_no_bucket() {
        assert_eq!(Quadrant::from_bearing(None), None);
        assert_eq!(Quadrant::from_bearing(Some(f64::NAN)), None);
        assert_eq!(Bias::Quadrants.bucket_of(None), None);
        assert_eq!(Bias::Cone(BearingCone::new(0.0, 45.0)).bucket_of(None), None);
    }

    #[test]
    fn cone_wraps_through_north() {
        let cone = BearingCone::new(350.0, 20.0);
        assert!(cone.contains(5.0));
        assert!(cone.contains(335.0));
        assert!(!cone.contains(15.0));
        assert!(!cone.contains(180.0));
    }

    #[test]
    fn angular_difference_is_symmetric() {
        assert_eq!(angular_difference(10.0, 350.0), 20.0);
        assert_eq!(angular_difference(350.0, 10.0), 20.0);
        assert_eq!(angular_difference(0.0, 180.0), 180.0);
    }

    #[test]
    fn bias_bucket_counts() {
        assert_eq!(Bias::Quadrants.bucket_count(), 4);
        assert_eq!(Bias::Cone(BearingCone::new(90.0, 30.0)).bucket_count(), 1);
        assert_eq!(Bias::Quadrants.bucket_of(Some(200.0)), Some(2));
        assert_eq!(Bias::Cone(BearingCone::new(90.0, 30.0)).bucket_of(Some(100.0)), Some(0));
        assert_eq!(Bias::Cone(BearingCone::new(90.0, 30.0)).bucket_of(Some(130.0)), None);
    }

    mod props {
        use proptest::prelude::*;
        use crate::Quadrant;

        proptest! {
            #[test]
            fn quadrants_partition_the_compass(b in 0.0f64..360.0) {
                let q = Quadrant::from_bearing(Some(b)).unwrap();
                let lo = q.index() as f64 * 90.0;
                prop_assert!(b >= lo && b < lo + 90.0);
            }
        }
    }
}

#[cfg(test)]
mod config {
    use crate::{CoreError, SearchConfig};

    #[test]
    fn defaults_are_valid() {
        let cfg = SearchConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.time_budget().as_secs(), 60);
        let (lo, hi) = cfg.length_band(400.0);
        assert!((lo - 320.0).abs() < 1e-9, "lo = {lo}");
        assert!((hi - 480.0).abs() < 1e-9, "hi = {hi}");
    }

    #[test]
    fn rejects_bad_values() {
        let bad = SearchConfig { tolerance: 1.5, ..SearchConfig::default() };
        assert!(matches!(bad.validate(), Err(CoreError::Config(_))));

        let bad = SearchConfig { return_penalty: 0.5, ..SearchConfig::default() };
        assert!(bad.validate().is_err());

        let bad = SearchConfig { max_routes: 0, ..SearchConfig::default() };
        assert!(bad.validate().is_err());

        let bad = SearchConfig { deadline_check_interval: 0, ..SearchConfig::default() };
        assert!(bad.validate().is_err());
    }
}
