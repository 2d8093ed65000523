//! Unit tests for wr-network.
//!
//! All tests use hand-crafted supplier data so they run without any OSM file.

#[cfg(test)]
mod helpers {
    use wr_core::geo::EARTH_RADIUS_M;

    use crate::{RawNetwork, RawNode, RawWay};

    /// Degrees of arc spanning `m` metres on a great circle.
    pub fn deg(m: f64) -> f64 {
        (m / EARTH_RADIUS_M).to_degrees()
    }

    /// An L-shaped pair of ways on the equator:
    ///
    /// ```text
    ///   3
    ///   |  (residential, "Mill Lane")
    ///   1 --- 2   (footway, "Canal Path")
    /// ```
    pub fn ell() -> RawNetwork {
        let d = deg(100.0);
        RawNetwork::new(
            vec![
                RawNode::new(1, 0.0, 0.0),
                RawNode::new(2, 0.0, d),
                RawNode::new(3, d, 0.0),
            ],
            vec![
                RawWay::new(100, vec![1, 2])
                    .with_tag("highway", "footway")
                    .with_tag("name", "Canal Path"),
                RawWay::new(200, vec![1, 3])
                    .with_tag("highway", "residential")
                    .with_tag("name", "Mill Lane"),
            ],
        )
    }
}

// ── Cost model ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod cost {
    use std::io::Cursor;

    use crate::{CostModel, NetworkError};

    #[test]
    fn presets_are_valid() {
        assert!(CostModel::preferred().validate().is_ok());
        assert!(CostModel::relaxed().validate().is_ok());
    }

    #[test]
    fn preferred_spreads_wider_than_relaxed() {
        let p = CostModel::preferred();
        let r = CostModel::relaxed();
        assert_eq!(p.factor("footway"), r.factor("footway"));
        assert!(p.factor("primary") > r.factor("primary"));
    }

    #[test]
    fn unknown_category_uses_default() {
        let m = CostModel::new("t", [("footway", 1.0)], 3.5).unwrap();
        assert_eq!(m.factor("motorway"), 3.5);
        assert_eq!(m.cost("motorway", 10.0), 35.0);
        assert!(!m.knows("motorway"));
    }

    #[test]
    fn empty_model_is_config_error() {
        let err = CostModel::new("empty", Vec::<(String, f64)>::new(), 1.0).unwrap_err();
        assert!(matches!(err, NetworkError::EmptyCostModel(name) if name == "empty"));
    }

    #[test]
    fn negative_factor_rejected() {
        let err = CostModel::new("neg", [("footway", -1.0)], 1.0).unwrap_err();
        assert!(matches!(err, NetworkError::InvalidCostFactor { .. }));
        let err = CostModel::new("nan-default", [("footway", 1.0)], f64::NAN).unwrap_err();
        assert!(matches!(err, NetworkError::InvalidCostFactor { category, .. } if category == "default"));
    }

    #[test]
    fn csv_loader() {
        let csv = "category,factor\nfootway,1.0\nprimary,5.0\ndefault,2.0\n";
        let m = CostModel::from_csv_reader("csv", Cursor::new(csv)).unwrap();
        assert_eq!(m.factor("primary"), 5.0);
        assert_eq!(m.factor("cycleway"), 2.0);
        assert_eq!(m.factors.len(), 2);
    }

    #[test]
    fn csv_without_default_row_fails() {
        let csv = "category,factor\nfootway,1.0\n";
        let err = CostModel::from_csv_reader("csv", Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, NetworkError::MissingDefault(_)));
    }

    #[test]
    fn csv_with_bad_number_fails() {
        let csv = "category,factor\nfootway,cheap\ndefault,1.0\n";
        let err = CostModel::from_csv_reader("csv", Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, NetworkError::Parse(_)));
    }
}

// ── Graph builder ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use crate::{
        build_network, build_network_with_stats, CostModel, NetworkError, RawNetwork, RawNode,
        RawWay, WalkNetworkBuilder,
    };

    #[test]
    fn empty_build() {
        let net = WalkNetworkBuilder::new().build();
        assert_eq!(net.node_count(), 0);
        assert_eq!(net.edge_count(), 0);
        assert!(net.is_empty());
        assert!(matches!(net.ensure_usable(), Err(NetworkError::EmptyNetwork)));
    }

    #[test]
    fn degenerate_input_gives_empty_network() {
        let raw = RawNetwork::new(vec![RawNode::new(1, 0.0, 0.0)], vec![RawWay::new(9, vec![1])]);
        let net = build_network(&raw, &CostModel::preferred()).unwrap();
        assert!(net.is_empty());
        assert_eq!(net.node_count(), 0);
    }

    #[test]
    fn invalid_cost_model_is_rejected_before_building() {
        let mut model = CostModel::preferred();
        model.factors.clear();
        let result = build_network(&super::helpers::ell(), &model);
        assert!(matches!(result, Err(NetworkError::EmptyCostModel(_))));
    }

    #[test]
    fn segments_are_bidirectional() {
        let net = build_network(&super::helpers::ell(), &CostModel::preferred()).unwrap();
        assert_eq!(net.node_count(), 3);
        assert_eq!(net.edge_count(), 4);

        for e in 0..net.edge_count() as u32 {
            let fwd = net.segment(wr_core::EdgeId(e));
            let back = net
                .find_edge(fwd.to, fwd.from)
                .map(|r| net.segment(r))
                .expect("reverse edge must exist");
            assert_eq!(fwd.length_m, back.length_m);
            assert_eq!(fwd.cost, back.cost);
            assert_eq!(fwd.geometry[0], back.geometry[1]);
            assert_eq!(fwd.geometry[1], back.geometry[0]);
            assert_eq!(fwd.way_id, back.way_id);
        }
    }

    #[test]
    fn cost_is_length_times_factor() {
        let model = CostModel::preferred();
        let net = build_network(&super::helpers::ell(), &model).unwrap();
        for e in 0..net.edge_count() as u32 {
            let s = net.segment(wr_core::EdgeId(e));
            assert!((s.length_m - 100.0).abs() < 1e-6, "length {}", s.length_m);
            assert_eq!(s.cost, s.length_m * model.factor(s.category));
        }
        assert_eq!(net.min_cost_per_meter(), model.factor("footway"));
    }

    #[test]
    fn attribution_is_carried() {
        let net = build_network(&super::helpers::ell(), &CostModel::preferred()).unwrap();
        let a = net.node_by_source_id(1).unwrap();
        let b = net.node_by_source_id(2).unwrap();
        let s = net.segment(net.find_edge(a, b).unwrap());
        assert_eq!(s.way_id, 100);
        assert_eq!(s.way_name, Some("Canal Path"));
        assert_eq!(s.category, "footway");
        assert_eq!(s.geometry[0], (0.0, 0.0));
    }

    #[test]
    fn untagged_way_uses_default_factor() {
        let d = super::helpers::deg(50.0);
        let raw = RawNetwork::new(
            vec![RawNode::new(1, 0.0, 0.0), RawNode::new(2, 0.0, d)],
            vec![RawWay::new(5, vec![1, 2]).with_tag("ref", "FP12")],
        );
        let model = CostModel::new("t", [("footway", 1.0)], 4.0).unwrap();
        let (net, stats) = build_network_with_stats(&raw, &model).unwrap();
        let s = net.segment(wr_core::EdgeId(0));
        assert_eq!(s.category, crate::raw::UNTAGGED_CATEGORY);
        assert_eq!(s.way_name, Some("FP12"));
        assert_eq!(s.cost, s.length_m * 4.0);
        assert_eq!(stats.unknown_categories, 1);
    }

    #[test]
    fn zero_length_pairs_are_dropped() {
        let raw = RawNetwork::new(
            vec![
                RawNode::new(1, 0.0, 0.0),
                RawNode::new(2, 0.0, 0.0), // coincides with 1
                RawNode::new(3, 0.0, 0.001),
            ],
            vec![RawWay::new(7, vec![1, 1, 2, 3]).with_tag("highway", "path")],
        );
        let (net, stats) = build_network_with_stats(&raw, &CostModel::preferred()).unwrap();
        assert_eq!(stats.zero_length, 2);
        assert_eq!(stats.segments, 1);
        assert_eq!(net.edge_count(), 2);
        assert!(net.node_by_source_id(1).is_none(), "node 1 has no accepted segment");
    }

    #[test]
    fn missing_nodes_are_skipped_silently() {
        let raw = RawNetwork::new(
            vec![RawNode::new(1, 0.0, 0.0), RawNode::new(2, 0.0, 0.001)],
            vec![RawWay::new(7, vec![1, 2, 99]).with_tag("highway", "footway")],
        );
        let (net, stats) = build_network_with_stats(&raw, &CostModel::preferred()).unwrap();
        assert_eq!(stats.missing_node, 1);
        assert_eq!(net.edge_count(), 2);
    }

    #[test]
    fn rebuilding_is_idempotent() {
        let raw = super::helpers::ell();
        let model = CostModel::relaxed();
        let a = build_network(&raw, &model).unwrap();
        let b = build_network(&raw, &model).unwrap();
        assert_eq!(a.node_pos, b.node_pos);
        assert_eq!(a.node_source_id, b.node_source_id);
        assert_eq!(a.node_out_start, b.node_out_start);
        assert_eq!(a.edge_from, b.edge_from);
        assert_eq!(a.edge_to, b.edge_to);
        assert_eq!(a.edge_length_m, b.edge_length_m);
        assert_eq!(a.edge_cost, b.edge_cost);
        assert_eq!(a.ways, b.ways);
    }

    #[test]
    fn directed_only_edge() {
        use wr_core::GeoPoint;
        use crate::WayInfo;

        let mut b = WalkNetworkBuilder::new();
        let a = b.add_node(1, GeoPoint::new(0.0, 0.0));
        let c = b.add_node(2, GeoPoint::new(0.0, 0.001));
        let w = b.add_way(WayInfo { source_id: 1, name: None, category: "footway".into() });
        b.add_directed_edge(a, c, 111.0, 111.0, w);
        let net = b.build();
        assert_eq!(net.out_degree(a), 1);
        assert_eq!(net.out_degree(c), 0);
    }

    #[test]
    fn per_node_edges_keep_insertion_order() {
        use wr_core::GeoPoint;
        use crate::WayInfo;

        let mut b = WalkNetworkBuilder::new();
        let hub = b.add_node(0, GeoPoint::new(0.0, 0.0));
        let n1 = b.add_node(1, GeoPoint::new(0.001, 0.0));
        let n2 = b.add_node(2, GeoPoint::new(0.0, 0.001));
        let n3 = b.add_node(3, GeoPoint::new(-0.001, 0.0));
        let w = b.add_way(WayInfo { source_id: 1, name: None, category: "footway".into() });
        b.add_segment(hub, n2, 1.0, 1.0, w);
        b.add_segment(hub, n3, 1.0, 1.0, w);
        b.add_segment(hub, n1, 1.0, 1.0, w);
        let net = b.build();
        let order: Vec<_> = net.out_edges(hub).map(|e| net.edge_to[e.index()]).collect();
        assert_eq!(order, vec![n2, n3, n1]);
    }
}

// ── Nearest-node locator ──────────────────────────────────────────────────────

#[cfg(test)]
mod snap {
    use wr_core::GeoPoint;

    use crate::{build_network, CostModel, NetworkError, WalkNetworkBuilder, WayInfo};

    #[test]
    fn snap_exact_position() {
        let net = build_network(&super::helpers::ell(), &CostModel::preferred()).unwrap();
        let (node, dist) = net.nearest_node(GeoPoint::new(0.0, 0.0)).unwrap();
        assert_eq!(net.node_source_id[node.index()], 1);
        assert!(dist < 1e-9);
    }

    #[test]
    fn snap_nearest_reports_distance() {
        let net = build_network(&super::helpers::ell(), &CostModel::preferred()).unwrap();
        let d = super::helpers::deg(100.0);
        let (node, dist) = net.nearest_node(GeoPoint::new(0.0, d * 0.9)).unwrap();
        assert_eq!(net.node_source_id[node.index()], 2);
        assert!((dist - 10.0).abs() < 1e-3, "got {dist}");
    }

    #[test]
    fn empty_network_has_no_eligible_node() {
        let net = WalkNetworkBuilder::new().build();
        let err = net.nearest_node(GeoPoint::new(0.0, 0.0)).unwrap_err();
        assert!(matches!(err, NetworkError::NoEligibleNode(_)));
    }

    #[test]
    fn isolated_nodes_are_not_snap_targets() {
        let mut b = WalkNetworkBuilder::new();
        let isolated = b.add_node(1, GeoPoint::new(0.0, 0.0));
        let a = b.add_node(2, GeoPoint::new(0.01, 0.0));
        let c = b.add_node(3, GeoPoint::new(0.02, 0.0));
        let w = b.add_way(WayInfo { source_id: 1, name: None, category: "path".into() });
        b.add_segment(a, c, 1_112.0, 1_112.0, w);
        let net = b.build();

        let (node, _) = net.nearest_node(GeoPoint::new(0.0, 0.0)).unwrap();
        assert_ne!(node, isolated);
        assert_eq!(node, a);
        assert_eq!(net.k_nearest_nodes(GeoPoint::new(0.0, 0.0), 5), vec![a, c]);
    }

    #[test]
    fn snap_away_from_the_prime_meridian() {
        // At 50°N 100°E: one node 100 m north, eight nodes 110–124 m east
        // and west.  The northern node is nearest by great-circle distance.
        let q = GeoPoint::new(50.0, 100.0);
        let d_lon = |m: f64| super::helpers::deg(m) / q.lat.to_radians().cos();

        let mut b = WalkNetworkBuilder::new();
        let north = b.add_node(1, GeoPoint::new(q.lat + super::helpers::deg(100.0), q.lon));
        let w = b.add_way(WayInfo { source_id: 1, name: None, category: "path".into() });
        for i in 0..8 {
            let m = 110.0 + 2.0 * i as f64;
            let side = if i % 2 == 0 { 1.0 } else { -1.0 };
            let n = b.add_node(10 + i, GeoPoint::new(q.lat, q.lon + side * d_lon(m)));
            b.add_segment(north, n, 150.0, 150.0, w);
        }
        let net = b.build();

        let (node, dist) = net.nearest_node(q).unwrap();
        assert_eq!(node, north);
        assert!((dist - 100.0).abs() < 1e-3, "got {dist}");
        assert_eq!(net.k_nearest_nodes(q, 1), vec![north]);
        let runner_up = net.k_nearest_nodes(q, 9)[1];
        assert!((q.distance_m(net.pos(runner_up)) - 110.0).abs() < 1e-2);
    }

    #[test]
    fn snap_across_the_antimeridian() {
        let q = GeoPoint::new(10.0, 179.9995);
        let mut b = WalkNetworkBuilder::new();
        let across = b.add_node(1, GeoPoint::new(10.0, -179.9995));
        let same_side = b.add_node(2, GeoPoint::new(10.0, 179.998));
        let w = b.add_way(WayInfo { source_id: 1, name: None, category: "path".into() });
        b.add_segment(across, same_side, 275.0, 275.0, w);
        let net = b.build();

        let (node, dist) = net.nearest_node(q).unwrap();
        assert_eq!(node, across);
        assert!(dist < 120.0, "got {dist}");
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod props {
    use proptest::prelude::*;

    use crate::{build_network, CostModel, RawNetwork, RawNode, RawWay};

    const CATEGORIES: &[&str] = &["footway", "residential", "primary", "mystery"];

    fn raw_network() -> impl Strategy<Value = RawNetwork> {
        let nodes = prop::collection::vec((0i32..20, 0i32..20), 2..25);
        nodes.prop_flat_map(|coords| {
            let n = coords.len() as i64;
            let ways = prop::collection::vec(
                (prop::collection::vec(0..n, 2..6), 0..CATEGORIES.len()),
                1..10,
            );
            (Just(coords), ways)
        })
        .prop_map(|(coords, ways)| {
            let nodes = coords
                .iter()
                .enumerate()
                .map(|(i, &(y, x))| RawNode::new(i as i64, y as f64 * 1e-4, x as f64 * 1e-4))
                .collect();
            let ways = ways
                .into_iter()
                .enumerate()
                .map(|(i, (refs, c))| RawWay::new(i as i64, refs).with_tag("highway", CATEGORIES[c]))
                .collect();
            RawNetwork::new(nodes, ways)
        })
    }

    proptest! {
        #[test]
        fn every_edge_has_a_matching_reverse(raw in raw_network()) {
            let model = CostModel::preferred();
            let net = build_network(&raw, &model).unwrap();
            for e in 0..net.edge_count() {
                let (u, v) = (net.edge_from[e], net.edge_to[e]);
                let len = net.edge_length_m[e];
                let cost = net.edge_cost[e];
                prop_assert!(len > 0.0);
                prop_assert_eq!(cost, len * model.factor(net.segment(wr_core::EdgeId(e as u32)).category));
                let reversed = net.out_edges(v).any(|r| {
                    let r = r.index();
                    net.edge_to[r] == u && net.edge_length_m[r] == len && net.edge_cost[r] == cost
                });
                prop_assert!(reversed, "edge {} has no reverse", e);
            }
        }

        #[test]
        fn cost_is_monotonic_in_factor(len in 0.1f64..5_000.0, lo in 0.0f64..10.0, extra in 0.0f64..10.0) {
            let model = CostModel::new("m", [("a", lo), ("b", lo + extra)], 1.0).unwrap();
            prop_assert!(model.cost("a", len) <= model.cost("b", len));
        }
    }
}

// ── OSM way filter ────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "osm"))]
mod osm {
    use crate::osm::is_walkable;
    use crate::RawWay;

    fn way(tags: &[(&str, &str)]) -> RawWay {
        tags.iter().fold(RawWay::new(1, vec![1, 2]), |w, &(k, v)| w.with_tag(k, v))
    }

    #[test]
    fn pedestrian_categories_are_walkable() {
        for highway in ["footway", "steps", "residential", "primary_link"] {
            assert!(is_walkable(&way(&[("highway", highway)])), "{highway}");
        }
    }

    #[test]
    fn motor_roads_and_untagged_ways_are_not() {
        assert!(!is_walkable(&way(&[("highway", "motorway")])));
        assert!(!is_walkable(&way(&[("highway", "trunk")])));
        assert!(!is_walkable(&way(&[("name", "Railway")])));
    }

    #[test]
    fn access_tags() {
        assert!(!is_walkable(&way(&[("highway", "path"), ("foot", "no")])));
        assert!(!is_walkable(&way(&[("highway", "service"), ("access", "private")])));
        assert!(is_walkable(&way(&[("highway", "service"), ("access", "private"), ("foot", "yes")])));
        assert!(!is_walkable(&way(&[("highway", "pedestrian"), ("area", "yes")])));
    }
}
