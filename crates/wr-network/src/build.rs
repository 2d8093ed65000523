//! Graph builder: supplier data + cost model → [`WalkNetwork`].
//!
//! For every way with at least two member nodes, each consecutive node pair
//! whose members are both present becomes one walkable segment (two directed
//! edges).  Pairs with a missing member are skipped silently: real extracts
//! routinely clip ways at the bounding box.  Zero-length pairs (repeated or
//! coincident nodes) are dropped.
//!
//! Nodes and ways enter the network lazily, on their first accepted segment,
//! so every node in the result has at least one outgoing edge and node ids
//! follow first-use order.  The same input therefore always yields the same
//! graph.

use rustc_hash::FxHashMap;
use tracing::{debug, info};

use wr_core::{GeoPoint, NodeId, WayId};

use crate::cost::CostModel;
use crate::network::{WalkNetwork, WalkNetworkBuilder, WayInfo};
use crate::raw::RawNetwork;
use crate::NetworkResult;

/// Per-build counters, logged at `debug` level.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BuildStats {
    pub segments:           usize,
    pub missing_node:       usize,
    pub zero_length:        usize,
    pub short_ways:         usize,
    pub unknown_categories: usize,
}

/// Build the walk graph for one request.
///
/// # Errors
///
/// Only configuration errors: an empty or invalid `cost` model.  An input
/// that yields no edges produces an empty network; callers check it with
/// [`WalkNetwork::ensure_usable`].
pub fn build_network(raw: &RawNetwork, cost: &CostModel) -> NetworkResult<WalkNetwork> {
    build_network_with_stats(raw, cost).map(|(net, _)| net)
}

/// Like [`build_network`] but also returns the [`BuildStats`].
pub fn build_network_with_stats(
    raw:  &RawNetwork,
    cost: &CostModel,
) -> NetworkResult<(WalkNetwork, BuildStats)> {
    cost.validate()?;

    let positions: FxHashMap<i64, GeoPoint> = raw.nodes.iter().map(|n| (n.id, n.pos)).collect();

    let mut builder = WalkNetworkBuilder::with_capacity(raw.nodes.len(), raw.nodes.len() * 2);
    let mut dense: FxHashMap<i64, NodeId> = FxHashMap::default();
    let mut stats = BuildStats::default();

    for way in &raw.ways {
        if way.nodes.len() < 2 {
            stats.short_ways += 1;
            continue;
        }

        let category = way.category();
        let factor = cost.factor(category);
        let mut way_id: Option<WayId> = None;

        for pair in way.nodes.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let (Some(&pa), Some(&pb)) = (positions.get(&a), positions.get(&b)) else {
                stats.missing_node += 1;
                continue;
            };

            let length_m = pa.distance_m(pb);
            if !(length_m > 0.0) {
                stats.zero_length += 1;
                continue;
            }

            let wid = *way_id.get_or_insert_with(|| {
                if !cost.knows(category) {
                    stats.unknown_categories += 1;
                }
                builder.add_way(WayInfo {
                    source_id: way.id,
                    name:      way.display_name().map(str::to_owned),
                    category:  category.to_owned(),
                })
            });

            let from = *dense.entry(a).or_insert_with(|| builder.add_node(a, pa));
            let to   = *dense.entry(b).or_insert_with(|| builder.add_node(b, pb));

            builder.add_segment(from, to, length_m, length_m * factor, wid);
            stats.segments += 1;
        }
    }

    debug!(
        segments = stats.segments,
        missing_node = stats.missing_node,
        zero_length = stats.zero_length,
        short_ways = stats.short_ways,
        unknown_categories = stats.unknown_categories,
        "walk graph segments"
    );

    let network = builder.build();
    info!(
        model = %cost.name,
        nodes = network.node_count(),
        edges = network.edge_count(),
        ways = network.ways.len(),
        "built walk network"
    );

    Ok((network, stats))
}
