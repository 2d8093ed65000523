//! OSM PBF supplier, enabled with the `osm` Cargo feature.
//!
//! # Usage
//!
//! ```ignore
//! use std::path::Path;
//! use wr_network::{build_network, osm::load_from_pbf, CostModel};
//!
//! let raw = load_from_pbf(Path::new("camden.osm.pbf"))?;
//! let network = build_network(&raw, &CostModel::preferred())?;
//! ```
//!
//! # What is loaded
//!
//! Only pedestrian-usable `highway=*` ways (see [`is_walkable`]) and the
//! nodes they reference.  Category acceptability is decided here, on the
//! supplier side; the graph builder only prices what it is given.
//!
//! # Memory note
//!
//! All OSM node positions are buffered in a map for the single sequential
//! pass (ways reference nodes by id).  The map is filtered down to
//! walk-referenced nodes before returning.

use std::path::Path;

use osmpbf::{Element, ElementReader};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::info;

use wr_core::GeoPoint;

use crate::raw::{RawNetwork, RawNode, RawWay};
use crate::NetworkError;

/// Tags copied from OSM ways into [`RawWay::tags`].
const KEPT_TAGS: &[&str] = &["highway", "name", "ref", "foot", "access", "area"];

/// Load walkable ways and their nodes from an OSM PBF file.
///
/// # Errors
///
/// [`NetworkError::Osm`] if the file cannot be opened or parsed.
pub fn load_from_pbf(path: &Path) -> Result<RawNetwork, NetworkError> {
    load_from_pbf_with(path, is_walkable)
}

/// Like [`load_from_pbf`], keeping the ways accepted by `keep` instead of
/// [`is_walkable`].  `keep` sees only the tags in `KEPT_TAGS`.
pub fn load_from_pbf_with<F>(path: &Path, keep: F) -> Result<RawNetwork, NetworkError>
where
    F: Fn(&RawWay) -> bool,
{
    let reader = ElementReader::from_path(path).map_err(|e| NetworkError::Osm(e.to_string()))?;

    let mut all_nodes: FxHashMap<i64, GeoPoint> = FxHashMap::default();
    let mut ways: Vec<RawWay> = Vec::new();

    reader
        .for_each(|elem| match elem {
            Element::Node(n) => {
                all_nodes.insert(n.id(), GeoPoint::new(n.lat(), n.lon()));
            }
            Element::DenseNode(n) => {
                all_nodes.insert(n.id(), GeoPoint::new(n.lat(), n.lon()));
            }
            Element::Way(w) => {
                let tags: Vec<(String, String)> = w
                    .tags()
                    .filter(|(k, _)| KEPT_TAGS.contains(k))
                    .map(|(k, v)| (k.to_owned(), v.to_owned()))
                    .collect();
                let way = RawWay { id: w.id(), nodes: w.refs().collect(), tags };
                if keep(&way) {
                    ways.push(way);
                }
            }
            _ => {}
        })
        .map_err(|e| NetworkError::Osm(e.to_string()))?;

    let referenced: FxHashSet<i64> = ways.iter().flat_map(|w| w.nodes.iter().copied()).collect();
    let nodes: Vec<RawNode> = referenced
        .iter()
        .filter_map(|id| all_nodes.get(id).map(|&pos| RawNode { id: *id, pos }))
        .collect();

    info!(path = %path.display(), nodes = nodes.len(), ways = ways.len(), "loaded OSM walk extract");
    let mut raw = RawNetwork::new(nodes, ways);
    // FxHashSet iteration order is arbitrary; keep the snapshot reproducible.
    raw.nodes.sort_unstable_by_key(|n| n.id);
    Ok(raw)
}

/// `true` if a pedestrian may use this way.
///
/// Motorways and trunk roads are never walkable; otherwise an explicit
/// `foot=no` or `access=no|private` excludes the way, as do area outlines
/// (`area=yes`) whose perimeter is not a path.
pub fn is_walkable(way: &RawWay) -> bool {
    let Some(highway) = way.tag("highway") else {
        return false;
    };
    let category_ok = matches!(
        highway,
        "footway" | "path" | "pedestrian" | "steps" | "track" | "bridleway"
            | "cycleway" | "living_street" | "residential" | "service"
            | "unclassified" | "road"
            | "tertiary" | "tertiary_link"
            | "secondary" | "secondary_link"
            | "primary" | "primary_link"
    );
    if !category_ok {
        return false;
    }
    if way.tag("foot") == Some("no") {
        return false;
    }
    if matches!(way.tag("access"), Some("no" | "private")) && way.tag("foot").is_none() {
        return false;
    }
    way.tag("area") != Some("yes")
}
