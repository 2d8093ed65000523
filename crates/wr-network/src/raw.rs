//! Raw network data as delivered by a network-data supplier.
//!
//! Suppliers (an Overpass client, the optional PBF loader in [`crate::osm`],
//! a test fixture) hand over point features and way features restricted to
//! pedestrian-usable categories.  Ids are the supplier's own 64-bit ids;
//! the graph builder maps them onto dense [`NodeId`](wr_core::NodeId)s.

use wr_core::GeoPoint;

/// Category recorded for ways that carry no `highway` tag.
pub const UNTAGGED_CATEGORY: &str = "untagged";

/// A point feature.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawNode {
    pub id:  i64,
    pub pos: GeoPoint,
}

impl RawNode {
    pub fn new(id: i64, lat: f64, lon: f64) -> Self {
        Self { id, pos: GeoPoint::new(lat, lon) }
    }
}

/// A way feature: an ordered list of member node ids plus its tags.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawWay {
    pub id:    i64,
    pub nodes: Vec<i64>,
    pub tags:  Vec<(String, String)>,
}

impl RawWay {
    pub fn new(id: i64, nodes: Vec<i64>) -> Self {
        Self { id, nodes, tags: Vec::new() }
    }

    /// Builder-style tag insertion.
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.push((key.into(), value.into()));
        self
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Path category (`highway` tag), or [`UNTAGGED_CATEGORY`].
    pub fn category(&self) -> &str {
        self.tag("highway").unwrap_or(UNTAGGED_CATEGORY)
    }

    /// Human-facing name: `name`, falling back to `ref`.
    pub fn display_name(&self) -> Option<&str> {
        self.tag("name").or_else(|| self.tag("ref"))
    }
}

/// One supplier snapshot.  Assumed immutable for the duration of a request.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawNetwork {
    pub nodes: Vec<RawNode>,
    pub ways:  Vec<RawWay>,
}

impl RawNetwork {
    pub fn new(nodes: Vec<RawNode>, ways: Vec<RawWay>) -> Self {
        Self { nodes, ways }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() || self.ways.is_empty()
    }
}
