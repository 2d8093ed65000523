//! Walk network representation and low-level builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given a `NodeId n`, its outgoing edges occupy the slice:
//!
//! ```text
//! edge_*[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! All edge arrays are sorted by source node (stable, so edges of one node
//! keep their insertion order) and indexed by `EdgeId`.  Searches hold only
//! `EdgeId`s and `NodeId`s; a [`Segment`] view with attribution and
//! geometry is materialised on demand.
//!
//! Way attribution (supplier id, name, category) is stored once per way in
//! `ways` and referenced from each edge by `WayId`.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) over *eligible* nodes (out-degree > 0) answers
//! nearest-node queries.  Points are stored as unit-sphere vectors
//! `[x, y, z]`: chord length grows monotonically with great-circle distance,
//! so the R-tree order is the haversine order at any latitude or longitude.
//! The reported distance is the haversine distance of the pick.

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use rustc_hash::FxHashMap;

use wr_core::{EdgeId, GeoPoint, NodeId, WayId};

use crate::{NetworkError, NetworkResult};

/// Chord-nearest candidates re-ranked by haversine in
/// [`WalkNetwork::nearest_node`], to settle floating-point near-ties.
const SNAP_CANDIDATES: usize = 8;

// ── R-tree node entry ─────────────────────────────────────────────────────────

#[derive(Clone)]
struct NodeEntry {
    point: [f64; 3],
    id:    NodeId,
}

/// Unit-sphere vector of `pos`.
#[inline]
fn project(pos: GeoPoint) -> [f64; 3] {
    let (lat, lon) = (pos.lat.to_radians(), pos.lon.to_radians());
    [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    /// Squared chord length.
    fn distance_2(&self, point: &[f64; 3]) -> f64 {
        self.point
            .iter()
            .zip(point)
            .map(|(a, b)| (a - b) * (a - b))
            .sum()
    }
}

// ── Way attribution ───────────────────────────────────────────────────────────

/// Source-way attribution shared by every edge cut from that way.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WayInfo {
    /// Supplier way id.
    pub source_id: i64,
    /// `name` (or `ref`) tag, if any.
    pub name:      Option<String>,
    /// Path category used for costing.
    pub category:  String,
}

// ── Segment view ──────────────────────────────────────────────────────────────

/// A fully attributed directed edge, borrowed from the network.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment<'a> {
    pub id:       EdgeId,
    pub from:     NodeId,
    pub to:       NodeId,
    pub length_m: f64,
    pub cost:     f64,
    /// `[(lon, lat) of from, (lon, lat) of to]`.
    pub geometry: [(f64, f64); 2],
    pub way_id:   i64,
    pub way_name: Option<&'a str>,
    pub category: &'a str,
}

// ── WalkNetwork ───────────────────────────────────────────────────────────────

/// Undirected walk graph (stored as paired directed edges) in CSR format,
/// plus a spatial index for snapping coordinates.
///
/// All arena fields are `pub` for direct indexed access on hot paths.  Do
/// not construct directly; use [`WalkNetworkBuilder`] or
/// [`build_network`](crate::build_network).
pub struct WalkNetwork {
    // ── Node data ─────────────────────────────────────────────────────────
    /// Geographic position of each node.  Indexed by `NodeId`.
    pub node_pos: Vec<GeoPoint>,

    /// Supplier id of each node.  Indexed by `NodeId`.
    pub node_source_id: Vec<i64>,

    // ── CSR edge adjacency ────────────────────────────────────────────────
    /// CSR row pointer.  Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    // ── Edge data (indexed by EdgeId) ─────────────────────────────────────
    pub edge_from:     Vec<NodeId>,
    pub edge_to:       Vec<NodeId>,
    /// Great-circle length in metres.
    pub edge_length_m: Vec<f64>,
    /// `length × cost factor` under the model the network was built with.
    pub edge_cost:     Vec<f64>,
    pub edge_way:      Vec<WayId>,

    // ── Way data (indexed by WayId) ───────────────────────────────────────
    pub ways: Vec<WayInfo>,

    min_cost_per_meter: f64,
    source_index:       FxHashMap<i64, NodeId>,
    spatial_idx:        RTree<NodeEntry>,
}

impl WalkNetwork {
    /// Construct an empty network with no nodes or edges.
    pub fn empty() -> Self {
        WalkNetworkBuilder::new().build()
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    /// `true` when there is nothing to walk on.
    pub fn is_empty(&self) -> bool {
        self.edge_to.is_empty()
    }

    /// Fail with [`NetworkError::EmptyNetwork`] if the network has no edges.
    pub fn ensure_usable(&self) -> NetworkResult<()> {
        if self.is_empty() {
            Err(NetworkError::EmptyNetwork)
        } else {
            Ok(())
        }
    }

    /// `true` if `node` is a valid index into this network.
    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.node_count()
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `EdgeId`s of all outgoing edges from `node`.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    #[inline]
    pub fn pos(&self, node: NodeId) -> GeoPoint {
        self.node_pos[node.index()]
    }

    /// Cheapest directed edge `from → to`, if the nodes are adjacent.
    pub fn find_edge(&self, from: NodeId, to: NodeId) -> Option<EdgeId> {
        self.out_edges(from)
            .filter(|e| self.edge_to[e.index()] == to)
            .min_by(|a, b| self.edge_cost[a.index()].total_cmp(&self.edge_cost[b.index()]))
    }

    /// Dense id of the node with supplier id `source_id`.
    pub fn node_by_source_id(&self, source_id: i64) -> Option<NodeId> {
        self.source_index.get(&source_id).copied()
    }

    /// Attributed view of one edge.
    pub fn segment(&self, edge: EdgeId) -> Segment<'_> {
        let i    = edge.index();
        let from = self.edge_from[i];
        let to   = self.edge_to[i];
        let way  = &self.ways[self.edge_way[i].index()];
        Segment {
            id:       edge,
            from,
            to,
            length_m: self.edge_length_m[i],
            cost:     self.edge_cost[i],
            geometry: [self.pos(from).lon_lat(), self.pos(to).lon_lat()],
            way_id:   way.source_id,
            way_name: way.name.as_deref(),
            category: &way.category,
        }
    }

    /// Smallest `cost / length` ratio over all edges (`1.0` when empty).
    ///
    /// Scaling a straight-line distance by this keeps an A* heuristic
    /// admissible under any cost model.
    #[inline]
    pub fn min_cost_per_meter(&self) -> f64 {
        self.min_cost_per_meter
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// Nearest eligible node to `pos` and its great-circle distance in
    /// metres.
    ///
    /// # Errors
    ///
    /// [`NetworkError::NoEligibleNode`] if no node has an outgoing edge.
    pub fn nearest_node(&self, pos: GeoPoint) -> NetworkResult<(NodeId, f64)> {
        self.spatial_idx
            .nearest_neighbor_iter(&project(pos))
            .take(SNAP_CANDIDATES)
            .map(|e| (e.id, pos.distance_m(self.pos(e.id))))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .ok_or(NetworkError::NoEligibleNode(pos))
    }

    /// Up to `k` eligible nodes nearest to `pos`, by ascending great-circle
    /// distance.
    pub fn k_nearest_nodes(&self, pos: GeoPoint, k: usize) -> Vec<NodeId> {
        self.spatial_idx
            .nearest_neighbor_iter(&project(pos))
            .take(k)
            .map(|e| e.id)
            .collect()
    }
}

// ── WalkNetworkBuilder ────────────────────────────────────────────────────────

/// Construct a [`WalkNetwork`] incrementally, then call [`build`](Self::build).
///
/// Most callers want [`build_network`](crate::build_network), which drives
/// this builder from supplier data and a cost model.
///
/// # Example
///
/// ```
/// use wr_core::GeoPoint;
/// use wr_network::{WalkNetworkBuilder, WayInfo};
///
/// let mut b = WalkNetworkBuilder::new();
/// let a = b.add_node(1, GeoPoint::new(51.500, -0.120));
/// let c = b.add_node(2, GeoPoint::new(51.501, -0.120));
/// let way = b.add_way(WayInfo { source_id: 10, name: None, category: "footway".into() });
/// b.add_segment(a, c, 111.2, 111.2, way);
/// let net = b.build();
/// assert_eq!(net.node_count(), 2);
/// assert_eq!(net.edge_count(), 2); // both directions
/// ```
pub struct WalkNetworkBuilder {
    nodes:      Vec<GeoPoint>,
    source_ids: Vec<i64>,
    ways:       Vec<WayInfo>,
    raw_edges:  Vec<RawEdge>,
}

struct RawEdge {
    from:     NodeId,
    to:       NodeId,
    length_m: f64,
    cost:     f64,
    way:      WayId,
}

impl WalkNetworkBuilder {
    pub fn new() -> Self {
        Self::with_capacity(0, 0)
    }

    /// Pre-allocate for the expected number of nodes and directed edges.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes:      Vec::with_capacity(nodes),
            source_ids: Vec::with_capacity(nodes),
            ways:       Vec::new(),
            raw_edges:  Vec::with_capacity(edges),
        }
    }

    /// Add a node and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self, source_id: i64, pos: GeoPoint) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(pos);
        self.source_ids.push(source_id);
        id
    }

    /// Register a way's attribution and return its `WayId`.
    pub fn add_way(&mut self, info: WayInfo) -> WayId {
        let id = WayId(self.ways.len() as u32);
        self.ways.push(info);
        id
    }

    /// Add a single **directed** edge.
    pub fn add_directed_edge(&mut self, from: NodeId, to: NodeId, length_m: f64, cost: f64, way: WayId) {
        self.raw_edges.push(RawEdge { from, to, length_m, cost, way });
    }

    /// Add both directions of a walkable segment.  Reverse geometry follows
    /// from the swapped endpoints.
    pub fn add_segment(&mut self, a: NodeId, b: NodeId, length_m: f64, cost: f64, way: WayId) {
        self.add_directed_edge(a, b, length_m, cost, way);
        self.add_directed_edge(b, a, length_m, cost, way);
    }

    /// Consume the builder and produce a [`WalkNetwork`].
    ///
    /// Time complexity: O(E log E) for the edge sort + O(N log N) for the
    /// R-tree bulk load.
    pub fn build(self) -> WalkNetwork {
        let node_count = self.nodes.len();
        let edge_count = self.raw_edges.len();

        // Stable: per-node edge order stays the insertion order.
        let mut raw = self.raw_edges;
        raw.sort_by_key(|e| e.from.0);

        let edge_from:     Vec<NodeId> = raw.iter().map(|e| e.from).collect();
        let edge_to:       Vec<NodeId> = raw.iter().map(|e| e.to).collect();
        let edge_length_m: Vec<f64>    = raw.iter().map(|e| e.length_m).collect();
        let edge_cost:     Vec<f64>    = raw.iter().map(|e| e.cost).collect();
        let edge_way:      Vec<WayId>  = raw.iter().map(|e| e.way).collect();

        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &raw {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, edge_count);

        let min_cost_per_meter = raw
            .iter()
            .filter(|e| e.length_m > 0.0)
            .map(|e| e.cost / e.length_m)
            .fold(None, |acc: Option<f64>, r| Some(acc.map_or(r, |m| m.min(r))))
            .unwrap_or(1.0);

        // Only nodes that can start a search are snap targets.
        let entries: Vec<NodeEntry> = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(i, _)| node_out_start[i + 1] > node_out_start[*i])
            .map(|(i, &pos)| NodeEntry { point: project(pos), id: NodeId(i as u32) })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        let source_index = self
            .source_ids
            .iter()
            .enumerate()
            .map(|(i, &sid)| (sid, NodeId(i as u32)))
            .collect();

        WalkNetwork {
            node_pos: self.nodes,
            node_source_id: self.source_ids,
            node_out_start,
            edge_from,
            edge_to,
            edge_length_m,
            edge_cost,
            edge_way,
            ways: self.ways,
            min_cost_per_meter,
            source_index,
            spatial_idx,
        }
    }
}

impl Default for WalkNetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
