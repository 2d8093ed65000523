//! The `Route` value and direction-independent edge identity.

use rustc_hash::FxHashSet;

use wr_core::{EdgeId, NodeId};
use wr_network::WalkNetwork;

// ── EdgeKey ───────────────────────────────────────────────────────────────────

/// Unordered node pair identifying a walked segment regardless of direction.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct EdgeKey(NodeId, NodeId);

impl EdgeKey {
    #[inline]
    pub fn new(a: NodeId, b: NodeId) -> Self {
        if a <= b { EdgeKey(a, b) } else { EdgeKey(b, a) }
    }

    #[inline]
    pub fn nodes(self) -> (NodeId, NodeId) {
        (self.0, self.1)
    }
}

// ── Route ─────────────────────────────────────────────────────────────────────

/// An ordered walk through the network.
///
/// `nodes` has one more entry than `edges`; `length_m` and `cost` are the
/// sums over `edges` using the network's actual (never penalised) costs.
/// Routes are values: searches create them, nothing mutates them afterwards.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    pub nodes:    Vec<NodeId>,
    pub edges:    Vec<EdgeId>,
    pub length_m: f64,
    pub cost:     f64,
}

impl Route {
    /// The zero-length route standing at `node`.
    pub fn empty(node: NodeId) -> Self {
        Self { nodes: vec![node], edges: Vec::new(), length_m: 0.0, cost: 0.0 }
    }

    /// Build a route from `start` along `edges`, summing actual metrics.
    pub fn from_edges(network: &WalkNetwork, start: NodeId, edges: Vec<EdgeId>) -> Self {
        let mut nodes = Vec::with_capacity(edges.len() + 1);
        nodes.push(start);
        let mut length_m = 0.0;
        let mut cost = 0.0;
        for &e in &edges {
            debug_assert_eq!(network.edge_from[e.index()], *nodes.last().unwrap_or(&start));
            nodes.push(network.edge_to[e.index()]);
            length_m += network.edge_length_m[e.index()];
            cost += network.edge_cost[e.index()];
        }
        Self { nodes, edges, length_m, cost }
    }

    #[inline]
    pub fn start(&self) -> NodeId {
        self.nodes.first().copied().unwrap_or(NodeId::INVALID)
    }

    #[inline]
    pub fn end(&self) -> NodeId {
        self.nodes.last().copied().unwrap_or(NodeId::INVALID)
    }

    /// `true` if the route has no edges.
    pub fn is_trivial(&self) -> bool {
        self.edges.is_empty()
    }

    /// Concatenate `self` and `next`, which must start where `self` ends.
    /// The shared junction node appears once.
    pub fn join(&self, next: &Route) -> Route {
        debug_assert_eq!(self.end(), next.start(), "routes must meet at a junction");
        let mut nodes = Vec::with_capacity(self.nodes.len() + next.nodes.len().saturating_sub(1));
        nodes.extend_from_slice(&self.nodes);
        nodes.extend(next.nodes.iter().skip(1).copied());

        let mut edges = Vec::with_capacity(self.edges.len() + next.edges.len());
        edges.extend_from_slice(&self.edges);
        edges.extend_from_slice(&next.edges);

        Route {
            nodes,
            edges,
            length_m: self.length_m + next.length_m,
            cost:     self.cost + next.cost,
        }
    }

    /// Direction-independent identities of every walked segment.
    pub fn edge_keys(&self) -> FxHashSet<EdgeKey> {
        self.nodes.windows(2).map(|w| EdgeKey::new(w[0], w[1])).collect()
    }

    /// `(lon, lat)` polyline through every node, for renderers.
    pub fn geometry(&self, network: &WalkNetwork) -> Vec<(f64, f64)> {
        self.nodes.iter().map(|&n| network.pos(n).lon_lat()).collect()
    }

    /// Street names in walking order, with consecutive repeats collapsed.
    /// Unnamed segments are skipped.
    pub fn way_names<'n>(&self, network: &'n WalkNetwork) -> Vec<&'n str> {
        let mut names: Vec<&str> = Vec::new();
        for &e in &self.edges {
            let way = &network.ways[network.edge_way[e.index()].index()];
            if let Some(name) = way.name.as_deref() {
                if names.last() != Some(&name) {
                    names.push(name);
                }
            }
        }
        names
    }
}
