//! Return search: A* with an outward-edge penalty.
//!
//! # Pluggability
//!
//! The assembler calls return routing through the [`ReturnRouter`] trait so
//! applications can substitute another algorithm (e.g. one that also
//! penalises busy roads at night) without touching assembly or selection.
//! [`PenalizedAStar`] is the default.
//!
//! # Scoring
//!
//! The search scores an edge by its actual cost, multiplied by `penalty`
//! when its unordered node pair appears on the supplied outward route.  The
//! returned [`Route`] is rebuilt from the actual (unpenalised) edge costs.
//!
//! The heuristic is the great-circle distance to the goal scaled by
//! `min(1, network.min_cost_per_meter())`, which never overestimates.
//! Entries with equal f-score leave the frontier in insertion order.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use rustc_hash::FxHashSet;
use tracing::{debug, warn};

use wr_core::{EdgeId, NodeId, SearchConfig};
use wr_network::{NetworkError, WalkNetwork};

use crate::route::EdgeKey;
use crate::{Budget, Route, SearchResult, SearchStatus};

// ── ReturnOutcome ─────────────────────────────────────────────────────────────

/// Result of one return search.  Only `Found` carries a route; callers treat
/// `NoPath` and `TimedOut` alike and move on to another outward leg.
#[derive(Debug, Clone, PartialEq)]
pub enum ReturnOutcome {
    Found(Route),
    /// The frontier emptied without reaching the goal.
    NoPath,
    /// The budget ran out first.
    TimedOut(SearchStatus),
}

impl ReturnOutcome {
    pub fn into_route(self) -> Option<Route> {
        match self {
            ReturnOutcome::Found(route) => Some(route),
            _ => None,
        }
    }
}

// ── ReturnRouter trait ────────────────────────────────────────────────────────

/// Pluggable least-cost routing between two nodes.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so one router can serve several
/// searches on rayon worker threads.  All per-search state lives inside
/// `route`.
pub trait ReturnRouter: Send + Sync {
    /// Cheapest route `from → to`, discouraged from reusing the edges of
    /// `avoid`.  `None` (or an empty route) means plain shortest path.
    ///
    /// # Errors
    ///
    /// Only [`NetworkError::NodeNotFound`] for ids outside the network.
    fn route(
        &self,
        network: &WalkNetwork,
        from:    NodeId,
        to:      NodeId,
        avoid:   Option<&Route>,
    ) -> SearchResult<ReturnOutcome>;
}

// ── PenalizedAStar ────────────────────────────────────────────────────────────

/// A* over the walk network with a retrace penalty.
#[derive(Debug, Clone)]
pub struct PenalizedAStar {
    /// Multiplier for edges on the outward route (`>= 1`).
    pub penalty: f64,
    config:      SearchConfig,
}

impl PenalizedAStar {
    /// Router using `config.return_penalty` and the config's budget.
    pub fn from_config(config: &SearchConfig) -> Self {
        Self { penalty: config.return_penalty, config: config.clone() }
    }

    /// Plain shortest path: no penalty regardless of `avoid`.
    pub fn unpenalized(config: &SearchConfig) -> Self {
        Self { penalty: 1.0, config: config.clone() }
    }
}

impl Default for PenalizedAStar {
    fn default() -> Self {
        Self::from_config(&SearchConfig::default())
    }
}

impl ReturnRouter for PenalizedAStar {
    fn route(
        &self,
        network: &WalkNetwork,
        from:    NodeId,
        to:      NodeId,
        avoid:   Option<&Route>,
    ) -> SearchResult<ReturnOutcome> {
        for node in [from, to] {
            if !network.contains(node) {
                return Err(NetworkError::NodeNotFound(node).into());
            }
        }
        let penalized = avoid.map(Route::edge_keys).unwrap_or_default();
        Ok(astar(network, from, to, &penalized, self.penalty, Budget::from_config(&self.config)))
    }
}

// ── A* internals ──────────────────────────────────────────────────────────────

/// Frontier entry.  Ordered so `BinaryHeap` pops the lowest f-score first
/// and, among equal f-scores, the earliest pushed.
#[derive(Debug)]
struct Open {
    f:    f64,
    g:    f64,
    seq:  u64,
    node: NodeId,
}

impl PartialEq for Open {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Open {}

impl PartialOrd for Open {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Open {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Core A* loop, usable without a router.
///
/// `penalized` holds the unordered node pairs whose edges cost `penalty`
/// times their actual cost.
pub fn astar(
    network:    &WalkNetwork,
    from:       NodeId,
    to:         NodeId,
    penalized:  &FxHashSet<EdgeKey>,
    penalty:    f64,
    mut budget: Budget,
) -> ReturnOutcome {
    if from == to {
        return ReturnOutcome::Found(Route::empty(from));
    }

    let n = network.node_count();
    let goal = network.pos(to);
    let h_scale = network.min_cost_per_meter().min(1.0);
    let heuristic = |node: NodeId| network.pos(node).distance_m(goal) * h_scale;

    // g[v] = best known penalised cost to reach v.
    let mut g = vec![f64::INFINITY; n];
    // prev_edge[v] = edge that reached v; INVALID for unreached nodes.
    let mut prev_edge = vec![EdgeId::INVALID; n];

    let mut seq = 0u64;
    let mut heap = BinaryHeap::new();
    g[from.index()] = 0.0;
    heap.push(Open { f: heuristic(from), g: 0.0, seq, node: from });

    let outcome = loop {
        let Some(Open { g: g_node, node, .. }) = heap.pop() else {
            break ReturnOutcome::NoPath;
        };
        if let Some(stop) = budget.tick() {
            break ReturnOutcome::TimedOut(stop);
        }
        if node == to {
            break ReturnOutcome::Found(reconstruct(network, &prev_edge, from, to));
        }
        // Stale entry: a cheaper route to `node` was pushed after this one.
        if g_node > g[node.index()] {
            continue;
        }

        for edge in network.out_edges(node) {
            let next = network.edge_to[edge.index()];
            let mut step = network.edge_cost[edge.index()];
            if !penalized.is_empty() && penalized.contains(&EdgeKey::new(node, next)) {
                step *= penalty;
            }
            let tentative = g_node + step;
            if tentative < g[next.index()] {
                g[next.index()] = tentative;
                prev_edge[next.index()] = edge;
                seq += 1;
                heap.push(Open { f: tentative + heuristic(next), g: tentative, seq, node: next });
            }
        }
    };

    match &outcome {
        ReturnOutcome::Found(route) => debug!(
            %from, %to, iterations = budget.iterations(), length_m = route.length_m, "return path found"
        ),
        ReturnOutcome::NoPath => debug!(%from, %to, iterations = budget.iterations(), "no return path"),
        ReturnOutcome::TimedOut(status) => warn!(
            %from, %to, iterations = budget.iterations(), ?status, "return search stopped early"
        ),
    }
    outcome
}

fn reconstruct(network: &WalkNetwork, prev_edge: &[EdgeId], from: NodeId, to: NodeId) -> Route {
    let mut edges = Vec::new();
    let mut cur = to;
    while cur != from {
        let e = prev_edge[cur.index()];
        debug_assert!(e.is_valid(), "goal popped without a predecessor chain");
        if !e.is_valid() {
            break;
        }
        edges.push(e);
        cur = network.edge_from[e.index()];
    }
    edges.reverse();
    Route::from_edges(network, from, edges)
}
