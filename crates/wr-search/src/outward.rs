//! Outward search: bounded depth-first exploration of simple paths.
//!
//! # Algorithm
//!
//! An explicit stack of frames, each carrying the path so far, its
//! cumulative length and cost.  On pop:
//!
//! 1. If the length is inside the tolerance band, the end node's bearing
//!    from the start picks a bucket (see [`Bias`]); the frame replaces that
//!    bucket's incumbent only on a **strict** cost improvement.
//! 2. Children are pushed in neighbour order, one per neighbour not already
//!    on this branch whose extended length stays within the upper bound.
//!    A child beyond the bound would be popped and discarded unexpanded, so
//!    it is never pushed.
//!
//! Once every bucket holds an incumbent, a frame whose cost is already at or
//! above the dearest incumbent is not expanded: costs never decrease along a
//! path, so none of its descendants could win a bucket.
//!
//! # Per-branch visited set
//!
//! A frame's path is a persistent cons-list ([`Trail`]) shared with its
//! ancestors through `Rc`.  Membership is a walk up the list, so the set of
//! nodes visited *on this branch* is immutable per frame and sibling
//! branches never see each other's nodes.  A trail is freed as soon as the
//! last frame referencing it is popped.
//!
//! Only the single best route per bucket is kept.

use std::rc::Rc;

use tracing::{debug, warn};

use wr_core::{Bias, EdgeId, NodeId, SearchConfig};
use wr_network::{NetworkError, WalkNetwork};

use crate::{Budget, Route, SearchError, SearchResult, SearchStatus};

// ── Persistent path ───────────────────────────────────────────────────────────

/// One step of a path, linked to the step before it.
struct Trail {
    node:   NodeId,
    /// Edge that reached `node`; `EdgeId::INVALID` at the start.
    edge:   EdgeId,
    parent: Option<Rc<Trail>>,
}

impl Trail {
    fn root(node: NodeId) -> Rc<Trail> {
        Rc::new(Trail { node, edge: EdgeId::INVALID, parent: None })
    }

    fn contains(&self, node: NodeId) -> bool {
        let mut cur = Some(self);
        while let Some(t) = cur {
            if t.node == node {
                return true;
            }
            cur = t.parent.as_deref();
        }
        false
    }

    fn edges(&self) -> Vec<EdgeId> {
        let mut edges = Vec::new();
        let mut cur = Some(self);
        while let Some(t) = cur {
            if t.edge.is_valid() {
                edges.push(t.edge);
            }
            cur = t.parent.as_deref();
        }
        edges.reverse();
        edges
    }
}

struct Frame {
    trail:    Rc<Trail>,
    length_m: f64,
    cost:     f64,
}

// ── Outcome ───────────────────────────────────────────────────────────────────

/// Result of one outward search.
#[derive(Debug, Clone)]
pub struct OutwardOutcome {
    /// Best route per bucket, ascending by cost.  At most
    /// `bias.bucket_count()` entries; possibly none.
    pub routes:     Vec<Route>,
    pub status:     SearchStatus,
    pub iterations: u64,
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Explore simple paths from `start` and keep, per bearing bucket, the
/// cheapest one whose length lies in `config.length_band(target_m)`.
///
/// The budget starts when this function is called.
///
/// # Errors
///
/// [`SearchError::InvalidRequest`] for a non-positive or non-finite target,
/// [`NetworkError::NodeNotFound`] if `start` is not in `network`.
pub fn explore_outward(
    network:  &WalkNetwork,
    start:    NodeId,
    target_m: f64,
    bias:     Bias,
    config:   &SearchConfig,
) -> SearchResult<OutwardOutcome> {
    let budget = Budget::from_config(config);
    explore_outward_with_budget(network, start, target_m, bias, config, budget)
}

/// Like [`explore_outward`] with a caller-supplied [`Budget`].
pub fn explore_outward_with_budget(
    network:    &WalkNetwork,
    start:      NodeId,
    target_m:   f64,
    bias:       Bias,
    config:     &SearchConfig,
    mut budget: Budget,
) -> SearchResult<OutwardOutcome> {
    if !target_m.is_finite() || target_m <= 0.0 {
        return Err(SearchError::InvalidRequest(format!(
            "target distance must be positive, got {target_m}"
        )));
    }
    if !network.contains(start) {
        return Err(NetworkError::NodeNotFound(start).into());
    }

    if network.out_degree(start) == 0 {
        return Ok(OutwardOutcome { routes: Vec::new(), status: SearchStatus::Exhausted, iterations: 0 });
    }

    let (min_len, max_len) = config.length_band(target_m);
    let origin = network.pos(start);

    let mut best: Vec<Option<(f64, Rc<Trail>, f64)>> = vec![None; bias.bucket_count()];
    // Cost of the dearest incumbent once every bucket is filled.
    let mut ceiling = f64::INFINITY;

    let mut stack = vec![Frame { trail: Trail::root(start), length_m: 0.0, cost: 0.0 }];

    let status = loop {
        let Some(frame) = stack.pop() else {
            break SearchStatus::Exhausted;
        };
        if let Some(stop) = budget.tick() {
            break stop;
        }

        let node = frame.trail.node;

        if frame.length_m >= min_len {
            let bearing = origin.bearing_to(network.pos(node));
            if let Some(bucket) = bias.bucket_of(bearing) {
                let improves = best[bucket]
                    .as_ref()
                    .is_none_or(|(cost, _, _)| frame.cost < *cost);
                if improves {
                    best[bucket] = Some((frame.cost, Rc::clone(&frame.trail), frame.length_m));
                    ceiling = dearest_incumbent(&best);
                }
            }
        }

        if frame.cost >= ceiling {
            continue;
        }

        for edge in network.out_edges(node) {
            let next = network.edge_to[edge.index()];
            if frame.trail.contains(next) {
                continue;
            }
            let length_m = frame.length_m + network.edge_length_m[edge.index()];
            if length_m > max_len {
                continue;
            }
            stack.push(Frame {
                trail: Rc::new(Trail { node: next, edge, parent: Some(Rc::clone(&frame.trail)) }),
                length_m,
                cost: frame.cost + network.edge_cost[edge.index()],
            });
        }
    };

    let mut routes: Vec<Route> = best
        .into_iter()
        .flatten()
        .map(|(cost, trail, length_m)| {
            let edges = trail.edges();
            let mut nodes = Vec::with_capacity(edges.len() + 1);
            nodes.push(start);
            nodes.extend(edges.iter().map(|e| network.edge_to[e.index()]));
            Route { nodes, edges, length_m, cost }
        })
        .collect();
    routes.sort_by(|a, b| a.cost.total_cmp(&b.cost));

    let iterations = budget.iterations();
    if status.is_complete() {
        debug!(%start, target_m, iterations, found = routes.len(), "outward search exhausted");
    } else {
        warn!(%start, target_m, iterations, found = routes.len(), ?status, "outward search stopped early");
    }

    Ok(OutwardOutcome { routes, status, iterations })
}

fn dearest_incumbent(best: &[Option<(f64, Rc<Trail>, f64)>]) -> f64 {
    best.iter()
        .try_fold(f64::NEG_INFINITY, |acc, slot| slot.as_ref().map(|(c, _, _)| acc.max(*c)))
        .unwrap_or(f64::INFINITY)
}
