//! Route assembly: outward legs joined to a return leg.
//!
//! For a round trip the outward target is half the requested total.  Each
//! outward leg is handed to the [`ReturnRouter`] from its end node back to
//! the start (or on to the finish node for a point-to-point walk), with the
//! leg itself as the route to avoid.  Legs without a return are dropped,
//! never retried.
//!
//! With the `parallel` feature the return searches run on the rayon pool;
//! candidate order is the outward leg order either way.

use tracing::debug;

use wr_core::{Bias, NodeId, SearchConfig};
use wr_network::{NetworkError, WalkNetwork};

use crate::astar::{ReturnOutcome, ReturnRouter};
use crate::outward::explore_outward;
use crate::{Route, SearchError, SearchResult, SearchStatus};

/// Where an assembled walk ends.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Destination {
    /// Back at the start node.
    Loop,
    /// At the given node.
    Node(NodeId),
}

/// Candidate pool from one assembly, plus how the searches went.
#[derive(Debug, Clone)]
pub struct Assembly {
    /// Complete walks, in outward-leg order (point-to-point: the direct
    /// shortest path first, when one exists).
    pub candidates:     Vec<Route>,
    /// How the outward search ended.
    pub outward_status: SearchStatus,
    /// Outward legs found.
    pub outward_legs:   usize,
    /// Legs dropped because the return search found no path.
    pub unmatched_legs: usize,
    /// Legs dropped because the return search ran out of budget.
    pub timed_out_legs: usize,
}

/// Assemble walk candidates of roughly `total_m` metres from `start`.
///
/// # Errors
///
/// [`SearchError::InvalidRequest`] for a non-positive or non-finite total,
/// [`NetworkError::NodeNotFound`] for node ids outside `network`.
pub fn assemble<R: ReturnRouter>(
    network:     &WalkNetwork,
    router:      &R,
    start:       NodeId,
    destination: Destination,
    total_m:     f64,
    bias:        Bias,
    config:      &SearchConfig,
) -> SearchResult<Assembly> {
    if !total_m.is_finite() || total_m <= 0.0 {
        return Err(SearchError::InvalidRequest(format!(
            "walk distance must be positive, got {total_m}"
        )));
    }
    let finish = match destination {
        Destination::Loop => start,
        Destination::Node(node) => {
            if !network.contains(node) {
                return Err(NetworkError::NodeNotFound(node).into());
            }
            node
        }
    };

    let mut candidates = Vec::new();
    if finish != start {
        if let Some(direct) = router.route(network, start, finish, None)?.into_route() {
            candidates.push(direct);
        }
    }

    let outward = explore_outward(network, start, total_m / 2.0, bias, config)?;
    let returns = return_legs(network, router, &outward.routes, finish)?;

    let mut unmatched_legs = 0;
    let mut timed_out_legs = 0;
    for (leg, back) in outward.routes.iter().zip(returns) {
        match back {
            ReturnOutcome::Found(back) => candidates.push(leg.join(&back)),
            ReturnOutcome::NoPath => unmatched_legs += 1,
            ReturnOutcome::TimedOut(_) => timed_out_legs += 1,
        }
    }

    debug!(
        %start,
        %finish,
        total_m,
        legs = outward.routes.len(),
        candidates = candidates.len(),
        unmatched_legs,
        timed_out_legs,
        "assembled walk candidates"
    );

    Ok(Assembly {
        candidates,
        outward_status: outward.status,
        outward_legs: outward.routes.len(),
        unmatched_legs,
        timed_out_legs,
    })
}

/// Round trips of roughly `total_m` metres starting and ending at `start`.
pub fn round_trips<R: ReturnRouter>(
    network: &WalkNetwork,
    router:  &R,
    start:   NodeId,
    total_m: f64,
    bias:    Bias,
    config:  &SearchConfig,
) -> SearchResult<Assembly> {
    assemble(network, router, start, Destination::Loop, total_m, bias, config)
}

#[cfg(not(feature = "parallel"))]
fn return_legs<R: ReturnRouter>(
    network: &WalkNetwork,
    router:  &R,
    legs:    &[Route],
    finish:  NodeId,
) -> SearchResult<Vec<ReturnOutcome>> {
    legs.iter()
        .map(|leg| router.route(network, leg.end(), finish, Some(leg)))
        .collect()
}

#[cfg(feature = "parallel")]
fn return_legs<R: ReturnRouter>(
    network: &WalkNetwork,
    router:  &R,
    legs:    &[Route],
    finish:  NodeId,
) -> SearchResult<Vec<ReturnOutcome>> {
    use rayon::prelude::*;

    legs.par_iter()
        .map(|leg| router.route(network, leg.end(), finish, Some(leg)))
        .collect()
}
