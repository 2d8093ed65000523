//! Greedy diverse-set selection by edge overlap.
//!
//! Candidates are taken cheapest first.  A candidate is rejected if more
//! than `threshold` of its edges (by unordered node pair) also appear in
//! *any* already selected route.  The cheapest candidate is always kept.
//! Candidates without edges are discarded.
//!
//! Greedy, not globally optimal: a cheap route can crowd out a pair of
//! slightly dearer routes that would together be more varied.

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::route::EdgeKey;
use crate::Route;

/// Fraction of `candidate`'s edges that also appear in `selected`.
/// `0.0` for an empty candidate.
pub fn overlap_fraction(candidate: &FxHashSet<EdgeKey>, selected: &FxHashSet<EdgeKey>) -> f64 {
    if candidate.is_empty() {
        return 0.0;
    }
    let shared = candidate.iter().filter(|k| selected.contains(k)).count();
    shared as f64 / candidate.len() as f64
}

/// Pick at most `max_routes` routes from `candidates` such that no selected
/// route shares more than `threshold` of its edges with an earlier pick.
///
/// The pool is ordered by ascending cost first (stable, so equal costs keep
/// their input order).
pub fn select_diverse(candidates: &[Route], max_routes: usize, threshold: f64) -> Vec<Route> {
    let mut ordered: Vec<&Route> = candidates.iter().collect();
    ordered.sort_by(|a, b| a.cost.total_cmp(&b.cost));

    let mut picked: Vec<(&Route, FxHashSet<EdgeKey>)> = Vec::with_capacity(max_routes);
    let mut rejected = 0usize;

    for route in ordered {
        if picked.len() >= max_routes {
            break;
        }
        let keys = route.edge_keys();
        if keys.is_empty() {
            continue;
        }
        let too_similar = picked
            .iter()
            .any(|(_, sel)| overlap_fraction(&keys, sel) > threshold);
        if too_similar {
            rejected += 1;
            continue;
        }
        picked.push((route, keys));
    }

    debug!(pool = candidates.len(), selected = picked.len(), rejected, threshold, "diverse selection");
    picked.into_iter().map(|(r, _)| r.clone()).collect()
}
