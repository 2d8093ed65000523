//! Request-level facade: snap, assemble, select.
//!
//! A [`Planner`] borrows one immutable [`WalkNetwork`] and can serve any
//! number of requests, concurrently if the caller wishes.  It never retries:
//! a thin pool or an empty result is reported in the [`WalkPlan`] and the
//! caller decides whether to rebuild the network with a more relaxed cost
//! model, widen the tolerance, or accept fewer routes.

use tracing::info;

use wr_core::{BearingCone, Bias, GeoPoint, NodeId, SearchConfig};
use wr_network::WalkNetwork;

use crate::assemble::{assemble, Destination};
use crate::astar::{PenalizedAStar, ReturnRouter};
use crate::diversity::select_diverse;
use crate::{Route, SearchError, SearchResult, SearchStatus};

// ── Request / response ────────────────────────────────────────────────────────

/// One walk request in coordinates, as produced by the coordinate resolver.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WalkRequest {
    pub start:        GeoPoint,
    /// End point for a point-to-point walk; `None` for a round trip.
    pub finish:       Option<GeoPoint>,
    /// Desired total walking distance in metres.
    pub distance_m:   f64,
    /// Compass bearing to favour (e.g. toward a landmark).  `None` spreads
    /// outward legs over the four quadrants.
    pub bearing_hint: Option<f64>,
}

impl WalkRequest {
    /// A round trip of `distance_m` from `start`.
    pub fn round_trip(start: GeoPoint, distance_m: f64) -> Self {
        Self { start, finish: None, distance_m, bearing_hint: None }
    }

    /// A walk from `start` to `finish` of about `distance_m`.
    pub fn point_to_point(start: GeoPoint, finish: GeoPoint, distance_m: f64) -> Self {
        Self { start, finish: Some(finish), distance_m, bearing_hint: None }
    }

    pub fn with_bearing(mut self, bearing_deg: f64) -> Self {
        self.bearing_hint = Some(bearing_deg);
        self
    }

    fn validate(&self) -> SearchResult<()> {
        for p in std::iter::once(self.start).chain(self.finish) {
            if !p.is_valid() {
                return Err(wr_core::CoreError::InvalidCoordinate(p).into());
            }
        }
        if !self.distance_m.is_finite() || self.distance_m <= 0.0 {
            return Err(SearchError::InvalidRequest(format!(
                "distance must be positive, got {}",
                self.distance_m
            )));
        }
        if let Some(b) = self.bearing_hint {
            if !b.is_finite() {
                return Err(SearchError::InvalidRequest(format!("bearing hint must be finite, got {b}")));
            }
        }
        Ok(())
    }
}

/// The routes offered for one request and how they were found.
#[derive(Debug, Clone)]
pub struct WalkPlan {
    /// Diverse routes, cheapest first.  May be empty or shorter than
    /// `max_routes`; neither is an error.
    pub routes:         Vec<Route>,
    pub start_node:     NodeId,
    /// Distance from the requested start to `start_node`, metres.
    pub start_snap_m:   f64,
    pub finish_node:    Option<NodeId>,
    pub finish_snap_m:  Option<f64>,
    pub bias:           Bias,
    pub outward_status: SearchStatus,
    /// Candidate pool size before diversity selection.
    pub candidates:     usize,
    /// Outward legs that had no viable return.
    pub unmatched_legs: usize,
}

// ── Planner ───────────────────────────────────────────────────────────────────

/// Plans walks over one network with one configuration.
pub struct Planner<'n, R: ReturnRouter = PenalizedAStar> {
    network: &'n WalkNetwork,
    config:  SearchConfig,
    router:  R,
}

impl<'n> Planner<'n, PenalizedAStar> {
    /// Planner with the default penalised A* return router.
    ///
    /// # Errors
    ///
    /// A configuration error for an invalid `config`,
    /// [`NetworkError::EmptyNetwork`](wr_network::NetworkError::EmptyNetwork)
    /// if the network has nothing to walk on.
    pub fn new(network: &'n WalkNetwork, config: SearchConfig) -> SearchResult<Self> {
        let router = PenalizedAStar::from_config(&config);
        Self::with_router(network, config, router)
    }
}

impl<'n, R: ReturnRouter> Planner<'n, R> {
    /// Planner with a custom return router.
    pub fn with_router(network: &'n WalkNetwork, config: SearchConfig, router: R) -> SearchResult<Self> {
        config.validate()?;
        network.ensure_usable()?;
        Ok(Self { network, config, router })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn network(&self) -> &'n WalkNetwork {
        self.network
    }

    /// Plan one request.
    pub fn plan(&self, request: &WalkRequest) -> SearchResult<WalkPlan> {
        request.validate()?;

        let (start_node, start_snap_m) = self.network.nearest_node(request.start)?;
        let finish = request
            .finish
            .map(|p| self.network.nearest_node(p))
            .transpose()?;

        let destination = match finish {
            Some((node, _)) if node != start_node => Destination::Node(node),
            _ => Destination::Loop,
        };
        let bias = match request.bearing_hint {
            Some(b) => Bias::Cone(BearingCone::new(b, self.config.cone_half_width_deg)),
            None => Bias::Quadrants,
        };

        let assembly = assemble(
            self.network,
            &self.router,
            start_node,
            destination,
            request.distance_m,
            bias,
            &self.config,
        )?;

        let routes = select_diverse(
            &assembly.candidates,
            self.config.max_routes,
            self.config.overlap_threshold,
        );

        info!(
            %start_node,
            distance_m = request.distance_m,
            candidates = assembly.candidates.len(),
            selected = routes.len(),
            outward = ?assembly.outward_status,
            "walk planned"
        );

        Ok(WalkPlan {
            routes,
            start_node,
            start_snap_m,
            finish_node: finish.map(|(n, _)| n),
            finish_snap_m: finish.map(|(_, d)| d),
            bias,
            outward_status: assembly.outward_status,
            candidates: assembly.candidates.len(),
            unmatched_legs: assembly.unmatched_legs + assembly.timed_out_legs,
        })
    }

    /// Plan several independent requests (e.g. one per candidate theme).
    /// Results are in request order; one failure does not affect the others.
    #[cfg(not(feature = "parallel"))]
    pub fn plan_many(&self, requests: &[WalkRequest]) -> SearchResult<Vec<SearchResult<WalkPlan>>> {
        Ok(requests.iter().map(|r| self.plan(r)).collect())
    }

    /// Plan several independent requests (e.g. one per candidate theme) on
    /// the rayon pool.  Results are in request order; one failure does not
    /// affect the others.
    ///
    /// # Errors
    ///
    /// [`SearchError::ThreadPool`] if a dedicated pool of
    /// `config.num_threads` workers cannot be created.
    #[cfg(feature = "parallel")]
    pub fn plan_many(&self, requests: &[WalkRequest]) -> SearchResult<Vec<SearchResult<WalkPlan>>> {
        use rayon::prelude::*;

        let run = || -> Vec<SearchResult<WalkPlan>> {
            requests.par_iter().map(|r| self.plan(r)).collect()
        };
        match self.config.num_threads {
            None => Ok(run()),
            Some(n) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| SearchError::ThreadPool(e.to_string()))?;
                Ok(pool.install(run))
            }
        }
    }
}
