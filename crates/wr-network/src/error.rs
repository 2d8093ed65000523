//! Network-subsystem error type.

use thiserror::Error;

use wr_core::{CoreError, GeoPoint, NodeId};

/// Errors produced by `wr-network`.
///
/// Cost-model variants are configuration errors; `EmptyNetwork`,
/// `NoEligibleNode` and `NodeNotFound` mean the data cannot support a search.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("cost model {0:?} has no category entries")]
    EmptyCostModel(String),

    #[error("cost model {model:?}: factor for {category:?} must be finite and non-negative, got {factor}")]
    InvalidCostFactor {
        model:    String,
        category: String,
        factor:   f64,
    },

    #[error("cost table {0:?} has no `default` row")]
    MissingDefault(String),

    #[error("no usable walk network in the requested area")]
    EmptyNetwork,

    #[error("no eligible network node near {0}")]
    NoEligibleNode(GeoPoint),

    #[error("node {0} not found in network")]
    NodeNotFound(NodeId),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("cost table parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "osm")]
    #[error("OSM parse error: {0}")]
    Osm(String),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
