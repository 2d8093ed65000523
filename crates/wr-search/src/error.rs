use thiserror::Error;

use wr_core::CoreError;
use wr_network::NetworkError;

/// Errors produced by `wr-search`.
///
/// A search that runs out of budget or frontier is *not* an error; see
/// [`SearchStatus`](crate::SearchStatus) and
/// [`ReturnOutcome`](crate::ReturnOutcome).
#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("invalid walk request: {0}")]
    InvalidRequest(String),

    #[cfg(feature = "parallel")]
    #[error("thread pool error: {0}")]
    ThreadPool(String),
}

pub type SearchResult<T> = Result<T, SearchError>;
