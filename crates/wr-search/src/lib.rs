//! `wr-search`: walk route search over an immutable [`WalkNetwork`].
//!
//! # Crate layout
//!
//! | Module        | Contents                                                        |
//! |---------------|-----------------------------------------------------------------|
//! | [`route`]     | `Route` value, `EdgeKey` (unordered node pair)                  |
//! | [`budget`]    | `Budget`, `SearchStatus`: cooperative deadline and caps        |
//! | [`outward`]   | `explore_outward`: bounded DFS, best route per bearing bucket  |
//! | [`astar`]     | `ReturnRouter` trait, `PenalizedAStar`, `ReturnOutcome`         |
//! | [`assemble`]  | `assemble`, `round_trips`, `Destination`, `Assembly`            |
//! | [`diversity`] | `select_diverse`, `overlap_fraction`                            |
//! | [`planner`]   | `Planner`, `WalkRequest`, `WalkPlan`                            |
//! | [`error`]     | `SearchError`, `SearchResult<T>`                                |
//!
//! # Concurrency
//!
//! Every search allocates its own stack, frontier, and score vectors and
//! only reads the network, so any number of searches may share one
//! `&WalkNetwork` across threads.  The `parallel` feature uses this for the
//! return legs of an assembly and for [`Planner::plan_many`].
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | Runs return searches and `plan_many` on rayon.            |
//! | `serde`    | Derives `Serialize`/`Deserialize` on public value types.  |
//!
//! [`WalkNetwork`]: wr_network::WalkNetwork

pub mod assemble;
pub mod astar;
pub mod budget;
pub mod diversity;
pub mod error;
pub mod outward;
pub mod planner;
pub mod route;


pub use assemble::{assemble, round_trips, Assembly, Destination};
pub use astar::{astar, PenalizedAStar, ReturnOutcome, ReturnRouter};
pub use budget::{Budget, SearchStatus};
pub use diversity::{overlap_fraction, select_diverse};
pub use error::{SearchError, SearchResult};
pub use outward::{explore_outward, explore_outward_with_budget, OutwardOutcome};
pub use planner::{Planner, WalkPlan, WalkRequest};
pub use route::{EdgeKey, Route};
