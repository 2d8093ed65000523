//! Cooperative exploration budget.
//!
//! Both search loops call [`Budget::tick`] once per iteration.  The clock is
//! read only every `check_interval` iterations; the optional iteration cap
//! is checked every time (it is just a comparison).

use std::time::{Duration, Instant};

use wr_core::SearchConfig;

/// How a search loop ended.  None of these are errors.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchStatus {
    /// The frontier/stack emptied: the result is complete.
    Exhausted,
    /// The wall-clock deadline passed; the result is best-effort.
    DeadlineReached,
    /// The configured iteration cap was hit; the result is best-effort.
    IterationCapReached,
}

impl SearchStatus {
    /// `true` if the search ran to completion.
    #[inline]
    pub fn is_complete(self) -> bool {
        self == SearchStatus::Exhausted
    }
}

/// Deadline + iteration counter owned by one search invocation.
#[derive(Debug, Clone)]
pub struct Budget {
    deadline:       Option<Instant>,
    check_interval: u32,
    max_iterations: Option<u64>,
    iterations:     u64,
}

impl Budget {
    pub fn new(time_budget: Duration, check_interval: u32, max_iterations: Option<u64>) -> Self {
        Self {
            // An absurdly large budget overflows `Instant`; treat it as none.
            deadline: Instant::now().checked_add(time_budget),
            check_interval: check_interval.max(1),
            max_iterations,
            iterations: 0,
        }
    }

    /// Budget starting now, sized from `config`.
    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.time_budget(), config.deadline_check_interval, config.max_iterations)
    }

    /// No deadline, no cap.
    pub fn unlimited() -> Self {
        Self { deadline: None, check_interval: u32::MAX, max_iterations: None, iterations: 0 }
    }

    /// Count one iteration.  Returns the stop reason once the budget is
    /// spent, `None` while the loop may continue.
    #[inline]
    pub fn tick(&mut self) -> Option<SearchStatus> {
        self.iterations += 1;
        if let Some(cap) = self.max_iterations {
            if self.iterations > cap {
                return Some(SearchStatus::IterationCapReached);
            }
        }
        if self.iterations % u64::from(self.check_interval) == 0 {
            if let Some(deadline) = self.deadline {
                if Instant::now() >= deadline {
                    return Some(SearchStatus::DeadlineReached);
                }
            }
        }
        None
    }

    /// Iterations counted so far (including the one that exhausted the
    /// budget, if any).
    #[inline]
    pub fn iterations(&self) -> u64 {
        self.iterations
    }
}
