//! Search configuration.
//!
//! Typically loaded from a JSON/TOML file by the application crate (enable
//! the `serde` feature) and handed to the planner.  Every field has a
//! documented default, so partial files are fine with `#[serde(default)]`.

use std::time::Duration;

use crate::{CoreError, CoreResult};

// ── SearchConfig ──────────────────────────────────────────────────────────────

/// Tunables shared by the outward search, the return search, and the
/// diversity selector.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// Half-width of the accepted length band as a fraction of the target.
    /// `0.2` accepts `[0.8 × target, 1.2 × target]`.
    pub tolerance: f64,

    /// Wall-clock budget for one search loop, in milliseconds.  Default:
    /// 60 000 (one minute).
    pub time_budget_ms: u64,

    /// Read the clock only every N loop iterations.  Default: 1 024.
    pub deadline_check_interval: u32,

    /// Optional hard cap on loop iterations, independent of the clock.
    /// Useful for reproducible tests.
    pub max_iterations: Option<u64>,

    /// Cost multiplier applied by the return search to edges already walked
    /// on the outward leg.  Default: 100.
    pub return_penalty: f64,

    /// Maximum fraction of a candidate's edges that may also appear in any
    /// already selected route.  Default: 0.30.
    pub overlap_threshold: f64,

    /// Maximum number of routes offered to the caller.  Default: 3.
    pub max_routes: usize,

    /// Half-width of the directed-search cone when a bearing hint is given.
    /// Default: 45°.
    pub cone_half_width_deg: f64,

    /// Worker thread count for the `parallel` feature.  `None` uses the
    /// global rayon pool.
    pub num_threads: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            tolerance:               0.2,
            time_budget_ms:          60_000,
            deadline_check_interval: 1_024,
            max_iterations:          None,
            return_penalty:          100.0,
            overlap_threshold:       0.30,
            max_routes:              3,
            cone_half_width_deg:     45.0,
            num_threads:             None,
        }
    }
}

impl SearchConfig {
    /// Wall-clock budget as a `Duration`.
    #[inline]
    pub fn time_budget(&self) -> Duration {
        Duration::from_millis(self.time_budget_ms)
    }

    /// Accepted `(min, max)` length for a given target in metres.
    #[inline]
    pub fn length_band(&self, target_m: f64) -> (f64, f64) {
        (target_m * (1.0 - self.tolerance), target_m * (1.0 + self.tolerance))
    }

    /// Reject values the searches cannot work with.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.tolerance.is_finite() || !(0.0..1.0).contains(&self.tolerance) {
            return Err(CoreError::Config(format!(
                "tolerance must be in [0, 1), got {}",
                self.tolerance
            )));
        }
        if self.deadline_check_interval == 0 {
            return Err(CoreError::Config(
                "deadline_check_interval must be at least 1".into(),
            ));
        }
        if !self.return_penalty.is_finite() || self.return_penalty < 1.0 {
            return Err(CoreError::Config(format!(
                "return_penalty must be a finite value >= 1, got {}",
                self.return_penalty
            )));
        }
        if !self.overlap_threshold.is_finite() || !(0.0..=1.0).contains(&self.overlap_threshold) {
            return Err(CoreError::Config(format!(
                "overlap_threshold must be in [0, 1], got {}",
                self.overlap_threshold
            )));
        }
        if self.max_routes == 0 {
            return Err(CoreError::Config("max_routes must be at least 1".into()));
        }
        if !self.cone_half_width_deg.is_finite()
            || !(0.0..=180.0).contains(&self.cone_half_width_deg)
        {
            return Err(CoreError::Config(format!(
                "cone_half_width_deg must be in [0, 180], got {}",
                self.cone_half_width_deg
            )));
        }
        if self.num_threads == Some(0) {
            return Err(CoreError::Config("num_threads must be at least 1".into()));
        }
        Ok(())
    }
}
