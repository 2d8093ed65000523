//! Per-category cost models.
//!
//! A [`CostModel`] maps a path category (the OSM `highway` value) to a
//! per-metre cost multiplier.  Edge cost is always
//! `length_m × model.factor(category)`; categories the model does not list
//! fall back to its `default_factor`.
//!
//! # Presets
//!
//! | Preset        | Intent                                                  |
//! |---------------|---------------------------------------------------------|
//! | `preferred()` | Strongly favour footpaths; busy roads cost up to 8×.    |
//! | `relaxed()`   | Narrow spread for sparse areas where roads are needed.  |
//!
//! # CSV format
//!
//! ```csv
//! category,factor
//! footway,1.0
//! residential,1.4
//! default,2.0
//! ```
//!
//! The `default` row is mandatory.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::{NetworkError, NetworkResult};

/// Category name of the mandatory fallback row in CSV cost tables.
pub const DEFAULT_CATEGORY: &str = "default";

// ── CostModel ─────────────────────────────────────────────────────────────────

/// Category → cost multiplier table with a fallback default.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CostModel {
    pub name:           String,
    pub factors:        BTreeMap<String, f64>,
    pub default_factor: f64,
}

impl CostModel {
    /// Build and validate a model.
    ///
    /// # Errors
    ///
    /// [`NetworkError::EmptyCostModel`] if `factors` is empty,
    /// [`NetworkError::InvalidCostFactor`] for negative or non-finite factors.
    pub fn new<I, S>(name: impl Into<String>, factors: I, default_factor: f64) -> NetworkResult<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let model = Self {
            name:    name.into(),
            factors: factors.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            default_factor,
        };
        model.validate()?;
        Ok(model)
    }

    /// Footpath-first preset.  Road-like categories are penalised heavily.
    pub fn preferred() -> Self {
        Self::preset("preferred", &[
            ("footway",        1.0),
            ("path",           1.0),
            ("pedestrian",     1.0),
            ("track",          1.1),
            ("bridleway",      1.1),
            ("cycleway",       1.2),
            ("living_street",  1.2),
            ("steps",          1.3),
            ("residential",    1.5),
            ("service",        1.6),
            ("unclassified",   1.8),
            ("tertiary",       2.5),
            ("tertiary_link",  2.5),
            ("secondary",      4.0),
            ("secondary_link", 4.0),
            ("primary",        6.0),
            ("primary_link",   6.0),
            ("trunk",          8.0),
            ("trunk_link",     8.0),
        ], 2.0)
    }

    /// Narrow-spread preset for areas where footpaths alone cannot form a
    /// walk of the requested length.
    pub fn relaxed() -> Self {
        Self::preset("relaxed", &[
            ("footway",        1.0),
            ("path",           1.0),
            ("pedestrian",     1.0),
            ("track",          1.0),
            ("bridleway",      1.0),
            ("cycleway",       1.05),
            ("living_street",  1.05),
            ("steps",          1.1),
            ("residential",    1.1),
            ("service",        1.15),
            ("unclassified",   1.2),
            ("tertiary",       1.3),
            ("tertiary_link",  1.3),
            ("secondary",      1.6),
            ("secondary_link", 1.6),
            ("primary",        2.0),
            ("primary_link",   2.0),
            ("trunk",          2.5),
            ("trunk_link",     2.5),
        ], 1.2)
    }

    fn preset(name: &str, table: &[(&str, f64)], default_factor: f64) -> Self {
        Self {
            name:    name.to_owned(),
            factors: table.iter().map(|&(k, v)| (k.to_owned(), v)).collect(),
            default_factor,
        }
    }

    /// Load a model from a CSV file (see module docs for the format).
    pub fn from_csv_path(name: impl Into<String>, path: &Path) -> NetworkResult<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(name, file)
    }

    /// Like [`from_csv_path`](Self::from_csv_path) but accepts any `Read`
    /// source.
    pub fn from_csv_reader<R: Read>(name: impl Into<String>, reader: R) -> NetworkResult<Self> {
        let name = name.into();
        let mut csv_reader = csv::Reader::from_reader(reader);

        let mut factors = BTreeMap::new();
        let mut default_factor = None;
        for result in csv_reader.deserialize::<CostRecord>() {
            let row = result.map_err(|e| NetworkError::Parse(e.to_string()))?;
            let category = row.category.trim();
            if category == DEFAULT_CATEGORY {
                default_factor = Some(row.factor);
            } else {
                factors.insert(category.to_owned(), row.factor);
            }
        }

        let default_factor = default_factor.ok_or_else(|| NetworkError::MissingDefault(name.clone()))?;
        Self::new(name, factors, default_factor)
    }

    /// Check the model is usable: non-empty, all factors finite and `>= 0`.
    pub fn validate(&self) -> NetworkResult<()> {
        if self.factors.is_empty() {
            return Err(NetworkError::EmptyCostModel(self.name.clone()));
        }
        let entries = self
            .factors
            .iter()
            .map(|(k, &v)| (k.as_str(), v))
            .chain(std::iter::once((DEFAULT_CATEGORY, self.default_factor)));
        for (category, factor) in entries {
            if !factor.is_finite() || factor < 0.0 {
                return Err(NetworkError::InvalidCostFactor {
                    model:    self.name.clone(),
                    category: category.to_owned(),
                    factor,
                });
            }
        }
        Ok(())
    }

    /// Multiplier for `category`, or the default for unseen categories.
    #[inline]
    pub fn factor(&self, category: &str) -> f64 {
        self.factors.get(category).copied().unwrap_or(self.default_factor)
    }

    /// `true` if `category` has an explicit entry.
    pub fn knows(&self, category: &str) -> bool {
        self.factors.contains_key(category)
    }

    /// Cost of walking `length_m` metres on a `category` path.
    #[inline]
    pub fn cost(&self, category: &str, length_m: f64) -> f64 {
        length_m * self.factor(category)
    }
}

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct CostRecord {
    category: String,
    factor:   f64,
}
