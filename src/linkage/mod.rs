//! Record-linkage engine.
//!
//! Both strategies are pure functions of their inputs: they validate the
//! column layout, read the catalogue without mutating it and return a new
//! mapped table holding every portal record, in order, with the target column
//! appended.

pub mod exact;
pub mod fuzzy;
pub(crate) mod lookup;
pub mod similarity;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::Result;
use crate::model::{Record, Table, Value};

pub use exact::{exact_join, exact_join_with};
pub use fuzzy::{DEFAULT_THRESHOLD, Threshold, fuzzy_match, fuzzy_match_with};
pub use similarity::Scorer;

/// Names of the columns a linkage reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkColumns {
    /// Identifier shared by portal and catalogue.
    pub key: String,
    /// Catalogue attribute copied into matched portal records.
    pub target: String,
}

impl LinkColumns {
    pub fn new(key: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            target: target.into(),
        }
    }
}

/// Optional clean-up applied to key text on both sides before comparison.
///
/// The default leaves keys untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct KeyNormalization {
    /// Strip leading and trailing whitespace.
    pub trim: bool,
    /// Compare keys case-insensitively.
    pub case_insensitive: bool,
}

impl KeyNormalization {
    pub fn is_literal(&self) -> bool {
        !self.trim && !self.case_insensitive
    }

    pub fn apply(&self, key: String) -> String {
        let key = if self.trim {
            key.trim().to_string()
        } else {
            key
        };
        if self.case_insensitive {
            key.to_lowercase()
        } else {
            key
        }
    }
}

/// Linkage strategy chosen by the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Strategy {
    /// Key values must be equal.
    Exact,
    /// Best-scoring catalogue key wins if it reaches the threshold.
    Fuzzy { threshold: Threshold, scorer: Scorer },
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Exact => write!(f, "exact"),
            Strategy::Fuzzy { threshold, scorer } => {
                write!(f, "fuzzy ({scorer}, threshold {threshold})")
            }
        }
    }
}

/// Everything a linkage run needs besides the two tables.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkOptions {
    pub columns: LinkColumns,
    pub strategy: Strategy,
    pub normalization: KeyNormalization,
}

/// Runs the selected strategy. Column validation always happens first.
#[instrument(
    level = "info",
    skip_all,
    fields(strategy = %options.strategy, key = %options.columns.key, target = %options.columns.target)
)]
pub fn link(portal: &Table, catalogue: &Table, options: &LinkOptions) -> Result<Table> {
    match options.strategy {
        Strategy::Exact => {
            exact_join_with(portal, catalogue, &options.columns, options.normalization)
        }
        Strategy::Fuzzy { threshold, scorer } => fuzzy_match_with(
            portal,
            catalogue,
            &options.columns,
            threshold,
            scorer,
            options.normalization,
        ),
    }
}

/// Builds the mapped table: a copy of `portal` with `target` set on every
/// record to whatever `resolve` returns for it.
pub(crate) fn map_records<'a, F>(portal: &'a Table, target: &str, mut resolve: F) -> Table
where
    F: FnMut(&'a Record) -> Value,
{
    let mut columns = portal.columns.clone();
    if !portal.has_column(target) {
        columns.push(target.to_string());
    }

    let records = portal
        .records
        .iter()
        .map(|record| {
            let value = resolve(record);
            let mut mapped = record.clone();
            mapped.insert(target, value);
            mapped
        })
        .collect();

    Table { columns, records }
}

/// Match counts for one mapped table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkSummary {
    pub strategy: String,
    pub records: usize,
    pub matched: usize,
    pub unmatched: usize,
}

impl LinkSummary {
    /// Counts non-null values in the target column of `mapped`.
    pub fn from_mapped(mapped: &Table, target: &str, strategy: &Strategy) -> Self {
        let matched = mapped
            .column_values(target)
            .filter(|value| !value.is_null())
            .count();
        Self {
            strategy: strategy.to_string(),
            records: mapped.len(),
            matched,
            unmatched: mapped.len() - matched,
        }
    }
}
