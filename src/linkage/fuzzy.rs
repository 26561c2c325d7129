use std::fmt;

use tracing::{debug, info, instrument, trace};

use crate::error::{LinkError, Result};
use crate::linkage::lookup::{CandidateList, key_text};
use crate::linkage::similarity::Scorer;
use crate::linkage::{KeyNormalization, LinkColumns, map_records};
use crate::model::{Table, Value};
use crate::schema::validate_linkage;

/// Operating point used when the caller does not choose one.
pub const DEFAULT_THRESHOLD: Threshold = Threshold(90);

/// Minimum similarity score, 0–100 inclusive, a fuzzy match must reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Threshold(u8);

impl Threshold {
    /// Rejects values outside 0–100 with [`LinkError::InvalidThreshold`].
    pub fn new(value: i64) -> Result<Self> {
        if (0..=100).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(LinkError::InvalidThreshold(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// `true` when `score` reaches the threshold.
    pub fn accepts(self, score: f64) -> bool {
        score >= f64::from(self.0)
    }
}

impl Default for Threshold {
    fn default() -> Self {
        DEFAULT_THRESHOLD
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Highest-scoring candidate for `key` as `(index, score)`. Among equal
/// scores the earliest candidate wins. `None` for an empty catalogue.
pub(crate) fn best_match(
    key: &[char],
    candidates: &CandidateList<'_>,
    scorer: Scorer,
) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, candidate) in candidates.entries.iter().enumerate() {
        let score = scorer.score(key, &candidate.key);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((idx, score)),
        }
    }
    best
}

/// Attaches to each portal record the target of its most similar catalogue
/// key, provided the similarity reaches `threshold`; otherwise null.
///
/// Uses the indel ratio and literal keys. Every portal key is scored against
/// every catalogue key, so cost grows with the product of the table sizes.
pub fn fuzzy_match(
    portal: &Table,
    catalogue: &Table,
    columns: &LinkColumns,
    threshold: i64,
) -> Result<Table> {
    let threshold = Threshold::new(threshold)?;
    fuzzy_match_with(
        portal,
        catalogue,
        columns,
        threshold,
        Scorer::default(),
        KeyNormalization::default(),
    )
}

/// [`fuzzy_match`] with an explicit scorer and key normalisation.
#[instrument(
    level = "debug",
    skip_all,
    fields(
        portal_rows = portal.len(),
        catalogue_rows = catalogue.len(),
        threshold = threshold.value(),
        scorer = %scorer
    )
)]
pub fn fuzzy_match_with(
    portal: &Table,
    catalogue: &Table,
    columns: &LinkColumns,
    threshold: Threshold,
    scorer: Scorer,
    normalization: KeyNormalization,
) -> Result<Table> {
    validate_linkage(portal, catalogue, columns)?;

    let candidates = CandidateList::build(catalogue, columns, normalization);
    debug!(candidates = candidates.len(), "catalogue candidates collected");

    let mapped = map_records(portal, &columns.target, |record| {
        let Some(key) = key_text(record, &columns.key, normalization) else {
            return Value::Null;
        };
        let key: Vec<char> = key.chars().collect();
        match best_match(&key, &candidates, scorer) {
            Some((idx, score)) if threshold.accepts(score) => {
                trace!(score, candidate = idx, "accepted");
                candidates.entries[idx].target.clone()
            }
            Some((idx, score)) => {
                trace!(score, candidate = idx, "below threshold");
                Value::Null
            }
            None => Value::Null,
        }
    });
    info!(records = mapped.len(), "fuzzy match complete");
    Ok(mapped)
}
