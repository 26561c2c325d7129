//! Catalogue-side lookup structures shared by both strategies.

use std::collections::HashMap;

use crate::linkage::{KeyNormalization, LinkColumns};
use crate::model::{NULL, Record, Table, Value};

/// Key text of `record`, after normalisation. `None` when the record has no
/// key or the key is null; such records never match.
pub fn key_text(record: &Record, column: &str, normalization: KeyNormalization) -> Option<String> {
    record
        .get(column)
        .and_then(Value::as_text)
        .map(|key| normalization.apply(key))
}

/// `(key, target)` pairs of the catalogue in scan order, skipping records
/// without a key. Records lacking the target read as null.
pub fn catalogue_entries<'a>(
    catalogue: &'a Table,
    columns: &'a LinkColumns,
    normalization: KeyNormalization,
) -> impl Iterator<Item = (String, &'a Value)> + 'a {
    catalogue.records.iter().filter_map(move |record| {
        let key = key_text(record, &columns.key, normalization)?;
        let target = record.get(&columns.target).unwrap_or(&NULL);
        Some((key, target))
    })
}

/// Key → target map over the catalogue. A key seen more than once maps to
/// the target of its last occurrence.
#[derive(Debug)]
pub struct ExactIndex<'a> {
    entries: HashMap<String, &'a Value>,
}

impl<'a> ExactIndex<'a> {
    pub fn build(
        catalogue: &'a Table,
        columns: &'a LinkColumns,
        normalization: KeyNormalization,
    ) -> Self {
        let mut entries = HashMap::with_capacity(catalogue.len());
        for (key, target) in catalogue_entries(catalogue, columns, normalization) {
            entries.insert(key, target);
        }
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.entries.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Catalogue keys in scan order, with their key text pre-split into chars
/// for scoring.
#[derive(Debug)]
pub struct CandidateList<'a> {
    pub entries: Vec<Candidate<'a>>,
}

#[derive(Debug)]
pub struct Candidate<'a> {
    pub key: Vec<char>,
    pub target: &'a Value,
}

impl<'a> CandidateList<'a> {
    pub fn build(
        catalogue: &'a Table,
        columns: &'a LinkColumns,
        normalization: KeyNormalization,
    ) -> Self {
        let entries = catalogue_entries(catalogue, columns, normalization)
            .map(|(key, target)| Candidate {
                key: key.chars().collect(),
                target,
            })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
