//! String similarity scores on a 0–100 scale.

use std::fmt;

use serde::Deserialize;
use strsim::levenshtein;

/// Similarity function used by fuzzy matching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scorer {
    /// Insertion/deletion distance normalised by the combined length.
    #[default]
    Indel,
    /// Levenshtein distance normalised by the longer length.
    Levenshtein,
}

impl Scorer {
    /// Scores two keys given as Unicode scalar values.
    pub fn score(&self, lhs: &[char], rhs: &[char]) -> f64 {
        match self {
            Scorer::Indel => indel_ratio(lhs, rhs),
            Scorer::Levenshtein => levenshtein_ratio(lhs, rhs),
        }
    }

    /// Convenience wrapper over [`Scorer::score`] for string slices.
    pub fn score_str(&self, lhs: &str, rhs: &str) -> f64 {
        let lhs: Vec<char> = lhs.chars().collect();
        let rhs: Vec<char> = rhs.chars().collect();
        self.score(&lhs, &rhs)
    }
}

impl fmt::Display for Scorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scorer::Indel => write!(f, "indel"),
            Scorer::Levenshtein => write!(f, "levenshtein"),
        }
    }
}

/// `100 * (|a| + |b| - indel(a, b)) / (|a| + |b|)`, which reduces to
/// `200 * lcs(a, b) / (|a| + |b|)`. Two empty keys are identical.
pub fn indel_ratio(lhs: &[char], rhs: &[char]) -> f64 {
    let total = lhs.len() + rhs.len();
    if total == 0 {
        return 100.0;
    }
    (200 * longest_common_subsequence(lhs, rhs)) as f64 / total as f64
}

/// `100 * (1 - levenshtein(a, b) / max(|a|, |b|))`.
pub fn levenshtein_ratio(lhs: &[char], rhs: &[char]) -> f64 {
    let longest = lhs.len().max(rhs.len());
    if longest == 0 {
        return 100.0;
    }
    let lhs: String = lhs.iter().collect();
    let rhs: String = rhs.iter().collect();
    let distance = levenshtein(&lhs, &rhs);
    (100 * (longest - distance)) as f64 / longest as f64
}

// Single-row dynamic programme; `diagonal` holds the previous row's value
// one column to the left.
fn longest_common_subsequence(lhs: &[char], rhs: &[char]) -> usize {
    if lhs.is_empty() || rhs.is_empty() {
        return 0;
    }
    let mut row = vec![0usize; rhs.len() + 1];
    for &left in lhs {
        let mut diagonal = 0;
        for (idx, &right) in rhs.iter().enumerate() {
            let above = row[idx + 1];
            row[idx + 1] = if left == right {
                diagonal + 1
            } else {
                above.max(row[idx])
            };
            diagonal = above;
        }
    }
    row[rhs.len()]
}
