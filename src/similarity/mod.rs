//! Item-to-item similarity measures and the pairwise similarity matrix.
//!
//! Similarity between two items is scored over their *shared raters*: the
//! users who rated both. Two measures are provided, selected through
//! [`SimilarityMeasure`]:
//!
//! - **Euclidean**: `1 / (1 + sqrt(Σ (r_a − r_b)²))` over shared raters,
//!   naturally in (0, 1].
//! - **Pearson**: sample correlation of the two rating vectors, rescaled
//!   from [−1, 1] into [0, 1].
//!
//! [`SimilarityMatrix::fit`] scores every unordered pair of items that
//! appear in a training table, exactly once, under a canonical pair key.
//!
//! # Example
//!
//! ```
//! use sugerir::data::RatingTable;
//! use sugerir::similarity::{SimilarityMatrix, SimilarityMeasure};
//!
//! let mut table = RatingTable::new();
//! table.insert("u1", "a", 5.0);
//! table.insert("u1", "b", 3.0);
//! table.insert("u2", "a", 4.0);
//! table.insert("u2", "b", 2.0);
//!
//! let matrix = SimilarityMatrix::fit(&table, SimilarityMeasure::Euclidean);
//!
//! // sum of squared diffs = (5-3)² + (4-2)² = 8
//! let sim = matrix.get("a", "b").expect("pair scored");
//! assert!((sim - 1.0 / (1.0 + 8.0_f64.sqrt())).abs() < 1e-12);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::data::{CoRatingIndex, RatingTable};

/// Euclidean-distance similarity between two items over their shared
/// raters.
///
/// Returns `1 / (1 + sqrt(sum of squared rating differences))`, which is
/// in (0, 1] whenever at least one shared rater exists, and 0.0 when the
/// shared-rater set is empty (no basis for similarity).
///
/// # Examples
///
/// ```
/// use sugerir::data::RatingTable;
/// use sugerir::similarity::euclidean_similarity;
///
/// let mut table = RatingTable::new();
/// table.insert("u1", "a", 5.0);
/// table.insert("u1", "b", 3.0);
/// table.insert("u2", "a", 4.0);
/// table.insert("u2", "b", 2.0);
/// let index = table.transpose();
///
/// let sim = euclidean_similarity(&index, "a", "b");
/// assert!((sim - 0.2612).abs() < 1e-4); // 1 / (1 + sqrt(8))
/// ```
#[must_use]
pub fn euclidean_similarity(index: &CoRatingIndex, item_a: &str, item_b: &str) -> f64 {
    let (Some(raters_a), Some(raters_b)) = (index.raters_of(item_a), index.raters_of(item_b))
    else {
        return 0.0;
    };

    let mut shared = 0usize;
    let mut sum_of_squares = 0.0;
    for (user, &rating_a) in raters_a {
        if let Some(&rating_b) = raters_b.get(user) {
            shared += 1;
            sum_of_squares += (rating_a - rating_b).powi(2);
        }
    }

    if shared == 0 {
        return 0.0;
    }
    1.0 / (1.0 + sum_of_squares.sqrt())
}

/// Pearson-correlation similarity between two items over their shared
/// raters, rescaled into [0, 1].
///
/// The raw correlation is clamped to [−1, 1] against floating-point
/// overshoot, rescaled via `(r + 1) / 2`, and rounded to 4 decimal
/// digits so downstream comparisons are reproducible. A zero variance
/// term or an empty shared-rater set yields 0.0 (undefined correlation
/// treated as no similarity).
///
/// # Examples
///
/// ```
/// use sugerir::data::RatingTable;
/// use sugerir::similarity::pearson_similarity;
///
/// let mut table = RatingTable::new();
/// // a and b move together perfectly: correlation 1, rescaled to 1.0
/// table.insert("u1", "a", 5.0);
/// table.insert("u1", "b", 3.0);
/// table.insert("u2", "a", 4.0);
/// table.insert("u2", "b", 2.0);
/// let index = table.transpose();
///
/// assert_eq!(pearson_similarity(&index, "a", "b"), 1.0);
/// ```
#[must_use]
pub fn pearson_similarity(index: &CoRatingIndex, item_a: &str, item_b: &str) -> f64 {
    let (Some(raters_a), Some(raters_b)) = (index.raters_of(item_a), index.raters_of(item_b))
    else {
        return 0.0;
    };

    let mut n = 0usize;
    let mut sum_a = 0.0;
    let mut sum_b = 0.0;
    let mut sum_a_sq = 0.0;
    let mut sum_b_sq = 0.0;
    let mut sum_cross = 0.0;
    for (user, &rating_a) in raters_a {
        if let Some(&rating_b) = raters_b.get(user) {
            n += 1;
            sum_a += rating_a;
            sum_b += rating_b;
            sum_a_sq += rating_a * rating_a;
            sum_b_sq += rating_b * rating_b;
            sum_cross += rating_a * rating_b;
        }
    }

    if n == 0 {
        return 0.0;
    }

    let n = n as f64;
    let num = sum_cross - (sum_a * sum_b / n);
    let den_sq = (sum_a_sq - sum_a.powi(2) / n) * (sum_b_sq - sum_b.powi(2) / n);
    if den_sq <= 0.0 {
        // zero variance in either vector: correlation undefined
        return 0.0;
    }

    let correlation = (num / den_sq.sqrt()).clamp(-1.0, 1.0);
    let rescaled = (correlation + 1.0) / 2.0;
    (rescaled * 10_000.0).round() / 10_000.0
}

/// Choice of similarity measure for matrix construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SimilarityMeasure {
    /// Euclidean-distance similarity, see [`euclidean_similarity`].
    Euclidean,
    /// Rescaled Pearson correlation, see [`pearson_similarity`].
    Pearson,
}

impl SimilarityMeasure {
    /// Scores the similarity of two distinct items over their shared
    /// raters. Always in [0, 1]; 0.0 when no shared rater exists.
    #[must_use]
    pub fn score(&self, index: &CoRatingIndex, item_a: &str, item_b: &str) -> f64 {
        match self {
            SimilarityMeasure::Euclidean => euclidean_similarity(index, item_a, item_b),
            SimilarityMeasure::Pearson => pearson_similarity(index, item_a, item_b),
        }
    }
}

/// Pairwise similarity scores over every item that appears in a training
/// table.
///
/// Built eagerly and in full by [`SimilarityMatrix::fit`]; read-only
/// afterwards. If the training table or the measure changes, fit a new
/// matrix — there is no incremental update.
///
/// Each unordered item pair is stored exactly once, under the key with
/// the lexicographically smaller id first; [`SimilarityMatrix::get`]
/// accepts the pair in either order. A pair is never stored with itself.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    scores: BTreeMap<(String, String), f64>,
    measure: SimilarityMeasure,
}

impl SimilarityMatrix {
    /// Builds the full similarity matrix for a training table.
    ///
    /// Transposes the table into its item-major view, then scores every
    /// unordered pair of distinct rated items in sorted-id order, so the
    /// result is deterministic regardless of table iteration order. A
    /// pair with no shared raters is stored with score 0.0, not omitted.
    ///
    /// O(n²) pairs over n distinct rated items.
    #[must_use]
    pub fn fit(table: &RatingTable, measure: SimilarityMeasure) -> Self {
        let index = table.transpose();
        let items: Vec<&str> = index.item_ids().collect();

        let mut scores = BTreeMap::new();
        for (i, &item_a) in items.iter().enumerate() {
            for &item_b in &items[i + 1..] {
                let score = measure.score(&index, item_a, item_b);
                scores.insert((item_a.to_string(), item_b.to_string()), score);
            }
        }

        Self { scores, measure }
    }

    /// Looks up the similarity of two items, in either argument order.
    ///
    /// Returns `None` when either item never appeared in the training
    /// table, or when both arguments are the same item (self-similarity
    /// is never stored).
    #[must_use]
    pub fn get(&self, item_a: &str, item_b: &str) -> Option<f64> {
        let key = if item_a <= item_b {
            (item_a.to_string(), item_b.to_string())
        } else {
            (item_b.to_string(), item_a.to_string())
        };
        self.scores.get(&key).copied()
    }

    /// The measure this matrix was built with.
    #[must_use]
    pub fn measure(&self) -> SimilarityMeasure {
        self.measure
    }

    /// Iterates over ((item a, item b), score) entries in canonical key
    /// order.
    pub fn pairs(&self) -> impl Iterator<Item = (&(String, String), &f64)> {
        self.scores.iter()
    }

    /// Number of stored item pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Returns true if no pair is stored (fewer than two rated items).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}
