//! Neighbor-weighted rating prediction.
//!
//! [`RatingPredictor`] predicts a user's rating for an item as the
//! similarity-weighted average of the user's own ratings, using a fitted
//! [`SimilarityMatrix`](crate::similarity::SimilarityMatrix). An optional
//! neighbor limit restricts the average to the K most similar rated
//! items.
//!
//! # Example
//!
//! ```
//! use sugerir::data::RatingTable;
//! use sugerir::predict::RatingPredictor;
//! use sugerir::similarity::{SimilarityMatrix, SimilarityMeasure};
//!
//! let mut table = RatingTable::new();
//! table.insert("u1", "a", 5.0);
//! table.insert("u1", "b", 3.0);
//! table.insert("u2", "a", 4.0);
//! table.insert("u2", "b", 2.0);
//! table.insert("u3", "b", 5.0);
//! table.insert("u3", "c", 1.0);
//!
//! let matrix = SimilarityMatrix::fit(&table, SimilarityMeasure::Euclidean);
//! let predictor = RatingPredictor::new(table, matrix);
//!
//! // u3's only neighbor of "a" is "b", rated 5.0
//! let predicted = predictor.predict("u3", "a").unwrap();
//! assert_eq!(predicted, Some(5.0));
//! ```

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::data::RatingTable;
use crate::error::{Result, SugerirError};
use crate::similarity::SimilarityMatrix;

/// Predicts unseen ratings by similarity-weighted averaging.
///
/// Owns the training table and the similarity matrix it predicts from;
/// both are read-only after construction. The only mutable knob is the
/// neighbor limit, which may change between calls and affects only
/// subsequent predictions.
#[derive(Debug, Clone)]
pub struct RatingPredictor {
    ratings: RatingTable,
    similarity: SimilarityMatrix,
    neighbor_limit: Option<usize>,
}

impl RatingPredictor {
    /// Creates a predictor with no neighbor limit (all similar rated
    /// items contribute).
    #[must_use]
    pub fn new(ratings: RatingTable, similarity: SimilarityMatrix) -> Self {
        Self {
            ratings,
            similarity,
            neighbor_limit: None,
        }
    }

    /// Sets the neighbor limit at construction time.
    #[must_use]
    pub fn with_neighbor_limit(mut self, k: usize) -> Self {
        self.neighbor_limit = Some(k);
        self
    }

    /// Changes the neighbor limit; `None` means unlimited.
    pub fn set_neighbor_limit(&mut self, k: Option<usize>) {
        self.neighbor_limit = k;
    }

    /// The current neighbor limit.
    #[must_use]
    pub fn neighbor_limit(&self) -> Option<usize> {
        self.neighbor_limit
    }

    /// The training table this predictor reads.
    #[must_use]
    pub fn ratings(&self) -> &RatingTable {
        &self.ratings
    }

    /// The similarity matrix this predictor reads.
    #[must_use]
    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    /// Returns a user's training ratings, keyed by item id.
    ///
    /// # Errors
    ///
    /// Returns [`SugerirError::UnknownUser`] for a user absent from the
    /// training table.
    pub fn rated_items(&self, user_id: &str) -> Result<&BTreeMap<String, f64>> {
        self.ratings
            .ratings_of(user_id)
            .ok_or_else(|| SugerirError::unknown_user(user_id))
    }

    /// Predicts a user's rating for an item.
    ///
    /// A rating the user already gave is returned verbatim. Otherwise
    /// the prediction is `Σ(sim × rating) / Σ(sim)` over the user's
    /// rated items that have a stored similarity to the target, sorted
    /// by similarity descending and truncated to the neighbor limit when
    /// one is set. Rated items with no stored similarity to the target
    /// (the pair never co-occurred in training, or the target is unseen)
    /// contribute nothing; they are not treated as similarity 0.
    ///
    /// Returns `Ok(None)` when no basis for a prediction exists: the
    /// retained neighbor set is empty or its similarity sum is zero
    /// (new item, or no co-rated neighbors). This is distinguishable
    /// from a genuine 0.0 prediction; use [`predict_score`] for the
    /// legacy 0.0-sentinel convention.
    ///
    /// # Errors
    ///
    /// Returns [`SugerirError::UnknownUser`] for a user absent from the
    /// training table.
    ///
    /// [`predict_score`]: RatingPredictor::predict_score
    pub fn predict(&self, user_id: &str, item_id: &str) -> Result<Option<f64>> {
        let rated = self.rated_items(user_id)?;
        if let Some(&rating) = rated.get(item_id) {
            return Ok(Some(rating));
        }

        let mut neighbors: Vec<(f64, f64)> = Vec::new();
        for (rated_item, &rating) in rated {
            if let Some(sim) = self.similarity.get(rated_item, item_id) {
                neighbors.push((sim, rating));
            }
        }

        // stable sort: equal similarities keep collection order
        neighbors.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
        if let Some(k) = self.neighbor_limit {
            neighbors.truncate(k);
        }

        let total_sim: f64 = neighbors.iter().map(|(sim, _)| sim).sum();
        if neighbors.is_empty() || total_sim == 0.0 {
            return Ok(None);
        }

        let weighted: f64 = neighbors.iter().map(|(sim, rating)| sim * rating).sum();
        Ok(Some(weighted / total_sim))
    }

    /// Predicts with the legacy 0.0-sentinel convention: an
    /// unpredictable (user, item) yields 0.0 instead of `None`.
    ///
    /// Callers that need to tell a genuine 0.0 prediction apart from
    /// "no basis for a prediction" should use [`predict`] instead.
    ///
    /// # Errors
    ///
    /// Returns [`SugerirError::UnknownUser`] for a user absent from the
    /// training table.
    ///
    /// [`predict`]: RatingPredictor::predict
    pub fn predict_score(&self, user_id: &str, item_id: &str) -> Result<f64> {
        Ok(self.predict(user_id, item_id)?.unwrap_or(0.0))
    }
}
