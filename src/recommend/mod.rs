//! Top-N recommendation over a user's unrated items.
//!
//! [`Recommender`] ranks every catalog item the user has not yet rated by
//! its predicted rating, highest first.
//!
//! # Example
//!
//! ```
//! use sugerir::data::{ItemCatalog, RatingTable};
//! use sugerir::predict::RatingPredictor;
//! use sugerir::recommend::Recommender;
//! use sugerir::similarity::{SimilarityMatrix, SimilarityMeasure};
//!
//! let mut catalog = ItemCatalog::new();
//! catalog.insert("a", "Item A");
//! catalog.insert("b", "Item B");
//! catalog.insert("c", "Item C");
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
//! let recommender = Recommender::new(&predictor, &catalog);
//!
//! let top = recommender.recommend("u3", Some(1)).unwrap();
//! assert_eq!(top, vec![(5.0, "a".to_string())]);
//! ```

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::data::ItemCatalog;
use crate::error::Result;
use crate::predict::RatingPredictor;

/// Ranks a user's unrated catalog items by predicted rating.
///
/// Borrows the predictor and catalog it reads; holds no state of its
/// own.
#[derive(Debug, Clone, Copy)]
pub struct Recommender<'a> {
    predictor: &'a RatingPredictor,
    catalog: &'a ItemCatalog,
}

impl<'a> Recommender<'a> {
    /// Creates a recommender over a fitted predictor and an item
    /// catalog.
    #[must_use]
    pub fn new(predictor: &'a RatingPredictor, catalog: &'a ItemCatalog) -> Self {
        Self { predictor, catalog }
    }

    /// Returns `(predicted rating, item id)` pairs for every catalog
    /// item the user has not rated, sorted by rating descending.
    ///
    /// Unpredictable candidates score 0.0 so they rank last rather than
    /// disappearing from the list. Equal ratings are ordered by item id
    /// descending — the comparator mirrors a reverse sort of
    /// `(rating, item_id)` tuples, so the full ordering is deterministic.
    /// With `top_n` set the list is truncated to the first `top_n`
    /// entries. An empty candidate set yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`SugerirError::UnknownUser`] for a user absent from the
    /// training table.
    ///
    /// [`SugerirError::UnknownUser`]: crate::error::SugerirError::UnknownUser
    pub fn recommend(&self, user_id: &str, top_n: Option<usize>) -> Result<Vec<(f64, String)>> {
        let rated: BTreeSet<&str> = self
            .predictor
            .rated_items(user_id)?
            .keys()
            .map(String::as_str)
            .collect();

        let mut ranked: Vec<(f64, String)> = Vec::new();
        for item_id in self.catalog.item_ids() {
            if rated.contains(item_id) {
                continue;
            }
            let rating = self.predictor.predict_score(user_id, item_id)?;
            ranked.push((rating, item_id.to_string()));
        }

        ranked.sort_by(|(rating_a, id_a), (rating_b, id_b)| {
            rating_b
                .partial_cmp(rating_a)
                .unwrap_or(Ordering::Equal)
                .then_with(|| id_b.cmp(id_a))
        });

        if let Some(n) = top_n {
            ranked.truncate(n);
        }
        Ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::RatingTable;
    use crate::error::SugerirError;
    use crate::similarity::{SimilarityMatrix, SimilarityMeasure};

    fn fixtures() -> (RatingPredictor, ItemCatalog) {
        let mut table = RatingTable::new();
        table.insert("u1", "a", 5.0);
        table.insert("u1", "b", 3.0);
        table.insert("u2", "a", 4.0);
        table.insert("u2", "b", 2.0);
        table.insert("u3", "b", 5.0);
        table.insert("u3", "c", 1.0);

        let mut catalog = ItemCatalog::new();
        for (id, name) in [("a", "Item A"), ("b", "Item B"), ("c", "Item C"), ("d", "Item D")] {
            catalog.insert(id, name);
        }

        let matrix = SimilarityMatrix::fit(&table, SimilarityMeasure::Euclidean);
        (RatingPredictor::new(table, matrix), catalog)
    }

    #[test]
    fn test_excludes_rated_items() {
        let (predictor, catalog) = fixtures();
        let recommender = Recommender::new(&predictor, &catalog);
        let list = recommender.recommend("u3", None).expect("known user");
        for (_, item_id) in &list {
            assert_ne!(item_id, "b");
            assert_ne!(item_id, "c");
        }
        assert_eq!(list.len(), 2); // a and d
    }

    #[test]
    fn test_sorted_descending_with_unpredictable_last() {
        let (predictor, catalog) = fixtures();
        let recommender = Recommender::new(&predictor, &catalog);
        let list = recommender.recommend("u3", None).expect("known user");
        // a is predictable (5.0); d is not in training, scored 0.0
        assert_eq!(list[0], (5.0, "a".to_string()));
        assert_eq!(list[1], (0.0, "d".to_string()));
    }

    #[test]
    fn test_top_n_truncates() {
        let (predictor, catalog) = fixtures();
        let recommender = Recommender::new(&predictor, &catalog);
        let list = recommender.recommend("u3", Some(1)).expect("known user");
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].1, "a");
    }

    #[test]
    fn test_top_n_larger_than_candidates() {
        let (predictor, catalog) = fixtures();
        let recommender = Recommender::new(&predictor, &catalog);
        let list = recommender.recommend("u3", Some(100)).expect("known user");
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_equal_ratings_tie_break_by_id_descending() {
        // u2 rated nothing that relates x, y, z: all candidates score 0.0
        let mut table = RatingTable::new();
        table.insert("u1", "a", 3.0);
        table.insert("u2", "q", 4.0);
        let mut catalog = ItemCatalog::new();
        catalog.insert("x", "X");
        catalog.insert("y", "Y");
        catalog.insert("z", "Z");

        let matrix = SimilarityMatrix::fit(&table, SimilarityMeasure::Euclidean);
        let predictor = RatingPredictor::new(table, matrix);
        let recommender = Recommender::new(&predictor, &catalog);

        let list = recommender.recommend("u2", None).expect("known user");
        let ids: Vec<&str> = list.iter().map(|(_, id)| id.as_str()).collect();
        assert_eq!(ids, vec!["z", "y", "x"]);
    }

    #[test]
    fn test_empty_candidate_set() {
        let mut table = RatingTable::new();
        table.insert("u1", "a", 3.0);
        let mut catalog = ItemCatalog::new();
        catalog.insert("a", "Item A");

        let matrix = SimilarityMatrix::fit(&table, SimilarityMeasure::Euclidean);
        let predictor = RatingPredictor::new(table, matrix);
        let recommender = Recommender::new(&predictor, &catalog);

        let list = recommender.recommend("u1", None).expect("known user");
        assert!(list.is_empty());
    }

    #[test]
    fn test_unknown_user_propagates() {
        let (predictor, catalog) = fixtures();
        let recommender = Recommender::new(&predictor, &catalog);
        let err = recommender.recommend("ghost", None).unwrap_err();
        assert!(matches!(err, SugerirError::UnknownUser { .. }));
    }
}
