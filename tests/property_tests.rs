//! Property-based tests using proptest.
//!
//! These tests verify the invariants of similarity scoring, matrix
//! construction, prediction, and recommendation over randomly generated
//! rating tables.

use proptest::prelude::*;
use sugerir::prelude::*;

// Strategy for generating small rating tables: up to 5 users rating up
// to 6 items with values in [1, 5].
fn table_strategy() -> impl Strategy<Value = RatingTable> {
    proptest::collection::vec((0u8..5, 0u8..6, 1.0f64..=5.0), 1..30).prop_map(|entries| {
        let mut table = RatingTable::new();
        for (user, item, rating) in entries {
            table.insert(&format!("u{user}"), &format!("i{item}"), rating);
        }
        table
    })
}

fn measure_strategy() -> impl Strategy<Value = SimilarityMeasure> {
    prop_oneof![
        Just(SimilarityMeasure::Euclidean),
        Just(SimilarityMeasure::Pearson),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn scores_are_within_unit_interval(table in table_strategy(), measure in measure_strategy()) {
        let matrix = SimilarityMatrix::fit(&table, measure);
        for (_, &score) in matrix.pairs() {
            prop_assert!((0.0..=1.0).contains(&score), "score out of range: {score}");
        }
    }

    #[test]
    fn matrix_has_exactly_one_entry_per_unordered_pair(
        table in table_strategy(),
        measure in measure_strategy(),
    ) {
        let matrix = SimilarityMatrix::fit(&table, measure);
        let n = table.transpose().n_items();
        prop_assert_eq!(matrix.len(), n * (n - 1) / 2);
        for ((a, b), _) in matrix.pairs() {
            prop_assert!(a < b, "non-canonical pair key: ({}, {})", a, b);
        }
    }

    #[test]
    fn matrix_never_stores_self_pairs(table in table_strategy(), measure in measure_strategy()) {
        let matrix = SimilarityMatrix::fit(&table, measure);
        let index = table.transpose();
        for item in index.item_ids() {
            prop_assert_eq!(matrix.get(item, item), None);
        }
    }

    #[test]
    fn matrix_lookup_is_symmetric(table in table_strategy(), measure in measure_strategy()) {
        let matrix = SimilarityMatrix::fit(&table, measure);
        let index = table.transpose();
        let items: Vec<&str> = index.item_ids().collect();
        for &a in &items {
            for &b in &items {
                prop_assert_eq!(matrix.get(a, b), matrix.get(b, a));
            }
        }
    }

    #[test]
    fn refitting_is_deterministic(table in table_strategy(), measure in measure_strategy()) {
        let first = SimilarityMatrix::fit(&table, measure);
        let second = SimilarityMatrix::fit(&table, measure);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn rated_items_predict_verbatim(table in table_strategy(), measure in measure_strategy()) {
        let matrix = SimilarityMatrix::fit(&table, measure);
        let predictor = RatingPredictor::new(table.clone(), matrix);
        for user in table.user_ids() {
            for (item, &rating) in table.ratings_of(user).expect("user exists") {
                let predicted = predictor.predict(user, item).expect("known user");
                prop_assert_eq!(predicted, Some(rating));
            }
        }
    }

    #[test]
    fn generous_neighbor_limit_matches_unlimited(
        table in table_strategy(),
        measure in measure_strategy(),
    ) {
        let matrix = SimilarityMatrix::fit(&table, measure);
        let unlimited = RatingPredictor::new(table.clone(), matrix.clone());
        // every user rated at most 6 items, so a limit of 6 never binds
        let limited = RatingPredictor::new(table.clone(), matrix).with_neighbor_limit(6);

        for user in table.user_ids() {
            let lhs = unlimited.predict(user, "i0").expect("known user");
            let rhs = limited.predict(user, "i0").expect("known user");
            prop_assert_eq!(lhs, rhs);
        }
    }

    #[test]
    fn zero_neighbor_limit_never_predicts_unrated(
        table in table_strategy(),
        measure in measure_strategy(),
    ) {
        let matrix = SimilarityMatrix::fit(&table, measure);
        let predictor = RatingPredictor::new(table.clone(), matrix).with_neighbor_limit(0);
        for user in table.user_ids() {
            let rated = table.ratings_of(user).expect("user exists");
            if !rated.contains_key("i0") {
                prop_assert_eq!(predictor.predict(user, "i0").expect("known user"), None);
            }
        }
    }

    #[test]
    fn recommendations_are_bounded_sorted_and_unrated(
        table in table_strategy(),
        measure in measure_strategy(),
        top_n in 1usize..5,
    ) {
        let mut catalog = ItemCatalog::new();
        for item in 0..8u8 {
            catalog.insert(&format!("i{item}"), &format!("Item {item}"));
        }

        let matrix = SimilarityMatrix::fit(&table, measure);
        let predictor = RatingPredictor::new(table.clone(), matrix);
        let recommender = Recommender::new(&predictor, &catalog);

        for user in table.user_ids() {
            let list = recommender.recommend(user, Some(top_n)).expect("known user");
            prop_assert!(list.len() <= top_n);

            let rated = table.ratings_of(user).expect("user exists");
            for window in list.windows(2) {
                prop_assert!(window[0].0 >= window[1].0, "ratings not non-increasing");
            }
            for (_, item) in &list {
                prop_assert!(!rated.contains_key(item), "recommended an already-rated item");
            }
        }
    }

    #[test]
    fn evaluation_never_divides_by_zero(
        table in table_strategy(),
        measure in measure_strategy(),
    ) {
        let matrix = SimilarityMatrix::fit(&table, measure);
        let predictor = RatingPredictor::new(table.clone(), matrix);

        let mut test = TestSet::new();
        for user in table.user_ids() {
            test.insert(user, "i0", 3.0);
        }

        match evaluate(&predictor, &test) {
            Ok(report) => {
                prop_assert!(report.n_evaluated > 0);
                prop_assert!(report.mae.is_finite());
                prop_assert!(report.rmse.is_finite());
                prop_assert!(report.rmse + 1e-12 >= report.mae);
            }
            Err(err) => prop_assert!(
                matches!(err, sugerir::SugerirError::EmptyEvaluation),
                "unexpected error: {}", err
            ),
        }
    }
}
