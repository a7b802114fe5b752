//! Prediction-accuracy evaluation against held-out ratings.
//!
//! [`evaluate`] replays a [`TestSet`] through a fitted
//! [`RatingPredictor`] and aggregates the error into an
//! [`EvaluationReport`] (MAE, RMSE, significant-error count).
//! Unpredictable test entries are excluded from every aggregate — an
//! accepted limitation of neighbor-based prediction, since a new user or
//! item gives the predictor nothing to work with.

use serde::{Deserialize, Serialize};

use crate::data::TestSet;
use crate::error::{Result, SugerirError};
use crate::predict::RatingPredictor;

/// Absolute error above which a prediction counts as a significant miss.
pub const SIGNIFICANT_ERROR_THRESHOLD: f64 = 1.0;

/// Aggregate accuracy of a predictor over a held-out test set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Mean absolute error over evaluated observations.
    pub mae: f64,
    /// Root mean squared error over evaluated observations.
    pub rmse: f64,
    /// Observations whose absolute error exceeded
    /// [`SIGNIFICANT_ERROR_THRESHOLD`].
    pub significant_errors: usize,
    /// Observations that entered the aggregates.
    pub n_evaluated: usize,
    /// Observations skipped as unpredictable.
    pub n_skipped: usize,
}

impl EvaluationReport {
    /// Generate a formatted report string.
    #[must_use]
    pub fn report(&self) -> String {
        format!(
            "Prediction Evaluation (n={}, skipped={})\n\
             ────────────────────────────────────\n\
             MAE:               {:>8.4}\n\
             RMSE:              {:>8.4}\n\
             Significant errors: {:>7}",
            self.n_evaluated, self.n_skipped, self.mae, self.rmse, self.significant_errors
        )
    }
}

/// Evaluates a predictor against held-out ratings.
///
/// Each test observation is predicted and compared with its real rating;
/// unpredictable observations (no similarity basis) are skipped and
/// counted in `n_skipped`. MAE and RMSE are computed over the evaluated
/// observations only.
///
/// # Errors
///
/// - [`SugerirError::UnknownUser`] if a test entry names a user absent
///   from the training table.
/// - [`SugerirError::EmptyEvaluation`] if zero observations were
///   evaluable (empty test set, or every entry unpredictable). The
///   aggregates are never computed over an empty set.
///
/// # Examples
///
/// ```
/// use sugerir::data::{RatingTable, TestSet};
/// use sugerir::metrics::evaluate;
/// use sugerir::predict::RatingPredictor;
/// use sugerir::similarity::{SimilarityMatrix, SimilarityMeasure};
///
/// let mut table = RatingTable::new();
/// table.insert("u1", "a", 5.0);
/// table.insert("u1", "b", 3.0);
/// table.insert("u2", "a", 4.0);
/// table.insert("u2", "b", 2.0);
/// table.insert("u3", "b", 5.0);
/// table.insert("u3", "c", 1.0);
///
/// let matrix = SimilarityMatrix::fit(&table, SimilarityMeasure::Euclidean);
/// let predictor = RatingPredictor::new(table, matrix);
///
/// let mut test = TestSet::new();
/// test.insert("u3", "a", 4.0); // predicted 5.0 -> abs error 1.0
///
/// let report = evaluate(&predictor, &test).unwrap();
/// assert_eq!(report.n_evaluated, 1);
/// assert!((report.mae - 1.0).abs() < 1e-12);
/// ```
pub fn evaluate(predictor: &RatingPredictor, test: &TestSet) -> Result<EvaluationReport> {
    let mut abs_sum = 0.0;
    let mut sq_sum = 0.0;
    let mut n_evaluated = 0usize;
    let mut n_skipped = 0usize;
    let mut significant_errors = 0usize;

    for ((user_id, item_id), &real_rating) in test.iter() {
        match predictor.predict(user_id, item_id)? {
            None => n_skipped += 1,
            Some(predicted) => {
                let abs_diff = (predicted - real_rating).abs();
                if abs_diff > SIGNIFICANT_ERROR_THRESHOLD {
                    significant_errors += 1;
                }
                abs_sum += abs_diff;
                sq_sum += abs_diff * abs_diff;
                n_evaluated += 1;
            }
        }
    }

    if n_evaluated == 0 {
        return Err(SugerirError::EmptyEvaluation);
    }

    let n = n_evaluated as f64;
    Ok(EvaluationReport {
        mae: abs_sum / n,
        rmse: (sq_sum / n).sqrt(),
        significant_errors,
        n_evaluated,
        n_skipped,
    })
}
