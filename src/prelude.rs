//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use sugerir::prelude::*;
//! ```

pub use crate::data::{CoRatingIndex, ItemCatalog, RatingTable, TestSet};
pub use crate::metrics::{evaluate, EvaluationReport};
pub use crate::predict::RatingPredictor;
pub use crate::recommend::Recommender;
pub use crate::similarity::{SimilarityMatrix, SimilarityMeasure};
