//! Sugerir: item-based collaborative filtering in pure Rust.
//!
//! Sugerir computes item-to-item similarity from sparse user–item rating
//! data, predicts unseen ratings by neighbor-weighted averaging, ranks
//! per-user top-N recommendation lists, and measures prediction accuracy
//! against held-out ratings.
//!
//! # Quick Start
//!
//! ```
//! use sugerir::prelude::*;
//!
//! // Explicit ratings, user by user
//! let mut table = RatingTable::new();
//! table.insert("u1", "a", 5.0);
//! table.insert("u1", "b", 3.0);
//! table.insert("u2", "a", 4.0);
//! table.insert("u2", "b", 2.0);
//! table.insert("u3", "b", 5.0);
//! table.insert("u3", "c", 1.0);
//!
//! // Build the similarity matrix once, then predict from it
//! let matrix = SimilarityMatrix::fit(&table, SimilarityMeasure::Euclidean);
//! let predictor = RatingPredictor::new(table, matrix);
//!
//! let predicted = predictor.predict("u3", "a").unwrap();
//! assert_eq!(predicted, Some(5.0));
//! ```
//!
//! # Modules
//!
//! - [`data`]: Rating tables, the item catalog, and the co-rating index
//! - [`similarity`]: Euclidean and Pearson measures, similarity matrix
//! - [`predict`]: Neighbor-weighted rating prediction
//! - [`recommend`]: Top-N ranking of a user's unrated items
//! - [`metrics`]: Held-out accuracy evaluation (MAE, RMSE)
//! - [`loading`]: MovieLens-format file loaders
//!
//! The pipeline is one-way: loaded tables feed
//! [`SimilarityMatrix::fit`](similarity::SimilarityMatrix::fit), the
//! fitted matrix feeds a
//! [`RatingPredictor`](predict::RatingPredictor), and the predictor
//! feeds both recommendation and evaluation. Every stage is a pure
//! computation over immutable tables; a changed table or measure means
//! fitting a new matrix, never patching the old one.

pub mod data;
pub mod error;
pub mod loading;
pub mod metrics;
pub mod predict;
pub mod prelude;
pub mod recommend;
pub mod similarity;

pub use error::{Result, SugerirError};
