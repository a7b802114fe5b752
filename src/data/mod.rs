//! In-memory rating tables and the item catalog.
//!
//! The recommender core operates entirely on three tables loaded once at
//! startup: an [`ItemCatalog`] mapping item ids to display names, a
//! [`RatingTable`] of explicit user ratings for training, and an optional
//! [`TestSet`] of held-out ratings for evaluation. All three are immutable
//! after load. A [`CoRatingIndex`] is the transposed view of a training
//! table, built on demand when computing item similarity.
//!
//! Tables are backed by `BTreeMap` so that iteration order is always the
//! natural order of the identifiers, independent of insertion order.

use std::collections::BTreeMap;

/// Catalog of recommendable items: item id to display name.
///
/// # Examples
///
/// ```
/// use sugerir::data::ItemCatalog;
///
/// let mut catalog = ItemCatalog::new();
/// catalog.insert("1", "Toy Story (1995)");
/// catalog.insert("2", "GoldenEye (1995)");
///
/// assert_eq!(catalog.name_of("1"), Some("Toy Story (1995)"));
/// assert_eq!(catalog.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemCatalog {
    names: BTreeMap<String, String>,
}

impl ItemCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an item. A repeated id overwrites the previous name.
    pub fn insert(&mut self, item_id: &str, name: &str) {
        self.names.insert(item_id.to_string(), name.to_string());
    }

    /// Returns the display name for an item id, if known.
    #[must_use]
    pub fn name_of(&self, item_id: &str) -> Option<&str> {
        self.names.get(item_id).map(String::as_str)
    }

    /// Returns true if the catalog knows this item id.
    #[must_use]
    pub fn contains(&self, item_id: &str) -> bool {
        self.names.contains_key(item_id)
    }

    /// Iterates over item ids in natural order.
    pub fn item_ids(&self) -> impl Iterator<Item = &str> {
        self.names.keys().map(String::as_str)
    }

    /// Number of cataloged items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if the catalog has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Training ratings, keyed user id then item id.
///
/// # Examples
///
/// ```
/// use sugerir::data::RatingTable;
///
/// let mut table = RatingTable::new();
/// table.insert("u1", "a", 5.0);
/// table.insert("u1", "b", 3.0);
/// table.insert("u2", "a", 4.0);
///
/// assert_eq!(table.n_users(), 2);
/// assert_eq!(table.ratings_of("u1").map(|r| r.len()), Some(2));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatingTable {
    ratings: BTreeMap<String, BTreeMap<String, f64>>,
}

impl RatingTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one explicit rating. A repeated (user, item) pair
    /// overwrites the previous value.
    pub fn insert(&mut self, user_id: &str, item_id: &str, rating: f64) {
        self.ratings
            .entry(user_id.to_string())
            .or_default()
            .insert(item_id.to_string(), rating);
    }

    /// Returns all ratings of one user, keyed by item id in natural
    /// order, or `None` for a user absent from the table.
    #[must_use]
    pub fn ratings_of(&self, user_id: &str) -> Option<&BTreeMap<String, f64>> {
        self.ratings.get(user_id)
    }

    /// Returns true if this user appears in the table.
    #[must_use]
    pub fn contains_user(&self, user_id: &str) -> bool {
        self.ratings.contains_key(user_id)
    }

    /// Iterates over user ids in natural order.
    pub fn user_ids(&self) -> impl Iterator<Item = &str> {
        self.ratings.keys().map(String::as_str)
    }

    /// Number of distinct users.
    #[must_use]
    pub fn n_users(&self) -> usize {
        self.ratings.len()
    }

    /// Returns true if the table has no ratings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }

    /// Transposes the table into its item-major view.
    ///
    /// The result maps each item to the users who rated it; it is the
    /// basis for shared-rater similarity scoring and is cheap enough to
    /// recompute whenever a similarity matrix is rebuilt.
    #[must_use]
    pub fn transpose(&self) -> CoRatingIndex {
        let mut by_item: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
        for (user_id, items) in &self.ratings {
            for (item_id, &rating) in items {
                by_item
                    .entry(item_id.clone())
                    .or_default()
                    .insert(user_id.clone(), rating);
            }
        }
        CoRatingIndex { by_item }
    }
}

/// Item-major view of a [`RatingTable`]: item id to the users who rated
/// it and their ratings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoRatingIndex {
    by_item: BTreeMap<String, BTreeMap<String, f64>>,
}

impl CoRatingIndex {
    /// Returns the raters of one item, keyed by user id, or `None` for
    /// an item nobody rated.
    #[must_use]
    pub fn raters_of(&self, item_id: &str) -> Option<&BTreeMap<String, f64>> {
        self.by_item.get(item_id)
    }

    /// Iterates over the distinct rated item ids in natural order.
    pub fn item_ids(&self) -> impl Iterator<Item = &str> {
        self.by_item.keys().map(String::as_str)
    }

    /// Number of distinct rated items.
    #[must_use]
    pub fn n_items(&self) -> usize {
        self.by_item.len()
    }

    /// Returns true if no item has any rating.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_item.is_empty()
    }
}

/// Held-out ratings for evaluation, keyed flat by (user id, item id).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestSet {
    ratings: BTreeMap<(String, String), f64>,
}

impl TestSet {
    /// Creates an empty test set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one held-out observation.
    pub fn insert(&mut self, user_id: &str, item_id: &str, rating: f64) {
        self.ratings
            .insert((user_id.to_string(), item_id.to_string()), rating);
    }

    /// Iterates over ((user id, item id), rating) entries in natural
    /// key order.
    pub fn iter(&self) -> impl Iterator<Item = (&(String, String), &f64)> {
        self.ratings.iter()
    }

    /// Number of held-out observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    /// Returns true if there are no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }
}
