use std::collections::HashMap;

use serde::Serialize;

/// Signed tag affinities built from one request's feedback.
///
/// Reading a tag that was never touched yields 0. A tag that was touched with a
/// zero weight (a 3-star rating) is still present, so `contains` and `is_empty`
/// see it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    weights: HashMap<String, i64>,
}

impl UserProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `weight` to `tag`, creating the entry if needed
    pub fn add(&mut self, tag: &str, weight: i64) {
        *self.weights.entry(tag.to_string()).or_insert(0) += weight;
    }

    /// Adds `weight` to every tag of a movie, once per occurrence
    pub fn add_all<'a>(&mut self, tags: impl IntoIterator<Item = &'a String>, weight: i64) {
        for tag in tags {
            self.add(tag, weight);
        }
    }

    pub fn weight(&self, tag: &str) -> i64 {
        self.weights.get(tag).copied().unwrap_or(0)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.weights.contains_key(tag)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Sum of every weight, negatives included
    pub fn total_weight(&self) -> i64 {
        self.weights.values().sum()
    }
}

impl<S: Into<String>> FromIterator<(S, i64)> for UserProfile {
    fn from_iter<I: IntoIterator<Item = (S, i64)>>(iter: I) -> Self {
        let mut profile = UserProfile::new();
        for (tag, weight) in iter {
            let tag: String = tag.into();
            profile.add(&tag, weight);
        }
        profile
    }
}
