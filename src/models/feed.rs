use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::MovieRecord;
use crate::services::scoring::ScoringStrategy;

/// Query string for title search
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: String,
}

/// A single search result
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchHit {
    pub title: String,
    pub year: Option<i32>,
    pub id: String,
}

impl From<&MovieRecord> for SearchHit {
    fn from(movie: &MovieRecord) -> Self {
        Self {
            title: movie.title.clone(),
            year: movie.year,
            id: movie.id.clone(),
        }
    }
}

/// Feed request built from 1-5 star ratings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RatedFeedRequest {
    /// Title -> stars, e.g. {"Matrix": 5, "Barbie": 1}
    #[serde(default)]
    pub rated_movies: HashMap<String, i64>,
    #[serde(default)]
    pub viewed_ids: Vec<String>,
    #[serde(default)]
    pub strategy: Option<ScoringStrategy>,
    #[serde(default)]
    pub mood: Option<String>,
}

/// Feed request built from positive-only picks
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PicksFeedRequest {
    /// Explicit picks, +1 per tag
    #[serde(default)]
    pub seed_movies: Vec<String>,
    /// In-feed likes, +2 per tag
    #[serde(default)]
    pub rated_movies: Vec<String>,
    /// Excluded from candidates, never penalized
    #[serde(default)]
    pub disliked_movies: Vec<String>,
    #[serde(default)]
    pub viewed_ids: Vec<String>,
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub strategy: Option<ScoringStrategy>,
}

/// A recommended movie as returned to the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedItem {
    pub id: String,
    pub title: String,
    pub year: Option<i32>,
    pub score: i64,
    pub overview: String,
    pub poster_url: String,
    pub reason: String,
}

/// Response of the ratings feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatedFeedResponse {
    pub is_calibrated: bool,
    pub movies: Vec<FeedItem>,
}

/// Best-matching persona for the picks feed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SoulMate {
    pub name: String,
    pub similarity: f64,
}

/// Response of the picks feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PicksFeedResponse {
    pub soul_mate: Option<SoulMate>,
    pub movies: Vec<FeedItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rated_request_defaults() {
        let request: RatedFeedRequest =
            serde_json::from_str(r#"{"rated_movies": {"Heat": 5}}"#).unwrap();
        assert_eq!(request.rated_movies.get("Heat"), Some(&5));
        assert!(request.viewed_ids.is_empty());
        assert!(request.strategy.is_none());
    }

    #[test]
    fn test_picks_request_strategy() {
        let request: PicksFeedRequest = serde_json::from_str(
            r#"{"seed_movies": ["Heat"], "strategy": "percentage", "mood": "excited"}"#,
        )
        .unwrap();
        assert_eq!(request.strategy, Some(ScoringStrategy::Percentage));
        assert_eq!(request.mood.as_deref(), Some("excited"));
        assert!(request.disliked_movies.is_empty());
    }
}
