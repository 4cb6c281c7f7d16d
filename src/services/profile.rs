use std::collections::{HashMap, HashSet};

use crate::{
    error::{AppError, AppResult},
    models::UserProfile,
    services::catalog::Catalog,
};

/// Tag weight contributed by a star rating: 5→+3, 4→+1, 3→0, 2→−1, 1→−3
pub fn star_weight(stars: i64) -> i64 {
    match stars {
        5 => 3,
        4 => 1,
        2 => -1,
        1 => -3,
        _ => 0,
    }
}

const SEED_WEIGHT: i64 = 1;
const LIKE_WEIGHT: i64 = 2;

/// Profile built from star ratings
#[derive(Debug, Clone, Default)]
pub struct RatedProfile {
    pub profile: UserProfile,
    /// Catalog titles rated 4 or 5
    pub positive_votes: usize,
    /// Catalog titles rated 4 or 5, used for soul-mate matching
    pub liked_titles: HashSet<String>,
}

impl RatedProfile {
    pub fn is_calibrated(&self, threshold: usize) -> bool {
        self.positive_votes >= threshold
    }
}

/// Profile built from seed picks and in-feed likes
#[derive(Debug, Clone, Default)]
pub struct PicksProfile {
    pub profile: UserProfile,
    /// Seeds that resolved to a catalog movie
    pub valid_seeds: usize,
    /// Seed and like titles found in the catalog
    pub selected_titles: HashSet<String>,
}

/// Builds a profile from title → stars.
///
/// Titles missing from the catalog are skipped. Stars outside 1..=5 are rejected.
pub fn build_from_ratings(
    catalog: &Catalog,
    ratings: &HashMap<String, i64>,
) -> AppResult<RatedProfile> {
    if let Some((title, stars)) = ratings.iter().find(|(_, stars)| !(1..=5).contains(*stars)) {
        return Err(AppError::InvalidInput(format!(
            "rating for '{}' must be between 1 and 5, got {}",
            title, stars
        )));
    }

    let mut built = RatedProfile::default();

    for (title, &stars) in ratings {
        let Some(movie) = catalog.lookup_by_title(title) else {
            tracing::debug!(title = %title, "Rated title not in catalog");
            continue;
        };

        if stars >= 4 {
            built.positive_votes += 1;
            built.liked_titles.insert(movie.title.clone());
        }
        built.profile.add_all(&movie.tags, star_weight(stars));
    }

    Ok(built)
}

/// Builds a profile from seed picks (+1 per tag) and likes (+2 per tag).
///
/// Dislikes never touch the profile; they are only excluded from candidates.
pub fn build_from_picks(catalog: &Catalog, seeds: &[String], likes: &[String]) -> PicksProfile {
    let mut built = PicksProfile::default();

    for title in seeds {
        if let Some(movie) = catalog.lookup_by_title(title) {
            built.profile.add_all(&movie.tags, SEED_WEIGHT);
            built.selected_titles.insert(movie.title.clone());
            built.valid_seeds += 1;
        } else {
            tracing::debug!(title = %title, "Seed title not in catalog");
        }
    }

    for title in likes {
        if let Some(movie) = catalog.lookup_by_title(title) {
            built.profile.add_all(&movie.tags, LIKE_WEIGHT);
            built.selected_titles.insert(movie.title.clone());
        } else {
            tracing::debug!(title = %title, "Liked title not in catalog");
        }
    }

    built
}
