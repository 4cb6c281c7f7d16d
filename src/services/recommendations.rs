use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use rand::Rng;

use crate::{
    error::{AppError, AppResult},
    models::{
        FeedItem, MovieRecord, PicksFeedRequest, PicksFeedResponse, RatedFeedRequest,
        RatedFeedResponse, SearchHit, SoulMate,
    },
    services::{
        catalog::Catalog,
        mood::MoodTable,
        profile,
        ranking::{rank_and_select, Scored, SelectionPolicy},
        scoring::{BlendWeights, ScoreContext, ScoreOutcome, Scorer, ScoringStrategy},
        social::{SocialMatcher, SocialPersona},
    },
};

/// Scoring and selection tunables
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineSettings {
    pub batch_size: usize,
    /// Positive votes needed before the ratings feed switches to top-k
    pub calibration_threshold: usize,
    /// Selection for the uncalibrated ratings feed
    pub cold_selection: SelectionPolicy,
    /// Selection for the seed/like feed
    pub picks_selection: SelectionPolicy,
    /// Strategy for the seed/like feed when the request names none
    pub default_strategy: ScoringStrategy,
    pub blend: BlendWeights,
    pub search_limit: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            batch_size: 5,
            calibration_threshold: 5,
            cold_selection: SelectionPolicy::PoolSample { pool_size: 50 },
            picks_selection: SelectionPolicy::PoolSample { pool_size: 20 },
            default_strategy: ScoringStrategy::Blend,
            blend: BlendWeights::default(),
            search_limit: 10,
        }
    }
}

/// A catalog movie with its score for one request
#[derive(Debug, Clone)]
pub struct ScoredCandidate<'a> {
    pub movie: &'a MovieRecord,
    pub outcome: ScoreOutcome,
}

impl Scored for ScoredCandidate<'_> {
    fn score(&self) -> i64 {
        self.outcome.score
    }
}

impl From<ScoredCandidate<'_>> for FeedItem {
    fn from(candidate: ScoredCandidate<'_>) -> Self {
        let movie = candidate.movie;
        Self {
            id: movie.id.clone(),
            title: movie.title.clone(),
            year: movie.year,
            score: candidate.outcome.score,
            overview: movie.overview.clone(),
            poster_url: movie.poster_uri.clone(),
            reason: candidate.outcome.reason,
        }
    }
}

/// Candidates dropped before scoring
#[derive(Debug, Default)]
struct Exclusions<'r> {
    ids: HashSet<&'r str>,
    titles: HashSet<&'r str>,
}

impl<'r> Exclusions<'r> {
    fn ids(mut self, ids: &'r [String]) -> Self {
        self.ids.extend(ids.iter().map(String::as_str));
        self
    }

    fn titles(mut self, titles: impl IntoIterator<Item = &'r String>) -> Self {
        self.titles.extend(titles.into_iter().map(String::as_str));
        self
    }

    fn excludes(&self, movie: &MovieRecord) -> bool {
        self.ids.contains(movie.id.as_str()) || self.titles.contains(movie.title.as_str())
    }
}

/// Recommendation engine over a shared, read-only catalog
pub struct Recommender {
    catalog: Arc<Catalog>,
    moods: MoodTable,
    social: SocialMatcher,
    settings: EngineSettings,
}

impl Recommender {
    pub fn new(
        catalog: Arc<Catalog>,
        moods: MoodTable,
        social: SocialMatcher,
        settings: EngineSettings,
    ) -> Self {
        Self {
            catalog,
            moods,
            social,
            settings,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn moods(&self) -> &MoodTable {
        &self.moods
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Title search, capped at the configured limit
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        self.catalog
            .search(query, self.settings.search_limit)
            .into_iter()
            .map(SearchHit::from)
            .collect()
    }

    pub fn movie(&self, id: &str) -> AppResult<&MovieRecord> {
        self.catalog
            .get(id)
            .ok_or_else(|| AppError::NotFound(format!("movie '{}'", id)))
    }

    /// Next feed batch from 1-5 star ratings.
    ///
    /// An empty profile falls back to exploration. Once enough titles are rated
    /// 4 or 5 the batch is the strict top-k; before that it is sampled from the
    /// head of the ranking.
    pub fn next_batch<R: Rng + ?Sized>(
        &self,
        request: &RatedFeedRequest,
        rng: &mut R,
    ) -> AppResult<RatedFeedResponse> {
        let start = Instant::now();
        let built = profile::build_from_ratings(&self.catalog, &request.rated_movies)?;
        let is_calibrated = built.is_calibrated(self.settings.calibration_threshold);
        let strategy = request.strategy.unwrap_or(ScoringStrategy::Raw);

        let mood = request.mood.as_deref().map(|name| self.moods.target(name));
        let soul_mate = match strategy {
            ScoringStrategy::Blend => self.social.best_match(&built.liked_titles).persona,
            _ => None,
        };

        let ctx = ScoreContext::new(&built.profile)
            .with_mood(mood.as_ref())
            .with_soul_mate(soul_mate);
        // Rated titles stay rankable until the client reports them viewed
        let exclusions = Exclusions::default().ids(&request.viewed_ids);

        let policy = if is_calibrated {
            SelectionPolicy::TopK
        } else {
            self.settings.cold_selection
        };

        let scorer = Scorer::new(strategy, self.settings.blend);
        let movies = self.select(scorer, &ctx, &exclusions, policy, rng);

        tracing::info!(
            profile_tags = built.profile.len(),
            positive_votes = built.positive_votes,
            is_calibrated,
            strategy = ?strategy,
            returned = movies.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "Ratings feed batch built"
        );

        Ok(RatedFeedResponse {
            is_calibrated,
            movies,
        })
    }

    /// Recommendations from seed picks and in-feed likes.
    ///
    /// At least one seed must exist in the catalog.
    pub fn recommend<R: Rng + ?Sized>(
        &self,
        request: &PicksFeedRequest,
        rng: &mut R,
    ) -> AppResult<PicksFeedResponse> {
        let start = Instant::now();
        let built =
            profile::build_from_picks(&self.catalog, &request.seed_movies, &request.rated_movies);

        if built.valid_seeds == 0 {
            return Err(AppError::NotFound(
                "none of the seed movies are in the catalog".to_string(),
            ));
        }

        let strategy = request.strategy.unwrap_or(self.settings.default_strategy);
        let social = self.social.best_match(&built.selected_titles);
        let mood = request.mood.as_deref().map(|name| self.moods.target(name));

        let ctx = ScoreContext::new(&built.profile)
            .with_mood(mood.as_ref())
            .with_soul_mate(social.persona);
        let exclusions = Exclusions::default()
            .ids(&request.viewed_ids)
            .titles(&request.seed_movies)
            .titles(&request.rated_movies)
            .titles(&request.disliked_movies);

        let scorer = Scorer::new(strategy, self.settings.blend);
        let movies = self.select(scorer, &ctx, &exclusions, self.settings.picks_selection, rng);

        tracing::info!(
            profile_tags = built.profile.len(),
            valid_seeds = built.valid_seeds,
            soul_mate = social.persona.map(|p| p.name.as_str()).unwrap_or("none"),
            strategy = ?strategy,
            returned = movies.len(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "Picks feed batch built"
        );

        Ok(PicksFeedResponse {
            soul_mate: social.persona.map(|persona| soul_mate(persona, social.similarity)),
            movies,
        })
    }

    /// Scores every eligible candidate, then ranks and selects a batch
    fn select<R: Rng + ?Sized>(
        &self,
        scorer: Scorer,
        ctx: &ScoreContext<'_>,
        exclusions: &Exclusions<'_>,
        policy: SelectionPolicy,
        rng: &mut R,
    ) -> Vec<FeedItem> {
        let candidates: Vec<ScoredCandidate<'_>> = self
            .catalog
            .iter()
            .filter(|movie| !exclusions.excludes(movie))
            .map(|movie| ScoredCandidate {
                movie,
                outcome: scorer.score(movie, ctx, rng),
            })
            .filter(|candidate| scorer.retains(&candidate.outcome))
            .collect();

        tracing::debug!(eligible = candidates.len(), policy = ?policy, "Candidates scored");

        rank_and_select(candidates, policy, self.settings.batch_size, rng)
            .into_iter()
            .map(FeedItem::from)
            .collect()
    }
}

fn soul_mate(persona: &SocialPersona, similarity: f64) -> SoulMate {
    SoulMate {
        name: persona.name.clone(),
        similarity,
    }
}
