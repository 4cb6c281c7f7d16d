use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    models::{MovieRecord, UserProfile},
    services::{mood::MoodTarget, social::SocialPersona},
};

/// Cold-start scores are drawn from this range
pub const EXPLORATION_RANGE: std::ops::RangeInclusive<i64> = 1..=50;

const RAW_MULTIPLIER: i64 = 5;
const RAW_MAX: i64 = 100;
const PERCENT_BOOST: f64 = 3.5;
const PERCENT_CAP: f64 = 98.0;
const MAX_REASON_TAGS: usize = 3;

/// How a candidate is scored against a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringStrategy {
    /// 5 × matched weight, clamped to 0..=100; random when the profile is empty
    Raw,
    /// Share of total affinity, boosted ×3.5 and capped at 98
    Percentage,
    /// Content + soul-mate bonus + mood bonus, gated by a floor
    Blend,
}

/// Tunables of the blend strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlendWeights {
    pub content_emphasis: i64,
    pub social_bonus: i64,
    pub mood_bonus_per_tag: i64,
    /// Candidates must score strictly above this
    pub floor: i64,
}

impl Default for BlendWeights {
    fn default() -> Self {
        Self {
            content_emphasis: 1,
            social_bonus: 50,
            mood_bonus_per_tag: 10,
            floor: 0,
        }
    }
}

/// Everything a candidate is scored against
#[derive(Debug, Clone, Copy)]
pub struct ScoreContext<'a> {
    pub profile: &'a UserProfile,
    pub mood: Option<&'a MoodTarget>,
    pub soul_mate: Option<&'a SocialPersona>,
}

impl<'a> ScoreContext<'a> {
    pub fn new(profile: &'a UserProfile) -> Self {
        Self {
            profile,
            mood: None,
            soul_mate: None,
        }
    }

    pub fn with_mood(mut self, mood: Option<&'a MoodTarget>) -> Self {
        self.mood = mood.filter(|target| !target.is_empty());
        self
    }

    pub fn with_soul_mate(mut self, persona: Option<&'a SocialPersona>) -> Self {
        self.soul_mate = persona;
        self
    }
}

/// Score of one candidate plus a human-readable explanation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreOutcome {
    pub score: i64,
    /// Candidate tags present in the profile, per occurrence
    pub matched_tags: Vec<String>,
    pub reason: String,
}

#[derive(Debug, Clone, Copy)]
pub struct Scorer {
    strategy: ScoringStrategy,
    blend: BlendWeights,
}

impl Scorer {
    pub fn new(strategy: ScoringStrategy, blend: BlendWeights) -> Self {
        Self { strategy, blend }
    }

    /// Scores `candidate`. Only the raw strategy on an empty profile uses `rng`.
    pub fn score<R: Rng + ?Sized>(
        &self,
        candidate: &MovieRecord,
        ctx: &ScoreContext<'_>,
        rng: &mut R,
    ) -> ScoreOutcome {
        let matched_tags: Vec<String> = candidate
            .tags
            .iter()
            .filter(|tag| ctx.profile.contains(tag))
            .cloned()
            .collect();
        let content: i64 = matched_tags.iter().map(|tag| ctx.profile.weight(tag)).sum();

        let score = match self.strategy {
            ScoringStrategy::Raw => raw_score(ctx.profile, content, rng),
            ScoringStrategy::Percentage => percentage_score(ctx.profile, content),
            ScoringStrategy::Blend => {
                let social = match ctx.soul_mate {
                    Some(persona) if persona.likes(&candidate.title) => self.blend.social_bonus,
                    _ => 0,
                };
                let mood_hits = ctx
                    .mood
                    .map(|target| target.count_matches(&candidate.tags))
                    .unwrap_or(0) as i64;

                content * self.blend.content_emphasis
                    + social
                    + self.blend.mood_bonus_per_tag * mood_hits
            }
        };

        let reason = explain(self.strategy, candidate, ctx, &matched_tags);
        ScoreOutcome {
            score,
            matched_tags,
            reason,
        }
    }

    /// Relevance gate; only the blend strategy filters
    pub fn retains(&self, outcome: &ScoreOutcome) -> bool {
        match self.strategy {
            ScoringStrategy::Blend => outcome.score > self.blend.floor,
            ScoringStrategy::Raw | ScoringStrategy::Percentage => true,
        }
    }
}

fn raw_score<R: Rng + ?Sized>(profile: &UserProfile, content: i64, rng: &mut R) -> i64 {
    if profile.is_empty() {
        return rng.random_range(EXPLORATION_RANGE);
    }
    (content * RAW_MULTIPLIER).clamp(0, RAW_MAX)
}

fn percentage_score(profile: &UserProfile, content: i64) -> i64 {
    // Shares are only defined against a positive total
    let total = profile.total_weight();
    if profile.is_empty() || total <= 0 {
        return 0;
    }

    let raw_pct = 100.0 * content as f64 / total as f64;
    (raw_pct * PERCENT_BOOST).clamp(0.0, PERCENT_CAP) as i64
}

// Priority: mood > soul-mate > strongest matched tags. Mood and soul-mate only
// count when the blend strategy scored them.
fn explain(
    strategy: ScoringStrategy,
    candidate: &MovieRecord,
    ctx: &ScoreContext<'_>,
    matched_tags: &[String],
) -> String {
    if strategy == ScoringStrategy::Blend {
        if let Some(mood) = ctx.mood {
            if candidate.tags.iter().any(|tag| mood.matches(tag)) {
                return format!("Fits your {} mood", mood.name);
            }
        }

        if let Some(persona) = ctx.soul_mate {
            if persona.likes(&candidate.title) {
                return format!("Your soul-mate {} loved this", persona.name);
            }
        }
    }

    if ctx.profile.is_empty() {
        return "Something new to explore".to_string();
    }

    let mut liked: Vec<(&str, i64)> = Vec::new();
    for tag in matched_tags {
        let weight = ctx.profile.weight(tag);
        if weight > 0 && !liked.iter().any(|(seen, _)| *seen == tag.as_str()) {
            liked.push((tag.as_str(), weight));
        }
    }
    // stable: equal weights keep tag order
    liked.sort_by(|a, b| b.1.cmp(&a.1));

    if liked.is_empty() {
        return "Based on your DNA".to_string();
    }

    let names: Vec<&str> = liked
        .iter()
        .take(MAX_REASON_TAGS)
        .map(|(tag, _)| *tag)
        .collect();
    format!("Because you like {}", names.join(", "))
}
