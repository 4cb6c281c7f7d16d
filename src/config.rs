use serde::Deserialize;

use crate::services::{
    ranking::SelectionPolicy,
    scoring::{BlendWeights, ScoringStrategy},
    EngineSettings,
};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Path to the movie catalog CSV
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,

    /// Number of movies returned per feed batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Positive (4-5 star) votes needed before the ratings feed ranks strictly
    #[serde(default = "default_calibration_threshold")]
    pub calibration_threshold: usize,

    /// Sampling pool for the uncalibrated ratings feed
    #[serde(default = "default_cold_pool_size")]
    pub cold_pool_size: usize,

    /// Sampling pool for the seed/like feed
    #[serde(default = "default_picks_pool_size")]
    pub picks_pool_size: usize,

    /// Use top-k instead of pool sampling on the seed/like feed
    #[serde(default)]
    pub picks_deterministic: bool,

    /// Maximum number of search hits
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,

    /// Scoring strategy used by the seed/like feed when the request names none
    #[serde(default = "default_strategy")]
    pub default_strategy: ScoringStrategy,

    /// Bonus for candidates among the soul-mate persona's favorites
    #[serde(default = "default_social_bonus")]
    pub social_bonus: i64,

    /// Bonus per candidate tag matching the requested mood
    #[serde(default = "default_mood_bonus_per_tag")]
    pub mood_bonus_per_tag: i64,

    /// Multiplier applied to the content score in the blend strategy
    #[serde(default = "default_content_emphasis")]
    pub content_emphasis: i64,

    /// Blend scores must exceed this to be kept
    #[serde(default)]
    pub blend_floor: i64,

    /// Minimum Jaccard similarity for a soul-mate match
    #[serde(default = "default_persona_threshold")]
    pub persona_threshold: f64,

    /// Fixed seed for the shared random source
    #[serde(default)]
    pub rng_seed: Option<u64>,

    /// Log level used when RUST_LOG is unset
    #[serde(default = "default_rust_log")]
    pub rust_log: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_catalog_path() -> String {
    "global_movie_db.csv".to_string()
}

fn default_batch_size() -> usize {
    5
}

fn default_calibration_threshold() -> usize {
    5
}

fn default_cold_pool_size() -> usize {
    50
}

fn default_picks_pool_size() -> usize {
    20
}

fn default_search_limit() -> usize {
    10
}

fn default_strategy() -> ScoringStrategy {
    ScoringStrategy::Blend
}

fn default_social_bonus() -> i64 {
    50
}

fn default_mood_bonus_per_tag() -> i64 {
    10
}

fn default_content_emphasis() -> i64 {
    1
}

fn default_persona_threshold() -> f64 {
    0.1
}

fn default_rust_log() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            catalog_path: default_catalog_path(),
            batch_size: default_batch_size(),
            calibration_threshold: default_calibration_threshold(),
            cold_pool_size: default_cold_pool_size(),
            picks_pool_size: default_picks_pool_size(),
            picks_deterministic: false,
            search_limit: default_search_limit(),
            default_strategy: default_strategy(),
            social_bonus: default_social_bonus(),
            mood_bonus_per_tag: default_mood_bonus_per_tag(),
            content_emphasis: default_content_emphasis(),
            blend_floor: 0,
            persona_threshold: default_persona_threshold(),
            rng_seed: None,
            rust_log: default_rust_log(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let config = envy::from_env::<Config>()
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects tunables the engine cannot work with
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.batch_size == 0 {
            anyhow::bail!("BATCH_SIZE must be at least 1");
        }
        if self.cold_pool_size == 0 || self.picks_pool_size == 0 {
            anyhow::bail!("pool sizes must be at least 1");
        }
        if !self.persona_threshold.is_finite() || self.persona_threshold < 0.0 {
            anyhow::bail!(
                "PERSONA_THRESHOLD must be a non-negative number, got {}",
                self.persona_threshold
            );
        }
        Ok(())
    }

    /// Socket address string for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Scoring and selection tunables handed to the recommender
    pub fn engine_settings(&self) -> EngineSettings {
        let picks_selection = if self.picks_deterministic {
            SelectionPolicy::TopK
        } else {
            SelectionPolicy::PoolSample {
                pool_size: self.picks_pool_size,
            }
        };

        EngineSettings {
            batch_size: self.batch_size,
            calibration_threshold: self.calibration_threshold,
            cold_selection: SelectionPolicy::PoolSample {
                pool_size: self.cold_pool_size,
            },
            picks_selection,
            default_strategy: self.default_strategy,
            blend: BlendWeights {
                content_emphasis: self.content_emphasis,
                social_bonus: self.social_bonus,
                mood_bonus_per_tag: self.mood_bonus_per_tag,
                floor: self.blend_floor,
            },
            search_limit: self.search_limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bind_address(), "127.0.0.1:3000");
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let config = Config {
            batch_size: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let config = Config {
            persona_threshold: -0.5,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_engine_settings_projection() {
        let config = Config {
            picks_deterministic: true,
            cold_pool_size: 30,
            social_bonus: 100,
            ..Config::default()
        };
        let settings = config.engine_settings();
        assert_eq!(settings.picks_selection, SelectionPolicy::TopK);
        assert_eq!(
            settings.cold_selection,
            SelectionPolicy::PoolSample { pool_size: 30 }
        );
        assert_eq!(settings.blend.social_bonus, 100);
        assert_eq!(settings.batch_size, 5);
    }
}
