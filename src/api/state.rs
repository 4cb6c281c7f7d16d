use std::sync::{Arc, Mutex, MutexGuard};

use rand::{rngs::StdRng, SeedableRng};

use crate::{
    error::{AppError, AppResult},
    services::{Catalog, EngineSettings, MoodTable, Recommender, SocialMatcher},
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<AppStateInner>,
}

/// Read-only engine plus the shared random source
pub struct AppStateInner {
    pub recommender: Recommender,
    rng: Mutex<StdRng>,
}

impl AppState {
    /// Creates state over a loaded catalog; `rng_seed` makes sampling reproducible
    pub fn new(
        catalog: Arc<Catalog>,
        moods: MoodTable,
        social: SocialMatcher,
        settings: EngineSettings,
        rng_seed: Option<u64>,
    ) -> Self {
        let rng = match rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            inner: Arc::new(AppStateInner {
                recommender: Recommender::new(catalog, moods, social, settings),
                rng: Mutex::new(rng),
            }),
        }
    }

    /// State with default tables and settings
    pub fn with_catalog(catalog: Catalog, rng_seed: Option<u64>) -> Self {
        Self::new(
            Arc::new(catalog),
            MoodTable::default(),
            SocialMatcher::default(),
            EngineSettings::default(),
            rng_seed,
        )
    }

    pub fn recommender(&self) -> &Recommender {
        &self.inner.recommender
    }

    /// Locks the random source for one synchronous engine call
    pub fn rng(&self) -> AppResult<MutexGuard<'_, StdRng>> {
        self.inner
            .rng
            .lock()
            .map_err(|_| AppError::Internal("random source lock poisoned".to_string()))
    }
}
