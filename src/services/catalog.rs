use std::collections::HashMap;
use std::path::PathBuf;

use crate::{
    error::AppResult,
    models::{CatalogRow, MovieRecord},
};

/// Where catalog bytes come from
///
/// `read` returns `Ok(None)` when the source does not exist. Any other failure is
/// an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    async fn read(&self) -> AppResult<Option<Vec<u8>>>;

    /// Human-readable location for logging
    fn describe(&self) -> String;
}

/// Catalog CSV on the local filesystem
pub struct CsvFileSource {
    path: PathBuf,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl CatalogSource for CsvFileSource {
    async fn read(&self) -> AppResult<Option<Vec<u8>>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Immutable, load-once movie catalog with title and id indexes
#[derive(Debug, Default)]
pub struct Catalog {
    movies: Vec<MovieRecord>,
    by_title: HashMap<String, usize>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    /// Loads the catalog, degrading to an empty one if the source is absent
    pub async fn load(source: &dyn CatalogSource) -> AppResult<Self> {
        let Some(bytes) = source.read().await? else {
            tracing::warn!(
                source = %source.describe(),
                "Catalog source not found, serving an empty catalog"
            );
            return Ok(Self::default());
        };

        let catalog = Self::from_csv(bytes.as_slice())?;
        tracing::info!(
            source = %source.describe(),
            movies = catalog.len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    /// Parses catalog CSV, skipping rows that fail to decode
    pub fn from_csv<R: std::io::Read>(reader: R) -> AppResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        // Fail early on an unreadable header row
        reader.headers()?;

        let mut records = Vec::new();
        let mut skipped = 0usize;
        for (line, row) in reader.deserialize::<CatalogRow>().enumerate() {
            match row {
                Ok(row) => records.push(MovieRecord::from(row)),
                Err(e) => {
                    skipped += 1;
                    tracing::warn!(row = line + 1, error = %e, "Skipping malformed catalog row");
                }
            }
        }

        let catalog = Self::from_records(records);
        if skipped > 0 {
            tracing::warn!(skipped, kept = catalog.len(), "Catalog rows skipped");
        }
        Ok(catalog)
    }

    /// Builds a catalog from records, dropping empty or duplicate ids
    pub fn from_records(records: impl IntoIterator<Item = MovieRecord>) -> Self {
        let mut catalog = Self::default();

        for movie in records {
            if movie.id.is_empty() || catalog.by_id.contains_key(&movie.id) {
                tracing::debug!(id = %movie.id, title = %movie.title, "Dropping catalog entry");
                continue;
            }

            let index = catalog.movies.len();
            catalog.by_id.insert(movie.id.clone(), index);
            catalog.by_title.entry(movie.title.clone()).or_insert(index);
            catalog.movies.push(movie);
        }

        catalog
    }

    /// Exact-title lookup; the first catalog entry wins for duplicated titles
    pub fn lookup_by_title(&self, title: &str) -> Option<&MovieRecord> {
        self.by_title.get(title).map(|&index| &self.movies[index])
    }

    pub fn get(&self, id: &str) -> Option<&MovieRecord> {
        self.by_id.get(id).map(|&index| &self.movies[index])
    }

    /// Case-insensitive substring search on titles, in catalog order
    pub fn search(&self, query: &str, limit: usize) -> Vec<&MovieRecord> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.movies
            .iter()
            .filter(|movie| movie.title.to_lowercase().contains(&needle))
            .take(limit)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MovieRecord> {
        self.movies.iter()
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}
