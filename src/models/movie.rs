use serde::{Deserialize, Serialize};

/// A movie in the catalog. Never mutated after load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieRecord {
    /// TMDb identifier, unique within the catalog
    pub id: String,
    pub title: String,
    pub year: Option<i32>,
    /// Deep tags in source order; duplicates are kept
    pub tags: Vec<String>,
    pub overview: String,
    /// Empty when the source has no poster
    pub poster_uri: String,
}

impl MovieRecord {
    pub fn new(id: impl Into<String>, title: impl Into<String>, tags: &[&str]) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            year: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            overview: String::new(),
            poster_uri: String::new(),
        }
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }
}

/// One row of the catalog CSV
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogRow {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "TMDb ID")]
    pub tmdb_id: String,
    #[serde(rename = "Deep Tags", default)]
    pub deep_tags: String,
    #[serde(rename = "Overview", default)]
    pub overview: String,
    #[serde(rename = "Poster URL", default)]
    pub poster_url: Option<String>,
}

impl From<CatalogRow> for MovieRecord {
    fn from(row: CatalogRow) -> Self {
        Self {
            id: row.tmdb_id.trim().to_string(),
            title: row.title.trim().to_string(),
            year: parse_year(&row.year),
            tags: parse_tags(&row.deep_tags),
            overview: row.overview,
            poster_uri: row.poster_url.unwrap_or_default().trim().to_string(),
        }
    }
}

/// Splits a comma-separated tag string, trimming each label
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

// Spreadsheet exports sometimes write years as floats ("1999.0")
fn parse_year(raw: &str) -> Option<i32> {
    let raw = raw.trim();
    raw.parse::<i32>()
        .ok()
        .or_else(|| raw.parse::<f64>().ok().filter(|y| y.is_finite()).map(|y| y as i32))
}
