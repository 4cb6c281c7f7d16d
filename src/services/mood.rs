use std::collections::HashMap;

/// Tag fragments associated with one mood
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoodTarget {
    pub name: String,
    fragments: Vec<String>,
}

impl MoodTarget {
    pub fn new(name: impl Into<String>, fragments: &[&str]) -> Self {
        Self {
            name: name.into(),
            fragments: fragments.iter().map(|f| f.to_lowercase()).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// True if any fragment occurs inside `tag`, ignoring case
    pub fn matches(&self, tag: &str) -> bool {
        let tag = tag.to_lowercase();
        self.fragments.iter().any(|fragment| tag.contains(fragment))
    }

    /// Number of tags that match, counted per occurrence
    pub fn count_matches<'a>(&self, tags: impl IntoIterator<Item = &'a String>) -> usize {
        if self.is_empty() {
            return 0;
        }
        tags.into_iter().filter(|tag| self.matches(tag)).count()
    }
}

/// Process-wide mood configuration
#[derive(Debug, Clone)]
pub struct MoodTable {
    moods: HashMap<String, MoodTarget>,
}

impl Default for MoodTable {
    fn default() -> Self {
        Self::new(vec![
            MoodTarget::new("happy", &["Comedy", "Feel-Good", "Family", "Uplifting"]),
            MoodTarget::new("sad", &["Drama", "Tearjerker", "Melancholy", "Tragedy"]),
            MoodTarget::new("excited", &["Action", "Adventure", "Thriller", "Heist"]),
            MoodTarget::new("scared", &["Horror", "Suspense", "Supernatural", "Slasher"]),
            MoodTarget::new("thoughtful", &["Mind-Bending", "Philosophical", "Sci-Fi", "Mystery"]),
            MoodTarget::new("romantic", &["Romance", "Love", "Romantic"]),
            MoodTarget::new("relaxed", &["Animation", "Slice of Life", "Cozy", "Music"]),
        ])
    }
}

impl MoodTable {
    pub fn new(targets: Vec<MoodTarget>) -> Self {
        let moods = targets
            .into_iter()
            .map(|target| (target.name.to_lowercase(), target))
            .collect();
        Self { moods }
    }

    /// Target for `name`; unknown moods yield an empty target
    pub fn target(&self, name: &str) -> MoodTarget {
        match self.moods.get(&name.trim().to_lowercase()) {
            Some(target) => target.clone(),
            None => {
                tracing::debug!(mood = %name, "Unknown mood");
                MoodTarget::default()
            }
        }
    }

    /// Mood names in alphabetical order
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.moods.keys().cloned().collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_mood_is_empty() {
        let table = MoodTable::default();
        let target = table.target("bored");
        assert!(target.is_empty());
        assert!(!target.matches("Comedy"));
    }

    #[test]
    fn test_lookup_ignores_case() {
        let table = MoodTable::default();
        assert!(!table.target("  Scared ").is_empty());
    }

    #[test]
    fn test_substring_match() {
        let target = MoodTarget::new("excited", &["Action"]);
        assert!(target.matches("Action"));
        assert!(target.matches("Martial Arts Action"));
        assert!(target.matches("action-packed"));
        assert!(!target.matches("Drama"));
    }

    #[test]
    fn test_count_matches_per_occurrence() {
        let target = MoodTarget::new("scared", &["Horror", "Suspense"]);
        let tags: Vec<String> = ["Horror", "Body Horror", "Suspense", "Drama"]
            .iter()
            .map(|t| t.to_string())
            .collect();
        assert_eq!(target.count_matches(&tags), 3);
    }

    #[test]
    fn test_names_sorted() {
        let table = MoodTable::new(vec![
            MoodTarget::new("Zen", &["Calm"]),
            MoodTarget::new("angry", &["Revenge"]),
        ]);
        assert_eq!(table.names(), vec!["angry", "zen"]);
    }
}
