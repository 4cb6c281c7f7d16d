use std::collections::HashSet;

/// A fixed reference taste ("bot") with its favorite titles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SocialPersona {
    pub name: String,
    pub favorites: HashSet<String>,
}

impl SocialPersona {
    pub fn new(name: impl Into<String>, favorites: &[&str]) -> Self {
        Self {
            name: name.into(),
            favorites: favorites.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn likes(&self, title: &str) -> bool {
        self.favorites.contains(title)
    }
}

/// Outcome of matching a user against the personas
#[derive(Debug, Clone, PartialEq)]
pub struct SocialMatch<'a> {
    pub persona: Option<&'a SocialPersona>,
    pub similarity: f64,
}

/// |A ∩ B| / |A ∪ B|; two empty sets give 0
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

/// Finds the persona whose favorites overlap most with the user's titles
#[derive(Debug, Clone)]
pub struct SocialMatcher {
    personas: Vec<SocialPersona>,
    threshold: f64,
}

impl Default for SocialMatcher {
    fn default() -> Self {
        Self::new(default_personas(), 0.1)
    }
}

impl SocialMatcher {
    pub fn new(personas: Vec<SocialPersona>, threshold: f64) -> Self {
        Self {
            personas,
            threshold,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Best persona by Jaccard similarity.
    ///
    /// Ties go to the persona listed first. `persona` is `None` unless the best
    /// similarity is strictly above the threshold; `similarity` is always the best
    /// value seen.
    pub fn best_match(&self, user_titles: &HashSet<String>) -> SocialMatch<'_> {
        let mut best: Option<&SocialPersona> = None;
        let mut best_similarity = 0.0;

        for persona in &self.personas {
            let similarity = jaccard(user_titles, &persona.favorites);
            if best.is_none() || similarity > best_similarity {
                best = Some(persona);
                best_similarity = similarity;
            }
        }

        let persona = best.filter(|_| best_similarity > self.threshold);
        if let Some(persona) = persona {
            tracing::debug!(persona = %persona.name, similarity = best_similarity, "Soul-mate found");
        }

        SocialMatch {
            persona,
            similarity: best_similarity,
        }
    }
}

fn default_personas() -> Vec<SocialPersona> {
    vec![
        SocialPersona::new(
            "Nolan Fan",
            &["Inception", "Interstellar", "The Dark Knight", "The Prestige", "Memento", "Tenet"],
        ),
        SocialPersona::new(
            "Crime Buff",
            &["The Godfather", "Heat", "Goodfellas", "Pulp Fiction", "The Departed", "Se7en"],
        ),
        SocialPersona::new(
            "Romantic",
            &["The Notebook", "La La Land", "Titanic", "Pride & Prejudice", "Before Sunrise"],
        ),
        SocialPersona::new(
            "Horror Hound",
            &["The Shining", "Hereditary", "Get Out", "The Conjuring", "Alien", "It Follows"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(titles: &[&str]) -> HashSet<String> {
        titles.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_jaccard_basics() {
        assert_eq!(jaccard(&set(&["X", "Y"]), &set(&["Y", "Z"])), 1.0 / 3.0);
        assert_eq!(jaccard(&set(&["X"]), &set(&["X"])), 1.0);
        assert_eq!(jaccard(&set(&[]), &set(&[])), 0.0);
        assert_eq!(jaccard(&set(&["X"]), &set(&[])), 0.0);
    }

    #[test]
    fn test_jaccard_is_symmetric() {
        let a = set(&["A", "B", "C"]);
        let b = set(&["B", "C", "D", "E"]);
        assert_eq!(jaccard(&a, &b), jaccard(&b, &a));
    }

    #[test]
    fn test_tie_goes_to_first_persona() {
        let matcher = SocialMatcher::new(
            vec![
                SocialPersona::new("first", &["X", "Y"]),
                SocialPersona::new("second", &["Y", "Z"]),
            ],
            0.1,
        );

        let result = matcher.best_match(&set(&["Y"]));
        assert_eq!(result.similarity, 0.5);
        assert_eq!(result.persona.unwrap().name, "first");
    }

    #[test]
    fn test_below_threshold_is_no_match() {
        let matcher = SocialMatcher::new(
            vec![SocialPersona::new("wide", &["A", "B", "C", "D", "E", "F", "G", "H", "I", "J"])],
            0.1,
        );

        // 1/10 is not strictly above 0.1
        let result = matcher.best_match(&set(&["A"]));
        assert!(result.persona.is_none());
        assert_eq!(result.similarity, 0.1);
    }

    #[test]
    fn test_empty_selection_matches_nobody() {
        let matcher = SocialMatcher::default();
        let result = matcher.best_match(&HashSet::new());
        assert!(result.persona.is_none());
        assert_eq!(result.similarity, 0.0);
    }

    #[test]
    fn test_default_personas_match() {
        let matcher = SocialMatcher::default();
        let result = matcher.best_match(&set(&["Heat", "Goodfellas"]));
        assert_eq!(result.persona.unwrap().name, "Crime Buff");
    }

    #[test]
    fn test_no_personas() {
        let matcher = SocialMatcher::new(vec![], 0.1);
        let result = matcher.best_match(&set(&["Heat"]));
        assert!(result.persona.is_none());
    }
}
