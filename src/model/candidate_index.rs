use std::collections::HashSet;

pub const MAX_SUGGESTIONS: usize = 10;

/// Titles offered as autocomplete suggestions. Never used to decide whether a
/// guess is right.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateIndex {
    titles: Vec<String>,
}

impl CandidateIndex {
    /// Keeps the first occurrence of each title, in input order.
    pub fn new<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let titles = titles
            .into_iter()
            .map(Into::into)
            .filter(|t: &String| !t.trim().is_empty() && seen.insert(t.clone()))
            .collect();

        Self { titles }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    pub fn suggestions(&self, query: &str) -> Vec<String> {
        filter_suggestions(query, &self.titles)
    }
}

/// Case-insensitive substring filter, order-preserving, capped at
/// [`MAX_SUGGESTIONS`]. An empty query gives no suggestions.
pub fn filter_suggestions(query: &str, candidates: &[String]) -> Vec<String> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    candidates
        .iter()
        .filter(|title| title.to_lowercase().contains(&query))
        .take(MAX_SUGGESTIONS)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn filters_in_candidate_order() {
        let candidates = titles(&["Alien", "The Aviator", "Alias"]);
        assert_eq!(filter_suggestions("ali", &candidates), vec!["Alien", "Alias"]);
    }

    #[test]
    fn caps_at_ten() {
        let candidates: Vec<String> = (0..100).map(|i| format!("Movie {i}")).collect();
        let found = filter_suggestions("movie", &candidates);
        assert_eq!(found.len(), MAX_SUGGESTIONS);
        assert_eq!(found[0], "Movie 0");
        assert_eq!(found[9], "Movie 9");
    }

    #[test]
    fn empty_query_is_empty() {
        let candidates = titles(&["Alien"]);
        assert!(filter_suggestions("", &candidates).is_empty());
        assert!(filter_suggestions("   ", &candidates).is_empty());
    }

    #[test]
    fn query_is_case_insensitive() {
        let candidates = titles(&["Heat (1995)", "The Heat (2013)"]);
        assert_eq!(filter_suggestions("HEAT", &candidates).len(), 2);
    }

    #[test]
    fn index_deduplicates_and_keeps_case() {
        let index = CandidateIndex::new(["Heat (1995)", "Alien", "Heat (1995)", ""]);
        assert_eq!(index.titles(), &titles(&["Heat (1995)", "Alien"])[..]);
    }
}
