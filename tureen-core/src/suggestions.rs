//! Cuisine-to-category suggestions for the dish authoring flow.
//!
//! Maps a restaurant's cuisine label to an ordered list of dish category
//! names to pre-surface as quick-select options. Suggestion data is loaded
//! from `data/category_suggestions.json` at compile time.

use serde::Deserialize;
use std::collections::HashMap;
use std::sync::LazyLock;

/// The raw JSON structure for the suggestions data file.
#[derive(Deserialize)]
struct SuggestionsData {
    cuisines: HashMap<String, Vec<String>>,
}

/// Suggestion map loaded from JSON, keyed by lowercased cuisine label.
static SUGGESTION_MAP: LazyLock<HashMap<String, Vec<String>>> = LazyLock::new(|| {
    let json = include_str!("../../data/category_suggestions.json");
    let data: SuggestionsData =
        serde_json::from_str(json).expect("Failed to parse category_suggestions.json");

    data.cuisines
        .into_iter()
        .map(|(cuisine, categories)| (cuisine.to_lowercase(), categories))
        .collect()
});

/// Suggest dish category names for a cuisine label.
///
/// The list is advisory and ordered; operators can still pick any active
/// category. Matching is case-insensitive and ignores surrounding
/// whitespace. An unknown cuisine yields an empty list, never an error.
pub fn suggest_categories(cuisine: &str) -> &'static [String] {
    let key = cuisine.trim().to_lowercase();

    SUGGESTION_MAP
        .get(&key)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_cuisine() {
        let suggestions = suggest_categories("italian");
        assert!(!suggestions.is_empty());
        assert_eq!(suggestions[0], "Antipasti");
        assert!(suggestions.contains(&"Pizza".to_string()));
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        assert_eq!(suggest_categories("Italian"), suggest_categories("italian"));
        assert_eq!(
            suggest_categories("  THAI  "),
            suggest_categories("thai")
        );
    }

    #[test]
    fn test_unknown_cuisine_is_empty_not_error() {
        assert!(suggest_categories("martian").is_empty());
        assert!(suggest_categories("").is_empty());
    }

    #[test]
    fn test_order_is_preserved() {
        let suggestions = suggest_categories("japanese");
        let sushi = suggestions.iter().position(|c| c == "Sushi").unwrap();
        let ramen = suggestions.iter().position(|c| c == "Ramen").unwrap();
        assert!(sushi < ramen);
    }
}
