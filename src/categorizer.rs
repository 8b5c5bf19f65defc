//! # Ingredient Categorizer Module
//!
//! This module assigns a grocery category to an ingredient name using
//! ordered whole-word vocabulary patterns. The vocabularies are checked in a
//! fixed order (produce, meat & seafood, dairy, pantry) and the first match
//! wins, so a word appearing in two vocabularies resolves to the earlier one.
//! Unrecognized ingredients default to the pantry category, so items are
//! never left uncategorized.

use crate::models::GroceryCategory;
use lazy_static::lazy_static;
use regex::Regex;

// Whole-word vocabularies for each recognized grocery section
pub const PRODUCE_PATTERN: &str = r"(?i)\b(tomato|onion|garlic|pepper|carrot|celery|lettuce|spinach|broccoli|potato|apple|banana|lemon|lime|orange|herbs?|parsley|cilantro|basil|oregano|thyme)\b";
pub const MEAT_SEAFOOD_PATTERN: &str =
    r"(?i)\b(chicken|beef|pork|turkey|salmon|tuna|shrimp|fish|meat|ground|steak|chops?)\b";
pub const DAIRY_PATTERN: &str = r"(?i)\b(milk|cheese|butter|cream|eggs?|yogurt|sour cream)\b";
pub const PANTRY_PATTERN: &str =
    r"(?i)\b(flour|sugar|salt|pepper|oil|vinegar|rice|pasta|beans?|spices?|sauce|stock|broth)\b";

lazy_static! {
    // Order matters: the first vocabulary containing the word decides.
    static ref CATEGORY_VOCABULARIES: [(Regex, GroceryCategory); 4] = [
        (
            Regex::new(PRODUCE_PATTERN).expect("Produce pattern should be valid"),
            GroceryCategory::Produce,
        ),
        (
            Regex::new(MEAT_SEAFOOD_PATTERN).expect("Meat & seafood pattern should be valid"),
            GroceryCategory::MeatAndSeafood,
        ),
        (
            Regex::new(DAIRY_PATTERN).expect("Dairy pattern should be valid"),
            GroceryCategory::Dairy,
        ),
        (
            Regex::new(PANTRY_PATTERN).expect("Pantry pattern should be valid"),
            GroceryCategory::Pantry,
        ),
    ];
}

/// Assign a grocery category to an ingredient name
///
/// The match is case-insensitive and whole-word, so "chicken thighs" hits the
/// meat & seafood vocabulary while "chickeny" does not hit anything.
pub fn categorize_ingredient(name: &str) -> GroceryCategory {
    for (vocabulary, category) in CATEGORY_VOCABULARIES.iter() {
        if vocabulary.is_match(name) {
            return *category;
        }
    }

    // Unknown items land in pantry rather than staying uncategorized
    GroceryCategory::Pantry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorize_produce() {
        assert_eq!(categorize_ingredient("tomato"), GroceryCategory::Produce);
        assert_eq!(categorize_ingredient("red onion"), GroceryCategory::Produce);
        assert_eq!(categorize_ingredient("fresh basil"), GroceryCategory::Produce);
    }

    #[test]
    fn test_categorize_meat_and_seafood() {
        assert_eq!(
            categorize_ingredient("chicken thighs"),
            GroceryCategory::MeatAndSeafood
        );
        assert_eq!(
            categorize_ingredient("ground turkey"),
            GroceryCategory::MeatAndSeafood
        );
        assert_eq!(categorize_ingredient("salmon"), GroceryCategory::MeatAndSeafood);
    }

    #[test]
    fn test_categorize_dairy() {
        assert_eq!(categorize_ingredient("cheese"), GroceryCategory::Dairy);
        assert_eq!(categorize_ingredient("2 eggs"), GroceryCategory::Dairy);
        assert_eq!(categorize_ingredient("sour cream"), GroceryCategory::Dairy);
    }

    #[test]
    fn test_categorize_pantry() {
        assert_eq!(categorize_ingredient("flour"), GroceryCategory::Pantry);
        assert_eq!(categorize_ingredient("olive oil"), GroceryCategory::Pantry);
        assert_eq!(categorize_ingredient("vegetable stock"), GroceryCategory::Pantry);
    }

    #[test]
    fn test_unknown_defaults_to_pantry() {
        assert_eq!(categorize_ingredient("widget"), GroceryCategory::Pantry);
        assert_eq!(categorize_ingredient(""), GroceryCategory::Pantry);
    }

    #[test]
    fn test_vocabulary_order_decides_shared_words() {
        // "pepper" appears in both the produce and pantry vocabularies
        assert_eq!(categorize_ingredient("black pepper"), GroceryCategory::Produce);
        // "chicken broth" hits meat & seafood before the pantry "broth" entry
        assert_eq!(
            categorize_ingredient("chicken broth"),
            GroceryCategory::MeatAndSeafood
        );
    }

    #[test]
    fn test_whole_word_matching() {
        // Substrings of vocabulary words must not match
        assert_eq!(categorize_ingredient("mushrooms"), GroceryCategory::Pantry);
        assert_eq!(categorize_ingredient("appleseed oil"), GroceryCategory::Pantry);
    }
}
