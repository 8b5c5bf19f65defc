//! # Shopping List Consolidator
//!
//! This module merges the ingredient lists of a week's recipes into one
//! deduplicated shopping list. Ingredients merge on their lowercase name;
//! amounts are free text and are concatenated, never summed, so "2 cups"
//! from one recipe and "1 cup" from another become "2 cups, 1 cup".
//!
//! The consolidation is a pure function over in-memory recipes. Given the
//! same recipes in the same order it produces byte-identical output.

use crate::config::{AMOUNT_SEPARATOR, DEFAULT_ITEM_AMOUNT};
use crate::models::{GroceryCategory, Recipe, ShoppingItem};
use std::collections::HashMap;

/// Merge the ingredients of the given recipes into shopping items
///
/// Items come out in first-seen order of their lowercase ingredient keys.
/// An ingredient with no amount contributes the default amount "1" when it
/// opens an item and nothing when it merges into an existing one. Every item
/// records the titles of the recipes that contributed to it.
pub fn consolidate_ingredients(recipes: &[Recipe]) -> Vec<ShoppingItem> {
    let mut items: Vec<ShoppingItem> = Vec::new();
    let mut index_by_key: HashMap<String, usize> = HashMap::new();

    for recipe in recipes {
        for ingredient in &recipe.ingredients {
            let key = ingredient.name.to_lowercase();
            // Empty amounts behave like missing ones
            let amount = ingredient.amount.as_deref().filter(|a| !a.is_empty());

            match index_by_key.get(&key) {
                Some(&index) => {
                    let item = &mut items[index];
                    item.recipes.push(recipe.title.clone());
                    if let Some(amount) = amount {
                        if item.total_amount.is_empty() {
                            item.total_amount = amount.to_string();
                        } else {
                            item.total_amount.push_str(AMOUNT_SEPARATOR);
                            item.total_amount.push_str(amount);
                        }
                    }
                }
                None => {
                    index_by_key.insert(key, items.len());
                    items.push(ShoppingItem {
                        ingredient: ingredient.name.clone(),
                        total_amount: amount.unwrap_or(DEFAULT_ITEM_AMOUNT).to_string(),
                        category: ingredient.category.unwrap_or(GroceryCategory::Pantry),
                        checked: false,
                        recipes: vec![recipe.title.clone()],
                    });
                }
            }
        }
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Ingredient;
    use chrono::Utc;

    fn recipe(title: &str, ingredients: Vec<Ingredient>) -> Recipe {
        Recipe {
            id: format!("recipe-{title}"),
            household_id: "h1".to_string(),
            title: title.to_string(),
            description: None,
            ingredients,
            directions: Vec::new(),
            tags: Vec::new(),
            estimated_time: None,
            servings: None,
            source_url: None,
            created_by: "u1".to_string(),
            created_at: Utc::now(),
            likes: Vec::new(),
            times_planned: 0,
        }
    }

    #[test]
    fn test_merge_is_case_insensitive() {
        let recipes = vec![
            recipe("Omelette", vec![Ingredient::new("Egg").with_amount("2")]),
            recipe("Fried Rice", vec![Ingredient::new("egg").with_amount("1")]),
        ];

        let items = consolidate_ingredients(&recipes);

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].ingredient, "Egg");
        assert_eq!(items[0].total_amount, "2, 1");
        assert_eq!(items[0].recipes, vec!["Omelette", "Fried Rice"]);
    }

    #[test]
    fn test_missing_amount_defaults_to_one() {
        let recipes = vec![recipe("Salad", vec![Ingredient::new("lettuce")])];

        let items = consolidate_ingredients(&recipes);

        assert_eq!(items[0].total_amount, "1");
        assert_eq!(items[0].category, GroceryCategory::Pantry);
        assert!(!items[0].checked);
    }

    #[test]
    fn test_missing_amount_contributes_nothing_on_merge() {
        let recipes = vec![
            recipe("A", vec![Ingredient::new("flour").with_amount("2 cups")]),
            recipe("B", vec![Ingredient::new("flour")]),
        ];

        let items = consolidate_ingredients(&recipes);

        assert_eq!(items[0].total_amount, "2 cups");
        assert_eq!(items[0].recipes, vec!["A", "B"]);
    }

    #[test]
    fn test_empty_amount_behaves_like_missing() {
        let recipes = vec![
            recipe("A", vec![Ingredient::new("milk").with_amount("")]),
            recipe("B", vec![Ingredient::new("milk").with_amount("1 cup")]),
        ];

        let items = consolidate_ingredients(&recipes);

        assert_eq!(items[0].total_amount, "1, 1 cup");
    }

    #[test]
    fn test_first_seen_order_is_preserved() {
        let recipes = vec![
            recipe(
                "Soup",
                vec![
                    Ingredient::new("broth").with_amount("2 cups"),
                    Ingredient::new("onion").with_amount("1"),
                ],
            ),
            recipe(
                "Stew",
                vec![
                    Ingredient::new("carrot").with_amount("3"),
                    Ingredient::new("onion").with_amount("2"),
                ],
            ),
        ];

        let items = consolidate_ingredients(&recipes);

        let names: Vec<&str> = items.iter().map(|i| i.ingredient.as_str()).collect();
        assert_eq!(names, vec!["broth", "onion", "carrot"]);
        assert_eq!(items[1].total_amount, "1, 2");
    }

    #[test]
    fn test_consolidation_is_idempotent() {
        let recipes = vec![
            recipe("A", vec![Ingredient::new("rice").with_amount("1 cup")]),
            recipe("B", vec![Ingredient::new("Rice").with_amount("2 cups")]),
        ];

        let first = consolidate_ingredients(&recipes);
        let second = consolidate_ingredients(&recipes);

        assert_eq!(first, second);
        assert_eq!(first[0].total_amount, "1 cup, 2 cups");
    }

    #[test]
    fn test_category_carries_over_from_ingredient() {
        let recipes = vec![recipe(
            "Curry",
            vec![Ingredient::new("chicken")
                .with_amount("1 lb")
                .with_category(GroceryCategory::MeatAndSeafood)],
        )];

        let items = consolidate_ingredients(&recipes);
        assert_eq!(items[0].category, GroceryCategory::MeatAndSeafood);
    }

    #[test]
    fn test_empty_recipe_set_yields_no_items() {
        assert!(consolidate_ingredients(&[]).is_empty());
    }
}
