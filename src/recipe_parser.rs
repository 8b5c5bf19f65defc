//! # Recipe Text Parser
//!
//! This module turns pasted free-form recipe text into structured recipe
//! drafts. It is built to tolerate messy copy-pasted text: nothing here ever
//! returns an error, unrecognized lines are ignored, and blocks that do not
//! yield a title and at least one ingredient are dropped.
//!
//! ## Format
//!
//! - Recipes are separated by a line containing exactly `---`
//! - `Title:`, `Description:`, `Time:`, `Servings:`, `Tags:` label metadata
//! - `Ingredients:` and `Directions:` (or `Instructions:`) open sections
//! - Ingredients are listed with a leading `-`; amounts are auto-extracted
//! - Directions may be numbered (`1.`) or dashed
//!
//! ## Usage
//!
//! ```rust
//! use mealplan::recipe_parser::parse_recipe_text;
//!
//! let text = "Title: Soup\nIngredients:\n-2 cups broth\n-1 onion";
//! let drafts = parse_recipe_text(text);
//!
//! assert_eq!(drafts.len(), 1);
//! assert_eq!(drafts[0].title, "Soup");
//! ```

use crate::categorizer::categorize_ingredient;
use crate::models::{Ingredient, RecipeDraft};
use regex::Regex;
use std::sync::LazyLock;

/// Compiled regex patterns for recipe text parsing
static PARSER_PATTERNS: LazyLock<ParserPatterns> = LazyLock::new(ParserPatterns::new);

/// Section the line classifier is currently inside
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Ingredients,
    Directions,
}

/// Compiled regex patterns used by the parser
struct ParserPatterns {
    /// Matches a recipe separator line containing exactly "---"
    block_separator: Regex,
    /// Matches the first run of digits in a metadata value
    first_integer: Regex,
    /// Matches a numbered direction line: "1. Preheat the oven"
    numbered_step: Regex,
    /// Strips the "1. " prefix from a direction
    step_number_prefix: Regex,
    /// Strips the "- " prefix from a direction
    step_dash_prefix: Regex,
    /// Matches any recognized metadata/section label, used to tell direction
    /// continuations apart from headers
    section_label: Regex,
    /// Amount followed by a unit word: "2 cups", "1/2 tsp", "3 large"
    amount_with_unit: Regex,
    /// Bare integer or decimal amount: "2", "1.5"
    bare_number: Regex,
    /// Explicit fraction amount: "1/2"
    fraction: Regex,
    /// Vague quantity phrases: "a few", "a pinch"
    vague_quantity: Regex,
}

impl ParserPatterns {
    fn new() -> Self {
        Self {
            block_separator: Regex::new(r"(?m)^---$").unwrap(),
            first_integer: Regex::new(r"\d+").unwrap(),
            numbered_step: Regex::new(r"^\d+\.").unwrap(),
            step_number_prefix: Regex::new(r"^\d+\.\s*").unwrap(),
            step_dash_prefix: Regex::new(r"^-\s*").unwrap(),
            section_label: Regex::new(
                r"(?i)^(title|description|time|servings|tags|ingredients|directions):",
            )
            .unwrap(),
            amount_with_unit: Regex::new(
                r"(?i)^(\d+/?\d*\s*(?:cups?|tbsp?|tsp?|lbs?|pounds?|oz|ounces?|grams?|kg|ml|liters?|cloves?|pieces?|slices?|medium|large|small))\s+(.+)$",
            )
            .unwrap(),
            bare_number: Regex::new(r"^(\d+\.?\d*)\s+(.+)$").unwrap(),
            fraction: Regex::new(r"^(\d+/\d+)\s+(.+)$").unwrap(),
            vague_quantity: Regex::new(r"(?i)^(a\s+(?:few|little|pinch|dash))\s+(.+)$").unwrap(),
        }
    }

    /// Amount patterns in the order they are tried against an ingredient line
    fn amount_patterns(&self) -> [&Regex; 4] {
        [
            &self.amount_with_unit,
            &self.bare_number,
            &self.fraction,
            &self.vague_quantity,
        ]
    }
}

/// Parse a block of pasted text into recipe drafts
///
/// Blocks are split on `---` separator lines; a block only becomes a draft
/// when it has a non-empty title and at least one ingredient. Malformed
/// blocks are dropped silently.
pub fn parse_recipe_text(text: &str) -> Vec<RecipeDraft> {
    PARSER_PATTERNS
        .block_separator
        .split(text)
        .filter(|block| !block.trim().is_empty())
        .filter_map(parse_recipe_block)
        .collect()
}

/// Parse one recipe block into a draft, or `None` if it is unusable
fn parse_recipe_block(block: &str) -> Option<RecipeDraft> {
    let lines: Vec<&str> = block
        .trim()
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let mut draft = RecipeDraft::default();
    let mut section = Section::None;

    for &line in &lines {
        let lower = line.to_lowercase();

        if lower.starts_with("title:") {
            draft.title = line[6..].trim().to_string();
        } else if lower.starts_with("description:") {
            draft.description = Some(line[12..].trim().to_string());
        } else if lower.starts_with("time:") || lower.starts_with("estimated time:") {
            if let Some(minutes) = first_integer_after_colon(line) {
                draft.estimated_time = Some(minutes);
            }
        } else if lower.starts_with("servings:") || lower.starts_with("serves:") {
            if let Some(servings) = first_integer_after_colon(line) {
                draft.servings = Some(servings);
            }
        } else if lower.starts_with("tags:") {
            draft.tags = line[5..]
                .split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(String::from)
                .collect();
        } else if lower == "ingredients:" {
            section = Section::Ingredients;
        } else if lower == "directions:" || lower == "instructions:" {
            section = Section::Directions;
        } else if line.starts_with('-') && section == Section::Ingredients {
            draft
                .ingredients
                .push(parse_ingredient_line(line[1..].trim()));
        } else if (PARSER_PATTERNS.numbered_step.is_match(line) || line.starts_with('-'))
            && section == Section::Directions
        {
            let step = PARSER_PATTERNS.step_number_prefix.replace(line, "");
            let step = PARSER_PATTERNS.step_dash_prefix.replace(&step, "");
            let step = step.trim();
            if !step.is_empty() {
                draft.directions.push(step.to_string());
            }
        } else if section == Section::Directions && !PARSER_PATTERNS.section_label.is_match(line) {
            // Wrapped direction text arrives as its own entry rather than
            // being joined to the previous step
            draft.directions.push(line.to_string());
        }
        // Anything else is ignored
    }

    // No explicit title: fall back to the first line of the block
    if draft.title.is_empty() {
        if let Some(first) = lines.first() {
            draft.title = first.to_string();
        }
    }

    if !draft.title.is_empty() && !draft.ingredients.is_empty() {
        Some(draft)
    } else {
        None
    }
}

/// Parse one ingredient line, splitting a leading amount from the name
///
/// Four amount shapes are tried in order: number + unit word, bare number,
/// explicit fraction, and vague quantity phrases. When none match, the whole
/// line is the ingredient name with no amount. The name is always run
/// through the categorizer.
pub fn parse_ingredient_line(text: &str) -> Ingredient {
    for pattern in PARSER_PATTERNS.amount_patterns() {
        if let Some(captures) = pattern.captures(text) {
            let amount = captures[1].trim().to_string();
            let name = captures[2].trim().to_string();
            let category = categorize_ingredient(&name);
            return Ingredient {
                name,
                amount: Some(amount),
                category: Some(category),
            };
        }
    }

    Ingredient {
        name: text.to_string(),
        amount: None,
        category: Some(categorize_ingredient(text)),
    }
}

/// Extract the first integer from the text between the first and second colon
///
/// "Time: 30 minutes" yields 30; "Time: 1:30" yields 1. Lines with no digits
/// there yield nothing and the metadata field stays unset.
fn first_integer_after_colon(line: &str) -> Option<u32> {
    let value = line.split(':').nth(1)?;
    let digits = PARSER_PATTERNS.first_integer.find(value)?;
    digits.as_str().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GroceryCategory;

    #[test]
    fn test_parse_single_recipe() {
        let text = "Title: Soup\nIngredients:\n-2 cups broth\n-1 onion";
        let drafts = parse_recipe_text(text);

        assert_eq!(drafts.len(), 1);
        let soup = &drafts[0];
        assert_eq!(soup.title, "Soup");
        assert_eq!(soup.ingredients.len(), 2);

        assert_eq!(soup.ingredients[0].name, "broth");
        assert_eq!(soup.ingredients[0].amount.as_deref(), Some("2 cups"));
        assert_eq!(soup.ingredients[0].category, Some(GroceryCategory::Pantry));

        assert_eq!(soup.ingredients[1].name, "onion");
        assert_eq!(soup.ingredients[1].amount.as_deref(), Some("1"));
        assert_eq!(soup.ingredients[1].category, Some(GroceryCategory::Produce));
    }

    #[test]
    fn test_parse_multiple_blocks() {
        let text = "Title: A\nIngredients:\n- 1 egg\n---\nTitle: B\nIngredients:\n- 2 cups rice\n---\nTitle: C\nDirections:\n1. No ingredients here";
        let drafts = parse_recipe_text(text);

        // The third block has no ingredients and is dropped
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].title, "A");
        assert_eq!(drafts[1].title, "B");
    }

    #[test]
    fn test_separator_must_be_alone_on_its_line() {
        let text = "Title: A\nIngredients:\n- 1 egg --- not a separator";
        let drafts = parse_recipe_text(text);
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].ingredients[0].name, "egg --- not a separator");
    }

    #[test]
    fn test_title_falls_back_to_first_line() {
        let text = "Grandma's Stew\nIngredients:\n- 1 lb beef";
        let drafts = parse_recipe_text(text);

        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].title, "Grandma's Stew");
    }

    #[test]
    fn test_metadata_lines() {
        let text = "Title: Pasta\nDescription: Weeknight dinner\nTime: 30 minutes\nServings: 4\nTags: italian, pasta, dinner\nIngredients:\n- 1 lb spaghetti";
        let drafts = parse_recipe_text(text);

        let pasta = &drafts[0];
        assert_eq!(pasta.description.as_deref(), Some("Weeknight dinner"));
        assert_eq!(pasta.estimated_time, Some(30));
        assert_eq!(pasta.servings, Some(4));
        assert_eq!(pasta.tags, vec!["italian", "pasta", "dinner"]);
    }

    #[test]
    fn test_time_without_digits_is_ignored() {
        let text = "Title: Bread\nTime: a while\nServes: six\nIngredients:\n- 3 cups flour";
        let drafts = parse_recipe_text(text);

        assert_eq!(drafts[0].estimated_time, None);
        assert_eq!(drafts[0].servings, None);
    }

    #[test]
    fn test_time_reads_first_colon_segment() {
        let text = "Title: Roast\nTime: 1:30\nIngredients:\n- 1 chicken";
        let drafts = parse_recipe_text(text);
        assert_eq!(drafts[0].estimated_time, Some(1));
    }

    #[test]
    fn test_numbered_and_dashed_directions() {
        let text = "Title: Eggs\nIngredients:\n- 2 eggs\nDirections:\n1. Crack the eggs\n2. Whisk well\n- Season to taste";
        let drafts = parse_recipe_text(text);

        assert_eq!(
            drafts[0].directions,
            vec!["Crack the eggs", "Whisk well", "Season to taste"]
        );
    }

    #[test]
    fn test_direction_continuation_becomes_new_step() {
        // An unprefixed line inside the directions section is kept as a
        // separate step, not appended to the previous one
        let text = "Title: Stew\nIngredients:\n- 1 lb beef\nInstructions:\n1. Simmer the beef\nuntil tender";
        let drafts = parse_recipe_text(text);

        assert_eq!(drafts[0].directions, vec!["Simmer the beef", "until tender"]);
    }

    #[test]
    fn test_ingredient_dashes_outside_section_are_ignored() {
        let text = "Title: Salad\n- 1 cucumber\nIngredients:\n- 1 tomato";
        let drafts = parse_recipe_text(text);

        // The dash line before "Ingredients:" never reaches the ingredient list
        assert_eq!(drafts[0].ingredients.len(), 1);
        assert_eq!(drafts[0].ingredients[0].name, "tomato");
    }

    #[test]
    fn test_block_without_title_or_ingredients_is_dropped() {
        assert!(parse_recipe_text("").is_empty());
        assert!(parse_recipe_text("---\n---").is_empty());
        assert!(parse_recipe_text("Directions:\n1. Stir").is_empty());
    }

    #[test]
    fn test_amount_with_unit_word() {
        let ingredient = parse_ingredient_line("2 cups broth");
        assert_eq!(ingredient.name, "broth");
        assert_eq!(ingredient.amount.as_deref(), Some("2 cups"));

        let ingredient = parse_ingredient_line("1/2 tsp salt");
        assert_eq!(ingredient.name, "salt");
        assert_eq!(ingredient.amount.as_deref(), Some("1/2 tsp"));

        let ingredient = parse_ingredient_line("3 large carrots");
        assert_eq!(ingredient.name, "carrots");
        assert_eq!(ingredient.amount.as_deref(), Some("3 large"));
    }

    #[test]
    fn test_bare_number_amount() {
        let ingredient = parse_ingredient_line("1 onion, diced");
        assert_eq!(ingredient.name, "onion, diced");
        assert_eq!(ingredient.amount.as_deref(), Some("1"));

        let ingredient = parse_ingredient_line("1.5 apples");
        assert_eq!(ingredient.amount.as_deref(), Some("1.5"));
    }

    #[test]
    fn test_fraction_amount() {
        let ingredient = parse_ingredient_line("1/2 lemon");
        assert_eq!(ingredient.name, "lemon");
        assert_eq!(ingredient.amount.as_deref(), Some("1/2"));
    }

    #[test]
    fn test_vague_quantity_amount() {
        let ingredient = parse_ingredient_line("a pinch salt");
        assert_eq!(ingredient.name, "salt");
        assert_eq!(ingredient.amount.as_deref(), Some("a pinch"));

        let ingredient = parse_ingredient_line("A few sprigs thyme");
        assert_eq!(ingredient.name, "sprigs thyme");
        assert_eq!(ingredient.amount.as_deref(), Some("A few"));
    }

    #[test]
    fn test_no_amount_keeps_full_name() {
        let ingredient = parse_ingredient_line("salt to taste");
        assert_eq!(ingredient.name, "salt to taste");
        assert_eq!(ingredient.amount, None);
        assert_eq!(ingredient.category, Some(GroceryCategory::Pantry));
    }
}
