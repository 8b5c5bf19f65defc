//! # Recipe Service
//!
//! Persisting recipe drafts, querying a household's collection, and the
//! like toggle.

use crate::error::AppError;
use crate::models::{Recipe, RecipeDraft};
use crate::services::households::require_member;
use crate::store::{generate_document_id, recipe_path, recipes_collection, DocumentStore};
use chrono::Utc;
use log::info;
use serde_json::Value;

/// Query options for [`list_recipes`]
#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    /// Case-insensitive substring matched against title, description, tags,
    /// and ingredient names
    pub search: Option<String>,
    /// Keep recipes carrying any of these tags; empty means no tag filter
    pub tags: Vec<String>,
}

/// Persist a recipe draft for a household
///
/// The stored recipe gets a generated id, a creation timestamp, an empty
/// likes list, and a zero planned counter. Drafts with a blank title are
/// rejected before anything is written.
pub async fn create_recipe<S: DocumentStore>(
    store: &S,
    household_id: &str,
    user_id: &str,
    draft: RecipeDraft,
) -> Result<Recipe, AppError> {
    require_member(store, household_id, user_id).await?;

    if draft.title.trim().is_empty() {
        return Err(AppError::Validation(
            "recipe title must not be empty".to_string(),
        ));
    }

    let recipe = Recipe {
        id: generate_document_id(),
        household_id: household_id.to_string(),
        title: draft.title,
        description: draft.description,
        ingredients: draft.ingredients,
        directions: draft.directions,
        tags: draft.tags,
        estimated_time: draft.estimated_time,
        servings: draft.servings,
        source_url: draft.source_url,
        created_by: user_id.to_string(),
        created_at: Utc::now(),
        likes: Vec::new(),
        times_planned: 0,
    };

    info!("Creating recipe '{}' in household {household_id}", recipe.title);

    store
        .set(
            &recipe_path(household_id, &recipe.id),
            serde_json::to_value(&recipe)?,
        )
        .await?;

    Ok(recipe)
}

/// List a household's recipes, newest first
///
/// The optional search term and tag filter narrow the result; tags combine
/// with logical OR and both matches are case-insensitive.
pub async fn list_recipes<S: DocumentStore>(
    store: &S,
    household_id: &str,
    filter: &RecipeFilter,
) -> Result<Vec<Recipe>, AppError> {
    let documents = store.list(&recipes_collection(household_id)).await?;

    let mut recipes = Vec::with_capacity(documents.len());
    for document in documents {
        recipes.push(serde_json::from_value::<Recipe>(document)?);
    }

    if let Some(search) = filter.search.as_deref() {
        let needle = search.to_lowercase();
        recipes.retain(|recipe| matches_search(recipe, &needle));
    }

    if !filter.tags.is_empty() {
        let wanted: Vec<String> = filter.tags.iter().map(|t| t.to_lowercase()).collect();
        recipes.retain(|recipe| {
            recipe
                .tags
                .iter()
                .any(|tag| wanted.contains(&tag.to_lowercase()))
        });
    }

    recipes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(recipes)
}

/// Flip the caller's membership in a recipe's likes list
///
/// Returns the new liked state. Two toggles in sequence restore the
/// original set; that symmetry is the intended behavior. The flip runs
/// through the store's atomic read-modify-write, so concurrent toggles by
/// different users are not lost.
pub async fn toggle_like<S: DocumentStore>(
    store: &S,
    household_id: &str,
    recipe_id: &str,
    user_id: &str,
) -> Result<bool, AppError> {
    require_member(store, household_id, user_id).await?;

    let mut liked = false;
    let existed = store
        .modify(&recipe_path(household_id, recipe_id), |document| {
            let Some(object) = document.as_object_mut() else {
                return;
            };
            let likes = object
                .entry("likes")
                .or_insert_with(|| Value::Array(Vec::new()));
            let Some(likes) = likes.as_array_mut() else {
                return;
            };

            match likes.iter().position(|id| id.as_str() == Some(user_id)) {
                Some(position) => {
                    likes.remove(position);
                    liked = false;
                }
                None => {
                    likes.push(Value::String(user_id.to_string()));
                    liked = true;
                }
            }
        })
        .await?;

    if !existed {
        return Err(AppError::NotFound(format!("recipe {recipe_id}")));
    }

    Ok(liked)
}

fn matches_search(recipe: &Recipe, needle: &str) -> bool {
    recipe.title.to_lowercase().contains(needle)
        || recipe
            .description
            .as_deref()
            .is_some_and(|description| description.to_lowercase().contains(needle))
        || recipe.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
        || recipe
            .ingredients
            .iter()
            .any(|ingredient| ingredient.name.to_lowercase().contains(needle))
}
