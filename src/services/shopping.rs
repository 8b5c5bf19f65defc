//! # Shopping List Service
//!
//! Generating a consolidated shopping list from a weekly plan and tracking
//! which items have been picked up.

use crate::consolidator::consolidate_ingredients;
use crate::error::AppError;
use crate::models::{Recipe, ShoppingList, WeeklyPlan};
use crate::services::households::require_member;
use crate::store::{
    generate_document_id, recipe_path, shopping_list_path, weekly_plan_path, DocumentStore,
};
use chrono::Utc;
use log::info;
use serde_json::Value;

/// Generate and persist a shopping list from a weekly plan
///
/// The plan must exist and have at least one assigned meal; nothing is
/// written otherwise. A recipe planned on several days contributes its
/// ingredients once, and recipes deleted since they were planned are
/// skipped silently.
pub async fn generate_from_weekly_plan<S: DocumentStore>(
    store: &S,
    household_id: &str,
    user_id: &str,
    weekly_plan_id: &str,
) -> Result<ShoppingList, AppError> {
    require_member(store, household_id, user_id).await?;

    let document = store
        .get(&weekly_plan_path(household_id, weekly_plan_id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("weekly plan {weekly_plan_id}")))?;
    let plan: WeeklyPlan = serde_json::from_value(document)?;

    // Distinct recipe ids, keeping first-seen order
    let mut recipe_ids: Vec<&String> = Vec::new();
    for recipe_id in plan.meals.values() {
        if !recipe_ids.contains(&recipe_id) {
            recipe_ids.push(recipe_id);
        }
    }

    if recipe_ids.is_empty() {
        return Err(AppError::EmptyPlan);
    }

    let mut recipes: Vec<Recipe> = Vec::with_capacity(recipe_ids.len());
    for recipe_id in recipe_ids {
        if let Some(document) = store.get(&recipe_path(household_id, recipe_id)).await? {
            recipes.push(serde_json::from_value(document)?);
        }
    }

    let items = consolidate_ingredients(&recipes);
    info!(
        "Generated {} shopping items from {} recipes for plan {weekly_plan_id}",
        items.len(),
        recipes.len()
    );

    let list = ShoppingList {
        id: generate_document_id(),
        weekly_plan_id: weekly_plan_id.to_string(),
        household_id: household_id.to_string(),
        items,
        generated_at: Utc::now(),
        user_generated: true,
        completed_at: None,
    };

    store
        .set(
            &shopping_list_path(household_id, &list.id),
            serde_json::to_value(&list)?,
        )
        .await?;

    Ok(list)
}

/// Fetch a shopping list by id, `None` when it does not exist
pub async fn get_shopping_list<S: DocumentStore>(
    store: &S,
    household_id: &str,
    shopping_list_id: &str,
) -> Result<Option<ShoppingList>, AppError> {
    match store
        .get(&shopping_list_path(household_id, shopping_list_id))
        .await?
    {
        Some(document) => Ok(Some(serde_json::from_value(document)?)),
        None => Ok(None),
    }
}

/// Flip the checked flag of the item at the given index
///
/// An index past the end of the list is a no-op, not an error. The flip
/// runs through the store's atomic read-modify-write so two shoppers
/// checking different items do not lose each other's update.
pub async fn toggle_item_checked<S: DocumentStore>(
    store: &S,
    household_id: &str,
    user_id: &str,
    shopping_list_id: &str,
    item_index: usize,
) -> Result<(), AppError> {
    require_member(store, household_id, user_id).await?;

    let existed = store
        .modify(
            &shopping_list_path(household_id, shopping_list_id),
            |document| {
                let Some(items) = document.get_mut("items").and_then(Value::as_array_mut) else {
                    return;
                };
                if let Some(item) = items.get_mut(item_index) {
                    if let Some(checked) = item.get_mut("checked") {
                        *checked = Value::Bool(!checked.as_bool().unwrap_or(false));
                    }
                }
            },
        )
        .await?;

    if !existed {
        return Err(AppError::NotFound(format!(
            "shopping list {shopping_list_id}"
        )));
    }

    Ok(())
}
