//! # Weekly Planning Service
//!
//! Assigning recipes to days of a week. A week is identified by its
//! household and start date; its plan document is created lazily on the
//! first assignment. Each day holds at most one recipe.

use crate::error::AppError;
use crate::models::WeeklyPlan;
use crate::services::households::require_member;
use crate::store::{
    generate_document_id, weekly_plan_path, weekly_plans_collection, DocumentStore,
};
use chrono::{NaiveDate, Utc};
use log::info;
use serde_json::Map;
use std::collections::BTreeMap;

/// Lowercase day names accepted by the planning API
pub const DAY_NAMES: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// Fetch the plan for a household's week, `None` when no plan exists yet
pub async fn get_weekly_plan<S: DocumentStore>(
    store: &S,
    household_id: &str,
    week_start: NaiveDate,
) -> Result<Option<WeeklyPlan>, AppError> {
    find_plan_for_week(store, household_id, week_start).await
}

/// Assign a recipe to a day, creating the week's plan if needed
pub async fn assign_meal<S: DocumentStore>(
    store: &S,
    household_id: &str,
    user_id: &str,
    week_start: NaiveDate,
    day: &str,
    recipe_id: &str,
) -> Result<WeeklyPlan, AppError> {
    require_member(store, household_id, user_id).await?;
    let day = normalize_day(day)?;

    match find_plan_for_week(store, household_id, week_start).await? {
        Some(mut plan) => {
            plan.meals.insert(day, recipe_id.to_string());
            plan.last_modified = Utc::now();
            store
                .update(
                    &weekly_plan_path(household_id, &plan.id),
                    meals_update(&plan)?,
                )
                .await?;
            Ok(plan)
        }
        None => {
            let mut meals = BTreeMap::new();
            meals.insert(day, recipe_id.to_string());

            let plan = WeeklyPlan {
                id: generate_document_id(),
                household_id: household_id.to_string(),
                week_start_date: week_start,
                meals,
                created_by: user_id.to_string(),
                last_modified: Utc::now(),
            };

            info!(
                "Creating weekly plan for household {household_id}, week of {week_start}"
            );

            store
                .set(
                    &weekly_plan_path(household_id, &plan.id),
                    serde_json::to_value(&plan)?,
                )
                .await?;
            Ok(plan)
        }
    }
}

/// Clear a day's assignment; returns `false` when the week has no plan
pub async fn remove_meal<S: DocumentStore>(
    store: &S,
    household_id: &str,
    user_id: &str,
    week_start: NaiveDate,
    day: &str,
) -> Result<bool, AppError> {
    require_member(store, household_id, user_id).await?;
    let day = normalize_day(day)?;

    match find_plan_for_week(store, household_id, week_start).await? {
        Some(mut plan) => {
            plan.meals.remove(&day);
            plan.last_modified = Utc::now();
            store
                .update(
                    &weekly_plan_path(household_id, &plan.id),
                    meals_update(&plan)?,
                )
                .await?;
            Ok(true)
        }
        None => Ok(false),
    }
}

fn normalize_day(day: &str) -> Result<String, AppError> {
    let day = day.trim().to_lowercase();
    if DAY_NAMES.contains(&day.as_str()) {
        Ok(day)
    } else {
        Err(AppError::Validation(format!("unknown day name: {day}")))
    }
}

fn meals_update(plan: &WeeklyPlan) -> Result<Map<String, serde_json::Value>, AppError> {
    let mut fields = Map::new();
    fields.insert("meals".to_string(), serde_json::to_value(&plan.meals)?);
    fields.insert(
        "lastModified".to_string(),
        serde_json::to_value(plan.last_modified)?,
    );
    Ok(fields)
}

async fn find_plan_for_week<S: DocumentStore>(
    store: &S,
    household_id: &str,
    week_start: NaiveDate,
) -> Result<Option<WeeklyPlan>, AppError> {
    let documents = store.list(&weekly_plans_collection(household_id)).await?;

    for document in documents {
        let plan: WeeklyPlan = serde_json::from_value(document)?;
        if plan.week_start_date == week_start {
            return Ok(Some(plan));
        }
    }

    Ok(None)
}
