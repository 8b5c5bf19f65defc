//! # Household and User Service
//!
//! First sign-in bootstrapping, profile lookup, and the membership gate the
//! mutating services use for tenancy checks.

use crate::error::AppError;
use crate::models::{Household, HouseholdSettings, Role, User};
use crate::store::{household_path, user_path, DocumentStore};
use chrono::Utc;
use log::info;

/// A user together with their household, as returned to the client after
/// sign-in
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub user: User,
    pub household: Option<Household>,
}

/// Initialize a user and their household on first sign-in
///
/// Repeat calls for a known user return the existing profile untouched. A
/// new user gets a fresh household named after them ("{name}'s Family", or
/// "My Family" when no name was provided) with themselves as the only
/// member and the parent role.
pub async fn initialize_user<S: DocumentStore>(
    store: &S,
    uid: &str,
    email: &str,
    name: Option<&str>,
) -> Result<Profile, AppError> {
    if let Some(existing) = store.get(&user_path(uid)).await? {
        let user: User = serde_json::from_value(existing)?;
        let household = load_household(store, &user.household_id).await?;
        return Ok(Profile { user, household });
    }

    info!("Creating new user and household for uid: {uid}");

    let now = Utc::now();
    let household_id = format!("household-{uid}");
    let household = Household {
        id: household_id.clone(),
        name: match name {
            Some(name) => format!("{name}'s Family"),
            None => "My Family".to_string(),
        },
        created_by: uid.to_string(),
        members: vec![uid.to_string()],
        created_at: now,
        settings: HouseholdSettings::default(),
    };

    let user = User {
        id: uid.to_string(),
        email: email.to_string(),
        name: name
            .map(str::to_string)
            .unwrap_or_else(|| email.split('@').next().unwrap_or(email).to_string()),
        household_id,
        role: Role::Parent,
        created_at: now,
        last_active_at: now,
    };

    store
        .set(&household_path(&household.id), serde_json::to_value(&household)?)
        .await?;
    store
        .set(&user_path(uid), serde_json::to_value(&user)?)
        .await?;

    Ok(Profile {
        user,
        household: Some(household),
    })
}

/// Fetch a user's profile and household
pub async fn get_profile<S: DocumentStore>(store: &S, user_id: &str) -> Result<Profile, AppError> {
    let document = store
        .get(&user_path(user_id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user profile {user_id}")))?;
    let user: User = serde_json::from_value(document)?;
    let household = load_household(store, &user.household_id).await?;

    Ok(Profile { user, household })
}

/// Require that the given user is a member of the household
///
/// Missing households are a [`AppError::NotFound`]; a user outside the
/// member list is [`AppError::Unauthenticated`].
pub async fn require_member<S: DocumentStore>(
    store: &S,
    household_id: &str,
    user_id: &str,
) -> Result<(), AppError> {
    let document = store
        .get(&household_path(household_id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("household {household_id}")))?;
    let household: Household = serde_json::from_value(document)?;

    if household.members.iter().any(|member| member == user_id) {
        Ok(())
    } else {
        Err(AppError::Unauthenticated(format!(
            "user {user_id} is not a member of household {household_id}"
        )))
    }
}

async fn load_household<S: DocumentStore>(
    store: &S,
    household_id: &str,
) -> Result<Option<Household>, AppError> {
    match store.get(&household_path(household_id)).await? {
        Some(document) => Ok(Some(serde_json::from_value(document)?)),
        None => Ok(None),
    }
}
