//! # Meal Planning Data Model
//!
//! This module defines the documents the application persists and passes
//! between its services: recipes with their ingredients, weekly meal plans,
//! consolidated shopping lists, and the household/user tenancy records.
//!
//! ## Core Concepts
//!
//! - **Recipe**: a titled ingredient + direction list owned by a household
//! - **WeeklyPlan**: one recipe assignment per weekday for a given week
//! - **ShoppingItem**: one consolidated ingredient line on a shopping list
//! - **GroceryCategory**: the fixed set of store sections items group under
//!
//! All documents serialize with camelCase field names, matching the layout
//! they are stored under in the document store.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Fixed set of grocery store sections used to group shopping items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroceryCategory {
    #[serde(rename = "produce")]
    Produce,
    #[serde(rename = "meat & seafood")]
    MeatAndSeafood,
    #[serde(rename = "dairy")]
    Dairy,
    #[serde(rename = "deli")]
    Deli,
    #[serde(rename = "bakery")]
    Bakery,
    #[serde(rename = "frozen")]
    Frozen,
    #[serde(rename = "pantry")]
    Pantry,
    #[serde(rename = "beverages")]
    Beverages,
    #[serde(rename = "household")]
    Household,
}

impl GroceryCategory {
    /// The display name, identical to the persisted representation
    pub fn as_str(&self) -> &'static str {
        match self {
            GroceryCategory::Produce => "produce",
            GroceryCategory::MeatAndSeafood => "meat & seafood",
            GroceryCategory::Dairy => "dairy",
            GroceryCategory::Deli => "deli",
            GroceryCategory::Bakery => "bakery",
            GroceryCategory::Frozen => "frozen",
            GroceryCategory::Pantry => "pantry",
            GroceryCategory::Beverages => "beverages",
            GroceryCategory::Household => "household",
        }
    }
}

impl fmt::Display for GroceryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single recipe ingredient
///
/// The amount is free text ("2 cups", "a pinch"), never a parsed
/// quantity/unit pair; consolidation concatenates amounts as strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    /// The ingredient name (e.g., "flour", "chicken thighs")
    pub name: String,

    /// Optional free-text amount exactly as written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,

    /// Optional grocery category assigned by the categorizer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<GroceryCategory>,
}

impl Ingredient {
    /// Create an ingredient with just a name
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            amount: None,
            category: None,
        }
    }

    /// Add a free-text amount to this ingredient
    pub fn with_amount(mut self, amount: &str) -> Self {
        self.amount = Some(amount.to_string());
        self
    }

    /// Assign a grocery category to this ingredient
    pub fn with_category(mut self, category: GroceryCategory) -> Self {
        self.category = Some(category);
        self
    }
}

/// A recipe as parsed from bulk import text or submitted to the import API,
/// before ids and timestamps are assigned
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDraft {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub ingredients: Vec<Ingredient>,
    pub directions: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Estimated preparation time in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

/// A persisted recipe owned by a household
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub household_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub ingredients: Vec<Ingredient>,
    pub directions: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    /// User ids that have liked this recipe
    #[serde(default)]
    pub likes: Vec<String>,
    #[serde(default)]
    pub times_planned: u32,
}

/// One week of meal assignments for a household
///
/// `meals` maps a lowercase day name ("monday".."sunday") to at most one
/// recipe id. A `BTreeMap` keeps iteration deterministic, which makes
/// shopping list generation from the same plan reproducible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyPlan {
    pub id: String,
    pub household_id: String,
    pub week_start_date: NaiveDate,
    #[serde(default)]
    pub meals: BTreeMap<String, String>,
    pub created_by: String,
    pub last_modified: DateTime<Utc>,
}

/// One consolidated line on a shopping list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingItem {
    /// Ingredient name as first seen; merge identity is its lowercase form
    pub ingredient: String,
    /// Free-text amounts from contributing recipes, joined with ", "
    pub total_amount: String,
    pub category: GroceryCategory,
    pub checked: bool,
    /// Titles of the recipes that contributed this ingredient
    pub recipes: Vec<String>,
}

/// A shopping list generated from a weekly plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingList {
    pub id: String,
    pub weekly_plan_id: String,
    pub household_id: String,
    pub items: Vec<ShoppingItem>,
    pub generated_at: DateTime<Utc>,
    pub user_generated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Member role within a household
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Parent,
    Child,
}

/// Which day a household's planning week starts on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    Sunday,
    Monday,
}

/// Per-household preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdSettings {
    pub timezone: String,
    pub week_starts_on: WeekStart,
}

impl Default for HouseholdSettings {
    fn default() -> Self {
        Self {
            timezone: crate::config::DEFAULT_TIMEZONE.to_string(),
            week_starts_on: WeekStart::Monday,
        }
    }
}

/// Tenant grouping users, recipes, plans, and shopping lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Household {
    pub id: String,
    pub name: String,
    pub created_by: String,
    pub members: Vec<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub settings: HouseholdSettings,
}

/// An authenticated user's profile document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub household_id: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub last_active_at: DateTime<Utc>,
}
