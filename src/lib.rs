//! # Mealplan
//!
//! Household meal planning: a recipe collection with free-text bulk import,
//! weekly meal plans, and consolidated shopping lists, persisted as JSON
//! documents behind an injectable store.

pub mod categorizer;
pub mod config;
pub mod consolidator;
pub mod error;
pub mod models;
pub mod recipe_parser;
pub mod services;
pub mod sqlite_store;
pub mod store;
