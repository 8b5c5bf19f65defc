//! # Document Store Abstraction
//!
//! The application persists everything as JSON documents in a hierarchical
//! keyspace: `households/{id}`, `households/{id}/recipes/{id}`,
//! `households/{id}/weeklyPlans/{id}`, `households/{id}/shoppingLists/{id}`,
//! and top-level `users/{id}`. This module defines the [`DocumentStore`]
//! trait the services are written against, the path helpers for that layout,
//! and an in-memory implementation used in tests.
//!
//! Each operation is atomic for a single document; there are no
//! cross-document transactions. [`DocumentStore::modify`] is the atomic
//! read-modify-write primitive used for toggles on shared documents.

use crate::config::DOCUMENT_ID_LENGTH;
use crate::error::AppError;
use rand::{distributions::Alphanumeric, Rng};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tokio::sync::Mutex;

/// Storage interface offered by the backing document database
///
/// Implementations guarantee per-document atomicity only.
#[allow(async_fn_in_trait)]
pub trait DocumentStore: Send + Sync {
    /// Fetch a document by path, `None` when it does not exist
    async fn get(&self, path: &str) -> Result<Option<Value>, AppError>;

    /// Create or fully replace a document
    async fn set(&self, path: &str, document: Value) -> Result<(), AppError>;

    /// Merge the given fields into an existing document
    ///
    /// Fails with [`AppError::NotFound`] when the document does not exist.
    async fn update(&self, path: &str, fields: Map<String, Value>) -> Result<(), AppError>;

    /// Atomically read, transform, and write back a document
    ///
    /// Returns `false` without calling `apply` when the document does not
    /// exist. Concurrent `modify` calls on the same document never lose
    /// each other's changes.
    async fn modify<F>(&self, path: &str, apply: F) -> Result<bool, AppError>
    where
        F: FnOnce(&mut Value) + Send;

    /// Fetch all documents directly under a collection path
    async fn list(&self, collection: &str) -> Result<Vec<Value>, AppError>;
}

/// Generate a random alphanumeric document id
pub fn generate_document_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(DOCUMENT_ID_LENGTH)
        .map(char::from)
        .collect()
}

/// Path of a household document
pub fn household_path(household_id: &str) -> String {
    format!("households/{household_id}")
}

/// Path of a user profile document
pub fn user_path(user_id: &str) -> String {
    format!("users/{user_id}")
}

/// Collection holding a household's recipes
pub fn recipes_collection(household_id: &str) -> String {
    format!("households/{household_id}/recipes")
}

/// Path of one recipe document
pub fn recipe_path(household_id: &str, recipe_id: &str) -> String {
    format!("households/{household_id}/recipes/{recipe_id}")
}

/// Collection holding a household's weekly plans
pub fn weekly_plans_collection(household_id: &str) -> String {
    format!("households/{household_id}/weeklyPlans")
}

/// Path of one weekly plan document
pub fn weekly_plan_path(household_id: &str, plan_id: &str) -> String {
    format!("households/{household_id}/weeklyPlans/{plan_id}")
}

/// Path of one shopping list document
pub fn shopping_list_path(household_id: &str, list_id: &str) -> String {
    format!("households/{household_id}/shoppingLists/{list_id}")
}

/// Split a document path into its collection and document id
///
/// `"households/h1/recipes/r1"` splits into `("households/h1/recipes", "r1")`.
pub fn split_document_path(path: &str) -> (&str, &str) {
    match path.rsplit_once('/') {
        Some((collection, id)) => (collection, id),
        None => ("", path),
    }
}

/// In-memory document store for tests and for exercising the core with no
/// real database behind it
#[derive(Default)]
pub struct MemoryStore {
    documents: Mutex<BTreeMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryStore {
    async fn get(&self, path: &str) -> Result<Option<Value>, AppError> {
        let documents = self.documents.lock().await;
        Ok(documents.get(path).cloned())
    }

    async fn set(&self, path: &str, document: Value) -> Result<(), AppError> {
        let mut documents = self.documents.lock().await;
        documents.insert(path.to_string(), document);
        Ok(())
    }

    async fn update(&self, path: &str, fields: Map<String, Value>) -> Result<(), AppError> {
        let mut documents = self.documents.lock().await;
        let document = documents
            .get_mut(path)
            .ok_or_else(|| AppError::NotFound(format!("document {path}")))?;
        if let Some(object) = document.as_object_mut() {
            for (key, value) in fields {
                object.insert(key, value);
            }
        }
        Ok(())
    }

    async fn modify<F>(&self, path: &str, apply: F) -> Result<bool, AppError>
    where
        F: FnOnce(&mut Value) + Send,
    {
        let mut documents = self.documents.lock().await;
        match documents.get_mut(path) {
            Some(document) => {
                apply(document);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list(&self, collection: &str) -> Result<Vec<Value>, AppError> {
        let documents = self.documents.lock().await;
        let prefix = format!("{collection}/");
        Ok(documents
            .iter()
            .filter(|(path, _)| {
                path.strip_prefix(&prefix)
                    .is_some_and(|rest| !rest.contains('/'))
            })
            .map(|(_, document)| document.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_generated_ids_are_unique() {
        let first = generate_document_id();
        let second = generate_document_id();
        assert_eq!(first.len(), DOCUMENT_ID_LENGTH);
        assert_ne!(first, second);
        assert!(first.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_split_document_path() {
        assert_eq!(
            split_document_path("households/h1/recipes/r1"),
            ("households/h1/recipes", "r1")
        );
        assert_eq!(split_document_path("users/u1"), ("users", "u1"));
    }

    #[tokio::test]
    async fn test_list_skips_nested_collections() {
        let store = MemoryStore::new();
        store
            .set("households/h1", json!({"id": "h1"}))
            .await
            .unwrap();
        store
            .set("households/h1/recipes/r1", json!({"id": "r1"}))
            .await
            .unwrap();

        let households = store.list("households").await.unwrap();
        assert_eq!(households.len(), 1);
        assert_eq!(households[0]["id"], "h1");

        let recipes = store.list("households/h1/recipes").await.unwrap();
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0]["id"], "r1");
    }

    #[tokio::test]
    async fn test_update_requires_existing_document() {
        let store = MemoryStore::new();
        let mut fields = Map::new();
        fields.insert("name".to_string(), json!("x"));

        let result = store.update("users/missing", fields).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_modify_reports_missing_documents() {
        let store = MemoryStore::new();
        let existed = store.modify("users/missing", |_| {}).await.unwrap();
        assert!(!existed);

        store.set("users/u1", json!({"count": 1})).await.unwrap();
        let existed = store
            .modify("users/u1", |document| {
                document["count"] = json!(2);
            })
            .await
            .unwrap();
        assert!(existed);
        assert_eq!(store.get("users/u1").await.unwrap().unwrap()["count"], 2);
    }
}
