//! # SQLite Document Store
//!
//! A [`DocumentStore`] backed by a single SQLite table. Documents are stored
//! as JSON text keyed by their hierarchical path, with the parent collection
//! denormalized into its own indexed column so collection scans stay cheap.
//! `modify` wraps the read and the write-back in one transaction, which is
//! what makes toggle operations safe against concurrent writers.

use crate::error::AppError;
use crate::store::{split_document_path, DocumentStore};
use log::{debug, info};
use serde_json::{Map, Value};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;

/// SQLite-backed document store
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if missing) the database at the given URL and make
    /// sure the schema exists
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        info!("Opening document store at: {database_url}");

        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::NotConfigured(format!("invalid database url: {e}")))?
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    /// Wrap an existing pool, initializing the schema
    pub async fn with_pool(pool: SqlitePool) -> Result<Self, AppError> {
        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    async fn init_schema(&self) -> Result<(), AppError> {
        debug!("Initializing document store schema");

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS documents (
                path TEXT PRIMARY KEY,
                collection TEXT NOT NULL,
                data TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS documents_by_collection
             ON documents (collection)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

impl DocumentStore for SqliteStore {
    async fn get(&self, path: &str) -> Result<Option<Value>, AppError> {
        let row = sqlx::query("SELECT data FROM documents WHERE path = ?")
            .bind(path)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => {
                let data: String = row.get("data");
                Ok(Some(serde_json::from_str(&data)?))
            }
            None => Ok(None),
        }
    }

    async fn set(&self, path: &str, document: Value) -> Result<(), AppError> {
        let (collection, _) = split_document_path(path);
        debug!("Writing document at: {path}");

        sqlx::query(
            "INSERT INTO documents (path, collection, data) VALUES (?, ?, ?)
             ON CONFLICT (path) DO UPDATE SET data = excluded.data",
        )
        .bind(path)
        .bind(collection)
        .bind(document.to_string())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, path: &str, fields: Map<String, Value>) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query("SELECT data FROM documents WHERE path = ?")
            .bind(path)
            .fetch_optional(&mut *tx)
            .await?;
        let row = row.ok_or_else(|| AppError::NotFound(format!("document {path}")))?;

        let data: String = row.get("data");
        let mut document: Value = serde_json::from_str(&data)?;
        if let Some(object) = document.as_object_mut() {
            for (key, value) in fields {
                object.insert(key, value);
            }
        }

        sqlx::query("UPDATE documents SET data = ? WHERE path = ?")
            .bind(document.to_string())
            .bind(path)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn modify<F>(&self, path: &str, apply: F) -> Result<bool, AppError>
    where
        F: FnOnce(&mut Value) + Send,
    {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query("SELECT data FROM documents WHERE path = ?")
            .bind(path)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(row) = row else {
            return Ok(false);
        };

        let data: String = row.get("data");
        let mut document: Value = serde_json::from_str(&data)?;
        apply(&mut document);

        sqlx::query("UPDATE documents SET data = ? WHERE path = ?")
            .bind(document.to_string())
            .bind(path)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }

    async fn list(&self, collection: &str) -> Result<Vec<Value>, AppError> {
        let rows = sqlx::query("SELECT data FROM documents WHERE collection = ? ORDER BY rowid")
            .bind(collection)
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| {
                let data: String = row.get("data");
                serde_json::from_str(&data).map_err(AppError::from)
            })
            .collect()
    }
}
