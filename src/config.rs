//! # Application Configuration Module
//!
//! Runtime configuration for the meal planning application, read from the
//! environment by the binary and defaulted for new households.

use crate::error::AppError;
use std::env;

/// Timezone assigned to newly created households
pub const DEFAULT_TIMEZONE: &str = "America/New_York";

/// Length of generated document ids
pub const DOCUMENT_ID_LENGTH: usize = 20;

/// Default amount recorded for an ingredient that carried none
pub const DEFAULT_ITEM_AMOUNT: &str = "1";

/// Separator used when several recipes contribute amounts for one ingredient
pub const AMOUNT_SEPARATOR: &str = ", ";

/// Application configuration loaded from the environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite database URL, e.g. `sqlite://mealplan.db`
    pub database_url: String,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Fails with [`AppError::NotConfigured`] when `DATABASE_URL` is missing,
    /// mirroring the hard "database not configured" failure mode.
    pub fn from_env() -> Result<Self, AppError> {
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| AppError::NotConfigured("DATABASE_URL must be set".to_string()))?;

        Ok(Self { database_url })
    }
}
