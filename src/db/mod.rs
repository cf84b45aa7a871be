//! Database module for contact persistence.
//!
//! The HTTP layer talks to storage only through [`ContactStore`]; SQLite is the
//! production backend.

#[cfg(test)]
mod memory;
mod sqlite;

#[cfg(test)]
pub use memory::*;
pub use sqlite::*;

use std::future::Future;
use std::path::Path;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::errors::AppError;
use crate::models::{Contact, ContactSummary, CreateContactRequest, UpdateContactRequest};

/// Storage backend for contacts.
///
/// Lookups by id return `Ok(None)` when no record matches; callers decide how
/// to report that. All methods return `Send` futures so handlers can run on
/// the multi-threaded runtime.
pub trait ContactStore: Send + Sync + 'static {
    /// List all contacts in creation order, without timestamps.
    fn list(&self) -> impl Future<Output = Result<Vec<ContactSummary>, AppError>> + Send + '_;

    /// Get a contact by id.
    fn get_by_id<'a>(
        &'a self,
        id: &'a str,
    ) -> impl Future<Output = Result<Option<Contact>, AppError>> + Send + 'a;

    /// Persist a new contact. The store assigns `id` and both timestamps.
    fn create<'a>(
        &'a self,
        request: &'a CreateContactRequest,
    ) -> impl Future<Output = Result<Contact, AppError>> + Send + 'a;

    /// Merge `request` over the stored contact and refresh `updatedAt`.
    /// Returns the updated record.
    fn update_by_id<'a>(
        &'a self,
        id: &'a str,
        request: &'a UpdateContactRequest,
    ) -> impl Future<Output = Result<Option<Contact>, AppError>> + Send + 'a;

    /// Remove a contact, returning the record as it was before deletion.
    fn delete_by_id<'a>(
        &'a self,
        id: &'a str,
    ) -> impl Future<Output = Result<Option<Contact>, AppError>> + Send + 'a;
}

/// Initialize the database connection pool and run migrations.
pub async fn init_database(db_path: &Path) -> Result<SqlitePool, sqlx::Error> {
    // Ensure the parent directory exists
    if let Some(parent) = db_path.parent() {
        tokio::fs::create_dir_all(parent).await.ok();
    }

    let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

    let options = SqliteConnectOptions::from_str(&db_url)?
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    run_migrations(&pool).await?;

    Ok(pool)
}

/// Run database migrations.
async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    // `seq` keeps list order stable across updates.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS contacts (
            seq INTEGER PRIMARY KEY AUTOINCREMENT,
            id TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL CHECK (length(name) > 0),
            email TEXT,
            phone TEXT,
            favorite INTEGER NOT NULL DEFAULT 0 CHECK (favorite IN (0, 1)),
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
