//! SQLite-backed contact store.

use chrono::Utc;
use sqlx::error::ErrorKind;
use sqlx::{Row, SqlitePool};

use super::ContactStore;
use crate::errors::AppError;
use crate::models::{
    new_contact_id, Contact, ContactSummary, CreateContactRequest, UpdateContactRequest,
};

const CONTACT_COLUMNS: &str = "id, name, email, phone, favorite, created_at, updated_at";

/// Contact store on a SQLite connection pool.
#[derive(Clone)]
pub struct SqliteContactStore {
    pool: SqlitePool,
}

impl SqliteContactStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl ContactStore for SqliteContactStore {
    async fn list(&self) -> Result<Vec<ContactSummary>, AppError> {
        let rows = sqlx::query("SELECT id, name, email, phone, favorite FROM contacts ORDER BY seq")
            .fetch_all(&self.pool)
            .await
            .map_err(translate)?;

        Ok(rows.iter().map(summary_from_row).collect())
    }

    async fn get_by_id<'a>(&'a self, id: &'a str) -> Result<Option<Contact>, AppError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM contacts WHERE id = ?",
            CONTACT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(translate)?;

        Ok(row.as_ref().map(contact_from_row))
    }

    async fn create<'a>(&'a self, request: &'a CreateContactRequest) -> Result<Contact, AppError> {
        let id = new_contact_id();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO contacts (id, name, email, phone, favorite, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(request.favorite as i32)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(translate)?;

        Ok(Contact {
            id,
            name: request.name.clone(),
            email: request.email.clone(),
            phone: request.phone.clone(),
            favorite: request.favorite,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    async fn update_by_id<'a>(
        &'a self,
        id: &'a str,
        request: &'a UpdateContactRequest,
    ) -> Result<Option<Contact>, AppError> {
        // Single statement: no read-then-write window for another writer.
        let row = sqlx::query(&format!(
            r#"UPDATE contacts SET
                name = COALESCE(?, name), email = COALESCE(?, email),
                phone = COALESCE(?, phone), favorite = COALESCE(?, favorite),
                updated_at = ?
            WHERE id = ?
            RETURNING {}"#,
            CONTACT_COLUMNS
        ))
        .bind(&request.name)
        .bind(&request.email)
        .bind(&request.phone)
        .bind(request.favorite.map(|b| b as i32))
        .bind(Utc::now().to_rfc3339())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(translate)?;

        Ok(row.as_ref().map(contact_from_row))
    }

    async fn delete_by_id<'a>(&'a self, id: &'a str) -> Result<Option<Contact>, AppError> {
        let row = sqlx::query(&format!(
            "DELETE FROM contacts WHERE id = ? RETURNING {}",
            CONTACT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(translate)?;

        Ok(row.as_ref().map(contact_from_row))
    }
}

/// Map a driver error onto the application error taxonomy. Called after
/// every query; constraint violations surface as 400s.
fn translate(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err)
            if matches!(
                db_err.kind(),
                ErrorKind::CheckViolation | ErrorKind::NotNullViolation
            ) =>
        {
            AppError::Validation(format!("Contact validation failed: {}", db_err.message()))
        }
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
            tracing::debug!("Database unavailable: {:?}", err);
            AppError::Internal("Database unavailable".to_string())
        }
        _ => {
            tracing::debug!("Database error: {:?}", err);
            AppError::Database(format!("Database error: {}", err))
        }
    }
}

// Helper functions for row conversion

fn contact_from_row(row: &sqlx::sqlite::SqliteRow) -> Contact {
    let favorite: i32 = row.get("favorite");
    Contact {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        phone: row.get("phone"),
        favorite: favorite != 0,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn summary_from_row(row: &sqlx::sqlite::SqliteRow) -> ContactSummary {
    let favorite: i32 = row.get("favorite");
    ContactSummary {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        phone: row.get("phone"),
        favorite: favorite != 0,
    }
}
