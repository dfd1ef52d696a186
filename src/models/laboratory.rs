//! # Laboratory Model
//!
//! Tenant-scoped registry of external dental laboratories. Orders refer to
//! laboratories by name, not by id, so the registry's main job is keeping
//! one canonical row per distinct name. Name matching is case-insensitive
//! at the database level (COLLATE NOCASE unique index).

use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

/// A registered external laboratory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Laboratory {
    pub id: i64,
    pub company_id: i64,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub created_at: NaiveDateTime,
}

/// New laboratory for creation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLaboratory {
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Partial update for laboratory contact details
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaboratoryUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Laboratory {
    /// Register a new laboratory. Fails on a duplicate name within the
    /// tenant (case-insensitive).
    pub async fn create(
        pool: &SqlitePool,
        company_id: i64,
        new_lab: NewLaboratory,
    ) -> Result<Laboratory, sqlx::Error> {
        let now = Utc::now().naive_utc();

        sqlx::query_as::<_, Laboratory>(
            r#"
            INSERT INTO laboratories (company_id, name, phone, email, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(new_lab.name.trim())
        .bind(&new_lab.phone)
        .bind(&new_lab.email)
        .bind(now)
        .fetch_one(pool)
        .await
    }

    /// Find by case-insensitive name within the tenant
    pub async fn find_by_name(
        pool: &SqlitePool,
        company_id: i64,
        name: &str,
    ) -> Result<Option<Laboratory>, sqlx::Error> {
        sqlx::query_as::<_, Laboratory>(
            r#"
            SELECT * FROM laboratories
            WHERE company_id = ?1 AND name = ?2 COLLATE NOCASE
            "#,
        )
        .bind(company_id)
        .bind(name.trim())
        .fetch_optional(pool)
        .await
    }

    /// Return the existing laboratory with this name, creating it first
    /// when no match exists. The stored casing of an existing row wins.
    pub async fn resolve_or_create(
        pool: &SqlitePool,
        company_id: i64,
        name: &str,
    ) -> Result<Laboratory, sqlx::Error> {
        if let Some(existing) = Self::find_by_name(pool, company_id, name).await? {
            return Ok(existing);
        }

        Self::create(
            pool,
            company_id,
            NewLaboratory {
                name: name.trim().to_string(),
                phone: None,
                email: None,
            },
        )
        .await
    }

    /// List the tenant's laboratories, alphabetically
    pub async fn list_for_company(
        pool: &SqlitePool,
        company_id: i64,
    ) -> Result<Vec<Laboratory>, sqlx::Error> {
        sqlx::query_as::<_, Laboratory>(
            r#"
            SELECT * FROM laboratories
            WHERE company_id = ?1
            ORDER BY name COLLATE NOCASE ASC
            "#,
        )
        .bind(company_id)
        .fetch_all(pool)
        .await
    }

    /// Apply a partial update. Returns `None` when the id is absent from
    /// the tenant's scope.
    pub async fn update(
        pool: &SqlitePool,
        company_id: i64,
        id: i64,
        update: LaboratoryUpdate,
    ) -> Result<Option<Laboratory>, sqlx::Error> {
        let Some(current) = sqlx::query_as::<_, Laboratory>(
            r#"
            SELECT * FROM laboratories
            WHERE company_id = ?1 AND id = ?2
            "#,
        )
        .bind(company_id)
        .bind(id)
        .fetch_optional(pool)
        .await?
        else {
            return Ok(None);
        };

        let name = update
            .name
            .map(|n| n.trim().to_string())
            .unwrap_or(current.name);
        let phone = match update.phone {
            Some(value) => Some(value),
            None => current.phone,
        };
        let email = match update.email {
            Some(value) => Some(value),
            None => current.email,
        };

        let lab = sqlx::query_as::<_, Laboratory>(
            r#"
            UPDATE laboratories SET name = ?3, phone = ?4, email = ?5
            WHERE company_id = ?1 AND id = ?2
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(id)
        .bind(&name)
        .bind(&phone)
        .bind(&email)
        .fetch_one(pool)
        .await?;

        Ok(Some(lab))
    }

    /// Remove a laboratory from the registry. Existing orders keep the
    /// name they already carry. Returns false when nothing matched.
    pub async fn delete(
        pool: &SqlitePool,
        company_id: i64,
        id: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM laboratories
            WHERE company_id = ?1 AND id = ?2
            "#,
        )
        .bind(company_id)
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
