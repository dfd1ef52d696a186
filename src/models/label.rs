//! # Label Model
//!
//! Tenant-scoped catalog of categorization labels. Each label is a
//! slug-like id plus a display name and a hex color. Orders hold label ids
//! in their JSON label array, so deleting a label cascades a strip pass
//! over the tenant's orders. A restore operation resets the catalog to
//! exactly the built-in defaults, removing custom labels along the way.

use crate::constants::DEFAULT_LABELS;
use crate::models::ProsthesisOrder;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

/// A categorization label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    pub id: String,
    pub company_id: i64,
    pub name: String,
    pub color: String,
}

/// New label for creation. The id is derived from the name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLabel {
    pub name: String,
    pub color: String,
}

/// Derive a stable label id from its display name: lowercase, spaces
/// collapsed to single hyphens.
pub fn slugify(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

impl Label {
    /// List the tenant's labels, alphabetically by name
    pub async fn list_for_company(
        pool: &SqlitePool,
        company_id: i64,
    ) -> Result<Vec<Label>, sqlx::Error> {
        sqlx::query_as::<_, Label>(
            r#"
            SELECT * FROM labels
            WHERE company_id = ?1
            ORDER BY name ASC
            "#,
        )
        .bind(company_id)
        .fetch_all(pool)
        .await
    }

    /// Find a label by id within the tenant
    pub async fn find_by_id(
        pool: &SqlitePool,
        company_id: i64,
        id: &str,
    ) -> Result<Option<Label>, sqlx::Error> {
        sqlx::query_as::<_, Label>(
            r#"
            SELECT * FROM labels
            WHERE company_id = ?1 AND id = ?2
            "#,
        )
        .bind(company_id)
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Create a label. Fails with a database unique violation when a label
    /// with the same derived id already exists in the tenant.
    pub async fn create(
        pool: &SqlitePool,
        company_id: i64,
        new_label: NewLabel,
    ) -> Result<Label, sqlx::Error> {
        let id = slugify(&new_label.name);

        sqlx::query_as::<_, Label>(
            r#"
            INSERT INTO labels (id, company_id, name, color)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING *
            "#,
        )
        .bind(&id)
        .bind(company_id)
        .bind(new_label.name.trim())
        .bind(&new_label.color)
        .fetch_one(pool)
        .await
    }

    /// Delete a label and strip its id from every order in the tenant.
    /// Returns false when the label did not exist.
    pub async fn delete(
        pool: &SqlitePool,
        company_id: i64,
        id: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM labels
            WHERE company_id = ?1 AND id = ?2
            "#,
        )
        .bind(company_id)
        .bind(id)
        .execute(pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        let stripped = ProsthesisOrder::strip_label(pool, company_id, id).await?;
        tracing::info!(
            company_id = company_id,
            label_id = %id,
            orders_rewritten = stripped,
            "Deleted label and stripped it from orders"
        );

        Ok(true)
    }

    /// Reset the tenant's catalog to exactly the built-in defaults.
    /// Custom labels are removed (and stripped from orders); defaults
    /// that were deleted or recolored come back in their original form.
    pub async fn restore_defaults(
        pool: &SqlitePool,
        company_id: i64,
    ) -> Result<Vec<Label>, sqlx::Error> {
        let existing = Self::list_for_company(pool, company_id).await?;
        for label in existing {
            if !DEFAULT_LABELS.iter().any(|(id, _, _)| *id == label.id) {
                Self::delete(pool, company_id, &label.id).await?;
            }
        }

        for (id, name, color) in DEFAULT_LABELS {
            sqlx::query(
                r#"
                INSERT INTO labels (id, company_id, name, color)
                VALUES (?1, ?2, ?3, ?4)
                ON CONFLICT(company_id, id) DO UPDATE SET name = ?3, color = ?4
                "#,
            )
            .bind(id)
            .bind(company_id)
            .bind(name)
            .bind(color)
            .execute(pool)
            .await?;
        }

        Self::list_for_company(pool, company_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_lowercases_and_hyphenates() {
        assert_eq!(slugify("Alta Prioridade"), "alta-prioridade");
        assert_eq!(slugify("  Urgente  "), "urgente");
        assert_eq!(slugify("Caso   VIP"), "caso-vip");
    }

    #[test]
    fn test_slugify_collisions_share_an_id() {
        assert_eq!(slugify("Urgente"), slugify("URGENTE"));
    }
}
