//! # Prosthesis Order Model
//!
//! Canonical persisted state of every lab work order. Each row is owned by
//! one tenant (`company_id`) and carries the lifecycle status, the three
//! lifecycle dates, a non-owning laboratory name, and the attached label
//! ids as a JSON array.
//!
//! ## Status policy
//!
//! `create` always stores `pending` regardless of any status the request
//! carried; status changes afterwards travel through the transition
//! validator and arrive here as part of a partial update.

use crate::state_machine::OrderStatus;
use chrono::{NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::types::Json;
use sqlx::{FromRow, SqlitePool};

/// A prosthesis work order moving through the external-lab pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProsthesisOrder {
    pub id: i64,
    pub company_id: i64,
    pub patient_id: i64,
    pub professional_id: i64,
    #[serde(rename = "type")]
    pub prosthesis_type: String,
    pub description: String,
    pub laboratory: Option<String>,
    pub status: OrderStatus,
    pub sent_date: Option<NaiveDate>,
    pub expected_return_date: Option<NaiveDate>,
    pub return_date: Option<NaiveDate>,
    pub observations: Option<String>,
    pub labels: Json<Vec<String>>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// New order for creation (without server-generated fields).
///
/// An incoming `status` is accepted on the wire and deliberately ignored;
/// new orders always start `pending`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProsthesisOrder {
    pub patient_id: i64,
    pub professional_id: i64,
    #[serde(rename = "type")]
    pub prosthesis_type: String,
    pub description: String,
    #[serde(default)]
    pub laboratory: Option<String>,
    #[serde(default)]
    pub status: Option<OrderStatus>,
    #[serde(default)]
    pub sent_date: Option<NaiveDate>,
    #[serde(default)]
    pub expected_return_date: Option<NaiveDate>,
    #[serde(default)]
    pub observations: Option<String>,
    #[serde(default)]
    pub labels: Vec<String>,
}

/// Partial update for edits and transitions.
///
/// Date fields distinguish "absent" (leave unchanged) from explicit null
/// (clear); the rollback transition `sent -> pending` depends on that.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProsthesisOrderUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub professional_id: Option<i64>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub prosthesis_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub laboratory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "double_option"
    )]
    pub sent_date: Option<Option<NaiveDate>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "double_option"
    )]
    pub expected_return_date: Option<Option<NaiveDate>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "double_option"
    )]
    pub return_date: Option<Option<NaiveDate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
}

/// Deserialize a present-but-possibly-null field into `Some(inner)`,
/// leaving absent fields at the `None` default.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Label sets are order-irrelevant and duplicate-free; normalize on write
fn normalize_labels(mut labels: Vec<String>) -> Vec<String> {
    labels.sort_unstable();
    labels.dedup();
    labels
}

impl ProsthesisOrder {
    /// Create a new order. Status is forced to `pending`.
    pub async fn create(
        pool: &SqlitePool,
        company_id: i64,
        new_order: NewProsthesisOrder,
    ) -> Result<ProsthesisOrder, sqlx::Error> {
        let now = Utc::now().naive_utc();
        let labels = Json(normalize_labels(new_order.labels));

        let order = sqlx::query_as::<_, ProsthesisOrder>(
            r#"
            INSERT INTO prosthesis_orders (
                company_id, patient_id, professional_id, prosthesis_type,
                description, laboratory, status, sent_date,
                expected_return_date, return_date, observations, labels,
                created_at, updated_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, 'pending', ?7, ?8, NULL, ?9, ?10, ?11, ?11)
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(new_order.patient_id)
        .bind(new_order.professional_id)
        .bind(&new_order.prosthesis_type)
        .bind(&new_order.description)
        .bind(&new_order.laboratory)
        .bind(new_order.sent_date)
        .bind(new_order.expected_return_date)
        .bind(&new_order.observations)
        .bind(labels)
        .bind(now)
        .fetch_one(pool)
        .await?;

        Ok(order)
    }

    /// Find an order by id within the tenant's scope
    pub async fn find_by_id(
        pool: &SqlitePool,
        company_id: i64,
        id: i64,
    ) -> Result<Option<ProsthesisOrder>, sqlx::Error> {
        sqlx::query_as::<_, ProsthesisOrder>(
            r#"
            SELECT * FROM prosthesis_orders
            WHERE company_id = ?1 AND id = ?2
            "#,
        )
        .bind(company_id)
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// List every order owned by the tenant, newest first
    pub async fn list_for_company(
        pool: &SqlitePool,
        company_id: i64,
    ) -> Result<Vec<ProsthesisOrder>, sqlx::Error> {
        sqlx::query_as::<_, ProsthesisOrder>(
            r#"
            SELECT * FROM prosthesis_orders
            WHERE company_id = ?1
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(company_id)
        .fetch_all(pool)
        .await
    }

    /// Apply a partial update. Returns `None` when the id is absent from
    /// the tenant's scope. `updated_at` is refreshed on every call.
    pub async fn update(
        pool: &SqlitePool,
        company_id: i64,
        id: i64,
        update: ProsthesisOrderUpdate,
    ) -> Result<Option<ProsthesisOrder>, sqlx::Error> {
        let Some(current) = Self::find_by_id(pool, company_id, id).await? else {
            return Ok(None);
        };

        let patient_id = update.patient_id.unwrap_or(current.patient_id);
        let professional_id = update.professional_id.unwrap_or(current.professional_id);
        let prosthesis_type = update
            .prosthesis_type
            .unwrap_or(current.prosthesis_type);
        let description = update.description.unwrap_or(current.description);
        let laboratory = match update.laboratory {
            Some(name) => Some(name),
            None => current.laboratory,
        };
        let status = update.status.unwrap_or(current.status);
        let sent_date = update.sent_date.unwrap_or(current.sent_date);
        let expected_return_date = update
            .expected_return_date
            .unwrap_or(current.expected_return_date);
        let return_date = update.return_date.unwrap_or(current.return_date);
        let observations = match update.observations {
            Some(text) => Some(text),
            None => current.observations,
        };
        let labels = Json(normalize_labels(
            update.labels.unwrap_or(current.labels.0),
        ));
        let now = Utc::now().naive_utc();

        let order = sqlx::query_as::<_, ProsthesisOrder>(
            r#"
            UPDATE prosthesis_orders SET
                patient_id = ?3, professional_id = ?4, prosthesis_type = ?5,
                description = ?6, laboratory = ?7, status = ?8,
                sent_date = ?9, expected_return_date = ?10, return_date = ?11,
                observations = ?12, labels = ?13, updated_at = ?14
            WHERE company_id = ?1 AND id = ?2
            RETURNING *
            "#,
        )
        .bind(company_id)
        .bind(id)
        .bind(patient_id)
        .bind(professional_id)
        .bind(&prosthesis_type)
        .bind(&description)
        .bind(&laboratory)
        .bind(status)
        .bind(sent_date)
        .bind(expected_return_date)
        .bind(return_date)
        .bind(&observations)
        .bind(labels)
        .bind(now)
        .fetch_one(pool)
        .await?;

        Ok(Some(order))
    }

    /// Hard delete. Returns false when nothing matched.
    pub async fn delete(
        pool: &SqlitePool,
        company_id: i64,
        id: i64,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM prosthesis_orders
            WHERE company_id = ?1 AND id = ?2
            "#,
        )
        .bind(company_id)
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Remove a label id from every order in the tenant that carries it.
    /// Returns the number of orders rewritten.
    pub async fn strip_label(
        pool: &SqlitePool,
        company_id: i64,
        label_id: &str,
    ) -> Result<u64, sqlx::Error> {
        let orders = Self::list_for_company(pool, company_id).await?;
        let now = Utc::now().naive_utc();
        let mut touched = 0u64;

        for order in orders {
            if !order.labels.0.iter().any(|l| l == label_id) {
                continue;
            }

            let remaining: Vec<String> = order
                .labels
                .0
                .into_iter()
                .filter(|l| l != label_id)
                .collect();

            sqlx::query(
                r#"
                UPDATE prosthesis_orders SET labels = ?3, updated_at = ?4
                WHERE company_id = ?1 AND id = ?2
                "#,
            )
            .bind(company_id)
            .bind(order.id)
            .bind(Json(remaining))
            .bind(now)
            .execute(pool)
            .await?;

            touched += 1;
        }

        Ok(touched)
    }

    /// Check whether the order carries the given label id
    pub fn has_label(&self, label_id: &str) -> bool {
        self.labels.0.iter().any(|l| l == label_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_normalized() {
        let labels = normalize_labels(vec![
            "urgente".to_string(),
            "premium".to_string(),
            "urgente".to_string(),
        ]);
        assert_eq!(labels, vec!["premium".to_string(), "urgente".to_string()]);
    }

    #[test]
    fn test_update_date_fields_distinguish_null_from_absent() {
        let patch: ProsthesisOrderUpdate =
            serde_json::from_str(r#"{"status":"pending","sentDate":null}"#).unwrap();
        assert_eq!(patch.status, Some(OrderStatus::Pending));
        assert_eq!(patch.sent_date, Some(None));
        assert_eq!(patch.return_date, None);

        let patch: ProsthesisOrderUpdate =
            serde_json::from_str(r#"{"sentDate":"2024-01-01"}"#).unwrap();
        assert_eq!(
            patch.sent_date,
            Some(Some(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()))
        );
    }

    #[test]
    fn test_update_serializes_explicit_null() {
        let patch = ProsthesisOrderUpdate {
            status: Some(OrderStatus::Pending),
            sent_date: Some(None),
            return_date: Some(None),
            ..Default::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json["sentDate"], serde_json::Value::Null);
        assert_eq!(json["returnDate"], serde_json::Value::Null);
        assert!(json.get("expectedReturnDate").is_none());
    }

    #[test]
    fn test_wire_field_names() {
        let body = r#"{
            "patientId": 1, "professionalId": 2, "type": "Coroa",
            "description": "Coroa de cerâmica no dente 36",
            "status": "archived", "labels": ["urgente"]
        }"#;
        let new_order: NewProsthesisOrder = serde_json::from_str(body).unwrap();
        assert_eq!(new_order.prosthesis_type, "Coroa");
        // Requested status is carried but ignored at creation time
        assert_eq!(new_order.status, Some(OrderStatus::Archived));
    }
}
