use chrono::NaiveDate;
use serde::Deserialize;

use crate::db::manager::{pool, DatabaseError};
use crate::db::models::OfficeAction;
use crate::db::ownership::{owner_gate, Entity, Principal};

#[derive(Debug, Clone, Deserialize)]
pub struct OfficeActionPayload {
    pub application_id: i32,
    pub uspto_mailing_date: Option<NaiveDate>,
    pub response_sent_date: Option<NaiveDate>,
}

const LIST_ADMIN_SQL: &str = r#"SELECT * FROM "office_action"
    WHERE "application_id" = $1
    ORDER BY "id""#;

const LIST_OWNED_SQL: &str = r#"SELECT "office_action".* FROM "office_action"
    JOIN "application" ON "application"."id" = "office_action"."application_id"
    WHERE "office_action"."application_id" = $1 AND "application"."user_id" = $2
    ORDER BY "office_action"."id""#;

// Binds: $1..$3 payload (the gate checks $1, the parent application),
// $4 principal, $5 admin.
fn insert_sql() -> String {
    format!(
        r#"INSERT INTO "office_action"
             ("application_id", "uspto_mailing_date", "response_sent_date")
           SELECT $1, $2, $3
           WHERE {gate}"#,
        gate = owner_gate(Entity::Application, "$1", "$4", "$5"),
    )
}

// Binds: $1..$3 payload, $4 id, $5 principal, $6 admin.
fn update_sql() -> String {
    format!(
        r#"UPDATE "office_action"
           SET "application_id" = $1, "uspto_mailing_date" = $2, "response_sent_date" = $3
           WHERE "office_action"."id" = $4 AND {gate}"#,
        gate = owner_gate(Entity::OfficeAction, "$4", "$5", "$6"),
    )
}

// Binds: $1 id, $2 principal, $3 admin.
fn delete_sql() -> String {
    format!(
        r#"DELETE FROM "office_action"
           WHERE "office_action"."id" = $1 AND {gate}"#,
        gate = owner_gate(Entity::OfficeAction, "$1", "$2", "$3"),
    )
}

/// List office actions for an application, subject to the read projection.
pub async fn list_by_application(
    principal: Principal,
    application_id: i32,
) -> Result<Vec<OfficeAction>, DatabaseError> {
    let pool = pool().await?;

    let rows = if principal.is_admin {
        sqlx::query_as::<_, OfficeAction>(LIST_ADMIN_SQL)
            .bind(application_id)
            .fetch_all(pool)
            .await?
    } else {
        sqlx::query_as::<_, OfficeAction>(LIST_OWNED_SQL)
            .bind(application_id)
            .bind(principal.user_id)
            .fetch_all(pool)
            .await?
    };

    Ok(rows)
}

/// Insert gated on ownership of the parent application.
pub async fn insert(
    principal: Principal,
    payload: &OfficeActionPayload,
) -> Result<u64, DatabaseError> {
    let pool = pool().await?;

    let result = sqlx::query(&insert_sql())
        .bind(payload.application_id)
        .bind(payload.uspto_mailing_date)
        .bind(payload.response_sent_date)
        .bind(principal.user_id)
        .bind(principal.is_admin)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Update gated on the existing row's ownership chain.
pub async fn update(
    principal: Principal,
    id: i32,
    payload: &OfficeActionPayload,
) -> Result<u64, DatabaseError> {
    let pool = pool().await?;

    let result = sqlx::query(&update_sql())
        .bind(payload.application_id)
        .bind(payload.uspto_mailing_date)
        .bind(payload.response_sent_date)
        .bind(id)
        .bind(principal.user_id)
        .bind(principal.is_admin)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

pub async fn delete(principal: Principal, id: i32) -> Result<u64, DatabaseError> {
    let pool = pool().await?;

    let result = sqlx::query(&delete_sql())
        .bind(id)
        .bind(principal.user_id)
        .bind(principal.is_admin)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::max_bind;

    #[test]
    fn read_projection_joins_owner_only_for_non_admin() {
        assert!(LIST_OWNED_SQL.contains(r#""application"."user_id" = $2"#));
        assert!(!LIST_ADMIN_SQL.contains("user_id"));
    }

    #[test]
    fn insert_gates_on_parent_application() {
        let sql = insert_sql();
        assert!(sql.contains(r#""application"."id" = $1"#));
        assert!(sql.contains(r#""application"."user_id" = $4"#));
        assert!(sql.ends_with("OR $5)"));
        assert_eq!(max_bind(&sql), 5);
    }

    #[test]
    fn update_gate_anchors_to_target_row() {
        let sql = update_sql();
        assert!(sql.contains(r#""office_action"."id" = $4"#));
        assert!(sql.contains(r#""application"."user_id" = $5"#));
        assert!(sql.ends_with("OR $6)"));
        assert_eq!(max_bind(&sql), 6);
    }

    #[test]
    fn delete_gate_anchors_to_target_row() {
        let sql = delete_sql();
        assert!(sql.contains(r#""office_action"."id" = $1"#));
        assert!(sql.contains(r#""application"."user_id" = $2"#));
        assert!(sql.ends_with("OR $3)"));
        assert_eq!(max_bind(&sql), 3);
    }
}
