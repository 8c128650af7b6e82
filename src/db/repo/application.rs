use chrono::NaiveDate;
use serde::Deserialize;

use crate::db::manager::{pool, DatabaseError};
use crate::db::models::ApplicationWithStatus;
use crate::db::ownership::{owner_gate, Entity, Principal};

/// Mutable fields of an application, as accepted by create and update.
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationPayload {
    pub user_id: i32,
    pub applicant_name: String,
    pub title: String,
    pub inventor_name: String,
    pub application_number: String,
    pub confirmation_number: Option<String>,
    pub examiner_name: Option<String>,
    pub group_art_unit: Option<String>,
    pub docket_number: Option<String>,
    pub status_id: Option<i32>,
    pub filed_date: Option<NaiveDate>,
    pub last_checked_date: Option<NaiveDate>,
    pub status_date: Option<NaiveDate>,
}

const LIST_ADMIN_SQL: &str = r#"SELECT "application".*, "status"."status_name"
    FROM "application"
    LEFT JOIN "status" ON "status"."id" = "application"."status_id"
    ORDER BY "application"."id""#;

const LIST_OWNED_SQL: &str = r#"SELECT "application".*, "status"."status_name"
    FROM "application"
    LEFT JOIN "status" ON "status"."id" = "application"."status_id"
    WHERE "application"."user_id" = $1
    ORDER BY "application"."id""#;

const FETCH_ADMIN_SQL: &str = r#"SELECT "application".*, "status"."status_name"
    FROM "application"
    LEFT JOIN "status" ON "status"."id" = "application"."status_id"
    WHERE "application"."id" = $1"#;

const FETCH_OWNED_SQL: &str = r#"SELECT "application".*, "status"."status_name"
    FROM "application"
    LEFT JOIN "status" ON "status"."id" = "application"."status_id"
    WHERE "application"."id" = $1 AND "application"."user_id" = $2"#;

// Binds: $1..$13 payload (a non-admin may only insert rows owned by
// themselves, so $1 doubles as the gated owner), $14 principal, $15 admin.
const INSERT_SQL: &str = r#"INSERT INTO "application"
      ("user_id", "applicant_name", "title", "inventor_name",
       "application_number", "confirmation_number", "examiner_name",
       "group_art_unit", "docket_number", "status_id",
       "filed_date", "last_checked_date", "status_date")
    SELECT $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13
    WHERE ($1 = $14 OR $15)"#;

// Binds: $1..$13 payload, $14 id, $15 principal, $16 admin.
fn update_sql() -> String {
    format!(
        r#"UPDATE "application"
           SET "user_id" = $1, "applicant_name" = $2, "title" = $3,
               "inventor_name" = $4, "application_number" = $5,
               "confirmation_number" = $6, "examiner_name" = $7,
               "group_art_unit" = $8, "docket_number" = $9, "status_id" = $10,
               "filed_date" = $11, "last_checked_date" = $12, "status_date" = $13
           WHERE "application"."id" = $14 AND {gate}"#,
        gate = owner_gate(Entity::Application, "$14", "$15", "$16"),
    )
}

// Binds: $1 id, $2 principal, $3 admin.
fn delete_sql() -> String {
    format!(
        r#"DELETE FROM "application"
           WHERE "application"."id" = $1 AND {gate}"#,
        gate = owner_gate(Entity::Application, "$1", "$2", "$3"),
    )
}

/// List applications with their status label. Read projection: admin sees
/// every row, everyone else only their own.
pub async fn list_with_status(
    principal: Principal,
) -> Result<Vec<ApplicationWithStatus>, DatabaseError> {
    let pool = pool().await?;

    let rows = if principal.is_admin {
        sqlx::query_as::<_, ApplicationWithStatus>(LIST_ADMIN_SQL)
            .fetch_all(pool)
            .await?
    } else {
        sqlx::query_as::<_, ApplicationWithStatus>(LIST_OWNED_SQL)
            .bind(principal.user_id)
            .fetch_all(pool)
            .await?
    };

    Ok(rows)
}

/// Fetch a single application by id, subject to the read projection.
pub async fn fetch(
    principal: Principal,
    id: i32,
) -> Result<Option<ApplicationWithStatus>, DatabaseError> {
    let pool = pool().await?;

    let row = if principal.is_admin {
        sqlx::query_as::<_, ApplicationWithStatus>(FETCH_ADMIN_SQL)
            .bind(id)
            .fetch_optional(pool)
            .await?
    } else {
        sqlx::query_as::<_, ApplicationWithStatus>(FETCH_OWNED_SQL)
            .bind(id)
            .bind(principal.user_id)
            .fetch_optional(pool)
            .await?
    };

    Ok(row)
}

/// Insert a new application. Non-admins can only create applications owned
/// by themselves; the gate is part of the statement.
pub async fn insert(
    principal: Principal,
    payload: &ApplicationPayload,
) -> Result<u64, DatabaseError> {
    let pool = pool().await?;

    let result = sqlx::query(INSERT_SQL)
        .bind(payload.user_id)
        .bind(&payload.applicant_name)
        .bind(&payload.title)
        .bind(&payload.inventor_name)
        .bind(&payload.application_number)
        .bind(&payload.confirmation_number)
        .bind(&payload.examiner_name)
        .bind(&payload.group_art_unit)
        .bind(&payload.docket_number)
        .bind(payload.status_id)
        .bind(payload.filed_date)
        .bind(payload.last_checked_date)
        .bind(payload.status_date)
        .bind(principal.user_id)
        .bind(principal.is_admin)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Update an application's fields, gated on ownership of the existing row.
pub async fn update(
    principal: Principal,
    id: i32,
    payload: &ApplicationPayload,
) -> Result<u64, DatabaseError> {
    let pool = pool().await?;

    let result = sqlx::query(&update_sql())
        .bind(payload.user_id)
        .bind(&payload.applicant_name)
        .bind(&payload.title)
        .bind(&payload.inventor_name)
        .bind(&payload.application_number)
        .bind(&payload.confirmation_number)
        .bind(&payload.examiner_name)
        .bind(&payload.group_art_unit)
        .bind(&payload.docket_number)
        .bind(payload.status_id)
        .bind(payload.filed_date)
        .bind(payload.last_checked_date)
        .bind(payload.status_date)
        .bind(id)
        .bind(principal.user_id)
        .bind(principal.is_admin)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Delete an application, gated on ownership. Idempotent: deleting an
/// already-deleted id affects zero rows.
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
    fn read_projection_filters_only_for_non_admin() {
        assert!(LIST_OWNED_SQL.contains(r#""application"."user_id" = $1"#));
        assert!(!LIST_ADMIN_SQL.contains("user_id"));
        assert!(FETCH_OWNED_SQL.contains(r#""application"."user_id" = $2"#));
        assert!(!FETCH_ADMIN_SQL.contains("user_id"));
    }

    #[test]
    fn insert_gates_owner_to_principal() {
        assert!(INSERT_SQL.contains("($1 = $14 OR $15)"));
        assert_eq!(max_bind(INSERT_SQL), 15);
    }

    #[test]
    fn update_gate_anchors_to_target_row() {
        let sql = update_sql();
        assert!(sql.contains(r#"WHERE "application"."id" = $14"#));
        assert!(sql.contains(r#""application"."user_id" = $15"#));
        assert!(sql.ends_with("OR $16)"));
        assert_eq!(max_bind(&sql), 16);
    }

    #[test]
    fn delete_gate_anchors_to_target_row() {
        let sql = delete_sql();
        assert!(sql.contains(r#""application"."id" = $1"#));
        assert!(sql.contains(r#""application"."user_id" = $2"#));
        assert!(sql.ends_with("OR $3)"));
        assert_eq!(max_bind(&sql), 3);
    }
}
