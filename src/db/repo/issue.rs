use serde::Deserialize;

use crate::db::manager::{pool, DatabaseError};
use crate::db::models::Issue;
use crate::db::ownership::{owner_gate, Entity, Principal};

#[derive(Debug, Clone, Deserialize)]
pub struct IssuePayload {
    pub office_action_id: i32,
    pub issue_type: String,
    pub claim_numbers: Option<String>,
}

const LIST_ADMIN_SQL: &str = r#"SELECT * FROM "issue"
    WHERE "office_action_id" = $1
    ORDER BY "id""#;

const LIST_OWNED_SQL: &str = r#"SELECT "issue".* FROM "issue"
    JOIN "office_action" ON "office_action"."id" = "issue"."office_action_id"
    JOIN "application" ON "application"."id" = "office_action"."application_id"
    WHERE "issue"."office_action_id" = $1 AND "application"."user_id" = $2
    ORDER BY "issue"."id""#;

// Binds: $1..$3 payload (the gate checks $1, the parent office action),
// $4 principal, $5 admin.
fn insert_sql() -> String {
    format!(
        r#"INSERT INTO "issue" ("office_action_id", "issue_type", "claim_numbers")
           SELECT $1, $2, $3
           WHERE {gate}"#,
        gate = owner_gate(Entity::OfficeAction, "$1", "$4", "$5"),
    )
}

// Binds: $1..$3 payload, $4 id, $5 principal, $6 admin.
fn update_sql() -> String {
    format!(
        r#"UPDATE "issue"
           SET "office_action_id" = $1, "issue_type" = $2, "claim_numbers" = $3
           WHERE "issue"."id" = $4 AND {gate}"#,
        gate = owner_gate(Entity::Issue, "$4", "$5", "$6"),
    )
}

// Binds: $1 id, $2 principal, $3 admin.
fn delete_sql() -> String {
    format!(
        r#"DELETE FROM "issue"
           WHERE "issue"."id" = $1 AND {gate}"#,
        gate = owner_gate(Entity::Issue, "$1", "$2", "$3"),
    )
}

/// List issues raised in an office action, subject to the read projection.
pub async fn list_by_office_action(
    principal: Principal,
    office_action_id: i32,
) -> Result<Vec<Issue>, DatabaseError> {
    let pool = pool().await?;

    let rows = if principal.is_admin {
        sqlx::query_as::<_, Issue>(LIST_ADMIN_SQL)
            .bind(office_action_id)
            .fetch_all(pool)
            .await?
    } else {
        sqlx::query_as::<_, Issue>(LIST_OWNED_SQL)
            .bind(office_action_id)
            .bind(principal.user_id)
            .fetch_all(pool)
            .await?
    };

    Ok(rows)
}

/// Insert gated on ownership of the parent office action's chain.
pub async fn insert(principal: Principal, payload: &IssuePayload) -> Result<u64, DatabaseError> {
    let pool = pool().await?;

    let result = sqlx::query(&insert_sql())
        .bind(payload.office_action_id)
        .bind(&payload.issue_type)
        .bind(&payload.claim_numbers)
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
    payload: &IssuePayload,
) -> Result<u64, DatabaseError> {
    let pool = pool().await?;

    let result = sqlx::query(&update_sql())
        .bind(payload.office_action_id)
        .bind(&payload.issue_type)
        .bind(&payload.claim_numbers)
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
