use serde::Deserialize;

use crate::db::manager::{pool, DatabaseError};
use crate::db::models::ResponseText;
use crate::db::ownership::{owner_gate, Entity, Principal};

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseTextPayload {
    pub issue_id: i32,
    pub text: String,
}

const LIST_ADMIN_SQL: &str = r#"SELECT "response_text".* FROM "response_text"
    JOIN "issue" ON "issue"."id" = "response_text"."issue_id"
    WHERE "issue"."office_action_id" = $1
    ORDER BY "response_text"."id""#;

const LIST_OWNED_SQL: &str = r#"SELECT "response_text".* FROM "response_text"
    JOIN "issue" ON "issue"."id" = "response_text"."issue_id"
    JOIN "office_action" ON "office_action"."id" = "issue"."office_action_id"
    JOIN "application" ON "application"."id" = "office_action"."application_id"
    WHERE "issue"."office_action_id" = $1 AND "application"."user_id" = $2
    ORDER BY "response_text"."id""#;

// Binds: $1..$2 payload (the gate checks $1, the parent issue),
// $3 principal, $4 admin.
fn insert_sql() -> String {
    format!(
        r#"INSERT INTO "response_text" ("issue_id", "text")
           SELECT $1, $2
           WHERE {gate}"#,
        gate = owner_gate(Entity::Issue, "$1", "$3", "$4"),
    )
}

// Binds: $1..$2 payload, $3 id, $4 principal, $5 admin.
fn update_sql() -> String {
    format!(
        r#"UPDATE "response_text"
           SET "issue_id" = $1, "text" = $2
           WHERE "response_text"."id" = $3 AND {gate}"#,
        gate = owner_gate(Entity::ResponseText, "$3", "$4", "$5"),
    )
}

// Binds: $1 id, $2 principal, $3 admin.
fn delete_sql() -> String {
    format!(
        r#"DELETE FROM "response_text"
           WHERE "response_text"."id" = $1 AND {gate}"#,
        gate = owner_gate(Entity::ResponseText, "$1", "$2", "$3"),
    )
}

/// List response texts for every issue in an office action (join through
/// `issue`), subject to the read projection.
pub async fn list_by_office_action(
    principal: Principal,
    office_action_id: i32,
) -> Result<Vec<ResponseText>, DatabaseError> {
    let pool = pool().await?;

    let rows = if principal.is_admin {
        sqlx::query_as::<_, ResponseText>(LIST_ADMIN_SQL)
            .bind(office_action_id)
            .fetch_all(pool)
            .await?
    } else {
        sqlx::query_as::<_, ResponseText>(LIST_OWNED_SQL)
            .bind(office_action_id)
            .bind(principal.user_id)
            .fetch_all(pool)
            .await?
    };

    Ok(rows)
}

/// Insert gated on ownership of the parent issue's chain.
pub async fn insert(
    principal: Principal,
    payload: &ResponseTextPayload,
) -> Result<u64, DatabaseError> {
    let pool = pool().await?;

    let result = sqlx::query(&insert_sql())
        .bind(payload.issue_id)
        .bind(&payload.text)
        .bind(principal.user_id)
        .bind(principal.is_admin)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Update gated on the existing row's ownership chain (the chain is walked
/// from the row's current `issue_id`, not the one in the payload).
pub async fn update(
    principal: Principal,
    id: i32,
    payload: &ResponseTextPayload,
) -> Result<u64, DatabaseError> {
    let pool = pool().await?;

    let result = sqlx::query(&update_sql())
        .bind(payload.issue_id)
        .bind(&payload.text)
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
    fn insert_gates_on_parent_issue() {
        let sql = insert_sql();
        assert!(sql.contains(r#""issue"."id" = $1"#));
        assert!(sql.contains(r#""application"."user_id" = $3"#));
        assert!(sql.ends_with("OR $4)"));
        assert_eq!(max_bind(&sql), 4);
    }

    #[test]
    fn update_gate_anchors_to_target_row() {
        let sql = update_sql();
        assert!(sql.contains(r#""response_text"."id" = $3"#));
        assert!(sql.contains(r#""application"."user_id" = $4"#));
        assert!(sql.ends_with("OR $5)"));
        assert_eq!(max_bind(&sql), 5);
    }

    #[test]
    fn delete_gate_anchors_to_target_row() {
        let sql = delete_sql();
        assert!(sql.contains(r#""response_text"."id" = $1"#));
        assert!(sql.contains(r#""application"."user_id" = $2"#));
        assert!(sql.ends_with("OR $3)"));
        assert_eq!(max_bind(&sql), 3);
    }
}
