//! Ownership-chain authorization predicate.
//!
//! Every record in the system hangs off an `application` row, which belongs
//! to exactly one user: `response_text -> issue -> office_action ->
//! application -> user`. A mutation is permitted only when the acting
//! principal owns the application at the top of that chain, or holds the
//! admin override. The predicate is rendered as an `EXISTS (...)` fragment
//! and embedded in the same statement as the mutation, so the check and the
//! act are a single atomic statement and cannot race.
//!
//! A false predicate (wrong owner, or a target id that does not exist at
//! all) makes the statement affect zero rows; the repo layer surfaces
//! `rows_affected` so callers can observe the no-op.

/// Acting principal, as carried by every authenticated request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user_id: i32,
    pub is_admin: bool,
}

/// Entities reachable from `application` via the ownership chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Application,
    OfficeAction,
    Issue,
    ResponseText,
}

impl Entity {
    pub fn table(&self) -> &'static str {
        match self {
            Entity::Application => "application",
            Entity::OfficeAction => "office_action",
            Entity::Issue => "issue",
            Entity::ResponseText => "response_text",
        }
    }

    /// Joins from `application` down to this entity, in chain order.
    fn chain_joins(&self) -> &'static [&'static str] {
        const TO_OFFICE_ACTION: &str =
            r#"JOIN "office_action" ON "office_action"."application_id" = "application"."id""#;
        const TO_ISSUE: &str =
            r#"JOIN "issue" ON "issue"."office_action_id" = "office_action"."id""#;
        const TO_RESPONSE_TEXT: &str =
            r#"JOIN "response_text" ON "response_text"."issue_id" = "issue"."id""#;

        match self {
            Entity::Application => &[],
            Entity::OfficeAction => &[TO_OFFICE_ACTION],
            Entity::Issue => &[TO_OFFICE_ACTION, TO_ISSUE],
            Entity::ResponseText => &[TO_OFFICE_ACTION, TO_ISSUE, TO_RESPONSE_TEXT],
        }
    }
}

/// Render the `EXISTS (...)` walk from `entity` up to the owning user.
/// `id_expr` and `user_expr` are SQL expressions, in practice numbered
/// binds like `$3`.
pub fn owner_exists(entity: Entity, id_expr: &str, user_expr: &str) -> String {
    let mut sql = String::from(r#"EXISTS (SELECT 1 FROM "application""#);
    for join in entity.chain_joins() {
        sql.push(' ');
        sql.push_str(join);
    }
    sql.push_str(&format!(
        r#" WHERE "application"."user_id" = {user_expr} AND "{table}"."id" = {id_expr})"#,
        table = entity.table(),
    ));
    sql
}

/// The full gate: ownership of the chain, or the admin override.
/// `admin_expr` is a boolean bind (e.g. `$4`).
pub fn owner_gate(entity: Entity, id_expr: &str, user_expr: &str, admin_expr: &str) -> String {
    format!("({} OR {})", owner_exists(entity, id_expr, user_expr), admin_expr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn application_walk_has_no_joins() {
        let sql = owner_exists(Entity::Application, "$1", "$2");
        assert!(!sql.contains("JOIN"));
        assert!(sql.contains(r#""application"."user_id" = $2"#));
        assert!(sql.contains(r#""application"."id" = $1"#));
    }

    #[test]
    fn response_text_walks_full_chain() {
        let sql = owner_exists(Entity::ResponseText, "$5", "$3");
        // One join per hop, in chain order
        let oa = sql.find(r#"JOIN "office_action""#).expect("office_action join");
        let issue = sql.find(r#"JOIN "issue""#).expect("issue join");
        let rt = sql.find(r#"JOIN "response_text""#).expect("response_text join");
        assert!(oa < issue && issue < rt);
        assert!(sql.ends_with(r#""response_text"."id" = $5)"#));
    }

    #[test]
    fn issue_walk_stops_at_issue() {
        let sql = owner_exists(Entity::Issue, "$1", "$2");
        assert!(sql.contains(r#"JOIN "issue""#));
        assert!(!sql.contains(r#"JOIN "response_text""#));
    }

    #[test]
    fn gate_appends_admin_override() {
        let sql = owner_gate(Entity::OfficeAction, "$1", "$2", "$3");
        assert!(sql.starts_with("(EXISTS"));
        assert!(sql.ends_with("OR $3)"));
    }
}
