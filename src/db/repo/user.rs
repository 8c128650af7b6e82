use crate::db::manager::{pool, DatabaseError};
use crate::db::models::User;

/// Look up a user by username for login
pub async fn find_by_username(username: &str) -> Result<Option<User>, DatabaseError> {
    let pool = pool().await?;

    let user = sqlx::query_as::<_, User>(
        r#"SELECT "id", "username", "password", "is_admin"
           FROM "user"
           WHERE "username" = $1"#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}
