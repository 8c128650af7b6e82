use crate::db::manager::{pool, DatabaseError};
use crate::db::models::Status;

/// Reference list, visible to every authenticated user. No ownership
/// filtering applies.
pub async fn list() -> Result<Vec<Status>, DatabaseError> {
    let pool = pool().await?;

    let rows = sqlx::query_as::<_, Status>(
        r#"SELECT * FROM "status" ORDER BY "id""#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
