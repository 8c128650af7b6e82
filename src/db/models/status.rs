use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Reference/lookup row; no ownership filtering applies.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Status {
    pub id: i32,
    pub status_name: String,
    pub definition: Option<String>,
}
