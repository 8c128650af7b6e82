use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResponseText {
    pub id: i32,
    pub issue_id: i32,
    pub text: String,
}
