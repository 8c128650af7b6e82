use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Issue {
    pub id: i32,
    pub office_action_id: i32,
    pub issue_type: String,
    pub claim_numbers: Option<String>,
}
