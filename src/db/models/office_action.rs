use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OfficeAction {
    pub id: i32,
    pub application_id: i32,
    pub uspto_mailing_date: Option<NaiveDate>,
    pub response_sent_date: Option<NaiveDate>,
}
