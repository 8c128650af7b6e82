use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A patent application. Belongs to exactly one user; every other record in
/// the system is reachable from one of these.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Application {
    pub id: i32,
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

/// Application row joined with its status label, as returned by the
/// collection listing.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ApplicationWithStatus {
    pub id: i32,
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
    pub status_name: Option<String>,
}
