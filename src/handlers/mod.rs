pub mod application;
pub mod auth;
pub mod issue;
pub mod office_action;
pub mod response_text;
pub mod status;

use crate::db::manager::DatabaseError;
use crate::error::ApiError;

/// Tag a database fault with the failing operation before converting it to
/// the generic 500 response.
pub(crate) fn db_error(op: &'static str) -> impl FnOnce(DatabaseError) -> ApiError {
    move |err| {
        tracing::error!("Error in {}: {}", op, err);
        ApiError::from(err)
    }
}

/// Zero affected rows means the ownership gate was false or the target id
/// does not exist. The response stays a uniform success so the API does not
/// reveal which; operators can still see the no-op here.
pub(crate) fn log_zero_rows(op: &'static str, rows_affected: u64) {
    if rows_affected == 0 {
        tracing::debug!("{} affected zero rows (not owned, or no such record)", op);
    }
}
