//! Data-access layer. One module per entity; every operation is a single
//! parameterized statement, with mutations gated in-statement by
//! [`crate::db::ownership`] so the authorization check and the effect are
//! atomic. Mutations return `rows_affected`; zero means the gate was false
//! (not owned, not admin) or the target id does not exist.

pub mod application;
pub mod issue;
pub mod office_action;
pub mod response_text;
pub mod status;
pub mod user;
