pub mod application;
pub mod issue;
pub mod office_action;
pub mod response_text;
pub mod status;
pub mod user;

pub use application::{Application, ApplicationWithStatus};
pub use issue::Issue;
pub use office_action::OfficeAction;
pub use response_text::ResponseText;
pub use status::Status;
pub use user::User;
