mod change_password;
mod outcome;
mod session;

pub use change_password::ChangePasswordForm;
pub use change_password::FormField;
pub use outcome::SubmissionOutcome;
pub use session::Session;
