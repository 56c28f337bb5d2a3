use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("No active session found in the session store")]
    SessionMissing,

    #[error("{message}")]
    IdentityService { status: u16, message: String },

    #[error("Failed to reach the identity service")]
    Network(#[from] reqwest::Error),

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl Error {
    /// Message suitable for inline display next to the form.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}
