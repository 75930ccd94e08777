use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Password does not meet requirements: {0}")]
    PasswordPolicy(String),

    #[error("Backend error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Task {0} not found")]
    TaskNotFound(uuid::Uuid),
}

impl Error {
    /// True when the backend answered but the endpoint does not exist.
    /// The account-deletion flow uses this to detect deployments without
    /// the `delete_user` procedure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Api { status: 404, .. })
    }
}
