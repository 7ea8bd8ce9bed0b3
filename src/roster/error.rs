use thiserror::Error;

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered, but not with a success status.
    #[error("Server responded with status {status}: {body}")]
    Remote { status: u16, body: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Api(String),

    #[error("Render error: {0}")]
    Render(String),
}

impl From<minijinja::Error> for RosterError {
    fn from(err: minijinja::Error) -> Self {
        RosterError::Render(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RosterError>;
