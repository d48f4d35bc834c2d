use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid number '{input}' for {field}")]
    InvalidNumber { field: &'static str, input: String },

    #[error("invalid request payload: {0}")]
    InvalidPayload(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
