#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unknown query key: {0}")]
    UnknownQueryKey(String),

    #[error("Query 5 requires a keyword")]
    MissingKeyword,

    #[error("Invalid SQL identifier: {0:?}")]
    InvalidIdentifier(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
