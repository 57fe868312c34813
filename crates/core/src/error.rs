#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid activity code: {0}")]
    InvalidActivityCode(String),

    #[error("Invalid group number: {0}")]
    InvalidGroupNumber(String),

    #[error("Malformed WCIF: {0}")]
    MalformedWcif(#[from] serde_json::Error),
}
