use thiserror::Error;

#[derive(Error, Debug)]
pub enum NameForgeError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    /// An input character has no Unihan record or no usable stroke count.
    #[error("Character Resolution Error: '{0}' has no known stroke count")]
    CharacterResolution(char),

    #[error("Invalid Constraint: {0}")]
    InvalidConstraint(String),

    #[error("Invalid Pillar: {0}")]
    InvalidPillar(String),

    #[error("Rank table has not been built")]
    TableUninitialized,
}

pub type NfResult<T> = Result<T, NameForgeError>;
