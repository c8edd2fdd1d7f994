use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormatterError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input table: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, FormatterError>;
