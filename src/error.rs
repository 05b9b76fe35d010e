use thiserror::Error;

pub type Result<T> = std::result::Result<T, LocError>;

#[derive(Error, Debug)]
pub enum LocError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),
    #[error("Row {row}: missing required field `{field}`")]
    MissingField { row: usize, field: &'static str },
    #[error("Row {row}: invalid `{field}` value {value:?}: {reason}")]
    InvalidField {
        row: usize,
        field: &'static str,
        value: String,
        reason: String,
    },
    #[error("Invalid region: {0}")]
    InvalidRegion(String),
    #[error("Dataset is still loading")]
    NotLoaded,
}
