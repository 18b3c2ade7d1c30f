use thiserror::Error;

#[derive(Error, Debug)]
pub enum StringLensError {
    #[error("Invalid request body or missing '{field}' field")]
    MissingField { field: &'static str },
    #[error("Missing query parameter")]
    MissingQuery,
    #[error("Value must be a string")]
    TypeMismatch,
    #[error("String already exists in the system")]
    Duplicate,
    #[error("Invalid query parameter values or types")]
    Validation { parameter: &'static str },
    #[error("String does not exist in the system")]
    NotFound,
    #[error("Unable to parse natural language query")]
    UnparseableQuery,
    #[error("Query parsed but resulted in conflicting filters")]
    ConflictingFilters { conflicts: Vec<&'static str> },
    #[error("Config error: {0}")]
    Config(String),
    #[error("Persistence error: {0}")]
    Persistence(String),
    #[error("Lock poisoned: {0}")]
    Lock(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl StringLensError {
    /// Faults of the service itself rather than of the request.
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::Config(_) | Self::Persistence(_) | Self::Lock(_) | Self::Internal(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, StringLensError>;

// Helper conversions
impl From<rusqlite::Error> for StringLensError {
    fn from(e: rusqlite::Error) -> Self { Self::Persistence(e.to_string()) }
}

impl From<config::ConfigError> for StringLensError {
    fn from(e: config::ConfigError) -> Self { Self::Config(e.to_string()) }
}
