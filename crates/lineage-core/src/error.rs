//! Error types for Lineage

use thiserror::Error;

/// Result type alias using Lineage's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Lineage error types with helpful messages and suggestions
#[derive(Error, Debug)]
pub enum Error {
    // Catalog errors (E001-E099)
    #[error("Collection '{0}' not found. Run `lineage collections` to see all collections.")]
    CollectionNotFound(String),

    #[error("Invalid collection registry: {0}")]
    RegistryError(String),

    #[error("Invalid column or table name '{0}'. Only letters, digits and underscores are allowed.")]
    InvalidIdentifier(String),

    // Record store errors (E100-E199)
    #[error("Could not load record '{id}' from '{collection}': {reason}")]
    PrimaryRecord {
        collection: String,
        id: String,
        reason: String,
    },

    #[error("Query timed out after {0} ms")]
    Timeout(u64),

    #[error("Request was cancelled")]
    Cancelled,

    // Database errors (E400-E499)
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Config errors (E600-E699)
    #[error("Configuration error: {0}")]
    ConfigError(String),

    // Input errors (E800-E899)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl Error {
    /// Get error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            Self::CollectionNotFound(_) => "E001",
            Self::RegistryError(_) => "E002",
            Self::InvalidIdentifier(_) => "E003",
            Self::PrimaryRecord { .. } => "E100",
            Self::Timeout(_) => "E101",
            Self::Cancelled => "E102",
            Self::DatabaseError(_) => "E400",
            Self::ConfigError(_) => "E600",
            Self::InvalidInput(_) => "E800",
            Self::Parse(_) => "E801",
        }
    }

    /// Get suggestion for how to fix this error
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::CollectionNotFound(_) => Some("lineage collections".to_string()),
            Self::RegistryError(_) => Some("lineage config get registry.path".to_string()),
            Self::PrimaryRecord { .. } | Self::DatabaseError(_) => {
                Some("lineage doctor".to_string())
            }
            Self::ConfigError(_) => Some("lineage config list".to_string()),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
