//! Error types and exit codes for ballast
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args, rejected weight submissions)
//! - 3: Config/store error (missing config, unprovisioned field, bad frontmatter)

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes reported by the ballast CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Config/store error - missing config, unprovisioned field (3)
    Config = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<rusqlite::Error> for BallastError {
    fn from(err: rusqlite::Error) -> Self {
        BallastError::Database(err.to_string())
    }
}

/// Errors that can occur during ballast operations
#[derive(Error, Debug)]
pub enum BallastError {
    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human, json, or records)")]
    UnknownFormat(String),

    #[error("--format may only be specified once")]
    DuplicateFormat,

    #[error("{0}")]
    UsageError(String),

    #[error("unknown processor: {id} (known: {known})")]
    UnknownProcessor { id: String, known: String },

    #[error("unknown {context} key: {key}")]
    UnknownKey { context: String, key: String },

    #[error("invalid weight for {key:?}: {value} (expected an integer)")]
    InvalidWeight { key: String, value: String },

    #[error("invalid {context} key {key:?} (expected a lowercase machine name)")]
    InvalidKey { context: String, key: String },

    // Config/store errors (exit code 3)
    #[error("config not found (searched from {search_root:?})")]
    ConfigNotFound { search_root: PathBuf },

    #[error("invalid config: {reason}")]
    InvalidConfig { reason: String },

    #[error("index has no field {field:?}: {hint}")]
    MissingField { field: String, hint: String },

    #[error("index field {field:?} has type {found:?}, expected {expected:?}")]
    FieldTypeMismatch {
        field: String,
        expected: String,
        found: String,
    },

    #[error("invalid frontmatter in {path:?}: {reason}")]
    InvalidFrontmatter { path: PathBuf, reason: String },

    #[error("{context} not found: {value}")]
    NotFound { context: String, value: String },

    #[error("{context} already exists: {value}")]
    AlreadyExists { context: String, value: String },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("database error: {0}")]
    Database(String),

    #[error("failed to {operation}: {reason}")]
    FailedOperation { operation: String, reason: String },

    #[error("{0}")]
    Other(String),

    #[error("Index run interrupted. Run `ballast index` to resume.")]
    Interrupted,
}

impl BallastError {
    /// Create a usage error with a free-form message
    pub fn usage(message: impl Into<String>) -> Self {
        BallastError::UsageError(message.into())
    }

    /// Create an error for an unrecognized processor id
    pub fn unknown_processor(id: &str, known: &[&str]) -> Self {
        BallastError::UnknownProcessor {
            id: id.to_string(),
            known: known.join(", "),
        }
    }

    /// Create an error for a key missing from a weight table's key source
    pub fn unknown_key(context: &str, key: impl std::fmt::Display) -> Self {
        BallastError::UnknownKey {
            context: context.to_string(),
            key: key.to_string(),
        }
    }

    /// Create an error for a weight value that is not an integer
    pub fn invalid_weight(key: &str, value: impl std::fmt::Display) -> Self {
        BallastError::InvalidWeight {
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for a malformed classification key
    pub fn invalid_key(context: &str, key: impl std::fmt::Display) -> Self {
        BallastError::InvalidKey {
            context: context.to_string(),
            key: key.to_string(),
        }
    }

    /// Create an error for an invalid config file
    pub fn invalid_config(reason: impl std::fmt::Display) -> Self {
        BallastError::InvalidConfig {
            reason: reason.to_string(),
        }
    }

    /// Create an error for an entity that was not found
    pub fn not_found(context: &str, value: impl std::fmt::Display) -> Self {
        BallastError::NotFound {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for an entity that already exists
    pub fn already_exists(context: &str, value: impl std::fmt::Display) -> Self {
        BallastError::AlreadyExists {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Create an error for a failed database operation
    pub fn db_operation(operation: &str, error: impl std::fmt::Display) -> Self {
        BallastError::FailedOperation {
            operation: operation.to_string(),
            reason: error.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            // Usage errors
            BallastError::UnknownFormat(_)
            | BallastError::DuplicateFormat
            | BallastError::UsageError(_)
            | BallastError::UnknownProcessor { .. }
            | BallastError::UnknownKey { .. }
            | BallastError::InvalidWeight { .. }
            | BallastError::InvalidKey { .. } => ExitCode::Usage,

            // Config/store errors
            BallastError::ConfigNotFound { .. }
            | BallastError::InvalidConfig { .. }
            | BallastError::MissingField { .. }
            | BallastError::FieldTypeMismatch { .. }
            | BallastError::InvalidFrontmatter { .. }
            | BallastError::NotFound { .. }
            | BallastError::AlreadyExists { .. } => ExitCode::Config,

            // Generic failures
            BallastError::Io(_)
            | BallastError::Yaml(_)
            | BallastError::Json(_)
            | BallastError::TomlSer(_)
            | BallastError::Database(_)
            | BallastError::FailedOperation { .. }
            | BallastError::Other(_)
            | BallastError::Interrupted => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    fn error_type(&self) -> &'static str {
        match self {
            BallastError::UnknownFormat(_) => "unknown_format",
            BallastError::DuplicateFormat => "duplicate_format",
            BallastError::UsageError(_) => "usage_error",
            BallastError::UnknownProcessor { .. } => "unknown_processor",
            BallastError::UnknownKey { .. } => "unknown_key",
            BallastError::InvalidWeight { .. } => "invalid_weight",
            BallastError::InvalidKey { .. } => "invalid_key",
            BallastError::ConfigNotFound { .. } => "config_not_found",
            BallastError::InvalidConfig { .. } => "invalid_config",
            BallastError::MissingField { .. } => "missing_field",
            BallastError::FieldTypeMismatch { .. } => "field_type_mismatch",
            BallastError::InvalidFrontmatter { .. } => "invalid_frontmatter",
            BallastError::NotFound { .. } => "not_found",
            BallastError::AlreadyExists { .. } => "already_exists",
            BallastError::Io(_) => "io_error",
            BallastError::Yaml(_) => "yaml_error",
            BallastError::Json(_) => "json_error",
            BallastError::TomlSer(_) => "toml_error",
            BallastError::Database(_) => "database_error",
            BallastError::FailedOperation { .. } => "failed_operation",
            BallastError::Other(_) => "other",
            BallastError::Interrupted => "interrupted",
        }
    }

    /// Convert error to JSON representation for structured error output
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for ballast operations
pub type Result<T> = std::result::Result<T, BallastError>;
