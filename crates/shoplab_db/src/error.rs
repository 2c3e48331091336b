//! Error types for the store layer.

use std::fmt;

use serde::Serialize;
use sqlx::error::ErrorKind;
use thiserror::Error;

/// Store operation result type.
pub type Result<T> = std::result::Result<T, DbError>;

/// Which store-enforced constraint rejected a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrityViolation {
    /// Duplicate value in a UNIQUE column (customer email).
    Uniqueness,
    /// Order referencing a customer that does not exist.
    Referential,
    /// Value outside a CHECK domain or a NULL in a required column.
    Domain,
}

impl IntegrityViolation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uniqueness => "uniqueness",
            Self::Referential => "referential",
            Self::Domain => "domain",
        }
    }

    fn from_kind(kind: ErrorKind) -> Option<Self> {
        match kind {
            ErrorKind::UniqueViolation => Some(Self::Uniqueness),
            ErrorKind::ForeignKeyViolation => Some(Self::Referential),
            ErrorKind::CheckViolation | ErrorKind::NotNullViolation => Some(Self::Domain),
            _ => None,
        }
    }
}

impl fmt::Display for IntegrityViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Store errors.
#[derive(Error, Debug)]
pub enum DbError {
    /// A constraint enforced by the engine rejected the write.
    #[error("Integrity violation ({violation}): {message}")]
    Integrity {
        violation: IntegrityViolation,
        message: String,
    },

    /// SQLx error (connection, query, etc.)
    #[error("Database error: {0}")]
    Sqlx(sqlx::Error),

    /// IO error (file system operations)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Query rejected before reaching the engine
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Invalid state
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl DbError {
    /// Create an invalid state error.
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    /// Create an invalid query error.
    pub fn invalid_query(msg: impl Into<String>) -> Self {
        Self::InvalidQuery(msg.into())
    }

    /// The violated constraint, if this error came from one.
    pub fn integrity_violation(&self) -> Option<IntegrityViolation> {
        match self {
            Self::Integrity { violation, .. } => Some(*violation),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if let Some(violation) = IntegrityViolation::from_kind(db_err.kind()) {
                return Self::Integrity {
                    violation,
                    message: db_err.message().to_string(),
                };
            }
        }
        Self::Sqlx(err)
    }
}
