use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    // Store-related.
    #[error("{entity} '{id}' not found; refresh and retry.")]
    NotFound { entity: &'static str, id: String },
    #[error("Username '{username}' already exists.")]
    DuplicateUsername { username: String },
    #[error("An account cannot delete itself.")]
    CannotDeleteSelf,
    #[error("Invalid record: {details}.")]
    InvalidRecord { details: String },
    #[error("Invalid value '{value}' for filter '{field}'.")]
    InvalidFilter { field: &'static str, value: String },
    #[error("Invalid ISO date: {date}.")]
    InvalidIsoDate { date: String },

    // Persistence-related.
    #[error("Could not persist '{key}': {details}.")]
    PersistenceFailure { key: String, details: String },
    #[error("Persisted snapshot '{key}' is invalid: {details}.")]
    InvalidSnapshot { key: String, details: String },

    // Session-related.
    #[error("Invalid username or password.")]
    InvalidCredentials,
    #[error("No authenticated session.")]
    NotAuthenticated,
    #[error("Permission denied: {action} requires the admin role.")]
    PermissionDenied { action: &'static str },

    // Configuration-related.
    #[error("Invalid configuration: {details}.")]
    InvalidConfig { details: String },

    // Export-related.
    #[error("Export failed: {details}.")]
    ExportFailure { details: String },
}

impl LedgerError {
    pub(crate) fn persistence(key: &str, e: &impl std::fmt::Display) -> Self {
        LedgerError::PersistenceFailure {
            key: key.to_string(),
            details: e.to_string(),
        }
    }

    pub(crate) fn invalid_record(details: impl Into<String>) -> Self {
        LedgerError::InvalidRecord {
            details: details.into(),
        }
    }

    /// Validation-shaped errors are surfaced to the user as-is and never
    /// retried.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            LedgerError::DuplicateUsername { .. }
                | LedgerError::CannotDeleteSelf
                | LedgerError::InvalidCredentials
                | LedgerError::InvalidRecord { .. }
                | LedgerError::InvalidFilter { .. }
                | LedgerError::PermissionDenied { .. }
        )
    }

    /// Stale references (record removed elsewhere) can be recovered from by
    /// refreshing the view.
    pub fn is_stale_reference(&self) -> bool {
        matches!(self, LedgerError::NotFound { .. })
    }
}
