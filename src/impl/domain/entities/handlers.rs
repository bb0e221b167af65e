use chrono::{DateTime, Utc};

use crate::{entities::AccountRecord, errors::LedgerError};

// Collaborators.
// ---

/// Durable key-value persistence. Values are the serialized snapshot of a
/// whole collection; writes replace the previous value.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, LedgerError>;
    fn set(&self, key: &str, value: &str) -> Result<(), LedgerError>;
    fn remove(&self, key: &str) -> Result<(), LedgerError>;
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Decides whether a presented secret authenticates an account. Kept behind
/// a trait so the stored-secret scheme can change without touching the
/// stores.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, account: &AccountRecord, presented: &str) -> bool;
}

// Well-known keys.
// ---

pub const PROCEDURES_KEY: &str = "app_data";
pub const ACCOUNTS_KEY: &str = "app_users";
pub const THEME_KEY: &str = "theme";
pub const SESSION_USER_KEY: &str = "currentUser";
