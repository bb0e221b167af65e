use std::str::FromStr;

use crate::errors::LedgerError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountId(pub(crate) String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Standard,
}

/// A login identity in the user directory.
#[derive(Clone, PartialEq, Eq)]
pub struct AccountRecord {
    pub id: AccountId,
    pub username: String,
    password: String,
    pub display_name: String,
    pub role: Role,
}

#[derive(Clone)]
pub struct NewAccount {
    pub username: String,
    pub password: String,
    pub display_name: String,
    pub role: Role,
}

// --

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub(crate) fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Role {
    pub fn code(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Standard => "user",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Standard => "Usuário",
        }
    }
}

impl FromStr for Role {
    type Err = LedgerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "user" | "standard" => Ok(Role::Standard),
            other => Err(LedgerError::invalid_record(format!(
                "unknown role '{}'",
                other
            ))),
        }
    }
}

impl AccountRecord {
    pub(crate) fn new(
        id: AccountId,
        username: String,
        password: String,
        display_name: String,
        role: Role,
    ) -> Self {
        Self {
            id,
            username,
            password,
            display_name,
            role,
        }
    }

    /// The stored secret, as handed to a `CredentialVerifier`.
    pub fn secret(&self) -> &str {
        &self.password
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl std::fmt::Debug for AccountRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountRecord")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("display_name", &self.display_name)
            .field("role", &self.role)
            .finish()
    }
}

impl std::fmt::Debug for NewAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewAccount")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("display_name", &self.display_name)
            .field("role", &self.role)
            .finish()
    }
}

impl NewAccount {
    pub(crate) fn validate(&self) -> Result<(), LedgerError> {
        if self.username.is_empty() {
            return Err(LedgerError::invalid_record("username must not be empty"));
        }
        if self.display_name.trim().is_empty() {
            return Err(LedgerError::invalid_record("name must not be empty"));
        }
        Ok(())
    }

    pub(crate) fn into_record(self, id: AccountId) -> AccountRecord {
        AccountRecord::new(
            id,
            self.username,
            self.password,
            self.display_name,
            self.role,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_password() {
        let account = AccountRecord::new(
            AccountId::new("1"),
            "admin".to_string(),
            "123".to_string(),
            "Administrador".to_string(),
            Role::Admin,
        );
        let dbg = format!("{:?}", account);
        assert!(dbg.contains("<redacted>"));
        assert!(!dbg.contains("\"123\""));
    }

    #[test]
    fn role_accepts_standard_alias() {
        assert_eq!("user".parse::<Role>().unwrap(), Role::Standard);
        assert_eq!("standard".parse::<Role>().unwrap(), Role::Standard);
        assert!("root".parse::<Role>().is_err());
    }
}
