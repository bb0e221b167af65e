use std::str::FromStr;

use crate::{entities::AccountRecord, errors::LedgerError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde_derive::Deserialize)]
pub enum Theme {
    #[default]
    Classic,
    Dark,
}

/// The authenticated account for the running session. Created on login,
/// dropped on logout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    account: AccountRecord,
}

// --

impl Theme {
    pub fn code(&self) -> &'static str {
        match self {
            Theme::Classic => "classic",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Classic => Theme::Dark,
            Theme::Dark => Theme::Classic,
        }
    }
}

impl FromStr for Theme {
    type Err = LedgerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "classic" => Ok(Theme::Classic),
            "dark" => Ok(Theme::Dark),
            other => Err(LedgerError::InvalidSnapshot {
                key: "theme".to_string(),
                details: format!("unknown theme '{}'", other),
            }),
        }
    }
}

impl SessionContext {
    pub(crate) fn new(account: AccountRecord) -> Self {
        Self { account }
    }

    pub fn account(&self) -> &AccountRecord {
        &self.account
    }

    pub fn is_admin(&self) -> bool {
        self.account.is_admin()
    }

    /// Label stamped into `createdBy` / `lastModifiedBy`.
    pub fn actor_label(&self) -> &str {
        &self.account.display_name
    }

    /// Header label, e.g. "Administrador (Admin)".
    pub fn display_label(&self) -> String {
        format!(
            "{} ({})",
            self.account.display_name,
            self.account.role.label()
        )
    }
}
