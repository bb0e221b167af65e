use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    entities::{
        AccountId, AccountRecord, CredentialVerifier, KeyValueStore, SessionContext,
        SESSION_USER_KEY,
    },
    errors::LedgerError,
};

pub(crate) trait AuthUsecase: Send + Sync {
    fn login(
        &self,
        accounts: &[AccountRecord],
        username: &str,
        password: &str,
    ) -> Result<SessionContext, LedgerError>;

    /// Restores the session recorded by an earlier login, if its account
    /// still exists.
    fn resume(&self, accounts: &[AccountRecord]) -> Result<Option<SessionContext>, LedgerError>;

    fn logout(&self) -> Result<(), LedgerError>;
}

/// Only the account id is kept in the session store; the account itself is
/// looked up in the directory on resume.
pub(crate) struct AuthUsecaseImpl<V: CredentialVerifier> {
    verifier: V,
    session_store: Arc<dyn KeyValueStore>,
}

impl<V: CredentialVerifier> AuthUsecase for AuthUsecaseImpl<V> {
    fn login(
        &self,
        accounts: &[AccountRecord],
        username: &str,
        password: &str,
    ) -> Result<SessionContext, LedgerError> {
        let Some(account) = accounts
            .iter()
            .find(|a| a.username == username && self.verifier.verify(a, password))
        else {
            warn!(username, "login rejected");
            return Err(LedgerError::InvalidCredentials);
        };
        if let Err(e) = self.session_store.set(SESSION_USER_KEY, account.id.as_str()) {
            warn!(error = %e, "session not recorded; it will not survive a reload");
        }
        info!(username, "login");
        Ok(SessionContext::new(account.clone()))
    }

    fn resume(&self, accounts: &[AccountRecord]) -> Result<Option<SessionContext>, LedgerError> {
        let Some(raw) = self.session_store.get(SESSION_USER_KEY)? else {
            return Ok(None);
        };
        let id = AccountId::new(raw);
        match accounts.iter().find(|a| a.id == id) {
            Some(account) => Ok(Some(SessionContext::new(account.clone()))),
            None => {
                warn!(%id, "session refers to a removed account; clearing it");
                self.session_store.remove(SESSION_USER_KEY)?;
                Ok(None)
            }
        }
    }

    fn logout(&self) -> Result<(), LedgerError> {
        self.session_store.remove(SESSION_USER_KEY)
    }
}

impl<V: CredentialVerifier> AuthUsecaseImpl<V> {
    pub(crate) fn new(verifier: V, session_store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            verifier,
            session_store,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        data::seed::seed_accounts,
        ext::{credential_verifiers::PlaintextCredentialVerifier, storage::InMemoryKeyValueStore},
    };

    fn auth() -> (AuthUsecaseImpl<PlaintextCredentialVerifier>, Arc<InMemoryKeyValueStore>) {
        let session = Arc::new(InMemoryKeyValueStore::new());
        (
            AuthUsecaseImpl::new(PlaintextCredentialVerifier, session.clone()),
            session,
        )
    }

    #[test]
    fn login_checks_username_and_password() {
        let (auth, session) = auth();
        let accounts = seed_accounts();

        assert!(matches!(
            auth.login(&accounts, "admin", "wrong"),
            Err(LedgerError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.login(&accounts, "nobody", "123"),
            Err(LedgerError::InvalidCredentials)
        ));
        assert_eq!(session.get(SESSION_USER_KEY).unwrap(), None);

        let ctx = auth.login(&accounts, "admin", "123").unwrap();
        assert!(ctx.is_admin());
        assert_eq!(ctx.display_label(), "Administrador (Admin)");
        assert_eq!(session.get(SESSION_USER_KEY).unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn resume_and_logout() {
        let (auth, _) = auth();
        let accounts = seed_accounts();
        assert_eq!(auth.resume(&accounts).unwrap(), None);

        auth.login(&accounts, "user", "123").unwrap();
        let resumed = auth.resume(&accounts).unwrap().unwrap();
        assert_eq!(resumed.display_label(), "Usuário Padrão (Usuário)");

        auth.logout().unwrap();
        assert_eq!(auth.resume(&accounts).unwrap(), None);
    }

    #[test]
    fn resume_drops_sessions_of_removed_accounts() {
        let (auth, session) = auth();
        let accounts = seed_accounts();
        auth.login(&accounts, "user", "123").unwrap();

        assert_eq!(auth.resume(&accounts[..1]).unwrap(), None);
        assert_eq!(session.get(SESSION_USER_KEY).unwrap(), None);
    }
}
