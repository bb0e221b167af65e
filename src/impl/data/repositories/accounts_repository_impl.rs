use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    data::{
        datasources::snapshot_datasource::{JsonSnapshotDatasource, SnapshotDatasource},
        models::account_model::AccountModel,
        seed::seed_accounts,
    },
    domain::repositories::accounts_repository::AccountsRepository,
    entities::{AccountId, AccountRecord, KeyValueStore, Mutation, NewAccount, ACCOUNTS_KEY},
    errors::LedgerError,
};

pub(crate) struct AccountsRepositoryImpl<
    DS = JsonSnapshotDatasource<AccountModel>, // Default.
> where
    DS: SnapshotDatasource<AccountRecord>,
{
    datasource: DS,
    accounts: Vec<AccountRecord>,
}

impl<DS> AccountsRepository for AccountsRepositoryImpl<DS>
where
    DS: SnapshotDatasource<AccountRecord>,
{
    fn list(&self) -> &[AccountRecord] {
        &self.accounts
    }

    fn find_by_username(&self, username: &str) -> Option<&AccountRecord> {
        self.accounts.iter().find(|a| a.username == username)
    }

    fn create(&mut self, account: NewAccount) -> Result<Mutation<AccountRecord>, LedgerError> {
        account.validate()?;
        if self.find_by_username(&account.username).is_some() {
            return Err(LedgerError::DuplicateUsername {
                username: account.username,
            });
        }
        let id = self.fresh_id();
        let record = account.into_record(id);
        self.accounts.push(record.clone());
        info!(id = %record.id, username = %record.username, "account created");
        Ok(Mutation::new(record, self.persist()))
    }

    fn delete(
        &mut self,
        id: &AccountId,
        acting: &AccountId,
    ) -> Result<Mutation<AccountRecord>, LedgerError> {
        if id == acting {
            return Err(LedgerError::CannotDeleteSelf);
        }
        let idx = self
            .accounts
            .iter()
            .position(|a| &a.id == id)
            .ok_or_else(|| LedgerError::NotFound {
                entity: "Account",
                id: id.to_string(),
            })?;
        let removed = self.accounts.remove(idx);
        info!(%id, username = %removed.username, "account deleted");
        Ok(Mutation::new(removed, self.persist()))
    }
}

impl<DS> AccountsRepositoryImpl<DS>
where
    DS: SnapshotDatasource<AccountRecord>,
{
    pub(crate) fn with_datasource(
        datasource: DS,
        seed_defaults: bool,
    ) -> Result<Self, LedgerError> {
        let accounts = match datasource.load()? {
            Some(accounts) => accounts,
            None if seed_defaults => {
                info!("no account snapshot; seeding default accounts");
                seed_accounts()
            }
            None => Vec::new(),
        };
        Ok(Self {
            datasource,
            accounts,
        })
    }

    fn fresh_id(&self) -> AccountId {
        loop {
            let id = AccountId::generate();
            if self.accounts.iter().all(|a| a.id != id) {
                return id;
            }
        }
    }

    fn persist(&self) -> Option<LedgerError> {
        self.datasource.save(&self.accounts).err().inspect(|e| {
            warn!(error = %e, "account snapshot not persisted; keeping in-memory state");
        })
    }
}

impl AccountsRepositoryImpl {
    pub(crate) fn new(
        store: Arc<dyn KeyValueStore>,
        seed_defaults: bool,
    ) -> Result<Self, LedgerError> {
        let datasource = JsonSnapshotDatasource::new(store, ACCOUNTS_KEY);
        Self::with_datasource(datasource, seed_defaults)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{entities::Role, ext::storage::InMemoryKeyValueStore};

    fn new_account(username: &str) -> NewAccount {
        NewAccount {
            username: username.to_string(),
            password: "s3cret".to_string(),
            display_name: "Maria Souza".to_string(),
            role: Role::Standard,
        }
    }

    fn setup() -> (AccountsRepositoryImpl, Arc<InMemoryKeyValueStore>) {
        let store = Arc::new(InMemoryKeyValueStore::new());
        let repo = AccountsRepositoryImpl::new(store.clone(), true).unwrap();
        (repo, store)
    }

    #[test]
    fn duplicate_username_is_rejected() {
        let (mut repo, store) = setup();
        let err = repo.create(new_account("admin")).unwrap_err();
        assert!(matches!(err, LedgerError::DuplicateUsername { .. }));
        assert!(err.is_user_facing());
        assert_eq!(repo.list().len(), 2);
        assert_eq!(store.get(ACCOUNTS_KEY).unwrap(), None);
    }

    #[test]
    fn username_match_is_case_sensitive() {
        let (mut repo, _) = setup();
        let created = repo.create(new_account("Admin")).unwrap();
        assert!(created.is_persisted());
        assert_eq!(repo.list().len(), 3);
        assert_eq!(repo.find_by_username("Admin"), Some(&created.value));
    }

    #[test]
    fn cannot_delete_self() {
        let (mut repo, _) = setup();
        let me = AccountId::new("1");
        assert!(matches!(
            repo.delete(&me, &me),
            Err(LedgerError::CannotDeleteSelf)
        ));
        assert_eq!(repo.list().len(), 2);
    }

    #[test]
    fn delete_other_account_persists() {
        let (mut repo, store) = setup();
        let removed = repo
            .delete(&AccountId::new("2"), &AccountId::new("1"))
            .unwrap()
            .value;
        assert_eq!(removed.username, "user");
        assert!(repo.find_by_username("user").is_none());

        let reloaded = AccountsRepositoryImpl::new(store, true).unwrap();
        assert_eq!(reloaded.list().len(), 1);
        assert_eq!(reloaded.list()[0].secret(), "123");

        assert!(matches!(
            repo.delete(&AccountId::new("2"), &AccountId::new("1")),
            Err(LedgerError::NotFound { .. })
        ));
    }
}
