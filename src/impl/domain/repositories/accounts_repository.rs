use crate::{
    entities::{AccountId, AccountRecord, Mutation, NewAccount},
    errors::LedgerError,
};

/// The user directory. Accounts are created and deleted, never updated.
pub(crate) trait AccountsRepository: Send + Sync {
    fn list(&self) -> &[AccountRecord];

    fn find_by_username(&self, username: &str) -> Option<&AccountRecord>;

    fn create(&mut self, account: NewAccount) -> Result<Mutation<AccountRecord>, LedgerError>;

    fn delete(
        &mut self,
        id: &AccountId,
        acting: &AccountId,
    ) -> Result<Mutation<AccountRecord>, LedgerError>;
}
