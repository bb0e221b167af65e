use crate::{
    data::datasources::snapshot_datasource::SnapshotModel,
    entities::{AccountId, AccountRecord, Role},
    errors::LedgerError,
};

#[derive(serde_derive::Serialize, serde_derive::Deserialize)]
pub(crate) struct AccountModel {
    id: String,
    username: String,
    password: String,
    name: String,
    role: String,
}

impl SnapshotModel for AccountModel {
    type Entity = AccountRecord;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_entity(a: &AccountRecord) -> Self {
        AccountModel {
            id: a.id.to_string(),
            username: a.username.clone(),
            password: a.secret().to_string(),
            name: a.display_name.clone(),
            role: a.role.code().to_string(),
        }
    }

    fn into_entity(self) -> Result<AccountRecord, LedgerError> {
        let role: Role = self.role.parse()?;
        Ok(AccountRecord::new(
            AccountId::new(self.id),
            self.username,
            self.password,
            self.name,
            role,
        ))
    }
}
