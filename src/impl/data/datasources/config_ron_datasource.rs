use std::fs;

use ron::from_str;

use crate::{
    data::models::config_model::LedgerConfigModel, entities::LedgerConfig, errors::LedgerError,
};

pub(crate) trait ConfigRonDatasource {
    fn from_string(&self, s: &str) -> Result<LedgerConfig, LedgerError>;

    fn from_file<P>(&self, path: P) -> Result<LedgerConfig, LedgerError>
    where
        P: AsRef<std::path::Path>;
}

pub(crate) struct ConfigRonDatasourceImpl;

impl ConfigRonDatasourceImpl {
    pub(crate) fn new() -> Self {
        Self
    }
}

impl ConfigRonDatasource for ConfigRonDatasourceImpl {
    fn from_string(&self, s: &str) -> Result<LedgerConfig, LedgerError> {
        let model: LedgerConfigModel = from_str(s).map_err(|e| LedgerError::InvalidConfig {
            details: format!("invalid RON ({})", e),
        })?;
        model.try_into()
    }

    fn from_file<P>(&self, path: P) -> Result<LedgerConfig, LedgerError>
    where
        P: AsRef<std::path::Path>,
    {
        let raw = fs::read_to_string(&path).map_err(|e| LedgerError::InvalidConfig {
            details: format!("cannot read '{}' ({})", path.as_ref().display(), e),
        })?;
        self.from_string(&raw)
    }
}
