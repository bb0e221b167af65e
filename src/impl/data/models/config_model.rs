use std::path::PathBuf;

use iso_currency::Currency;

use crate::{
    entities::{LedgerConfig, Theme},
    errors::LedgerError,
};

/// On-disk (RON) form of `LedgerConfig`. Every field is optional.
#[derive(Debug, serde_derive::Deserialize)]
#[serde(default)]
pub(crate) struct LedgerConfigModel {
    currency: String,
    storage_dir: Option<String>,
    default_theme: Theme,
    seed_defaults: bool,
}

impl Default for LedgerConfigModel {
    fn default() -> Self {
        Self {
            currency: "BRL".to_string(),
            storage_dir: None,
            default_theme: Theme::Classic,
            seed_defaults: true,
        }
    }
}

impl TryFrom<LedgerConfigModel> for LedgerConfig {
    type Error = LedgerError;
    fn try_from(m: LedgerConfigModel) -> Result<Self, Self::Error> {
        let currency =
            Currency::from_code(&m.currency).ok_or_else(|| LedgerError::InvalidConfig {
                details: format!("unknown ISO currency code '{}'", m.currency),
            })?;
        Ok(LedgerConfig {
            currency,
            storage_dir: m.storage_dir.map(PathBuf::from),
            default_theme: m.default_theme,
            seed_defaults: m.seed_defaults,
        })
    }
}
