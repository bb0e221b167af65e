use std::path::PathBuf;

use iso_currency::Currency;

use crate::entities::Theme;

#[derive(Debug, Clone)]
pub struct LedgerConfig {
    pub currency: Currency,
    /// Directory for the JSON-file store. `None` keeps everything in memory.
    pub storage_dir: Option<PathBuf>,
    pub default_theme: Theme,
    /// Seed the default records and accounts when nothing is persisted yet.
    pub seed_defaults: bool,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            currency: Currency::BRL,
            storage_dir: None,
            default_theme: Theme::Classic,
            seed_defaults: true,
        }
    }
}
