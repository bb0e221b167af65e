use std::{path::Path, sync::Arc};

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::{
    data::{
        datasources::config_ron_datasource::{ConfigRonDatasource as _, ConfigRonDatasourceImpl},
        repositories::{
            accounts_repository_impl::AccountsRepositoryImpl,
            procedures_repository_impl::ProceduresRepositoryImpl,
        },
    },
    domain::{
        repositories::{
            accounts_repository::AccountsRepository as _,
            procedures_repository::ProceduresRepository as _,
        },
        usecases::{
            auth_usecase::{AuthUsecase as _, AuthUsecaseImpl},
            dashboard_usecase::{DashboardUsecase as _, DashboardUsecaseImpl},
        },
    },
    entities::{
        AccountId, AccountRecord, Clock, CredentialVerifier, DashboardView, FilterField,
        FilterState, KeyValueStore, LedgerConfig, Mutation, NewAccount, ProcedureFields,
        ProcedureId, ProcedurePatch, ProcedureRecord, SessionContext, Theme, THEME_KEY,
    },
    errors::LedgerError,
    ext::{
        clocks::SystemClock,
        credential_verifiers::PlaintextCredentialVerifier,
        storage::{FileKeyValueStore, InMemoryKeyValueStore},
    },
    presentation::{
        csv_exporter::CsvExporter, currency_codec::CurrencyCodec, report_printer::ReportPrinter,
    },
};

/// A validated, not yet committed, procedure deletion. Pass it to
/// [`ProcedureLedgerUtil::confirm_delete`] to commit; drop it to cancel.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct PendingDeletion {
    record: ProcedureRecord,
}

impl PendingDeletion {
    pub fn record(&self) -> &ProcedureRecord {
        &self.record
    }
}

/// Entry point of the ledger. Owns the record store, the user directory, the
/// dashboard state and the active session, and keeps the published
/// [`DashboardView`] in step with every procedure or filter change.
pub struct ProcedureLedgerUtil<
    V = PlaintextCredentialVerifier, // Default.
> where
    V: CredentialVerifier,
{
    codec: CurrencyCodec,
    procedures: ProceduresRepositoryImpl,
    accounts: AccountsRepositoryImpl,
    dashboard: DashboardUsecaseImpl,
    auth: AuthUsecaseImpl<V>,
    preferences: Arc<dyn KeyValueStore>,
    theme: Theme,
    session: Option<SessionContext>,
    view: DashboardView,
}

impl ProcedureLedgerUtil {
    /// Wires the standard collaborators: a JSON-file store when
    /// `storage_dir` is set (in-memory otherwise), an in-memory session store
    /// and the system clock.
    pub fn from_config(config: LedgerConfig) -> Result<Self, LedgerError> {
        let persistence: Arc<dyn KeyValueStore> = match &config.storage_dir {
            Some(dir) => Arc::new(FileKeyValueStore::new(dir)?),
            None => Arc::new(InMemoryKeyValueStore::new()),
        };
        Self::with_collaborators(
            config,
            persistence,
            Arc::new(InMemoryKeyValueStore::new()),
            Arc::new(SystemClock),
            PlaintextCredentialVerifier,
        )
    }

    pub fn from_config_str(ron: &str) -> Result<Self, LedgerError> {
        Self::from_config(ConfigRonDatasourceImpl::new().from_string(ron)?)
    }

    pub fn from_config_file<P>(path: P) -> Result<Self, LedgerError>
    where
        P: AsRef<Path>,
    {
        Self::from_config(ConfigRonDatasourceImpl::new().from_file(path)?)
    }
}

impl<V> ProcedureLedgerUtil<V>
where
    V: CredentialVerifier,
{
    pub fn with_collaborators(
        config: LedgerConfig,
        persistence: Arc<dyn KeyValueStore>,
        session_store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        verifier: V,
    ) -> Result<Self, LedgerError> {
        let procedures =
            ProceduresRepositoryImpl::new(persistence.clone(), clock, config.seed_defaults)?;
        let accounts = AccountsRepositoryImpl::new(persistence.clone(), config.seed_defaults)?;
        let theme = match persistence.get(THEME_KEY)? {
            Some(raw) => raw.trim().parse::<Theme>().unwrap_or_else(|e| {
                warn!(error = %e, "ignoring stored theme preference");
                config.default_theme
            }),
            None => config.default_theme,
        };
        Ok(Self {
            codec: CurrencyCodec::new(config.currency),
            procedures,
            accounts,
            dashboard: DashboardUsecaseImpl::new(),
            auth: AuthUsecaseImpl::new(verifier, session_store),
            preferences: persistence,
            theme,
            session: None,
            view: DashboardView::default(),
        })
    }

    // Session.
    // ---

    pub fn login(&mut self, username: &str, password: &str) -> Result<SessionContext, LedgerError> {
        let session = self.auth.login(self.accounts.list(), username, password)?;
        self.start_session(session.clone());
        Ok(session)
    }

    /// Restores the session left by an earlier login on the same session
    /// store. `None` when there is none, or its account was removed.
    pub fn resume(&mut self) -> Result<Option<SessionContext>, LedgerError> {
        let session = self.auth.resume(self.accounts.list())?;
        if let Some(session) = &session {
            self.start_session(session.clone());
        }
        Ok(session)
    }

    pub fn logout(&mut self) -> Result<(), LedgerError> {
        self.auth.logout()?;
        if let Some(session) = self.session.take() {
            info!(username = %session.account().username, "logout");
        }
        self.dashboard.clear_filter();
        self.view = DashboardView::default();
        Ok(())
    }

    pub fn current_session(&self) -> Option<&SessionContext> {
        self.session.as_ref()
    }

    fn start_session(&mut self, session: SessionContext) {
        self.session = Some(session);
        self.dashboard.clear_filter();
        self.refresh();
    }

    fn require_session(&self) -> Result<&SessionContext, LedgerError> {
        self.session.as_ref().ok_or(LedgerError::NotAuthenticated)
    }

    fn require_admin(&self, action: &'static str) -> Result<&SessionContext, LedgerError> {
        let session = self.require_session()?;
        if !session.is_admin() {
            warn!(username = %session.account().username, action, "permission denied");
            return Err(LedgerError::PermissionDenied { action });
        }
        Ok(session)
    }

    // Dashboard.
    // ---

    /// The filtered records and their aggregates, as of the last change.
    pub fn view(&self) -> Result<&DashboardView, LedgerError> {
        self.require_session()?;
        Ok(&self.view)
    }

    pub fn filter(&self) -> &FilterState {
        self.dashboard.filter()
    }

    /// Sets one filter clause from raw input; empty input clears it. Invalid
    /// input leaves the filter and the view unchanged.
    pub fn set_filter(
        &mut self,
        field: FilterField,
        raw: &str,
    ) -> Result<&DashboardView, LedgerError> {
        self.require_session()?;
        self.dashboard.set_filter(field, raw)?;
        self.refresh();
        Ok(&self.view)
    }

    pub fn clear_filters(&mut self) -> Result<&DashboardView, LedgerError> {
        self.require_session()?;
        self.dashboard.clear_filter();
        self.refresh();
        Ok(&self.view)
    }

    fn refresh(&mut self) {
        self.view = self.dashboard.refresh(self.procedures.list());
    }

    // Procedures.
    // ---

    pub fn procedures(&self) -> Result<&[ProcedureRecord], LedgerError> {
        self.require_session()?;
        Ok(self.procedures.list())
    }

    pub fn create_procedure(
        &mut self,
        fields: ProcedureFields,
    ) -> Result<Mutation<ProcedureRecord>, LedgerError> {
        let actor = self.require_session()?.actor_label().to_string();
        let created = self.procedures.create(fields, &actor)?;
        self.refresh();
        Ok(created)
    }

    pub fn update_procedure(
        &mut self,
        id: &ProcedureId,
        patch: ProcedurePatch,
    ) -> Result<Mutation<ProcedureRecord>, LedgerError> {
        let actor = self.require_session()?.actor_label().to_string();
        let updated = self.procedures.update(id, patch, &actor)?;
        self.refresh();
        Ok(updated)
    }

    /// First step of a deletion: checks permission and that the record
    /// exists, without changing anything.
    pub fn prepare_delete_procedure(
        &self,
        id: &ProcedureId,
    ) -> Result<PendingDeletion, LedgerError> {
        self.require_admin("delete procedure")?;
        let record = self
            .procedures
            .get(id)
            .cloned()
            .ok_or_else(|| LedgerError::NotFound {
                entity: "Procedure",
                id: id.to_string(),
            })?;
        Ok(PendingDeletion { record })
    }

    pub fn confirm_delete(
        &mut self,
        pending: PendingDeletion,
    ) -> Result<Mutation<ProcedureRecord>, LedgerError> {
        self.require_admin("delete procedure")?;
        let removed = self.procedures.delete(&pending.record.id)?;
        self.refresh();
        Ok(removed)
    }

    // Accounts.
    // ---

    pub fn list_accounts(&self) -> Result<&[AccountRecord], LedgerError> {
        self.require_admin("list accounts")?;
        Ok(self.accounts.list())
    }

    pub fn create_account(
        &mut self,
        account: NewAccount,
    ) -> Result<Mutation<AccountRecord>, LedgerError> {
        self.require_admin("create account")?;
        self.accounts.create(account)
    }

    pub fn delete_account(
        &mut self,
        id: &AccountId,
    ) -> Result<Mutation<AccountRecord>, LedgerError> {
        let acting = self.require_admin("delete account")?.account().id.clone();
        self.accounts.delete(id, &acting)
    }

    // Preferences.
    // ---

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn toggle_theme(&mut self) -> Mutation<Theme> {
        self.theme = self.theme.toggled();
        let persist_error = self
            .preferences
            .set(THEME_KEY, self.theme.code())
            .err()
            .inspect(|e| warn!(error = %e, "theme preference not persisted"));
        Mutation::new(self.theme, persist_error)
    }

    // Presentation.
    // ---

    pub fn codec(&self) -> &CurrencyCodec {
        &self.codec
    }

    /// CSV of the currently visible records.
    pub fn export_csv(&self) -> Result<String, LedgerError> {
        let view = self.view()?;
        CsvExporter::new(&self.codec).export(&view.records)
    }

    /// Plain-text report of the currently visible records.
    pub fn export_report(&self, generated_on: NaiveDate) -> Result<String, LedgerError> {
        let view = self.view()?;
        let printer = ReportPrinter::new(&self.codec);
        Ok(printer.print(&view.records, generated_on))
    }
}
