use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    data::{
        datasources::snapshot_datasource::{JsonSnapshotDatasource, SnapshotDatasource},
        models::procedure_record_model::ProcedureRecordModel,
        seed::seed_procedures,
    },
    domain::repositories::procedures_repository::ProceduresRepository,
    entities::{
        Clock, KeyValueStore, Mutation, ProcedureFields, ProcedureId, ProcedurePatch,
        ProcedureRecord, PROCEDURES_KEY,
    },
    errors::LedgerError,
};

pub(crate) struct ProceduresRepositoryImpl<
    DS = JsonSnapshotDatasource<ProcedureRecordModel>, // Default.
> where
    DS: SnapshotDatasource<ProcedureRecord>,
{
    datasource: DS,
    clock: Arc<dyn Clock>,
    records: Vec<ProcedureRecord>,
}

impl<DS> ProceduresRepository for ProceduresRepositoryImpl<DS>
where
    DS: SnapshotDatasource<ProcedureRecord>,
{
    fn list(&self) -> &[ProcedureRecord] {
        &self.records
    }

    fn get(&self, id: &ProcedureId) -> Option<&ProcedureRecord> {
        self.records.iter().find(|r| &r.id == id)
    }

    fn create(
        &mut self,
        fields: ProcedureFields,
        actor: &str,
    ) -> Result<Mutation<ProcedureRecord>, LedgerError> {
        fields.validate()?;
        let record = fields.into_record(self.fresh_id(), actor, self.clock.now());
        self.records.push(record.clone());
        info!(id = %record.id, actor, "procedure created");
        Ok(Mutation::new(record, self.persist()))
    }

    fn update(
        &mut self,
        id: &ProcedureId,
        patch: ProcedurePatch,
        actor: &str,
    ) -> Result<Mutation<ProcedureRecord>, LedgerError> {
        patch.validate()?;
        let now = self.clock.now();
        let record = self
            .records
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| not_found(id))?;
        patch.apply_to(record);
        record.last_modified_by = Some(actor.to_string());
        record.last_modified_at = Some(now);
        let updated = record.clone();
        info!(%id, actor, "procedure updated");
        Ok(Mutation::new(updated, self.persist()))
    }

    fn delete(&mut self, id: &ProcedureId) -> Result<Mutation<ProcedureRecord>, LedgerError> {
        let idx = self
            .records
            .iter()
            .position(|r| &r.id == id)
            .ok_or_else(|| not_found(id))?;
        let removed = self.records.remove(idx);
        info!(%id, "procedure deleted");
        Ok(Mutation::new(removed, self.persist()))
    }
}

fn not_found(id: &ProcedureId) -> LedgerError {
    LedgerError::NotFound {
        entity: "Procedure",
        id: id.to_string(),
    }
}

impl<DS> ProceduresRepositoryImpl<DS>
where
    DS: SnapshotDatasource<ProcedureRecord>,
{
    pub(crate) fn with_datasource(
        datasource: DS,
        clock: Arc<dyn Clock>,
        seed_defaults: bool,
    ) -> Result<Self, LedgerError> {
        let records = match datasource.load()? {
            Some(records) => {
                info!(count = records.len(), "procedure snapshot loaded");
                records
            }
            None if seed_defaults => {
                info!("no procedure snapshot; seeding default procedures");
                seed_procedures()
            }
            None => Vec::new(),
        };
        Ok(Self {
            datasource,
            clock,
            records,
        })
    }

    fn fresh_id(&self) -> ProcedureId {
        loop {
            let id = ProcedureId::generate();
            if self.records.iter().all(|r| r.id != id) {
                return id;
            }
        }
    }

    fn persist(&self) -> Option<LedgerError> {
        self.datasource.save(&self.records).err().inspect(|e| {
            warn!(error = %e, "procedure snapshot not persisted; keeping in-memory state");
        })
    }
}

impl ProceduresRepositoryImpl {
    pub(crate) fn new(
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        seed_defaults: bool,
    ) -> Result<Self, LedgerError> {
        Self::with_datasource(
            JsonSnapshotDatasource::new(store, PROCEDURES_KEY),
            clock,
            seed_defaults,
        )
    }
}
