use crate::{
    entities::{Mutation, ProcedureFields, ProcedureId, ProcedurePatch, ProcedureRecord},
    errors::LedgerError,
};

/// Owning collection of procedure records. Every mutation stamps the audit
/// fields and writes the full snapshot before returning.
pub(crate) trait ProceduresRepository: Send + Sync {
    /// Full collection, in insertion order.
    fn list(&self) -> &[ProcedureRecord];

    fn get(&self, id: &ProcedureId) -> Option<&ProcedureRecord>;

    fn create(
        &mut self,
        fields: ProcedureFields,
        actor: &str,
    ) -> Result<Mutation<ProcedureRecord>, LedgerError>;

    fn update(
        &mut self,
        id: &ProcedureId,
        patch: ProcedurePatch,
        actor: &str,
    ) -> Result<Mutation<ProcedureRecord>, LedgerError>;

    /// Permanent removal. Returns the removed record.
    fn delete(&mut self, id: &ProcedureId) -> Result<Mutation<ProcedureRecord>, LedgerError>;
}
