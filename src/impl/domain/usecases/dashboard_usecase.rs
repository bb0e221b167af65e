use std::collections::BTreeSet;

use tracing::debug;

use crate::{
    domain::logic::{aggregation_engine::AggregationEngine, filter_predicate::FilterPredicate},
    entities::{
        DashboardView, FilterField, FilterOptions, FilterState, ProcedureRecord, Region,
        StateCode,
    },
    errors::LedgerError,
};

/// Owns the filter state and turns a store snapshot into the published view.
pub(crate) trait DashboardUsecase: Send + Sync {
    fn filter(&self) -> &FilterState;

    fn set_filter(&mut self, field: FilterField, raw: &str) -> Result<(), LedgerError>;

    fn clear_filter(&mut self);

    /// Filter, then aggregate, from scratch.
    fn refresh(&self, records: &[ProcedureRecord]) -> DashboardView;
}

pub(crate) struct DashboardUsecaseImpl {
    filter: FilterState,
}

impl DashboardUsecase for DashboardUsecaseImpl {
    fn filter(&self) -> &FilterState {
        &self.filter
    }

    fn set_filter(&mut self, field: FilterField, raw: &str) -> Result<(), LedgerError> {
        self.filter.set(field, raw)
    }

    fn clear_filter(&mut self) {
        self.filter.clear();
    }

    fn refresh(&self, records: &[ProcedureRecord]) -> DashboardView {
        let visible = FilterPredicate::new(&self.filter).apply(records);
        let aggregates = AggregationEngine::new(&visible).process();
        debug!(
            total = records.len(),
            visible = visible.len(),
            "dashboard refreshed"
        );
        DashboardView {
            filter: self.filter.clone(),
            records: visible,
            aggregates,
            options: filter_options(records),
        }
    }
}

impl DashboardUsecaseImpl {
    pub(crate) fn new() -> Self {
        Self {
            filter: FilterState::default(),
        }
    }
}

/// Options come from the whole store, not the filtered subset, so narrowing
/// one clause never hides the choices of another.
fn filter_options(records: &[ProcedureRecord]) -> FilterOptions {
    let distinct = |f: fn(&ProcedureRecord) -> &str| -> Vec<String> {
        records
            .iter()
            .map(f)
            .filter(|s| !s.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    };
    FilterOptions {
        regions: Region::ALL.to_vec(),
        states: StateCode::ALL.to_vec(),
        hospitals: distinct(|r| &r.hospital_unit),
        procedures: distinct(|r| &r.procedure_name),
        creators: distinct(|r| &r.created_by),
    }
}
