use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::{
    data::datasources::snapshot_datasource::SnapshotModel,
    domain::entities::procedure::{check_amount, check_quantity},
    entities::{ProcedureId, ProcedureRecord, Region, StateCode},
    errors::LedgerError,
};

use super::iso_date_model::ISODateModel;

#[derive(Debug, serde_derive::Serialize, serde_derive::Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProcedureRecordModel {
    id: String,
    date: ISODateModel,
    region: String,
    state: String,
    hospital_unit: String,
    procedure_name: String,
    qty_performed: u64,
    qty_billed: u64,
    qty_paid: u64,
    value_performed: Decimal,
    value_billed: Decimal,
    value_paid: Decimal,
    #[serde(default)]
    created_by: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_modified_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_modified_at: Option<DateTime<Utc>>,
}

impl SnapshotModel for ProcedureRecordModel {
    type Entity = ProcedureRecord;

    fn id(&self) -> &str {
        &self.id
    }

    fn from_entity(r: &ProcedureRecord) -> Self {
        ProcedureRecordModel {
            id: r.id.to_string(),
            date: ISODateModel(r.date),
            region: r.region.label().to_string(),
            state: r.state.code().to_string(),
            hospital_unit: r.hospital_unit.clone(),
            procedure_name: r.procedure_name.clone(),
            qty_performed: r.qty_performed,
            qty_billed: r.qty_billed,
            qty_paid: r.qty_paid,
            value_performed: r.value_performed,
            value_billed: r.value_billed,
            value_paid: r.value_paid,
            created_by: r.created_by.clone(),
            last_modified_by: r.last_modified_by.clone(),
            last_modified_at: r.last_modified_at,
        }
    }

    fn into_entity(self) -> Result<ProcedureRecord, LedgerError> {
        let region: Region = self.region.parse()?;
        let state: StateCode = self.state.parse()?;
        check_quantity("qtyPerformed", self.qty_performed)?;
        check_quantity("qtyBilled", self.qty_billed)?;
        check_quantity("qtyPaid", self.qty_paid)?;
        check_amount("valuePerformed", &self.value_performed)?;
        check_amount("valueBilled", &self.value_billed)?;
        check_amount("valuePaid", &self.value_paid)?;
        Ok(ProcedureRecord {
            id: ProcedureId::new(self.id),
            date: self.date.into(),
            region,
            state,
            hospital_unit: self.hospital_unit,
            procedure_name: self.procedure_name,
            qty_performed: self.qty_performed,
            qty_billed: self.qty_billed,
            qty_paid: self.qty_paid,
            value_performed: self.value_performed.round_dp(2),
            value_billed: self.value_billed.round_dp(2),
            value_paid: self.value_paid.round_dp(2),
            created_by: self.created_by,
            last_modified_by: self.last_modified_by,
            last_modified_at: self.last_modified_at,
        })
    }
}
