use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::errors::LedgerError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProcedureId(pub(crate) String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    CentroOeste,
    Nordeste,
    Norte,
    Sudeste,
    Sul,
}

macro_rules! state_codes {
    ($($code:ident),+ $(,)?) => {
        /// Federative unit (state) codes.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum StateCode {
            $($code),+
        }

        impl StateCode {
            pub const ALL: [StateCode; 27] = [$(StateCode::$code),+];

            pub fn code(&self) -> &'static str {
                match self {
                    $(StateCode::$code => stringify!($code)),+
                }
            }
        }
    };
}

state_codes!(
    AC, AL, AP, AM, BA, CE, DF, ES, GO, MA, MT, MS, MG, PA, PB, PR, PE, PI, RJ, RN, RS, RO, RR,
    SC, SP, SE, TO,
);

/// A performed healthcare procedure, with quantities and values at the
/// performed, billed and paid stages.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcedureRecord {
    pub id: ProcedureId,
    pub date: NaiveDate,
    pub region: Region,
    pub state: StateCode,
    pub hospital_unit: String,
    pub procedure_name: String,
    pub qty_performed: u64,
    pub qty_billed: u64,
    pub qty_paid: u64,
    pub value_performed: Decimal,
    pub value_billed: Decimal,
    pub value_paid: Decimal,
    pub created_by: String,
    pub last_modified_by: Option<String>,
    pub last_modified_at: Option<DateTime<Utc>>,
}

/// Everything the user supplies when creating a record. Identity and audit
/// fields are assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcedureFields {
    pub date: NaiveDate,
    pub region: Region,
    pub state: StateCode,
    pub hospital_unit: String,
    pub procedure_name: String,
    pub qty_performed: u64,
    pub qty_billed: u64,
    pub qty_paid: u64,
    pub value_performed: Decimal,
    pub value_billed: Decimal,
    pub value_paid: Decimal,
}

/// Partial update. Only the `Some` fields are merged over the stored record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcedurePatch {
    pub date: Option<NaiveDate>,
    pub region: Option<Region>,
    pub state: Option<StateCode>,
    pub hospital_unit: Option<String>,
    pub procedure_name: Option<String>,
    pub qty_performed: Option<u64>,
    pub qty_billed: Option<u64>,
    pub qty_paid: Option<u64>,
    pub value_performed: Option<Decimal>,
    pub value_billed: Option<Decimal>,
    pub value_paid: Option<Decimal>,
}

// --

impl ProcedureId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub(crate) fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProcedureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Region {
    pub const ALL: [Region; 5] = [
        Region::CentroOeste,
        Region::Nordeste,
        Region::Norte,
        Region::Sudeste,
        Region::Sul,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Region::CentroOeste => "Centro-Oeste",
            Region::Nordeste => "Nordeste",
            Region::Norte => "Norte",
            Region::Sudeste => "Sudeste",
            Region::Sul => "Sul",
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Region {
    type Err = LedgerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .into_iter()
            .find(|r| r.label() == s)
            .ok_or_else(|| LedgerError::invalid_record(format!("unknown region '{}'", s)))
    }
}

impl std::fmt::Display for StateCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for StateCode {
    type Err = LedgerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StateCode::ALL
            .into_iter()
            .find(|c| c.code() == s)
            .ok_or_else(|| LedgerError::invalid_record(format!("unknown state '{}'", s)))
    }
}

/// Largest quantity accepted at any stage.
pub const MAX_QUANTITY: u64 = 1_000_000_000;

/// Largest monetary value accepted at any stage, in whole units.
pub const MAX_VALUE_UNITS: i64 = 1_000_000_000_000;

fn check_label(field: &str, value: &str) -> Result<(), LedgerError> {
    if value.trim().is_empty() {
        return Err(LedgerError::invalid_record(format!(
            "{} must not be empty",
            field
        )));
    }
    Ok(())
}

pub(crate) fn check_quantity(field: &str, value: u64) -> Result<(), LedgerError> {
    if value > MAX_QUANTITY {
        return Err(LedgerError::invalid_record(format!(
            "{} must not exceed {} ({})",
            field, MAX_QUANTITY, value
        )));
    }
    Ok(())
}

pub(crate) fn check_amount(field: &str, value: &Decimal) -> Result<(), LedgerError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(LedgerError::invalid_record(format!(
            "{} must not be negative ({})",
            field, value
        )));
    }
    if *value > Decimal::from(MAX_VALUE_UNITS) {
        return Err(LedgerError::invalid_record(format!(
            "{} must not exceed {} ({})",
            field, MAX_VALUE_UNITS, value
        )));
    }
    Ok(())
}

impl ProcedureFields {
    pub(crate) fn validate(&self) -> Result<(), LedgerError> {
        check_label("hospitalUnit", &self.hospital_unit)?;
        check_label("procedureName", &self.procedure_name)?;
        check_quantity("qtyPerformed", self.qty_performed)?;
        check_quantity("qtyBilled", self.qty_billed)?;
        check_quantity("qtyPaid", self.qty_paid)?;
        check_amount("valuePerformed", &self.value_performed)?;
        check_amount("valueBilled", &self.value_billed)?;
        check_amount("valuePaid", &self.value_paid)?;
        Ok(())
    }

    pub(crate) fn into_record(
        self,
        id: ProcedureId,
        actor: &str,
        at: DateTime<Utc>,
    ) -> ProcedureRecord {
        ProcedureRecord {
            id,
            date: self.date,
            region: self.region,
            state: self.state,
            hospital_unit: self.hospital_unit,
            procedure_name: self.procedure_name,
            qty_performed: self.qty_performed,
            qty_billed: self.qty_billed,
            qty_paid: self.qty_paid,
            value_performed: self.value_performed.round_dp(2),
            value_billed: self.value_billed.round_dp(2),
            value_paid: self.value_paid.round_dp(2),
            created_by: actor.to_string(),
            last_modified_by: Some(actor.to_string()),
            last_modified_at: Some(at),
        }
    }
}

impl ProcedurePatch {
    pub fn is_empty(&self) -> bool {
        *self == ProcedurePatch::default()
    }

    pub(crate) fn validate(&self) -> Result<(), LedgerError> {
        if let Some(h) = &self.hospital_unit {
            check_label("hospitalUnit", h)?;
        }
        if let Some(p) = &self.procedure_name {
            check_label("procedureName", p)?;
        }
        for (field, value) in [
            ("qtyPerformed", self.qty_performed),
            ("qtyBilled", self.qty_billed),
            ("qtyPaid", self.qty_paid),
        ] {
            if let Some(v) = value {
                check_quantity(field, v)?;
            }
        }
        for (field, value) in [
            ("valuePerformed", &self.value_performed),
            ("valueBilled", &self.value_billed),
            ("valuePaid", &self.value_paid),
        ] {
            if let Some(v) = value {
                check_amount(field, v)?;
            }
        }
        Ok(())
    }

    /// Merges the patch over `record`. Audit fields are left to the caller.
    pub(crate) fn apply_to(self, record: &mut ProcedureRecord) {
        if let Some(date) = self.date {
            record.date = date;
        }
        if let Some(region) = self.region {
            record.region = region;
        }
        if let Some(state) = self.state {
            record.state = state;
        }
        if let Some(hospital_unit) = self.hospital_unit {
            record.hospital_unit = hospital_unit;
        }
        if let Some(procedure_name) = self.procedure_name {
            record.procedure_name = procedure_name;
        }
        if let Some(q) = self.qty_performed {
            record.qty_performed = q;
        }
        if let Some(q) = self.qty_billed {
            record.qty_billed = q;
        }
        if let Some(q) = self.qty_paid {
            record.qty_paid = q;
        }
        if let Some(v) = self.value_performed {
            record.value_performed = v.round_dp(2);
        }
        if let Some(v) = self.value_billed {
            record.value_billed = v.round_dp(2);
        }
        if let Some(v) = self.value_paid {
            record.value_paid = v.round_dp(2);
        }
    }
}

impl From<&ProcedureRecord> for ProcedureFields {
    fn from(r: &ProcedureRecord) -> Self {
        ProcedureFields {
            date: r.date,
            region: r.region,
            state: r.state,
            hospital_unit: r.hospital_unit.clone(),
            procedure_name: r.procedure_name.clone(),
            qty_performed: r.qty_performed,
            qty_billed: r.qty_billed,
            qty_paid: r.qty_paid,
            value_performed: r.value_performed,
            value_billed: r.value_billed,
            value_paid: r.value_paid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_labels_round_trip() {
        for region in Region::ALL {
            assert_eq!(region.label().parse::<Region>().unwrap(), region);
        }
        assert!("Leste".parse::<Region>().is_err());
    }

    #[test]
    fn state_table_has_27_codes() {
        assert_eq!(StateCode::ALL.len(), 27);
        assert_eq!("SP".parse::<StateCode>().unwrap(), StateCode::SP);
        assert_eq!(StateCode::TO.to_string(), "TO");
        assert!("sp".parse::<StateCode>().is_err());
    }

    #[test]
    fn patch_rejects_blank_labels_and_negative_values() {
        let blank = ProcedurePatch {
            hospital_unit: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            blank.validate(),
            Err(LedgerError::InvalidRecord { .. })
        ));

        let negative = ProcedurePatch {
            value_paid: Some(Decimal::new(-1, 2)),
            ..Default::default()
        };
        assert!(negative.validate().is_err());
        assert!(ProcedurePatch::default().validate().is_ok());
    }

    fn fields() -> ProcedureFields {
        ProcedureFields {
            date: NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(),
            region: Region::Norte,
            state: StateCode::PA,
            hospital_unit: "Hospital Ophir Loyola".to_string(),
            procedure_name: "Quimioterapia".to_string(),
            qty_performed: MAX_QUANTITY,
            qty_billed: 0,
            qty_paid: 0,
            value_performed: Decimal::from(MAX_VALUE_UNITS),
            value_billed: Decimal::ZERO,
            value_paid: Decimal::ZERO,
        }
    }

    #[test]
    fn bounds_are_inclusive() {
        assert!(fields().validate().is_ok());

        let too_many = ProcedureFields {
            qty_performed: u64::MAX,
            ..fields()
        };
        assert!(matches!(
            too_many.validate(),
            Err(LedgerError::InvalidRecord { .. })
        ));

        let too_much = ProcedureFields {
            value_performed: Decimal::MAX,
            ..fields()
        };
        assert!(matches!(
            too_much.validate(),
            Err(LedgerError::InvalidRecord { .. })
        ));
    }

    #[test]
    fn patch_rejects_values_above_bounds() {
        let qty = ProcedurePatch {
            qty_paid: Some(MAX_QUANTITY + 1),
            ..Default::default()
        };
        assert!(qty.validate().is_err());

        let value = ProcedurePatch {
            value_billed: Some(Decimal::MAX),
            ..Default::default()
        };
        assert!(value.validate().is_err());
    }

    #[test]
    fn empty_patch_is_empty() {
        assert!(ProcedurePatch::default().is_empty());
        assert!(!ProcedurePatch {
            qty_paid: Some(1),
            ..Default::default()
        }
        .is_empty());
    }
}
