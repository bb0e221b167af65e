use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::entities::{
    AccountId, AccountRecord, ProcedureId, ProcedureRecord, Region, Role, StateCode,
};

const SEED_ACTOR: &str = "Sistema";

pub(crate) fn seed_accounts() -> Vec<AccountRecord> {
    vec![
        AccountRecord::new(
            AccountId::new("1"),
            "admin".to_string(),
            "123".to_string(),
            "Administrador".to_string(),
            Role::Admin,
        ),
        AccountRecord::new(
            AccountId::new("2"),
            "user".to_string(),
            "123".to_string(),
            "Usuário Padrão".to_string(),
            Role::Standard,
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn seed_record(
    id: &str,
    date: (i32, u32, u32),
    region: Region,
    state: StateCode,
    hospital_unit: &str,
    procedure_name: &str,
    qty: [u64; 3],
    value: [i64; 3],
) -> ProcedureRecord {
    let (y, m, d) = date;
    ProcedureRecord {
        id: ProcedureId::new(id),
        date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
        region,
        state,
        hospital_unit: hospital_unit.to_string(),
        procedure_name: procedure_name.to_string(),
        qty_performed: qty[0],
        qty_billed: qty[1],
        qty_paid: qty[2],
        value_performed: Decimal::new(value[0], 0),
        value_billed: Decimal::new(value[1], 0),
        value_paid: Decimal::new(value[2], 0),
        created_by: SEED_ACTOR.to_string(),
        last_modified_by: Some(SEED_ACTOR.to_string()),
        last_modified_at: None,
    }
}

pub(crate) fn seed_procedures() -> Vec<ProcedureRecord> {
    vec![
        seed_record(
            "1",
            (2024, 7, 20),
            Region::Sudeste,
            StateCode::SP,
            "Hospital Sírio-Libanês",
            "Consulta Cardiológica",
            [150, 145, 140],
            [22500, 21750, 21000],
        ),
        seed_record(
            "2",
            (2024, 7, 21),
            Region::Sul,
            StateCode::RS,
            "Hospital Moinhos de Vento",
            "Exame de Sangue",
            [300, 300, 280],
            [15000, 15000, 14000],
        ),
        seed_record(
            "3",
            (2024, 7, 22),
            Region::Nordeste,
            StateCode::BA,
            "Hospital Aliança",
            "Fisioterapia Motora",
            [80, 75, 75],
            [8000, 7500, 7500],
        ),
        seed_record(
            "4",
            (2024, 7, 23),
            Region::CentroOeste,
            StateCode::GO,
            "Hospital Órion",
            "Raio-X de Tórax",
            [120, 118, 110],
            [18000, 17700, 16500],
        ),
    ]
}
