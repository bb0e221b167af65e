use std::ops::Add;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::entities::{FilterState, ProcedureRecord, Region, StateCode};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Totals {
    pub qty_performed: u64,
    pub qty_billed: u64,
    pub qty_paid: u64,
    pub value_performed: Decimal,
    pub value_billed: Decimal,
    pub value_paid: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionTotals {
    pub region: Region,
    pub value_performed: Decimal,
    pub value_billed: Decimal,
    pub value_paid: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyPaid {
    pub date: NaiveDate,
    pub value_paid: Decimal,
}

/// Calendar month, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyPaid {
    pub month: MonthKey,
    pub value_paid: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregates {
    pub totals: Totals,
    /// Ordered by first occurrence in the input.
    pub by_region: Vec<RegionTotals>,
    /// Ascending by date.
    pub daily: Vec<DailyPaid>,
    /// Ascending by month.
    pub monthly: Vec<MonthlyPaid>,
}

/// Choices offered by the filter inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub regions: Vec<Region>,
    pub states: Vec<StateCode>,
    pub hospitals: Vec<String>,
    pub procedures: Vec<String>,
    pub creators: Vec<String>,
}

/// Everything published to rendering collaborators after a refresh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardView {
    pub filter: FilterState,
    pub records: Vec<ProcedureRecord>,
    pub aggregates: Aggregates,
    pub options: FilterOptions,
}

// --

impl Totals {
    pub(crate) fn of(record: &ProcedureRecord) -> Self {
        Totals {
            qty_performed: record.qty_performed,
            qty_billed: record.qty_billed,
            qty_paid: record.qty_paid,
            value_performed: record.value_performed,
            value_billed: record.value_billed,
            value_paid: record.value_paid,
        }
    }
}

/// Saturates at the numeric bounds instead of overflowing.
impl Add for Totals {
    type Output = Totals;
    fn add(self, rhs: Totals) -> Totals {
        Totals {
            qty_performed: self.qty_performed.saturating_add(rhs.qty_performed),
            qty_billed: self.qty_billed.saturating_add(rhs.qty_billed),
            qty_paid: self.qty_paid.saturating_add(rhs.qty_paid),
            value_performed: self.value_performed.saturating_add(rhs.value_performed),
            value_billed: self.value_billed.saturating_add(rhs.value_billed),
            value_paid: self.value_paid.saturating_add(rhs.value_paid),
        }
    }
}

impl MonthKey {
    pub fn of(date: NaiveDate) -> Self {
        use chrono::Datelike as _;
        MonthKey {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl std::fmt::Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
