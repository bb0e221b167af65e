use chrono::NaiveDate;

use crate::{
    domain::logic::filter_predicate::FilterPredicate,
    entities::{ProcedureRecord, Region, StateCode},
    errors::LedgerError,
};

/// Current dashboard filter. `None` means the clause is unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search: Option<String>,
    pub region: Option<Region>,
    pub state: Option<StateCode>,
    pub hospital: Option<String>,
    pub procedure: Option<String>,
    pub creator: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Search,
    Region,
    State,
    Hospital,
    Procedure,
    Creator,
    Start,
    End,
}

// --

impl FilterField {
    pub fn name(&self) -> &'static str {
        match self {
            FilterField::Search => "search",
            FilterField::Region => "region",
            FilterField::State => "state",
            FilterField::Hospital => "hospital",
            FilterField::Procedure => "procedure",
            FilterField::Creator => "creator",
            FilterField::Start => "start",
            FilterField::End => "end",
        }
    }
}

fn non_empty(raw: &str) -> Option<String> {
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

fn parse_day(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

impl FilterState {
    /// Applies a raw input event to one clause. Empty input clears the clause.
    /// On invalid input the filter is left unchanged.
    pub fn set(&mut self, field: FilterField, raw: &str) -> Result<(), LedgerError> {
        let invalid = || LedgerError::InvalidFilter {
            field: field.name(),
            value: raw.to_string(),
        };
        match field {
            FilterField::Search => self.search = non_empty(raw),
            FilterField::Hospital => self.hospital = non_empty(raw),
            FilterField::Procedure => self.procedure = non_empty(raw),
            FilterField::Creator => self.creator = non_empty(raw),
            FilterField::Region => {
                self.region = non_empty(raw)
                    .map(|r| r.parse::<Region>().map_err(|_| invalid()))
                    .transpose()?
            }
            FilterField::State => {
                self.state = non_empty(raw)
                    .map(|s| s.parse::<StateCode>().map_err(|_| invalid()))
                    .transpose()?
            }
            FilterField::Start => {
                self.start = non_empty(raw)
                    .map(|d| parse_day(&d).ok_or_else(invalid))
                    .transpose()?
            }
            FilterField::End => {
                self.end = non_empty(raw)
                    .map(|d| parse_day(&d).ok_or_else(invalid))
                    .transpose()?
            }
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        *self = FilterState::default();
    }

    pub fn is_unconstrained(&self) -> bool {
        *self == FilterState::default()
    }

    pub fn matches(&self, record: &ProcedureRecord) -> bool {
        FilterPredicate::new(self).matches(record)
    }
}
