use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;

/// Zero-padded `YYYY-MM-DD` date, so lexical and chronological order agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ISODateModel(pub NaiveDate);
impl FromStr for ISODateModel {
    type Err = LedgerError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || LedgerError::InvalidIsoDate {
            date: s.to_string(),
        };
        if s.len() != 10 {
            return Err(invalid());
        }
        let d = NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| invalid())?;
        Ok(ISODateModel(d))
    }
}
impl<'de> Deserialize<'de> for ISODateModel {
    fn deserialize<D>(deserializer: D) -> Result<ISODateModel, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ISODateModel::from_str(&s).map_err(serde::de::Error::custom)
    }
}
impl Serialize for ISODateModel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let text = self.0.format("%Y-%m-%d").to_string();
        serializer.serialize_str(&text)
    }
}

impl From<ISODateModel> for NaiveDate {
    fn from(m: ISODateModel) -> Self {
        m.0
    }
}
