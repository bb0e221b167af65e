use chrono::NaiveDate;

use crate::entities::MonthKey;

/// `DD/MM/YYYY`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// `DD/MM`, used for daily series labels.
pub fn format_date_short(date: NaiveDate) -> String {
    date.format("%d/%m").to_string()
}

/// `MM/YYYY`, used for monthly series labels.
pub fn format_month(month: MonthKey) -> String {
    format!("{:02}/{:04}", month.month, month.year)
}
