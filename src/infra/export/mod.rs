pub mod csv;
pub mod xlsx;

use chrono::NaiveDate;

use crate::domain::entities::record::Amount;
use crate::domain::rules::date::format_date;

/// One exported cell. CSV writes the text form; workbooks keep the type.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportValue {
    Empty,
    Text(String),
    Integer(i64),
    Amount(Amount),
    Date(NaiveDate),
}

impl ExportValue {
    pub fn to_text(&self) -> String {
        match self {
            ExportValue::Empty => String::new(),
            ExportValue::Text(value) => value.clone(),
            ExportValue::Integer(value) => value.to_string(),
            ExportValue::Amount(value) => value.to_plain(),
            ExportValue::Date(value) => format_date(*value),
        }
    }
}

impl From<String> for ExportValue {
    fn from(value: String) -> Self {
        if value.is_empty() {
            ExportValue::Empty
        } else {
            ExportValue::Text(value)
        }
    }
}

impl From<&str> for ExportValue {
    fn from(value: &str) -> Self {
        value.to_string().into()
    }
}

/// A sheet worth of export rows under one header line.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportTable {
    pub sheet: &'static str,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<ExportValue>>,
}
