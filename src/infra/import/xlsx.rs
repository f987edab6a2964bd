use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use chrono::NaiveDate;

use crate::domain::entities::cell::Cell;
use crate::domain::entities::table::RawTable;
use crate::domain::rules::date::parse_date_text;
use crate::error::ProcessError;

const ISO_DATE_FORMATS: [&str; 1] = ["%Y-%m-%d"];

pub fn cell_from_data(cell: &Data) -> Cell {
    match cell {
        Data::Int(v) => Cell::Number(*v as f64),
        Data::Float(v) => Cell::Number(*v),
        Data::String(v) => Cell::text(v),
        Data::Bool(v) => Cell::Text(v.to_string()),
        Data::DateTime(v) => match v.as_datetime() {
            Some(datetime) if v.is_datetime() => Cell::Date(datetime.date()),
            _ => Cell::Number(v.as_f64()),
        },
        Data::DateTimeIso(v) => iso_date(v).map(Cell::Date).unwrap_or_else(|| Cell::text(v)),
        Data::DurationIso(v) => Cell::text(v),
        Data::Error(v) => Cell::Text(v.to_string()),
        Data::Empty => Cell::Empty,
    }
}

fn iso_date(value: &str) -> Option<NaiveDate> {
    let formats = ISO_DATE_FORMATS.map(str::to_string);
    parse_date_text(value.trim(), &formats).or_else(|| {
        value
            .get(..10)
            .and_then(|prefix| parse_date_text(prefix, &formats))
    })
}

/// Reads the first sheet of an xlsx/xlsm/xlsb/xls/ods workbook.
pub fn read_workbook_table(bytes: &[u8]) -> Result<RawTable, ProcessError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|err| ProcessError::unreadable(format!("failed to open workbook: {err}")))?;

    let sheet_name = workbook.sheet_names().first().cloned().unwrap_or_default();
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ProcessError::unreadable("workbook has no sheets"))?
        .map_err(|err| {
            ProcessError::unreadable(format!("failed to read sheet {sheet_name}: {err}"))
        })?;

    let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);
    let rows = range
        .rows()
        .enumerate()
        .map(|(idx, row)| (first_row + idx + 1, row.iter().map(cell_from_data).collect()))
        .collect::<Vec<_>>();

    RawTable::from_rows(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::{CellErrorType, ExcelDateTime, ExcelDateTimeType};

    #[test]
    fn cell_from_data_keeps_types() {
        assert_eq!(cell_from_data(&Data::Int(7)), Cell::Number(7.0));
        assert_eq!(cell_from_data(&Data::Float(2.5)), Cell::Number(2.5));
        assert_eq!(
            cell_from_data(&Data::String("  Acme ".to_string())),
            Cell::Text("Acme".to_string())
        );
        assert_eq!(cell_from_data(&Data::String("   ".to_string())), Cell::Empty);
        assert_eq!(cell_from_data(&Data::Bool(true)), Cell::Text("true".to_string()));
        assert_eq!(
            cell_from_data(&Data::Error(CellErrorType::Div0)),
            Cell::Text("#DIV/0!".to_string())
        );
        assert_eq!(cell_from_data(&Data::Empty), Cell::Empty);
    }

    #[test]
    fn excel_dates_become_date_cells() {
        let value = ExcelDateTime::new(45_387.0, ExcelDateTimeType::DateTime, false);
        assert_eq!(
            cell_from_data(&Data::DateTime(value)),
            Cell::Date(NaiveDate::from_ymd_opt(2024, 4, 5).expect("valid date"))
        );

        let duration = ExcelDateTime::new(1.5, ExcelDateTimeType::TimeDelta, false);
        assert_eq!(cell_from_data(&Data::DateTime(duration)), Cell::Number(1.5));
    }

    #[test]
    fn iso_datetimes_keep_the_date() {
        assert_eq!(
            cell_from_data(&Data::DateTimeIso("2024-04-05T10:30:00".to_string())),
            Cell::Date(NaiveDate::from_ymd_opt(2024, 4, 5).expect("valid date"))
        );
        assert_eq!(
            cell_from_data(&Data::DateTimeIso("10:30:00".to_string())),
            Cell::Text("10:30:00".to_string())
        );
    }

    #[test]
    fn garbage_bytes_are_not_a_workbook() {
        let err = read_workbook_table(b"PK\x03\x04 definitely not a zip archive")
            .expect_err("should fail");
        assert!(matches!(err, ProcessError::UnreadableFile { .. }));
    }
}
