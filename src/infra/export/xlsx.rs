use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use rust_xlsxwriter::{ColNum, ExcelDateTime, Format, RowNum, Workbook, Worksheet};

use crate::infra::export::{ExportTable, ExportValue};

const AMOUNT_FORMAT: &str = "#,##0.00";
const DATE_FORMAT: &str = "dd/mm/yyyy";

/// Single-sheet workbook with the same header and column order as the CSV.
pub fn encode_xlsx(table: &ExportTable) -> Result<Vec<u8>> {
    let header_format = Format::new().set_bold();
    let amount_format = Format::new().set_num_format(AMOUNT_FORMAT);
    let date_format = Format::new().set_num_format(DATE_FORMAT);

    let mut workbook = Workbook::new();
    {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(table.sheet)
            .context("failed to name export sheet")?;

        for (col, header) in table.headers.iter().enumerate() {
            worksheet
                .write_string_with_format(0, col as ColNum, header.as_str(), &header_format)
                .context("failed to write xlsx header")?;
        }

        for (idx, row) in table.rows.iter().enumerate() {
            let row_num = (idx + 1) as RowNum;
            for (col, value) in row.iter().enumerate() {
                write_value(
                    worksheet,
                    row_num,
                    col as ColNum,
                    value,
                    &amount_format,
                    &date_format,
                )
                .with_context(|| format!("failed to write xlsx cell at row {}", row_num + 1))?;
            }
        }
        worksheet.autofit();
    }

    workbook
        .save_to_buffer()
        .context("failed to build xlsx workbook")
}

fn write_value(
    worksheet: &mut Worksheet,
    row: RowNum,
    col: ColNum,
    value: &ExportValue,
    amount_format: &Format,
    date_format: &Format,
) -> Result<()> {
    match value {
        ExportValue::Empty => {}
        ExportValue::Text(text) => {
            worksheet.write_string(row, col, text.as_str())?;
        }
        ExportValue::Integer(number) => {
            worksheet.write_number(row, col, *number as f64)?;
        }
        ExportValue::Amount(amount) => {
            worksheet.write_number_with_format(
                row,
                col,
                amount.paise() as f64 / 100.0,
                amount_format,
            )?;
        }
        ExportValue::Date(date) => match excel_date(*date) {
            Some(datetime) => {
                worksheet.write_datetime_with_format(row, col, &datetime, date_format)?;
            }
            // Excel has no dates before 1900.
            None => {
                worksheet.write_string(row, col, value.to_text())?;
            }
        },
    }
    Ok(())
}

fn excel_date(date: NaiveDate) -> Option<ExcelDateTime> {
    let year = u16::try_from(date.year()).ok()?;
    ExcelDateTime::from_ymd(year, date.month() as u8, date.day() as u8).ok()
}
