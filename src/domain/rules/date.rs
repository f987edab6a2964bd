use chrono::{Days, NaiveDate, NaiveDateTime};

use crate::domain::entities::cell::Cell;

/// Serial 2958465 is 9999-12-31 in the 1900 date system.
const MAX_EXCEL_SERIAL: f64 = 2_958_465.0;

/// How dates are shown and exported.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%d/%m/%Y %H:%M:%S"];

pub fn parse_date(cell: &Cell, formats: &[String]) -> Option<NaiveDate> {
    match cell {
        Cell::Date(date) => Some(*date),
        Cell::Number(serial) => from_excel_serial(*serial),
        Cell::Text(text) => parse_date_text(text.trim(), formats),
        Cell::Empty => None,
    }
}

pub fn parse_date_text(text: &str, formats: &[String]) -> Option<NaiveDate> {
    formats
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
                .map(|datetime| datetime.date())
        })
}

/// Serial 60 is 1900-02-29, a day Excel counts but the calendar lacks.
const PHANTOM_LEAP_DAY: u64 = 60;

/// Whole-day part of an Excel 1900-system serial. Serial 60 has no real
/// date and gives `None`.
pub fn from_excel_serial(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || !(1.0..=MAX_EXCEL_SERIAL).contains(&serial) {
        return None;
    }
    let days = serial.trunc() as u64;
    let epoch = match days.cmp(&PHANTOM_LEAP_DAY) {
        std::cmp::Ordering::Less => NaiveDate::from_ymd_opt(1899, 12, 31)?,
        std::cmp::Ordering::Equal => return None,
        std::cmp::Ordering::Greater => NaiveDate::from_ymd_opt(1899, 12, 30)?,
    };
    epoch.checked_add_days(Days::new(days))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::schema::default_date_formats;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn text_dates_try_formats_in_order() {
        let formats = default_date_formats();
        assert_eq!(parse_date(&Cell::text("05/04/2024"), &formats), Some(ymd(2024, 4, 5)));
        assert_eq!(parse_date(&Cell::text("05-04-2024"), &formats), Some(ymd(2024, 4, 5)));
        assert_eq!(parse_date(&Cell::text("2024-04-05"), &formats), Some(ymd(2024, 4, 5)));
        assert_eq!(
            parse_date(&Cell::text("2024-04-05 00:00:00"), &formats),
            Some(ymd(2024, 4, 5))
        );
    }

    #[test]
    fn unparseable_text_is_none() {
        let formats = default_date_formats();
        assert_eq!(parse_date(&Cell::text("31/02/2024"), &formats), None);
        assert_eq!(parse_date(&Cell::text("soon"), &formats), None);
    }

    #[test]
    fn numbers_are_excel_serials() {
        assert_eq!(from_excel_serial(45_387.0), Some(ymd(2024, 4, 5)));
        assert_eq!(from_excel_serial(45_387.75), Some(ymd(2024, 4, 5)));
        assert_eq!(from_excel_serial(0.0), None);
        assert_eq!(from_excel_serial(-3.0), None);
    }

    #[test]
    fn early_1900_serials_match_excel() {
        assert_eq!(from_excel_serial(1.0), Some(ymd(1900, 1, 1)));
        assert_eq!(from_excel_serial(59.0), Some(ymd(1900, 2, 28)));
        assert_eq!(from_excel_serial(60.0), None);
        assert_eq!(from_excel_serial(61.0), Some(ymd(1900, 3, 1)));
    }
}
