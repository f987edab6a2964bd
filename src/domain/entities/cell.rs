use chrono::NaiveDate;

/// A spreadsheet cell as read from the file, before any schema is applied.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

impl Cell {
    /// Trimmed text cell; blank input becomes `Empty`.
    pub fn text(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(trimmed.to_string())
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(v) => v.trim().is_empty(),
            Cell::Number(v) => !v.is_finite(),
            Cell::Date(_) => false,
        }
    }

    pub fn to_display(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(v) => v.clone(),
            Cell::Number(v) => format_number(*v),
            Cell::Date(v) => v.format("%d/%m/%Y").to_string(),
        }
    }
}

pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return String::new();
    }
    if value.fract().abs() < f64::EPSILON {
        format!("{}", value as i64)
    } else {
        let mut text = format!("{value:.6}");
        while text.ends_with('0') {
            text.pop();
        }
        if text.ends_with('.') {
            text.pop();
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_trims_and_collapses_blank_to_empty() {
        assert_eq!(Cell::text("  Acme  "), Cell::Text("Acme".to_string()));
        assert_eq!(Cell::text("   "), Cell::Empty);
        assert!(Cell::Empty.is_blank());
        assert!(!Cell::Number(0.0).is_blank());
    }

    #[test]
    fn display_drops_trailing_zeros() {
        assert_eq!(Cell::Number(1000.0).to_display(), "1000");
        assert_eq!(Cell::Number(12.5).to_display(), "12.5");
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).expect("valid date");
        assert_eq!(Cell::Date(date).to_display(), "09/03/2024");
    }
}
