use chrono::NaiveDate;

/// Money in integral paise (1/100 rupee).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(pub i64);

impl Amount {
    pub fn from_rupees(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let paise = (value * 100.0).round();
        if paise.abs() >= i64::MAX as f64 {
            return None;
        }
        Some(Amount(paise as i64))
    }

    pub fn paise(self) -> i64 {
        self.0
    }

    pub fn rupees_part(self) -> u64 {
        self.0.unsigned_abs() / 100
    }

    pub fn paise_part(self) -> u64 {
        self.0.unsigned_abs() % 100
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Plain `1234.50`, as written to exports.
    pub fn to_plain(self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{sign}{}.{:02}", self.rupees_part(), self.paise_part())
    }
}

impl std::ops::Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Amount {
        Amount(self.0.saturating_add(rhs.0))
    }
}

impl std::iter::Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::default(), |acc, value| acc + value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmdStatus {
    Pending,
    Refunded,
}

impl EmdStatus {
    pub fn label(self) -> &'static str {
        match self {
            EmdStatus::Pending => "Pending",
            EmdStatus::Refunded => "Refunded",
        }
    }
}

/// A column outside the typed roles, keyed by its position in the sheet so
/// repeated header names stay apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraField {
    pub column: usize,
    pub header: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmdRecord {
    pub row_number: usize,
    pub payee: String,
    pub amount: Amount,
    pub tender_no: Option<String>,
    pub work: Option<String>,
    pub pan: Option<String>,
    pub submitted_on: Option<NaiveDate>,
    pub refunded_on: Option<NaiveDate>,
    pub formatted_amount: String,
    pub amount_in_words: String,
    pub status: EmdStatus,
    pub days_held: Option<i64>,
    /// Sorted by column.
    pub extra: Vec<ExtraField>,
}

impl EmdRecord {
    pub fn extra_value(&self, column: usize) -> Option<&str> {
        self.extra
            .iter()
            .find(|field| field.column == column)
            .map(|field| field.value.as_str())
    }
}
