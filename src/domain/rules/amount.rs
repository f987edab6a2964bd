use crate::domain::entities::cell::Cell;
use crate::domain::entities::record::Amount;

const ONES: [&str; 20] = [
    "Zero",
    "One",
    "Two",
    "Three",
    "Four",
    "Five",
    "Six",
    "Seven",
    "Eight",
    "Nine",
    "Ten",
    "Eleven",
    "Twelve",
    "Thirteen",
    "Fourteen",
    "Fifteen",
    "Sixteen",
    "Seventeen",
    "Eighteen",
    "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

const CRORE: u64 = 10_000_000;
const LAKH: u64 = 100_000;
const THOUSAND: u64 = 1_000;

/// Reads an amount from a numeric cell or from text such as `₹ 1,20,000.50`,
/// `Rs. 500` or `1000/-`.
pub fn parse_amount(cell: &Cell) -> Option<Amount> {
    match cell {
        Cell::Number(value) => Amount::from_rupees(*value),
        Cell::Text(text) => parse_amount_text(text),
        Cell::Empty | Cell::Date(_) => None,
    }
}

fn parse_amount_text(text: &str) -> Option<Amount> {
    let stripped = text.trim().replace(['₹', ',', ' '], "");
    let cleaned = stripped.strip_suffix("/-").unwrap_or(stripped.as_str());

    let lower = cleaned.to_ascii_lowercase();
    let digits = ["rs.", "rs", "inr"]
        .iter()
        .find_map(|prefix| lower.strip_prefix(*prefix))
        .unwrap_or(lower.as_str());

    if digits.is_empty() || digits.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    digits
        .parse::<f64>()
        .ok()
        .and_then(Amount::from_rupees)
}

/// `₹1,234.50`: comma-grouped thousands, two decimals.
pub fn format_rupees(amount: Amount) -> String {
    let sign = if amount.paise() < 0 { "-" } else { "" };
    format!(
        "{sign}₹{}.{:02}",
        group_thousands(amount.rupees_part()),
        amount.paise_part()
    )
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Indian-system words for a rupee amount, e.g.
/// `One Lakh Twenty Thousand Rupees Only`.
pub fn amount_in_words(amount: Amount) -> String {
    let rupees = number_to_words(amount.rupees_part());
    let paise = amount.paise_part();
    if paise > 0 {
        format!(
            "{rupees} Rupees and {} Paise Only",
            number_to_words(paise)
        )
    } else {
        format!("{rupees} Rupees Only")
    }
}

pub fn number_to_words(value: u64) -> String {
    if value == 0 {
        return ONES[0].to_string();
    }
    let mut parts = Vec::new();
    push_words(value, &mut parts);
    parts.join(" ")
}

fn push_words(value: u64, parts: &mut Vec<String>) {
    let mut rest = value;
    for (unit, label) in [(CRORE, "Crore"), (LAKH, "Lakh"), (THOUSAND, "Thousand")] {
        if rest >= unit {
            push_words(rest / unit, parts);
            parts.push(label.to_string());
            rest %= unit;
        }
    }
    if rest >= 100 {
        parts.push(ONES[(rest / 100) as usize].to_string());
        parts.push("Hundred".to_string());
        rest %= 100;
    }
    if rest >= 20 {
        parts.push(TENS[(rest / 10) as usize].to_string());
        rest %= 10;
    }
    if rest > 0 {
        parts.push(ONES[rest as usize].to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_decorated_text() {
        assert_eq!(parse_amount(&Cell::text("1000")), Some(Amount(100_000)));
        assert_eq!(parse_amount(&Cell::text("₹ 1,20,000.50")), Some(Amount(12_000_050)));
        assert_eq!(parse_amount(&Cell::text("Rs. 500")), Some(Amount(50_000)));
        assert_eq!(parse_amount(&Cell::text("INR 75")), Some(Amount(7_500)));
        assert_eq!(parse_amount(&Cell::text("2500/-")), Some(Amount(250_000)));
        assert_eq!(parse_amount(&Cell::text("-10")), Some(Amount(-1_000)));
    }

    #[test]
    fn rejects_non_numeric_text() {
        assert_eq!(parse_amount(&Cell::text("ten thousand")), None);
        assert_eq!(parse_amount(&Cell::text("Rs.")), None);
        assert_eq!(parse_amount(&Cell::text("1e3")), None);
        assert_eq!(parse_amount(&Cell::Empty), None);
    }

    #[test]
    fn numeric_cells_are_rounded_to_paise() {
        assert_eq!(parse_amount(&Cell::Number(99.999)), Some(Amount(10_000)));
    }

    #[test]
    fn format_rupees_groups_thousands() {
        assert_eq!(format_rupees(Amount(100_000)), "₹1,000.00");
        assert_eq!(format_rupees(Amount(12_345_678_950)), "₹123,456,789.50");
        assert_eq!(format_rupees(Amount(5)), "₹0.05");
    }

    #[test]
    fn words_follow_indian_numbering() {
        assert_eq!(number_to_words(0), "Zero");
        assert_eq!(number_to_words(15), "Fifteen");
        assert_eq!(number_to_words(105), "One Hundred Five");
        assert_eq!(number_to_words(120_000), "One Lakh Twenty Thousand");
        assert_eq!(
            number_to_words(12_345_678),
            "One Crore Twenty Three Lakh Forty Five Thousand Six Hundred Seventy Eight"
        );
        assert_eq!(number_to_words(1_500_000_000), "One Hundred Fifty Crore");
    }

    #[test]
    fn amount_in_words_mentions_paise() {
        assert_eq!(amount_in_words(Amount(100_000)), "One Thousand Rupees Only");
        assert_eq!(
            amount_in_words(Amount(50_050)),
            "Five Hundred Rupees and Fifty Paise Only"
        );
    }
}
