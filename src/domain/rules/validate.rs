use chrono::NaiveDate;

use crate::domain::entities::cell::Cell;
use crate::domain::entities::record::{Amount, EmdRecord, EmdStatus, ExtraField};
use crate::domain::entities::schema::{ColumnKind, ColumnLayout, ColumnRole, ColumnSpec, Schema};
use crate::domain::entities::table::SpreadsheetRow;
use crate::domain::rules::amount::{amount_in_words, format_rupees, parse_amount};
use crate::domain::rules::date::{format_date, parse_date};
use crate::error::RowIssue;

#[derive(Debug, Clone, PartialEq)]
enum Value {
    Text(String),
    Amount(Amount),
    Date(NaiveDate),
}

impl Value {
    fn to_display(&self) -> String {
        match self {
            Value::Text(v) => v.clone(),
            Value::Amount(v) => v.to_plain(),
            Value::Date(v) => format_date(*v),
        }
    }
}

#[derive(Default)]
struct Fields {
    payee: Option<String>,
    amount: Option<Amount>,
    tender_no: Option<String>,
    work: Option<String>,
    pan: Option<String>,
    submitted_on: Option<(String, NaiveDate)>,
    refunded_on: Option<(String, NaiveDate)>,
}

/// Turns one row into an `EmdRecord`, or every reason it can't be one.
/// Pure: the result depends on the schema, layout, headers and row only.
pub fn build_record(
    schema: &Schema,
    layout: &ColumnLayout,
    headers: &[String],
    row: &SpreadsheetRow,
) -> Result<EmdRecord, Vec<RowIssue>> {
    let mut issues = Vec::new();
    let mut fields = Fields::default();
    let mut extra = Vec::new();

    for (spec, &position) in schema.columns().iter().zip(&layout.positions) {
        let cell = row.cell_at(position);
        if cell.is_blank() {
            if spec.required {
                issues.push(RowIssue::missing(&spec.header));
            }
            continue;
        }

        let value = match resolve(spec, cell, schema.date_formats()) {
            Ok(value) => value,
            Err(issue) => {
                issues.push(issue);
                continue;
            }
        };

        match (spec.role, value) {
            (ColumnRole::Payee, Value::Text(v)) => fields.payee = Some(v),
            (ColumnRole::Amount, Value::Amount(v)) => {
                if v.is_positive() {
                    fields.amount = Some(v);
                } else {
                    issues.push(RowIssue::NonPositiveAmount {
                        column: spec.header.clone(),
                    });
                }
            }
            (ColumnRole::TenderNo, Value::Text(v)) => fields.tender_no = Some(v),
            (ColumnRole::Work, Value::Text(v)) => fields.work = Some(v),
            (ColumnRole::Pan, Value::Text(v)) => {
                let pan = v.to_ascii_uppercase();
                if is_valid_pan(&pan) {
                    fields.pan = Some(pan);
                } else {
                    issues.push(RowIssue::InvalidPan {
                        column: spec.header.clone(),
                        raw: v,
                    });
                }
            }
            (ColumnRole::SubmittedOn, Value::Date(v)) => {
                fields.submitted_on = Some((spec.header.clone(), v))
            }
            (ColumnRole::RefundedOn, Value::Date(v)) => {
                fields.refunded_on = Some((spec.header.clone(), v))
            }
            (_, value) => {
                let column = position.unwrap_or_default();
                extra.push(ExtraField {
                    column,
                    header: headers
                        .get(column)
                        .cloned()
                        .unwrap_or_else(|| spec.header.clone()),
                    value: value.to_display(),
                });
            }
        }
    }

    if let (Some((submitted_header, submitted)), Some((refunded_header, refunded))) =
        (&fields.submitted_on, &fields.refunded_on)
    {
        if refunded < submitted {
            issues.push(RowIssue::RefundBeforeSubmission {
                refunded: refunded_header.clone(),
                submitted: submitted_header.clone(),
            });
        }
    }

    if !issues.is_empty() {
        return Err(issues);
    }

    let (Some(payee), Some(amount)) = (fields.payee, fields.amount) else {
        // Unreachable with a validated schema.
        return Err(vec![RowIssue::missing(
            schema.header_for(ColumnRole::Payee).unwrap_or("payee"),
        )]);
    };

    extra.extend(layout.unclaimed.iter().map(|&column| ExtraField {
        column,
        header: headers.get(column).cloned().unwrap_or_default(),
        value: row.cell(column).to_display(),
    }));
    extra.sort_by_key(|field| field.column);

    let submitted_on = fields.submitted_on.map(|(_, date)| date);
    let refunded_on = fields.refunded_on.map(|(_, date)| date);
    let status = if refunded_on.is_some() {
        EmdStatus::Refunded
    } else {
        EmdStatus::Pending
    };
    let days_held = submitted_on
        .zip(refunded_on)
        .map(|(submitted, refunded)| (refunded - submitted).num_days());

    Ok(EmdRecord {
        row_number: row.row_number,
        payee,
        amount,
        tender_no: fields.tender_no,
        work: fields.work,
        pan: fields.pan,
        submitted_on,
        refunded_on,
        formatted_amount: format_rupees(amount),
        amount_in_words: amount_in_words(amount),
        status,
        days_held,
        extra,
    })
}

fn resolve(spec: &ColumnSpec, cell: &Cell, date_formats: &[String]) -> Result<Value, RowIssue> {
    match spec.kind() {
        ColumnKind::Text => Ok(Value::Text(cell.to_display())),
        ColumnKind::Amount => {
            parse_amount(cell)
                .map(Value::Amount)
                .ok_or_else(|| RowIssue::UnparseableAmount {
                    column: spec.header.clone(),
                    raw: cell.to_display(),
                })
        }
        ColumnKind::Date => {
            parse_date(cell, date_formats)
                .map(Value::Date)
                .ok_or_else(|| RowIssue::UnparseableDate {
                    column: spec.header.clone(),
                    raw: cell.to_display(),
                })
        }
    }
}

/// `AAAAA9999A`: five letters, four digits, one letter.
pub fn is_valid_pan(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 10
        && bytes[..5].iter().all(u8::is_ascii_uppercase)
        && bytes[5..9].iter().all(u8::is_ascii_digit)
        && bytes[9].is_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::schema::{default_columns, default_date_formats};

    fn headers(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn row(row_number: usize, values: &[&str]) -> SpreadsheetRow {
        SpreadsheetRow {
            row_number,
            cells: values.iter().map(|v| Cell::text(v)).collect(),
        }
    }

    fn build(header: &[&str], values: &[&str]) -> Result<EmdRecord, Vec<RowIssue>> {
        let schema = Schema::default();
        let headers = headers(header);
        let layout = schema.layout(&headers);
        build_record(&schema, &layout, &headers, &row(2, values))
    }

    #[test]
    fn valid_row_gets_derived_fields() {
        let record = build(
            &["Bidder", "Amount", "Submission Date", "Refund Date", "Remarks"],
            &["Acme", "1,20,000", "01/04/2024", "11/04/2024", "on time"],
        )
        .expect("row should be accepted");

        assert_eq!(record.payee, "Acme");
        assert_eq!(record.amount, Amount(12_000_000));
        assert_eq!(record.formatted_amount, "₹120,000.00");
        assert_eq!(record.amount_in_words, "One Lakh Twenty Thousand Rupees Only");
        assert_eq!(record.status, EmdStatus::Refunded);
        assert_eq!(record.days_held, Some(10));
        assert_eq!(
            record.extra,
            vec![ExtraField {
                column: 4,
                header: "Remarks".to_string(),
                value: "on time".to_string(),
            }]
        );
    }

    #[test]
    fn missing_refund_date_means_pending() {
        let record = build(&["Bidder", "Amount"], &["Acme", "500"]).expect("accepted");
        assert_eq!(record.status, EmdStatus::Pending);
        assert_eq!(record.days_held, None);
    }

    #[test]
    fn empty_payee_is_reported_by_column() {
        let issues = build(&["Bidder", "Amount"], &["", "500"]).expect_err("rejected");
        assert_eq!(issues, vec![RowIssue::missing("Bidder")]);
    }

    #[test]
    fn every_issue_of_a_row_is_reported() {
        let issues = build(
            &["Bidder", "Amount", "PAN", "Refund Date"],
            &["", "abc", "XYZ", "someday"],
        )
        .expect_err("rejected");

        let columns = issues.iter().map(RowIssue::column).collect::<Vec<_>>();
        assert_eq!(columns, vec!["Bidder", "Amount", "PAN", "Refund Date"]);
    }

    #[test]
    fn zero_amount_is_rejected() {
        let issues = build(&["Bidder", "Amount"], &["Acme", "0"]).expect_err("rejected");
        assert_eq!(
            issues,
            vec![RowIssue::NonPositiveAmount {
                column: "Amount".to_string()
            }]
        );
    }

    #[test]
    fn refund_before_submission_is_rejected() {
        let issues = build(
            &["Bidder", "Amount", "Submission Date", "Refund Date"],
            &["Acme", "500", "10/04/2024", "01/04/2024"],
        )
        .expect_err("rejected");
        assert_eq!(issues[0].to_string(), "Refund Date precedes Submission Date");
    }

    #[test]
    fn pan_is_uppercased_and_checked() {
        let record = build(&["Bidder", "Amount", "PAN"], &["Acme", "500", "abcde1234f"])
            .expect("accepted");
        assert_eq!(record.pan.as_deref(), Some("ABCDE1234F"));
        assert!(!is_valid_pan("ABCD1234FF"));
    }

    #[test]
    fn other_role_columns_are_typed_and_carried() {
        let mut columns = default_columns();
        columns.push(ColumnSpec {
            header: "Receipt Amount".to_string(),
            aliases: Vec::new(),
            role: ColumnRole::Other,
            kind: Some(ColumnKind::Amount),
            required: true,
        });
        let schema = Schema::new(columns, default_date_formats()).expect("valid schema");
        let headers = headers(&["Receipt Amount", "Bidder", "Amount"]);
        let layout = schema.layout(&headers);

        let record = build_record(&schema, &layout, &headers, &row(2, &["Rs 10", "Acme", "5"]))
            .expect("accepted");
        assert_eq!(record.extra_value(0), Some("10.00"));
        assert_eq!(record.extra[0].header, "Receipt Amount");

        let issues = build_record(&schema, &layout, &headers, &row(3, &["", "Acme", "5"]))
            .expect_err("rejected");
        assert_eq!(issues, vec![RowIssue::missing("Receipt Amount")]);
    }

    #[test]
    fn repeated_headers_keep_one_extra_per_column() {
        let record = build(
            &["Bidder", "Amount", "Remarks", "Remarks"],
            &["Acme", "1", "first", "second"],
        )
        .expect("accepted");

        assert_eq!(record.extra_value(2), Some("first"));
        assert_eq!(record.extra_value(3), Some("second"));
    }

    #[test]
    fn absent_required_column_rejects_the_row() {
        let issues = build(&["Bidder"], &["Acme"]).expect_err("rejected");
        assert_eq!(issues, vec![RowIssue::missing("Amount")]);
    }
}
