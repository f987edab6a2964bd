use std::sync::Arc;

use anyhow::Result;
use dioxus::prelude::*;
use rfd::FileDialog;
use tracing::{error, warn};

use crate::domain::entities::result::ProcessingResult;
use crate::domain::entities::schema::Schema;
use crate::domain::entities::upload::UploadedFile;
use crate::domain::rules::amount::format_rupees;
use crate::domain::rules::date::format_date;
use crate::infra::config::AppConfig;
use crate::infra::import::SpreadsheetReader;
use crate::ui::format::{
    missing_columns_message, optional_text, processed_status, SKIPPED_PREVIEW_LIMIT,
};
use crate::ui::state::app_state::AppState;
use crate::ui::style::{
    error_style, notice_style, root_container_style, status_badge_style, table_cell_style,
    table_container_style, table_header_cell_style, toolbar_style,
};
use crate::usecase::services::export_service::{
    default_export_name, default_rejections_name, ExportFormat, ExportKind, ExportService,
};
use crate::usecase::services::process_service::ProcessService;

const UPLOAD_EXTENSIONS: [&str; 7] = ["csv", "txt", "xlsx", "xlsm", "xlsb", "xls", "ods"];

const RECORD_COLUMNS: [&str; 11] = [
    "Row",
    "Payee",
    "Amount",
    "In Words",
    "Status",
    "Tender No",
    "Work",
    "PAN",
    "Submission Date",
    "Refund Date",
    "Days Held",
];

#[derive(Clone)]
struct Services {
    process: Arc<ProcessService>,
    export: ExportService,
}

impl Services {
    fn from_config(config: &AppConfig) -> Self {
        let schema = config.schema.validate().unwrap_or_else(|err| {
            warn!(error = %err, "schema rejected, using the default columns");
            Schema::default()
        });
        Self {
            process: Arc::new(ProcessService::new(Arc::new(SpreadsheetReader), schema)),
            export: ExportService::new(config.export.include_extra_columns),
        }
    }
}

fn export_result(
    export: ExportService,
    kind: ExportKind,
    processed: &ProcessingResult,
    upload: &UploadedFile,
) -> Result<Option<String>> {
    let file_name = match kind {
        ExportKind::Accepted => default_export_name(upload, ExportFormat::Csv),
        ExportKind::Rejected => default_rejections_name(upload, ExportFormat::Csv),
    };
    let Some(path) = FileDialog::new()
        .add_filter("CSV", &["csv"])
        .add_filter("Excel workbook", &["xlsx"])
        .set_file_name(file_name)
        .save_file()
    else {
        return Ok(None);
    };

    let bytes = export.encode(processed, kind, ExportFormat::from_path(&path))?;
    export.save(&path, &bytes)?;
    Ok(Some(format!("Saved {}", path.display())))
}

#[component]
pub fn App() -> Element {
    let config = use_context::<AppConfig>();
    let services = use_hook(|| Services::from_config(&config));

    let AppState {
        mut status,
        mut upload,
        mut result,
    } = AppState::new();

    let process_service = services.process.clone();
    let handle_upload = move |_: MouseEvent| {
        let Some(path) = FileDialog::new()
            .add_filter("Spreadsheet", &UPLOAD_EXTENSIONS)
            .add_filter("All files", &["*"])
            .pick_file()
        else {
            return;
        };

        let outcome = UploadedFile::from_path(&path).and_then(|file| {
            let processed = process_service.process(&file)?;
            Ok((file, processed))
        });
        match outcome {
            Ok((file, processed)) => {
                *status.write() = processed_status(&file.name, &processed);
                upload.set(Some(file));
                result.set(Some(processed));
            }
            Err(err) => {
                error!(error = %err, path = %path.display(), "processing failed");
                *status.write() = format!("Processing failed: {err}");
                upload.set(None);
                result.set(None);
            }
        }
    };

    let export = services.export;
    let mut handle_export = move |kind: ExportKind| {
        let (Some(processed), Some(file)) = (result(), upload()) else {
            *status.write() = "Nothing to export yet".to_string();
            return;
        };
        match export_result(export, kind, &processed, &file) {
            Ok(Some(message)) => *status.write() = message,
            Ok(None) => {}
            Err(err) => {
                error!(error = %err, "export failed");
                *status.write() = format!("Export failed: {err:#}");
            }
        }
    };

    let current = result();
    let has_records = current.as_ref().is_some_and(|r| !r.records.is_empty());
    let has_rejected = current.as_ref().is_some_and(|r| !r.rejected.is_empty());

    rsx! {
        div {
            style: root_container_style(),

            h2 { "EMD Processor" }

            div {
                style: toolbar_style(),
                button {
                    onclick: handle_upload,
                    "Upload spreadsheet"
                }
                button {
                    disabled: !has_records,
                    onclick: move |_: MouseEvent| handle_export(ExportKind::Accepted),
                    "Download processed file"
                }
                button {
                    disabled: !has_rejected,
                    onclick: move |_: MouseEvent| handle_export(ExportKind::Rejected),
                    "Download rejected rows"
                }
                span { "{status}" }
            }

            if let Some(processed) = current {
                ResultView { processed }
            }
        }
    }
}

#[component]
fn ResultView(processed: ProcessingResult) -> Element {
    let counts = processed.summary.clone();
    let total = format_rupees(counts.total_amount);
    let rejected_count = processed.rejected.len();
    let missing = missing_columns_message(&processed);
    let skipped = processed.skipped_summary(SKIPPED_PREVIEW_LIMIT);
    let extra_columns = processed.extra_columns();
    let extra_headers = extra_columns
        .iter()
        .map(|&column| (column, processed.column_header(column)))
        .collect::<Vec<_>>();

    rsx! {
        div {
            style: toolbar_style(),
            span { "Rows read: {counts.rows_read}" }
            span { "Accepted: {counts.rows_accepted}" }
            span { "Rejected: {counts.rows_rejected}" }
            span { "Blank rows: {counts.blank_rows_skipped}" }
            span { "Refunded: {counts.refunded_count}" }
            span { "Pending: {counts.pending_count}" }
            strong { "Total: {total}" }
        }

        if let Some(message) = missing {
            div { style: error_style(), "{message}" }
        }
        if let Some(notice) = skipped {
            div { style: notice_style(), "{notice}" }
        }

        div {
            style: table_container_style(),
            table {
                style: "border-collapse: collapse; width: 100%;",
                thead {
                    tr {
                        {RECORD_COLUMNS.iter().map(|label| rsx!(
                            th { key: "{label}", style: table_header_cell_style(), "{label}" }
                        ))}
                        {extra_headers.iter().map(|(column, label)| rsx!(
                            th { key: "extra-{column}", style: table_header_cell_style(), "{label}" }
                        ))}
                    }
                }
                tbody {
                    {processed.records.iter().map(|record| {
                        let tender = optional_text(record.tender_no.as_deref());
                        let work = optional_text(record.work.as_deref());
                        let pan = optional_text(record.pan.as_deref());
                        let submitted = optional_text(
                            record.submitted_on.map(format_date).as_deref(),
                        );
                        let refunded = optional_text(
                            record.refunded_on.map(format_date).as_deref(),
                        );
                        let days = optional_text(record.days_held.map(|d| d.to_string()).as_deref());
                        let label = record.status.label();
                        rsx!(
                            tr {
                                key: "{record.row_number}",
                                td { style: table_cell_style(true), "{record.row_number}" }
                                td { style: table_cell_style(false), "{record.payee}" }
                                td { style: table_cell_style(true), "{record.formatted_amount}" }
                                td { style: table_cell_style(false), "{record.amount_in_words}" }
                                td {
                                    style: table_cell_style(false),
                                    span { style: status_badge_style(record.status), "{label}" }
                                }
                                td { style: table_cell_style(false), "{tender}" }
                                td { style: table_cell_style(false), "{work}" }
                                td { style: table_cell_style(false), "{pan}" }
                                td { style: table_cell_style(false), "{submitted}" }
                                td { style: table_cell_style(false), "{refunded}" }
                                td { style: table_cell_style(true), "{days}" }
                                {extra_columns.iter().map(|&column| {
                                    let value = optional_text(record.extra_value(column));
                                    rsx!(
                                        td { key: "extra-{column}", style: table_cell_style(false), "{value}" }
                                    )
                                })}
                            }
                        )
                    })}
                }
            }
        }

        if !processed.rejected.is_empty() {
            details {
                summary { "Rejected rows ({rejected_count})" }
                ul {
                    {processed.rejected.iter().map(|row| {
                        let reasons = row.reasons();
                        rsx!(
                            li { key: "{row.row_number}", "Row {row.row_number}: {reasons}" }
                        )
                    })}
                }
            }
        }
    }
}
