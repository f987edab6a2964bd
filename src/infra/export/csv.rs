use std::path::Path;

use anyhow::{Context, Result};
use csv::Writer;

use crate::infra::export::ExportTable;

pub fn encode_csv(table: &ExportTable) -> Result<Vec<u8>> {
    let mut writer = Writer::from_writer(Vec::new());
    writer
        .write_record(&table.headers)
        .context("failed to write csv header")?;
    for row in &table.rows {
        writer
            .write_record(row.iter().map(|value| value.to_text()))
            .context("failed to write csv record")?;
    }
    writer
        .into_inner()
        .map_err(|err| anyhow::anyhow!("failed to flush csv writer: {}", err.error()))
}

pub fn write_export(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create export dir: {}", parent.display()))?;
    }
    std::fs::write(path, bytes)
        .with_context(|| format!("failed to write export: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::record::Amount;
    use crate::infra::export::ExportValue;

    #[test]
    fn quotes_fields_with_separators() {
        let table = ExportTable {
            sheet: "EMD",
            headers: vec!["Payee".to_string(), "Work".to_string(), "Amount".to_string()],
            rows: vec![vec![
                "Acme".into(),
                "Roads, phase 2".into(),
                ExportValue::Amount(Amount(150_050)),
            ]],
        };
        let bytes = encode_csv(&table).expect("csv should encode");

        assert_eq!(
            String::from_utf8(bytes).expect("utf8"),
            "Payee,Work,Amount\nAcme,\"Roads, phase 2\",1500.50\n"
        );
    }
}
