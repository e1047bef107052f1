//! Backup report formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::backup::BackupReport;

#[derive(Tabled)]
struct BackupRow {
    #[tabled(rename = "Table")]
    table: String,
    #[tabled(rename = "Records")]
    records: String,
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Rotated")]
    rotated: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Format a backup report as a table, one row per table
pub fn format_backup_report(report: &BackupReport) -> String {
    let rows: Vec<BackupRow> = report
        .tables
        .iter()
        .map(|t| BackupRow {
            table: t.table.to_string(),
            records: t
                .records()
                .map(|n| n.to_string())
                .unwrap_or_else(|| "-".into()),
            file: t
                .path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
            rotated: t
                .rotated
                .as_ref()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "-".into()),
            status: match (&t.result, &t.rotation_error) {
                (Err(e), _) => format!("failed: {}", e),
                (Ok(_), Some(e)) => format!("rotation failed: {}", e),
                (Ok(_), None) => "ok".into(),
            },
        })
        .collect();

    let mut output = Table::new(rows).with(Style::psql()).to_string();
    output.push('\n');
    output.push_str(&format!(
        "Backup {}: {} records in {}",
        report.id,
        report.total_records(),
        report.folder.display()
    ));
    output
}
