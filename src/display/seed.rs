//! Seed report formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::seed::SeedReport;

#[derive(Tabled)]
struct SeedRow {
    #[tabled(rename = "Table")]
    table: String,
    #[tabled(rename = "Loaded")]
    loaded: String,
    #[tabled(rename = "Source")]
    source: String,
}

/// Format a seed report as a table, one row per table
pub fn format_seed_report(report: &SeedReport) -> String {
    if report.tables.is_empty() {
        return "No tables seeded.".to_string();
    }

    let rows: Vec<SeedRow> = report
        .tables
        .iter()
        .map(|t| match &t.result {
            Ok(record) => SeedRow {
                table: t.table.to_string(),
                loaded: record.count.to_string(),
                source: record.path.display().to_string(),
            },
            Err(e) => SeedRow {
                table: t.table.to_string(),
                loaded: "-".into(),
                source: format!("failed: {}", e),
            },
        })
        .collect();

    let mut output = Table::new(rows).with(Style::psql()).to_string();
    output.push('\n');
    output.push_str(&format!("{} records loaded", report.total_records()));
    output
}
