//! Text rendering of the client state
//!
//! One row per cached record, one column per attribute plus the record id.
//! Column widths fit the widest cell. The error flag, when set, is printed on
//! its own line above the table.

use poultry_core::model::{Field, ProductionRecord};
use poultry_core::sync::ClientState;

const ID_HEADER: &str = "Id";

/// Render the cached records and the error flag
pub fn render(state: &ClientState) -> String {
    let mut out = String::new();
    if let Some(error) = state.error() {
        out.push_str(error);
        out.push('\n');
    }
    out.push_str(&render_records(state.cache()));
    out
}

/// Render records as a fixed-width table
pub fn render_records(records: &[ProductionRecord]) -> String {
    let header: Vec<String> = Field::ALL
        .iter()
        .map(|f| f.label().to_string())
        .chain(std::iter::once(ID_HEADER.to_string()))
        .collect();

    let rows: Vec<Vec<String>> = records.iter().map(row).collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|col| {
            rows.iter()
                .map(|r| r[col].chars().count())
                .chain(std::iter::once(header[col].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    push_line(&mut out, &header, &widths);

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("-+-"));
    out.push('\n');

    for r in &rows {
        push_line(&mut out, r, &widths);
    }
    out
}

fn row(record: &ProductionRecord) -> Vec<String> {
    Field::ALL
        .iter()
        .map(|&f| record.fields.display(f))
        .chain(std::iter::once(record.id.to_string()))
        .collect()
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect();
    out.push_str(padded.join(" | ").trim_end());
    out.push('\n');
}
