use std::io::{self, Read};

use anyhow::{bail, Context, Result};
use log::debug;

/// Raw tabular input as parsed from CSV, before it becomes a `Dataset`.
#[derive(Debug, Clone)]
pub struct TableData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Read a CSV document: first record is the header list, every following
/// record is a data row. Rows containing an empty or whitespace-only field
/// are dropped here, so downstream code never sees an incomplete row.
pub fn read_csv<R: Read>(reader: R) -> Result<TableData> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()
        .context("Failed to read CSV header record")?
        .iter()
        .map(str::to_string)
        .collect();
    if headers.is_empty() {
        bail!("CSV input has no header record");
    }

    let mut rows = Vec::new();
    let mut dropped = 0usize;
    for record in csv_reader.records() {
        let record = record.context("Failed to read CSV record")?;
        let row: Vec<String> = record.iter().map(str::to_string).collect();
        if row.iter().any(|value| value.trim().is_empty()) {
            dropped += 1;
            continue;
        }
        rows.push(row);
    }
    if dropped > 0 {
        debug!("dropped {} incomplete CSV rows", dropped);
    }

    Ok(TableData { headers, rows })
}

/// Read CSV from stdin (the CLI's default data source).
pub fn read_csv_from_stdin() -> Result<TableData> {
    read_csv(io::stdin())
}
