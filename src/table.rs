//! CSV load/store for in-memory tables.

use anyhow::{bail, Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use std::io::{Read, Write};
use std::path::Path;

use crate::models::Table;

/// Header of the single-column no-match report
pub const NO_MATCH_HEADER: &str = "species_norm";

/// Parse a comma-delimited table with a header row.
/// Short rows are padded with empty (missing) cells; a row with more
/// fields than the header is an error.
pub fn read_table_from<R: Read>(reader: R) -> Result<Table> {
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .context("Failed to read CSV header")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut table = Table::new(headers);
    for (row_num, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read CSV row {}", row_num + 1))?;
        if record.len() > table.headers.len() {
            bail!(
                "CSV row {} has {} fields, header has {}",
                row_num + 1,
                record.len(),
                table.headers.len()
            );
        }
        table.push_row(record.iter().map(|f| f.to_string()).collect());
    }
    Ok(table)
}

pub fn read_table(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    read_table_from(std::io::BufReader::new(file))
        .with_context(|| format!("Failed to parse {}", path.display()))
}

pub fn write_table_to<W: Write>(writer: W, table: &Table) -> Result<()> {
    let mut out = WriterBuilder::new().from_writer(writer);
    out.write_record(&table.headers)?;
    for row in &table.rows {
        out.write_record(row)?;
    }
    out.flush()?;
    Ok(())
}

pub fn write_table(path: &Path, table: &Table) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_table_to(std::io::BufWriter::new(file), table)
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// Write the no-match report: one normalized species name per row.
pub fn write_no_match(path: &Path, species: &[String]) -> Result<()> {
    let mut table = Table::new(vec![NO_MATCH_HEADER.to_string()]);
    for name in species {
        table.push_row(vec![name.clone()]);
    }
    write_table(path, &table)
}
