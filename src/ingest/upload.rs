use std::io::Read;

use crate::schema::{TableError, TransactionTable};

/// Parse CSV text with a header row into a transaction table.
/// Empty cells become NaN, like a missing value in a dataframe; the model decides
/// what to do with them. Any other non-numeric cell is rejected here.
pub fn parse_csv<R: Read>(input: R) -> Result<TransactionTable, TableError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let columns: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut rows = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let record = result?;
        let row = record
            .iter()
            .enumerate()
            .map(|(c, cell)| parse_cell(cell, i + 1, c, &columns))
            .collect::<Result<Vec<f64>, _>>()?;
        rows.push(row);
    }

    let table = TransactionTable::new(columns, rows)?;
    tracing::debug!(
        columns = table.column_count(),
        rows = table.row_count(),
        "Parsed CSV upload"
    );
    Ok(table)
}

pub fn parse_csv_file(path: &str) -> eyre::Result<TransactionTable> {
    let file = std::fs::File::open(path)
        .map_err(|e| eyre::eyre!("Failed to open input CSV '{}': {}", path, e))?;
    parse_csv(file).map_err(|e| eyre::eyre!("Failed to parse input CSV '{}': {}", path, e))
}

fn parse_cell(cell: &str, row: usize, col: usize, columns: &[String]) -> Result<f64, TableError> {
    if cell.is_empty() {
        return Ok(f64::NAN);
    }
    cell.parse::<f64>().map_err(|_| TableError::InvalidNumber {
        row,
        column: columns
            .get(col)
            .cloned()
            .unwrap_or_else(|| format!("#{}", col + 1)),
        value: cell.to_string(),
    })
}
