//! Batch file parsing.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::batch::types::{BatchError, TransferRecord};

/// Parse the batch file at `path`.
///
/// The first row is always discarded as a header, without checking it.
/// Blank and short rows are kept so every record keeps its position.
///
/// Empty lines are not rows: they are dropped before the header is
/// counted, so a file opening with an empty line still loses its first
/// non-empty row. Fields are trimmed, so a whitespace-only field is empty
/// and recipients reach the run log without surrounding whitespace.
pub fn parse(path: &Path) -> Result<Vec<TransferRecord>, BatchError> {
    let file = File::open(path).map_err(|source| BatchError::Open {
        path: path.display().to_string(),
        source,
    })?;

    let records = read_records(file).map_err(|(line, source)| BatchError::Parse {
        path: path.display().to_string(),
        line,
        source,
    })?;

    tracing::info!(
        path = %path.display(),
        records = records.len(),
        "Batch file loaded"
    );
    Ok(records)
}

fn read_records<R: Read>(input: R) -> Result<Vec<TransferRecord>, (u64, csv::Error)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        let row = row.map_err(|e| {
            let line = e.position().map_or(index as u64 + 1, |p| p.line());
            (line, e)
        })?;
        if index == 0 {
            continue;
        }
        let line = row.position().map_or(index as u64 + 1, |p| p.line());
        records.push(TransferRecord::new(
            line,
            row.iter().map(str::to_string).collect(),
        ));
    }
    Ok(records)
}
