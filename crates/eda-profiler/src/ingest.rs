//! CSV ingestion into a [`Dataset`].
//!
//! Parsing is delegated to polars. The delimiter is sniffed from the header
//! line (`;`, `,` or tab) and blank lines are dropped before parsing.
//! Spreadsheet formats are not handled.

use crate::dataset::Dataset;
use crate::error::{ProfilingError, Result, ResultExt};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, info};

/// File extensions accepted by [`load_csv`].
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["csv", "tsv", "txt"];

const CANDIDATE_DELIMITERS: [u8; 3] = [b',', b';', b'\t'];

/// Load a delimited text file.
///
/// Fails with [`ProfilingError::UnsupportedFormat`] for other extensions and
/// with [`ProfilingError::EmptyDataset`] when the file has no data rows.
pub fn load_csv(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    if !SUPPORTED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(ProfilingError::UnsupportedFormat(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    let dataset = read_csv_str(&content).context(format!("Reading {}", path.display()))?;
    info!(
        "Loaded {}: {} rows x {} columns",
        path.display(),
        dataset.row_count(),
        dataset.column_count()
    );
    Ok(dataset)
}

/// Parse delimited text held in memory.
pub fn read_csv_str(content: &str) -> Result<Dataset> {
    let cleaned = drop_blank_lines(content);
    let mut lines = cleaned.lines();
    let (Some(header), Some(_)) = (lines.next(), lines.next()) else {
        return Err(ProfilingError::EmptyDataset);
    };
    let delimiter = sniff_delimiter(header);
    debug!("Sniffed delimiter {:?}", delimiter as char);

    let df = match parse(cleaned.clone(), delimiter, true) {
        Ok(df) => df,
        Err(e) => {
            debug!("Standard loading failed: {}, retrying without quote handling", e);
            parse(collapse_quotes(&cleaned), delimiter, false)?
        }
    };

    let dataset = Dataset::from_dataframe(&df)?;
    if dataset.is_empty() {
        return Err(ProfilingError::EmptyDataset);
    }
    Ok(dataset)
}

/// Pick the delimiter occurring most often in the header line.
///
/// Ties (including a header with none of them) resolve to a comma.
pub fn sniff_delimiter(header: &str) -> u8 {
    CANDIDATE_DELIMITERS
        .iter()
        .copied()
        .map(|d| (d, header.bytes().filter(|&b| b == d).count()))
        .fold((b',', 0), |best, (d, count)| {
            if count > best.1 { (d, count) } else { best }
        })
        .0
}

fn parse(content: String, delimiter: u8, quoted: bool) -> PolarsResult<DataFrame> {
    let quote_char = if quoted { Some(b'"') } else { None };
    CsvReadOptions::default()
        .with_infer_schema_length(Some(100))
        .with_has_header(true)
        .with_parse_options(
            CsvParseOptions::default()
                .with_separator(delimiter)
                .with_quote_char(quote_char),
        )
        .into_reader_with_file_handle(Cursor::new(content))
        .finish()
}

fn drop_blank_lines(content: &str) -> String {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn collapse_quotes(content: &str) -> String {
    content.replace("\"\"\"", "\"").replace("\"\"", "\"")
}
