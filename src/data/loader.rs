use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use thiserror::Error;

use super::model::{Column, Dataset};

/// Why a dataset could not be imported.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("could not read {}: {message}", path.display())]
    Malformed { path: PathBuf, message: String },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a tabular dataset from a `.csv` file (header row followed by one
/// record per row).
pub fn load_file(path: &Path) -> Result<Dataset, LoadError> {
    if !path.is_file() {
        return Err(LoadError::MissingFile(path.to_path_buf()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    if ext != "csv" {
        return Err(LoadError::UnsupportedExtension(ext));
    }

    load_csv(path).map_err(|e| LoadError::Malformed {
        path: path.to_path_buf(),
        message: format!("{e:#}"),
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, then records. Every record
/// must have as many fields as the header. Column kinds are inferred from
/// the whole column; missing-value markers (`NaN`, `NA`, `null`, ...) are
/// read as nulls.
fn load_csv(path: &Path) -> Result<Dataset> {
    let reader = csv::Reader::from_path(path).context("opening CSV")?;
    read_csv(reader)
}

fn read_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Dataset> {
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if headers.is_empty() {
        bail!("CSV has no header row");
    }

    let mut raw: Vec<Vec<String>> = vec![Vec::new(); headers.len()];

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        for (col_idx, value) in record.iter().enumerate() {
            raw[col_idx].push(value.to_string());
        }
    }

    let columns = headers
        .iter()
        .zip(raw.iter())
        .map(|(name, cells)| Column::from_raw(name.clone(), cells))
        .collect();

    Dataset::new(columns)
}
