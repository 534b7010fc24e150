//! Two-column text series, one file per observable.
//!
//! Each file starts with a header row `tau [fm]\t\t<label>` followed by one
//! `tau\t\tvalue` row per sample, both in `{:.6e}` format.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::{ResultsError, ResultsResult};

pub const TAU_HEADER: &str = "tau [fm]";

/// A series file: `<key>.dat` with `label` as the value column header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesColumn {
    pub key: String,
    pub label: String,
}

impl SeriesColumn {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.dat", self.key)
    }
}

struct SeriesFile {
    path: PathBuf,
    out: BufWriter<File>,
}

/// Buffered writer for a set of series sharing one time axis.
///
/// Rows are buffered; dropping the writer flushes what was appended (errors
/// are lost), [`finish`](SeriesWriter::finish) flushes and reports them.
pub struct SeriesWriter {
    files: Vec<SeriesFile>,
}

impl SeriesWriter {
    /// Create `dir` if needed and open one file per column, writing headers.
    pub fn create(dir: &Path, columns: &[SeriesColumn]) -> ResultsResult<Self> {
        fs::create_dir_all(dir)?;
        let mut files = Vec::with_capacity(columns.len());
        for column in columns {
            let path = dir.join(column.file_name());
            let mut out = BufWriter::new(File::create(&path)?);
            writeln!(out, "{TAU_HEADER}\t\t{}", column.label)?;
            files.push(SeriesFile { path, out });
        }
        Ok(Self { files })
    }

    /// Append one row to every file; `values` follows the column order.
    pub fn append(&mut self, tau: f64, values: &[f64]) -> ResultsResult<()> {
        if values.len() != self.files.len() {
            return Err(ResultsError::InvalidSeries {
                message: format!(
                    "expected {} values, got {}",
                    self.files.len(),
                    values.len()
                ),
            });
        }
        for (file, value) in self.files.iter_mut().zip(values) {
            writeln!(file.out, "{tau:.6e}\t\t{value:.6e}")?;
        }
        Ok(())
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(|f| f.path.as_path())
    }

    pub fn finish(mut self) -> ResultsResult<()> {
        for file in &mut self.files {
            file.out.flush()?;
        }
        Ok(())
    }
}

/// Read a series file back as `(tau, value)` pairs, skipping the header.
pub fn read_series(path: &Path) -> ResultsResult<Vec<(f64, f64)>> {
    let content = fs::read_to_string(path)?;
    let mut rows = Vec::new();
    for (n, line) in content.lines().enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        let mut cols = line.split_whitespace().map(str::parse::<f64>);
        match (cols.next(), cols.next()) {
            (Some(Ok(tau)), Some(Ok(value))) => rows.push((tau, value)),
            _ => {
                return Err(ResultsError::InvalidSeries {
                    message: format!("{}:{}: malformed row", path.display(), n + 1),
                });
            }
        }
    }
    Ok(rows)
}
