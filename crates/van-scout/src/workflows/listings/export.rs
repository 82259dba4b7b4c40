use super::domain::EvaluatedListing;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("failed to write CSV to {}: {source}", .path.display())]
    Csv { path: PathBuf, source: csv::Error },
    #[error("failed to write JSON to {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportSummary {
    Empty,
    Written {
        count: usize,
        csv_path: PathBuf,
        json_path: PathBuf,
    },
}

/// Writes ranked candidates as CSV for spreadsheets and JSON for the web page.
#[derive(Debug, Clone)]
pub struct CandidateExporter {
    csv_path: PathBuf,
    json_path: PathBuf,
}

impl CandidateExporter {
    pub fn new(csv_path: impl Into<PathBuf>, json_path: impl Into<PathBuf>) -> Self {
        Self {
            csv_path: csv_path.into(),
            json_path: json_path.into(),
        }
    }

    /// Nothing is written when there are no candidates.
    pub fn export(&self, candidates: &[EvaluatedListing]) -> Result<ExportSummary, ExportError> {
        if candidates.is_empty() {
            info!("no candidates to export");
            return Ok(ExportSummary::Empty);
        }

        write_csv(&self.csv_path, candidates)?;
        write_json(&self.json_path, candidates)?;

        info!(
            count = candidates.len(),
            csv = %self.csv_path.display(),
            json = %self.json_path.display(),
            "exported candidates"
        );

        Ok(ExportSummary::Written {
            count: candidates.len(),
            csv_path: self.csv_path.clone(),
            json_path: self.json_path.clone(),
        })
    }
}

fn write_csv(path: &Path, candidates: &[EvaluatedListing]) -> Result<(), ExportError> {
    let csv_error = |source| ExportError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_path(path)
        .map_err(csv_error)?;

    for candidate in candidates {
        writer.serialize(candidate).map_err(csv_error)?;
    }

    writer.flush().map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_json(path: &Path, candidates: &[EvaluatedListing]) -> Result<(), ExportError> {
    let io_error = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, candidates).map_err(|source| ExportError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    writer.flush().map_err(io_error)
}
