//! CSV exporters for simulation output.

use std::fs::File;
use std::path::{Path, PathBuf};

use polars::prelude::*;
use thiserror::Error;
use tracing::info;

use super::system::MassSpringDamper;
use crate::data::{DataProcessor, Dataset, ProcessorError};

#[derive(Error, Debug)]
pub enum ExportCause {
    #[error("cannot create file: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV write failed: {0}")]
    Csv(#[from] PolarsError),
    #[error(transparent)]
    Frame(#[from] ProcessorError),
}

#[derive(Error, Debug)]
#[error("Failed to write {}", .path.display())]
pub struct ExportError {
    pub path: PathBuf,
    #[source]
    pub source: ExportCause,
}

impl ExportError {
    fn new(path: &Path, source: impl Into<ExportCause>) -> Self {
        Self {
            path: path.to_path_buf(),
            source: source.into(),
        }
    }
}

/// Write the time series in the layout the chart loader reads back.
pub fn write_results(dataset: &Dataset, path: &Path) -> Result<(), ExportError> {
    let mut df =
        DataProcessor::to_dataframe(dataset).map_err(|e| ExportError::new(path, e))?;
    write_frame(&mut df, path)?;
    info!(path = %path.display(), rows = dataset.len(), "results exported");
    Ok(())
}

/// Write the parameter table: `Parameter,Value,Unit,Observation`.
pub fn write_parameters(system: &MassSpringDamper, path: &Path) -> Result<(), ExportError> {
    let rows = system.report();

    let names: Vec<&str> = rows.iter().map(|r| r.name).collect();
    let values: Vec<String> = rows.iter().map(|r| r.value_text()).collect();
    // Nulls are written as bare empty fields; empty strings would be quoted.
    let units: Vec<Option<&str>> = rows.iter().map(|r| non_empty(r.unit)).collect();
    let observations: Vec<Option<&str>> = rows
        .iter()
        .map(|r| non_empty(r.observation))
        .collect();

    let mut df = DataFrame::new(vec![
        Column::new("Parameter".into(), names),
        Column::new("Value".into(), values),
        Column::new("Unit".into(), units),
        Column::new("Observation".into(), observations),
    ])
    .map_err(|e| ExportError::new(path, e))?;

    write_frame(&mut df, path)?;
    info!(path = %path.display(), rows = rows.len(), "parameters exported");
    Ok(())
}

fn non_empty(text: &str) -> Option<&str> {
    (!text.is_empty()).then_some(text)
}

fn write_frame(df: &mut DataFrame, path: &Path) -> Result<(), ExportError> {
    let mut file = File::create(path).map_err(|e| ExportError::new(path, e))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .map_err(|e| ExportError::new(path, e))
}
