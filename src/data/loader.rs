//! CSV Data Loader Module
//! Handles results-file loading and required-column checks using Polars.

use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use super::dataset::{Dataset, REQUIRED_COLUMNS};
use super::processor::{DataProcessor, ProcessorError};

/// Why a dataset could not be read.
#[derive(Error, Debug)]
pub enum DataLoadCause {
    #[error("cannot open file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error(transparent)]
    Value(#[from] ProcessorError),
    #[error("no data loaded")]
    NoData,
}

/// The two fatal ways loading can fail.
#[derive(Error, Debug)]
pub enum LoaderError {
    /// File missing, unreadable, malformed or holding non-numeric cells.
    #[error("Failed to load data from {}", .path.display())]
    DataLoad {
        path: PathBuf,
        #[source]
        source: DataLoadCause,
    },
    /// One or more required columns are absent from the header.
    #[error("Missing required column(s) in {}: {}", .path.display(), .missing.join(", "))]
    Schema { path: PathBuf, missing: Vec<String> },
}

impl LoaderError {
    fn data_load(path: &Path, source: impl Into<DataLoadCause>) -> Self {
        Self::DataLoad {
            path: path.to_path_buf(),
            source: source.into(),
        }
    }
}

/// Handles CSV file loading with Polars.
pub struct DataLoader {
    df: Option<DataFrame>,
    file_path: Option<PathBuf>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            df: None,
            file_path: None,
        }
    }

    /// Read a CSV file with a header row. The file is read fully and closed.
    pub fn load_csv(&mut self, file_path: impl AsRef<Path>) -> Result<&DataFrame, LoaderError> {
        let path = file_path.as_ref();
        self.file_path = Some(path.to_path_buf());
        self.df = None;

        let file = File::open(path).map_err(|e| LoaderError::data_load(path, e))?;
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .into_reader_with_file_handle(file)
            .finish()
            .map_err(|e| LoaderError::data_load(path, e))?;

        debug!(
            path = %path.display(),
            rows = df.height(),
            columns = df.width(),
            "CSV parsed"
        );

        self.df = Some(df);
        self.df
            .as_ref()
            .ok_or_else(|| LoaderError::data_load(path, DataLoadCause::NoData))
    }

    /// Get list of column names from loaded DataFrame.
    pub fn get_columns(&self) -> Vec<String> {
        self.df
            .as_ref()
            .map(|df| {
                df.get_column_names()
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Required columns absent from the loaded header, in canonical order.
    pub fn missing_columns(&self) -> Vec<String> {
        let columns = self.get_columns();
        REQUIRED_COLUMNS
            .iter()
            .filter(|required| !columns.iter().any(|c| c == *required))
            .map(|s| s.to_string())
            .collect()
    }

    /// Fail with `LoaderError::Schema` unless every required column is present.
    pub fn validate_schema(&self) -> Result<(), LoaderError> {
        let path = self.current_path();
        if self.df.is_none() {
            return Err(LoaderError::data_load(&path, DataLoadCause::NoData));
        }

        let missing = self.missing_columns();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(LoaderError::Schema { path, missing })
        }
    }

    /// Convert the loaded frame into a `Dataset`, checking the schema first.
    pub fn to_dataset(&self) -> Result<Dataset, LoaderError> {
        self.validate_schema()?;
        let path = self.current_path();
        let df = self
            .df
            .as_ref()
            .ok_or_else(|| LoaderError::data_load(&path, DataLoadCause::NoData))?;

        DataProcessor::to_dataset(df).map_err(|e| LoaderError::data_load(&path, e))
    }

    /// Get the number of rows in the DataFrame.
    pub fn get_row_count(&self) -> usize {
        self.df.as_ref().map(|df| df.height()).unwrap_or(0)
    }

    /// Get file path.
    pub fn get_file_path(&self) -> Option<&PathBuf> {
        self.file_path.as_ref()
    }

    fn current_path(&self) -> PathBuf {
        self.file_path.clone().unwrap_or_default()
    }
}

/// Load, validate and convert a results file in one call.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Dataset, LoaderError> {
    let mut loader = DataLoader::new();
    loader.load_csv(path)?;
    loader.to_dataset()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(dir: &tempfile::TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut f = File::create(&path).unwrap();
        f.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_example_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "results.csv",
            "time(s),position(m),velocity(m/s),acceleration(m/s^2)\n\
             0,0,0,0\n\
             1,0.5,1.0,-2.0\n\
             2,0.8,0.3,-3.1\n",
        );

        let ds = load_dataset(&path).unwrap();
        assert_eq!(ds.time(), &[0.0, 1.0, 2.0]);
        assert_eq!(ds.position(), &[0.0, 0.5, 0.8]);
        assert_eq!(ds.velocity(), &[0.0, 1.0, 0.3]);
        assert_eq!(ds.acceleration(), &[0.0, -2.0, -3.1]);
    }

    #[test]
    fn test_extra_columns_and_order_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "results.csv",
            "note,acceleration(m/s^2),time(s),velocity(m/s),position(m)\n\
             a,-1,0,2,3\n\
             b,-2,0.5,4,6\n",
        );

        let ds = load_dataset(&path).unwrap();
        assert_eq!(ds.time(), &[0.0, 0.5]);
        assert_eq!(ds.position(), &[3.0, 6.0]);
        assert_eq!(ds.velocity(), &[2.0, 4.0]);
        assert_eq!(ds.acceleration(), &[-1.0, -2.0]);
    }

    #[test]
    fn test_missing_file_is_data_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_dataset(dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(
            err,
            LoaderError::DataLoad {
                source: DataLoadCause::Io(_),
                ..
            }
        ));
    }

    #[test]
    fn test_missing_velocity_is_schema_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "results.csv",
            "time(s),position(m),acceleration(m/s^2)\n0,1,2\n",
        );

        let err = load_dataset(&path).unwrap_err();
        match err {
            LoaderError::Schema { missing, .. } => assert_eq!(missing, vec!["velocity(m/s)"]),
            other => panic!("expected schema error, got {other}"),
        }
    }

    #[test]
    fn test_non_numeric_cell_is_data_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "results.csv",
            "time(s),position(m),velocity(m/s),acceleration(m/s^2)\n\
             0,0,0,0\n\
             1,oops,1,1\n",
        );

        let err = load_dataset(&path).unwrap_err();
        assert!(matches!(
            err,
            LoaderError::DataLoad {
                source: DataLoadCause::Value(ProcessorError::NonNumeric { row: 2, .. }),
                ..
            }
        ));
    }

    #[test]
    fn test_header_only_file_gives_empty_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            &dir,
            "results.csv",
            "time(s),position(m),velocity(m/s),acceleration(m/s^2)\n",
        );

        let ds = load_dataset(&path).unwrap();
        assert!(ds.is_empty());
    }

    #[test]
    fn test_schema_check_before_load_reports_no_data() {
        let loader = DataLoader::new();
        assert!(matches!(
            loader.validate_schema(),
            Err(LoaderError::DataLoad {
                source: DataLoadCause::NoData,
                ..
            })
        ));
        assert_eq!(loader.get_row_count(), 0);
        assert!(loader.get_file_path().is_none());
    }
}
