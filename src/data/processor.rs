//! Data Processor Module
//! Turns loaded DataFrame columns into plain `f64` series.

use polars::prelude::*;
use thiserror::Error;

use super::dataset::{
    Dataset, ACCELERATION_COLUMN, POSITION_COLUMN, TIME_COLUMN, VELOCITY_COLUMN,
};

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("column '{column}', row {row}: empty or non-numeric value")]
    NonNumeric { column: String, row: usize },
}

/// Handles column extraction and conversion.
pub struct DataProcessor;

impl DataProcessor {
    /// Read one column as `f64`, preserving row order.
    ///
    /// Integer columns are widened; text that does not parse as a number and
    /// empty cells are rejected with the 1-based data row they occur on.
    pub fn numeric_series(df: &DataFrame, column: &str) -> Result<Vec<f64>, ProcessorError> {
        let series = df.column(column)?;
        let value_f64 = series.cast(&DataType::Float64)?;
        let value_ca = value_f64.f64()?;

        value_ca
            .into_iter()
            .enumerate()
            .map(|(i, v)| {
                v.ok_or_else(|| ProcessorError::NonNumeric {
                    column: column.to_string(),
                    row: i + 1,
                })
            })
            .collect()
    }

    /// Extract the four required columns into a `Dataset`.
    ///
    /// Columns must already be known to exist (see `DataLoader::validate_schema`).
    pub fn to_dataset(df: &DataFrame) -> Result<Dataset, ProcessorError> {
        let time = Self::numeric_series(df, TIME_COLUMN)?;
        let position = Self::numeric_series(df, POSITION_COLUMN)?;
        let velocity = Self::numeric_series(df, VELOCITY_COLUMN)?;
        let acceleration = Self::numeric_series(df, ACCELERATION_COLUMN)?;

        Ok(Dataset::from_columns(time, position, velocity, acceleration))
    }

    /// Build a DataFrame in the results-file layout.
    pub fn to_dataframe(dataset: &Dataset) -> Result<DataFrame, ProcessorError> {
        let df = DataFrame::new(vec![
            Column::new(TIME_COLUMN.into(), dataset.time()),
            Column::new(POSITION_COLUMN.into(), dataset.position()),
            Column::new(VELOCITY_COLUMN.into(), dataset.velocity()),
            Column::new(ACCELERATION_COLUMN.into(), dataset.acceleration()),
        ])?;
        Ok(df)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Sample;

    #[test]
    fn test_integer_column_is_widened() {
        let df = DataFrame::new(vec![Column::new("n".into(), &[1i64, 2, 3])])
            .unwrap();
        let values = DataProcessor::numeric_series(&df, "n").unwrap();
        assert_eq!(values, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_text_value_is_rejected_with_row() {
        let df = DataFrame::new(vec![Column::new("n".into(), &["1.5", "abc", "2"])])
            .unwrap();
        let err = DataProcessor::numeric_series(&df, "n").unwrap_err();
        match err {
            ProcessorError::NonNumeric { column, row } => {
                assert_eq!(column, "n");
                assert_eq!(row, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_dataframe_roundtrip_keeps_layout() {
        let ds = Dataset::from_samples([
            Sample {
                time: 0.0,
                position: 1.0,
                velocity: 0.0,
                acceleration: -4.0,
            },
            Sample {
                time: 0.01,
                position: 0.99,
                velocity: -0.04,
                acceleration: -3.9,
            },
        ]);
        let df = DataProcessor::to_dataframe(&ds).unwrap();
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names, crate::data::REQUIRED_COLUMNS);
        assert_eq!(DataProcessor::to_dataset(&df).unwrap(), ds);
    }
}
