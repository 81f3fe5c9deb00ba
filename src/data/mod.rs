//! Data module - results-file loading and column extraction

mod dataset;
mod loader;
mod processor;

pub use dataset::{
    Dataset, Quantity, Sample, ACCELERATION_COLUMN, POSITION_COLUMN, REQUIRED_COLUMNS,
    TIME_COLUMN, VELOCITY_COLUMN,
};
pub use loader::{load_dataset, DataLoadCause, DataLoader, LoaderError};
pub use processor::{DataProcessor, ProcessorError};
