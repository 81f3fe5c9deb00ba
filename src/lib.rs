//! msd_plot - mass-spring-damper simulation and time-series charts.
//!
//! The usual flow is `results.csv` → [`data::load_dataset`] →
//! [`charts::render_charts`] with a [`charts::ChartSink`] that either writes
//! image files or opens a viewer window. The [`sim`] module produces that
//! results file from a set of system parameters.

pub mod charts;
pub mod config;
pub mod data;
pub mod error;
#[cfg(feature = "viewer")]
pub mod gui;
pub mod sim;

pub use error::{Error, Result};

use tracing::info;

use crate::charts::{render_charts, ChartSink};
use crate::config::RenderConfig;
use crate::data::load_dataset;

/// Load `config.input` and present the three charts to `sink`.
///
/// The whole file is read and checked before the first chart is built, so a
/// load failure never leaves partial output behind.
pub fn plot(config: &RenderConfig, sink: &mut dyn ChartSink) -> Result<usize> {
    let dataset = load_dataset(&config.input)?;
    info!(
        path = %config.input.display(),
        rows = dataset.len(),
        "dataset loaded"
    );
    Ok(render_charts(&dataset, sink)?)
}
