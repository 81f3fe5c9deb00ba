//! Chart destinations and the straight-line render sequence.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::charts::{Chart, ChartPlotter, ImageFormat, RenderError, StaticChartRenderer};
use crate::data::{Dataset, Quantity};

/// Somewhere a chart is shown.
///
/// `present` receives each chart in order and may show it at once or keep it;
/// `finish` is the last call and is where a collecting sink shows what it kept.
/// An error from either stops the sequence.
pub trait ChartSink {
    fn present(&mut self, chart: &Chart) -> Result<(), RenderError>;

    /// Called once after the last chart.
    fn finish(&mut self) -> Result<(), RenderError> {
        Ok(())
    }
}

/// Build and present position, velocity and acceleration charts in order.
///
/// Returns the number of charts presented.
pub fn render_charts(dataset: &Dataset, sink: &mut dyn ChartSink) -> Result<usize, RenderError> {
    if dataset.is_empty() {
        warn!("dataset has no rows, charts will be empty");
    }

    for quantity in Quantity::ALL {
        let chart = ChartPlotter::build(dataset, quantity);
        sink.present(&chart)?;
    }
    sink.finish()?;

    Ok(Quantity::ALL.len())
}

/// Headless sink: writes each chart to `<out_dir>/<quantity>.<ext>`.
pub struct ImageSink {
    out_dir: PathBuf,
    format: ImageFormat,
    width: u32,
    open_after: bool,
    written: Vec<PathBuf>,
}

impl ImageSink {
    /// Creates `out_dir` if it does not exist.
    pub fn new(
        out_dir: impl Into<PathBuf>,
        format: ImageFormat,
        width: u32,
    ) -> Result<Self, RenderError> {
        let out_dir = out_dir.into();
        fs::create_dir_all(&out_dir).map_err(|source| RenderError::OutputDir {
            path: out_dir.clone(),
            source,
        })?;

        Ok(Self {
            out_dir,
            format,
            width,
            open_after: false,
            written: Vec::new(),
        })
    }

    /// Hand each written file to the system's default viewer.
    pub fn open_after_write(mut self, open: bool) -> Self {
        self.open_after = open;
        self
    }

    /// Where the chart for `quantity` is written.
    pub fn path_for(&self, quantity: Quantity) -> PathBuf {
        self.out_dir
            .join(format!("{}.{}", quantity.name(), self.format.extension()))
    }

    /// Files written so far, in presentation order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }
}

impl ChartSink for ImageSink {
    fn present(&mut self, chart: &Chart) -> Result<(), RenderError> {
        let path = self.path_for(chart.quantity);
        StaticChartRenderer::render_to_file(chart, &path, self.format, self.width)?;
        info!(
            chart = chart.quantity.name(),
            points = chart.points.len(),
            path = %path.display(),
            "chart written"
        );

        if self.open_after {
            if let Err(e) = open::that(&path) {
                warn!(path = %path.display(), error = %e, "could not open chart viewer");
            }
        }

        self.written.push(path);
        Ok(())
    }
}
