//! GUI module - interactive chart window (feature `viewer`)

mod app;
mod chart_viewer;

pub use app::{ChartViewerApp, ViewerSink};
pub use chart_viewer::ChartViewer;
