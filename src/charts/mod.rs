//! Charts module - Chart construction, rendering and presentation

mod plotter;
mod renderer;
mod sink;

pub use plotter::{
    figure_size, padded_range, Chart, ChartColor, ChartPlotter, ChartStyle, FIGURE_ASPECT,
    X_LABEL,
};
pub use renderer::{ImageFormat, RenderError, StaticChartRenderer};
pub use sink::{render_charts, ChartSink, ImageSink};
