//! Static Chart Renderer
//! Draws a `Chart` to a PNG or SVG file with plotters.
//!
//! Layout per figure:
//! 1. Title centered above the plot area
//! 2. Line series with a boxed legend in the upper right
//! 3. Grid at the major ticks, axis descriptions on both axes
//!
//! Margins and label areas scale with the figure width so labels are not clipped.

use std::path::Path;

use clap::ValueEnum;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{FontDesc, FontFamily, FontStyle};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::charts::{figure_size, Chart};

/// Reference width the base sizes below are tuned for.
const BASE_WIDTH: f64 = 1000.0;

const TITLE_PX: f64 = 24.0;
const LABEL_PX: f64 = 16.0;
const MARGIN_PX: f64 = 20.0;
const LEFT_AREA_PX: f64 = 80.0;
const BOTTOM_AREA_PX: f64 = 60.0;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to draw chart '{title}': {reason}")]
    Drawing { title: String, reason: String },
    #[error("Failed to create output directory {}", .path.display())]
    OutputDir {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Chart viewer failed: {0}")]
    Viewer(String),
}

impl RenderError {
    fn drawing(title: &str, reason: impl ToString) -> Self {
        Self::Drawing {
            title: title.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Output image format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
    Svg,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render `chart` into `path`, `width` pixels wide with a 5:3 aspect ratio.
    pub fn render_to_file(
        chart: &Chart,
        path: &Path,
        format: ImageFormat,
        width: u32,
    ) -> Result<(), RenderError> {
        let size = figure_size(width);
        let scale = width as f64 / BASE_WIDTH;

        match format {
            ImageFormat::Png => {
                let root = BitMapBackend::new(path, size).into_drawing_area();
                Self::draw(root, chart, scale)
            }
            ImageFormat::Svg => {
                let root = SVGBackend::new(path, size).into_drawing_area();
                Self::draw(root, chart, scale)
            }
        }
    }

    fn draw<DB>(
        root: DrawingArea<DB, Shift>,
        chart: &Chart,
        scale: f64,
    ) -> Result<(), RenderError>
    where
        DB: DrawingBackend,
    {
        let fail = |e: DrawingAreaErrorKind<DB::ErrorType>| RenderError::drawing(chart.title, e);
        let px = |base: f64| (base * scale).round().max(1.0);

        root.fill(&WHITE).map_err(fail)?;

        let (x_min, x_max) = chart.x_range();
        let (y_min, y_max) = chart.y_range();

        let mut ctx = ChartBuilder::on(&root)
            .caption(chart.title, ("sans-serif", px(TITLE_PX)).into_font())
            .margin(px(MARGIN_PX) as i32)
            .set_label_area_size(LabelAreaPosition::Left, px(LEFT_AREA_PX) as i32)
            .set_label_area_size(LabelAreaPosition::Bottom, px(BOTTOM_AREA_PX) as i32)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(fail)?;

        let label_font = FontDesc::new(FontFamily::SansSerif, px(LABEL_PX), FontStyle::Normal);

        let mut mesh = ctx.configure_mesh();
        mesh.x_desc(chart.x_label)
            .y_desc(chart.y_label)
            .label_style(label_font.clone())
            .axis_desc_style(label_font.clone())
            .bold_line_style(&BLACK.mix(0.15))
            .light_line_style(&WHITE.mix(0.0));
        if !chart.grid {
            mesh.disable_mesh();
        }
        mesh.draw().map_err(fail)?;

        let (r, g, b) = chart.color.rgb();
        let color = RGBColor(r, g, b);
        let stroke = px(2.0) as u32;

        ctx.draw_series(LineSeries::new(
            chart.points.iter().copied(),
            color.stroke_width(stroke),
        ))
        .map_err(fail)?
        .label(chart.legend)
        .legend(move |(x, y)| {
            PathElement::new(vec![(x, y), (x + 24, y)], color.stroke_width(stroke))
        });

        ctx.configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK.mix(0.3))
            .label_font(label_font)
            .draw()
            .map_err(fail)?;

        root.present().map_err(fail)?;
        Ok(())
    }
}
