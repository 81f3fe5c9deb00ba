//! Chart Viewer Widget
//! Draws one `Chart` with egui_plot: heading, line with legend, axis labels and grid.

use egui::{Color32, RichText};
use egui_plot::{Legend, Line, Plot, PlotPoints};

use crate::charts::{Chart, ChartColor};

const TITLE_SIZE: f32 = 20.0;

/// Stateless painter for a single chart.
pub struct ChartViewer;

impl ChartViewer {
    pub fn color(color: ChartColor) -> Color32 {
        let (r, g, b) = color.rgb();
        Color32::from_rgb(r, g, b)
    }

    pub fn show(ui: &mut egui::Ui, chart: &Chart) {
        ui.vertical_centered(|ui| {
            ui.label(RichText::new(chart.title).size(TITLE_SIZE).strong());
        });
        ui.add_space(6.0);

        let points: PlotPoints = chart.points.iter().map(|&(x, y)| [x, y]).collect();
        let line = Line::new(points)
            .color(Self::color(chart.color))
            .name(chart.legend);

        // Plot memory is keyed by id, so each quantity gets fresh bounds.
        Plot::new(chart.quantity.name())
            .x_axis_label(chart.x_label)
            .y_axis_label(chart.y_label)
            .legend(Legend::default())
            .show_grid(chart.grid)
            .show(ui, |plot_ui| {
                plot_ui.line(line);
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colors_map_to_rgb() {
        assert_eq!(ChartViewer::color(ChartColor::BLUE), Color32::from_rgb(0, 0, 255));
        assert_eq!(ChartViewer::color(ChartColor::GREEN), Color32::from_rgb(0, 128, 0));
    }
}
