//! Chart viewer window.
//! One native window that shows the collected charts one at a time.

use egui::{TopBottomPanel, ViewportCommand};
use tracing::{debug, info};

use crate::charts::{Chart, ChartSink, RenderError};
use crate::gui::ChartViewer;

const APP_NAME: &str = "msd-plot";
const WINDOW_SIZE: [f32; 2] = [1000.0, 600.0];

/// Shows `charts` in order. Closing the window, or pressing "Next", moves on;
/// the window really closes after the last chart.
pub struct ChartViewerApp {
    charts: Vec<Chart>,
    current: usize,
}

impl ChartViewerApp {
    pub fn new(charts: Vec<Chart>) -> Self {
        Self { charts, current: 0 }
    }

    pub fn current(&self) -> Option<&Chart> {
        self.charts.get(self.current)
    }

    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.charts.len()
    }

    /// Step to the next chart. Returns false when there is none.
    pub fn advance(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.current += 1;
        true
    }

    fn window_title(&self) -> String {
        match self.current() {
            Some(chart) => format!(
                "{} ({}/{})",
                chart.title,
                self.current + 1,
                self.charts.len()
            ),
            None => APP_NAME.to_string(),
        }
    }
}

impl eframe::App for ChartViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.viewport().close_requested()) && self.advance() {
            ctx.send_viewport_cmd(ViewportCommand::CancelClose);
            ctx.send_viewport_cmd(ViewportCommand::Title(self.window_title()));
            debug!(index = self.current, "viewer advanced on close");
        }

        TopBottomPanel::bottom("viewer_controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let label = if self.is_last() { "Close" } else { "Next" };
                if ui.button(label).clicked() {
                    if self.advance() {
                        ctx.send_viewport_cmd(ViewportCommand::Title(self.window_title()));
                    } else {
                        ctx.send_viewport_cmd(ViewportCommand::Close);
                    }
                }
                ui.label(format!("{}/{}", self.current + 1, self.charts.len().max(1)));
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.charts.get(self.current) {
            Some(chart) => ChartViewer::show(ui, chart),
            None => {
                ui.centered_and_justified(|ui| {
                    ui.label("No Data");
                });
            }
        });
    }
}

/// Interactive sink: collects charts, then blocks in one window until the
/// user has stepped through all of them.
///
/// eframe can only run its event loop once per process on some platforms, so
/// the window is opened in `finish` rather than once per chart.
#[derive(Default)]
pub struct ViewerSink {
    charts: Vec<Chart>,
}

impl ViewerSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.charts.len()
    }
}

impl ChartSink for ViewerSink {
    fn present(&mut self, chart: &Chart) -> Result<(), RenderError> {
        self.charts.push(chart.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<(), RenderError> {
        if self.charts.is_empty() {
            return Ok(());
        }

        let app = ChartViewerApp::new(std::mem::take(&mut self.charts));
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size(WINDOW_SIZE)
                .with_title(app.window_title()),
            ..Default::default()
        };

        info!("opening chart viewer");
        eframe::run_native(APP_NAME, options, Box::new(|_cc| Ok(Box::new(app))))
            .map_err(|e| RenderError::Viewer(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::ChartPlotter;
    use crate::data::{Dataset, Quantity, Sample};

    fn charts() -> Vec<Chart> {
        let ds = Dataset::from_samples([Sample {
            time: 0.0,
            position: 1.0,
            velocity: 0.0,
            acceleration: -4.0,
        }]);
        ChartPlotter::build_all(&ds)
    }

    #[test]
    fn test_advance_stops_at_last_chart() {
        let mut app = ChartViewerApp::new(charts());
        assert_eq!(app.current().unwrap().quantity, Quantity::Position);
        assert!(app.advance());
        assert!(app.advance());
        assert!(app.is_last());
        assert!(!app.advance());
        assert_eq!(app.current().unwrap().quantity, Quantity::Acceleration);
    }

    #[test]
    fn test_window_title_counts_charts() {
        let mut app = ChartViewerApp::new(charts());
        app.advance();
        assert_eq!(app.window_title(), "Velocity vs Time (2/3)");
    }

    #[test]
    fn test_sink_collects_without_opening() {
        let mut sink = ViewerSink::new();
        for chart in charts() {
            sink.present(&chart).unwrap();
        }
        assert_eq!(sink.pending(), 3);
    }
}
