//! Chart Plotter Module
//! Builds backend-independent chart descriptions from a dataset.

use crate::data::{Dataset, Quantity};

/// Line colour as plain RGB so both plotters and egui can consume it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartColor(pub u8, pub u8, pub u8);

impl ChartColor {
    pub const BLUE: ChartColor = ChartColor(0, 0, 255);
    pub const RED: ChartColor = ChartColor(255, 0, 0);
    pub const GREEN: ChartColor = ChartColor(0, 128, 0);

    pub fn rgb(self) -> (u8, u8, u8) {
        (self.0, self.1, self.2)
    }
}

pub const X_LABEL: &str = "Time (s)";

/// Figure proportions, width × height.
pub const FIGURE_ASPECT: (u32, u32) = (10, 6);

/// Fraction of the data span added on each side of an axis.
const AXIS_MARGIN: f64 = 0.05;

/// Pixel size for a figure `width` pixels wide.
pub fn figure_size(width: u32) -> (u32, u32) {
    let height = u64::from(width) * u64::from(FIGURE_ASPECT.1) / u64::from(FIGURE_ASPECT.0);
    (width, height as u32)
}

/// Presentation attributes of one quantity's chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartStyle {
    pub title: &'static str,
    pub y_label: &'static str,
    pub legend: &'static str,
    pub color: ChartColor,
}

impl ChartStyle {
    pub fn for_quantity(quantity: Quantity) -> Self {
        match quantity {
            Quantity::Position => Self {
                title: "Mass-Spring-Damper System - Position vs Time",
                y_label: "Position (m)",
                legend: "Position (m)",
                color: ChartColor::BLUE,
            },
            Quantity::Velocity => Self {
                title: "Velocity vs Time",
                y_label: "Velocity (m/s)",
                legend: "Velocity (m/s)",
                color: ChartColor::RED,
            },
            Quantity::Acceleration => Self {
                title: "Acceleration vs Time",
                y_label: "Acceleration (m/s²)",
                legend: "Acceleration (m/s²)",
                color: ChartColor::GREEN,
            },
        }
    }
}

/// A single line chart, ready to hand to a sink. Holds no state across charts.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub quantity: Quantity,
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub legend: &'static str,
    pub color: ChartColor,
    pub grid: bool,
    /// `(time, value)` pairs in dataset row order.
    pub points: Vec<(f64, f64)>,
}

impl Chart {
    pub fn x_values(&self) -> Vec<f64> {
        self.points.iter().map(|&(x, _)| x).collect()
    }

    pub fn y_values(&self) -> Vec<f64> {
        self.points.iter().map(|&(_, y)| y).collect()
    }

    pub fn x_range(&self) -> (f64, f64) {
        padded_range(self.points.iter().map(|&(x, _)| x))
    }

    pub fn y_range(&self) -> (f64, f64) {
        padded_range(self.points.iter().map(|&(_, y)| y))
    }
}

/// Creates chart descriptions for each plotted quantity.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Pair the time column with one quantity's column.
    pub fn build(dataset: &Dataset, quantity: Quantity) -> Chart {
        let style = ChartStyle::for_quantity(quantity);
        let points = dataset
            .time()
            .iter()
            .copied()
            .zip(dataset.series(quantity).iter().copied())
            .collect();

        Chart {
            quantity,
            title: style.title,
            x_label: X_LABEL,
            y_label: style.y_label,
            legend: style.legend,
            color: style.color,
            grid: true,
            points,
        }
    }

    /// Position, velocity and acceleration charts, in that order.
    pub fn build_all(dataset: &Dataset) -> Vec<Chart> {
        Quantity::ALL
            .iter()
            .map(|&q| Self::build(dataset, q))
            .collect()
    }
}

/// Axis bounds covering all finite values plus a 5% margin each side.
///
/// Empty input yields `0..1`; a single distinct value is widened by 0.5.
pub fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if min > max {
        return (0.0, 1.0);
    }
    if min == max {
        return (min - 0.5, max + 0.5);
    }
    let pad = (max - min) * AXIS_MARGIN;
    (min - pad, max + pad)
}
