//! End-to-end image output. plotters needs system fonts for text; without one
//! these return early.

mod common;

use msd_plot::charts::{render_charts, ImageFormat, ImageSink};
use msd_plot::config::RenderConfig;
use msd_plot::data::Quantity;
use msd_plot::sim::{simulate, write_results, MassSpringDamper, Method, Parameters};

fn results_file(dir: &std::path::Path) -> std::path::PathBuf {
    let system = MassSpringDamper::new(Parameters {
        mass: 1.0,
        damping: 0.4,
        stiffness: 4.0,
        x0: 1.0,
        v0: 0.0,
    })
    .unwrap();
    let path = dir.join("results.csv");
    write_results(&simulate(&system, Method::Rk4), &path).unwrap();
    path
}

#[test]
fn png_charts_have_figure_size() {
    if !common::has_system_font() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let config = RenderConfig {
        input: results_file(dir.path()),
        out_dir: dir.path().join("charts"),
        ..Default::default()
    };

    let mut sink =
        ImageSink::new(&config.out_dir, ImageFormat::Png, config.width).unwrap();
    assert_eq!(msd_plot::plot(&config, &mut sink).unwrap(), 3);

    assert_eq!(sink.written().len(), 3);
    for quantity in Quantity::ALL {
        let path = config.out_dir.join(format!("{}.png", quantity.name()));
        assert_eq!(image::image_dimensions(&path).unwrap(), (1000, 600));
    }
}

#[test]
fn svg_charts_carry_titles() {
    if !common::has_system_font() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let dataset = msd_plot::data::load_dataset(results_file(dir.path())).unwrap();
    let out = dir.path().join("svg");

    let mut sink = ImageSink::new(&out, ImageFormat::Svg, 800).unwrap();
    render_charts(&dataset, &mut sink).unwrap();

    let velocity = std::fs::read_to_string(out.join("velocity.svg")).unwrap();
    assert!(velocity.contains("Velocity vs Time"));
    assert!(velocity.contains("width=\"800\""));

    let position = std::fs::read_to_string(out.join("position.svg")).unwrap();
    assert!(position.contains("Mass-Spring-Damper System - Position vs Time"));
}
