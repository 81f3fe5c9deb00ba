//! msd-plot - Mass-spring-damper simulator and chart renderer
//!
//! `msd-plot` (or `msd-plot plot`) draws position, velocity and acceleration
//! charts from `results.csv`; `simulate` produces that file.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use msd_plot::charts::{ChartSink, ImageFormat, ImageSink};
use msd_plot::config::{RenderConfig, RenderOverrides};
use msd_plot::sim::{self, MassSpringDamper, Method, Parameters};

#[derive(Parser, Debug)]
#[command(name = "msd-plot", version)]
#[command(about = "Simulate a mass-spring-damper system and chart its response", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Draw the three charts from a results file (default)
    Plot(PlotArgs),
    /// Integrate the system and write results and parameter tables
    Simulate(SimulateArgs),
    /// Print the derived system properties
    Params(ParamsArgs),
}

#[derive(Args, Debug, Default)]
struct PlotArgs {
    /// Results file [default: results.csv]
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Directory for the chart images [default: .]
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Image format [default: png]
    #[arg(long, value_enum)]
    format: Option<ImageFormat>,

    /// Figure width in pixels [default: 1000]
    #[arg(long)]
    width: Option<u32>,

    /// Open each image after writing it
    #[arg(long)]
    open: bool,

    /// Show the charts in a window instead of writing files
    #[arg(long)]
    viewer: bool,

    /// JSON render settings
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct SystemArgs {
    /// Mass m (kg)
    #[arg(long, allow_negative_numbers = true)]
    mass: f64,

    /// Damping coefficient c (N·s/m)
    #[arg(long, allow_negative_numbers = true)]
    damping: f64,

    /// Spring constant k (N/m)
    #[arg(long, allow_negative_numbers = true)]
    stiffness: f64,

    /// Initial position x0 (m)
    #[arg(long, allow_negative_numbers = true)]
    x0: f64,

    /// Initial velocity v0 (m/s)
    #[arg(long, allow_negative_numbers = true)]
    v0: f64,
}

impl From<&SystemArgs> for Parameters {
    fn from(args: &SystemArgs) -> Self {
        Self {
            mass: args.mass,
            damping: args.damping,
            stiffness: args.stiffness,
            x0: args.x0,
            v0: args.v0,
        }
    }
}

#[derive(Args, Debug)]
struct SimulateArgs {
    #[command(flatten)]
    system: SystemArgs,

    #[arg(long, value_enum, default_value_t = Method::Rk4)]
    method: Method,

    /// Time-series output
    #[arg(long, default_value = "results.csv")]
    output: PathBuf,

    /// Parameter table output
    #[arg(long, default_value = "system_parameters.csv")]
    params_output: PathBuf,
}

#[derive(Args, Debug)]
struct ParamsArgs {
    #[command(flatten)]
    system: SystemArgs,

    /// Print the table as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_logging(cli.verbose, cli.log.as_deref()) {
        eprintln!("Error: {err:#}");
        return ExitCode::FAILURE;
    }

    match run(cli.command.unwrap_or(Command::Plot(PlotArgs::default()))) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8, log: Option<&Path>) -> Result<()> {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (writer, ansi) = match log {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        None => (BoxMakeWriter::new(std::io::stderr), true),
    };

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Plot(args) => run_plot(args),
        Command::Simulate(args) => run_simulate(args),
        Command::Params(args) => run_params(args),
    }
}

fn run_plot(args: PlotArgs) -> Result<()> {
    let overrides = RenderOverrides {
        input: args.input,
        out_dir: args.out_dir,
        format: args.format,
        width: args.width,
        open: args.open,
    };
    let config = RenderConfig::resolve(args.config.as_deref(), overrides)?;

    let mut sink = make_sink(&config, args.viewer)?;
    let charts = msd_plot::plot(&config, sink.as_mut())?;
    info!(charts, "done");
    Ok(())
}

#[cfg(feature = "viewer")]
fn make_sink(config: &RenderConfig, viewer: bool) -> Result<Box<dyn ChartSink>> {
    if viewer {
        return Ok(Box::new(msd_plot::gui::ViewerSink::new()));
    }
    image_sink(config)
}

#[cfg(not(feature = "viewer"))]
fn make_sink(config: &RenderConfig, viewer: bool) -> Result<Box<dyn ChartSink>> {
    if viewer {
        anyhow::bail!("--viewer requires msd-plot built with the `viewer` feature");
    }
    image_sink(config)
}

fn image_sink(config: &RenderConfig) -> Result<Box<dyn ChartSink>> {
    let sink = ImageSink::new(&config.out_dir, config.format, config.width)?
        .open_after_write(config.open);
    Ok(Box::new(sink))
}

fn run_simulate(args: SimulateArgs) -> Result<()> {
    let system = MassSpringDamper::new(Parameters::from(&args.system))?;
    info!(
        wn = system.natural_frequency(),
        zeta = system.damping_ratio(),
        regime = system.regime().label(),
        method = ?args.method,
        "simulating"
    );

    let dataset = sim::simulate(&system, args.method);
    sim::write_results(&dataset, &args.output)?;
    sim::write_parameters(&system, &args.params_output)?;

    println!(
        "Wrote {} samples to {} and parameters to {}",
        dataset.len(),
        args.output.display(),
        args.params_output.display()
    );
    Ok(())
}

fn run_params(args: ParamsArgs) -> Result<()> {
    let system = MassSpringDamper::new(Parameters::from(&args.system))?;
    let rows = system.report();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for row in &rows {
        println!(
            "{:<32} {:>14} {:<6} {}",
            row.name,
            row.value_text(),
            row.unit,
            row.observation
        );
    }
    Ok(())
}
