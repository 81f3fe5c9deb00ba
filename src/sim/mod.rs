//! Simulation module - system model, integrators and CSV export

mod export;
mod solver;
mod system;

pub use export::{write_parameters, write_results, ExportCause, ExportError};
pub use solver::{simulate, step_budget, time_step, Method, MAX_SAMPLES};
pub use system::{
    DampedResponse, DampingRegime, MassSpringDamper, ParameterError, ParameterRow,
    ParameterViolation, Parameters, SETTLING_FRACTION,
};
