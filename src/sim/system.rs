//! Mass-spring-damper system model.
//! Validates the five inputs and computes the derived physical properties once.

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Amplitude fraction that defines the settling time.
pub const SETTLING_FRACTION: f64 = 0.02;

/// User inputs of a system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    /// Mass `m` (kg).
    pub mass: f64,
    /// Damping coefficient `c` (N·s/m).
    pub damping: f64,
    /// Spring constant `k` (N/m).
    pub stiffness: f64,
    /// Initial position `x0` (m).
    pub x0: f64,
    /// Initial velocity `v0` (m/s).
    pub v0: f64,
}

/// One input outside its accepted range.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterViolation {
    pub name: &'static str,
    pub value: f64,
    pub expected: &'static str,
}

impl fmt::Display for ParameterViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {} (expected {})", self.name, self.value, self.expected)
    }
}

#[derive(Debug, Error)]
#[error("Invalid system parameters: {}", join_violations(.violations))]
pub struct ParameterError {
    pub violations: Vec<ParameterViolation>,
}

fn join_violations(violations: &[ParameterViolation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

impl Parameters {
    /// Every range violation, in input order. Non-finite values always violate.
    pub fn violations(&self) -> Vec<ParameterViolation> {
        let checks: [(&'static str, f64, bool, &'static str); 5] = [
            (
                "mass",
                self.mass,
                self.mass > 1e-6 && self.mass < 1e3,
                "1e-6 < m < 1e3",
            ),
            (
                "damping",
                self.damping,
                self.damping > 0.0 && self.damping <= 1e5,
                "0 < c <= 1e5",
            ),
            (
                "stiffness",
                self.stiffness,
                self.stiffness > 0.0 && self.stiffness <= 1e7,
                "0 < k <= 1e7",
            ),
            ("x0", self.x0, self.x0.abs() <= 5.0, "|x0| <= 5"),
            ("v0", self.v0, self.v0.abs() <= 20.0, "|v0| <= 20"),
        ];

        checks
            .into_iter()
            .filter(|&(_, value, ok, _)| !ok || !value.is_finite())
            .map(|(name, value, _, expected)| ParameterViolation {
                name,
                value,
                expected,
            })
            .collect()
    }
}

/// Damping regime, decided by the damping ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DampingRegime {
    Underdamped,
    CriticallyDamped,
    Overdamped,
}

impl DampingRegime {
    pub fn from_zeta(zeta: f64) -> Self {
        if zeta < 1.0 {
            DampingRegime::Underdamped
        } else if zeta == 1.0 {
            DampingRegime::CriticallyDamped
        } else {
            DampingRegime::Overdamped
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DampingRegime::Underdamped => "Underdamped system",
            DampingRegime::CriticallyDamped => "Critically damped system",
            DampingRegime::Overdamped => "Overdamped system",
        }
    }
}

/// Oscillation properties, only defined for underdamped systems.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DampedResponse {
    /// Damped frequency `wd` (rad/s).
    pub frequency: f64,
    /// Damped period `Td` (s).
    pub period: f64,
    /// Overshoot `Mp` (%).
    pub overshoot_pct: f64,
    /// Logarithmic decrement `delta`.
    pub log_decrement: f64,
}

/// A validated system with its derived properties.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MassSpringDamper {
    params: Parameters,
    natural_frequency: f64,
    natural_period: f64,
    critical_damping: f64,
    damping_ratio: f64,
    settling_time: f64,
}

impl MassSpringDamper {
    pub fn new(params: Parameters) -> Result<Self, ParameterError> {
        let violations = params.violations();
        if !violations.is_empty() {
            return Err(ParameterError { violations });
        }

        let natural_frequency = (params.stiffness / params.mass).sqrt();
        let critical_damping = 2.0 * (params.stiffness * params.mass).sqrt();
        let damping_ratio = params.damping / critical_damping;

        Ok(Self {
            params,
            natural_frequency,
            natural_period: 2.0 * PI / natural_frequency,
            critical_damping,
            damping_ratio,
            settling_time: 4.0 / (damping_ratio * natural_frequency),
        })
    }

    pub fn parameters(&self) -> &Parameters {
        &self.params
    }

    /// `wn` (rad/s).
    pub fn natural_frequency(&self) -> f64 {
        self.natural_frequency
    }

    /// `T` (s).
    pub fn natural_period(&self) -> f64 {
        self.natural_period
    }

    /// `c_crit` (N·s/m).
    pub fn critical_damping(&self) -> f64 {
        self.critical_damping
    }

    /// `zeta`.
    pub fn damping_ratio(&self) -> f64 {
        self.damping_ratio
    }

    /// 2% settling time `Ts` (s).
    pub fn settling_time(&self) -> f64 {
        self.settling_time
    }

    pub fn regime(&self) -> DampingRegime {
        DampingRegime::from_zeta(self.damping_ratio)
    }

    pub fn damped_response(&self) -> Option<DampedResponse> {
        if self.regime() != DampingRegime::Underdamped {
            return None;
        }

        let zeta = self.damping_ratio;
        let root = (1.0 - zeta * zeta).sqrt();
        let frequency = self.natural_frequency * root;
        Some(DampedResponse {
            frequency,
            period: 2.0 * PI / frequency,
            overshoot_pct: 100.0 * (-zeta * PI / root).exp(),
            log_decrement: 2.0 * PI * zeta / root,
        })
    }

    /// `a = -(c/m)·v - (k/m)·x`
    pub fn acceleration(&self, position: f64, velocity: f64) -> f64 {
        let p = &self.params;
        -(p.damping / p.mass) * velocity - (p.stiffness / p.mass) * position
    }

    /// Human-readable parameter table, inputs first, then derived values.
    pub fn report(&self) -> Vec<ParameterRow> {
        let p = &self.params;
        let mut rows = vec![
            ParameterRow::value("Mass (m)", p.mass, "kg"),
            ParameterRow::value("Damping coefficient (c)", p.damping, "N·s/m"),
            ParameterRow::value("Spring constant (k)", p.stiffness, "N/m"),
            ParameterRow::value("Initial position (x0)", p.x0, "m"),
            ParameterRow::value("Initial velocity (v0)", p.v0, "m/s"),
            ParameterRow::value("Natural frequency (wn)", self.natural_frequency, "rad/s"),
            ParameterRow::value("Natural period (T)", self.natural_period, "s"),
            ParameterRow::value("Critical damping (c_crit)", self.critical_damping, "N·s/m"),
            ParameterRow::value("Damping ratio (zeta)", self.damping_ratio, "-")
                .with_observation(self.regime().label()),
            ParameterRow::value("Settling time (2%)", self.settling_time, "s"),
        ];

        match self.damped_response() {
            Some(d) => rows.extend([
                ParameterRow::value("Damped frequency (wd)", d.frequency, "rad/s"),
                ParameterRow::value("Damped period (Td)", d.period, "s"),
                ParameterRow::value("Overshoot (Mp)", d.overshoot_pct, "%"),
                ParameterRow::value("Logarithmic decrement (delta)", d.log_decrement, "-"),
            ]),
            None => rows.extend([
                ParameterRow::not_applicable("Damped frequency (wd)"),
                ParameterRow::not_applicable("Damped period (Td)"),
                ParameterRow::value("Overshoot (Mp)", 0.0, "%")
                    .with_observation("No oscillation"),
                ParameterRow::not_applicable("Logarithmic decrement (delta)"),
            ]),
        }

        rows
    }
}

/// A line of the parameter table. `value` is `None` when not applicable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterRow {
    pub name: &'static str,
    pub value: Option<f64>,
    pub unit: &'static str,
    pub observation: &'static str,
}

impl ParameterRow {
    fn value(name: &'static str, value: f64, unit: &'static str) -> Self {
        Self {
            name,
            value: Some(value),
            unit,
            observation: "",
        }
    }

    fn not_applicable(name: &'static str) -> Self {
        Self {
            name,
            value: None,
            unit: "",
            observation: "Not applicable",
        }
    }

    fn with_observation(mut self, observation: &'static str) -> Self {
        self.observation = observation;
        self
    }

    /// Value as printed in tables and CSV: the number, or `N/A`.
    pub fn value_text(&self) -> String {
        match self.value {
            Some(v) => v.to_string(),
            None => "N/A".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn params(mass: f64, damping: f64, stiffness: f64) -> Parameters {
        Parameters {
            mass,
            damping,
            stiffness,
            x0: 1.0,
            v0: 0.0,
        }
    }

    #[test]
    fn test_derived_properties() {
        let s = MassSpringDamper::new(params(1.0, 0.4, 4.0)).unwrap();

        assert_relative_eq!(s.natural_frequency(), 2.0);
        assert_relative_eq!(s.natural_period(), PI);
        assert_relative_eq!(s.critical_damping(), 4.0);
        assert_relative_eq!(s.damping_ratio(), 0.1);
        assert_relative_eq!(s.settling_time(), 20.0);
        assert_eq!(s.regime(), DampingRegime::Underdamped);

        let d = s.damped_response().unwrap();
        let root = (1.0f64 - 0.01).sqrt();
        assert_relative_eq!(d.frequency, 2.0 * root);
        assert_relative_eq!(d.period, PI / root);
        assert_relative_eq!(d.overshoot_pct, 100.0 * (-0.1 * PI / root).exp());
        assert_relative_eq!(d.log_decrement, 0.2 * PI / root);
    }

    #[test]
    fn test_regimes() {
        assert_eq!(
            MassSpringDamper::new(params(1.0, 4.0, 4.0)).unwrap().regime(),
            DampingRegime::CriticallyDamped
        );
        let over = MassSpringDamper::new(params(1.0, 10.0, 4.0)).unwrap();
        assert_eq!(over.regime(), DampingRegime::Overdamped);
        assert!(over.damped_response().is_none());
    }

    #[test]
    fn test_all_violations_reported() {
        let err = MassSpringDamper::new(Parameters {
            mass: 0.0,
            damping: -1.0,
            stiffness: 2e7,
            x0: 6.0,
            v0: -21.0,
        })
        .unwrap_err();

        let names: Vec<&str> = err.violations.iter().map(|v| v.name).collect();
        assert_eq!(names, vec!["mass", "damping", "stiffness", "x0", "v0"]);
        assert!(err.to_string().contains("mass = 0 (expected 1e-6 < m < 1e3)"));
    }

    #[test]
    fn test_bounds_are_inclusive_where_expected() {
        let edge = Parameters {
            mass: 999.0,
            damping: 1e5,
            stiffness: 1e7,
            x0: -5.0,
            v0: 20.0,
        };
        assert!(edge.violations().is_empty());

        let zero_damping = params(1.0, 0.0, 1.0);
        assert_eq!(zero_damping.violations().len(), 1);

        let nan_mass = params(f64::NAN, 1.0, 1.0);
        assert_eq!(nan_mass.violations()[0].name, "mass");
    }

    #[test]
    fn test_acceleration_model() {
        let s = MassSpringDamper::new(params(2.0, 1.0, 8.0)).unwrap();
        assert_relative_eq!(s.acceleration(1.0, 2.0), -(0.5 * 2.0) - 4.0);
    }

    #[test]
    fn test_report_rows() {
        let under = MassSpringDamper::new(params(1.0, 0.4, 4.0)).unwrap().report();
        assert_eq!(under.len(), 14);
        assert_eq!(under[8].observation, "Underdamped system");
        assert!(under.iter().all(|r| r.value.is_some()));

        let over = MassSpringDamper::new(params(1.0, 10.0, 4.0)).unwrap().report();
        assert_eq!(over.len(), 14);
        assert_eq!(over[10].value_text(), "N/A");
        assert_eq!(over[10].observation, "Not applicable");
        assert_eq!(over[12].value, Some(0.0));
        assert_eq!(over[12].observation, "No oscillation");
    }
}
