//! Column-oriented time series of a mass-spring-damper run.

pub const TIME_COLUMN: &str = "time(s)";
pub const POSITION_COLUMN: &str = "position(m)";
pub const VELOCITY_COLUMN: &str = "velocity(m/s)";
pub const ACCELERATION_COLUMN: &str = "acceleration(m/s^2)";

/// Columns every results file must carry, in file-header order.
pub const REQUIRED_COLUMNS: [&str; 4] = [
    TIME_COLUMN,
    POSITION_COLUMN,
    VELOCITY_COLUMN,
    ACCELERATION_COLUMN,
];

/// Physical quantity plotted against time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantity {
    Position,
    Velocity,
    Acceleration,
}

impl Quantity {
    /// Chart order: position, velocity, acceleration.
    pub const ALL: [Quantity; 3] = [
        Quantity::Position,
        Quantity::Velocity,
        Quantity::Acceleration,
    ];

    /// Name of the CSV column holding this quantity.
    pub fn column(self) -> &'static str {
        match self {
            Quantity::Position => POSITION_COLUMN,
            Quantity::Velocity => VELOCITY_COLUMN,
            Quantity::Acceleration => ACCELERATION_COLUMN,
        }
    }

    /// Short lowercase name, used for output file stems and log fields.
    pub fn name(self) -> &'static str {
        match self {
            Quantity::Position => "position",
            Quantity::Velocity => "velocity",
            Quantity::Acceleration => "acceleration",
        }
    }
}

/// One integrator output row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub time: f64,
    pub position: f64,
    pub velocity: f64,
    pub acceleration: f64,
}

/// Immutable, ordered dataset. All four columns always have the same length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    time: Vec<f64>,
    position: Vec<f64>,
    velocity: Vec<f64>,
    acceleration: Vec<f64>,
}

impl Dataset {
    /// Build from already-extracted columns. Callers guarantee equal lengths.
    pub(crate) fn from_columns(
        time: Vec<f64>,
        position: Vec<f64>,
        velocity: Vec<f64>,
        acceleration: Vec<f64>,
    ) -> Self {
        debug_assert!(
            position.len() == time.len()
                && velocity.len() == time.len()
                && acceleration.len() == time.len()
        );
        Self {
            time,
            position,
            velocity,
            acceleration,
        }
    }

    /// Build from rows in order.
    pub fn from_samples<I: IntoIterator<Item = Sample>>(samples: I) -> Self {
        let mut dataset = Self::default();
        for sample in samples {
            dataset.push(sample);
        }
        dataset
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            time: Vec::with_capacity(capacity),
            position: Vec::with_capacity(capacity),
            velocity: Vec::with_capacity(capacity),
            acceleration: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, sample: Sample) {
        self.time.push(sample.time);
        self.position.push(sample.position);
        self.velocity.push(sample.velocity);
        self.acceleration.push(sample.acceleration);
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn position(&self) -> &[f64] {
        &self.position
    }

    pub fn velocity(&self) -> &[f64] {
        &self.velocity
    }

    pub fn acceleration(&self) -> &[f64] {
        &self.acceleration
    }

    /// Values of one quantity, in row order.
    pub fn series(&self, quantity: Quantity) -> &[f64] {
        match quantity {
            Quantity::Position => &self.position,
            Quantity::Velocity => &self.velocity,
            Quantity::Acceleration => &self.acceleration,
        }
    }

    /// Row `index`, if present.
    pub fn sample(&self, index: usize) -> Option<Sample> {
        Some(Sample {
            time: *self.time.get(index)?,
            position: *self.position.get(index)?,
            velocity: *self.velocity.get(index)?,
            acceleration: *self.acceleration.get(index)?,
        })
    }

    /// Last row, if any.
    pub fn last(&self) -> Option<Sample> {
        self.len().checked_sub(1).and_then(|i| self.sample(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(time: f64, position: f64, velocity: f64, acceleration: f64) -> Sample {
        Sample {
            time,
            position,
            velocity,
            acceleration,
        }
    }

    #[test]
    fn test_series_follow_row_order() {
        let ds = Dataset::from_samples([
            sample(0.0, 0.0, 0.0, 0.0),
            sample(1.0, 0.5, 1.0, -2.0),
            sample(2.0, 0.8, 0.3, -3.1),
        ]);

        assert_eq!(ds.len(), 3);
        assert_eq!(ds.time(), &[0.0, 1.0, 2.0]);
        assert_eq!(ds.series(Quantity::Position), &[0.0, 0.5, 0.8]);
        assert_eq!(ds.series(Quantity::Velocity), &[0.0, 1.0, 0.3]);
        assert_eq!(ds.series(Quantity::Acceleration), &[0.0, -2.0, -3.1]);
        assert_eq!(ds.last(), Some(sample(2.0, 0.8, 0.3, -3.1)));
    }

    #[test]
    fn test_empty_dataset() {
        let ds = Dataset::default();
        assert!(ds.is_empty());
        assert_eq!(ds.last(), None);
        assert_eq!(ds.sample(0), None);
    }

    #[test]
    fn test_quantity_columns_are_required_columns() {
        for q in Quantity::ALL {
            assert!(REQUIRED_COLUMNS.contains(&q.column()));
        }
        assert_eq!(REQUIRED_COLUMNS[0], TIME_COLUMN);
    }
}
