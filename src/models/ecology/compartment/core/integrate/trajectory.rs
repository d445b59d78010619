/// A state vector at a single point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct StatePoint {
    /// The independent variable.
    pub time: f64,

    /// Compartment quantities, in graph order.
    pub state: Vec<f64>,
}

impl StatePoint {
    /// Creates a point from a time and a state.
    pub fn new(time: f64, state: impl Into<Vec<f64>>) -> Self {
        Self {
            time,
            state: state.into(),
        }
    }
}

/// An ordered sequence of integrated states.
///
/// The first point is always the initial condition.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Trajectory {
    points: Vec<StatePoint>,
}

impl Trajectory {
    pub(super) fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    pub(super) fn push(&mut self, point: StatePoint) {
        self.points.push(point);
    }

    /// All points in time order.
    #[must_use]
    pub fn points(&self) -> &[StatePoint] {
        &self.points
    }

    /// Consumes the trajectory and returns its points.
    #[must_use]
    pub fn into_points(self) -> Vec<StatePoint> {
        self.points
    }

    /// Number of points, including the initial condition.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if the trajectory holds no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The final point reached.
    #[must_use]
    pub fn last(&self) -> Option<&StatePoint> {
        self.points.last()
    }

    /// Sample times.
    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.time)
    }

    /// Quantity of one compartment at every sample.
    ///
    /// Returns `None` if `compartment` is out of range.
    #[must_use]
    pub fn series(&self, compartment: usize) -> Option<Vec<f64>> {
        self.points
            .iter()
            .map(|p| p.state.get(compartment).copied())
            .collect()
    }

    /// Total quantity across compartments at every sample.
    #[must_use]
    pub fn totals(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.state.iter().sum()).collect()
    }
}
