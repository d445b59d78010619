//! Linear compartment-decay dynamics.
//!
//! A compartment model is a linear, autonomous ODE system `ds/dt = A s`
//! whose matrix `A` is assembled from a [`TransferGraph`]. Off-diagonal
//! entries are transfer rates between compartments; each diagonal entry is
//! the negated total outflow rate of its compartment.

mod crossing;
mod error;
mod graph;
mod integrate;

pub use crossing::{Crossing, CrossingConfig, CrossingError, CrossingSolution, crossing_time};
pub use error::CompartmentError;
pub use graph::{Target, TransferEdge, TransferGraph};
pub use integrate::{IntegrationConfig, Method, StatePoint, Trajectory, integrate};

/// Evaluates the time derivative of a linear compartment system.
///
/// The model precomputes per-compartment outflow rates and inflow lists from
/// its graph, so each evaluation is a single pass over the edges.
/// It holds no mutable state and can be shared freely across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct CompartmentModel {
    graph: TransferGraph,
    outflow: Vec<f64>,
    inflows: Vec<Vec<(usize, f64)>>,
}

impl CompartmentModel {
    /// Builds a model from a validated transfer graph.
    #[must_use]
    pub fn new(graph: TransferGraph) -> Self {
        let n = graph.len();
        let outflow = (0..n).map(|i| graph.outflow_rate(i)).collect();

        let mut inflows = vec![Vec::new(); n];
        for edge in graph.edges() {
            if let Target::Compartment(to) = edge.to {
                inflows[to].push((edge.from, edge.rate.get()));
            }
        }

        Self {
            graph,
            outflow,
            inflows,
        }
    }

    /// The graph this model was built from.
    #[must_use]
    pub fn graph(&self) -> &TransferGraph {
        &self.graph
    }

    /// Number of compartments.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.outflow.len()
    }

    /// Computes `ds/dt` for the given state.
    ///
    /// `time` is accepted for compatibility with time-stepping integrators
    /// and has no effect; the system is autonomous.
    ///
    /// States are evaluated as given. Negative quantities are not clamped.
    ///
    /// # Errors
    ///
    /// Returns [`CompartmentError::InvalidDimension`] if `state.len()` differs
    /// from the compartment count.
    pub fn evaluate(&self, time: f64, state: &[f64]) -> Result<Vec<f64>, CompartmentError> {
        let mut out = vec![0.0; self.dimension()];
        self.evaluate_into(time, state, &mut out)?;
        Ok(out)
    }

    /// Computes `ds/dt` into a caller-provided buffer.
    ///
    /// # Errors
    ///
    /// Returns [`CompartmentError::InvalidDimension`] if `state` or `out`
    /// does not have one entry per compartment.
    pub fn evaluate_into(
        &self,
        _time: f64,
        state: &[f64],
        out: &mut [f64],
    ) -> Result<(), CompartmentError> {
        CompartmentError::check_dimension(self.dimension(), state.len())?;
        CompartmentError::check_dimension(self.dimension(), out.len())?;
        self.apply(state, out);
        Ok(())
    }

    /// Unchecked evaluation for callers that validated dimensions up front.
    pub(crate) fn apply(&self, state: &[f64], out: &mut [f64]) {
        for (i, d) in out.iter_mut().enumerate() {
            let production: f64 = self.inflows[i]
                .iter()
                .map(|&(from, rate)| rate * state[from])
                .sum();
            *d = production - self.outflow[i] * state[i];
        }
    }

    /// Total outflow rate of compartment `index`, or zero if out of range.
    #[must_use]
    pub fn outflow_rate(&self, index: usize) -> f64 {
        self.outflow.get(index).copied().unwrap_or(0.0)
    }

    /// Combined rate of all edges from `from` into compartment `to`.
    #[must_use]
    pub fn inflow_rate(&self, from: usize, to: usize) -> f64 {
        self.inflows.get(to).map_or(0.0, |edges| {
            edges
                .iter()
                .filter(|&&(source, _)| source == from)
                .map(|&(_, rate)| rate)
                .sum()
        })
    }

    /// The constant Jacobian `A` of the system, row-major.
    ///
    /// Row `i` holds the coefficients of `ds_i/dt`, so that
    /// `evaluate(t, s)[i] == Σ_j A[i][j] * s[j]`.
    #[must_use]
    pub fn rate_matrix(&self) -> Vec<Vec<f64>> {
        let n = self.dimension();
        let mut a = vec![vec![0.0; n]; n];
        for (i, row) in a.iter_mut().enumerate() {
            for &(from, rate) in &self.inflows[i] {
                row[from] += rate;
            }
            row[i] -= self.outflow[i];
        }
        a
    }

    /// Total quantity held across all compartments.
    ///
    /// # Errors
    ///
    /// Returns [`CompartmentError::InvalidDimension`] on a length mismatch.
    pub fn total(&self, state: &[f64]) -> Result<f64, CompartmentError> {
        CompartmentError::check_dimension(self.dimension(), state.len())?;
        Ok(state.iter().sum())
    }
}

impl From<TransferGraph> for CompartmentModel {
    fn from(graph: TransferGraph) -> Self {
        Self::new(graph)
    }
}
