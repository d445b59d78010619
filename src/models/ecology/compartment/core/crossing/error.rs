use thiserror::Error;
use twine_solvers::equation::bisection;

use super::super::CompartmentError;

/// Errors that can occur while searching for a crossing time.
#[derive(Debug, Error)]
pub enum CrossingError {
    /// The model rejected the inputs.
    #[error("compartment model error")]
    Model(#[from] CompartmentError),

    /// The bisection solver encountered an error.
    ///
    /// This includes brackets whose endpoints do not straddle the crossing.
    #[error("bisection solver error")]
    Bisection(#[from] bisection::Error),

    /// The bracket is not an increasing pair of finite times at or after the start.
    #[error("invalid bracket [{lo}, {hi}] for start time {start}")]
    InvalidBracket {
        /// Lower bracket time.
        lo: f64,

        /// Upper bracket time.
        hi: f64,

        /// Time of the initial condition.
        start: f64,
    },

    /// The solver reached the iteration limit without converging.
    #[error("solver hit iteration limit: residual={residual}")]
    MaxIters {
        /// Smallest absolute residual encountered.
        residual: f64,

        /// Iteration count performed by the solver.
        iters: usize,
    },
}
