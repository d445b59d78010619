//! Time at which a compartment reaches a level or peaks.
//!
//! Each candidate time is evaluated by integrating from the initial condition,
//! and bisection narrows a caller-provided bracket until the residual changes
//! sign within tolerance.

mod config;
mod error;
mod problem;

pub use config::CrossingConfig;
pub use error::CrossingError;

use tracing::{debug, trace};
use twine_solvers::equation::bisection;

use super::{CompartmentError, CompartmentModel, StatePoint};

use problem::{CrossingProblem, TrajectoryModel};

/// What a crossing search looks for in one compartment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Crossing {
    /// The compartment's quantity equals the given value.
    Level(f64),

    /// The compartment's rate of change is zero.
    Peak,
}

/// Result of a converged crossing search.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossingSolution {
    /// Time of the crossing.
    pub time: f64,

    /// Compartment quantities at the crossing.
    pub state: Vec<f64>,

    /// Rates of change at the crossing.
    pub derivative: Vec<f64>,

    /// Bisection iterations performed.
    pub iters: usize,
}

/// Finds when `compartment` meets the `crossing` condition within `bracket`.
///
/// The bracket is a pair of absolute times `[lo, hi]` with
/// `start.time <= lo < hi`. The residual must change sign between them.
///
/// # Errors
///
/// Returns [`CrossingError`] on invalid inputs, if the bracket does not
/// straddle a crossing, or if the solver fails to converge.
pub fn crossing_time(
    model: &CompartmentModel,
    start: &StatePoint,
    compartment: usize,
    crossing: Crossing,
    bracket: [f64; 2],
    config: &CrossingConfig,
) -> Result<CrossingSolution, CrossingError> {
    CompartmentError::check_dimension(model.dimension(), start.state.len())?;
    if compartment >= model.dimension() {
        return Err(CompartmentError::UnknownCompartment {
            index: compartment,
            count: model.dimension(),
        }
        .into());
    }

    let [lo, hi] = bracket;
    if !(lo.is_finite() && hi.is_finite() && start.time <= lo && lo < hi) {
        return Err(CrossingError::InvalidBracket {
            lo,
            hi,
            start: start.time,
        });
    }

    let trajectory = TrajectoryModel::new(model, start, &config.integration);
    let problem = CrossingProblem::new(compartment, crossing);

    let solution = bisection::solve(
        &trajectory,
        &problem,
        bracket,
        &config.bisection(),
        |event: &bisection::Event<'_, _, _>| {
            // Failed candidates are treated as a positive residual.
            if event.result().is_err() {
                trace!("crossing search: candidate integration failed");
                return Some(bisection::Action::assume_positive());
            }
            None
        },
    )?;

    debug!(
        compartment,
        ?crossing,
        iters = solution.iters,
        residual = solution.residual,
        "crossing search finished"
    );

    if solution.status != bisection::Status::Converged {
        return Err(CrossingError::MaxIters {
            residual: solution.residual,
            iters: solution.iters,
        });
    }

    let sample = solution.snapshot.output;
    Ok(CrossingSolution {
        time: sample.point.time,
        state: sample.point.state,
        derivative: sample.derivative,
        iters: solution.iters,
    })
}
