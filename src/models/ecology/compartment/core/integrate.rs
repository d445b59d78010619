//! Fixed-step time integration of compartment models.

mod method;
mod trajectory;

pub use method::Method;
pub use trajectory::{StatePoint, Trajectory};

use tracing::debug;

use crate::support::constraint::{Constrained, NonNegative, StrictlyPositive};

use super::{CompartmentError, CompartmentModel};

/// Integration settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegrationConfig {
    /// Largest allowed step.
    ///
    /// The actual step is shrunk so the requested duration is covered by a
    /// whole number of equal steps.
    pub step: Constrained<f64, StrictlyPositive>,

    /// Integration scheme.
    pub method: Method,

    /// Upper bound on the number of steps in one integration.
    pub max_steps: usize,
}

impl Default for IntegrationConfig {
    fn default() -> Self {
        Self {
            step: Constrained::new_unchecked(1e-3),
            method: Method::default(),
            max_steps: 10_000_000,
        }
    }
}

impl IntegrationConfig {
    /// Number of equal steps covering `duration`, and their size.
    fn steps(&self, duration: f64) -> Result<(usize, f64), CompartmentError> {
        if duration == 0.0 {
            return Ok((0, 0.0));
        }

        let requested = (duration / self.step.get()).ceil().max(1.0);
        #[allow(clippy::cast_precision_loss)]
        let limit = self.max_steps as f64;
        if !(requested <= limit) {
            return Err(CompartmentError::TooManySteps {
                requested,
                max_steps: self.max_steps,
            });
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let n = requested as usize;
        #[allow(clippy::cast_precision_loss)]
        let dt = duration / n as f64;
        Ok((n, dt))
    }
}

/// Integrates a model forward from `start` for `duration` time units.
///
/// The returned trajectory holds the initial point followed by one point per
/// step. Its final point lies exactly at `start.time + duration`.
///
/// # Errors
///
/// Returns [`CompartmentError::InvalidDimension`] if the start state does not
/// match the model, [`CompartmentError::InvalidDuration`] for an infinite
/// horizon, or [`CompartmentError::TooManySteps`] if covering the horizon
/// would exceed `config.max_steps`.
pub fn integrate(
    model: &CompartmentModel,
    start: &StatePoint,
    duration: Constrained<f64, NonNegative>,
    config: &IntegrationConfig,
) -> Result<Trajectory, CompartmentError> {
    let (n, dt) = plan(model, start, duration, config)?;

    let mut trajectory = Trajectory::with_capacity(n.saturating_add(1));
    trajectory.push(start.clone());

    march(model, start, n, dt, duration.get(), config.method, |point| {
        trajectory.push(point);
    });

    Ok(trajectory)
}

/// Integrates to `start.time + duration` and returns only the final point.
pub(super) fn advance(
    model: &CompartmentModel,
    start: &StatePoint,
    duration: Constrained<f64, NonNegative>,
    config: &IntegrationConfig,
) -> Result<StatePoint, CompartmentError> {
    let (n, dt) = plan(model, start, duration, config)?;

    let mut last = start.clone();
    march(model, start, n, dt, duration.get(), config.method, |point| last = point);

    Ok(last)
}

fn plan(
    model: &CompartmentModel,
    start: &StatePoint,
    duration: Constrained<f64, NonNegative>,
    config: &IntegrationConfig,
) -> Result<(usize, f64), CompartmentError> {
    CompartmentError::check_dimension(model.dimension(), start.state.len())?;

    let duration = duration.into_inner();
    if !duration.is_finite() {
        return Err(CompartmentError::InvalidDuration { duration });
    }

    let (n, dt) = config.steps(duration)?;
    debug!(
        steps = n,
        dt,
        method = ?config.method,
        compartments = model.dimension(),
        "integrating compartment model"
    );
    Ok((n, dt))
}

fn march(
    model: &CompartmentModel,
    start: &StatePoint,
    n: usize,
    dt: f64,
    duration: f64,
    method: Method,
    mut visit: impl FnMut(StatePoint),
) {
    let mut stepper = method.stepper(model.dimension());
    let mut state = start.state.clone();

    for k in 1..=n {
        stepper.step(model, &mut state, dt);
        #[allow(clippy::cast_precision_loss)]
        let elapsed = if k == n { duration } else { dt * k as f64 };
        visit(StatePoint::new(start.time + elapsed, state.clone()));
    }
}
