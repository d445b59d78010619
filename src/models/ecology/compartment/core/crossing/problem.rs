//! Bisection formulation of a crossing-time search.

use std::convert::Infallible;

use twine_core::{EquationProblem, Model};

use crate::support::constraint::NonNegative;

use super::{
    super::{CompartmentError, CompartmentModel, IntegrationConfig, StatePoint, integrate},
    Crossing,
};

/// State and derivative reached at a candidate time.
#[derive(Debug, Clone)]
pub(super) struct Sample {
    pub(super) point: StatePoint,
    pub(super) derivative: Vec<f64>,
}

/// Model adapter mapping an absolute time to the integrated state at that time.
pub(super) struct TrajectoryModel<'a> {
    model: &'a CompartmentModel,
    start: &'a StatePoint,
    config: &'a IntegrationConfig,
}

impl<'a> TrajectoryModel<'a> {
    pub(super) fn new(
        model: &'a CompartmentModel,
        start: &'a StatePoint,
        config: &'a IntegrationConfig,
    ) -> Self {
        Self {
            model,
            start,
            config,
        }
    }
}

impl Model for TrajectoryModel<'_> {
    type Input = f64;
    type Output = Sample;
    type Error = CompartmentError;

    fn call(&self, time: &Self::Input) -> Result<Self::Output, Self::Error> {
        let elapsed = *time - self.start.time;
        let duration = NonNegative::new(elapsed)
            .map_err(|_| CompartmentError::InvalidDuration { duration: elapsed })?;

        let point = integrate::advance(self.model, self.start, duration, self.config)?;
        let derivative = self.model.evaluate(point.time, &point.state)?;

        Ok(Sample { point, derivative })
    }
}

/// Residual of one compartment against a [`Crossing`] target.
pub(super) struct CrossingProblem {
    compartment: usize,
    crossing: Crossing,
}

impl CrossingProblem {
    pub(super) fn new(compartment: usize, crossing: Crossing) -> Self {
        Self {
            compartment,
            crossing,
        }
    }
}

impl EquationProblem<1> for CrossingProblem {
    type Input = f64;
    type Output = Sample;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(x[0])
    }

    fn residuals(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        let c = self.compartment;
        Ok([match self.crossing {
            Crossing::Level(value) => output.point.state[c] - value,
            Crossing::Peak => output.derivative[c],
        }])
    }
}
