//! Linear compartment-decay models.
//!
//! This module provides a [`twine_core::Model`] implementation for systems of
//! pools exchanging material through first-order transfers. The topology is
//! plain data ([`TransferGraph`]), so any number of compartments can be
//! modeled without code changes.
//!
//! Beyond derivative evaluation, the module offers fixed-step integration
//! ([`integrate`]) and bisection-based event timing ([`crossing_time`]).

mod core;

pub use self::core::{
    CompartmentError, CompartmentModel, Crossing, CrossingConfig, CrossingError,
    CrossingSolution, IntegrationConfig, Method, StatePoint, Target, Trajectory, TransferEdge,
    TransferGraph, crossing_time, integrate,
};

use twine_core::Model;

/// Evaluates `ds/dt` at a [`StatePoint`].
impl Model for CompartmentModel {
    type Input = StatePoint;
    type Output = Vec<f64>;
    type Error = CompartmentError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.evaluate(input.time, &input.state)
    }
}
