use thiserror::Error;

use crate::support::constraint::ConstraintError;

use super::Target;

/// Errors raised while building or evaluating a compartment model.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompartmentError {
    /// A state or output buffer does not match the compartment count.
    #[error("expected {expected} compartments, got {actual}")]
    InvalidDimension {
        /// Number of compartments declared by the graph.
        expected: usize,

        /// Length of the offending slice.
        actual: usize,
    },

    /// A transfer rate constant failed validation.
    ///
    /// Rates must be finite and non-negative.
    #[error("invalid rate on edge {from} -> {to}: {error}")]
    InvalidParameter {
        /// Source compartment index.
        from: usize,

        /// Edge target.
        to: Target,

        /// The violated constraint.
        error: ConstraintError,
    },

    /// An edge references a compartment the graph does not declare.
    #[error("compartment index {index} out of range for {count} compartments")]
    UnknownCompartment {
        /// Offending index.
        index: usize,

        /// Number of declared compartments.
        count: usize,
    },

    /// An edge points from a compartment back to itself.
    ///
    /// Self-decay is expressed as a loss to [`Target::Environment`].
    #[error("compartment {compartment} cannot transfer to itself")]
    SelfTransfer {
        /// Offending compartment index.
        compartment: usize,
    },

    /// An integration horizon is negative, infinite, or `NaN`.
    #[error("integration duration must be finite and non-negative, got {duration}")]
    InvalidDuration {
        /// The requested duration.
        duration: f64,
    },

    /// A horizon would need more steps than the integration config allows.
    #[error("integration needs {requested} steps, limit is {max_steps}")]
    TooManySteps {
        /// Steps needed to cover the horizon at the configured step size.
        requested: f64,

        /// Configured step limit.
        max_steps: usize,
    },

    /// Two compartments share a name.
    #[error("duplicate compartment name {name:?}")]
    DuplicateName {
        /// The repeated name.
        name: String,
    },
}

impl CompartmentError {
    /// Checks a slice length against the expected compartment count.
    pub(crate) fn check_dimension(expected: usize, actual: usize) -> Result<(), Self> {
        if expected == actual {
            Ok(())
        } else {
            Err(Self::InvalidDimension { expected, actual })
        }
    }
}
