//! Three-compartment forest biomass decay.
//!
//! Living trees die into dead biomass, dead biomass decomposes into humus,
//! and humus mineralizes out of the system:
//!
//! ```text
//! dx/dt = -x + 3y      (humus)
//! dy/dt = -3y + 5z     (dead biomass)
//! dz/dt = -5z          (living biomass)
//! ```
//!
//! Quantities are in thousands of tons.

use super::compartment::{CompartmentError, CompartmentModel, StatePoint, TransferGraph};

/// State index of humus.
pub const HUMUS: usize = 0;

/// State index of dead biomass.
pub const DEAD_BIOMASS: usize = 1;

/// State index of living biomass.
pub const LIVING_BIOMASS: usize = 2;

/// Initial living biomass of the reference stand.
pub const INITIAL_LIVING_BIOMASS: f64 = 809_601.0;

/// Rate constants of the forest model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForestRates {
    /// Humus loss to the environment.
    pub humus_decay: f64,

    /// Dead biomass decomposing into humus.
    pub dead_to_humus: f64,

    /// Living biomass dying into dead biomass.
    pub living_to_dead: f64,
}

impl Default for ForestRates {
    fn default() -> Self {
        Self {
            humus_decay: 1.0,
            dead_to_humus: 3.0,
            living_to_dead: 5.0,
        }
    }
}

/// Builds the forest biomass model.
///
/// # Errors
///
/// Returns [`CompartmentError::InvalidParameter`] if any rate is negative or `NaN`.
///
/// # Example
///
/// ```
/// use compartment_models::models::ecology::biomass::{self, ForestRates};
///
/// let model = biomass::forest(ForestRates::default()).unwrap();
/// let start = biomass::initial_state();
///
/// let d = model.evaluate(start.time, &start.state).unwrap();
/// assert_eq!(d, vec![0.0, 4_048_005.0, -4_048_005.0]);
/// ```
pub fn forest(rates: ForestRates) -> Result<CompartmentModel, CompartmentError> {
    let graph = TransferGraph::new(["humus", "dead_biomass", "living_biomass"])?
        .loss(HUMUS, rates.humus_decay)?
        .transfer(DEAD_BIOMASS, HUMUS, rates.dead_to_humus)?
        .transfer(LIVING_BIOMASS, DEAD_BIOMASS, rates.living_to_dead)?;

    Ok(CompartmentModel::new(graph))
}

/// The reference initial condition: a living stand with no dead biomass or humus.
#[must_use]
pub fn initial_state() -> StatePoint {
    StatePoint::new(0.0, [0.0, 0.0, INITIAL_LIVING_BIOMASS])
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::ecology::compartment::{
        Crossing, CrossingConfig, IntegrationConfig, Target, crossing_time, integrate,
    };
    use crate::support::constraint::{ConstraintError, NonNegative};

    #[test]
    fn layout() {
        let model = forest(ForestRates::default()).unwrap();
        let graph = model.graph();

        assert_eq!(graph.index_of("humus"), Some(HUMUS));
        assert_eq!(graph.index_of("dead_biomass"), Some(DEAD_BIOMASS));
        assert_eq!(graph.index_of("living_biomass"), Some(LIVING_BIOMASS));

        assert_eq!(model.outflow_rate(HUMUS), 1.0);
        assert_eq!(model.outflow_rate(DEAD_BIOMASS), 3.0);
        assert_eq!(model.outflow_rate(LIVING_BIOMASS), 5.0);
    }

    #[test]
    fn reference_derivative() {
        let model = forest(ForestRates::default()).unwrap();
        let start = initial_state();
        let d = model.evaluate(start.time, &start.state).unwrap();
        assert_eq!(d, vec![0.0, 4_048_005.0, -4_048_005.0]);
    }

    #[test]
    fn dimension_mismatch() {
        let model = forest(ForestRates::default()).unwrap();
        assert_eq!(
            model.evaluate(0.0, &[1.0, 2.0]),
            Err(CompartmentError::InvalidDimension {
                expected: 3,
                actual: 2
            })
        );
    }

    #[test]
    fn negative_rate_is_rejected() {
        let rates = ForestRates {
            dead_to_humus: -3.0,
            ..ForestRates::default()
        };
        assert_eq!(
            forest(rates).unwrap_err(),
            CompartmentError::InvalidParameter {
                from: DEAD_BIOMASS,
                to: Target::Compartment(HUMUS),
                error: ConstraintError::Negative,
            }
        );
    }

    #[test]
    fn biomass_leaves_the_stand_over_time() {
        let model = forest(ForestRates::default()).unwrap();
        let trajectory = integrate(
            &model,
            &initial_state(),
            NonNegative::new(10.0).unwrap(),
            &IntegrationConfig::default(),
        )
        .unwrap();

        let last = trajectory.last().unwrap();
        assert_relative_eq!(last.time, 10.0);
        assert!(last.state.iter().all(|&q| q >= 0.0));
        assert!(model.total(&last.state).unwrap() < 1e-2 * INITIAL_LIVING_BIOMASS);
    }

    #[test]
    fn dead_biomass_peaks_before_humus() {
        let model = forest(ForestRates::default()).unwrap();
        let config = CrossingConfig::default();
        let start = initial_state();

        let dead = crossing_time(&model, &start, DEAD_BIOMASS, Crossing::Peak, [0.01, 4.0], &config)
            .unwrap();
        let humus = crossing_time(&model, &start, HUMUS, Crossing::Peak, [0.01, 4.0], &config)
            .unwrap();

        assert_relative_eq!(dead.time, (5.0_f64 / 3.0).ln() / 2.0, epsilon = 1e-8);
        assert_relative_eq!(humus.time, 5.0_f64.ln() / 2.0, epsilon = 1e-8);
    }
}
