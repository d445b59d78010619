use twine_solvers::equation::bisection;

use super::super::IntegrationConfig;

/// Solver configuration for crossing-time searches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossingConfig {
    /// Maximum iteration count for the bisection solve.
    pub max_iters: usize,

    /// Absolute tolerance on the crossing time.
    pub time_tol: f64,

    /// Absolute tolerance on the crossing residual.
    pub residual_tol: f64,

    /// Integration settings used to evaluate each candidate time.
    pub integration: IntegrationConfig,
}

impl Default for CrossingConfig {
    fn default() -> Self {
        Self {
            max_iters: 100,
            time_tol: 1e-10,
            residual_tol: 1e-9,
            integration: IntegrationConfig::default(),
        }
    }
}

impl CrossingConfig {
    pub(super) fn bisection(&self) -> bisection::Config {
        bisection::Config {
            max_iters: self.max_iters,
            x_abs_tol: self.time_tol,
            x_rel_tol: 0.0,
            residual_tol: self.residual_tol,
        }
    }
}
