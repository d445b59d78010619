//! Fixed-step explicit schemes.

use super::super::CompartmentModel;

/// Explicit integration scheme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Method {
    /// First-order forward Euler.
    ForwardEuler,

    /// Classic fourth-order Runge-Kutta.
    #[default]
    RungeKutta4,
}

impl Method {
    pub(super) fn stepper(self, dim: usize) -> Box<dyn Stepper> {
        match self {
            Method::ForwardEuler => Box::new(ForwardEuler::new(dim)),
            Method::RungeKutta4 => Box::new(RungeKutta4::new(dim)),
        }
    }
}

/// Advances a state in place by one step of size `dt`.
pub(super) trait Stepper {
    fn step(&mut self, model: &CompartmentModel, state: &mut [f64], dt: f64);
}

struct ForwardEuler {
    k: Vec<f64>,
}

impl ForwardEuler {
    fn new(dim: usize) -> Self {
        Self { k: vec![0.0; dim] }
    }
}

impl Stepper for ForwardEuler {
    fn step(&mut self, model: &CompartmentModel, state: &mut [f64], dt: f64) {
        model.apply(state, &mut self.k);
        for (s, k) in state.iter_mut().zip(&self.k) {
            *s += dt * k;
        }
    }
}

struct RungeKutta4 {
    k1: Vec<f64>,
    k2: Vec<f64>,
    k3: Vec<f64>,
    k4: Vec<f64>,
    tmp: Vec<f64>,
}

impl RungeKutta4 {
    fn new(dim: usize) -> Self {
        Self {
            k1: vec![0.0; dim],
            k2: vec![0.0; dim],
            k3: vec![0.0; dim],
            k4: vec![0.0; dim],
            tmp: vec![0.0; dim],
        }
    }
}

impl Stepper for RungeKutta4 {
    fn step(&mut self, model: &CompartmentModel, state: &mut [f64], dt: f64) {
        let half = 0.5 * dt;

        model.apply(state, &mut self.k1);

        for i in 0..state.len() {
            self.tmp[i] = state[i] + half * self.k1[i];
        }
        model.apply(&self.tmp, &mut self.k2);

        for i in 0..state.len() {
            self.tmp[i] = state[i] + half * self.k2[i];
        }
        model.apply(&self.tmp, &mut self.k3);

        for i in 0..state.len() {
            self.tmp[i] = state[i] + dt * self.k3[i];
        }
        model.apply(&self.tmp, &mut self.k4);

        for i in 0..state.len() {
            state[i] += dt / 6.0 * (self.k1[i] + 2.0 * self.k2[i] + 2.0 * self.k3[i] + self.k4[i]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::ecology::compartment::TransferGraph;

    fn single_pool(rate: f64) -> CompartmentModel {
        CompartmentModel::new(TransferGraph::new(["x"]).unwrap().loss(0, rate).unwrap())
    }

    #[test]
    fn euler_step() {
        let model = single_pool(2.0);
        let mut state = [1.0];
        Method::ForwardEuler.stepper(1).step(&model, &mut state, 0.1);
        assert_relative_eq!(state[0], 0.8);
    }

    #[test]
    fn rk4_step_matches_taylor_series() {
        // For dx/dt = -k x one RK4 step multiplies by the 4th-order Taylor
        // polynomial of exp(-k dt).
        let model = single_pool(2.0);
        let mut state = [1.0];
        Method::RungeKutta4.stepper(1).step(&model, &mut state, 0.1);

        let h: f64 = -0.2;
        let expected = 1.0 + h + h.powi(2) / 2.0 + h.powi(3) / 6.0 + h.powi(4) / 24.0;
        assert_relative_eq!(state[0], expected, epsilon = 1e-14);
    }
}
