//! Fixed-step time integrators.

use crate::error::SimResult;
use crate::model::TransientModel;

/// Trait for time integrators.
pub trait Integrator {
    /// Advance state by one time step, returning the new state together with
    /// its auxiliary quantities at `t + dt`.
    fn step<M: TransientModel>(
        &self,
        model: &mut M,
        t: f64,
        x: &M::State,
        aux: &M::Aux,
        dt: f64,
    ) -> SimResult<(M::State, M::Aux)>;
}

/// Heun predictor-corrector (2nd order) with re-synchronization after each
/// stage.
#[derive(Clone, Debug)]
pub struct Heun;

impl Integrator for Heun {
    fn step<M: TransientModel>(
        &self,
        model: &mut M,
        t: f64,
        x: &M::State,
        aux: &M::Aux,
        dt: f64,
    ) -> SimResult<(M::State, M::Aux)> {
        let t_end = t + dt;

        // Predictor
        let k1 = model.rhs(t, x, aux)?;
        let x_mid = model.add(x, &model.scale(&k1, dt));
        let aux_mid = model.sync(t_end, &x_mid)?;

        // Corrector, from the predicted state
        let k2 = model.rhs(t_end, &x_mid, &aux_mid)?;
        let x_end = model.add(&x_mid, &model.scale(&k2, dt));

        // x_new = (x + x_end) / 2
        let x_new = model.scale(&model.add(x, &x_end), 0.5);
        let aux_new = model.sync(t_end, &x_new)?;
        Ok((x_new, aux_new))
    }
}

/// Forward Euler (explicit, 1st order). Reference scheme for accuracy tests.
#[derive(Clone, Debug)]
pub struct ForwardEuler;

impl Integrator for ForwardEuler {
    fn step<M: TransientModel>(
        &self,
        model: &mut M,
        t: f64,
        x: &M::State,
        aux: &M::Aux,
        dt: f64,
    ) -> SimResult<(M::State, M::Aux)> {
        let xdot = model.rhs(t, x, aux)?;
        let x_new = model.add(x, &model.scale(&xdot, dt));
        let aux_new = model.sync(t + dt, &x_new)?;
        Ok((x_new, aux_new))
    }
}
