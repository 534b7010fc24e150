//! TransientModel trait for pluggable dynamic systems.

use crate::error::SimResult;

/// Trait for transient (dynamic) system models.
///
/// Besides the integrated state, a model carries auxiliary quantities that
/// are derived from the state rather than integrated (for hydrodynamics, the
/// primitive variables). The integrator re-derives them with [`sync`] after
/// every stage, so `rhs` always sees an `aux` consistent with `x`.
///
/// [`sync`]: TransientModel::sync
pub trait TransientModel {
    /// Integrated state (must be Clone).
    type State: Clone;

    /// Quantities derived from the state at a given time.
    type Aux: Clone;

    /// Return the initial state at time `t0`.
    fn initial_state(&mut self, t0: f64) -> SimResult<Self::State>;

    /// Compute state derivative dxdt = f(t, x, aux).
    fn rhs(&mut self, t: f64, x: &Self::State, aux: &Self::Aux) -> SimResult<Self::State>;

    /// Derive the auxiliary quantities of state `x` at time `t`.
    fn sync(&mut self, t: f64, x: &Self::State) -> SimResult<Self::Aux>;

    /// Add two states element-wise: result = a + b.
    fn add(&self, a: &Self::State, b: &Self::State) -> Self::State;

    /// Scale a state by a scalar: result = scale * a.
    fn scale(&self, a: &Self::State, scale: f64) -> Self::State;
}
