//! Recovery of primitive variables from the conserved state.
//!
//! With `M^2 = (T^{tau x})^2 + (T^{tau y})^2 + tau^2 (T^{tau eta})^2` and
//! `P(e) = p(e) + Pi`, the energy density solves
//!
//! ```text
//! e = T^{tau tau} - M^2 / (T^{tau tau} + P(e))
//! ```
//!
//! and the flow velocity follows as `v = M / (T^{tau tau} + P)`.

use std::sync::Arc;

use bf_core::StateVector;
use bf_eos::EquationOfState;
use tracing::trace;

use crate::error::{SolverError, SolverResult};
use crate::newton::{NewtonConfig, bracketed_newton};
use crate::primitive::{FourVelocity, MilneMetric, Primitives};

/// Maps a conserved state at proper time `tau` to its primitive variables.
pub trait Reconstruct: Send + Sync {
    fn reconstruct(&self, x: &StateVector, tau: f64) -> SolverResult<Primitives>;
}

/// Reconstruction settings.
#[derive(Clone, Debug)]
pub struct ReconstructConfig {
    pub newton: NewtonConfig,
    /// Largest accepted `|u.u - 1|`
    pub normalization_tol: f64,
}

impl Default for ReconstructConfig {
    fn default() -> Self {
        Self {
            newton: NewtonConfig::default(),
            normalization_tol: 1e-10,
        }
    }
}

/// Root-finding reconstructor backed by an equation of state.
#[derive(Clone)]
pub struct PrimitiveSolver {
    eos: Arc<dyn EquationOfState>,
    config: ReconstructConfig,
}

impl PrimitiveSolver {
    pub fn new(eos: Arc<dyn EquationOfState>) -> Self {
        Self::with_config(eos, ReconstructConfig::default())
    }

    pub fn with_config(eos: Arc<dyn EquationOfState>, config: ReconstructConfig) -> Self {
        Self { eos, config }
    }

    pub fn config(&self) -> &ReconstructConfig {
        &self.config
    }

    /// Pressure and cs2 at energy density `e`.
    fn pressure_and_cs2(&self, e: f64) -> SolverResult<(f64, f64)> {
        let t = self.eos.temperature(e)?;
        Ok((self.eos.pressure(t)?, self.eos.speed_of_sound_squared(t)?))
    }
}

fn non_physical(what: String) -> SolverError {
    SolverError::NonPhysical { what }
}

impl Reconstruct for PrimitiveSolver {
    fn reconstruct(&self, x: &StateVector, tau: f64) -> SolverResult<Primitives> {
        if !x.is_finite() {
            return Err(non_physical(format!("non-finite state {x:?}")));
        }
        if !(tau.is_finite() && tau > 0.0) {
            return Err(non_physical(format!("proper time {tau}")));
        }
        if x.ttt <= 0.0 {
            return Err(non_physical(format!("T^tautau = {} <= 0", x.ttt)));
        }

        let m2 = x.ttx * x.ttx + x.tty * x.tty + tau * tau * x.ttn * x.ttn;
        let ttt = x.ttt;
        let bulk = x.bulk;

        let residual = |e: f64| -> SolverResult<(f64, f64)> {
            let (p, cs2) = self.pressure_and_cs2(e)?;
            let denom = ttt + p + bulk;
            if denom <= 0.0 {
                return Err(non_physical(format!(
                    "T^tautau + p + Pi = {denom} <= 0 at e = {e}"
                )));
            }
            Ok((e - ttt + m2 / denom, 1.0 - m2 * cs2 / (denom * denom)))
        };
        let root = bracketed_newton(ttt, 0.0, ttt, residual, &self.config.newton)?;
        trace!(iterations = root.iterations, e = root.x, "reconstructed energy density");

        let e = root.x;
        if !e.is_finite() || e <= 0.0 || e > ttt {
            return Err(non_physical(format!("energy density {e} outside (0, {ttt}]")));
        }
        let (p, _) = self.pressure_and_cs2(e)?;
        let denom = ttt + p + bulk;
        if denom <= 0.0 {
            return Err(non_physical(format!("T^tautau + p + Pi = {denom} <= 0")));
        }

        let v = m2.sqrt() / denom;
        if v >= 1.0 {
            return Err(non_physical(format!("flow velocity {v} >= 1")));
        }
        let ut = 1.0 / (1.0 - v * v).sqrt();
        let u = FourVelocity::new(ut, ut * x.ttx / denom, ut * x.tty / denom, ut * x.ttn / denom);
        if !u.is_finite() {
            return Err(non_physical(format!("non-finite four-velocity {u:?}")));
        }

        let residual = u.normalization_residual(&MilneMetric::at(tau));
        if residual > self.config.normalization_tol {
            return Err(non_physical(format!(
                "four-velocity normalization off by {residual:.3e}"
            )));
        }

        Ok(Primitives { u, e, p })
    }
}
