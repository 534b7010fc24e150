//! Proper-time derivatives of the conserved and dissipative quantities.
//!
//! Energy-momentum conservation under boost-invariant expansion, plus
//! relaxation equations for the shear scalar `pi` and bulk pressure `Pi`:
//!
//! ```text
//! d pi/d tau = (pi_NS - pi)/tau_pi - (delta_pipi + tau_pipi/3) pi/tau + (2/3) lambda_piPi Pi/tau
//! d Pi/d tau = (Pi_NS - Pi)/tau_Pi - delta_PiPi Pi/tau + lambda_Pipi pi/tau
//! ```

use bf_core::StateVector;
use bf_eos::Medium;
use bf_solver::Primitives;

use crate::closure::RelaxationClosure;
use crate::error::SimResult;
use crate::transport::Transport;

/// Second-order transport coefficients of the relaxation equations.
#[derive(Clone, Debug, PartialEq)]
pub struct SecondOrderCoefficients {
    pub delta_pipi: f64,
    pub tau_pipi: f64,
    pub lambda_pibulk: f64,
    pub delta_bulkbulk: f64,
    /// `lambda_Pipi = lambda_bulkpi_scale * (1/3 - cs2)`
    pub lambda_bulkpi_scale: f64,
}

impl Default for SecondOrderCoefficients {
    /// Small-mass 14-moment values.
    fn default() -> Self {
        Self {
            delta_pipi: 4.0 / 3.0,
            tau_pipi: 10.0 / 7.0,
            lambda_pibulk: 6.0 / 5.0,
            delta_bulkbulk: 2.0 / 3.0,
            lambda_bulkpi_scale: 8.0 / 5.0,
        }
    }
}

impl SecondOrderCoefficients {
    pub fn lambda_bulkpi(&self, cs2: f64) -> f64 {
        self.lambda_bulkpi_scale * (1.0 / 3.0 - cs2)
    }
}

/// Derivative evaluator for the six-component state.
#[derive(Clone, Debug)]
pub struct FlowEquations {
    pub medium: Medium,
    pub closure: RelaxationClosure,
    pub coefficients: SecondOrderCoefficients,
}

impl FlowEquations {
    pub fn new(medium: Medium, closure: RelaxationClosure) -> Self {
        Self {
            medium,
            closure,
            coefficients: SecondOrderCoefficients::default(),
        }
    }

    /// Transport scalars for the given primitives.
    pub fn transport(&self, x: &StateVector, prims: &Primitives, tau: f64) -> SimResult<Transport> {
        Transport::evaluate(&self.medium, self.closure, prims.e, prims.p, x.bulk, tau)
    }

    /// All six derivatives, evaluated against the same input.
    pub fn rhs(&self, x: &StateVector, prims: &Primitives, tau: f64) -> SimResult<StateVector> {
        let tr = self.transport(x, prims, tau)?;
        Ok(StateVector::new(
            self.d_ttt(x, prims, tau),
            self.d_ttx(x, tau),
            self.d_tty(x, tau),
            self.d_ttn(x, tau),
            self.d_pi(x, &tr, tau),
            self.d_bulk(x, &tr, tau),
        ))
    }

    /// `tau^2 T^{eta eta}`
    fn tau2_tnn(x: &StateVector, prims: &Primitives, tau: f64) -> f64 {
        let big_p = prims.p + x.bulk;
        let un = prims.u.un();
        (prims.e + big_p) * tau * tau * un * un + big_p - x.pi
    }

    pub fn d_ttt(&self, x: &StateVector, prims: &Primitives, tau: f64) -> f64 {
        -(x.ttt + Self::tau2_tnn(x, prims, tau)) / tau
    }

    pub fn d_ttx(&self, x: &StateVector, tau: f64) -> f64 {
        -x.ttx / tau
    }

    pub fn d_tty(&self, x: &StateVector, tau: f64) -> f64 {
        -x.tty / tau
    }

    pub fn d_ttn(&self, x: &StateVector, tau: f64) -> f64 {
        -3.0 * x.ttn / tau
    }

    pub fn d_pi(&self, x: &StateVector, tr: &Transport, tau: f64) -> f64 {
        let c = &self.coefficients;
        (tr.pi_ns - x.pi) / tr.tau_pi - (c.delta_pipi + c.tau_pipi / 3.0) * x.pi / tau
            + 2.0 / 3.0 * c.lambda_pibulk * x.bulk / tau
    }

    pub fn d_bulk(&self, x: &StateVector, tr: &Transport, tau: f64) -> f64 {
        let c = &self.coefficients;
        (tr.bulk_ns - x.bulk) / tr.tau_bulk - c.delta_bulkbulk * x.bulk / tau
            + c.lambda_bulkpi(tr.cs2) * x.pi / tau
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bf_core::units::GEV_TO_INVERSE_FM;

    fn flow() -> FlowEquations {
        FlowEquations::new(Medium::standard().unwrap(), RelaxationClosure::FixedMass)
    }

    #[test]
    fn ideal_bjorken_energy_equation() {
        // no dissipation, at rest: d e / d tau = -(e + p) / tau
        let flow = flow();
        let prims = Primitives::at_rest(100.0, 30.0);
        let x = StateVector::at_rest(100.0, 0.0, 0.0);
        assert!((flow.d_ttt(&x, &prims, 2.0) + 65.0).abs() < 1e-12);
    }

    #[test]
    fn shear_reduces_longitudinal_work() {
        let flow = flow();
        let prims = Primitives::at_rest(100.0, 30.0);
        let x = StateVector::at_rest(100.0, 10.0, -2.0);
        // -(e + p + Pi - pi) / tau
        assert!((flow.d_ttt(&x, &prims, 1.0) + 118.0).abs() < 1e-12);
    }

    #[test]
    fn momentum_components_decay_geometrically() {
        let flow = flow();
        let x = StateVector::new(10.0, 1.0, -2.0, 0.5, 0.0, 0.0);
        assert_eq!(flow.d_ttx(&x, 2.0), -0.5);
        assert_eq!(flow.d_tty(&x, 2.0), 1.0);
        assert_eq!(flow.d_ttn(&x, 2.0), -0.75);
    }

    #[test]
    fn shear_relaxes_toward_navier_stokes() {
        let flow = flow();
        let t = 0.4 * GEV_TO_INVERSE_FM;
        let e = flow.medium.eos.energy_density(t).unwrap();
        let p = flow.medium.eos.pressure(t).unwrap();
        let prims = Primitives::at_rest(e, p);
        let x = StateVector::at_rest(e, 0.0, 0.0);
        let tau = 1.0;

        let tr = flow.transport(&x, &prims, tau).unwrap();
        let d = flow.rhs(&x, &prims, tau).unwrap();
        // starting from zero, both stresses move toward their targets
        assert!(d.pi > 0.0);
        assert!((d.pi - tr.pi_ns / tr.tau_pi).abs() < 1e-12);
        assert!((d.bulk - tr.bulk_ns / tr.tau_bulk).abs() < 1e-12);
        assert_eq!(d.ttx, 0.0);
    }

    #[test]
    fn coefficient_defaults() {
        let c = SecondOrderCoefficients::default();
        assert!((c.delta_pipi + c.tau_pipi / 3.0 - 38.0 / 21.0).abs() < 1e-15);
        assert_eq!(c.lambda_bulkpi(1.0 / 3.0), 0.0);
    }
}
