//! Primitive variables: four-velocity, energy density and pressure.

use bf_core::StateVector;
use nalgebra::Vector4;

/// Milne metric `g = diag(1, -1, -1, -tau^2)` at one proper time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MilneMetric {
    tau: f64,
}

impl MilneMetric {
    pub fn at(tau: f64) -> Self {
        Self { tau }
    }

    pub fn tau(&self) -> f64 {
        self.tau
    }

    pub fn diagonal(&self) -> Vector4<f64> {
        Vector4::new(1.0, -1.0, -1.0, -self.tau * self.tau)
    }

    /// `g_{mu nu} a^mu b^nu`
    pub fn dot(&self, a: &Vector4<f64>, b: &Vector4<f64>) -> f64 {
        a.component_mul(b).dot(&self.diagonal())
    }
}

/// Contravariant fluid four-velocity `(u^tau, u^x, u^y, u^eta)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FourVelocity(Vector4<f64>);

impl FourVelocity {
    pub fn new(ut: f64, ux: f64, uy: f64, un: f64) -> Self {
        Self(Vector4::new(ut, ux, uy, un))
    }

    /// Fluid at rest in Milne coordinates (Bjorken flow).
    pub fn at_rest() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0)
    }

    pub fn ut(&self) -> f64 {
        self.0.x
    }

    pub fn ux(&self) -> f64 {
        self.0.y
    }

    pub fn uy(&self) -> f64 {
        self.0.z
    }

    pub fn un(&self) -> f64 {
        self.0.w
    }

    pub fn as_vector(&self) -> &Vector4<f64> {
        &self.0
    }

    /// `|u.u - 1|` under the given metric.
    pub fn normalization_residual(&self, metric: &MilneMetric) -> f64 {
        (metric.dot(&self.0, &self.0) - 1.0).abs()
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|c| c.is_finite())
    }
}

/// Local rest-frame quantities recovered from the conserved variables.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Primitives {
    pub u: FourVelocity,
    /// Energy density [fm^-4]
    pub e: f64,
    /// Equilibrium pressure [fm^-4]
    pub p: f64,
}

impl Primitives {
    pub fn at_rest(e: f64, p: f64) -> Self {
        Self {
            u: FourVelocity::at_rest(),
            e,
            p,
        }
    }

    /// Forward map: the state whose `T^{tau mu}` these primitives produce.
    ///
    /// `T^{tau mu} = (e + p + Pi) u^tau u^mu - (p + Pi) g^{tau mu}`; the shear
    /// scalar only enters `T^{eta eta}` and is carried through unchanged.
    pub fn tau_momentum(&self, pi: f64, bulk: f64) -> StateVector {
        let big_p = self.p + bulk;
        let w = self.e + big_p;
        let ut = self.u.ut();
        StateVector::new(
            w * ut * ut - big_p,
            w * ut * self.u.ux(),
            w * ut * self.u.uy(),
            w * ut * self.u.un(),
            pi,
            bulk,
        )
    }
}
