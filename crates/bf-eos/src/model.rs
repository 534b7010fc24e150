//! Equation-of-state trait and validation helpers.

use crate::error::{EosError, EosResult};

/// Thermodynamic properties evaluated at one temperature (natural units).
///
/// Batches the quantities most callers need together so a single temperature
/// inversion serves all of them.
#[derive(Clone, Debug)]
pub struct ThermoPack {
    /// Temperature [fm^-1]
    pub t: f64,

    /// Energy density [fm^-4]
    pub e: f64,

    /// Pressure [fm^-4]
    pub p: f64,

    /// Entropy density [fm^-3]
    pub s: f64,

    /// Speed of sound squared (dimensionless)
    pub cs2: f64,
}

/// Equation of state of the medium, including the quasiparticle auxiliary
/// functions and kinetic coefficients that the relaxation-time closures use.
///
/// Implementations must be thread-safe (Send + Sync) and stateless after
/// construction. Every method rejects non-positive or non-finite inputs.
pub trait EquationOfState: Send + Sync {
    /// Get the model name (for debugging/logging).
    fn name(&self) -> &str;

    /// Equilibrium energy density e(T).
    fn energy_density(&self, t: f64) -> EosResult<f64>;

    /// Equilibrium pressure p(T).
    fn pressure(&self, t: f64) -> EosResult<f64>;

    /// Entropy density s(T) = (e + p) / T.
    fn entropy_density(&self, t: f64) -> EosResult<f64> {
        validation::validate_temperature(t)?;
        let s = (self.energy_density(t)? + self.pressure(t)?) / t;
        validation::validate_positive(s, "entropy density must be positive and finite")?;
        Ok(s)
    }

    /// Speed of sound squared dp/de at temperature T.
    fn speed_of_sound_squared(&self, t: f64) -> EosResult<f64>;

    /// Effective temperature: the T with e(T) = e.
    fn temperature(&self, e: f64) -> EosResult<f64>;

    /// Quasiparticle mass over temperature, z = m/T.
    fn mass_ratio(&self, t: f64) -> EosResult<f64>;

    /// Quasiparticle mass times its temperature derivative, m dm/dT.
    fn mass_derivative(&self, t: f64) -> EosResult<f64>;

    /// Equilibrium value of the quasiparticle mean field, B_eq(T).
    fn bag_function(&self, t: f64) -> EosResult<f64>;

    /// Kinetic shear coefficient beta_pi(T) = eta / tau_pi.
    fn beta_shear(&self, t: f64) -> EosResult<f64>;

    /// Kinetic bulk coefficient beta_Pi(T) = zeta / tau_Pi.
    fn beta_bulk(&self, t: f64) -> EosResult<f64>;

    /// Compute e, p, s and cs2 at one temperature.
    fn thermo_pack(&self, t: f64) -> EosResult<ThermoPack> {
        let e = self.energy_density(t)?;
        let p = self.pressure(t)?;
        Ok(ThermoPack {
            t,
            e,
            p,
            s: (e + p) / t,
            cs2: self.speed_of_sound_squared(t)?,
        })
    }
}

/// Validation helpers for equation-of-state inputs and outputs.
pub mod validation {
    use super::*;

    /// Ensure temperature is positive and finite.
    pub fn validate_temperature(t: f64) -> EosResult<()> {
        if !t.is_finite() || t <= 0.0 {
            return Err(EosError::NonPhysical {
                what: "temperature must be positive and finite",
            });
        }
        Ok(())
    }

    /// Ensure energy density is positive and finite.
    pub fn validate_energy_density(e: f64) -> EosResult<()> {
        if !e.is_finite() || e <= 0.0 {
            return Err(EosError::NonPhysical {
                what: "energy density must be positive and finite",
            });
        }
        Ok(())
    }

    /// Ensure the speed of sound is causal and the medium stable.
    pub fn validate_cs2(cs2: f64) -> EosResult<()> {
        if !cs2.is_finite() || cs2 <= 0.0 || cs2 > 1.0 {
            return Err(EosError::NonPhysical {
                what: "cs2 must lie in (0, 1]",
            });
        }
        Ok(())
    }

    pub fn validate_positive(v: f64, what: &'static str) -> EosResult<f64> {
        if !v.is_finite() || v <= 0.0 {
            return Err(EosError::NonPhysical { what });
        }
        Ok(v)
    }
}
