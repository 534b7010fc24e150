//! Relaxation-time closures for shear and bulk.

use bf_eos::Medium;

use crate::error::{SimError, SimResult};

/// How the relaxation times are tied to the medium.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RelaxationClosure {
    /// Asymptotic small-mass expressions:
    /// `tau_pi = 5 (eta/s) / T`, `tau_Pi = (zeta/s) / (15 T (1/3 - cs2)^2)`.
    #[default]
    FixedMass,
    /// Kinetic coefficients of the quasiparticle gas:
    /// `tau_pi = (e + p)(eta/s) / (T beta_pi)`, `tau_Pi = (e + p)(zeta/s) / (T beta_Pi)`.
    Kinetic,
}

/// Shear and bulk relaxation times [fm].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RelaxationTimes {
    pub shear: f64,
    pub bulk: f64,
}

impl RelaxationClosure {
    pub fn name(&self) -> &'static str {
        match self {
            RelaxationClosure::FixedMass => "fixed_mass",
            RelaxationClosure::Kinetic => "kinetic",
        }
    }

    /// Relaxation times at temperature `t` with equilibrium `e`, `p`.
    pub fn relaxation_times(
        &self,
        medium: &Medium,
        t: f64,
        e: f64,
        p: f64,
    ) -> SimResult<RelaxationTimes> {
        let eta_s = medium.viscosity.shear(t);
        let zeta_s = medium.viscosity.bulk(t);
        let times = match self {
            RelaxationClosure::FixedMass => {
                let cs2 = medium.eos.speed_of_sound_squared(t)?;
                let conformal_breaking = 1.0 / 3.0 - cs2;
                RelaxationTimes {
                    shear: 5.0 * eta_s / t,
                    bulk: zeta_s / (15.0 * t * conformal_breaking * conformal_breaking),
                }
            }
            RelaxationClosure::Kinetic => {
                let w = e + p;
                RelaxationTimes {
                    shear: w * eta_s / (t * medium.eos.beta_shear(t)?),
                    bulk: w * zeta_s / (t * medium.eos.beta_bulk(t)?),
                }
            }
        };

        if !(times.shear.is_finite() && times.shear > 0.0) {
            return Err(SimError::NonPhysical {
                what: "shear relaxation time must be positive and finite",
            });
        }
        if !(times.bulk.is_finite() && times.bulk > 0.0) {
            return Err(SimError::NonPhysical {
                what: "bulk relaxation time must be positive and finite",
            });
        }
        Ok(times)
    }
}
