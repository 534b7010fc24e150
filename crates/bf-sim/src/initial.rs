//! Initial conditions at tau0.

use bf_core::StateVector;
use bf_eos::Medium;

use crate::error::{SimError, SimResult};

/// Initial-condition family for the dissipative quantities.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum InitialCondition {
    /// Shear and bulk start at their Navier-Stokes values.
    #[default]
    Equilibrium,
    /// Fixed pressure anisotropy from a glasma-like early stage:
    /// `P_L = pl_ratio * e/3`, `P_T = pt_ratio * e/3`.
    Glasma { pl_ratio: f64, pt_ratio: f64 },
}

impl InitialCondition {
    pub const GLASMA_PL_RATIO: f64 = 0.014925;
    pub const GLASMA_PT_RATIO: f64 = 1.4925;

    pub fn glasma() -> Self {
        InitialCondition::Glasma {
            pl_ratio: Self::GLASMA_PL_RATIO,
            pt_ratio: Self::GLASMA_PT_RATIO,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            InitialCondition::Equilibrium => "equilibrium",
            InitialCondition::Glasma { .. } => "glasma",
        }
    }

    /// State at rest with temperature `t0` at proper time `tau0`.
    pub fn state(&self, medium: &Medium, t0: f64, tau0: f64) -> SimResult<StateVector> {
        if !(tau0.is_finite() && tau0 > 0.0) {
            return Err(SimError::InvalidArg {
                what: "tau0 must be positive",
            });
        }
        let pack = medium.eos.thermo_pack(t0)?;
        let (e, p, s) = (pack.e, pack.p, pack.s);

        let (pi, bulk) = match *self {
            InitialCondition::Equilibrium => (
                4.0 * s * medium.viscosity.shear(t0) / (3.0 * tau0),
                -s * medium.viscosity.bulk(t0) / tau0,
            ),
            InitialCondition::Glasma { pl_ratio, pt_ratio } => {
                if !(pl_ratio.is_finite() && pt_ratio.is_finite() && pl_ratio >= 0.0) {
                    return Err(SimError::InvalidArg {
                        what: "glasma pressure ratios must be finite and non-negative",
                    });
                }
                let pl = pl_ratio * e / 3.0;
                let pt = pt_ratio * e / 3.0;
                (2.0 * (pt - pl) / 3.0, 2.0 * pt / 3.0 + pl / 3.0 - p)
            }
        };

        Ok(StateVector::at_rest(e, pi, bulk))
    }
}
