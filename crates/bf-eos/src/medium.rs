//! The fluid medium: equation of state plus transport coefficients.

use std::fmt;
use std::sync::Arc;

use crate::error::EosResult;
use crate::model::EquationOfState;
use crate::quasiparticle::{QuasiparticleGas, QuasiparticleParams};
use crate::viscosity::SpecificViscosity;

/// Everything the evolution needs to know about the material being evolved.
#[derive(Clone)]
pub struct Medium {
    pub eos: Arc<dyn EquationOfState>,
    pub viscosity: SpecificViscosity,
}

impl Medium {
    pub fn new(eos: Arc<dyn EquationOfState>, viscosity: SpecificViscosity) -> EosResult<Self> {
        viscosity.validate()?;
        Ok(Self { eos, viscosity })
    }

    /// Quasiparticle gas with the given parameters.
    pub fn quasiparticle(
        params: QuasiparticleParams,
        viscosity: SpecificViscosity,
    ) -> EosResult<Self> {
        let gas = QuasiparticleGas::new(params)?;
        Self::new(Arc::new(gas), viscosity)
    }

    /// Default quasiparticle gas and viscosities.
    pub fn standard() -> EosResult<Self> {
        Self::quasiparticle(QuasiparticleParams::default(), SpecificViscosity::default())
    }
}

impl fmt::Debug for Medium {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Medium")
            .field("eos", &self.eos.name())
            .field("viscosity", &self.viscosity)
            .finish()
    }
}
